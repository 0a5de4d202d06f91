use ballpit::{BroadPhaseKind, Fp, Scene, SimConfig};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runs a ball pit headless and reports energy and broad phase timings.
#[derive(Parser, Debug)]
struct Args {
    /// YAML scenario; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the scenario's broad phase (naive, grid or sap)
    #[arg(short, long)]
    broad_phase: Option<BroadPhaseKind>,
    #[arg(short, long, default_value_t = 1000)]
    steps: u32,
    /// Time step in milliseconds
    #[arg(long, default_value_t = 16.0)]
    dt: Fp,
    #[arg(long, default_value_t = 100)]
    report_every: u32,
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let cfg: SimConfig = serde_yaml::from_reader(BufReader::new(file))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(kind) = args.broad_phase {
        cfg.broad_phase = kind;
    }
    cfg.validate()?;

    let mut scene = Scene::new(cfg.arena, cfg.physics)?;
    scene.select_broad_phase(cfg.broad_phase);
    scene.populate(&cfg.population)?;

    tracing::info!("running {} steps with dt = {} using the {} broad phase", args.steps, args.dt, cfg.broad_phase);
    let report_every = args.report_every.max(1);
    let mut window = Duration::ZERO;
    let mut total = Duration::ZERO;
    for i in 0..args.steps {
        let stats = scene.step(args.dt);
        window += stats.broad_phase;
        total += stats.broad_phase;
        if (i + 1) % report_every == 0 {
            tracing::info!(
                "step {}: energy {:.4}, {} collisions, mean broad phase {:?}",
                i + 1,
                stats.energy,
                stats.collisions,
                window / report_every
            );
            window = Duration::ZERO;
        }
    }

    if args.steps > 0 {
        tracing::info!("mean broad phase time was {:?}", total / args.steps);
    }
    Ok(())
}
