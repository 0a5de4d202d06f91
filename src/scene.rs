use crate::{
    Body, BodyPair, BroadPhase, BroadPhaseKind, Fp, Naive, SweepAndPrune, UniformGrid, Vec2,
    config::{Arena, Physics, Population},
    error::ConfigError,
    integrate::integrate,
    narrow, response,
};
use std::time::{Duration, Instant};

/// Per-step observations for an external reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// Total mechanical energy after integration, before collision response
    pub energy: Fp,
    /// Wall-clock time spent finding colliding pairs, narrow phase included
    pub broad_phase: Duration,
    pub candidates: usize,
    pub collisions: usize,
}

/// Owns the bodies and the broadphase state, and advances them one step at a time.
#[derive(Debug, Clone)]
pub struct Scene {
    arena: Arena,
    physics: Physics,
    bodies: Vec<Body>,
    kind: BroadPhaseKind,
    naive: Naive,
    grid: UniformGrid,
    sap: SweepAndPrune,
    pairs: Vec<BodyPair>,
    stats: StepStats,
}

impl Scene {
    pub fn new(arena: Arena, physics: Physics) -> Result<Scene, ConfigError> {
        arena.validate()?;
        physics.validate()?;
        Ok(Scene {
            arena,
            physics,
            bodies: Vec::new(),
            kind: BroadPhaseKind::default(),
            naive: Naive,
            grid: UniformGrid::new(arena.width, arena.height, physics.grid_pairing),
            sap: SweepAndPrune::default(),
            pairs: Vec::new(),
            stats: StepStats::default(),
        })
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }
    #[inline]
    pub fn physics(&self) -> &Physics {
        &self.physics
    }
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
    #[inline]
    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }
    #[inline]
    pub fn broad_phase(&self) -> BroadPhaseKind {
        self.kind
    }
    #[inline]
    pub fn last_stats(&self) -> &StepStats {
        &self.stats
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(0.0, self.physics.gravity)
    }

    pub fn add_body(&mut self, body: Body) -> Result<usize, ConfigError> {
        //! Adds a body, returning its index. Indices stay stable until the next `clear`.
        if !(body.rad > 0.0) {
            return Err(ConfigError::InvalidSize { min: body.rad, max: body.rad });
        }
        self.grid.fit(body.rad);
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.grid.reset();
        self.stats = StepStats::default();
    }

    pub fn select_broad_phase(&mut self, kind: BroadPhaseKind) {
        if kind != self.kind {
            tracing::debug!(from = %self.kind, to = %kind, "switching broad phase");
            self.kind = kind;
        }
    }

    pub fn set_physics(&mut self, physics: Physics) -> Result<(), ConfigError> {
        //! Replaces gravity, elasticity and grid pairing; every body's acceleration is reset to the new gravity.
        physics.validate()?;
        self.physics = physics;
        self.grid.set_pairing(physics.grid_pairing);
        let g = self.gravity();
        for b in self.bodies.iter_mut() {
            b.acc = g;
        }
        Ok(())
    }

    pub fn populate(&mut self, pop: &Population) -> Result<(), ConfigError> {
        //! Replaces every body with `pop.count` random ones.
        pop.validate()?;
        self.clear();

        let rng = fastrand::Rng::with_seed(pop.seed);
        let g = self.gravity();
        let unit = || rng.f64() as Fp;
        for _ in 0..pop.count {
            let rad = pop.min_size + unit() * (pop.max_size - pop.min_size);
            let pos = Vec2::new(unit() * self.arena.width, unit() * self.arena.height);
            let vel = Vec2::new(
                pop.h_velocity / 2.0 - unit() * pop.h_velocity,
                pop.v_velocity / 2.0 - unit() * pop.v_velocity,
            );
            let tag = rng.u32(0..0x100_0000);
            self.add_body(Body::new(rad, pos, vel, g, tag)?)?;
        }
        tracing::info!(count = pop.count, seed = pop.seed, cell_size = ?self.grid.cell_size(), "populated scene");
        Ok(())
    }

    pub fn total_energy(&self) -> Fp {
        self.bodies.iter().map(Body::energy).sum()
    }
    pub fn kinetic_energy(&self) -> Fp {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    fn phase(&mut self) -> (&mut dyn BroadPhase, &[Body]) {
        let phase: &mut dyn BroadPhase = match self.kind {
            BroadPhaseKind::Naive => &mut self.naive,
            BroadPhaseKind::Grid => &mut self.grid,
            BroadPhaseKind::Sap => &mut self.sap,
        };
        (phase, &self.bodies)
    }

    pub fn collisions(&mut self, out: &mut Vec<BodyPair>) {
        //! Appends the pairs the selected broad phase confirms as colliding, without resolving them.
        let (phase, bodies) = self.phase();
        phase.collisions(bodies, out);
    }

    pub fn step(&mut self, dt: Fp) -> &StepStats {
        //! Integrates every body, then finds and resolves this step's collisions in order.
        debug_assert!(dt >= 0.0, "negative time step");
        let elasticity = self.physics.elasticity;

        let mut energy = 0.0;
        for b in self.bodies.iter_mut() {
            integrate(b, &self.arena, elasticity, dt);
            energy += b.energy();
        }

        let start = Instant::now();
        let mut pairs = std::mem::take(&mut self.pairs);
        pairs.clear();
        let (phase, bodies) = self.phase();
        phase.candidates(bodies, &mut pairs);
        let candidates = pairs.len();
        narrow::retain_colliding(bodies, &mut pairs);
        let broad_phase = start.elapsed();

        // pairs are resolved one at a time; a body in several pairs sees the earlier responses
        for &(a, b) in pairs.iter() {
            let (b1, b2) = response::pair_mut(&mut self.bodies, a, b);
            response::resolve(b1, b2, elasticity, dt);
        }

        self.stats = StepStats { energy, broad_phase, candidates, collisions: pairs.len() };
        self.pairs = pairs;
        tracing::trace!(candidates, collisions = self.stats.collisions, ?broad_phase, "step");
        &self.stats
    }
}
