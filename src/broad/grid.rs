use super::{BodyPair, BroadPhase, GridPairing};
use crate::{Body, Fp};

/// Offsets of a cell's 3x3 neighbourhood, itself included.
const NEIGHBOURHOOD: [(isize, isize); 9] = [(-1, -1), (0, -1), (1, -1), (-1, 0), (0, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

/// Upper bound on the cells along either axis. Tiny bodies get cells wider than they need.
pub const MAX_AXIS_CELLS: usize = 512;

/// Uniform grid with cells as wide as the largest body seen since the last reset.
///
/// Two overlapping circles can then never be more than one cell apart, so a body's
/// 3x3 neighbourhood always holds every potential partner.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    width: Fp,
    height: Fp,
    pairing: GridPairing,
    cell_size: Fp,
    cols: usize,
    rows: usize,
    /// Column-major: `cells[x * rows + y]`
    cells: Vec<Vec<usize>>,
    /// Cell coordinates of each body, refreshed every query
    homes: Vec<(usize, usize)>,
}

impl UniformGrid {
    pub fn new(width: Fp, height: Fp, pairing: GridPairing) -> UniformGrid {
        UniformGrid {
            width,
            height,
            pairing,
            cell_size: 0.0,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            homes: Vec::new(),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> Fp {
        self.cell_size
    }
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        //! Returns `(columns, rows)`.
        (self.cols, self.rows)
    }
    #[inline]
    pub fn pairing(&self) -> GridPairing {
        self.pairing
    }
    pub fn set_pairing(&mut self, pairing: GridPairing) {
        self.pairing = pairing;
    }

    pub fn fit(&mut self, rad: Fp) {
        //! Grows the cells to fit a body of radius `rad`, rebuilding the grid if they grow.
        //! Cells never shrink below `1 / MAX_AXIS_CELLS` of the longer arena side.
        if rad * 2.0 > self.cell_size {
            let floor = self.width.max(self.height) / MAX_AXIS_CELLS as Fp;
            self.cell_size = (rad * 2.0).max(floor);
            self.rebuild();
        }
    }

    pub fn reset(&mut self) {
        //! Forgets all previously fitted bodies.
        self.cell_size = 0.0;
        self.cols = 0;
        self.rows = 0;
        self.cells.clear();
        self.homes.clear();
    }

    #[inline]
    fn axis_cells(extent: Fp, cell_size: Fp) -> usize {
        // the float to int cast saturates, so the bound also holds for huge ratios
        usize::min((extent / cell_size).floor() as usize, MAX_AXIS_CELLS) + 1
    }

    fn rebuild(&mut self) {
        self.cols = UniformGrid::axis_cells(self.width, self.cell_size);
        self.rows = UniformGrid::axis_cells(self.height, self.cell_size);
        self.cells.clear();
        self.cells.resize_with(self.cols * self.rows, Vec::new);
        tracing::debug!(cell_size = ?self.cell_size, cols = self.cols, rows = self.rows, "rebuilt uniform grid");
    }

    #[inline]
    fn cell_of(&self, coord: Fp, count: usize) -> usize {
        // bodies pushed past the walls by numerical slop land in an edge cell
        let c = (coord / self.cell_size).floor();
        if c <= 0.0 {
            0
        } else {
            usize::min(c as usize, count - 1)
        }
    }

    fn populate(&mut self, bodies: &[Body]) {
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
        self.homes.clear();
        for (i, b) in bodies.iter().enumerate() {
            let x = self.cell_of(b.pos.x, self.cols);
            let y = self.cell_of(b.pos.y, self.rows);
            self.cells[x * self.rows + y].push(i);
            self.homes.push((x, y));
        }
    }
}

impl BroadPhase for UniformGrid {
    fn candidates(&mut self, bodies: &[Body], out: &mut Vec<BodyPair>) {
        if bodies.is_empty() {
            return;
        }
        let max_rad = bodies.iter().fold(0.0, |m: Fp, b| m.max(b.rad));
        self.fit(max_rad);
        self.populate(bodies);

        for (i, &(x, y)) in self.homes.iter().enumerate() {
            for &(dx, dy) in NEIGHBOURHOOD.iter() {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= self.cols as isize || ny >= self.rows as isize {
                    continue;
                }
                for &j in self.cells[nx as usize * self.rows + ny as usize].iter() {
                    let report = match self.pairing {
                        GridPairing::Directional => j != i,
                        GridPairing::Unique => j < i,
                    };
                    if report {
                        out.push((i, j));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vec2, broad::tests::normalized};

    fn body(x: Fp, y: Fp, r: Fp) -> Body {
        Body::new(r, Vec2::new(x, y), Vec2::ZERO, Vec2::ZERO, 0).unwrap()
    }

    #[test]
    fn grid_sizing() {
        let mut g = UniformGrid::new(100.0, 50.0, GridPairing::Unique);
        assert_eq!(g.dims(), (0, 0));
        g.fit(5.0);
        assert_eq!(g.cell_size(), 10.0);
        assert_eq!(g.dims(), (11, 6));
        g.fit(3.0); // smaller bodies never shrink the cells
        assert_eq!(g.cell_size(), 10.0);
        g.fit(12.5);
        assert_eq!(g.cell_size(), 25.0);
        assert_eq!(g.dims(), (5, 3));
        g.reset();
        assert_eq!(g.cell_size(), 0.0);
        g.fit(1.0);
        assert_eq!(g.dims(), (51, 26));
    }

    #[test]
    fn grid_tiny_bodies() {
        let mut g = UniformGrid::new(800.0, 600.0, GridPairing::Unique);
        g.fit(1e-30);
        assert_eq!(g.cell_size(), 800.0 / MAX_AXIS_CELLS as Fp);
        let (cols, rows) = g.dims();
        assert!(cols <= MAX_AXIS_CELLS + 1 && rows <= MAX_AXIS_CELLS + 1);
        // still wider than any fitted body, so overlapping dust is found
        let bodies = vec![body(400.0, 300.0, 1e-30), body(400.0, 300.0, 1e-30), body(10.0, 10.0, 1e-30)];
        let mut pairs = Vec::new();
        g.collisions(&bodies, &mut pairs);
        assert_eq!(pairs, vec![(1, 0)]);
    }

    #[test]
    fn grid_neighbourhood() {
        let mut g = UniformGrid::new(100.0, 100.0, GridPairing::Unique);
        g.fit(5.0);
        // 0 & 1 in adjacent cells, 2 is two cells over, 3 escaped the arena and is clamped
        let bodies = vec![body(9.0, 9.0, 5.0), body(11.0, 9.0, 5.0), body(35.0, 9.0, 5.0), body(-3.0, 8.0, 5.0)];

        let mut pairs = Vec::new();
        g.candidates(&bodies, &mut pairs);
        let pairs = normalized(&pairs);
        assert!(pairs.contains(&(0, 1)));
        assert!(pairs.contains(&(0, 3)));
        assert!(!pairs.contains(&(0, 2)));
        assert!(!pairs.contains(&(1, 2)));
    }

    #[test]
    fn grid_pairing() {
        let bodies = vec![body(9.0, 9.0, 5.0), body(11.0, 9.0, 5.0)];

        let mut g = UniformGrid::new(100.0, 100.0, GridPairing::Directional);
        g.fit(5.0);
        let mut pairs = Vec::new();
        g.collisions(&bodies, &mut pairs);
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);

        g.set_pairing(GridPairing::Unique);
        let mut pairs = Vec::new();
        g.collisions(&bodies, &mut pairs);
        assert_eq!(pairs, vec![(1, 0)]);
    }

    #[test]
    fn grid_fits_unfitted_bodies() {
        let mut g = UniformGrid::new(100.0, 100.0, GridPairing::Unique);
        let bodies = vec![body(50.0, 50.0, 20.0), body(85.0, 50.0, 20.0)];
        let mut pairs = Vec::new();
        g.collisions(&bodies, &mut pairs);
        assert_eq!(g.cell_size(), 40.0);
        assert_eq!(pairs, vec![(1, 0)]);
    }
}
