use super::{BodyPair, BroadPhase};
use crate::{Body, Fp};
use fnv::{FnvBuildHasher, FnvHashSet};
use indexmap::IndexSet;

/// Projection of a body's bounding box onto one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Interval {
    /// Index of the body in the scene's body list
    index: usize,
    left: Fp,
    right: Fp,
}

/// Canonical pair key: the larger body's index first, ties broken by the larger index.
///
/// The ordering ignores the sweep order, so both axes produce equal keys for the same two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey(pub usize, pub usize);
impl PairKey {
    #[inline]
    pub fn new(bodies: &[Body], a: usize, b: usize) -> PairKey {
        let (ra, rb) = (bodies[a].rad, bodies[b].rad);
        if ra > rb || (ra == rb && a > b) {
            PairKey(a, b)
        } else {
            PairKey(b, a)
        }
    }
}

/// Sweep and prune over both axes, matching the overlaps found on each by [`PairKey`].
///
/// The sorted interval order survives between calls; bodies move little per step,
/// so re-sorting it is close to linear.
#[derive(Debug, Clone, Default)]
pub struct SweepAndPrune {
    xs: Vec<Interval>,
    ys: Vec<Interval>,
    /// Insertion ordered, keeping the output independent of hashing
    x_keys: IndexSet<PairKey, FnvBuildHasher>,
    y_keys: FnvHashSet<PairKey>,
}

impl SweepAndPrune {
    fn update(ivs: &mut Vec<Interval>, bodies: &[Body], axis: usize) {
        if ivs.len() == bodies.len() {
            // the previous order is a permutation of the current indices
            for v in ivs.iter_mut() {
                let bb = bodies[v.index].aabb();
                v.left = bb.min[axis];
                v.right = bb.max[axis];
            }
            // insertion sort due to its adaptivity: the list is expected to be mostly sorted due to temporal cohesion
            insertion_sort(ivs);
        } else {
            ivs.clear();
            ivs.extend(bodies.iter().enumerate().map(|(index, b)| {
                let bb = b.aabb();
                Interval { index, left: bb.min[axis], right: bb.max[axis] }
            }));
            // no guarantees as to order
            ivs.sort_unstable_by(|a, b| a.left.total_cmp(&b.left));
        }
    }

    fn sweep<S: Extend<PairKey>>(ivs: &[Interval], bodies: &[Body], keys: &mut S) {
        for (i, a) in ivs.iter().enumerate() {
            for b in ivs[i + 1..].iter() {
                if b.left > a.right {
                    break;
                }
                keys.extend(Some(PairKey::new(bodies, a.index, b.index)));
            }
        }
    }
}

impl BroadPhase for SweepAndPrune {
    fn candidates(&mut self, bodies: &[Body], out: &mut Vec<BodyPair>) {
        SweepAndPrune::update(&mut self.xs, bodies, 0);
        SweepAndPrune::update(&mut self.ys, bodies, 1);

        self.x_keys.clear();
        self.y_keys.clear();
        SweepAndPrune::sweep(&self.xs, bodies, &mut self.x_keys);
        SweepAndPrune::sweep(&self.ys, bodies, &mut self.y_keys);

        // overlapping on both axes: the bounding boxes intersect
        let y_keys = &self.y_keys;
        out.extend(self.x_keys.iter().filter(|k| y_keys.contains(k)).map(|k| (k.0, k.1)));
    }
}

// code based off of https://en.wikipedia.org/wiki/Insertion_sort#Algorithm
#[inline]
fn insertion_sort(a: &mut [Interval]) {
    for i in 1..a.len() {
        let val = a[i];
        let mut j = i;
        while j != 0 && a[j - 1].left > val.left {
            a[j] = a[j - 1];
            j -= 1;
        }
        a[j] = val;
    }
}
