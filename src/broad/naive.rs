use super::{BodyPair, BroadPhase};
use crate::{Body, narrow};

/// Tests every pair directly. O(n²), no auxiliary state; the reference the other phases are checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Naive;

impl BroadPhase for Naive {
    fn candidates(&mut self, bodies: &[Body], out: &mut Vec<BodyPair>) {
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if narrow::body_test(&bodies[i], &bodies[j]) {
                    out.push((i, j));
                }
            }
        }
    }

    #[inline]
    fn collisions(&mut self, bodies: &[Body], out: &mut Vec<BodyPair>) {
        // candidates are already exact
        self.candidates(bodies, out);
    }
}
