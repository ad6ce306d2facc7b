//! Fixed-stride ring down-sampling.

use super::Position;

/// Rings longer than this are down-sampled.
pub const MAX_RING_VERTICES: usize = 100;

/// A simplified ring never has fewer vertices than this.
pub const MIN_RING_VERTICES: usize = 4;

/// Down-sample a polygon ring by a fixed stride.
///
/// The first and last vertex are always kept, so a closed ring stays closed.
/// The stride is at least 2 and grows with the ring so the result stays near
/// `MAX_RING_VERTICES`.
pub fn simplify_ring(ring: &[Position]) -> Vec<Position> {
    let len = ring.len();
    if len <= MAX_RING_VERTICES {
        return ring.to_vec();
    }

    let stride = len.div_ceil(MAX_RING_VERTICES).max(2);
    let mut simplified: Vec<Position> = ring[..len - 1].iter().step_by(stride).copied().collect();
    simplified.push(ring[len - 1]);

    if simplified.len() < MIN_RING_VERTICES {
        return ring.to_vec();
    }
    simplified
}
