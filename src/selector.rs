//! Distinct random index selection.

use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::MAX_CANDIDATES;
use crate::error::SelectionError;

/// Draws `count` distinct integers uniformly from the inclusive range `[min, max]`.
///
/// Uses rejection sampling: every draw that collides with an earlier one is discarded
/// and redrawn. The domain is always a handful of roster slots, so collisions stay cheap.
/// The result has no ordering guarantee.
///
/// # Errors
///
/// Returns [`SelectionError::InsufficientRange`] if `count` exceeds the number of values
/// in the range (zero when `min > max`).
pub fn generate_random_numbers<R: Rng + ?Sized>(
    rng: &mut R,
    min: usize,
    max: usize,
    count: usize,
) -> Result<SmallVec<[usize; MAX_CANDIDATES]>, SelectionError> {
    let available = if max >= min { max - min + 1 } else { 0 };
    if count > available {
        return Err(SelectionError::InsufficientRange { min, max, count });
    }

    let mut drawn = SmallVec::with_capacity(count);
    while drawn.len() < count {
        let value = rng.random_range(min..=max);
        if drawn.contains(&value) {
            trace!(value, "Rejected duplicate draw");
            continue;
        }
        drawn.push(value);
    }

    Ok(drawn)
}
