//! Shuffle index selection
//!
//! Shuffle keeps no history: every draw is uniform over the queue minus the
//! current track, so a track may come back soon after it played.

use rand::Rng;

/// Pick a random index in `0..len` different from `exclude`
///
/// Resamples until a different index is drawn. With `len <= 1` there is no
/// alternative and `exclude` is returned unchanged.
pub fn pick_random_index<R: Rng + ?Sized>(len: usize, exclude: usize, rng: &mut R) -> usize {
    if len <= 1 {
        return exclude;
    }

    loop {
        let candidate = rng.gen_range(0..len);
        if candidate != exclude {
            return candidate;
        }
    }
}
