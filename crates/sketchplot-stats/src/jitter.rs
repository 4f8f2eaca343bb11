//! Stable display jitter
//!
//! Points that share a coordinate (box plot outliers, strip plot values)
//! are spread sideways so they stay distinguishable. The offset is a pure
//! function of the point's index and value, so a redraw places every point
//! exactly where it was before.

/// Horizontal offset in `[-amplitude, amplitude]` for the point at `index`
///
/// `seed = (index * 97 + floor(value * 1000)) mod 1000` (Euclidean, so
/// negative values still land in `0..1000`), mapped linearly from `[0, 999]`
/// onto `[-amplitude, amplitude]`. Non-finite values use seed 0.
pub fn jitter(index: usize, value: f64, amplitude: f64) -> f64 {
    let seed = jitter_seed(index, value);
    -amplitude + (seed / 999.0) * 2.0 * amplitude
}

fn jitter_seed(index: usize, value: f64) -> f64 {
    let scaled = (value * 1000.0).floor();
    if !scaled.is_finite() {
        return 0.0;
    }
    let index_term = (index % 1000) as f64 * 97.0;
    (index_term + scaled.rem_euclid(1000.0)).rem_euclid(1000.0)
}
