use crate::models::assessment::CursorSample;

pub fn distance(a: &CursorSample, b: &CursorSample) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Total pixel distance along an ordered sample path. Zero for fewer than
/// two samples.
pub fn path_distance(samples: &[CursorSample]) -> f64 {
    samples.windows(2).map(|pair| distance(&pair[0], &pair[1])).sum()
}
