use super::math::Point;

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation between two points, per axis.
///
/// `progress <= 0` yields `start` and `progress >= 1` yields `end`, both
/// exactly, so a marker can never be pushed past either end of its path.
pub fn interpolate(start: Point, end: Point, progress: f64) -> Point {
    if progress <= 0.0 {
        return start;
    }
    if progress >= 1.0 {
        return end;
    }
    Point {
        top: lerp(start.top, end.top, progress),
        left: lerp(start.left, end.left, progress),
    }
}

/// Fraction of a fixed-step animation that has elapsed.
pub fn step_progress(step: u32, total_steps: u32) -> f64 {
    if total_steps == 0 {
        return 1.0;
    }
    f64::from(step) / f64::from(total_steps)
}
