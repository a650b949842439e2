use nalgebra::Point3;

/// Evaluates a uniform Catmull-Rom segment between `p1` and `p2`.
///
/// `p0` and `p3` are the outer neighbours; at `t = 0` the result is exactly
/// `p1` and at `t = 1` it is `p2`.
pub fn catmull_rom(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    t: f64,
) -> Point3<f64> {
    let (p0, p1, p2, p3) = (p0.coords, p1.coords, p2.coords, p3.coords);
    let t2 = t * t;
    let t3 = t2 * t;

    let blended = 2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3;

    Point3::from(0.5 * blended)
}

/// Indices of the four control points for `segment` in a sequence of `len`
/// points, clamped at both ends.
pub(crate) fn control_indices(segment: usize, len: usize) -> [usize; 4] {
    let last = len.saturating_sub(1);
    [
        segment.saturating_sub(1),
        segment,
        (segment + 1).min(last),
        (segment + 2).min(last),
    ]
}
