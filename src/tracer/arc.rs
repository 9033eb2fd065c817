//! Circular interpolation for G2/G3.

use crate::tracer::toolpath::Point3;

/// Points emitted per arc, regardless of arc length
pub const ARC_SAMPLES: usize = 100;

/// Evenly spaced samples from `start` to `stop`, both ends included.
///
/// The last sample is exactly `stop`.
pub fn linspace(start: f64, stop: f64, samples: usize) -> impl Iterator<Item = f64> {
    let step = if samples > 1 {
        (stop - start) / (samples - 1) as f64
    } else {
        0.0
    };

    (0..samples).map(move |i| {
        if i + 1 == samples && samples > 1 {
            stop
        } else {
            start + step * i as f64
        }
    })
}

/// Sample an arc around `start + (i, j)` ending at the angle of `end`.
///
/// Radius comes from the start point, so an `end` off the circle is
/// projected onto it. Z is interpolated linearly. Direction (G2 vs G3) is not
/// distinguished: the sweep always runs from the start angle to the end angle.
pub fn interpolate(start: Point3, i: f64, j: f64, end: Point3) -> Vec<Point3> {
    let cx = start.x + i;
    let cy = start.y + j;

    let radius = (start.x - cx).hypot(start.y - cy);
    let start_angle = (start.y - cy).atan2(start.x - cx);
    let end_angle = (end.y - cy).atan2(end.x - cx);

    linspace(start_angle, end_angle, ARC_SAMPLES)
        .zip(linspace(start.z, end.z, ARC_SAMPLES))
        .map(|(angle, z)| Point3::new(cx + radius * angle.cos(), cy + radius * angle.sin(), z))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: Point3, b: Point3) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS
    }

    #[test]
    fn test_linspace_endpoints() {
        let samples: Vec<f64> = linspace(0.0, 1.0, 5).collect();
        assert_eq!(samples, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 1).collect::<Vec<_>>(), vec![3.0]);
    }

    #[test]
    fn test_quarter_circle() {
        // Centre at (10, 0), from angle pi to pi/2.
        let points = interpolate(Point3::ORIGIN, 10.0, 0.0, Point3::new(10.0, 10.0, 2.0));

        assert_eq!(points.len(), ARC_SAMPLES);
        assert!(approx(points[0], Point3::ORIGIN));
        assert!(approx(points[ARC_SAMPLES - 1], Point3::new(10.0, 10.0, 2.0)));
        for p in &points {
            let r = (p.x - 10.0).hypot(p.y);
            assert!((r - 10.0).abs() < EPS);
        }
    }

    #[test]
    fn test_degenerate_arc_is_coincident() {
        let points = interpolate(Point3::ORIGIN, 5.0, 0.0, Point3::ORIGIN);

        assert_eq!(points.len(), ARC_SAMPLES);
        assert!(points.iter().all(|p| *p == points[0]));
        assert!(approx(points[0], Point3::ORIGIN));
    }
}
