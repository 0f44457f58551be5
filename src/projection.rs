//! Direction-to-panorama projection.
//!
//! An equirectangular source encodes longitude linearly across its width and
//! latitude across its height. These helpers turn a cube direction plus the
//! panorama's horizontal rotation into fractional source pixel coordinates
//! ready for kernel sampling. Pixel centers sit on integer coordinates,
//! hence the half-pixel shift at the end.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Longitude in [0, 2pi) and latitude in [0, pi] of a direction, with the
/// horizontal rotation applied. The direction does not have to be
/// normalized; both angles are scale-invariant.
#[inline]
pub fn spherical(dir: Vec3, rotation: f32) -> (f32, f32) {
    let lon = (dir.y.atan2(dir.x) + rotation).rem_euclid(TAU);
    // The ratio can drift a hair past 1 for axis-aligned directions.
    let lat = (dir.z / dir.length()).clamp(-1.0, 1.0).acos();
    (lon, lat)
}

/// Fractional source pixel coordinates for a direction.
#[inline]
pub fn project(dir: Vec3, rotation: f32, src_width: usize, src_height: usize) -> (f32, f32) {
    let (lon, lat) = spherical(dir, rotation);
    let x = src_width as f32 * lon / TAU - 0.5;
    let y = src_height as f32 * lat / PI - 0.5;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 1024;
    const H: usize = 512;

    #[test]
    fn test_equator_forward() {
        let (x, y) = project(Vec3::new(1.0, 0.0, 0.0), 0.0, W, H);
        assert!((x - (-0.5)).abs() < 1e-3);
        assert!((y - 255.5).abs() < 1e-3);
    }

    #[test]
    fn test_poles() {
        let (_, y_top) = project(Vec3::new(0.0, 0.0, 1.0), 0.0, W, H);
        let (_, y_bottom) = project(Vec3::new(0.0, 0.0, -1.0), 0.0, W, H);
        assert!((y_top - (-0.5)).abs() < 1e-3);
        assert!((y_bottom - 511.5).abs() < 1e-3);
    }

    /// Test: longitude wrap at the 0/2pi boundary
    /// Validates: directions a hair either side of +x map ~sourceWidth apart
    #[test]
    fn test_longitude_wrap() {
        let eps = 1e-4;
        let (x_below, y_below) = project(Vec3::new(1.0, -eps, 0.0), 0.0, W, H);
        let (x_above, y_above) = project(Vec3::new(1.0, eps, 0.0), 0.0, W, H);
        assert!(
            ((x_below - x_above) - W as f32).abs() < 0.1,
            "wrap gap was {}",
            x_below - x_above
        );
        assert!((y_below - y_above).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_shifts_longitude() {
        let dir = Vec3::new(0.0, -1.0, 0.0);
        let (x0, _) = project(dir, 0.0, W, H);
        let (x_pi, _) = project(dir, PI, W, H);
        // -pi/2 wraps to 3/4 turn; +pi lands on the quarter turn.
        assert!((x0 - (0.75 * W as f32 - 0.5)).abs() < 1e-2);
        assert!((x_pi - (0.25 * W as f32 - 0.5)).abs() < 1e-2);
    }

    #[test]
    fn test_rotation_is_periodic() {
        let dir = Vec3::new(0.3, 0.7, -0.2);
        let (x0, y0) = project(dir, 1.25, W, H);
        let (x1, y1) = project(dir, 1.25 + TAU, W, H);
        assert!((x0 - x1).abs() < 1e-2);
        assert!((y0 - y1).abs() < 1e-6);
    }

    #[test]
    fn test_scale_invariance() {
        let dir = Vec3::new(0.4, -0.9, 0.3);
        let (x1, y1) = project(dir, 0.5, W, H);
        let (x2, y2) = project(dir * 2.0, 0.5, W, H);
        assert!((x1 - x2).abs() < 1e-3);
        assert!((y1 - y2).abs() < 1e-3);
    }
}
