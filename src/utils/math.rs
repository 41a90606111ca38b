use nalgebra::Vector3;
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Cubic Hermite blend from 0 at `edge0` to 1 at `edge1`
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part in [0, 1)
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Normalize a vector, returning zero for degenerate input
#[inline]
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(1e-12).unwrap_or_else(Vector3::zeros)
}

/// Convert a shaft speed in RPM to rad/s
#[inline]
pub fn rpm_to_omega(rpm: f64) -> f64 {
    rpm * PI / 30.0
}
