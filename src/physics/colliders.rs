use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::traits::{CollisionWorld, RayHit};

/// Infinite plane through `point` with outward `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneCollider {
    pub point: Vector3<f64>,
    pub normal: Vector3<f64>,
}

impl PlaneCollider {
    pub fn new(point: Vector3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            point,
            normal: normal.try_normalize(1e-12).unwrap_or_else(Vector3::y),
        }
    }

    /// Vertical wall at `x`, facing the -X side.
    pub fn wall_facing_negative_x(x: f64) -> Self {
        Self::new(Vector3::new(x, 0.0, 0.0), -Vector3::x())
    }
}

/// Static wall geometry the rotor system ray-casts against.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallColliders {
    pub planes: Vec<PlaneCollider>,
}

impl WallColliders {
    pub fn new(planes: Vec<PlaneCollider>) -> Self {
        Self { planes }
    }
}

impl CollisionWorld for WallColliders {
    fn ray_cast(&self, from: &Vector3<f64>, to: &Vector3<f64>) -> Option<RayHit> {
        let direction = to - from;
        let mut closest: Option<RayHit> = None;

        for plane in &self.planes {
            let denom = plane.normal.dot(&direction);
            if denom.abs() < 1e-12 {
                continue;
            }

            let fraction = plane.normal.dot(&(plane.point - from)) / denom;
            if !(0.0..=1.0).contains(&fraction) {
                continue;
            }

            let normal = if denom < 0.0 {
                plane.normal
            } else {
                -plane.normal
            };

            if closest.map_or(true, |hit| fraction < hit.fraction) {
                closest = Some(RayHit { normal, fraction });
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_hits_nearest_wall() {
        let world = WallColliders::new(vec![
            PlaneCollider::wall_facing_negative_x(0.3),
            PlaneCollider::wall_facing_negative_x(0.2),
        ]);

        let hit = world
            .ray_cast(&Vector3::zeros(), &Vector3::new(0.4, 0.0, 0.0))
            .expect("ray should hit");
        assert_relative_eq!(hit.fraction, 0.5);
        assert_relative_eq!(hit.normal, -Vector3::x());
    }

    #[test]
    fn test_ray_misses_out_of_range_and_parallel() {
        let world = WallColliders::new(vec![PlaneCollider::wall_facing_negative_x(1.0)]);

        assert!(world
            .ray_cast(&Vector3::zeros(), &Vector3::new(0.4, 0.0, 0.0))
            .is_none());
        assert!(world
            .ray_cast(&Vector3::zeros(), &Vector3::new(0.0, 0.0, 5.0))
            .is_none());
    }

    #[test]
    fn test_normal_faces_ray_origin() {
        // Approached from the back side, the reported normal flips.
        let world = WallColliders::new(vec![PlaneCollider::wall_facing_negative_x(1.0)]);
        let hit = world
            .ray_cast(&Vector3::new(2.0, 0.0, 0.0), &Vector3::new(0.0, 0.0, 0.0))
            .expect("ray should hit");
        assert_relative_eq!(hit.normal, Vector3::x());
        assert_relative_eq!(hit.fraction, 0.5);
    }
}
