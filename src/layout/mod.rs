pub mod bodies;
pub mod missions;
pub mod tables;

pub use bodies::{build_solar_system, BodyNodes, BodySizing, SolarSystem};
pub use missions::{display_position, MissionNodes};

use std::f64::consts::TAU;

use nalgebra::{Vector2, Vector3};

use crate::scene::graph::{Sprite, SpriteContent};
use crate::scene::Color;
use tables::{LABEL_BASE_WIDTH, LABEL_HEIGHT, LABEL_MIN_CANVAS, LABEL_PX_PER_CHAR};

/// Point on the ecliptic plane (y = 0) at `angle` rad and `distance` units.
pub fn polar(angle: f64, distance: f64) -> Vector3<f64> {
    Vector3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Closed horizontal circle: `segments + 1` points, the last equal to the first.
pub fn ring_points(center: Vector3<f64>, radius: f64, segments: usize) -> Vec<Vector3<f64>> {
    (0..=segments)
        .map(|i| {
            let theta = i as f64 / segments as f64 * TAU;
            center + Vector3::new(theta.cos() * radius, 0.0, theta.sin() * radius)
        })
        .collect()
}

/// Text sprite whose width grows with the text once it outgrows the base canvas.
pub fn label_sprite(text: &str) -> Sprite {
    let canvas = LABEL_MIN_CANVAS.max(text.chars().count() as f64 * LABEL_PX_PER_CHAR);
    Sprite {
        content: SpriteContent::Label(text.to_string()),
        scale: Vector2::new(LABEL_BASE_WIDTH * (canvas / LABEL_MIN_CANVAS), LABEL_HEIGHT),
        color: Color::WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_closed_with_segment_count_plus_one_points() {
        let pts = ring_points(Vector3::new(1.0, 2.0, 3.0), 2.0, 32);
        assert_eq!(pts.len(), 33);
        assert!((pts[0] - pts[32]).norm() < 1e-9);
        for p in &pts {
            let d = p - Vector3::new(1.0, 2.0, 3.0);
            assert!((d.norm() - 2.0).abs() < 1e-9);
            assert_eq!(d.y, 0.0);
        }
    }

    #[test]
    fn short_labels_use_base_width() {
        assert_eq!(label_sprite("Mars").scale, Vector2::new(5.0, 2.5));
        // 20 chars * 14 px = 280 px > 256
        let long = label_sprite("Parker Solar Probe!!");
        assert!((long.scale.x - 5.0 * 280.0 / 256.0).abs() < 1e-12);
    }

    #[test]
    fn polar_lies_on_plane() {
        let p = polar(std::f64::consts::FRAC_PI_2, 28.0);
        assert!(p.x.abs() < 1e-12 && p.y == 0.0 && (p.z - 28.0).abs() < 1e-12);
    }
}
