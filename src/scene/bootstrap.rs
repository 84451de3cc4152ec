use std::f64::consts::PI;

use nalgebra::Vector3;
use rand::Rng;

use crate::config::VizConfig;
use super::camera::{Camera, OrbitControls};
use super::color::Color;
use super::graph::{Light, LightKind, NodeId, NodeKind, PointCloud, SceneGraph};

pub const AMBIENT_COLOR: Color = Color::from_hex(0x404040);
pub const SUNLIGHT_COLOR: Color = Color::from_hex(0xffffff);
pub const SUNLIGHT_INTENSITY: f64 = 1.5;
pub const STAR_COLOR: Color = Color::WHITE;
pub const STAR_SIZE: f32 = 1.2;

/// Nodes created at startup that other components hang content off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    pub solar_system: NodeId,
    pub stars: NodeId,
    pub ambient: NodeId,
    pub sunlight: NodeId,
}

// ---------------------------------------------------------------------------
// Star field
// ---------------------------------------------------------------------------

/// Map three uniform samples in [0, 1) to a point uniformly distributed in a
/// solid ball. The cube root on the radius keeps stars from bunching at the
/// centre; `acos(2u - 1)` keeps directions uniform over the sphere.
pub fn ball_point(radius: f64, u_radius: f64, u_azimuth: f64, u_polar: f64) -> Vector3<f64> {
    let r = radius * u_radius.cbrt();
    let theta = u_azimuth * 2.0 * PI;
    let phi = (2.0 * u_polar - 1.0).clamp(-1.0, 1.0).acos();
    Vector3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

pub fn star_field<R: Rng + ?Sized>(count: usize, radius: f64, rng: &mut R) -> Vec<Vector3<f64>> {
    (0..count)
        .map(|_| {
            let (a, b, c) = (rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>());
            ball_point(radius, a, b, c)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// Populate an empty graph with lights, the star background and the group
/// that will hold bodies and missions.
pub fn bootstrap<R: Rng + ?Sized>(
    graph: &mut SceneGraph,
    config: &VizConfig,
    rng: &mut R,
) -> SceneHandles {
    let root = graph.root();

    let ambient = graph.add(
        root,
        "ambient",
        NodeKind::Light(Light {
            kind: LightKind::Ambient,
            color: AMBIENT_COLOR,
            intensity: 1.0,
        }),
        Vector3::zeros(),
    );
    let sunlight = graph.add(
        root,
        "sunlight",
        NodeKind::Light(Light {
            kind: LightKind::Point,
            color: SUNLIGHT_COLOR,
            intensity: SUNLIGHT_INTENSITY,
        }),
        Vector3::zeros(),
    );

    let solar_system = graph.add(root, "solar-system", NodeKind::Group, Vector3::zeros());

    let points = star_field(config.star_count, config.star_radius, rng);
    let stars = graph.add(
        root,
        "stars",
        NodeKind::Points(PointCloud {
            points,
            color: STAR_COLOR,
            size: STAR_SIZE,
        }),
        Vector3::zeros(),
    );
    log::info!("created star background ({} stars)", config.star_count);

    SceneHandles { solar_system, stars, ambient, sunlight }
}

/// Camera and controls in their startup pose.
pub fn initial_view(config: &VizConfig, aspect: f64) -> (Camera, OrbitControls) {
    let camera = Camera::new(&config.camera, aspect);
    let controls = OrbitControls::new(config.camera.damping);
    (camera, controls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ball_point_extremes() {
        assert_eq!(ball_point(1000.0, 0.0, 0.3, 0.7), Vector3::zeros());
        let top = ball_point(1000.0, 1.0, 0.0, 1.0);
        assert!((top - Vector3::new(0.0, 0.0, 1000.0)).norm() < 1e-9);
        let bottom = ball_point(1000.0, 1.0, 0.0, 0.0);
        assert!((bottom - Vector3::new(0.0, 0.0, -1000.0)).norm() < 1e-9);
    }

    #[test]
    fn cube_root_spreads_radius() {
        // Half the volume lies outside r = R / 2^(1/3).
        let p = ball_point(1.0, 0.5, 0.0, 0.5);
        assert!((p.norm() - 0.5_f64.cbrt()).abs() < 1e-12);
    }

    #[test]
    fn stars_stay_inside_ball() {
        let mut rng = StdRng::seed_from_u64(3);
        let stars = star_field(2000, 1000.0, &mut rng);
        assert_eq!(stars.len(), 2000);
        assert!(stars.iter().all(|p| p.norm() <= 1000.0 + 1e-9));
        let outer = stars.iter().filter(|p| p.norm() > 1000.0 * 0.5_f64.cbrt()).count();
        assert!(outer > 800 && outer < 1200, "about half should be in the outer shell, got {}", outer);
    }

    #[test]
    fn bootstrap_creates_lights_stars_and_group() {
        let mut graph = SceneGraph::new();
        let config = VizConfig { star_count: 10, ..VizConfig::default() };
        let mut rng = StdRng::seed_from_u64(1);
        let handles = bootstrap(&mut graph, &config, &mut rng);
        assert_eq!(graph.len(), 5);
        match &graph.get(handles.stars).unwrap().kind {
            NodeKind::Points(cloud) => assert_eq!(cloud.points.len(), 10),
            other => panic!("stars node is {:?}", other),
        }
        match &graph.get(handles.sunlight).unwrap().kind {
            NodeKind::Light(light) => {
                assert_eq!(light.kind, LightKind::Point);
                assert_eq!(light.intensity, SUNLIGHT_INTENSITY);
            }
            other => panic!("sunlight node is {:?}", other),
        }
    }
}
