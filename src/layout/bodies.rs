use std::collections::HashMap;
use std::f64::consts::TAU;

use nalgebra::{Vector2, Vector3};
use rand::Rng;

use crate::config::VizConfig;
use crate::model::{BodyKind, CelestialBody};
use crate::scene::graph::{NodeKind, Polyline, Sphere, Sprite, SpriteContent};
use crate::scene::{Color, NodeId, SceneGraph};
use super::tables::{self, planet_slot, SUN_ID};
use super::{label_sprite, polar, ring_points};

// ---------------------------------------------------------------------------
// Sizing and colour
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySizing {
    pub scale: f64,               // scene units per km
    pub min_size: f64,
}

impl BodySizing {
    pub fn from_config(config: &VizConfig) -> Self {
        Self { scale: config.body_scale, min_size: config.min_body_size }
    }

    pub fn radius(&self, diameter: f64) -> f64 {
        (diameter * self.scale).max(self.min_size)
    }

    pub fn sun_radius(&self, diameter: f64) -> f64 {
        (diameter * self.scale).max(self.min_size * tables::SUN_MIN_SIZE_FACTOR)
    }
}

/// Stable hue for bodies without a palette entry: numeric ids map directly
/// onto the colour wheel, anything else goes through FNV-1a.
pub fn id_hue(id: &str) -> f64 {
    if let Ok(n) = id.trim().parse::<i64>() {
        return n.rem_euclid(360) as f64;
    }
    let hash = id.bytes().fold(0x811c_9dc5_u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
    (hash % 360) as f64
}

pub fn body_color(body: &CelestialBody) -> Color {
    match body.kind {
        BodyKind::Planet => tables::palette_color(&body.name)
            .unwrap_or_else(|| Color::from_hsl(id_hue(&body.id), 0.7, 0.6)),
        BodyKind::DwarfPlanet => tables::DWARF_PLANET_COLOR,
        BodyKind::Other(_) => Color::from_hsl(id_hue(&body.id), 0.7, 0.6),
    }
}

/// Display distance and angle: fixed slot for the known planets, otherwise
/// the unslotted distance at a random angle.
pub fn body_anchor<R: Rng + ?Sized>(name: &str, rng: &mut R) -> (f64, f64) {
    match planet_slot(name) {
        Some(slot) => (slot.distance, slot.angle()),
        None => (tables::UNSLOTTED_DISTANCE, rng.gen::<f64>() * TAU),
    }
}

// ---------------------------------------------------------------------------
// Built nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BodyNodes {
    pub mesh: NodeId,
    pub label: NodeId,
    pub orbit: NodeId,
    pub distance: f64,
    pub angle: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunNodes {
    pub mesh: NodeId,
    pub glow: NodeId,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarSystem {
    pub sun: Option<SunNodes>,
    pub bodies: HashMap<String, BodyNodes>,
}

impl SolarSystem {
    pub fn orbit_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.bodies.values().map(|b| b.orbit)
    }

    /// Detach everything this build created.
    pub fn remove_from(&self, graph: &mut SceneGraph) {
        if let Some(sun) = &self.sun {
            graph.remove(sun.mesh);
        }
        for body in self.bodies.values() {
            graph.remove(body.mesh);
            graph.remove(body.orbit);
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

fn add_sun(graph: &mut SceneGraph, parent: NodeId, sun: &CelestialBody, sizing: &BodySizing) -> SunNodes {
    let radius = sizing.sun_radius(sun.diameter);
    let mesh = graph.add(
        parent,
        sun.name.clone(),
        NodeKind::Sphere(Sphere {
            radius,
            color: tables::SUN_COLOR,
        }),
        Vector3::zeros(),
    );
    let glow_size = radius * tables::SUN_GLOW_FACTOR;
    let glow = graph.add(
        mesh,
        "sun-glow",
        NodeKind::Sprite(Sprite {
            content: SpriteContent::Glow,
            scale: Vector2::new(glow_size, glow_size),
            color: tables::SUN_GLOW_COLOR,
        }),
        Vector3::zeros(),
    );
    SunNodes { mesh, glow, radius }
}

fn add_body<R: Rng + ?Sized>(
    graph: &mut SceneGraph,
    parent: NodeId,
    body: &CelestialBody,
    sizing: &BodySizing,
    show_orbits: bool,
    rng: &mut R,
) -> BodyNodes {
    let radius = sizing.radius(body.diameter);
    let (distance, angle) = body_anchor(&body.name, rng);

    let mesh = graph.add(
        parent,
        body.name.clone(),
        NodeKind::Sphere(Sphere {
            radius,
            color: body_color(body),
        }),
        polar(angle, distance),
    );
    let label = graph.add(
        mesh,
        format!("{}-label", body.name),
        NodeKind::Sprite(label_sprite(&body.name)),
        Vector3::new(0.0, radius + tables::BODY_LABEL_GAP, 0.0),
    );
    let orbit = graph.add(
        parent,
        format!("{}-orbit", body.name),
        NodeKind::Line(Polyline {
            points: ring_points(Vector3::zeros(), distance, tables::ORBIT_SEGMENTS),
            color: tables::ORBIT_COLOR,
            opacity: tables::ORBIT_OPACITY,
        }),
        Vector3::zeros(),
    );
    graph.set_visible(orbit, show_orbits);

    log::debug!(
        "created body {} at distance {} and angle {:.3} rad ({:.1} deg)",
        body.name,
        distance,
        angle,
        angle.to_degrees()
    );

    BodyNodes { mesh, label, orbit, distance, angle, radius }
}

/// Lay out the Sun and every other body under `parent`.
///
/// Each id gets at most one set of nodes; a repeated id replaces the
/// earlier entry.
pub fn build_solar_system<R: Rng + ?Sized>(
    graph: &mut SceneGraph,
    parent: NodeId,
    bodies: &[CelestialBody],
    sizing: &BodySizing,
    show_orbits: bool,
    rng: &mut R,
) -> SolarSystem {
    let mut system = SolarSystem::default();

    match bodies.iter().find(|b| b.id == SUN_ID) {
        Some(sun) => system.sun = Some(add_sun(graph, parent, sun, sizing)),
        None => log::warn!("no body with id {} in collection, drawing without a Sun", SUN_ID),
    }

    for body in bodies.iter().filter(|b| b.id != SUN_ID) {
        let nodes = add_body(graph, parent, body, sizing, show_orbits, rng);
        if let Some(old) = system.bodies.insert(body.id.clone(), nodes) {
            log::warn!("duplicate body id {}, replacing earlier entry", body.id);
            graph.remove(old.mesh);
            graph.remove(old.orbit);
        }
    }

    log::info!("created solar system with {} bodies", system.bodies.len());
    system
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn body(id: &str, name: &str, kind: BodyKind, diameter: f64) -> CelestialBody {
        CelestialBody { id: id.into(), name: name.into(), kind, diameter }
    }

    fn sizing() -> BodySizing {
        BodySizing { scale: 0.000_05, min_size: 0.05 }
    }

    fn catalog() -> Vec<CelestialBody> {
        vec![
            body("10", "Sun", BodyKind::Other("Star".into()), 1_392_700.0),
            body("999", "Pluto", BodyKind::DwarfPlanet, 2376.6),
            body("599", "Jupiter", BodyKind::Planet, 139_820.0),
            body("399", "Earth", BodyKind::Planet, 12_742.0),
            body("2000001", "Ceres", BodyKind::Other("Asteroid".into()), 939.4),
        ]
    }

    #[test]
    fn radius_has_floor_and_scales_above_it() {
        let s = sizing();
        assert_eq!(s.radius(10.0), 0.05);
        assert_eq!(s.radius(0.0), 0.05);
        assert!((s.radius(139_820.0) - 6.991).abs() < 1e-9);
        for d in [0.0, 1.0, 999.0, 1000.0, 1001.0, 12_742.0, 1e7] {
            let r = s.radius(d);
            assert!(r >= 0.05);
            if d * 0.000_05 > 0.05 {
                assert_eq!(r, d * 0.000_05);
            }
        }
    }

    #[test]
    fn known_planets_use_table_distance_regardless_of_input() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut forward = catalog();
        let mut g = SceneGraph::new();
        let root_g = g.root();
        let a = build_solar_system(&mut g, root_g, &forward, &sizing(), true, &mut rng);

        forward.reverse();
        for b in &mut forward {
            b.diameter *= 3.0;
        }
        let mut g2 = SceneGraph::new();
        let root_g2 = g2.root();
        let b = build_solar_system(&mut g2, root_g2, &forward, &sizing(), true, &mut rng);

        for (id, dist) in [("599", 28.0), ("399", 16.0), ("999", 60.0)] {
            assert_eq!(a.bodies[id].distance, dist);
            assert_eq!(b.bodies[id].distance, dist);
            assert_eq!(a.bodies[id].angle, b.bodies[id].angle);
            let pos = g.world_position(a.bodies[id].mesh).unwrap();
            assert!((Vector3::new(pos.x, 0.0, pos.z).norm() - dist).abs() < 1e-9);
        }
    }

    #[test]
    fn sun_has_its_own_colour_and_glow_four_times_its_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut g = SceneGraph::new();
        let root_g = g.root();
        let system = build_solar_system(&mut g, root_g, &catalog(), &sizing(), true, &mut rng);
        let sun = system.sun.expect("sun built");
        assert!((sun.radius - 69.635).abs() < 1e-9);
        assert!(!system.bodies.contains_key(SUN_ID));
        match &g.get(sun.glow).unwrap().kind {
            NodeKind::Sprite(s) => assert!((s.scale.x - 4.0 * sun.radius).abs() < 1e-9),
            other => panic!("glow is {:?}", other),
        }
        match &g.get(sun.mesh).unwrap().kind {
            NodeKind::Sphere(s) => assert_eq!(s.color, tables::SUN_COLOR),
            other => panic!("sun is {:?}", other),
        }
    }

    #[test]
    fn small_sun_gets_triple_minimum() {
        assert!((sizing().sun_radius(10.0) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn colours_follow_kind() {
        let cat = catalog();
        assert_eq!(body_color(&cat[2]), Color::from_hex(0xD39C7E));
        assert_eq!(body_color(&cat[1]), tables::DWARF_PLANET_COLOR);
        let vulcan = body("721", "Vulcan", BodyKind::Planet, 1000.0);
        assert_eq!(body_color(&vulcan), Color::from_hsl(1.0, 0.7, 0.6));
        assert_eq!(body_color(&cat[4]), Color::from_hsl(id_hue("2000001"), 0.7, 0.6));
    }

    #[test]
    fn id_hue_is_stable_and_in_range() {
        assert_eq!(id_hue("199"), 199.0);
        assert_eq!(id_hue("-31"), 329.0);
        let h = id_hue("halley");
        assert_eq!(h, id_hue("halley"));
        assert!((0.0..360.0).contains(&h));
    }

    #[test]
    fn unknown_bodies_sit_on_unit_ring_at_seeded_angle() {
        let cat = catalog();
        let mut g1 = SceneGraph::new();
        let mut g2 = SceneGraph::new();
        let root_g1 = g1.root();
        let a = build_solar_system(&mut g1, root_g1, &cat, &sizing(), true, &mut StdRng::seed_from_u64(5));
        let root_g2 = g2.root();
        let b = build_solar_system(&mut g2, root_g2, &cat, &sizing(), true, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.bodies["2000001"].distance, 1.0);
        assert_eq!(a.bodies["2000001"].angle, b.bodies["2000001"].angle);
    }

    #[test]
    fn orbits_follow_flag_and_have_129_points() {
        let mut g = SceneGraph::new();
        let root_g = g.root();
        let system = build_solar_system(&mut g, root_g, &catalog(), &sizing(), false, &mut StdRng::seed_from_u64(2));
        for orbit in system.orbit_nodes() {
            let node = g.get(orbit).unwrap();
            assert!(!node.visible);
            match &node.kind {
                NodeKind::Line(l) => assert_eq!(l.points.len(), 129),
                other => panic!("orbit is {:?}", other),
            }
        }
    }

    #[test]
    fn labels_float_above_bodies() {
        let mut g = SceneGraph::new();
        let root_g = g.root();
        let system = build_solar_system(&mut g, root_g, &catalog(), &sizing(), true, &mut StdRng::seed_from_u64(2));
        let earth = &system.bodies["399"];
        let label = g.get(earth.label).unwrap();
        assert!((label.position.y - (earth.radius + 3.0)).abs() < 1e-12);
    }

    #[test]
    fn duplicate_ids_keep_one_node_set() {
        let mut cat = catalog();
        cat.push(body("399", "Earth", BodyKind::Planet, 12_742.0));
        let mut g = SceneGraph::new();
        let before = g.len();
        let root_g = g.root();
        let system = build_solar_system(&mut g, root_g, &cat, &sizing(), true, &mut StdRng::seed_from_u64(2));
        // sun + glow, then mesh + label + orbit per unique body
        assert_eq!(g.len() - before, 2 + 3 * system.bodies.len());
    }

    #[test]
    fn remove_from_clears_build() {
        let mut g = SceneGraph::new();
        let before = g.len();
        let root_g = g.root();
        let system = build_solar_system(&mut g, root_g, &catalog(), &sizing(), true, &mut StdRng::seed_from_u64(2));
        system.remove_from(&mut g);
        assert_eq!(g.len(), before);
    }
}
