use std::f64::consts::TAU;

use nalgebra::Vector3;
use rand::Rng;

use crate::model::Mission;
use crate::scene::graph::{NodeKind, Polyline, Sphere};
use crate::scene::{Color, NodeId, SceneGraph};
use super::tables::{self, AngleRule, PlacementRule, MISSION_RULES};
use super::{label_sprite, polar, ring_points};

// ---------------------------------------------------------------------------
// Display position heuristics
// ---------------------------------------------------------------------------

/// First rule whose keyword occurs in the lowercased name.
pub fn match_rule(name: &str) -> Option<&'static PlacementRule> {
    let lower = name.to_lowercase();
    MISSION_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
}

/// Distance for missions no rule recognises, from the real heliocentric
/// distance.
pub fn fallback_distance(real: &Vector3<f64>) -> f64 {
    (real.norm() * tables::FALLBACK_SCALE)
        .clamp(tables::FALLBACK_MIN_DISTANCE, tables::FALLBACK_MAX_DISTANCE)
}

fn rule_angle<R: Rng + ?Sized>(rule: &PlacementRule, lower_name: &str, rng: &mut R) -> f64 {
    match rule.angle {
        AngleRule::Fixed(a) => a,
        AngleRule::ByVariant(variants) => variants
            .iter()
            .find(|(token, _)| lower_name.contains(token))
            .map(|(_, a)| *a)
            .unwrap_or_else(|| rng.gen::<f64>() * TAU),
    }
}

/// Distance and angle before jitter.
pub fn anchor<R: Rng + ?Sized>(name: &str, real: &Vector3<f64>, rng: &mut R) -> (f64, f64) {
    match match_rule(name) {
        Some(rule) => (rule.distance, rule_angle(rule, &name.to_lowercase(), rng)),
        None => (fallback_distance(real), rng.gen::<f64>() * TAU),
    }
}

/// Per-axis offset in [-1, 1) so markers never sit exactly on top of each other.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    let mut axis = || (rng.gen::<f64>() - 0.5) * tables::JITTER_SPAN;
    Vector3::new(axis(), axis(), axis())
}

/// Heuristic on-screen position for a mission. `mission` is `None` when a
/// position arrives for an id missing from the mission list.
pub fn display_position<R: Rng + ?Sized>(
    mission: Option<&Mission>,
    real: &Vector3<f64>,
    rng: &mut R,
) -> Vector3<f64> {
    let base = match mission {
        Some(m) => {
            let (distance, angle) = anchor(&m.name, real, rng);
            polar(angle, distance)
        }
        None => Vector3::from(tables::UNKNOWN_MISSION_POSITION),
    };
    base + jitter(rng)
}

// ---------------------------------------------------------------------------
// Marker and pseudo-trajectory nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MissionNodes {
    pub marker: NodeId,
    pub label: NodeId,
    pub trajectory: Option<NodeId>,
    pub position: Vector3<f64>,
}

impl MissionNodes {
    pub fn remove_from(&self, graph: &mut SceneGraph) {
        graph.remove(self.marker);
        if let Some(ring) = self.trajectory {
            graph.remove(ring);
        }
    }
}

pub fn marker_label(mission: Option<&Mission>, mission_id: &str) -> String {
    match mission {
        Some(m) => m.name.clone(),
        None => format!("Mission {}", mission_id),
    }
}

/// Marker sphere plus its label, placed at `position`.
pub fn add_marker(
    graph: &mut SceneGraph,
    parent: NodeId,
    label: &str,
    position: Vector3<f64>,
    color: Color,
) -> MissionNodes {
    let marker = graph.add(
        parent,
        label,
        NodeKind::Sphere(Sphere {
            radius: tables::MARKER_RADIUS,
            color,
        }),
        position,
    );
    let label = graph.add(
        marker,
        format!("{}-label", label),
        NodeKind::Sprite(label_sprite(label)),
        Vector3::new(0.0, tables::MARKER_LABEL_GAP, 0.0),
    );
    MissionNodes { marker, label, trajectory: None, position }
}

/// Fixed-size ring around the marker. Stands in for the real path, which
/// is never drawn.
pub fn add_trajectory_ring(
    graph: &mut SceneGraph,
    parent: NodeId,
    center: Vector3<f64>,
    visible: bool,
) -> NodeId {
    let ring = graph.add(
        parent,
        "trajectory",
        NodeKind::Line(Polyline {
            points: ring_points(center, tables::TRAJECTORY_RADIUS, tables::TRAJECTORY_SEGMENTS),
            color: tables::TRAJECTORY_COLOR,
            opacity: tables::TRAJECTORY_OPACITY,
        }),
        Vector3::zeros(),
    );
    graph.set_visible(ring, visible);
    ring
}

/// Recolour a marker in place.
pub fn set_marker_color(graph: &mut SceneGraph, marker: NodeId, color: Color) {
    if let Some(node) = graph.get_mut(marker) {
        if let NodeKind::Sphere(sphere) = &mut node.kind {
            sphere.color = color;
        }
    }
}

pub fn marker_color(graph: &SceneGraph, marker: NodeId) -> Option<Color> {
    match &graph.get(marker)?.kind {
        NodeKind::Sphere(sphere) => Some(sphere.color),
        _ => None,
    }
}
