//! Hand-authored lookup tables for the stylized layout.
//!
//! Distances are scene units, not astronomical: the planets sit on evenly
//! spaced rings so every one of them stays legible.

use std::f64::consts::{FRAC_PI_4, PI, TAU};

use crate::scene::Color;

/// Reserved id of the Sun in the celestial-objects collection.
pub const SUN_ID: &str = "10";

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSlot {
    pub name: &'static str,
    pub order: u32,
    pub distance: f64,
}

impl PlanetSlot {
    /// Slots step around the circle in 45° increments.
    pub fn angle(&self) -> f64 {
        (self.order as f64 * FRAC_PI_4) % TAU
    }
}

pub const PLANET_SLOTS: [PlanetSlot; 9] = [
    PlanetSlot { name: "Mercury", order: 1, distance: 8.0 },
    PlanetSlot { name: "Venus", order: 2, distance: 12.0 },
    PlanetSlot { name: "Earth", order: 3, distance: 16.0 },
    PlanetSlot { name: "Mars", order: 4, distance: 20.0 },
    PlanetSlot { name: "Jupiter", order: 5, distance: 28.0 },
    PlanetSlot { name: "Saturn", order: 6, distance: 36.0 },
    PlanetSlot { name: "Uranus", order: 7, distance: 44.0 },
    PlanetSlot { name: "Neptune", order: 8, distance: 52.0 },
    PlanetSlot { name: "Pluto", order: 9, distance: 60.0 },
];

/// Distance for bodies without a slot.
pub const UNSLOTTED_DISTANCE: f64 = 1.0;

pub fn planet_slot(name: &str) -> Option<&'static PlanetSlot> {
    PLANET_SLOTS.iter().find(|s| s.name == name)
}

pub const PLANET_PALETTE: [(&str, Color); 8] = [
    ("Mercury", Color::from_hex(0xA9A9A9)),
    ("Venus", Color::from_hex(0xF4C2C2)),
    ("Earth", Color::from_hex(0x6B93D6)),
    ("Mars", Color::from_hex(0xE27B58)),
    ("Jupiter", Color::from_hex(0xD39C7E)),
    ("Saturn", Color::from_hex(0xEAD6B8)),
    ("Uranus", Color::from_hex(0xB2D8E5)),
    ("Neptune", Color::from_hex(0x4B70DD)),
];

pub fn palette_color(name: &str) -> Option<Color> {
    PLANET_PALETTE.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

pub const DWARF_PLANET_COLOR: Color = Color::from_hex(0x8B8B8B);
pub const SUN_COLOR: Color = Color::from_hex(0xFFFF00);
pub const SUN_GLOW_COLOR: Color = Color::from_hex(0xFFFF80);
pub const SUN_MIN_SIZE_FACTOR: f64 = 3.0;
pub const SUN_GLOW_FACTOR: f64 = 4.0;
pub const ORBIT_COLOR: Color = Color::from_hex(0x666666);
pub const ORBIT_OPACITY: f32 = 0.5;
pub const ORBIT_SEGMENTS: usize = 128;
pub const BODY_LABEL_GAP: f64 = 3.0;

// ---------------------------------------------------------------------------
// Missions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleRule {
    Fixed(f64),
    /// First variant token found in the name picks the angle, else random.
    ByVariant(&'static [(&'static str, f64)]),
}

/// Name keywords (lowercase, any-of) mapped to a display distance and angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub distance: f64,
    pub angle: AngleRule,
}

pub const VOYAGER_1_ANGLE: f64 = FRAC_PI_4;
pub const VOYAGER_2_ANGLE: f64 = PI * 1.75;

/// Evaluated top to bottom; the first rule with a matching keyword wins.
/// Order matters: "Cassini-Voyager Tribute" lands on the Voyager rule.
pub const MISSION_RULES: [PlacementRule; 8] = [
    PlacementRule {
        label: "voyager",
        keywords: &["voyager"],
        distance: 70.0,
        angle: AngleRule::ByVariant(&[("1", VOYAGER_1_ANGLE), ("2", VOYAGER_2_ANGLE)]),
    },
    PlacementRule { label: "juno", keywords: &["juno"], distance: 28.0, angle: AngleRule::Fixed(PI * 0.5) },
    PlacementRule {
        label: "new-horizons",
        keywords: &["new horizons"],
        distance: 65.0,
        angle: AngleRule::Fixed(PI * 1.2),
    },
    PlacementRule { label: "parker", keywords: &["parker"], distance: 4.0, angle: AngleRule::Fixed(PI * 0.8) },
    PlacementRule {
        label: "mars-rover",
        keywords: &["perseverance", "curiosity"],
        distance: 20.0,
        angle: AngleRule::Fixed(PI * 0.1),
    },
    PlacementRule { label: "insight", keywords: &["insight"], distance: 20.0, angle: AngleRule::Fixed(PI * 0.15) },
    PlacementRule { label: "cassini", keywords: &["cassini"], distance: 36.0, angle: AngleRule::Fixed(PI * 0.9) },
    PlacementRule {
        label: "telescope",
        keywords: &["webb", "telescope"],
        distance: 16.5,
        angle: AngleRule::Fixed(PI * 1.1),
    },
];

pub const FALLBACK_SCALE: f64 = 5.0;
pub const FALLBACK_MIN_DISTANCE: f64 = 5.0;
pub const FALLBACK_MAX_DISTANCE: f64 = 80.0;
pub const UNKNOWN_MISSION_POSITION: [f64; 3] = [5.0, 0.0, 5.0];
pub const JITTER_SPAN: f64 = 2.0;           // per axis, centred on zero

pub const MARKER_RADIUS: f64 = 0.3;
pub const MARKER_COLOR: Color = Color::from_hex(0x00ff00);
pub const MARKER_SELECTED_COLOR: Color = Color::from_hex(0xff0000);
pub const MARKER_LABEL_GAP: f64 = 1.0;

pub const TRAJECTORY_RADIUS: f64 = 2.0;
pub const TRAJECTORY_SEGMENTS: usize = 32;
pub const TRAJECTORY_COLOR: Color = Color::from_hex(0x00ff00);
pub const TRAJECTORY_OPACITY: f32 = 0.7;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

pub const LABEL_MIN_CANVAS: f64 = 256.0;
pub const LABEL_PX_PER_CHAR: f64 = 14.0;
pub const LABEL_BASE_WIDTH: f64 = 5.0;
pub const LABEL_HEIGHT: f64 = 2.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_angles_step_by_45_degrees() {
        for slot in &PLANET_SLOTS {
            let expected = (slot.order as f64 * 45.0).to_radians();
            let diff = (slot.angle() - expected).rem_euclid(TAU);
            assert!(diff < 1e-9 || TAU - diff < 1e-9, "{}", slot.name);
            assert!(slot.angle() >= 0.0 && slot.angle() < TAU);
        }
        // Neptune wraps to a full turn and back to zero.
        assert!(planet_slot("Neptune").unwrap().angle().abs() < 1e-12);
        assert!((planet_slot("Pluto").unwrap().angle() - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn slot_lookup_is_exact() {
        assert_eq!(planet_slot("Mars").map(|s| s.distance), Some(20.0));
        assert!(planet_slot("mars").is_none());
        assert!(planet_slot("Ceres").is_none());
    }

    #[test]
    fn every_palette_planet_has_a_slot() {
        for (name, _) in &PLANET_PALETTE {
            assert!(planet_slot(name).is_some(), "{} missing from slots", name);
        }
        assert!(palette_color("Pluto").is_none());
    }
}
