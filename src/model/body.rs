use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Celestial bodies (read-only once fetched)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BodyKind {
    Planet,
    DwarfPlanet,
    Other(String),
}

impl From<String> for BodyKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Planet" => BodyKind::Planet,
            "Dwarf Planet" => BodyKind::DwarfPlanet,
            _ => BodyKind::Other(s),
        }
    }
}

impl From<BodyKind> for String {
    fn from(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Planet => "Planet".into(),
            BodyKind::DwarfPlanet => "Dwarf Planet".into(),
            BodyKind::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    #[serde(deserialize_with = "super::de_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BodyKind,
    pub diameter: f64,            // km
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_record() {
        let json = r#"[
            {"id": "399", "name": "Earth", "type": "Planet", "diameter": 12742},
            {"id": 999, "name": "Pluto", "type": "Dwarf Planet", "diameter": 2376.6},
            {"id": "2000001", "name": "Ceres", "type": "Asteroid", "diameter": 939.4}
        ]"#;
        let bodies: Vec<CelestialBody> = serde_json::from_str(json).unwrap();
        assert_eq!(bodies[0].kind, BodyKind::Planet);
        assert_eq!(bodies[1].id, "999");
        assert_eq!(bodies[1].kind, BodyKind::DwarfPlanet);
        assert_eq!(bodies[2].kind, BodyKind::Other("Asteroid".into()));
    }

    #[test]
    fn missing_diameter_is_rejected() {
        let json = r#"{"id": "399", "name": "Earth", "type": "Planet"}"#;
        assert!(serde_json::from_str::<CelestialBody>(json).is_err());
    }
}
