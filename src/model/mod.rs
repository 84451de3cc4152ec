pub mod body;
pub mod mission;
pub mod report;

pub use body::{BodyKind, CelestialBody};
pub use mission::{Milestone, Mission, MissionStatus};
pub use report::{PositionReport, RealPosition, TrajectoryReport};

use serde::{Deserialize, Deserializer};

/// Ids arrive as strings, but some feeds send bare integers.
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}
