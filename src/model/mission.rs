use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Missions (read-only once fetched)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MissionStatus {
    Active,
    Other(String),
}

impl From<String> for MissionStatus {
    fn from(s: String) -> Self {
        if s == "Active" {
            MissionStatus::Active
        } else {
            MissionStatus::Other(s)
        }
    }
}

impl From<MissionStatus> for String {
    fn from(status: MissionStatus) -> Self {
        match status {
            MissionStatus::Active => "Active".into(),
            MissionStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionStatus::Active => f.write_str("Active"),
            MissionStatus::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub date: String,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    #[serde(deserialize_with = "super::de_id")]
    pub id: String,
    pub name: String,
    pub agency: String,           // may name several agencies, e.g. "NASA/ESA"
    pub status: MissionStatus,
    #[serde(default)]
    pub launch_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl Mission {
    pub fn is_active(&self) -> bool {
        self.status == MissionStatus::Active
    }
}
