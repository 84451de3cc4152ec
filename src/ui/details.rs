use crate::model::{Milestone, Mission};

pub const DETAILS_PLACEHOLDER: &str = "Select a mission to view details";

/// Everything the details panel shows for the selected mission.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionDetails {
    pub name: String,
    pub agency: String,
    pub launch_date: String,
    pub status: String,
    pub description: String,
    pub milestones: Vec<Milestone>,       // as supplied, not re-sorted
    pub website: String,
}

impl From<&Mission> for MissionDetails {
    fn from(m: &Mission) -> Self {
        Self {
            name: m.name.clone(),
            agency: m.agency.clone(),
            launch_date: m.launch_date.clone(),
            status: m.status.to_string(),
            description: m.description.clone(),
            milestones: m.milestones.clone(),
            website: m.website.clone(),
        }
    }
}

impl MissionDetails {
    /// "date: event" lines in supplied order.
    pub fn milestone_lines(&self) -> Vec<String> {
        self.milestones
            .iter()
            .map(|ms| format!("{}: {}", ms.date, ms.event))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailsPanel {
    #[default]
    Placeholder,
    Mission(MissionDetails),
}

/// Heading box over the scene: title plus a short description.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub title: String,
    pub description: String,
}

impl From<&Mission> for InfoPanel {
    fn from(m: &Mission) -> Self {
        Self { title: m.name.clone(), description: m.description.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MissionStatus;

    #[test]
    fn details_keep_milestone_order() {
        let m = Mission {
            id: "-98".into(),
            name: "New Horizons".into(),
            agency: "NASA".into(),
            status: MissionStatus::Active,
            launch_date: "2006-01-19".into(),
            description: "Pluto and beyond".into(),
            website: "https://example.org".into(),
            milestones: vec![
                Milestone { date: "2019-01-01".into(), event: "Arrokoth flyby".into() },
                Milestone { date: "2015-07-14".into(), event: "Pluto flyby".into() },
            ],
        };
        let d = MissionDetails::from(&m);
        assert_eq!(d.status, "Active");
        assert_eq!(
            d.milestone_lines(),
            vec!["2019-01-01: Arrokoth flyby", "2015-07-14: Pluto flyby"]
        );
        let info = InfoPanel::from(&m);
        assert_eq!(info.title, "New Horizons");
        assert_eq!(info.description, "Pluto and beyond");
    }
}
