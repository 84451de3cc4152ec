use crate::model::Mission;
use super::filter::AgencyFilter;

pub const NO_MISSIONS: &str = "No missions found.";
pub const LOAD_FAILED: &str = "Failed to load data. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub mission_id: String,
    pub name: String,
    pub agency: String,
    pub visible: bool,
    pub selected: bool,
}

/// Sidebar mission list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MissionList {
    #[default]
    Loading,
    Failed,
    Empty,
    Entries(Vec<ListEntry>),
}

impl MissionList {
    /// One entry per Active mission, in collection order. The "no missions"
    /// message is reserved for an empty collection; a collection with no
    /// Active mission gives an empty list.
    pub fn from_missions(missions: &[Mission], filter: &AgencyFilter) -> Self {
        if missions.is_empty() {
            return MissionList::Empty;
        }
        let entries: Vec<ListEntry> = missions
            .iter()
            .filter(|m| m.is_active())
            .map(|m| ListEntry {
                mission_id: m.id.clone(),
                name: m.name.clone(),
                agency: m.agency.clone(),
                visible: filter.accepts(&m.agency),
                selected: false,
            })
            .collect();
        MissionList::Entries(entries)
    }

    /// Status line shown in place of entries, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            MissionList::Failed => Some(LOAD_FAILED),
            MissionList::Empty => Some(NO_MISSIONS),
            MissionList::Loading | MissionList::Entries(_) => None,
        }
    }

    pub fn entries(&self) -> &[ListEntry] {
        match self {
            MissionList::Entries(entries) => entries,
            _ => &[],
        }
    }

    pub fn apply_filter(&mut self, filter: &AgencyFilter) {
        if let MissionList::Entries(entries) = self {
            for e in entries.iter_mut() {
                e.visible = filter.accepts(&e.agency);
            }
        }
    }

    /// Highlight at most one entry.
    pub fn highlight(&mut self, mission_id: Option<&str>) {
        if let MissionList::Entries(entries) = self {
            for e in entries.iter_mut() {
                e.selected = Some(e.mission_id.as_str()) == mission_id;
            }
        }
    }
}
