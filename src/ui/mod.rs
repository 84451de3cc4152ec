//! Sidebar models and the commands behind the viewer's controls.

pub mod controller;
pub mod details;
pub mod filter;
pub mod list;

pub use details::{DetailsPanel, InfoPanel, MissionDetails, DETAILS_PLACEHOLDER};
pub use filter::{token_matches, AgencyFilter, AGENCY_TOKENS};
pub use list::{ListEntry, MissionList, LOAD_FAILED, NO_MISSIONS};
