//! User-facing commands on [`AppState`]: selection, filtering, camera
//! buttons and the orbit toggle.

use nalgebra::Vector3;

use crate::app::AppState;
use crate::layout::missions::{marker_color, set_marker_color};
use crate::layout::tables::{MARKER_COLOR, MARKER_SELECTED_COLOR};
use crate::scene::camera::HOME_POSITION;
use crate::scene::{Color, NodeKind};
use super::details::{DetailsPanel, InfoPanel, MissionDetails};

/// Offset from a selected marker to the camera.
pub const FOCUS_OFFSET: [f64; 3] = [20.0, 20.0, 20.0];
pub const ZOOM_IN_FACTOR: f64 = 0.8;
pub const ZOOM_OUT_FACTOR: f64 = 1.2;

impl AppState {
    /// Select a listed mission. Returns false for ids not in the list.
    pub fn select_mission(&mut self, mission_id: &str) -> bool {
        let Some(mission) = self.mission(mission_id) else {
            log::warn!("select: unknown mission {}", mission_id);
            return false;
        };
        let details = MissionDetails::from(mission);
        let info = InfoPanel::from(mission);

        for nodes in self.mission_nodes.values() {
            set_marker_color(&mut self.graph, nodes.marker, MARKER_COLOR);
        }
        self.ui.list.highlight(Some(mission_id));
        self.ui.selected = Some(mission_id.to_string());
        self.ui.details = DetailsPanel::Mission(details);
        self.ui.info = Some(info);

        // Missions whose position never arrived keep the current view.
        if let Some(nodes) = self.mission_nodes.get(mission_id) {
            set_marker_color(&mut self.graph, nodes.marker, MARKER_SELECTED_COLOR);
            if let Some(at) = self.graph.world_position(nodes.marker) {
                self.controls.target = at;
                self.camera.position = at + Vector3::from(FOCUS_OFFSET);
                self.controls.stop();
            }
        }
        log::debug!("selected mission {}", mission_id);
        true
    }

    /// Flip one agency checkbox and re-evaluate list entries and markers.
    pub fn set_agency_filter(&mut self, token: &str, checked: bool) {
        if !self.ui.filter.set(token, checked) {
            log::warn!("no agency filter named {}", token);
            return;
        }
        self.ui.list.apply_filter(&self.ui.filter);
        for (id, nodes) in &self.mission_nodes {
            let agency = self
                .missions
                .iter()
                .find(|m| &m.id == id)
                .map_or("", |m| m.agency.as_str());
            self.graph.set_visible(nodes.marker, self.ui.filter.accepts(agency));
        }
    }

    pub fn reset_view(&mut self) {
        self.camera.position = Vector3::from(HOME_POSITION);
        self.controls.target = Vector3::zeros();
        self.controls.stop();
    }

    pub fn zoom_in(&mut self) {
        self.camera.position *= ZOOM_IN_FACTOR;
    }

    pub fn zoom_out(&mut self) {
        self.camera.position *= ZOOM_OUT_FACTOR;
    }

    /// Flip the global flag and apply it to every line: orbit rings and
    /// trajectory rings alike.
    pub fn toggle_orbits(&mut self) {
        self.show_orbits = !self.show_orbits;
        let flag = self.show_orbits;
        for (_, node) in self.graph.iter_mut() {
            if matches!(node.kind, NodeKind::Line(_)) {
                node.visible = flag;
            }
        }
        log::debug!("orbits {}", if flag { "shown" } else { "hidden" });
    }

    pub fn marker_color(&self, mission_id: &str) -> Option<Color> {
        let nodes = self.mission_nodes.get(mission_id)?;
        marker_color(&self.graph, nodes.marker)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::FetchEvent;
    use crate::app::tests::{catalogue, loaded, state};
    use crate::api::fetcher::stub::{found, samples};
    use crate::layout::tables::{MARKER_COLOR, MARKER_SELECTED_COLOR};
    use crate::scene::NodeKind;
    use crate::ui::{DetailsPanel, MissionList};
    use nalgebra::Vector3;

    fn red_markers(app: &crate::app::AppState) -> Vec<String> {
        app.mission_nodes
            .keys()
            .filter(|id| app.marker_color(id) == Some(MARKER_SELECTED_COLOR))
            .cloned()
            .collect()
    }

    #[test]
    fn selecting_twice_leaves_one_red_marker() {
        let mut app = loaded();
        assert!(app.select_mission("-61"));
        assert!(app.select_mission("-121"));
        assert_eq!(red_markers(&app), vec!["-121".to_string()]);
        assert_eq!(app.marker_color("-61"), Some(MARKER_COLOR));
        let highlighted: Vec<&str> = app
            .ui
            .list
            .entries()
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.mission_id.as_str())
            .collect();
        assert_eq!(highlighted, vec!["-121"]);
    }

    #[test]
    fn selection_focuses_camera_and_fills_details() {
        let mut app = loaded();
        app.select_mission("-61");
        let at = app.graph.world_position(app.mission_nodes["-61"].marker).unwrap();
        assert_eq!(app.controls.target, at);
        assert_eq!(app.camera.position, at + Vector3::new(20.0, 20.0, 20.0));
        match &app.ui.details {
            DetailsPanel::Mission(d) => {
                assert_eq!(d.name, "Juno");
                assert_eq!(d.status, "Active");
            }
            other => panic!("details: {:?}", other),
        }
        assert_eq!(app.ui.info.as_ref().map(|i| i.title.as_str()), Some("Juno"));
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut app = loaded();
        assert!(!app.select_mission("-404"));
        assert_eq!(app.ui.details, DetailsPanel::Placeholder);
        assert!(red_markers(&app).is_empty());
    }

    #[test]
    fn marker_placed_after_selection_is_red() {
        let mut app = state();
        let (missions, bodies) = catalogue();
        app.apply(FetchEvent::PrimaryLoaded { missions, bodies });
        app.select_mission("-61");
        app.apply(FetchEvent::Position { mission_id: "-61".into(), result: Ok(found(1.0, 0.0, 0.0)) });
        assert_eq!(app.marker_color("-61"), Some(MARKER_SELECTED_COLOR));
    }

    #[test]
    fn other_filter_hides_nasa_and_esa_markers() {
        let mut app = loaded();
        app.set_agency_filter("NASA", false);
        app.set_agency_filter("ESA", false);
        let visible = |app: &crate::app::AppState, id: &str| {
            app.graph.is_rendered(app.mission_nodes[id].marker)
        };
        assert!(!visible(&app, "-61"), "NASA");
        assert!(!visible(&app, "-121"), "ESA/JAXA");
        assert!(visible(&app, "-37"), "JAXA");
        let shown: Vec<&str> = app
            .ui
            .list
            .entries()
            .iter()
            .filter(|e| e.visible)
            .map(|e| e.mission_id.as_str())
            .collect();
        assert_eq!(shown, vec!["-37"]);

        app.set_agency_filter("other", false);
        app.set_agency_filter("ESA", true);
        assert!(visible(&app, "-121"));
        assert!(!visible(&app, "-37"));
    }

    #[test]
    fn reset_and_zoom_only_move_camera() {
        let mut app = loaded();
        let nodes = app.graph.len();
        app.select_mission("-61");
        app.reset_view();
        assert_eq!(app.camera.position, Vector3::new(0.0, 100.0, 200.0));
        assert_eq!(app.controls.target, Vector3::zeros());
        app.zoom_in();
        assert!((app.camera.position - Vector3::new(0.0, 80.0, 160.0)).norm() < 1e-9);
        app.zoom_out();
        assert!((app.camera.position - Vector3::new(0.0, 96.0, 192.0)).norm() < 1e-9);
        assert_eq!(app.graph.len(), nodes);
    }

    #[test]
    fn toggling_orbits_twice_restores_rings() {
        let mut app = loaded();
        app.apply(FetchEvent::Trajectory { mission_id: "-61".into(), result: Ok(samples(3)) });
        let lines = |app: &crate::app::AppState| -> Vec<bool> {
            app.graph
                .iter()
                .filter(|(_, n)| matches!(n.kind, NodeKind::Line(_)))
                .map(|(_, n)| n.visible)
                .collect()
        };
        let before = lines(&app);
        assert_eq!(before.len(), 4, "three orbits and one trajectory ring");
        assert!(before.iter().all(|v| *v));

        app.toggle_orbits();
        assert!(!app.show_orbits);
        assert!(lines(&app).iter().all(|v| !*v));

        // A ring created while hidden starts hidden.
        app.apply(FetchEvent::Trajectory { mission_id: "-37".into(), result: Ok(samples(3)) });
        assert!(lines(&app).iter().all(|v| !*v));

        app.toggle_orbits();
        assert!(lines(&app).iter().all(|v| *v));
    }

    #[test]
    fn reload_keeps_selection_of_active_mission() {
        let mut app = loaded();
        app.select_mission("-61");
        let (missions, bodies) = catalogue();
        app.apply(FetchEvent::PrimaryLoaded { missions, bodies });
        assert_eq!(app.ui.selected.as_deref(), Some("-61"));
        assert!(matches!(app.ui.list, MissionList::Entries(_)));
    }
}
