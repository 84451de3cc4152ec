use std::collections::HashMap;

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::api::{FetchEvent, Fetcher};
use crate::config::VizConfig;
use crate::error::FetchError;
use crate::layout::missions::{self, add_marker, add_trajectory_ring, marker_label};
use crate::layout::tables::{self, SUN_ID};
use crate::layout::{build_solar_system, display_position, BodySizing, MissionNodes, SolarSystem};
use crate::model::{CelestialBody, Mission, PositionReport, TrajectoryReport};
use crate::scene::bootstrap::initial_view;
use crate::scene::camera::HOME_POSITION;
use crate::scene::{bootstrap, Camera, NodeId, OrbitControls, SceneGraph, SceneHandles};
use crate::ui::{AgencyFilter, DetailsPanel, InfoPanel, MissionDetails, MissionList};

/// Sidebar and overlay state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub list: MissionList,
    pub filter: AgencyFilter,
    pub details: DetailsPanel,
    pub info: Option<InfoPanel>,
    pub selected: Option<String>,
    /// Last primary-load error, for the status line.
    pub error: Option<String>,
}

/// Request to issue after an event has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    Position(String),
    Trajectory(String),
}

/// One drawable entity in world space, for reports and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub kind: &'static str,
    pub id: String,
    pub name: String,
    pub position: [f64; 3],
    pub radius: f64,
    pub visible: bool,
}

/// Everything the viewer owns. Mutated only from the thread that draws.
pub struct AppState {
    pub config: VizConfig,
    pub graph: SceneGraph,
    pub handles: SceneHandles,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub missions: Vec<Mission>,
    pub bodies: Vec<CelestialBody>,
    pub solar_system: SolarSystem,
    pub mission_nodes: HashMap<String, MissionNodes>,
    pub show_orbits: bool,
    pub ui: UiState,
    pub(crate) rng: StdRng,
    /// Set once a primary load has settled, successfully or not.
    primary_settled: bool,
}

impl AppState {
    pub fn new(config: VizConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: VizConfig, mut rng: StdRng) -> Self {
        let mut graph = SceneGraph::new();
        let handles = bootstrap(&mut graph, &config, &mut rng);
        let (camera, controls) = initial_view(&config, 1.0);
        Self {
            config,
            graph,
            handles,
            camera,
            controls,
            missions: Vec::new(),
            bodies: Vec::new(),
            solar_system: SolarSystem::default(),
            mission_nodes: HashMap::new(),
            show_orbits: true,
            ui: UiState::default(),
            rng,
            primary_settled: false,
        }
    }

    pub fn mission(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    // -----------------------------------------------------------------------
    // Event application
    // -----------------------------------------------------------------------

    /// Apply one fetch result and return the requests it triggers.
    pub fn apply(&mut self, event: FetchEvent) -> Vec<FollowUp> {
        match event {
            FetchEvent::PrimaryLoaded { missions, bodies } => self.apply_primary(missions, bodies),
            FetchEvent::PrimaryFailed(e) => {
                self.apply_primary_failure(e);
                Vec::new()
            }
            FetchEvent::Position { mission_id, result } => self.apply_position(&mission_id, result),
            FetchEvent::Trajectory { mission_id, result } => {
                self.apply_trajectory(&mission_id, result);
                Vec::new()
            }
        }
    }

    fn apply_primary(&mut self, missions: Vec<Mission>, bodies: Vec<CelestialBody>) -> Vec<FollowUp> {
        log::info!("loaded {} missions and {} celestial bodies", missions.len(), bodies.len());
        self.missions = missions;
        self.bodies = bodies;
        self.ui.error = None;
        self.primary_settled = true;

        self.solar_system.remove_from(&mut self.graph);
        let sizing = BodySizing::from_config(&self.config);
        self.solar_system = build_solar_system(
            &mut self.graph,
            self.handles.solar_system,
            &self.bodies,
            &sizing,
            self.show_orbits,
            &mut self.rng,
        );

        self.camera.position = Vector3::from(HOME_POSITION);
        self.controls.target = Vector3::zeros();
        self.controls.stop();

        let active: Vec<String> = self
            .missions
            .iter()
            .filter(|m| m.is_active())
            .map(|m| m.id.clone())
            .collect();

        let stale: Vec<String> = self
            .mission_nodes
            .keys()
            .filter(|id| !active.contains(id))
            .cloned()
            .collect();
        for id in stale {
            if let Some(nodes) = self.mission_nodes.remove(&id) {
                nodes.remove_from(&mut self.graph);
            }
        }

        self.ui.list = MissionList::from_missions(&self.missions, &self.ui.filter);
        let kept = match self.ui.selected.clone() {
            Some(id) => self.missions.iter().find(|m| m.id == id && m.is_active()).cloned(),
            None => None,
        };
        match kept {
            Some(m) => {
                self.ui.details = DetailsPanel::Mission(MissionDetails::from(&m));
                self.ui.info = Some(InfoPanel::from(&m));
                self.ui.list.highlight(Some(&m.id));
            }
            None => self.clear_selection(),
        }

        active.into_iter().map(FollowUp::Position).collect()
    }

    /// Tear down whatever the previous load built; nothing on screen
    /// outlives a failed fetch.
    fn apply_primary_failure(&mut self, error: FetchError) {
        log::error!("error loading data: {}", error);
        self.primary_settled = true;
        self.clear_selection();

        self.solar_system.remove_from(&mut self.graph);
        self.solar_system = SolarSystem::default();
        for (_, nodes) in self.mission_nodes.drain() {
            nodes.remove_from(&mut self.graph);
        }
        self.missions.clear();
        self.bodies.clear();

        self.ui.list = MissionList::Failed;
        self.ui.error = Some(error.to_string());
    }

    fn apply_position(
        &mut self,
        mission_id: &str,
        result: Result<PositionReport, FetchError>,
    ) -> Vec<FollowUp> {
        if self.primary_settled && !self.mission(mission_id).is_some_and(Mission::is_active) {
            log::debug!("ignoring position for mission {}, no longer active", mission_id);
            return Vec::new();
        }
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                log::warn!("position for mission {} unavailable: {}", mission_id, e);
                return Vec::new();
            }
        };
        let Some(real) = report.position() else {
            log::warn!("position for mission {} reported status {}", mission_id, report.status);
            return Vec::new();
        };

        self.place_mission(mission_id, &real);
        vec![FollowUp::Trajectory(mission_id.to_string())]
    }

    /// Create (or replace) the marker for a mission.
    pub fn place_mission(&mut self, mission_id: &str, real: &Vector3<f64>) {
        if let Some(old) = self.mission_nodes.remove(mission_id) {
            old.remove_from(&mut self.graph);
        }

        let mission = self.missions.iter().find(|m| m.id == mission_id);
        let position = display_position(mission, real, &mut self.rng);
        let label = marker_label(mission, mission_id);
        let visible = self.ui.filter.accepts(mission.map_or("", |m| m.agency.as_str()));
        let color = if self.ui.selected.as_deref() == Some(mission_id) {
            tables::MARKER_SELECTED_COLOR
        } else {
            tables::MARKER_COLOR
        };

        let nodes = add_marker(&mut self.graph, self.handles.solar_system, &label, position, color);
        self.graph.set_visible(nodes.marker, visible);
        log::debug!(
            "placed {} at ({:.2}, {:.2}, {:.2}) from real ({:.3}, {:.3}, {:.3})",
            label,
            position.x,
            position.y,
            position.z,
            real.x,
            real.y,
            real.z
        );
        self.mission_nodes.insert(mission_id.to_string(), nodes);
    }

    fn apply_trajectory(&mut self, mission_id: &str, result: Result<TrajectoryReport, FetchError>) {
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                log::warn!("trajectory for mission {} unavailable: {}", mission_id, e);
                return;
            }
        };
        if !report.is_drawable() {
            log::debug!("no trajectory samples for mission {}", mission_id);
            return;
        }
        let Some(nodes) = self.mission_nodes.get_mut(mission_id) else {
            log::warn!("trajectory for mission {} arrived without a marker", mission_id);
            return;
        };
        if let Some(old) = nodes.trajectory.take() {
            self.graph.remove(old);
        }
        let ring = add_trajectory_ring(
            &mut self.graph,
            self.handles.solar_system,
            nodes.position,
            self.show_orbits,
        );
        nodes.trajectory = Some(ring);
    }

    // -----------------------------------------------------------------------
    // Fetch plumbing
    // -----------------------------------------------------------------------

    pub fn issue(&self, fetcher: &mut Fetcher, follow_ups: Vec<FollowUp>) {
        for f in follow_ups {
            match f {
                FollowUp::Position(id) => fetcher.request_position(&id),
                FollowUp::Trajectory(id) => fetcher.request_trajectory(&id),
            }
        }
    }

    /// Drain everything that has arrived and fire the follow-up requests.
    /// Returns the number of events applied.
    pub fn pump(&mut self, fetcher: &mut Fetcher) -> usize {
        let events = fetcher.poll();
        let n = events.len();
        for event in events {
            let follow_ups = self.apply(event);
            self.issue(fetcher, follow_ups);
        }
        n
    }

    /// Re-issue the primary fetch. Results replace existing content by id.
    pub fn reload(&mut self, fetcher: &mut Fetcher) {
        log::info!("reloading mission data");
        fetcher.request_primary();
    }

    // -----------------------------------------------------------------------
    // Reporting
    // -----------------------------------------------------------------------

    /// Sun, bodies and mission markers with their world positions.
    pub fn placements(&self) -> Vec<Placement> {
        let mut out = Vec::new();
        let name_of = |id: NodeId| self.graph.get(id).map(|n| n.name.clone()).unwrap_or_default();
        let position_of = |id: NodeId| self.graph.world_position(id).map(|p| [p.x, p.y, p.z]).unwrap_or_default();

        if let Some(sun) = &self.solar_system.sun {
            out.push(Placement {
                kind: "sun",
                id: SUN_ID.to_string(),
                name: name_of(sun.mesh),
                position: position_of(sun.mesh),
                radius: sun.radius,
                visible: self.graph.is_rendered(sun.mesh),
            });
        }

        let mut bodies: Vec<_> = self.solar_system.bodies.iter().collect();
        bodies.sort_by(|a, b| a.1.distance.total_cmp(&b.1.distance).then(a.0.cmp(b.0)));
        for (id, nodes) in bodies {
            out.push(Placement {
                kind: "body",
                id: id.clone(),
                name: name_of(nodes.mesh),
                position: position_of(nodes.mesh),
                radius: nodes.radius,
                visible: self.graph.is_rendered(nodes.mesh),
            });
        }

        let mut markers: Vec<_> = self.mission_nodes.iter().collect();
        markers.sort_by(|a, b| a.0.cmp(b.0));
        for (id, nodes) in markers {
            out.push(Placement {
                kind: "mission",
                id: id.clone(),
                name: name_of(nodes.marker),
                position: position_of(nodes.marker),
                radius: tables::MARKER_RADIUS,
                visible: self.graph.is_rendered(nodes.marker),
            });
        }
        out
    }

    pub(crate) fn clear_selection(&mut self) {
        if self.ui.selected.take().is_some() {
            for nodes in self.mission_nodes.values() {
                missions::set_marker_color(&mut self.graph, nodes.marker, tables::MARKER_COLOR);
            }
        }
        self.ui.list.highlight(None);
        self.ui.details = DetailsPanel::Placeholder;
        self.ui.info = None;
    }
}
