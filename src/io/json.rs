use std::io::{self, Write};

use serde::Serialize;

use crate::app::{AppState, Placement};

/// Snapshot of a finished load, for export.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub api_base_url: String,
    pub missions_total: usize,
    pub missions_active: usize,
    pub bodies: usize,
    pub sun_present: bool,
    pub markers: usize,
    pub trajectory_rings: usize,
    pub show_orbits: bool,
    pub camera_position: [f64; 3],
    pub camera_target: [f64; 3],
    pub load_error: Option<String>,
    pub placements: Vec<Placement>,
}

impl SceneSummary {
    pub fn from_state(app: &AppState) -> Self {
        let cam = app.camera.position;
        let target = app.controls.target;
        SceneSummary {
            api_base_url: app.config.api_base_url.clone(),
            missions_total: app.missions.len(),
            missions_active: app.missions.iter().filter(|m| m.is_active()).count(),
            bodies: app.solar_system.bodies.len(),
            sun_present: app.solar_system.sun.is_some(),
            markers: app.mission_nodes.len(),
            trajectory_rings: app.mission_nodes.values().filter(|n| n.trajectory.is_some()).count(),
            show_orbits: app.show_orbits,
            camera_position: [cam.x, cam.y, cam.z],
            camera_target: [target.x, target.y, target.z],
            load_error: app.ui.error.clone(),
            placements: app.placements(),
        }
    }
}

/// Write the scene summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &SceneSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the scene summary JSON to a file.
pub fn write_summary_file(path: &str, summary: &SceneSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}
