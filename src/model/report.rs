use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

const SUCCESS: &str = "success";

/// Heliocentric position as served by the API (AU).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RealPosition {
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// `GET /position/{id}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub status: String,
    #[serde(default)]
    pub position: Option<RealPosition>,
}

impl PositionReport {
    /// The reported position, only when the API flagged success.
    pub fn position(&self) -> Option<Vector3<f64>> {
        if self.status == SUCCESS {
            self.position.map(RealPosition::to_vector)
        } else {
            None
        }
    }
}

/// `GET /trajectory/{id}` envelope. Samples are opaque: only their presence
/// decides whether a display ring is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryReport {
    pub status: String,
    #[serde(default)]
    pub trajectory: Vec<serde_json::Value>,
}

impl TrajectoryReport {
    pub fn is_drawable(&self) -> bool {
        self.status == SUCCESS && !self.trajectory.is_empty()
    }
}
