use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::model::{CelestialBody, Mission, PositionReport, TrajectoryReport};

/// The backend endpoints the viewer consumes.
///
/// Implementations are shared with fetch worker threads, hence `Send + Sync`.
pub trait MissionApi: Send + Sync {
    fn missions(&self) -> Result<Vec<Mission>, FetchError>;
    fn celestial_bodies(&self) -> Result<Vec<CelestialBody>, FetchError>;
    fn position(&self, mission_id: &str) -> Result<PositionReport, FetchError>;
    fn trajectory(&self, mission_id: &str, days: u32) -> Result<TrajectoryReport, FetchError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

pub struct HttpApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        let network = |message: String| FetchError::Network { url: url.clone(), message };

        let body = request
            .call()
            .map_err(|e| network(e.to_string()))?
            .into_string()
            .map_err(|e| network(format!("read error: {}", e)))?;
        decode(&url, &body)
    }
}

/// Decode a response body, tagging failures with the request URL.
pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

impl MissionApi for HttpApi {
    fn missions(&self) -> Result<Vec<Mission>, FetchError> {
        self.get_json("missions", &[])
    }

    fn celestial_bodies(&self) -> Result<Vec<CelestialBody>, FetchError> {
        self.get_json("celestial-objects", &[])
    }

    fn position(&self, mission_id: &str) -> Result<PositionReport, FetchError> {
        self.get_json(&format!("position/{}", mission_id), &[])
    }

    fn trajectory(&self, mission_id: &str, days: u32) -> Result<TrajectoryReport, FetchError> {
        self.get_json(&format!("trajectory/{}", mission_id), &[("days", days.to_string())])
    }
}
