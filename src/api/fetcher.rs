use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::FetchError;
use crate::model::{CelestialBody, Mission, PositionReport, TrajectoryReport};
use super::client::MissionApi;

/// A completed request, delivered to the thread that owns the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    PrimaryLoaded {
        missions: Vec<Mission>,
        bodies: Vec<CelestialBody>,
    },
    PrimaryFailed(FetchError),
    Position {
        mission_id: String,
        result: Result<PositionReport, FetchError>,
    },
    Trajectory {
        mission_id: String,
        result: Result<TrajectoryReport, FetchError>,
    },
}

/// Runs API calls on short-lived worker threads and hands the results back
/// through a channel. Nothing is applied here; the owner drains events with
/// [`Fetcher::poll`] or [`Fetcher::wait`].
pub struct Fetcher {
    api: Arc<dyn MissionApi>,
    tx: Sender<FetchEvent>,
    rx: Receiver<FetchEvent>,
    pending: usize,
    trajectory_days: u32,
}

impl Fetcher {
    pub fn new(api: Arc<dyn MissionApi>, trajectory_days: u32) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { api, tx, rx, pending: 0, trajectory_days }
    }

    /// Requests still in flight.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }

    fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce(&dyn MissionApi) -> FetchEvent + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.pending += 1;
        thread::spawn(move || {
            let _ = tx.send(job(&*api));
        });
    }

    /// Missions and bodies together. Either both arrive or the first error
    /// is reported.
    pub fn request_primary(&mut self) {
        log::info!("fetching missions and celestial bodies");
        self.spawn(|api| {
            let loaded = api
                .missions()
                .and_then(|missions| api.celestial_bodies().map(|bodies| (missions, bodies)));
            match loaded {
                Ok((missions, bodies)) => FetchEvent::PrimaryLoaded { missions, bodies },
                Err(e) => FetchEvent::PrimaryFailed(e),
            }
        });
    }

    pub fn request_position(&mut self, mission_id: &str) {
        let mission_id = mission_id.to_string();
        self.spawn(move |api| {
            let result = api.position(&mission_id);
            FetchEvent::Position { mission_id, result }
        });
    }

    pub fn request_trajectory(&mut self, mission_id: &str) {
        let mission_id = mission_id.to_string();
        let days = self.trajectory_days;
        self.spawn(move |api| {
            let result = api.trajectory(&mission_id, days);
            FetchEvent::Trajectory { mission_id, result }
        });
    }

    /// Every event that has already arrived. Never blocks.
    pub fn poll(&mut self) -> Vec<FetchEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            events.push(event);
        }
        events
    }

    /// Block for the next event, up to `timeout`. `None` when nothing is in
    /// flight or the deadline passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<FetchEvent> {
        if self.pending == 0 {
            return None;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                self.pending -= 1;
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory API
// ---------------------------------------------------------------------------
