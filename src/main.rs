use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mission_viz::api::{Fetcher, HttpApi};
use mission_viz::app::{AppState, Placement};
use mission_viz::config::VizConfig;
use mission_viz::io::{csv, json};

/// Upper bound on the whole headless load, not on single requests.
const LOAD_DEADLINE: Duration = Duration::from_secs(60);

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------
    let config = match VizConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    // Optional positional argument: export path prefix (writes <prefix>.csv and <prefix>.json)
    let export_prefix = std::env::args().nth(1);

    // -----------------------------------------------------------------------
    // Fetch and build
    // -----------------------------------------------------------------------
    let api = HttpApi::new(config.api_base_url.clone());
    let mut fetcher = Fetcher::new(Arc::new(api), config.trajectory_days);
    let mut app = AppState::new(config);

    fetcher.request_primary();
    let deadline = Instant::now() + LOAD_DEADLINE;
    while !fetcher.is_idle() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            log::warn!("stopped waiting with {} requests outstanding", fetcher.pending());
            break;
        }
        if let Some(event) = fetcher.wait(remaining) {
            let follow_ups = app.apply(event);
            app.issue(&mut fetcher, follow_ups);
        }
    }

    print_report(&app);

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------
    if let Some(prefix) = export_prefix {
        let csv_path = format!("{}.csv", prefix);
        let json_path = format!("{}.json", prefix);
        let summary = json::SceneSummary::from_state(&app);
        if let Err(e) = csv::write_placements_file(&csv_path, &summary.placements) {
            log::error!("cannot write {}: {}", csv_path, e);
            return ExitCode::FAILURE;
        }
        if let Err(e) = json::write_summary_file(&json_path, &summary) {
            log::error!("cannot write {}: {}", json_path, e);
            return ExitCode::FAILURE;
        }
        log::info!("exported {} and {}", csv_path, json_path);
    }

    if app.ui.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_report(app: &AppState) {
    let placements = app.placements();
    let of_kind = |kind: &'static str| placements.iter().filter(move |p| p.kind == kind);

    println!();
    println!("====================================================================");
    println!("  MISSION PLACEMENT REPORT  ({})", app.config.api_base_url);
    println!("====================================================================");
    println!();

    if let Some(message) = app.ui.list.message() {
        println!("  {}", message);
        if let Some(error) = &app.ui.error {
            println!("  {}", error);
        }
        println!();
    }

    println!("  Data");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Missions:      {:>8}       Active:       {:>8}",
        app.missions.len(),
        app.missions.iter().filter(|m| m.is_active()).count()
    );
    println!(
        "  Bodies:        {:>8}       Sun:          {:>8}",
        app.solar_system.bodies.len(),
        if app.solar_system.sun.is_some() { "yes" } else { "missing" }
    );
    println!();

    println!("  Solar System");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  {:<14}  {:>9}  {:>9}  {:>9}", "body", "dist", "angle(°)", "radius");
    println!("  {}", "─".repeat(48));
    for p in of_kind("sun").chain(of_kind("body")) {
        let (distance, angle) = ecliptic(p);
        println!(
            "  {:<14}  {:>9.2}  {:>9.1}  {:>9.3}",
            p.name, distance, angle.to_degrees(), p.radius
        );
    }
    println!();

    println!("  Missions");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:<26}  {:<10}  {:>8}  {:>8}  {:>8}  {:>5}",
        "mission", "agency", "x", "y", "z", "ring"
    );
    println!("  {}", "─".repeat(74));
    for p in of_kind("mission") {
        let agency = app.mission(&p.id).map_or("?", |m| m.agency.as_str());
        let ring = app.mission_nodes.get(&p.id).map_or(false, |n| n.trajectory.is_some());
        println!(
            "  {:<26}  {:<10}  {:>8.2}  {:>8.2}  {:>8.2}  {:>5}",
            p.name,
            agency,
            p.position[0],
            p.position[1],
            p.position[2],
            if ring { "yes" } else { "-" }
        );
    }
    println!();

    let cam = app.camera.position;
    println!(
        "  Camera: ({:.1}, {:.1}, {:.1})   orbits {}   nodes {}",
        cam.x,
        cam.y,
        cam.z,
        if app.show_orbits { "on" } else { "off" },
        app.graph.len()
    );
    println!("====================================================================");
    println!();
}

/// Distance from the Sun and angle on the ecliptic plane.
fn ecliptic(p: &Placement) -> (f64, f64) {
    let [x, _, z] = p.position;
    let angle = z.atan2(x).rem_euclid(std::f64::consts::TAU);
    (x.hypot(z), angle)
}
