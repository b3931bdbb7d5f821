//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `busnet_core` wiring.
//! - Print per-entity row counts for the database given as the first
//!   argument, or for a throwaway in-memory database.

use busnet_core::App;
use serde_json::Value;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("busnet_core ping={}", busnet_core::ping());
    println!("busnet_core version={}", busnet_core::core_version());

    let opened = match std::env::args().nth(1) {
        Some(path) => App::open(&path),
        None => App::open_in_memory(),
    };
    let app = match opened {
        Ok(app) => app,
        Err(err) => {
            eprintln!("busnet_core open failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    match print_counts(&app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("busnet_core count failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_counts(app: &App) -> Result<(), String> {
    let listings = [
        ("buses", app.bus_controller().map(|c| c.get_all())),
        ("drivers", app.driver_controller().map(|c| c.get_all())),
        ("bus_stops", app.bus_stop_controller().map(|c| c.get_all())),
        ("routes", app.route_controller().map(|c| c.get_all())),
    ];
    for (label, listing) in listings {
        let rendered = listing.map_err(|err| err.to_string())?;
        println!("busnet_core {label}={}", count_entries(&rendered)?);
    }
    Ok(())
}

fn count_entries(rendered: &str) -> Result<usize, String> {
    match serde_json::from_str::<Value>(rendered).map_err(|err| err.to_string())? {
        Value::Array(items) => Ok(items.len()),
        Value::Object(map) => Err(map
            .get("Error")
            .and_then(Value::as_str)
            .unwrap_or("unexpected response")
            .to_string()),
        _ => Err("unexpected response".to_string()),
    }
}
