//! FFI call surface for the Flutter shell.
//!
//! # Responsibility
//! - Expose every controller method as a sync FRB function taking and
//!   returning text.
//! - Own the process-wide `App` and open the database on first use.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Controller calls return pretty JSON: a record, a list, or an
//!   `{"Error": ...}` / `{"Response": ...}` envelope.
//! - Setup calls (`init_logging`, `init_app`) return an empty string on
//!   success and an error message otherwise.

use busnet_core::{
    core_version as core_version_inner, error_envelope, init_logging as init_logging_inner,
    ping as ping_inner, App, RepoResult,
};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

const DEFAULT_DB_FILE_NAME: &str = "busnet.sqlite3";
const DB_PATH_ENV: &str = "BUSNET_DB_PATH";

static DEFAULT_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static APP: Mutex<Option<App>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the database used by every following call.
///
/// Input semantics:
/// - `db_path`: file to open; `None` or blank falls back to `BUSNET_DB_PATH`,
///   then to `busnet.sqlite3` in the system temp directory.
///
/// # FFI contract
/// - Replaces a previously opened database.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_app(db_path: Option<String>) -> String {
    let path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_db_path);

    match open_app(path) {
        Ok(app) => {
            *lock_app() = Some(app);
            String::new()
        }
        Err(err) => err,
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_get_by_id(id: String) -> String {
    with_app(|app| Ok(app.bus_controller()?.get_by_id(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_get_by_number(register_number: String) -> String {
    with_app(|app| Ok(app.bus_controller()?.get_by_number(&register_number)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_get_all() -> String {
    with_app(|app| Ok(app.bus_controller()?.get_all()))
}

/// Adds a bus from its JSON payload and returns the stored record.
#[flutter_rust_bridge::frb(sync)]
pub fn bus_add(payload: String) -> String {
    with_app(|app| Ok(app.bus_controller()?.add(&payload)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_delete_by_id(id: String) -> String {
    with_app(|app| Ok(app.bus_controller()?.delete_by_id(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_update_by_id(payload: String) -> String {
    with_app(|app| Ok(app.bus_controller()?.update_by_id(&payload)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn driver_get_by_id(id: String) -> String {
    with_app(|app| Ok(app.driver_controller()?.get_by_id(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn driver_get_by_passport_series(passport_series: String) -> String {
    with_app(|app| Ok(app.driver_controller()?.get_by_passport_series(&passport_series)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn driver_get_by_snils(snils: String) -> String {
    with_app(|app| Ok(app.driver_controller()?.get_by_snils(&snils)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn driver_get_by_license_series(license_series: String) -> String {
    with_app(|app| Ok(app.driver_controller()?.get_by_license_series(&license_series)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn driver_get_all() -> String {
    with_app(|app| Ok(app.driver_controller()?.get_all()))
}

/// Adds a driver; passport series, SNILS and license series must be unused.
#[flutter_rust_bridge::frb(sync)]
pub fn driver_add(payload: String) -> String {
    with_app(|app| Ok(app.driver_controller()?.add(&payload)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn driver_delete_by_id(id: String) -> String {
    with_app(|app| Ok(app.driver_controller()?.delete_by_id(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn driver_update_by_id(payload: String) -> String {
    with_app(|app| Ok(app.driver_controller()?.update_by_id(&payload)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_stop_get_by_id(id: String) -> String {
    with_app(|app| Ok(app.bus_stop_controller()?.get_by_id(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_stop_get_by_name(name: String) -> String {
    with_app(|app| Ok(app.bus_stop_controller()?.get_by_name(&name)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_stop_get_all() -> String {
    with_app(|app| Ok(app.bus_stop_controller()?.get_all()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_stop_add(payload: String) -> String {
    with_app(|app| Ok(app.bus_stop_controller()?.add(&payload)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_stop_delete_by_id(id: String) -> String {
    with_app(|app| Ok(app.bus_stop_controller()?.delete_by_id(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn bus_stop_update_by_id(payload: String) -> String {
    with_app(|app| Ok(app.bus_stop_controller()?.update_by_id(&payload)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_get_by_id(id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.get_by_id(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_get_by_number(number: String) -> String {
    with_app(|app| Ok(app.route_controller()?.get_by_number(&number)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_get_all() -> String {
    with_app(|app| Ok(app.route_controller()?.get_all()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_add(payload: String) -> String {
    with_app(|app| Ok(app.route_controller()?.add(&payload)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_delete_by_id(id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.delete_by_id(&id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_update_by_id(payload: String) -> String {
    with_app(|app| Ok(app.route_controller()?.update_by_id(&payload)))
}

/// Links a driver to a route.
///
/// # FFI contract
/// - Route existence is checked before the driver's.
/// - Returns `{"Response": "Assigned driver successfully"}` on success.
#[flutter_rust_bridge::frb(sync)]
pub fn route_assign_driver(route_id: String, driver_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.assign_driver(&route_id, &driver_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_assign_bus(route_id: String, bus_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.assign_bus(&route_id, &bus_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_assign_bus_stop(route_id: String, bus_stop_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.assign_bus_stop(&route_id, &bus_stop_id)))
}

/// Unlinks a driver from a route; a missing link is not an error.
#[flutter_rust_bridge::frb(sync)]
pub fn route_unassign_driver(route_id: String, driver_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.unassign_driver(&route_id, &driver_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_unassign_bus(route_id: String, bus_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.unassign_bus(&route_id, &bus_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_unassign_bus_stop(route_id: String, bus_stop_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.unassign_bus_stop(&route_id, &bus_stop_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_get_all_drivers_by_id(route_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.get_all_drivers_by_id(&route_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn route_get_all_buses_by_id(route_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.get_all_buses_by_id(&route_id)))
}

/// Lists the route's stops ordered by their position on the route.
#[flutter_rust_bridge::frb(sync)]
pub fn route_get_all_bus_stops_by_id(route_id: String) -> String {
    with_app(|app| Ok(app.route_controller()?.get_all_bus_stops_by_id(&route_id)))
}

fn default_db_path() -> PathBuf {
    DEFAULT_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
        })
        .clone()
}

fn open_app(path: PathBuf) -> Result<App, String> {
    match App::open(&path) {
        Ok(app) => {
            info!(
                "event=app_open module=ffi status=ok db_path={}",
                path.display()
            );
            Ok(app)
        }
        Err(err) => {
            warn!(
                "event=app_open module=ffi status=error db_path={}",
                path.display()
            );
            Err(format!("database open failed: {err}"))
        }
    }
}

fn lock_app() -> std::sync::MutexGuard<'static, Option<App>> {
    APP.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `call` against the shared app, opening the default database first
/// when `init_app` has not been called.
fn with_app(call: impl FnOnce(&App) -> RepoResult<String>) -> String {
    let mut slot = lock_app();
    if slot.is_none() {
        match open_app(default_db_path()) {
            Ok(app) => *slot = Some(app),
            Err(err) => return error_envelope(&err),
        }
    }
    match slot.as_ref() {
        Some(app) => call(app).unwrap_or_else(|err| error_envelope(&err.to_string())),
        None => error_envelope("database is not open"),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        bus_add, bus_get_by_number, core_version, init_app, init_logging, ping,
        route_add, route_assign_bus, route_get_all_buses_by_id, route_unassign_bus,
    };
    use serde_json::{json, Value};

    fn parse(rendered: &str) -> Value {
        serde_json::from_str(rendered).unwrap()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    // The only test touching the shared database handle.
    #[test]
    fn init_app_then_bus_route_flow() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("busnet.sqlite3");
        assert_eq!(init_app(Some(db_path.display().to_string())), "");

        let bus = parse(&bus_add(
            json!({
                "RegisterNumber": "TEST666",
                "Brand": "Volvo",
                "BusModel": "B7R",
                "AssemblyDate": "2012-03-03T11:11:11Z",
                "LastRepairDate": "2012-03-03T11:11:11Z"
            })
            .to_string(),
        ));
        let bus_id = bus["Id"].as_str().unwrap().to_string();
        assert_eq!(parse(&bus_get_by_number("TEST666".to_string())), bus);

        let route = parse(&route_add(r#"{"Number": "12"}"#.to_string()));
        let route_id = route["Id"].as_str().unwrap().to_string();

        assert_eq!(
            parse(&route_assign_bus(route_id.clone(), bus_id.clone())),
            json!({ "Response": "Assigned bus successfully" })
        );
        assert_eq!(
            parse(&route_get_all_buses_by_id(route_id.clone())),
            json!([bus])
        );
        assert_eq!(
            parse(&route_unassign_bus(route_id.clone(), bus_id)),
            json!({ "Response": "Unassigned bus successfully" })
        );
        assert_eq!(
            parse(&route_assign_bus("missing".to_string(), "x".to_string())),
            json!({ "Error": "Route not found" })
        );
        assert!(db_path.exists());
    }
}
