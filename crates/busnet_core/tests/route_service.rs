mod common;

use busnet_core::db::open_db_in_memory;
use busnet_core::{
    BusRepository, BusStopRepository, DriverRepository, EntityKind, RepoError, RouteService,
    SqliteBusRepository, SqliteBusStopRepository, SqliteDriverRepository, SqliteRouteRepository,
};
use common::{count_rows, new_bus, new_bus_stop, new_driver, new_route};
use rusqlite::Connection;

type Service<'conn> = RouteService<
    SqliteRouteRepository<'conn>,
    SqliteDriverRepository<'conn>,
    SqliteBusRepository<'conn>,
    SqliteBusStopRepository<'conn>,
>;

fn service(conn: &Connection) -> Service<'_> {
    RouteService::new(
        SqliteRouteRepository::try_new(conn).unwrap(),
        SqliteDriverRepository::try_new(conn).unwrap(),
        SqliteBusRepository::try_new(conn).unwrap(),
        SqliteBusStopRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn assign_checks_route_before_target() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.assign_driver("ghost-route", "ghost-driver").unwrap_err();
    assert_eq!(err.to_string(), "Route not found");
    let err = service.assign_bus("ghost-route", "ghost-bus").unwrap_err();
    assert_eq!(err.to_string(), "Route not found");
    let err = service.assign_bus_stop("ghost-route", "ghost-stop").unwrap_err();
    assert_eq!(err.to_string(), "Route not found");
}

#[test]
fn assign_reports_missing_targets_distinctly() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let route = service.add(new_route("7")).unwrap();

    let err = service.assign_driver(&route.id, "ghost").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(EntityKind::Driver)));
    assert_eq!(err.to_string(), "Driver not found");

    let err = service.assign_bus(&route.id, "ghost").unwrap_err();
    assert_eq!(err.to_string(), "Bus not found");

    let err = service.assign_bus_stop(&route.id, "ghost").unwrap_err();
    assert_eq!(err.to_string(), "Bus stop not found");

    assert_eq!(count_rows(&conn, "routes_drivers"), 0);
    assert_eq!(count_rows(&conn, "routes_buses"), 0);
    assert_eq!(count_rows(&conn, "routes_bus_stops"), 0);
}

#[test]
fn full_assignment_flow() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let driver = SqliteDriverRepository::try_new(&conn)
        .unwrap()
        .add(new_driver("0001"))
        .unwrap();
    let bus = SqliteBusRepository::try_new(&conn)
        .unwrap()
        .add(new_bus("A001AA"))
        .unwrap();
    let stop = SqliteBusStopRepository::try_new(&conn)
        .unwrap()
        .add(new_bus_stop("Depot", 1))
        .unwrap();
    let route = service.add(new_route("7")).unwrap();

    service.assign_driver(&route.id, &driver.id).unwrap();
    service.assign_bus(&route.id, &bus.id).unwrap();
    service.assign_bus_stop(&route.id, &stop.id).unwrap();

    assert_eq!(service.get_all_drivers_by_id(&route.id).unwrap(), vec![driver.clone()]);
    assert_eq!(service.get_all_buses_by_id(&route.id).unwrap(), vec![bus.clone()]);
    assert_eq!(service.get_all_bus_stops_by_id(&route.id).unwrap(), vec![stop.clone()]);

    service.unassign_driver(&route.id, &driver.id).unwrap();
    service.unassign_bus(&route.id, &bus.id).unwrap();
    service.unassign_bus_stop(&route.id, &stop.id).unwrap();

    assert!(service.get_all_drivers_by_id(&route.id).unwrap().is_empty());
    assert!(service.get_all_buses_by_id(&route.id).unwrap().is_empty());
    assert!(service.get_all_bus_stops_by_id(&route.id).unwrap().is_empty());
}

#[test]
fn update_returns_stored_route() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let mut route = service.add(new_route("7")).unwrap();

    route.number = "7K".to_string();
    let updated = service.update_by_id(&route).unwrap();
    assert_eq!(updated, route);
    assert_eq!(service.get_by_number("7K").unwrap().id, route.id);
    assert_eq!(service.get_all().unwrap().len(), 1);

    service.delete_by_id(&route.id).unwrap();
    assert!(matches!(
        service.get_by_id(&route.id).unwrap_err(),
        RepoError::NotFound(EntityKind::Route)
    ));
}
