use busnet_core::App;
use serde_json::{json, Value};

const TEST666: &str = r#"{
    "RegisterNumber": "TEST666",
    "Brand": "Volvo",
    "BusModel": "B7R",
    "AssemblyDate": "2012-03-03T11:11:11Z",
    "LastRepairDate": "2012-03-03T11:11:11Z"
}"#;

fn parse(rendered: &str) -> Value {
    serde_json::from_str(rendered).unwrap()
}

fn driver_payload(passport: &str) -> String {
    json!({
        "Name": "John",
        "Surname": "Doe",
        "Patronymic": "Ivanovich",
        "BirthDate": "1985-07-14T00:00:00Z",
        "PassportSeries": passport,
        "Snils": format!("snils-{passport}"),
        "LicenseSeries": format!("license-{passport}"),
    })
    .to_string()
}

#[test]
fn bus_add_then_lookup_then_duplicate() {
    let app = App::open_in_memory().unwrap();
    let buses = app.bus_controller().unwrap();

    let added = parse(&buses.add(TEST666));
    let id = added["Id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(added["BusModel"], "B7R");

    let found = parse(&buses.get_by_number("TEST666"));
    assert_eq!(found, added);
    assert_eq!(found["AssemblyDate"], "2012-03-03T11:11:11Z");

    let duplicate = parse(&buses.add(TEST666));
    assert_eq!(duplicate, json!({ "Error": "Bus already exists" }));
    assert_eq!(parse(&buses.get_all()).as_array().unwrap().len(), 1);
}

#[test]
fn output_is_pretty_printed() {
    let app = App::open_in_memory().unwrap();
    let routes = app.route_controller().unwrap();

    assert_eq!(routes.get_all(), "[]");
    assert_eq!(
        routes.get_by_id("missing"),
        "{\n  \"Error\": \"Route not found\"\n}"
    );
}

#[test]
fn blank_identifiers_are_rejected_before_lookup() {
    let app = App::open_in_memory().unwrap();
    let buses = app.bus_controller().unwrap();
    let routes = app.route_controller().unwrap();

    assert_eq!(parse(&buses.get_by_id("  "))["Error"], "Id can't be blank");
    assert_eq!(
        parse(&buses.get_by_number(""))["Error"],
        "RegisterNumber can't be blank"
    );
    assert_eq!(
        parse(&routes.assign_driver("", "d"))["Error"],
        "RouteId can't be blank"
    );
    assert_eq!(
        parse(&routes.assign_bus_stop("r", " "))["Error"],
        "BusStopId can't be blank"
    );
}

#[test]
fn malformed_payload_is_a_validation_error() {
    let app = App::open_in_memory().unwrap();
    let buses = app.bus_controller().unwrap();

    let rendered = parse(&buses.add("{not json"));
    let message = rendered["Error"].as_str().unwrap();
    assert!(message.starts_with("invalid payload:"), "{message}");

    let rendered = parse(&buses.update_by_id(r#"{"Id": "x"}"#));
    assert!(rendered["Error"]
        .as_str()
        .unwrap()
        .starts_with("invalid payload:"));
}

#[test]
fn update_and_delete_through_controller() {
    let app = App::open_in_memory().unwrap();
    let buses = app.bus_controller().unwrap();

    let mut bus = parse(&buses.add(TEST666));
    bus["Brand"] = json!("Scania");
    let updated = parse(&buses.update_by_id(&bus.to_string()));
    assert_eq!(updated["Brand"], "Scania");

    let id = bus["Id"].as_str().unwrap().to_string();
    assert_eq!(
        parse(&buses.delete_by_id(&id)),
        json!({ "Response": "Deleted bus successfully" })
    );
    assert_eq!(
        parse(&buses.delete_by_id(&id)),
        json!({ "Error": "Bus not found" })
    );
    assert_eq!(
        parse(&buses.update_by_id(&bus.to_string())),
        json!({ "Error": "Bus not found" })
    );
}

#[test]
fn explicit_id_is_kept() {
    let app = App::open_in_memory().unwrap();
    let routes = app.route_controller().unwrap();

    let added = parse(&routes.add(r#"{"Id": "route-7", "Number": "7"}"#));
    assert_eq!(added, json!({ "Id": "route-7", "Number": "7" }));
    assert_eq!(parse(&routes.get_by_number("7")), added);
}

#[test]
fn padded_id_round_trips_exactly() {
    let app = App::open_in_memory().unwrap();
    let routes = app.route_controller().unwrap();

    let added = parse(&routes.add(r#"{"Id": " r1 ", "Number": "7"}"#));
    assert_eq!(added["Id"], " r1 ");
    assert_eq!(parse(&routes.get_by_id(" r1 ")), added);

    let updated = parse(&routes.update_by_id(r#"{"Id": " r1 ", "Number": "7K"}"#));
    assert_eq!(updated, json!({ "Id": " r1 ", "Number": "7K" }));
    assert_eq!(
        parse(&routes.delete_by_id(" r1 ")),
        json!({ "Response": "Deleted route successfully" })
    );
}

#[test]
fn driver_update_accepts_the_add_payload_shape() {
    let app = App::open_in_memory().unwrap();
    let drivers = app.driver_controller().unwrap();
    let payload = json!({
        "Name": "Anna",
        "Surname": "Smith",
        "BirthDate": "1990-01-02T00:00:00Z",
        "PassportSeries": "AB0003",
        "Snils": "snils-AB0003",
        "LicenseSeries": "license-AB0003",
    });

    let added = parse(&drivers.add(&payload.to_string()));
    assert_eq!(added["Patronymic"], "");

    let mut update = payload.clone();
    update["Id"] = added["Id"].clone();
    update["Surname"] = json!("Jones");
    let updated = parse(&drivers.update_by_id(&update.to_string()));
    assert_eq!(updated["Surname"], "Jones");
    assert_eq!(updated["Patronymic"], "");
}

#[test]
fn driver_natural_key_lookups() {
    let app = App::open_in_memory().unwrap();
    let drivers = app.driver_controller().unwrap();

    let added = parse(&drivers.add(&driver_payload("AB0001")));
    assert_eq!(parse(&drivers.get_by_passport_series("AB0001")), added);
    assert_eq!(parse(&drivers.get_by_snils("snils-AB0001")), added);
    assert_eq!(parse(&drivers.get_by_license_series("license-AB0001")), added);
    assert_eq!(
        parse(&drivers.add(&driver_payload("AB0001"))),
        json!({ "Error": "Driver already exists" })
    );
}

#[test]
fn route_assignment_flow() {
    let app = App::open_in_memory().unwrap();
    let routes = app.route_controller().unwrap();
    let drivers = app.driver_controller().unwrap();
    let stops = app.bus_stop_controller().unwrap();

    let route = parse(&routes.add(r#"{"Number": "42"}"#));
    let route_id = route["Id"].as_str().unwrap().to_string();
    let driver = parse(&drivers.add(&driver_payload("AB0002")));
    let driver_id = driver["Id"].as_str().unwrap().to_string();
    let stop = parse(&stops.add(
        r#"{"Lat": 55.75, "Long": 37.61, "Order": 1, "Name": "Depot"}"#,
    ));
    let stop_id = stop["Id"].as_str().unwrap().to_string();

    assert_eq!(
        parse(&routes.assign_driver("ghost", &driver_id)),
        json!({ "Error": "Route not found" })
    );
    assert_eq!(
        parse(&routes.assign_driver(&route_id, "ghost")),
        json!({ "Error": "Driver not found" })
    );
    assert_eq!(
        parse(&routes.assign_driver(&route_id, &driver_id)),
        json!({ "Response": "Assigned driver successfully" })
    );
    assert_eq!(
        parse(&routes.assign_bus_stop(&route_id, &stop_id)),
        json!({ "Response": "Assigned bus stop successfully" })
    );

    assert_eq!(
        parse(&routes.get_all_drivers_by_id(&route_id)),
        json!([driver])
    );
    assert_eq!(
        parse(&routes.get_all_bus_stops_by_id(&route_id)),
        json!([stop])
    );
    assert_eq!(parse(&routes.get_all_buses_by_id(&route_id)), json!([]));

    assert_eq!(
        parse(&routes.unassign_driver(&route_id, &driver_id)),
        json!({ "Response": "Unassigned driver successfully" })
    );
    assert_eq!(
        parse(&routes.unassign_bus(&route_id, "never")),
        json!({ "Response": "Unassigned bus successfully" })
    );
    assert_eq!(parse(&routes.get_all_drivers_by_id(&route_id)), json!([]));
}
