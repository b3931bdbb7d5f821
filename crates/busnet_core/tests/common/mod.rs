#![allow(dead_code)]

use busnet_core::{IdSpec, NewBus, NewBusStop, NewDriver, NewRoute};
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::Connection;

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 11, 11, 11).unwrap()
}

pub fn new_bus(register_number: &str) -> NewBus {
    NewBus {
        id: IdSpec::Generate,
        brand: "Volvo".to_string(),
        model: "B7R".to_string(),
        register_number: register_number.to_string(),
        assembly_date: at(2012, 3, 3),
        last_repair_date: at(2020, 6, 1),
    }
}

pub fn new_driver(suffix: &str) -> NewDriver {
    NewDriver {
        id: IdSpec::Generate,
        name: "John".to_string(),
        surname: "Doe".to_string(),
        patronymic: "Ivanovich".to_string(),
        birth_date: at(1985, 7, 14),
        passport_series: format!("AB{suffix}"),
        snils: format!("123-456-{suffix}"),
        license_series: format!("CD{suffix}"),
    }
}

pub fn new_bus_stop(name: &str, order: i64) -> NewBusStop {
    NewBusStop {
        id: IdSpec::Generate,
        route_id: None,
        lat: 55.7558,
        long: 37.6173,
        order,
        name: name.to_string(),
    }
}

pub fn new_route(number: &str) -> NewRoute {
    NewRoute {
        id: IdSpec::Generate,
        number: number.to_string(),
    }
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
