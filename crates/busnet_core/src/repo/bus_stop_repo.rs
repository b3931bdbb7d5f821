//! Bus stop repository contract and SQLite implementation.

use super::route_repo::{clear_target_links, Association};
use super::{
    ensure_connection_ready, in_immediate_tx, query_all, query_one, translate_conflict, RepoError,
    RepoResult,
};
use crate::model::bus_stop::{normalize_route_id, BusStop, NewBusStop};
use crate::model::EntityKind;
use log::{info, warn};
use rusqlite::{params, Connection, Row};

pub(crate) const BUS_STOP_SELECT_SQL: &str = "SELECT
    id,
    route_id,
    lat,
    long,
    \"order\",
    name
FROM bus_stops";

/// Repository interface for bus stop records.
pub trait BusStopRepository {
    fn get_by_id(&self, id: &str) -> RepoResult<BusStop>;
    fn get_by_name(&self, name: &str) -> RepoResult<BusStop>;
    fn add(&self, bus_stop: NewBusStop) -> RepoResult<BusStop>;
    fn get_all(&self) -> RepoResult<Vec<BusStop>>;
    fn delete_by_id(&self, id: &str) -> RepoResult<()>;
    fn update_by_id(&self, bus_stop: &BusStop) -> RepoResult<()>;
}

/// SQLite-backed bus stop repository.
pub struct SqliteBusStopRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBusStopRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["bus_stops"])?;
        Ok(Self { conn })
    }
}

impl BusStopRepository for SqliteBusStopRepository<'_> {
    fn get_by_id(&self, id: &str) -> RepoResult<BusStop> {
        query_one(
            self.conn,
            &format!("{BUS_STOP_SELECT_SQL} WHERE id = ?1;"),
            [id],
            EntityKind::BusStop,
            parse_bus_stop_row,
        )
    }

    fn get_by_name(&self, name: &str) -> RepoResult<BusStop> {
        query_one(
            self.conn,
            &format!("{BUS_STOP_SELECT_SQL} WHERE name = ?1;"),
            [name],
            EntityKind::BusStop,
            parse_bus_stop_row,
        )
    }

    fn add(&self, bus_stop: NewBusStop) -> RepoResult<BusStop> {
        let bus_stop = bus_stop.into_bus_stop();
        let cleared = in_immediate_tx(self.conn, |conn| {
            conn.execute(
                "INSERT INTO bus_stops (id, route_id, lat, long, \"order\", name)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    bus_stop.id.as_str(),
                    bus_stop.route_id.as_deref(),
                    bus_stop.lat,
                    bus_stop.long,
                    bus_stop.order,
                    bus_stop.name.as_str(),
                ],
            )
            .map_err(|err| {
                translate_conflict(err, RepoError::AlreadyExists(EntityKind::BusStop))
            })?;
            clear_target_links(conn, Association::BusStops, &bus_stop.id)
        })
        .inspect_err(|err| {
            warn!("event=entity_add module=repo status=error entity=bus_stop error={err}")
        })?;

        info!(
            "event=entity_add module=repo status=ok entity=bus_stop id={} stale_links_cleared={cleared}",
            bus_stop.id
        );
        Ok(bus_stop)
    }

    fn get_all(&self) -> RepoResult<Vec<BusStop>> {
        query_all(
            self.conn,
            &format!("{BUS_STOP_SELECT_SQL};"),
            [],
            parse_bus_stop_row,
        )
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM bus_stops WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::BusStop));
        }

        info!("event=entity_delete module=repo status=ok entity=bus_stop id={id}");
        Ok(())
    }

    fn update_by_id(&self, bus_stop: &BusStop) -> RepoResult<()> {
        let route_id = normalize_route_id(bus_stop.route_id.clone());
        let changed = self
            .conn
            .execute(
                "UPDATE bus_stops
                 SET
                    route_id = ?1,
                    lat = ?2,
                    long = ?3,
                    \"order\" = ?4,
                    name = ?5
                 WHERE id = ?6;",
                params![
                    route_id.as_deref(),
                    bus_stop.lat,
                    bus_stop.long,
                    bus_stop.order,
                    bus_stop.name.as_str(),
                    bus_stop.id.as_str(),
                ],
            )
            .map_err(|err| translate_conflict(err, RepoError::AlreadyExists(EntityKind::BusStop)))?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::BusStop));
        }

        info!(
            "event=entity_update module=repo status=ok entity=bus_stop id={}",
            bus_stop.id
        );
        Ok(())
    }
}

pub(crate) fn parse_bus_stop_row(row: &Row<'_>) -> RepoResult<BusStop> {
    Ok(BusStop {
        id: row.get("id")?,
        route_id: row.get("route_id")?,
        lat: row.get("lat")?,
        long: row.get("long")?,
        order: row.get("order")?,
        name: row.get("name")?,
    })
}
