//! Route repository contract, SQLite implementation and route associations.
//!
//! # Responsibility
//! - CRUD over `routes`.
//! - Manage the three route associations (`routes_drivers`, `routes_buses`,
//!   `routes_bus_stops`) and read the joined entities back.
//!
//! # Invariants
//! - Assigning inserts at most one row, and only when the route exists; the
//!   existence check and the insert are one statement.
//! - Association targets are not checked here; `RouteService` does that.
//! - Unassigning a missing association on an existing route is a no-op.
//! - Joined reads skip association rows whose target no longer exists.
//! - Such leftover rows are dropped when a record reusing their id is added,
//!   so the new record starts with no associations.

use super::bus_repo::{parse_bus_row, BUS_SELECT_SQL};
use super::bus_stop_repo::{parse_bus_stop_row, BUS_STOP_SELECT_SQL};
use super::driver_repo::{parse_driver_row, DRIVER_SELECT_SQL};
use super::{
    ensure_connection_ready, in_immediate_tx, query_all, query_one, translate_conflict, RepoError,
    RepoResult,
};
use crate::model::bus::Bus;
use crate::model::bus_stop::BusStop;
use crate::model::driver::Driver;
use crate::model::route::{NewRoute, Route};
use crate::model::EntityKind;
use log::{debug, info, warn};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const ROUTE_SELECT_SQL: &str = "SELECT id, number FROM routes";

/// Many-to-many relation between a route and another entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Association {
    Drivers,
    Buses,
    BusStops,
}

impl Association {
    fn table(self) -> &'static str {
        match self {
            Self::Drivers => "routes_drivers",
            Self::Buses => "routes_buses",
            Self::BusStops => "routes_bus_stops",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Drivers => "driver_id",
            Self::Buses => "bus_id",
            Self::BusStops => "bus_stop_id",
        }
    }

    /// Entity family on the non-route side of the relation.
    pub fn target(self) -> EntityKind {
        match self {
            Self::Drivers => EntityKind::Driver,
            Self::Buses => EntityKind::Bus,
            Self::BusStops => EntityKind::BusStop,
        }
    }
}

/// Repository interface for routes and their associations.
pub trait RouteRepository {
    fn get_by_id(&self, id: &str) -> RepoResult<Route>;
    fn get_by_number(&self, number: &str) -> RepoResult<Route>;
    fn add(&self, route: NewRoute) -> RepoResult<Route>;
    fn get_all(&self) -> RepoResult<Vec<Route>>;
    fn delete_by_id(&self, id: &str) -> RepoResult<()>;
    fn update_by_id(&self, route: &Route) -> RepoResult<()>;

    /// Inserts one association row; `NotFound(Route)` when the route is absent.
    fn assign(&self, association: Association, route_id: &str, other_id: &str)
        -> RepoResult<()>;
    /// Deletes one association row if present; `NotFound(Route)` when the
    /// route is absent.
    fn unassign(
        &self,
        association: Association,
        route_id: &str,
        other_id: &str,
    ) -> RepoResult<()>;

    fn get_all_drivers_by_id(&self, route_id: &str) -> RepoResult<Vec<Driver>>;
    fn get_all_buses_by_id(&self, route_id: &str) -> RepoResult<Vec<Bus>>;
    fn get_all_bus_stops_by_id(&self, route_id: &str) -> RepoResult<Vec<BusStop>>;

    fn assign_driver(&self, route_id: &str, driver_id: &str) -> RepoResult<()> {
        self.assign(Association::Drivers, route_id, driver_id)
    }

    fn assign_bus(&self, route_id: &str, bus_id: &str) -> RepoResult<()> {
        self.assign(Association::Buses, route_id, bus_id)
    }

    fn assign_bus_stop(&self, route_id: &str, bus_stop_id: &str) -> RepoResult<()> {
        self.assign(Association::BusStops, route_id, bus_stop_id)
    }

    fn unassign_driver(&self, route_id: &str, driver_id: &str) -> RepoResult<()> {
        self.unassign(Association::Drivers, route_id, driver_id)
    }

    fn unassign_bus(&self, route_id: &str, bus_id: &str) -> RepoResult<()> {
        self.unassign(Association::Buses, route_id, bus_id)
    }

    fn unassign_bus_stop(&self, route_id: &str, bus_stop_id: &str) -> RepoResult<()> {
        self.unassign(Association::BusStops, route_id, bus_stop_id)
    }
}

/// SQLite-backed route repository.
pub struct SqliteRouteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRouteRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                "routes",
                "routes_drivers",
                "routes_buses",
                "routes_bus_stops",
            ],
        )?;
        Ok(Self { conn })
    }

    /// Runs `read` inside one read transaction after checking the route exists.
    fn read_joined<T>(
        &self,
        route_id: &str,
        read: impl FnOnce(&Connection) -> RepoResult<Vec<T>>,
    ) -> RepoResult<Vec<T>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        ensure_route_exists(&*tx, route_id)?;
        let items = read(&*tx)?;
        tx.commit()?;
        Ok(items)
    }
}

impl RouteRepository for SqliteRouteRepository<'_> {
    fn get_by_id(&self, id: &str) -> RepoResult<Route> {
        query_one(
            self.conn,
            &format!("{ROUTE_SELECT_SQL} WHERE id = ?1;"),
            [id],
            EntityKind::Route,
            parse_route_row,
        )
    }

    fn get_by_number(&self, number: &str) -> RepoResult<Route> {
        query_one(
            self.conn,
            &format!("{ROUTE_SELECT_SQL} WHERE number = ?1;"),
            [number],
            EntityKind::Route,
            parse_route_row,
        )
    }

    fn add(&self, route: NewRoute) -> RepoResult<Route> {
        let route = route.into_route();
        let cleared = in_immediate_tx(self.conn, |conn| {
            conn.execute(
                "INSERT INTO routes (id, number) VALUES (?1, ?2);",
                params![route.id.as_str(), route.number.as_str()],
            )
            .map_err(|err| translate_conflict(err, RepoError::AlreadyExists(EntityKind::Route)))?;
            clear_route_links(conn, &route.id)
        })
        .inspect_err(|err| {
            warn!("event=entity_add module=repo status=error entity=route error={err}")
        })?;

        info!(
            "event=entity_add module=repo status=ok entity=route id={} stale_links_cleared={cleared}",
            route.id
        );
        Ok(route)
    }

    fn get_all(&self) -> RepoResult<Vec<Route>> {
        query_all(
            self.conn,
            &format!("{ROUTE_SELECT_SQL};"),
            [],
            parse_route_row,
        )
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM routes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Route));
        }

        info!("event=entity_delete module=repo status=ok entity=route id={id}");
        Ok(())
    }

    fn update_by_id(&self, route: &Route) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE routes SET number = ?1 WHERE id = ?2;",
                params![route.number.as_str(), route.id.as_str()],
            )
            .map_err(|err| translate_conflict(err, RepoError::AlreadyExists(EntityKind::Route)))?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Route));
        }

        info!(
            "event=entity_update module=repo status=ok entity=route id={}",
            route.id
        );
        Ok(())
    }

    fn assign(
        &self,
        association: Association,
        route_id: &str,
        other_id: &str,
    ) -> RepoResult<()> {
        let sql = format!(
            "INSERT INTO {table} (route_id, {column})
             SELECT id, ?2 FROM routes WHERE id = ?1;",
            table = association.table(),
            column = association.column(),
        );
        let inserted = self
            .conn
            .execute(&sql, params![route_id, other_id])
            .map_err(|err| {
                translate_conflict(err, RepoError::AlreadyAssigned(association.target()))
            })?;

        if inserted == 0 {
            return Err(RepoError::NotFound(EntityKind::Route));
        }

        info!(
            "event=route_assign module=repo status=ok target={} route_id={route_id} target_id={other_id}",
            association.target().as_str()
        );
        Ok(())
    }

    fn unassign(
        &self,
        association: Association,
        route_id: &str,
        other_id: &str,
    ) -> RepoResult<()> {
        let removed = in_immediate_tx(self.conn, |conn| {
            ensure_route_exists(conn, route_id)?;
            Ok(conn.execute(
                &format!(
                    "DELETE FROM {table} WHERE route_id = ?1 AND {column} = ?2;",
                    table = association.table(),
                    column = association.column(),
                ),
                params![route_id, other_id],
            )?)
        })?;

        if removed == 0 {
            debug!(
                "event=route_unassign module=repo status=noop target={} route_id={route_id}",
                association.target().as_str()
            );
        } else {
            info!(
                "event=route_unassign module=repo status=ok target={} route_id={route_id} target_id={other_id}",
                association.target().as_str()
            );
        }
        Ok(())
    }

    fn get_all_drivers_by_id(&self, route_id: &str) -> RepoResult<Vec<Driver>> {
        self.read_joined(route_id, |conn| {
            query_all(
                conn,
                &format!(
                    "{DRIVER_SELECT_SQL}
                     WHERE id IN (SELECT driver_id FROM routes_drivers WHERE route_id = ?1);"
                ),
                [route_id],
                parse_driver_row,
            )
        })
    }

    fn get_all_buses_by_id(&self, route_id: &str) -> RepoResult<Vec<Bus>> {
        self.read_joined(route_id, |conn| {
            query_all(
                conn,
                &format!(
                    "{BUS_SELECT_SQL}
                     WHERE id IN (SELECT bus_id FROM routes_buses WHERE route_id = ?1);"
                ),
                [route_id],
                parse_bus_row,
            )
        })
    }

    fn get_all_bus_stops_by_id(&self, route_id: &str) -> RepoResult<Vec<BusStop>> {
        self.read_joined(route_id, |conn| {
            query_all(
                conn,
                &format!(
                    "{BUS_STOP_SELECT_SQL}
                     WHERE id IN (SELECT bus_stop_id FROM routes_bus_stops WHERE route_id = ?1)
                     ORDER BY \"order\" ASC, id ASC;"
                ),
                [route_id],
                parse_bus_stop_row,
            )
        })
    }
}

/// Deletes association rows on the target side that still reference
/// `target_id`; returns how many were removed.
pub(crate) fn clear_target_links(
    conn: &Connection,
    association: Association,
    target_id: &str,
) -> RepoResult<usize> {
    let removed = conn.execute(
        &format!(
            "DELETE FROM {table} WHERE {column} = ?1;",
            table = association.table(),
            column = association.column(),
        ),
        [target_id],
    )?;
    Ok(removed)
}

fn clear_route_links(conn: &Connection, route_id: &str) -> RepoResult<usize> {
    let mut removed = 0;
    for association in [
        Association::Drivers,
        Association::Buses,
        Association::BusStops,
    ] {
        removed += conn.execute(
            &format!(
                "DELETE FROM {table} WHERE route_id = ?1;",
                table = association.table()
            ),
            [route_id],
        )?;
    }
    Ok(removed)
}

fn ensure_route_exists(conn: &Connection, route_id: &str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM routes WHERE id = ?1);",
        [route_id],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::NotFound(EntityKind::Route))
    }
}

fn parse_route_row(row: &Row<'_>) -> RepoResult<Route> {
    Ok(Route {
        id: row.get("id")?,
        number: row.get("number")?,
    })
}
