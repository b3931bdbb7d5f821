//! Bus repository contract and SQLite implementation.
//!
//! # Invariants
//! - `register_number` collisions surface as `AlreadyExists(Bus)`.
//! - Deleting a bus leaves its `routes_buses` rows in place; adding a bus
//!   drops any such rows left under its id.

use super::route_repo::{clear_target_links, Association};
use super::{
    ensure_connection_ready, in_immediate_tx, parse_timestamp, query_all, query_one,
    timestamp_to_db, translate_conflict, RepoError, RepoResult,
};
use crate::model::bus::{Bus, NewBus};
use crate::model::EntityKind;
use log::{info, warn};
use rusqlite::{params, Connection, Row};

pub(crate) const BUS_SELECT_SQL: &str = "SELECT
    id,
    brand,
    bus_model,
    register_number,
    assembly_date,
    last_repair_date
FROM buses";

/// Repository interface for bus records.
pub trait BusRepository {
    fn get_by_id(&self, id: &str) -> RepoResult<Bus>;
    fn get_by_number(&self, register_number: &str) -> RepoResult<Bus>;
    /// Inserts a bus and returns the stored record with its resolved id.
    fn add(&self, bus: NewBus) -> RepoResult<Bus>;
    fn get_all(&self) -> RepoResult<Vec<Bus>>;
    fn delete_by_id(&self, id: &str) -> RepoResult<()>;
    /// Replaces every mutable field of the bus identified by `bus.id`.
    fn update_by_id(&self, bus: &Bus) -> RepoResult<()>;
}

/// SQLite-backed bus repository.
pub struct SqliteBusRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBusRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["buses"])?;
        Ok(Self { conn })
    }
}

impl BusRepository for SqliteBusRepository<'_> {
    fn get_by_id(&self, id: &str) -> RepoResult<Bus> {
        query_one(
            self.conn,
            &format!("{BUS_SELECT_SQL} WHERE id = ?1;"),
            [id],
            EntityKind::Bus,
            parse_bus_row,
        )
    }

    fn get_by_number(&self, register_number: &str) -> RepoResult<Bus> {
        query_one(
            self.conn,
            &format!("{BUS_SELECT_SQL} WHERE register_number = ?1;"),
            [register_number],
            EntityKind::Bus,
            parse_bus_row,
        )
    }

    fn add(&self, bus: NewBus) -> RepoResult<Bus> {
        let bus = bus.into_bus();
        let cleared = in_immediate_tx(self.conn, |conn| {
            conn.execute(
                "INSERT INTO buses (
                    id,
                    brand,
                    bus_model,
                    register_number,
                    assembly_date,
                    last_repair_date
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    bus.id.as_str(),
                    bus.brand.as_str(),
                    bus.model.as_str(),
                    bus.register_number.as_str(),
                    timestamp_to_db(&bus.assembly_date),
                    timestamp_to_db(&bus.last_repair_date),
                ],
            )
            .map_err(|err| translate_conflict(err, RepoError::AlreadyExists(EntityKind::Bus)))?;
            clear_target_links(conn, Association::Buses, &bus.id)
        })
        .inspect_err(|err| {
            warn!("event=entity_add module=repo status=error entity=bus error={err}")
        })?;

        info!(
            "event=entity_add module=repo status=ok entity=bus id={} stale_links_cleared={cleared}",
            bus.id
        );
        Ok(bus)
    }

    fn get_all(&self) -> RepoResult<Vec<Bus>> {
        query_all(self.conn, &format!("{BUS_SELECT_SQL};"), [], parse_bus_row)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM buses WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Bus));
        }

        info!("event=entity_delete module=repo status=ok entity=bus id={id}");
        Ok(())
    }

    fn update_by_id(&self, bus: &Bus) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE buses
                 SET
                    brand = ?1,
                    bus_model = ?2,
                    register_number = ?3,
                    assembly_date = ?4,
                    last_repair_date = ?5
                 WHERE id = ?6;",
                params![
                    bus.brand.as_str(),
                    bus.model.as_str(),
                    bus.register_number.as_str(),
                    timestamp_to_db(&bus.assembly_date),
                    timestamp_to_db(&bus.last_repair_date),
                    bus.id.as_str(),
                ],
            )
            .map_err(|err| translate_conflict(err, RepoError::AlreadyExists(EntityKind::Bus)))?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Bus));
        }

        info!("event=entity_update module=repo status=ok entity=bus id={}", bus.id);
        Ok(())
    }
}

pub(crate) fn parse_bus_row(row: &Row<'_>) -> RepoResult<Bus> {
    Ok(Bus {
        id: row.get("id")?,
        brand: row.get("brand")?,
        model: row.get("bus_model")?,
        register_number: row.get("register_number")?,
        assembly_date: parse_timestamp(row, "assembly_date", "buses")?,
        last_repair_date: parse_timestamp(row, "last_repair_date", "buses")?,
    })
}
