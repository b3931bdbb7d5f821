//! Driver repository contract and SQLite implementation.
//!
//! # Invariants
//! - Passport series, SNILS and license series are each unique; any of them
//!   colliding surfaces as `AlreadyExists(Driver)`.
//! - Log events carry driver ids only, never personal fields.

use super::route_repo::{clear_target_links, Association};
use super::{
    ensure_connection_ready, in_immediate_tx, parse_timestamp, query_all, query_one,
    timestamp_to_db, translate_conflict, RepoError, RepoResult,
};
use crate::model::driver::{Driver, NewDriver};
use crate::model::EntityKind;
use log::{info, warn};
use rusqlite::{params, Connection, Row};

pub(crate) const DRIVER_SELECT_SQL: &str = "SELECT
    id,
    name,
    surname,
    patronymic,
    birth_date,
    passport_series,
    snils,
    license_series
FROM drivers";

/// Repository interface for driver records.
pub trait DriverRepository {
    fn get_by_id(&self, id: &str) -> RepoResult<Driver>;
    fn get_by_passport_series(&self, passport_series: &str) -> RepoResult<Driver>;
    fn get_by_snils(&self, snils: &str) -> RepoResult<Driver>;
    fn get_by_license_series(&self, license_series: &str) -> RepoResult<Driver>;
    fn add(&self, driver: NewDriver) -> RepoResult<Driver>;
    fn get_all(&self) -> RepoResult<Vec<Driver>>;
    fn delete_by_id(&self, id: &str) -> RepoResult<()>;
    fn update_by_id(&self, driver: &Driver) -> RepoResult<()>;
}

/// SQLite-backed driver repository.
pub struct SqliteDriverRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDriverRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["drivers"])?;
        Ok(Self { conn })
    }

    fn get_by_column(&self, column: &str, value: &str) -> RepoResult<Driver> {
        query_one(
            self.conn,
            &format!("{DRIVER_SELECT_SQL} WHERE {column} = ?1;"),
            [value],
            EntityKind::Driver,
            parse_driver_row,
        )
    }
}

impl DriverRepository for SqliteDriverRepository<'_> {
    fn get_by_id(&self, id: &str) -> RepoResult<Driver> {
        self.get_by_column("id", id)
    }

    fn get_by_passport_series(&self, passport_series: &str) -> RepoResult<Driver> {
        self.get_by_column("passport_series", passport_series)
    }

    fn get_by_snils(&self, snils: &str) -> RepoResult<Driver> {
        self.get_by_column("snils", snils)
    }

    fn get_by_license_series(&self, license_series: &str) -> RepoResult<Driver> {
        self.get_by_column("license_series", license_series)
    }

    fn add(&self, driver: NewDriver) -> RepoResult<Driver> {
        let driver = driver.into_driver();
        let cleared = in_immediate_tx(self.conn, |conn| {
            conn.execute(
                "INSERT INTO drivers (
                    id,
                    name,
                    surname,
                    patronymic,
                    birth_date,
                    passport_series,
                    snils,
                    license_series
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    driver.id.as_str(),
                    driver.name.as_str(),
                    driver.surname.as_str(),
                    driver.patronymic.as_str(),
                    timestamp_to_db(&driver.birth_date),
                    driver.passport_series.as_str(),
                    driver.snils.as_str(),
                    driver.license_series.as_str(),
                ],
            )
            .map_err(|err| translate_conflict(err, RepoError::AlreadyExists(EntityKind::Driver)))?;
            clear_target_links(conn, Association::Drivers, &driver.id)
        })
        .inspect_err(|err| {
            warn!("event=entity_add module=repo status=error entity=driver error={err}")
        })?;

        info!(
            "event=entity_add module=repo status=ok entity=driver id={} stale_links_cleared={cleared}",
            driver.id
        );
        Ok(driver)
    }

    fn get_all(&self) -> RepoResult<Vec<Driver>> {
        query_all(
            self.conn,
            &format!("{DRIVER_SELECT_SQL};"),
            [],
            parse_driver_row,
        )
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM drivers WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Driver));
        }

        info!("event=entity_delete module=repo status=ok entity=driver id={id}");
        Ok(())
    }

    fn update_by_id(&self, driver: &Driver) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE drivers
                 SET
                    name = ?1,
                    surname = ?2,
                    patronymic = ?3,
                    birth_date = ?4,
                    passport_series = ?5,
                    snils = ?6,
                    license_series = ?7
                 WHERE id = ?8;",
                params![
                    driver.name.as_str(),
                    driver.surname.as_str(),
                    driver.patronymic.as_str(),
                    timestamp_to_db(&driver.birth_date),
                    driver.passport_series.as_str(),
                    driver.snils.as_str(),
                    driver.license_series.as_str(),
                    driver.id.as_str(),
                ],
            )
            .map_err(|err| translate_conflict(err, RepoError::AlreadyExists(EntityKind::Driver)))?;

        if changed == 0 {
            return Err(RepoError::NotFound(EntityKind::Driver));
        }

        info!(
            "event=entity_update module=repo status=ok entity=driver id={}",
            driver.id
        );
        Ok(())
    }
}

pub(crate) fn parse_driver_row(row: &Row<'_>) -> RepoResult<Driver> {
    Ok(Driver {
        id: row.get("id")?,
        name: row.get("name")?,
        surname: row.get("surname")?,
        patronymic: row.get("patronymic")?,
        birth_date: parse_timestamp(row, "birth_date", "drivers")?,
        passport_series: row.get("passport_series")?,
        snils: row.get("snils")?,
        license_series: row.get("license_series")?,
    })
}
