//! Driver JSON controller.

use super::{decode, require, respond, ControllerResult, ResponseEnvelope};
use crate::model::driver::{Driver, NewDriver};
use crate::repo::driver_repo::DriverRepository;
use crate::service::driver_service::DriverService;

pub struct DriverController<R: DriverRepository> {
    service: DriverService<R>,
}

impl<R: DriverRepository> DriverController<R> {
    pub fn new(service: DriverService<R>) -> Self {
        Self { service }
    }

    pub fn get_by_id(&self, id: &str) -> String {
        respond("driver_get_by_id", || {
            require("Id", id)?;
            Ok(self.service.get_by_id(id)?)
        })
    }

    pub fn get_by_passport_series(&self, passport_series: &str) -> String {
        respond("driver_get_by_passport_series", || {
            require("PassportSeries", passport_series)?;
            Ok(self.service.get_by_passport_series(passport_series)?)
        })
    }

    pub fn get_by_snils(&self, snils: &str) -> String {
        respond("driver_get_by_snils", || {
            require("Snils", snils)?;
            Ok(self.service.get_by_snils(snils)?)
        })
    }

    pub fn get_by_license_series(&self, license_series: &str) -> String {
        respond("driver_get_by_license_series", || {
            require("LicenseSeries", license_series)?;
            Ok(self.service.get_by_license_series(license_series)?)
        })
    }

    pub fn get_all(&self) -> String {
        respond("driver_get_all", || Ok(self.service.get_all()?))
    }

    pub fn add(&self, payload: &str) -> String {
        respond("driver_add", || {
            let driver: NewDriver = decode(payload)?;
            require_natural_keys(
                &driver.passport_series,
                &driver.snils,
                &driver.license_series,
            )?;
            Ok(self.service.add(driver)?)
        })
    }

    pub fn delete_by_id(&self, id: &str) -> String {
        respond("driver_delete_by_id", || {
            require("Id", id)?;
            self.service.delete_by_id(id)?;
            Ok(ResponseEnvelope::new("Deleted driver successfully"))
        })
    }

    pub fn update_by_id(&self, payload: &str) -> String {
        respond("driver_update_by_id", || {
            let driver: Driver = decode(payload)?;
            require("Id", &driver.id)?;
            require_natural_keys(
                &driver.passport_series,
                &driver.snils,
                &driver.license_series,
            )?;
            Ok(self.service.update_by_id(&driver)?)
        })
    }
}

fn require_natural_keys(
    passport_series: &str,
    snils: &str,
    license_series: &str,
) -> ControllerResult<()> {
    require("PassportSeries", passport_series)?;
    require("Snils", snils)?;
    require("LicenseSeries", license_series)
}
