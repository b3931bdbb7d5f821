//! Driver use-case service.

use crate::model::driver::{Driver, NewDriver};
use crate::repo::driver_repo::DriverRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for driver operations.
pub struct DriverService<R: DriverRepository> {
    repo: R,
}

impl<R: DriverRepository> DriverService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_by_id(&self, id: &str) -> RepoResult<Driver> {
        self.repo.get_by_id(id)
    }

    pub fn get_by_passport_series(&self, passport_series: &str) -> RepoResult<Driver> {
        self.repo.get_by_passport_series(passport_series)
    }

    pub fn get_by_snils(&self, snils: &str) -> RepoResult<Driver> {
        self.repo.get_by_snils(snils)
    }

    pub fn get_by_license_series(&self, license_series: &str) -> RepoResult<Driver> {
        self.repo.get_by_license_series(license_series)
    }

    pub fn add(&self, driver: NewDriver) -> RepoResult<Driver> {
        self.repo.add(driver)
    }

    pub fn get_all(&self) -> RepoResult<Vec<Driver>> {
        self.repo.get_all()
    }

    pub fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }

    pub fn update_by_id(&self, driver: &Driver) -> RepoResult<Driver> {
        self.repo.update_by_id(driver)?;
        self.repo.get_by_id(&driver.id)
    }
}
