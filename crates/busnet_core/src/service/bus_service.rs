//! Bus use-case service.

use crate::model::bus::{Bus, NewBus};
use crate::repo::bus_repo::BusRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for bus operations.
pub struct BusService<R: BusRepository> {
    repo: R,
}

impl<R: BusRepository> BusService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_by_id(&self, id: &str) -> RepoResult<Bus> {
        self.repo.get_by_id(id)
    }

    /// Looks a bus up by its register number.
    pub fn get_by_number(&self, register_number: &str) -> RepoResult<Bus> {
        self.repo.get_by_number(register_number)
    }

    /// Adds a bus and returns the stored record, including a generated id.
    pub fn add(&self, bus: NewBus) -> RepoResult<Bus> {
        self.repo.add(bus)
    }

    pub fn get_all(&self) -> RepoResult<Vec<Bus>> {
        self.repo.get_all()
    }

    pub fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }

    /// Replaces the bus and returns it as stored.
    pub fn update_by_id(&self, bus: &Bus) -> RepoResult<Bus> {
        self.repo.update_by_id(bus)?;
        self.repo.get_by_id(&bus.id)
    }
}
