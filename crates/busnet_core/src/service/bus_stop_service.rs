//! Bus stop use-case service.

use crate::model::bus_stop::{BusStop, NewBusStop};
use crate::repo::bus_stop_repo::BusStopRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for bus stop operations.
pub struct BusStopService<R: BusStopRepository> {
    repo: R,
}

impl<R: BusStopRepository> BusStopService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_by_id(&self, id: &str) -> RepoResult<BusStop> {
        self.repo.get_by_id(id)
    }

    pub fn get_by_name(&self, name: &str) -> RepoResult<BusStop> {
        self.repo.get_by_name(name)
    }

    pub fn add(&self, bus_stop: NewBusStop) -> RepoResult<BusStop> {
        self.repo.add(bus_stop)
    }

    pub fn get_all(&self) -> RepoResult<Vec<BusStop>> {
        self.repo.get_all()
    }

    pub fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }

    pub fn update_by_id(&self, bus_stop: &BusStop) -> RepoResult<BusStop> {
        self.repo.update_by_id(bus_stop)?;
        self.repo.get_by_id(&bus_stop.id)
    }
}
