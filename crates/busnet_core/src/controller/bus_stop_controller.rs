//! Bus stop JSON controller.

use super::{decode, require, respond, ResponseEnvelope};
use crate::model::bus_stop::{BusStop, NewBusStop};
use crate::repo::bus_stop_repo::BusStopRepository;
use crate::service::bus_stop_service::BusStopService;

pub struct BusStopController<R: BusStopRepository> {
    service: BusStopService<R>,
}

impl<R: BusStopRepository> BusStopController<R> {
    pub fn new(service: BusStopService<R>) -> Self {
        Self { service }
    }

    pub fn get_by_id(&self, id: &str) -> String {
        respond("bus_stop_get_by_id", || {
            require("Id", id)?;
            Ok(self.service.get_by_id(id)?)
        })
    }

    pub fn get_by_name(&self, name: &str) -> String {
        respond("bus_stop_get_by_name", || {
            require("Name", name)?;
            Ok(self.service.get_by_name(name)?)
        })
    }

    pub fn get_all(&self) -> String {
        respond("bus_stop_get_all", || Ok(self.service.get_all()?))
    }

    pub fn add(&self, payload: &str) -> String {
        respond("bus_stop_add", || {
            let bus_stop: NewBusStop = decode(payload)?;
            require("Name", &bus_stop.name)?;
            Ok(self.service.add(bus_stop)?)
        })
    }

    pub fn delete_by_id(&self, id: &str) -> String {
        respond("bus_stop_delete_by_id", || {
            require("Id", id)?;
            self.service.delete_by_id(id)?;
            Ok(ResponseEnvelope::new("Deleted bus stop successfully"))
        })
    }

    pub fn update_by_id(&self, payload: &str) -> String {
        respond("bus_stop_update_by_id", || {
            let bus_stop: BusStop = decode(payload)?;
            require("Id", &bus_stop.id)?;
            require("Name", &bus_stop.name)?;
            Ok(self.service.update_by_id(&bus_stop)?)
        })
    }
}
