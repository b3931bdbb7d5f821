//! Bus JSON controller.

use super::{decode, require, respond, ResponseEnvelope};
use crate::model::bus::{Bus, NewBus};
use crate::repo::bus_repo::BusRepository;
use crate::service::bus_service::BusService;

pub struct BusController<R: BusRepository> {
    service: BusService<R>,
}

impl<R: BusRepository> BusController<R> {
    pub fn new(service: BusService<R>) -> Self {
        Self { service }
    }

    pub fn get_by_id(&self, id: &str) -> String {
        respond("bus_get_by_id", || {
            require("Id", id)?;
            Ok(self.service.get_by_id(id)?)
        })
    }

    pub fn get_by_number(&self, register_number: &str) -> String {
        respond("bus_get_by_number", || {
            require("RegisterNumber", register_number)?;
            Ok(self.service.get_by_number(register_number)?)
        })
    }

    pub fn get_all(&self) -> String {
        respond("bus_get_all", || Ok(self.service.get_all()?))
    }

    /// Adds a bus from a JSON payload; returns the stored bus with its id.
    pub fn add(&self, payload: &str) -> String {
        respond("bus_add", || {
            let bus: NewBus = decode(payload)?;
            require("RegisterNumber", &bus.register_number)?;
            Ok(self.service.add(bus)?)
        })
    }

    pub fn delete_by_id(&self, id: &str) -> String {
        respond("bus_delete_by_id", || {
            require("Id", id)?;
            self.service.delete_by_id(id)?;
            Ok(ResponseEnvelope::new("Deleted bus successfully"))
        })
    }

    pub fn update_by_id(&self, payload: &str) -> String {
        respond("bus_update_by_id", || {
            let bus: Bus = decode(payload)?;
            require("Id", &bus.id)?;
            require("RegisterNumber", &bus.register_number)?;
            Ok(self.service.update_by_id(&bus)?)
        })
    }
}
