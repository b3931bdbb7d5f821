//! Flutter-facing bindings for the bus network manager core.

pub mod api;
