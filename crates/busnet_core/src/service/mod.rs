//! Fleet use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep controllers and the FFI shim decoupled from storage details.

pub mod bus_service;
pub mod bus_stop_service;
pub mod driver_service;
pub mod route_service;
