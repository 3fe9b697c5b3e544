//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules of the AqMonitor: console command
//! parsing and dispatch, and the one-second sample/display loop. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod dispatcher;
pub mod events;
pub mod ports;
pub mod service;
