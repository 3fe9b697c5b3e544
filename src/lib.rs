//! AqMonitor firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the
//! firmware binary. ESP-IDF-specific adapters are behind the `espidf`
//! feature; the host simulation devices exist only off-target.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;
