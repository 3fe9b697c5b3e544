//! Chip drivers behind the port traits.

pub mod ds1307;
pub mod lcd;
