//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the LED control rules: the channel registry, the
//! service that applies commands to it, and the events it emits.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod registry;
pub mod service;
