//! LED web controller firmware library.
//!
//! Exposes the pure-logic modules (registry, service, HTTP handlers,
//! config) for host testing, plus the adapters and drivers both firmware
//! images are built from.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod http;
pub mod pins;
pub mod sensors;
