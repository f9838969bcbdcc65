//! Sensor drivers.  Only the potentiometer image uses them.

pub mod potentiometer;
