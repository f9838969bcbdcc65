//! LED bank driver, peripheral initialisation, and the task watchdog.

pub mod hw_init;
pub mod led_bank;
pub mod watchdog;
