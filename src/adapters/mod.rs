//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter       | Implements         | Connects to              |
//! |---------------|--------------------|--------------------------|
//! | `hardware`    | LedOutputPort      | ESP32 LEDC PWM           |
//! | `log_sink`    | EventSink          | Serial log output        |
//! | `wifi`        | ConnectivityPort   | ESP-IDF WiFi STA         |
//! | `http_server` | -                  | ESP-IDF httpd            |
//! | `time`        | -                  | ESP32 system timer       |

pub mod hardware;
#[cfg(target_os = "espidf")]
pub mod http_server;
pub mod log_sink;
pub mod time;
pub mod utils;
pub mod wifi;
