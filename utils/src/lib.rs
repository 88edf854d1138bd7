//! Logging and time helpers shared by the votetime crates.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use time::{format_duration, secs_to_days};
