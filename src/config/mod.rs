//! Configuration loading and management for the attendance client.
//!
//! This module loads the working schedule, remote endpoint and location
//! tracking settings from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance.yaml").unwrap();
//! println!("Work starts at {}", config.schedule().work_start);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceConfig, ClientConfig, DEFAULT_LATE_THRESHOLD_MINUTES, DEFAULT_WORK_END,
    DEFAULT_WORK_START, EndpointConfig, LocationConfig,
};
