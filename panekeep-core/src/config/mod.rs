//! Configuration management for panekeep
//!
//! This module provides the `ConfigManager` for loading and saving
//! configuration files in TOML format.

mod manager;
pub mod settings;

pub use manager::{CONFIG_DIR_ENV, CONFIG_FILE, ConfigManager};
pub use settings::{AppSettings, ActivationSettings, LoggingSettings, WezTermSettings};
