//! Configuration loading for the reading-state tools.
//!
//! Settings are loaded from `conf/config.toml` if present. Any missing or
//! invalid entries fall back to defaults so the stores can always open.

mod defaults;
mod io;
mod models;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, LogLevel};
