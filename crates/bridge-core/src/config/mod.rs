//! Configuration loading and settings resolution

mod loader;
mod settings;

pub use loader::{ConfigFile, CONFIG_FILE_NAMES};
pub use settings::{CliOverrides, ReleaseTarget, Settings, DEFAULT_VALUES_FILE};
