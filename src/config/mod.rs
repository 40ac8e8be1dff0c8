// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod settings;

pub use loader::{load_config, load_config_from};
pub use settings::{Config, FileConfig};
