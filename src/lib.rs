// Idealoop - idea tracking and project iteration scaffolding
// Library exports

pub mod cli;
pub mod config;
pub mod errors;
pub mod ideas;
pub mod logging;
pub mod projects;
pub mod storage;

pub use errors::{Error, Result};
