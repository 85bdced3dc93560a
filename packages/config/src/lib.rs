// ABOUTME: ArchiAI configuration package
// ABOUTME: Environment variable names, defaults and the resolved Settings struct

pub mod constants;
pub mod settings;

pub use settings::{ConfigError, Settings};
