// ABOUTME: Environment variable name constants and configuration defaults
// ABOUTME: Centralized definitions of all environment variable names used across ArchiAI

// Generative Service Credentials
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const API_KEY: &str = "API_KEY"; // Legacy

// Generation Configuration
pub const ARCHIAI_MODEL: &str = "ARCHIAI_MODEL";
pub const ARCHIAI_TEMPERATURE: &str = "ARCHIAI_TEMPERATURE";
pub const ARCHIAI_MAX_OUTPUT_TOKENS: &str = "ARCHIAI_MAX_OUTPUT_TOKENS";
pub const ARCHIAI_SAFETY_THRESHOLD: &str = "ARCHIAI_SAFETY_THRESHOLD";

// HTTP Configuration
pub const ARCHIAI_API_BASE_URL: &str = "ARCHIAI_API_BASE_URL";
pub const ARCHIAI_HTTP_REQUEST_TIMEOUT_SECS: &str = "ARCHIAI_HTTP_REQUEST_TIMEOUT_SECS";
pub const ARCHIAI_HTTP_CONNECT_TIMEOUT_SECS: &str = "ARCHIAI_HTTP_CONNECT_TIMEOUT_SECS";

// Logging
pub const ARCHIAI_LOG_FILE: &str = "ARCHIAI_LOG_FILE";
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const DEFAULT_SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_HTTP_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
