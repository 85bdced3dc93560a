// ABOUTME: Runtime settings resolved from the process environment
// ABOUTME: The API key is mandatory; every other value has a default

use std::env;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;
use tracing::{debug, info};

use crate::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("Invalid temperature: {0}")]
    InvalidTemperature(#[from] ParseFloatError),

    #[error("Temperature {0} is out of valid range (0.0-2.0)")]
    TemperatureOutOfRange(f32),

    #[error("Invalid value for {name}: {source}")]
    InvalidNumber {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
}

/// Settings for talking to the generative service
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub safety_threshold: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

// Keeps the key out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("safety_threshold", &self.safety_threshold)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = match get(GEMINI_API_KEY) {
            Some(key) => key,
            None => {
                let legacy = get(API_KEY).ok_or(ConfigError::MissingApiKey)?;
                debug!("Using legacy {} variable for the API key", API_KEY);
                legacy
            }
        };

        let model = get(ARCHIAI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom model: {}", model);
        }

        let temperature = match get(ARCHIAI_TEMPERATURE) {
            Some(raw) => raw.parse::<f32>()?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::TemperatureOutOfRange(temperature));
        }

        let max_output_tokens = parse_positive(
            get(ARCHIAI_MAX_OUTPUT_TOKENS),
            ARCHIAI_MAX_OUTPUT_TOKENS,
            DEFAULT_MAX_OUTPUT_TOKENS,
        )?;

        let safety_threshold = get(ARCHIAI_SAFETY_THRESHOLD)
            .map(|v| v.to_uppercase())
            .unwrap_or_else(|| DEFAULT_SAFETY_THRESHOLD.to_string());

        let api_base_url = get(ARCHIAI_API_BASE_URL)
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let request_timeout_secs = parse_positive(
            get(ARCHIAI_HTTP_REQUEST_TIMEOUT_SECS),
            ARCHIAI_HTTP_REQUEST_TIMEOUT_SECS,
            DEFAULT_HTTP_REQUEST_TIMEOUT_SECS,
        )?;
        let connect_timeout_secs = parse_positive(
            get(ARCHIAI_HTTP_CONNECT_TIMEOUT_SECS),
            ARCHIAI_HTTP_CONNECT_TIMEOUT_SECS,
            DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            api_key,
            model,
            temperature,
            max_output_tokens,
            safety_threshold,
            api_base_url,
            request_timeout_secs,
            connect_timeout_secs,
        })
    }

    /// Settings with defaults for everything except the key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            safety_threshold: DEFAULT_SAFETY_THRESHOLD.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_HTTP_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
        }
    }
}

fn parse_positive<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError> + PartialEq + Default,
{
    let value = match raw {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|source| ConfigError::InvalidNumber { name, source })?,
        None => default,
    };

    if value == T::default() {
        return Err(ConfigError::ZeroValue(name));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let settings = Settings::from_lookup(lookup(&[(GEMINI_API_KEY, "secret")])).unwrap();

        assert_eq!(settings.api_key, "secret");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(settings.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(settings.safety_threshold, DEFAULT_SAFETY_THRESHOLD);
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings, Settings::with_api_key("secret"));
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let result = Settings::from_lookup(lookup(&[(ARCHIAI_MODEL, "gemini-2.5-pro")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let result = Settings::from_lookup(lookup(&[(GEMINI_API_KEY, "   ")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_legacy_api_key_fallback() {
        let settings = Settings::from_lookup(lookup(&[(API_KEY, "legacy")])).unwrap();
        assert_eq!(settings.api_key, "legacy");
    }

    #[test]
    fn test_custom_values() {
        let settings = Settings::from_lookup(lookup(&[
            (GEMINI_API_KEY, "secret"),
            (ARCHIAI_MODEL, "gemini-2.5-pro"),
            (ARCHIAI_TEMPERATURE, "0.2"),
            (ARCHIAI_MAX_OUTPUT_TOKENS, "4096"),
            (ARCHIAI_SAFETY_THRESHOLD, "block_only_high"),
            (ARCHIAI_API_BASE_URL, "http://localhost:9000/"),
            (ARCHIAI_HTTP_REQUEST_TIMEOUT_SECS, "30"),
        ]))
        .unwrap();

        assert_eq!(settings.model, "gemini-2.5-pro");
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.max_output_tokens, 4096);
        assert_eq!(settings.safety_threshold, "BLOCK_ONLY_HIGH");
        assert_eq!(settings.api_base_url, "http://localhost:9000");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.connect_timeout_secs, DEFAULT_HTTP_CONNECT_TIMEOUT_SECS);
    }

    #[rstest]
    #[case("warm")]
    #[case("2.5")]
    #[case("-0.1")]
    fn test_invalid_temperature(#[case] raw: &str) {
        let result = Settings::from_lookup(lookup(&[
            (GEMINI_API_KEY, "secret"),
            (ARCHIAI_TEMPERATURE, raw),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_max_tokens() {
        let result = Settings::from_lookup(lookup(&[
            (GEMINI_API_KEY, "secret"),
            (ARCHIAI_MAX_OUTPUT_TOKENS, "lots"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber { name: ARCHIAI_MAX_OUTPUT_TOKENS, .. })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Settings::from_lookup(lookup(&[
            (GEMINI_API_KEY, "secret"),
            (ARCHIAI_HTTP_CONNECT_TIMEOUT_SECS, "0"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::ZeroValue(ARCHIAI_HTTP_CONNECT_TIMEOUT_SECS))
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = Settings::with_api_key("super-secret-key");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
