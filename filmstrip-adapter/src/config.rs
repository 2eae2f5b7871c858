use alloc::string::String;

use filmstrip::{OptionsError, StripOptions};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed strip options: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] OptionsError),
}

/// Parses strip options from JSON.
///
/// Missing fields take their defaults, so `{}` is the default configuration. The result is
/// validated before it is returned.
pub fn options_from_json(json: &str) -> Result<StripOptions, ConfigError> {
    let options: StripOptions = serde_json::from_str(json)?;
    options.validate()?;
    adebug!(?options, "strip options loaded");
    Ok(options)
}

pub fn options_to_json(options: &StripOptions) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(options)?)
}
