use anyhow::Result;
use regex::{Captures, Regex};
use std::env;
use tracing::{debug, warn};

const PLACEHOLDER: &str = r"\$\{(\w+)\}";

/// Substitute environment variables written as `${VAR_NAME}`.
///
/// Unset variables keep their placeholder; the validator reports them.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(PLACEHOLDER)?;
    let mut missing_vars = Vec::new();

    let result = re.replace_all(content, |caps: &Captures| match env::var(&caps[1]) {
        Ok(value) => {
            debug!("Substituting environment variable: {}", &caps[1]);
            value
        }
        Err(_) => {
            warn!("Environment variable '{}' not set", &caps[1]);
            missing_vars.push(caps[1].to_string());
            caps[0].to_string()
        }
    });

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables not set (will fail validation): {:?}",
            missing_vars
        );
    }

    Ok(result.into_owned())
}

/// Check if a string contains unresolved environment variable placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    Regex::new(PLACEHOLDER)
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}
