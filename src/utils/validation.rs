use crate::utils::error::{ExtPipesError, Result};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ExtPipesError::Validation {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ExtPipesError::Validation {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ExtPipesError::Validation {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExtPipesError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// A pipeline schedule is either one of the two literal modes accepted by the
/// API or a five-field cron expression.
pub fn validate_schedule(field_name: &str, schedule: &str) -> Result<()> {
    if schedule == "On trigger" || schedule == "Continuous" {
        return Ok(());
    }

    let cron_field = r"(\*|[0-9]+(-[0-9]+)?)(/[0-9]+)?(,(\*|[0-9]+(-[0-9]+)?)(/[0-9]+)?)*";
    let pattern = format!(r"^{f}( {f}){{4}}$", f = cron_field);
    let re = Regex::new(&pattern).expect("schedule pattern is valid");

    if re.is_match(schedule.trim()) {
        Ok(())
    } else {
        Err(ExtPipesError::Validation {
            field: field_name.to_string(),
            value: schedule.to_string(),
            reason: "Expected \"On trigger\", \"Continuous\" or a cron expression".to_string(),
        })
    }
}
