use crate::utils::error::{FormError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> FormError {
    FormError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The submission endpoint must be an absolute http(s) URL with a host.
///
/// A blank value, or a `${VAR}` placeholder whose variable was not set when the
/// config was loaded, is reported as missing rather than malformed.
pub fn validate_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(FormError::MissingConfigError {
            field: field.to_string(),
        });
    }
    if let Some(var) = unresolved_placeholder(endpoint) {
        return Err(FormError::MissingConfigError {
            field: format!("{} (environment variable {})", field, var),
        });
    }

    let url = Url::parse(endpoint).map_err(|e| invalid(field, endpoint, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        "http" | "https" => Err(invalid(field, endpoint, "URL has no host")),
        scheme => Err(invalid(
            field,
            endpoint,
            format!("Only http and https are supported, got {}", scheme),
        )),
    }
}

// ${NAME} 殘留代表環境變數沒有設定
fn unresolved_placeholder(value: &str) -> Option<&str> {
    let start = value.find("${")? + 2;
    let len = value[start..].find('}')?;
    Some(&value[start..start + len])
}

pub fn validate_at_least(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Must be at least {}", min)));
    }
    Ok(())
}

/// Field names and labels are shown to the user, so blank ones are rejected.
pub fn validate_label(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Cannot be blank"));
    }
    Ok(())
}

/// The preference store is a single JSON file; an existing directory cannot hold it.
pub fn validate_store_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "Path cannot be blank"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "Path contains a NUL byte"));
    }
    if std::path::Path::new(path).is_dir() {
        return Err(invalid(field, path, "Path points to a directory"));
    }
    Ok(())
}
