//! CLI argument value parsers
//!
//! Checks clap cannot express on its own.

use std::fs;
use std::path::PathBuf;

/// Validate that a configuration file exists, is a file, and can be read
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Parse a `FIELD=VALUE` hash entry. The value may itself contain `=`.
pub fn parse_field_pair(pair: &str) -> Result<(String, String), String> {
    match pair.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok((field.to_string(), value.to_string())),
        Some(_) => Err(format!("Hash field name cannot be empty in '{}'", pair)),
        None => Err(format!("Expected FIELD=VALUE, got '{}'", pair)),
    }
}

/// Parse a TTL amount, rejecting zero
pub fn validate_ttl(ttl_str: &str) -> Result<u64, String> {
    let ttl: u64 = ttl_str
        .parse()
        .map_err(|_| format!("TTL must be a positive whole number, got: '{}'", ttl_str))?;

    if ttl == 0 {
        return Err("TTL must be greater than 0".to_string());
    }

    Ok(ttl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_field_pair() {
        assert_eq!(
            parse_field_pair("name=alice").unwrap(),
            ("name".to_string(), "alice".to_string())
        );
        assert_eq!(
            parse_field_pair("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_field_pair("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_field_pair("=value").is_err());
        assert!(parse_field_pair("no-separator").is_err());
    }

    #[test]
    fn test_validate_ttl() {
        assert_eq!(validate_ttl("30").unwrap(), 30);
        assert!(validate_ttl("0").is_err());
        assert!(validate_ttl("-5").is_err());
        assert!(validate_ttl("soon").is_err());
    }

    #[test]
    fn test_validate_config_file_path() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }
}
