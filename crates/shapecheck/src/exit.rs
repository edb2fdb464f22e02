use std::fmt;
use std::io;

use shapecheck_pattern::RegistryError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn registry_error(context: &str, err: RegistryError) -> CliError {
    let code = match &err {
        RegistryError::Mismatch { .. } | RegistryError::InvalidJson(_) => DATA_INVALID,
        RegistryError::InvalidPattern { .. } | RegistryError::NoPattern(_) => USAGE,
        RegistryError::LoadFailed(_) => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use shapecheck_pattern::Diagnostic;

    use super::*;

    #[test]
    fn registry_errors_map_to_exit_codes() {
        let mismatch = RegistryError::Mismatch {
            name: "user".to_string(),
            source: Diagnostic::new("Expected 1 to be a string"),
        };
        assert_eq!(registry_error("check", mismatch).code, DATA_INVALID);
        assert_eq!(
            registry_error("check", RegistryError::NoPattern("x".to_string())).code,
            USAGE
        );
        assert_eq!(
            registry_error("load", RegistryError::LoadFailed("boom".to_string())).code,
            FAILURE
        );
    }

    #[test]
    fn io_errors_map_to_exit_codes() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(io_error("read", denied).code, PERMISSION_DENIED);
        let missing = io::Error::from(io::ErrorKind::NotFound);
        let err = io_error("read value.json", missing);
        assert_eq!(err.code, USAGE);
        assert!(err.message.starts_with("read value.json: "));
    }
}
