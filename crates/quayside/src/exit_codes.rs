//! Exit codes for the CLI

use quayside_core::error::QuaysideError;
use quayside_stores::StoreError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Validation error
pub const VALIDATION_ERROR: i32 = 5;

/// Build tool or artifact error
pub const PACKAGING_ERROR: i32 = 6;

/// Upload or remote lookup error
pub const UPLOAD_ERROR: i32 = 7;

/// Exit code for the first recognised error in the chain
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<QuaysideError>() {
            return for_core_error(e);
        }
        if let Some(e) = cause.downcast_ref::<StoreError>() {
            return match e {
                StoreError::Adapter(inner) => for_core_error(inner),
                _ => UPLOAD_ERROR,
            };
        }
    }
    ERROR
}

fn for_core_error(err: &QuaysideError) -> i32 {
    match err {
        QuaysideError::Config(_) => CONFIG_ERROR,
        QuaysideError::Workflow(_) => VALIDATION_ERROR,
        QuaysideError::Adapter(_) => PACKAGING_ERROR,
        _ => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quayside_core::error::{AdapterError, ConfigError, WorkflowError};
    use std::path::PathBuf;

    #[test]
    fn test_core_errors() {
        let config: anyhow::Error =
            QuaysideError::from(ConfigError::NotFound(PathBuf::from("quayside.toml"))).into();
        assert_eq!(for_error(&config), CONFIG_ERROR);

        let validation: anyhow::Error =
            QuaysideError::from(WorkflowError::ValidationFailed("x".to_string())).into();
        assert_eq!(for_error(&validation), VALIDATION_ERROR);

        let packaging: anyhow::Error =
            QuaysideError::from(AdapterError::ArtifactNotFound(PathBuf::from("a.jar"))).into();
        assert_eq!(for_error(&packaging), PACKAGING_ERROR);
    }

    #[test]
    fn test_store_errors() {
        let upload: anyhow::Error = StoreError::ApiError {
            status: 401,
            message: String::new(),
        }
        .into();
        assert_eq!(for_error(&upload), UPLOAD_ERROR);

        let wrapped: anyhow::Error = StoreError::Adapter(QuaysideError::from(
            AdapterError::ArtifactNotFound(PathBuf::from("a.jar")),
        ))
        .into();
        assert_eq!(for_error(&wrapped), PACKAGING_ERROR);
    }

    #[test]
    fn test_context_is_looked_through() {
        let err = anyhow::Error::from(QuaysideError::from(ConfigError::InvalidValue {
            field: "project.group".to_string(),
            message: "must not be empty".to_string(),
        }))
            .context("loading configuration");
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_unknown_error() {
        assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
    }
}
