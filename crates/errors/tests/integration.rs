//! Integration tests for error types

#[cfg(test)]
mod tests {
    use forge_errors::*;

    #[test]
    fn test_error_conversion() {
        let build_err = BuildError::UnknownCategory {
            recipe: "glib".into(),
            category: "docs".into(),
        };
        let err: Error = build_err.into();
        assert!(matches!(err, Error::Build(_)));
        assert_eq!(err.user_code(), Some("build.unknown_category"));
    }

    #[test]
    fn test_error_display() {
        let err = BuildError::OperationUnavailable {
            recipe: "zlib".into(),
            step: "compile".into(),
        };
        assert_eq!(err.to_string(), "recipe zlib has no compile operation");
    }

    #[test]
    fn test_error_clone() {
        let err = ConfigError::InvalidValue {
            field: "FORGE_TARGET_PLATFORM".into(),
            value: "beos".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::NotFound,
                path: None,
                ..
            }
        ));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_user_hint_routes_to_domain() {
        let err: Error = ConfigError::NotFound {
            path: "/etc/forge.toml".into(),
        }
        .into();
        assert!(err.user_hint().is_some());
        assert_eq!(err.user_code(), Some("config.not_found"));
    }
}
