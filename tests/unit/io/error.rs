//! Tests for error messages, sources and context helpers

#[cfg(test)]
mod tests {
    use mazewave::MazeError;
    use mazewave::io::error::{ErrorContext, WithContext, configuration_error, invalid_parameter};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests display messages name the offending cell or parameter
    // Verified by swapping coordinates in the message format
    #[test]
    fn test_error_display() {
        assert_eq!(
            MazeError::DomainExhaustion { x: 3, y: 4 }.to_string(),
            "Domain exhausted at cell (3, 4)"
        );
        assert_eq!(
            MazeError::OutOfBounds {
                x: 5,
                y: 0,
                columns: 5,
                rows: 2
            }
            .to_string(),
            "Cell (5, 0) is outside the 5x2 grid"
        );
        assert_eq!(
            MazeError::Lookup {
                archetype: "line".to_string(),
                rotation: 3
            }
            .to_string(),
            "No template registered for 'line' at rotation 3"
        );
        assert_eq!(
            invalid_parameter("fps", &0, &"must be positive").to_string(),
            "Invalid parameter 'fps' = '0': must be positive"
        );
        assert_eq!(
            configuration_error(&"missing sentinel").to_string(),
            "Configuration error: missing sentinel"
        );
    }

    // Tests wrapped I/O errors keep their source
    // Verified by returning None from source
    #[test]
    fn test_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = MazeError::FileSystem {
            path: PathBuf::from("out"),
            operation: "create directory",
            source: io,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("create directory"));
        assert!(MazeError::DomainExhaustion { x: 0, y: 0 }.source().is_none());

        let converted: MazeError = std::io::Error::other("boom").into();
        assert!(matches!(converted, MazeError::FileSystem { .. }));
    }

    // Tests cell context rewrites exhaustion coordinates only
    // Verified by applying the cell to every variant
    #[test]
    fn test_with_cell() {
        let exhausted: Result<(), MazeError> = Err(MazeError::DomainExhaustion { x: 0, y: 0 });
        match exhausted.with_cell(2, 9) {
            Err(MazeError::DomainExhaustion { x, y }) => assert_eq!((x, y), (2, 9)),
            other => unreachable!("Expected DomainExhaustion, got {other:?}"),
        }

        let lookup: Result<(), MazeError> = Err(MazeError::Lookup {
            archetype: "fork".to_string(),
            rotation: 7,
        });
        assert!(matches!(
            lookup.with_cell(1, 1),
            Err(MazeError::Lookup { rotation: 7, .. })
        ));
    }

    // Tests operation context prefixes configuration reasons
    // Verified by dropping the operation name
    #[test]
    fn test_with_operation_context() {
        let result: Result<(), MazeError> = Err(configuration_error(&"no painter"));
        let context = ErrorContext {
            operation: Some("render"),
            ..ErrorContext::default()
        };

        match result.with_context(context) {
            Err(MazeError::Configuration { reason }) => assert_eq!(reason, "render: no painter"),
            other => unreachable!("Expected Configuration, got {other:?}"),
        }
    }
}
