//! Error types and context management for maze generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum MazeError {
    /// Archetype catalog or template registry is inconsistent
    ///
    /// Raised before any grid exists, for example when an archetype has no
    /// registered template or an authored rotation is out of range.
    Configuration {
        /// Description of the inconsistency
        reason: String,
    },

    /// A cell had no template left when it was collapsed
    DomainExhaustion {
        /// Column of the exhausted cell
        x: usize,
        /// Row of the exhausted cell
        y: usize,
    },

    /// Coordinate-addressed access outside the grid
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width in cells
        columns: usize,
        /// Grid height in cells
        rows: usize,
    },

    /// An `(archetype, rotation)` pair that was never registered
    Lookup {
        /// Archetype name, or a description of the requested shape
        archetype: String,
        /// Requested rotation
        rotation: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Setting that was rejected
        parameter: &'static str,
        /// Rejected value as given
        value: String,
        /// What the value violates
        reason: String,
    },

    /// Failed to encode or save a rendered maze
    ImageExport {
        /// Destination file
        path: PathBuf,
        /// Encoder or format failure
        source: image::ImageError,
    },

    /// Directory or file could not be created
    FileSystem {
        /// Path that was being touched
        path: PathBuf,
        /// Short name of the attempted operation
        operation: &'static str,
        /// I/O failure reported by the OS
        source: std::io::Error,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { reason } => {
                write!(f, "Configuration error: {reason}")
            }
            Self::DomainExhaustion { x, y } => {
                write!(f, "Domain exhausted at cell ({x}, {y})")
            }
            Self::OutOfBounds {
                x,
                y,
                columns,
                rows,
            } => {
                write!(
                    f,
                    "Cell ({x}, {y}) is outside the {columns}x{rows} grid"
                )
            }
            Self::Lookup {
                archetype,
                rotation,
            } => {
                write!(
                    f,
                    "No template registered for '{archetype}' at rotation {rotation}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Could not write image '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "Could not {operation} '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, MazeError>;

/// Where an error happened, applied after the fact
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Grid coordinates the failing operation was working on
    pub cell: Option<(usize, usize)>,
    /// Name prefixed to configuration errors
    pub operation: Option<&'static str>,
}

/// Enriches errors with the cell they concern
pub trait WithContext<T> {
    /// Apply `context` to the error, if any
    ///
    /// # Errors
    ///
    /// Returns the incoming error rewritten by `context`
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Attach the coordinates of the cell being processed
    ///
    /// # Errors
    ///
    /// Propagates the original error with the cell context applied
    fn with_cell(self, x: usize, y: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MazeError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only exhaustion is reported per cell
            if let MazeError::DomainExhaustion { x, y } = &mut error {
                if let Some((cx, cy)) = context.cell {
                    *x = cx;
                    *y = cy;
                }
            }
            if let (Some(operation), MazeError::Configuration { reason }) =
                (context.operation, &mut error)
            {
                *reason = format!("{operation}: {reason}");
            }
            error
        })
    }

    fn with_cell(self, x: usize, y: usize) -> Result<T> {
        self.with_context(ErrorContext {
            cell: Some((x, y)),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for MazeError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MazeError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Shorthand for `MazeError::InvalidParameter`
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MazeError {
    MazeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a configuration error
pub fn configuration_error(reason: &impl ToString) -> MazeError {
    MazeError::Configuration {
        reason: reason.to_string(),
    }
}
