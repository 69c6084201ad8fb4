//! Constructors for frequently built error values.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;

use super::{AccreteError, HandlerError};

impl AccreteError {
    /// Construct a configuration error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use accrete::AccreteError;
    /// let e = AccreteError::config(figment::Error::from("boom"));
    /// assert!(matches!(e, AccreteError::Config(_)));
    /// ```
    #[must_use]
    pub fn config(source: FigmentError) -> Self {
        Self::Config(Box::new(source))
    }

    /// Construct an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl HandlerError {
    /// Construct an invalid-parameter error.
    ///
    /// # Examples
    ///
    /// ```
    /// use accrete::HandlerError;
    /// let e = HandlerError::invalid_parameter("Builder", "build_method_name", "must be a string");
    /// assert_eq!(e.to_string(), "parameter 'build_method_name' must be a string");
    /// ```
    #[must_use]
    pub fn invalid_parameter(
        tag: impl Into<String>,
        parameter: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tag: tag.into(),
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Construct an unknown-field error.
    #[must_use]
    pub fn unknown_field(tag: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            tag: tag.into(),
            field: field.into(),
        }
    }

    /// Construct a missing-prerequisite error.
    #[must_use]
    pub fn missing_prerequisite(message: impl Into<String>) -> Self {
        Self::MissingPrerequisite {
            message: message.into(),
        }
    }
}
