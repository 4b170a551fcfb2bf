use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error: {0}")]
    ParseError(#[from] quick_xml::Error),

    #[error("Invalid XML attribute: {0}")]
    AttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed XML document: {message}")]
    MalformedXml { message: String },

    #[error("Source file is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    FileAccess,
    Parse,
    Serialization,
    Write,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::FileAccess { .. } => ErrorCategory::FileAccess,
            ConvertError::ParseError(_)
            | ConvertError::AttributeError(_)
            | ConvertError::MalformedXml { .. }
            | ConvertError::EncodingError(_) => ErrorCategory::Parse,
            ConvertError::SerializationError(_) => ErrorCategory::Serialization,
            ConvertError::WriteError { .. } => ErrorCategory::Write,
            ConvertError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::FileAccess | ErrorCategory::Write => ErrorSeverity::Critical,
            ErrorCategory::Parse | ErrorCategory::Serialization | ErrorCategory::Config => {
                ErrorSeverity::High
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::FileAccess { path, .. } => {
                format!(
                    "Cannot read the source file '{}'. Check that it exists and is readable.",
                    path
                )
            }
            ConvertError::ParseError(e) => {
                format!("The source file is not well-formed XML: {}", e)
            }
            ConvertError::AttributeError(e) => {
                format!("The source file contains an invalid XML attribute: {}", e)
            }
            ConvertError::MalformedXml { message } => {
                format!("The source file is not well-formed XML: {}", message)
            }
            ConvertError::EncodingError(_) => {
                "The source file is not valid UTF-8 text.".to_string()
            }
            ConvertError::SerializationError(e) => {
                format!("Could not serialize the converted document to JSON: {}", e)
            }
            ConvertError::WriteError { path, .. } => {
                format!(
                    "Cannot write the output file '{}'. Check permissions and free disk space.",
                    path
                )
            }
            ConvertError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::FileAccess => "Verify the source path and file permissions",
            ErrorCategory::Parse => "Validate the XML document, e.g. with xmllint",
            ErrorCategory::Serialization => "Inspect the source document for unusual content",
            ErrorCategory::Write => "Check write permissions and disk space in the working directory",
            ErrorCategory::Config => "Run with --help to see the expected arguments",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_maps_to_category() {
        let err = ConvertError::FileAccess {
            path: "missing.xml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.category(), ErrorCategory::FileAccess);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = ConvertError::MalformedXml {
            message: "unbalanced tags".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
