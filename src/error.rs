use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for INI operations
pub type IniResult<T> = Result<T, IniError>;

/// Errors that can occur while parsing or mutating an INI store
#[derive(Error, Debug)]
pub enum IniError {
    /// A key=value line appeared before any section header
    #[error("Item outside of any section at line {line}")]
    ItemOutsideSection { line: usize },

    /// The same section name was committed twice in one parse
    #[error("Duplicate section '{name}'")]
    DuplicateSection { name: String },

    /// The addressed section does not exist
    #[error("Section '{name}' not found")]
    SectionNotFound { name: String },

    /// The addressed item does not exist in its section
    #[error("Item '{key}' not found in section '{section}'")]
    ItemNotFound { section: String, key: String },

    /// A read was attempted before a successful parse or explicit set
    #[error("No INI content has been parsed")]
    NotParsed,

    /// A current-section operation was used with no current section
    #[error("No current section is set")]
    NoCurrentSection,

    /// File I/O error
    #[error("I/O error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IniError {
    /// Create an item-outside-section error
    pub fn item_outside_section(line: usize) -> Self {
        IniError::ItemOutsideSection { line }
    }

    /// Create a duplicate section error
    pub fn duplicate_section(name: impl Into<String>) -> Self {
        IniError::DuplicateSection { name: name.into() }
    }

    /// Create a section not found error
    pub fn section_not_found(name: impl Into<String>) -> Self {
        IniError::SectionNotFound { name: name.into() }
    }

    /// Create an item not found error
    pub fn item_not_found(section: impl Into<String>, key: impl Into<String>) -> Self {
        IniError::ItemNotFound {
            section: section.into(),
            key: key.into(),
        }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IniError::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IniError::SectionNotFound { .. } | IniError::ItemNotFound { .. }
        )
    }

    /// Check if this error aborted a parse
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            IniError::ItemOutsideSection { .. } | IniError::DuplicateSection { .. }
        )
    }
}
