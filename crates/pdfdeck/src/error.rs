//! Error types for pdfdeck.
//!
//! Errors fall into a few families that decide how a failure is handled:
//!
//! - **I/O errors**: reading a source file or writing an output failed.
//! - **Format errors**: the bytes are not a loadable PDF (empty, malformed,
//!   encrypted, or without pages).
//! - **Render errors**: a thumbnail or preview page could not be rendered.
//!   Thumbnail failures never leave the loader; they become placeholders.
//! - **Mode constraint errors**: a request conflicts with the current mode.
//! - **Build errors**: merge/extract could not produce an output document.
//!
//! During a batch load, I/O and format errors are recovered per file (see
//! [`PdfDeckError::is_recoverable`]); build errors abort the action.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfdeck operations.
pub type Result<T> = std::result::Result<T, PdfDeckError>;

/// Main error type for pdfdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfDeckError {
    /// Reading or writing a file failed.
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileIo {
        /// Path of the file being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The bytes are not a document the engine can consume.
    #[error("Invalid PDF file: {}\n  Reason: {reason}", path.display())]
    Format {
        /// Path the bytes came from.
        path: PathBuf,
        /// What is wrong with the document.
        reason: String,
    },

    /// The document is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    Encrypted {
        /// Path to the encrypted document.
        path: PathBuf,
    },

    /// A page could not be rendered.
    #[error("Failed to render page: {reason}")]
    Render {
        /// Details from the render engine.
        reason: String,
    },

    /// The request is not allowed in the current mode.
    #[error("{message}")]
    ModeConstraint {
        /// Message shown to the user.
        message: String,
    },

    /// A page index does not exist in its source document.
    #[error("Page index {page} is out of range (document has {page_count} page(s))")]
    PageOutOfRange {
        /// Requested 0-based page index.
        page: usize,
        /// Number of pages in the source.
        page_count: usize,
    },

    /// A build was requested with no pages selected.
    #[error("No pages selected")]
    NothingSelected,

    /// Building the output document failed.
    #[error("Failed to build PDF: {reason}")]
    Assembly {
        /// Description of what went wrong.
        reason: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Settings could not be persisted.
    #[error("Failed to save settings: {reason}")]
    Settings {
        /// Details about the failure.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfDeckError {
    fn from(err: lopdf::Error) -> Self {
        Self::assembly(err.to_string())
    }
}

impl From<anyhow::Error> for PdfDeckError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<tokio::task::JoinError> for PdfDeckError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::other(format!("Background task failed: {err}"))
    }
}

impl PdfDeckError {
    /// Create a FileIo error.
    pub fn file_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Create a Format error.
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an Encrypted error.
    pub fn encrypted(path: impl Into<PathBuf>) -> Self {
        Self::Encrypted { path: path.into() }
    }

    /// Create a Render error.
    pub fn render(reason: impl Into<String>) -> Self {
        Self::Render {
            reason: reason.into(),
        }
    }

    /// Create a ModeConstraint error.
    pub fn mode_constraint(message: impl Into<String>) -> Self {
        Self::ModeConstraint {
            message: message.into(),
        }
    }

    /// Create an Assembly error.
    pub fn assembly(reason: impl Into<String>) -> Self {
        Self::Assembly {
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Short message suitable for a dismissible notification.
    ///
    /// Paths and library details are dropped for the file-level errors.
    pub fn notice(&self) -> String {
        match self {
            Self::FileIo { source, .. } => source.to_string(),
            Self::Format { reason, .. } => reason.clone(),
            Self::Encrypted { .. } => "PDF is encrypted".to_string(),
            other => other.to_string(),
        }
    }

    /// Check if this error can be skipped during a batch load.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileIo { .. } | Self::Format { .. } | Self::Encrypted { .. } | Self::Render { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileIo { .. } => 2,
            Self::Format { .. } => 3,
            Self::Encrypted { .. } => 3,
            Self::Render { .. } => 6,
            Self::ModeConstraint { .. } => 1,
            Self::PageOutOfRange { .. } => 1,
            Self::NothingSelected => 1,
            Self::Assembly { .. } => 6,
            Self::OutputExists { .. } => 4,
            Self::Settings { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io(_) => 5,
            Self::Other { .. } => 1,
        }
    }
}
