//! Error types shared by the resolver, the composers and the submitter.

/// Everything that can go wrong while turning a command into a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocsError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("--tab and --tab-index cannot be used together")]
    ConflictingFlags,

    #[error("document has no tabs")]
    NoTabs,

    #[error("tab index {index} out of range (document has {count} tabs)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("{0}")]
    AmbiguousSelector(String),

    #[error("unknown content format {0:?} (expected markdown, plaintext or richformat)")]
    UnknownFormat(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Ambiguous(String),

    #[error("{0}")]
    NoContent(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("document is empty; nothing to append to")]
    EmptyDocument,

    #[error("invalid richformat content: {0}")]
    Parse(String),

    #[error("{0}")]
    Remote(String),
}

impl DocsError {
    /// Stable code used in structured error output.
    pub fn code(&self) -> &'static str {
        match self {
            DocsError::Validation(_) => "VALIDATION_ERROR",
            DocsError::ConflictingFlags => "CONFLICTING_FLAGS",
            DocsError::NoTabs => "NO_TABS",
            DocsError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            DocsError::AmbiguousSelector(_) => "AMBIGUOUS_SELECTOR",
            DocsError::UnknownFormat(_) => "UNKNOWN_FORMAT",
            DocsError::NotFound(_) => "NOT_FOUND",
            DocsError::Ambiguous(_) => "AMBIGUOUS",
            DocsError::NoContent(_) => "NO_CONTENT",
            DocsError::Unsupported(_) => "UNSUPPORTED",
            DocsError::EmptyDocument => "EMPTY_DOCUMENT",
            DocsError::Parse(_) => "PARSE_ERROR",
            DocsError::Remote(_) => "REMOTE_ERROR",
        }
    }

    /// Whether the error was raised locally, before any remote call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            DocsError::Validation(_)
                | DocsError::ConflictingFlags
                | DocsError::AmbiguousSelector(_)
                | DocsError::UnknownFormat(_)
                | DocsError::Parse(_)
        )
    }

    /// Wrap a remote failure with the operation that was being attempted.
    pub fn during(self, intent: &str) -> Self {
        match self {
            DocsError::Remote(msg) => DocsError::Remote(format!("failed to {}: {}", intent, msg)),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsError>;
