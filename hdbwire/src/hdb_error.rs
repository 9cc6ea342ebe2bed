use thiserror::Error;

/// A list specifying categories of [`HdbError`](crate::HdbError).
///
/// All of them are fatal for the decode or encode call that produced them;
/// nothing in this crate retries or substitutes values.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HdbError {
    /// The wire type code is not known to the type registry.
    ///
    /// This indicates a protocol version mismatch with the server.
    #[error("Unknown wire type code: {0}")]
    UnknownTypeCode(u8),

    /// A read would go beyond the end of the buffer.
    ///
    /// The buffer is sized by the server-declared part length, so this indicates
    /// corrupted input or a framing problem upstream.
    #[error("Buffer underrun: {needed} bytes needed, only {available} available")]
    BufferUnderrun {
        /// Number of bytes the read required.
        needed: usize,
        /// Number of unread bytes that were left.
        available: usize,
    },

    /// A segment or part header is inconsistent (lengths, part count).
    #[error("Malformed segment: {0}")]
    MalformedSegment(String),

    /// The injected LOB factory failed to create a handle.
    #[error("LOB factory failed to create a LOB handle")]
    LobFactory {
        /// The causing Error.
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Some error occured while decoding CESU-8. This indicates a server issue!
    #[error("Some error occured while decoding CESU-8")]
    Cesu8,

    /// Error occured while writing to a buffer.
    #[error(transparent)]
    Io {
        /// The causing Error.
        #[from]
        source: std::io::Error,
    },

    /// Implementation error.
    #[error("Implementation error: {}", _0)]
    Impl(&'static str),

    /// Implementation error.
    #[error("Implementation error: {}", _0)]
    ImplDetailed(String),

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    Usage(&'static str),
}

/// Abbreviation of `Result<T, HdbError>`.
pub type HdbResult<T> = std::result::Result<T, HdbError>;

impl HdbError {
    /// Reveal the inner error
    #[must_use]
    pub fn inner(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LobFactory { source } => Some(&**source),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }

    /// Returns a decently formed and hopefully helpful error description.
    #[must_use]
    pub fn display_with_inner(&self) -> String {
        if let Some(e) = self.inner() {
            format!("{}, caused by {:?}", &self, e)
        } else {
            format!("{}", &self)
        }
    }

    /// True for errors that indicate a protocol or framing mismatch with the server.
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTypeCode(_) | Self::BufferUnderrun { .. } | Self::MalformedSegment(_)
        )
    }

    pub(crate) fn underrun(needed: usize, available: usize) -> Self {
        Self::BufferUnderrun { needed, available }
    }

    pub(crate) fn malformed<S: Into<String>>(s: S) -> Self {
        Self::MalformedSegment(s.into())
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! impl_err {
    ($($arg:tt)*) => {
        $crate::HdbError::ImplDetailed(format!($($arg)*))
    };
}
