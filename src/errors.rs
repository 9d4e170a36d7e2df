use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all possible errors that can occur while extracting a preview
#[derive(Debug)]
pub enum BlendThumbError {
    /// Magic bytes or header sentinels did not match the container format
    FormatMismatch(HeaderError),
    /// The byte source ended before a read could be satisfied
    Truncated(io::Error),
    /// Declared lengths disagree with the data they describe
    Inconsistent(ChunkError),
    /// The file is well formed but carries no preview chunk
    NoPreview(PreviewError),
    /// The byte source could not be opened or decompressed
    Stream(StreamError),
    Other(io::Error),
}

/// Coarse classification of a [`BlendThumbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FormatMismatch,
    Truncated,
    Inconsistent,
    NoPreview,
    Io,
}

impl BlendThumbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlendThumbError::FormatMismatch(_) => ErrorKind::FormatMismatch,
            BlendThumbError::Truncated(_) => ErrorKind::Truncated,
            BlendThumbError::Inconsistent(_) => ErrorKind::Inconsistent,
            BlendThumbError::NoPreview(_) => ErrorKind::NoPreview,
            BlendThumbError::Stream(_) | BlendThumbError::Other(_) => ErrorKind::Io,
        }
    }
}

/// Container header errors
#[derive(Debug)]
pub struct HeaderError {
    pub message: String,
}

impl HeaderError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Chunk structure errors
#[derive(Debug)]
pub struct ChunkError {
    pub message: String,
}

impl ChunkError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raised when no preview chunk is reachable
#[derive(Debug)]
pub struct PreviewError {
    pub message: String,
}

impl PreviewError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct StreamError {
    pub message: String,
}

impl StreamError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for BlendThumbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlendThumbError::FormatMismatch(err) => write!(f, "Not a blend file: {}", err),
            BlendThumbError::Truncated(err) => write!(f, "Truncated data: {}", err),
            BlendThumbError::Inconsistent(err) => write!(f, "Corrupt chunk: {}", err),
            BlendThumbError::NoPreview(err) => write!(f, "No preview: {}", err),
            BlendThumbError::Stream(err) => write!(f, "Stream error: {}", err),
            BlendThumbError::Other(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for BlendThumbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BlendThumbError::Truncated(err) | BlendThumbError::Other(err) => Some(err),
            _ => None,
        }
    }
}
impl Error for HeaderError {}
impl Error for ChunkError {}
impl Error for PreviewError {}
impl Error for StreamError {}

// Conversion implementations
impl From<io::Error> for BlendThumbError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => BlendThumbError::Truncated(err),
            _ => BlendThumbError::Other(err),
        }
    }
}

impl From<HeaderError> for BlendThumbError {
    fn from(err: HeaderError) -> Self {
        BlendThumbError::FormatMismatch(err)
    }
}

impl From<ChunkError> for BlendThumbError {
    fn from(err: ChunkError) -> Self {
        BlendThumbError::Inconsistent(err)
    }
}

impl From<PreviewError> for BlendThumbError {
    fn from(err: PreviewError) -> Self {
        BlendThumbError::NoPreview(err)
    }
}

impl From<StreamError> for BlendThumbError {
    fn from(err: StreamError) -> Self {
        BlendThumbError::Stream(err)
    }
}

// Conversion to io::Error for callers that only speak io
impl From<BlendThumbError> for io::Error {
    fn from(err: BlendThumbError) -> Self {
        match err {
            BlendThumbError::Truncated(e) | BlendThumbError::Other(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

// Type alias for Result with BlendThumbError
pub type BlendThumbResult<T> = Result<T, BlendThumbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_eof_maps_to_truncated() {
        let err: BlendThumbError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert_eq!(err.kind(), ErrorKind::Truncated);

        let err: BlendThumbError = io::Error::new(io::ErrorKind::InvalidData, "bad").into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_display_includes_message() {
        let err: BlendThumbError = ChunkError::new("length 39 != 40").into();
        assert_eq!(err.kind(), ErrorKind::Inconsistent);
        assert_eq!(err.to_string(), "Corrupt chunk: length 39 != 40");
    }
}
