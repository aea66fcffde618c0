use core::fmt;
use core::str::Utf8Error;

use pack_stream::StreamError;

/// Encoding and decoding result
pub type Result<T> = core::result::Result<T, Error>;

/// Encoding and decoding error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The input ended before a value could be read
    EndOfData,
    /// The next tag does not match the requested value category
    FormatMismatch,
    /// A value does not fit the largest wire format or the destination's capacity
    SizeLimitExceeded,
    /// The wire type can express values the destination type can not hold
    NarrowingConversion,
    /// String payload is not valid UTF-8
    InvalidUtf8,
    /// The underlying sink or source failed
    Stream(StreamError),
}

impl Error {
    /// Return `true` if the error was reported by the underlying sink or source.
    pub fn is_stream(&self) -> bool {
        matches!(self, Error::Stream(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EndOfData => f.write_str("Unexpected end of MessagePack input"),
            Error::FormatMismatch => f.write_str("MessagePack type does not match the requested type"),
            Error::SizeLimitExceeded => f.write_str("MessagePack size limit exceeded"),
            Error::NarrowingConversion => f.write_str("MessagePack value could be narrowed by the requested type"),
            Error::InvalidUtf8 => f.write_str("Invalid UTF-8 in MessagePack string"),
            Error::Stream(err) => write!(f, "MessagePack stream error: {}", err),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Stream(err) => Some(err),
            _ => None
        }
    }
}

impl From<StreamError> for Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::UnexpectedEof => Error::EndOfData,
            err => Error::Stream(err)
        }
    }
}

impl From<Utf8Error> for Error {
    fn from(_err: Utf8Error) -> Self {
        Error::InvalidUtf8
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "std")]
    use std::format;
    #[cfg(all(feature = "alloc",not(feature = "std")))]
    use alloc::format;
    use super::*;

    #[test]
    fn test_from_stream_error() {
        assert_eq!(Error::from(StreamError::UnexpectedEof), Error::EndOfData);
        assert_eq!(Error::from(StreamError::BufferFull), Error::Stream(StreamError::BufferFull));
        assert_eq!(Error::from(StreamError::Io), Error::Stream(StreamError::Io));
        assert!(Error::from(StreamError::InvalidSeek).is_stream());
        assert!(!Error::EndOfData.is_stream());
        let bad = core::hint::black_box([0xffu8, 0xfe]);
        assert_eq!(Error::from(core::str::from_utf8(&bad).unwrap_err()), Error::InvalidUtf8);
    }

    #[cfg(any(feature = "std", feature = "alloc"))]
    #[test]
    fn test_error_string() {
        assert_eq!(&format!("{}", Error::EndOfData), "Unexpected end of MessagePack input");
        assert_eq!(&format!("{}", Error::FormatMismatch), "MessagePack type does not match the requested type");
        assert_eq!(&format!("{}", Error::SizeLimitExceeded), "MessagePack size limit exceeded");
        assert_eq!(&format!("{}", Error::NarrowingConversion), "MessagePack value could be narrowed by the requested type");
        assert_eq!(&format!("{}", Error::InvalidUtf8), "Invalid UTF-8 in MessagePack string");
        assert_eq!(&format!("{}", Error::Stream(StreamError::BufferFull)), "MessagePack stream error: buffer is full");
    }
}
