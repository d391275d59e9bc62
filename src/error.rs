//! Error types for pixelwire operations.

use alloc::string::String;
use core::fmt;
use enough::StopReason;
use whereat::At;

/// Result type for pixelwire operations.
///
/// Errors are wrapped in [`At`] so they carry the location they were raised at.
pub type Result<T> = core::result::Result<T, At<Error>>;

/// Error type for pixelwire operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A text payload failed structural validation.
    MalformedPayload(PayloadError),
    /// Width or height is zero, negative, or not a whole number.
    InvalidDimensions(String),
    /// Pixel buffer length is not `width * height * 4`.
    BufferSizeMismatch {
        /// Byte length implied by the dimensions.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },
    /// Quality is outside `0..=100` or not a whole number.
    InvalidQuality(String),
    /// The codec boundary reported a failure.
    Codec(CodecError),
    /// The caller's stop token fired during a codec call.
    Stopped(StopReason),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedPayload(e) => write!(f, "malformed payload: {}", e),
            Error::InvalidDimensions(msg) => write!(f, "invalid dimensions: {}", msg),
            Error::BufferSizeMismatch { expected, actual } => write!(
                f,
                "buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            Error::InvalidQuality(msg) => write!(f, "invalid quality: {}", msg),
            Error::Codec(e) => write!(f, "codec error: {}", e),
            Error::Stopped(reason) => write!(f, "stopped: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<PayloadError> for Error {
    fn from(e: PayloadError) -> Self {
        Error::MalformedPayload(e)
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Error::Codec(e)
    }
}

impl From<StopReason> for Error {
    fn from(reason: StopReason) -> Self {
        Error::Stopped(reason)
    }
}

/// Why a text payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    /// Length is not a multiple of 4.
    Length(usize),
    /// A character outside `A-Z a-z 0-9 + /` and `=`.
    InvalidSymbol {
        /// Byte offset of the offending character.
        index: usize,
        /// The offending character.
        symbol: char,
    },
    /// `=` somewhere other than the last one or two positions.
    MisplacedPadding {
        /// Byte offset of the first misplaced `=`.
        index: usize,
    },
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Length(len) => {
                write!(f, "length {} is not a multiple of 4", len)
            }
            PayloadError::InvalidSymbol { index, symbol } => {
                write!(f, "invalid symbol {:?} at offset {}", symbol, index)
            }
            PayloadError::MisplacedPadding { index } => {
                write!(f, "misplaced padding at offset {}", index)
            }
        }
    }
}

/// Failure reported by an [`ImageCodec`](crate::ImageCodec).
///
/// The core never reinterprets these; they reach the caller as produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// libwebp rejected the picture.
    Encoding(EncodingError),
    /// Implementation-specific failure.
    Failed(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Encoding(e) => write!(f, "encode failed: {}", e),
            CodecError::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

/// Encoder status reported on a libwebp picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// Allocation failed while encoding.
    OutOfMemory,
    /// Allocation failed while flushing the bitstream.
    BitstreamOutOfMemory,
    /// The encoder was handed a null pointer.
    NullParameter,
    /// The configuration failed validation.
    InvalidConfiguration,
    /// Width or height is zero or larger than 16383.
    BadDimension,
    /// First partition exceeded 512k.
    Partition0Overflow,
    /// A partition exceeded 16M.
    PartitionOverflow,
    /// The memory writer failed.
    BadWrite,
    /// Output would exceed 4G.
    FileTooBig,
    /// Aborted from the progress hook.
    UserAbort,
    /// Unrecognized status.
    Unknown,
}

impl EncodingError {
    /// Map a raw `WebPEncodingError` status to a variant.
    pub fn from_status(code: i32) -> Self {
        match code {
            1 => EncodingError::OutOfMemory,
            2 => EncodingError::BitstreamOutOfMemory,
            3 => EncodingError::NullParameter,
            4 => EncodingError::InvalidConfiguration,
            5 => EncodingError::BadDimension,
            6 => EncodingError::Partition0Overflow,
            7 => EncodingError::PartitionOverflow,
            8 => EncodingError::BadWrite,
            9 => EncodingError::FileTooBig,
            10 => EncodingError::UserAbort,
            _ => EncodingError::Unknown,
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EncodingError::OutOfMemory => "out of memory",
            EncodingError::BitstreamOutOfMemory => "bitstream out of memory",
            EncodingError::NullParameter => "null parameter",
            EncodingError::InvalidConfiguration => "invalid configuration",
            EncodingError::BadDimension => "bad dimension",
            EncodingError::Partition0Overflow => "partition0 overflow",
            EncodingError::PartitionOverflow => "partition overflow",
            EncodingError::BadWrite => "bad write",
            EncodingError::FileTooBig => "file too big",
            EncodingError::UserAbort => "user abort",
            EncodingError::Unknown => "unknown error",
        };
        write!(f, "{}", msg)
    }
}
