//! Encode requests carried across the codec boundary.
//!
//! A request is validated eagerly: dimensions, buffer size and quality are
//! checked when it is built, so a malformed request never reaches a codec.

use crate::error::{Error, Result};
use crate::transcode::{self, TextPayload};
use alloc::vec::Vec;
use imgref::ImgRef;
use rgb::RGBA8;
use whereat::*;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Highest accepted lossy quality.
pub const MAX_QUALITY: u8 = 100;

/// Compression mode of a request. Exactly one is active per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// Lossy compression at the given quality (0 = smallest, 100 = best).
    Lossy {
        /// Quality factor in `0..=100`.
        quality: u8,
    },
    /// Lossless compression.
    Lossless,
}

impl EncodeMode {
    /// Lossy mode, rejecting quality above 100.
    pub fn lossy(quality: u8) -> Result<Self> {
        if quality > MAX_QUALITY {
            return Err(at!(Error::InvalidQuality(alloc::format!(
                "{} is outside 0..={}",
                quality,
                MAX_QUALITY
            ))));
        }
        Ok(EncodeMode::Lossy { quality })
    }

    /// Whether this is lossless mode.
    #[must_use]
    pub fn is_lossless(self) -> bool {
        matches!(self, EncodeMode::Lossless)
    }

    /// Lossy quality, if any.
    #[must_use]
    pub fn quality(self) -> Option<u8> {
        match self {
            EncodeMode::Lossy { quality } => Some(quality),
            EncodeMode::Lossless => None,
        }
    }
}

/// A validated request to encode an RGBA image.
///
/// Pixels travel as a [`TextPayload`]; the payload always decodes to exactly
/// `width * height * 4` bytes.
///
/// # Example
///
/// ```rust
/// use pixelwire::{EncodeMode, EncodeRequest};
///
/// let pixels = [255u8, 0, 0, 255].repeat(4);
/// let request = EncodeRequest::lossy(&pixels, 2, 2, 80)?;
/// assert_eq!(request.mode(), EncodeMode::Lossy { quality: 80 });
/// assert_eq!(request.payload().len(), 24);
/// # Ok::<(), pixelwire::At<pixelwire::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    payload: TextPayload,
    width: u32,
    height: u32,
    mode: EncodeMode,
}

impl EncodeRequest {
    /// Build a lossy request from raw RGBA bytes.
    pub fn lossy(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Self> {
        Self::new(pixels, width, height, EncodeMode::Lossy { quality })
    }

    /// Build a lossless request from raw RGBA bytes.
    pub fn lossless(pixels: &[u8], width: u32, height: u32) -> Result<Self> {
        Self::new(pixels, width, height, EncodeMode::Lossless)
    }

    /// Build a request from raw RGBA bytes in the given mode.
    pub fn new(pixels: &[u8], width: u32, height: u32, mode: EncodeMode) -> Result<Self> {
        validate_dimensions(width, height)?;
        validate_buffer_size(pixels.len(), width, height)?;
        validate_mode(mode)?;
        Ok(Self {
            payload: transcode::encode(pixels),
            width,
            height,
            mode,
        })
    }

    /// Build a request from pixels that are already transcoded.
    ///
    /// The size check uses the payload's decoded length, so the pixels are
    /// not decoded here.
    pub fn from_payload(
        payload: TextPayload,
        width: u32,
        height: u32,
        mode: EncodeMode,
    ) -> Result<Self> {
        validate_dimensions(width, height)?;
        validate_buffer_size(payload.decoded_len(), width, height)?;
        validate_mode(mode)?;
        Ok(Self {
            payload,
            width,
            height,
            mode,
        })
    }

    /// Build a request from an RGBA image.
    ///
    /// Rows are copied out one by one, so a strided image yields a tightly
    /// packed buffer.
    pub fn from_rgba(img: ImgRef<'_, RGBA8>, mode: EncodeMode) -> Result<Self> {
        let width = u32::try_from(img.width())
            .map_err(|_| at!(Error::InvalidDimensions("width exceeds u32".into())))?;
        let height = u32::try_from(img.height())
            .map_err(|_| at!(Error::InvalidDimensions("height exceeds u32".into())))?;

        let mut pixels = Vec::with_capacity(img.width() * img.height() * BYTES_PER_PIXEL);
        for row in img.rows() {
            for px in row {
                pixels.extend_from_slice(&[px.r, px.g, px.b, px.a]);
            }
        }
        Self::new(&pixels, width, height, mode)
    }

    /// The transcoded pixel buffer.
    #[must_use]
    pub fn payload(&self) -> &TextPayload {
        &self.payload
    }

    /// Decode the pixel buffer back to RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> Vec<u8> {
        self.payload.decode()
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Compression mode.
    #[must_use]
    pub fn mode(&self) -> EncodeMode {
        self.mode
    }

    /// Row stride of the decoded buffer in bytes.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }
}

/// Build a lossy encode request.
///
/// Fails with [`Error::InvalidDimensions`], [`Error::BufferSizeMismatch`] or
/// [`Error::InvalidQuality`].
pub fn build_lossy_request(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<EncodeRequest> {
    EncodeRequest::lossy(pixels, width, height, quality)
}

/// Build a lossless encode request.
pub fn build_lossless_request(pixels: &[u8], width: u32, height: u32) -> Result<EncodeRequest> {
    EncodeRequest::lossless(pixels, width, height)
}

/// Decode a codec response back to bytes.
///
/// Payload errors are returned unchanged.
pub fn unwrap_result(response: &str) -> Result<Vec<u8>> {
    transcode::decode(response)
}

/// Byte length of a tightly packed RGBA image, or `None` on overflow.
#[must_use]
pub fn expected_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

fn validate_mode(mode: EncodeMode) -> Result<()> {
    match mode {
        EncodeMode::Lossy { quality } => EncodeMode::lossy(quality).map(|_| ()),
        EncodeMode::Lossless => Ok(()),
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(at!(Error::InvalidDimensions(alloc::format!(
            "{}x{}: width and height must be positive",
            width,
            height
        ))));
    }
    Ok(())
}

pub(crate) fn validate_buffer_size(actual: usize, width: u32, height: u32) -> Result<()> {
    let expected = expected_len(width, height).unwrap_or(usize::MAX);
    if actual != expected {
        return Err(at!(Error::BufferSizeMismatch { expected, actual }));
    }
    Ok(())
}
