//! In-process WebP codec backed by libwebp.

use crate::codec::ImageCodec;
use crate::config::CodecConfig;
use crate::error::{CodecError, EncodingError, Error, Result};
use crate::request::EncodeRequest;
use crate::transcode::{self, TextPayload};
use alloc::vec::Vec;
use enough::Stop;
use whereat::*;

/// Largest width or height a WebP image can have.
pub const MAX_DIMENSION: u32 = 16383;

/// [`ImageCodec`] that encodes with the linked libwebp.
///
/// Decodes the request payload to RGBA, encodes it in the request's mode and
/// answers with the transcoded WebP container.
///
/// # Example
///
/// ```rust
/// use pixelwire::{EncodeRequest, ImageCodec, ImageInfo, Unstoppable, WebpCodec};
///
/// let pixels = [0u8, 0, 255, 255].repeat(4);
/// let request = EncodeRequest::lossless(&pixels, 2, 2)?;
/// let webp = WebpCodec::new().encode_to_bytes(&request, &Unstoppable)?;
/// assert_eq!(ImageInfo::from_webp(&webp)?.width, 2);
/// # Ok::<(), pixelwire::At<pixelwire::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WebpCodec {
    config: CodecConfig,
}

impl WebpCodec {
    /// Codec with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with the given settings.
    #[must_use]
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl ImageCodec for WebpCodec {
    fn encode_image(&self, request: &EncodeRequest, stop: &dyn Stop) -> Result<TextPayload> {
        stop.check().map_err(|r| at!(Error::from(r)))?;

        let (width, height) = (request.width(), request.height());
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(at!(Error::Codec(CodecError::Encoding(
                EncodingError::BadDimension
            ))));
        }

        let config = self.config.to_libwebp(request.mode())?;
        let rgba = request.pixels();
        log::debug!(
            "webp: payload {} chars, decoded {} bytes, {}x{} {:?}",
            request.payload().len(),
            rgba.len(),
            width,
            height,
            request.mode()
        );

        stop.check().map_err(|r| at!(Error::from(r)))?;
        let webp = encode_picture(&rgba, width, height, &config)?;
        log::debug!("webp: encoded {} bytes", webp.len());

        Ok(transcode::encode(&webp))
    }
}

/// Encode a tightly packed RGBA buffer with a full libwebp config.
fn encode_picture(
    rgba: &[u8],
    width: u32,
    height: u32,
    config: &libwebp_sys::WebPConfig,
) -> Result<Vec<u8>> {
    let mut picture = libwebp_sys::WebPPicture::new()
        .map_err(|_| at!(Error::Codec(CodecError::Failed("failed to init picture".into()))))?;

    picture.width = width as i32;
    picture.height = height as i32;
    picture.use_argb = 1;

    let imported = unsafe {
        libwebp_sys::WebPPictureImportRGBA(&mut picture, rgba.as_ptr(), (width * 4) as i32)
    };
    if imported == 0 {
        unsafe { libwebp_sys::WebPPictureFree(&mut picture) };
        return Err(at!(Error::Codec(CodecError::Encoding(
            EncodingError::OutOfMemory
        ))));
    }

    let mut writer = core::mem::MaybeUninit::<libwebp_sys::WebPMemoryWriter>::uninit();
    unsafe { libwebp_sys::WebPMemoryWriterInit(writer.as_mut_ptr()) };
    // SAFETY: initialized by WebPMemoryWriterInit above.
    let mut writer = unsafe { writer.assume_init() };

    picture.writer = Some(libwebp_sys::WebPMemoryWrite);
    picture.custom_ptr = &mut writer as *mut _ as *mut _;

    let ok = unsafe { libwebp_sys::WebPEncode(config, &mut picture) };

    let result = if ok == 0 {
        Err(at!(Error::Codec(CodecError::Encoding(
            EncodingError::from_status(picture.error_code as i32)
        ))))
    } else {
        // SAFETY: on success the writer owns `size` initialized bytes at `mem`.
        Ok(unsafe { core::slice::from_raw_parts(writer.mem, writer.size) }.to_vec())
    };

    unsafe {
        libwebp_sys::WebPPictureFree(&mut picture);
        libwebp_sys::WebPMemoryWriterClear(&mut writer);
    }

    result
}

/// Bitstream format of a WebP container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum BitstreamFormat {
    /// Mixed or undetermined (animations).
    #[default]
    Undefined,
    /// VP8 lossy.
    Lossy,
    /// VP8L lossless.
    Lossless,
}

/// Header facts about a WebP container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Whether the image carries alpha.
    pub has_alpha: bool,
    /// Bitstream format.
    pub format: BitstreamFormat,
}

impl ImageInfo {
    /// Read the container header without decoding pixels.
    ///
    /// Fails with [`CodecError::Failed`] if `data` is not WebP.
    pub fn from_webp(data: &[u8]) -> Result<Self> {
        let mut features = core::mem::MaybeUninit::<libwebp_sys::WebPBitstreamFeatures>::uninit();
        let status = unsafe {
            libwebp_sys::WebPGetFeatures(data.as_ptr(), data.len(), features.as_mut_ptr())
        };
        if status != libwebp_sys::VP8StatusCode::VP8_STATUS_OK {
            return Err(at!(Error::Codec(CodecError::Failed(alloc::format!(
                "not a WebP container (status {})",
                status as i32
            )))));
        }
        // SAFETY: WebPGetFeatures filled the struct when it returned OK.
        let features = unsafe { features.assume_init() };

        let format = match features.format {
            1 => BitstreamFormat::Lossy,
            2 => BitstreamFormat::Lossless,
            _ => BitstreamFormat::Undefined,
        };

        Ok(ImageInfo {
            width: features.width as u32,
            height: features.height as u32,
            has_alpha: features.has_alpha != 0,
            format,
        })
    }
}

/// Version of the linked libwebp encoder as `(major, minor, patch)`.
pub fn version() -> (u32, u32, u32) {
    let v = unsafe { libwebp_sys::WebPGetEncoderVersion() } as u32;
    ((v >> 16) & 0xff, (v >> 8) & 0xff, v & 0xff)
}
