//! Typed native module surface for the UI layer.
//!
//! The UI side speaks strings and floating point numbers: pixels arrive as a
//! base64 payload, dimensions and quality as `f64`, and encoded images leave
//! as base64. [`NativeSampleModule`] converts those into validated
//! [`EncodeRequest`]s for any [`ImageCodec`].

use crate::codec::ImageCodec;
use crate::error::{Error, Result};
use crate::request::{self, EncodeMode, EncodeRequest, MAX_QUALITY};
use crate::transcode::TextPayload;
use alloc::string::String;
use enough::Unstoppable;
use whereat::*;

/// Capabilities the native sample module exposes to the UI layer.
pub trait SampleModule {
    /// Reverse `input` by Unicode scalar value.
    fn reverse_string(&self, input: &str) -> String;

    /// Encode base64 RGBA pixels to lossy WebP, returned as base64.
    fn encode_rgba_to_webp(
        &self,
        rgba_data: &str,
        width: f64,
        height: f64,
        quality: f64,
    ) -> Result<String>;

    /// Encode base64 RGBA pixels to lossless WebP, returned as base64.
    fn encode_rgba_to_webp_lossless(&self, rgba_data: &str, width: f64, height: f64)
        -> Result<String>;
}

/// [`SampleModule`] implementation over an [`ImageCodec`].
///
#[cfg_attr(feature = "codec", doc = "```rust")]
#[cfg_attr(not(feature = "codec"), doc = "```rust,ignore")]
/// use pixelwire::{NativeSampleModule, SampleModule, WebpCodec};
///
/// let module = NativeSampleModule::new(WebpCodec::new());
/// assert_eq!(module.reverse_string("abc"), "cba");
///
/// let rgba = pixelwire::encode(&[255, 0, 0, 255].repeat(4));
/// let webp = module.encode_rgba_to_webp(rgba.as_str(), 2.0, 2.0, 80.0)?;
/// assert!(webp.starts_with("UklGR")); // "RIFF"
/// # Ok::<(), pixelwire::At<pixelwire::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct NativeSampleModule<C> {
    codec: C,
}

impl<C: ImageCodec> NativeSampleModule<C> {
    /// Module forwarding encode calls to `codec`.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// The codec behind this module.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn encode(
        &self,
        rgba_data: &str,
        width: f64,
        height: f64,
        mode: EncodeMode,
    ) -> Result<String> {
        let payload = TextPayload::parse(rgba_data)?;
        let width = dimension("width", width)?;
        let height = dimension("height", height)?;
        log::debug!(
            "module: payload {} chars, decoded {} bytes, expected {:?}",
            payload.len(),
            payload.decoded_len(),
            request::expected_len(width, height)
        );

        let request = EncodeRequest::from_payload(payload, width, height, mode)?;
        let response = self.codec.encode_image(&request, &Unstoppable)?;
        Ok(response.into_string())
    }
}

#[cfg(feature = "codec")]
impl Default for NativeSampleModule<crate::webp::WebpCodec> {
    fn default() -> Self {
        Self::new(crate::webp::WebpCodec::new())
    }
}

impl<C: ImageCodec> SampleModule for NativeSampleModule<C> {
    fn reverse_string(&self, input: &str) -> String {
        input.chars().rev().collect()
    }

    fn encode_rgba_to_webp(
        &self,
        rgba_data: &str,
        width: f64,
        height: f64,
        quality: f64,
    ) -> Result<String> {
        let quality = quality_factor(quality)?;
        self.encode(rgba_data, width, height, EncodeMode::Lossy { quality })
    }

    fn encode_rgba_to_webp_lossless(
        &self,
        rgba_data: &str,
        width: f64,
        height: f64,
    ) -> Result<String> {
        self.encode(rgba_data, width, height, EncodeMode::Lossless)
    }
}

/// Convert a UI-side dimension to pixels.
fn dimension(name: &str, value: f64) -> Result<u32> {
    let pixels = value as u32;
    if !(value > 0.0 && f64::from(pixels) == value) {
        return Err(at!(Error::InvalidDimensions(alloc::format!(
            "{} must be a positive whole number, got {}",
            name,
            value
        ))));
    }
    Ok(pixels)
}

/// Convert a UI-side quality to `0..=100`.
fn quality_factor(value: f64) -> Result<u8> {
    let quality = value as u8;
    if !(f64::from(quality) == value && quality <= MAX_QUALITY) {
        return Err(at!(Error::InvalidQuality(alloc::format!(
            "expected a whole number in 0..={}, got {}",
            MAX_QUALITY,
            value
        ))));
    }
    Ok(quality)
}
