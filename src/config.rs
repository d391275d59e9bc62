//! Configuration for the bundled libwebp codec.

use crate::error::{CodecError, EncodingError, Error, Result};
use crate::request::EncodeMode;
use whereat::*;

/// Content-aware encoding presets.
///
/// Presets tune filtering and noise shaping for a type of content before
/// the request's quality is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Balanced for general use.
    #[default]
    Default,
    /// Indoor or portrait photo.
    Picture,
    /// Outdoor photo with natural lighting.
    Photo,
    /// Line art and high-contrast drawings.
    Drawing,
    /// Small colorful images such as icons.
    Icon,
    /// Text-heavy images.
    Text,
}

impl Preset {
    pub(crate) fn to_libwebp(self) -> libwebp_sys::WebPPreset {
        match self {
            Preset::Default => libwebp_sys::WebPPreset::WEBP_PRESET_DEFAULT,
            Preset::Picture => libwebp_sys::WebPPreset::WEBP_PRESET_PICTURE,
            Preset::Photo => libwebp_sys::WebPPreset::WEBP_PRESET_PHOTO,
            Preset::Drawing => libwebp_sys::WebPPreset::WEBP_PRESET_DRAWING,
            Preset::Icon => libwebp_sys::WebPPreset::WEBP_PRESET_ICON,
            Preset::Text => libwebp_sys::WebPPreset::WEBP_PRESET_TEXT,
        }
    }
}

/// Codec settings that do not travel with a request.
///
/// The request decides lossy vs lossless and the lossy quality; everything
/// else is fixed per codec instance.
///
/// # Example
///
/// ```rust
/// use pixelwire::{CodecConfig, Preset, WebpCodec};
///
/// let codec = WebpCodec::with_config(
///     CodecConfig::new().preset(Preset::Icon).method(6).exact(true),
/// );
/// assert_eq!(codec.config().get_method(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CodecConfig {
    pub(crate) preset: Preset,
    pub(crate) method: u8,
    pub(crate) alpha_quality: u8,
    pub(crate) exact: bool,
    pub(crate) use_sharp_yuv: bool,
    pub(crate) lossless_effort: f32,
    pub(crate) thread_level: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            preset: Preset::Default,
            method: 4,
            alpha_quality: 100,
            exact: false,
            use_sharp_yuv: false,
            lossless_effort: 75.0,
            thread_level: 0,
        }
    }
}

impl CodecConfig {
    /// Default settings: method 4, no preset, lossless effort 75.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set content-aware preset (lossy requests only).
    #[must_use]
    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Set quality/speed tradeoff (0 = fast, 6 = slower but better).
    #[must_use]
    pub fn method(mut self, method: u8) -> Self {
        self.method = method.min(6);
        self
    }

    /// Set alpha plane quality (0-100).
    #[must_use]
    pub fn alpha_quality(mut self, quality: u8) -> Self {
        self.alpha_quality = quality.min(100);
        self
    }

    /// Preserve RGB values under fully transparent pixels.
    #[must_use]
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Use sharp RGB to YUV conversion for lossy requests.
    #[must_use]
    pub fn sharp_yuv(mut self, enable: bool) -> Self {
        self.use_sharp_yuv = enable;
        self
    }

    /// Compression effort for lossless requests (0.0 = fastest, 100.0 = smallest).
    #[must_use]
    pub fn lossless_effort(mut self, effort: f32) -> Self {
        self.lossless_effort = effort.clamp(0.0, 100.0);
        self
    }

    /// Enable multi-threaded encoding where libwebp supports it.
    #[must_use]
    pub fn thread_level(mut self, level: u8) -> Self {
        self.thread_level = level;
        self
    }

    /// Get the preset.
    #[must_use]
    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    /// Get the method.
    #[must_use]
    pub fn get_method(&self) -> u8 {
        self.method
    }

    /// Get the lossless effort.
    #[must_use]
    pub fn get_lossless_effort(&self) -> f32 {
        self.lossless_effort
    }

    /// Build a libwebp config for a request in `mode`.
    pub(crate) fn to_libwebp(&self, mode: EncodeMode) -> Result<libwebp_sys::WebPConfig> {
        let (preset, quality) = match mode {
            EncodeMode::Lossy { quality } => (self.preset, f32::from(quality)),
            EncodeMode::Lossless => (Preset::Default, self.lossless_effort),
        };

        let mut config = libwebp_sys::WebPConfig::new_with_preset(preset.to_libwebp(), quality)
            .map_err(|_| invalid_configuration())?;

        config.lossless = mode.is_lossless() as i32;
        config.method = self.method as i32;
        config.alpha_quality = self.alpha_quality as i32;
        config.exact = self.exact as i32;
        config.use_sharp_yuv = self.use_sharp_yuv as i32;
        config.thread_level = self.thread_level as i32;

        if unsafe { libwebp_sys::WebPValidateConfig(&config) } == 0 {
            return Err(invalid_configuration());
        }

        Ok(config)
    }
}

fn invalid_configuration() -> At<Error> {
    at!(Error::Codec(CodecError::Encoding(
        EncodingError::InvalidConfiguration
    )))
}
