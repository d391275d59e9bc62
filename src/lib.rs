//! # pixelwire
//!
//! Marshaling for passing RGBA pixel buffers to native WebP modules across a
//! string-only boundary.
//!
//! This crate provides:
//! - Base64 transcoding between byte buffers and [`TextPayload`]s
//! - Validated lossy and lossless [`EncodeRequest`]s
//! - The [`ImageCodec`] boundary, with a libwebp-backed [`WebpCodec`]
//! - A typed [`SampleModule`] surface and a [`KeyValueStore`] boundary
//!
//! ## Quick Start
//!
#![cfg_attr(feature = "codec", doc = "```rust")]
#![cfg_attr(not(feature = "codec"), doc = "```rust,ignore")]
//! use pixelwire::{ImageCodec, Unstoppable, WebpCodec};
//!
//! // A 2x2 red RGBA image
//! let rgba: Vec<u8> = [255, 0, 0, 255].repeat(4);
//!
//! let request = pixelwire::build_lossy_request(&rgba, 2, 2, 80)?;
//! assert_eq!(request.payload().len(), 24);
//!
//! let response = WebpCodec::new().encode_image(&request, &Unstoppable)?;
//! let webp = pixelwire::unwrap_result(response.as_str())?;
//! assert_eq!(&webp[..4], b"RIFF");
//! # Ok::<(), pixelwire::At<pixelwire::Error>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

whereat::define_at_crate_info!();

mod codec;
mod error;
mod module;
mod request;
mod storage;
mod transcode;

#[cfg(feature = "codec")]
mod config;

#[cfg(feature = "codec")]
mod webp;

// Re-exports
pub use codec::ImageCodec;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{CodecError, EncodingError, Error, PayloadError, Result};
pub use module::{NativeSampleModule, SampleModule};
pub use request::{
    build_lossless_request, build_lossy_request, expected_len, unwrap_result, EncodeMode,
    EncodeRequest, BYTES_PER_PIXEL, MAX_QUALITY,
};
pub use storage::{KeyValueStore, MemoryStore};
pub use transcode::{decode, decoded_len, encode, encoded_len, TextPayload};
pub use whereat::At;

#[cfg(feature = "codec")]
pub use config::{CodecConfig, Preset};

#[cfg(feature = "codec")]
pub use webp::{version, BitstreamFormat, ImageInfo, WebpCodec, MAX_DIMENSION};
