//! The codec boundary.
//!
//! An [`ImageCodec`] takes a validated [`EncodeRequest`] and answers with the
//! encoded WebP container as a [`TextPayload`]. Codecs may run for a long
//! time; callers that need to give up pass a [`Stop`] token; the core itself
//! imposes no timeout or retry.

use crate::error::Result;
use crate::request::EncodeRequest;
use crate::transcode::TextPayload;
use alloc::vec::Vec;
use enough::Stop;

/// An external WebP encoder reachable through a string-only boundary.
///
/// Implementations must return a payload whose decoded bytes form a WebP
/// container in the request's mode, or an [`Error::Codec`](crate::Error::Codec)
/// describing the failure. The core passes codec errors through untouched.
pub trait ImageCodec {
    /// Encode `request`, checking `stop` at points where work can be abandoned.
    fn encode_image(&self, request: &EncodeRequest, stop: &dyn Stop) -> Result<TextPayload>;

    /// Encode `request` and decode the response to raw WebP bytes.
    fn encode_to_bytes(&self, request: &EncodeRequest, stop: &dyn Stop) -> Result<Vec<u8>> {
        Ok(self.encode_image(request, stop)?.decode())
    }
}

impl<C: ImageCodec + ?Sized> ImageCodec for &C {
    fn encode_image(&self, request: &EncodeRequest, stop: &dyn Stop) -> Result<TextPayload> {
        (**self).encode_image(request, stop)
    }
}
