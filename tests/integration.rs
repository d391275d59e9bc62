//! Integration tests for pixelwire crate.

use pixelwire::*;

/// Generate a solid color RGBA image.
fn generate_rgba(width: u32, height: u32, r: u8, g: u8, b: u8, a: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..(width * height) {
        data.push(r);
        data.push(g);
        data.push(b);
        data.push(a);
    }
    data
}

/// Generate a gradient RGBA image.
fn generate_gradient_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = (((x + y) * 127) / (width + height).max(1)) as u8;
            data.push(r);
            data.push(g);
            data.push(b);
            data.push(255);
        }
    }
    data
}

mod transcoder {
    use super::*;

    #[test]
    fn test_roundtrip_short_lengths() {
        for len in 0..=9usize {
            let bytes: Vec<u8> = (0..len as u8).map(|b| b.wrapping_mul(37)).collect();
            let payload = encode(&bytes);
            assert_eq!(payload.len(), encoded_len(len), "length for {}", len);
            assert_eq!(decode(payload.as_str()).unwrap(), bytes, "roundtrip for {}", len);
        }
    }

    #[test]
    fn test_roundtrip_all_byte_values() {
        // 256 % 3 == 1, so two padding symbols
        let bytes: Vec<u8> = (0..=255u8).collect();
        let payload = encode(&bytes);
        assert_eq!(payload.len(), 344);
        assert_eq!(payload.padding(), 2);
        assert_eq!(decode(payload.as_str()).unwrap(), bytes);

        let payload = encode(&bytes[..255]);
        assert_eq!(payload.len(), 340);
        assert_eq!(payload.padding(), 0);
        assert_eq!(decode(payload.as_str()).unwrap(), &bytes[..255]);
    }

    #[test]
    fn test_structural_rejection() {
        for text in ["A", "AB=", "AB==CD", "AB==CDEF", "=AAA", "AA.A"] {
            let err = decode(text).unwrap_err();
            assert!(
                matches!(err.error(), Error::MalformedPayload(_)),
                "{:?} should be malformed, got {:?}",
                text,
                err.error()
            );
        }
    }

    #[test]
    fn test_red_square_payload() {
        let red = generate_rgba(2, 2, 255, 0, 0, 255);
        let payload = encode(&red);
        assert_eq!(payload.as_str(), "/wAA//8AAP//AAD//wAA/w==");
        assert_eq!(payload.padding(), 2);
    }

    #[test]
    fn test_concurrent_callers() {
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8u8)
                .map(|seed| {
                    scope.spawn(move || {
                        for len in 0..200usize {
                            let bytes: Vec<u8> = (0..len)
                                .map(|i| (i as u8).wrapping_mul(seed).wrapping_add(seed))
                                .collect();
                            let payload = encode(&bytes);
                            assert_eq!(decode(payload.as_str()).unwrap(), bytes);
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().expect("worker panicked");
            }
        });
    }
}

mod requests {
    use super::*;
    use imgref::Img;
    use rgb::RGBA8;

    #[test]
    fn test_descriptor_validation() {
        let pixels = generate_rgba(2, 2, 255, 0, 0, 255);
        assert!(build_lossy_request(&pixels, 2, 2, 80).is_ok());

        let err = build_lossy_request(&pixels[..15], 2, 2, 80).unwrap_err();
        assert_eq!(
            *err.error(),
            Error::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        );

        let err = build_lossy_request(&pixels, 2, 2, 101).unwrap_err();
        assert!(matches!(err.error(), Error::InvalidQuality(_)));

        let err = build_lossy_request(&pixels, 0, 2, 80).unwrap_err();
        assert!(matches!(err.error(), Error::InvalidDimensions(_)));
    }

    #[test]
    fn test_lossless_request_has_no_quality() {
        let pixels = generate_rgba(3, 5, 0, 0, 255, 255);
        let request = build_lossless_request(&pixels, 3, 5).unwrap();
        assert_eq!(request.mode(), EncodeMode::Lossless);
        assert_eq!(request.mode().quality(), None);
        assert_eq!(request.pixels(), pixels);
    }

    #[test]
    fn test_from_rgba_image() {
        let buf: Vec<RGBA8> = (0..12u8).map(|i| RGBA8::new(i, i, i, 255)).collect();
        let img = Img::new(buf, 4, 3);
        let request = EncodeRequest::from_rgba(img.as_ref(), EncodeMode::Lossy { quality: 50 })
            .unwrap();
        assert_eq!((request.width(), request.height()), (4, 3));
        assert_eq!(request.pixels().len(), 48);
    }

    #[test]
    fn test_unwrap_result_propagates_payload_errors() {
        let err = unwrap_result("UklGRg").unwrap_err();
        assert_eq!(*err.error(), Error::MalformedPayload(PayloadError::Length(6)));
    }
}

#[cfg(feature = "codec")]
mod webp_codec {
    use super::*;

    #[test]
    fn test_lossy_roundtrip_through_boundary() {
        let width = 64;
        let height = 48;
        let pixels = generate_gradient_rgba(width, height);

        let request = build_lossy_request(&pixels, width, height, 85).unwrap();
        let response = WebpCodec::new()
            .encode_image(&request, &Unstoppable)
            .expect("encode failed");
        let webp = unwrap_result(response.as_str()).expect("malformed response");

        let info = ImageInfo::from_webp(&webp).expect("invalid webp");
        assert_eq!(info.width, width);
        assert_eq!(info.height, height);
        assert_eq!(info.format, BitstreamFormat::Lossy);
    }

    #[test]
    fn test_lossless_roundtrip_through_boundary() {
        let pixels = generate_rgba(2, 2, 0, 0, 255, 255);
        let request = build_lossless_request(&pixels, 2, 2).unwrap();
        let webp = WebpCodec::new()
            .encode_to_bytes(&request, &Unstoppable)
            .expect("encode failed");

        let info = ImageInfo::from_webp(&webp).expect("invalid webp");
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(info.format, BitstreamFormat::Lossless);
    }

    #[test]
    fn test_quality_extremes() {
        let pixels = generate_gradient_rgba(16, 16);
        let codec = WebpCodec::new();
        for quality in [0, 100] {
            let request = build_lossy_request(&pixels, 16, 16, quality).unwrap();
            let webp = codec.encode_to_bytes(&request, &Unstoppable).unwrap();
            assert_eq!(&webp[..4], b"RIFF", "quality {}", quality);
        }
    }

    #[test]
    fn test_all_presets() {
        let pixels = generate_gradient_rgba(32, 32);
        let request = build_lossy_request(&pixels, 32, 32, 75).unwrap();
        for preset in [
            Preset::Default,
            Preset::Picture,
            Preset::Photo,
            Preset::Drawing,
            Preset::Icon,
            Preset::Text,
        ] {
            let codec = WebpCodec::with_config(CodecConfig::new().preset(preset));
            let webp = codec
                .encode_to_bytes(&request, &Unstoppable)
                .unwrap_or_else(|_| panic!("encode failed for {:?}", preset));
            let info = ImageInfo::from_webp(&webp).unwrap();
            assert_eq!(info.width, 32, "width for {:?}", preset);
        }
    }

    #[test]
    fn test_alpha_is_reported() {
        let pixels = generate_rgba(8, 8, 10, 20, 30, 128);
        let request = build_lossless_request(&pixels, 8, 8).unwrap();
        let webp = WebpCodec::new()
            .encode_to_bytes(&request, &Unstoppable)
            .unwrap();
        assert!(ImageInfo::from_webp(&webp).unwrap().has_alpha);
    }

    /// Stop token that has already fired.
    struct Cancelled;

    impl Stop for Cancelled {
        fn check(&self) -> core::result::Result<(), StopReason> {
            Err(StopReason::Cancelled)
        }
    }

    #[test]
    fn test_stop_token_aborts() {
        let pixels = generate_rgba(4, 4, 0, 0, 0, 255);
        let request = build_lossless_request(&pixels, 4, 4).unwrap();
        let err = WebpCodec::new()
            .encode_image(&request, &Cancelled)
            .unwrap_err();
        assert_eq!(*err.error(), Error::Stopped(StopReason::Cancelled));
    }
}

#[cfg(feature = "codec")]
mod module_surface {
    use super::*;

    #[test]
    fn test_encode_rgba_to_webp() {
        let module: NativeSampleModule<WebpCodec> = NativeSampleModule::default();
        let rgba = encode(&generate_rgba(2, 2, 255, 0, 0, 255));

        let webp_base64 = module
            .encode_rgba_to_webp(rgba.as_str(), 2.0, 2.0, 80.0)
            .expect("encode failed");
        let webp = decode(&webp_base64).expect("malformed response");
        let info = ImageInfo::from_webp(&webp).unwrap();
        assert_eq!(info.format, BitstreamFormat::Lossy);
    }

    #[test]
    fn test_encode_rgba_to_webp_lossless() {
        let module = NativeSampleModule::new(WebpCodec::new());
        let rgba = encode(&generate_rgba(2, 2, 0, 0, 255, 255));

        let webp_base64 = module
            .encode_rgba_to_webp_lossless(rgba.as_str(), 2.0, 2.0)
            .expect("encode failed");
        let webp = decode(&webp_base64).unwrap();
        let info = ImageInfo::from_webp(&webp).unwrap();
        assert_eq!(info.format, BitstreamFormat::Lossless);
    }

    #[test]
    fn test_module_rejects_bad_numbers() {
        let module: NativeSampleModule<WebpCodec> = NativeSampleModule::default();
        let rgba = encode(&generate_rgba(2, 2, 0, 0, 0, 255));

        let err = module
            .encode_rgba_to_webp(rgba.as_str(), 2.0, 2.0, -5.0)
            .unwrap_err();
        assert!(matches!(err.error(), Error::InvalidQuality(_)));

        let err = module
            .encode_rgba_to_webp_lossless(rgba.as_str(), 2.0, f64::NAN)
            .unwrap_err();
        assert!(matches!(err.error(), Error::InvalidDimensions(_)));
    }

    #[test]
    fn test_reverse_string() {
        let module: NativeSampleModule<WebpCodec> = NativeSampleModule::default();
        assert_eq!(module.reverse_string("Hello, World!"), "!dlroW ,olleH");
    }
}

mod storage {
    use super::*;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get_item("user"), None);
        store.set_item("user", "ada");
        store.set_item("user", "grace");
        assert_eq!(store.get_item("user").as_deref(), Some("grace"));
        store.remove_item("nobody");
        store.remove_item("user");
        assert_eq!(store.get_item("user"), None);
        store.set_item("a", "1");
        store.clear();
        assert_eq!(store.get_item("a"), None);
    }

    #[test]
    fn test_memory_store_contract() {
        let mut store = MemoryStore::new();
        exercise(&mut store);
        assert!(store.is_empty());
    }
}

mod error_tests {
    use pixelwire::{CodecError, EncodingError, Error, PayloadError, StopReason};

    #[test]
    fn test_error_display() {
        let errors = [
            (
                Error::MalformedPayload(PayloadError::Length(3)),
                "malformed payload: length 3 is not a multiple of 4",
            ),
            (
                Error::MalformedPayload(PayloadError::InvalidSymbol {
                    index: 2,
                    symbol: '-',
                }),
                "malformed payload: invalid symbol '-' at offset 2",
            ),
            (
                Error::MalformedPayload(PayloadError::MisplacedPadding { index: 1 }),
                "malformed payload: misplaced padding at offset 1",
            ),
            (
                Error::InvalidDimensions("0x2".into()),
                "invalid dimensions: 0x2",
            ),
            (
                Error::BufferSizeMismatch {
                    expected: 16,
                    actual: 15,
                },
                "buffer size mismatch: expected 16 bytes, got 15",
            ),
            (Error::InvalidQuality("101".into()), "invalid quality: 101"),
            (
                Error::Codec(CodecError::Encoding(EncodingError::BadDimension)),
                "codec error: encode failed: bad dimension",
            ),
            (
                Error::Codec(CodecError::Failed("boom".into())),
                "codec error: boom",
            ),
            (
                Error::Stopped(StopReason::Cancelled),
                "stopped: operation cancelled",
            ),
            (
                Error::Stopped(StopReason::TimedOut),
                "stopped: operation timed out",
            ),
        ];

        for (error, expected) in errors {
            assert_eq!(format!("{}", error), expected);
        }
    }

    #[test]
    fn test_encoding_error_from_status() {
        assert_eq!(EncodingError::from_status(1), EncodingError::OutOfMemory);
        assert_eq!(EncodingError::from_status(5), EncodingError::BadDimension);
        assert_eq!(EncodingError::from_status(10), EncodingError::UserAbort);
        assert_eq!(EncodingError::from_status(42), EncodingError::Unknown);
    }

    #[test]
    fn test_stop_reason_converts() {
        assert_eq!(
            Error::from(StopReason::Cancelled),
            Error::Stopped(StopReason::Cancelled)
        );
    }
}
