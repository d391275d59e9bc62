//! Encodes a 2x2 red image (lossy) and a 2x2 blue image (lossless) through
//! the native module surface and prints what comes back.
//!
//! Run with `RUST_LOG=debug` to see payload sizes at each step.

use pixelwire::{encode, NativeSampleModule, SampleModule, WebpCodec};

fn report(label: &str, result: pixelwire::Result<String>) {
    match result {
        Ok(webp_base64) => {
            let head: String = webp_base64.chars().take(50).collect();
            println!(
                "{}: encoded successfully\nSize: {} chars\nFirst 50 chars: {}...",
                label,
                webp_base64.len(),
                head
            );
        }
        Err(e) => eprintln!("{}: error: {}", label, e.error()),
    }
}

fn main() {
    env_logger::init();
    let module: NativeSampleModule<WebpCodec> = NativeSampleModule::default();

    let red = [255u8, 0, 0, 255].repeat(4);
    let red_base64 = encode(&red);
    log::info!("red payload: {} ({} chars)", red_base64, red_base64.len());
    report(
        "WebP lossy",
        module.encode_rgba_to_webp(red_base64.as_str(), 2.0, 2.0, 80.0),
    );

    let blue = [0u8, 0, 255, 255].repeat(4);
    let blue_base64 = encode(&blue);
    report(
        "WebP lossless",
        module.encode_rgba_to_webp_lossless(blue_base64.as_str(), 2.0, 2.0),
    );
}
