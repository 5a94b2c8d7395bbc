//! Dithers an image file and writes the result as a PNG at the source size.
//!
//! ```text
//! cargo run --example dither_file --features image -- \
//!     input.jpg output.png "FLOYD-STEINBERG" 46 46
//! ```
//!
//! Arguments after the output path are optional: method name, scale percent
//! and threshold level. Set `RUST_LOG=debug` to see the pipeline log.

use monodither::{DitherMethod, PixelBuffer, Settings, Threshold, dither};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        eprintln!("usage: dither_file <input> <output.png> [method] [scale] [threshold]");
        std::process::exit(2);
    };

    let method = args
        .next()
        .map(|name| DitherMethod::from_name_or_default(&name))
        .unwrap_or_default();
    let scale = args.next().map(|s| s.parse()).transpose()?.unwrap_or(46);
    let level = args.next().map(|s| s.parse()).transpose()?.unwrap_or(46);

    let source = PixelBuffer::try_from(image::open(&input)?.to_rgba8())?;
    let (width, height) = (source.width(), source.height());

    // Paint transparent regions white, like the on-screen canvas does.
    let settings =
        Settings::new(scale, Threshold::from_level(level), method).with_flatten(true);
    let result = dither(&source, &settings);

    println!(
        "{input}: {width}x{height} -> {}x{} with {method}",
        result.width(),
        result.height()
    );

    result
        .resize_nearest(width, height)?
        .into_rgba_image()
        .save(&output)?;

    Ok(())
}
