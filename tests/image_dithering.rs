use monodither::{DitherMethod, PixelBuffer, Settings, Threshold, dither, dither_with_rng, preview};
use rand::{SeedableRng, rngs::SmallRng};
use std::{
    env,
    path::{Path, PathBuf},
};

const WIDTH: u32 = 256;
const HEIGHT: u32 = 64;
/// Every dithered pixel is shown as a `ZOOM x ZOOM` block.
const ZOOM: u32 = 2;

/// Horizontal color gradient with a semi-transparent bottom band.
fn create_test_image() -> PixelBuffer {
    let mut pixels = Vec::with_capacity((WIDTH * HEIGHT * 4) as usize);

    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let fx = x as f32 / (WIDTH - 1) as f32;
            let fy = y as f32 / (HEIGHT - 1) as f32;

            pixels.push((fx * 255.0) as u8);
            pixels.push(((fx * 0.8 + fy * 0.2) * 255.0) as u8);
            pixels.push((fx * fy * 255.0) as u8);
            pixels.push(if y < HEIGHT * 3 / 4 { 255 } else { 128 });
        }
    }

    PixelBuffer::from_raw(WIDTH, HEIGHT, pixels).unwrap()
}

fn save_as_png(path: &Path, buffer: &PixelBuffer) -> Result<(), Box<dyn std::error::Error>> {
    image::save_buffer(
        path,
        buffer.as_raw(),
        buffer.width(),
        buffer.height(),
        image::ColorType::Rgba8,
    )?;
    Ok(())
}

fn load_png(path: &Path) -> Result<(Vec<u8>, u32, u32), Box<dyn std::error::Error>> {
    let img = image::open(path)?;
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    Ok((rgba.into_raw(), width, height))
}

/// Get the path for expected or output image
fn get_image_path(name: &str, is_expected: bool) -> PathBuf {
    if is_expected {
        PathBuf::from("tests/expected_images").join(format!("{}.png", name))
    } else {
        PathBuf::from("target/test_output").join(format!("{}.png", name))
    }
}

/// Save and compare with the expected image, if there is one.
///
/// Run with `UPDATE_EXPECTED=1` to (re)create the expected images.
fn save_and_compare(name: &str, buffer: &PixelBuffer) -> Result<(), Box<dyn std::error::Error>> {
    let update_mode = env::var("UPDATE_EXPECTED").is_ok();

    std::fs::create_dir_all("tests/expected_images").ok();
    std::fs::create_dir_all("target/test_output").ok();

    if update_mode {
        let expected_path = get_image_path(name, true);
        save_as_png(&expected_path, buffer)?;
        println!("Updated expected image: {:?}", expected_path);
        return Ok(());
    }

    let output_path = get_image_path(name, false);
    save_as_png(&output_path, buffer)?;

    let expected_path = get_image_path(name, true);
    if expected_path.exists() {
        let (expected, width, height) = load_png(&expected_path)?;
        assert_eq!((width, height), (buffer.width(), buffer.height()), "size of {name}");
        // PNG is lossless and every method but RANDOM is deterministic.
        assert!(
            expected == buffer.as_raw(),
            "Image mismatch for {}. Output saved to {:?}. Run with UPDATE_EXPECTED=1 to update expected images.",
            name,
            output_path
        );
    } else {
        println!(
            "Warning: No expected image for {}. Output saved to {:?}. Run with UPDATE_EXPECTED=1 to create expected images.",
            name, output_path
        );
    }

    Ok(())
}

fn file_name(method: DitherMethod) -> String {
    method.name().to_ascii_lowercase().replace([' ', '-'], "_")
}

#[test]
fn test_all_methods_to_png() -> Result<(), Box<dyn std::error::Error>> {
    let source = create_test_image();

    for method in DitherMethod::ALL {
        let settings = Settings::new(50, Threshold::from_level(46), method);
        let small = dither_with_rng(&source, &settings, &mut SmallRng::seed_from_u64(42));
        assert_eq!((small.width(), small.height()), (WIDTH / 2, HEIGHT / 2));
        assert!(small.is_monochrome());

        let display = small.resize_nearest(small.width() * ZOOM, small.height() * ZOOM)?;
        save_and_compare(&file_name(method), &display)?;
    }

    Ok(())
}

#[test]
fn test_preview_to_png() -> Result<(), Box<dyn std::error::Error>> {
    let before = preview(&create_test_image());
    assert!(before.is_monochrome());
    assert!(before.as_raw().chunks(4).all(|px| px[3] == 255));
    save_and_compare("preview", &before)
}

#[test]
fn test_png_round_trip_is_exact() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::new(100, Threshold::default(), DitherMethod::Atkinson);
    let result = dither(&create_test_image(), &settings);

    std::fs::create_dir_all("target/test_output")?;
    let path = get_image_path("atkinson_round_trip", false);
    save_as_png(&path, &result)?;

    let (data, width, height) = load_png(&path)?;
    let reloaded = PixelBuffer::from_raw(width, height, data)?;
    assert_eq!(reloaded, result);
    Ok(())
}
