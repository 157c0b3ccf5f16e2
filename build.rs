use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Panel size in portrait orientation
const PANEL_WIDTH: u32 = 104;
const PANEL_HEIGHT: u32 = 212;

/// Convert PNG image to a packed black plane at build time
///
/// Set bits are paper, cleared bits are ink. Rows are padded to whole bytes.
fn convert_image_to_plane(
    input_path: &str,
    output_path: &Path,
    threshold: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", input_path);

    if !Path::new(input_path).exists() {
        // Empty file so include_bytes! still finds something
        File::create(output_path)?.write_all(&[])?;
        return Ok(());
    }

    let img = image::open(input_path)?;
    println!(
        "cargo:warning=Converting {} ({}x{}) to {}x{}",
        input_path,
        img.width(),
        img.height(),
        PANEL_WIDTH,
        PANEL_HEIGHT
    );

    // Fit inside the panel, keeping the aspect ratio
    let resized = img.resize(
        PANEL_WIDTH,
        PANEL_HEIGHT,
        image::imageops::FilterType::Lanczos3,
    );
    let gray = resized.to_luma8();
    let (new_width, new_height) = gray.dimensions();

    let offset_x = (PANEL_WIDTH - new_width) / 2;
    let offset_y = (PANEL_HEIGHT - new_height) / 2;

    let bytes_per_row = PANEL_WIDTH.div_ceil(8);
    let mut buffer = vec![0xFFu8; (bytes_per_row * PANEL_HEIGHT) as usize];

    for y in 0..new_height {
        for x in 0..new_width {
            if gray.get_pixel(x, y)[0] < threshold {
                let (px, py) = (x + offset_x, y + offset_y);
                let byte_index = (py * bytes_per_row + px / 8) as usize;
                buffer[byte_index] &= !(0x80 >> (px % 8));
            }
        }
    }

    File::create(output_path)?.write_all(&buffer)?;
    Ok(())
}

fn main() {
    // ESP-IDF link arguments, only meaningful when building the firmware
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let splash_output = Path::new(&out_dir).join("splash.bin");

    if let Err(e) = convert_image_to_plane("splash.png", &splash_output, 128) {
        println!("cargo:warning=Failed to convert splash.png: {}", e);
        let _ = File::create(&splash_output);
    }
}
