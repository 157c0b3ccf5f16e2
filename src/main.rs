use embedded_graphics::mono_font::{ascii::FONT_6X10, iso_8859_15::FONT_10X20, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::{prelude::*, text::Text};

use epd2in13b::{
    Config, DisplayInterface, DisplayRotation, Epd2in13b, Error, Flag, Line, PinConfig,
    PLANE_LEN, SPI_FREQUENCY_HZ, SPI_MODE,
};

use esp_idf_svc::hal::delay::Delay;
use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::hal::spi;

// Pre-converted splash image (generated at build time, empty without splash.png)
const SPLASH_IMAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/splash.bin"));

/// Output pin by GPIO number
fn output_pin(
    gpio: u8,
    line: Line,
) -> Result<gpio::PinDriver<'static, gpio::AnyOutputPin, gpio::Output>, Error> {
    // SAFETY: every GPIO in the validated PinConfig is distinct and claimed exactly once
    let pin = unsafe { gpio::AnyOutputPin::new(i32::from(gpio)) };
    gpio::PinDriver::output(pin).map_err(|_| Error::HardwareUnavailable(line))
}

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;

    let wiring = PinConfig::default();
    wiring.validate()?;
    log::info!("Display wiring: {:?}", wiring);

    // SAFETY: see output_pin, the bus lines are part of the same validated set
    let (sclk, sdo) = unsafe {
        (
            gpio::AnyOutputPin::new(i32::from(wiring.clock)),
            gpio::AnyOutputPin::new(i32::from(wiring.data)),
        )
    };

    log::info!("Configuring SPI at {} Hz", SPI_FREQUENCY_HZ);
    let driver = spi::SpiDriver::new(
        peripherals.spi2,
        sclk,
        sdo,
        Option::<gpio::AnyIOPin>::None, // The panel is write-only
        &spi::SpiDriverConfig::new(),
    )
    .map_err(|_| Error::HardwareUnavailable(Line::Bus))?;
    let bus = spi::SpiBusDriver::new(
        driver,
        &spi::SpiConfig::new()
            .baudrate(SPI_FREQUENCY_HZ.Hz())
            .data_mode(SPI_MODE),
    )
    .map_err(|_| Error::HardwareUnavailable(Line::Bus))?;

    let cs = output_pin(wiring.cs, Line::ChipSelect)?;
    let dc = output_pin(wiring.dc, Line::DataCommand)?;
    let rst = output_pin(wiring.reset, Line::Reset)?;
    // SAFETY: see output_pin
    let busy = gpio::PinDriver::input(unsafe { gpio::AnyInputPin::new(i32::from(wiring.busy)) })
        .map_err(|_| Error::HardwareUnavailable(Line::Busy))?;

    let interface = DisplayInterface::new(bus, cs, busy, dc, rst, Delay::default());
    let mut epd = Epd2in13b::open(interface, DisplayRotation::Rotate90, Config::default())?;

    log::info!("Clearing display to white");
    epd.clear(Flag::FILL_WHITE, Flag::FILL_WHITE)?;

    let (black, red) = epd.planes_mut();
    black.clear(BinaryColor::On)?;
    red.clear(BinaryColor::On)?;

    if SPLASH_IMAGE.len() == PLANE_LEN {
        log::info!("Splash image embedded, size: {} bytes", SPLASH_IMAGE.len());
        black.buffer_mut().copy_from_slice(SPLASH_IMAGE);
    } else {
        log::warn!("Splash image not available (splash.png not found at build time)");

        // Off = ink for this display
        let title_style = MonoTextStyle::new(&FONT_10X20, BinaryColor::Off);
        Text::new("2.13\" (B)", Point::new(8, 30), title_style).draw(black)?;

        let label_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::Off);
        Text::new("UC8151D black / red", Point::new(8, 50), label_style).draw(black)?;
        Text::new("104 x 212 pixels", Point::new(8, 64), label_style).draw(black)?;
    }

    // Red frame around the whole rotated screen
    Rectangle::new(Point::zero(), red.size())
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::Off, 3))
        .draw(red)?;

    log::info!("Rendering planes");
    epd.render()?;

    log::info!("Putting display to sleep");
    epd.sleep()?;

    let reset_reason = esp_idf_svc::hal::reset::ResetReason::get();
    log::info!("Reset reason: {:?}", reset_reason);

    Ok(())
}
