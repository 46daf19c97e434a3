use anyhow::Context;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8};

use epd_graphics::epd::{HEIGHT, WIDTH};
use epd_graphics::{
    buffer_len, Color, FontSet, FontSize, FrameBuffer, OwnedFontTable, PanelTransport, Rotation,
    WHITE,
};

/// Prints log records to stderr
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Stands in for the panel: renders the pushed RAM image as text on stdout
///
/// Rows are physical rows, so the text shows up rotated the way the panel
/// is mounted.
struct PreviewTransport {
    width: u16,
    ram: Vec<u8>,
}

impl PanelTransport for PreviewTransport {
    type Error = core::convert::Infallible;

    fn init(&mut self) -> Result<(), Self::Error> {
        log::info!("Preview transport ready, {} pixels wide", self.width);
        Ok(())
    }

    fn push(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
        self.ram = buffer.to_vec();
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), Self::Error> {
        let row_bytes = usize::from(self.width.div_ceil(8));
        for row in self.ram.chunks(row_bytes) {
            let line: String = (0..usize::from(self.width))
                .map(|x| {
                    // cleared bit = black
                    if row[x / 8] & (0x80 >> (x % 8)) == 0 {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            println!("{}", line.trim_end_matches('.'));
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(log::LevelFilter::Info))
        .map_err(|e| anyhow::anyhow!("Could not install logger: {}", e))?;

    log::info!("Initializing {}x{} EPD framebuffer...", WIDTH, HEIGHT);

    let mut memory = vec![0u8; buffer_len(WIDTH, HEIGHT)];
    let mut frame = FrameBuffer::configure(
        &mut memory,
        WIDTH,
        HEIGHT,
        Rotation::Rotate180,
        Color::Black,
    )
    .context("Could not configure framebuffer")?;
    frame.clear(WHITE);

    // Vendor glyph tables are not bundled, pack embedded-graphics fonts instead
    let small = OwnedFontTable::from_mono_font(FontSize::Size8, &FONT_5X8)
        .context("Could not pack 8pt font")?;
    let large = OwnedFontTable::from_mono_font(FontSize::Size24, &FONT_10X20)
        .context("Could not pack 24pt font")?;
    let fonts = FontSet::new()
        .with(small.as_table())
        .with(large.as_table());

    frame
        .draw_string(&fonts, 0, 30, "Hello World!", FontSize::Size24, Color::Black)
        .context("Could not draw greeting")?;
    frame
        .draw_string(&fonts, 0, 60, "epd-graphics", FontSize::Size8, Color::Black)
        .context("Could not draw label")?;

    let mut panel = PreviewTransport {
        width: WIDTH,
        ram: Vec::new(),
    };
    panel
        .init()
        .map_err(|e| anyhow::anyhow!("Panel init failed: {:?}", e))?;
    panel
        .display_frame(&frame)
        .map_err(|e| anyhow::anyhow!("Failed to write and update buffer: {:?}", e))?;

    log::info!("Framebuffer displayed");
    Ok(())
}
