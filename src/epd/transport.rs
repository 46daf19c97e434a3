//! Seam to the panel hardware

use core::fmt::Debug;

use crate::epd::buffer::FrameBuffer;

/// Moves a finished framebuffer onto the panel
///
/// The framebuffer never talks to hardware itself. A transport owns the bus,
/// the control pins and the refresh protocol of one controller.
pub trait PanelTransport {
    /// Bus or pin error
    type Error: Debug;

    /// Reset and configure the controller
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Write an image in panel memory layout into the controller RAM
    fn push(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;

    /// Refresh the panel from the controller RAM, blocks until done
    fn refresh(&mut self) -> Result<(), Self::Error>;

    /// Push the framebuffer and refresh
    fn display_frame(&mut self, frame: &FrameBuffer<'_>) -> Result<(), Self::Error> {
        self.push(frame.buffer())?;
        self.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epd::{buffer_len, Color, Rotation, HEIGHT, WHITE, WIDTH};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        pushed: Vec<u8>,
    }

    impl PanelTransport for Recorder {
        type Error = core::convert::Infallible;

        fn init(&mut self) -> Result<(), Self::Error> {
            self.calls.push("init");
            Ok(())
        }

        fn push(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
            self.calls.push("push");
            self.pushed = buffer.to_vec();
            Ok(())
        }

        fn refresh(&mut self) -> Result<(), Self::Error> {
            self.calls.push("refresh");
            Ok(())
        }
    }

    #[test]
    fn display_frame_pushes_the_image_then_refreshes() {
        let mut mem = vec![0u8; buffer_len(WIDTH, HEIGHT) + 8];
        let mut fb =
            FrameBuffer::configure(&mut mem, WIDTH, HEIGHT, Rotation::Rotate180, Color::White)
                .unwrap();
        fb.clear(WHITE);

        let mut transport = Recorder::default();
        transport.display_frame(&fb).unwrap();
        assert_eq!(transport.calls, ["push", "refresh"]);
        assert_eq!(transport.pushed.len(), buffer_len(WIDTH, HEIGHT));
        assert!(transport.pushed.iter().all(|&b| b == WHITE));
    }
}
