//! Frame sources.

use log::info;

use crate::frame::Frame;

/// Supplies successive frames.  `None` means capture failed and the
/// application should stop.
pub trait FrameSource {
    fn read(&mut self) -> Option<Frame>;
}

/// Stand-in camera that renders a dim vertical gradient backdrop.
///
/// With a frame limit it "fails" after that many frames, which ends the run
/// the same way an unplugged camera does.
pub struct SyntheticCamera {
    backdrop: Frame,
    limit:    Option<u64>,
    served:   u64,
}

impl SyntheticCamera {
    pub fn new(width: usize, height: usize, limit: Option<u64>) -> Self {
        let mut backdrop = Frame::new(width, height, 0xFF000000);
        for y in 0..height {
            let shade = 0x18 + (0x30 * y / height.max(1)) as u32;
            let color = 0xFF000000 | (shade << 16) | (shade << 8) | (shade + 0x10);
            backdrop.fill_rect(0, y as i32, width as i32, 1, color);
        }
        SyntheticCamera { backdrop, limit, served: 0 }
    }

    pub fn frames_served(&self) -> u64 { self.served }
}

impl FrameSource for SyntheticCamera {
    fn read(&mut self) -> Option<Frame> {
        if self.limit.is_some_and(|n| self.served >= n) {
            return None;
        }
        self.served += 1;
        Some(self.backdrop.clone())
    }
}

impl Drop for SyntheticCamera {
    fn drop(&mut self) {
        info!("camera released after {} frames", self.served);
    }
}
