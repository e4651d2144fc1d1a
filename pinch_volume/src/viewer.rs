//! Display surfaces.
//!
//! [`Viewer`] is a `minifb` window that shows each frame and, in simulation
//! mode, turns pointer and key input into [`SimInput`] events for the
//! simulated hand detector.

use std::sync::mpsc::Sender;
use std::time::Duration;

use hand_landmarks::SimInput;
use log::info;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::error::{AppError, Result};
use crate::frame::Frame;

pub const WINDOW_TITLE: &str = "Hand Detection";

/// Pinch change per `Up`/`Down` repeat or scroll notch, in pixels.
const WIDEN_STEP: i32 = 5;

/// Shows frames and reports whether the user asked to stop.
pub trait Surface {
    fn show(&mut self, frame: &Frame) -> Result<()>;

    /// True once the quit key was pressed or the window closed.
    fn quit_requested(&self) -> bool;
}

pub struct Viewer {
    window:  Window,
    sim_tx:  Option<Sender<SimInput>>,
    pointer: bool,
    quit:    bool,
}

impl Viewer {
    /// Open a window of `width × height`.  With `sim_tx`, pointer and
    /// `Up`/`Down` input is forwarded to the simulated hand.
    pub fn new(width: usize, height: usize, sim_tx: Option<Sender<SimInput>>) -> Result<Self> {
        let mut window = Window::new(
            WINDOW_TITLE,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps
        info!("opened {}×{} window '{}'", width, height, WINDOW_TITLE);

        Ok(Viewer { window, sim_tx, pointer: false, quit: false })
    }

    fn poll_input(&mut self) {
        if !self.window.is_open() || self.window.is_key_pressed(Key::X, KeyRepeat::No) {
            self.quit = true;
            return;
        }

        let Some(tx) = &self.sim_tx else { return };

        match self.window.get_mouse_pos(MouseMode::Discard) {
            Some((x, y)) => {
                let _ = tx.send(SimInput::PointerMoved { x, y });
                self.pointer = true;
            }
            None if self.pointer => {
                let _ = tx.send(SimInput::PointerLeft);
                self.pointer = false;
            }
            None => {}
        }

        let mut widen = 0;
        if self.window.is_key_pressed(Key::Up, KeyRepeat::Yes)   { widen += WIDEN_STEP; }
        if self.window.is_key_pressed(Key::Down, KeyRepeat::Yes) { widen -= WIDEN_STEP; }
        if let Some((_, dy)) = self.window.get_scroll_wheel() {
            widen += (dy.signum() as i32) * WIDEN_STEP;
        }
        if widen != 0 {
            let _ = tx.send(SimInput::Widen(widen));
        }
    }
}

impl Surface for Viewer {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.window
            .update_with_buffer(frame.pixels(), frame.width(), frame.height())
            .map_err(|e| AppError::Window(e.to_string()))?;
        self.poll_input();
        Ok(())
    }

    fn quit_requested(&self) -> bool { self.quit }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        info!("window closed");
    }
}
