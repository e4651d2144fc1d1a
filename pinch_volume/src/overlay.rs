//! Feedback drawn onto the camera frame: hand skeleton and the readout.

use hand_landmarks::topology::HAND_CONNECTIONS;
use hand_landmarks::LandmarkSet;
use volume_map::VolumeLevel;

use crate::frame::Frame;

pub const TEXT_COLOR:     u32 = 0xFF0000FF;  // blue
pub const LANDMARK_COLOR: u32 = 0xFFFF0000;  // red
pub const BONE_COLOR:     u32 = 0xFFE0E0E0;

/// Glyph scale for the readout; 5 rows × 4 ≈ 20 px tall.
pub const TEXT_SCALE: i32 = 4;

const LANDMARK_RADIUS: i32 = 4;
const BONE_THICKNESS:  i32 = 2;

/// Write `Distance: <px>` and `Volume: <percent>` at their fixed positions.
pub fn draw_readout(frame: &mut Frame, distance: f64, volume: VolumeLevel) {
    draw_text(frame, &format!("Distance: {}", distance as i64), 10, 50, TEXT_SCALE, TEXT_COLOR);
    draw_text(frame, &format!("Volume: {}", volume.whole()), 10, 100, TEXT_SCALE, TEXT_COLOR);
}

/// Draw every bone in the hand topology, then a dot on each landmark.
///
/// Bones whose endpoints are missing from the set are skipped.
pub fn draw_hand(frame: &mut Frame, hand: &LandmarkSet) {
    for &(a, b) in HAND_CONNECTIONS.iter() {
        if let (Some(p), Some(q)) = (hand.get(a), hand.get(b)) {
            frame.draw_line(p.point(), q.point(), BONE_THICKNESS, BONE_COLOR);
        }
    }
    for lm in hand {
        frame.fill_circle(lm.x, lm.y, LANDMARK_RADIUS, LANDMARK_COLOR);
    }
}

/// Render `text` with its baseline at `y`, the way OpenCV anchors `putText`.
pub fn draw_text(frame: &mut Frame, text: &str, x: i32, y: i32, scale: i32, color: u32) {
    let top = y - 5 * scale;
    let mut cx = x;
    for ch in text.chars() {
        let glyph = char_glyph(ch);
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..3 {
                if bits & (1 << (2 - col)) != 0 {
                    frame.fill_rect(cx + col * scale, top + row as i32 * scale, scale, scale, color);
                }
            }
        }
        cx += 4 * scale;
        if cx >= frame.width() as i32 { break; }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_landmarks::sim::synthetic_hand;
    use hand_landmarks::Landmark;

    const BG: u32 = 0xFF000000;

    fn count(frame: &Frame, color: u32) -> usize {
        frame.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn readout_sits_above_its_baselines() {
        let mut f = Frame::new(640, 480, BG);
        draw_readout(&mut f, 165.7, VolumeLevel::new(50.4));
        assert!(count(&f, TEXT_COLOR) > 0);
        for y in 100..480 {
            for x in 0..640 {
                assert_ne!(f.pixel(x, y), Some(TEXT_COLOR), "ink below baseline at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn space_draws_nothing() {
        let mut f = Frame::new(64, 64, BG);
        draw_text(&mut f, "   ", 0, 30, 2, TEXT_COLOR);
        assert_eq!(count(&f, TEXT_COLOR), 0);
    }

    #[test]
    fn glyph_ink_scales_quadratically() {
        let mut small = Frame::new(64, 64, BG);
        let mut big   = Frame::new(64, 64, BG);
        draw_text(&mut small, "8", 0, 20, 1, TEXT_COLOR);
        draw_text(&mut big,   "8", 0, 40, 3, TEXT_COLOR);
        assert_eq!(count(&big, TEXT_COLOR), 9 * count(&small, TEXT_COLOR));
    }

    #[test]
    fn text_near_edges_is_clipped() {
        let mut f = Frame::new(20, 20, BG);
        draw_text(&mut f, "Volume: 100", -8, 3, 4, TEXT_COLOR);
        draw_text(&mut f, "Volume: 100", 15, 40, 4, TEXT_COLOR);
    }

    #[test]
    fn hand_marks_every_landmark() {
        let mut f = Frame::new(640, 480, BG);
        let hand = synthetic_hand(320, 200, 120);
        draw_hand(&mut f, &hand);
        for lm in &hand {
            assert_eq!(f.pixel(lm.x as usize, lm.y as usize), Some(LANDMARK_COLOR));
        }
        assert!(count(&f, BONE_COLOR) > 0);
    }

    #[test]
    fn partial_hand_draws_what_it_can() {
        let mut f = Frame::new(100, 100, BG);
        let hand = LandmarkSet::new(
            vec![Landmark::new(0, 10, 10), Landmark::new(1, 90, 90)],
            1.0,
        );
        draw_hand(&mut f, &hand);
        assert_eq!(f.pixel(50, 50), Some(BONE_COLOR));
    }

    #[test]
    fn hand_off_frame_does_not_panic() {
        let mut f = Frame::new(50, 50, BG);
        draw_hand(&mut f, &synthetic_hand(-300, 900, 200));
    }
}
