//! ARGB frame buffer plus the clipped drawing primitives the overlays use.

use hand_landmarks::ImageView;

/// One camera frame as packed `0xAARRGGBB` pixels, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Frame { width, height, pixels: vec![fill; width * height] }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            pixels: &self.pixels,
            width:  self.width as u32,
            height: self.height as u32,
        }
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Set one pixel; anything off-frame (including negative) is ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in y0..y1 {
            let start = row as usize * self.width;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(color);
        }
    }

    /// Bresenham line, `thickness` pixels square brush.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), thickness: i32, color: u32) {
        let (mut x, mut y) = from;
        let dx =  (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let half = thickness / 2;

        loop {
            self.fill_rect(x - half, y - half, thickness.max(1), thickness.max(1), color);
            if x == to.0 && y == to.1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_frame_pixels_are_ignored() {
        let mut f = Frame::new(4, 4, 0);
        f.set_pixel(-1, 0, 1);
        f.set_pixel(0, -1, 1);
        f.set_pixel(4, 0, 1);
        f.set_pixel(0, 4, 1);
        assert!(f.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn fill_rect_clips_to_frame() {
        let mut f = Frame::new(4, 4, 0);
        f.fill_rect(2, 2, 10, 10, 7);
        assert_eq!(f.pixels().iter().filter(|&&p| p == 7).count(), 4);
        assert_eq!(f.pixel(3, 3), Some(7));
        assert_eq!(f.pixel(1, 1), Some(0));
    }

    #[test]
    fn fill_rect_entirely_off_frame_is_noop() {
        let mut f = Frame::new(4, 4, 0);
        f.fill_rect(-20, -20, 5, 5, 7);
        f.fill_rect(10, 10, 5, 5, 7);
        f.fill_rect(10, 0, 5, 5, 7);
        assert!(f.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut f = Frame::new(10, 10, 0);
        f.draw_line((1, 1), (8, 5), 1, 9);
        assert_eq!(f.pixel(1, 1), Some(9));
        assert_eq!(f.pixel(8, 5), Some(9));
    }

    #[test]
    fn line_leaving_frame_does_not_panic() {
        let mut f = Frame::new(10, 10, 0);
        f.draw_line((-50, -50), (60, 60), 3, 9);
        assert_eq!(f.pixel(5, 5), Some(9));
    }

    #[test]
    fn view_reports_dimensions() {
        let f = Frame::new(6, 3, 0);
        let v = f.view();
        assert_eq!((v.width, v.height, v.pixels.len()), (6, 3, 18));
    }
}
