//! Owned CPU pixel buffer.
//!
//! Pixels are packed ARGB8888 `u32`s in row-major order, which is exactly
//! the layout the SDL streaming texture expects, so a frame can be uploaded
//! with [`FrameBuffer::as_bytes`] without conversion.

use std::path::Path;

use super::surface::{BresenhamLine, Surface};
use crate::colors;

pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    draw_color: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![colors::BACKGROUND; (width * height) as usize],
            width,
            height,
            draw_color: colors::WHITE,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = vec![colors::BACKGROUND; (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn draw_color(&self) -> u32 {
        self.draw_color
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Fills `x_start..=x_end` on row `y`, clipped to the buffer.
    #[inline]
    pub fn fill_scanline(&mut self, y: i32, x_start: i32, x_end: i32, color: u32) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x_start = x_start.max(0);
        let x_end = x_end.min(self.width as i32 - 1);
        if x_start > x_end {
            return;
        }
        let row = (y as u32 * self.width) as usize;
        self.pixels[row + x_start as usize..=row + x_end as usize].fill(color);
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and u8 has alignment 1; the slice covers
        // exactly the bytes owned by `pixels` and borrows it immutably.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }

    /// Writes the frame as an image; the format follows the file extension.
    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let img = image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let (r, g, b, a) = colors::unpack(self.pixels[(y * self.width + x) as usize]);
            image::Rgba([r, g, b, a])
        });
        img.save(path)
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_draw_color(&mut self, color: u32) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.pixels.fill(self.draw_color);
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.set_pixel(x, y, self.draw_color);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        if y0 == y1 {
            self.fill_scanline(y0, x0.min(x1), x0.max(x1), self.draw_color);
            return;
        }
        for (x, y) in BresenhamLine::new(x0, y0, x1, y1) {
            self.set_pixel(x, y, self.draw_color);
        }
    }

    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        for y in y1..y2 {
            self.fill_scanline(y, x1, x2 - 1, self.draw_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_pixel(-1, 0, colors::RED);
        fb.set_pixel(4, 0, colors::RED);
        fb.set_pixel(0, 3, colors::RED);
        assert!(fb.pixels().iter().all(|&p| p == colors::BACKGROUND));
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn scanline_is_clipped_and_inclusive() {
        let mut fb = FrameBuffer::new(5, 1);
        fb.fill_scanline(0, -3, 1, colors::GREEN);
        assert_eq!(fb.get_pixel(0, 0), Some(colors::GREEN));
        assert_eq!(fb.get_pixel(1, 0), Some(colors::GREEN));
        assert_eq!(fb.get_pixel(2, 0), Some(colors::BACKGROUND));

        fb.fill_scanline(0, 3, 99, colors::BLUE);
        assert_eq!(fb.get_pixel(4, 0), Some(colors::BLUE));
        fb.fill_scanline(0, 4, 2, colors::RED);
        assert!(!fb.pixels().contains(&colors::RED));
    }

    #[test]
    fn fill_rect_is_half_open() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set_draw_color(colors::RED);
        fb.fill_rect(1, 1, 3, 2);
        let red: Vec<(i32, i32)> = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get_pixel(x, y) == Some(colors::RED))
            .collect();
        assert_eq!(red, vec![(1, 1), (2, 1)]);
    }

    #[test]
    fn clear_uses_draw_color() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set_draw_color(colors::BLACK);
        fb.clear();
        assert!(fb.pixels().iter().all(|&p| p == colors::BLACK));
    }

    #[test]
    fn bytes_cover_every_pixel() {
        let fb = FrameBuffer::new(3, 2);
        assert_eq!(fb.as_bytes().len(), 3 * 2 * 4);
    }

    #[test]
    fn resize_reallocates() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(5, 7);
        assert_eq!((fb.width(), fb.height()), (5, 7));
        assert_eq!(fb.pixels().len(), 35);
    }
}
