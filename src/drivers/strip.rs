// Strip-based rendering buffer for e-paper.
// 4KB strip instead of a 48KB framebuffer; the panel is filled in
// horizontal bands of STRIP_ROWS rows. Drawing uses panel
// coordinates (landscape, origin top-left) and is clipped to the
// current band. Bit layout matches the SSD1677 RAM: 1 = white.

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    primitives::Rectangle,
};

use super::ssd1677::{HEIGHT, WIDTH};

pub const STRIP_ROWS: u16 = 40;
pub const BYTES_PER_ROW: usize = (WIDTH as usize) / 8;

pub const STRIP_BUF_SIZE: usize = BYTES_PER_ROW * STRIP_ROWS as usize; // 4000B
pub const STRIP_COUNT: u16 = HEIGHT / STRIP_ROWS; // 12 strips

pub struct StripBuffer {
    buf: [u8; STRIP_BUF_SIZE],
    top: u16,
}

impl StripBuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0xFF; STRIP_BUF_SIZE],
            top: 0,
        }
    }

    /// Select band `strip_idx` and clear it to white.
    pub fn begin_strip(&mut self, strip_idx: u16) {
        self.top = strip_idx * STRIP_ROWS;
        self.buf.fill(0xFF);
    }

    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// Panel rows covered by the current band, `top..bottom`.
    pub fn rows(&self) -> (u16, u16) {
        (self.top, self.top + STRIP_ROWS)
    }

    /// Copy a packed 1-bit bitmap (MSB first, set bit = `black` ink)
    /// with its top-left corner at (`gx`, `gy`), clipped to the band.
    #[allow(clippy::too_many_arguments)]
    pub fn blit_1bpp(
        &mut self,
        bitmap: &[u8],
        offset: usize,
        w: usize,
        h: usize,
        stride: usize,
        gx: i32,
        gy: i32,
        black: bool,
    ) {
        if w == 0 || h == 0 || offset + stride * h > bitmap.len() {
            return;
        }

        let top = self.top as i32;
        let bottom = top + STRIP_ROWS as i32;

        // bitmap rows that land inside this band
        let y0 = (top - gy).clamp(0, h as i32) as usize;
        let y1 = (bottom - gy).clamp(0, h as i32) as usize;
        // bitmap columns that land on the panel
        let x0 = (-gx).clamp(0, w as i32) as usize;
        let x1 = (WIDTH as i32 - gx).clamp(0, w as i32) as usize;
        if y0 >= y1 || x0 >= x1 {
            return;
        }

        for y in y0..y1 {
            let src = offset + y * stride;
            let dst = (gy + y as i32 - top) as usize * BYTES_PER_ROW;
            for x in x0..x1 {
                if bitmap[src + x / 8] & (0x80 >> (x & 7)) == 0 {
                    continue;
                }
                let px = (gx + x as i32) as usize;
                let mask = 0x80u8 >> (px & 7);
                if black {
                    self.buf[dst + px / 8] &= !mask;
                } else {
                    self.buf[dst + px / 8] |= mask;
                }
            }
        }
    }

    #[inline]
    fn set_pixel(&mut self, x: u16, y: u16, black: bool) {
        if x >= WIDTH || y < self.top || y >= self.top + STRIP_ROWS {
            return;
        }
        let idx = (x as usize / 8) + (y - self.top) as usize * BYTES_PER_ROW;
        let mask = 0x80u8 >> (x & 7);
        if black {
            self.buf[idx] &= !mask;
        } else {
            self.buf[idx] |= mask;
        }
    }

    // byte-aligned rect fill, clipped to the band
    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, black: bool) {
        let cy0 = y0.max(self.top);
        let cy1 = y1.min(self.top + STRIP_ROWS);
        let cx1 = x1.min(WIDTH);
        if x0 >= cx1 || cy0 >= cy1 {
            return;
        }

        let (x0, x1) = (x0 as usize, cx1 as usize);
        let first_byte = x0 / 8;
        let last_byte = (x1 - 1) / 8;
        let first_mask: u8 = 0xFF >> (x0 & 7);
        let last_mask: u8 = 0xFF << (7 - ((x1 - 1) & 7));

        let (fill, edge_op): (u8, fn(&mut u8, u8)) = if black {
            (0x00, |b, m| *b &= !m)
        } else {
            (0xFF, |b, m| *b |= m)
        };

        for y in cy0..cy1 {
            let row = (y - self.top) as usize * BYTES_PER_ROW;
            if first_byte == last_byte {
                edge_op(&mut self.buf[row + first_byte], first_mask & last_mask);
            } else {
                edge_op(&mut self.buf[row + first_byte], first_mask);
                self.buf[row + first_byte + 1..row + last_byte].fill(fill);
                edge_op(&mut self.buf[row + last_byte], last_mask);
            }
        }
    }
}

impl Default for StripBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for StripBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for StripBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 {
                continue;
            }
            self.set_pixel(coord.x as u16, coord.y as u16, color == BinaryColor::On);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clamp = |v: i32, max: u16| v.clamp(0, max as i32) as u16;
        let x0 = clamp(area.top_left.x, WIDTH);
        let y0 = clamp(area.top_left.y, HEIGHT);
        let x1 = clamp(area.top_left.x.saturating_add(area.size.width as i32), WIDTH);
        let y1 = clamp(area.top_left.y.saturating_add(area.size.height as i32), HEIGHT);
        self.fill_rect(x0, y0, x1, y1, color == BinaryColor::On);
        Ok(())
    }
}
