// Full-screen text message, e.g. boot errors.
// Lines are centred horizontally; the block is centred vertically
// inside a framed panel.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_10X20},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Text},
};

use crate::drivers::ssd1677::{HEIGHT, WIDTH};

const LINE_PITCH: i32 = 28;
const FRAME_INSET: i32 = 16;

pub struct MessageScreen<'a> {
    lines: &'a [&'a str],
}

impl<'a> MessageScreen<'a> {
    pub const fn new(lines: &'a [&'a str]) -> Self {
        Self { lines }
    }

    pub fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        Rectangle::new(
            Point::new(FRAME_INSET, FRAME_INSET),
            Size::new(
                (WIDTH as i32 - 2 * FRAME_INSET) as u32,
                (HEIGHT as i32 - 2 * FRAME_INSET) as u32,
            ),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 3))
        .draw(display)?;

        let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let block_h = self.lines.len() as i32 * LINE_PITCH;
        let mut y = (HEIGHT as i32 - block_h) / 2 + LINE_PITCH / 2;

        for line in self.lines {
            Text::with_alignment(line, Point::new(WIDTH as i32 / 2, y), style, Alignment::Center)
                .draw(display)?;
            y += LINE_PITCH;
        }
        Ok(())
    }
}
