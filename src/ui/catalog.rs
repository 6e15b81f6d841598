// Boot-time catalog listing: one block per group, five names each,
// laid out in columns. Groups that do not fit are summarised in the
// footer line.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X13, FONT_6X13_BOLD, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::Text,
};
use gallery_core::catalog::stem;

use crate::drivers::ssd1677::{HEIGHT, WIDTH};

const MARGIN: i32 = 12;
const HEADER_H: i32 = 40;
const FOOTER_H: i32 = 24;
const COLUMN_W: i32 = 156;
const ROW_PITCH: i32 = 15;
const BLOCK_GAP: i32 = 8;

pub struct CatalogScreen<'a, T> {
    images: &'a [T],
    group_size: usize,
}

impl<'a, T: AsRef<str>> CatalogScreen<'a, T> {
    pub fn new(images: &'a [T], group_size: usize) -> Self {
        Self {
            images,
            group_size: group_size.max(1),
        }
    }

    fn group_count(&self) -> usize {
        self.images.len() / self.group_size
    }

    fn columns() -> usize {
        ((WIDTH as i32 - 2 * MARGIN) / COLUMN_W) as usize
    }

    fn block_h(&self) -> i32 {
        (self.group_size as i32 + 1) * ROW_PITCH + BLOCK_GAP
    }

    fn rows(&self) -> usize {
        ((HEIGHT as i32 - HEADER_H - FOOTER_H) / self.block_h()).max(1) as usize
    }

    pub fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let title = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let heading = MonoTextStyle::new(&FONT_6X13_BOLD, BinaryColor::On);
        let body = MonoTextStyle::new(&FONT_6X13, BinaryColor::On);

        let mut line: heapless::String<96> = heapless::String::new();
        let _ = write!(
            line,
            "{} images in {} groups",
            self.images.len(),
            self.group_count()
        );
        Text::new(&line, Point::new(MARGIN, MARGIN + 16), title).draw(display)?;
        Line::new(
            Point::new(MARGIN, HEADER_H - 6),
            Point::new(WIDTH as i32 - MARGIN, HEADER_H - 6),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display)?;

        let capacity = Self::columns() * self.rows();
        let shown = self.group_count().min(capacity);

        for group in 0..shown {
            let col = (group / self.rows()) as i32;
            let row = (group % self.rows()) as i32;
            let x = MARGIN + col * COLUMN_W;
            let mut y = HEADER_H + row * self.block_h() + ROW_PITCH - 3;

            line.clear();
            let _ = write!(line, "Group {}", group + 1);
            Text::new(&line, Point::new(x, y), heading).draw(display)?;

            let first = group * self.group_size;
            for (i, image) in self.images[first..first + self.group_size].iter().enumerate() {
                y += ROW_PITCH;
                line.clear();
                let _ = write!(line, "{:3} {}", first + i + 1, stem(image.as_ref()));
                Text::new(&line, Point::new(x + 6, y), body).draw(display)?;
            }
        }

        line.clear();
        if shown < self.group_count() {
            let _ = write!(line, "... {} more groups. ", self.group_count() - shown);
        }
        let _ = write!(line, "Buttons A-E show an image of the current group.");
        Text::new(&line, Point::new(MARGIN, HEIGHT as i32 - 8), body).draw(display)?;

        Ok(())
    }
}
