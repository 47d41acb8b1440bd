//=========================================================================
// Canvas
//=========================================================================
//
// Draw targets over a tightly packed RGBA8 buffer, row-major with a
// top-left origin. This is the layout the window surface exposes, so
// the renderer can draw straight into it.
//
// `Scaled` magnifies anything drawn through it by an integer factor;
// the mono fonts are small and the overlay titles are not.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

//=== Canvas ==============================================================

/// Borrowed RGBA8 pixel buffer.
pub struct Canvas<'a> {
    buf: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// Wraps `buf`, which must hold at least `width * height * 4` bytes.
    /// Pixels beyond the end of a short buffer are ignored.
    pub fn new(buf: &'a mut [u8], width: u32, height: u32) -> Self {
        Self { buf, width, height }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb888) {
        let at = self.offset(x, y);
        if let Some(px) = self.buf.get_mut(at..at + 4) {
            px.copy_from_slice(&[color.r(), color.g(), color.b(), 0xff]);
        }
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                if x < self.width && y < self.height {
                    self.put(x, y, color);
                }
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        // Clipped to the canvas, so both corners are non-negative
        let (x0, y0) = (area.top_left.x as u32, area.top_left.y as u32);
        let (x1, y1) = (bottom_right.x as u32, bottom_right.y as u32);

        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, color);
            }
        }
        Ok(())
    }
}

//=== Scaled ==============================================================

/// Draws every pixel as a `scale`×`scale` block, with `(0, 0)` mapped to
/// `origin` on the inner target.
pub struct Scaled<'t, D> {
    inner: &'t mut D,
    origin: Point,
    scale: u32,
}

impl<'t, D> Scaled<'t, D>
where
    D: DrawTarget,
{
    pub fn new(inner: &'t mut D, origin: Point, scale: u32) -> Self {
        Self {
            inner,
            origin,
            scale: scale.max(1),
        }
    }
}

impl<D> Dimensions for Scaled<'_, D>
where
    D: DrawTarget,
{
    fn bounding_box(&self) -> Rectangle {
        let inner = self.inner.bounding_box();
        let scale = self.scale as i32;
        let top_left = Point::new(
            (inner.top_left.x - self.origin.x).div_euclid(scale),
            (inner.top_left.y - self.origin.y).div_euclid(scale),
        );
        Rectangle::new(top_left, inner.size / self.scale + Size::new(1, 1))
    }
}

impl<D> DrawTarget for Scaled<'_, D>
where
    D: DrawTarget,
{
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new(self.scale, self.scale);

        for Pixel(point, color) in pixels {
            let top_left = self.origin + point * self.scale as i32;
            self.inner.fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
