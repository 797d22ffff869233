use crate::geo::{Point, Rect};
use line_drawing::Bresenham;
use std::fmt;
use std::rc::Rc;

/// An RGBA image decoded from disk.
///
/// Images are immutable once loaded. Cloning is cheap; the pixel data is shared.
#[derive(Clone)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Rc<[u8]>,
}

/// SpriteRefs are rectangular views into an `Image`.
///
/// They reference their pixel data (instead of owning it), so slicing a sprite sheet never
/// copies.
#[derive(Clone, Debug)]
pub struct SpriteRef {
    image: Image,
    rect: Rect,
}

/// Drawables can be blitted to the pixel buffer.
pub trait Drawable {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// RGBA bytes for row `y`, exactly `width() * 4` long.
    fn row(&self, y: usize) -> &[u8];
}

impl Image {
    /// Wrap raw RGBA pixels.
    ///
    /// # Panics
    ///
    /// Panics when `pixels` is not `width * height * 4` bytes long.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Image {
        assert_eq!(pixels.len(), width * height * 4);

        Image {
            width,
            height,
            pixels: Rc::from(pixels),
        }
    }

    /// A single-color image, mostly useful for tests and placeholders.
    pub fn solid(width: usize, height: usize, color: [u8; 4]) -> Image {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(width * height * 4)
            .collect();

        Image::from_rgba(width, height, pixels)
    }

    /// The full bounds of the image.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(0, 0, self.width as i32, self.height as i32)
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// View the whole image as a sprite.
    pub fn sprite(&self) -> SpriteRef {
        SpriteRef {
            image: self.clone(),
            rect: self.bounds(),
        }
    }

    /// View a sub-region of the image as a sprite.
    ///
    /// The region is clipped to the image bounds. Returns `None` when nothing is left.
    pub fn sub_image(&self, rect: Rect) -> Option<SpriteRef> {
        let rect = rect.clip(&self.bounds())?;

        Some(SpriteRef {
            image: self.clone(),
            rect,
        })
    }
}

impl SpriteRef {
    /// The region of the source image this sprite shows.
    pub fn source(&self) -> Rect {
        self.rect
    }

    /// True when both sprites show the same region of the same image.
    pub fn same_as(&self, other: &SpriteRef) -> bool {
        Rc::ptr_eq(&self.image.pixels, &other.image.pixels) && self.rect == other.rect
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Drawable for Image {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * 4;
        &self.pixels[y * stride..(y + 1) * stride]
    }
}

impl Drawable for SpriteRef {
    fn width(&self) -> usize {
        self.rect.width() as usize
    }

    fn height(&self) -> usize {
        self.rect.height() as usize
    }

    fn row(&self, y: usize) -> &[u8] {
        let row = self.image.row(self.rect.p1.y as usize + y);
        &row[self.rect.p1.x as usize * 4..self.rect.p2.x as usize * 4]
    }
}

/// Blit a drawable to the pixel buffer.
///
/// `screen` is an RGBA buffer `screen_width` pixels wide. The sprite is clipped against the
/// buffer, so any destination is legal. Pixels are composited source-over.
pub fn blit<S>(screen: &mut [u8], screen_width: usize, dest: Point, sprite: &S)
where
    S: Drawable,
{
    let screen_height = screen.len() / 4 / screen_width;
    let bounds = Rect::from_size(0, 0, screen_width as i32, screen_height as i32);
    let area = Rect::from_size(dest.x, dest.y, sprite.width() as i32, sprite.height() as i32);
    let Some(visible) = area.clip(&bounds) else {
        return;
    };

    // Offsets into the sprite
    let sx = visible.p1.x.abs_diff(dest.x) as usize;
    let sy = visible.p1.y.abs_diff(dest.y) as usize;
    let width = visible.width() as usize * 4;

    for y in 0..visible.height() as usize {
        let i = (visible.p1.x as usize + (visible.p1.y as usize + y) * screen_width) * 4;
        let src = &sprite.row(sy + y)[sx * 4..sx * 4 + width];

        // Merge pixels from sprite into screen
        let zipped = screen[i..i + width]
            .chunks_exact_mut(4)
            .zip(src.chunks_exact(4));
        for (left, right) in zipped {
            blend(left, right);
        }
    }
}

/// Source-over compositing of one RGBA pixel.
fn blend(dst: &mut [u8], src: &[u8]) {
    let alpha = u32::from(src[3]);

    match alpha {
        0 => (),
        255 => dst.copy_from_slice(src),
        _ => {
            let inverse = 255 - alpha;
            for c in 0..3 {
                let value = u32::from(src[c]) * alpha + u32::from(dst[c]) * inverse;
                dst[c] = ((value + 127) / 255) as u8;
            }
            dst[3] = (alpha + (u32::from(dst[3]) * inverse + 127) / 255) as u8;
        }
    }
}

/// Fill the whole buffer with one color.
pub fn clear(screen: &mut [u8], color: [u8; 4]) {
    for pixel in screen.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
}

/// Draw a line to the pixel buffer using Bresenham's algorithm.
///
/// Points outside of the buffer are skipped.
pub fn line(screen: &mut [u8], screen_width: usize, p1: Point, p2: Point, color: [u8; 4]) {
    let screen_height = (screen.len() / 4 / screen_width) as i32;

    for (x, y) in Bresenham::new((p1.x, p1.y), (p2.x, p2.y)) {
        if x < 0 || y < 0 || x >= screen_width as i32 || y >= screen_height {
            continue;
        }

        let i = (x as usize + y as usize * screen_width) * 4;
        screen[i..i + 4].copy_from_slice(&color);
    }
}

/// Draw a rectangle outline to the pixel buffer.
pub fn rect(screen: &mut [u8], screen_width: usize, rect: &Rect, color: [u8; 4]) {
    if rect.is_empty() {
        return;
    }

    let p1 = rect.p1;
    let p2 = Point::new(rect.p2.x - 1, rect.p2.y - 1);
    let p3 = Point::new(p1.x, p2.y);
    let p4 = Point::new(p2.x, p1.y);

    line(screen, screen_width, p1, p3, color);
    line(screen, screen_width, p3, p2, color);
    line(screen, screen_width, p2, p4, color);
    line(screen, screen_width, p4, p1, color);
}
