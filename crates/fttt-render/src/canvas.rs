#![forbid(unsafe_code)]

//! Character canvas.
//!
//! The `Canvas` is a fixed-size 2D grid of characters, the target the
//! renderer draws boards into. It is the plain-text analogue of a terminal
//! frame buffer.
//!
//! # Layout
//!
//! Characters are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `chars.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Writes outside the grid are dropped; nothing ever wraps to another row

use std::fmt;

use fttt_core::CellIndex;

/// Character every new canvas is filled with.
pub const DEFAULT_FILL: char = ' ';

/// A 2D grid of characters.
///
/// # Example
///
/// ```
/// use fttt_render::canvas::Canvas;
///
/// let mut canvas = Canvas::new(3, 2);
/// canvas.set((0, 0), 'H');
/// canvas.set(1, 'i');
/// canvas.set((5, 5), '!'); // clipped
/// assert_eq!(canvas.to_text(), "Hi \n   ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    chars: Vec<char>,
}

impl Canvas {
    /// Create a canvas of spaces.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        let Some(len) = width.checked_mul(height) else {
            panic!("canvas size {width}x{height} overflows usize");
        };
        Self {
            width,
            height,
            chars: vec![DEFAULT_FILL; len],
        }
    }

    /// Canvas width in characters.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in characters.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    fn index(&self, at: CellIndex) -> Option<usize> {
        at.resolve(self.width, self.height)
    }

    /// The character at a flat index or `(x, y)`.
    ///
    /// Returns `None` outside the grid.
    #[inline]
    pub fn get(&self, at: impl Into<CellIndex>) -> Option<char> {
        self.index(at.into()).map(|i| self.chars[i])
    }

    /// Write one character. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, at: impl Into<CellIndex>, ch: char) {
        if let Some(i) = self.index(at.into()) {
            self.chars[i] = ch;
        }
    }

    /// Write the first character of `value`'s textual form.
    ///
    /// Empty text writes nothing.
    pub fn set_display(&mut self, at: impl Into<CellIndex>, value: impl fmt::Display) {
        if let Some(ch) = value.to_string().chars().next() {
            self.set(at, ch);
        }
    }

    /// Reset every character to [`DEFAULT_FILL`].
    pub fn clear(&mut self) {
        self.chars.fill(DEFAULT_FILL);
    }

    /// Fill a rectangle with `ch`, clipped to the canvas.
    pub fn clear_rect(&mut self, x: usize, y: usize, width: usize, height: usize, ch: char) {
        let right = x.saturating_add(width).min(self.width);
        let bottom = y.saturating_add(height).min(self.height);
        for row in y..bottom {
            let start = row * self.width;
            if x < right {
                self.chars[start + x..start + right].fill(ch);
            }
        }
    }

    /// Draw `text` left to right starting at `(x, y)`.
    ///
    /// Stops at the right edge; there is no wrapping. Returns the number of
    /// characters written.
    pub fn draw_str(&mut self, x: usize, y: usize, text: &str) -> usize {
        if y >= self.height || x >= self.width {
            return 0;
        }
        let start = y * self.width + x;
        let row = &mut self.chars[start..start + (self.width - x)];
        let mut written = 0;
        for (slot, ch) in row.iter_mut().zip(text.chars()) {
            *slot = ch;
            written += 1;
        }
        written
    }

    /// Characters of row `y`.
    pub fn row(&self, y: usize) -> Option<&[char]> {
        (y < self.height).then(|| &self.chars[y * self.width..(y + 1) * self.width])
    }

    /// Every row as a `String`, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).filter_map(|y| self.row(y).map(|row| row.iter().collect()))
    }

    /// `height` lines of `width` characters joined by `\n`, no trailing
    /// newline.
    pub fn to_text(&self) -> String {
        let capacity = (self.width + 1) * self.height;
        let mut out = String::with_capacity(capacity);
        for (y, line) in self.lines().enumerate() {
            if y > 0 {
                out.push('\n');
            }
            out.push_str(&line);
        }
        out
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
