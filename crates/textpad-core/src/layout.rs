//! Window layout
//!
//! Headless layout of the four UI elements, in terminal cells. Every element sits at a fixed
//! offset from the window edges, so a resize only needs [`FormLayout::compute`] with the new
//! size:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ text box                             │
//! │                                      │
//! └──────────────────────────────────────┘
//!                      Characters: 1234        <- count row (2 rows from the bottom)
//!  Ctrl+Shift+U upper  Ctrl+Z undo ...         <- hint bar (last row)
//! ```

/// Rows reserved below the text box (count row + hint bar).
pub const RESERVED_BOTTOM_ROWS: u16 = 2;
/// Distance of the count row from the bottom edge.
pub const COUNT_ROW_FROM_BOTTOM: u16 = 2;
/// Distance of the count value from the right edge; also its width.
pub const COUNT_VALUE_FROM_RIGHT: u16 = 10;
/// Width of the caption, which sits directly left of the count value.
pub const COUNT_CAPTION_WIDTH: u16 = 12;

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left column
    pub x: u16,
    /// Top row
    pub y: u16,
    /// Width in cells
    pub width: u16,
    /// Height in rows
    pub height: u16,
}

impl Rect {
    /// Create a rectangle.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The area inside a one-cell border.
    pub fn inner(&self) -> Rect {
        Rect {
            x: self.x.saturating_add(1),
            y: self.y.saturating_add(1),
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }
}

/// Placement of the four UI elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormLayout {
    /// The bordered text box.
    pub text_box: Rect,
    /// "Characters:" caption.
    pub count_caption: Rect,
    /// The count itself.
    pub count_value: Rect,
    /// Shortcut hints.
    pub hint_bar: Rect,
}

impl FormLayout {
    /// Lay out a `width` x `height` window.
    ///
    /// Sizes saturate at zero, so tiny windows produce empty rectangles instead of panicking.
    pub fn compute(width: u16, height: u16) -> Self {
        let count_row = height.saturating_sub(COUNT_ROW_FROM_BOTTOM);
        let count_row_height = u16::from(height >= COUNT_ROW_FROM_BOTTOM);

        let value_x = width.saturating_sub(COUNT_VALUE_FROM_RIGHT);
        let count_value = Rect::new(value_x, count_row, width - value_x, count_row_height);

        let caption_x = value_x.saturating_sub(COUNT_CAPTION_WIDTH);
        let count_caption = Rect::new(caption_x, count_row, value_x - caption_x, count_row_height);

        let text_box = Rect::new(0, 0, width, height.saturating_sub(RESERVED_BOTTOM_ROWS));
        let hint_bar = Rect::new(
            0,
            height.saturating_sub(1),
            width,
            u16::from(height >= 1),
        );

        Self {
            text_box,
            count_caption,
            count_value,
            hint_bar,
        }
    }
}

/// Scroll offsets of the text box viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// First visible line.
    pub top: usize,
    /// First visible cell column.
    pub left: usize,
}

impl ScrollState {
    /// Scroll as little as possible so the cell at (`line`, `x`) is inside a `width` x
    /// `height` viewport. Returns whether the offsets changed.
    pub fn ensure_visible(&mut self, line: usize, x: usize, width: usize, height: usize) -> bool {
        let before = *self;

        if height > 0 {
            if line < self.top {
                self.top = line;
            } else if line >= self.top + height {
                self.top = line + 1 - height;
            }
        }

        if width > 0 {
            if x < self.left {
                self.left = x;
            } else if x >= self.left + width {
                self.left = x + 1 - width;
            }
        }

        *self != before
    }
}
