//! Scroll offset → window math for uniform-height rows.

/// Geometry derived for one windowing pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowLayout {
    /// `floor(scroll_offset / row_height)`.
    pub first_visible: usize,
    /// Offset of the first pooled row: `first_visible * row_height`.
    pub leading_padding: f32,
    /// Part of the first row scrolled out of view.
    pub remainder: f32,
    /// `count * row_height`.
    pub content_height: f32,
    /// Pool length: `min(floor(height / row_height) + overscan, count)`.
    pub pool_len: usize,
}

/// Viewport geometry and scroll state of a list.
///
/// Dimensions start out as `NaN` and every derived query returns `None` until the host
/// reports a real layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    scroll_offset: f32,
    row_height: f32,
    pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: f32::NAN,
            height: f32::NAN,
            scroll_offset: 0.0,
            row_height: 20.0,
            pixel_ratio: 1.0,
        }
    }
}

/// Rounds a row height to whole device pixels, never below one device pixel.
///
/// Returns `None` for non-positive or non-finite inputs.
pub fn snap_row_height(row_height: f32, pixel_ratio: f32) -> Option<f32> {
    if !(row_height.is_finite() && row_height > 0.0) {
        return None;
    }
    if !(pixel_ratio.is_finite() && pixel_ratio > 0.0) {
        return None;
    }
    let device = (row_height * pixel_ratio).round().max(1.0);
    Some(device / pixel_ratio)
}

impl Viewport {
    pub(crate) fn new(row_height: f32, pixel_ratio: f32) -> Self {
        Self {
            row_height,
            pixel_ratio,
            ..Self::default()
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// The configured (unsnapped) row height.
    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Row height after snapping to device pixels. This is the value all position math uses.
    pub fn effective_row_height(&self) -> Option<f32> {
        snap_row_height(self.row_height, self.pixel_ratio)
    }

    /// Whether a layout pass has delivered usable dimensions.
    pub fn has_geometry(&self) -> bool {
        self.height.is_finite() && self.height >= 0.0 && self.effective_row_height().is_some()
    }

    pub(crate) fn set_row_height(&mut self, row_height: f32) {
        self.row_height = row_height;
    }

    pub(crate) fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.pixel_ratio = pixel_ratio;
    }

    pub(crate) fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Stores `offset` clamped to `[0, max_scroll_offset(count)]`.
    ///
    /// Non-finite offsets are ignored. Without geometry the offset is kept as-is (floored at
    /// zero) and clamped once a layout arrives.
    pub(crate) fn set_scroll_offset(&mut self, offset: f32, count: usize) {
        if !offset.is_finite() {
            return;
        }
        self.scroll_offset = match self.max_scroll_offset(count) {
            Some(max) => offset.clamp(0.0, max),
            None => offset.max(0.0),
        };
    }

    pub(crate) fn reclamp(&mut self, count: usize) {
        self.set_scroll_offset(self.scroll_offset, count);
    }

    /// Number of whole rows that fit in the viewport (no overscan).
    pub fn rows_per_page(&self) -> Option<usize> {
        if !self.has_geometry() {
            return None;
        }
        let row = self.effective_row_height()?;
        Some((self.height / row).floor() as usize)
    }

    /// Pool capacity before clamping to the item count.
    pub fn capacity(&self, overscan: usize) -> Option<usize> {
        let rows = self.rows_per_page()?;
        if rows == 0 && self.height <= 0.0 {
            return Some(0);
        }
        Some(rows.saturating_add(overscan))
    }

    pub fn content_height(&self, count: usize) -> Option<f32> {
        let row = self.effective_row_height()?;
        Some(count as f32 * row)
    }

    pub fn max_scroll_offset(&self, count: usize) -> Option<f32> {
        if !self.has_geometry() {
            return None;
        }
        let content = self.content_height(count)?;
        Some((content - self.height).max(0.0))
    }

    /// Computes the window for the current scroll offset.
    ///
    /// Returns `None` while geometry is unavailable.
    pub fn layout(&self, count: usize, overscan: usize) -> Option<WindowLayout> {
        let row = self.effective_row_height()?;
        let capacity = self.capacity(overscan)?;
        let content_height = count as f32 * row;
        let max = (content_height - self.height).max(0.0);
        let offset = self.scroll_offset.clamp(0.0, max);

        let pool_len = capacity.min(count);
        let mut first_visible = (offset / row).floor() as usize;
        if count == 0 {
            first_visible = 0;
        } else {
            first_visible = first_visible.min(count - 1);
        }
        let leading_padding = first_visible as f32 * row;

        Some(WindowLayout {
            first_visible,
            leading_padding,
            remainder: offset - leading_padding,
            content_height,
            pool_len,
        })
    }

    /// Offset that brings `index` into view with the given alignment.
    pub fn offset_for_index(
        &self,
        index: usize,
        count: usize,
        align: crate::Align,
    ) -> Option<f32> {
        let row = self.effective_row_height()?;
        let max = self.max_scroll_offset(count)?;
        let top = index as f32 * row;
        let bottom = top + row;
        let view = self.height;

        let target = match align {
            crate::Align::Start => top,
            crate::Align::End => bottom - view,
            crate::Align::Center => top + row / 2.0 - view / 2.0,
            crate::Align::Auto => {
                let cur = self.scroll_offset;
                if top >= cur && bottom <= cur + view {
                    cur
                } else if top < cur {
                    top
                } else {
                    bottom - view
                }
            }
        };
        Some(target.clamp(0.0, max))
    }
}
