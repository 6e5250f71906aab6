//! Full-screen image preview: open/closed state machine with zoom, pan and drag.
//!
//! Geometry is in zero-based pane cells (`line`, `col`), matching the
//! coordinates Zellij reports for mouse events.

use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;

/// Scale factors for one zoom key press.
pub const ZOOM_IN: f64 = 1.2;
pub const ZOOM_OUT: f64 = 0.8;

/// Scale factors for one wheel notch.
pub const WHEEL_IN: f64 = 1.1;
pub const WHEEL_OUT: f64 = 0.9;

/// Cells moved by one pan key press, horizontally and vertically.
pub const PAN_STEP: (isize, isize) = (4, 2);

/// Cell offset of the image from the centered position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

/// On-screen area of the previewed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: isize,
    pub y: isize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, line: isize, col: isize) -> bool {
        col >= self.x
            && col < self.x + self.width as isize
            && line >= self.y
            && line < self.y + self.height as isize
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ImagePreview {
    #[default]
    Closed,
    Open {
        url: String,
        title: String,
        offset: Offset,
        scale: f64,
        /// Pointer position relative to `offset` while a drag is in progress.
        drag_anchor: Option<Offset>,
    },
}

impl ImagePreview {
    #[must_use]
    pub fn open(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Open {
            url: url.into(),
            title: title.into(),
            offset: Offset::default(),
            scale: 1.0,
            drag_anchor: None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    #[must_use]
    pub const fn scale(&self) -> Option<f64> {
        match self {
            Self::Open { scale, .. } => Some(*scale),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> Option<Offset> {
        match self {
            Self::Open { offset, .. } => Some(*offset),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Open { drag_anchor: Some(_), .. })
    }

    /// Multiplies the scale by `factor`, clamped to [`MIN_SCALE`]..=[`MAX_SCALE`].
    pub fn zoom(&mut self, factor: f64) {
        if let Self::Open { scale, .. } = self {
            *scale = (*scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// Wheel zoom: scrolling up enlarges, down shrinks.
    pub fn wheel(&mut self, up: bool) {
        self.zoom(if up { WHEEL_IN } else { WHEEL_OUT });
    }

    /// Rounded percentage, present only when the scale differs from 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale_percent(&self) -> Option<i64> {
        let scale = self.scale()?;
        let percent = (scale * 100.0).round() as i64;
        (percent != 100).then_some(percent)
    }

    pub fn pan(&mut self, dx: isize, dy: isize) {
        if let Self::Open { offset, .. } = self {
            offset.x += dx;
            offset.y += dy;
        }
    }

    /// Restores scale 1 and the centered position.
    pub fn reset(&mut self) {
        if let Self::Open { offset, scale, drag_anchor, .. } = self {
            *offset = Offset::default();
            *scale = 1.0;
            *drag_anchor = None;
        }
    }

    pub fn drag_start(&mut self, line: isize, col: isize) {
        if let Self::Open { offset, drag_anchor, .. } = self {
            *drag_anchor = Some(Offset { x: col - offset.x, y: line - offset.y });
        }
    }

    /// Moves the image with the pointer. Ignored unless a drag is active.
    pub fn drag_move(&mut self, line: isize, col: isize) {
        if let Self::Open { offset, drag_anchor: Some(anchor), .. } = self {
            *offset = Offset { x: col - anchor.x, y: line - anchor.y };
        }
    }

    pub fn drag_end(&mut self) {
        if let Self::Open { drag_anchor, .. } = self {
            *drag_anchor = None;
        }
    }

    /// Image area within a `rows` x `cols` pane, or `None` when closed.
    #[must_use]
    pub fn image_rect(&self, rows: usize, cols: usize) -> Option<Rect> {
        let Self::Open { offset, scale, .. } = self else {
            return None;
        };
        Some(image_rect(rows, cols, *scale, *offset))
    }
}

/// At scale 1 the image box covers half of each pane dimension.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn image_rect(rows: usize, cols: usize, scale: f64, offset: Offset) -> Rect {
    let width = ((cols as f64 * 0.5 * scale).round() as usize).max(4);
    let height = ((rows as f64 * 0.5 * scale).round() as usize).max(2);
    Rect {
        x: (cols as isize - width as isize) / 2 + offset.x,
        y: (rows as isize - height as isize) / 2 + offset.y,
        width,
        height,
    }
}
