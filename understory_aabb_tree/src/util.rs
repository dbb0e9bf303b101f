// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between cell rectangles and Kurbo geometry.

use kurbo::Rect;

use crate::rect::CellRect;

impl CellRect {
    /// The smallest cell rectangle covering `rect`.
    ///
    /// Cell `(x, y)` spans `[x, x + 1) × [y, y + 1)` in Kurbo space. Coordinates
    /// outside the `i32` range saturate. A zero-area `rect` yields an empty result.
    pub fn covering(rect: Rect) -> Self {
        let r = rect.abs().expand();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Float to int `as` casts saturate, which is the intended clamping."
        )]
        let (x0, y0, x1, y1) = (r.x0 as i32, r.y0 as i32, r.x1 as i32, r.y1 as i32);
        Self::from_edges(x0, y0, x1.saturating_sub(1), y1.saturating_sub(1))
    }
}

impl From<CellRect> for Rect {
    fn from(r: CellRect) -> Self {
        if r.is_empty() {
            return Self::ZERO;
        }
        let x0 = f64::from(r.left);
        let y0 = f64::from(r.top);
        Self::new(x0, y0, x0 + f64::from(r.width), y0 + f64::from(r.height))
    }
}
