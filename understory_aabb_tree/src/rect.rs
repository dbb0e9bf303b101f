// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer cell rectangles.

/// Axis-aligned rectangle over discrete integer cells.
///
/// A rectangle covers the cells `left..=right` by `top..=bottom`, where
/// `right = left + width - 1` and `bottom = top + height - 1`. A 1×1 rectangle
/// therefore has `left == right`.
///
/// A rectangle with a zero (or negative) width or height is *empty*. Empty
/// rectangles never enter an [`AabbTree`](crate::AabbTree); they only show up
/// transiently as the result of [`CellRect::intersection`] or as a rejected
/// boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Leftmost covered column.
    pub left: i32,
    /// Topmost covered row.
    pub top: i32,
    /// Number of covered columns.
    pub width: i32,
    /// Number of covered rows.
    pub height: i32,
}

impl CellRect {
    /// The canonical empty rectangle.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its top-left cell and size.
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from inclusive edges.
    ///
    /// Inverted edges produce an empty rectangle.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        if right < left || bottom < top {
            return Self::EMPTY;
        }
        Self::new(
            left,
            top,
            extent(left, right).unwrap_or(i32::MAX),
            extent(top, bottom).unwrap_or(i32::MAX),
        )
    }

    /// A single cell.
    pub const fn cell(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Rightmost covered column, clamped to `i32::MAX`.
    #[inline]
    pub fn right(&self) -> i32 {
        last_cell(self.left, self.width)
    }

    /// Bottommost covered row, clamped to `i32::MAX`.
    #[inline]
    pub fn bottom(&self) -> i32 {
        last_cell(self.top, self.height)
    }

    /// Whether the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the rectangle is non-empty and every cell it covers has an
    /// `i32` coordinate.
    ///
    /// A rectangle such as `CellRect::new(i32::MAX, 0, 2, 1)` runs off the
    /// grid; [`AabbTree::add`](crate::AabbTree::add) rejects it.
    #[inline]
    pub fn is_addressable(&self) -> bool {
        !self.is_empty()
            && i64::from(self.left) + i64::from(self.width) - 1 <= i64::from(i32::MAX)
            && i64::from(self.top) + i64::from(self.height) - 1 <= i64::from(i32::MAX)
    }

    /// Number of covered cells, widened so it cannot overflow.
    #[inline]
    pub const fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    /// The smallest rectangle covering both `self` and `other`.
    ///
    /// An empty operand is ignored; the result is [`CellRect::EMPTY`] only if
    /// both are empty. The extent saturates at `i32::MAX` cells per axis, in
    /// which case the result no longer covers both operands; use
    /// [`CellRect::checked_union`] where that matters.
    pub fn union(&self, other: &Self) -> Self {
        self.checked_union(other).unwrap_or_else(|| {
            let left = self.left.min(other.left);
            let top = self.top.min(other.top);
            let right = self.right().max(other.right());
            let bottom = self.bottom().max(other.bottom());
            Self::new(
                left,
                top,
                extent(left, right).unwrap_or(i32::MAX),
                extent(top, bottom).unwrap_or(i32::MAX),
            )
        })
    }

    /// Like [`CellRect::union`], but `None` when the covering rectangle is
    /// wider or taller than `i32::MAX` cells.
    pub fn checked_union(&self, other: &Self) -> Option<Self> {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Some(Self::EMPTY),
            (true, false) => Some(*other),
            (false, true) => Some(*self),
            (false, false) => {
                let left = self.left.min(other.left);
                let top = self.top.min(other.top);
                let right = self.right().max(other.right());
                let bottom = self.bottom().max(other.bottom());
                Some(Self::new(
                    left,
                    top,
                    extent(left, right)?,
                    extent(top, bottom)?,
                ))
            }
        }
    }

    /// The overlapping region, or [`CellRect::EMPTY`] when there is none.
    pub fn intersection(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::EMPTY;
        }
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::from_edges(left, top, right, bottom)
    }

    /// Whether the two rectangles share at least one cell.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left <= other.right()
            && other.left <= self.right()
            && self.top <= other.bottom()
            && other.top <= self.bottom()
    }

    /// Whether every cell of `other` is also covered by `self`.
    ///
    /// Empty rectangles contain nothing and are contained by nothing.
    pub fn contains(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the cell at `(x, y)` is covered.
    pub fn contains_cell(&self, x: i32, y: i32) -> bool {
        !self.is_empty()
            && self.left <= x
            && x <= self.right()
            && self.top <= y
            && y <= self.bottom()
    }
}

/// Number of cells in the inclusive span `lo..=hi` (`lo <= hi`), if it fits in `i32`.
fn extent(lo: i32, hi: i32) -> Option<i32> {
    i32::try_from(i64::from(hi) - i64::from(lo) + 1).ok()
}

/// Last cell of a run of `len` cells starting at `start`.
fn last_cell(start: i32, len: i32) -> i32 {
    let last = i64::from(start) + i64::from(len) - 1;
    i32::try_from(last.clamp(i64::from(i32::MIN), i64::from(i32::MAX))).unwrap_or(i32::MAX)
}
