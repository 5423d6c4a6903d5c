//! Drop-target types shared by the strategies.
//!
//! While a component is dragged over a container, the container's strategy
//! keeps one `DropLocation`: where the component would land and the
//! indicator to draw. It is set by drag-enter/continue, cleared by
//! drag-leave and drop, and never survives into layout results.

use crate::primitives::{Point, Rect};

/// Where a dropped component would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Insertion slot among the visible children of a linear stack,
    /// `0..=N` for `N` children.
    Insert { index: usize },
    /// Grid cell.
    Cell { row: usize, column: usize },
    /// Explicit offset inside a free-form container.
    At(Point),
}

/// Indicator geometry, relative to the container's content origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIndicator {
    /// Thin insertion line between children.
    Divider(Rect),
    /// Highlighted grid cell.
    Cell(Rect),
    /// Outline of the component at its would-be position.
    Outline(Rect),
}

impl DropIndicator {
    pub fn rect(&self) -> Rect {
        match *self {
            DropIndicator::Divider(r) | DropIndicator::Cell(r) | DropIndicator::Outline(r) => r,
        }
    }
}

/// A resolved drop target plus its indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropLocation {
    pub target: DropTarget,
    pub indicator: DropIndicator,
}
