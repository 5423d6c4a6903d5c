//! Per-component scratch record for one layout pass.

use crate::component::ComponentId;
use crate::primitives::{Point, Rect, Size};

use super::grid::GridTracks;
use super::hint::{Axis, Dimension};
use super::linear::LinearTracks;

/// Resolved geometry of one component during a pass.
///
/// Created when the gatherer first visits the component, mutated in place
/// while parents resolve fill-parent requests and place children, and
/// dropped when the pass finishes. Never outlives its pass.
#[derive(Debug, Clone)]
pub struct LayoutInfo {
    pub id: ComponentId,
    pub width: Dimension,
    pub height: Dimension,
    /// Content-derived size, always known after gathering.
    pub automatic: Size,
    /// Offset from the parent's content origin.
    pub position: Point,
    /// Hidden by the parent's placement rules for this pass.
    pub hidden: bool,
    /// Snapshot of the children that take part in this pass.
    pub visible_children: Vec<ComponentId>,
    /// Container-only geometry needed for drop-target resolution.
    pub record: LayoutRecord,
}

/// Geometry a container strategy keeps after placing its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LayoutRecord {
    #[default]
    None,
    Linear(LinearTracks),
    Grid(GridTracks),
}

impl LayoutInfo {
    pub fn new(id: ComponentId, visible_children: Vec<ComponentId>) -> Self {
        Self {
            id,
            width: Dimension::Px(0),
            height: Dimension::Px(0),
            automatic: Size::ZERO,
            position: Point::ORIGIN,
            hidden: false,
            visible_children,
            record: LayoutRecord::None,
        }
    }

    #[inline]
    pub fn dimension(&self, axis: Axis) -> Dimension {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    #[inline]
    pub fn set_dimension(&mut self, axis: Axis, value: Dimension) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }

    #[inline]
    pub fn automatic(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.automatic.width,
            Axis::Vertical => self.automatic.height,
        }
    }

    /// Resolved length on `axis`, substituting the automatic length for a
    /// fill-parent request that has not been distributed.
    #[inline]
    pub fn length_or_automatic(&self, axis: Axis) -> i32 {
        self.dimension(axis).or(self.automatic(axis))
    }

    #[inline]
    pub fn set_position(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Horizontal => self.position.x = value,
            Axis::Vertical => self.position.y = value,
        }
    }

    /// Resolved size, with any leftover fill-parent request replaced by the
    /// automatic size so no sentinel escapes the pass.
    pub fn size(&self) -> Size {
        Size::new(
            self.length_or_automatic(Axis::Horizontal),
            self.length_or_automatic(Axis::Vertical),
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// Release references into the component tree before the map is dropped.
    pub fn clean_up(&mut self) {
        self.visible_children.clear();
        self.visible_children.shrink_to_fit();
    }
}
