//! Linear stack - vertical or horizontal arrangement.
//!
//! Children flow along one axis in child-list order. Every child box is the
//! child's resolved length plus a fixed border allowance, and a fixed
//! spacing separates adjacent boxes and the boxes from the container edges.
//! Fill-parent children share whatever the other children leave over.

use crate::component::{props, ComponentId, ComponentTree};
use crate::error::LayoutError;
use crate::primitives::{Point, Rect, Size};

use super::context::LayoutPass;
use super::drop::{DropIndicator, DropLocation, DropTarget};
use super::hint::{Axis, Dimension};
use super::info::LayoutRecord;
use super::strategy::{layout_container, StrategyState};

/// Orientation code for a horizontal stack.
pub const ORIENTATION_HORIZONTAL: i32 = 0;
/// Orientation code for a vertical stack.
pub const ORIENTATION_VERTICAL: i32 = 1;

/// Placement of children along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Decode an `AlignHorizontal` value (1 left, 2 right, 3 center).
    pub fn from_horizontal_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Alignment::Start),
            2 => Some(Alignment::End),
            3 => Some(Alignment::Center),
            _ => None,
        }
    }

    /// Decode an `AlignVertical` value (1 top, 2 center, 3 bottom).
    pub fn from_vertical_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Alignment::Start),
            2 => Some(Alignment::Center),
            3 => Some(Alignment::End),
            _ => None,
        }
    }

    /// Offset of a box of `used` pixels inside `available` pixels.
    #[inline]
    fn offset(self, available: i32, used: i32) -> i32 {
        let free = available.saturating_sub(used).max(0);
        match self {
            Alignment::Start => 0,
            Alignment::Center => free / 2,
            Alignment::End => free,
        }
    }
}

/// Geometry kept after a pass for drop-target resolution.
///
/// Offsets are along the stacking axis, relative to the container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearTracks {
    /// Children laid out by the pass, in order.
    pub children: Vec<ComponentId>,
    /// Midpoint of every child box.
    pub midpoints: Vec<i32>,
    /// Insertion boundaries: before every child, plus one after the last.
    pub boundaries: Vec<i32>,
    /// Container extent across the stacking axis.
    pub cross_extent: i32,
    /// Container extent along the stacking axis.
    pub main_extent: i32,
    /// Thickness of the insertion divider.
    pub divider: i32,
}

/// A vertical or horizontal stack.
#[derive(Debug, Clone)]
pub struct LinearLayout {
    axis: Axis,
    pub(crate) state: StrategyState,
    pub(crate) tracks: LinearTracks,
}

impl LinearLayout {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            state: StrategyState::default(),
            tracks: LinearTracks::default(),
        }
    }

    /// Build from a raw orientation code. Any code other than
    /// `ORIENTATION_HORIZONTAL` or `ORIENTATION_VERTICAL` is a programming
    /// error and is reported immediately.
    pub fn from_orientation(orientation: i32) -> Result<Self, LayoutError> {
        match orientation {
            ORIENTATION_HORIZONTAL => Ok(Self::new(Axis::Horizontal)),
            ORIENTATION_VERTICAL => Ok(Self::new(Axis::Vertical)),
            other => Err(LayoutError::IllegalOrientation(other.to_string())),
        }
    }

    /// The stacking axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn tracks(&self) -> &LinearTracks {
        &self.tracks
    }

    /// Main and cross alignment for a stack, from its align properties.
    fn alignment(&self, tree: &ComponentTree, id: ComponentId) -> (Alignment, Alignment) {
        let horizontal = read_alignment(tree, id, props::ALIGN_HORIZONTAL, Alignment::from_horizontal_code);
        let vertical = read_alignment(tree, id, props::ALIGN_VERTICAL, Alignment::from_vertical_code);
        match self.axis {
            Axis::Vertical => (vertical.unwrap_or_default(), horizontal.unwrap_or_default()),
            // Horizontal stacks center their children vertically by default.
            Axis::Horizontal => (horizontal.unwrap_or_default(), vertical.unwrap_or(Alignment::Center)),
        }
    }

    /// Automatic size: the widest box across the axis, and the sum of the
    /// boxes plus spacing along it.
    pub(crate) fn automatic_size(&self, pass: &LayoutPass<'_>, id: ComponentId) -> Size {
        let children = pass.visible_children(id);
        if children.is_empty() {
            return pass.config.linear_empty;
        }

        let main = self.axis;
        let cross = main.cross();
        let border = pass.config.border;
        let spacing = pass.config.spacing;
        let infos: Vec<_> = children.iter().filter_map(|&c| pass.info(c)).collect();

        // Fill-parent children do not count towards the cross extent unless
        // every child is fill-parent.
        let cross_len = infos
            .iter()
            .filter_map(|info| info.dimension(cross).px())
            .map(|len| len.saturating_add(border))
            .max()
            .unwrap_or_else(|| {
                infos
                    .iter()
                    .map(|info| info.automatic(cross).saturating_add(border))
                    .max()
                    .unwrap_or(0)
            });

        // Fill parent has no meaning before our own length is known.
        let main_len = infos
            .iter()
            .map(|info| info.length_or_automatic(main))
            .fold(spacing, |sum, len| advance(sum, len, border, spacing));

        along(main, main_len, cross_len)
    }

    pub(crate) fn layout_children(&self, pass: &mut LayoutPass<'_>, id: ComponentId) {
        let main = self.axis;
        let cross = main.cross();
        let border = pass.config.border;
        let spacing = pass.config.spacing;
        let children = pass.visible_children(id);

        let Some(container) = pass.info(id) else {
            return;
        };
        let main_extent = container.length_or_automatic(main);
        let cross_extent = container.length_or_automatic(cross);

        // Resolution: fixed children first, then split what is left.
        let mut used = spacing;
        let mut fill_count: i32 = 0;
        for &child in &children {
            let Some(info) = pass.info_mut(child) else {
                continue;
            };
            match info.dimension(main) {
                Dimension::Px(len) => used = advance(used, len, border, spacing),
                Dimension::FillParent => fill_count += 1,
            }
            if info.dimension(cross).is_fill_parent() {
                info.set_dimension(cross, Dimension::Px(cross_extent.saturating_sub(border).max(0)));
            }
        }

        if fill_count > 0 {
            let remaining = main_extent
                .saturating_sub(used)
                .saturating_sub(fill_count.saturating_mul(spacing))
                .max(0);
            let share = (remaining / fill_count).saturating_sub(border).max(0);
            for &child in &children {
                if let Some(info) = pass.info_mut(child) {
                    if info.dimension(main).is_fill_parent() {
                        info.set_dimension(main, Dimension::Px(share));
                    }
                }
            }
        }

        for &child in &children {
            layout_container(pass, child);
        }

        // Positioning.
        let (main_align, cross_align) = self.alignment(pass.tree, id);
        let total = children
            .iter()
            .filter_map(|&c| pass.info(c))
            .map(|info| info.length_or_automatic(main))
            .fold(spacing, |sum, len| advance(sum, len, border, spacing));
        let lead = if fill_count == 0 {
            main_align.offset(main_extent, total)
        } else {
            0
        };

        let mut tracks = LinearTracks {
            children: children.clone(),
            midpoints: Vec::with_capacity(children.len()),
            boundaries: Vec::with_capacity(children.len() + 1),
            cross_extent,
            main_extent,
            divider: pass.config.divider_thickness,
        };
        let mut offset = lead.saturating_add(spacing);
        for &child in &children {
            let Some(info) = pass.info_mut(child) else {
                continue;
            };
            let box_main = info.length_or_automatic(main).saturating_add(border);
            let box_cross = info.length_or_automatic(cross).saturating_add(border);

            tracks.boundaries.push(offset.saturating_sub(spacing / 2).max(0));
            tracks.midpoints.push(offset.saturating_add(box_main / 2));

            info.set_position(main, offset);
            info.set_position(cross, cross_align.offset(cross_extent, box_cross));
            offset = offset.saturating_add(box_main).saturating_add(spacing);
        }
        let end = offset.saturating_sub(spacing);
        tracks.boundaries.push(end.saturating_add(spacing / 2).max(0));

        tracing::debug!(
            container = %id,
            children = children.len(),
            fill = fill_count,
            extent = main_extent,
            "linear layout"
        );
        if let Some(info) = pass.info_mut(id) {
            info.record = LayoutRecord::Linear(tracks);
        }
    }

    /// Insertion slot for a pointer at `point`: in front of the first child
    /// whose midpoint lies beyond the pointer. A pointer exactly on a
    /// midpoint inserts after that child.
    pub(crate) fn resolve_drop(&self, point: Point) -> Option<DropLocation> {
        self.state.layout_size?;
        let tracks = &self.tracks;
        let pointer = match self.axis {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        };
        let index = tracks
            .midpoints
            .iter()
            .position(|&mid| pointer < mid)
            .unwrap_or(tracks.midpoints.len());

        let thickness = tracks.divider.max(1);
        let boundary = tracks.boundaries.get(index).copied().unwrap_or(0);
        let at = boundary
            .saturating_sub(thickness / 2)
            .clamp(0, tracks.main_extent.saturating_sub(thickness).max(0));
        let rect = match self.axis {
            Axis::Vertical => Rect::new(0, at, tracks.cross_extent, thickness),
            Axis::Horizontal => Rect::new(at, 0, thickness, tracks.cross_extent),
        };
        Some(DropLocation {
            target: DropTarget::Insert { index },
            indicator: DropIndicator::Divider(rect),
        })
    }
}

fn read_alignment(
    tree: &ComponentTree,
    id: ComponentId,
    name: &str,
    decode: fn(i32) -> Option<Alignment>,
) -> Option<Alignment> {
    let raw = tree.property(id, name)?;
    let decoded = raw.trim().parse::<i32>().ok().and_then(decode);
    if decoded.is_none() {
        tracing::warn!(component = %id, property = name, value = raw, "unknown alignment, using default");
    }
    decoded
}

/// `sum` plus one child box and the gap after it, saturating.
#[inline]
fn advance(sum: i32, len: i32, border: i32, spacing: i32) -> i32 {
    sum.saturating_add(len).saturating_add(border).saturating_add(spacing)
}

/// Build a size from main/cross lengths.
#[inline]
fn along(main: Axis, main_len: i32, cross_len: i32) -> Size {
    match main {
        Axis::Vertical => Size::new(cross_len, main_len),
        Axis::Horizontal => Size::new(main_len, cross_len),
    }
}

/// Move `source` in front of the `index`-th child laid out by the last
/// pass, or to the end when `index` is past the last one.
pub(crate) fn apply_drop(
    tree: &mut ComponentTree,
    container: ComponentId,
    source: ComponentId,
    index: usize,
) -> Result<(), LayoutError> {
    let anchor = match tree.strategy(container) {
        Some(super::LayoutStrategy::Linear(linear)) => linear.tracks.children.get(index).copied(),
        _ => None,
    };
    let siblings = tree.children(container);
    let full_index = anchor
        .and_then(|anchor| siblings.iter().position(|&c| c == anchor))
        .unwrap_or(siblings.len());
    tree.move_component(source, container, full_index)
}

// =========================================================================
// Tests
// =========================================================================
