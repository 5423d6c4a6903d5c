//! Strategy dispatch.
//!
//! Every container owns exactly one `LayoutStrategy`. The enum is closed:
//! the four arrangements below are all the designer knows how to preview.
//! Each variant keeps only per-instance state (last resolved size, the
//! geometry needed to answer drop queries, the current drag location);
//! everything pass-related flows through `LayoutPass`.

use crate::component::{ComponentId, ComponentKind, ComponentTree};
use crate::error::LayoutError;
use crate::primitives::{Point, Size};

use super::absolute::AbsoluteLayout;
use super::canvas::CanvasLayout;
use super::context::LayoutPass;
use super::drop::{DropLocation, DropTarget};
use super::grid::GridLayout;
use super::hint::Axis;
use super::info::LayoutRecord;
use super::linear::LinearLayout;

/// Which arrangement a container uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Absolute,
    Canvas,
    Linear(Axis),
    Grid,
}

impl StrategyKind {
    /// Look up a strategy by its configuration name.
    pub fn from_name(name: &str) -> Result<Self, LayoutError> {
        match name {
            "absolute" => Ok(StrategyKind::Absolute),
            "canvas" => Ok(StrategyKind::Canvas),
            "horizontal" => Ok(StrategyKind::Linear(Axis::Horizontal)),
            "vertical" => Ok(StrategyKind::Linear(Axis::Vertical)),
            "grid" | "table" => Ok(StrategyKind::Grid),
            other => Err(LayoutError::IllegalStrategy(other.to_string())),
        }
    }

    pub fn build(self) -> LayoutStrategy {
        match self {
            StrategyKind::Absolute => LayoutStrategy::Absolute(AbsoluteLayout::new()),
            StrategyKind::Canvas => LayoutStrategy::Canvas(CanvasLayout::new()),
            StrategyKind::Linear(axis) => LayoutStrategy::Linear(LinearLayout::new(axis)),
            StrategyKind::Grid => LayoutStrategy::Grid(GridLayout::new()),
        }
    }
}

/// State every strategy keeps between passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyState {
    /// Size the container resolved to in the most recent pass.
    pub(crate) layout_size: Option<Size>,
    /// Current drop location while something is dragged over the container.
    pub(crate) drop: Option<DropLocation>,
}

/// A container's layout algorithm.
#[derive(Debug, Clone)]
pub enum LayoutStrategy {
    Absolute(AbsoluteLayout),
    Canvas(CanvasLayout),
    Linear(LinearLayout),
    Grid(GridLayout),
}

impl LayoutStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            LayoutStrategy::Absolute(_) => StrategyKind::Absolute,
            LayoutStrategy::Canvas(_) => StrategyKind::Canvas,
            LayoutStrategy::Linear(l) => StrategyKind::Linear(l.axis()),
            LayoutStrategy::Grid(_) => StrategyKind::Grid,
        }
    }

    fn state(&self) -> &StrategyState {
        match self {
            LayoutStrategy::Absolute(s) => &s.state,
            LayoutStrategy::Canvas(s) => &s.state,
            LayoutStrategy::Linear(s) => &s.state,
            LayoutStrategy::Grid(s) => &s.state,
        }
    }

    fn state_mut(&mut self) -> &mut StrategyState {
        match self {
            LayoutStrategy::Absolute(s) => &mut s.state,
            LayoutStrategy::Canvas(s) => &mut s.state,
            LayoutStrategy::Linear(s) => &mut s.state,
            LayoutStrategy::Grid(s) => &mut s.state,
        }
    }

    /// Size resolved by the most recent pass, `None` before the first one.
    pub fn layout_size(&self) -> Option<Size> {
        self.state().layout_size
    }

    pub fn layout_width(&self) -> Option<i32> {
        self.layout_size().map(|s| s.width)
    }

    pub fn layout_height(&self) -> Option<i32> {
        self.layout_size().map(|s| s.height)
    }

    /// Content-derived size of the container, from its children's records.
    pub fn automatic_size(&self, pass: &LayoutPass<'_>, id: ComponentId) -> Size {
        match self {
            LayoutStrategy::Absolute(s) => s.automatic_size(pass, id),
            LayoutStrategy::Canvas(s) => s.automatic_size(pass, id),
            LayoutStrategy::Linear(s) => s.automatic_size(pass, id),
            LayoutStrategy::Grid(s) => s.automatic_size(pass, id),
        }
    }

    /// Resolve the children's pending sizes, recurse into nested
    /// containers and position every child.
    pub fn layout_children(&self, pass: &mut LayoutPass<'_>, id: ComponentId) {
        match self {
            LayoutStrategy::Absolute(s) => s.layout_children(pass, id),
            LayoutStrategy::Canvas(s) => s.layout_children(pass, id),
            LayoutStrategy::Linear(s) => s.layout_children(pass, id),
            LayoutStrategy::Grid(s) => s.layout_children(pass, id),
        }
    }

    /// Store what the finished pass resolved for this container.
    /// Any drop location is cleared; it never survives a pass.
    pub(crate) fn finish_pass(&mut self, size: Size, record: LayoutRecord) {
        let state = self.state_mut();
        state.layout_size = Some(size);
        state.drop = None;
        match (self, record) {
            (LayoutStrategy::Linear(s), LayoutRecord::Linear(tracks)) => s.tracks = tracks,
            (LayoutStrategy::Grid(s), LayoutRecord::Grid(tracks)) => s.tracks = tracks,
            _ => {}
        }
    }

    pub(crate) fn container_property_changed(&mut self, id: ComponentId, name: &str, value: &str) {
        if let LayoutStrategy::Grid(grid) = self {
            grid.property_changed(id, name, value);
        }
    }

    /// Whether a component of `kind` may be dropped into this container.
    pub fn accepts(&self, kind: ComponentKind) -> bool {
        match self {
            LayoutStrategy::Canvas(_) => kind == ComponentKind::Sprite,
            _ => matches!(kind, ComponentKind::Visible | ComponentKind::Container(_)),
        }
    }

    /// Compute where a component would land if released at `point`
    /// (container-local), grabbed `grab` pixels from its own top-left.
    pub fn resolve_drop(&self, source_size: Size, point: Point, grab: Point) -> Option<DropLocation> {
        match self {
            LayoutStrategy::Absolute(s) => s.resolve_drop(source_size, point, grab),
            LayoutStrategy::Canvas(s) => s.resolve_drop(source_size, point, grab),
            LayoutStrategy::Linear(s) => s.resolve_drop(point),
            LayoutStrategy::Grid(s) => s.resolve_drop(point),
        }
    }

    pub fn drop_location(&self) -> Option<DropLocation> {
        self.state().drop
    }

    pub(crate) fn set_drop_location(&mut self, location: Option<DropLocation>) {
        self.state_mut().drop = location;
    }
}

/// Lay out the children of `id` if it is a container.
pub(crate) fn layout_container(pass: &mut LayoutPass<'_>, id: ComponentId) {
    let tree = pass.tree;
    let Some(strategy) = tree.strategy(id) else {
        return;
    };
    pass.enter(id);
    strategy.layout_children(pass, id);
    pass.exit();
}

/// Mutate the tree for an accepted drop.
pub(crate) fn apply_drop(
    tree: &mut ComponentTree,
    container: ComponentId,
    source: ComponentId,
    target: DropTarget,
) -> Result<(), LayoutError> {
    let kind = tree
        .strategy(container)
        .map(LayoutStrategy::kind)
        .ok_or(LayoutError::NotAContainer(container))?;

    match (kind, target) {
        (StrategyKind::Linear(_), DropTarget::Insert { index }) => {
            super::linear::apply_drop(tree, container, source, index)
        }
        (StrategyKind::Grid, DropTarget::Cell { row, column }) => {
            super::grid::apply_drop(tree, container, source, row, column)
        }
        (StrategyKind::Absolute, DropTarget::At(at)) => {
            super::absolute::apply_drop(tree, container, source, at)
        }
        (StrategyKind::Canvas, DropTarget::At(at)) => {
            super::canvas::apply_drop(tree, container, source, at)
        }
        (kind, target) => Err(LayoutError::IllegalStrategy(format!(
            "{kind:?} cannot apply drop target {target:?}"
        ))),
    }
}
