//! Mock component model.
//!
//! Components live in an arena (`ComponentTree`) and refer to each other by
//! `ComponentId`. A component has exactly one parent at a time; moving it
//! detaches it from the old parent before attaching it to the new one.

mod measure;
mod tree;

pub mod props;

pub use measure::{Measure, PreferredSize};
pub use tree::ComponentTree;

use std::fmt;

use indexmap::IndexMap;

use crate::layout::{Axis, LayoutStrategy, SizeHint, StrategyKind};
use crate::primitives::{Rect, Size};

/// Stable index of a component in its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a component is, as far as layout cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// An ordinary on-screen widget.
    Visible,
    /// A free-positioned child that only canvases accept.
    Sprite,
    /// Not rendered on the screen at all (timers, sensors, ...).
    NonVisible,
    /// A container laid out by the given strategy.
    Container(StrategyKind),
}

impl ComponentKind {
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, ComponentKind::Container(_))
    }
}

/// A node of the mock component tree.
#[derive(Debug)]
pub struct Component {
    id: ComponentId,
    type_name: String,
    kind: ComponentKind,
    properties: IndexMap<String, String>,
    children: Vec<ComponentId>,
    parent: Option<ComponentId>,
    visible: bool,
    /// Natural size reported by the host (for canvases: the background image).
    preferred: Size,
    /// Last successfully parsed width and height hints.
    hints: [SizeHint; 2],
    /// Geometry applied by the most recent layout pass.
    geometry: Rect,
    /// Hidden by placement rules during the most recent pass.
    layout_hidden: bool,
    strategy: Option<LayoutStrategy>,
}

impl Component {
    fn new(id: ComponentId, type_name: String, kind: ComponentKind) -> Self {
        let strategy = match kind {
            ComponentKind::Container(strategy) => Some(strategy.build()),
            _ => None,
        };
        Self {
            id,
            type_name,
            kind,
            properties: IndexMap::new(),
            children: Vec::new(),
            parent: None,
            visible: true,
            preferred: Size::ZERO,
            hints: [SizeHint::Automatic; 2],
            geometry: Rect::ZERO,
            layout_hidden: false,
            strategy,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// The component's own visibility flag.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The size hint for an axis.
    pub fn hint(&self, axis: Axis) -> SizeHint {
        match axis {
            Axis::Horizontal => self.hints[0],
            Axis::Vertical => self.hints[1],
        }
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Whether the last pass hid this component (grid conflict, out of range
    /// coordinate, malformed position).
    pub fn is_layout_hidden(&self) -> bool {
        self.layout_hidden
    }

    pub fn strategy(&self) -> Option<&LayoutStrategy> {
        self.strategy.as_ref()
    }

    pub(crate) fn strategy_mut(&mut self) -> Option<&mut LayoutStrategy> {
        self.strategy.as_mut()
    }

    pub(crate) fn apply_geometry(&mut self, geometry: Rect, hidden: bool) {
        self.geometry = geometry;
        self.layout_hidden = hidden;
    }
}

/// Parse an integer property used as a coordinate or index.
pub(crate) fn parse_int(component: &Component, name: &str) -> Option<Result<i32, String>> {
    component.property(name).map(|raw| {
        raw.trim().parse::<i32>().map_err(|_| raw.to_string())
    })
}

/// Parse a float property used as a sprite coordinate.
pub(crate) fn parse_float(component: &Component, name: &str) -> Option<Result<f64, String>> {
    component.property(name).map(|raw| {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| raw.to_string())
    })
}
