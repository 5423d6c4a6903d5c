//! The designer surface.
//!
//! `Designer` owns the component tree of one screen together with the
//! layout configuration, the screen metrics and the refresh scheduler. The
//! surrounding editor edits properties and forwards drag events through it;
//! layout passes run when the scheduler says so.
//!
//! The designer never reads the wall clock after construction. Edits are
//! stamped with the latest instant the host passed to [`Designer::tick`].

use std::time::Instant;

use crate::component::{ComponentId, ComponentKind, ComponentTree, Measure, PreferredSize};
use crate::config::{LayoutConfig, ScreenMetrics};
use crate::error::LayoutError;
use crate::layout::{self, Axis, DropIndicator, LayoutStrategy, StrategyKind};
use crate::primitives::{Point, Rect, Size};
use crate::scheduler::RefreshScheduler;

/// Type name of the root container.
pub const SCREEN_TYPE: &str = "Screen";

pub struct Designer {
    tree: ComponentTree,
    root: ComponentId,
    config: LayoutConfig,
    screen: ScreenMetrics,
    scheduler: RefreshScheduler,
    clock: Instant,
    measure: Box<dyn Measure>,
}

impl Designer {
    /// A designer with an empty vertical screen root and the default
    /// `PreferredSize` measurer.
    pub fn new(config: LayoutConfig, screen: ScreenMetrics) -> Self {
        let mut tree = ComponentTree::new();
        let root = tree.create(SCREEN_TYPE, ComponentKind::Container(StrategyKind::Linear(Axis::Vertical)));
        let scheduler = RefreshScheduler::from_config(&config);
        Self {
            tree,
            root,
            config,
            screen,
            scheduler,
            clock: Instant::now(),
            measure: Box::new(PreferredSize),
        }
    }

    /// Replace the leaf measurer.
    pub fn with_measure(mut self, measure: impl Measure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn screen(&self) -> &ScreenMetrics {
        &self.screen
    }

    pub fn set_screen(&mut self, screen: ScreenMetrics) {
        self.screen = screen;
        self.request_pass();
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn geometry(&self, id: ComponentId) -> Rect {
        self.tree.geometry(id)
    }

    // =====================================================================
    // Tree editing
    // =====================================================================

    /// Create a detached component.
    pub fn create(&mut self, type_name: impl Into<String>, kind: ComponentKind) -> ComponentId {
        self.tree.create(type_name, kind)
    }

    /// Create a component and append it to `parent`.
    pub fn add_component(
        &mut self,
        parent: ComponentId,
        type_name: impl Into<String>,
        kind: ComponentKind,
    ) -> Result<ComponentId, LayoutError> {
        let id = self.tree.create(type_name, kind);
        self.tree.add_child(parent, id)?;
        self.request_pass();
        Ok(id)
    }

    pub fn move_component(
        &mut self,
        child: ComponentId,
        parent: ComponentId,
        index: usize,
    ) -> Result<(), LayoutError> {
        self.tree.move_component(child, parent, index)?;
        self.request_pass();
        Ok(())
    }

    pub fn remove_component(&mut self, id: ComponentId) -> Result<(), LayoutError> {
        self.tree.remove_child(id)?;
        self.request_pass();
        Ok(())
    }

    /// Store a property. Changes that can affect geometry request a pass.
    pub fn set_property(
        &mut self,
        id: ComponentId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), LayoutError> {
        if self.tree.set_property(id, name, value)? {
            self.request_pass();
        }
        Ok(())
    }

    pub fn set_preferred_size(&mut self, id: ComponentId, size: Size) -> Result<(), LayoutError> {
        self.tree.set_preferred_size(id, size)?;
        self.request_pass();
        Ok(())
    }

    // =====================================================================
    // Layout passes
    // =====================================================================

    /// Run the pending pass if it is due. Returns whether a pass ran.
    pub fn tick(&mut self, now: Instant) -> Result<bool, LayoutError> {
        self.clock = self.clock.max(now);
        if !self.scheduler.take_due(self.clock) {
            return Ok(false);
        }
        self.run()?;
        Ok(true)
    }

    /// Run a pass immediately, absorbing any pending request.
    pub fn refresh_now(&mut self) -> Result<usize, LayoutError> {
        self.scheduler.clear();
        self.run()
    }

    fn request_pass(&mut self) {
        self.scheduler.request(self.clock);
    }

    fn run(&mut self) -> Result<usize, LayoutError> {
        layout::run_pass(&mut self.tree, self.root, &self.config, &self.screen, self.measure.as_ref())
    }

    // =====================================================================
    // Drag and drop
    //
    // Points are relative to the target container's origin. `grab` is where
    // the pointer holds the dragged component, relative to its top-left.
    // =====================================================================

    /// Whether `container` accepts `source`: it must be a container whose
    /// strategy takes the source's kind, and must not be the source or
    /// lie inside it.
    pub fn accepts(&self, container: ComponentId, source: ComponentId) -> bool {
        let (Some(target), Some(dragged)) = (self.tree.component(container), self.tree.component(source)) else {
            return false;
        };
        let Some(strategy) = target.strategy() else {
            return false;
        };
        if !strategy.accepts(dragged.kind()) {
            tracing::debug!(%container, %source, kind = ?dragged.kind(), "drop rejected: kind not accepted");
            return false;
        }
        if self.tree.is_ancestor_or_self(source, container) {
            tracing::debug!(%container, %source, "drop rejected: target inside source");
            return false;
        }
        true
    }

    /// The pointer entered `container` while dragging `source`.
    pub fn drag_enter(&mut self, container: ComponentId, source: ComponentId, point: Point, grab: Point) -> bool {
        if !self.accepts(container, source) {
            return false;
        }
        self.drag_continue(container, source, point, grab);
        true
    }

    /// Update the drop location and indicator for a pointer move.
    pub fn drag_continue(&mut self, container: ComponentId, source: ComponentId, point: Point, grab: Point) {
        let source_size = self.tree.geometry(source).size();
        if let Some(strategy) = self.tree.strategy_mut(container) {
            let location = strategy.resolve_drop(source_size, point, grab);
            strategy.set_drop_location(location);
        }
    }

    /// The pointer left `container`; hide its indicator.
    pub fn drag_leave(&mut self, container: ComponentId) {
        if let Some(strategy) = self.tree.strategy_mut(container) {
            strategy.set_drop_location(None);
        }
    }

    /// Indicator to draw for `container`, if something is dragged over it.
    pub fn drop_indicator(&self, container: ComponentId) -> Option<DropIndicator> {
        self.tree
            .strategy(container)
            .and_then(LayoutStrategy::drop_location)
            .map(|location| location.indicator)
    }

    /// Release `source` over `container`. Returns whether the drop was
    /// handled; a rejected drop leaves the tree untouched.
    pub fn drop(
        &mut self,
        container: ComponentId,
        source: ComponentId,
        point: Point,
        grab: Point,
    ) -> Result<bool, LayoutError> {
        self.tree.get(container)?;
        self.tree.get(source)?;
        self.drag_leave(container);

        if !self.accepts(container, source) {
            return Ok(false);
        }
        let source_size = self.tree.geometry(source).size();
        let Some(location) = self
            .tree
            .strategy(container)
            .and_then(|strategy| strategy.resolve_drop(source_size, point, grab))
        else {
            tracing::debug!(%container, %source, x = point.x, y = point.y, "drop rejected: no target");
            return Ok(false);
        };

        layout::strategy::apply_drop(&mut self.tree, container, source, location.target)?;
        tracing::debug!(%container, %source, target = ?location.target, "drop applied");
        self.scheduler.force();
        Ok(true)
    }
}
