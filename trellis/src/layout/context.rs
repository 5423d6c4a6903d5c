//! Pass-scoped layout context.
//!
//! A `LayoutPass` carries everything one layout pass needs through the
//! recursive strategy calls:
//! - read-only access to the component tree, config and screen metrics
//! - the measurer for leaf components
//! - the map of `LayoutInfo` records keyed by component
//!
//! The tree is only read during a pass. Results are drained with
//! `finish()` and applied to the tree afterwards, so a pass never holds a
//! mutable borrow and a fresh context can be built for every call.

use indexmap::IndexMap;

use crate::component::{ComponentId, ComponentTree, Measure};
use crate::config::{LayoutConfig, ScreenMetrics};
use crate::primitives::{Rect, Size};

use super::hint::{clamp_length, Axis};
use super::info::{LayoutInfo, LayoutRecord};

/// Final geometry of one component, drained from a finished pass.
#[derive(Debug, Clone)]
pub struct Placement {
    pub id: ComponentId,
    pub rect: Rect,
    pub hidden: bool,
    pub record: LayoutRecord,
}

/// Layout context passed through the container tree.
pub struct LayoutPass<'a> {
    pub tree: &'a ComponentTree,
    pub config: &'a LayoutConfig,
    pub screen: &'a ScreenMetrics,
    measure: &'a dyn Measure,
    infos: IndexMap<ComponentId, LayoutInfo>,
    depth: u32,
}

impl<'a> LayoutPass<'a> {
    pub fn new(
        tree: &'a ComponentTree,
        config: &'a LayoutConfig,
        screen: &'a ScreenMetrics,
        measure: &'a dyn Measure,
    ) -> Self {
        Self {
            tree,
            config,
            screen,
            measure,
            infos: IndexMap::with_capacity(tree.len()),
            depth: 0,
        }
    }

    /// Natural size of a leaf given the extent currently available to it,
    /// clamped into `0..=LENGTH_MAX`.
    pub fn measure(&self, id: ComponentId, available: Size) -> Size {
        match self.tree.component(id) {
            Some(component) => {
                let size = self.measure.preferred_size(component, available);
                Size::new(clamp_length(size.width), clamp_length(size.height))
            }
            None => Size::ZERO,
        }
    }

    /// Screen dimension percent tags on `axis` refer to.
    #[inline]
    pub fn reference(&self, axis: Axis) -> i32 {
        axis.reference(self.screen)
    }

    /// Whether components with `Visible = False` take part in this pass.
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.config.show_hidden_components
    }

    /// Register a fresh record, replacing any stale one for the same id.
    pub fn insert(&mut self, info: LayoutInfo) -> &mut LayoutInfo {
        let id = info.id;
        self.infos.insert(id, info);
        &mut self.infos[&id]
    }

    pub fn info(&self, id: ComponentId) -> Option<&LayoutInfo> {
        self.infos.get(&id)
    }

    pub fn info_mut(&mut self, id: ComponentId) -> Option<&mut LayoutInfo> {
        self.infos.get_mut(&id)
    }

    /// The children snapshot taken when `id` was gathered.
    pub fn visible_children(&self, id: ComponentId) -> Vec<ComponentId> {
        self.infos
            .get(&id)
            .map(|info| info.visible_children.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Enter a container scope (used for trace output).
    pub fn enter(&mut self, id: ComponentId) {
        self.depth += 1;
        tracing::trace!(depth = self.depth, component = %id, "enter container");
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Drain the map, cleaning up every record first.
    pub fn finish(mut self) -> Vec<Placement> {
        let mut placed = Vec::with_capacity(self.infos.len());
        for (_, mut info) in self.infos.drain(..) {
            info.clean_up();
            placed.push(Placement {
                id: info.id,
                rect: info.rect(),
                hidden: info.hidden,
                record: info.record,
            });
        }
        placed
    }
}
