//! Arena-backed component tree.

use super::{props, Component, ComponentId, ComponentKind};
use crate::error::LayoutError;
use crate::layout::{Axis, LayoutStrategy, SizeHint};
use crate::primitives::{Rect, Size};

/// Owns every component of a screen. Components are never freed; a removed
/// component is simply detached (it has no parent and appears in no child
/// list), which keeps every `ComponentId` valid for the tree's lifetime.
#[derive(Debug, Default)]
pub struct ComponentTree {
    nodes: Vec<Component>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached component.
    pub fn create(&mut self, type_name: impl Into<String>, kind: ComponentKind) -> ComponentId {
        let id = ComponentId(self.nodes.len() as u32);
        self.nodes.push(Component::new(id, type_name.into(), kind));
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every component ever created, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.nodes.iter()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.nodes.get(id.index())
    }

    pub fn get(&self, id: ComponentId) -> Result<&Component, LayoutError> {
        self.nodes.get(id.index()).ok_or(LayoutError::UnknownComponent(id))
    }

    fn get_mut(&mut self, id: ComponentId) -> Result<&mut Component, LayoutError> {
        self.nodes.get_mut(id.index()).ok_or(LayoutError::UnknownComponent(id))
    }

    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.component(id).map(Component::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.component(id).and_then(Component::parent)
    }

    pub fn property(&self, id: ComponentId, name: &str) -> Option<&str> {
        self.component(id).and_then(|c| c.property(name))
    }

    pub fn hint(&self, id: ComponentId, axis: Axis) -> SizeHint {
        self.component(id).map(|c| c.hint(axis)).unwrap_or_default()
    }

    pub fn strategy(&self, id: ComponentId) -> Option<&LayoutStrategy> {
        self.component(id).and_then(Component::strategy)
    }

    pub(crate) fn strategy_mut(&mut self, id: ComponentId) -> Option<&mut LayoutStrategy> {
        self.nodes.get_mut(id.index()).and_then(Component::strategy_mut)
    }

    pub fn geometry(&self, id: ComponentId) -> Rect {
        self.component(id).map(Component::geometry).unwrap_or_default()
    }

    pub fn set_preferred_size(&mut self, id: ComponentId, size: Size) -> Result<(), LayoutError> {
        self.get_mut(id)?.preferred = size;
        Ok(())
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: ComponentId, id: ComponentId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Children that take part in layout: not non-visible components, and
    /// either visible or shown because the designer displays hidden ones.
    pub fn visible_children(&self, id: ComponentId, show_hidden: bool) -> Vec<ComponentId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| {
                self.component(child).is_some_and(|c| {
                    c.kind != ComponentKind::NonVisible && (c.visible || show_hidden)
                })
            })
            .collect()
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<(), LayoutError> {
        let len = self.get(parent)?.children.len();
        self.insert_child(parent, child, len)
    }

    /// Insert `child` at `index` in `parent`'s child list. The index refers
    /// to the list after `child` has been removed from its old position.
    pub fn insert_child(
        &mut self,
        parent: ComponentId,
        child: ComponentId,
        index: usize,
    ) -> Result<(), LayoutError> {
        if !self.get(parent)?.kind.is_container() {
            return Err(LayoutError::NotAContainer(parent));
        }
        self.get(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(LayoutError::Cycle { child, parent });
        }

        self.detach(child);
        let node = self.get_mut(parent)?;
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);
        self.membership_changed(parent);
        Ok(())
    }

    /// Move `child` so it lands in front of what is currently the
    /// `index`-th child of `parent` (or at the end for `index == len`).
    /// Unlike `insert_child`, the index refers to the list before removal.
    pub fn move_component(
        &mut self,
        child: ComponentId,
        parent: ComponentId,
        index: usize,
    ) -> Result<(), LayoutError> {
        let mut index = index;
        if self.parent(child) == Some(parent) {
            if let Some(old) = self.children(parent).iter().position(|&c| c == child) {
                if old < index {
                    index -= 1;
                }
            }
        }
        self.insert_child(parent, child, index)
    }

    /// Detach `child` from its parent. Detaching a root is a no-op.
    pub fn remove_child(&mut self, child: ComponentId) -> Result<(), LayoutError> {
        self.get(child)?;
        self.detach(child);
        Ok(())
    }

    fn detach(&mut self, child: ComponentId) {
        let Some(old_parent) = self.parent(child) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(old_parent.index()) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(child.index()) {
            node.parent = None;
        }
        self.membership_changed(old_parent);
    }

    /// Store a property value. Returns whether the change can affect layout.
    ///
    /// Size hints and visibility are decoded here; a malformed value is kept
    /// as text but the previously decoded value stays in effect.
    pub fn set_property(
        &mut self,
        id: ComponentId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<bool, LayoutError> {
        let value = value.into();
        let node = self.get_mut(id)?;

        match name {
            props::WIDTH | props::HEIGHT => match SizeHint::parse(&value) {
                Some(hint) => {
                    let slot = if name == props::WIDTH { 0 } else { 1 };
                    node.hints[slot] = hint;
                }
                None => {
                    tracing::warn!(component = %id, property = name, value = %value, "malformed size hint, keeping previous");
                }
            },
            props::VISIBLE => match props::parse_bool(&value) {
                Some(visible) => node.visible = visible,
                None => {
                    tracing::warn!(component = %id, value = %value, "malformed visibility, keeping previous");
                }
            },
            _ => {}
        }

        if let Some(strategy) = node.strategy.as_mut() {
            strategy.container_property_changed(id, name, &value);
        }
        node.properties.insert(name.to_string(), value);

        if name == props::Z {
            if let Some(parent) = self.parent(id) {
                self.resort_sprites(parent);
            }
        }
        Ok(props::affects_layout(name))
    }

    fn membership_changed(&mut self, container: ComponentId) {
        self.resort_sprites(container);
    }

    /// Recompute paint order when `container` is a canvas.
    fn resort_sprites(&mut self, container: ComponentId) {
        if !matches!(self.strategy(container), Some(LayoutStrategy::Canvas(_))) {
            return;
        }
        let keyed: Vec<(ComponentId, f64)> = self
            .children(container)
            .iter()
            .map(|&child| (child, crate::layout::canvas::sprite_z(self, child)))
            .collect();
        if let Some(LayoutStrategy::Canvas(canvas)) = self.strategy_mut(container) {
            canvas.resort(keyed);
        }
    }

    pub(crate) fn apply_geometry(&mut self, id: ComponentId, geometry: Rect, hidden: bool) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.apply_geometry(geometry, hidden);
        }
    }
}
