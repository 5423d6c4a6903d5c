//! Canvas - free placement of sprites over an optional background image.
//!
//! Sprites are positioned at their `X`/`Y` coordinates (floats, truncated
//! to whole pixels) and are never resized by the canvas. Paint order is
//! kept separately from the child list: ascending `Z`, ties broken by list
//! order, recomputed whenever a sprite's `Z` or the membership changes.

use crate::component::{self, props, ComponentId, ComponentTree};
use crate::error::LayoutError;
use crate::primitives::{Point, Size};

use super::absolute::resolve_free_form_drop;
use super::context::LayoutPass;
use super::drop::DropLocation;
use super::hint::Dimension;
use super::strategy::StrategyState;

/// Z value of a sprite without a (valid) `Z` property.
pub const DEFAULT_Z: f64 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct CanvasLayout {
    pub(crate) state: StrategyState,
    paint_order: Vec<ComponentId>,
}

impl CanvasLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Children in the order they are painted, back to front.
    pub fn paint_order(&self) -> &[ComponentId] {
        &self.paint_order
    }

    /// Re-sort by ascending Z. The sort is stable, so equal Z values keep
    /// the order they arrive in.
    pub(crate) fn resort(&mut self, mut keyed: Vec<(ComponentId, f64)>) {
        keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
        self.paint_order = keyed.into_iter().map(|(id, _)| id).collect();
    }

    /// The background image, when set, decides the canvas size.
    pub(crate) fn automatic_size(&self, pass: &LayoutPass<'_>, id: ComponentId) -> Size {
        let Some(canvas) = pass.tree.component(id) else {
            return pass.config.free_form_empty;
        };
        let has_background = canvas
            .property(props::BACKGROUND_IMAGE)
            .is_some_and(|image| !image.trim().is_empty());
        let natural = canvas.preferred_size();
        if has_background && natural.width > 0 && natural.height > 0 {
            natural
        } else {
            pass.config.free_form_empty
        }
    }

    pub(crate) fn layout_children(&self, pass: &mut LayoutPass<'_>, id: ComponentId) {
        for sprite in pass.visible_children(id) {
            let position = pass.tree.component(sprite).and_then(|c| {
                let x = read_coordinate(c, props::X)?;
                let y = read_coordinate(c, props::Y)?;
                Some(Point::new(x, y))
            });
            let Some(info) = pass.info_mut(sprite) else {
                continue;
            };
            let Some(position) = position else {
                info.hidden = true;
                continue;
            };

            // Fill parent means nothing on a canvas; use the natural size.
            if let Dimension::FillParent = info.width {
                info.width = Dimension::Px(info.automatic.width);
            }
            if let Dimension::FillParent = info.height {
                info.height = Dimension::Px(info.automatic.height);
            }
            info.position = position;
        }
    }

    pub(crate) fn resolve_drop(&self, source_size: Size, point: Point, grab: Point) -> Option<DropLocation> {
        resolve_free_form_drop(&self.state, source_size, point, grab)
    }
}

/// A sprite coordinate, truncated toward zero. Missing means 0.
fn read_coordinate(component: &component::Component, name: &str) -> Option<i32> {
    match component::parse_float(component, name) {
        None => Some(0),
        Some(Ok(value)) => Some(value as i32),
        Some(Err(raw)) => {
            tracing::warn!(component = %component.id(), property = name, value = %raw, "malformed sprite coordinate, hiding");
            None
        }
    }
}

/// The sprite's Z value, `DEFAULT_Z` when missing or malformed.
pub(crate) fn sprite_z(tree: &ComponentTree, id: ComponentId) -> f64 {
    tree.component(id)
        .and_then(|c| component::parse_float(c, props::Z))
        .and_then(Result::ok)
        .unwrap_or(DEFAULT_Z)
}

pub(crate) fn apply_drop(
    tree: &mut ComponentTree,
    container: ComponentId,
    source: ComponentId,
    at: Point,
) -> Result<(), LayoutError> {
    if tree.parent(source) != Some(container) {
        tree.add_child(container, source)?;
    }
    tree.set_property(source, props::X, at.x.to_string())?;
    tree.set_property(source, props::Y, at.y.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentKind, PreferredSize};
    use crate::config::{LayoutConfig, ScreenMetrics};
    use crate::layout::gather::run_pass;
    use crate::layout::{Axis, LayoutStrategy, StrategyKind};
    use crate::primitives::Rect;

    fn canvas_tree() -> (ComponentTree, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new();
        let root = tree.create("Screen", ComponentKind::Container(StrategyKind::Linear(Axis::Vertical)));
        let canvas = tree.create("Canvas", ComponentKind::Container(StrategyKind::Canvas));
        tree.add_child(root, canvas).unwrap();
        (tree, root, canvas)
    }

    fn sprite(tree: &mut ComponentTree, canvas: ComponentId, z: &str) -> ComponentId {
        let id = tree.create("ImageSprite", ComponentKind::Sprite);
        tree.set_preferred_size(id, Size::new(16, 16)).unwrap();
        tree.set_property(id, props::Z, z).unwrap();
        tree.add_child(canvas, id).unwrap();
        id
    }

    fn paint_order(tree: &ComponentTree, canvas: ComponentId) -> Vec<ComponentId> {
        match tree.strategy(canvas) {
            Some(LayoutStrategy::Canvas(c)) => c.paint_order().to_vec(),
            other => panic!("expected a canvas, got {other:?}"),
        }
    }

    fn run(tree: &mut ComponentTree, root: ComponentId) {
        let config = LayoutConfig::default();
        run_pass(tree, root, &config, &ScreenMetrics::new(480, 640), &PreferredSize).unwrap();
    }

    #[test]
    fn test_z_order_is_stable() {
        let (mut tree, _, canvas) = canvas_tree();
        let s0 = sprite(&mut tree, canvas, "2");
        let s1 = sprite(&mut tree, canvas, "1");
        let s2 = sprite(&mut tree, canvas, "2");
        assert_eq!(paint_order(&tree, canvas), vec![s1, s0, s2]);
    }

    #[test]
    fn test_z_change_resorts() {
        let (mut tree, _, canvas) = canvas_tree();
        let s0 = sprite(&mut tree, canvas, "1");
        let s1 = sprite(&mut tree, canvas, "1");
        tree.set_property(s0, props::Z, "3.5").unwrap();
        assert_eq!(paint_order(&tree, canvas), vec![s1, s0]);

        tree.remove_child(s0).unwrap();
        assert_eq!(paint_order(&tree, canvas), vec![s1]);
    }

    #[test]
    fn test_malformed_z_uses_default() {
        let (mut tree, _, canvas) = canvas_tree();
        let a = sprite(&mut tree, canvas, "oops");
        let b = sprite(&mut tree, canvas, "0.5");
        assert_eq!(sprite_z(&tree, a), DEFAULT_Z);
        assert_eq!(paint_order(&tree, canvas), vec![b, a]);
    }

    #[test]
    fn test_sprites_truncate_coordinates() {
        let (mut tree, root, canvas) = canvas_tree();
        let s = sprite(&mut tree, canvas, "1");
        tree.set_property(s, props::X, "10.9").unwrap();
        tree.set_property(s, props::Y, "3.2").unwrap();
        tree.set_property(s, props::WIDTH, "-2").unwrap();
        run(&mut tree, root);
        assert_eq!(tree.geometry(s), Rect::new(10, 3, 16, 16));
    }

    #[test]
    fn test_malformed_coordinate_hides_sprite() {
        let (mut tree, root, canvas) = canvas_tree();
        let s = sprite(&mut tree, canvas, "1");
        tree.set_property(s, props::X, "left").unwrap();
        run(&mut tree, root);
        assert!(tree.component(s).unwrap().is_layout_hidden());
    }

    #[test]
    fn test_background_sets_size() {
        let (mut tree, root, canvas) = canvas_tree();
        tree.set_preferred_size(canvas, Size::new(300, 200)).unwrap();
        run(&mut tree, root);
        assert_eq!(tree.geometry(canvas).size(), LayoutConfig::default().free_form_empty);

        tree.set_property(canvas, props::BACKGROUND_IMAGE, "kitty.png").unwrap();
        run(&mut tree, root);
        assert_eq!(tree.geometry(canvas).size(), Size::new(300, 200));
    }

    #[test]
    fn test_apply_drop_sets_coordinates() {
        let (mut tree, _, canvas) = canvas_tree();
        let s = tree.create("Ball", ComponentKind::Sprite);
        apply_drop(&mut tree, canvas, s, Point::new(7, 9)).unwrap();
        assert_eq!(tree.parent(s), Some(canvas));
        assert_eq!(tree.property(s, props::X), Some("7"));
        assert_eq!(tree.property(s, props::Y), Some("9"));
    }
}
