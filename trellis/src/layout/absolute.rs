//! Absolute (free-form) arrangement.
//!
//! Children carry explicit `Left`/`Top` offsets. There is no content-driven
//! sizing: the container reports back whatever size it was last given.

use crate::component::{self, props, ComponentId, ComponentTree};
use crate::error::LayoutError;
use crate::primitives::{Point, Rect, Size};

use super::context::LayoutPass;
use super::drop::{DropIndicator, DropLocation, DropTarget};
use super::hint::{Axis, Dimension};
use super::strategy::{layout_container, StrategyState};

#[derive(Debug, Clone, Default)]
pub struct AbsoluteLayout {
    pub(crate) state: StrategyState,
}

impl AbsoluteLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn automatic_size(&self, pass: &LayoutPass<'_>, id: ComponentId) -> Size {
        if pass.visible_children(id).is_empty() {
            return pass.config.free_form_empty;
        }
        self.state.layout_size.unwrap_or(pass.config.free_form_empty)
    }

    pub(crate) fn layout_children(&self, pass: &mut LayoutPass<'_>, id: ComponentId) {
        let Some(container) = pass.info(id) else {
            return;
        };
        let extent = container.size();
        let unbounded = [
            pass.tree.hint(id, Axis::Horizontal).is_fill_parent(),
            pass.tree.hint(id, Axis::Vertical).is_fill_parent(),
        ];

        for child in pass.visible_children(id) {
            let offset = pass.tree.component(child).and_then(|c| {
                let left = read_offset(c, props::LEFT)?;
                let top = read_offset(c, props::TOP)?;
                Some(Point::new(left, top))
            });
            let Some(offset) = offset else {
                hide(pass, child);
                continue;
            };

            let fits = |at: i32, len: i32, unbounded: bool| unbounded || (0..len).contains(&at);
            if !fits(offset.x, extent.width, unbounded[0]) || !fits(offset.y, extent.height, unbounded[1]) {
                tracing::debug!(component = %child, x = offset.x, y = offset.y, "outside free-form container, hiding");
                hide(pass, child);
                continue;
            }

            if let Some(info) = pass.info_mut(child) {
                if info.width.is_fill_parent() {
                    info.width = Dimension::Px(extent.width.saturating_sub(offset.x).max(0));
                }
                if info.height.is_fill_parent() {
                    info.height = Dimension::Px(extent.height.saturating_sub(offset.y).max(0));
                }
                info.position = offset;
            }
            layout_container(pass, child);
        }
    }

    pub(crate) fn resolve_drop(&self, source_size: Size, point: Point, grab: Point) -> Option<DropLocation> {
        resolve_free_form_drop(&self.state, source_size, point, grab)
    }
}

fn hide(pass: &mut LayoutPass<'_>, child: ComponentId) {
    if let Some(info) = pass.info_mut(child) {
        info.hidden = true;
    }
}

/// Missing offsets default to zero; malformed ones yield `None`.
fn read_offset(component: &component::Component, name: &str) -> Option<i32> {
    match component::parse_int(component, name) {
        None => Some(0),
        Some(Ok(value)) => Some(value),
        Some(Err(raw)) => {
            tracing::warn!(component = %component.id(), property = name, value = %raw, "malformed offset, hiding");
            None
        }
    }
}

/// Drop resolution shared by the free-form strategies. The pointer must lie
/// inside the last resolved size; the component's top-left is the pointer
/// minus the grab offset, clamped into the container.
pub(crate) fn resolve_free_form_drop(
    state: &StrategyState,
    source_size: Size,
    point: Point,
    grab: Point,
) -> Option<DropLocation> {
    let size = state.layout_size?;
    if !Rect::from_origin_size(Point::ORIGIN, size).contains(point) {
        return None;
    }
    let at = point - grab;
    let at = Point::new(at.x.clamp(0, size.width - 1), at.y.clamp(0, size.height - 1));
    Some(DropLocation {
        target: DropTarget::At(at),
        indicator: DropIndicator::Outline(Rect::from_origin_size(at, source_size)),
    })
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
    tree.set_property(source, props::LEFT, at.x.to_string())?;
    tree.set_property(source, props::TOP, at.y.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentKind, PreferredSize};
    use crate::config::{LayoutConfig, ScreenMetrics};
    use crate::layout::gather::run_pass;
    use crate::layout::StrategyKind;

    fn fixture() -> (ComponentTree, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new();
        let root = tree.create("Screen", ComponentKind::Container(StrategyKind::Linear(Axis::Vertical)));
        let free = tree.create("AbsoluteArrangement", ComponentKind::Container(StrategyKind::Absolute));
        tree.set_property(free, props::WIDTH, "200").unwrap();
        tree.set_property(free, props::HEIGHT, "100").unwrap();
        tree.add_child(root, free).unwrap();
        (tree, root, free)
    }

    fn child(tree: &mut ComponentTree, parent: ComponentId, left: &str, top: &str) -> ComponentId {
        let id = tree.create("Button", ComponentKind::Visible);
        tree.set_preferred_size(id, Size::new(20, 10)).unwrap();
        tree.set_property(id, props::LEFT, left).unwrap();
        tree.set_property(id, props::TOP, top).unwrap();
        tree.add_child(parent, id).unwrap();
        id
    }

    fn run(tree: &mut ComponentTree, root: ComponentId) {
        let config = LayoutConfig::default();
        run_pass(tree, root, &config, &ScreenMetrics::new(400, 400), &PreferredSize).unwrap();
    }

    #[test]
    fn test_children_at_offsets() {
        let (mut tree, root, free) = fixture();
        let a = child(&mut tree, free, "15", "30");
        run(&mut tree, root);
        assert_eq!(tree.geometry(a), Rect::new(15, 30, 20, 10));
    }

    #[test]
    fn test_out_of_range_and_malformed_hidden() {
        let (mut tree, root, free) = fixture();
        let right = child(&mut tree, free, "200", "0");
        let above = child(&mut tree, free, "0", "-1");
        let junk = child(&mut tree, free, "ten", "0");
        let fine = child(&mut tree, free, "199", "99");
        run(&mut tree, root);

        for id in [right, above, junk] {
            assert!(tree.component(id).unwrap().is_layout_hidden(), "{id} should be hidden");
        }
        assert!(!tree.component(fine).unwrap().is_layout_hidden());
    }

    #[test]
    fn test_fill_parent_extent_is_unbounded() {
        let (mut tree, root, free) = fixture();
        tree.set_property(free, props::WIDTH, "-2").unwrap();
        let far = child(&mut tree, free, "5000", "0");
        run(&mut tree, root);
        assert!(!tree.component(far).unwrap().is_layout_hidden());
    }

    #[test]
    fn test_fill_parent_child_takes_rest() {
        let (mut tree, root, free) = fixture();
        let a = child(&mut tree, free, "50", "20");
        tree.set_property(a, props::WIDTH, "-2").unwrap();
        run(&mut tree, root);
        assert_eq!(tree.geometry(a).width, 150);
    }

    #[test]
    fn test_automatic_size_reports_last_size() {
        let mut tree = ComponentTree::new();
        let root = tree.create("Screen", ComponentKind::Container(StrategyKind::Linear(Axis::Vertical)));
        let free = tree.create("AbsoluteArrangement", ComponentKind::Container(StrategyKind::Absolute));
        tree.add_child(root, free).unwrap();
        run(&mut tree, root);
        let config = LayoutConfig::default();
        assert_eq!(tree.geometry(free).size(), config.free_form_empty);

        child(&mut tree, free, "0", "0");
        run(&mut tree, root);
        assert_eq!(tree.geometry(free).size(), config.free_form_empty);
    }

    #[test]
    fn test_automatic_size_keeps_previous_explicit_size() {
        let (mut tree, root, free) = fixture();
        tree.set_property(free, props::WIDTH, "300").unwrap();
        tree.set_property(free, props::HEIGHT, "250").unwrap();
        child(&mut tree, free, "10", "10");
        run(&mut tree, root);
        assert_eq!(tree.geometry(free).size(), Size::new(300, 250));

        tree.set_property(free, props::WIDTH, "-1").unwrap();
        tree.set_property(free, props::HEIGHT, "-1").unwrap();
        run(&mut tree, root);
        assert_eq!(tree.geometry(free).size(), Size::new(300, 250));
    }

    #[test]
    fn test_drop_with_extreme_grab_is_clamped() {
        let (mut tree, root, free) = fixture();
        run(&mut tree, root);
        let strategy = tree.strategy(free).unwrap();

        let far = strategy
            .resolve_drop(Size::new(20, 10), Point::new(50, 40), Point::new(i32::MIN, 0))
            .unwrap();
        assert_eq!(far.target, DropTarget::At(Point::new(199, 40)));

        let near = strategy
            .resolve_drop(Size::new(20, 10), Point::new(50, 40), Point::new(0, i32::MAX))
            .unwrap();
        assert_eq!(near.target, DropTarget::At(Point::new(50, 0)));
    }

    #[test]
    fn test_drop_resolution() {
        let (mut tree, root, free) = fixture();
        run(&mut tree, root);
        let strategy = tree.strategy(free).unwrap();

        let inside = strategy
            .resolve_drop(Size::new(20, 10), Point::new(50, 40), Point::new(5, 5))
            .unwrap();
        assert_eq!(inside.target, DropTarget::At(Point::new(45, 35)));
        assert_eq!(inside.indicator, DropIndicator::Outline(Rect::new(45, 35, 20, 10)));

        let clamped = strategy
            .resolve_drop(Size::new(20, 10), Point::new(2, 2), Point::new(10, 10))
            .unwrap();
        assert_eq!(clamped.target, DropTarget::At(Point::ORIGIN));

        assert!(strategy.resolve_drop(Size::ZERO, Point::new(200, 5), Point::ORIGIN).is_none());
        assert!(strategy.resolve_drop(Size::ZERO, Point::new(-1, 5), Point::ORIGIN).is_none());
    }

    #[test]
    fn test_apply_drop_sets_offsets() {
        let (mut tree, _root, free) = fixture();
        let loose = tree.create("Button", ComponentKind::Visible);
        apply_drop(&mut tree, free, loose, Point::new(12, 34)).unwrap();
        assert_eq!(tree.parent(loose), Some(free));
        assert_eq!(tree.property(loose, props::LEFT), Some("12"));
        assert_eq!(tree.property(loose, props::TOP), Some("34"));
    }
}
