//! Two-phase dimension gathering.
//!
//! Phase one walks the tree bottom-up: every component gets a `LayoutInfo`
//! with its hints resolved and its automatic size measured. Containers are
//! over-sized while their children are measured, so a child's natural size
//! is never clipped by a parent whose own size is still unknown.
//!
//! Phase two is top-down: starting at the root, each container's strategy
//! distributes fill-parent space and positions its children, recursing
//! into nested containers. The finished map is drained and applied to the
//! tree.

use crate::component::{ComponentId, ComponentTree, Measure};
use crate::config::{LayoutConfig, ScreenMetrics};
use crate::error::LayoutError;
use crate::primitives::{Point, Size};

use super::context::LayoutPass;
use super::hint::{Axis, Dimension, Resolved};
use super::info::LayoutInfo;
use super::strategy::layout_container;

/// Bottom-up phase for the subtree at `id`.
///
/// `available` is the extent the parent offers while measuring; leaves pass
/// it on to the measurer.
pub fn gather(pass: &mut LayoutPass<'_>, id: ComponentId, available: Size) {
    let tree = pass.tree;
    let children = tree.visible_children(id, pass.show_hidden());
    pass.insert(LayoutInfo::new(id, children.clone()));

    let width = tree.hint(id, Axis::Horizontal).resolve(pass.reference(Axis::Horizontal));
    let height = tree.hint(id, Axis::Vertical).resolve(pass.reference(Axis::Vertical));

    // Children are measured against our explicit size, or against an
    // over-sized extent when ours depends on them.
    let extent = pass.config.measure_extent;
    let offered = Size::new(explicit_or(width, extent), explicit_or(height, extent));
    for &child in &children {
        gather(pass, child, offered);
    }

    let automatic = match tree.strategy(id) {
        Some(strategy) => strategy.automatic_size(pass, id),
        None => pass.measure(id, available),
    };

    if let Some(info) = pass.info_mut(id) {
        info.automatic = automatic;
        info.width = dimension(width, automatic.width);
        info.height = dimension(height, automatic.height);
    }
}

#[inline]
fn explicit_or(resolved: Resolved, fallback: i32) -> i32 {
    match resolved {
        Resolved::Pixels(px) => px,
        Resolved::Automatic | Resolved::FillParent => fallback,
    }
}

#[inline]
fn dimension(resolved: Resolved, automatic: i32) -> Dimension {
    match resolved {
        Resolved::Pixels(px) => Dimension::Px(px),
        Resolved::Automatic => Dimension::Px(automatic),
        Resolved::FillParent => Dimension::FillParent,
    }
}

/// Run a complete layout pass rooted at the screen container `root` and
/// apply the results to `tree`. Returns the number of components placed.
///
/// The root always spans the usable screen width. Its height is the usable
/// height, or its automatic height when that is larger and the screen
/// scrolls.
pub fn run_pass(
    tree: &mut ComponentTree,
    root: ComponentId,
    config: &LayoutConfig,
    screen: &ScreenMetrics,
    measure: &dyn Measure,
) -> Result<usize, LayoutError> {
    if !tree.get(root)?.kind().is_container() {
        return Err(LayoutError::NotAContainer(root));
    }

    let span = tracing::debug_span!("layout_pass", root = %root, nodes = tree.len());
    let _guard = span.enter();

    let placements = {
        let mut pass = LayoutPass::new(tree, config, screen, measure);
        let usable = Size::new(screen.usable_width(), screen.usable_height());
        gather(&mut pass, root, usable);

        if let Some(info) = pass.info_mut(root) {
            let height = if screen.scrollable {
                usable.height.max(info.automatic.height)
            } else {
                usable.height
            };
            info.width = Dimension::Px(usable.width);
            info.height = Dimension::Px(height);
            info.position = Point::ORIGIN;
        }
        layout_container(&mut pass, root);
        pass.finish()
    };

    let placed = placements.len();
    for placement in placements {
        tree.apply_geometry(placement.id, placement.rect, placement.hidden);
        if let Some(strategy) = tree.strategy_mut(placement.id) {
            strategy.finish_pass(placement.rect.size(), placement.record);
        }
    }
    tracing::debug!(placed, "layout pass complete");
    Ok(placed)
}
