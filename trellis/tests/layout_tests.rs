//! Integration tests for complete layout passes.
//!
//! Every test builds a screen through the public `Designer` API, runs one or
//! more passes and checks the geometry applied to the component tree. Set
//! `RUST_LOG=trellis=debug` to see the pass diagnostics.

use trellis::layout::{LayoutStrategy, SizeHint};
use trellis::{
    props, Axis, ComponentId, ComponentKind, Designer, DropIndicator, LayoutConfig, Point, Rect,
    ScreenMetrics, Size, StrategyKind,
};
use tracing_subscriber::EnvFilter;

/// Test harness wrapping a designer with a fixed 500x800 screen.
struct ScreenTest {
    designer: Designer,
}

impl ScreenTest {
    fn new(config: LayoutConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        Self {
            designer: Designer::new(config, ScreenMetrics::new(500, 800)),
        }
    }

    /// Zero border and spacing, so expected numbers stay readable.
    fn tight() -> Self {
        Self::new(LayoutConfig {
            border: 0,
            spacing: 0,
            ..LayoutConfig::default()
        })
    }

    fn root(&self) -> ComponentId {
        self.designer.root()
    }

    fn container(&mut self, parent: ComponentId, kind: StrategyKind) -> ComponentId {
        self.designer
            .add_component(parent, format!("{kind:?}"), ComponentKind::Container(kind))
            .expect("add container")
    }

    fn leaf(&mut self, parent: ComponentId, kind: ComponentKind, size: Size) -> ComponentId {
        let id = self.designer.add_component(parent, "Leaf", kind).expect("add leaf");
        self.designer.set_preferred_size(id, size).expect("set size");
        id
    }

    fn set(&mut self, id: ComponentId, name: &str, value: &str) {
        self.designer.set_property(id, name, value).expect("set property");
    }

    fn layout(&mut self) {
        self.designer.refresh_now().expect("layout pass");
    }

    fn rect(&self, id: ComponentId) -> Rect {
        self.designer.geometry(id)
    }

    fn hidden(&self, id: ComponentId) -> bool {
        self.designer
            .tree()
            .component(id)
            .is_some_and(|c| c.is_layout_hidden())
    }

    /// Geometry of every component, in creation order.
    fn snapshot(&self) -> Vec<(Rect, bool)> {
        self.designer
            .tree()
            .iter()
            .map(|c| (c.geometry(), c.is_layout_hidden()))
            .collect()
    }
}

// =========================================================================
// Determinism
// =========================================================================

#[test]
fn test_repeated_passes_are_identical() {
    let mut t = ScreenTest::new(LayoutConfig {
        spacing: 3,
        ..LayoutConfig::default()
    });
    let root = t.root();
    let row = t.container(root, StrategyKind::Linear(Axis::Horizontal));
    let grid = t.container(root, StrategyKind::Grid);
    for w in ["-2", "40", "-1030"] {
        let id = t.leaf(row, ComponentKind::Visible, Size::new(25, 12));
        t.set(id, props::WIDTH, w);
    }
    for (r, c) in [("0", "0"), ("1", "1"), ("0", "0")] {
        let id = t.leaf(grid, ComponentKind::Visible, Size::new(30, 18));
        t.set(id, props::ROW, r);
        t.set(id, props::COLUMN, c);
    }

    t.layout();
    let first = t.snapshot();
    t.layout();
    assert_eq!(first, t.snapshot());
}

// =========================================================================
// Linear stacks
// =========================================================================

#[test]
fn test_fill_parent_distribution_floors() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let row = t.container(root, StrategyKind::Linear(Axis::Horizontal));
    t.set(row, props::WIDTH, "500");
    let kids: Vec<_> = (0..3)
        .map(|_| {
            let id = t.leaf(row, ComponentKind::Visible, Size::new(10, 10));
            t.set(id, props::WIDTH, "-2");
            id
        })
        .collect();
    t.layout();

    for &kid in &kids {
        assert_eq!(t.rect(kid).width, 166);
    }
    // The remainder pixels are left unused.
    assert_eq!(t.rect(kids[2]).right(), 498);
}

#[test]
fn test_automatic_height_is_sum() {
    let border = 2;
    let mut t = ScreenTest::new(LayoutConfig {
        spacing: 5,
        border,
        ..LayoutConfig::default()
    });
    let root = t.root();
    let column = t.container(root, StrategyKind::Linear(Axis::Vertical));
    for h in ["10", "20", "30"] {
        let id = t.leaf(column, ComponentKind::Visible, Size::new(10, 99));
        t.set(id, props::HEIGHT, h);
    }
    t.layout();

    let expected = 5 + (10 + border) + 5 + (20 + border) + 5 + (30 + border) + 5;
    assert_eq!(t.rect(column).height, expected);
}

#[test]
fn test_nested_fill_resolves_top_down() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let outer = t.container(root, StrategyKind::Linear(Axis::Horizontal));
    t.set(outer, props::WIDTH, "-2");
    let inner = t.container(outer, StrategyKind::Linear(Axis::Horizontal));
    t.set(inner, props::WIDTH, "-2");
    let leaf = t.leaf(inner, ComponentKind::Visible, Size::new(10, 10));
    t.set(leaf, props::WIDTH, "-2");
    t.layout();

    assert_eq!(t.rect(outer).width, 500);
    assert_eq!(t.rect(inner).width, 500);
    assert_eq!(t.rect(leaf).width, 500);
}

#[test]
fn test_hidden_components_skipped_unless_shown() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    t.leaf(root, ComponentKind::Visible, Size::new(10, 10));
    let b = t.leaf(root, ComponentKind::Visible, Size::new(10, 20));
    let c = t.leaf(root, ComponentKind::Visible, Size::new(10, 30));
    t.set(b, props::VISIBLE, "False");
    t.layout();
    assert_eq!(t.rect(c).y, 10);

    let mut shown = ScreenTest::new(LayoutConfig {
        border: 0,
        show_hidden_components: true,
        ..LayoutConfig::default()
    });
    let root = shown.root();
    shown.leaf(root, ComponentKind::Visible, Size::new(10, 10));
    let hidden = shown.leaf(root, ComponentKind::Visible, Size::new(10, 20));
    let last = shown.leaf(root, ComponentKind::Visible, Size::new(10, 30));
    shown.set(hidden, props::VISIBLE, "False");
    shown.layout();
    assert_eq!(shown.rect(last).y, 30);
}

// =========================================================================
// Size hints
// =========================================================================

#[test]
fn test_percent_tag_round_trip() {
    for p in 0..=100 {
        let encoded = -(p + 1000);
        let hint = SizeHint::from_encoded(encoded).expect("percent tag");
        assert_eq!(hint, SizeHint::Percent(p));
        assert_eq!(hint.encode(), encoded);
    }
}

#[test]
fn test_malformed_hint_never_aborts() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let id = t.leaf(root, ComponentKind::Visible, Size::new(10, 10));
    t.set(id, props::WIDTH, "77");
    t.set(id, props::WIDTH, "seventy");
    t.set(id, props::HEIGHT, "-500");
    t.layout();
    assert_eq!(t.rect(id).size(), Size::new(77, 10));
}

// =========================================================================
// Grid
// =========================================================================

#[test]
fn test_grid_empty_row_uses_default() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let grid = t.container(root, StrategyKind::Grid);
    for column in ["0", "1"] {
        let id = t.leaf(grid, ComponentKind::Visible, Size::new(30, 55));
        t.set(id, props::ROW, "0");
        t.set(id, props::COLUMN, column);
    }
    t.layout();

    let default_row = LayoutConfig::default().grid_empty_row_height;
    assert_eq!(t.rect(grid).height, 55 + default_row);
    let Some(LayoutStrategy::Grid(layout)) = t.designer.tree().strategy(grid) else {
        panic!("expected a grid");
    };
    assert_eq!(layout.tracks().row_heights[1], default_row);
}

#[test]
fn test_grid_conflict_last_wins() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let grid = t.container(root, StrategyKind::Grid);
    let claim = |t: &mut ScreenTest| {
        let id = t.leaf(grid, ComponentKind::Visible, Size::new(10, 10));
        t.set(id, props::ROW, "0");
        t.set(id, props::COLUMN, "0");
        id
    };
    let a = claim(&mut t);
    let b = claim(&mut t);
    // Z and creation time play no part.
    t.set(a, props::Z, "10");
    t.layout();
    assert!(t.hidden(a));
    assert!(!t.hidden(b));

    // Correcting the loser's cell brings it back.
    t.set(a, props::ROW, "1");
    t.layout();
    assert!(!t.hidden(a));
}

// =========================================================================
// Canvas
// =========================================================================

#[test]
fn test_canvas_z_order_is_stable() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let canvas = t.container(root, StrategyKind::Canvas);
    let sprites: Vec<_> = ["2", "1", "2"]
        .into_iter()
        .map(|z| {
            let id = t.designer.create("Sprite", ComponentKind::Sprite);
            t.set(id, props::Z, z);
            t.designer.move_component(id, canvas, usize::MAX).expect("add sprite");
            id
        })
        .collect();

    let Some(LayoutStrategy::Canvas(layout)) = t.designer.tree().strategy(canvas) else {
        panic!("expected a canvas");
    };
    assert_eq!(layout.paint_order(), &[sprites[1], sprites[0], sprites[2]]);
}

// =========================================================================
// Drag and drop
// =========================================================================

#[test]
fn test_absolute_drop_outside_is_rejected() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let free = t.container(root, StrategyKind::Absolute);
    t.set(free, props::WIDTH, "200");
    t.set(free, props::HEIGHT, "100");
    let label = t.leaf(root, ComponentKind::Visible, Size::new(20, 10));
    t.layout();

    for point in [Point::new(200, 10), Point::new(10, 100), Point::new(-1, 0)] {
        let handled = t.designer.drop(free, label, point, Point::ORIGIN).expect("drop");
        assert!(!handled);
        assert_eq!(t.designer.tree().parent(label), Some(root));
        assert_eq!(t.designer.tree().property(label, props::LEFT), None);
    }

    assert!(t.designer.drop(free, label, Point::new(199, 99), Point::new(5, 5)).expect("drop"));
    assert_eq!(t.designer.tree().parent(label), Some(free));
    assert_eq!(t.designer.tree().property(label, props::LEFT), Some("194"));
    assert_eq!(t.designer.tree().property(label, props::TOP), Some("94"));
}

#[test]
fn test_drag_indicator_follows_pointer() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let a = t.leaf(root, ComponentKind::Visible, Size::new(40, 20));
    let b = t.leaf(root, ComponentKind::Visible, Size::new(40, 20));
    let c = t.leaf(root, ComponentKind::Visible, Size::new(40, 20));
    t.layout();

    assert!(t.designer.drag_enter(root, a, Point::new(5, 25), Point::ORIGIN));
    let thickness = t.designer.config().divider_thickness;
    assert_eq!(
        t.designer.drop_indicator(root),
        Some(DropIndicator::Divider(Rect::new(0, 20 - thickness / 2, 500, thickness)))
    );

    t.designer.drag_continue(root, a, Point::new(5, 59), Point::ORIGIN);
    assert_eq!(
        t.designer.drop_indicator(root).map(|i| i.rect().y),
        Some(60 - thickness / 2)
    );

    t.designer.drag_leave(root);
    assert_eq!(t.designer.drop_indicator(root), None);

    assert!(t.designer.drop(root, a, Point::new(5, 59), Point::ORIGIN).expect("drop"));
    assert_eq!(t.designer.tree().children(root), &[b, c, a]);
}

#[test]
fn test_drop_triggers_forced_refresh() {
    let mut t = ScreenTest::tight();
    let root = t.root();
    let column = t.container(root, StrategyKind::Linear(Axis::Vertical));
    let label = t.leaf(root, ComponentKind::Visible, Size::new(40, 20));
    t.layout();

    assert!(t.designer.drop(column, label, Point::new(1, 1), Point::ORIGIN).expect("drop"));
    assert!(t.designer.tick(std::time::Instant::now()).expect("tick"));
    assert_eq!(t.designer.tree().parent(label), Some(column));
    assert_eq!(t.rect(label), Rect::new(0, 0, 40, 20));
}
