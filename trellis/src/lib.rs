//! Trellis: design-time layout for a drag-and-drop screen builder
//!
//! Given a tree of mock components carrying sizing hints (pixels,
//! automatic, fill parent, percent of screen), Trellis computes the pixel
//! geometry a designer canvas needs to preview the screen, and the drop
//! indicator geometry shown while components are dragged around.
//!
//! # Usage
//!
//! ```
//! use trellis::{ComponentKind, Designer, LayoutConfig, ScreenMetrics, Size};
//!
//! let mut designer = Designer::new(LayoutConfig::default(), ScreenMetrics::default());
//! let root = designer.root();
//! let button = designer.add_component(root, "Button", ComponentKind::Visible).unwrap();
//! designer.set_preferred_size(button, Size::new(80, 30)).unwrap();
//! designer.set_property(button, "Width", "-2").unwrap();
//! designer.refresh_now().unwrap();
//!
//! let usable = designer.screen().usable_width();
//! assert_eq!(designer.geometry(button).width, usable - designer.config().border);
//! ```

// Core primitives
pub mod primitives;
pub mod error;
pub mod config;

// Component model
pub mod component;

// Layout engine (hints, strategies, gathering, drop targets)
pub mod layout;

// Host-facing surface
pub mod scheduler;
pub mod designer;

// Re-export core types
pub use primitives::{Point, Rect, Size};
pub use error::LayoutError;
pub use config::{LayoutConfig, ScreenMetrics};
pub use component::{props, Component, ComponentId, ComponentKind, ComponentTree, Measure, PreferredSize};
pub use layout::{
    Axis, DropIndicator, DropLocation, DropTarget, LayoutStrategy, SizeHint, StrategyKind,
};
pub use scheduler::RefreshScheduler;
pub use designer::Designer;
