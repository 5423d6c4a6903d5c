//! Layout engine for Trellis
//!
//! Resolves size hints into pixel geometry for a nested container tree and
//! answers drop-target queries while a component is dragged.
//!
//! # Architecture
//!
//! ```text
//! gather (bottom-up: hints + automatic sizes)
//!   -> strategies (top-down: fill-parent distribution + positions)
//!   -> finish (drain LayoutInfo map, apply to tree)
//! ```
//!
//! Each pass builds its own `LayoutPass`; nothing pass-related is stored on
//! the components except the final geometry and each strategy's last
//! resolved size and drop-target tracks.

pub mod hint;
pub mod info;
pub mod context;
pub mod drop;

// Strategies
pub mod strategy;
pub mod absolute;
pub mod canvas;
pub mod grid;
pub mod linear;

pub mod gather;

// Re-export core types
pub use hint::{Axis, Dimension, Resolved, SizeHint, LENGTH_AUTOMATIC, LENGTH_FILL_PARENT, LENGTH_MAX, LENGTH_PERCENT_TAG};
pub use info::{LayoutInfo, LayoutRecord};
pub use context::{LayoutPass, Placement};
pub use drop::{DropIndicator, DropLocation, DropTarget};
pub use gather::{gather, run_pass};

// Re-export strategies
pub use strategy::{LayoutStrategy, StrategyKind};
pub use absolute::AbsoluteLayout;
pub use canvas::CanvasLayout;
pub use grid::{GridLayout, GridTracks};
pub use linear::{Alignment, LinearLayout, LinearTracks};
