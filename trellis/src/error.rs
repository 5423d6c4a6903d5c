//! Layout error types.

use thiserror::Error;

use crate::component::ComponentId;

/// Errors raised for construction-time or tree-structure misuse.
///
/// Malformed property values never produce one of these; they are logged
/// and recovered from inside the layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("illegal orientation: {0}")]
    IllegalOrientation(String),

    #[error("illegal layout strategy: {0}")]
    IllegalStrategy(String),

    #[error("unknown component: {0}")]
    UnknownComponent(ComponentId),

    #[error("component {0} is not a container")]
    NotAContainer(ComponentId),

    #[error("cannot place {child} inside its own descendant {parent}")]
    Cycle { child: ComponentId, parent: ComponentId },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
