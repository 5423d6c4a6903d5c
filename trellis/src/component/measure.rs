//! Natural-size measurement of leaf components.

use super::Component;
use crate::primitives::Size;

/// Reports how large a leaf wants to be when its hint is automatic.
///
/// `available` is the extent of the enclosing container at measuring time.
/// Containers whose own size is not yet known are over-sized to the
/// configured measure extent, so content that wraps is measured unwrapped.
pub trait Measure {
    fn preferred_size(&self, component: &Component, available: Size) -> Size;
}

/// Returns the size the host stored with `ComponentTree::set_preferred_size`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferredSize;

impl Measure for PreferredSize {
    fn preferred_size(&self, component: &Component, _available: Size) -> Size {
        component.preferred_size()
    }
}

impl<F> Measure for F
where
    F: Fn(&Component, Size) -> Size,
{
    fn preferred_size(&self, component: &Component, available: Size) -> Size {
        self(component, available)
    }
}
