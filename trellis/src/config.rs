//! Layout configuration and screen metrics.
//!
//! Both values are owned by the host and passed into every layout pass.
//! Nothing here is measured or cached at process level.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::primitives::Size;

/// Numeric constants consulted by the layout strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between adjacent children of a linear stack, and between the
    /// stack's edges and its first/last child.
    pub spacing: i32,
    /// Border allowance added to every child box in linear and grid layouts.
    pub border: i32,
    /// Size reported by an empty linear stack.
    pub linear_empty: Size,
    /// Size reported by an empty absolute or canvas container.
    pub free_form_empty: Size,
    /// Width of a grid column with no visible child.
    pub grid_empty_column_width: i32,
    /// Height of a grid row with no visible child.
    pub grid_empty_row_height: i32,
    /// Thickness of the insertion divider shown while dragging.
    pub divider_thickness: i32,
    /// Extent containers take while their children are being measured.
    pub measure_extent: i32,
    /// Lay out components whose `Visible` property is false.
    pub show_hidden_components: bool,
    /// Debounce interval for refresh requests. Zero means "next turn".
    pub refresh_interval_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 0,
            border: 2,
            linear_empty: Size::new(100, 100),
            free_form_empty: Size::new(160, 120),
            grid_empty_column_width: 60,
            grid_empty_row_height: 40,
            divider_thickness: 2,
            measure_extent: 10_000,
            show_hidden_components: false,
            refresh_interval_ms: 0,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Dimensions of the simulated device screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenMetrics {
    pub width: i32,
    pub height: i32,
    pub title_bar_height: i32,
    /// Measured once by the host and injected here.
    pub scrollbar_width: i32,
    pub scrollable: bool,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            width: 320,
            height: 505,
            title_bar_height: 24,
            scrollbar_width: 0,
            scrollable: false,
        }
    }
}

impl ScreenMetrics {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            title_bar_height: 0,
            scrollbar_width: 0,
            scrollable: false,
        }
    }

    /// Width available to components, the reference for horizontal percents.
    pub fn usable_width(&self) -> i32 {
        let scrollbar = if self.scrollable { self.scrollbar_width } else { 0 };
        self.width.saturating_sub(scrollbar).max(0)
    }

    /// Height available to components, the reference for vertical percents.
    pub fn usable_height(&self) -> i32 {
        self.height.saturating_sub(self.title_bar_height).max(0)
    }
}
