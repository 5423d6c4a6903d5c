//! Property names understood by the layout engine.
//!
//! Values are always decimal strings (booleans are `True`/`False`).

pub const WIDTH: &str = "Width";
pub const HEIGHT: &str = "Height";
pub const VISIBLE: &str = "Visible";

// Absolute container children.
pub const LEFT: &str = "Left";
pub const TOP: &str = "Top";

// Grid container and its children.
pub const COLUMNS: &str = "Columns";
pub const ROWS: &str = "Rows";
pub const COLUMN: &str = "Column";
pub const ROW: &str = "Row";

// Canvas and sprites.
pub const X: &str = "X";
pub const Y: &str = "Y";
pub const Z: &str = "Z";
pub const BACKGROUND_IMAGE: &str = "BackgroundImage";

// Linear container alignment.
pub const ALIGN_HORIZONTAL: &str = "AlignHorizontal";
pub const ALIGN_VERTICAL: &str = "AlignVertical";

/// Whether changing `name` can move or resize anything on the canvas.
pub fn affects_layout(name: &str) -> bool {
    matches!(
        name,
        WIDTH
            | HEIGHT
            | VISIBLE
            | LEFT
            | TOP
            | COLUMNS
            | ROWS
            | COLUMN
            | ROW
            | X
            | Y
            | BACKGROUND_IMAGE
            | ALIGN_HORIZONTAL
            | ALIGN_VERTICAL
    )
}

/// Parse a `True`/`False` property value.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "True" | "true" => Some(true),
        "False" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_properties() {
        assert!(affects_layout(WIDTH));
        assert!(affects_layout(COLUMN));
        assert!(!affects_layout(Z));
        assert!(!affects_layout("Text"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
