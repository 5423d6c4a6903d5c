//! Grid ("table") arrangement.
//!
//! Children are addressed by integer `Row`/`Column` properties inside a
//! fixed `Rows` x `Columns` grid. Tracks are sized to their largest
//! occupant; a child that cannot be placed (missing, malformed or out of
//! range cell, or a cell claimed again later in the child list) is hidden
//! for the pass but stays in the tree.

use crate::component::{self, props, ComponentId, ComponentTree};
use crate::error::LayoutError;
use crate::primitives::{Point, Rect, Size};

use super::context::LayoutPass;
use super::drop::{DropIndicator, DropLocation, DropTarget};
use super::hint::{Axis, Dimension};
use super::info::LayoutRecord;
use super::strategy::{layout_container, StrategyState};

/// Default grid shape for a freshly created container.
pub const DEFAULT_COLUMNS: usize = 2;
pub const DEFAULT_ROWS: usize = 2;

/// Track geometry kept after a pass for drop-target resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridTracks {
    pub column_lefts: Vec<i32>,
    pub column_widths: Vec<i32>,
    pub row_tops: Vec<i32>,
    pub row_heights: Vec<i32>,
}

impl GridTracks {
    fn from_sizes(column_widths: Vec<i32>, row_heights: Vec<i32>) -> Self {
        Self {
            column_lefts: prefix_sums(&column_widths),
            row_tops: prefix_sums(&row_heights),
            column_widths,
            row_heights,
        }
    }

    pub fn width(&self) -> i32 {
        total(&self.column_widths)
    }

    pub fn height(&self) -> i32 {
        total(&self.row_heights)
    }

    /// Bounds of a cell relative to the container.
    pub fn cell_rect(&self, row: usize, column: usize) -> Option<Rect> {
        Some(Rect::new(
            *self.column_lefts.get(column)?,
            *self.row_tops.get(row)?,
            *self.column_widths.get(column)?,
            *self.row_heights.get(row)?,
        ))
    }

    /// Cell under `point`, `None` outside the grid.
    pub fn cell_at(&self, point: Point) -> Option<(usize, usize)> {
        let column = track_at(&self.column_lefts, &self.column_widths, point.x)?;
        let row = track_at(&self.row_tops, &self.row_heights, point.y)?;
        Some((row, column))
    }
}

/// First track whose cumulative end lies beyond `offset`.
fn track_at(starts: &[i32], sizes: &[i32], offset: i32) -> Option<usize> {
    if offset < 0 {
        return None;
    }
    starts
        .iter()
        .zip(sizes)
        .position(|(&start, &size)| offset < start.saturating_add(size))
}

fn total(sizes: &[i32]) -> i32 {
    sizes.iter().fold(0, |sum, &size| sum.saturating_add(size))
}

fn prefix_sums(sizes: &[i32]) -> Vec<i32> {
    sizes
        .iter()
        .scan(0i32, |acc, &size| {
            let start = *acc;
            *acc = start.saturating_add(size);
            Some(start)
        })
        .collect()
}

/// Result of assigning children to cells.
struct CellAssignment {
    /// Row-major occupant of every cell.
    cells: Vec<Option<ComponentId>>,
    /// Children that lost their cell or have none.
    hidden: Vec<ComponentId>,
}

#[derive(Debug, Clone)]
pub struct GridLayout {
    columns: usize,
    rows: usize,
    pub(crate) state: StrategyState,
    pub(crate) tracks: GridTracks,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl GridLayout {
    pub fn new() -> Self {
        Self::with_shape(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }

    pub fn with_shape(columns: usize, rows: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
            state: StrategyState::default(),
            tracks: GridTracks::default(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tracks(&self) -> &GridTracks {
        &self.tracks
    }

    /// React to a property change on the owning container.
    pub(crate) fn property_changed(&mut self, id: ComponentId, name: &str, value: &str) {
        let slot = match name {
            props::COLUMNS => &mut self.columns,
            props::ROWS => &mut self.rows,
            _ => return,
        };
        match value.trim().parse::<usize>() {
            Ok(count) if count >= 1 => *slot = count,
            _ => {
                tracing::warn!(component = %id, property = name, value, "invalid grid shape, keeping previous");
            }
        }
    }

    fn assign_cells(&self, tree: &ComponentTree, children: &[ComponentId]) -> CellAssignment {
        let mut cells = vec![None; self.rows * self.columns];
        let mut hidden = Vec::new();

        for &child in children {
            match self.cell_of(tree, child) {
                Some((row, column)) => {
                    // Last child in list order wins the cell.
                    if let Some(previous) = cells[row * self.columns + column].replace(child) {
                        tracing::debug!(component = %previous, winner = %child, row, column, "grid cell conflict");
                        hidden.push(previous);
                    }
                }
                None => hidden.push(child),
            }
        }
        CellAssignment { cells, hidden }
    }

    fn cell_of(&self, tree: &ComponentTree, child: ComponentId) -> Option<(usize, usize)> {
        let component = tree.component(child)?;
        let row = read_index(component, props::ROW)?;
        let column = read_index(component, props::COLUMN)?;
        if row >= self.rows || column >= self.columns {
            tracing::debug!(component = %child, row, column, "grid cell out of range, hiding");
            return None;
        }
        Some((row, column))
    }

    /// Column widths and row heights for the current assignment.
    fn track_sizes(&self, pass: &LayoutPass<'_>, cells: &[Option<ComponentId>]) -> (Vec<i32>, Vec<i32>) {
        let border = pass.config.border;
        let occupant = |row: usize, column: usize| {
            cells[row * self.columns + column].and_then(|id| pass.info(id))
        };

        let column_widths = (0..self.columns)
            .map(|column| {
                (0..self.rows)
                    .filter_map(|row| occupant(row, column))
                    .map(|info| info.length_or_automatic(Axis::Horizontal).saturating_add(border))
                    .max()
                    .unwrap_or(pass.config.grid_empty_column_width)
            })
            .collect();

        let row_heights = (0..self.rows)
            .map(|row| {
                let infos: Vec<_> = (0..self.columns).filter_map(|column| occupant(row, column)).collect();
                if infos.is_empty() {
                    return pass.config.grid_empty_row_height;
                }
                infos
                    .iter()
                    .filter_map(|info| info.height.px())
                    .map(|h| h.saturating_add(border))
                    .max()
                    .unwrap_or_else(|| {
                        infos
                            .iter()
                            .map(|info| info.automatic(Axis::Vertical).saturating_add(border))
                            .max()
                            .unwrap_or(0)
                    })
            })
            .collect();

        (column_widths, row_heights)
    }

    pub(crate) fn automatic_size(&self, pass: &LayoutPass<'_>, id: ComponentId) -> Size {
        let children = pass.visible_children(id);
        let assignment = self.assign_cells(pass.tree, &children);
        let (widths, heights) = self.track_sizes(pass, &assignment.cells);
        let tracks = GridTracks::from_sizes(widths, heights);
        Size::new(tracks.width(), tracks.height())
    }

    pub(crate) fn layout_children(&self, pass: &mut LayoutPass<'_>, id: ComponentId) {
        let border = pass.config.border;
        let children = pass.visible_children(id);
        let assignment = self.assign_cells(pass.tree, &children);

        for &child in &assignment.hidden {
            if let Some(info) = pass.info_mut(child) {
                info.hidden = true;
            }
        }

        let (widths, heights) = self.track_sizes(pass, &assignment.cells);
        let tracks = GridTracks::from_sizes(widths, heights);

        for (cell, occupant) in assignment.cells.iter().enumerate() {
            let Some(child) = *occupant else {
                continue;
            };
            let (row, column) = (cell / self.columns, cell % self.columns);
            let row_height = tracks.row_heights[row];
            if let Some(info) = pass.info_mut(child) {
                info.width = Dimension::Px(tracks.column_widths[column].saturating_sub(border).max(0));
                if info.height.is_fill_parent() {
                    info.height = Dimension::Px(row_height.saturating_sub(border).max(0));
                }
            }

            layout_container(pass, child);

            if let Some(info) = pass.info_mut(child) {
                let box_height = info.length_or_automatic(Axis::Vertical).saturating_add(border);
                info.position = Point::new(
                    tracks.column_lefts[column],
                    tracks.row_tops[row].saturating_add((row_height.saturating_sub(box_height) / 2).max(0)),
                );
            }
        }

        tracing::debug!(
            container = %id,
            rows = self.rows,
            columns = self.columns,
            hidden = assignment.hidden.len(),
            "grid layout"
        );
        if let Some(info) = pass.info_mut(id) {
            info.record = LayoutRecord::Grid(tracks);
        }
    }

    pub(crate) fn resolve_drop(&self, point: Point) -> Option<DropLocation> {
        self.state.layout_size?;
        let (row, column) = self.tracks.cell_at(point)?;
        let rect = self.tracks.cell_rect(row, column)?;
        Some(DropLocation {
            target: DropTarget::Cell { row, column },
            indicator: DropIndicator::Cell(rect),
        })
    }
}

/// Parse a non-negative cell index. Missing or malformed values yield
/// `None` so the child is hidden.
fn read_index(component: &component::Component, name: &str) -> Option<usize> {
    match component::parse_int(component, name)? {
        Ok(value) => usize::try_from(value).ok(),
        Err(raw) => {
            tracing::warn!(component = %component.id(), property = name, value = %raw, "malformed grid index, hiding");
            None
        }
    }
}

/// Put `source` into `row`/`column` of `container`. The source is moved to
/// the end of the child list so it wins the cell over any current occupant.
pub(crate) fn apply_drop(
    tree: &mut ComponentTree,
    container: ComponentId,
    source: ComponentId,
    row: usize,
    column: usize,
) -> Result<(), LayoutError> {
    let end = tree.children(container).len();
    tree.move_component(source, container, end)?;
    tree.set_property(source, props::ROW, row.to_string())?;
    tree.set_property(source, props::COLUMN, column.to_string())?;
    Ok(())
}
