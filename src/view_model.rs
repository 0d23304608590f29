/// Per-row and per-column view state.
///
/// View models are always derived from a `DataModel` and rebuilt whenever it
/// is replaced. They carry transient display state (highlighted column, sort
/// arrow, cached display strings) next to the authoritative data.
use crate::model::{DataModel, Row};
use crate::sort::SortDirection;
use crate::value::CellValue;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// One row as presented to the rendering layer.
///
/// Cloning is cheap: the row and its display strings are shared. Equality and
/// hashing look only at the row's values, never at position or display state.
#[derive(Debug, Clone)]
pub struct RowViewModel {
    row: Rc<Row>,
    display: Rc<[String]>,
    load_index: usize,
    highlighted_column: Option<usize>,
}

impl RowViewModel {
    pub fn new(row: Rc<Row>, load_index: usize) -> Self {
        let display: Rc<[String]> = row.iter().map(CellValue::to_string).collect();
        RowViewModel {
            row,
            display,
            load_index,
            highlighted_column: None,
        }
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn shared_row(&self) -> &Rc<Row> {
        &self.row
    }

    pub fn value(&self, column: usize) -> Option<&CellValue> {
        self.row.get(column)
    }

    /// Cached string representation of one cell.
    pub fn display(&self, column: usize) -> Option<&str> {
        self.display.get(column).map(String::as_str)
    }

    pub fn display_strings(&self) -> &[String] {
        &self.display
    }

    /// Position of this row in the loaded dataset.
    pub fn load_index(&self) -> usize {
        self.load_index
    }

    pub fn highlighted_column(&self) -> Option<usize> {
        self.highlighted_column
    }

    pub fn is_highlighted(&self, column: usize) -> bool {
        self.highlighted_column == Some(column)
    }

    pub fn set_highlighted_column(&mut self, column: Option<usize>) {
        self.highlighted_column = column;
    }

    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }
}

impl PartialEq for RowViewModel {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.row, &other.row) || *self.row == *other.row
    }
}

impl Eq for RowViewModel {}

impl Hash for RowViewModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
    }
}

/// A header or footer title with its sort arrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderViewModel {
    title: String,
    column: usize,
    sort: SortDirection,
}

impl HeaderViewModel {
    pub fn new(title: impl Into<String>, column: usize) -> Self {
        HeaderViewModel {
            title: title.into(),
            column,
            sort: SortDirection::Unspecified,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortDirection) {
        self.sort = sort;
    }
}

/// Build one view model per loaded row, in load order.
pub fn build_rows(model: &DataModel) -> Vec<RowViewModel> {
    model
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| RowViewModel::new(Rc::new(row.clone()), index))
        .collect()
}

pub fn build_headers(model: &DataModel) -> Vec<HeaderViewModel> {
    model
        .header_titles()
        .iter()
        .enumerate()
        .map(|(column, title)| HeaderViewModel::new(title.as_str(), column))
        .collect()
}

pub fn build_footers(model: &DataModel) -> Vec<HeaderViewModel> {
    model
        .footer_titles()
        .iter()
        .enumerate()
        .map(|(column, title)| HeaderViewModel::new(title.as_str(), column))
        .collect()
}
