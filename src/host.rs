/// Capabilities supplied by the embedding application.
///
/// The engine never reaches out to the widget that draws it. Instead the widget
/// hands in a `RenderingHost` at construction time: the engine queries it for
/// layout facts and tells it when the sort or filter state changed. Data can be
/// pulled in through a `DataSource` on reload.
use crate::sort::ColumnOrder;
use crate::value::CellValue;

/// Pull-style provider of a complete dataset.
pub trait DataSource {
    fn number_of_columns(&self) -> usize;

    fn header_title(&self, column: usize) -> String;

    fn number_of_rows(&self) -> usize;

    fn row(&self, index: usize) -> Vec<CellValue>;

    fn footer_titles(&self) -> Option<Vec<String>> {
        None
    }
}

/// The rendering layer as seen from the engine.
///
/// Only `frame_width` is required. Every override returns `None` to fall back
/// to the table's configuration, and both notifications default to no-ops.
pub trait RenderingHost {
    /// Width available to the columns.
    fn frame_width(&self) -> f32;

    fn row_height(&self, _position: usize) -> Option<f32> {
        None
    }

    /// Fixed width for a column, bypassing automatic sizing.
    fn column_width(&self, _column: usize) -> Option<f32> {
        None
    }

    fn scale_to_fill(&self) -> Option<bool> {
        None
    }

    fn on_sort_changed(&mut self, _order: Option<ColumnOrder>) {}

    fn on_filter_changed(&mut self, _search_text: &str, _filters: &[String], _visible_rows: usize) {}
}

/// Host used when none is injected: zero frame width and no overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl RenderingHost for DetachedHost {
    fn frame_width(&self) -> f32 {
        0.0
    }
}

/// A `DataSource` over in-memory rows, handy for reloads in tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub header_titles: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub footer_titles: Option<Vec<String>>,
}

impl DataSource for StaticSource {
    fn number_of_columns(&self) -> usize {
        self.header_titles.len()
    }

    fn header_title(&self, column: usize) -> String {
        self.header_titles.get(column).cloned().unwrap_or_default()
    }

    fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Vec<CellValue> {
        self.rows.get(index).cloned().unwrap_or_default()
    }

    fn footer_titles(&self) -> Option<Vec<String>> {
        self.footer_titles.clone()
    }
}
