/// GridState - State Engine for Interactive Data Tables
///
/// Keeps a sorted, filtered and width-fitted view of tabular data, and reports
/// the row insertions and deletions needed to move a display from one view to
/// the next. Rendering is left to the embedding widget, which talks to the
/// engine through plain function calls and the `RenderingHost` trait.

pub mod value;
pub mod model;
pub mod view_model;
pub mod sort;
pub mod filter;
pub mod diff;
pub mod layout;
pub mod config;
pub mod host;
pub mod table;
pub mod error;

pub use value::{CellKind, CellValue};
pub use model::{DataModel, Row};
pub use view_model::{HeaderViewModel, RowViewModel};
pub use sort::{sort_rows, next_header_states, ColumnOrder, ComparePolicy, SortDirection};
pub use filter::FilterEngine;
pub use diff::{diff, RowChange, RowDiff};
pub use layout::{compute_widths, CharacterMeasure, TextMeasure, WidthOptions};
pub use config::TableConfig;
pub use host::{DataSource, DetachedHost, RenderingHost, StaticSource};
pub use table::{DataTable, ViewUpdate};
pub use error::GridError;
