/// Table configuration.
///
/// Every field has a default, so a config document only needs to name what it
/// changes:
///
/// ```
/// use gridstate::{ColumnOrder, TableConfig};
///
/// let config = TableConfig::from_json(r#"{
///     "searchable_columns": ["Name"],
///     "default_ordering": { "index": 1, "order": "descending" }
/// }"#).unwrap();
///
/// assert_eq!(config.default_ordering, Some(ColumnOrder::descending(1)));
/// assert_eq!(config.minimum_column_width, 70.0);
/// assert!(config.scale_columns_to_fill_frame);
/// ```
use crate::error::GridError;
use crate::layout::{CharacterMeasure, WidthOptions};
use crate::sort::ColumnOrder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Header titles whose cells the search looks at; `None` searches every
    /// column.
    pub searchable_columns: Option<Vec<String>>,
    pub minimum_column_width: f32,
    pub scale_columns_to_fill_frame: bool,
    /// Ordering applied on every load.
    pub default_ordering: Option<ColumnOrder>,
    pub sort_indicator_allowance: f32,
    pub cell_horizontal_margin: f32,
    /// Width of one display column of text, used to measure content.
    pub char_width: f32,
    pub row_height: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            searchable_columns: None,
            minimum_column_width: 70.0,
            scale_columns_to_fill_frame: true,
            default_ordering: None,
            sort_indicator_allowance: 50.0,
            cell_horizontal_margin: 8.0,
            char_width: 7.0,
            row_height: 44.0,
        }
    }
}

impl TableConfig {
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_searchable_columns<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_columns = Some(titles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_default_ordering(mut self, order: ColumnOrder) -> Self {
        self.default_ordering = Some(order);
        self
    }

    pub fn width_options(&self) -> WidthOptions {
        WidthOptions {
            minimum_column_width: self.minimum_column_width,
            sort_indicator_allowance: self.sort_indicator_allowance,
            cell_horizontal_margin: self.cell_horizontal_margin,
            scale_to_fill: self.scale_columns_to_fill_frame,
        }
    }

    pub fn measure(&self) -> CharacterMeasure {
        CharacterMeasure::new(self.char_width)
    }
}
