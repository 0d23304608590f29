/// GridState Data Model
///
/// A `DataModel` owns everything loaded into a table: header titles, optional
/// footer titles and the full row set. It is validated once at construction
/// and never mutated afterwards; reloading a table builds a new model.
///
/// # Examples
///
/// ```
/// use gridstate::{CellValue, DataModel};
///
/// let model = DataModel::load(
///     vec![
///         vec![CellValue::from("Bob"), CellValue::Int(30)],
///         vec![CellValue::from("Amy"), CellValue::Int(25)],
///     ],
///     vec!["Name".to_string(), "Age".to_string()],
/// ).unwrap();
///
/// assert_eq!(model.column_count(), 2);
/// assert_eq!(model.row_count(), 2);
/// assert_eq!(model.value(1, 0).unwrap().as_str(), Some("Amy"));
///
/// // Rows must have one value per header
/// assert!(DataModel::load(vec![vec![CellValue::Nil]], vec!["A".into(), "B".into()]).is_err());
/// ```
use crate::error::GridError;
use crate::host::DataSource;
use crate::layout::TextMeasure;
use crate::value::CellValue;
use std::ops::Index;

/// One row of cell values, one per column.
///
/// Equality and hashing are over the values, which is what lets the diff
/// recognise the same logical row across rebuilds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Row(Vec<CellValue>);

impl Row {
    pub fn new(values: Vec<CellValue>) -> Self {
        Row(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<&CellValue> {
        self.0.get(column)
    }

    pub fn values(&self) -> &[CellValue] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellValue> {
        self.0.iter()
    }
}

impl Index<usize> for Row {
    type Output = CellValue;

    fn index(&self, column: usize) -> &CellValue {
        &self.0[column]
    }
}

impl From<Vec<CellValue>> for Row {
    fn from(values: Vec<CellValue>) -> Self {
        Row(values)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a CellValue;
    type IntoIter = std::slice::Iter<'a, CellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Immutable storage for one loaded dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataModel {
    header_titles: Vec<String>,
    footer_titles: Vec<String>,
    rows: Vec<Row>,
}

impl DataModel {
    /// Validate and take ownership of a dataset.
    ///
    /// Fails with `ShapeMismatch` on the first row whose length differs from
    /// the number of headers.
    pub fn load(rows: Vec<Vec<CellValue>>, header_titles: Vec<String>) -> Result<Self, GridError> {
        let expected = header_titles.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(GridError::ShapeMismatch {
                row: Some(index),
                expected,
                found: row.len(),
            });
        }

        Ok(DataModel {
            header_titles,
            footer_titles: Vec::new(),
            rows: rows.into_iter().map(Row::from).collect(),
        })
    }

    /// Load a dataset where every cell is a string.
    pub fn from_strings<S: Into<String>>(
        rows: Vec<Vec<S>>,
        header_titles: Vec<String>,
    ) -> Result<Self, GridError> {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| CellValue::String(s.into())).collect())
            .collect();
        Self::load(rows, header_titles)
    }

    /// Load a dataset from a JSON array of arrays.
    ///
    /// ```
    /// use gridstate::{CellValue, DataModel};
    ///
    /// let model = DataModel::from_json(
    ///     r#"[["Amy", 25, true], ["Bob", null, false]]"#,
    ///     vec!["Name".into(), "Age".into(), "Active".into()],
    /// ).unwrap();
    /// assert_eq!(model.value(0, 1), Some(&CellValue::Int(25)));
    /// assert_eq!(model.value(1, 1), Some(&CellValue::Nil));
    /// ```
    pub fn from_json(json: &str, header_titles: Vec<String>) -> Result<Self, GridError> {
        let raw: Vec<Vec<serde_json::Value>> = serde_json::from_str(json)?;

        let mut rows = Vec::with_capacity(raw.len());
        for (row_index, raw_row) in raw.iter().enumerate() {
            let mut row = Vec::with_capacity(raw_row.len());
            for (column, value) in raw_row.iter().enumerate() {
                let cell = CellValue::from_json(value).ok_or(GridError::UnsupportedJson {
                    row: row_index,
                    column,
                })?;
                row.push(cell);
            }
            rows.push(row);
        }

        Self::load(rows, header_titles)
    }

    /// Pull a complete dataset out of a data source.
    pub fn from_source(source: &dyn DataSource) -> Result<Self, GridError> {
        let header_titles: Vec<String> = (0..source.number_of_columns())
            .map(|column| source.header_title(column))
            .collect();
        let rows: Vec<Vec<CellValue>> = (0..source.number_of_rows())
            .map(|index| source.row(index))
            .collect();

        let model = Self::load(rows, header_titles)?;
        match source.footer_titles() {
            Some(footers) => model.with_footers(footers),
            None => Ok(model),
        }
    }

    /// Attach footer titles, one per column.
    pub fn with_footers(mut self, footer_titles: Vec<String>) -> Result<Self, GridError> {
        if footer_titles.len() != self.column_count() {
            return Err(GridError::ShapeMismatch {
                row: None,
                expected: self.column_count(),
                found: footer_titles.len(),
            });
        }
        self.footer_titles = footer_titles;
        Ok(self)
    }

    pub fn column_count(&self) -> usize {
        self.header_titles.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header_titles(&self) -> &[String] {
        &self.header_titles
    }

    pub fn header_title(&self, column: usize) -> Option<&str> {
        self.header_titles.get(column).map(String::as_str)
    }

    pub fn footer_titles(&self) -> &[String] {
        &self.footer_titles
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn value(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Mean measured width of the string representations in one column.
    ///
    /// Only used for sizing. An empty dataset has an average of zero.
    pub fn average_content_width(
        &self,
        column: usize,
        measure: &dyn TextMeasure,
    ) -> Result<f32, GridError> {
        GridError::check_index(column, self.column_count())?;

        if self.rows.is_empty() {
            return Ok(0.0);
        }

        let total: f32 = self
            .rows
            .iter()
            .map(|row| measure.measure(&row[column].to_string()))
            .sum();

        Ok(total / self.rows.len() as f32)
    }
}
