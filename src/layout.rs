/// Column Width Calculation
///
/// Widths are derived from the data rather than stored: each column is as wide
/// as the largest of its average content width (plus room for the sort arrow
/// and cell margins), its header label and a configured minimum. When the
/// columns together are narrower than the frame, the leftover space is shared
/// out in proportion to each column's width. When they are wider, nothing is
/// shrunk; the rendering layer scrolls horizontally instead.
use crate::error::GridError;
use crate::model::DataModel;
use unicode_width::UnicodeWidthStr;

/// Estimates the rendered width of a piece of text.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

/// Measures text as its terminal display width times a fixed character width.
///
/// Wide (CJK) characters count as two columns, combining marks as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMeasure {
    pub char_width: f32,
}

impl CharacterMeasure {
    pub fn new(char_width: f32) -> Self {
        CharacterMeasure { char_width }
    }
}

impl TextMeasure for CharacterMeasure {
    fn measure(&self, text: &str) -> f32 {
        UnicodeWidthStr::width(text) as f32 * self.char_width
    }
}

impl<F: Fn(&str) -> f32> TextMeasure for F {
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Sizing parameters for `compute_widths`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthOptions {
    pub minimum_column_width: f32,
    /// Room reserved in every column for the sort arrow.
    pub sort_indicator_allowance: f32,
    /// Padding on each side of a cell's content.
    pub cell_horizontal_margin: f32,
    pub scale_to_fill: bool,
}

impl Default for WidthOptions {
    fn default() -> Self {
        WidthOptions {
            minimum_column_width: 70.0,
            sort_indicator_allowance: 50.0,
            cell_horizontal_margin: 8.0,
            scale_to_fill: true,
        }
    }
}

/// Width a column wants before any fill is applied.
pub fn automatic_width(
    model: &DataModel,
    column: usize,
    options: &WidthOptions,
    measure: &dyn TextMeasure,
) -> Result<f32, GridError> {
    let average = model.average_content_width(column, measure)?;
    let content = average + options.sort_indicator_allowance + options.cell_horizontal_margin * 2.0;
    let header = model
        .header_title(column)
        .map(|title| measure.measure(title))
        .unwrap_or(0.0);

    Ok(content.max(options.minimum_column_width).max(header))
}

/// One width per column, filled out to `frame_width` when enabled.
///
/// # Examples
///
/// ```
/// use gridstate::{layout, CharacterMeasure, DataModel, WidthOptions};
///
/// let model = DataModel::from_strings(
///     vec![vec!["12345678", "12345678", "12345678"]],
///     vec!["A".into(), "B".into(), "C".into()],
/// ).unwrap();
/// let options = WidthOptions {
///     minimum_column_width: 70.0,
///     sort_indicator_allowance: 0.0,
///     cell_horizontal_margin: 0.0,
///     scale_to_fill: true,
/// };
///
/// let widths = layout::compute_widths(&model, 300.0, &options, &CharacterMeasure::new(10.0));
/// assert_eq!(widths, vec![100.0, 100.0, 100.0]);
/// ```
pub fn compute_widths(
    model: &DataModel,
    frame_width: f32,
    options: &WidthOptions,
    measure: &dyn TextMeasure,
) -> Vec<f32> {
    let widths: Vec<f32> = (0..model.column_count())
        .filter_map(|column| automatic_width(model, column, options, measure).ok())
        .collect();

    if options.scale_to_fill {
        scale_to_fill(widths, frame_width)
    } else {
        widths
    }
}

/// Spread `frame_width - sum(widths)` over the columns proportionally.
///
/// Each share is computed from the original widths in a single pass. Widths
/// that already meet or exceed the frame are returned untouched.
pub fn scale_to_fill(mut widths: Vec<f32>, frame_width: f32) -> Vec<f32> {
    let total: f32 = widths.iter().sum();
    if total <= 0.0 || total >= frame_width {
        return widths;
    }

    let gap = frame_width - total;
    for width in widths.iter_mut() {
        *width += gap * *width / total;
    }
    widths
}

/// Full scrollable width: an optional row header plus every column.
pub fn content_width(widths: &[f32], row_header_width: f32) -> f32 {
    widths.iter().fold(row_header_width, |acc, w| acc + w)
}
