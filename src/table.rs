/// GridState Table Engine
///
/// A `DataTable` owns a loaded dataset together with everything derived from
/// it: header and row view models, the search and filter state, the active
/// sort and the currently visible rows. Callers submit mutations (load, header
/// tap, search text, filters) and read back the visible rows plus a diff
/// against what was visible before.
///
/// Every mutation resolves completely before it returns: recompute the visible
/// set, re-apply the active sort, diff against the previous visible set.
///
/// # Examples
///
/// ```
/// use gridstate::{DataTable, SortDirection, TableConfig};
///
/// let mut table = DataTable::new(TableConfig::default().with_searchable_columns(["Name"]));
/// table.load_strings(
///     vec![vec!["Bob", "30"], vec!["Amy", "25"], vec!["Pam", "40"]],
///     vec!["Name".to_string(), "Age".to_string()],
/// ).unwrap();
///
/// // Tap the first header: ascending by name
/// let update = table.on_header_tap(0).unwrap();
/// assert_eq!(update.visible_rows[0].display(0), Some("Amy"));
/// assert_eq!(table.header_view_models()[0].sort(), SortDirection::Ascending);
///
/// // Search narrows the visible rows and reports what disappeared
/// let update = table.set_search_text("am");
/// assert_eq!(table.visible_row_count(), 2);
/// assert_eq!(update.diff.deletions, vec![1]); // Bob
/// ```
use crate::config::TableConfig;
use crate::diff::{diff, RowDiff};
use crate::error::GridError;
use crate::filter::FilterEngine;
use crate::host::{DataSource, DetachedHost, RenderingHost};
use crate::layout;
use crate::model::DataModel;
use crate::sort::{self, ColumnOrder, SortDirection};
use crate::value::CellValue;
use crate::view_model::{build_footers, build_headers, build_rows, HeaderViewModel, RowViewModel};

/// Result of a mutation: the new visible rows and how they differ from the
/// rows visible before.
#[derive(Debug, Clone, Default)]
pub struct ViewUpdate {
    pub visible_rows: Vec<RowViewModel>,
    pub diff: RowDiff,
}

/// Stateful table engine.
pub struct DataTable {
    config: TableConfig,
    model: DataModel,
    headers: Vec<HeaderViewModel>,
    footers: Vec<HeaderViewModel>,
    /// Full row set in load order
    rows: Vec<RowViewModel>,
    visible: Vec<RowViewModel>,
    filter: FilterEngine,
    highlighted_column: Option<usize>,
    /// Incremented each time the visible set is replaced
    generation: u64,
    host: Box<dyn RenderingHost>,
}

impl DataTable {
    /// Create an empty table with no rendering host attached.
    pub fn new(config: TableConfig) -> Self {
        Self::with_host(config, Box::new(DetachedHost))
    }

    /// Create an empty table that reports to `host`.
    pub fn with_host(config: TableConfig, host: Box<dyn RenderingHost>) -> Self {
        DataTable {
            config,
            model: DataModel::default(),
            headers: Vec::new(),
            footers: Vec::new(),
            rows: Vec::new(),
            visible: Vec::new(),
            filter: FilterEngine::new(),
            highlighted_column: None,
            generation: 0,
            host,
        }
    }

    // ==================== Loading ====================

    /// Replace the dataset.
    ///
    /// On error the table keeps its previous dataset and view state.
    pub fn load(
        &mut self,
        rows: Vec<Vec<CellValue>>,
        header_titles: Vec<String>,
    ) -> Result<ViewUpdate, GridError> {
        let model = DataModel::load(rows, header_titles).map_err(rejected)?;
        self.load_model(model)
    }

    /// Replace the dataset with all-string rows.
    pub fn load_strings<S: Into<String>>(
        &mut self,
        rows: Vec<Vec<S>>,
        header_titles: Vec<String>,
    ) -> Result<ViewUpdate, GridError> {
        let model = DataModel::from_strings(rows, header_titles).map_err(rejected)?;
        self.load_model(model)
    }

    /// Pull a fresh dataset from `source` and load it.
    pub fn reload(&mut self, source: &dyn DataSource) -> Result<ViewUpdate, GridError> {
        let model = DataModel::from_source(source).map_err(rejected)?;
        self.load_model(model)
    }

    /// Install a validated model, rebuilding every view model.
    ///
    /// Search text and named filters survive the swap. The configured default
    /// ordering, if any, is applied; otherwise rows appear in load order.
    pub fn load_model(&mut self, model: DataModel) -> Result<ViewUpdate, GridError> {
        if let Some(order) = self.config.default_ordering {
            GridError::check_index(order.index, model.column_count()).map_err(rejected)?;
        }

        self.headers = build_headers(&model);
        self.footers = build_footers(&model);
        self.rows = build_rows(&model);
        self.model = model;
        self.filter
            .configure(self.config.searchable_columns.as_deref(), self.model.header_titles());
        self.highlighted_column = None;

        if let Some(order) = self.config.default_ordering {
            let states = sort::apply_column_order(&self.header_states(), order)?;
            self.set_header_states(&states);
            self.highlighted_column = Some(order.index);
        }

        log::debug!(
            "loaded {} rows x {} columns",
            self.model.row_count(),
            self.model.column_count()
        );

        let visible = self.recompute();
        Ok(self.commit(visible))
    }

    /// Swap the configuration and refresh the visible rows under it.
    ///
    /// The default ordering is only consulted on the next load.
    pub fn set_config(&mut self, config: TableConfig) -> ViewUpdate {
        self.config = config;
        self.filter
            .configure(self.config.searchable_columns.as_deref(), self.model.header_titles());
        let visible = self.recompute();
        self.commit(visible)
    }

    // ==================== Sorting ====================

    /// Advance the tapped column's sort arrow and reorder the visible rows.
    ///
    /// Unspecified → ascending → descending → unspecified; tapping another
    /// column resets every other arrow. Returning to unspecified restores load
    /// order.
    pub fn on_header_tap(&mut self, column: usize) -> Result<ViewUpdate, GridError> {
        let states = sort::next_header_states(&self.header_states(), column)?;
        log::debug!("header tap on column {}: {:?}", column, states[column]);
        self.reorder(column, states)
    }

    /// Order by `order` without cycling.
    pub fn apply_column_order(&mut self, order: ColumnOrder) -> Result<ViewUpdate, GridError> {
        let states = sort::apply_column_order(&self.header_states(), order)?;
        log::debug!("column order set to {:?}", order);
        self.reorder(order.index, states)
    }

    /// Reset every sort arrow and return to load order.
    pub fn clear_sort(&mut self) -> ViewUpdate {
        let states = vec![SortDirection::Unspecified; self.headers.len()];
        self.set_header_states(&states);
        self.highlighted_column = None;

        let visible = self.recompute();
        let update = self.commit(visible);
        self.host.on_sort_changed(None);
        update
    }

    fn reorder(&mut self, column: usize, states: Vec<SortDirection>) -> Result<ViewUpdate, GridError> {
        let direction = states[column];
        let mut visible = if direction.is_specified() {
            sort::sort_rows(&self.visible, column, direction)?
        } else {
            self.filter.apply(&self.rows)
        };

        self.set_header_states(&states);
        self.highlighted_column = Some(column);
        self.apply_highlight(&mut visible);

        let update = self.commit(visible);
        let order = self.active_sort();
        self.host.on_sort_changed(order);
        Ok(update)
    }

    // ==================== Searching ====================

    pub fn set_search_text(&mut self, text: &str) -> ViewUpdate {
        if !self.filter.set_search_text(text) {
            return self.unchanged();
        }
        self.refilter()
    }

    /// Add a named filter; adding one that is already present changes nothing.
    pub fn add_filter(&mut self, text: &str) -> ViewUpdate {
        if !self.filter.add_filter(text) {
            return self.unchanged();
        }
        self.refilter()
    }

    /// Replace all named filters with `text`.
    pub fn set_single_filter(&mut self, text: &str) -> ViewUpdate {
        self.filter.set_single_filter(text);
        self.refilter()
    }

    pub fn remove_filter(&mut self, text: &str) -> ViewUpdate {
        if !self.filter.remove_filter(text) {
            return self.unchanged();
        }
        self.refilter()
    }

    pub fn clear_filters(&mut self) -> ViewUpdate {
        self.filter.clear_filters();
        self.refilter()
    }

    fn refilter(&mut self) -> ViewUpdate {
        let visible = self.recompute();
        let update = self.commit(visible);

        log::debug!(
            "search '{}' with {} filter(s): {} visible, -{} +{}",
            self.filter.search_text(),
            self.filter.filters().len(),
            self.visible.len(),
            update.diff.deletions.len(),
            update.diff.insertions.len()
        );
        self.host.on_filter_changed(
            self.filter.search_text(),
            self.filter.filters(),
            self.visible.len(),
        );
        update
    }

    // ==================== Recompute pipeline ====================

    /// Filter the full set, then apply the active sort and highlight.
    fn recompute(&mut self) -> Vec<RowViewModel> {
        let filtered = self.filter.apply(&self.rows);
        let mut visible = match self.active_sort() {
            Some(order) => sort::sort_rows(&filtered, order.index, order.order).unwrap_or(filtered),
            None => filtered,
        };
        self.apply_highlight(&mut visible);
        visible
    }

    fn apply_highlight(&self, rows: &mut [RowViewModel]) {
        for row in rows.iter_mut() {
            row.set_highlighted_column(self.highlighted_column);
        }
    }

    fn commit(&mut self, visible: Vec<RowViewModel>) -> ViewUpdate {
        let diff = diff(&self.visible, &visible);
        self.visible = visible;
        self.generation += 1;

        ViewUpdate {
            visible_rows: self.visible.clone(),
            diff,
        }
    }

    fn unchanged(&self) -> ViewUpdate {
        ViewUpdate {
            visible_rows: self.visible.clone(),
            diff: RowDiff::default(),
        }
    }

    fn header_states(&self) -> Vec<SortDirection> {
        self.headers.iter().map(HeaderViewModel::sort).collect()
    }

    fn set_header_states(&mut self, states: &[SortDirection]) {
        for (header, state) in self.headers.iter_mut().zip(states) {
            header.set_sort(*state);
        }
    }

    // ==================== Layout ====================

    /// Automatic widths for a frame of `frame_width`. Does not touch state.
    pub fn compute_column_widths(&self, frame_width: f32) -> Vec<f32> {
        let mut options = self.config.width_options();
        if let Some(scale) = self.host.scale_to_fill() {
            options.scale_to_fill = scale;
        }
        layout::compute_widths(&self.model, frame_width, &options, &self.config.measure())
    }

    /// Widths for the host's current frame, with host overrides applied.
    pub fn column_widths(&self) -> Vec<f32> {
        self.compute_column_widths(self.host.frame_width())
            .into_iter()
            .enumerate()
            .map(|(column, width)| self.host.column_width(column).unwrap_or(width))
            .collect()
    }

    /// Total scrollable width of all columns.
    pub fn content_width(&self) -> f32 {
        layout::content_width(&self.column_widths(), 0.0)
    }

    pub fn row_height(&self, position: usize) -> f32 {
        self.host.row_height(position).unwrap_or(self.config.row_height)
    }

    // ==================== Accessors ====================

    pub fn visible_row_count(&self) -> usize {
        self.visible.len()
    }

    pub fn row_at(&self, position: usize) -> Option<&RowViewModel> {
        self.visible.get(position)
    }

    pub fn value_at(&self, position: usize, column: usize) -> Option<&CellValue> {
        self.visible.get(position).and_then(|row| row.value(column))
    }

    pub fn visible_rows(&self) -> &[RowViewModel] {
        &self.visible
    }

    /// Every loaded row in load order, regardless of filters.
    pub fn all_rows(&self) -> &[RowViewModel] {
        &self.rows
    }

    pub fn header_view_models(&self) -> &[HeaderViewModel] {
        &self.headers
    }

    pub fn footer_view_models(&self) -> &[HeaderViewModel] {
        &self.footers
    }

    pub fn highlighted_column(&self) -> Option<usize> {
        self.highlighted_column
    }

    pub fn active_sort(&self) -> Option<ColumnOrder> {
        sort::active_sort(&self.header_states())
    }

    pub fn search_text(&self) -> &str {
        self.filter.search_text()
    }

    pub fn filters(&self) -> &[String] {
        self.filter.filters()
    }

    pub fn model(&self) -> &DataModel {
        &self.model
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn rejected(error: GridError) -> GridError {
    log::warn!("rejected load: {}", error);
    error
}
