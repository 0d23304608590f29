/// Search and named filters.
///
/// The visible row set is always recomputed from the full row set: first the
/// live search text, then every named filter in the order it was added. A row
/// stays visible only if it matches all of them. Matching is a case-insensitive
/// substring test against the string representation of the row's searchable
/// cells; one matching cell is enough.
///
/// Match results are memoized per needle as a bitmap over the full row set, so
/// re-applying an unchanged filter after a keystroke does not rescan the rows.
/// The memo must be invalidated whenever the full row set is replaced.
use crate::view_model::RowViewModel;
use std::collections::HashMap;
use std::rc::Rc;

const MAX_CACHED_NEEDLES: usize = 64;

/// Free-text search plus a stack of persistent named filters.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    /// Per-column flag: is this column searched.
    searchable: Vec<bool>,
    search_text: String,
    filters: Vec<String>,
    cache: HashMap<String, Rc<Vec<bool>>>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve searchable column titles against the current headers.
    ///
    /// `None` makes every column searchable. Titles that name no header are
    /// ignored.
    pub fn configure(&mut self, searchable_columns: Option<&[String]>, header_titles: &[String]) {
        self.searchable = match searchable_columns {
            None => vec![true; header_titles.len()],
            Some(titles) => {
                for title in titles {
                    if !header_titles.contains(title) {
                        log::warn!("searchable column '{}' does not match any header", title);
                    }
                }
                header_titles.iter().map(|h| titles.contains(h)).collect()
            }
        };
        self.invalidate();
    }

    /// Drop memoized match sets. Required after the full row set changes.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn is_searchable(&self, column: usize) -> bool {
        self.searchable.get(column).copied().unwrap_or(false)
    }

    /// Returns true if the text changed.
    pub fn set_search_text(&mut self, text: &str) -> bool {
        if self.search_text == text {
            return false;
        }
        self.search_text = text.to_string();
        true
    }

    /// Append a filter unless it is already present. Returns true if added.
    pub fn add_filter(&mut self, text: &str) -> bool {
        if self.filters.iter().any(|f| f == text) {
            return false;
        }
        self.filters.push(text.to_string());
        true
    }

    /// Replace every filter with `text`.
    pub fn set_single_filter(&mut self, text: &str) {
        self.filters.clear();
        self.filters.push(text.to_string());
    }

    /// Returns true if the filter was present.
    pub fn remove_filter(&mut self, text: &str) -> bool {
        match self.filters.iter().position(|f| f == text) {
            Some(index) => {
                self.filters.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if there was anything to clear.
    pub fn clear_filters(&mut self) -> bool {
        let had_filters = !self.filters.is_empty();
        self.filters.clear();
        had_filters
    }

    /// Does `row` contain `needle` in any searchable column.
    pub fn row_matches(&self, row: &RowViewModel, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.matches_lowercase(row, &needle)
    }

    fn matches_lowercase(&self, row: &RowViewModel, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        row.display_strings()
            .iter()
            .enumerate()
            .filter(|(column, _)| self.is_searchable(*column))
            .any(|(_, text)| text.to_lowercase().contains(needle))
    }

    fn match_set(&mut self, full: &[RowViewModel], needle: &str) -> Rc<Vec<bool>> {
        let key = needle.to_lowercase();
        if let Some(hit) = self.cache.get(&key) {
            if hit.len() == full.len() {
                log::trace!("filter memo hit for '{}'", key);
                return Rc::clone(hit);
            }
        }

        let set: Rc<Vec<bool>> = Rc::new(full.iter().map(|row| self.matches_lowercase(row, &key)).collect());

        if self.cache.len() >= MAX_CACHED_NEEDLES {
            self.cache.clear();
        }
        self.cache.insert(key, Rc::clone(&set));
        set
    }

    /// Recompute the visible rows from the full row set, in full-set order.
    ///
    /// Empty search text and empty named filters match every row.
    pub fn apply(&mut self, full: &[RowViewModel]) -> Vec<RowViewModel> {
        let needles: Vec<String> = std::iter::once(&self.search_text)
            .chain(self.filters.iter())
            .filter(|needle| !needle.is_empty())
            .cloned()
            .collect();

        if needles.is_empty() {
            return full.to_vec();
        }

        let sets: Vec<Rc<Vec<bool>>> = needles.iter().map(|needle| self.match_set(full, needle)).collect();

        full.iter()
            .enumerate()
            .filter(|(index, _)| sets.iter().all(|set| set[*index]))
            .map(|(_, row)| row.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataModel;
    use crate::view_model::build_rows;

    fn headers() -> Vec<String> {
        vec!["Name".to_string(), "City".to_string()]
    }

    fn people() -> Vec<RowViewModel> {
        let model = DataModel::from_strings(
            vec![
                vec!["Amy", "London"],
                vec!["Bob", "Paris"],
                vec!["Pam", "Amsterdam"],
                vec!["Sam", "Oslo"],
            ],
            headers(),
        )
        .unwrap();
        build_rows(&model)
    }

    fn names(rows: &[RowViewModel]) -> Vec<&str> {
        rows.iter().map(|r| r.display(0).unwrap()).collect()
    }

    fn filter_engine(searchable: Option<&[String]>) -> FilterEngine {
        let mut engine = FilterEngine::new();
        engine.configure(searchable, &headers());
        engine
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let name_only = vec!["Name".to_string()];
        let mut engine = filter_engine(Some(name_only.as_slice()));
        engine.set_search_text("AM");

        assert_eq!(names(&engine.apply(&people())), vec!["Amy", "Pam", "Sam"]);
    }

    #[test]
    fn test_only_searchable_columns_match() {
        let name_only = vec!["Name".to_string()];
        let mut engine = filter_engine(Some(name_only.as_slice()));
        engine.set_search_text("paris");
        assert!(engine.apply(&people()).is_empty());

        let mut all = filter_engine(None);
        all.set_search_text("paris");
        assert_eq!(names(&all.apply(&people())), vec!["Bob"]);
    }

    #[test]
    fn test_unknown_searchable_title_is_ignored() {
        let titles = vec!["Nope".to_string(), "City".to_string()];
        let engine = filter_engine(Some(titles.as_slice()));
        assert!(!engine.is_searchable(0));
        assert!(engine.is_searchable(1));
        assert!(!engine.is_searchable(7));
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let mut engine = filter_engine(None);
        assert_eq!(engine.apply(&people()).len(), 4);

        engine.add_filter("");
        assert_eq!(engine.apply(&people()).len(), 4);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let full = people();
        let mut engine = filter_engine(None);
        engine.set_search_text("o");
        engine.add_filter("a");
        engine.add_filter("m");

        let visible = engine.apply(&full);
        let expected: Vec<&RowViewModel> = full
            .iter()
            .filter(|r| engine.row_matches(r, "o") && engine.row_matches(r, "a") && engine.row_matches(r, "m"))
            .collect();

        assert_eq!(visible.iter().collect::<Vec<_>>(), expected);
        assert_eq!(names(&visible), vec!["Amy", "Sam"]);
    }

    #[test]
    fn test_filter_mutations() {
        let mut engine = filter_engine(None);

        assert!(engine.add_filter("a"));
        assert!(!engine.add_filter("a"));
        assert!(engine.add_filter("b"));
        assert_eq!(engine.filters(), &["a".to_string(), "b".to_string()]);

        assert!(engine.remove_filter("a"));
        assert!(!engine.remove_filter("a"));
        assert_eq!(engine.filters(), &["b".to_string()]);

        engine.add_filter("c");
        engine.set_single_filter("z");
        assert_eq!(engine.filters(), &["z".to_string()]);

        assert!(engine.clear_filters());
        assert!(!engine.clear_filters());
        assert!(engine.filters().is_empty());
    }

    #[test]
    fn test_result_keeps_full_set_order() {
        let mut engine = filter_engine(None);
        engine.set_search_text("s");
        let visible = engine.apply(&people());
        let order: Vec<usize> = visible.iter().map(|r| r.load_index()).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_memo_is_dropped_for_new_rows() {
        let mut engine = filter_engine(None);
        engine.set_search_text("am");
        assert_eq!(engine.apply(&people()).len(), 3);

        let other = build_rows(
            &DataModel::from_strings(vec![vec!["Zed", "Rome"]], headers()).unwrap(),
        );
        // Row count changed, so the stale bitmap is not reused
        assert!(engine.apply(&other).is_empty());

        engine.invalidate();
        assert_eq!(engine.apply(&people()).len(), 3);
    }
}
