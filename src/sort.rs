/// Sorting and the header sort-arrow state machine.
///
/// Rows are sorted by a single column at a time. The sort is stable in both
/// directions, so rows with equal keys keep their previous relative order.
///
/// # Mixed columns
///
/// When the non-nil values of the sorted column all belong to one kind family
/// (numbers, strings, dates or booleans) they compare by the `CellValue` total
/// order. When a column mixes families, the whole column is compared by each
/// cell's string representation instead, with exact textual ties broken by
/// the total order. The choice is made once per sort so the comparator stays
/// consistent for the whole pass.
///
/// # Header state
///
/// Header arrows follow a tri-state cycle driven by taps. The transitions are
/// pure functions over the current states; the caller stores the result.
use crate::error::GridError;
use crate::value::CellKind;
use crate::view_model::RowViewModel;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Tri-state sort indicator of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Unspecified,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Next state on a tap of the same column.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Unspecified => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Unspecified,
        }
    }

    pub fn is_specified(self) -> bool {
        self != SortDirection::Unspecified
    }
}

/// A column together with the direction it is ordered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnOrder {
    pub index: usize,
    pub order: SortDirection,
}

impl ColumnOrder {
    pub fn new(index: usize, order: SortDirection) -> Self {
        ColumnOrder { index, order }
    }

    pub fn ascending(index: usize) -> Self {
        Self::new(index, SortDirection::Ascending)
    }

    pub fn descending(index: usize) -> Self {
        Self::new(index, SortDirection::Descending)
    }
}

/// How cells of the sorted column are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparePolicy {
    Natural,
    Textual,
}

impl ComparePolicy {
    /// Pick the policy for `column` over `rows`.
    pub fn for_column(rows: &[RowViewModel], column: usize) -> Self {
        let families: HashSet<CellKind> = rows
            .iter()
            .filter_map(|row| row.value(column))
            .map(|value| value.kind())
            .filter(|kind| *kind != CellKind::Nil)
            .collect();

        if families.len() > 1 {
            ComparePolicy::Textual
        } else {
            ComparePolicy::Natural
        }
    }

    fn compare(self, a: &RowViewModel, b: &RowViewModel, column: usize) -> Ordering {
        let (va, vb) = (&a.row()[column], &b.row()[column]);
        match self {
            ComparePolicy::Natural => va.cmp(vb),
            ComparePolicy::Textual => a
                .display(column)
                .cmp(&b.display(column))
                .then_with(|| va.cmp(vb)),
        }
    }
}

/// Return `rows` ordered by `column`.
///
/// `Unspecified` returns the rows unchanged. Fails if any row is too short to
/// have the column.
pub fn sort_rows(
    rows: &[RowViewModel],
    column: usize,
    direction: SortDirection,
) -> Result<Vec<RowViewModel>, GridError> {
    if let Some(short) = rows.iter().find(|row| row.len() <= column) {
        return Err(GridError::IndexOutOfRange { index: column, len: short.len() });
    }

    let mut sorted = rows.to_vec();
    let policy = ComparePolicy::for_column(rows, column);

    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| policy.compare(a, b, column)),
        SortDirection::Descending => sorted.sort_by(|a, b| policy.compare(b, a, column)),
        SortDirection::Unspecified => {}
    }

    Ok(sorted)
}

/// Header states after a tap on `tapped`.
///
/// The tapped column advances one step in its cycle; every other column is
/// reset to unspecified.
pub fn next_header_states(
    current: &[SortDirection],
    tapped: usize,
) -> Result<Vec<SortDirection>, GridError> {
    GridError::check_index(tapped, current.len())?;

    Ok(current
        .iter()
        .enumerate()
        .map(|(column, state)| {
            if column == tapped {
                state.toggled()
            } else {
                SortDirection::Unspecified
            }
        })
        .collect())
}

/// Header states for a programmatic ordering: exactly the target column takes
/// the requested direction.
pub fn apply_column_order(
    current: &[SortDirection],
    order: ColumnOrder,
) -> Result<Vec<SortDirection>, GridError> {
    GridError::check_index(order.index, current.len())?;

    Ok((0..current.len())
        .map(|column| {
            if column == order.index {
                order.order
            } else {
                SortDirection::Unspecified
            }
        })
        .collect())
}

/// The column currently driving the sort, if any.
pub fn active_sort(states: &[SortDirection]) -> Option<ColumnOrder> {
    states
        .iter()
        .enumerate()
        .find(|(_, state)| state.is_specified())
        .map(|(index, state)| ColumnOrder::new(index, *state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataModel;
    use crate::value::CellValue;
    use crate::view_model::build_rows;

    fn rows(data: Vec<Vec<CellValue>>) -> Vec<RowViewModel> {
        let width = data.first().map(|r| r.len()).unwrap_or(0);
        let headers = (0..width).map(|i| format!("c{}", i)).collect();
        build_rows(&DataModel::load(data, headers).unwrap())
    }

    fn column(rows: &[RowViewModel], index: usize) -> Vec<String> {
        rows.iter().map(|r| r.display(index).unwrap().to_string()).collect()
    }

    fn load_order(rows: &[RowViewModel]) -> Vec<usize> {
        rows.iter().map(|r| r.load_index()).collect()
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let input = rows(vec![
            vec!["Bob".into(), CellValue::Int(30)],
            vec!["Amy".into(), CellValue::Int(25)],
            vec!["Cat".into(), CellValue::Int(100)],
        ]);

        let asc = sort_rows(&input, 1, SortDirection::Ascending).unwrap();
        assert_eq!(column(&asc, 0), vec!["Amy", "Bob", "Cat"]);

        let desc = sort_rows(&input, 0, SortDirection::Descending).unwrap();
        assert_eq!(column(&desc, 0), vec!["Cat", "Bob", "Amy"]);
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let input = rows(vec![
            vec![CellValue::Int(100)],
            vec![CellValue::Float(9.5)],
            vec![CellValue::Int(20)],
        ]);

        let asc = sort_rows(&input, 0, SortDirection::Ascending).unwrap();
        assert_eq!(column(&asc, 0), vec!["9.5", "20", "100"]);
    }

    #[test]
    fn test_unspecified_is_noop() {
        let input = rows(vec![vec![CellValue::Int(2)], vec![CellValue::Int(1)]]);
        let out = sort_rows(&input, 0, SortDirection::Unspecified).unwrap();
        assert_eq!(load_order(&out), vec![0, 1]);
    }

    #[test]
    fn test_stability_with_duplicate_keys() {
        let input = rows(vec![
            vec![CellValue::Int(2), "a".into()],
            vec![CellValue::Int(1), "b".into()],
            vec![CellValue::Int(2), "c".into()],
            vec![CellValue::Int(1), "d".into()],
            vec![CellValue::Int(2), "e".into()],
        ]);

        let asc = sort_rows(&input, 0, SortDirection::Ascending).unwrap();
        assert_eq!(column(&asc, 1), vec!["b", "d", "a", "c", "e"]);

        let desc = sort_rows(&input, 0, SortDirection::Descending).unwrap();
        assert_eq!(column(&desc, 1), vec!["a", "c", "e", "b", "d"]);

        // Stability is relative to the input order, not the load order
        let desc_of_asc = sort_rows(&asc, 0, SortDirection::Descending).unwrap();
        assert_eq!(column(&desc_of_asc, 1), vec!["a", "c", "e", "b", "d"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let input = rows(
            (0..40)
                .map(|i| vec![CellValue::Int((i * 7) % 11), CellValue::Int(i)])
                .collect(),
        );

        let once = sort_rows(&input, 0, SortDirection::Ascending).unwrap();
        let twice = sort_rows(&once, 0, SortDirection::Ascending).unwrap();
        assert_eq!(load_order(&once), load_order(&twice));
    }

    #[test]
    fn test_mixed_column_sorts_textually() {
        let input = rows(vec![
            vec![CellValue::from("9")],
            vec![CellValue::Int(10)],
            vec![CellValue::Float(9.5)],
            vec![CellValue::Nil],
            vec![CellValue::from("5")],
        ]);

        assert_eq!(ComparePolicy::for_column(&input, 0), ComparePolicy::Textual);
        let asc = sort_rows(&input, 0, SortDirection::Ascending).unwrap();
        assert_eq!(column(&asc, 0), vec!["", "10", "5", "9", "9.5"]);
    }

    #[test]
    fn test_nil_does_not_make_column_mixed() {
        let input = rows(vec![
            vec![CellValue::Int(10)],
            vec![CellValue::Nil],
            vec![CellValue::Int(9)],
        ]);

        assert_eq!(ComparePolicy::for_column(&input, 0), ComparePolicy::Natural);
        let asc = sort_rows(&input, 0, SortDirection::Ascending).unwrap();
        assert_eq!(column(&asc, 0), vec!["", "9", "10"]);
    }

    #[test]
    fn test_date_column_sorts_chronologically() {
        let day = |y, m, d| CellValue::from(chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap());
        let input = rows(vec![
            vec![day(2024, 3, 1)],
            vec![CellValue::Nil],
            vec![day(2023, 12, 31)],
            vec![day(2024, 1, 15)],
        ]);

        assert_eq!(ComparePolicy::for_column(&input, 0), ComparePolicy::Natural);
        let asc = sort_rows(&input, 0, SortDirection::Ascending).unwrap();
        assert!(asc[0].value(0).unwrap().is_nil());
        let dates: Vec<_> = asc.iter().filter_map(|r| r.value(0).and_then(CellValue::as_date)).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(column(&asc, 0), vec!["", "2023-12-31", "2024-01-15", "2024-03-01"]);

        let desc = sort_rows(&input, 0, SortDirection::Descending).unwrap();
        assert_eq!(load_order(&desc), vec![0, 3, 2, 1]);
    }

    #[test]
    fn test_bool_column_sorts_false_first() {
        let input = rows(vec![
            vec![CellValue::Bool(true), "a".into()],
            vec![CellValue::Bool(false), "b".into()],
            vec![CellValue::Bool(true), "c".into()],
            vec![CellValue::Bool(false), "d".into()],
        ]);

        let asc = sort_rows(&input, 0, SortDirection::Ascending).unwrap();
        let flags: Vec<bool> = asc.iter().filter_map(|r| r.value(0).and_then(CellValue::as_bool)).collect();
        assert_eq!(flags, vec![false, false, true, true]);
        assert_eq!(column(&asc, 1), vec!["b", "d", "a", "c"]);

        let desc = sort_rows(&input, 0, SortDirection::Descending).unwrap();
        assert_eq!(column(&desc, 1), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_sort_out_of_range() {
        let input = rows(vec![vec![CellValue::Int(1)]]);
        assert!(matches!(
            sort_rows(&input, 1, SortDirection::Ascending),
            Err(GridError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_toggle_cycle() {
        let state = SortDirection::Unspecified;
        assert_eq!(state.toggled(), SortDirection::Ascending);
        assert_eq!(state.toggled().toggled(), SortDirection::Descending);
        assert_eq!(state.toggled().toggled().toggled(), SortDirection::Unspecified);
    }

    #[test]
    fn test_next_header_states() {
        let start = vec![SortDirection::Unspecified; 3];

        let s1 = next_header_states(&start, 1).unwrap();
        assert_eq!(s1, vec![SortDirection::Unspecified, SortDirection::Ascending, SortDirection::Unspecified]);

        let s2 = next_header_states(&s1, 1).unwrap();
        assert_eq!(s2[1], SortDirection::Descending);

        // A different column resets the others and starts at ascending
        let s3 = next_header_states(&s2, 2).unwrap();
        assert_eq!(s3, vec![SortDirection::Unspecified, SortDirection::Unspecified, SortDirection::Ascending]);

        // Input is untouched
        assert_eq!(start, vec![SortDirection::Unspecified; 3]);

        assert!(next_header_states(&start, 3).is_err());
    }

    #[test]
    fn test_apply_column_order() {
        let current = vec![SortDirection::Ascending, SortDirection::Unspecified];

        let states = apply_column_order(&current, ColumnOrder::descending(1)).unwrap();
        assert_eq!(states, vec![SortDirection::Unspecified, SortDirection::Descending]);

        // No cycling: applying the same order twice is stable
        let again = apply_column_order(&states, ColumnOrder::descending(1)).unwrap();
        assert_eq!(again, states);

        assert!(apply_column_order(&current, ColumnOrder::ascending(2)).is_err());
    }

    #[test]
    fn test_active_sort() {
        assert_eq!(active_sort(&[SortDirection::Unspecified; 2]), None);
        assert_eq!(
            active_sort(&[SortDirection::Unspecified, SortDirection::Descending]),
            Some(ColumnOrder::descending(1))
        );
    }

    #[test]
    fn test_column_order_serde() {
        let order: ColumnOrder = serde_json::from_str(r#"{"index": 2, "order": "descending"}"#).unwrap();
        assert_eq!(order, ColumnOrder::descending(2));
    }
}
