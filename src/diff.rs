/// Diff - Reconciling the displayed rows with a new visible set
///
/// When the visible row set is recomputed (after a search keystroke, a filter
/// change or a reload), the rendering layer should not redraw everything. It
/// receives a `RowDiff` describing which displayed rows went away and which
/// new rows appeared.
///
/// # Identity
///
/// Rows are matched by value, never by position. A row that merely moved is
/// neither deleted nor inserted; the consumer reloads cell content at stable
/// slots instead of animating a move.
///
/// # Usage Pattern
///
/// 1. The engine keeps the previously displayed sequence
/// 2. After recomputation it calls `diff(old, new)`
/// 3. The consumer applies all deletions (old positions), then all insertions
///    (new positions), as one batch
use std::collections::HashSet;
use std::hash::Hash;

/// One structural instruction for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    /// Remove the row at this position of the old sequence
    Deleted { index: usize },

    /// Insert the row at this position of the new sequence
    Inserted { index: usize },
}

impl RowChange {
    pub fn index(&self) -> usize {
        match self {
            RowChange::Deleted { index } | RowChange::Inserted { index } => *index,
        }
    }
}

/// Deletions and insertions between two row sequences, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDiff {
    pub deletions: Vec<usize>,
    pub insertions: Vec<usize>,
}

impl RowDiff {
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.insertions.is_empty()
    }

    /// Number of structural instructions.
    pub fn len(&self) -> usize {
        self.deletions.len() + self.insertions.len()
    }

    /// Flatten into a batch: deletions from the back (so earlier indices stay
    /// valid while removing one at a time), then insertions from the front.
    pub fn changes(&self) -> Vec<RowChange> {
        self.deletions
            .iter()
            .rev()
            .map(|&index| RowChange::Deleted { index })
            .chain(self.insertions.iter().map(|&index| RowChange::Inserted { index }))
            .collect()
    }

    /// Replay the diff on `old`, taking inserted rows from `new`.
    pub fn apply<T: Clone>(&self, old: &[T], new: &[T]) -> Vec<T> {
        let mut result = old.to_vec();
        for change in self.changes() {
            match change {
                RowChange::Deleted { index } => {
                    if index < result.len() {
                        result.remove(index);
                    }
                }
                RowChange::Inserted { index } => {
                    if let Some(row) = new.get(index) {
                        let at = index.min(result.len());
                        result.insert(at, row.clone());
                    }
                }
            }
        }
        result
    }
}

/// Compute the deletions and insertions that turn `old` into `new`.
///
/// ```
/// use gridstate::diff;
///
/// let result = diff(&["A", "B", "C"], &["B", "C", "D"]);
/// assert_eq!(result.deletions, vec![0]);
/// assert_eq!(result.insertions, vec![2]);
/// ```
pub fn diff<T: Eq + Hash>(old: &[T], new: &[T]) -> RowDiff {
    let in_old: HashSet<&T> = old.iter().collect();
    let in_new: HashSet<&T> = new.iter().collect();

    RowDiff {
        deletions: old
            .iter()
            .enumerate()
            .filter(|(_, row)| !in_new.contains(row))
            .map(|(index, _)| index)
            .collect(),
        insertions: new
            .iter()
            .enumerate()
            .filter(|(_, row)| !in_old.contains(row))
            .map(|(index, _)| index)
            .collect(),
    }
}
