use serde::{Deserialize, Serialize};

/// Arena-style `(stage, stock)` grid. Row 0 is the base stage, rows 1..=N the
/// accumulation stages; every row holds one cell per stock, by stock index.
///
/// Rows restored from a snapshot may be ragged; `resized` squares them up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageMatrix<T> {
    rows: Vec<Vec<T>>,
}

impl<T> Default for StageMatrix<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Clone> StageMatrix<T> {
    pub fn filled(stage_rows: usize, stocks: usize, value: T) -> Self {
        Self {
            rows: vec![vec![value; stocks]; stage_rows],
        }
    }

    pub fn from_fn(stage_rows: usize, stocks: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let rows = (0..stage_rows)
            .map(|stage| (0..stocks).map(|stock| f(stage, stock)).collect())
            .collect();
        Self { rows }
    }

    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        Self { rows }
    }

    /// Number of stage rows, stage 0 included.
    pub fn stage_rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the base row.
    pub fn stock_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, stage: usize, stock: usize) -> Option<&T> {
        self.rows.get(stage).and_then(|row| row.get(stock))
    }

    /// Writes a cell. Out-of-range coordinates are ignored and reported as `false`.
    pub fn set(&mut self, stage: usize, stock: usize, value: T) -> bool {
        match self.rows.get_mut(stage).and_then(|row| row.get_mut(stock)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, stage: usize) -> &[T] {
        self.rows.get(stage).map_or(&[], Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// A new `stage_rows x stocks` matrix keeping every existing cell at its
    /// position; cells that did not exist are produced by `fill(stage, stock)`.
    pub fn resized(
        &self,
        stage_rows: usize,
        stocks: usize,
        mut fill: impl FnMut(usize, usize) -> T,
    ) -> Self {
        Self::from_fn(stage_rows, stocks, |stage, stock| match self.get(stage, stock) {
            Some(existing) => existing.clone(),
            None => fill(stage, stock),
        })
    }

    /// Drops one stock column from every row.
    pub fn remove_stock(&mut self, index: usize) {
        for row in &mut self.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
    }

    /// Moves one stock column from `from` to `to` in every row (splice semantics:
    /// `to` is the position after removal, clamped to the row end).
    pub fn move_stock(&mut self, from: usize, to: usize) {
        for row in &mut self.rows {
            if from < row.len() {
                let cell = row.remove(from);
                let at = to.min(row.len());
                row.insert(at, cell);
            }
        }
    }

    /// All cells in stage-major, stock-minor order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.rows.iter().enumerate().flat_map(|(stage, row)| {
            row.iter().enumerate().map(move |(stock, cell)| (stage, stock, cell))
        })
    }
}

impl<T: Clone + Default> StageMatrix<T> {
    /// Cell value, or `T::default()` when out of range.
    pub fn value(&self, stage: usize, stock: usize) -> T {
        self.get(stage, stock).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resize_preserves_cells_by_position() {
        let m = StageMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        let grown = m.resized(3, 3, |_, _| 9);
        assert_eq!(grown.rows(), &[vec![1, 2, 9], vec![3, 4, 9], vec![9, 9, 9]]);

        let shrunk = grown.resized(2, 1, |_, _| 0);
        assert_eq!(shrunk.rows(), &[vec![1], vec![3]]);
    }

    #[test]
    fn ragged_rows_are_squared_up() {
        let m = StageMatrix::from_rows(vec![vec![5], vec![], vec![7, 8, 9]]);
        let sq = m.resized(3, 2, |stage, stock| stage * 10 + stock);
        assert_eq!(sq.rows(), &[vec![5, 1], vec![10, 11], vec![7, 8]]);
    }

    #[test]
    fn remove_and_move_follow_every_row() {
        let mut m = StageMatrix::from_rows(vec![vec!['a', 'b', 'c'], vec!['d', 'e', 'f']]);
        m.move_stock(0, 2);
        assert_eq!(m.rows(), &[vec!['b', 'c', 'a'], vec!['e', 'f', 'd']]);
        m.remove_stock(1);
        assert_eq!(m.rows(), &[vec!['b', 'a'], vec!['e', 'd']]);
    }

    #[test]
    fn out_of_range_access_is_harmless() {
        let mut m = StageMatrix::filled(2, 2, 0u64);
        assert!(!m.set(5, 0, 1));
        assert_eq!(m.get(0, 9), None);
        assert_eq!(m.value(9, 9), 0);
        assert!(m.row(4).is_empty());
    }

    #[test]
    fn cells_iterate_stage_major() {
        let m = StageMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]);
        let order: Vec<_> = m.cells().map(|(s, i, v)| (s, i, *v)).collect();
        assert_eq!(order, vec![(0, 0, 1), (0, 1, 2), (1, 0, 3), (1, 1, 4)]);
    }
}
