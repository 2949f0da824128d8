use log::trace;

use super::matrix::Matrix;
use super::DEFAULT_ZERO_TOLERANCE;

/// Walks an active window `[active_row.., active_column..]` over a single
/// backing matrix and reduces it to row-echelon form in place.
///
/// Each step either finds a pivot in the active column, normalizes it to 1 and
/// clears everything below it (shrinking the window by one row and one
/// column), or finds the active column numerically zero and only moves past
/// it, leaving that column untouched.
///
/// The first entry above the tolerance is taken as the pivot. There is no
/// partial pivoting, so ill-conditioned input can lose accuracy.
pub struct RowReducer {
    matrix: Matrix,
    zero_tolerance: f64,
    active_row: usize,
    active_column: usize,
}

impl RowReducer {
    pub fn new(matrix: Matrix, zero_tolerance: f64) -> Self {
        Self {
            matrix,
            zero_tolerance,
            active_row: 0,
            active_column: 0,
        }
    }

    pub fn go_to_echelon_form(mut self) -> Matrix {
        while self.is_not_in_echelon_form() {
            self.pivot_active_column();
            self.go_to_next_column();
        }
        self.matrix
    }

    fn is_not_in_echelon_form(&self) -> bool {
        self.active_row < self.matrix.number_of_rows()
            && self.active_column < self.matrix.number_of_columns
    }

    fn pivot_active_column(&mut self) {
        match self.find_pivot_in_active_column() {
            Some(pivot_row) => {
                trace!(
                    "pivot for column {} found in row {pivot_row}",
                    self.active_column
                );
                self.promote_to_active_row(pivot_row);
                self.normalize_active_row();
                self.eliminate_below_active_row();
                self.active_row += 1;
            }
            None => trace!(
                "column {} is zero from row {} down",
                self.active_column,
                self.active_row
            ),
        }
    }

    fn find_pivot_in_active_column(&self) -> Option<usize> {
        (self.active_row..self.matrix.number_of_rows())
            .find(|&row| self.matrix[(row, self.active_column)].abs() > self.zero_tolerance)
    }

    fn promote_to_active_row(&mut self, pivot_row: usize) {
        if pivot_row != self.active_row {
            self.matrix.rows.swap(pivot_row, self.active_row);
        }
    }

    fn normalize_active_row(&mut self) {
        let col = self.active_column;
        let row = &mut self.matrix.rows[self.active_row];
        let leading = row[col];
        for value in row[col..].iter_mut() {
            *value /= leading;
        }
    }

    fn eliminate_below_active_row(&mut self) {
        let col = self.active_column;
        let (upper, lower) = self.matrix.rows.split_at_mut(self.active_row + 1);
        let pivot = &upper[self.active_row];
        for row in lower.iter_mut() {
            let factor = row[col];
            for (value, pivot_value) in row[col..].iter_mut().zip(&pivot[col..]) {
                *value -= factor * pivot_value;
            }
        }
    }

    fn go_to_next_column(&mut self) {
        self.active_column += 1;
    }
}

/// Reduces `matrix` to row-echelon form with the default zero tolerance.
///
/// Takes the matrix by value; clone first if the original is still needed.
pub fn row_echelon(matrix: Matrix) -> Matrix {
    row_echelon_with_tolerance(matrix, DEFAULT_ZERO_TOLERANCE)
}

pub fn row_echelon_with_tolerance(matrix: Matrix, zero_tolerance: f64) -> Matrix {
    RowReducer::new(matrix, zero_tolerance).go_to_echelon_form()
}
