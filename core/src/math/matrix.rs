use ndarray::{Array1, Array2};

pub struct MatrixHelper;

impl MatrixHelper {
    /// Solves the dense system `system · x = rhs` by Gaussian elimination
    /// with partial pivoting. Returns `None` for singular or non-square
    /// systems.
    pub fn solve(mut system: Array2<f64>, mut rhs: Array1<f64>) -> Option<Array1<f64>> {
        let n = rhs.len();
        if system.nrows() != n || system.ncols() != n {
            return None;
        }
        for col in 0..n {
            let mut pivot = col;
            for row in col + 1..n {
                if system[[row, col]].abs() > system[[pivot, col]].abs() {
                    pivot = row;
                }
            }
            if system[[pivot, col]].abs() < f64::EPSILON {
                return None;
            }
            if pivot != col {
                for c in 0..n {
                    system.swap([col, c], [pivot, c]);
                }
                rhs.swap(col, pivot);
            }
            for row in col + 1..n {
                let factor = system[[row, col]] / system[[col, col]];
                if factor == 0.0 {
                    continue;
                }
                for c in col..n {
                    let head = system[[col, c]];
                    system[[row, c]] -= factor * head;
                }
                let head = rhs[col];
                rhs[row] -= factor * head;
            }
        }
        let mut solution = Array1::<f64>::zeros(n);
        for row in (0..n).rev() {
            let mut acc = rhs[row];
            for c in row + 1..n {
                acc -= system[[row, c]] * solution[c];
            }
            solution[row] = acc / system[[row, row]];
        }
        Some(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn solves_well_conditioned_system() {
        let system = array![[2.0, 1.0], [1.0, 3.0]];
        let rhs = array![3.0, 5.0];
        let solution = MatrixHelper::solve(system, rhs).unwrap();
        assert!((solution[0] - 0.8).abs() < 1e-12);
        assert!((solution[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn pivoting_handles_zero_leading_entry() {
        let system = array![[0.0, 1.0], [1.0, 0.0]];
        let rhs = array![2.0, 3.0];
        let solution = MatrixHelper::solve(system, rhs).unwrap();
        assert!((solution[0] - 3.0).abs() < 1e-12);
        assert!((solution[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn singular_system_yields_none() {
        let system = array![[1.0, 2.0], [2.0, 4.0]];
        let rhs = array![1.0, 2.0];
        assert!(MatrixHelper::solve(system, rhs).is_none());
    }
}
