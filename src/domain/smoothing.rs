// Cubic spline smoothing for the monthly line chart
use super::error::ChartError;

pub const MIN_SPLINE_POINTS: usize = 4;
pub const DEFAULT_SMOOTH_POINTS: usize = 100;

const PIVOT_EPSILON: f64 = 1e-12;

/// Interpolating cubic spline with not-a-knot end conditions.
///
/// The curve passes through every control point and the third derivative is
/// continuous across the second and second-to-last knots, so four or more
/// points sampled from a single cubic are reproduced exactly.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot.
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Fits a spline through `(xs[i], ys[i])`. Input order does not matter.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, ChartError> {
        if xs.len() != ys.len() {
            return Err(ChartError::InvalidSmoothing(format!(
                "{} x values but {} y values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < MIN_SPLINE_POINTS {
            return Err(ChartError::InsufficientData {
                required: MIN_SPLINE_POINTS,
                actual: xs.len(),
            });
        }
        if let Some(bad) = xs.iter().chain(ys).find(|v| !v.is_finite()) {
            return Err(ChartError::InvalidSmoothing(format!(
                "non-finite value {}",
                bad
            )));
        }

        let mut points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(pair) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ChartError::InvalidSmoothing(format!(
                "duplicate x value {}",
                pair[0].0
            )));
        }

        let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        let moments = solve_moments(&xs, &ys)?;

        Ok(Self { xs, ys, moments })
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluates the spline; points outside the domain extend the end pieces.
    pub fn evaluate(&self, x: f64) -> f64 {
        let last_segment = self.xs.len() - 2;
        let i = self
            .xs
            .partition_point(|&knot| knot <= x)
            .saturating_sub(1)
            .min(last_segment);

        let h = self.xs[i + 1] - self.xs[i];
        let left = self.xs[i + 1] - x;
        let right = x - self.xs[i];
        let (m0, m1) = (self.moments[i], self.moments[i + 1]);

        m0 * left.powi(3) / (6.0 * h)
            + m1 * right.powi(3) / (6.0 * h)
            + (self.ys[i] - m0 * h * h / 6.0) * left / h
            + (self.ys[i + 1] - m1 * h * h / 6.0) * right / h
    }
}

/// Builds and solves the linear system for the knot second derivatives.
fn solve_moments(xs: &[f64], ys: &[f64]) -> Result<Vec<f64>, ChartError> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

    let mut matrix = vec![vec![0.0; n]; n];
    let mut rhs = vec![0.0; n];

    // Not-a-knot at the left end: third derivative equal on the first two pieces
    matrix[0][0] = h[1];
    matrix[0][1] = -(h[0] + h[1]);
    matrix[0][2] = h[0];

    for i in 1..n - 1 {
        matrix[i][i - 1] = h[i - 1];
        matrix[i][i] = 2.0 * (h[i - 1] + h[i]);
        matrix[i][i + 1] = h[i];
        rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    // Not-a-knot at the right end
    matrix[n - 1][n - 3] = h[n - 2];
    matrix[n - 1][n - 2] = -(h[n - 3] + h[n - 2]);
    matrix[n - 1][n - 1] = h[n - 3];

    gaussian_solve(matrix, rhs)
}

/// Gaussian elimination with partial pivoting.
fn gaussian_solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, ChartError> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return Err(ChartError::InvalidSmoothing(
                "spline system is singular".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * solution[k]).sum();
        solution[row] = (b[row] - tail) / a[row][row];
    }

    Ok(solution)
}

/// `count` evenly spaced values from `start` to `end`, both ends exact.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Resamples `(xs, ys)` onto `num_points` evenly spaced x values.
pub fn smooth(
    xs: &[f64],
    ys: &[f64],
    num_points: usize,
) -> Result<(Vec<f64>, Vec<f64>), ChartError> {
    if num_points == 0 {
        return Err(ChartError::InvalidSmoothing(
            "number of output points must be positive".to_string(),
        ));
    }

    let spline = CubicSpline::fit(xs, ys)?;
    let (lo, hi) = spline.domain();
    let xs_smooth = linspace(lo, hi, num_points);
    let ys_smooth = xs_smooth.iter().map(|&x| spline.evaluate(x)).collect();

    tracing::debug!("Smoothed {} points into {}", xs.len(), num_points);
    Ok((xs_smooth, ys_smooth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOOKS: [f64; 12] = [3.0, 5.0, 2.0, 8.0, 6.0, 1.0, 9.0, 4.0, 7.0, 2.0, 5.0, 3.0];

    fn months() -> Vec<f64> {
        (1..=12).map(f64::from).collect()
    }

    #[test]
    fn test_smooth_spans_domain() {
        let (xs, ys) = smooth(&months(), &BOOKS, 100).unwrap();
        assert_eq!(xs.len(), 100);
        assert_eq!(ys.len(), 100);
        assert_eq!(xs[0], 1.0);
        assert_eq!(xs[99], 12.0);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_smooth_passes_through_knots() {
        let spline = CubicSpline::fit(&months(), &BOOKS).unwrap();
        for (x, y) in months().iter().zip(BOOKS) {
            assert!((spline.evaluate(*x) - y).abs() < 1e-9, "x={}", x);
        }

        // With 100 samples over [1, 12] every ninth sample lands on a month
        let (xs, ys) = smooth(&months(), &BOOKS, 100).unwrap();
        for (month, y) in BOOKS.iter().enumerate() {
            let idx = month * 9;
            assert!((xs[idx] - (month as f64 + 1.0)).abs() < 1e-9);
            assert!((ys[idx] - y).abs() < 1e-9, "month {}", month + 1);
        }
    }

    #[test]
    fn test_reproduces_cubic() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let f = |x: f64| x.powi(3) - 2.0 * x + 1.0;
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();

        let spline = CubicSpline::fit(&xs, &ys).unwrap();
        for x in [0.25, 1.5, 2.75, 4.9] {
            assert!((spline.evaluate(x) - f(x)).abs() < 1e-9, "x={}", x);
        }
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let xs = [3.0, 1.0, 4.0, 2.0];
        let ys = [9.0, 1.0, 16.0, 4.0];
        let spline = CubicSpline::fit(&xs, &ys).unwrap();
        assert_eq!(spline.domain(), (1.0, 4.0));
        assert!((spline.evaluate(2.5) - 6.25).abs() < 1e-9);
    }

    #[test]
    fn test_insufficient_points() {
        let err = smooth(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 100).unwrap_err();
        assert_eq!(
            err,
            ChartError::InsufficientData {
                required: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            smooth(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0], 10),
            Err(ChartError::InvalidSmoothing(_))
        ));
        assert!(matches!(
            smooth(&[1.0, 2.0, 2.0, 4.0], &[1.0, 2.0, 3.0, 4.0], 10),
            Err(ChartError::InvalidSmoothing(_))
        ));
        assert!(matches!(
            smooth(&[1.0, 2.0, 3.0, 4.0], &[1.0, f64::NAN, 3.0, 4.0], 10),
            Err(ChartError::InvalidSmoothing(_))
        ));
        assert!(matches!(
            smooth(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0], 0),
            Err(ChartError::InvalidSmoothing(_))
        ));
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    proptest! {
        #[test]
        fn spline_interpolates_control_points(ys in prop::collection::vec(0.0f64..500.0, 4..24)) {
            let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
            let spline = CubicSpline::fit(&xs, &ys).unwrap();
            for (x, y) in xs.iter().zip(&ys) {
                prop_assert!((spline.evaluate(*x) - y).abs() < 1e-6);
            }
        }
    }
}
