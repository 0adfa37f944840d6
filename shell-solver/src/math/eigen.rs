//! Eigen decomposition of a general (non-symmetric) real matrix
//!
//! The matrix is reduced to real Schur form `A = Q T Qᵀ` with nalgebra's
//! [`Schur`]. Eigenvalues are read from the 1×1 and 2×2 diagonal blocks of
//! the quasi-triangular `T`; each eigenvector is obtained by complex back
//! substitution on `T - λI` and mapped back through `Q`.

use nalgebra::{Complex, DMatrix, DVector, Schur};

use super::Mat;
use crate::error::{ShellError, ShellResult};

/// Eigenvalues and unit eigenvectors (columns) of a square matrix
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    pub eigenvalues: DVector<Complex<f64>>,
    pub eigenvectors: DMatrix<Complex<f64>>,
}

impl EigenDecomposition {
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }
}

/// A diagonal block of the quasi-triangular Schur factor
#[derive(Debug, Clone, Copy)]
struct Block {
    start: usize,
    size: usize,
}

/// Decompose `a` into eigenvalues and eigenvectors
///
/// `max_iterations` bounds the Schur iteration; `0` iterates until
/// convergence. Eigenvalues come back in Schur order, unsorted.
pub fn eigen_decompose(a: Mat, max_iterations: usize) -> ShellResult<EigenDecomposition> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(ShellError::InvalidInput(format!(
            "eigen decomposition needs a square matrix, got {}x{}",
            n,
            a.ncols()
        )));
    }
    if n == 0 {
        return Ok(EigenDecomposition {
            eigenvalues: DVector::zeros(0),
            eigenvectors: DMatrix::zeros(0, 0),
        });
    }

    let schur = Schur::try_new(a, f64::EPSILON, max_iterations)
        .ok_or(ShellError::ConvergenceFailed(max_iterations))?;
    let (q, t) = schur.unpack();

    let blocks = diagonal_blocks(&t);
    let smin = (f64::EPSILON * t.amax()).max(f64::MIN_POSITIVE);
    let q_complex = q.map(|v| Complex::new(v, 0.0));

    let mut eigenvalues = DVector::zeros(n);
    let mut eigenvectors = DMatrix::zeros(n, n);
    let mut column = 0;

    for (k, block) in blocks.iter().enumerate() {
        for lambda in block_eigenvalues(&t, block) {
            let y = back_substitute(&t, &blocks[..=k], lambda, smin);
            let x = normalize(&q_complex * y);
            eigenvalues[column] = lambda;
            eigenvectors.set_column(column, &x);
            column += 1;
        }
    }

    Ok(EigenDecomposition {
        eigenvalues,
        eigenvectors,
    })
}

/// Split the quasi-triangular factor into 1×1 and 2×2 diagonal blocks
fn diagonal_blocks(t: &Mat) -> Vec<Block> {
    let n = t.nrows();
    let mut blocks = Vec::with_capacity(n);
    let mut i = 0;

    while i < n {
        let coupled = i + 1 < n && {
            let scale = t[(i, i)].abs() + t[(i + 1, i + 1)].abs();
            t[(i + 1, i)].abs() > f64::EPSILON * scale.max(f64::MIN_POSITIVE)
        };
        if coupled {
            blocks.push(Block { start: i, size: 2 });
            i += 2;
        } else {
            blocks.push(Block { start: i, size: 1 });
            i += 1;
        }
    }

    blocks
}

fn block_eigenvalues(t: &Mat, block: &Block) -> Vec<Complex<f64>> {
    let s = block.start;
    if block.size == 1 {
        return vec![Complex::new(t[(s, s)], 0.0)];
    }

    let (a, b) = (t[(s, s)], t[(s, s + 1)]);
    let (c, d) = (t[(s + 1, s)], t[(s + 1, s + 1)]);
    let mean = 0.5 * (a + d);
    let disc = 0.25 * (a - d) * (a - d) + b * c;

    if disc >= 0.0 {
        let root = disc.sqrt();
        vec![Complex::new(mean + root, 0.0), Complex::new(mean - root, 0.0)]
    } else {
        let root = (-disc).sqrt();
        vec![Complex::new(mean, root), Complex::new(mean, -root)]
    }
}

/// Solve `(T - λI) y = 0` with `y` supported on `blocks` (the last block owns λ)
fn back_substitute(t: &Mat, blocks: &[Block], lambda: Complex<f64>, smin: f64) -> DVector<Complex<f64>> {
    let n = t.nrows();
    let mut y = DVector::zeros(n);
    let Some((own, rest)) = blocks.split_last() else {
        return y;
    };

    let s = own.start;
    if own.size == 1 {
        y[s] = Complex::new(1.0, 0.0);
    } else {
        let (a, b) = (t[(s, s)], t[(s, s + 1)]);
        let (c, d) = (t[(s + 1, s)], t[(s + 1, s + 1)]);
        let first = (Complex::new(b, 0.0), lambda - a);
        let second = (lambda - d, Complex::new(c, 0.0));
        let (z0, z1) = if first.0.norm() + first.1.norm() >= second.0.norm() + second.1.norm() {
            first
        } else {
            second
        };
        y[s] = z0;
        y[s + 1] = z1;
    }
    let end = own.start + own.size;

    for block in rest.iter().rev() {
        let r = block.start;
        let residual = |p: usize| -> Complex<f64> {
            let mut sum = Complex::new(0.0, 0.0);
            for col in (r + block.size)..end {
                sum += y[col] * t[(p, col)];
            }
            -sum
        };

        if block.size == 1 {
            let rhs = residual(r);
            let denom = guard(Complex::new(t[(r, r)], 0.0) - lambda, smin);
            y[r] = rhs / denom;
        } else {
            let rhs0 = residual(r);
            let rhs1 = residual(r + 1);
            let a = Complex::new(t[(r, r)], 0.0) - lambda;
            let b = Complex::new(t[(r, r + 1)], 0.0);
            let c = Complex::new(t[(r + 1, r)], 0.0);
            let d = Complex::new(t[(r + 1, r + 1)], 0.0) - lambda;
            let det = guard(a * d - b * c, smin);
            y[r] = (d * rhs0 - b * rhs1) / det;
            y[r + 1] = (a * rhs1 - c * rhs0) / det;
        }
    }

    y
}

/// Replace a vanishing pivot with `smin` so nearly repeated eigenvalues stay finite
fn guard(value: Complex<f64>, smin: f64) -> Complex<f64> {
    if value.norm() < smin {
        Complex::new(smin, 0.0)
    } else {
        value
    }
}

/// Scale to unit length with the largest component real and positive
fn normalize(x: DVector<Complex<f64>>) -> DVector<Complex<f64>> {
    let norm = x.iter().map(|v| v.norm_sqr()).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return x;
    }

    let pivot = x
        .iter()
        .copied()
        .max_by(|a, b| a.norm_sqr().total_cmp(&b.norm_sqr()))
        .unwrap_or(Complex::new(1.0, 0.0));
    let phase = pivot.conj() / pivot.norm();

    x.map(|v| v * phase / norm)
}
