use crate::dtype::DType;
use crate::error::Error;
use std::fmt::{Debug, Display, Formatter, Write};
use std::iter::zip;
use std::ops::{Add, Index, Mul, Sub, SubAssign};

/// Dense row-major matrix.
///
/// Column vectors are `(n, 1)` matrices; see [`Matrix::column`]. Shape
/// mismatches in `+`, `-` and `*` are fatal and panic immediately — they are
/// never silently coerced. The elementwise product, which backpropagation
/// needs and ordinary matrix algebra does not supply, is [`Matrix::hadamard`].
#[derive(Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: DType> Matrix<T> {
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "data length {} does not match dims ({rows}, {cols})",
            data.len()
        );
        Matrix { data, rows, cols }
    }

    pub fn filled(value: T, rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self::filled(T::ZERO, rows, cols)
    }

    /// Builds a matrix by calling `f(row, col)` for every entry, row-major.
    pub fn build<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Matrix { data, rows, cols }
    }

    /// Single-column matrix holding `values`.
    pub fn column(values: &[T]) -> Self {
        Matrix {
            data: values.to_vec(),
            rows: values.len(),
            cols: 1,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Applies `f` to every entry, producing a new matrix.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j]);
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Elementwise product against an identically shaped matrix.
    ///
    /// Neither operand is mutated; a shape mismatch yields
    /// [`Error::DimensionMismatch`] before any computation happens.
    pub fn hadamard(&self, other: &Matrix<T>) -> Result<Matrix<T>, Error> {
        if self.dims() != other.dims() {
            return Err(Error::DimensionMismatch {
                expected: self.dims(),
                actual: other.dims(),
            });
        }
        Ok(Matrix {
            data: zip(&self.data, &other.data).map(|(&a, &b)| a * b).collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Elementwise product against a vector, reinterpreted as a single-column
    /// matrix before the shape check.
    pub fn hadamard_vec(&self, values: &[T]) -> Result<Matrix<T>, Error> {
        self.hadamard(&Matrix::column(values))
    }

    /// Arithmetic mean of all entries.
    pub fn mean(&self) -> T {
        let sum = self.data.iter().fold(T::ZERO, |acc, &x| acc + x);
        sum / T::from_usize(self.data.len())
    }
}

impl<T: DType> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(self.dims(), rhs.dims(), "dimension mismatch in matrix addition");
        Matrix {
            data: zip(&self.data, &rhs.data).map(|(&a, &b)| a + b).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: DType> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(self.dims(), rhs.dims(), "dimension mismatch in matrix subtraction");
        Matrix {
            data: zip(&self.data, &rhs.data).map(|(&a, &b)| a - b).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: DType> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        assert_eq!(self.dims(), rhs.dims(), "dimension mismatch in matrix subtraction");
        for (t, &s) in zip(&mut self.data, &rhs.data) {
            *t -= s;
        }
    }
}

/// Conventional matrix product via the gemm kernels.
impl<T: DType> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.cols, rhs.rows,
            "dimension mismatch in matrix multiplication: ({}, {}) x ({}, {})",
            self.rows, self.cols, rhs.rows, rhs.cols
        );
        let mut out = Matrix::zeroed(self.rows, rhs.cols);
        unsafe {
            T::gemm(
                self.rows,
                self.cols,
                rhs.cols,
                T::ONE,
                self.data.as_ptr(),
                self.cols as isize,
                1,
                rhs.data.as_ptr(),
                rhs.cols as isize,
                1,
                T::ZERO,
                out.data.as_mut_ptr(),
                rhs.cols as isize,
                1,
            );
        }
        out
    }
}

impl<T: DType> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    #[inline]
    fn mul(self, rhs: T) -> Matrix<T> {
        self.map(|x| x * rhs)
    }
}

impl<T: DType> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for ({}, {}) matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

fn fmt_slice_elements<T: Display>(f: &mut Formatter<'_>, slice: &[T]) -> std::fmt::Result {
    let mut first = true;
    for x in slice {
        if first {
            first = false;
        } else {
            f.write_str(", ")?;
        }
        f.write_str(x.to_string().as_str())?;
    }
    Ok(())
}

fn fmt_slice<T: Display>(f: &mut Formatter<'_>, slice: &[T]) -> std::fmt::Result {
    f.write_char('[')?;
    if slice.len() > 10 {
        fmt_slice_elements(f, &slice[..5])?;
        f.write_str(" ... ")?;
        fmt_slice_elements(f, &slice[slice.len() - 5..])?;
    } else {
        fmt_slice_elements(f, slice)?;
    }
    f.write_char(']')
}

impl<T: DType> Debug for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Matrix({}, {}) ", self.rows, self.cols)?;
        fmt_slice(f, &self.data)
    }
}
