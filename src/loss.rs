use crate::dtype::DType;
use crate::error::Error;
use crate::matrix::Matrix;

/// Mean-squared-error between an actual and expected output vector.
///
/// Reporting only: the backward pass uses the raw difference as its output
/// error signal, with the constant factor folded into the learning rate.
pub fn mean_squared_error<T: DType>(actual: &Matrix<T>, expected: &Matrix<T>) -> Result<T, Error> {
    if actual.dims() != expected.dims() {
        return Err(Error::DimensionMismatch {
            expected: expected.dims(),
            actual: actual.dims(),
        });
    }
    let diff = actual - expected;
    let squared = diff.hadamard(&diff)?;
    Ok(squared.mean())
}
