use super::Net;
use crate::dtype::DType;
use crate::error::Error;
use crate::loss;
use crate::matrix::Matrix;

/// One training example: an input column vector paired with the expected
/// output column vector.
#[derive(Clone, Debug)]
pub struct Example<T: DType> {
    pub input: Matrix<T>,
    pub output: Matrix<T>,
}

impl<T: DType> Net<T> {
    /// Runs one backward pass, updating every weight matrix and bias vector
    /// in place.
    ///
    /// Consumes the trace recorded by the immediately preceding
    /// [`Net::feed_forward`] call; `actual` is that call's return value and
    /// `expected` the training target. Calling this without a fresh forward
    /// pass fails with [`Error::TraceConsumed`].
    pub fn backpropagate(&mut self, actual: &Matrix<T>, expected: &Matrix<T>) -> Result<(), Error> {
        let out_dims = (self.output_size(), 1);
        if actual.dims() != out_dims {
            return Err(Error::DimensionMismatch {
                expected: out_dims,
                actual: actual.dims(),
            });
        }
        if expected.dims() != out_dims {
            return Err(Error::DimensionMismatch {
                expected: out_dims,
                actual: expected.dims(),
            });
        }

        // output error from the most recent pre-activation
        let z = self.weighted_inputs.pop().ok_or(Error::TraceConsumed)?;
        let mut error = (actual - expected).hadamard(&z.map(self.activation_derivative))?;

        // walk the weight layers in reverse; the current error signal always
        // belongs to layer i + 1
        for i in (0..self.weights.len()).rev() {
            let bias_step = &error * self.learning_rate;
            self.biases[i + 1] -= &bias_step;

            let z = self.weighted_inputs.pop().ok_or(Error::TraceConsumed)?;
            let a = z.map(self.activation);

            // error propagation multiplies by the transposed weights,
            // the weight gradient is the outer product error x a^T
            let hidden_error = (&self.weights[i].transpose() * &error)
                .hadamard(&z.map(self.activation_derivative))?;
            let delta_w = &(&error * &a.transpose()) * self.learning_rate;
            self.weights[i] -= &delta_w;

            error = hidden_error;
        }

        let bias_step = &error * self.learning_rate;
        self.biases[0] -= &bias_step;
        Ok(())
    }

    /// One epoch of example-at-a-time gradient descent over `examples`, in
    /// order, with no shuffling or batching.
    ///
    /// Returns the running average of the per-example mean-squared-error,
    /// updated incrementally as each example is processed.
    pub fn train(&mut self, examples: &[Example<T>]) -> Result<T, Error> {
        let mut avg = T::ZERO;
        for (n, example) in examples.iter().enumerate() {
            let actual = self.feed_forward(&example.input)?;
            let err = loss::mean_squared_error(&actual, &example.output)?;
            self.backpropagate(&actual, &example.output)?;
            avg = (avg * T::from_usize(n) + err) / T::from_usize(n + 1);
        }
        Ok(avg)
    }
}
