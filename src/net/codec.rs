//! Versioned textual encoding of a network's learned parameters.
//!
//! The layout is a JSON document holding a format version, the element type
//! name, the layer widths, and one base64 string per weight matrix and bias
//! vector. Each string encodes the big-endian IEEE bytes of the array in
//! row-major order, so floats round-trip bit-for-bit and the document stays
//! inspectable with ordinary JSON tooling.
//!
//! Activation functions and the learning rate are not part of the state and
//! must be supplied again when reconstructing a network.

use super::Net;
use crate::dtype::DType;
use crate::error::Error;
use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ModelState {
    version: u32,
    dtype: String,
    layers: Vec<usize>,
    weights: Vec<String>,
    biases: Vec<String>,
}

fn encode_slice<T: DType>(values: &[T]) -> String {
    let mut bytes = Vec::with_capacity(values.len() * T::BYTES);
    for &value in values {
        value.write_be(&mut bytes);
    }
    base64::encode(bytes)
}

fn decode_slice<T: DType>(encoded: &str, expected_len: usize) -> Result<Vec<T>, Error> {
    let bytes = base64::decode(encoded)?;
    if bytes.len() != expected_len * T::BYTES {
        return Err(Error::Codec(format!(
            "expected {expected_len} encoded values, got {} bytes",
            bytes.len()
        )));
    }
    let mut values = Vec::with_capacity(expected_len);
    for chunk in bytes.chunks_exact(T::BYTES) {
        values.push(T::read_be(chunk).ok_or_else(|| Error::Codec("truncated value".into()))?);
    }
    Ok(values)
}

impl<T: DType> Net<T> {
    /// Serializes the weight and bias state.
    pub fn export(&self) -> Result<String, Error> {
        let state = ModelState {
            version: FORMAT_VERSION,
            dtype: T::NAME.to_string(),
            layers: self.layers.clone(),
            weights: self.weights.iter().map(|w| encode_slice(w.as_slice())).collect(),
            biases: self.biases.iter().map(|b| encode_slice(b.as_slice())).collect(),
        };
        Ok(serde_json::to_string(&state)?)
    }

    /// Restores weight and bias state previously produced by [`Net::export`].
    ///
    /// The network is only mutated once the whole document has decoded and
    /// validated; a malformed blob leaves it untouched.
    pub fn import(&mut self, data: &str) -> Result<(), Error> {
        let state: ModelState = serde_json::from_str(data)?;
        if state.version != FORMAT_VERSION {
            return Err(Error::Codec(format!(
                "unsupported format version {}",
                state.version
            )));
        }
        if state.dtype != T::NAME {
            return Err(Error::Codec(format!(
                "element type {} does not match {}",
                state.dtype,
                T::NAME
            )));
        }
        if state.layers.len() < 2 || state.layers.contains(&0) {
            return Err(Error::Codec("invalid layer list".into()));
        }
        if state.weights.len() != state.layers.len() - 1
            || state.biases.len() != state.layers.len()
        {
            return Err(Error::Codec(format!(
                "expected {} weight layers and {} bias vectors, got {} and {}",
                state.layers.len() - 1,
                state.layers.len(),
                state.weights.len(),
                state.biases.len()
            )));
        }

        let mut weights = Vec::with_capacity(state.weights.len());
        for (pair, encoded) in state.layers.windows(2).zip(&state.weights) {
            let (cols, rows) = (pair[0], pair[1]);
            weights.push(Matrix::from_vec(decode_slice(encoded, rows * cols)?, rows, cols));
        }
        let mut biases = Vec::with_capacity(state.biases.len());
        for (&width, encoded) in state.layers.iter().zip(&state.biases) {
            biases.push(Matrix::from_vec(decode_slice(encoded, width)?, width, 1));
        }

        self.layers = state.layers;
        self.weights = weights;
        self.biases = biases;
        self.weighted_inputs.clear();
        Ok(())
    }
}
