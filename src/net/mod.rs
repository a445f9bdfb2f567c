use crate::activation::{self, Activation};
use crate::dtype::DType;
use crate::error::Error;
use crate::initializer::{self, WeightInit};
use crate::matrix::Matrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::{Debug, Formatter};

mod codec;
mod train;

pub use train::Example;

/// Configuration for constructing a [`Net`].
///
/// The function-valued fields default to the standard sigmoid stack and can
/// be replaced with any plain function at construction time.
pub struct NetConfig<T: DType> {
    pub layers: Vec<usize>,
    pub activation: Activation<T>,
    pub activation_derivative: Activation<T>,
    pub weight_init: WeightInit<T>,
    pub learning_rate: T,
}

impl<T: DType> NetConfig<T> {
    pub fn new(layers: impl Into<Vec<usize>>) -> Self {
        NetConfig {
            layers: layers.into(),
            activation: activation::sigmoid,
            activation_derivative: activation::sigmoid_derivative,
            weight_init: initializer::inverse_sqrt,
            learning_rate: T::ONE,
        }
    }

    /// Replaces the activation function and its derivative together.
    ///
    /// The derivative must take the pre-activation value, not the activated
    /// output.
    pub fn with_activation(mut self, f: Activation<T>, derivative: Activation<T>) -> Self {
        self.activation = f;
        self.activation_derivative = derivative;
        self
    }

    pub fn with_weight_init(mut self, f: WeightInit<T>) -> Self {
        self.weight_init = f;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: T) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Builds the network with entropy-seeded weight initialization.
    pub fn build(self) -> Result<Net<T>, Error> {
        self.build_with_rng(&mut StdRng::from_entropy())
    }

    /// Builds the network from a fixed seed, for reproducible initialization.
    pub fn build_seeded(self, seed: u64) -> Result<Net<T>, Error> {
        self.build_with_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn build_with_rng(self, rng: &mut StdRng) -> Result<Net<T>, Error> {
        if self.layers.len() < 2 {
            return Err(Error::Config(format!(
                "need at least two layers, got {}",
                self.layers.len()
            )));
        }
        if let Some(idx) = self.layers.iter().position(|&width| width == 0) {
            return Err(Error::Config(format!("layer {idx} has zero width")));
        }
        if self.learning_rate <= T::ZERO {
            return Err(Error::Config("learning rate must be positive".into()));
        }

        let mut weights = Vec::with_capacity(self.layers.len() - 1);
        for pair in self.layers.windows(2) {
            let (fan_in, size) = (pair[0], pair[1]);
            weights.push(Matrix::build(size, fan_in, |_, _| (self.weight_init)(rng, fan_in)));
        }
        let biases = self.layers.iter().map(|&width| Matrix::zeroed(width, 1)).collect();

        Ok(Net {
            layers: self.layers,
            weights,
            biases,
            weighted_inputs: Vec::new(),
            activation: self.activation,
            activation_derivative: self.activation_derivative,
            learning_rate: self.learning_rate,
        })
    }
}

/// A fully-connected feedforward network trained by plain gradient descent.
///
/// `weights[i]` has shape `(layers[i+1], layers[i])`; `biases[k]` is a column
/// vector of length `layers[k]`, including one for the input layer.
///
/// A forward pass records the pre-activation entering every layer, and the
/// immediately following backward pass drains that trace in reverse. The two
/// calls are therefore not reentrant: run them strictly paired, one example
/// at a time, on a single thread. Sharing one instance across threads is
/// unsafe without external serialization.
pub struct Net<T: DType> {
    layers: Vec<usize>,
    weights: Vec<Matrix<T>>,
    biases: Vec<Matrix<T>>,
    weighted_inputs: Vec<Matrix<T>>,
    activation: Activation<T>,
    activation_derivative: Activation<T>,
    learning_rate: T,
}

impl<T: DType> Net<T> {
    #[inline]
    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    #[inline]
    pub fn weights(&self) -> &[Matrix<T>] {
        &self.weights
    }

    #[inline]
    pub fn biases(&self) -> &[Matrix<T>] {
        &self.biases
    }

    #[inline]
    pub fn input_size(&self) -> usize {
        self.layers[0]
    }

    #[inline]
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    #[inline]
    pub fn learning_rate(&self) -> T {
        self.learning_rate
    }

    /// Runs one forward pass over an `(input_size, 1)` column vector and
    /// returns the activated output of the last layer.
    ///
    /// Replaces the forward trace consumed by [`Net::backpropagate`].
    pub fn feed_forward(&mut self, input: &Matrix<T>) -> Result<Matrix<T>, Error> {
        if input.dims() != (self.input_size(), 1) {
            return Err(Error::DimensionMismatch {
                expected: (self.input_size(), 1),
                actual: input.dims(),
            });
        }

        self.weighted_inputs.clear();
        self.weighted_inputs.push(input.clone());

        let mut output = (input + &self.biases[0]).map(self.activation);
        for (layer, weight_layer) in self.weights.iter().enumerate() {
            let z = &(weight_layer * &output) + &self.biases[layer + 1];
            self.weighted_inputs.push(z.clone());
            output = z.map(self.activation);
        }
        Ok(output)
    }
}

impl<T: DType> Debug for Net<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Net")
            .field("layers", &self.layers)
            .field("weights", &self.weights)
            .field("biases", &self.biases)
            .field("learning_rate", &self.learning_rate)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::NetConfig;
    use crate::activation;
    use crate::error::Error;
    use crate::matrix::Matrix;

    #[test]
    fn test_construction_shapes() {
        let net = NetConfig::<f64>::new([4, 3, 2]).build_seeded(1).unwrap();
        assert_eq!(net.layers(), &[4, 3, 2]);
        assert_eq!(net.weights().len(), 2);
        assert_eq!(net.weights()[0].dims(), (3, 4));
        assert_eq!(net.weights()[1].dims(), (2, 3));
        assert_eq!(net.biases().len(), 3);
        assert_eq!(net.biases()[0].dims(), (4, 1));
        assert_eq!(net.biases()[1].dims(), (3, 1));
        assert_eq!(net.biases()[2].dims(), (2, 1));
        // biases start at zero
        assert!(net.biases().iter().all(|b| b.iter().all(|&x| x == 0.0)));
        assert_eq!(net.learning_rate(), 1.0);
    }

    #[test]
    fn test_default_init_respects_fan_in_bounds() {
        let net = NetConfig::<f64>::new([16, 4]).build_seeded(7).unwrap();
        let bound = 1.0 / (16.0f64).sqrt();
        assert!(net.weights()[0].iter().all(|&w| w.abs() <= bound));
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let a = NetConfig::<f32>::new([3, 5, 2]).build_seeded(42).unwrap();
        let b = NetConfig::<f32>::new([3, 5, 2]).build_seeded(42).unwrap();
        assert_eq!(a.weights(), b.weights());

        let c = NetConfig::<f32>::new([3, 5, 2]).build_seeded(43).unwrap();
        assert_ne!(a.weights(), c.weights());
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            NetConfig::<f64>::new([3]).build_seeded(0),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            NetConfig::<f64>::new(Vec::new()).build_seeded(0),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            NetConfig::<f64>::new([3, 0, 2]).build_seeded(0),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            NetConfig::<f64>::new([3, 2]).with_learning_rate(0.0).build_seeded(0),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_feed_forward_dims_and_trace() {
        let mut net = NetConfig::<f64>::new([2, 3, 1]).build_seeded(9).unwrap();
        let output = net.feed_forward(&Matrix::column(&[0.5, -0.5])).unwrap();
        assert_eq!(output.dims(), (1, 1));
        // one pre-activation entry per layer, the raw input first
        assert_eq!(net.weighted_inputs.len(), 3);
        assert_eq!(net.weighted_inputs[0], Matrix::column(&[0.5, -0.5]));
        assert_eq!(net.weighted_inputs[1].dims(), (3, 1));
        assert_eq!(net.weighted_inputs[2].dims(), (1, 1));
    }

    #[test]
    fn test_feed_forward_rejects_bad_input() {
        let mut net = NetConfig::<f64>::new([2, 3, 1]).build_seeded(9).unwrap();
        assert_eq!(
            net.feed_forward(&Matrix::column(&[1.0, 2.0, 3.0])),
            Err(Error::DimensionMismatch {
                expected: (2, 1),
                actual: (3, 1),
            })
        );
    }

    #[test]
    fn test_feed_forward_known_values() {
        // identity activation and constant weights make the arithmetic exact:
        // layer 1 gets W x input = [[1, 1]] x [2, 3]^T = [5]
        let mut net = NetConfig::<f64>::new([2, 1])
            .with_activation(activation::identity, activation::identity_derivative)
            .with_weight_init(|_, _| 1.0)
            .build_seeded(0)
            .unwrap();
        let output = net.feed_forward(&Matrix::column(&[2.0, 3.0])).unwrap();
        assert_eq!(output, Matrix::column(&[5.0]));
    }
}
