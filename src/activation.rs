//! Activation functions and their derivatives.
//!
//! Activations are plain functions over the element type so they can be
//! stored directly in a network configuration. Every derivative here takes
//! the *pre-activation* value, not the activated output.

use crate::dtype::DType;

/// An activation (or activation-derivative) function, applied elementwise.
pub type Activation<T> = fn(T) -> T;

/// Logistic sigmoid, the default activation.
pub fn sigmoid<T: DType>(x: T) -> T {
    T::ONE / (T::ONE + (-x).exp())
}

/// Derivative of [`sigmoid`], re-deriving the sigmoid from the
/// pre-activation value rather than reusing a cached output.
pub fn sigmoid_derivative<T: DType>(x: T) -> T {
    let sig = sigmoid(x);
    sig * (T::ONE - sig)
}

/// Rectified linear unit.
pub fn relu<T: DType>(x: T) -> T {
    if x > T::ZERO { x } else { T::ZERO }
}

/// Derivative of [`relu`] from the pre-activation value.
pub fn relu_derivative<T: DType>(x: T) -> T {
    if x > T::ZERO { T::ONE } else { T::ZERO }
}

/// Pass-through activation, useful for linear output layers and tests.
pub fn identity<T: DType>(x: T) -> T {
    x
}

/// Derivative of [`identity`].
pub fn identity_derivative<T: DType>(_x: T) -> T {
    T::ONE
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0f64), 0.5);
        assert!((sigmoid(2.0f64) - 0.8807970779778823).abs() < 1e-12);
        assert!(sigmoid(40.0f64) > 0.999);
        assert!(sigmoid(-40.0f64) < 0.001);
    }

    #[test]
    fn test_sigmoid_derivative() {
        assert_eq!(sigmoid_derivative(0.0f64), 0.25);
        // symmetric around zero, vanishing in the tails
        assert!((sigmoid_derivative(3.0f64) - sigmoid_derivative(-3.0f64)).abs() < 1e-12);
        assert!(sigmoid_derivative(40.0f64) < 1e-12);
    }

    #[test]
    fn test_relu() {
        assert_eq!(relu(-1.5f32), 0.0);
        assert_eq!(relu(1.5f32), 1.5);
        assert_eq!(relu_derivative(-1.5f32), 0.0);
        assert_eq!(relu_derivative(1.5f32), 1.0);
    }

    #[test]
    fn test_identity() {
        assert_eq!(identity(-3.25f64), -3.25);
        assert_eq!(identity_derivative(-3.25f64), 1.0);
    }
}
