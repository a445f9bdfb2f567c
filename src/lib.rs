pub mod activation;
pub mod dtype;
pub mod error;
pub mod initializer;
pub mod loss;
pub mod matrix;
pub mod net;

extern crate base64;
extern crate matrixmultiply;
extern crate num_traits;
extern crate rand;
extern crate rand_distr;
extern crate serde;
extern crate serde_json;
