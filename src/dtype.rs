use num_traits::{Float, Num, NumAssignOps};
use std::fmt::{Debug, Display};

/// Element type for matrices and network parameters.
///
/// Implemented for `f32` and `f64`, which dispatch to the corresponding
/// `matrixmultiply` gemm kernels.
pub trait DType: 'static + Sized + Copy + Num + NumAssignOps + Float + Debug + Display {
    const ZERO: Self;
    const ONE: Self;
    const NAME: &'static str;
    const BYTES: usize;

    fn from_f64(val: f64) -> Self;
    fn from_usize(val: usize) -> Self;

    /// Appends the big-endian byte encoding of `self` to `out`.
    fn write_be(self, out: &mut Vec<u8>);

    /// Decodes a value from exactly `Self::BYTES` big-endian bytes.
    fn read_be(bytes: &[u8]) -> Option<Self>;

    /// Generic matrix multiply: C = alpha * A x B + beta * C.
    ///
    /// Strides are in elements. The pointers must cover m*k, k*n and m*n
    /// elements respectively.
    #[allow(clippy::too_many_arguments)]
    unsafe fn gemm(
        m: usize,
        k: usize,
        n: usize,
        alpha: Self,
        a: *const Self,
        rsa: isize,
        csa: isize,
        b: *const Self,
        rsb: isize,
        csb: isize,
        beta: Self,
        c: *mut Self,
        rsc: isize,
        csc: isize,
    );
}

macro_rules! impl_dtype {
    ($ty:ident, $name:literal, $bytes:literal, $gemm:ident) => {
        impl DType for $ty {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NAME: &'static str = $name;
            const BYTES: usize = $bytes;

            #[inline]
            fn from_f64(val: f64) -> Self {
                val as $ty
            }
            #[inline]
            fn from_usize(val: usize) -> Self {
                val as $ty
            }
            #[inline]
            fn write_be(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_be_bytes());
            }
            #[inline]
            fn read_be(bytes: &[u8]) -> Option<Self> {
                Some(<$ty>::from_be_bytes(bytes.try_into().ok()?))
            }
            #[inline]
            unsafe fn gemm(
                m: usize,
                k: usize,
                n: usize,
                alpha: Self,
                a: *const Self,
                rsa: isize,
                csa: isize,
                b: *const Self,
                rsb: isize,
                csb: isize,
                beta: Self,
                c: *mut Self,
                rsc: isize,
                csc: isize,
            ) {
                unsafe {
                    matrixmultiply::$gemm(m, k, n, alpha, a, rsa, csa, b, rsb, csb, beta, c, rsc, csc)
                }
            }
        }
    };
}

impl_dtype!(f32, "f32", 4, sgemm);
impl_dtype!(f64, "f64", 8, dgemm);

#[cfg(test)]
mod test {
    use super::DType;

    #[test]
    fn test_byte_round_trip() {
        let mut out = Vec::new();
        1.5f32.write_be(&mut out);
        0.25f64.write_be(&mut out);
        assert_eq!(out.len(), 12);
        assert_eq!(f32::read_be(&out[..4]), Some(1.5));
        assert_eq!(f64::read_be(&out[4..]), Some(0.25));
        assert_eq!(f32::read_be(&out[..3]), None);
    }
}
