//! Matrix Kernels
//!
//! Interchangeable implementations of the GF(2) matrix-vector product.
//! All kernels share [`crate::types::KernelFn`] and must agree bit for bit.

pub mod columnar;
pub mod reference;
