//! Execution Engine
//!
//! Kernel dispatch and batch evaluation.

pub mod dispatcher;
pub mod parallel;

pub use dispatcher::kernel_name;
