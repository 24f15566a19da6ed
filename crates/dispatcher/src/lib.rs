//! 急救调度协调
//!
//! 包含距离计算、候选救护车选择以及串联各协作服务的调度流程。

pub mod coordinator;
pub mod geo;
pub mod strategies;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use coordinator::*;
pub use geo::*;
pub use strategies::*;
