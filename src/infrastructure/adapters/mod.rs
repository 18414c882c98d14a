//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod fake;
pub mod playback;
pub mod remote;

pub use fake::*;
pub use playback::*;
pub use remote::*;
