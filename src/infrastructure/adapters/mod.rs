//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod clock;
pub mod tts;

pub use clock::{ManualClock, SystemClock};
pub use tts::*;
