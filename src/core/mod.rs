pub mod animation;
pub mod range;
pub mod types;

pub use animation::{AnimatedRange, Animation, Clock, ManualClock, SystemClock};
pub use range::NormalizedRange;
pub use types::DataPoint;
