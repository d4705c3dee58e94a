pub mod engine;
pub mod sink;
pub(crate) mod ticker;

pub use ticker::TimerStats;
