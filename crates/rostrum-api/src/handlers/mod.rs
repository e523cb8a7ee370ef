//! API request handlers.

pub mod debate;
pub mod health;

pub use debate::{run_debate, stream_debate};
pub use health::health;
