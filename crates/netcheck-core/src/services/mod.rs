//! Services that orchestrate ports and domain types.

mod dispatch;

pub use dispatch::CheckRunner;
