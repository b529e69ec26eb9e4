//! Request-level workflows built on the practice engine

pub mod progress;
pub mod trace;
