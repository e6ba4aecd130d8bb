//! Command-line surface: argument definitions and operation dispatch.

pub mod args;
pub mod dispatch;

pub use args::Args;
pub use dispatch::{dispatch, Operation};
