pub mod bump;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod guard;
pub mod increment;
pub mod notes;
pub mod project;
pub mod runner;
pub mod ui;

pub use error::{ReleaseError, Result};
