//! User interface module.
//!
//! - `formatter` - Coloured status lines and usage output

pub mod formatter;

pub use formatter::{
    display_error, display_plan, display_progress, display_status, display_success,
    display_usage_hint, display_warning,
};
