//! Report generation for annotated article tables.
//!
//! # Submodules
//!
//! - [`markdown`]: renders the [`crate::dashboard::Dashboard`] as a Markdown page
//! - [`json`]: writes the same dashboard as a JSON snapshot
//! - [`check`]: category counts and title spot-checks for the keyword rules
//!
//! # Output Structure
//!
//! ```text
//! reports_dir/
//! ├── dashboard.md
//! └── dashboard.json
//! ```

pub mod check;
pub mod json;
pub mod markdown;
