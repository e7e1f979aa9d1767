//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `token`: positioned page tokens and per-page content
//! - `column`: the statement columns and their per-page layout
//! - `transaction`: the reconstructed transaction record
//! - `error`: error types for the extractor

pub mod column;
pub mod error;
pub mod token;
pub mod transaction;

pub use column::{Column, ColumnLayout};
pub use error::ExtractError;
pub use token::{PageContent, Token};
pub use transaction::{date_prefix_re, Transaction};
