//! Core library for colnotes
//!
//! This crate implements the **Functional Core** of colnotes, following the
//! Functional Core - Imperative Shell pattern:
//!
//! - **`colnotes_core`** (this crate): pure transformation functions with zero I/O
//! - **`colnotes`**: configuration, HTTP, prompts and orchestration (the Imperative Shell)
//!
//! Every function here is deterministic and can be tested with fixture data,
//! no mocking required.
//!
//! # Module Organization
//!
//! - [`column`]: column URL parsing and GitHub endpoint URLs
//! - [`github`]: GitHub Projects (classic) response types
//! - [`markdown`]: card to Markdown bullet transformations
//!
//! # Example Usage
//!
//! ```rust
//! use colnotes_core::github::ColumnCard;
//! use colnotes_core::markdown::{transform_column, FormatOptions};
//!
//! let cards = vec![(
//!     ColumnCard {
//!         note: Some("Fix D1234-code issue".to_string()),
//!         ..Default::default()
//!     },
//!     None,
//! )];
//!
//! let output = transform_column(123, "To Release".to_string(), cards, &FormatOptions::default());
//!
//! assert_eq!(
//!     output.to_markdown(),
//!     "- Fix [D1234](https://code.a8c.com/D1234) issue\n"
//! );
//! ```

pub mod column;
pub mod error;
pub mod github;
pub mod markdown;

pub use error::Error;
