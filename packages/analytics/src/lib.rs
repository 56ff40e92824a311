#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query engine over the canonical tick sightings dataset.
//!
//! Every function here is synchronous and pure: it reads borrowed records
//! and returns freshly built per-request values, so handlers can call it
//! concurrently against the shared dataset without any locking.
//!
//! A request typically flows through [`validation`] → [`filter`] →
//! [`aggregate`] or [`summary`] → [`pagination`].

pub mod aggregate;
pub mod filter;
pub mod pagination;
pub mod summary;
pub mod validation;

use thiserror::Error;

/// Client-facing validation failures.
///
/// The `Display` text of each variant is the message returned to API
/// callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// A date parameter could not be parsed.
    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    InvalidDate {
        /// The rejected value.
        value: String,
    },

    /// `limit` was not an integer in `1..=500`.
    #[error("Limit must be a number in the range of 1 to 500")]
    InvalidLimit {
        /// The rejected value.
        value: String,
    },

    /// `page` was not an integer `>= 1`.
    #[error("Page number must be 1 or greater.")]
    InvalidPage {
        /// The rejected value.
        value: String,
    },
}
