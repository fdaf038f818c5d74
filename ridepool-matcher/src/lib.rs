//! Route-matching and ranking engine for ride pooling.
//!
//! This crate provides [`CompatibilityMatcher`], the default implementation of
//! the [`Matcher`](ridepool_core::Matcher) trait. A matching call makes a
//! single synchronous pass over a candidate pool:
//!
//! 1. fetch bookable rides from a [`CandidateSupplier`],
//! 2. admit rides whose pickup and drop-off each lie within the deviation
//!    radius and whose departure lies within the time tolerance,
//! 3. score each admitted ride on route and time proximity,
//! 4. rank by score, keeping pool order on ties, and truncate.
//!
//! Nothing is cached between calls; the supplier is the only I/O.
//!
//! [`CandidateSupplier`]: ridepool_core::CandidateSupplier

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
pub mod filter;
mod matcher;
pub mod ranking;
pub mod scoring;

pub use config::{ConfigError, MatcherConfig, PoolStrategy};
pub use filter::{CompatibilityFilter, Deviations, Rejection};
pub use matcher::CompatibilityMatcher;
pub use ranking::rank;
pub use scoring::compatibility_score;
