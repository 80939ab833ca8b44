#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Location analysis over in-memory entity collections.
//!
//! Pure computation, no I/O: the caller fetches entities once (viewport
//! query, datacenter list) and re-ranks locally when the search radius
//! changes. Output order is a function of input order and distances alone,
//! so repeated runs over the same collection are byte-identical.

pub mod rank;
pub mod risk;

pub use rank::{Ranked, rank_nearby};
pub use risk::{RiskAssessment, assess_risk, composite_risk};
