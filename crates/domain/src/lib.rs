//! # keeper-domain
//!
//! Pure domain model for the keeper account and task book.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps, money
//! - Define **Accounts** (a holder and a balance that never goes negative)
//! - Define **Tasks** (a titled item with a due date and a status)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod money;
pub mod time;

pub mod account;
pub mod task;
