//! # keeper-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `AccountRepository`: CRUD for accounts, plus a two-record commit for transfers
//!   - `TaskRepository`: CRUD for tasks
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AccountService`: open, deposit, withdraw, transfer, list, get, delete
//!   - `TaskService`: create, update status, edit, list, get, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `keeper-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
