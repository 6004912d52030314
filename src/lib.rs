//! # Hotel Desk
//!
//! Hotel Desk is a menu-driven command-line client for hotel-chain staff. It
//! connects to a PostgreSQL database holding the chain's hotels, rooms,
//! customers, bookings, staff, maintenance companies and repairs, and lets the
//! operator add records and run a fixed set of reports from a numbered menu.
//!
//! ## Features
//!
//! - **Sixteen operations**: seven inserts (customers, rooms, maintenance
//!   companies, repairs, bookings, cleaning assignments, repair requests) and
//!   nine reports (availability, top-K prices, repair statistics, ...)
//! - **Field validation**: numeric, length and yes/no checks with re-prompting
//! - **Parameterised SQL**: operator input is always bound, never spliced
//! - **Saved passwords**: AES-256-GCM encrypted storage in `~/.hotel-desk/`
//!
//! ## Modules
//!
//! - `config`: settings layering and the encrypted credential store
//! - `db`: the PostgreSQL connection and the statement model
//! - `executor`: running statements and printing result sets
//! - `console`, `validate`: prompting and field parsing
//! - `menu`, `handlers`, `queries`, `models`: the menu and its operations

pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod executor;
mod handlers;
pub mod menu;
pub mod models;
pub mod queries;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use crate::config::{CredentialStore, Settings};
pub use console::Console;
pub use db::{Database, DatabaseConnection};
pub use menu::Session;
