//! Campus Portal Admin library.
//!
//! This crate provides the admin functionality as a library, allowing it to
//! be tested and reused. The binary in `main.rs` wires it to HTTP.
//!
//! # Architecture
//!
//! - Axum web framework with a JSON API boundary
//! - `PostgreSQL` via sqlx for campaigns and the delivery-event log
//! - Campaign lifecycle rules live in [`services::campaigns`]; routes are
//!   thin adapters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
