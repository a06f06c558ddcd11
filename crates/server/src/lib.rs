//! Tradepost server library.
//!
//! This crate provides the backend functionality as a library, allowing it
//! to be tested and reused. The binary in `main.rs` wires it to a socket.
//!
//! # Architecture
//!
//! - Axum handlers ([`routes`]) parse the wire shape and delegate to
//!   services
//! - Services ([`services`]) own the lifecycle rules: one open cart per
//!   user, checkout-exactly-once, token issue/resolution
//! - Repositories ([`db`]) own the SQL; every query runs against an
//!   injected pool so tests substitute an in-memory store
//! - The session gate ([`middleware`]) resolves `Bearer <token>` before any
//!   protected handler runs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
