//! Wishbox server library.
//!
//! This crate provides the API server functionality as a library,
//! allowing it to be tested and reused (the CLI's seeding command goes
//! through the same repositories).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
