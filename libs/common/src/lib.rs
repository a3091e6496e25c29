//! Common library for the fridge-share application
//!
//! This crate provides shared infrastructure used by the API service:
//! database connection pooling and the database error taxonomy.

pub mod database;
pub mod error;
