//! Fridge-share API service library
//!
//! Exposes the router, repositories, and supporting modules so the binary
//! and the integration tests share one implementation.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
