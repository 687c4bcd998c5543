//! quest-site - Backend for a law firm marketing website.
//!
//! This crate provides:
//! - Read-only catalog endpoints (practice areas, attorneys, offices, news,
//!   newsletters, events) seeded at startup
//! - Contact and newsletter subscription intake
//! - Consultation requests with double opt-in confirmation

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod notifier;
pub mod repository;
pub mod server;
pub mod service;
pub mod validation;
