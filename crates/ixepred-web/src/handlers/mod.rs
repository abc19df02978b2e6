//! HTTP handlers for all web routes.

pub mod calculator;
pub mod api;
