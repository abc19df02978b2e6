//! ixepred-web — Web calculator for week-16 ixekizumab response.
//! Provides:
//!   - Patient covariate form with bounded inputs
//!   - PASI75 / PASI90 probability metrics with a traffic-light banner
//!   - Model transparency panel read from metadata.json
//!   - JSON mirror of the calculation and panel

pub mod router;
pub mod handlers;
pub mod state;
pub mod error;
pub mod render;
