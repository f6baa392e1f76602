//! Workforce Cost Optimization Engine
//!
//! This crate sizes a daily workforce to meet forecast demand at minimum labor
//! cost, and compares the result against historical attendance and labor cost.
//!
//! The core is split into the capacity and gap model ([`calculation`]) and the
//! cost-minimizing staffing solver ([`optimization`]). [`analysis`] combines
//! both into a single run, [`narrative`] turns the results into prompts for an
//! external text generator, and [`api`] exposes everything over HTTP.

#![warn(missing_docs)]

pub mod analysis;
pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod narrative;
pub mod optimization;
