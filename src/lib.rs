//! Monthly labor summary for boat production.
//!
//! This crate reads time-clock punches, keeps the production hulls worked in
//! the report month, totals hours per hull, department and employee, and
//! writes the result as an `.xlsx` report.

#![warn(missing_docs)]

pub mod calculation;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod source;
