//! Core library for the token-swap project.
//!
//! Two independent pieces live here: the sum-to-n strategies in `sums`,
//! and a headless swap form (`form`) fed by a public price list (`feed`)
//! with a terminal front end in `ui`.

pub mod cli;
pub mod config;
pub mod errors;
pub mod feed;
pub mod form;
pub mod models;
pub mod quote;
pub mod sums;
pub mod ui;
pub mod utils;
