//! Declarative loader and column pruner for Lahman baseball CSV exports.
//!
//! A JSON config lists jobs; each job is an ordered list of datasets with the
//! columns to drop (or keep). Every dataset is loaded, pruned, and previewed
//! independently, and failures are collected into a [`job::RunReport`].

pub mod config;
pub mod data;
pub mod job;
