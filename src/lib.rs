//! CORD-19 Explorer
//!
//! Loads the trimmed CORD-19 metadata CSV, cleans it into dated paper records
//! and summarises it as a console report or an interactive explorer.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod report;
pub mod stats;
