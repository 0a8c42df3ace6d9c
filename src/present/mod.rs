// src/present/mod.rs

//! Terminal stand-in for the presentation layer: reads commands from stdin
//! and writes status changes and chart renderings to stdout.

pub mod input;
pub mod sink;

pub use input::{parse_command, spawn_input};
pub use sink::{format_update, ChangeSink, ConsoleSink};
