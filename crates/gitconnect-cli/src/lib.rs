//! CLI library components for the GitConnect client.

#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
