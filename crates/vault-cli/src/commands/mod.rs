//! Command handlers.

pub mod challenge;
pub mod config;
pub mod files;
pub mod keys;
pub mod misc;
pub mod password;
pub mod text;
