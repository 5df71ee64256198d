//! Shared utility functions.

pub mod target_url;
