//! Reusable dashboard widgets.

pub mod footer;
pub mod network_map;
