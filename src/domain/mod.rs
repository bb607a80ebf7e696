//! Domain logic and core data structures
//!
//! This module contains the pure course model: ordered modules and items,
//! the drag engine, filtering, viewport tracking and the outline. Nothing
//! here knows about rendering or the host environment.

pub mod content;
pub mod core;
pub mod filter;
pub mod icon;
pub mod outline;
pub mod reorder;
pub mod viewport;
