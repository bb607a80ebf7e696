//! Configuration module for course-builder
//!
//! Tunables the host may override from a TOML file: the viewport band used
//! for active-section tracking and the policy for retagged items.

pub mod builder;
pub mod viewport;

pub use builder::{BuilderConfig, ConfigError, DragConfig};
pub use viewport::ViewportConfig;
