//! Application orchestration layer
//!
//! This module coordinates author input, the domain model and the host that
//! renders module sections. It owns all transient session state.

pub mod controller;
pub mod forms;
pub mod host;
pub mod state;

pub use controller::{BuilderError, CourseBuilder};
pub use host::{HostCall, RecordingHost, SectionHost};
