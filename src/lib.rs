//! Course builder core
//!
//! Organizes learning content into ordered modules holding links and
//! uploaded files, with drag-based reordering, free-text filtering and an
//! outline that follows the module currently in view.
//!
//! - `domain`: pure model, drag engine, filter, viewport tracker, outline
//! - `app`: dialogs, forms and the `CourseBuilder` controller
//! - `config`: TOML-loadable tunables
//! - `logging`: `tracing` subscriber setup

pub mod app;
pub mod config;
pub mod domain;
pub mod logging;

pub use app::{BuilderError, CourseBuilder, RecordingHost, SectionHost};
pub use config::BuilderConfig;
