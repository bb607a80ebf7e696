//! Host seam
//!
//! The host renders module sections, attaches observers to them and scrolls
//! them into view. The controller only talks to it through `SectionHost`.

use crate::domain::content::ModuleId;
use crate::domain::outline::ScrollCommand;
use crate::domain::viewport::SectionObserver;

pub trait SectionHost: SectionObserver {
    /// Fire-and-forget request to bring a section into view
    fn scroll_into_view(&mut self, command: ScrollCommand);
}

/// A call made by the controller into the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Observe(ModuleId),
    Unobserve(ModuleId),
    Scroll(ScrollCommand),
}

/// Headless host that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
    observed: Vec<ModuleId>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Returns and clears the recorded calls
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Sections currently observed, in attach order
    pub fn observed(&self) -> &[ModuleId] {
        &self.observed
    }

    pub fn scrolls(&self) -> Vec<ScrollCommand> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Scroll(cmd) => Some(*cmd),
                _ => None,
            })
            .collect()
    }
}

impl SectionObserver for RecordingHost {
    fn observe(&mut self, module_id: ModuleId) {
        self.calls.push(HostCall::Observe(module_id));
        self.observed.push(module_id);
    }

    fn unobserve(&mut self, module_id: ModuleId) {
        self.calls.push(HostCall::Unobserve(module_id));
        self.observed.retain(|id| *id != module_id);
    }
}

impl SectionHost for RecordingHost {
    fn scroll_into_view(&mut self, command: ScrollCommand) {
        self.calls.push(HostCall::Scroll(command));
    }
}
