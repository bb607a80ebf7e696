//! Course outline view-model
//!
//! The outline lists every module in display order regardless of the search
//! query, with the active module flagged.

use crate::domain::content::{ContentModel, ModuleId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub module_id: ModuleId,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    #[default]
    Start,
}

/// Request for the host to bring a module section into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollCommand {
    pub module_id: ModuleId,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollCommand {
    /// Smooth scroll aligning the section's top with the viewport's top
    pub fn to_section(module_id: ModuleId) -> Self {
        Self {
            module_id,
            behavior: ScrollBehavior::default(),
            block: ScrollBlock::default(),
        }
    }
}

pub fn outline(model: &ContentModel, active: Option<ModuleId>) -> Vec<OutlineEntry> {
    model
        .modules()
        .iter()
        .map(|module| OutlineEntry {
            module_id: module.id,
            name: module.name.clone(),
            is_active: Some(module.id) == active,
        })
        .collect()
}
