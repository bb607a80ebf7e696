//! Free-text filter over modules
//!
//! A module is visible when its name, or the title of any item it contains,
//! contains the query case-insensitively. Unassigned items are not subject to
//! the query and are always shown in full.

use crate::domain::content::{ContentModel, Item, Module};
use serde::Serialize;

/// A visible module together with its item view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleCard<'a> {
    pub module: &'a Module,
    pub items: Vec<&'a Item>,
    /// The module name itself matched a non-empty query
    pub highlight: bool,
}

impl ModuleCard<'_> {
    /// Summary line shown under the module name
    pub fn subtitle(&self) -> String {
        match self.items.len() {
            0 => "Add items to this module".to_string(),
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        }
    }
}

/// Result of projecting the model through a query
///
/// The two empty cases are kept apart so the host can tell an empty course
/// from a search that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "modules", rename_all = "kebab-case")]
pub enum FilterResult<'a> {
    NoModules,
    NoMatches,
    Modules(Vec<ModuleCard<'a>>),
}

impl<'a> FilterResult<'a> {
    pub fn modules(&self) -> &[ModuleCard<'a>] {
        match self {
            FilterResult::Modules(cards) => cards,
            FilterResult::NoModules | FilterResult::NoMatches => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modules().is_empty()
    }
}

/// Lower-cased query, ready for repeated matching
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    needle: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Case-insensitive substring test. The empty query matches everything.
    pub fn matches(&self, text: &str) -> bool {
        self.is_empty() || text.to_lowercase().contains(&self.needle)
    }
}

/// Computes the visible module cards for `query`
pub fn project<'a>(model: &'a ContentModel, query: &str) -> FilterResult<'a> {
    if model.modules().is_empty() {
        return FilterResult::NoModules;
    }

    let query = Query::new(query);
    let cards: Vec<ModuleCard<'a>> = model
        .modules()
        .iter()
        .filter_map(|module| {
            let items: Vec<&Item> = model.items_in_module(module.id).collect();
            let name_hit = query.matches(&module.name);
            let visible = name_hit || items.iter().any(|item| query.matches(&item.title));

            visible.then(|| ModuleCard {
                module,
                items,
                highlight: !query.is_empty() && name_hit,
            })
        })
        .collect();

    if cards.is_empty() {
        FilterResult::NoMatches
    } else {
        FilterResult::Modules(cards)
    }
}

/// Items outside any module, never filtered
pub fn unassigned(model: &ContentModel) -> Vec<&Item> {
    model.unassigned_items().collect()
}
