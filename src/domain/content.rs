//! Ordered content model
//!
//! Modules are kept in display order. Items live in one flat, ordered arena
//! and reference their container through `module_id`; a module's items are
//! the stable sub-sequence of the arena carrying its id. There is no
//! per-module ordering storage, so reordering inside a module is a move in
//! the arena.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Opaque module identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(Uuid);

impl ModuleId {
    fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque item identifier, unique across the whole arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to either kind of entity, used in error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityRef {
    Module(ModuleId),
    Item(ItemId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Module(id) => write!(f, "module {id}"),
            EntityRef::Item(id) => write!(f, "item {id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("{0} does not exist")]
    NotFound(EntityRef),
}

/// A named container for items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
}

/// Discriminant of an item's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Link,
    File,
}

/// Type-specific item data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemPayload {
    Link {
        url: String,
    },
    File {
        #[serde(rename = "fileName")]
        file_name: String,
        #[serde(rename = "fileSize")]
        file_size: u64,
        #[serde(rename = "fileType")]
        file_type: String,
    },
}

impl ItemPayload {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemPayload::Link { .. } => ItemKind::Link,
            ItemPayload::File { .. } => ItemKind::File,
        }
    }

    /// File size in whole kilobytes, rounded to nearest. None for links.
    pub fn size_kb(&self) -> Option<u64> {
        match self {
            ItemPayload::File { file_size, .. } => {
                Some(file_size / 1024 + u64::from(file_size % 1024 >= 512))
            }
            ItemPayload::Link { .. } => None,
        }
    }
}

/// Validated input for creating an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub title: String,
    pub payload: ItemPayload,
}

impl ItemFields {
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            payload: ItemPayload::Link { url: url.into() },
        }
    }

    pub fn file(
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
        file_type: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            payload: ItemPayload::File {
                file_name: file_name.into(),
                file_size,
                file_type: file_type.into(),
            },
        }
    }
}

/// A link or file reference, optionally tagged to one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "moduleId")]
    pub module_id: Option<ModuleId>,
    pub title: String,
    #[serde(flatten)]
    pub payload: ItemPayload,
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }

    pub fn is_unassigned(&self) -> bool {
        self.module_id.is_none()
    }
}

/// The authoritative ordered collections of modules and items
#[derive(Debug, Clone, Default)]
pub struct ContentModel {
    modules: Vec<Module>,
    items: Vec<Item>,
}

impl ContentModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// All modules in display order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// The flat item arena in storage order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.items.is_empty()
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn module_position(&self, id: ModuleId) -> Option<usize> {
        self.modules.iter().position(|m| m.id == id)
    }

    pub fn item_position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn contains_module(&self, id: ModuleId) -> bool {
        self.module_position(id).is_some()
    }

    /// Items tagged with `id`, in arena order
    pub fn items_in_module(&self, id: ModuleId) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(move |i| i.module_id == Some(id))
    }

    /// Items with no module, in arena order
    pub fn unassigned_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|i| i.module_id.is_none())
    }

    pub fn has_unassigned_items(&self) -> bool {
        self.items.iter().any(Item::is_unassigned)
    }

    pub fn module_item_count(&self, id: ModuleId) -> usize {
        self.items_in_module(id).count()
    }

    /// Appends a new module and returns it
    pub fn create_module(&mut self, name: impl Into<String>) -> &Module {
        let mut id = ModuleId::random();
        while self.contains_module(id) {
            id = ModuleId::random();
        }

        self.modules.push(Module {
            id,
            name: name.into(),
        });
        let index = self.modules.len() - 1;
        &self.modules[index]
    }

    pub fn rename_module(
        &mut self,
        id: ModuleId,
        name: impl Into<String>,
    ) -> Result<(), ContentError> {
        let module = self
            .modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ContentError::NotFound(EntityRef::Module(id)))?;
        module.name = name.into();
        Ok(())
    }

    /// Removes a module and every item tagged with it
    ///
    /// Returns the removed items in their former arena order.
    pub fn delete_module(&mut self, id: ModuleId) -> Result<Vec<Item>, ContentError> {
        let index = self
            .module_position(id)
            .ok_or(ContentError::NotFound(EntityRef::Module(id)))?;
        self.modules.remove(index);

        let (removed, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|i| i.module_id == Some(id));
        self.items = kept;
        Ok(removed)
    }

    /// Appends a new item, optionally tagged to an existing module
    pub fn create_item(
        &mut self,
        fields: ItemFields,
        module_id: Option<ModuleId>,
    ) -> Result<&Item, ContentError> {
        if let Some(module_id) = module_id {
            if !self.contains_module(module_id) {
                return Err(ContentError::NotFound(EntityRef::Module(module_id)));
            }
        }

        let mut id = ItemId::random();
        while self.item_position(id).is_some() {
            id = ItemId::random();
        }

        self.items.push(Item {
            id,
            module_id,
            title: fields.title,
            payload: fields.payload,
        });
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<Item, ContentError> {
        let index = self
            .item_position(id)
            .ok_or(ContentError::NotFound(EntityRef::Item(id)))?;
        Ok(self.items.remove(index))
    }

    // Mutation hooks for the reorder engine. Callers validate indices and ids.

    pub(crate) fn move_module(&mut self, from: usize, to: usize) {
        array_move(&mut self.modules, from, to);
    }

    pub(crate) fn move_item(&mut self, from: usize, to: usize) {
        array_move(&mut self.items, from, to);
    }

    pub(crate) fn retag_item(&mut self, index: usize, module_id: Option<ModuleId>) {
        self.items[index].module_id = module_id;
    }
}

/// Removes the element at `from` and reinserts it at `to`
///
/// Every element strictly between the two positions shifts by one towards
/// the vacated slot. Out-of-range indices leave the slice untouched.
pub fn array_move<T>(values: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= values.len() || to >= values.len() {
        return;
    }
    let value = values.remove(from);
    values.insert(to, value);
}
