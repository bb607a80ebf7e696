//! Application controller and coordination layer
//!
//! The controller owns the content model and all transient session state
//! (search query, open dialog, viewport tracker). Every host event goes
//! through it; after each change it re-syncs section subscriptions with the
//! modules currently rendered.

use crate::app::forms::{FormError, LinkForm, ModuleForm, UploadForm};
use crate::app::host::SectionHost;
use crate::app::state::{DialogEvent, DialogState, StateMachine};
use crate::config::{BuilderConfig, ConfigError};
use crate::domain::content::{
    ContentError, ContentModel, EntityRef, Item, ItemFields, ItemId, ModuleId,
};
use crate::domain::core::Rect;
use crate::domain::filter::{self, FilterResult};
use crate::domain::outline::{self, OutlineEntry, ScrollCommand};
use crate::domain::reorder::{self, DragError, DragOutcome, DragSource, DropTarget, UnchangedReason};
use crate::domain::viewport::{IntersectionEntry, SectionLayout, ViewportTracker};
use thiserror::Error;

/// Errors surfaced by controller operations
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Drag(#[from] DragError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Main course builder controller
///
/// Single-threaded: every operation takes `&mut self` and completes before
/// the next one starts. Subscriptions held on the host are released on drop.
pub struct CourseBuilder<H: SectionHost> {
    model: ContentModel,
    query: String,
    dialog: DialogState,
    tracker: ViewportTracker,
    config: BuilderConfig,
    host: H,
}

impl<H: SectionHost> CourseBuilder<H> {
    /// Creates an empty course builder
    ///
    /// # Returns
    /// CourseBuilder instance or BuilderError if the viewport band is invalid
    pub fn new(config: BuilderConfig, host: H) -> Result<Self, BuilderError> {
        let band = config.viewport.band()?;
        Ok(Self {
            model: ContentModel::new(),
            query: String::new(),
            dialog: DialogState::default(),
            tracker: ViewportTracker::new(band),
            config,
            host,
        })
    }

    pub fn model(&self) -> &ContentModel {
        &self.model
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn active_module_id(&self) -> Option<ModuleId> {
        self.tracker.active_module_id()
    }

    /// Module cards visible under the current query
    pub fn visible_modules(&self) -> FilterResult<'_> {
        filter::project(&self.model, &self.query)
    }

    /// Items outside any module; the query does not apply
    pub fn unassigned_items(&self) -> Vec<&Item> {
        filter::unassigned(&self.model)
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        outline::outline(&self.model, self.tracker.active_module_id())
    }

    // Dialog flow

    /// Opens a dialog, checking the targeted module exists
    pub fn open_dialog(&mut self, event: DialogEvent) -> Result<DialogState, BuilderError> {
        let target = match event {
            DialogEvent::EditModule(id) | DialogEvent::AddToModule(id, _) => Some(id),
            _ => None,
        };
        if let Some(id) = target {
            if !self.model.contains_module(id) {
                return Err(ContentError::NotFound(EntityRef::Module(id)).into());
            }
        }

        self.dialog = StateMachine::process_event(self.dialog, event);
        tracing::debug!(dialog = ?self.dialog, "dialog opened");
        Ok(self.dialog)
    }

    pub fn close_dialog(&mut self) {
        self.dialog = StateMachine::process_event(self.dialog, DialogEvent::Close);
    }

    /// Saves the module dialog: renames when editing, creates otherwise
    pub fn save_module(&mut self, form: &ModuleForm) -> Result<ModuleId, BuilderError> {
        let name = form.submit()?;
        let id = match self.dialog {
            DialogState::Module { editing: Some(id) } => {
                self.rename_module(id, name)?;
                id
            }
            _ => self.create_module(name),
        };
        self.dialog = StateMachine::process_event(self.dialog, DialogEvent::Saved);
        Ok(id)
    }

    /// Saves the link dialog into its target module (or unassigned)
    pub fn save_link(&mut self, form: &LinkForm) -> Result<ItemId, BuilderError> {
        let fields = form.submit()?;
        let module_id = match self.dialog {
            DialogState::Link { module_id } => module_id,
            _ => None,
        };
        let id = self.create_item(fields, module_id)?;
        self.dialog = StateMachine::process_event(self.dialog, DialogEvent::Saved);
        Ok(id)
    }

    /// Saves the upload dialog into its target module (or unassigned)
    pub fn save_upload(&mut self, form: &UploadForm) -> Result<ItemId, BuilderError> {
        let fields = form.submit()?;
        let module_id = match self.dialog {
            DialogState::Upload { module_id } => module_id,
            _ => None,
        };
        let id = self.create_item(fields, module_id)?;
        self.dialog = StateMachine::process_event(self.dialog, DialogEvent::Saved);
        Ok(id)
    }

    // Content operations

    pub fn create_module(&mut self, name: impl Into<String>) -> ModuleId {
        let module = self.model.create_module(name);
        let id = module.id;
        tracing::info!(module = %id, name = %module.name, "module created");
        self.sync_sections();
        id
    }

    pub fn rename_module(
        &mut self,
        id: ModuleId,
        name: impl Into<String>,
    ) -> Result<(), BuilderError> {
        self.model.rename_module(id, name)?;
        tracing::info!(module = %id, "module renamed");
        // A rename can change which modules match the query
        self.sync_sections();
        Ok(())
    }

    /// Deletes a module along with every item it contains
    pub fn delete_module(&mut self, id: ModuleId) -> Result<Vec<Item>, BuilderError> {
        let removed = self.model.delete_module(id)?;
        tracing::info!(module = %id, items = removed.len(), "module deleted");
        self.tracker.forget(id);
        self.sync_sections();
        Ok(removed)
    }

    pub fn create_item(
        &mut self,
        fields: ItemFields,
        module_id: Option<ModuleId>,
    ) -> Result<ItemId, BuilderError> {
        let item = self.model.create_item(fields, module_id)?;
        let id = item.id;
        tracing::info!(item = %id, kind = ?item.kind(), module = ?module_id, "item created");
        self.sync_sections();
        Ok(id)
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<Item, BuilderError> {
        let removed = self.model.delete_item(id)?;
        tracing::info!(item = %id, "item deleted");
        self.sync_sections();
        Ok(removed)
    }

    // Drag and search

    /// Applies a completed drag gesture
    ///
    /// Gestures that cannot be classified are dropped as a no-op; unknown ids
    /// are reported as errors. Neither mutates the model.
    pub fn handle_drag_end(
        &mut self,
        source: DragSource,
        target: Option<DropTarget>,
    ) -> Result<DragOutcome, BuilderError> {
        let policy = self.config.drag.retag_policy;
        let outcome = match reorder::apply_drag_result(&mut self.model, source, target, policy) {
            Ok(outcome) => outcome,
            Err(DragError::InvalidDrag { dragged, target }) => {
                tracing::debug!(?dragged, ?target, "ignoring unclassifiable drag");
                DragOutcome::Unchanged(UnchangedReason::Unclassified)
            }
            Err(err) => {
                tracing::warn!(%err, "drag rejected");
                return Err(err.into());
            }
        };

        if outcome.is_mutation() {
            tracing::info!(?outcome, "drag applied");
            self.sync_sections();
        } else {
            tracing::debug!(?outcome, "drag left model unchanged");
        }
        Ok(outcome)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        tracing::debug!(query = %self.query, "search query changed");
        self.sync_sections();
    }

    // Viewport

    /// Feeds a layout snapshot through the tracker
    ///
    /// # Returns
    /// The active module after the resulting batch
    pub fn handle_layout(&mut self, viewport: Rect, layouts: &[SectionLayout]) -> Option<ModuleId> {
        let batch = self.tracker.observe_layout(viewport, layouts);
        self.handle_intersections(&batch)
    }

    /// Applies an observation batch delivered by the host
    pub fn handle_intersections(&mut self, batch: &[IntersectionEntry]) -> Option<ModuleId> {
        let before = self.tracker.active_module_id();
        let active = self.tracker.apply_batch(batch);
        if active != before {
            tracing::debug!(active = ?active, "active module changed");
        }
        active
    }

    /// Scrolls the host to a module's section
    ///
    /// # Returns
    /// true if a scroll command was issued, false if the section is not
    /// currently rendered (filtered out by the query)
    pub fn select_outline_entry(&mut self, id: ModuleId) -> Result<bool, BuilderError> {
        if !self.model.contains_module(id) {
            return Err(ContentError::NotFound(EntityRef::Module(id)).into());
        }
        if !self.tracker.is_observing(id) {
            tracing::debug!(module = %id, "outline target not rendered");
            return Ok(false);
        }
        self.host.scroll_into_view(ScrollCommand::to_section(id));
        Ok(true)
    }

    fn sync_sections(&mut self) {
        let visible: Vec<ModuleId> = self
            .visible_modules()
            .modules()
            .iter()
            .map(|card| card.module.id)
            .collect();
        self.tracker.sync_sections(&visible, &mut self.host);
    }
}

impl<H: SectionHost> Drop for CourseBuilder<H> {
    fn drop(&mut self) {
        self.tracker.release(&mut self.host);
    }
}
