//! Drag reorder and move engine
//!
//! A completed drag gesture is classified into exactly one of three cases,
//! checked in order:
//!
//! 1. module dropped on a module: container reorder
//! 2. item dropped on a module: retag the item onto that module
//! 3. item dropped on another item: retag when the two sit in different
//!    containers, otherwise move the source to the target's arena index
//!
//! The engine never creates or destroys entities. Every failure is detected
//! before the first mutation, so a rejected drag leaves the model untouched.

use crate::domain::content::{ContentModel, EntityRef, ItemId, ModuleId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The entity being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Module(ModuleId),
    Item(ItemId),
}

/// Where the dragged entity was released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Module(ModuleId),
    Item(ItemId),
}

/// Where a retagged item ends up in the flat arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetagPolicy {
    /// Only the tag changes. The item's place in its new container follows
    /// from where it already sat in the arena.
    #[default]
    KeepPosition,
    /// The item is moved directly after the last item already in the target
    /// container (or to the arena end), so it shows up last in that container.
    AppendToModule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnchangedReason {
    NoTarget,
    SameEntity,
    AlreadyInModule,
    /// The gesture matched none of the three cases and was dropped
    Unclassified,
}

/// What a drag did to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    ModulesReordered {
        module: ModuleId,
        from: usize,
        to: usize,
    },
    ItemRetagged {
        item: ItemId,
        from: Option<ModuleId>,
        to: Option<ModuleId>,
    },
    ItemMoved {
        item: ItemId,
        from: usize,
        to: usize,
    },
    Unchanged(UnchangedReason),
}

impl DragOutcome {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, DragOutcome::Unchanged(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("drag references {0}, which does not exist")]
    NotFound(EntityRef),
    #[error("cannot drop {dragged:?} onto {target:?}")]
    InvalidDrag { dragged: DragSource, target: DropTarget },
}

/// Applies a completed drag gesture to the model
pub fn apply_drag_result(
    model: &mut ContentModel,
    source: DragSource,
    target: Option<DropTarget>,
    policy: RetagPolicy,
) -> Result<DragOutcome, DragError> {
    let Some(target) = target else {
        return Ok(DragOutcome::Unchanged(UnchangedReason::NoTarget));
    };

    match (source, target) {
        (DragSource::Module(source_id), DropTarget::Module(target_id)) => {
            let from = module_index(model, source_id)?;
            let to = module_index(model, target_id)?;
            if from == to {
                return Ok(DragOutcome::Unchanged(UnchangedReason::SameEntity));
            }
            model.move_module(from, to);
            Ok(DragOutcome::ModulesReordered {
                module: source_id,
                from,
                to,
            })
        }
        (DragSource::Item(item_id), DropTarget::Module(module_id)) => {
            let index = item_index(model, item_id)?;
            module_index(model, module_id)?;
            Ok(retag(model, index, Some(module_id), policy))
        }
        (DragSource::Item(source_id), DropTarget::Item(target_id)) => {
            let from = item_index(model, source_id)?;
            let to = item_index(model, target_id)?;
            if from == to {
                return Ok(DragOutcome::Unchanged(UnchangedReason::SameEntity));
            }

            let source_tag = model.items()[from].module_id;
            let target_tag = model.items()[to].module_id;
            if source_tag != target_tag {
                return Ok(retag(model, from, target_tag, policy));
            }

            model.move_item(from, to);
            Ok(DragOutcome::ItemMoved {
                item: source_id,
                from,
                to,
            })
        }
        (DragSource::Module(source_id), DropTarget::Item(target_id)) => {
            module_index(model, source_id)?;
            item_index(model, target_id)?;
            Err(DragError::InvalidDrag {
                dragged: source,
                target,
            })
        }
    }
}

fn module_index(model: &ContentModel, id: ModuleId) -> Result<usize, DragError> {
    model
        .module_position(id)
        .ok_or(DragError::NotFound(EntityRef::Module(id)))
}

fn item_index(model: &ContentModel, id: ItemId) -> Result<usize, DragError> {
    model
        .item_position(id)
        .ok_or(DragError::NotFound(EntityRef::Item(id)))
}

fn retag(
    model: &mut ContentModel,
    index: usize,
    to: Option<ModuleId>,
    policy: RetagPolicy,
) -> DragOutcome {
    let item = &model.items()[index];
    let (item_id, from) = (item.id, item.module_id);
    if from == to {
        return DragOutcome::Unchanged(UnchangedReason::AlreadyInModule);
    }

    model.retag_item(index, to);

    if policy == RetagPolicy::AppendToModule {
        let destination = append_position(model, index, to);
        model.move_item(index, destination);
    }

    DragOutcome::ItemRetagged {
        item: item_id,
        from,
        to,
    }
}

/// Arena index the item at `index` should occupy to be last among `tag`
fn append_position(model: &ContentModel, index: usize, tag: Option<ModuleId>) -> usize {
    let last_sibling = model
        .items()
        .iter()
        .enumerate()
        .filter(|(i, item)| *i != index && item.module_id == tag)
        .map(|(i, _)| i)
        .last();

    match last_sibling {
        // Removing the item first shifts later siblings down by one
        Some(sibling) if sibling > index => sibling,
        Some(sibling) => sibling + 1,
        None => model.items().len() - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{Item, ItemFields};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn titles<'a>(items: impl Iterator<Item = &'a Item>) -> Vec<&'a str> {
        items.map(|i| i.title.as_str()).collect()
    }

    fn module_names(model: &ContentModel) -> Vec<&str> {
        model.modules().iter().map(|m| m.name.as_str()).collect()
    }

    fn link(model: &mut ContentModel, title: &str, module: Option<ModuleId>) -> ItemId {
        model
            .create_item(ItemFields::link(title, format!("https://{title}")), module)
            .unwrap()
            .id
    }

    #[test]
    fn module_dropped_on_first_module_moves_to_front() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        model.create_module("M2");
        let m3 = model.create_module("M3").id;

        let outcome = apply_drag_result(
            &mut model,
            DragSource::Module(m3),
            Some(DropTarget::Module(m1)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        assert_eq!(
            outcome,
            DragOutcome::ModulesReordered {
                module: m3,
                from: 2,
                to: 0
            }
        );
        assert_eq!(module_names(&model), vec!["M3", "M1", "M2"]);
    }

    #[test]
    fn module_dropped_on_itself_is_a_no_op() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        model.create_module("M2");

        let outcome = apply_drag_result(
            &mut model,
            DragSource::Module(m1),
            Some(DropTarget::Module(m1)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        assert_eq!(outcome, DragOutcome::Unchanged(UnchangedReason::SameEntity));
        assert_eq!(module_names(&model), vec!["M1", "M2"]);
    }

    #[test]
    fn unassigned_item_dropped_on_module_is_retagged() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let m2 = model.create_module("M2").id;
        let i1 = link(&mut model, "I1", None);

        let outcome = apply_drag_result(
            &mut model,
            DragSource::Item(i1),
            Some(DropTarget::Module(m2)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        assert_eq!(
            outcome,
            DragOutcome::ItemRetagged {
                item: i1,
                from: None,
                to: Some(m2)
            }
        );
        assert_eq!(model.item(i1).unwrap().module_id, Some(m2));
        assert_eq!(model.items_in_module(m1).count(), 0);
        assert_eq!(model.unassigned_items().count(), 0);
        assert_eq!(titles(model.items_in_module(m2)), vec!["I1"]);
    }

    #[test]
    fn retag_keeps_arena_position_by_default() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let m2 = model.create_module("M2").id;
        let moved = link(&mut model, "early", Some(m1));
        link(&mut model, "b1", Some(m2));
        link(&mut model, "b2", Some(m2));

        apply_drag_result(
            &mut model,
            DragSource::Item(moved),
            Some(DropTarget::Module(m2)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        // It sat before the existing items, so it shows first in M2
        assert_eq!(titles(model.items_in_module(m2)), vec!["early", "b1", "b2"]);
        assert_eq!(model.item_position(moved), Some(0));
    }

    #[test]
    fn append_policy_places_item_last_in_new_module() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let m2 = model.create_module("M2").id;
        let moved = link(&mut model, "early", Some(m1));
        link(&mut model, "b1", Some(m2));
        link(&mut model, "tail", Some(m1));
        link(&mut model, "b2", Some(m2));
        link(&mut model, "loose", None);

        apply_drag_result(
            &mut model,
            DragSource::Item(moved),
            Some(DropTarget::Module(m2)),
            RetagPolicy::AppendToModule,
        )
        .unwrap();

        assert_eq!(titles(model.items_in_module(m2)), vec!["b1", "b2", "early"]);
        assert_eq!(
            titles(model.items().iter()),
            vec!["b1", "tail", "b2", "early", "loose"]
        );
    }

    #[test]
    fn append_policy_moves_backwards_when_siblings_precede() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        link(&mut model, "a1", Some(m1));
        link(&mut model, "x", None);
        let late = link(&mut model, "late", None);

        apply_drag_result(
            &mut model,
            DragSource::Item(late),
            Some(DropTarget::Module(m1)),
            RetagPolicy::AppendToModule,
        )
        .unwrap();

        assert_eq!(titles(model.items().iter()), vec!["a1", "late", "x"]);
    }

    #[test]
    fn append_policy_into_empty_module_goes_to_arena_end() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let first = link(&mut model, "first", None);
        link(&mut model, "second", None);

        apply_drag_result(
            &mut model,
            DragSource::Item(first),
            Some(DropTarget::Module(m1)),
            RetagPolicy::AppendToModule,
        )
        .unwrap();

        assert_eq!(titles(model.items().iter()), vec!["second", "first"]);
    }

    #[test]
    fn append_policy_applies_to_item_on_item_retags() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let m2 = model.create_module("M2").id;
        let a1 = link(&mut model, "a1", Some(m1));
        let b1 = link(&mut model, "b1", Some(m2));
        link(&mut model, "a2", Some(m1));
        link(&mut model, "b2", Some(m2));

        let outcome = apply_drag_result(
            &mut model,
            DragSource::Item(a1),
            Some(DropTarget::Item(b1)),
            RetagPolicy::AppendToModule,
        )
        .unwrap();

        assert_eq!(
            outcome,
            DragOutcome::ItemRetagged {
                item: a1,
                from: Some(m1),
                to: Some(m2)
            }
        );
        assert_eq!(titles(model.items_in_module(m2)), vec!["b1", "b2", "a1"]);
        assert_eq!(titles(model.items().iter()), vec!["b1", "a2", "b2", "a1"]);
    }

    #[test]
    fn append_policy_onto_unassigned_item_lands_last_among_unassigned() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let u1 = link(&mut model, "u1", None);
        let a = link(&mut model, "a", Some(m1));
        link(&mut model, "u2", None);
        link(&mut model, "b", Some(m1));

        apply_drag_result(
            &mut model,
            DragSource::Item(a),
            Some(DropTarget::Item(u1)),
            RetagPolicy::AppendToModule,
        )
        .unwrap();

        assert_eq!(model.item(a).unwrap().module_id, None);
        assert_eq!(titles(model.unassigned_items()), vec!["u1", "u2", "a"]);
        assert_eq!(titles(model.items().iter()), vec!["u1", "u2", "a", "b"]);
    }

    #[test]
    fn append_policy_from_unassigned_item_onto_module_item() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let loose = link(&mut model, "loose", None);
        link(&mut model, "x", Some(m1));
        let y = link(&mut model, "y", Some(m1));

        apply_drag_result(
            &mut model,
            DragSource::Item(loose),
            Some(DropTarget::Item(y)),
            RetagPolicy::AppendToModule,
        )
        .unwrap();

        assert_eq!(titles(model.items_in_module(m1)), vec!["x", "y", "loose"]);
        assert!(!model.has_unassigned_items());
    }

    #[test]
    fn retag_onto_current_module_is_unchanged() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let a = link(&mut model, "a", Some(m1));
        link(&mut model, "b", Some(m1));

        for policy in [RetagPolicy::KeepPosition, RetagPolicy::AppendToModule] {
            let outcome = apply_drag_result(
                &mut model,
                DragSource::Item(a),
                Some(DropTarget::Module(m1)),
                policy,
            )
            .unwrap();
            assert_eq!(outcome, DragOutcome::Unchanged(UnchangedReason::AlreadyInModule));
            assert_eq!(titles(model.items().iter()), vec!["a", "b"]);
        }
    }

    #[test]
    fn same_module_item_drop_is_an_array_move() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let a = link(&mut model, "A", Some(m1));
        link(&mut model, "B", Some(m1));
        let c = link(&mut model, "C", Some(m1));

        let outcome = apply_drag_result(
            &mut model,
            DragSource::Item(c),
            Some(DropTarget::Item(a)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        assert_eq!(outcome, DragOutcome::ItemMoved { item: c, from: 2, to: 0 });
        assert_eq!(titles(model.items_in_module(m1)), vec!["C", "A", "B"]);
    }

    #[test]
    fn forward_move_lands_after_target() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let a = link(&mut model, "A", Some(m1));
        link(&mut model, "B", Some(m1));
        let c = link(&mut model, "C", Some(m1));

        apply_drag_result(
            &mut model,
            DragSource::Item(a),
            Some(DropTarget::Item(c)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        assert_eq!(titles(model.items_in_module(m1)), vec!["B", "C", "A"]);
    }

    #[test]
    fn unassigned_items_reorder_among_themselves() {
        let mut model = ContentModel::new();
        let a = link(&mut model, "A", None);
        let b = link(&mut model, "B", None);

        apply_drag_result(
            &mut model,
            DragSource::Item(b),
            Some(DropTarget::Item(a)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        assert_eq!(titles(model.unassigned_items()), vec!["B", "A"]);
    }

    #[test]
    fn item_dropped_on_item_in_other_module_takes_its_tag() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let m2 = model.create_module("M2").id;
        let a = link(&mut model, "A", Some(m1));
        let b = link(&mut model, "B", Some(m2));

        let outcome = apply_drag_result(
            &mut model,
            DragSource::Item(a),
            Some(DropTarget::Item(b)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        assert_eq!(
            outcome,
            DragOutcome::ItemRetagged {
                item: a,
                from: Some(m1),
                to: Some(m2)
            }
        );
        assert_eq!(titles(model.items().iter()), vec!["A", "B"]);
        assert_eq!(titles(model.items_in_module(m2)), vec!["A", "B"]);
    }

    #[test]
    fn item_dropped_on_unassigned_item_is_unassigned() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let a = link(&mut model, "A", Some(m1));
        let loose = link(&mut model, "loose", None);

        apply_drag_result(
            &mut model,
            DragSource::Item(a),
            Some(DropTarget::Item(loose)),
            RetagPolicy::KeepPosition,
        )
        .unwrap();

        assert_eq!(model.item(a).unwrap().module_id, None);
        assert_eq!(titles(model.unassigned_items()), vec!["A", "loose"]);
    }

    #[test]
    fn drop_without_target_does_nothing() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;

        let outcome =
            apply_drag_result(&mut model, DragSource::Module(m1), None, RetagPolicy::KeepPosition)
                .unwrap();
        assert_eq!(outcome, DragOutcome::Unchanged(UnchangedReason::NoTarget));
        assert!(!outcome.is_mutation());
    }

    #[test]
    fn unknown_references_are_rejected_without_mutation() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let a = link(&mut model, "A", None);

        let mut other = ContentModel::new();
        let ghost_module = other.create_module("ghost").id;
        let ghost_item = link(&mut other, "ghost", None);

        let err = apply_drag_result(
            &mut model,
            DragSource::Item(a),
            Some(DropTarget::Module(ghost_module)),
            RetagPolicy::KeepPosition,
        )
        .unwrap_err();
        assert_eq!(err, DragError::NotFound(EntityRef::Module(ghost_module)));

        let err = apply_drag_result(
            &mut model,
            DragSource::Item(ghost_item),
            Some(DropTarget::Module(m1)),
            RetagPolicy::KeepPosition,
        )
        .unwrap_err();
        assert_eq!(err, DragError::NotFound(EntityRef::Item(ghost_item)));

        assert_eq!(model.item(a).unwrap().module_id, None);
    }

    #[test]
    fn module_dropped_on_item_is_invalid() {
        let mut model = ContentModel::new();
        let m1 = model.create_module("M1").id;
        let a = link(&mut model, "A", Some(m1));

        let err = apply_drag_result(
            &mut model,
            DragSource::Module(m1),
            Some(DropTarget::Item(a)),
            RetagPolicy::KeepPosition,
        )
        .unwrap_err();
        assert!(matches!(err, DragError::InvalidDrag { .. }));
    }

    proptest! {
        #[test]
        fn module_reorder_preserves_relative_order_of_others(
            count in 2usize..8,
            from in 0usize..8,
            to in 0usize..8,
        ) {
            let from = from % count;
            let to = to % count;
            let mut model = ContentModel::new();
            let ids: Vec<ModuleId> =
                (0..count).map(|n| model.create_module(format!("M{n}")).id).collect();

            apply_drag_result(
                &mut model,
                DragSource::Module(ids[from]),
                Some(DropTarget::Module(ids[to])),
                RetagPolicy::KeepPosition,
            )
            .unwrap();

            let after: Vec<ModuleId> = model.modules().iter().map(|m| m.id).collect();
            prop_assert_eq!(after.len(), count);
            prop_assert_eq!(after[to], ids[from]);

            let others_before: Vec<ModuleId> =
                ids.iter().copied().filter(|id| *id != ids[from]).collect();
            let others_after: Vec<ModuleId> =
                after.iter().copied().filter(|id| *id != ids[from]).collect();
            prop_assert_eq!(others_before, others_after);
        }

        #[test]
        fn same_module_moves_keep_membership(
            count in 2usize..8,
            from in 0usize..8,
            to in 0usize..8,
        ) {
            let from = from % count;
            let to = to % count;
            let mut model = ContentModel::new();
            let m1 = model.create_module("M1").id;
            let ids: Vec<ItemId> =
                (0..count).map(|n| link(&mut model, &format!("i{n}"), Some(m1))).collect();

            apply_drag_result(
                &mut model,
                DragSource::Item(ids[from]),
                Some(DropTarget::Item(ids[to])),
                RetagPolicy::KeepPosition,
            )
            .unwrap();

            let mut expected = ids.clone();
            let moved = expected.remove(from);
            expected.insert(to, moved);

            let after: Vec<ItemId> = model.items_in_module(m1).map(|i| i.id).collect();
            prop_assert_eq!(after, expected);
            prop_assert!(model.items().iter().all(|i| i.module_id == Some(m1)));
        }

        #[test]
        fn retag_changes_only_the_tag(
            policy in prop_oneof![
                Just(RetagPolicy::KeepPosition),
                Just(RetagPolicy::AppendToModule)
            ],
            tags in proptest::collection::vec(0usize..3, 1..10),
            pick in 0usize..10,
            dest in 0usize..2,
        ) {
            let mut model = ContentModel::new();
            let modules = [model.create_module("M0").id, model.create_module("M1").id];
            for (n, tag) in tags.iter().enumerate() {
                let module = modules.get(*tag).copied();
                link(&mut model, &format!("i{n}"), module);
            }
            let source = model.items()[pick % tags.len()].clone();
            let before = model.items().to_vec();

            apply_drag_result(
                &mut model,
                DragSource::Item(source.id),
                Some(DropTarget::Module(modules[dest])),
                policy,
            )
            .unwrap();

            let after = model.item(source.id).unwrap();
            prop_assert_eq!(after.module_id, Some(modules[dest]));
            prop_assert_eq!(&after.title, &source.title);
            prop_assert_eq!(&after.payload, &source.payload);
            prop_assert_eq!(model.items().len(), before.len());

            // Every other item keeps its tag and relative order
            let others_before: Vec<_> =
                before.iter().filter(|i| i.id != source.id).cloned().collect();
            let others_after: Vec<_> =
                model.items().iter().filter(|i| i.id != source.id).cloned().collect();
            prop_assert_eq!(others_before, others_after);
        }
    }
}
