//! Display rows and their generational handles.

use std::rc::{Rc, Weak};

use crate::object::{Introspectable, PropertySpec};

/// Identity of a row, stable while its contents change.
///
/// Every [`RowArena::clear`] starts a new generation, after which handles
/// from the old one no longer resolve. Generations are 64-bit, so a handle
/// cannot come back to life through wrap-around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowId {
    slot: usize,
    generation: u64,
}

impl RowId {
    pub fn slot(self) -> usize {
        self.slot
    }

    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// One entry of the property table.
#[derive(Clone)]
pub struct DisplayRow {
    spec: PropertySpec,
    rendered: String,
    /// Object the value was read from, for edit widgets writing back.
    source: Weak<dyn Introspectable>,
}

impl DisplayRow {
    pub fn new(spec: PropertySpec, rendered: String, source: &Rc<dyn Introspectable>) -> Self {
        Self {
            spec,
            rendered,
            source: Rc::downgrade(source),
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn rendered_value(&self) -> &str {
        &self.rendered
    }

    pub fn spec(&self) -> &PropertySpec {
        &self.spec
    }

    pub fn is_writable(&self) -> bool {
        self.spec.writable
    }

    /// The object this row belongs to, if it is still alive.
    pub fn source_object(&self) -> Option<Rc<dyn Introspectable>> {
        self.source.upgrade()
    }

    pub(crate) fn set_rendered(&mut self, rendered: String) {
        self.rendered = rendered;
    }
}

impl core::fmt::Debug for DisplayRow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisplayRow")
            .field("name", &self.spec.name)
            .field("rendered", &self.rendered)
            .field("source_alive", &(self.source.strong_count() > 0))
            .finish()
    }
}

/// Row storage addressed by [`RowId`].
#[derive(Default)]
pub struct RowArena {
    generation: u64,
    rows: Vec<DisplayRow>,
}

impl RowArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row: DisplayRow) -> RowId {
        let id = RowId {
            slot: self.rows.len(),
            generation: self.generation,
        };
        self.rows.push(row);
        id
    }

    pub fn get(&self, id: RowId) -> Option<&DisplayRow> {
        if id.generation != self.generation {
            return None;
        }
        self.rows.get(id.slot())
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut DisplayRow> {
        if id.generation != self.generation {
            return None;
        }
        self.rows.get_mut(id.slot())
    }

    /// Drops every row and invalidates all outstanding handles.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rows with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &DisplayRow)> {
        let generation = self.generation;
        self.rows.iter().enumerate().map(move |(slot, row)| {
            (
                RowId { slot, generation },
                row,
            )
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{DynamicObject, PropertySpec};

    fn source() -> Rc<dyn Introspectable> {
        Rc::new(DynamicObject::builder("GtkLabel").build())
    }

    #[test]
    fn test_handles_survive_content_updates() {
        let obj = source();
        let mut arena = RowArena::new();
        let id = arena.insert(DisplayRow::new(PropertySpec::scalar("label"), "a".into(), &obj));

        arena.get_mut(id).unwrap().set_rendered("b".into());
        assert_eq!(arena.get(id).unwrap().rendered_value(), "b");
        assert_eq!(arena.get(id).unwrap().name(), "label");
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let obj = source();
        let mut arena = RowArena::new();
        let old = arena.insert(DisplayRow::new(PropertySpec::scalar("label"), "a".into(), &obj));
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.get(old).is_none());

        // The slot is reused by the next generation, the old handle still misses.
        let new = arena.insert(DisplayRow::new(PropertySpec::scalar("width"), "1".into(), &obj));
        assert_eq!(new.slot(), old.slot());
        assert_ne!(new.generation(), old.generation());
        assert!(arena.get(old).is_none());
        assert_eq!(arena.get(new).unwrap().name(), "width");
    }

    #[test]
    fn test_generations_outgrow_u32() {
        let obj = source();
        let mut arena = RowArena {
            generation: u64::from(u32::MAX),
            rows: Vec::new(),
        };
        let old = arena.insert(DisplayRow::new(PropertySpec::scalar("label"), "a".into(), &obj));
        arena.clear();

        let new = arena.insert(DisplayRow::new(PropertySpec::scalar("label"), "b".into(), &obj));
        assert_eq!(new.generation(), u64::from(u32::MAX) + 1);
        assert!(arena.get(old).is_none());
        assert_eq!(arena.get(new).unwrap().rendered_value(), "b");
    }

    #[test]
    fn test_source_object_is_weak() {
        let obj = source();
        let row = DisplayRow::new(PropertySpec::scalar("label"), "a".into(), &obj);
        assert!(row.source_object().is_some());
        drop(obj);
        assert!(row.source_object().is_none());
    }

    #[test]
    fn test_iter_yields_resolvable_handles() {
        let obj = source();
        let mut arena = RowArena::new();
        arena.clear();
        arena.insert(DisplayRow::new(PropertySpec::scalar("a"), "1".into(), &obj));
        arena.insert(DisplayRow::new(PropertySpec::scalar("b"), "2".into(), &obj));

        let names: Vec<_> = arena
            .iter()
            .map(|(id, row)| {
                assert_eq!(arena.get(id).unwrap().name(), row.name());
                row.name().to_string()
            })
            .collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(arena.len(), 2);
    }
}
