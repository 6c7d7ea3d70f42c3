//! Resolved positional schemas.
//!
//! A [`RecordSchema`] is the plan a codec walks to encode or decode one
//! record: its fields in ascending position, the minimum width of an encoded
//! record, and a constructor for fresh instances. Schemas are produced once
//! per record type by the [`resolve`] module and never change afterward, so a
//! single instance can serve any number of concurrent codec calls.
//!
//! Physical offsets are not stored. A codec derives the offset of a field by
//! summing the widths consumed by the fields before it, since repeated groups
//! make those widths data-dependent.

pub mod model;
pub mod resolve;

use core::any::{Any, TypeId};

use alloc::{boxed::Box, collections::BTreeMap};

pub use model::{CompositeModel, FieldInfo, FieldModel, GroupModel, ListModel, ScalarModel};
pub use resolve::{MappingError, Resolver, resolve, resolve_type};

/// The ordered, immutable layout of a record type.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    name: &'static str,
    id: TypeId,
    constructor: fn() -> Box<dyn Any>,
    fields: BTreeMap<u32, FieldModel>,
    min_length: usize,
}

impl RecordSchema {
    pub(crate) fn new(
        name: &'static str,
        id: TypeId,
        constructor: fn() -> Box<dyn Any>,
        fields: BTreeMap<u32, FieldModel>,
        min_length: usize,
    ) -> Self {
        Self {
            name,
            id,
            constructor,
            fields,
            min_length,
        }
    }

    /// Declared name of the record type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Identity of the record type this schema describes.
    pub fn record_type_id(&self) -> TypeId {
        self.id
    }

    /// Smallest encoded width of a record, excluding repetitions.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field declared at a position.
    pub fn get(&self, position: u32) -> Option<&FieldModel> {
        self.fields.get(&position)
    }

    /// Fields in ascending position.
    pub fn iter(&self) -> impl Iterator<Item = &FieldModel> {
        self.fields.values()
    }

    /// Build a fresh, default instance of the record type.
    pub fn instantiate(&self) -> Box<dyn Any> {
        (self.constructor)()
    }
}

impl<'a> IntoIterator for &'a RecordSchema {
    type Item = &'a FieldModel;
    type IntoIter = alloc::collections::btree_map::Values<'a, u32, FieldModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}
