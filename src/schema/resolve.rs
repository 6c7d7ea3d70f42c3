//! Resolution of record declarations into schemas.
//!
//! Resolution validates a record type, dispatches each declared field to the
//! resolver for its descriptor kind, and orders the results by position. It
//! either returns a complete schema or fails with a [`MappingError`]; nothing
//! is returned half-built.
//!
//! Nested record types are resolved recursively. Within one resolution, each
//! nested type is resolved once and its schema shared between every field
//! referring to it. A type that (indirectly) contains itself is rejected.

use core::any::TypeId;

use alloc::{collections::BTreeMap, string::String, sync::Arc, vec::Vec};

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    declare::{
        CompositeDescriptor, Constructor, Declaration, FieldDeclaration, FieldDescriptor,
        FieldHandle, FieldKind, GroupDescriptor, ListDescriptor, Record, ScalarKind, TypeRef,
    },
    format::FormatConfig,
};

use super::{
    RecordSchema,
    model::{CompositeModel, FieldInfo, FieldModel, GroupModel, ListModel, ScalarModel},
};

/// An error mapping a record type to a fixed-width layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The type carries no record declaration.
    #[error("The type `{record}` is not declared as a fixed record.")]
    NotDeclared { record: &'static str },
    /// The record declares no zero-argument constructor.
    #[error("The zero-argument constructor is not defined for record `{record}`.")]
    ConstructorMissing { record: &'static str },
    /// The record's zero-argument constructor is not accessible.
    #[error("The zero-argument constructor of record `{record}` is not accessible.")]
    ConstructorInaccessible { record: &'static str },
    /// A repeated field maps to a member that is not a sequence.
    #[error("Field `{record}.{field}` repeats, but is not a sequence.")]
    NotSequence {
        record: &'static str,
        field: &'static str,
    },
    /// A group has neither a counter nor an identification.
    #[error(
        "Group `{record}.{field}` must have either a counter or an identification of non-zero length."
    )]
    NoStopRule {
        record: &'static str,
        field: &'static str,
    },
    /// A scalar list has no counter.
    #[error("List `{record}.{field}` must have a counter of non-zero length.")]
    MissingCounter {
        record: &'static str,
        field: &'static str,
    },
    /// Two fields share a position (strict resolution only).
    #[error("Fields `{record}.{existing}` and `{record}.{field}` share position {position}.")]
    DuplicatePosition {
        record: &'static str,
        position: u32,
        existing: &'static str,
        field: &'static str,
    },
    /// A record contains itself.
    #[error("Record `{record}` contains itself ({path}).")]
    Cycle { record: &'static str, path: String },
    /// The declared widths of a record add up past `usize::MAX`.
    #[error("The minimum length of record `{record}` overflows.")]
    LengthOverflow { record: &'static str },
}

/// Resolve the schema of a record type.
pub fn resolve<T: Record>(config: &FormatConfig) -> Result<RecordSchema, MappingError> {
    resolve_type(TypeRef::record::<T>(), config)
}

/// Resolve the schema of a type known only at runtime.
pub fn resolve_type(ty: TypeRef, config: &FormatConfig) -> Result<RecordSchema, MappingError> {
    Resolver::new(config).resolve(ty)
}

/// A single schema resolution, with its options.
#[derive(Debug)]
pub struct Resolver<'c> {
    config: &'c FormatConfig,
    strict_positions: bool,
    /// Records currently being resolved, outermost first.
    in_progress: Vec<(TypeId, &'static str)>,
    /// Nested schemas completed so far.
    resolved: BTreeMap<TypeId, Arc<RecordSchema>>,
}

impl<'c> Resolver<'c> {
    pub fn new(config: &'c FormatConfig) -> Self {
        Self {
            config,
            strict_positions: false,
            in_progress: Vec::new(),
            resolved: BTreeMap::new(),
        }
    }

    /// Reject fields sharing a position.
    ///
    /// By default, a later field replaces an earlier one declared at the same
    /// position, and a warning is logged.
    pub fn strict_positions(mut self, strict: bool) -> Self {
        self.strict_positions = strict;
        self
    }

    pub fn resolve(mut self, ty: TypeRef) -> Result<RecordSchema, MappingError> {
        self.record(ty)
    }

    fn record(&mut self, ty: TypeRef) -> Result<RecordSchema, MappingError> {
        let Some(declare) = ty.declaration() else {
            Err(MappingError::NotDeclared { record: ty.name() })?
        };

        let declaration = declare();
        let record = declaration.name();

        if self.in_progress.iter().any(|(id, _)| *id == ty.id()) {
            let path = self
                .in_progress
                .iter()
                .map(|(_, name)| *name)
                .chain([record])
                .collect::<Vec<_>>()
                .join(" -> ");

            Err(MappingError::Cycle { record, path })?
        }

        let constructor = match declaration.constructor() {
            Constructor::Public(constructor) => constructor,
            Constructor::Inaccessible => Err(MappingError::ConstructorInaccessible { record })?,
            Constructor::Missing => Err(MappingError::ConstructorMissing { record })?,
        };

        self.in_progress.push((ty.id(), record));
        let fields = self.fields(&declaration);
        self.in_progress.pop();

        let (fields, min_length) = fields?;

        debug!(record, fields = fields.len(), min_length, "resolved record schema");

        Ok(RecordSchema::new(
            record,
            ty.id(),
            constructor,
            fields,
            min_length,
        ))
    }

    fn fields(
        &mut self,
        declaration: &Declaration,
    ) -> Result<(BTreeMap<u32, FieldModel>, usize), MappingError> {
        let record = declaration.name();

        let mut fields = BTreeMap::new();
        let mut min_length: usize = 0;

        for field in declaration.fields() {
            let FieldDeclaration::Mapped { handle, kind } = field else {
                trace!(record, field = field.name(), "skipping unmapped field");
                continue;
            };

            let model = match kind {
                FieldKind::Scalar(d) => FieldModel::Scalar(self.scalar(
                    handle.name(),
                    handle.ty().kind(),
                    d,
                    Some(*handle),
                )),
                FieldKind::Composite(d) => FieldModel::Composite(self.composite(
                    handle.name(),
                    handle.ty(),
                    d,
                    Some(*handle),
                )?),
                FieldKind::Group(d) => FieldModel::Group(self.group(record, handle, d)?),
                FieldKind::List(d) => FieldModel::List(self.list(record, handle, d)?),
            };

            // Replaced fields still count: the sum covers every declared field.
            if model.counts_toward_min_length() {
                let Some(sum) = min_length.checked_add(model.length()) else {
                    Err(MappingError::LengthOverflow { record })?
                };
                min_length = sum;
            }

            let position = model.position();
            let name = model.name();

            trace!(record, field = name, position, length = model.length(), "resolved field");

            if let Some(existing) = fields.insert(position, model) {
                if self.strict_positions {
                    Err(MappingError::DuplicatePosition {
                        record,
                        position,
                        existing: existing.name(),
                        field: name,
                    })?
                }

                warn!(
                    record,
                    position,
                    replaced = existing.name(),
                    by = name,
                    "duplicate field position"
                );
            }
        }

        Ok((fields, min_length))
    }

    fn scalar(
        &self,
        name: &'static str,
        kind: ScalarKind,
        descriptor: &FieldDescriptor,
        handle: Option<FieldHandle>,
    ) -> ScalarModel {
        ScalarModel {
            info: FieldInfo {
                name,
                position: descriptor.position,
                required: descriptor.required,
                ignored: descriptor.ignore,
            },
            length: descriptor.length,
            kind,
            format: self.config.scalar_format(kind, descriptor),
            handle,
        }
    }

    fn counter(&self, descriptor: &FieldDescriptor) -> ScalarModel {
        self.scalar("counter", ScalarKind::Integer, descriptor, None)
    }

    fn composite(
        &mut self,
        name: &'static str,
        ty: TypeRef,
        descriptor: &CompositeDescriptor,
        handle: Option<FieldHandle>,
    ) -> Result<CompositeModel, MappingError> {
        let schema = self.nested(ty)?;

        Ok(CompositeModel {
            info: FieldInfo {
                name,
                position: descriptor.position,
                required: descriptor.required,
                ignored: descriptor.ignore,
            },
            identification: descriptor.identification.clone(),
            schema,
            handle,
        })
    }

    fn nested(&mut self, ty: TypeRef) -> Result<Arc<RecordSchema>, MappingError> {
        if !ty.is_record() {
            Err(MappingError::NotDeclared { record: ty.name() })?
        }

        if let Some(schema) = self.resolved.get(&ty.id()) {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(self.record(ty)?);
        self.resolved.insert(ty.id(), Arc::clone(&schema));

        Ok(schema)
    }

    fn group(
        &mut self,
        record: &'static str,
        handle: &FieldHandle,
        descriptor: &GroupDescriptor,
    ) -> Result<GroupModel, MappingError> {
        let field = handle.name();

        let Some(sequence) = handle.as_sequence() else {
            Err(MappingError::NotSequence { record, field })?
        };

        let counter = descriptor.counter.as_ref().filter(|c| !c.is_empty());

        if counter.is_none() && descriptor.element.identification.is_empty() {
            Err(MappingError::NoStopRule { record, field })?
        }

        let counter = counter.map(|c| self.counter(c));
        let element = self.composite(field, sequence.component(), &descriptor.element, None)?;

        Ok(GroupModel {
            info: FieldInfo {
                name: field,
                position: descriptor.position,
                required: descriptor.required,
                ignored: descriptor.ignore,
            },
            counter,
            element,
            handle: *handle,
        })
    }

    fn list(
        &mut self,
        record: &'static str,
        handle: &FieldHandle,
        descriptor: &ListDescriptor,
    ) -> Result<ListModel, MappingError> {
        let field = handle.name();

        let Some(sequence) = handle.as_sequence() else {
            Err(MappingError::NotSequence { record, field })?
        };

        if descriptor.counter.is_empty() {
            Err(MappingError::MissingCounter { record, field })?
        }

        let counter = self.counter(&descriptor.counter);
        let element = self.scalar(field, sequence.component().kind(), &descriptor.element, None);

        Ok(ListModel {
            info: FieldInfo {
                name: field,
                position: descriptor.position,
                required: descriptor.required,
                ignored: descriptor.ignore,
            },
            counter,
            element,
            handle: *handle,
        })
    }
}
