//! Resolved field models, the nodes of a [`RecordSchema`].

use alloc::{string::String, sync::Arc};

use either::Either::{self, Left, Right};

use crate::{
    declare::{FieldHandle, ScalarKind},
    format::ScalarFormat,
};

use super::RecordSchema;

/// Name, order key and flags shared by every field model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub position: u32,
    pub required: bool,
    pub ignored: bool,
}

/// A field mapped to a single fixed-width slice.
#[derive(Debug, Clone)]
pub struct ScalarModel {
    pub(crate) info: FieldInfo,
    pub(crate) length: usize,
    pub(crate) kind: ScalarKind,
    pub(crate) format: ScalarFormat,
    pub(crate) handle: Option<FieldHandle>,
}

impl ScalarModel {
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    /// Width of the slice.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn format(&self) -> &ScalarFormat {
        &self.format
    }

    /// Member handle, absent for counters and list elements.
    pub fn handle(&self) -> Option<&FieldHandle> {
        self.handle.as_ref()
    }
}

/// A field mapped to a nested record.
#[derive(Debug, Clone)]
pub struct CompositeModel {
    pub(crate) info: FieldInfo,
    pub(crate) identification: String,
    pub(crate) schema: Arc<RecordSchema>,
    pub(crate) handle: Option<FieldHandle>,
}

impl CompositeModel {
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    /// The minimum length of the nested record.
    pub fn length(&self) -> usize {
        self.schema.min_length()
    }

    /// Literal prefix recognising an instance. Empty when unused.
    pub fn identification(&self) -> &str {
        &self.identification
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Member handle, absent for group elements.
    pub fn handle(&self) -> Option<&FieldHandle> {
        self.handle.as_ref()
    }
}

/// A `Vec` field repeating a nested record.
#[derive(Debug, Clone)]
pub struct GroupModel {
    pub(crate) info: FieldInfo,
    pub(crate) counter: Option<ScalarModel>,
    pub(crate) element: CompositeModel,
    pub(crate) handle: FieldHandle,
}

impl GroupModel {
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    /// Width of the counter. Repetitions do not count, as their number is
    /// only known once decoding.
    pub fn length(&self) -> usize {
        self.counter.as_ref().map_or(0, ScalarModel::length)
    }

    pub fn counter(&self) -> Option<&ScalarModel> {
        self.counter.as_ref()
    }

    pub fn element(&self) -> &CompositeModel {
        &self.element
    }

    pub fn handle(&self) -> &FieldHandle {
        &self.handle
    }

    /// How a codec learns where repetition ends: the counter when present,
    /// otherwise the element identification.
    pub fn repetition(&self) -> Either<&ScalarModel, &str> {
        match &self.counter {
            Some(counter) => Left(counter),
            None => Right(self.element.identification()),
        }
    }
}

/// A `Vec` field repeating a scalar, preceded by a counter.
#[derive(Debug, Clone)]
pub struct ListModel {
    pub(crate) info: FieldInfo,
    pub(crate) counter: ScalarModel,
    pub(crate) element: ScalarModel,
    pub(crate) handle: FieldHandle,
}

impl ListModel {
    pub fn info(&self) -> &FieldInfo {
        &self.info
    }

    /// Width of the counter.
    pub fn length(&self) -> usize {
        self.counter.length()
    }

    pub fn counter(&self) -> &ScalarModel {
        &self.counter
    }

    pub fn element(&self) -> &ScalarModel {
        &self.element
    }

    pub fn handle(&self) -> &FieldHandle {
        &self.handle
    }
}

/// One resolved field of a record.
#[derive(Debug, Clone)]
pub enum FieldModel {
    Scalar(ScalarModel),
    Composite(CompositeModel),
    Group(GroupModel),
    List(ListModel),
}

impl FieldModel {
    pub fn info(&self) -> &FieldInfo {
        match self {
            Self::Scalar(m) => m.info(),
            Self::Composite(m) => m.info(),
            Self::Group(m) => m.info(),
            Self::List(m) => m.info(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn position(&self) -> u32 {
        self.info().position
    }

    pub fn required(&self) -> bool {
        self.info().required
    }

    pub fn ignored(&self) -> bool {
        self.info().ignored
    }

    pub fn length(&self) -> usize {
        match self {
            Self::Scalar(m) => m.length(),
            Self::Composite(m) => m.length(),
            Self::Group(m) => m.length(),
            Self::List(m) => m.length(),
        }
    }

    pub fn handle(&self) -> Option<&FieldHandle> {
        match self {
            Self::Scalar(m) => m.handle(),
            Self::Composite(m) => m.handle(),
            Self::Group(m) => Some(m.handle()),
            Self::List(m) => Some(m.handle()),
        }
    }

    /// Whether the length counts toward the minimum record length.
    ///
    /// Structured fields always count; scalars only when required.
    pub fn counts_toward_min_length(&self) -> bool {
        match self {
            Self::Scalar(m) => m.info.required,
            Self::Composite(_) | Self::Group(_) | Self::List(_) => true,
        }
    }
}
