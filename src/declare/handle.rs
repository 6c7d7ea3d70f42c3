//! Type-erased access to the members of a record.
//!
//! A [`FieldHandle`] is a pair of plain function pointers projecting a record,
//! seen as `dyn Any`, onto one of its members. Handles never capture state, so
//! schemas holding them remain `Send + Sync` and freely shareable.
//!
//! Sequence members (`Vec<T>`) additionally carry a [`Sequence`], giving a
//! codec element access and the ability to append a fresh element without
//! knowing `T`.

use core::{any::Any, fmt};

use alloc::vec::Vec;

use super::{Record, Scalar, TypeRef};

/// Project a record onto one of its members.
pub type Get = fn(&dyn Any) -> Option<&dyn Any>;
/// Project a record onto one of its members, mutably.
pub type GetMut = fn(&mut dyn Any) -> Option<&mut dyn Any>;

/// Accessor and mutator for one member of a record.
#[derive(Clone, Copy)]
pub struct FieldHandle {
    name: &'static str,
    ty: TypeRef,
    get: Get,
    get_mut: GetMut,
    sequence: Option<Sequence>,
}

impl FieldHandle {
    /// Handle a member holding a single value.
    pub fn value(name: &'static str, ty: TypeRef, get: Get, get_mut: GetMut) -> Self {
        Self {
            name,
            ty,
            get,
            get_mut,
            sequence: None,
        }
    }

    /// Handle a member holding a `Vec` of values.
    pub fn sequence(
        name: &'static str,
        ty: TypeRef,
        get: Get,
        get_mut: GetMut,
        sequence: Sequence,
    ) -> Self {
        Self {
            name,
            ty,
            get,
            get_mut,
            sequence: Some(sequence),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type of the member.
    pub fn ty(&self) -> TypeRef {
        self.ty
    }

    /// Borrow the member from a record, if the record has the expected type.
    pub fn get<'a>(&self, record: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.get)(record)
    }

    /// Mutably borrow the member from a record, if the record has the
    /// expected type.
    pub fn get_mut<'a>(&self, record: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.get_mut)(record)
    }

    /// Element access, present when the member is a sequence.
    pub fn as_sequence(&self) -> Option<&Sequence> {
        self.sequence.as_ref()
    }
}

impl fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldHandle")
            .field("name", &self.name)
            .field("ty", &self.ty.name())
            .field("sequence", &self.sequence)
            .finish()
    }
}

/// Element access over a `Vec<T>` member, erased to `dyn Any`.
#[derive(Clone, Copy)]
pub struct Sequence {
    component: TypeRef,
    len: fn(&dyn Any) -> Option<usize>,
    element: fn(&dyn Any, usize) -> Option<&dyn Any>,
    push: fn(&mut dyn Any) -> Option<&mut dyn Any>,
}

impl Sequence {
    /// Access a `Vec` of records.
    pub fn records<T: Record + Default>() -> Self {
        Self::new::<T>(TypeRef::record::<T>())
    }

    /// Access a `Vec` of scalars.
    pub fn scalars<T: Scalar + Default>() -> Self {
        Self::new::<T>(TypeRef::scalar::<T>())
    }

    /// Access a `Vec<T>` whose elements are described by `component`.
    pub fn new<T: Default + Any>(component: TypeRef) -> Self {
        Self {
            component,
            len: len::<T>,
            element: element::<T>,
            push: push::<T>,
        }
    }

    /// Type of one element.
    pub fn component(&self) -> TypeRef {
        self.component
    }

    /// Number of elements held by a member.
    pub fn len(&self, member: &dyn Any) -> Option<usize> {
        (self.len)(member)
    }

    /// Borrow one element of a member.
    pub fn element<'a>(&self, member: &'a dyn Any, index: usize) -> Option<&'a dyn Any> {
        (self.element)(member, index)
    }

    /// Append a default element to a member, returning it for population.
    pub fn push<'a>(&self, member: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.push)(member)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("component", &self.component.name())
            .finish()
    }
}

fn len<T: Any>(member: &dyn Any) -> Option<usize> {
    member.downcast_ref::<Vec<T>>().map(Vec::len)
}

fn element<T: Any>(member: &dyn Any, index: usize) -> Option<&dyn Any> {
    member
        .downcast_ref::<Vec<T>>()?
        .get(index)
        .map(|e| e as &dyn Any)
}

fn push<T: Default + Any>(member: &mut dyn Any) -> Option<&mut dyn Any> {
    let items = member.downcast_mut::<Vec<T>>()?;
    items.push(T::default());
    items.last_mut().map(|e| e as &mut dyn Any)
}

/// Build a [`FieldHandle`] for a single-valued member of a record.
///
/// ```
/// let handle = field_handle!(Order, reference, TypeRef::scalar::<String>());
/// ```
#[macro_export]
macro_rules! field_handle {
    ($record:ty, $field:ident, $ty:expr) => {
        $crate::FieldHandle::value(
            ::core::stringify!($field),
            $ty,
            |r| {
                r.downcast_ref::<$record>()
                    .map(|r| &r.$field as &dyn ::core::any::Any)
            },
            |r| {
                r.downcast_mut::<$record>()
                    .map(|r| &mut r.$field as &mut dyn ::core::any::Any)
            },
        )
    };
}

/// Build a [`FieldHandle`] for a `Vec` member of a record.
///
/// ```
/// let handle = sequence_handle!(Batch, lines, Line, Sequence::records::<Line>());
/// ```
#[macro_export]
macro_rules! sequence_handle {
    ($record:ty, $field:ident, $element:ty, $sequence:expr) => {
        $crate::FieldHandle::sequence(
            ::core::stringify!($field),
            $crate::TypeRef::opaque::<$crate::__private::Vec<$element>>(),
            |r| {
                r.downcast_ref::<$record>()
                    .map(|r| &r.$field as &dyn ::core::any::Any)
            },
            |r| {
                r.downcast_mut::<$record>()
                    .map(|r| &mut r.$field as &mut dyn ::core::any::Any)
            },
            $sequence,
        )
    };
}
