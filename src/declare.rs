//! Explicit declaration of record types.
//!
//! A record type describes itself by implementing [`Record`], returning a
//! [`Declaration`] that lists its structural fields in declaration order. Each
//! field pairs a [`FieldHandle`] (how a codec reaches the member) with at most
//! one descriptor value (how the member is laid out). Fields without a
//! descriptor are carried as unmapped and never reach a schema.
//!
//! In most cases the declaration can be derived. See the
//! [`Record`](macro@crate::Record) macro for details.
//!
//! # Example
//!
//! Declaring a record by hand:
//!
//! ```
//! #[derive(Default)]
//! struct Header {
//!     kind: String,
//!     sequence: u32,
//! }
//!
//! impl Record for Header {
//!     fn declaration() -> Declaration {
//!         Declaration::new("Header", Constructor::of::<Self>())
//!             .field(
//!                 field_handle!(Header, kind, TypeRef::scalar::<String>()),
//!                 FieldDescriptor::new(0, 2).required(true),
//!             )
//!             .field(
//!                 field_handle!(Header, sequence, TypeRef::scalar::<u32>()),
//!                 FieldDescriptor::new(1, 6),
//!             )
//!     }
//! }
//! ```

pub mod descriptor;
pub mod handle;

use core::any::{Any, TypeId, type_name};

use alloc::{boxed::Box, string::String, vec::Vec};

pub use descriptor::{
    CompositeDescriptor, FieldDescriptor, FieldKind, GroupDescriptor, ListDescriptor,
};
pub use handle::{FieldHandle, Sequence};

/// A type whose values map to and from a fixed-width layout.
///
/// See the [`Record`](macro@crate::Record) derive macro for an automatic
/// implementation of this trait.
pub trait Record: Any {
    /// Describe the structural fields of this type.
    fn declaration() -> Declaration;
}

/// Category of a scalar slice, selecting its formatting defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    #[default]
    Text,
    Integer,
    Decimal,
    Boolean,
    Character,
}

/// A type stored in a single fixed-width slice.
pub trait Scalar: Any {
    const KIND: ScalarKind;
}

macro_rules! scalar {
    ($kind:ident: $($t:ty),*) => {
        $(impl Scalar for $t {
            const KIND: ScalarKind = ScalarKind::$kind;
        })*
    };
}

scalar!(Integer: u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
scalar!(Decimal: f32, f64);
scalar!(Boolean: bool);
scalar!(Character: char);
scalar!(Text: String);

/// Runtime identity of a type referenced by a declaration.
///
/// Only references built with [`TypeRef::record`] carry the declaration
/// marker the resolver requires of record types.
#[derive(Debug, Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    id: TypeId,
    declaration: Option<fn() -> Declaration>,
    kind: ScalarKind,
}

impl TypeRef {
    /// Reference a declared record type.
    pub fn record<T: Record>() -> Self {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
            declaration: Some(T::declaration),
            kind: ScalarKind::Text,
        }
    }

    /// Reference a scalar type.
    pub fn scalar<T: Scalar>() -> Self {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
            declaration: None,
            kind: T::KIND,
        }
    }

    /// Reference any other type, treated as text when formatted.
    pub fn opaque<T: Any>() -> Self {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
            declaration: None,
            kind: ScalarKind::Text,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// The declaration of this type, if it is a record type.
    pub fn declaration(&self) -> Option<fn() -> Declaration> {
        self.declaration
    }

    pub fn is_record(&self) -> bool {
        self.declaration.is_some()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

/// Availability of a zero-argument constructor.
#[derive(Debug, Clone, Copy)]
pub enum Constructor {
    /// Builds a fresh instance, boxed for type erasure.
    Public(fn() -> Box<dyn Any>),
    /// Declared, but not available to the codec.
    Inaccessible,
    /// Not declared.
    Missing,
}

impl Constructor {
    /// Construct through [`Default`].
    pub fn of<T: Default + Any>() -> Self {
        Self::Public(construct::<T>)
    }
}

fn construct<T: Default + Any>() -> Box<dyn Any> {
    Box::new(T::default())
}

/// The structural description of a record type.
#[derive(Debug, Clone)]
pub struct Declaration {
    name: &'static str,
    constructor: Constructor,
    fields: Vec<FieldDeclaration>,
}

impl Declaration {
    pub fn new(name: &'static str, constructor: Constructor) -> Self {
        Self {
            name,
            constructor,
            fields: Vec::new(),
        }
    }

    /// Append a mapped field.
    pub fn field(mut self, handle: FieldHandle, kind: impl Into<FieldKind>) -> Self {
        self.fields.push(FieldDeclaration::Mapped {
            handle,
            kind: kind.into(),
        });
        self
    }

    /// Append a field carrying no descriptor.
    pub fn unmapped(mut self, name: &'static str) -> Self {
        self.fields.push(FieldDeclaration::Unmapped { name });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn constructor(&self) -> Constructor {
        self.constructor
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }
}

/// One structural field of a declaration.
#[derive(Debug, Clone)]
pub enum FieldDeclaration {
    Mapped { handle: FieldHandle, kind: FieldKind },
    Unmapped { name: &'static str },
}

impl FieldDeclaration {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mapped { handle, .. } => handle.name(),
            Self::Unmapped { name } => name,
        }
    }
}
