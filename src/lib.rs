#![no_std]

//! Positional schemas for fixed-width record layouts.
//!
//! Platen maps structured records to and from fixed-width text, as found in
//! mainframe extracts, EDI interchanges and banking batch files. Rather than
//! hand-written parsing code, each record type declares the position, width
//! and flags of its fields, and Platen resolves those declarations into an
//! immutable [`RecordSchema`]: the ordered plan an encoder or decoder walks
//! over a buffer.
//!
//! Most users should begin with the [`Record`](macro@Record) derive macro and
//! the [`resolve`] function. Declarations can also be written by hand, as
//! described in the [`declare`] module, when a record type cannot use the
//! derive.
//!
//! Platen itself reads and writes no record bytes. Field values are reached
//! through the type-erased [`FieldHandle`]s stored on each resolved field.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable the [`cache`] module (default).
//! - `serde`: serialize descriptor values and [`FormatConfig`].

extern crate alloc;

#[cfg(feature = "std")]
pub mod cache;
pub mod declare;
pub mod format;
pub mod schema;

pub use declare::{
    CompositeDescriptor, Constructor, Declaration, FieldDeclaration, FieldDescriptor, FieldHandle,
    FieldKind, GroupDescriptor, ListDescriptor, Record, Scalar, ScalarKind, Sequence, TypeRef,
};
pub use format::{Align, FormatConfig, Justify, ScalarFormat};
pub use schema::{FieldModel, MappingError, RecordSchema, Resolver, resolve, resolve_type};

/// Derive [`Record`] for a struct with named fields.
///
/// _Requires Cargo feature `derive`._
///
/// The struct must implement [`Default`], which serves as the zero-argument
/// constructor used to build fresh records when decoding.
///
/// Each mapped field carries exactly one of the following attributes. Fields
/// without one are left out of the schema.
///
/// - `field(position = N, length = W)` maps a scalar to a slice of width `W`.
///   Accepts `required`, `ignore`, `align = left | right` and
///   `padding = 'c'`.
/// - `composite(position = N)` maps a nested record. Accepts `required`,
///   `ignore` and `identification = "..."`.
/// - `group(position = N, ..)` maps a `Vec` of nested records. Takes a
///   `counter(length = W)`, an `element(identification = "...")`, or both.
/// - `field_list(position = N, counter(length = W), field(length = W))` maps
///   a `Vec` of scalars preceded by a counter.
///
/// # Example
///
/// ```
/// #[derive(Debug, Default, Record)]
/// #[record(name = "ORDER")]
/// struct Order {
///     #[composite(position = 0)]
///     header: Header,
///     #[field(position = 1, length = 10, required)]
///     reference: String,
///     #[field(position = 2, length = 9, align = right, padding = '0')]
///     amount: u64,
///     #[group(position = 3, counter(length = 3))]
///     lines: Vec<Line>,
///     #[field_list(position = 4, counter(length = 2), field(length = 4))]
///     codes: Vec<u16>,
///     note: Option<String>,
/// }
/// ```
///
/// Position determines field order only; the declaration order of struct
/// members is irrelevant.
#[cfg(feature = "derive")]
pub use platen_derive::Record;

#[doc(hidden)]
pub mod __private {
    pub use alloc::vec::Vec;
}
