//! Compute-once schema cache.
//!
//! _Requires Cargo feature `std`._

use core::any::TypeId;
use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use tracing::trace;

use crate::{
    declare::{Record, TypeRef},
    format::FormatConfig,
    schema::{MappingError, RecordSchema, resolve_type},
};

extern crate std;

type Entry = Arc<OnceLock<Result<Arc<RecordSchema>, MappingError>>>;

/// Schemas keyed by record type, resolved at most once each.
///
/// Concurrent first requests for the same type wait on a single resolution.
/// Failures are kept as well, so a faulty declaration is reported without
/// being resolved again.
#[derive(Debug, Default)]
pub struct SchemaCache {
    config: FormatConfig,
    entries: RwLock<HashMap<TypeId, Entry>>,
}

impl SchemaCache {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            config,
            entries: RwLock::default(),
        }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Retrieve the schema of a record type, resolving it on first use.
    pub fn get<T: Record>(&self) -> Result<Arc<RecordSchema>, MappingError> {
        self.get_type(TypeRef::record::<T>())
    }

    /// Retrieve the schema of a type known only at runtime.
    ///
    /// A type without a declaration fails without creating an entry.
    pub fn get_type(&self, ty: TypeRef) -> Result<Arc<RecordSchema>, MappingError> {
        if !ty.is_record() {
            Err(MappingError::NotDeclared { record: ty.name() })?
        }

        self.entry(ty.id())
            .get_or_init(|| {
                trace!(record = ty.name(), "resolving uncached schema");
                resolve_type(ty, &self.config).map(Arc::new)
            })
            .clone()
    }

    /// Number of types requested so far.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, id: TypeId) -> Entry {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = entries.get(&id) {
            return Arc::clone(entry);
        }

        drop(entries);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(id).or_default())
    }
}
