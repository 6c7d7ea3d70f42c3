#![allow(dead_code)]
#![cfg(feature = "std")]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use platen::{
    Constructor, Declaration, FieldDescriptor, FormatConfig, MappingError, Record, TypeRef,
    cache::SchemaCache, field_handle,
};

static TICKET_DECLARATIONS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Default)]
struct Ticket {
    number: u32,
}

impl Record for Ticket {
    fn declaration() -> Declaration {
        TICKET_DECLARATIONS.fetch_add(1, Ordering::SeqCst);

        Declaration::new("Ticket", Constructor::of::<Self>()).field(
            field_handle!(Ticket, number, TypeRef::scalar::<u32>()),
            FieldDescriptor::new(0, 8).required(true),
        )
    }
}

static SEALED_DECLARATIONS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct Sealed;

impl Record for Sealed {
    fn declaration() -> Declaration {
        SEALED_DECLARATIONS.fetch_add(1, Ordering::SeqCst);

        Declaration::new("Sealed", Constructor::Inaccessible)
    }
}

#[derive(Debug, Default)]
struct Stamp {
    code: String,
}

impl Record for Stamp {
    fn declaration() -> Declaration {
        Declaration::new("Stamp", Constructor::of::<Self>()).field(
            field_handle!(Stamp, code, TypeRef::scalar::<String>()),
            FieldDescriptor::new(0, 2).required(true),
        )
    }
}

#[test]
fn concurrent_requests_resolve_once() {
    let cache = SchemaCache::default();

    let schemas: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.get::<Ticket>().unwrap()))
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(TICKET_DECLARATIONS.load(Ordering::SeqCst), 1);
    assert_eq!(schemas[0].min_length(), 8);
    assert!(schemas.iter().all(|s| Arc::ptr_eq(s, &schemas[0])));
}

#[test]
fn failures_are_cached() {
    let cache = SchemaCache::default();

    let first = cache.get::<Sealed>().unwrap_err();
    let second = cache.get::<Sealed>().unwrap_err();

    assert_eq!(first, MappingError::ConstructorInaccessible { record: "Sealed" });
    assert_eq!(first, second);
    assert_eq!(SEALED_DECLARATIONS.load(Ordering::SeqCst), 1);
}

#[test]
fn entries_are_counted_per_type() {
    let cache = SchemaCache::default();
    assert!(cache.is_empty());

    cache.get::<Stamp>().unwrap();
    cache.get::<Stamp>().unwrap();
    assert_eq!(cache.len(), 1);

    cache.get_type(TypeRef::opaque::<u8>()).unwrap_err();
    assert_eq!(cache.len(), 1);
}

#[test]
fn undeclared_lookup_leaves_record_resolvable() {
    let cache = SchemaCache::default();

    let error = cache.get_type(TypeRef::opaque::<Stamp>()).unwrap_err();
    assert!(matches!(error, MappingError::NotDeclared { .. }));
    assert!(cache.is_empty());

    let schema = cache.get::<Stamp>().unwrap();
    assert_eq!(schema.min_length(), 2);
    assert_eq!(schema.record_type_id(), std::any::TypeId::of::<Stamp>());
}

#[test]
fn configuration_reaches_schemas() {
    let config = FormatConfig::default().with_boolean_literals("1", "0");
    let cache = SchemaCache::new(config.clone());

    assert_eq!(cache.config(), &config);
    assert!(cache.get::<Stamp>().is_ok());
}

#[test]
fn cache_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SchemaCache>();
}
