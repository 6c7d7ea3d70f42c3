#![allow(dead_code)]
#![cfg(feature = "derive")]

use platen::{
    Align, FieldDeclaration, FieldModel, FormatConfig, MappingError, Record, ScalarKind, resolve,
};

#[derive(Debug, Default, Record)]
struct Header {
    #[field(position = 0, length = 2, required)]
    kind: String,
    #[field(position = 1, length = 3, required, align = right, padding = '0')]
    sequence: u32,
}

#[derive(Debug, Default, Record)]
#[record(name = "ORDER")]
struct Order {
    #[field(position = 1, length = 10, required)]
    reference: String,
    #[composite(position = 0)]
    header: Header,
    note: Option<String>,
}

#[test]
fn order_scenario() {
    let schema = resolve::<Order>(&FormatConfig::default()).unwrap();

    let names: Vec<_> = schema.iter().map(FieldModel::name).collect();
    assert_eq!(names, ["header", "reference"]);
    assert_eq!(schema.name(), "ORDER");
    assert_eq!(schema.min_length(), 15);
}

#[test]
fn declaration_lists_every_member() {
    let declaration = Order::declaration();

    let names: Vec<_> = declaration
        .fields()
        .iter()
        .map(FieldDeclaration::name)
        .collect();

    assert_eq!(names, ["reference", "header", "note"]);
    assert!(matches!(
        declaration.fields()[2],
        FieldDeclaration::Unmapped { name: "note" }
    ));
}

#[derive(Debug, Default, Record)]
struct Line {
    #[field(position = 0, length = 4, required)]
    code: String,
    #[field(position = 1, length = 16, required)]
    amount: u64,
}

#[derive(Debug, Default, Record)]
struct Batch {
    #[group(position = 0, counter(length = 3))]
    lines: Vec<Line>,
}

#[test]
fn batch_scenario() {
    let schema = resolve::<Batch>(&FormatConfig::default()).unwrap();

    assert_eq!(schema.min_length(), 3);

    let Some(FieldModel::Group(lines)) = schema.get(0) else {
        panic!("expected a group");
    };

    assert_eq!(lines.element().schema().min_length(), 20);
    assert_eq!(lines.counter().map(|c| c.length()), Some(3));
}

#[derive(Debug, Default, Record)]
struct Statement {
    #[field(position = 2, length = 1, ignore)]
    filler: String,
    #[field_list(position = 3, counter(length = 2), field(length = 5, align = left))]
    codes: Vec<u32>,
    #[group(position = 1, required, element(identification = "TX"))]
    transactions: Vec<Line>,
    #[composite(position = 0, identification = "HD")]
    header: Header,
    #[field(position = 4, length = 1, required = false)]
    closed: bool,
}

#[test]
fn statement_mixes_every_kind() {
    let schema = resolve::<Statement>(&FormatConfig::default()).unwrap();

    // Header (5), transactions (no counter), codes counter (2).
    assert_eq!(schema.min_length(), 7);

    let positions: Vec<_> = schema.iter().map(FieldModel::position).collect();
    assert_eq!(positions, [0, 1, 2, 3, 4]);

    let Some(FieldModel::Composite(header)) = schema.get(0) else {
        panic!("expected a composite");
    };
    assert_eq!(header.identification(), "HD");

    let Some(FieldModel::Group(transactions)) = schema.get(1) else {
        panic!("expected a group");
    };
    assert!(transactions.info().required);
    assert_eq!(transactions.repetition().right(), Some("TX"));

    assert!(schema.get(2).unwrap().ignored());

    let Some(FieldModel::List(codes)) = schema.get(3) else {
        panic!("expected a list");
    };
    assert_eq!(codes.length(), 2);
    assert_eq!(codes.element().kind(), ScalarKind::Integer);
    assert_eq!(codes.element().format().justify.align, Align::Left);

    let Some(FieldModel::Scalar(closed)) = schema.get(4) else {
        panic!("expected a scalar");
    };
    assert!(!closed.info().required);
    assert_eq!(closed.kind(), ScalarKind::Boolean);
}

#[test]
fn scalar_overrides_reach_format() {
    let schema = resolve::<Header>(&FormatConfig::default()).unwrap();

    let Some(FieldModel::Scalar(sequence)) = schema.get(1) else {
        panic!("expected a scalar");
    };

    assert_eq!(sequence.format().justify.align, Align::Right);
    assert_eq!(sequence.format().justify.padding, '0');
}

#[test]
fn derived_handles_populate_record() {
    let schema = resolve::<Statement>(&FormatConfig::default()).unwrap();
    let mut record = schema.instantiate();

    let Some(FieldModel::List(codes)) = schema.get(3) else {
        panic!("expected a list");
    };

    let handle = codes.handle();
    let sequence = handle.as_sequence().unwrap();

    for value in [7, 11] {
        let member = handle.get_mut(&mut *record).unwrap();
        *sequence.push(member).unwrap().downcast_mut::<u32>().unwrap() = value;
    }

    let statement = record.downcast_ref::<Statement>().unwrap();
    assert_eq!(statement.codes, [7, 11]);
}

#[derive(Debug, Default, Record)]
struct Cyclic {
    #[group(position = 0, counter(length = 1))]
    children: Vec<Cyclic>,
}

#[test]
fn derived_cycle_fails() {
    let error = resolve::<Cyclic>(&FormatConfig::default()).unwrap_err();

    assert!(matches!(error, MappingError::Cycle { record: "Cyclic", .. }));
}

#[derive(Debug, Default, Record)]
struct Pair<T: Record + Default> {
    #[composite(position = 0)]
    left: T,
    #[composite(position = 1)]
    right: T,
}

#[test]
fn generic_records_resolve() {
    let schema = resolve::<Pair<Header>>(&FormatConfig::default()).unwrap();

    assert_eq!(schema.name(), "Pair");
    assert_eq!(schema.min_length(), 10);
}
