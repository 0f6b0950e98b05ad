//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Value};

use keen_scoped_key::{
    operations, Filter, MasterSecret, Operator, PermissionDescriptor, IV_LEN,
};

/// Generate master secret bytes of a valid AES key length.
pub fn secret_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![Just(16usize), Just(24usize), Just(32usize)]
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

/// Generate a valid master secret.
pub fn master_secret() -> impl Strategy<Value = MasterSecret> {
    secret_bytes().prop_filter_map("valid key length", |bytes| MasterSecret::new(bytes).ok())
}

/// Generate secret bytes whose length is not a valid AES key length.
pub fn invalid_secret_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
        .prop_filter("invalid key length", |b| !matches!(b.len(), 16 | 24 | 32))
}

/// Generate an IV.
pub fn iv() -> impl Strategy<Value = [u8; IV_LEN]> {
    any::<[u8; IV_LEN]>()
}

/// Generate a filter operator.
pub fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Eq),
        Just(Operator::Ne),
        Just(Operator::Lt),
        Just(Operator::Lte),
        Just(Operator::Gt),
        Just(Operator::Gte),
        Just(Operator::Exists),
        Just(Operator::In),
        Just(Operator::Contains),
        Just(Operator::NotContains),
        Just(Operator::StartsWith),
        Just(Operator::Within),
        Just(Operator::Regex),
    ]
}

/// Generate a property name, optionally dotted.
pub fn property_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}(\\.[a-z][a-z0-9_]{0,15}){0,2}".prop_map(String::from)
}

/// Generate a filter value.
///
/// Floats are left out so that values survive a JSON round trip exactly.
pub fn property_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "\\PC{0,24}".prop_map(Value::from),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::Array)
    })
}

/// Generate a filter clause.
pub fn filter() -> impl Strategy<Value = Filter> {
    (property_name(), operator(), property_value())
        .prop_map(|(name, op, value)| Filter::new(name, op, value))
}

/// Generate an operation name, mostly well-known ones.
pub fn operation() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop_oneof![
            Just(operations::READ),
            Just(operations::WRITE),
            Just(operations::CACHED_QUERIES),
            Just(operations::SAVED_QUERIES),
        ]
        .prop_map(String::from),
        1 => "[a-z_]{1,12}".prop_map(String::from),
    ]
}

/// Parameters for generating a permission descriptor.
#[derive(Debug, Clone)]
pub struct DescriptorParams {
    pub filters: Vec<Filter>,
    pub operations: Vec<String>,
}

impl Arbitrary for DescriptorParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop::collection::vec(filter(), 0..6),
            prop::collection::vec(operation(), 0..4),
        )
            .prop_map(|(filters, operations)| DescriptorParams {
                filters,
                operations,
            })
            .boxed()
    }
}

/// Build a descriptor from parameters.
pub fn descriptor_from_params(params: &DescriptorParams) -> PermissionDescriptor {
    let with_filters = params
        .filters
        .iter()
        .cloned()
        .fold(PermissionDescriptor::new(), |d, f| d.filter(f));
    params
        .operations
        .iter()
        .fold(with_filters, |d, op| d.allow(op.as_str()))
}

/// Generate a permission descriptor.
pub fn descriptor() -> impl Strategy<Value = PermissionDescriptor> {
    any::<DescriptorParams>().prop_map(|params| descriptor_from_params(&params))
}

/// Generate a collection name.
pub fn collection_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,31}".prop_map(String::from)
}

/// Generate up to `max_len` distinct events.
///
/// Each event carries its position under `"seq"` so ordering can be checked.
pub fn events(max_len: usize) -> impl Strategy<Value = Vec<Value>> {
    (0..=max_len).prop_map(|n| (0..n).map(|i| json!({ "seq": i })).collect())
}

/// Generate a chunk size.
pub fn chunk_size() -> impl Strategy<Value = usize> {
    1usize..=64
}
