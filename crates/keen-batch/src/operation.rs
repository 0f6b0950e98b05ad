//! Transport operations and responses.
//!
//! One operation carries one chunk of events. The transport decides how to
//! put it on the wire; this crate only names it and builds the payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Operation name for adding events to collections.
pub const SEND_EVENTS: &str = "sendEvents";

/// A named operation handed to the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedOperation {
    /// Position of the operation in its transfer (the chunk index).
    pub index: usize,
    /// Operation name, e.g. [`SEND_EVENTS`].
    pub name: String,
    /// Request payload.
    pub payload: Value,
}

impl NamedOperation {
    /// Create an operation.
    pub fn new(index: usize, name: impl Into<String>, payload: Value) -> Self {
        Self {
            index,
            name: name.into(),
            payload,
        }
    }

    /// A `sendEvents` operation with payload `{ collection: events }`.
    pub fn send_events(index: usize, collection: &str, events: Vec<Value>) -> Self {
        let mut body = Map::with_capacity(1);
        body.insert(collection.to_owned(), Value::Array(events));
        Self::new(index, SEND_EVENTS, Value::Object(body))
    }

    /// Number of events in a `sendEvents` payload.
    pub fn event_count(&self) -> usize {
        match &self.payload {
            Value::Object(map) => map
                .values()
                .filter_map(Value::as_array)
                .map(Vec::len)
                .sum(),
            _ => 0,
        }
    }
}

/// A decoded response for one completed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Index of the operation this responds to.
    pub index: usize,
    /// Decoded response body.
    pub body: Value,
}

impl Response {
    /// Create a response.
    pub fn new(index: usize, body: Value) -> Self {
        Self { index, body }
    }
}
