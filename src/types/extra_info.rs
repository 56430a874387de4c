use serde_json::{Map, Value};

/// Shape of an account's `extra_info` as submitted by a client.
///
/// The column itself is an opaque string; this type only exists at the request
/// boundary, decided by the JSON type of the submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraInfo {
    /// A JSON object of labelled values, in document order.
    StructuredFields(Vec<(String, String)>),
    /// Any submitted string, JSON-looking or not. Never reinterpreted.
    FreeText(String),
}

impl ExtraInfo {
    pub fn from_object(map: Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect();
        ExtraInfo::StructuredFields(fields)
    }

    /// The string written to the column.
    pub fn into_stored(self) -> String {
        match self {
            ExtraInfo::FreeText(text) => text,
            ExtraInfo::StructuredFields(fields) => {
                let map: Map<String, Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                Value::Object(map).to_string()
            }
        }
    }
}
