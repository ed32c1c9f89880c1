use serde_json::Value;

use crate::JobRecord;

/// Decoded payload of one inbound stream event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamMessage {
    Job(JobRecord),
    /// The producer's `null` marker: the run finished.
    End,
    /// Anything else; carries a short reason for the log.
    Malformed(String),
}

impl StreamMessage {
    pub fn parse(data: &str) -> Self {
        let value: Value = match serde_json::from_str(data) {
            Ok(value) => value,
            Err(err) => return Self::Malformed(format!("invalid json: {err}")),
        };

        match value {
            Value::Null => Self::End,
            Value::Object(_) => match serde_json::from_value::<JobRecord>(value) {
                Ok(job) => Self::Job(job),
                Err(err) => Self::Malformed(format!("object is not a job record: {err}")),
            },
            other => Self::Malformed(format!("unexpected {} payload", json_kind(&other))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
