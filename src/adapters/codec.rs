use crate::domain::responses::{Envelope, ResponseFormat};
use crate::utils::error::{RegistrarError, Result};
use serde_json::Value;

const ERR_COUNT: &str = "ErrCount";
const STATUS_TEXT: &str = "RRPText";

pub fn decode(format: ResponseFormat, command: &str, body: &str) -> Result<Envelope> {
    match format {
        ResponseFormat::Text => decode_text(command, body),
        ResponseFormat::Json => decode_json(command, body),
    }
}

/// Collects envelope keys while the body is being walked.
struct EnvelopeBuilder {
    envelope: Envelope,
    declared_count: Option<usize>,
    numbered_errors: Vec<(u32, String)>,
}

impl EnvelopeBuilder {
    fn new(command: &str) -> Self {
        Self {
            envelope: Envelope {
                command: command.to_string(),
                ..Envelope::default()
            },
            declared_count: None,
            numbered_errors: Vec::new(),
        }
    }

    fn push(&mut self, key: &str, value: String) -> Result<()> {
        if key == ERR_COUNT {
            let count = value
                .trim()
                .parse::<usize>()
                .map_err(|_| RegistrarError::MalformedResponse {
                    command: self.envelope.command.clone(),
                    message: format!("ErrCount is not a number: {:?}", value),
                })?;
            self.declared_count = Some(count);
        } else if let Some(index) = error_index(key) {
            self.numbered_errors.push((index, value));
        } else if key == STATUS_TEXT {
            self.envelope.status_text = Some(value);
        } else {
            self.envelope.fields.insert(key.to_string(), value);
        }
        Ok(())
    }

    fn finish(mut self) -> Envelope {
        self.numbered_errors.sort_by_key(|(index, _)| *index);
        self.envelope.errors = self
            .numbered_errors
            .into_iter()
            .map(|(_, message)| message)
            .filter(|message| !message.is_empty())
            .collect();
        self.envelope.error_count = self
            .declared_count
            .unwrap_or(self.envelope.errors.len());
        self.envelope
    }
}

fn error_index(key: &str) -> Option<u32> {
    key.strip_prefix("Err")?.parse().ok()
}

/// Decode the `Key=Value` line format. Lines starting with `;` are comments.
pub fn decode_text(command: &str, body: &str) -> Result<Envelope> {
    let mut builder = EnvelopeBuilder::new(command);

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            tracing::trace!("skipping line without '=': {}", line);
            continue;
        };
        builder.push(key.trim(), value.trim().to_string())?;
    }

    Ok(builder.finish())
}

/// Decode the JSON format: a (possibly wrapped) object of scalars, nested
/// objects being merged into the same flat namespace.
pub fn decode_json(command: &str, body: &str) -> Result<Envelope> {
    let root: Value = serde_json::from_str(body)?;
    let root = match root {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("interface-response") => {
            map.remove("interface-response").unwrap_or(Value::Null)
        }
        other => other,
    };

    let Value::Object(map) = root else {
        return Err(RegistrarError::MalformedResponse {
            command: command.to_string(),
            message: "response is not a JSON object".to_string(),
        });
    };

    let mut builder = EnvelopeBuilder::new(command);
    flatten_json(&mut builder, map)?;
    Ok(builder.finish())
}

fn flatten_json(
    builder: &mut EnvelopeBuilder,
    map: serde_json::Map<String, Value>,
) -> Result<()> {
    for (key, value) in map {
        match value {
            Value::Object(inner) => flatten_json(builder, inner)?,
            Value::Array(items) if key.eq_ignore_ascii_case("errors") => {
                for (i, item) in items.into_iter().enumerate() {
                    if let Some(message) = scalar(item) {
                        let index = u32::try_from(i + 1).unwrap_or(u32::MAX);
                        builder.push(&format!("Err{}", index), message)?;
                    }
                }
            }
            Value::Array(_) => {
                tracing::trace!("ignoring array field {}", key);
            }
            other => {
                if let Some(text) = scalar(other) {
                    builder.push(&key, text)?;
                }
            }
        }
    }
    Ok(())
}

fn scalar(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
