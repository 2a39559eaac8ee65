use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProtocolError;

const ERROR_FIELD: &str = "error";

/// Body of a section: a paragraph or a bulleted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionValue {
    Text(String),
    Items(Vec<String>),
}

impl SectionValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Items(items) => items.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionSection {
    /// Numeric value of the section key; drives both ordering and the reveal stagger.
    pub index: u32,
    pub label: String,
    pub value: SectionValue,
}

/// Labelled sections ordered by ascending numeric key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    sections: Vec<PredictionSection>,
}

impl PredictionResult {
    pub fn new(mut sections: Vec<PredictionSection>) -> Self {
        sections.sort_by_key(|section| section.index);
        Self { sections }
    }

    pub fn sections(&self) -> &[PredictionSection] {
        &self.sections
    }

    /// Sections that produce a card; empty values are skipped.
    pub fn renderable(&self) -> impl Iterator<Item = &PredictionSection> {
        self.sections.iter().filter(|section| !section.value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionResponse {
    Failed { error: String },
    Sections(PredictionResult),
}

impl PredictionResponse {
    pub fn from_json_str(body: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        let Value::Object(mut object) = value else {
            return Err(ProtocolError::NotAnObject);
        };

        if let Some(error) = object.remove(ERROR_FIELD) {
            if is_truthy(&error) {
                return Ok(Self::Failed {
                    error: display_value(&error),
                });
            }
        }

        parse_sections(object).map(Self::Sections)
    }
}

fn parse_sections(object: Map<String, Value>) -> Result<PredictionResult, ProtocolError> {
    let mut sections = Vec::with_capacity(object.len());
    for (key, entry) in object {
        let index = key
            .trim()
            .parse::<u32>()
            .map_err(|_| ProtocolError::NonNumericKey { key: key.clone() })?;

        let Value::Array(mut pair) = entry else {
            return Err(ProtocolError::MalformedSection { key });
        };
        if pair.len() != 2 {
            return Err(ProtocolError::MalformedSection { key });
        }
        let raw_value = pair.pop().unwrap_or(Value::Null);
        let raw_label = pair.pop().unwrap_or(Value::Null);

        sections.push(PredictionSection {
            index,
            label: display_value(&raw_label),
            value: section_value(raw_value),
        });
    }
    Ok(PredictionResult::new(sections))
}

fn section_value(value: Value) -> SectionValue {
    match value {
        Value::Array(items) => SectionValue::Items(items.iter().map(display_value).collect()),
        other if is_truthy(&other) => SectionValue::Text(display_value(&other)),
        _ => SectionValue::Text(String::new()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
