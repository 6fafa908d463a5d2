//! Field schema model for dynamic configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared type of a single configuration field.
///
/// `Secret` behaves like `String` for every validation rule and is the sole
/// trigger for the encrypt/decrypt passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 text.
    String,
    /// Integer or floating point number.
    Number,
    /// True or false.
    Boolean,
    /// Ordered sequence; element shape comes from `items`.
    Array,
    /// Nested mapping; shape comes from `properties`.
    Object,
    /// Sensitive text, validated as a string and routed through the cipher.
    Secret,
}

impl FieldType {
    /// Expected-type phrase used in validation messages.
    pub(crate) fn expectation(self) -> &'static str {
        match self {
            Self::String | Self::Secret => "a string",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::Array => "an array",
            Self::Object => "an object",
        }
    }
}

/// Schema for one named configuration field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Display label for form renderers; not used by validation.
    pub label: String,
    /// Declared value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must carry a value (absent, null, and the empty
    /// string all count as missing).
    #[serde(default)]
    pub required: bool,
    /// Whether the field, once set, may never change or be removed.
    #[serde(default)]
    pub immutable: bool,
    /// Longer help text for form renderers.
    #[serde(default)]
    pub description: Option<String>,
    /// Placeholder text for form renderers.
    #[serde(default)]
    pub placeholder: Option<String>,
    /// When non-empty, restricts string/secret values to this set.
    #[serde(default, rename = "enum")]
    pub allowed_values: Option<Vec<String>>,
    /// Minimum length: characters, elements, or keys depending on type.
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Maximum length: characters, elements, or keys depending on type.
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Element schema shared by every array element.
    #[serde(default)]
    pub items: Option<Box<FieldSchema>>,
    /// Nested schema for object fields, keyed by field name.
    #[serde(default)]
    pub properties: Option<SchemaDefinition>,
}

/// A closed schema contract: field name to field schema.
pub type SchemaDefinition = BTreeMap<String, FieldSchema>;

impl FieldSchema {
    /// Start a field schema with the given label and type; all constraints
    /// default to off.
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            field_type,
            required: false,
            immutable: false,
            description: None,
            placeholder: None,
            allowed_values: None,
            min_length: None,
            max_length: None,
            items: None,
            properties: None,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as immutable once set.
    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// Attach a description shown by form renderers.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach placeholder text shown by form renderers.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Restrict string/secret values to the given set.
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the minimum length constraint.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the maximum length constraint.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set the element schema for an array field.
    pub fn items(mut self, items: FieldSchema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Set the nested schema for an object field.
    pub fn properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldSchema)>,
        S: Into<String>,
    {
        self.properties = Some(
            properties
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        );
        self
    }

    /// Whether the enum restriction is active (present and non-empty).
    pub(crate) fn has_allowed_values(&self) -> bool {
        self.allowed_values
            .as_ref()
            .is_some_and(|values| !values.is_empty())
    }
}
