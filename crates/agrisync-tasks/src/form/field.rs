/*
[INPUT]:  Field descriptors and per-keystroke edit commands
[OUTPUT]: Edited string values, display text and extracted JSON values per input kind
[POS]:    Form layer - polymorphic field kinds of the admin edit form
[UPDATE]: When adding an input kind or changing value extraction rules
*/

use chrono::NaiveDate;
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Where a related-entity select loads its options from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSource {
    pub endpoint: String,
    pub value_key: String,
    pub label_key: String,
}

impl OptionSource {
    pub fn new(
        endpoint: impl Into<String>,
        value_key: impl Into<String>,
        label_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            value_key: value_key.into(),
            label_key: label_key.into(),
        }
    }

    /// Map raw collection items to options; items without a usable value are skipped
    pub fn to_options(&self, items: &[Value]) -> Vec<SelectOption> {
        items
            .iter()
            .filter_map(|item| {
                let value = scalar_text(item.get(&self.value_key)?)?;
                let label = item
                    .get(&self.label_key)
                    .and_then(scalar_text)
                    .unwrap_or_else(|| value.clone());
                Some(SelectOption { value, label })
            })
            .collect()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Editing command delivered to the focused field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Char(char),
    Backspace,
    Newline,
    Clear,
    Next,
    Previous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Date,
    Select {
        options: Vec<SelectOption>,
    },
    RemoteSelect {
        source: OptionSource,
        options: Vec<SelectOption>,
    },
}

impl FieldKind {
    pub fn options(&self) -> Option<&[SelectOption]> {
        match self {
            FieldKind::Select { options } | FieldKind::RemoteSelect { options, .. } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldKind::TextArea)
    }

    /// Apply one editing command; returns whether the value changed
    pub fn edit(&self, value: &mut String, input: FieldInput) -> bool {
        match self {
            FieldKind::Text | FieldKind::TextArea | FieldKind::Date => {
                self.edit_text(value, input)
            }
            FieldKind::Select { options } | FieldKind::RemoteSelect { options, .. } => {
                cycle_option(options, value, input)
            }
        }
    }

    fn edit_text(&self, value: &mut String, input: FieldInput) -> bool {
        match input {
            FieldInput::Char(ch) if !ch.is_control() => {
                if matches!(self, FieldKind::Date)
                    && (!(ch.is_ascii_digit() || ch == '-') || value.len() >= DATE_LEN)
                {
                    return false;
                }
                value.push(ch);
                true
            }
            FieldInput::Newline if self.is_multiline() => {
                value.push('\n');
                true
            }
            FieldInput::Backspace => value.pop().is_some(),
            FieldInput::Clear if !value.is_empty() => {
                value.clear();
                true
            }
            _ => false,
        }
    }

    /// Text shown for a value; `None` means the placeholder should be shown
    pub fn display(&self, value: &str) -> Option<String> {
        if value.is_empty() {
            return None;
        }
        match self.options() {
            Some(options) => Some(
                options
                    .iter()
                    .find(|option| option.value == value)
                    .map(|option| option.label.clone())
                    .unwrap_or_else(|| value.to_string()),
            ),
            None => Some(value.to_string()),
        }
    }

    /// Convert the form string into the JSON value sent to the backend
    pub fn extract(&self, value: &str) -> Result<Value, String> {
        match self {
            FieldKind::Text | FieldKind::TextArea => Ok(Value::String(value.to_string())),
            FieldKind::Date => {
                if value.is_empty() {
                    return Ok(Value::Null);
                }
                NaiveDate::parse_from_str(value, DATE_FORMAT)
                    .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
                    .map_err(|_| "Enter a valid date (YYYY-MM-DD).".to_string())
            }
            FieldKind::Select { options } => {
                if value.is_empty() {
                    return Ok(Value::Null);
                }
                if options.iter().any(|option| option.value == value) {
                    Ok(Value::String(value.to_string()))
                } else {
                    Err("Select a valid choice.".to_string())
                }
            }
            FieldKind::RemoteSelect { .. } => {
                if value.is_empty() {
                    return Ok(Value::Null);
                }
                Ok(match value.parse::<u64>() {
                    Ok(id) => Value::from(id),
                    Err(_) => Value::String(value.to_string()),
                })
            }
        }
    }
}

/// Step through `["", options...]`; the empty slot is the placeholder.
/// With no options loaded, stepping keeps the current value.
fn cycle_option(options: &[SelectOption], value: &mut String, input: FieldInput) -> bool {
    if options.is_empty() && matches!(input, FieldInput::Next | FieldInput::Previous) {
        return false;
    }
    let slots = options.len() + 1;
    let current = options
        .iter()
        .position(|option| option.value == *value)
        .map(|index| index + 1)
        .unwrap_or(0);
    let next = match input {
        FieldInput::Next => (current + 1) % slots,
        FieldInput::Previous => (current + slots - 1) % slots,
        FieldInput::Clear | FieldInput::Backspace => 0,
        _ => return false,
    };
    let next_value = match next {
        0 => String::new(),
        index => options[index - 1].value.clone(),
    };
    if next_value == *value {
        return false;
    }
    *value = next_value;
    true
}

/// Declarative description of one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub placeholder: Option<String>,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            placeholder: None,
            required: false,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Placeholder text, falling back to `Select <label>` for selects
    pub fn placeholder_text(&self) -> String {
        match (&self.placeholder, &self.kind) {
            (Some(placeholder), _) => placeholder.clone(),
            (None, FieldKind::Select { .. } | FieldKind::RemoteSelect { .. }) => {
                format!("Select {}", self.label)
            }
            (None, FieldKind::Date) => "YYYY-MM-DD".to_string(),
            (None, _) => String::new(),
        }
    }
}
