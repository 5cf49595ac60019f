/*
[INPUT]:  Field keys, edited values and backend error payloads
[OUTPUT]: Flat key-value form state with per-field and general errors
[POS]:    Form layer - transient state owned by one open form
[UPDATE]: When error presentation rules change
*/

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub fields: BTreeMap<String, Vec<String>>,
    pub general: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.general = None;
    }

    pub fn field(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    pub fn add_field(&mut self, key: &str, message: impl Into<String>) {
        self.fields
            .entry(key.to_string())
            .or_default()
            .push(message.into());
    }

    /// Append to the general message, one sentence per line
    pub fn add_general(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.general = Some(match self.general.take() {
            Some(existing) => format!("{existing}\n{message}"),
            None => message,
        });
    }
}

/// Values keyed by field name; updating one key leaves the others untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, String>,
    pub errors: FormErrors,
}

impl FormState {
    pub fn from_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            errors: FormErrors::default(),
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub(crate) fn value_mut(&mut self, key: &str) -> &mut String {
        self.values.entry(key.to_string()).or_default()
    }
}
