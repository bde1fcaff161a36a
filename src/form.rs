use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::extract_attributes;
use crate::wire::EvaluateRequest;
use crate::AstNode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please provide values for: {}", names.join(", "))]
    MissingValues { names: Vec<String> },

    #[error("'{name}' is not an input of this rule")]
    UnknownField { name: String },
}

/// A value typed into the evaluation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    /// Interpret raw input: anything that reads as a finite number (ignoring
    /// surrounding whitespace) becomes [`InputValue::Number`], the rest is kept
    /// verbatim as text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => InputValue::Number(n),
            _ => InputValue::Text(raw.to_owned()),
        }
    }

    /// Blank text counts as no value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, InputValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Number(n) => write!(f, "{n}"),
            InputValue::Text(s) => f.write_str(s),
        }
    }
}

/// Data-entry form for evaluating one rule: one field per distinct
/// attribute the rule references, in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationForm {
    fields: Vec<String>,
    values: BTreeMap<String, InputValue>,
}

impl EvaluationForm {
    /// Build an empty form for `ast`. An absent AST gives a form with no fields.
    #[must_use]
    pub fn from_ast(ast: Option<&AstNode>) -> Self {
        Self {
            fields: extract_attributes(ast).into_vec(),
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&InputValue> {
        self.values.get(name)
    }

    /// Record raw input for a field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if the rule does not reference
    /// `name`.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<&InputValue, FormError> {
        if !self.fields.iter().any(|f| f == name) {
            return Err(FormError::UnknownField {
                name: name.to_owned(),
            });
        }
        let value = InputValue::parse(raw);
        self.values.insert(name.to_owned(), value);
        Ok(&self.values[name])
    }

    /// Fields with no value or a blank one, in field order.
    #[must_use]
    pub fn missing(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| self.values.get(f.as_str()).map_or(true, InputValue::is_blank))
            .map(String::as_str)
            .collect()
    }

    /// The filled-in values, ready to send.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingValues`] naming every unfilled field.
    pub fn submission(&self) -> Result<BTreeMap<String, InputValue>, FormError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(FormError::MissingValues {
                names: missing.into_iter().map(str::to_owned).collect(),
            });
        }
        Ok(self.values.clone())
    }

    /// Build the `POST /evaluate_rule` body for `rule_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingValues`] if any field is unfilled.
    pub fn to_request(&self, rule_id: i64) -> Result<EvaluateRequest, FormError> {
        Ok(EvaluateRequest {
            rule_id,
            data: self.submission()?,
        })
    }
}
