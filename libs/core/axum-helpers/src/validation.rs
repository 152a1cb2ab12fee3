//! Typed result of running `validator` rules over a request body.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Every rejected field with the reasons it failed.
///
/// Nested fields use dotted paths and list items their index, so a negative
/// cost on the second product reads `products[1].cost`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn reasons(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    fn collect(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let path = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            };
            match kind {
                ValidationErrorsKind::Field(failures) => {
                    let reasons = self.fields.entry(path).or_default();
                    reasons.extend(failures.iter().map(|failure| match &failure.message {
                        Some(message) => message.to_string(),
                        None => failure.code.to_string(),
                    }));
                }
                ValidationErrorsKind::Struct(inner) => self.collect(&path, inner),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(&format!("{path}[{index}]"), inner);
                    }
                }
            }
        }
    }
}

impl From<&ValidationErrors> for ValidationReport {
    fn from(errors: &ValidationErrors) -> Self {
        let mut report = Self::default();
        report.collect("", errors);
        report
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reasons) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", reasons.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Run the `validator` rules of `input`.
pub fn validate<T: Validate>(input: &T) -> Result<(), ValidationReport> {
    input.validate().map_err(|errors| ValidationReport::from(&errors))
}
