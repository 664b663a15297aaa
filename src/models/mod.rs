pub mod park;
pub mod user;

use crate::core::errors::ApiError;

/// Collects required-field failures while a document is being built.
#[derive(Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub fn take(&mut self, field: &'static str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    pub fn finish(self, model: &str) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            return Ok(());
        }

        let reasons: Vec<String> = self
            .missing
            .iter()
            .map(|field| format!("{}: Path `{}` is required.", field, field))
            .collect();
        Err(ApiError::Validation(format!(
            "{} validation failed: {}",
            model,
            reasons.join(", ")
        )))
    }
}
