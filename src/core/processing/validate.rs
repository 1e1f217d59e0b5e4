use crate::types::Grain;

/// Decides whether a single grain is acceptable.
///
/// Returns `Err(reason)` for a rejected grain. Rejection is data, not an
/// error: the processor decides whether it escalates.
pub trait GrainValidator {
    fn validate(&self, grain: &Grain) -> Result<(), String>;
}

/// Requires a set of fields to be present and non-null.
#[derive(Debug, Clone, Default)]
pub struct RequiredFieldsValidator {
    fields: Vec<String>,
}

impl RequiredFieldsValidator {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

impl GrainValidator for RequiredFieldsValidator {
    fn validate(&self, grain: &Grain) -> Result<(), String> {
        let missing: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| grain.get(f).is_none_or(|v| v.is_null()))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("missing required field(s): {}", missing.join(", ")))
        }
    }
}
