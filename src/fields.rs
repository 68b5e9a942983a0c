use crate::error::ComposeError;
use serde::Deserialize;

/// Report fields returned by the text-extraction collaborator.
///
/// The collaborator replies with a loosely-typed JSON object holding five
/// optional string keys; this record pins that contract down at the system
/// boundary. Explicit `null` and an absent key both map to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFields {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub key_insight: Option<String>,
}

impl ReportFields {
    pub fn from_json(input: &str) -> Result<Self, ComposeError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        if !value.is_object() {
            return Err(ComposeError::FieldsNotObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// True when every field is absent; callers treat this as "no usable
    /// mapping at all".
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.report_type.is_none()
            && self.citation.is_none()
            && self.report_date.is_none()
            && self.key_insight.is_none()
    }

    pub fn company_name(&self) -> &str {
        text(&self.company_name)
    }

    pub fn report_type(&self) -> &str {
        text(&self.report_type)
    }

    pub fn citation(&self) -> &str {
        text(&self.citation)
    }

    pub fn report_date(&self) -> &str {
        text(&self.report_date)
    }

    pub fn key_insight(&self) -> &str {
        text(&self.key_insight)
    }
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}
