use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a composition or degrade its inputs.
///
/// Template problems are fatal: there is no fallback template. Diagram
/// problems never surface here at all; the loader downgrades them to a
/// logged warning and an absent diagram layer.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    #[error("failed to parse template {path}: {source}")]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("failed to parse extracted fields: {0}")]
    FieldsParse(#[from] serde_json::Error),

    #[error("extracted fields are not a JSON object")]
    FieldsNotObject,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
