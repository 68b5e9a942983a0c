use crate::error::ComposeError;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Canvas size assumed for a template that carries no usable dimensions.
pub const TEMPLATE_DEFAULT_SIZE: (f32, f32) = (1500.0, 900.0);
/// Size assumed for a diagram fragment that carries no usable dimensions.
pub const DIAGRAM_DEFAULT_SIZE: (f32, f32) = (1000.0, 600.0);

static DIMENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?[0-9]*\.?[0-9]+)\s*(?:px|pt|mm|cm|in)?$").unwrap());

/// A loaded SVG source file. `root_markup` keeps the root element verbatim;
/// the composer never looks inside it.
#[derive(Debug, Clone)]
pub struct CanvasDocument {
    pub width: f32,
    pub height: f32,
    pub root_markup: String,
}

/// Loads the background template. A missing or unparsable template is fatal;
/// missing dimensions fall back to [`TEMPLATE_DEFAULT_SIZE`].
pub fn load_template(path: &Path) -> Result<CanvasDocument, ComposeError> {
    if !path.exists() {
        return Err(ComposeError::TemplateNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    parse_document(&contents, TEMPLATE_DEFAULT_SIZE).map_err(|source| {
        ComposeError::TemplateParse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Loads the diagram fragment. Any failure here downgrades to a logged
/// warning and `None`; composition proceeds without a diagram layer.
pub fn load_diagram(path: &Path) -> Option<CanvasDocument> {
    if !path.exists() {
        warn!("diagram file not found, composing without it: {}", path.display());
        return None;
    }
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("failed to read diagram {}: {err}", path.display());
            return None;
        }
    };
    match parse_document(&contents, DIAGRAM_DEFAULT_SIZE) {
        Ok(document) => Some(document),
        Err(err) => {
            warn!("failed to parse diagram {}: {err}", path.display());
            None
        }
    }
}

fn parse_document(
    input: &str,
    defaults: (f32, f32),
) -> Result<CanvasDocument, roxmltree::Error> {
    let doc = roxmltree::Document::parse(input)?;
    let root = doc.root_element();
    let width = parse_dimension(root.attribute("width")).unwrap_or(defaults.0);
    let height = parse_dimension(root.attribute("height")).unwrap_or(defaults.1);
    let root_markup = input[root.range()].to_string();
    Ok(CanvasDocument {
        width,
        height,
        root_markup,
    })
}

/// Extracts a numeric dimension, tolerating an absolute unit suffix.
/// Percentages, non-numeric values, and non-positive or overflowing sizes
/// all count as unparsable and fall back to the defaults.
fn parse_dimension(attr: Option<&str>) -> Option<f32> {
    let raw = attr?.trim();
    let caps = DIMENSION_RE.captures(raw)?;
    let value: f32 = caps.get(1)?.as_str().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_declared_dimensions() {
        let doc = parse_document(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1280" height="720"><rect/></svg>"#,
            TEMPLATE_DEFAULT_SIZE,
        )
        .unwrap();
        assert_eq!(doc.width, 1280.0);
        assert_eq!(doc.height, 720.0);
        assert!(doc.root_markup.starts_with("<svg"));
        assert!(doc.root_markup.ends_with("</svg>"));
    }

    #[test]
    fn tolerates_unit_suffixes() {
        assert_eq!(parse_dimension(Some("1500px")), Some(1500.0));
        assert_eq!(parse_dimension(Some("900.5pt")), Some(900.5));
        assert_eq!(parse_dimension(Some(" 640 ")), Some(640.0));
    }

    #[test]
    fn rejects_percentages_and_garbage() {
        assert_eq!(parse_dimension(Some("100%")), None);
        assert_eq!(parse_dimension(Some("auto")), None);
        assert_eq!(parse_dimension(None), None);
    }

    #[test]
    fn defaults_missing_dimensions() {
        let doc = parse_document(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#,
            TEMPLATE_DEFAULT_SIZE,
        )
        .unwrap();
        assert_eq!(doc.width, 1500.0);
        assert_eq!(doc.height, 900.0);

        let doc = parse_document(
            r#"<svg width="100%" height="bogus"/>"#,
            DIAGRAM_DEFAULT_SIZE,
        )
        .unwrap();
        assert_eq!(doc.width, 1000.0);
        assert_eq!(doc.height, 600.0);
    }

    #[test]
    fn non_positive_dimensions_fall_back_to_defaults() {
        assert_eq!(parse_dimension(Some("-100")), None);
        assert_eq!(parse_dimension(Some("0")), None);
        assert_eq!(parse_dimension(Some("999999999999999999999999999999999999999999")), None);

        let doc = parse_document(r#"<svg width="-100" height="600"/>"#, DIAGRAM_DEFAULT_SIZE)
            .unwrap();
        assert_eq!(doc.width, 1000.0);
        assert_eq!(doc.height, 600.0);
    }

    #[test]
    fn missing_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_template(&dir.path().join("nope.svg")).unwrap_err();
        assert!(matches!(err, ComposeError::TemplateNotFound { .. }));
    }

    #[test]
    fn unparsable_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.svg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"<svg><unclosed>").unwrap();
        let err = load_template(&path).unwrap_err();
        assert!(matches!(err, ComposeError::TemplateParse { .. }));
    }

    #[test]
    fn broken_diagram_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_diagram(&dir.path().join("missing.svg")).is_none());

        let path = dir.path().join("broken.svg");
        std::fs::write(&path, "<svg><unclosed>").unwrap();
        assert!(load_diagram(&path).is_none());
    }
}
