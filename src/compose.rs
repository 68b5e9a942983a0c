use crate::elements::{build_diagram_group, build_text_node};
use crate::layout::{DiagramPlacement, TextSpec};
use anyhow::Result;
use std::path::Path;

/// The diagram layer of a composed document: where it goes plus the
/// fragment's root markup, carried verbatim.
#[derive(Debug, Clone)]
pub struct DiagramLayer {
    pub placement: DiagramPlacement,
    pub root_markup: String,
}

/// Everything the serializer needs, in paint order. Width and height are the
/// template's resolved canvas dimensions, never the diagram's.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub width: f32,
    pub height: f32,
    pub template_markup: String,
    pub text_specs: Vec<TextSpec>,
    pub diagram: Option<DiagramLayer>,
}

/// Serializes the composition into one standalone SVG document. Purely a
/// function of its input, so serializing the same value twice is
/// byte-identical.
pub fn serialize(doc: &ComposedDocument) -> String {
    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = doc.width,
        h = doc.height
    ));
    svg.push_str(&doc.template_markup);
    for spec in &doc.text_specs {
        svg.push_str(&build_text_node(spec));
    }
    if let Some(layer) = &doc.diagram {
        svg.push_str(&build_diagram_group(&layer.placement, &layer.root_markup));
    }
    svg.push_str("</svg>");
    svg
}

/// Writes the serialized document to `output`, overwriting any existing
/// file, or to stdout when no path is given.
pub fn write_output(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Anchor, Decoration, FontStyle, FontWeight};

    fn document(with_diagram: bool) -> ComposedDocument {
        ComposedDocument {
            width: 1500.0,
            height: 900.0,
            template_markup: "<svg width=\"1500\" height=\"900\"><rect fill=\"#fff\"/></svg>"
                .to_string(),
            text_specs: vec![TextSpec {
                x: 75.0,
                y: 72.0,
                content: "Apple".to_string(),
                font_size: 24.0,
                anchor: Anchor::Start,
                weight: FontWeight::Bold,
                decoration: Decoration::None,
                font_style: FontStyle::Normal,
                color: None,
            }],
            diagram: with_diagram.then(|| DiagramLayer {
                placement: DiagramPlacement {
                    translate_x: 0.0,
                    translate_y: 45.0,
                    scale: 1.0,
                },
                root_markup: "<svg id=\"sankey\"/>".to_string(),
            }),
        }
    }

    #[test]
    fn declares_canvas_dimensions_and_namespaces() {
        let svg = serialize(&document(true));
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
        assert!(svg.contains("width=\"1500\" height=\"900\" viewBox=\"0 0 1500 900\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn appends_template_then_text_then_diagram() {
        let svg = serialize(&document(true));
        let template = svg.find("rect fill").unwrap();
        let text = svg.find("<text").unwrap();
        let diagram = svg.find("<g transform").unwrap();
        assert!(template < text);
        assert!(text < diagram);
    }

    #[test]
    fn omits_diagram_layer_when_absent() {
        let svg = serialize(&document(false));
        assert!(!svg.contains("<g transform"));
        assert!(svg.contains("<text"));
    }

    #[test]
    fn serialization_is_idempotent() {
        let doc = document(true);
        assert_eq!(serialize(&doc), serialize(&doc));
    }

    #[test]
    fn write_output_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged_output.svg");
        std::fs::write(&path, "stale").unwrap();
        write_output("<svg/>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }
}
