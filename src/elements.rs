use crate::layout::{Decoration, DiagramPlacement, FontStyle, FontWeight, TextSpec};

/// Builds a `<text>` element from a spec. Default-valued presentation
/// attributes (normal weight, no decoration, normal style, unset color) are
/// omitted so output stays minimal and stable.
pub fn build_text_node(spec: &TextSpec) -> String {
    let mut node = String::new();
    node.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" text-anchor=\"{}\"",
        spec.x,
        spec.y,
        spec.font_size,
        spec.anchor.as_str()
    ));
    if spec.weight == FontWeight::Bold {
        node.push_str(" font-weight=\"bold\"");
    }
    if spec.decoration == Decoration::Underline {
        node.push_str(" text-decoration=\"underline\"");
    }
    if spec.font_style == FontStyle::Italic {
        node.push_str(" font-style=\"italic\"");
    }
    if let Some(color) = &spec.color {
        node.push_str(&format!(" fill=\"{}\"", escape_xml(color)));
    }
    node.push('>');
    node.push_str(&escape_xml(&spec.content));
    node.push_str("</text>");
    node
}

/// Wraps the diagram root in a group carrying one combined transform.
/// Translate comes before scale: translate establishes the placement origin
/// in canvas space, scale then resizes around that origin.
pub fn build_diagram_group(placement: &DiagramPlacement, root_markup: &str) -> String {
    format!(
        "<g transform=\"translate({:.2}, {:.2}) scale({})\">{}</g>",
        placement.translate_x, placement.translate_y, placement.scale, root_markup
    )
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
