use crate::config::{DiagramFit, LayoutPolicy};
use crate::error::ComposeError;
use crate::fields::ReportFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoration {
    #[default]
    None,
    Underline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// One positioned, styled text label, ready for the element builder.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub x: f32,
    pub y: f32,
    pub content: String,
    pub font_size: f32,
    pub anchor: Anchor,
    pub weight: FontWeight,
    pub decoration: Decoration,
    pub font_style: FontStyle,
    pub color: Option<String>,
}

impl TextSpec {
    fn new(x: f32, y: f32, content: impl Into<String>, font_size: f32, anchor: Anchor) -> Self {
        Self {
            x,
            y,
            content: content.into(),
            font_size,
            anchor,
            weight: FontWeight::Normal,
            decoration: Decoration::None,
            font_style: FontStyle::Normal,
            color: None,
        }
    }

    fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    fn underlined(mut self) -> Self {
        self.decoration = Decoration::Underline;
        self
    }

    fn italic(mut self) -> Self {
        self.font_style = FontStyle::Italic;
        self
    }
}

/// Where the diagram fragment lands in canvas space. Scale stays in (0, 1];
/// the diagram is never enlarged beyond its source size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramPlacement {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct ComposedLayout {
    pub text_specs: Vec<TextSpec>,
    pub diagram: Option<DiagramPlacement>,
}

/// Computes pixel positions for every label and, when a diagram is present,
/// its placement. Positions are proportional to the canvas and independent
/// of label content, except for the fixed-width character-estimate offsets.
pub fn compute_layout(
    width: f32,
    height: f32,
    fields: &ReportFields,
    diagram_size: Option<(f32, f32)>,
    policy: &LayoutPolicy,
) -> Result<ComposedLayout, ComposeError> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(ComposeError::InvalidCanvas { width, height });
    }

    let title_x = width * policy.left_margin_frac;
    let title_y = height * policy.title_top_frac;
    let right_margin = width * policy.right_margin_frac;
    let desc_y = title_y + policy.desc_offset;

    let company = fields.company_name();
    let citation = fields.citation();

    // Character-count estimates, not glyph measurement. An empty string
    // degrades to a zero offset.
    let company_advance = char_count(company) * policy.title_char_width;
    let citation_advance = char_count(citation) * policy.citation_char_width;

    let text_specs = vec![
        TextSpec::new(title_x, title_y, company, policy.title_font_size, Anchor::Start).bold(),
        TextSpec::new(
            title_x + company_advance,
            title_y,
            fields.report_type(),
            policy.title_font_size,
            Anchor::Start,
        ),
        TextSpec::new(
            right_margin - citation_advance,
            title_y,
            "Source: ",
            policy.detail_font_size,
            Anchor::End,
        ),
        TextSpec::new(
            right_margin,
            title_y,
            citation,
            policy.detail_font_size,
            Anchor::End,
        )
        .underlined(),
        TextSpec::new(
            right_margin,
            desc_y,
            fields.report_date(),
            policy.detail_font_size,
            Anchor::End,
        ),
        TextSpec::new(
            width / 2.0,
            height * policy.caption_y_frac,
            format!("\"{}\"", fields.key_insight()),
            policy.caption_font_size,
            Anchor::Middle,
        )
        .italic(),
    ];

    // A fragment reporting a non-positive or non-finite size cannot be
    // placed; the layer is dropped like any other diagram failure, keeping
    // the placement scale inside (0, 1].
    let diagram = diagram_size
        .filter(|&(dw, dh)| dw.is_finite() && dh.is_finite() && dw > 0.0 && dh > 0.0)
        .map(|(dw, dh)| place_diagram(width, height, dw, dh, policy));

    Ok(ComposedLayout { text_specs, diagram })
}

fn place_diagram(
    width: f32,
    height: f32,
    diagram_width: f32,
    diagram_height: f32,
    policy: &LayoutPolicy,
) -> DiagramPlacement {
    match policy.fit {
        DiagramFit::FixedFill => DiagramPlacement {
            translate_x: (width - diagram_width) / 2.0,
            translate_y: (height - diagram_height) / 2.0 + height * policy.fill_y_nudge_frac,
            scale: 1.0,
        },
        DiagramFit::FitToWidth => {
            let scale = policy
                .fit_max_scale
                .min(width * policy.fit_width_frac / diagram_width);
            DiagramPlacement {
                translate_x: (width - diagram_width * scale) / 2.0,
                translate_y: height * policy.fit_top_frac,
                scale,
            }
        }
    }
}

fn char_count(text: &str) -> f32 {
    text.chars().count() as f32
}
