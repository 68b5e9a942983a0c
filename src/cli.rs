use crate::compose::{serialize, write_output, ComposedDocument, DiagramLayer};
use crate::config::{load_config, LayoutPolicy};
use crate::fields::ReportFields;
use crate::layout::compute_layout;
use crate::loader::{load_diagram, load_template};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "svgrc", version, about = "Compose annotated SVG report figures")]
pub struct Args {
    /// Template SVG supplying the canvas
    #[arg(short = 't', long = "template")]
    pub template: PathBuf,

    /// Extracted report fields (JSON file) or '-' for stdin
    #[arg(short = 'f', long = "fields")]
    pub fields: Option<PathBuf>,

    /// Diagram fragment SVG to embed (optional)
    #[arg(short = 'd', long = "diagram")]
    pub diagram: Option<PathBuf>,

    /// Output file, or '-' for stdout
    #[arg(short = 'o', long = "output", default_value = "merged_output.svg")]
    pub output: PathBuf,

    /// Layout policy preset
    #[arg(short = 'm', long = "mode", value_enum, default_value = "single")]
    pub mode: Mode,

    /// Config JSON overriding individual policy constants
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Mode {
    /// Single-figure layout: diagram placed at its source size
    Single,
    /// Report layout: diagram scaled to fit the canvas width
    Report,
}

impl Mode {
    fn policy(self) -> LayoutPolicy {
        match self {
            Mode::Single => LayoutPolicy::single_figure(),
            Mode::Report => LayoutPolicy::report(),
        }
    }
}

pub fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.mode.policy())?;

    let raw_fields = read_fields(args.fields.as_deref())?;
    let fields = ReportFields::from_json(&raw_fields)
        .context("text extraction returned no usable mapping")?;
    if fields.is_empty() {
        anyhow::bail!("text extraction returned no usable mapping (all fields null)");
    }

    let template = load_template(&args.template)?;
    let diagram = args.diagram.as_deref().and_then(load_diagram);

    let layout = compute_layout(
        template.width,
        template.height,
        &fields,
        diagram.as_ref().map(|d| (d.width, d.height)),
        &config.policy,
    )?;

    let doc = ComposedDocument {
        width: template.width,
        height: template.height,
        template_markup: template.root_markup,
        text_specs: layout.text_specs,
        diagram: layout
            .diagram
            .zip(diagram)
            .map(|(placement, fragment)| DiagramLayer {
                placement,
                root_markup: fragment.root_markup,
            }),
    };

    let svg = serialize(&doc);
    let target = if args.output == Path::new("-") {
        None
    } else {
        Some(args.output.as_path())
    };
    write_output(&svg, target)?;
    Ok(())
}

fn read_fields(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fields file {}", path.display()));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
