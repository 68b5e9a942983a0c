use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the diagram fragment is fitted into the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramFit {
    /// No resize; centered, nudged 5% of the canvas height downward.
    /// Assumes the fragment already matches the canvas dimensions.
    FixedFill,
    /// Scaled down to fit a fraction of the canvas width, capped at
    /// `fit_max_scale`, pinned near the top of the canvas.
    FitToWidth,
}

/// Every constant the layout calculator uses. The historical variants of
/// this pipeline differed only in these literals, so they live in one
/// parameterized policy instead of separate code paths.
///
/// The `*_char_width` values are a fixed-width character estimate, not real
/// glyph measurement. Downstream positioning depends on these exact
/// constants; changing them breaks visual parity with existing output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutPolicy {
    pub left_margin_frac: f32,
    pub title_top_frac: f32,
    pub right_margin_frac: f32,
    pub caption_y_frac: f32,
    pub title_font_size: f32,
    pub detail_font_size: f32,
    pub caption_font_size: f32,
    pub title_char_width: f32,
    pub citation_char_width: f32,
    pub desc_offset: f32,
    pub fit: DiagramFit,
    pub fit_max_scale: f32,
    pub fit_width_frac: f32,
    pub fit_top_frac: f32,
    pub fill_y_nudge_frac: f32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::single_figure()
    }
}

impl LayoutPolicy {
    /// Single-figure variant: diagram placed as-is, tight caption row.
    pub fn single_figure() -> Self {
        Self {
            left_margin_frac: 0.05,
            title_top_frac: 0.08,
            right_margin_frac: 0.95,
            caption_y_frac: 0.83,
            title_font_size: 24.0,
            detail_font_size: 10.0,
            caption_font_size: 16.0,
            title_char_width: 18.0,
            citation_char_width: 6.0,
            desc_offset: 15.0,
            fit: DiagramFit::FixedFill,
            fit_max_scale: 0.8,
            fit_width_frac: 0.9,
            fit_top_frac: 0.15,
            fill_y_nudge_frac: 0.05,
        }
    }

    /// Report variant: diagram scaled to fit the canvas width, wider gap
    /// below the citation row.
    pub fn report() -> Self {
        Self {
            desc_offset: 30.0,
            fit: DiagramFit::FitToWidth,
            ..Self::single_figure()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub policy: LayoutPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    mode: Option<String>,
    policy: Option<PolicyOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyOverrides {
    left_margin_frac: Option<f32>,
    title_top_frac: Option<f32>,
    right_margin_frac: Option<f32>,
    caption_y_frac: Option<f32>,
    title_font_size: Option<f32>,
    detail_font_size: Option<f32>,
    caption_font_size: Option<f32>,
    title_char_width: Option<f32>,
    citation_char_width: Option<f32>,
    desc_offset: Option<f32>,
    fit: Option<DiagramFit>,
    fit_max_scale: Option<f32>,
    fit_width_frac: Option<f32>,
    fit_top_frac: Option<f32>,
    fill_y_nudge_frac: Option<f32>,
}

/// Loads a config file on top of a base policy. Missing file path means the
/// base policy is used unchanged; every file entry is optional.
pub fn load_config(path: Option<&Path>, base: LayoutPolicy) -> anyhow::Result<Config> {
    let mut config = Config { policy: base };
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(mode) = parsed.mode.as_deref() {
        config.policy = match mode {
            "report" => LayoutPolicy::report(),
            _ => LayoutPolicy::single_figure(),
        };
    }

    if let Some(overrides) = parsed.policy {
        let policy = &mut config.policy;
        if let Some(v) = overrides.left_margin_frac {
            policy.left_margin_frac = v;
        }
        if let Some(v) = overrides.title_top_frac {
            policy.title_top_frac = v;
        }
        if let Some(v) = overrides.right_margin_frac {
            policy.right_margin_frac = v;
        }
        if let Some(v) = overrides.caption_y_frac {
            policy.caption_y_frac = v;
        }
        if let Some(v) = overrides.title_font_size {
            policy.title_font_size = v;
        }
        if let Some(v) = overrides.detail_font_size {
            policy.detail_font_size = v;
        }
        if let Some(v) = overrides.caption_font_size {
            policy.caption_font_size = v;
        }
        if let Some(v) = overrides.title_char_width {
            policy.title_char_width = v;
        }
        if let Some(v) = overrides.citation_char_width {
            policy.citation_char_width = v;
        }
        if let Some(v) = overrides.desc_offset {
            policy.desc_offset = v;
        }
        if let Some(v) = overrides.fit {
            policy.fit = v;
        }
        if let Some(v) = overrides.fit_max_scale {
            policy.fit_max_scale = v;
        }
        if let Some(v) = overrides.fit_width_frac {
            policy.fit_width_frac = v;
        }
        if let Some(v) = overrides.fit_top_frac {
            policy.fit_top_frac = v;
        }
        if let Some(v) = overrides.fill_y_nudge_frac {
            policy.fill_y_nudge_frac = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn presets_differ_only_in_variant_literals() {
        let single = LayoutPolicy::single_figure();
        let report = LayoutPolicy::report();
        assert_eq!(single.desc_offset, 15.0);
        assert_eq!(report.desc_offset, 30.0);
        assert_eq!(single.fit, DiagramFit::FixedFill);
        assert_eq!(report.fit, DiagramFit::FitToWidth);
        assert_eq!(single.title_char_width, report.title_char_width);
        assert_eq!(single.caption_y_frac, report.caption_y_frac);
    }

    #[test]
    fn missing_path_keeps_base_policy() {
        let config = load_config(None, LayoutPolicy::report()).unwrap();
        assert_eq!(config.policy.fit, DiagramFit::FitToWidth);
    }

    #[test]
    fn file_overrides_individual_constants() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"{"mode": "report", "policy": {"descOffset": 45.0, "fit": "fixed-fill"}}"#,
        )
        .unwrap();

        let config = load_config(Some(&path), LayoutPolicy::single_figure()).unwrap();
        assert_eq!(config.policy.desc_offset, 45.0);
        assert_eq!(config.policy.fit, DiagramFit::FixedFill);
        assert_eq!(config.policy.title_font_size, 24.0);
    }
}
