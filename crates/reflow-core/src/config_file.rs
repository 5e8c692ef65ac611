use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub normalizer: Option<NormalizerSection>,
    pub output: Option<OutputConfig>,
    pub pdf: Option<PdfConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerSection {
    /// Replaces the built-in section header vocabulary.
    pub section_headers: Option<Vec<String>>,
    /// Appended to the (possibly replaced) vocabulary.
    pub extra_section_headers: Option<Vec<String>>,
    pub compound_suffixes: Option<Vec<String>>,
    pub extra_compound_suffixes: Option<Vec<String>>,
    /// Regex of glyphs deleted by the symbol-stripping step.
    pub symbol_pattern: Option<String>,
    /// Step names, in order.
    pub steps: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub page_separator: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfConfig {
    pub header_exclusion: Option<f32>,
    pub footer_exclusion: Option<f32>,
}

/// Platform config directory path: `<config_dir>/reflow/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reflow").join("config.toml"))
}

/// Load config by cascading CWD `.reflow.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".reflow.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Like [`load_config`], with an explicitly named file layered on top of the
/// cascade. A named file that is missing is logged and skipped.
pub fn load_config_with(explicit: Option<&Path>) -> ConfigFile {
    let cascaded = load_config();
    let Some(path) = explicit else {
        return cascaded;
    };
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "config file not found, using defaults");
        return cascaded;
    }
    match load_from_path(path) {
        Some(overlay) => merge(cascaded, overlay),
        None => cascaded,
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed; parse failures are logged.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_norm = base.normalizer.unwrap_or_default();
    let over_norm = overlay.normalizer.unwrap_or_default();
    let base_out = base.output.unwrap_or_default();
    let over_out = overlay.output.unwrap_or_default();
    let base_pdf = base.pdf.unwrap_or_default();
    let over_pdf = overlay.pdf.unwrap_or_default();

    ConfigFile {
        normalizer: Some(NormalizerSection {
            section_headers: over_norm.section_headers.or(base_norm.section_headers),
            extra_section_headers: over_norm
                .extra_section_headers
                .or(base_norm.extra_section_headers),
            compound_suffixes: over_norm.compound_suffixes.or(base_norm.compound_suffixes),
            extra_compound_suffixes: over_norm
                .extra_compound_suffixes
                .or(base_norm.extra_compound_suffixes),
            symbol_pattern: over_norm.symbol_pattern.or(base_norm.symbol_pattern),
            steps: over_norm.steps.or(base_norm.steps),
        }),
        output: Some(OutputConfig {
            page_separator: over_out.page_separator.or(base_out.page_separator),
        }),
        pdf: Some(PdfConfig {
            header_exclusion: over_pdf.header_exclusion.or(base_pdf.header_exclusion),
            footer_exclusion: over_pdf.footer_exclusion.or(base_pdf.footer_exclusion),
        }),
    }
}
