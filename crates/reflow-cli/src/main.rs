use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use tokio::task::JoinSet;

use reflow_core::config_file::{self, ConfigFile, NormalizerSection};
use reflow_core::{FragmentSource, PositionedFragment};
use reflow_pdf_mupdf::MupdfSource;
use reflow_text::{
    DEFAULT_PAGE_SEPARATOR, Normalizer, NormalizerConfigBuilder, Step, TextPipeline,
};

/// Reflow - Rebuild clean paragraph text from positioned PDF glyphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Extra config file layered over .reflow.toml and the platform config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract paragraph text from a PDF
    Extract {
        /// Path to the PDF file
        pdf: PathBuf,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip normalization; emit reconstructed lines as-is
        #[arg(long)]
        raw: bool,

        /// Text inserted between pages
        #[arg(long)]
        page_separator: Option<String>,

        /// Fraction of page height at the top to ignore (0 disables)
        #[arg(long)]
        header_exclusion: Option<f32>,

        /// Fraction of page height at the bottom to ignore (0 disables)
        #[arg(long)]
        footer_exclusion: Option<f32>,
    },

    /// Reconstruct text from a JSON fragment dump (one page or an array of pages)
    Reconstruct {
        /// Path to the JSON file
        json: PathBuf,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip normalization; emit reconstructed lines as-is
        #[arg(long)]
        raw: bool,

        /// Text inserted between pages
        #[arg(long)]
        page_separator: Option<String>,
    },

    /// Normalize already-extracted text (reads stdin when no file is given)
    Normalize {
        /// Path to a text file
        file: Option<PathBuf>,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dump per-page positioned fragments from a PDF as JSON
    Fragments {
        /// Path to the PDF file
        pdf: PathBuf,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fraction of page height at the top to ignore (0 disables)
        #[arg(long)]
        header_exclusion: Option<f32>,

        /// Fraction of page height at the bottom to ignore (0 disables)
        #[arg(long)]
        footer_exclusion: Option<f32>,
    },
}

/// A fragment dump: either a single page or one array per page.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum FragmentDump {
    Pages(Vec<Vec<PositionedFragment>>),
    Page(Vec<PositionedFragment>),
}

impl FragmentDump {
    fn into_pages(self) -> Vec<Vec<PositionedFragment>> {
        match self {
            FragmentDump::Pages(pages) => pages,
            FragmentDump::Page(page) => vec![page],
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let config_override = cli
        .config
        .or_else(|| std::env::var("REFLOW_CONFIG").ok().map(PathBuf::from));
    let config = config_file::load_config_with(config_override.as_deref());

    match cli.command {
        Command::Extract {
            pdf,
            output,
            raw,
            page_separator,
            header_exclusion,
            footer_exclusion,
        } => {
            let source = build_source(&config, header_exclusion, footer_exclusion);
            let pipeline = build_pipeline(&config, page_separator, raw)?;
            extract(source, pdf, pipeline, output).await
        }
        Command::Reconstruct {
            json,
            output,
            raw,
            page_separator,
        } => {
            let pipeline = build_pipeline(&config, page_separator, raw)?;
            reconstruct(&json, &pipeline, output.as_deref())
        }
        Command::Normalize { file, output } => {
            let normalizer = build_normalizer(config.normalizer.as_ref())?;
            normalize(file.as_deref(), &normalizer, output.as_deref())
        }
        Command::Fragments {
            pdf,
            output,
            header_exclusion,
            footer_exclusion,
        } => {
            let source = build_source(&config, header_exclusion, footer_exclusion);
            dump_fragments(source, pdf, output).await
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the MuPDF source: flag > `[pdf]` config section > built-in ratio.
fn build_source(
    config: &ConfigFile,
    header_exclusion: Option<f32>,
    footer_exclusion: Option<f32>,
) -> MupdfSource {
    let pdf_config = config.pdf.clone().unwrap_or_default();
    MupdfSource::new()
        .with_header_exclusion(
            header_exclusion
                .or(pdf_config.header_exclusion)
                .unwrap_or(0.04),
        )
        .with_footer_exclusion(
            footer_exclusion
                .or(pdf_config.footer_exclusion)
                .unwrap_or(0.05),
        )
}

/// Build the normalizer from the `[normalizer]` config section.
fn build_normalizer(section: Option<&NormalizerSection>) -> anyhow::Result<Normalizer> {
    let Some(section) = section else {
        return Ok(Normalizer::default());
    };

    let mut builder = NormalizerConfigBuilder::new();
    if let Some(pattern) = &section.symbol_pattern {
        builder = builder.symbol_pattern(pattern);
    }
    if let Some(headers) = &section.section_headers {
        builder = builder.set_section_headers(headers.clone());
    }
    for header in section.extra_section_headers.iter().flatten() {
        builder = builder.add_section_header(header.clone());
    }
    if let Some(suffixes) = &section.compound_suffixes {
        builder = builder.set_compound_suffixes(suffixes.clone());
    }
    for suffix in section.extra_compound_suffixes.iter().flatten() {
        builder = builder.add_compound_suffix(suffix.clone());
    }
    let normalizer_config = builder
        .build()
        .context("invalid [normalizer] configuration")?;

    let steps = match &section.steps {
        Some(names) => names
            .iter()
            .map(|name| name.parse::<Step>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid [normalizer] steps")?,
        None => Step::DEFAULT_ORDER.to_vec(),
    };

    Ok(Normalizer::with_steps(normalizer_config, steps)?)
}

fn build_pipeline(
    config: &ConfigFile,
    page_separator: Option<String>,
    raw: bool,
) -> anyhow::Result<TextPipeline> {
    let separator = page_separator
        .or_else(|| std::env::var("REFLOW_PAGE_SEPARATOR").ok())
        .or_else(|| {
            config
                .output
                .as_ref()
                .and_then(|o| o.page_separator.clone())
        })
        .unwrap_or_else(|| DEFAULT_PAGE_SEPARATOR.to_string());
    let normalizer = build_normalizer(config.normalizer.as_ref())?;
    Ok(TextPipeline::new(normalizer)
        .with_separator(separator)
        .raw(raw))
}

/// Extract every page on the blocking pool, then reassemble in page order.
async fn extract(
    source: MupdfSource,
    pdf: PathBuf,
    pipeline: TextPipeline,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let source = Arc::new(source);
    let pipeline = Arc::new(pipeline);

    let page_count = {
        let source = Arc::clone(&source);
        let path = pdf.clone();
        tokio::task::spawn_blocking(move || source.page_count(&path))
            .await
            .context("page count task failed")?
            .with_context(|| format!("failed to open {}", pdf.display()))?
    };
    tracing::info!(path = %pdf.display(), pages = page_count, "extracting");

    let mut tasks = JoinSet::new();
    for index in 0..page_count {
        let source = Arc::clone(&source);
        let pipeline = Arc::clone(&pipeline);
        let path = pdf.clone();
        tasks.spawn_blocking(move || {
            let fragments = source.page_fragments(&path, index)?;
            Ok::<_, reflow_core::BackendError>((index, pipeline.process_page(&fragments)))
        });
    }

    let mut assembler = pipeline.assembler();
    while let Some(joined) = tasks.join_next().await {
        let (index, text) = joined
            .context("page task failed")?
            .with_context(|| format!("failed to extract {}", pdf.display()))?;
        tracing::debug!(page = index, chars = text.len(), "page done");
        assembler.insert(index, text);
    }

    write_output(output.as_deref(), &assembler.finish())
}

fn reconstruct(json: &Path, pipeline: &TextPipeline, output: Option<&Path>) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(json)
        .with_context(|| format!("failed to read {}", json.display()))?;
    let dump: FragmentDump = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a fragment dump", json.display()))?;
    let pages = dump.into_pages();
    tracing::info!(pages = pages.len(), "reconstructing");
    write_output(output, &pipeline.process_pages(&pages))
}

fn normalize(file: Option<&Path>, normalizer: &Normalizer, output: Option<&Path>) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    write_output(output, &normalizer.normalize(&text))
}

async fn dump_fragments(
    source: MupdfSource,
    pdf: PathBuf,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let path = pdf.clone();
    let pages = tokio::task::spawn_blocking(move || source.document_fragments(&path))
        .await
        .context("extraction task failed")?
        .with_context(|| format!("failed to extract {}", pdf.display()))?;
    let json = serde_json::to_string_pretty(&pages)?;
    write_output(output.as_deref(), &json)
}

fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_core::config_file::PdfConfig;

    #[test]
    fn test_build_source_precedence() {
        let defaults = build_source(&ConfigFile::default(), None, None);
        assert_eq!(defaults.header_exclusion(), Some(0.04));
        assert_eq!(defaults.footer_exclusion(), Some(0.05));

        let config = ConfigFile {
            pdf: Some(PdfConfig {
                header_exclusion: Some(0.0),
                footer_exclusion: Some(0.1),
            }),
            ..Default::default()
        };
        let from_config = build_source(&config, None, None);
        assert_eq!(from_config.header_exclusion(), None);
        assert_eq!(from_config.footer_exclusion(), Some(0.1));

        let from_flags = build_source(&config, Some(0.2), Some(0.0));
        assert_eq!(from_flags.header_exclusion(), Some(0.2));
        assert_eq!(from_flags.footer_exclusion(), None);
    }
}
