//! qreye command-line entrypoint

use anyhow::{Context, bail};
use clap::Parser;
use qreye::output::{self, svg};
use qreye::{EcLevel, OutputFormat, QreyeConfig, Renderer, logging};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qreye",
    version,
    about = "Render a payload as a stylized QR code with rounded eyes and a logo zone"
)]
struct Cli {
    /// Text to encode (e.g. a wallet-connect URI)
    payload: String,

    /// Optional configuration file (toml/yaml). Defaults to qreye.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Shape area width/height in pixels
    #[arg(long, value_name = "PX")]
    size: Option<f64>,

    /// Logo side in pixels; sizes the clear zone
    #[arg(long, value_name = "PX")]
    logo_size: Option<f64>,

    /// Error correction level (L, M, Q, H)
    #[arg(long, value_name = "LEVEL")]
    ec_level: Option<String>,

    /// Color of eyes, dots and lines
    #[arg(long, value_name = "COLOR")]
    color: Option<String>,

    /// Output format (`svg`, `png` or `json`)
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Write to this file instead of stdout (required for png)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Drop the background card and its padding
    #[arg(long)]
    no_background: bool,

    /// Logo image reference embedded in SVG output
    #[arg(long, value_name = "HREF")]
    logo_href: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = QreyeConfig::load(cli.config.as_deref())?;

    if let Some(size) = cli.size {
        config.output.size = size;
    }
    if let Some(logo_size) = cli.logo_size {
        config.output.logo_size = logo_size;
    }
    if let Some(ref level) = cli.ec_level {
        let level: EcLevel = level.parse()?;
        config.style.ec_level = Some(level.to_string());
    }
    if let Some(ref color) = cli.color {
        config.style.dot_color = Some(color.clone());
    }
    if let Some(ref format) = cli.format {
        config.output.format = format.parse::<OutputFormat>().map_err(anyhow::Error::msg)?;
    } else if let Some(ext) = cli.output.as_ref().and_then(|p| p.extension()) {
        if let Some(format) = ext.to_str().and_then(OutputFormat::parse) {
            config.output.format = format;
        }
    }
    if cli.no_background {
        config.output.background = None;
        config.output.padding = 0.0;
    }
    if let Some(ref href) = cli.logo_href {
        config.output.logo_href = Some(href.clone());
    }

    logging::init(&config.logging)?;

    let style = config.render_style()?;
    info!(?style, format = %config.output.format, "Rendering QR code");

    let renderer = Renderer::with_style(style);
    let graphic = renderer
        .render_graphic(&cli.payload, config.output.size, config.output.logo_size)
        .context("failed to render payload")?;

    match config.output.format {
        OutputFormat::Svg => {
            let document = svg::to_svg(&graphic, &config.output.svg_options());
            emit_text(cli.output.as_deref(), &document)?;
        }
        OutputFormat::Json => {
            let document = output::to_json(&graphic)?;
            emit_text(cli.output.as_deref(), &document)?;
        }
        OutputFormat::Png => {
            let Some(path) = cli.output.as_deref() else {
                bail!("png output needs --output <PATH>");
            };
            write_png(&graphic, &config, path)?;
        }
    }

    Ok(())
}

fn emit_text(path: Option<&Path>, document: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = document.len(), "Wrote document");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(feature = "raster")]
fn write_png(graphic: &qreye::QrGraphic, config: &QreyeConfig, path: &Path) -> anyhow::Result<()> {
    let image = output::raster::to_image(graphic, &config.output.raster_options())?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), width = image.width(), "Wrote raster");
    Ok(())
}

#[cfg(not(feature = "raster"))]
fn write_png(_graphic: &qreye::QrGraphic, _config: &QreyeConfig, _path: &Path) -> anyhow::Result<()> {
    bail!("png output requires the `raster` feature")
}
