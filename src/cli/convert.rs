use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use amiante_json::convert::{ConversionConfig, Converter, WrittenFile};

use super::Config;

/// Convert the export tables of a directory to JSON
pub fn run(
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let file_config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };
    let settings = file_config.conversion;

    // CLI flags override the config file, which overrides the defaults
    let input_dir = input_dir
        .or(settings.input_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let output_dir = output_dir
        .or(settings.output_dir)
        .unwrap_or_else(|| input_dir.clone());

    let mut config = ConversionConfig::in_dir(&input_dir);
    config.output_dir = output_dir;
    if let Some(sources) = settings.sources {
        config.sources = sources;
    }
    if let Some(merged_outputs) = settings.merged_outputs {
        config.merged_outputs = merged_outputs;
    }
    if settings.synthesis_json.is_some() {
        config.synthesis_json = settings.synthesis_json;
    }
    if settings.synthesis_html.is_some() {
        config.synthesis_html = settings.synthesis_html;
    }
    if settings.synthesis == Some(false) {
        config.synthesis_json = None;
        config.synthesis_html = None;
    }

    info!("amiante-json - LICIEL exports to JSON");
    info!("=====================================");

    let converter = Converter::with_config(config);
    let stats = converter
        .run_with_progress(print_written)
        .context("Conversion failed")?;

    for name in &stats.missing_sources {
        info!("  Missing source: {}", name);
    }

    Ok(())
}

fn print_written(written: &WrittenFile) {
    let file = written
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| written.path.display().to_string());

    #[cfg(feature = "colorized_output")]
    let count = console::style(written.count).bold().to_string();

    #[cfg(not(feature = "colorized_output"))]
    let count = written.count.to_string();

    println!("Wrote {} {} to {}", count, written.unit(), file);
}
