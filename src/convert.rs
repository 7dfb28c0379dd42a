use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use log::{info, warn};

use crate::{
    config::{BatchConfig, OutputPaths},
    encoder::{encode, TileAssets},
    manifest::Manifest,
    persist::{load_artifacts, load_json, load_png, save_artifacts, save_json, save_png},
    preview::render,
    serialize::deserialize,
};

#[derive(Debug, Clone, Default)]
pub struct Extras {
    pub preview: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

/// Encodes one PNG and writes its artifacts. Nothing is written unless the
/// whole image encodes.
pub fn convert_file(input: &Path, outputs: &OutputPaths, extras: &Extras) -> Result<TileAssets> {
    let image = load_png(input)?;
    let assets =
        encode(&image).with_context(|| format!("Unable to encode {}", input.display()))?;
    save_artifacts(outputs, &assets.to_artifacts())?;
    if let Some(path) = &extras.preview {
        save_png(path, &render(&assets))?;
    }
    if let Some(path) = &extras.manifest {
        save_json(path, &Manifest::new(&input.display().to_string(), &assets))?;
    }
    Ok(assets)
}

/// Runs every job of a batch config. Returns the number of images converted.
pub fn run_batch(config_path: &Path) -> Result<usize> {
    let config: BatchConfig = load_json(config_path)?;
    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    let mut converted = 0;
    for job in &config.jobs {
        let pattern = job.input_pattern(base_dir);
        let output_dir = job.output_dir(base_dir);
        let mut matched = 0;
        for entry in glob::glob(&pattern).with_context(|| format!("Invalid pattern {pattern}"))? {
            let input = entry?;
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .with_context(|| format!("Unusable file name {}", input.display()))?
                .to_string();
            let extras = Extras {
                preview: job
                    .preview
                    .then(|| output_dir.join(format!("{stem}.preview.png"))),
                manifest: job
                    .manifest
                    .then(|| output_dir.join(format!("{stem}.json"))),
            };
            convert_file(&input, &OutputPaths::for_stem(&output_dir, &stem), &extras)?;
            matched += 1;
        }
        if matched == 0 {
            warn!("No images match {}", pattern);
        }
        converted += matched;
    }
    info!("Converted {} images", converted);
    Ok(converted)
}

/// Rebuilds an image from artifact files and saves it as PNG.
pub fn decode_files(inputs: &OutputPaths, width_tiles: u32, output: &Path) -> Result<()> {
    ensure!(width_tiles > 0, "width in tiles must be positive");
    let artifacts = load_artifacts(inputs)?;
    let assets = deserialize(&artifacts, width_tiles)?;
    save_png(output, &render(&assets))
}
