use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use json_pretty_compact::PrettyCompactFormatter;
use log::{info, warn};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Serializer;

use crate::{
    common::Color,
    config::OutputPaths,
    image::{Image, Raster},
    serialize::Artifacts,
};

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create {}", parent.display()))?;
        }
    }
    Ok(())
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    info!("Saving {}", path.display());
    let formatter = PrettyCompactFormatter::new();
    let mut data_bytes = vec![];
    let mut ser = Serializer::with_formatter(&mut data_bytes, formatter);
    data.serialize(&mut ser)?;
    create_parent_dir(path)?;
    fs::write(path, &data_bytes)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading {}", path.display());
    let data_bytes =
        fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    let data: T = serde_json::from_slice(&data_bytes)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(data)
}

/// Loads a PNG as 8-bit truecolor. Alpha is ignored.
pub fn load_png(path: &Path) -> Result<Image> {
    info!("Loading {}", path.display());
    let file = File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;
    let mut decoder = png::Decoder::new(file);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;

    let channels = match frame.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => bail!("{}: indexed color was not expanded", path.display()),
    };
    let (width, height) = (frame.width, frame.height);
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for line in buf[..frame.buffer_size()]
        .chunks(frame.line_size)
        .take(height as usize)
    {
        for px in line.chunks_exact(channels).take(width as usize) {
            pixels.push(if channels < 3 {
                Color::new(px[0], px[0], px[0])
            } else {
                Color::new(px[0], px[1], px[2])
            });
        }
    }
    Image::from_pixels(width, height, pixels)
        .with_context(|| format!("{}: truncated image data", path.display()))
}

pub fn save_png(path: &Path, image: &Image) -> Result<()> {
    info!("Saving {}", path.display());
    create_parent_dir(path)?;
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.to_rgb_bytes())?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn remove_all<'a>(paths: impl IntoIterator<Item = &'a Path>) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!("Unable to remove {}: {}", path.display(), e);
        }
    }
}

/// Writes all three artifacts or none of them. Each file is staged next to its
/// destination and only renamed into place once every stage has succeeded.
pub fn save_artifacts(paths: &OutputPaths, artifacts: &Artifacts) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = vec![];
    for (path, bytes) in [
        (&paths.palette, &artifacts.palette),
        (&paths.patterns, &artifacts.patterns),
        (&paths.name_table, &artifacts.name_table),
    ] {
        let tmp = staging_path(path);
        let written = create_parent_dir(path).and_then(|_| {
            fs::write(&tmp, bytes).with_context(|| format!("Unable to write {}", tmp.display()))
        });
        if let Err(e) = written {
            remove_all(staged.iter().map(|(tmp, _)| tmp.as_path()));
            return Err(e);
        }
        staged.push((tmp, path.as_path()));
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        info!("Saving {}", path.display());
        if let Err(e) = fs::rename(tmp, path) {
            remove_all(staged[..i].iter().map(|(_, path)| *path));
            remove_all(staged[i..].iter().map(|(tmp, _)| tmp.as_path()));
            return Err(e).with_context(|| format!("Unable to write {}", path.display()));
        }
    }
    Ok(())
}

pub fn load_artifacts(paths: &OutputPaths) -> Result<Artifacts> {
    let read = |path: &Path| -> Result<Vec<u8>> {
        info!("Loading {}", path.display());
        fs::read(path).with_context(|| format!("Unable to read {}", path.display()))
    };
    Ok(Artifacts {
        palette: read(&paths.palette)?,
        patterns: read(&paths.patterns)?,
        name_table: read(&paths.name_table)?,
    })
}
