//! Building an ICO file from a resolved configuration.

use crate::error::{Error, Result};
use crate::icondir::{IconDir, IconDirEntry};
use crate::iconsize::ICON_SIZES;
use crate::options::ResolvedConfig;
use crate::source;
use std::fs;
use std::path::PathBuf;

//===========================================================================//

/// Builds an icon with one entry per size in [`ICON_SIZES`], in that
/// order, each letterboxed from the source image configured for its size.
pub fn build_icon(config: &ResolvedConfig) -> Result<IconDir> {
    let mut icon_dir = IconDir::new();
    for &size in ICON_SIZES.iter() {
        let path = config.source_for(size)?;
        let image = source::load_image(path)?;
        let bitmap = source::letterbox(&image, size.pixels());
        let entry = IconDirEntry::encode(&bitmap)?;
        log::debug!(
            "Adding {}x{} entry from {} ({} bytes)",
            entry.width(),
            entry.height(),
            path.display(),
            entry.data().len()
        );
        icon_dir.add_entry(entry);
    }
    Ok(icon_dir)
}

/// Builds the icon described by `config` and writes it to the configured
/// output path, which is returned.  A default image is required even when
/// every size has an override.  Nothing is written unless every image was
/// loaded and encoded.
pub fn run(config: &ResolvedConfig) -> Result<PathBuf> {
    config.default_path()?;
    let output = config.output_path()?;
    let icon_dir = build_icon(config)?;
    let bytes = icon_dir.to_bytes()?;
    fs::write(&output, &bytes)
        .map_err(|source| Error::Write { path: output.clone(), source })?;
    log::info!(
        "Wrote {} ({} images, {} bytes)",
        output.display(),
        icon_dir.entries().len(),
        bytes.len()
    );
    Ok(output)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{build_icon, run};
    use crate::error::Error;
    use crate::options::resolve;
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    fn save_png(path: &Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn entries_follow_icon_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        save_png(&path, 64, 40);
        let config = resolve(&[path.to_str().unwrap()]).unwrap();
        let icon_dir = build_icon(&config).unwrap();
        let sizes: Vec<(u32, u32)> = icon_dir
            .entries()
            .iter()
            .map(|entry| (entry.width(), entry.height()))
            .collect();
        assert_eq!(sizes, vec![(16, 16), (32, 32), (48, 48), (256, 256)]);
    }

    #[test]
    fn missing_override_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("logo.png");
        save_png(&default, 20, 20);
        let missing = dir.path().join("missing.png");
        let config = resolve(&[
            "-48",
            missing.to_str().unwrap(),
            default.to_str().unwrap(),
        ])
        .unwrap();
        match run(&config) {
            Err(Error::MissingFile(path)) => assert_eq!(path, missing),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!dir.path().join("logo.ico").exists());
    }

    #[test]
    fn overrides_without_default_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("logo.png");
        save_png(&source, 20, 20);
        let output = dir.path().join("out.ico");
        let config = resolve(&[
            "-16,32,48,256",
            source.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        match run(&config) {
            Err(Error::Usage(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!output.exists());
    }

    #[test]
    fn missing_default_reported_before_missing_override() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.png");
        let output = dir.path().join("out.ico");
        let config = resolve(&[
            "-16",
            absent.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        assert!(matches!(run(&config), Err(Error::Usage(_))));
        assert!(!output.exists());
    }

    #[test]
    fn write_failure_names_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("logo.png");
        save_png(&source, 20, 20);
        let output = dir.path().join("no-such-dir").join("out.ico");
        let config = resolve(&[
            "-o",
            output.to_str().unwrap(),
            source.to_str().unwrap(),
        ])
        .unwrap();
        match run(&config) {
            Err(error @ Error::Write { .. }) => {
                let message = error.to_string();
                assert!(message.contains("out.ico"), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

//===========================================================================//
