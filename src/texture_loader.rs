use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use exif::{In, Reader, Tag, Value};
use log::{debug, warn};
use raylib::prelude::*;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_supported_image(path: &Path) -> bool {
    IMAGE_EXTENSIONS.contains(&extension_of(path).as_str())
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no image files found in directory {}", dir_path.display()),
        ))
    } else {
        Ok(paths)
    }
}

fn exif_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(orientation) = values.first() {
                        return *orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            // Not fatal, the image is shown unrotated
            warn!("could not read EXIF data for {}: {}", image_path.display(), e);
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("failed to read {}", image_path.display()))?;

    // EXIF is only reliable for JPEG
    let extension = extension_of(image_path);
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &file_bytes)
        .map_err(|e| anyhow!("failed to decode {}: {}", image_path.display(), e))?;

    // 1 = normal, 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are shown as is.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!("applied EXIF orientation {} to {}", orientation, image_path.display());
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture for {}: {}", image_path.display(), e))?;

    Ok(texture)
}

/// Textures for every image a strip may show, loaded once up front.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<PathBuf, Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads each path not already cached. Returns how many failed.
    pub fn preload<'a>(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        paths: impl IntoIterator<Item = &'a PathBuf>,
    ) -> usize {
        let mut failed = 0;
        for path in paths {
            if self.textures.contains_key(path) {
                continue;
            }
            match load_texture_with_exif_rotation(rl, thread, path) {
                Ok(texture) => {
                    self.textures.insert(path.clone(), texture);
                }
                Err(e) => {
                    warn!("skipping image: {:#}", e);
                    failed += 1;
                }
            }
        }
        failed
    }

    pub fn get(&self, path: &Path) -> Option<&Texture2D> {
        self.textures.get(path)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_image(Path::new("a/b/photo.JPG")));
        assert!(is_supported_image(Path::new("still.png")));
        assert!(!is_supported_image(Path::new("clip.mp4")));
        assert!(!is_supported_image(Path::new("README")));
    }

    #[test]
    fn directory_listing_is_sorted_and_filtered() {
        let dir = tempdir().expect("failed to create temp dir");
        for name in ["02.png", "01.jpg", "notes.txt", "03.gif"] {
            fs::write(dir.path().join(name), b"").expect("failed to write file");
        }
        fs::create_dir(dir.path().join("nested.png")).expect("failed to create dir");

        let paths = load_sorted_image_paths(dir.path()).expect("listing should succeed");
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["01.jpg", "02.png", "03.gif"]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let err = load_sorted_image_paths(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
