//! Embedded image extraction
//!
//! Images live in the .docx archive under `word/media/`. They are copied
//! into the site's assets directory, prefixed with the content key and the
//! document's file stem so two documents never write the same file name.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::content::ContentKey;
use crate::error::Result;

const MEDIA_PREFIX: &str = "word/media/";

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedImage {
    /// Entry name inside the archive, e.g. `word/media/image1.png`
    pub source: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ImageExtractor {
    assets_dir: PathBuf,
}

impl ImageExtractor {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Copy every supported image out of `docx_path`, in archive order
    ///
    /// Only an unreadable archive is an error; a single entry that cannot be
    /// read or written is logged and skipped.
    pub fn extract_images_from_docx(
        &self,
        docx_path: &Path,
        key: ContentKey,
    ) -> Result<Vec<ExtractedImage>> {
        let document_stem = docx_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("document");
        let file = File::open(docx_path)?;
        let mut archive = ZipArchive::new(file)?;
        let mut images = Vec::new();

        for index in 0..archive.len() {
            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("could not read archive entry {index}: {err}");
                    continue;
                }
            };

            let name = entry.name().to_string();
            if entry.is_dir() || !name.starts_with(MEDIA_PREFIX) {
                continue;
            }

            let mut bytes = Vec::new();
            if let Err(err) = entry.read_to_end(&mut bytes) {
                tracing::warn!("could not read image {name}: {err}");
                continue;
            }

            let Some(extension) = image_extension(&name, &bytes) else {
                tracing::debug!("skipping unsupported media {name}");
                continue;
            };

            let path = self
                .assets_dir
                .join(output_file_name(key, document_stem, &name, extension));
            match fs::write(&path, &bytes) {
                Ok(()) => images.push(ExtractedImage { source: name, path }),
                Err(err) => tracing::warn!("could not write image {}: {err}", path.display()),
            }
        }

        Ok(images)
    }
}

/// Supported extension for a media entry: png, jpeg/jpg or gif
///
/// The entry name decides when it carries a known extension, otherwise the
/// bytes are sniffed.
pub(crate) fn image_extension(name: &str, bytes: &[u8]) -> Option<&'static str> {
    let from_name = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    match from_name.as_deref() {
        Some("png") => return Some("png"),
        Some("jpg") => return Some("jpg"),
        Some("jpeg") => return Some("jpeg"),
        Some("gif") => return Some("gif"),
        _ => {}
    }

    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Png => Some("png"),
        image::ImageFormat::Jpeg => Some("jpg"),
        image::ImageFormat::Gif => Some("gif"),
        _ => None,
    }
}

/// `<key>_<document stem>_<media stem>.<ext>`, reduced to filename-safe chars
pub(crate) fn output_file_name(
    key: ContentKey,
    document_stem: &str,
    entry_name: &str,
    extension: &str,
) -> String {
    let media_stem = Path::new(entry_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("image");

    format!(
        "{key}_{}_{}.{extension}",
        sanitize(document_stem),
        sanitize(media_stem)
    )
}

fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
