//! Batch extraction of a directory of .docx files into the content store
//!
//! Files are processed one after another in sorted order. Each document is
//! parsed, given a content key, has its images copied out and is upserted
//! into the store, which is saved after every update. A failure in one
//! document is recorded in the report and never stops the batch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{ContentKey, ContentStore, KeyPrompt, KeyResolver};
use crate::document::{build_article, load_document, ArticleKind};
use crate::document::io::is_docx_candidate;
use crate::error::{ExtractError, Result};
use crate::image_extractor::ImageExtractor;

pub const DEFAULT_INPUT_DIR: &str = "word-docs";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const ASSETS_DIR: &str = "assets";
pub const CONTENT_FILE: &str = "content.json";

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub extract_images: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extract_images: true,
        }
    }
}

impl ExtractOptions {
    pub fn assets_dir(&self) -> PathBuf {
        self.output_dir.join(ASSETS_DIR)
    }

    /// `<output>/assets/content.json`
    pub fn content_path(&self) -> PathBuf {
        self.assets_dir().join(CONTENT_FILE)
    }
}

/// What happened to a single document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Updated { key: ContentKey, images: usize },
    /// No extractable text; the store was left alone
    Empty,
    /// No key could be determined
    Skipped,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub updated: Vec<(String, ContentKey)>,
    pub empty: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub images: usize,
    /// The input directory did not exist and was created empty
    pub created_input_dir: bool,
}

impl ExtractionReport {
    pub fn processed(&self) -> usize {
        self.updated.len() + self.empty.len() + self.skipped.len() + self.failed.len()
    }

    fn record(&mut self, name: String, outcome: DocumentOutcome) {
        match outcome {
            DocumentOutcome::Updated { key, images } => {
                self.images += images;
                self.updated.push((name, key));
            }
            DocumentOutcome::Empty => self.empty.push(name),
            DocumentOutcome::Skipped => self.skipped.push(name),
        }
    }
}

pub struct Extractor<P> {
    options: ExtractOptions,
    resolver: KeyResolver,
    prompt: P,
}

impl<P: KeyPrompt> Extractor<P> {
    pub fn new(options: ExtractOptions, resolver: KeyResolver, prompt: P) -> Self {
        Self {
            options,
            resolver,
            prompt,
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Process every document in the input directory
    ///
    /// A missing input directory is created and the run ends there. Fails
    /// only when the input directory cannot be created or listed, the assets
    /// directory cannot be created or the existing store is unreadable.
    pub fn run(&mut self) -> Result<ExtractionReport> {
        let mut report = ExtractionReport::default();

        let input_dir = &self.options.input_dir;
        if !input_dir.exists() {
            tracing::info!("creating input directory {}", input_dir.display());
            fs::create_dir_all(input_dir).map_err(|source| ExtractError::InputDir {
                path: input_dir.clone(),
                source,
            })?;
            report.created_input_dir = true;
            return Ok(report);
        }

        let documents = list_documents(input_dir)?;

        if documents.is_empty() {
            return Ok(report);
        }

        fs::create_dir_all(self.options.assets_dir())?;
        let content_path = self.options.content_path();
        let mut store = ContentStore::load(&content_path)?;

        tracing::info!("found {} Word document(s)", documents.len());

        for path in &documents {
            let name = display_name(path);
            tracing::info!("processing {name}");

            match self.process_document(path, &mut store) {
                Ok(outcome) => report.record(name, outcome),
                Err(err) => {
                    tracing::warn!("error processing '{name}': {err}");
                    report.failed.push((name, err.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// Extract one document into `store`, saving the store on success
    pub fn process_document(
        &mut self,
        path: &Path,
        store: &mut ContentStore,
    ) -> Result<DocumentOutcome> {
        let name = display_name(path);
        let document = load_document(path)?;

        if document.paragraphs.is_empty() {
            tracing::warn!("'{name}' contains no extractable text, leaving content store unchanged");
            return Ok(DocumentOutcome::Empty);
        }

        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&name);

        let key = match self.resolver.resolve(stem) {
            Some(key) => key,
            None => match self.prompt.ask(stem) {
                Some(key) => key,
                None => {
                    tracing::warn!(
                        "could not determine content key for '{name}', skipping (available keys: {})",
                        ContentKey::vocabulary()
                    );
                    return Ok(DocumentOutcome::Skipped);
                }
            },
        };

        let article = build_article(&document.paragraphs, ArticleKind::for_key(key));
        if article.is_empty() {
            tracing::warn!("'{name}' contains no extractable text, leaving content store unchanged");
            return Ok(DocumentOutcome::Empty);
        }

        let images = if self.options.extract_images {
            self.extract_images(path, key)
        } else {
            0
        };

        // Only a saved update reaches the in-memory store
        let mut updated = store.clone();
        updated.upsert(key, &article)?;
        updated.save(&self.options.content_path())?;
        *store = updated;
        tracing::info!("updated '{key}' from {name}");

        Ok(DocumentOutcome::Updated { key, images })
    }

    fn extract_images(&self, path: &Path, key: ContentKey) -> usize {
        let extractor = ImageExtractor::new(self.options.assets_dir());
        match extractor.extract_images_from_docx(path, key) {
            Ok(images) => {
                if !images.is_empty() {
                    tracing::info!("extracted {} image(s)", images.len());
                }
                images.len()
            }
            Err(err) => {
                tracing::warn!("could not extract images from {}: {err}", path.display());
                0
            }
        }
    }
}

/// Sorted list of the .docx files directly inside `dir`
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let input_dir_error = |source| ExtractError::InputDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir).map_err(input_dir_error)? {
        let path = entry.map_err(input_dir_error)?.path();
        if path.is_file() && is_docx_candidate(&path) {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
