//! Seeding Word documents from existing HTML pages
//!
//! The site's hand-written pages are turned into .docx files whose paragraph
//! styles are exactly the ones the extractor classifies, so authors can
//! continue in Word and feed the result back through `docsite`.

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::document::cleanup::normalize_whitespace;

/// Content root candidates, most specific first
static CONTENT_ROOTS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article", "main", "body"]
        .iter()
        .map(|tag| Selector::parse(tag).unwrap())
        .collect()
});

/// Short blocks containing one of these are site chrome, not content
const NAVIGATION_MARKERS: [&str; 7] = [
    "home",
    "about",
    "references",
    "earth processes",
    "copyright",
    "arizona study",
    "©",
];
const NAVIGATION_MAX_CHARS: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write document: {0}")]
    Pack(String),

    #[error("cannot read HTML directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Heading(u8),
    Paragraph,
    ListItem,
    Quote,
    /// Loose text between blocks
    Text,
}

impl BlockTag {
    fn from_tag(name: &str) -> Option<Self> {
        match name {
            "p" => Some(BlockTag::Paragraph),
            "li" => Some(BlockTag::ListItem),
            "blockquote" => Some(BlockTag::Quote),
            _ => {
                let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
                (1..=6).contains(&level).then_some(BlockTag::Heading(level))
            }
        }
    }

    /// Paragraph style id written to the document
    pub fn style_id(&self) -> Option<String> {
        match self {
            BlockTag::Heading(level) => Some(format!("Heading{level}")),
            BlockTag::Quote => Some("Quote".to_string()),
            BlockTag::ListItem => Some("ListBullet".to_string()),
            BlockTag::Paragraph | BlockTag::Text => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub tag: BlockTag,
    pub text: String,
}

/// Pick the content root: first `<article>`, else `<main>`, else `<body>`
fn content_root(document: &Html) -> ElementRef<'_> {
    CONTENT_ROOTS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .unwrap_or_else(|| document.root_element())
}

#[derive(Default)]
struct BlockCollector {
    blocks: Vec<Block>,
    text: String,
}

impl BlockCollector {
    fn flush(&mut self, tag: BlockTag) {
        let text = normalize_whitespace(&std::mem::take(&mut self.text));
        if !text.is_empty() {
            self.blocks.push(Block { tag, text });
        }
    }

    fn children(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.text.push_str(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        match name {
            "script" | "style" | "template" | "noscript" => {}
            "br" => self.text.push(' '),
            _ => match BlockTag::from_tag(name) {
                Some(tag) => {
                    self.flush(BlockTag::Text);
                    self.children(element);
                    self.flush(tag);
                }
                None => self.children(element),
            },
        }
    }
}

/// Split a page into its text blocks, in document order
///
/// Comments never reach the text and entities arrive decoded.
pub fn extract_blocks(html: &str) -> Vec<Block> {
    let document = Html::parse_document(html);

    let mut collector = BlockCollector::default();
    collector.children(content_root(&document));
    collector.flush(BlockTag::Text);

    collector.blocks
}

pub fn is_navigation(text: &str) -> bool {
    let lower = text.to_lowercase();
    text.chars().count() < NAVIGATION_MAX_CHARS
        && NAVIGATION_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn styles() -> Vec<Style> {
    let mut styles: Vec<Style> = (1..=6)
        .map(|level| {
            Style::new(format!("Heading{level}"), StyleType::Paragraph)
                .name(format!("Heading {level}"))
                .size(40 - level * 4)
                .bold()
        })
        .collect();
    styles.push(
        Style::new("Quote", StyleType::Paragraph)
            .name("Quote")
            .italic(),
    );
    styles.push(Style::new("ListBullet", StyleType::Paragraph).name("List Bullet"));
    styles
}

/// Build a document from blocks, skipping navigation-like text
pub fn build_docx(blocks: &[Block]) -> Docx {
    let mut docx = styles()
        .into_iter()
        .fold(Docx::new(), |docx, style| docx.add_style(style));

    for block in blocks.iter().filter(|block| !is_navigation(&block.text)) {
        let mut paragraph = Paragraph::new().add_run(Run::new().add_text(block.text.as_str()));
        if let Some(style) = block.tag.style_id() {
            paragraph = paragraph.style(&style);
        }
        docx = docx.add_paragraph(paragraph);
    }

    docx
}

pub fn write_docx(blocks: &[Block], path: &Path) -> Result<(), SeedError> {
    let file = File::create(path)?;
    build_docx(blocks)
        .build()
        .pack(file)
        .map_err(|err| SeedError::Pack(err.to_string()))
}

#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub created: Vec<PathBuf>,
    pub failed: Vec<(String, String)>,
}

/// Convert every page in `html_dir` except `index.html` into `docs_dir/<stem>.docx`
pub fn seed_directory(html_dir: &Path, docs_dir: &Path) -> Result<SeedReport, SeedError> {
    let input_dir_error = |source| SeedError::InputDir {
        path: html_dir.to_path_buf(),
        source,
    };

    let mut pages = Vec::new();
    for entry in fs::read_dir(html_dir).map_err(input_dir_error)? {
        let path = entry.map_err(input_dir_error)?.path();
        let is_html = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        let is_index = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.eq_ignore_ascii_case("index.html"));
        if path.is_file() && is_html && !is_index {
            pages.push(path);
        }
    }
    pages.sort();

    fs::create_dir_all(docs_dir)?;

    let mut report = SeedReport::default();
    for page in pages {
        let name = page
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = page
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let target = docs_dir.join(format!("{stem}.docx"));

        let result = fs::read_to_string(&page)
            .map_err(SeedError::from)
            .and_then(|html| write_docx(&extract_blocks(&html), &target));

        match result {
            Ok(()) => {
                tracing::info!("created {}", target.display());
                report.created.push(target);
            }
            Err(err) => {
                tracing::warn!("error processing {name}: {err}");
                report.failed.push((name, err.to_string()));
            }
        }
    }

    Ok(report)
}
