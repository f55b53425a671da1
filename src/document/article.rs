//! Assembly of classified paragraphs into an [`Article`]
//!
//! A single linear pass:
//! - the first Title/Heading 1 becomes the article title
//! - plain text before the first section accumulates into the intro
//! - every other heading opens a new section
//! - plain text, list items and quotes land in the open section, with
//!   repeated paragraphs joined by a blank line

use super::models::{DocParagraph, ParagraphKind};
use crate::content::models::{append_paragraph, Article, ContentKey, Section};

/// Layout the article is assembled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleKind {
    Generic,
    /// Lists before the first section become the home page bullets
    Home,
}

impl ArticleKind {
    pub fn for_key(key: ContentKey) -> Self {
        match key {
            ContentKey::Home => ArticleKind::Home,
            _ => ArticleKind::Generic,
        }
    }
}

#[derive(Debug)]
pub struct ArticleBuilder {
    kind: ArticleKind,
    article: Article,
    current: Option<Section>,
}

impl ArticleBuilder {
    pub fn new(kind: ArticleKind) -> Self {
        Self {
            kind,
            article: Article::default(),
            current: None,
        }
    }

    pub fn push(&mut self, paragraph: &DocParagraph) {
        let text = paragraph.text.as_str();
        if text.is_empty() {
            return;
        }

        match paragraph.kind {
            ParagraphKind::Title | ParagraphKind::Heading(1) if self.article.title.is_none() => {
                self.article.title = Some(text.to_string());
            }
            ParagraphKind::Title | ParagraphKind::Heading(_) => {
                self.flush_section();
                self.current = Some(Section::with_heading(text));
            }
            ParagraphKind::Plain => match self.current.as_mut() {
                Some(section) => append_paragraph(&mut section.body, text),
                None => append_paragraph(&mut self.article.intro, text),
            },
            ParagraphKind::ListItem => {
                if self.current.is_none() && self.kind == ArticleKind::Home {
                    self.article.bullets.push(text.to_string());
                } else {
                    self.open_section().list.push(text.to_string());
                }
            }
            ParagraphKind::Quote => {
                append_paragraph(&mut self.open_section().quote, text);
            }
            ParagraphKind::Caption => {
                if self.article.image_caption.is_none() {
                    self.article.image_caption = Some(text.to_string());
                }
            }
        }
    }

    pub fn finish(mut self) -> Article {
        self.flush_section();
        self.article
    }

    /// The open section, or a new anonymous one
    fn open_section(&mut self) -> &mut Section {
        self.current.get_or_insert_with(Section::default)
    }

    fn flush_section(&mut self) {
        if let Some(section) = self.current.take() {
            if !section.is_empty() {
                self.article.sections.push(section);
            }
        }
    }
}

pub fn build_article(paragraphs: &[DocParagraph], kind: ArticleKind) -> Article {
    let mut builder = ArticleBuilder::new(kind);
    for paragraph in paragraphs {
        builder.push(paragraph);
    }
    builder.finish()
}
