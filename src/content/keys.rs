//! Filename to content key resolution

use std::io::{self, BufRead, Write};

use super::models::ContentKey;

/// Built-in keyword table, consulted in order; the first hit wins
pub const KEYWORD_TABLE: &[(&str, ContentKey)] = &[
    ("maps", ContentKey::Maps),
    ("location", ContentKey::Maps),
    ("cartographer", ContentKey::Maps),
    ("tectonic", ContentKey::Tectonics),
    ("earthquake", ContentKey::Tectonics),
    ("volcano", ContentKey::Tectonics),
    ("weathering", ContentKey::Weathering),
    ("erosion", ContentKey::Weathering),
    ("mass", ContentKey::Weathering),
    ("fluvial", ContentKey::Fluvial),
    ("ocean", ContentKey::Fluvial),
    ("coastline", ContentKey::Fluvial),
    ("climate", ContentKey::Climate),
    ("biome", ContentKey::Climate),
    ("about", ContentKey::About),
    ("home", ContentKey::Home),
    ("reference", ContentKey::References),
];

/// Case-insensitive substring matcher over the keyword table plus any
/// configured extras (appended after the built-ins)
#[derive(Debug, Clone)]
pub struct KeyResolver {
    rules: Vec<(String, ContentKey)>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self {
            rules: KEYWORD_TABLE
                .iter()
                .map(|(keyword, key)| (keyword.to_string(), *key))
                .collect(),
        }
    }
}

impl KeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (S, ContentKey)>,
        S: Into<String>,
    {
        self.rules.extend(
            rules
                .into_iter()
                .map(|(keyword, key)| (keyword.into().to_lowercase(), key))
                .filter(|(keyword, _)| !keyword.is_empty()),
        );
        self
    }

    pub fn resolve(&self, file_name: &str) -> Option<ContentKey> {
        let name = file_name.to_lowercase();
        self.rules
            .iter()
            .find(|(keyword, _)| name.contains(keyword.as_str()))
            .map(|(_, key)| *key)
    }
}

/// Asks the operator for a key when the filename matches nothing
pub trait KeyPrompt {
    /// `None` means skip the document
    fn ask(&mut self, file_name: &str) -> Option<ContentKey>;
}

/// Never asks; unmatched documents are skipped
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl KeyPrompt for NoPrompt {
    fn ask(&mut self, _file_name: &str) -> Option<ContentKey> {
        None
    }
}

/// Line-oriented prompt over any reader/writer pair (stdin/stdout in the CLI)
pub struct InteractivePrompt<R, W> {
    input: R,
    output: W,
}

impl InteractivePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt_once(&mut self, file_name: &str) -> io::Result<Option<String>> {
        writeln!(
            self.output,
            "  Could not determine content key from filename '{file_name}'"
        )?;
        writeln!(self.output, "  Available keys: {}", ContentKey::vocabulary())?;
        write!(
            self.output,
            "  Enter content key for this document (or press Enter to skip): "
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> KeyPrompt for InteractivePrompt<R, W> {
    fn ask(&mut self, file_name: &str) -> Option<ContentKey> {
        loop {
            let answer = match self.prompt_once(file_name) {
                Ok(Some(answer)) => answer,
                Ok(None) => return None,
                Err(err) => {
                    tracing::warn!("failed to read operator input: {err}");
                    return None;
                }
            };

            if answer.is_empty() {
                return None;
            }

            match answer.parse::<ContentKey>() {
                Ok(key) => return Some(key),
                Err(err) => {
                    let _ = writeln!(self.output, "  {err}");
                }
            }
        }
    }
}
