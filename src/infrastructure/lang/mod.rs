//! Localized strings
//!
//! Strings are addressed by identifier (by convention prefixed with `#`) and
//! resolved against the active language file, `<dir>/<code>.lang`:
//!
//! ```text
//! // comment
//! #pong = Pong!
//! #greeting = Hello %s
//! ```

mod format;

pub use format::{format_positional, FormatError};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::errors::LangError;

/// Extension of language files
pub const LANG_FILE_EXT: &str = "lang";

/// Used when the OS reports no usable locale
pub const FALLBACK_LANGUAGE: &str = "en_US";

/// Parse the contents of a language file.
pub fn parse(content: &str) -> HashMap<String, String> {
    let mut data = HashMap::new();

    for line in content.trim().lines() {
        if line.trim().starts_with("//") {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim().replace(' ', "_");
        data.insert(key, value.trim().to_string());
    }

    data
}

/// Best guess at the host's UI language, as `ll_CC`.
pub fn detect_language() -> String {
    let locale = locale_config::Locale::user_default();
    for (_category, tag) in locale.tags() {
        if let Some(code) = normalize_tag(tag.as_ref()) {
            return code;
        }
    }

    std::env::var("LANG")
        .ok()
        .and_then(|raw| normalize_tag(&raw))
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// `en-US`, `en_US.UTF-8` and `en_US@euro` all become `en_US`.
fn normalize_tag(raw: &str) -> Option<String> {
    let mut tag = raw.trim().to_string();
    if let Some(idx) = tag.find(['.', '@']) {
        tag.truncate(idx);
    }
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }

    let mut parts = tag.split(['-', '_']);
    let language = parts.next()?.to_ascii_lowercase();
    match parts.next() {
        Some(region) if !region.is_empty() => Some(format!("{}_{}", language, region.to_ascii_uppercase())),
        _ => Some(language),
    }
}

/// Active language and its translation table
#[derive(Debug, Clone)]
pub struct Translator {
    directory: PathBuf,
    language: String,
    translations: HashMap<String, String>,
}

impl Translator {
    /// Translator reading from `directory`, with no language loaded yet.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            language: String::new(),
            translations: HashMap::new(),
        }
    }

    /// Translator over an in-memory table.
    pub fn from_pairs(language: impl Into<String>, translations: HashMap<String, String>) -> Self {
        Self {
            directory: PathBuf::new(),
            language: language.into(),
            translations,
        }
    }

    /// Switch language. `None` picks the host's language.
    pub fn set_language(&mut self, code: Option<&str>) -> Result<(), LangError> {
        let code = match code {
            Some(code) => code.to_string(),
            None => detect_language(),
        };

        self.load(&code)?;
        self.language = code;
        Ok(())
    }

    /// Load `<dir>/<code>.lang`.
    ///
    /// A missing directory or file leaves no translations. A file that cannot
    /// be read leaves the previous table in place.
    pub fn load(&mut self, code: &str) -> Result<(), LangError> {
        if !self.directory.exists() {
            tracing::warn!("Path '{}' does not exist.", self.directory.display());
            self.translations.clear();
            return Ok(());
        }

        let path = self.directory.join(format!("{}.{}", code, LANG_FILE_EXT));
        if !path.exists() {
            tracing::warn!("Path '{}' does not exist.", path.display());
            self.translations.clear();
            return Ok(());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| LangError::Read {
            path: path.clone(),
            source,
        })?;

        self.translations = parse(&content);
        tracing::info!("Loaded {} translations for {}", self.translations.len(), code);
        Ok(())
    }

    /// Translation of `key`, or `key` itself.
    pub fn translate_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Translation of `key` formatted with `args`.
    ///
    /// An unmapped key comes back unchanged and `args` are dropped. A
    /// formatting failure returns the unformatted translation.
    pub fn translate_format<S: AsRef<str>>(&self, key: &str, args: &[S]) -> String {
        let Some(template) = self.translations.get(key) else {
            return key.to_string();
        };

        match format_positional(template, args) {
            Ok(formatted) => formatted,
            Err(e) => {
                tracing::debug!("Could not format '{}': {}", key, e);
                template.clone()
            }
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}
