//! Per-request translation options and the form payload they are written into

use serde::Serialize;

use crate::core::models::{Formal, Language, SplitSentence, TagHandling};

/// Ordered form fields of a `/translate` request
///
/// Serializes as a sequence of pairs, so repeated fields stay repeated on the
/// wire instead of being merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormPayload {
    fields: Vec<(&'static str, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `key` with `value`, appending if absent
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.fields[first].1 = value;
                let mut index = 0;
                self.fields.retain(|(k, _)| {
                    let keep = index <= first || *k != key;
                    index += 1;
                    keep
                });
            }
            None => self.fields.push((key, value)),
        }
    }

    /// Append another value under `key`
    pub fn add(&mut self, key: &'static str, value: impl Into<String>) {
        self.fields.push((key, value.into()));
    }

    /// First value of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values of `key`, in insertion order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Optional modifiers for a translation request
///
/// Every setter overwrites the previous value of its field, so the last call
/// wins.
///
/// ```
/// use deepl_client::{Formal, Language, TranslateOptions};
///
/// let options = TranslateOptions::new()
///     .source_lang(Language::ENGLISH)
///     .formality(Formal::Less)
///     .preserve_formatting(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    source_lang: Option<Language>,
    split_sentences: Option<SplitSentence>,
    preserve_formatting: Option<bool>,
    formality: Option<Formal>,
    tag_handling: Option<TagHandling>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language of the input text; detected by the API when unset
    pub fn source_lang(mut self, lang: impl Into<Language>) -> Self {
        self.source_lang = Some(lang.into());
        self
    }

    pub fn split_sentences(mut self, split: SplitSentence) -> Self {
        self.split_sentences = Some(split);
        self
    }

    pub fn preserve_formatting(mut self, preserve: bool) -> Self {
        self.preserve_formatting = Some(preserve);
        self
    }

    pub fn formality(mut self, formal: Formal) -> Self {
        self.formality = Some(formal);
        self
    }

    pub fn tag_handling(mut self, handling: TagHandling) -> Self {
        self.tag_handling = Some(handling);
        self
    }

    /// Write the configured fields into `payload`, overriding existing values
    pub fn apply(&self, payload: &mut FormPayload) {
        if let Some(lang) = &self.source_lang {
            payload.set("source_lang", lang.code());
        }
        if let Some(split) = self.split_sentences {
            payload.set("split_sentences", split.value());
        }
        if let Some(preserve) = self.preserve_formatting {
            payload.set("preserve_formatting", bool_string(preserve));
        }
        if let Some(formal) = self.formality {
            payload.set("formality", formal.value());
        }
        if let Some(handling) = self.tag_handling {
            payload.set("tag_handling", handling.value());
        }
    }
}

fn bool_string(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}
