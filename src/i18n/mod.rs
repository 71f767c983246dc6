//! Internationalization for user-facing strings.
//!
//! English and Hebrew catalogs compiled into the binary, with simple
//! key-value lookup and `{ $arg }` substitution. Hebrew renders
//! right-to-left; the flag is exposed so a UI can switch direction.

use std::collections::HashMap;

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

impl Language {
    /// Get the language identifier string.
    pub fn id(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Hebrew => "he",
        }
    }

    /// Get the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hebrew => "עברית",
        }
    }

    /// Whether the language renders right-to-left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Hebrew)
    }

    /// Parse from a language identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.to_lowercase();
        if id.starts_with("en") {
            Some(Language::English)
        } else if id.starts_with("he") || id.starts_with("iw") {
            Some(Language::Hebrew)
        } else {
            None
        }
    }

    /// Get all supported languages.
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Hebrew]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Detect the system locale and return the best matching language.
pub fn detect_system_locale() -> Language {
    if let Some(locale) = sys_locale::get_locale() {
        if let Some(lang) = Language::from_id(&locale) {
            return lang;
        }
    }
    Language::English
}

/// Translation service holding the compiled-in catalogs.
///
/// Constructed once and passed where needed; there is no global store.
pub struct TranslationService {
    current_language: Language,
    translations: HashMap<Language, HashMap<String, String>>,
}

impl Default for TranslationService {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationService {
    /// Create a service with all catalogs loaded.
    pub fn new() -> Self {
        let mut translations = HashMap::new();
        for lang in Language::all() {
            let content = match lang {
                Language::English => include_str!("locales/en-US/main.ftl"),
                Language::Hebrew => include_str!("locales/he/main.ftl"),
            };
            translations.insert(*lang, parse_ftl(content));
        }

        Self {
            current_language: Language::English,
            translations,
        }
    }

    /// Get the current language.
    pub fn language(&self) -> Language {
        self.current_language
    }

    /// Set the current language.
    pub fn set_language(&mut self, lang: Language) {
        self.current_language = lang;
    }

    /// Translate a message by key, falling back to English and then to the
    /// key itself.
    pub fn translate(&self, key: &str) -> String {
        if let Some(translations) = self.translations.get(&self.current_language) {
            if let Some(value) = translations.get(key) {
                return value.clone();
            }
        }

        if self.current_language != Language::English {
            if let Some(translations) = self.translations.get(&Language::English) {
                if let Some(value) = translations.get(key) {
                    return value.clone();
                }
            }
        }

        key.to_string()
    }

    /// Translate a message, substituting `{ $name }` placeholders.
    pub fn translate_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut result = self.translate(key);
        for (arg_key, arg_value) in args {
            let pattern = format!("{{ ${} }}", arg_key);
            result = result.replace(&pattern, arg_value);
            let pattern_no_space = format!("{{${}}}", arg_key);
            result = result.replace(&pattern_no_space, arg_value);
        }
        result
    }
}

/// Parse FTL content into key-value pairs.
fn parse_ftl(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}
