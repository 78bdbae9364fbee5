// crates/subzone-core/src/text.rs
//
// Interface text by symbolic key. Nothing else in the workspace embeds
// user-facing strings; panels and the event reducer ask a TextLookup.
//
// TextTable starts from the built-in English table and overlays an optional
// `interface/<code>.toml` from the config directory. Overlay files may be flat
// (`Open = "..."`) or grouped in sections; section names are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Read-only `key -> string` capability.
pub trait TextLookup {
    /// Localised text for `key`, or `key` itself when unknown.
    fn text<'a>(&'a self, key: &'a str) -> &'a str;
}

const BUILTIN_EN: &[(&str, &str)] = &[
    ("Title",             "Subtitle Extractor"),
    ("Open",              "Open"),
    ("Run",               "Run"),
    ("Setting",           "Settings"),
    ("Vertical",          "Vertical"),
    ("Horizontal",        "Horizontal"),
    ("Frame",             "Frame"),
    ("Progress",          "Progress"),
    ("Output",            "Output"),
    ("AllFile",           "All files"),
    ("OpenVideoSuccess",  "Opened video"),
    ("OpenVideoFirst",    "Please open a video first"),
    ("SubtitleArea",      "Subtitle area"),
    ("Finished",          "Extraction finished!"),
    ("Failed",            "Extraction failed"),
    ("GPUWarning",        "No GPU acceleration detected; extraction runs on the CPU and may be slow."),
    ("SettingsTitle",     "Settings"),
    ("InterfaceLanguage", "Interface language"),
    ("SubtitleLanguage",  "Subtitle language"),
    ("Mode",              "Mode"),
    ("ModeAuto",          "Auto"),
    ("ModeFast",          "Fast"),
    ("ModeAccurate",      "Accurate"),
    ("Ok",                "OK"),
    ("Cancel",            "Cancel"),
    // Subtitle-language display names, keyed `Language<CODE>`.
    ("LanguageAR",          "Arabic"),
    ("LanguageCH",          "Chinese (Simplified)"),
    ("LanguageCHINESE_CHT", "Chinese (Traditional)"),
    ("LanguageCYRILLIC",    "Cyrillic"),
    ("LanguageDE",          "German"),
    ("LanguageEN",          "English"),
    ("LanguageES",          "Spanish"),
    ("LanguageFA",          "Persian"),
    ("LanguageFR",          "French"),
    ("LanguageIT",          "Italian"),
    ("LanguageJAPAN",       "Japanese"),
    ("LanguageKOREAN",      "Korean"),
    ("LanguageLATIN",       "Latin"),
    ("LanguagePT",          "Portuguese"),
    ("LanguageRU",          "Russian"),
    ("LanguageTH",          "Thai"),
    ("LanguageUK",          "Ukrainian"),
    ("LanguageVI",          "Vietnamese"),
];

/// Native names for the interface-language picker. Not translated.
pub fn interface_display_name(code: &str) -> &str {
    match code {
        "ru"          => "Русский",
        "ch"          => "简体中文",
        "chinese_cht" => "繁體中文",
        "en"          => "English",
        "ko"          => "한국어",
        "japan"       => "日本語",
        "vi"          => "Tiếng Việt",
        "es"          => "Español",
        other         => other,
    }
}

/// Text key for a subtitle-language code, e.g. `japan` → `LanguageJAPAN`.
pub fn language_key(code: &str) -> String {
    format!("Language{}", code.to_uppercase())
}

#[derive(Clone, Debug)]
pub struct TextTable {
    entries: HashMap<String, String>,
}

impl Default for TextTable {
    fn default() -> Self { Self::builtin() }
}

impl TextTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN_EN.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Self { entries }
    }

    /// Built-in table overlaid with the string entries of `text`.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut table = Self::builtin();
        let doc: toml::Table = toml::from_str(text)?;
        table.merge(&doc);
        Ok(table)
    }

    fn merge(&mut self, doc: &toml::Table) {
        for (key, value) in doc {
            match value {
                toml::Value::String(s) => { self.entries.insert(key.clone(), s.clone()); }
                toml::Value::Table(section) => self.merge(section),
                _ => {}
            }
        }
    }

    /// Table for interface-language `code`. A missing or unreadable overlay
    /// file leaves the built-in English text in place.
    pub fn load_for(code: &str, config_dir: &Path) -> Self {
        let path = config_dir.join("interface").join(format!("{code}.toml"));
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(_) => {
                tracing::debug!("[text] no overlay at {}; using built-in text", path.display());
                return Self::builtin();
            }
        };
        match Self::from_toml_str(&text) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("[text] {}: {e}", path.display());
                Self::builtin()
            }
        }
    }

    /// `"<Title> v<version>"`.
    pub fn window_title(&self, version: &str) -> String {
        format!("{} v{version}", self.text("Title"))
    }
}

impl TextLookup for TextTable {
    fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn unknown_key_echoes() {
        let t = TextTable::builtin();
        assert_eq!(t.text("NoSuchKey"), "NoSuchKey");
        assert_eq!(t.text("Run"), "Run");
    }

    #[test]
    fn overlay_replaces_and_flattens_sections() {
        let t = TextTable::from_toml_str(
            "[SubtitleExtractorGUI]\nRun = \"Запуск\"\n[Main]\nGPUWarning = \"gpu\"\nCount = 3\n",
        ).unwrap();
        assert_eq!(t.text("Run"), "Запуск");
        assert_eq!(t.text("GPUWarning"), "gpu");
        assert_eq!(t.text("Open"), "Open");
        assert_eq!(t.text("Count"), "Count");
    }

    #[test]
    fn load_for_falls_back_to_builtin() {
        let dir = tempdir().unwrap();
        assert_eq!(TextTable::load_for("ru", dir.path()).text("Open"), "Open");

        fs::create_dir_all(dir.path().join("interface")).unwrap();
        fs::write(dir.path().join("interface").join("ru.toml"), "Open = \"Открыть\"\n").unwrap();
        assert_eq!(TextTable::load_for("ru", dir.path()).text("Open"), "Открыть");

        fs::write(dir.path().join("interface").join("es.toml"), "not [ toml").unwrap();
        assert_eq!(TextTable::load_for("es", dir.path()).text("Open"), "Open");
    }

    #[test]
    fn title_carries_version() {
        assert_eq!(TextTable::builtin().window_title("0.1.0"), "Subtitle Extractor v0.1.0");
    }

    #[test]
    fn every_language_code_has_a_name() {
        let t = TextTable::builtin();
        for code in crate::config::LANGUAGE_CODES {
            let key = language_key(code);
            assert_ne!(t.text(&key), key.as_str(), "{code}");
        }
    }
}
