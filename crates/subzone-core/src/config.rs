// crates/subzone-core/src/config.rs
//
// ConfigStore: the two on-disk records.
//
//   subtitle.toml  [AREA]     Y / H / X / W         region as fractions
//   settings.toml  [DEFAULT]  Interface / Language / Mode
//
// Loads never fail from the caller's point of view. A missing or unreadable
// record is replaced by defaults and rewritten immediately, so the next load
// succeeds without touching the fallback path again. Every write replaces the
// whole file through a temp file + rename in the same directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::ConfigError;
use crate::region::{RegionPercent, DEFAULT_REGION};

pub const REGION_FILE:   &str = "subtitle.toml";
pub const SETTINGS_FILE: &str = "settings.toml";

/// Interface languages that ship a text table.
pub const INTERFACE_CODES: &[&str] = &["ch", "chinese_cht", "en", "es", "japan", "ko", "ru", "vi"];

/// Subtitle languages the extractor understands.
pub const LANGUAGE_CODES: &[&str] = &[
    "ar", "ch", "chinese_cht", "cyrillic", "de", "en", "es", "fa", "fr", "it",
    "japan", "korean", "latin", "pt", "ru", "th", "uk", "vi",
];

// ── Settings ──────────────────────────────────────────────────────────────────

/// Extraction speed/accuracy trade-off passed through to the extractor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Auto,
    #[default]
    Fast,
    Accurate,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Auto, Mode::Fast, Mode::Accurate];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Auto     => "auto",
            Mode::Fast     => "fast",
            Mode::Accurate => "accurate",
        }
    }

    pub fn parse(s: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.as_str() == s.trim())
    }

    /// Interface-text key for the picker label.
    pub fn text_key(self) -> &'static str {
        match self {
            Mode::Auto     => "ModeAuto",
            Mode::Fast     => "ModeFast",
            Mode::Accurate => "ModeAccurate",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSettings {
    /// Interface-language code, one of [`INTERFACE_CODES`].
    pub interface: String,
    /// Subtitle-language code, one of [`LANGUAGE_CODES`].
    pub language:  String,
    pub mode:      Mode,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { interface: "en".into(), language: "en".into(), mode: Mode::Fast }
    }
}

impl AppSettings {
    /// All three fields hold known codes.
    pub fn is_valid(&self) -> bool {
        INTERFACE_CODES.contains(&self.interface.as_str())
            && LANGUAGE_CODES.contains(&self.language.as_str())
    }
}

// ── On-disk shapes ────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct RegionRecord {
    #[serde(rename = "AREA")]
    area: AreaSection,
}

#[derive(Serialize, Deserialize)]
struct AreaSection {
    #[serde(rename = "Y")] y: f64,
    #[serde(rename = "H")] h: f64,
    #[serde(rename = "X")] x: f64,
    #[serde(rename = "W")] w: f64,
}

impl From<RegionPercent> for RegionRecord {
    fn from(p: RegionPercent) -> Self {
        Self { area: AreaSection { y: p.y, h: p.h, x: p.x, w: p.w } }
    }
}

impl From<RegionRecord> for RegionPercent {
    fn from(r: RegionRecord) -> Self {
        RegionPercent { y: r.area.y, h: r.area.h, x: r.area.x, w: r.area.w }
    }
}

// Every field optional so a single bad value is healed without discarding
// the rest of the record.
#[derive(Serialize, Deserialize, Default)]
struct SettingsRecord {
    #[serde(rename = "DEFAULT", default)]
    default: SettingsSection,
}

#[derive(Serialize, Deserialize, Default)]
struct SettingsSection {
    #[serde(rename = "Interface", default, skip_serializing_if = "Option::is_none")]
    interface: Option<String>,
    #[serde(rename = "Language", default, skip_serializing_if = "Option::is_none")]
    language:  Option<String>,
    #[serde(rename = "Mode", default, skip_serializing_if = "Option::is_none")]
    mode:      Option<String>,
}

impl From<&AppSettings> for SettingsRecord {
    fn from(s: &AppSettings) -> Self {
        Self {
            default: SettingsSection {
                interface: Some(s.interface.clone()),
                language:  Some(s.language.clone()),
                mode:      Some(s.mode.as_str().to_string()),
            },
        }
    }
}

// ── ConfigStore ───────────────────────────────────────────────────────────────

/// Handle on the config directory. Cheap to clone; holds no open files.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn region_path(&self) -> PathBuf { self.dir.join(REGION_FILE) }

    pub fn settings_path(&self) -> PathBuf { self.dir.join(SETTINGS_FILE) }

    /// Persisted region, or the default region (which is then written back).
    pub fn load_region(&self) -> RegionPercent {
        match self.read_region() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("[config] {}: {e}; restoring default region", self.region_path().display());
                if let Err(e) = self.save_region(DEFAULT_REGION) {
                    tracing::warn!("[config] could not rewrite {}: {e}", REGION_FILE);
                }
                DEFAULT_REGION
            }
        }
    }

    fn read_region(&self) -> Result<RegionPercent, ConfigError> {
        let text = fs::read_to_string(self.region_path())?;
        let record: RegionRecord = toml::from_str(&text)?;
        let p = RegionPercent::from(record);
        p.validate().map_err(ConfigError::OutOfRange)?;
        Ok(p)
    }

    /// Replace the region record.
    pub fn save_region(&self, p: RegionPercent) -> Result<(), ConfigError> {
        let text = toml::to_string(&RegionRecord::from(p))?;
        self.atomic_write(&self.region_path(), &text)
    }

    /// Persisted settings. Unknown or missing fields fall back to their
    /// defaults field by field and the healed record is written back.
    pub fn load_settings(&self) -> AppSettings {
        let defaults = AppSettings::default();
        let section = match self.read_settings() {
            Ok(r) => r.default,
            Err(e) => {
                tracing::warn!("[config] {}: {e}; restoring default settings", self.settings_path().display());
                SettingsSection::default()
            }
        };

        let interface = section.interface.clone()
            .filter(|c| INTERFACE_CODES.contains(&c.as_str()))
            .unwrap_or(defaults.interface);
        let language = section.language.clone()
            .filter(|c| LANGUAGE_CODES.contains(&c.as_str()))
            .unwrap_or(defaults.language);
        let mode = section.mode.as_deref().and_then(Mode::parse).unwrap_or(defaults.mode);
        let healed = AppSettings { interface, language, mode };

        let clean = section.interface.as_deref() == Some(healed.interface.as_str())
            && section.language.as_deref() == Some(healed.language.as_str())
            && section.mode.as_deref() == Some(healed.mode.as_str());
        if !clean {
            if let Err(e) = self.save_settings(&healed) {
                tracing::warn!("[config] could not rewrite {}: {e}", SETTINGS_FILE);
            }
        }
        healed
    }

    fn read_settings(&self) -> Result<SettingsRecord, ConfigError> {
        let text = fs::read_to_string(self.settings_path())?;
        Ok(toml::from_str(&text)?)
    }

    /// Replace the settings record. Rejects unknown language codes.
    pub fn save_settings(&self, s: &AppSettings) -> Result<(), ConfigError> {
        if !s.is_valid() {
            return Err(ConfigError::OutOfRange(format!(
                "unknown code (Interface={}, Language={})", s.interface, s.language
            )));
        }
        let text = toml::to_string(&SettingsRecord::from(s))?;
        self.atomic_write(&self.settings_path(), &text)
    }

    /// Write to a temp file beside `path`, flush, then rename over `path`.
    fn atomic_write(&self, path: &Path, content: &str) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        tracing::debug!("[config] wrote {}", path.display());
        Ok(())
    }
}
