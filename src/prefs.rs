//! User preferences, stored as a flat JSON file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::highlight::Theme;

pub const MAX_RECENT_FILES: usize = 10;
pub const PREFS_ENV: &str = "RV_DEBUGGER_PREFS";
const APP_DIR: &str = "rv-debugger";
const FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    pub font_family: String,
    pub font_size: u32,
    pub tab_width: u32,
    pub show_line_numbers: bool,
    pub wrap_text: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_family: "Courier New".to_string(),
            font_size: 12,
            tab_width: 4,
            show_line_numbers: true,
            wrap_text: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowSettings {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            x: 100,
            y: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub dark_mode: bool,
    pub theme_name: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            theme_name: Theme::Light.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub last_opened_project: String,
    pub recent_files: Vec<String>,
    pub editor_settings: EditorSettings,
    pub window_settings: WindowSettings,
    pub theme_settings: ThemeSettings,
    pub auto_save_enabled: bool,
    /// Seconds between autosaves.
    pub auto_save_interval: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_opened_project: String::new(),
            recent_files: Vec::new(),
            editor_settings: EditorSettings::default(),
            window_settings: WindowSettings::default(),
            theme_settings: ThemeSettings::default(),
            auto_save_enabled: true,
            auto_save_interval: 60,
        }
    }
}

/// `$RV_DEBUGGER_PREFS`, else the user config directory.
pub fn default_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(PREFS_ENV) {
        return Some(PathBuf::from(path));
    }
    let config = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(config.join(APP_DIR).join(FILE_NAME))
}

impl Preferences {
    /// Read `path`, creating it with defaults when it does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("creating default preferences at {}", path.display());
            let prefs = Self::default();
            prefs.save(path)?;
            return Ok(prefs);
        }
        let data = fs::read_to_string(path)?;
        let prefs = serde_json::from_str(&data)?;
        debug!("loaded preferences from {}", path.display());
        Ok(prefs)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Put `file` at the front of the recent list, keeping at most
    /// [`MAX_RECENT_FILES`] distinct entries.
    pub fn add_recent_file(&mut self, file: &str) {
        self.recent_files.retain(|f| f != file);
        self.recent_files.insert(0, file.to_string());
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    pub fn clear_recent_files(&mut self) {
        self.recent_files.clear();
    }

    pub fn set_last_opened_project(&mut self, project: &str) {
        self.last_opened_project = project.to_string();
    }

    pub fn update_window(&mut self, width: i32, height: i32, x: i32, y: i32) {
        self.window_settings = WindowSettings {
            width,
            height,
            x,
            y,
        };
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.theme_settings.dark_mode = dark;
        self.theme_settings.theme_name = Theme::from_dark_mode(dark).name().to_string();
    }

    pub fn set_editor_settings(&mut self, settings: EditorSettings) {
        self.editor_settings = settings;
    }

    pub fn set_auto_save(&mut self, enabled: bool, interval: u32) {
        self.auto_save_enabled = enabled;
        self.auto_save_interval = interval;
    }

    pub fn theme(&self) -> Theme {
        if self.theme_settings.dark_mode {
            Theme::Dark
        } else {
            Theme::from_name(&self.theme_settings.theme_name)
        }
    }
}
