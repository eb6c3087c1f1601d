use std::fs;
use std::path::PathBuf;

use rv_debugger::highlight::Theme;
use rv_debugger::prefs::{EditorSettings, Preferences, MAX_RECENT_FILES};
use rv_debugger::DebugError;

fn prefs_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rv-debugger-prefs-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir.join("nested").join("preferences.json")
}

#[test]
fn test_first_load_writes_defaults() {
    let path = prefs_file("init");
    let prefs = Preferences::load_or_init(&path).expect("load");
    assert_eq!(prefs, Preferences::default());
    assert!(path.exists());

    let text = fs::read_to_string(&path).expect("read back");
    assert!(text.contains("\"autoSaveInterval\": 60"));
    assert!(text.contains("\"fontFamily\": \"Courier New\""));
    let _ = fs::remove_dir_all(path.parent().and_then(|p| p.parent()).expect("dir"));
}

#[test]
fn test_changes_survive_reload() {
    let path = prefs_file("round-trip");
    let mut prefs = Preferences::load_or_init(&path).expect("load");
    prefs.set_last_opened_project("/home/user/riscv");
    for i in 0..MAX_RECENT_FILES + 2 {
        prefs.add_recent_file(&format!("/home/user/riscv/p{}.asm", i));
    }
    prefs.update_window(1440, 900, 0, 25);
    prefs.set_editor_settings(EditorSettings {
        font_size: 14,
        wrap_text: true,
        ..EditorSettings::default()
    });
    prefs.set_dark_mode(true);
    prefs.set_auto_save(false, 120);
    prefs.save(&path).expect("save");

    let reloaded = Preferences::load_or_init(&path).expect("reload");
    assert_eq!(reloaded, prefs);
    assert_eq!(reloaded.recent_files.len(), MAX_RECENT_FILES);
    assert_eq!(reloaded.recent_files[0], "/home/user/riscv/p11.asm");
    assert_eq!(reloaded.window_settings.width, 1440);
    assert_eq!(reloaded.editor_settings.font_family, "Courier New");
    assert_eq!(reloaded.theme(), Theme::Dark);
    assert!(!reloaded.auto_save_enabled);

    let mut cleared = reloaded;
    cleared.clear_recent_files();
    assert!(cleared.recent_files.is_empty());
    let _ = fs::remove_dir_all(path.parent().and_then(|p| p.parent()).expect("dir"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let path = prefs_file("malformed");
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, "{ not json").expect("write");
    assert!(matches!(
        Preferences::load_or_init(&path),
        Err(DebugError::Json(_))
    ));
    let _ = fs::remove_dir_all(path.parent().and_then(|p| p.parent()).expect("dir"));
}
