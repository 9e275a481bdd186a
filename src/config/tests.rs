use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_showreel_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SHOWREEL_CONFIG_PATH", "/tmp/showreel-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/showreel-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("showreel")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("showreel")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
auto_advance = true

[controls]
seek_seconds = 9

[ui]
header_text = "hello"
progress_width = 12

[playlist]
manifest = "/tmp/playlist.toml"
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
max_depth = 3
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SHOWREEL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SHOWREEL__CONTROLS__SEEK_SECONDS");

    let s = Settings::load().unwrap();
    assert!(s.playback.auto_advance);
    assert_eq!(s.controls.seek_seconds, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.progress_width, 12);
    assert_eq!(
        s.playlist.manifest,
        Some(std::path::PathBuf::from("/tmp/playlist.toml"))
    );
    assert_eq!(s.playlist.extensions, vec!["mp3".to_string()]);
    assert!(!s.playlist.recursive);
    assert!(!s.playlist.include_hidden);
    assert!(!s.playlist.follow_links);
    assert_eq!(s.playlist.max_depth, Some(3));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
seek_seconds = 5
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SHOWREEL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SHOWREEL__CONTROLS__SEEK_SECONDS", "30");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.seek_seconds, 30);
}

#[test]
fn validate_rejects_zero_seek_step_and_tiny_bars() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.controls.seek_seconds = 0;
    assert!(s.validate().is_err());

    s.controls.seek_seconds = 5;
    s.ui.progress_width = 2;
    assert!(s.validate().is_err());
}
