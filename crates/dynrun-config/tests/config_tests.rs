//! Configuration discovery and override tests
//!
//! Every test that loads through `ConfigLoader` reads `DYNRUN_*`, so all of
//! them run serially.

use dynrun_config::loader::{ENV_LIB_DIR, ENV_LIB_NAME, ENV_LOG, ENV_TOOL_TIMEOUT};
use dynrun_config::{ConfigError, ConfigLoader, RunnerConfig};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn clear_env() {
    for key in [ENV_LIB_DIR, ENV_LIB_NAME, ENV_TOOL_TIMEOUT, ENV_LOG] {
        env::remove_var(key);
    }
}

/// Loader whose per-user fallback points into `dir` (and does not exist)
fn isolated_loader(dir: &TempDir) -> ConfigLoader {
    ConfigLoader::with_global_config_path(dir.path().join("home").join("dynrun.toml"))
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
#[serial]
fn test_load_toml_from_directory() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_file(
        temp_dir.path(),
        "dynrun.toml",
        r#"
[library]
dir = "lib"
name = "fxForward"
"#,
    );

    let config = isolated_loader(&temp_dir)
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert_eq!(config.source, path);
    assert_eq!(config.runner.library.name, "fxForward");
    assert_eq!(config.runner.library.dir, Some(temp_dir.path().join("lib")));
}

#[test]
#[serial]
fn test_load_properties_from_directory() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "application.properties",
        "# legacy runner settings\nexecFileDir=\nexecFileName=libOtStock\n",
    );

    let config = isolated_loader(&temp_dir)
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert_eq!(config.runner, RunnerConfig::for_library("libOtStock"));
}

#[test]
#[serial]
fn test_load_from_subdirectory_finds_parent() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_file(temp_dir.path(), "dynrun.toml", "[library]\nname = \"bond\"\n");
    let nested = temp_dir.path().join("sub1").join("sub2");
    fs::create_dir_all(&nested).unwrap();

    let config = isolated_loader(&temp_dir).load_from_directory(&nested).unwrap();

    assert_eq!(config.source, path);
    assert_eq!(config.runner.library.name, "bond");
}

#[test]
#[serial]
fn test_relative_dir_resolves_against_config_directory() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "application.properties",
        "execFileDir=lib\nexecFileName=bond\n",
    );
    let scripts = temp_dir.path().join("scripts");
    fs::create_dir(&scripts).unwrap();

    let config = isolated_loader(&temp_dir).load_from_directory(&scripts).unwrap();

    assert_eq!(
        config.runner.library_path(&scripts),
        temp_dir
            .path()
            .join("lib")
            .join(dynrun_core::library_file_name("bond"))
    );
}

#[test]
#[serial]
fn test_relative_env_dir_stays_relative_to_working_directory() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "dynrun.toml",
        "[library]\ndir = \"lib\"\nname = \"bond\"\n",
    );
    env::set_var(ENV_LIB_DIR, "out");

    let config = isolated_loader(&temp_dir)
        .load_from_directory(temp_dir.path())
        .unwrap();
    clear_env();

    assert_eq!(config.runner.library.dir, Some(PathBuf::from("out")));
}

#[test]
#[serial]
fn test_global_fallback_used_when_nothing_found() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    fs::create_dir_all(&home).unwrap();
    let global = create_file(&home, "dynrun.toml", "[library]\nname = \"KISPEQ_HiFiveSwapMC64\"\n");
    let project = temp_dir.path().join("project");
    fs::create_dir_all(&project).unwrap();

    let config = ConfigLoader::with_global_config_path(&global)
        .load_from_directory(&project)
        .unwrap();

    assert_eq!(config.source, global);
    assert_eq!(config.runner.library.name, "KISPEQ_HiFiveSwapMC64");
}

#[test]
#[serial]
fn test_project_config_beats_global() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    fs::create_dir_all(&home).unwrap();
    let global = create_file(&home, "dynrun.toml", "[library]\nname = \"global\"\n");
    create_file(temp_dir.path(), "dynrun.toml", "[library]\nname = \"project\"\n");

    let config = ConfigLoader::with_global_config_path(&global)
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert_eq!(config.runner.library.name, "project");
}

#[test]
#[serial]
fn test_nothing_found_is_not_found() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    let result = isolated_loader(&temp_dir).load_from_directory(temp_dir.path());

    match result {
        Err(ConfigError::NotFound(path)) => assert_eq!(path, temp_dir.path()),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_broken_nearest_config_is_reported() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "dynrun.toml", "[library]\nname = \"outer\"\n");
    let nested = temp_dir.path().join("inner");
    fs::create_dir_all(&nested).unwrap();
    create_file(&nested, "application.properties", "execFileDir lib\n");

    let result = isolated_loader(&temp_dir).load_from_directory(&nested);

    assert!(matches!(
        result,
        Err(ConfigError::PropertiesParseError { line: 1, .. })
    ));
}

// ============================================================================
// Environment overrides
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_library() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_file(temp_dir.path(), "dynrun.toml", "[library]\ndir = \"lib\"\nname = \"bond\"\n");

    env::set_var(ENV_LIB_DIR, "/opt/pricing");
    env::set_var(ENV_LIB_NAME, "fxForward");
    let config = isolated_loader(&temp_dir).load_from_file(&path).unwrap();
    clear_env();

    assert_eq!(config.runner.library.dir, Some(PathBuf::from("/opt/pricing")));
    assert_eq!(config.runner.library.name, "fxForward");
}

#[test]
#[serial]
fn test_empty_lib_dir_env_resets_to_working_directory() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_file(temp_dir.path(), "dynrun.toml", "[library]\ndir = \"lib\"\nname = \"bond\"\n");

    env::set_var(ENV_LIB_DIR, "");
    let config = isolated_loader(&temp_dir).load_from_file(&path).unwrap();
    clear_env();

    assert_eq!(config.runner.library.dir, None);
}

#[test]
#[serial]
fn test_env_overrides_timeout_and_log() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_file(temp_dir.path(), "dynrun.toml", "[library]\nname = \"bond\"\n");

    env::set_var(ENV_TOOL_TIMEOUT, " 7 ");
    env::set_var(ENV_LOG, "trace");
    let config = isolated_loader(&temp_dir).load_from_file(&path).unwrap();
    clear_env();

    assert_eq!(config.runner.introspection.timeout_secs, 7);
    assert_eq!(config.runner.logging.level, "trace");
    config.runner.validate().unwrap();
}

#[test]
#[serial]
fn test_invalid_timeout_env() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_file(temp_dir.path(), "dynrun.toml", "[library]\nname = \"bond\"\n");

    env::set_var(ENV_TOOL_TIMEOUT, "soon");
    let result = isolated_loader(&temp_dir).load_from_file(&path);
    clear_env();

    match result {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, ENV_TOOL_TIMEOUT),
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_empty_name_env_is_ignored() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_file(temp_dir.path(), "application.properties", "execFileName=bond\n");

    env::set_var(ENV_LIB_NAME, "");
    let config = isolated_loader(&temp_dir).load_from_file(&path).unwrap();
    clear_env();

    assert_eq!(config.runner.library.name, "bond");
}
