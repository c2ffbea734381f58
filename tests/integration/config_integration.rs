//! Integration tests for the layered configuration

use crate::integration::test_utils::with_xdg_env;
use shellcomp::cli::RunContext;
use shellcomp::config::{ConfigLoader, PROJECT_CONFIG_FILE};
use shellcomp::Shell;
use tempfile::TempDir;

fn write_global(config_home: &std::path::Path, text: &str) {
    let dir = config_home.join("shellcomp");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), text).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, |_| {
        let project = TempDir::new().unwrap();
        let config = ConfigLoader::load(project.path()).unwrap();
        assert!(config.completion.manifest.is_none());
        assert!(config.completion.include_descriptions);
        assert_eq!(config.layout.reserved_columns, 4);
        assert_eq!(config.layout.min_description_width, 8);
        assert_eq!(config.layout.ellipsis, "…");
        assert_eq!(config.logging.level, "off");
        assert!(config.validate().is_ok());
    });
}

#[test]
fn test_global_file_is_read_from_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, |config_home| {
        write_global(
            config_home,
            "[completion]\ndefault_shell = \"fish\"\n\n[layout]\nmin_description_width = 10\n",
        );
        assert_eq!(
            ConfigLoader::xdg_config_path(),
            Some(config_home.join("shellcomp").join("config.toml"))
        );

        let project = TempDir::new().unwrap();
        let config = ConfigLoader::load(project.path()).unwrap();
        assert_eq!(config.completion.default_shell, Some(Shell::Fish));
        assert_eq!(config.layout.min_description_width, 10);
    });
}

#[test]
fn test_project_file_overrides_global_key_by_key() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, |config_home| {
        write_global(
            config_home,
            "[layout]\nreserved_columns = 6\nellipsis = \"...\"\n",
        );
        let project = TempDir::new().unwrap();
        std::fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "[layout]\nellipsis = \"~\"\n\n[completion]\nmanifest = \"tools/cli.toml\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(project.path()).unwrap();
        assert_eq!(config.layout.reserved_columns, 6);
        assert_eq!(config.layout.ellipsis, "~");
        assert_eq!(
            config.completion.manifest,
            Some(project.path().join("tools/cli.toml"))
        );
    });
}

#[test]
fn test_explicit_file_and_environment_win() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, |_| {
        let project = TempDir::new().unwrap();
        std::fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "[completion]\ninclude_descriptions = true\n",
        )
        .unwrap();
        let explicit = project.path().join("ci.toml");
        std::fs::write(
            &explicit,
            "[completion]\ninclude_descriptions = false\n\n[layout]\nreserved_columns = 5\n",
        )
        .unwrap();

        std::env::set_var("SHELLCOMP__LAYOUT__RESERVED_COLUMNS", "7");
        let loaded = ConfigLoader::load_with(project.path(), Some(&explicit));
        std::env::remove_var("SHELLCOMP__LAYOUT__RESERVED_COLUMNS");

        let config = loaded.unwrap();
        assert!(!config.completion.include_descriptions);
        assert_eq!(config.layout.reserved_columns, 7);
    });
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, |_| {
        let project = TempDir::new().unwrap();
        let missing = project.path().join("missing.toml");
        assert!(ConfigLoader::load_with(project.path(), Some(&missing)).is_err());
    });
}

#[test]
fn test_invalid_layout_rejected_by_run_context() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, |_| {
        let project = TempDir::new().unwrap();
        std::fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "[layout]\nreserved_columns = 1\nellipsis = \"$(x)\"\n",
        )
        .unwrap();

        let err = match RunContext::new(project.path().to_path_buf(), None, None) {
            Ok(_) => panic!("invalid layout accepted"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Configuration validation failed"));
    });
}

#[test]
fn test_manifest_flag_overrides_config() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, |_| {
        let project = TempDir::new().unwrap();
        std::fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "[completion]\nmanifest = \"from-config.toml\"\n",
        )
        .unwrap();
        std::fs::write(project.path().join("from-flag.toml"), "name = \"flagged\"\n").unwrap();

        let ctx = RunContext::new(
            project.path().to_path_buf(),
            None,
            Some(project.path().join("from-flag.toml")),
        )
        .unwrap();
        let out = ctx.execute(&shellcomp::cli::Commands::Validate).unwrap();
        assert!(out.contains("program: flagged"));
        assert_eq!(
            ctx.config().completion.manifest,
            Some(project.path().join("from-config.toml"))
        );
    });
}
