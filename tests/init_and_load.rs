use diagent_core::config::loader::{ConfigManager, DiagentConfig};
use diagent_core::{GenerationSettings, PlantUmlRenderer};
use tempfile::TempDir;

#[test]
fn init_then_load_round_trips_defaults() {
    let workspace = TempDir::new().unwrap();
    let path = DiagentConfig::bootstrap_project(workspace.path(), false, false)
        .unwrap()
        .unwrap();
    assert_eq!(path, workspace.path().join("diagent.toml"));

    let manager = ConfigManager::load_from_workspace(workspace.path()).unwrap();
    assert_eq!(manager.config(), &DiagentConfig::default());
    assert_eq!(manager.config_path(), Some(path.as_path()));
}

#[test]
fn loaded_config_drives_renderer_and_settings() {
    let workspace = TempDir::new().unwrap();
    std::fs::write(
        workspace.path().join("diagent.toml"),
        "[agent]\nmodel = \"gpt-4o\"\ntemperature = 0.1\n\n[renderer]\nfile_stem = \"flow\"\n",
    )
    .unwrap();

    let manager = ConfigManager::load_from_workspace(workspace.path()).unwrap();
    let settings = GenerationSettings::from(&manager.config().agent);
    assert_eq!(settings.model, "gpt-4o");
    assert_eq!(settings.temperature, 0.1);
    assert_eq!(settings.max_attempts, 3);

    let renderer = PlantUmlRenderer::new(manager.renderer_config());
    assert_eq!(
        renderer.image_path(),
        workspace.path().join("diagrams").join("flow.png")
    );
}

#[test]
fn forced_init_overwrites_edited_file() {
    let workspace = TempDir::new().unwrap();
    let path = workspace.path().join("diagent.toml");
    std::fs::write(&path, "[agent]\nmax_attempts = 9\n").unwrap();

    assert!(
        DiagentConfig::bootstrap_project(workspace.path(), false, false)
            .unwrap()
            .is_none()
    );
    DiagentConfig::bootstrap_project(workspace.path(), true, false).unwrap();

    let manager = ConfigManager::load_from_workspace(workspace.path()).unwrap();
    assert_eq!(manager.config().agent.max_attempts, 3);
}
