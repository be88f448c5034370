use scriptor::api::ScriptorApi;
use scriptor::commands::ScriptorPaths;
use scriptor::config::ScriptorConfig;
use scriptor::store::fs::FsBackend;
use scriptor::store::{StorageBackend, PROJECT_KEY};
use scriptor::surface::MemorySurface;
use std::fs;

#[test]
fn read_missing_key_is_none() {
    let temp_dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(temp_dir.path().join("data"));
    assert_eq!(backend.read(PROJECT_KEY).unwrap(), None);
}

#[test]
fn write_creates_directory_and_leaves_no_temp_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path().join("nested").join("data");
    let backend = FsBackend::new(&root);

    backend.write(PROJECT_KEY, "{\"sections\":[]}").unwrap();
    backend.write(PROJECT_KEY, "{\"sections\":[],\"version\":1}").unwrap();

    assert_eq!(
        backend.read(PROJECT_KEY).unwrap().as_deref(),
        Some("{\"sections\":[],\"version\":1}")
    );
    let names: Vec<String> = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["crafted.v4.project.json".to_string()]);
}

#[test]
fn remove_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(temp_dir.path());
    backend.write(PROJECT_KEY, "x").unwrap();

    backend.remove(PROJECT_KEY).unwrap();
    backend.remove(PROJECT_KEY).unwrap();
    assert!(!backend.key_path(PROJECT_KEY).exists());
}

#[test]
fn project_survives_reopening_from_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let open = || {
        ScriptorApi::open(
            FsBackend::new(temp_dir.path()),
            MemorySurface::new(),
            ScriptorConfig::default(),
            ScriptorPaths {
                data_dir: temp_dir.path().to_path_buf(),
            },
        )
    };

    let mut api = open();
    api.add_section("Afterword").unwrap();
    api.open_section(Some("Afterword")).unwrap();
    api.write("<p>Thanks for reading.</p>").unwrap();
    api.flush().unwrap();

    let reopened = open();
    assert!(reopened.restored());
    assert_eq!(reopened.workspace().store.len(), 8);
    assert_eq!(
        reopened.active_content().as_deref(),
        Some("<p>Thanks for reading.</p>")
    );
}
