use newscat::{ArtifactError, ArtifactKind, ArtifactManager, MANIFEST_FILE};
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/artifacts")
}

fn copy_fixtures(dest: &Path, with_manifest: bool) {
    for kind in ArtifactKind::ALL {
        fs::copy(fixtures_dir().join(kind.file_name()), dest.join(kind.file_name())).unwrap();
    }
    if with_manifest {
        fs::copy(fixtures_dir().join(MANIFEST_FILE), dest.join(MANIFEST_FILE)).unwrap();
    }
}

#[test]
fn test_fixture_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ArtifactManager::new(fixtures_dir());
    assert!(manager.is_complete());
    assert!(manager.has_manifest());
    manager.verify_artifacts()?;

    for kind in ArtifactKind::ALL {
        assert!(manager.verify_artifact(kind)?, "{} should match the manifest", kind);
    }

    let authors = manager.load_authors()?;
    assert_eq!(authors.len(), 6);
    assert_eq!(authors[0], "Ed Mazza");
    Ok(())
}

#[test]
fn test_tampered_artifact_detected() {
    let dir = tempfile::tempdir().unwrap();
    copy_fixtures(dir.path(), true);
    fs::write(dir.path().join("authors.json"), r#"["Somebody Else"]"#).unwrap();

    let manager = ArtifactManager::new(dir.path());
    assert!(!manager.verify_artifact(ArtifactKind::Authors).unwrap());
    assert!(manager.verify_artifact(ArtifactKind::Model).unwrap());

    match manager.verify_artifacts() {
        Err(ArtifactError::HashMismatch { file, .. }) => assert_eq!(file, "authors.json"),
        other => panic!("expected hash mismatch, got {:?}", other),
    }
}

#[test]
fn test_write_manifest() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    copy_fixtures(dir.path(), false);

    let manager = ArtifactManager::new(dir.path());
    assert!(!manager.has_manifest());
    // no manifest: accepted with a warning
    manager.verify_artifacts()?;

    let path = manager.write_manifest()?;
    assert_eq!(path, manager.manifest_path());
    manager.verify_artifacts()?;

    // same bytes, same digests
    let written = fs::read_to_string(&path)?;
    let fixture = fs::read_to_string(fixtures_dir().join(MANIFEST_FILE))?;
    let written: serde_json::Value = serde_json::from_str(&written)?;
    let fixture: serde_json::Value = serde_json::from_str(&fixture)?;
    assert_eq!(written, fixture);
    Ok(())
}

#[test]
fn test_manifest_missing_entry() {
    let dir = tempfile::tempdir().unwrap();
    copy_fixtures(dir.path(), false);

    let manager = ArtifactManager::new(dir.path());
    manager.write_manifest().unwrap();

    let path = manager.manifest_path();
    let mut manifest: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    manifest.remove("model.json");
    fs::write(&path, serde_json::to_vec(&manifest).unwrap()).unwrap();

    assert!(matches!(
        manager.verify_artifacts(),
        Err(ArtifactError::MissingChecksum(file)) if file == "model.json"
    ));
}

#[test]
fn test_incomplete_directory() {
    let dir = tempfile::tempdir().unwrap();
    copy_fixtures(dir.path(), false);
    fs::remove_file(dir.path().join("ohe_year.json")).unwrap();

    let manager = ArtifactManager::new(dir.path());
    assert!(!manager.is_complete());
    assert_eq!(manager.missing_artifacts(), vec![ArtifactKind::YearEncoder]);
    assert!(matches!(
        manager.write_manifest(),
        Err(ArtifactError::NotFound(_))
    ));
}
