use pdf_image_sheet::*;
use std::path::PathBuf;

#[test]
fn test_validation_empty_output_dir() {
    let config = SheetConfig {
        output_dir: PathBuf::new(),
        counter_path: PathBuf::from("counter.json"),
    };
    match config.validate() {
        Err(SheetError::Config(msg)) => assert!(msg.contains("Output directory")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_counter_path_is_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = SheetConfig {
        output_dir: dir.path().to_path_buf(),
        counter_path: dir.path().to_path_buf(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_builds_collaborators() {
    let config = SheetConfig {
        output_dir: PathBuf::from("/tmp/sheets"),
        counter_path: PathBuf::from("/tmp/sheets/counter.json"),
    };
    assert_eq!(config.sink().dir(), PathBuf::from("/tmp/sheets").as_path());
    assert_eq!(
        config.counter_store().path(),
        PathBuf::from("/tmp/sheets/counter.json").as_path()
    );
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_config() {
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings").join("config.json");
    let config = SheetConfig {
        output_dir: dir.path().join("out"),
        counter_path: dir.path().join("counter.json"),
    };

    config.save(&path).await.unwrap();
    let loaded = SheetConfig::load(&path).await.unwrap();

    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_missing_config_uses_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let loaded = SheetConfig::load_or_default(dir.path().join("absent.json"))
        .await
        .unwrap();
    assert_eq!(loaded, SheetConfig::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_malformed_config_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(&path, "[1, 2").await.unwrap();

    assert!(matches!(
        SheetConfig::load(&path).await,
        Err(SheetError::Config(_))
    ));
}
