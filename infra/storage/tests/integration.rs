use sky_storage::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_path_traversal_blocked() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    assert!(storage.resolve("../etc/passwd").is_err());
    assert!(storage.resolve("foo/../../bar").is_err());
    assert!(storage.write("/abs.bin", b"x").await.is_err());
}

#[tokio::test]
async fn test_write_read_roundtrip_compressed() {
    let temp = TempDir::new().unwrap();
    let storage =
        Storage::builder().root(temp.path()).compression(Compression::Lz4).connect().await.unwrap();

    let payload = vec![7u8; 4096];
    storage.write("bin/data.dat", &payload).await.unwrap();
    assert!(storage.exists("bin/data.dat").unwrap());

    let on_disk = std::fs::read(storage.resolve("bin/data.dat").unwrap()).unwrap();
    assert!(on_disk.len() < payload.len(), "payload should be stored compressed");
    assert_eq!(storage.read("bin/data.dat").await.unwrap(), payload);
}

#[tokio::test]
async fn test_connect_without_create_requires_root() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let result = Storage::builder().root(&missing).create(false).connect().await;
    assert!(matches!(result, Err(StorageError::Io { .. })));
}

#[tokio::test]
async fn test_read_and_delete_missing_return_file_not_found() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    let err = storage.read("missing.bin").await.expect_err("expected error");
    assert!(matches!(err, StorageError::FileNotFound { .. }), "unexpected error: {err:?}");

    let err = storage.delete("missing.bin").await.expect_err("expected error");
    assert!(matches!(err, StorageError::FileNotFound { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_file_preferences_survive_reconnect() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("data");

    {
        let storage = Storage::builder().root(&root).connect().await.unwrap();
        let prefs = storage.preferences("com.alicimsamil.starproject").unwrap();
        prefs.put_string("SAVED_STARS", r#"[{"size":"S"}]"#).await.unwrap();
        prefs.put_string("other", "kept").await.unwrap();
    }

    let storage = Storage::builder().root(&root).connect().await.unwrap();
    let prefs = storage.preferences("com.alicimsamil.starproject").unwrap();

    assert_eq!(
        prefs.get_string("SAVED_STARS").await.unwrap().as_deref(),
        Some(r#"[{"size":"S"}]"#)
    );
    assert_eq!(prefs.get_string("other").await.unwrap().as_deref(), Some("kept"));
    assert!(storage.exists("com_alicimsamil_starproject.prefs.json").unwrap());
}

#[tokio::test]
async fn test_namespaces_are_isolated() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    let a = storage.preferences("app_a").unwrap();
    let b = storage.preferences("app_b").unwrap();

    a.put_string("key", "a").await.unwrap();
    assert_eq!(b.get_string("key").await.unwrap(), None);

    b.put_string("key", "b").await.unwrap();
    assert_eq!(a.get_string("key").await.unwrap().as_deref(), Some("a"));
}

#[tokio::test]
async fn test_preferences_remove_and_clear() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
    let prefs = storage.preferences("sky").unwrap();

    assert!(!prefs.remove("absent").await.unwrap());
    assert!(!prefs.contains("absent").await.unwrap());

    prefs.put_string("one", "1").await.unwrap();
    prefs.put_string("two", "2").await.unwrap();
    assert!(prefs.remove("one").await.unwrap());
    assert_eq!(prefs.entries().await.unwrap().len(), 1);

    prefs.clear().await.unwrap();
    assert!(prefs.entries().await.unwrap().is_empty());
    prefs.clear().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_preferences_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
    storage.write("broken.prefs.json", b"not json").await.unwrap();

    let prefs = storage.preferences("broken").unwrap();
    let err = prefs.get_string("any").await.expect_err("expected decode error");
    assert!(matches!(err, StorageError::Serde { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_invalid_namespace_rejected() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    assert!(matches!(storage.preferences(""), Err(StorageError::InvalidNamespace { .. })));
    assert!(storage.preferences("a/b").is_err());
}

#[tokio::test]
async fn test_failed_write_leaves_no_staging_file() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();

    // A non-empty directory cannot be replaced by a file.
    std::fs::create_dir_all(temp.path().join("blocked/inner")).unwrap();
    let result = storage.write("blocked", b"stars").await;
    assert!(matches!(result, Err(StorageError::Io { .. })));

    let leftovers: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.contains(".skytmp."))
        .collect();
    assert!(leftovers.is_empty(), "staging files left behind: {leftovers:?}");
    assert!(temp.path().join("blocked/inner").is_dir());
}
