use sky_domain::{Star, StarBrightness, StarColor, StarSize};
use sky_registry::{RegistryError, SAVED_STARS, SkyRegistry};
use sky_storage::{MemoryPreferences, PreferenceStore, Storage};
use tempfile::TempDir;

fn sample() -> Vec<Star> {
    vec![
        Star::new(StarSize::Small, StarColor::Blue, StarBrightness::Bright),
        Star::new(StarSize::Big, StarColor::Gray, StarBrightness::NotSoMuch),
    ]
}

#[tokio::test]
async fn save_writes_token_json_under_fixed_key() {
    let prefs = MemoryPreferences::new();
    let encoded = serde_json::to_string(&sample()).unwrap();
    prefs.put_string(SAVED_STARS, &encoded).await.unwrap();

    let mut sky = SkyRegistry::seeded(1);
    sky.load(&prefs).await;
    prefs.remove(SAVED_STARS).await.unwrap();
    sky.save(&prefs).await.unwrap();

    assert_eq!(
        prefs.get_string(SAVED_STARS).await.unwrap().as_deref(),
        Some(
            r#"[{"size":"S","color":"Blue","brightness":"Bright"},{"size":"B","color":"Gray","brightness":"Not so much"}]"#
        )
    );
}

#[tokio::test]
async fn load_after_save_restores_equal_list() {
    let prefs = MemoryPreferences::new();
    let mut sky = SkyRegistry::seeded(2);
    for size in [StarSize::Big, StarSize::Small, StarSize::Small, StarSize::Big] {
        sky.add_star(size);
    }
    sky.save(&prefs).await.unwrap();

    let mut restored = SkyRegistry::seeded(99);
    restored.load(&prefs).await;
    assert_eq!(restored.stars(), sky.stars());
}

#[tokio::test]
async fn load_replaces_instead_of_merging() {
    let prefs = MemoryPreferences::new();
    prefs.put_string(SAVED_STARS, &serde_json::to_string(&sample()).unwrap()).await.unwrap();

    let mut sky = SkyRegistry::seeded(3);
    for _ in 0..4 {
        sky.add_star(StarSize::Small);
    }
    sky.load(&prefs).await;

    assert_eq!(sky.stars(), sample().as_slice());
}

#[tokio::test]
async fn load_without_saved_sky_keeps_current_list() {
    let prefs = MemoryPreferences::new();
    let mut sky = SkyRegistry::seeded(4);
    sky.add_star(StarSize::Big);
    let before = sky.stars().to_vec();

    sky.load(&prefs).await;
    assert_eq!(sky.stars(), before.as_slice());
}

#[tokio::test]
async fn load_ignores_empty_and_corrupt_values() {
    let prefs = MemoryPreferences::new();
    let mut sky = SkyRegistry::seeded(5);
    sky.add_star(StarSize::Small);
    let before = sky.stars().to_vec();

    for bad in ["", "not json", r#"[{"size":"Small","color":"Red","brightness":"Bright"}]"#, "{}"] {
        prefs.put_string(SAVED_STARS, bad).await.unwrap();
        sky.load(&prefs).await;
        assert_eq!(sky.stars(), before.as_slice(), "value {bad:?} must be ignored");
    }
}

#[tokio::test]
async fn load_keeps_full_flag_untouched() {
    let prefs = MemoryPreferences::new();
    SkyRegistry::seeded(6).save(&prefs).await.unwrap();

    let mut sky = SkyRegistry::seeded(7);
    for _ in 0..11 {
        sky.add_star(StarSize::Big);
    }
    sky.load(&prefs).await;

    assert!(sky.is_empty());
    assert!(sky.is_full().get());
}

#[tokio::test]
async fn file_preferences_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("sky");

    let saved = {
        let storage = Storage::builder().root(&root).connect().await.unwrap();
        let prefs = storage.preferences("com.alicimsamil.starproject").unwrap();
        prefs.put_string("unrelated", "kept").await.unwrap();

        let mut sky = SkyRegistry::seeded(8);
        for _ in 0..3 {
            sky.add_star(StarSize::Small);
        }
        sky.save(&prefs).await.unwrap();
        sky.stars().to_vec()
    };

    let storage = Storage::builder().root(&root).connect().await.unwrap();
    let prefs = storage.preferences("com.alicimsamil.starproject").unwrap();
    let mut sky = SkyRegistry::seeded(9);
    sky.load(&prefs).await;

    assert_eq!(sky.stars(), saved.as_slice());
    assert_eq!(prefs.get_string("unrelated").await.unwrap().as_deref(), Some("kept"));
}

#[tokio::test]
async fn save_reports_storage_failures() {
    let temp = TempDir::new().unwrap();
    let storage = Storage::builder().root(temp.path()).connect().await.unwrap();
    let prefs = storage.preferences("broken").unwrap();
    // A directory where the preferences file should be makes every write fail.
    std::fs::create_dir(temp.path().join("broken.prefs.json")).unwrap();

    let err = SkyRegistry::seeded(10).save(&prefs).await.expect_err("write must fail");
    assert!(matches!(err, RegistryError::Storage { .. }), "unexpected error: {err:?}");

    let mut sky = SkyRegistry::seeded(11);
    sky.add_star(StarSize::Big);
    sky.load(&prefs).await;
    assert_eq!(sky.len(), 1);
}
