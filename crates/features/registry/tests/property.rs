use proptest::prelude::*;
use sky_domain::{Star, StarBrightness, StarColor, StarSize};
use sky_registry::{MAX_STARS, SkyRegistry};
use sky_storage::MemoryPreferences;

fn size() -> impl Strategy<Value = StarSize> {
    prop_oneof![Just(StarSize::Small), Just(StarSize::Big)]
}

fn star() -> impl Strategy<Value = Star> {
    (size(), 0..StarColor::ALL.len(), 0..StarBrightness::ALL.len())
        .prop_map(|(size, color, bright)| Star::new(size, StarColor::ALL[color], StarBrightness::ALL[bright]))
}

proptest! {
    #[test]
    fn length_is_capped_by_capacity(seed in any::<u64>(), sizes in proptest::collection::vec(size(), 0..30)) {
        let mut sky = SkyRegistry::seeded(seed);
        for size in &sizes {
            sky.add_star(*size);
        }

        prop_assert_eq!(sky.len(), sizes.len().min(MAX_STARS));
        prop_assert_eq!(sky.is_full().get(), sizes.len() >= MAX_STARS);
        let kept: Vec<_> = sky.stars().iter().map(Star::size).collect();
        prop_assert_eq!(kept.as_slice(), &sizes[..sky.len()]);
    }

    #[test]
    fn saved_lists_load_back_equal(stars in proptest::collection::vec(star(), 0..MAX_STARS)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let prefs = MemoryPreferences::new();

        let restored = runtime.block_on(async {
            let encoded = serde_json::to_string(&stars).unwrap();
            sky_storage::PreferenceStore::put_string(&prefs, sky_registry::SAVED_STARS, &encoded)
                .await
                .unwrap();

            let mut sky = SkyRegistry::seeded(0);
            sky.load(&prefs).await;
            let mut copy = SkyRegistry::seeded(1);
            sky.save(&prefs).await.unwrap();
            copy.load(&prefs).await;
            copy.stars().to_vec()
        });

        prop_assert_eq!(restored, stars);
    }
}
