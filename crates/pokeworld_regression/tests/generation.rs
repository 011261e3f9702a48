use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pokeworld_core::{
    generate_creatures, generate_trainers, planar_distance_meters, CatalogError, CatalogLookup,
    Coordinate, CreatureData, CreatureGenerator, CreatureRecord, FixedLocation, GameConfig,
    ScriptedRng, Session, SimulationRng, StaticCatalog, TrainerRecord,
};
use pokeworld_regression::DEFAULT_SEED;

const CENTER: Coordinate = Coordinate {
    lat: -33.0246,
    lng: -71.5518,
};

/// Serves every species but refuses odd ids.
struct EvenOnly(StaticCatalog);

#[async_trait]
impl CatalogLookup for EvenOnly {
    async fn fetch_creature(&self, id: u32) -> Result<CreatureData, CatalogError> {
        if id % 2 == 1 {
            return Err(CatalogError::LookupFailed {
                id,
                reason: "odd species unavailable".to_owned(),
            });
        }
        self.0.fetch_creature(id).await
    }
}

/// Answers species 1 immediately and stalls on everything else.
struct Stalling(StaticCatalog);

#[async_trait]
impl CatalogLookup for Stalling {
    async fn fetch_creature(&self, id: u32) -> Result<CreatureData, CatalogError> {
        if id != 1 {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        self.0.fetch_creature(id).await
    }
}

/// Samples that make the generator draw species `id` at a fixed offset.
fn species(id: u32, offset: f64) -> [f64; 3] {
    [(f64::from(id) - 0.5) / 151.0, offset, offset]
}

fn bundled() -> StaticCatalog {
    StaticCatalog::first_generation().expect("bundled catalog parses")
}

async fn creatures(seed: u64) -> Vec<CreatureRecord> {
    let catalog: Arc<dyn CatalogLookup> = Arc::new(bundled());
    generate_creatures(
        &CreatureGenerator::default(),
        CENTER,
        5,
        catalog,
        &mut SimulationRng::new(seed),
    )
    .await
}

fn trainers(seed: u64) -> Vec<TrainerRecord> {
    generate_trainers(
        CENTER,
        3,
        &GameConfig::default().world.trainer_names,
        0.0075,
        &mut SimulationRng::new(seed),
    )
}

#[tokio::test]
async fn generation_is_deterministic_per_seed() {
    let baseline = creatures(DEFAULT_SEED).await;
    let repeat = creatures(DEFAULT_SEED).await;
    assert_eq!(baseline, repeat, "same seed should match");
    assert_eq!(baseline.len(), 5);

    let different = creatures(7).await;
    assert_ne!(baseline, different, "different seeds should diverge");

    assert_eq!(trainers(DEFAULT_SEED), trainers(DEFAULT_SEED));
    assert_ne!(trainers(DEFAULT_SEED), trainers(7));
}

#[tokio::test]
async fn generated_entities_respect_bounds() {
    let generator = CreatureGenerator::default();
    for seed in 0..40 {
        let mut rng = SimulationRng::new(seed);
        let candidates = generator.draw_candidates(5, &mut rng);
        let catalog: Arc<dyn CatalogLookup> = Arc::new(bundled());
        let found = generator.resolve(CENTER, &candidates, catalog).await;
        assert_eq!(found.len(), candidates.len());

        for creature in found {
            let drawn = candidates[creature.id as usize];
            assert_eq!(creature.catalog_id, drawn.catalog_id);
            assert!((1..=151).contains(&creature.catalog_id));
            assert!(drawn.d_lat.abs() <= 0.005 && drawn.d_lng.abs() <= 0.005);
            assert_eq!(
                creature.distance_meters,
                planar_distance_meters(drawn.d_lat, drawn.d_lng)
            );
        }
        for trainer in trainers(seed) {
            assert!((10..=29).contains(&trainer.level));
            assert!((200..=699).contains(&trainer.reward));
            let d_lat = trainer.position.lat - CENTER.lat;
            let d_lng = trainer.position.lng - CENTER.lng;
            assert!(d_lat.abs() <= 0.0075 + 1e-9 && d_lng.abs() <= 0.0075 + 1e-9);
        }
    }
}

#[tokio::test]
async fn failed_lookups_are_skipped_in_candidate_order() {
    let generator = CreatureGenerator::default();
    // ids 2, 3, 4, 5 with zero offsets
    let mut rng = ScriptedRng::new([2, 3, 4, 5].into_iter().flat_map(|id| species(id, 0.5)));
    let catalog: Arc<dyn CatalogLookup> = Arc::new(EvenOnly(bundled()));
    let found = generate_creatures(&generator, CENTER, 4, catalog, &mut rng).await;

    let ids: Vec<u32> = found.iter().map(|creature| creature.catalog_id).collect();
    assert_eq!(ids, vec![2, 4]);
    assert!(found.iter().all(|creature| creature.distance_meters == 0));
}

#[tokio::test]
async fn slow_lookups_time_out_without_blocking_the_rest() {
    let generator = CreatureGenerator {
        lookup_timeout: Duration::from_millis(50),
        ..CreatureGenerator::default()
    };
    let mut rng = ScriptedRng::new([1, 7, 1].into_iter().flat_map(|id| species(id, 0.5)));
    let catalog: Arc<dyn CatalogLookup> = Arc::new(Stalling(bundled()));
    let found = generate_creatures(&generator, CENTER, 3, catalog, &mut rng).await;

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|creature| creature.name == "bulbasaur"));
}

#[tokio::test]
async fn session_refresh_populates_both_sets_around_location() {
    let mut session = Session::new(GameConfig::default());
    let here = Coordinate::new(40.4168, -3.7038);
    assert_eq!(session.locate(&FixedLocation::new(here)).await, here);

    let catalog: Arc<dyn CatalogLookup> = Arc::new(bundled());
    session
        .refresh_nearby(catalog, &mut SimulationRng::new(DEFAULT_SEED))
        .await
        .expect("session is idle");

    assert_eq!(session.nearby_creatures().len(), 5);
    assert_eq!(session.nearby_trainers().len(), 3);
    assert!(session
        .nearby_trainers()
        .iter()
        .all(|trainer| (trainer.position.lat - here.lat).abs() <= 0.0075 + 1e-9));
}

#[tokio::test]
async fn missing_location_falls_back_to_default() {
    let mut session = Session::new(GameConfig::default());
    let located = session.locate(&FixedLocation::unavailable()).await;
    assert_eq!(located, GameConfig::default().world.default_location);
    assert_eq!(session.player().location(), located);
}
