//! Nearby creature and trainer generation around the player.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogLookup, CreatureData, StatEntry};
use crate::error::CatalogError;
use crate::geo::{planar_distance_meters, Coordinate};
use crate::rng::RandomSource;

pub const TRAINER_LEVELS: RangeInclusive<u32> = 10..=29;
pub const TRAINER_REWARDS: RangeInclusive<u32> = 200..=699;
const FALLBACK_TRAINER_NAME: &str = "Trainer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    /// Unique within one generation cycle; the candidate slot it was drawn in.
    pub id: u32,
    pub catalog_id: u32,
    pub name: String,
    pub image_ref: Option<String>,
    pub elemental_types: Vec<String>,
    pub base_stats: Vec<StatEntry>,
    pub position: Coordinate,
    pub distance_meters: u32,
}

impl CreatureRecord {
    pub fn from_catalog(
        id: u32,
        data: CreatureData,
        center: Coordinate,
        d_lat: f64,
        d_lng: f64,
    ) -> Self {
        Self {
            id,
            catalog_id: data.id,
            name: data.name,
            image_ref: data.image_ref,
            elemental_types: data.types,
            base_stats: data.stats,
            position: center.offset(d_lat, d_lng),
            distance_meters: planar_distance_meters(d_lat, d_lng),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerRecord {
    pub id: u32,
    pub name: String,
    pub level: u32,
    pub reward: u64,
    pub position: Coordinate,
    pub distance_meters: u32,
}

#[derive(Debug, Clone)]
pub struct CreatureGenerator {
    pub catalog_size: u32,
    pub spread: f64,
    pub lookup_timeout: Duration,
}

impl Default for CreatureGenerator {
    fn default() -> Self {
        Self {
            catalog_size: 151,
            spread: 0.005,
            lookup_timeout: Duration::from_secs(5),
        }
    }
}

/// A species id and placement drawn before the catalog is consulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub catalog_id: u32,
    pub d_lat: f64,
    pub d_lng: f64,
}

impl CreatureGenerator {
    /// Draws every random value of a generation cycle up front so the result
    /// does not depend on the order lookups complete in.
    pub fn draw_candidates<R: RandomSource + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Vec<Candidate> {
        (0..count)
            .map(|_| {
                let catalog_id = rng.roll(1..=self.catalog_size.max(1));
                let d_lat = rng.spread(self.spread);
                let d_lng = rng.spread(self.spread);
                Candidate {
                    catalog_id,
                    d_lat,
                    d_lng,
                }
            })
            .collect()
    }

    /// Looks every candidate up concurrently; failed or late lookups are dropped.
    pub async fn resolve(
        &self,
        center: Coordinate,
        candidates: &[Candidate],
        catalog: Arc<dyn CatalogLookup>,
    ) -> Vec<CreatureRecord> {
        let mut lookups = JoinSet::new();
        for (slot, candidate) in candidates.iter().enumerate() {
            let catalog = Arc::clone(&catalog);
            let id = candidate.catalog_id;
            let timeout = self.lookup_timeout;
            lookups.spawn(async move {
                let result = match tokio::time::timeout(timeout, catalog.fetch_creature(id)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(CatalogError::Timeout(id)),
                };
                (slot, result)
            });
        }

        let mut resolved: Vec<Option<CreatureData>> = vec![None; candidates.len()];
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((slot, Ok(data))) => resolved[slot] = Some(data),
                Ok((slot, Err(err))) => {
                    warn!(target: "pokeworld.generator", slot, error = %err, "catalog lookup failed; skipping candidate");
                }
                Err(err) => {
                    warn!(target: "pokeworld.generator", error = %err, "catalog lookup task aborted");
                }
            }
        }

        let creatures: Vec<CreatureRecord> = candidates
            .iter()
            .zip(resolved)
            .enumerate()
            .filter_map(|(slot, (candidate, data))| {
                data.map(|data| {
                    CreatureRecord::from_catalog(
                        slot as u32,
                        data,
                        center,
                        candidate.d_lat,
                        candidate.d_lng,
                    )
                })
            })
            .collect();
        info!(
            target: "pokeworld.generator",
            requested = candidates.len(),
            generated = creatures.len(),
            "nearby creatures generated"
        );
        creatures
    }
}

pub async fn generate_creatures<R: RandomSource + ?Sized>(
    generator: &CreatureGenerator,
    center: Coordinate,
    count: usize,
    catalog: Arc<dyn CatalogLookup>,
    rng: &mut R,
) -> Vec<CreatureRecord> {
    let candidates = generator.draw_candidates(count, rng);
    generator.resolve(center, &candidates, catalog).await
}

/// Purely local: trainers need no catalog.
pub fn generate_trainers<R: RandomSource + ?Sized>(
    center: Coordinate,
    count: usize,
    names: &[String],
    spread: f64,
    rng: &mut R,
) -> Vec<TrainerRecord> {
    let trainers: Vec<TrainerRecord> = (0..count)
        .map(|idx| {
            let d_lat = rng.spread(spread);
            let d_lng = rng.spread(spread);
            let name = rng
                .pick_index(names.len())
                .map(|pick| names[pick].clone())
                .unwrap_or_else(|| FALLBACK_TRAINER_NAME.to_owned());
            let level = rng.roll(TRAINER_LEVELS);
            let reward = u64::from(rng.roll(TRAINER_REWARDS));
            debug!(target: "pokeworld.generator", id = idx, %name, level, reward, "trainer placed");
            TrainerRecord {
                id: idx as u32,
                name,
                level,
                reward,
                position: center.offset(d_lat, d_lng),
                distance_meters: planar_distance_meters(d_lat, d_lng),
            }
        })
        .collect();
    info!(target: "pokeworld.generator", generated = trainers.len(), "nearby trainers generated");
    trainers
}
