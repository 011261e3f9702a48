//! Species catalog lookups.
//!
//! The engine only consumes [`CatalogLookup`]; where the data comes from is
//! the host's business. [`StaticCatalog`] covers tests and offline play.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const FIRST_GENERATION: &str = include_str!("../data/first_generation.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub name: String,
    pub base: u32,
}

/// Catalog view of one species, as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureData {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn fetch_creature(&self, id: u32) -> Result<CreatureData, CatalogError>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<u32, CreatureData>,
}

impl StaticCatalog {
    pub fn new(entries: impl IntoIterator<Item = CreatureData>) -> Self {
        Self {
            entries: entries.into_iter().map(|entry| (entry.id, entry)).collect(),
        }
    }

    /// The 151 bundled first-generation species.
    pub fn first_generation() -> Result<Self> {
        Self::from_json(FIRST_GENERATION).context("bundled catalog is malformed")
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let entries: Vec<CreatureData> = serde_json::from_str(data)?;
        Ok(Self::new(entries))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("failed to parse catalog {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CreatureData> {
        self.entries.get(&id)
    }
}

#[async_trait]
impl CatalogLookup for StaticCatalog {
    async fn fetch_creature(&self, id: u32) -> Result<CreatureData, CatalogError> {
        self.entries
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
