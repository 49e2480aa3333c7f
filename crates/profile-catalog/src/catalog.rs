use std::path::Path;

use alu_types::{ProfileSpec, Standard};
use tracing::debug;

use crate::errors::CatalogError;
use crate::load::parse_profiles;

const BUILTIN_CATALOG: &str = include_str!("../assets/profiles.json");

/// Selection criteria; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub standard: Option<Standard>,
    pub series: Option<String>,
    /// Case-insensitive substring of the id or the name.
    pub search: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, spec: &ProfileSpec) -> bool {
        if let Some(standard) = self.standard {
            if spec.standard != standard {
                return false;
            }
        }
        if let Some(series) = &self.series {
            if spec.series != *series {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty()
                && !spec.id.to_lowercase().contains(&needle)
                && !spec.name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// In-memory list of profile specs, in catalog file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    profiles: Vec<ProfileSpec>,
}

impl Catalog {
    pub fn new(profiles: Vec<ProfileSpec>) -> Self {
        Self { profiles }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(parse_profiles(json)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        debug!(path = %path.display(), profiles = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn profiles(&self) -> &[ProfileSpec] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ProfileSpec> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&ProfileSpec> {
        self.profiles.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Distinct series tags, sorted.
    pub fn series(&self) -> Vec<&str> {
        let mut series: Vec<&str> = self.profiles.iter().map(|p| p.series.as_str()).collect();
        series.sort_unstable();
        series.dedup();
        series
    }
}
