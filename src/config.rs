//! Engine Configuration
//!
//! Read from environment variables:
//! - `WATER_CATALOG_PATH` - JSON catalog file; the built-in catalog when unset
//! - `WATER_TIER_POLICY` - `count` (default), `ratio`, or `ratio:GOOD,FAIR`

use crate::catalog::ParameterCatalog;
use crate::engine::TierPolicy;
use crate::session::AssessmentSession;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

pub const CATALOG_PATH_VAR: &str = "WATER_CATALOG_PATH";
pub const TIER_POLICY_VAR: &str = "WATER_TIER_POLICY";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub catalog_path: Option<PathBuf>,
    pub tier_policy: TierPolicy,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (used by `from_env` and tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog_path = lookup(CATALOG_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let tier_policy = match lookup(TIER_POLICY_VAR) {
            Some(value) => parse_policy(&value)
                .with_context(|| format!("Invalid {}", TIER_POLICY_VAR))?,
            None => TierPolicy::default(),
        };

        Ok(Self {
            catalog_path,
            tier_policy,
        })
    }

    /// Load the configured catalog, or the built-in one
    pub fn build_catalog(&self) -> Result<Arc<ParameterCatalog>> {
        let catalog = match &self.catalog_path {
            Some(path) => ParameterCatalog::load(path)?,
            None => ParameterCatalog::builtin(),
        };
        Ok(Arc::new(catalog))
    }

    pub fn new_session(&self, catalog: Arc<ParameterCatalog>) -> AssessmentSession {
        AssessmentSession::with_policy(catalog, self.tier_policy)
    }
}

fn parse_policy(value: &str) -> Result<TierPolicy> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(bounds) = value.strip_prefix("ratio:") {
        let (good, fair) = bounds
            .split_once(',')
            .with_context(|| format!("expected 'ratio:GOOD,FAIR', got '{}'", value))?;
        let good: f64 = good.trim().parse().with_context(|| format!("bad good boundary '{}'", good))?;
        let fair: f64 = fair.trim().parse().with_context(|| format!("bad fair boundary '{}'", fair))?;
        return Ok(TierPolicy::ratio(good, fair)?);
    }

    match value.as_str() {
        "" | "count" => Ok(TierPolicy::UnsafeCount),
        "ratio" => Ok(TierPolicy::DEFAULT_RATIO),
        other => anyhow::bail!("unknown tier policy '{}' (expected 'count' or 'ratio')", other),
    }
}
