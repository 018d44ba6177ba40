//! Parameter Catalog
//!
//! Static table of water-use categories. Each category lists the parameters a
//! sample must be tested for, with a safe range (acceptable for that use) and
//! an absolute range (physically plausible input).
//!
//! ## Architecture
//! - `mod.rs` - CategoryId, Range, Parameter, WaterCategory, ParameterCatalog
//! - `builtin.rs` - The four hardcoded default categories
//!
//! A catalog is validated once when built and is read-only afterwards, so it
//! can be shared across sessions behind an `Arc`.

pub mod builtin;

use crate::error::CatalogError;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Water-use category identifier
///
/// Catalog files are parsed through `FromStr`, so they accept the same
/// spellings as callers of `get_category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CategoryId {
    Potable,
    NonPotable,
    Agricultural,
    Industrial,
}

impl CategoryId {
    pub const ALL: [CategoryId; 4] = [
        CategoryId::Potable,
        CategoryId::NonPotable,
        CategoryId::Agricultural,
        CategoryId::Industrial,
    ];

    /// Lowercase identifier used by callers
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Potable => "potable",
            CategoryId::NonPotable => "nonpotable",
            CategoryId::Agricultural => "agricultural",
            CategoryId::Industrial => "industrial",
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            CategoryId::Potable => "Potable Water",
            CategoryId::NonPotable => "Non-Potable Water",
            CategoryId::Agricultural => "Agricultural Water",
            CategoryId::Industrial => "Industrial Water",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "potable" => Ok(CategoryId::Potable),
            "nonpotable" | "non-potable" | "non_potable" => Ok(CategoryId::NonPotable),
            "agricultural" => Ok(CategoryId::Agricultural),
            "industrial" => Ok(CategoryId::Industrial),
            _ => Err(CatalogError::UnknownCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for CategoryId {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Format as "6.5-8.5", trimming trailing zeros
    pub fn display_text(&self) -> String {
        format!("{}-{}", format_number(self.min), format_number(self.max))
    }
}

/// At least three decimals and four significant digits, trailing zeros dropped
pub(crate) fn format_number(value: f64) -> String {
    let magnitude = if value == 0.0 || !value.is_finite() {
        0
    } else {
        value.abs().log10().floor() as i32
    };
    let decimals = (3 - magnitude).clamp(3, 12) as usize;
    let text = format!("{:.*}", decimals, value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// One measurable parameter within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Display name, unique within its category (e.g., "pH")
    pub name: String,

    /// Unit for display only (e.g., "NTU", "mg/L"); empty when unitless
    #[serde(default)]
    pub unit: String,

    /// Interval considered acceptable for this water use
    pub safe_range: Range,

    /// Physically plausible interval; inputs outside are rejected
    pub absolute_range: Range,
}

impl Parameter {
    pub fn new(name: &str, unit: &str, safe_range: Range, absolute_range: Range) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            safe_range,
            absolute_range,
        }
    }

    /// Check `absolute.min <= safe.min <= safe.max <= absolute.max` with finite bounds
    fn check_ranges(&self) -> std::result::Result<(), String> {
        let bounds = [
            self.absolute_range.min,
            self.safe_range.min,
            self.safe_range.max,
            self.absolute_range.max,
        ];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err("bounds must be finite".to_string());
        }
        if bounds.windows(2).any(|w| w[0] > w[1]) {
            return Err(format!(
                "expected absolute {} to enclose safe {}",
                self.absolute_range.display_text(),
                self.safe_range.display_text()
            ));
        }
        Ok(())
    }
}

/// A water-use category and its ordered parameter list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterCategory {
    pub id: CategoryId,
    pub parameters: Vec<Parameter>,
}

impl WaterCategory {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    fn validate(&self) -> std::result::Result<(), CatalogError> {
        if self.parameters.is_empty() {
            return Err(CatalogError::EmptyCategory(self.id.to_string()));
        }

        for (i, param) in self.parameters.iter().enumerate() {
            if self.parameters[..i].iter().any(|p| p.name == param.name) {
                return Err(CatalogError::DuplicateParameter {
                    category: self.id.to_string(),
                    parameter: param.name.clone(),
                });
            }
            param.check_ranges().map_err(|reason| CatalogError::InvalidRange {
                category: self.id.to_string(),
                parameter: param.name.clone(),
                reason,
            })?;
        }

        Ok(())
    }
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<WaterCategory>,
}

/// Read-only table of all known categories
#[derive(Debug, Clone)]
pub struct ParameterCatalog {
    categories: FxHashMap<CategoryId, WaterCategory>,
}

impl ParameterCatalog {
    /// Build a catalog, rejecting empty or repeated categories, duplicate
    /// parameter names and ranges that violate the absolute/safe ordering
    pub fn new(categories: Vec<WaterCategory>) -> std::result::Result<Self, CatalogError> {
        let mut map = FxHashMap::default();
        for category in categories {
            category.validate()?;
            let id = category.id;
            if map.insert(id, category).is_some() {
                return Err(CatalogError::DuplicateCategory(id.to_string()));
            }
        }
        Ok(Self { categories: map })
    }

    /// The four default categories
    pub fn builtin() -> Self {
        let categories = CategoryId::ALL
            .iter()
            .map(|&id| WaterCategory {
                id,
                parameters: builtin::parameters_for(id),
            })
            .map(|c| (c.id, c))
            .collect();
        Self { categories }
    }

    /// Load a catalog from a JSON file of the form `{"categories": [...]}`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let file: CatalogFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse catalog JSON: {:?}", path))?;

        let catalog = Self::new(file.categories)
            .with_context(|| format!("Invalid catalog: {:?}", path))?;

        tracing::info!(
            "Loaded catalog from {:?} ({} categories)",
            path,
            catalog.categories.len()
        );
        Ok(catalog)
    }

    pub fn category(&self, id: CategoryId) -> std::result::Result<&WaterCategory, CatalogError> {
        self.categories
            .get(&id)
            .ok_or_else(|| CatalogError::UnknownCategory(id.to_string()))
    }

    /// Resolve a textual category id
    pub fn get_category(&self, id: &str) -> std::result::Result<&WaterCategory, CatalogError> {
        let parsed: CategoryId = id.parse()?;
        self.categories
            .get(&parsed)
            .ok_or_else(|| CatalogError::UnknownCategory(id.to_string()))
    }

    /// Ordered parameters for a category
    pub fn get_parameters(&self, id: &str) -> std::result::Result<&[Parameter], CatalogError> {
        self.get_category(id).map(|c| c.parameters.as_slice())
    }

    /// Category ids present in this catalog, in declaration order of `CategoryId`
    pub fn category_ids(&self) -> Vec<CategoryId> {
        let mut ids: Vec<CategoryId> = self.categories.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for ParameterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id_parsing() {
        assert_eq!("potable".parse::<CategoryId>().unwrap(), CategoryId::Potable);
        assert_eq!("Non-Potable".parse::<CategoryId>().unwrap(), CategoryId::NonPotable);
        assert_eq!("nonpotable".parse::<CategoryId>().unwrap(), CategoryId::NonPotable);
        assert_eq!(
            "seawater".parse::<CategoryId>(),
            Err(CatalogError::UnknownCategory("seawater".to_string()))
        );
    }

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = ParameterCatalog::builtin();
        assert_eq!(catalog.category_ids(), CategoryId::ALL.to_vec());

        for id in CategoryId::ALL {
            let category = catalog.category(id).unwrap();
            assert_eq!(category.parameters.len(), 4);
            assert!(category.validate().is_ok(), "{} failed validation", id);
        }
    }

    #[test]
    fn test_get_parameters() {
        let catalog = ParameterCatalog::builtin();
        let params = catalog.get_parameters("potable").unwrap();
        assert_eq!(params[0].name, "pH");
        assert_eq!(params[0].safe_range, Range::new(6.5, 8.5));
        assert_eq!(params[1].name, "Turbidity");
        assert_eq!(params[1].absolute_range, Range::new(0.0, 100.0));

        assert_eq!(
            catalog.get_parameters("brackish"),
            Err(CatalogError::UnknownCategory("brackish".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_category() {
        let result = ParameterCatalog::new(vec![WaterCategory {
            id: CategoryId::Industrial,
            parameters: vec![],
        }]);
        assert_eq!(result.unwrap_err(), CatalogError::EmptyCategory("industrial".to_string()));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let result = ParameterCatalog::new(vec![WaterCategory {
            id: CategoryId::Potable,
            parameters: vec![Parameter::new("pH", "", Range::new(6.5, 8.5), Range::new(7.0, 14.0))],
        }]);
        assert!(matches!(result, Err(CatalogError::InvalidRange { .. })));
    }

    #[test]
    fn test_rejects_duplicate_parameter() {
        let ph = Parameter::new("pH", "", Range::new(6.5, 8.5), Range::new(0.0, 14.0));
        let result = ParameterCatalog::new(vec![WaterCategory {
            id: CategoryId::Potable,
            parameters: vec![ph.clone(), ph],
        }]);
        assert!(matches!(result, Err(CatalogError::DuplicateParameter { .. })));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let lead = Parameter::new("Lead", "mg/L", Range::new(0.0, 0.01), Range::new(0.0, 1.0));
        let result = ParameterCatalog::new(vec![
            WaterCategory {
                id: CategoryId::Potable,
                parameters: builtin::parameters_for(CategoryId::Potable),
            },
            WaterCategory {
                id: CategoryId::Potable,
                parameters: vec![lead],
            },
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateCategory("potable".to_string())
        );
    }

    #[test]
    fn test_catalog_file_ids_match_from_str() {
        for (text, expected) in [
            ("\"Potable\"", CategoryId::Potable),
            ("\"non-potable\"", CategoryId::NonPotable),
            ("\"NON_POTABLE\"", CategoryId::NonPotable),
            ("\" industrial \"", CategoryId::Industrial),
        ] {
            let from_json: CategoryId = serde_json::from_str(text).unwrap();
            let from_str: CategoryId = text.trim_matches('"').parse().unwrap();
            assert_eq!(from_json, expected);
            assert_eq!(from_str, expected);
        }

        assert!(serde_json::from_str::<CategoryId>("\"brackish\"").is_err());
        assert_eq!(serde_json::to_string(&CategoryId::NonPotable).unwrap(), "\"nonpotable\"");
    }

    #[test]
    fn test_partial_catalog_reports_missing_category() {
        let catalog = ParameterCatalog::new(vec![WaterCategory {
            id: CategoryId::Potable,
            parameters: builtin::parameters_for(CategoryId::Potable),
        }])
        .unwrap();
        assert_eq!(
            catalog.get_category("industrial").unwrap_err(),
            CatalogError::UnknownCategory("industrial".to_string())
        );
    }

    #[test]
    fn test_range_display() {
        assert_eq!(Range::new(6.5, 8.5).display_text(), "6.5-8.5");
        assert_eq!(Range::new(0.0, 1.0).display_text(), "0-1");
        assert_eq!(Range::new(0.2, 2.0).display_text(), "0.2-2");
    }

    #[test]
    fn test_format_number_keeps_small_differences() {
        assert_eq!(format_number(250.0), "250");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.3004), "0.3004");
        assert_eq!(format_number(0.3004 - 0.3), "0.0004");
        assert_eq!(format_number(12.34567), "12.346");
    }

    #[test]
    fn test_catalog_file_parsing() {
        let json = r#"{
            "categories": [
                {
                    "id": "non-potable",
                    "parameters": [
                        {"name": "pH", "safe_range": {"min": 6.0, "max": 9.0},
                         "absolute_range": {"min": 0.0, "max": 14.0}}
                    ]
                }
            ]
        }"#;
        let file: CatalogFile = serde_json::from_str(json).unwrap();
        let catalog = ParameterCatalog::new(file.categories).unwrap();
        let params = catalog.get_parameters("nonpotable").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].unit, "");
    }
}
