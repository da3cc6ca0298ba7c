//! # Materials Database
//!
//! Material properties for snap-fit design: a fixed table of built-in
//! plastics plus user-saved custom materials. The two sources merge into a
//! single name lookup in which a custom entry shadows a built-in of the same
//! name.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::materials::{MaterialLibrary, MaterialProperties, save_material};
//! use snapfit_core::materials::store::MemoryStore;
//!
//! let mut store = MemoryStore::new();
//! save_material(&mut store, "PA66 GF30", MaterialProperties::new(870_000.0, 0.018))?;
//!
//! let library = MaterialLibrary::load(&store)?;
//! let abs = library.get("ABS (Generic)").unwrap();
//! assert_eq!(abs.elastic_modulus, 320_000.0);
//! assert!(library.get("PA66 GF30").is_some());
//! # Ok::<(), snapfit_core::errors::CalcError>(())
//! ```

pub mod profiles;
pub mod store;

pub use profiles::CrossSectionProfile;
pub use store::{CustomMaterials, JsonFileStore, MaterialStore, MemoryStore};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Stiffness and strain limit of a snap-fit material.
///
/// Serializes as `{ "E": ..., "eps": ... }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Elastic (secant) modulus E, in the calculator's pressure unit
    #[serde(rename = "E")]
    pub elastic_modulus: f64,
    /// Permissible strain ε (dimensionless fraction, e.g. 0.025 = 2.5%)
    #[serde(rename = "eps")]
    pub max_strain: f64,
}

impl MaterialProperties {
    /// Create material properties
    pub const fn new(elastic_modulus: f64, max_strain: f64) -> Self {
        MaterialProperties {
            elastic_modulus,
            max_strain,
        }
    }
}

/// A named entry in the built-in material table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltInMaterial {
    /// Display name, also the lookup key
    pub name: &'static str,
    /// Material properties (E in psi)
    pub properties: MaterialProperties,
}

/// Built-in materials, in display order
pub const BUILT_IN_MATERIALS: [BuiltInMaterial; 4] = [
    BuiltInMaterial {
        name: "ABS (Generic)",
        properties: MaterialProperties::new(320_000.0, 0.025),
    },
    BuiltInMaterial {
        name: "Polycarbonate (PC)",
        properties: MaterialProperties::new(350_000.0, 0.020),
    },
    BuiltInMaterial {
        name: "Polypropylene (PP)",
        properties: MaterialProperties::new(180_000.0, 0.040),
    },
    BuiltInMaterial {
        name: "Nylon 6",
        properties: MaterialProperties::new(400_000.0, 0.015),
    },
];

/// Look up a built-in material by exact name
pub fn built_in(name: &str) -> Option<MaterialProperties> {
    BUILT_IN_MATERIALS
        .iter()
        .find(|m| m.name == name)
        .map(|m| m.properties)
}

/// Where a library entry comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialSource {
    /// Compile-time built-in table
    BuiltIn,
    /// User-saved material (may shadow a built-in)
    Custom,
}

/// One entry of the merged material listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub name: String,
    pub properties: MaterialProperties,
    pub source: MaterialSource,
}

/// Built-in materials merged with a snapshot of the custom materials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLibrary {
    custom: CustomMaterials,
}

impl MaterialLibrary {
    /// Library over an explicit set of custom materials
    pub fn new(custom: CustomMaterials) -> Self {
        MaterialLibrary { custom }
    }

    /// Library over whatever the store currently holds
    pub fn load<S: MaterialStore + ?Sized>(store: &S) -> CalcResult<Self> {
        Ok(MaterialLibrary::new(store.load()?))
    }

    /// Look up a material by exact name; custom entries take precedence
    pub fn get(&self, name: &str) -> Option<MaterialProperties> {
        if let Some(props) = self.custom.get(name) {
            if built_in(name).is_some() {
                tracing::debug!(material = name, "custom material overrides built-in");
            }
            return Some(*props);
        }
        built_in(name)
    }

    /// Like [`get`](Self::get) but reports an unknown name as an error
    pub fn require(&self, name: &str) -> CalcResult<MaterialProperties> {
        self.get(name).ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Whether a name resolves to anything
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Custom materials in this snapshot
    pub fn custom(&self) -> &CustomMaterials {
        &self.custom
    }

    /// Merged listing.
    ///
    /// Built-ins come first in table order; a custom material with a
    /// built-in's name takes that slot. Remaining custom materials follow in
    /// name order.
    pub fn entries(&self) -> Vec<MaterialEntry> {
        let mut entries: Vec<MaterialEntry> = BUILT_IN_MATERIALS
            .iter()
            .map(|m| match self.custom.get(m.name) {
                Some(props) => MaterialEntry {
                    name: m.name.to_string(),
                    properties: *props,
                    source: MaterialSource::Custom,
                },
                None => MaterialEntry {
                    name: m.name.to_string(),
                    properties: m.properties,
                    source: MaterialSource::BuiltIn,
                },
            })
            .collect();

        entries.extend(
            self.custom
                .iter()
                .filter(|(name, _)| built_in(name).is_none())
                .map(|(name, props)| MaterialEntry {
                    name: name.clone(),
                    properties: *props,
                    source: MaterialSource::Custom,
                }),
        );

        entries
    }

    /// Names in listing order
    pub fn names(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.name).collect()
    }
}

/// Save a custom material under `name`, replacing any previous entry.
///
/// Reads the whole custom mapping, inserts, and writes it back.
/// Non-finite properties are refused: JSON has no NaN or infinity, so they
/// would be written as `null` and the store would no longer load.
pub fn save_material<S: MaterialStore + ?Sized>(
    store: &mut S,
    name: &str,
    properties: MaterialProperties,
) -> CalcResult<()> {
    if name.trim().is_empty() {
        return Err(CalcError::invalid_input("name", name, "Material name must not be empty"));
    }
    if !properties.elastic_modulus.is_finite() {
        return Err(CalcError::invalid_input(
            "elastic_modulus",
            properties.elastic_modulus.to_string(),
            "Elastic modulus must be a finite number",
        ));
    }
    if !properties.max_strain.is_finite() {
        return Err(CalcError::invalid_input(
            "max_strain",
            properties.max_strain.to_string(),
            "Maximum strain must be a finite number",
        ));
    }
    let mut custom = store.load()?;
    custom.insert(name.to_string(), properties);
    store.save(&custom)
}

/// Remove every custom material. Built-ins are unaffected.
pub fn clear_custom_materials<S: MaterialStore + ?Sized>(store: &mut S) -> CalcResult<()> {
    store.clear()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_lookup() {
        let abs = built_in("ABS (Generic)").unwrap();
        assert_eq!(abs.elastic_modulus, 320_000.0);
        assert_eq!(abs.max_strain, 0.025);

        let nylon = built_in("Nylon 6").unwrap();
        assert_eq!(nylon, MaterialProperties::new(400_000.0, 0.015));

        // Exact match only
        assert!(built_in("abs (generic)").is_none());
    }

    #[test]
    fn test_properties_serialize_with_short_keys() {
        let json = serde_json::to_string(&MaterialProperties::new(180_000.0, 0.04)).unwrap();
        assert_eq!(json, r#"{"E":180000.0,"eps":0.04}"#);
    }

    #[test]
    fn test_save_then_clear() {
        let mut store = MemoryStore::new();
        save_material(&mut store, "X", MaterialProperties::new(1.0, 0.5)).unwrap();
        assert!(MaterialLibrary::load(&store).unwrap().contains("X"));

        clear_custom_materials(&mut store).unwrap();
        let library = MaterialLibrary::load(&store).unwrap();
        assert!(!library.contains("X"));
        for m in BUILT_IN_MATERIALS {
            assert!(library.contains(m.name));
        }
    }

    #[test]
    fn test_custom_overrides_built_in() {
        let mut store = MemoryStore::new();
        let custom = MaterialProperties::new(300_000.0, 0.03);
        save_material(&mut store, "ABS (Generic)", custom).unwrap();

        let library = MaterialLibrary::load(&store).unwrap();
        assert_eq!(library.get("ABS (Generic)"), Some(custom));

        let entries = library.entries();
        assert_eq!(entries.len(), BUILT_IN_MATERIALS.len());
        assert_eq!(entries[0].name, "ABS (Generic)");
        assert_eq!(entries[0].source, MaterialSource::Custom);
        assert_eq!(entries[0].properties, custom);
    }

    #[test]
    fn test_listing_order() {
        let mut store = MemoryStore::new();
        save_material(&mut store, "Zytel", MaterialProperties::new(1.0, 0.01)).unwrap();
        save_material(&mut store, "Acetal", MaterialProperties::new(2.0, 0.02)).unwrap();

        let names = MaterialLibrary::load(&store).unwrap().names();
        assert_eq!(
            names,
            vec![
                "ABS (Generic)",
                "Polycarbonate (PC)",
                "Polypropylene (PP)",
                "Nylon 6",
                "Acetal",
                "Zytel",
            ]
        );
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let mut store = MemoryStore::new();
        save_material(&mut store, "Mine", MaterialProperties::new(1.0, 0.1)).unwrap();
        save_material(&mut store, "Mine", MaterialProperties::new(2.0, 0.2)).unwrap();

        let library = MaterialLibrary::load(&store).unwrap();
        assert_eq!(library.get("Mine"), Some(MaterialProperties::new(2.0, 0.2)));
        assert_eq!(library.custom().len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut store = MemoryStore::new();
        let err = save_material(&mut store, "  ", MaterialProperties::new(1.0, 0.1)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_properties_rejected() {
        let mut store = MemoryStore::new();
        save_material(&mut store, "Good", MaterialProperties::new(1.0, 0.1)).unwrap();

        let err = save_material(&mut store, "Bad", MaterialProperties::new(f64::NAN, 0.1)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        let err = save_material(&mut store, "Bad", MaterialProperties::new(1.0, f64::INFINITY)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(save_material(&mut store, "Bad", MaterialProperties::new(f64::NEG_INFINITY, 0.1)).is_err());

        let library = MaterialLibrary::load(&store).unwrap();
        assert!(library.contains("Good"));
        assert!(!library.contains("Bad"));
    }

    #[test]
    fn test_unknown_material() {
        let library = MaterialLibrary::default();
        assert!(library.get("Unobtainium").is_none());
        assert_eq!(
            library.require("Unobtainium").unwrap_err().error_code(),
            "MATERIAL_NOT_FOUND"
        );
    }

    #[test]
    fn test_memory_store_with_materials() {
        let mut custom = CustomMaterials::new();
        custom.insert("Pre".to_string(), MaterialProperties::new(5.0, 0.05));
        let store = MemoryStore::with_materials(custom);
        assert!(MaterialLibrary::load(&store).unwrap().contains("Pre"));
    }
}
