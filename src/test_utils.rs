//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a four-part assembly version ("1.2.3.4")
    pub fn assembly_version() -> impl Strategy<Value = String> {
        (0u32..100, 0u32..100, 0u32..1000, 0u32..1000)
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
    }

    /// Generate a plugin InternalName
    pub fn internal_name() -> impl Strategy<Value = String> {
        "[A-Z][A-Za-z0-9]{2,20}(_[A-Z][0-9])?"
    }

    /// Generate an epoch timestamp between 2020 and 2040
    pub fn epoch_seconds() -> impl Strategy<Value = u64> {
        1_577_836_800u64..2_208_988_800u64
    }

    /// Generate extra manifest keys that must survive a rewrite
    pub fn extra_fields() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[A-Z][a-z]{2,10}", "[ -~]{0,20}"), 0..6)
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::config::defaults::MIN_PROPTEST_ITERATIONS;
    use crate::core::manifest::BuildManifest;
    use crate::core::plugin_index::{EntryUpdate, PluginIndex};
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};
    use std::path::Path;

    fn index_with(entries: usize, last_updated: u64) -> PluginIndex {
        let items: Vec<Value> = (0..entries)
            .map(|i| {
                json!({
                    "InternalName": format!("Plugin{i}"),
                    "AssemblyVersion": "0.0.0.1",
                    "LastUpdated": last_updated,
                })
            })
            .collect();
        PluginIndex::from_json(Path::new("pluginmaster.json"), &Value::Array(items).to_string())
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        #[test]
        fn test_assembly_version_generator(version in assembly_version()) {
            let parts: Vec<&str> = version.split('.').collect();
            prop_assert_eq!(parts.len(), 4);
            for part in parts {
                prop_assert!(part.parse::<u32>().is_ok());
            }
        }

        #[test]
        fn test_index_version_copied_to_both_fields(
            version in assembly_version(),
            entries in 1usize..5,
            now in epoch_seconds(),
        ) {
            let mut index = index_with(entries, 0);
            let position = entries - 1;
            let update = EntryUpdate { version: &version, internal_name: None, now };

            index.apply(position, &update).unwrap();
            let entry = index.entry(position).unwrap();

            prop_assert_eq!(entry["AssemblyVersion"].as_str(), Some(version.as_str()));
            prop_assert_eq!(entry["TestingAssemblyVersion"].as_str(), Some(version.as_str()));
        }

        #[test]
        fn test_last_updated_non_decreasing(previous in epoch_seconds(), now in epoch_seconds()) {
            let mut index = index_with(1, previous);
            let update = EntryUpdate { version: "1.0.0.0", internal_name: None, now };

            let result = index.apply(0, &update).unwrap();

            prop_assert!(result.last_updated >= previous);
            prop_assert!(result.last_updated >= now);
        }

        #[test]
        fn test_other_entries_untouched(
            version in assembly_version(),
            name in internal_name(),
            now in epoch_seconds(),
        ) {
            let mut index = index_with(3, 5);
            let before = index.entry(0).unwrap().clone();
            let update = EntryUpdate { version: &version, internal_name: Some(&name), now };

            index.apply(2, &update).unwrap();

            prop_assert_eq!(index.entry(0).unwrap(), &before);
            prop_assert_eq!(index.entry(2).unwrap()["InternalName"].as_str(), Some(name.as_str()));
        }

        #[test]
        fn test_manifest_rewrite_keeps_fields(
            version in assembly_version(),
            name in internal_name(),
            extras in extra_fields(),
        ) {
            let mut fields = Map::new();
            for (k, v) in &extras {
                fields.insert(k.clone(), Value::String(v.clone()));
            }
            fields.insert("AssemblyVersion".to_string(), Value::String(version.clone()));
            let text = Value::Object(fields.clone()).to_string();

            let mut manifest = BuildManifest::from_json(Path::new("m.json"), &text).unwrap();
            manifest.set_internal_name(&name);
            let reparsed: Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();

            prop_assert_eq!(reparsed["AssemblyVersion"].as_str(), Some(version.as_str()));
            prop_assert_eq!(reparsed["InternalName"].as_str(), Some(name.as_str()));
            for (k, _) in &extras {
                prop_assert_eq!(&reparsed[k.as_str()], &fields[k.as_str()]);
            }
        }
    }
}
