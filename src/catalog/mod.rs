pub mod source;

pub use source::{source_from_location, CatalogSource, FileSource, HttpSource};

use crate::error::{PickerError, Result};
use crate::types::{FilterKey, RestaurantRecord};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// The full set of restaurants for a session. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<RestaurantRecord>,
    cuisines: BTreeSet<String>,
}

impl Catalog {
    /// Build a catalog from already parsed records, rejecting nameless entries
    pub fn new(records: Vec<RestaurantRecord>) -> Result<Self> {
        Self::validated(records, "inline catalog")
    }

    /// Parse and validate a catalog document
    pub fn from_json_str(content: &str, source_name: &str) -> Result<Self> {
        let records: Vec<RestaurantRecord> =
            serde_json::from_str(content).map_err(|e| PickerError::load(source_name, e))?;
        Self::validated(records, source_name)
    }

    /// Fetch and parse a catalog from any source
    pub async fn load(source: &dyn CatalogSource) -> Result<Self> {
        let source_name = source.describe();
        let content = source.fetch().await?;
        let catalog = Self::from_json_str(&content, &source_name)?;
        info!(
            "Loaded {} restaurants across {} cuisines from {}",
            catalog.len(),
            catalog.cuisines.len(),
            source_name
        );
        Ok(catalog)
    }

    fn validated(records: Vec<RestaurantRecord>, source_name: &str) -> Result<Self> {
        if let Some(index) = records.iter().position(|r| r.name.trim().is_empty()) {
            return Err(PickerError::load(
                source_name,
                format!("restaurant at index {} has an empty name", index),
            ));
        }

        let cuisines: BTreeSet<String> = records.iter().map(|r| r.cuisine.clone()).collect();
        debug!("Derived cuisines: {:?}", cuisines);

        Ok(Self { records, cuisines })
    }

    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct cuisines, in ascending order
    pub fn cuisines(&self) -> &BTreeSet<String> {
        &self.cuisines
    }

    /// Records matching the filter, in catalog order
    pub fn candidates(&self, filter: &FilterKey) -> Vec<&RestaurantRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Restaurants grouped by cuisine, cuisines ascending and names sorted
    /// case-insensitively within each group.
    ///
    /// Names compare by their lowercased code points, not by locale collation,
    /// so accented names ("Épicerie") sort after every unaccented one.
    pub fn grouped(&self) -> Vec<(&str, Vec<&RestaurantRecord>)> {
        self.cuisines
            .iter()
            .map(|cuisine| {
                let mut members: Vec<&RestaurantRecord> = self
                    .records
                    .iter()
                    .filter(|r| r.cuisine == *cuisine)
                    .collect();
                members.sort_by(|a, b| {
                    a.name
                        .to_lowercase()
                        .cmp(&b.name.to_lowercase())
                        .then_with(|| a.name.cmp(&b.name))
                });
                (cuisine.as_str(), members)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"name": "A", "cuisine": "Thai"},
        {"name": "B", "cuisine": "Thai", "comment": "Spicy"},
        {"name": "C", "cuisine": "Indian", "comment": null}
    ]"#;

    #[test]
    fn duplicate_cuisines_collapse() {
        let catalog = Catalog::from_json_str(SAMPLE, "sample").unwrap();
        let cuisines: Vec<&str> = catalog.cuisines().iter().map(String::as_str).collect();
        assert_eq!(cuisines, vec!["Indian", "Thai"]);
    }

    #[test]
    fn candidates_follow_filter() {
        let catalog = Catalog::from_json_str(SAMPLE, "sample").unwrap();

        let thai: Vec<&str> = catalog
            .candidates(&FilterKey::cuisine("Thai"))
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(thai, vec!["A", "B"]);

        assert_eq!(catalog.candidates(&FilterKey::All).len(), 3);
        assert!(catalog.candidates(&FilterKey::cuisine("French")).is_empty());
    }

    #[test]
    fn optional_comment_accepts_null_and_missing() {
        let catalog = Catalog::from_json_str(SAMPLE, "sample").unwrap();
        assert_eq!(catalog.records()[0].comment, None);
        assert_eq!(catalog.records()[1].comment.as_deref(), Some("Spicy"));
        assert_eq!(catalog.records()[2].comment, None);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let cases = [
            "not json",
            r#"{"name": "A", "cuisine": "Thai"}"#,
            r#"[{"name": "A"}]"#,
            r#"[{"cuisine": "Thai"}]"#,
            r#"[{"name": 7, "cuisine": "Thai"}]"#,
            r#"[{"name": "  ", "cuisine": "Thai"}]"#,
        ];
        for case in cases {
            let err = Catalog::from_json_str(case, "bad").unwrap_err();
            assert!(err.is_load_error(), "expected load error for {}", case);
        }
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        let catalog = Catalog::from_json_str("[]", "empty").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.cuisines().is_empty());
    }

    #[test]
    fn grouped_sorts_cuisines_and_names() {
        let catalog = Catalog::new(vec![
            RestaurantRecord::new("zeta", "Thai"),
            RestaurantRecord::new("Alpha", "Thai"),
            RestaurantRecord::new("beta", "Thai"),
            RestaurantRecord::new("Curry House", "Indian"),
        ])
        .unwrap();

        let grouped = catalog.grouped();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "Indian");
        assert_eq!(grouped[1].0, "Thai");
        let thai: Vec<&str> = grouped[1].1.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(thai, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn grouped_orders_accented_names_by_code_point() {
        let catalog = Catalog::new(vec![
            RestaurantRecord::new("Épicerie", "French"),
            RestaurantRecord::new("zinc", "French"),
            RestaurantRecord::new("Bistro", "French"),
        ])
        .unwrap();

        let grouped = catalog.grouped();
        let french: Vec<&str> = grouped[0].1.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(french, vec!["Bistro", "zinc", "Épicerie"]);
    }
}
