pub mod interactive;

pub use interactive::{Command, InteractiveSession, Outcome};

use crate::catalog::Catalog;
use crate::constants::{ALL_FILTER, ALL_FILTER_LABEL};
use crate::types::RestaurantRecord;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Option list for a cuisine selector: the "all" entry first, then every cuisine
pub fn cuisine_options(cuisines: &BTreeSet<String>) -> Vec<(String, String)> {
    std::iter::once((ALL_FILTER.to_string(), ALL_FILTER_LABEL.to_string()))
        .chain(cuisines.iter().map(|c| (c.clone(), c.clone())))
        .collect()
}

pub fn render_cuisine_options(cuisines: &BTreeSet<String>) -> String {
    let mut out = String::new();
    for (value, label) in cuisine_options(cuisines) {
        if value == label {
            let _ = writeln!(out, "  {}", label);
        } else {
            let _ = writeln!(out, "  {} ({})", label, value);
        }
    }
    out
}

pub fn render_restaurant(record: &RestaurantRecord) -> String {
    format!(
        "🍽️  {}\n   Cuisine: {}\n   Notes:   {}\n",
        record.name,
        record.cuisine,
        record.comment_or_fallback()
    )
}

/// Full listing grouped by cuisine. Comments only appear when present.
pub fn render_listing(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (cuisine, records) in catalog.grouped() {
        let _ = writeln!(out, "\n{}", cuisine);
        let _ = writeln!(out, "{}", "-".repeat(cuisine.chars().count()));
        for record in records {
            let _ = writeln!(out, "  • {}", record.name);
            if let Some(comment) = record.comment_text() {
                let _ = writeln!(out, "      {}", comment);
            }
        }
    }
    out
}
