//! Names shared between the CLI, config files and the selector.

// Filter sentinel matching every restaurant
pub const ALL_FILTER: &str = "all";
pub const ALL_FILTER_LABEL: &str = "All Cuisines";

// Shown when a restaurant has no comment
pub const NO_COMMENT_FALLBACK: &str = "No additional notes";

pub const DEFAULT_CATALOG_PATH: &str = "restaurants.json";
pub const DEFAULT_CONFIG_PATH: &str = "picker.toml";
pub const CONFIG_PATH_ENV: &str = "PICKER_CONFIG";

// Selection policy names (used in CLI and config)
pub const CYCLE_POLICY: &str = "cycle";
pub const EXCLUDE_LAST_POLICY: &str = "exclude-last";

/// Map accepted aliases onto the canonical policy name
pub fn policy_alias_to_canonical(name: &str) -> String {
    match name.trim().to_lowercase().as_str() {
        "cycle" | "shuffle" | "shuffled-cycle" | "shuffled_cycle" => CYCLE_POLICY.to_string(),
        "exclude-last" | "exclude_last" | "no-repeat" => EXCLUDE_LAST_POLICY.to_string(),
        other => other.to_string(),
    }
}

/// Get all supported policy names
pub fn get_supported_policies() -> Vec<&'static str> {
    vec![CYCLE_POLICY, EXCLUDE_LAST_POLICY]
}
