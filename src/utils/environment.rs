use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Overrides the directory holding history, bookmarks and preferences
pub const DATA_DIR_ENV: &str = "SYMPTOM_INSIGHT_HOME";
/// Points at a catalog JSON file to use instead of the built-in one
pub const CATALOG_ENV: &str = "SYMPTOM_INSIGHT_CATALOG";

const APP_DIR_NAME: &str = "symptom-insight";

/// Get the data directory: `$SYMPTOM_INSIGHT_HOME`, else the platform data dir
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Catalog override: explicit flag first, then `$SYMPTOM_INSIGHT_CATALOG`
pub fn get_catalog_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| env::var_os(CATALOG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    // Both tests touch process-wide env vars, so they run as one test
    #[test]
    fn test_environment_overrides() {
        let original_home = env::var_os(DATA_DIR_ENV);
        let original_catalog = env::var_os(CATALOG_ENV);

        // SAFETY: Setting environment variables in tests is safe as long as:
        // 1. No other test reads these variables concurrently
        // 2. We restore the original values afterwards
        unsafe {
            env::set_var(DATA_DIR_ENV, "/tmp/symptom-insight-test");
            env::set_var(CATALOG_ENV, "/tmp/catalog.json");
        }

        assert_eq!(get_data_dir().unwrap(), PathBuf::from("/tmp/symptom-insight-test"));
        assert_eq!(get_catalog_path(None), Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(
            get_catalog_path(Some(PathBuf::from("/explicit.json"))),
            Some(PathBuf::from("/explicit.json"))
        );

        unsafe {
            env::remove_var(CATALOG_ENV);
        }
        assert_eq!(get_catalog_path(None), None);

        // Restore original values
        unsafe {
            match original_home {
                Some(v) => env::set_var(DATA_DIR_ENV, v),
                None => env::remove_var(DATA_DIR_ENV),
            }
            if let Some(v) = original_catalog {
                env::set_var(CATALOG_ENV, v);
            }
        }
    }
}
