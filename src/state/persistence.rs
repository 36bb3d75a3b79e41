use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::models::{DietPlan, NutritionTable};
use crate::nutrition::write_csv;

/// Create the cache directory if needed and return its path.
///
/// Nothing reads from it; charts shown on request are written here.
pub fn ensure_cache_dir<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    fs::create_dir_all(path)?;
    debug!(path = %path.display(), "Cache directory ready");
    Ok(path.to_path_buf())
}

/// Save plan text as-is.
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &DietPlan) -> Result<()> {
    fs::write(path, plan.text())?;
    Ok(())
}

/// Load plan text saved earlier (or any text file).
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<DietPlan> {
    Ok(DietPlan::new(fs::read_to_string(path)?))
}

/// Save the nutrition table as CSV.
pub fn save_nutrition_csv<P: AsRef<Path>>(path: P, table: &NutritionTable) -> Result<()> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::extract;
    use tempfile::tempdir;

    #[test]
    fn test_plan_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.txt");
        let plan = DietPlan::new("Day 1:\nBreakfast\nCalories: 300");

        save_plan(&path, &plan).unwrap();
        assert_eq!(load_plan(&path).unwrap(), plan);
    }

    #[test]
    fn test_ensure_cache_dir_nested() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("a").join("cache");
        let created = ensure_cache_dir(&cache).unwrap();
        assert!(created.is_dir());
        // Second call is a no-op.
        ensure_cache_dir(&cache).unwrap();
    }

    #[test]
    fn test_save_nutrition_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nutrition.csv");
        let table = extract("Day 2:\n\nDinner\nProtein: 20g");

        save_nutrition_csv(&path, &table).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Day 2,Dinner,N/A,20g"));
    }
}
