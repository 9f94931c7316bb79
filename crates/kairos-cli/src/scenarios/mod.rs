//! Built-in scenarios the CLI can run.

pub mod drip;
pub mod water_bucket;
pub mod weighted;

use kairos_core::{Action, Time, Values};

/// A ready-made catalog plus the values and duration it is meant to run with.
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub max_duration: Time,
    pub initial_values: fn() -> Values,
    pub catalog: fn() -> Vec<Action>,
}

/// All built-in scenarios, in display order.
pub fn all() -> Vec<Scenario> {
    vec![water_bucket::scenario(), drip::scenario(), weighted::scenario()]
}

/// Look up a scenario by name (case-insensitive).
pub fn find(name: &str) -> Option<Scenario> {
    all().into_iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = all().iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all().len());
    }

    #[test]
    fn find_ignores_case() {
        assert_eq!(find("Water-Bucket").map(|s| s.name), Some("water-bucket"));
        assert!(find("bathtub").is_none());
    }
}
