use crate::domain::digit_sequence::DigitSequence;
use crate::domain::model::MigrationCandidate;
use crate::domain::range_key::RangeKey;
use crate::domain::range_set::{Interval, RangeSet};
use crate::domain::recipe::RecipeTable;
use crate::domain::region::RegionCode;
use crate::utils::error::{MigrationError, Result};
use std::collections::BTreeMap;

/// A migration request for one region.
///
/// Holds the E.164 numbers to check, each mapped to the raw text it was
/// entered as, and the recipes table to check them against. Only recipes for
/// `region_code` are considered by [`MigrationJob::all_migratable_numbers`].
/// Nothing here runs a recipe, so a reported match says the number is in
/// range, not that rewriting it will succeed.
#[derive(Debug, Clone)]
pub struct MigrationJob {
    number_range_map: BTreeMap<DigitSequence, String>,
    region_code: RegionCode,
    recipes_table: RecipeTable,
}

impl MigrationJob {
    pub fn new(
        number_range_map: BTreeMap<DigitSequence, String>,
        region_code: RegionCode,
        recipes_table: RecipeTable,
    ) -> Self {
        tracing::debug!(
            numbers = number_range_map.len(),
            recipes = recipes_table.len(),
            region = %region_code,
            "created migration job"
        );
        Self {
            number_range_map,
            region_code,
            recipes_table,
        }
    }

    pub fn recipes_table(&self) -> &RecipeTable {
        &self.recipes_table
    }

    pub fn number_range_map(&self) -> &BTreeMap<DigitSequence, String> {
        &self.number_range_map
    }

    pub fn region_code(&self) -> &RegionCode {
        &self.region_code
    }

    /// One singleton interval per input number.
    pub fn number_range(&self) -> RangeSet<DigitSequence> {
        self.number_range_map
            .keys()
            .cloned()
            .map(Interval::singleton)
            .collect()
    }

    /// The numbers exactly as they were entered.
    pub fn raw_number_range(&self) -> impl Iterator<Item = &str> + '_ {
        self.number_range_map.values().map(String::as_str)
    }

    /// Input numbers covered by any recipe for this job's region.
    pub fn all_migratable_numbers(&self) -> impl Iterator<Item = DigitSequence> + '_ {
        let recipe_ranges = self.recipes_table.ranges_for_region(&self.region_code);
        let matched = recipe_ranges.intersection(&self.number_range());
        tracing::debug!(
            region = %self.region_code,
            intervals = matched.len(),
            "intersected numbers with regional recipes"
        );
        matched.into_iter().map(|interval| interval.lower().clone())
    }

    /// Input numbers covered by the recipe stored under `recipe_key`.
    ///
    /// Fails with [`MigrationError::InvalidRecipeKey`] when the table has no
    /// row with exactly that key.
    pub fn migratable_numbers(
        &self,
        recipe_key: &RangeKey,
    ) -> Result<impl Iterator<Item = DigitSequence> + '_> {
        if !self.recipes_table.contains_key(recipe_key) {
            return Err(MigrationError::InvalidRecipeKey {
                key: recipe_key.clone(),
            });
        }
        let matched = recipe_key.as_range_set().intersection(&self.number_range());
        tracing::debug!(recipe = %recipe_key, intervals = matched.len(), "intersected numbers with recipe");
        Ok(matched.into_iter().map(|interval| interval.lower().clone()))
    }

    /// Every migratable number with its raw text and the regional recipes whose
    /// ranges contain it.
    pub fn migration_candidates(&self) -> Vec<MigrationCandidate> {
        self.all_migratable_numbers()
            .map(|number| {
                let recipe_keys = self
                    .recipes_table
                    .keys_for_region(&self.region_code)
                    .filter(|key| key.contains(&number))
                    .cloned()
                    .collect();
                let raw = self
                    .number_range_map
                    .get(&number)
                    .cloned()
                    .unwrap_or_else(|| number.to_string());
                MigrationCandidate {
                    number,
                    raw,
                    recipe_keys,
                }
            })
            .collect()
    }

    /// Raw text of every input number no regional recipe covers.
    pub fn unmatched_numbers(&self) -> Vec<&str> {
        let recipe_ranges = self.recipes_table.ranges_for_region(&self.region_code);
        self.number_range_map
            .iter()
            .filter(|(number, _)| !recipe_ranges.contains(number))
            .map(|(_, raw)| raw.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::RecipeRow;

    fn ds(s: &str) -> DigitSequence {
        s.parse().unwrap()
    }

    fn key(s: &str) -> RangeKey {
        s.parse().unwrap()
    }

    fn region(s: &str) -> RegionCode {
        RegionCode::new(s).unwrap()
    }

    fn numbers(raw: &[&str]) -> BTreeMap<DigitSequence, String> {
        raw.iter()
            .map(|r| (ds(r.trim_start_matches('+')), r.to_string()))
            .collect()
    }

    fn gb_job(inputs: &[&str]) -> MigrationJob {
        let table = RecipeTable::from_rows([
            (
                key("447100000000-447100999999"),
                RecipeRow::for_region(region("GB")),
            ),
            (
                key("447200000000-447200999999"),
                RecipeRow::for_region(region("US")),
            ),
        ])
        .unwrap();
        MigrationJob::new(numbers(inputs), region("GB"), table)
    }

    #[test]
    fn test_number_range_is_singletons() {
        let job = gb_job(&["+447100000001", "+447200000001"]);
        let range = job.number_range();
        assert_eq!(range.len(), 2);
        assert!(range.intervals().iter().all(Interval::is_singleton));
    }

    #[test]
    fn test_raw_number_range_keeps_input_text() {
        let job = gb_job(&["+447100000001", "447200000001"]);
        let mut raw: Vec<&str> = job.raw_number_range().collect();
        raw.sort();
        assert_eq!(raw, vec!["+447100000001", "447200000001"]);
    }

    #[test]
    fn test_all_migratable_numbers_filters_by_region() {
        let job = gb_job(&["+447100000001", "+447200000001"]);
        let found: Vec<DigitSequence> = job.all_migratable_numbers().collect();
        assert_eq!(found, vec![ds("447100000001")]);
    }

    #[test]
    fn test_repeated_queries_agree() {
        let job = gb_job(&["+447100000001", "+447100000002", "+447200000001"]);
        let first: Vec<_> = job.all_migratable_numbers().collect();
        let second: Vec<_> = job.all_migratable_numbers().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_migratable_numbers_for_key() {
        let job = gb_job(&["+447100000001", "+447200000001"]);

        let gb: Vec<_> = job
            .migratable_numbers(&key("447100000000-447100999999"))
            .unwrap()
            .collect();
        assert_eq!(gb, vec![ds("447100000001")]);

        // Per-recipe queries are not limited to the job's region.
        let us: Vec<_> = job
            .migratable_numbers(&key("447200000000-447200999999"))
            .unwrap()
            .collect();
        assert_eq!(us, vec![ds("447200000001")]);
    }

    #[test]
    fn test_unknown_key_fails() {
        let job = gb_job(&["+447100000001"]);
        let unknown = key("447100000000-447100999998");
        match job.migratable_numbers(&unknown) {
            Err(MigrationError::InvalidRecipeKey { key }) => assert_eq!(key, unknown),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("unknown key must not produce results"),
        };
    }

    #[test]
    fn test_empty_number_map_yields_nothing() {
        let job = gb_job(&[]);
        assert_eq!(job.all_migratable_numbers().count(), 0);
        assert_eq!(
            job.migratable_numbers(&key("447100000000-447100999999"))
                .unwrap()
                .count(),
            0
        );
        assert!(job.migration_candidates().is_empty());
    }

    #[test]
    fn test_neighbouring_inputs_keep_one_singleton_each() {
        // "120" is the next sequence after "12" in the digit order.
        let table = RecipeTable::from_rows([(key("11-13"), RecipeRow::for_region(region("GB")))])
            .unwrap();
        let job = MigrationJob::new(numbers(&["12", "120"]), region("GB"), table);

        let range = job.number_range();
        assert_eq!(range.len(), 2);
        assert!(range.intervals().iter().all(Interval::is_singleton));

        let met = key("11-13").as_range_set().intersection(&range);
        assert_eq!(met, range);
        assert_eq!(
            met.lower_endpoints().cloned().collect::<Vec<_>>(),
            vec![ds("12"), ds("120")]
        );

        let found: Vec<_> = job.all_migratable_numbers().collect();
        assert_eq!(found, vec![ds("12"), ds("120")]);
        let for_key: Vec<_> = job.migratable_numbers(&key("11-13")).unwrap().collect();
        assert_eq!(for_key, found);
    }

    #[test]
    fn test_longest_neighbouring_inputs_are_all_reported() {
        let full = "1".repeat(crate::domain::digit_sequence::MAX_DIGITS);
        let mut next = full.clone();
        next.pop();
        next.push('2');
        let table = RecipeTable::from_rows([(
            RangeKey::closed(ds("1"), ds("2")).unwrap(),
            RecipeRow::for_region(region("GB")),
        )])
        .unwrap();
        let job = MigrationJob::new(numbers(&[full.as_str(), next.as_str()]), region("GB"), table);

        assert_eq!(job.number_range().len(), 2);
        let found: Vec<_> = job.all_migratable_numbers().collect();
        assert_eq!(found, vec![ds(&full), ds(&next)]);
    }

    #[test]
    fn test_candidates_and_unmatched() {
        let table = RecipeTable::from_rows([
            (key("4471000-4471999"), RecipeRow::for_region(region("GB"))),
            (key("4471500-4471599"), RecipeRow::for_region(region("GB"))),
            (key("4471550"), RecipeRow::for_region(region("US"))),
        ])
        .unwrap();
        let job = MigrationJob::new(
            numbers(&["+4471550", "+4471001", "+4480000"]),
            region("GB"),
            table,
        );

        let candidates = job.migration_candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].number, ds("4471001"));
        assert_eq!(candidates[0].recipe_keys, vec![key("4471000-4471999")]);
        assert_eq!(candidates[1].raw, "+4471550");
        assert_eq!(candidates[1].recipe_keys.len(), 2);

        assert_eq!(job.unmatched_numbers(), vec!["+4480000"]);
    }

    #[test]
    fn test_job_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MigrationJob>();
    }
}
