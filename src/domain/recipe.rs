use crate::domain::digit_sequence::DigitSequence;
use crate::domain::range_key::RangeKey;
use crate::domain::range_set::RangeSet;
use crate::domain::region::RegionCode;
use crate::utils::error::{MigrationError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Metadata for one recipe. Only `region` takes part in matching; the rest
/// is carried through to reports and the downstream rewriter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRow {
    pub region: RegionCode,
    pub country_code: Option<DigitSequence>,
    pub is_final_migration: bool,
    pub new_prefix: Option<String>,
    pub description: Option<String>,
}

impl RecipeRow {
    pub fn for_region(region: RegionCode) -> Self {
        Self {
            region,
            country_code: None,
            is_final_migration: false,
            new_prefix: None,
            description: None,
        }
    }
}

/// Recipes keyed by the exact ranges they apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeTable {
    rows: BTreeMap<RangeKey, RecipeRow>,
}

impl RecipeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (RangeKey, RecipeRow)>,
    {
        let mut table = Self::new();
        for (key, row) in rows {
            table.insert(key, row)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, key: RangeKey, row: RecipeRow) -> Result<()> {
        if self.rows.contains_key(&key) {
            return Err(MigrationError::DuplicateRecipeKey { key });
        }
        self.rows.insert(key, row);
        Ok(())
    }

    pub fn contains_key(&self, key: &RangeKey) -> bool {
        self.rows.contains_key(key)
    }

    pub fn get(&self, key: &RangeKey) -> Option<&RecipeRow> {
        self.rows.get(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys_for_region<'a>(
        &'a self,
        region: &'a RegionCode,
    ) -> impl Iterator<Item = &'a RangeKey> + 'a {
        self.rows
            .iter()
            .filter(move |(_, row)| &row.region == region)
            .map(|(key, _)| key)
    }

    /// Union of the ranges of every recipe for `region`.
    pub fn ranges_for_region(&self, region: &RegionCode) -> RangeSet<DigitSequence> {
        RangeSet::from_intervals(
            self.keys_for_region(region)
                .flat_map(|key| key.as_range_set().intervals().iter().cloned()),
        )
    }
}
