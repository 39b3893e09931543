//! Sizing and load-threshold configuration for [`HashTable`](crate::HashTable).

use crate::error::TableError;

/// Base size a default table starts at; also the default shrink floor.
pub const DEFAULT_BASE_SIZE: usize = 50;
/// Grow once `count * 100 / capacity` exceeds this.
pub const DEFAULT_GROW_LOAD_PERCENT: usize = 70;
/// Shrink once `count * 100 / capacity` falls below this.
pub const DEFAULT_SHRINK_LOAD_PERCENT: usize = 10;

/// How `delete` maintains the live-entry count.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CountPolicy {
    /// Decrement only when an entry is actually tombstoned.
    #[default]
    Exact,
    /// Decrement on every `delete` call, matched or not, saturating at zero.
    /// Kept for parity with tables that relied on the historical behaviour;
    /// the count drifts until the next resize recomputes it.
    Legacy,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TableConfig {
    pub initial_base_size: usize,
    pub min_base_size: usize,
    pub grow_load_percent: usize,
    pub shrink_load_percent: usize,
    pub count_policy: CountPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_base_size: DEFAULT_BASE_SIZE,
            min_base_size: DEFAULT_BASE_SIZE,
            grow_load_percent: DEFAULT_GROW_LOAD_PERCENT,
            shrink_load_percent: DEFAULT_SHRINK_LOAD_PERCENT,
            count_policy: CountPolicy::Exact,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_base_size(mut self, base_size: usize) -> Self {
        self.initial_base_size = base_size;
        self
    }

    pub fn with_min_base_size(mut self, base_size: usize) -> Self {
        self.min_base_size = base_size;
        self
    }

    pub fn with_grow_load_percent(mut self, percent: usize) -> Self {
        self.grow_load_percent = percent;
        self
    }

    pub fn with_shrink_load_percent(mut self, percent: usize) -> Self {
        self.shrink_load_percent = percent;
        self
    }

    pub fn with_count_policy(mut self, policy: CountPolicy) -> Self {
        self.count_policy = policy;
        self
    }

    /// Checks the thresholds and sizes form a usable table.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.min_base_size == 0 {
            return Err(TableError::InvalidConfig("min_base_size must be positive"));
        }
        if self.initial_base_size < self.min_base_size {
            return Err(TableError::InvalidConfig(
                "initial_base_size must not be below min_base_size",
            ));
        }
        if self.grow_load_percent == 0 || self.grow_load_percent >= 100 {
            return Err(TableError::InvalidConfig(
                "grow_load_percent must be in 1..100",
            ));
        }
        if self.shrink_load_percent >= self.grow_load_percent {
            return Err(TableError::InvalidConfig(
                "shrink_load_percent must be below grow_load_percent",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = TableConfig::default();
        assert_eq!(c.initial_base_size, 50);
        assert_eq!(c.min_base_size, 50);
        assert_eq!(c.grow_load_percent, 70);
        assert_eq!(c.shrink_load_percent, 10);
        assert_eq!(c.count_policy, CountPolicy::Exact);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let c = TableConfig::new()
            .with_initial_base_size(200)
            .with_min_base_size(10)
            .with_grow_load_percent(60)
            .with_shrink_load_percent(5)
            .with_count_policy(CountPolicy::Legacy);
        assert_eq!(c.initial_base_size, 200);
        assert_eq!(c.min_base_size, 10);
        assert_eq!(c.grow_load_percent, 60);
        assert_eq!(c.shrink_load_percent, 5);
        assert_eq!(c.count_policy, CountPolicy::Legacy);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            TableConfig::new().with_min_base_size(0).with_initial_base_size(0),
            TableConfig::new().with_initial_base_size(10),
            TableConfig::new().with_grow_load_percent(0).with_shrink_load_percent(0),
            TableConfig::new().with_grow_load_percent(100),
            TableConfig::new().with_shrink_load_percent(70),
        ];
        for c in bad {
            match c.validate() {
                Err(TableError::InvalidConfig(_)) => {}
                other => panic!("expected InvalidConfig for {:?}, got {:?}", c, other),
            }
        }
    }
}
