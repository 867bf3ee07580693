use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Industry key used when no industry has been answered.
pub const DEFAULT_INDUSTRY: &str = "tech";

/// Static comparison figures for one industry (all percentages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmark {
    pub execution_rate: u32,
    pub avg_growth: u32,
    pub top_performer: u32,
}

impl IndustryBenchmark {
    pub const fn new(execution_rate: u32, avg_growth: u32, top_performer: u32) -> Self {
        Self {
            execution_rate,
            avg_growth,
            top_performer,
        }
    }
}

/// Figures for the default industry, used when a table lacks even the fallback.
pub const TECH_BENCHMARK: IndustryBenchmark = IndustryBenchmark::new(65, 23, 87);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable {
    entries: BTreeMap<String, IndustryBenchmark>,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        let entries = [
            ("tech", TECH_BENCHMARK),
            ("mfg", IndustryBenchmark::new(71, 12, 89)),
            ("services", IndustryBenchmark::new(58, 15, 82)),
            ("health", IndustryBenchmark::new(69, 18, 86)),
            ("finance", IndustryBenchmark::new(73, 14, 91)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self { entries }
    }
}

impl BenchmarkTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, industry: &str) -> Option<&IndustryBenchmark> {
        self.entries.get(industry)
    }

    pub fn contains(&self, industry: &str) -> bool {
        self.entries.contains_key(industry)
    }

    pub fn insert(&mut self, industry: impl Into<String>, benchmark: IndustryBenchmark) {
        self.entries.insert(industry.into(), benchmark);
    }

    /// Overlay entries from another table, replacing existing keys.
    pub fn merge(&mut self, overrides: &BTreeMap<String, IndustryBenchmark>) {
        for (k, v) in overrides {
            self.entries.insert(k.clone(), *v);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndustryBenchmark)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a benchmark, falling back to `fallback` and then to the tech figures.
    pub fn resolve(&self, industry: &str, fallback: &str) -> IndustryBenchmark {
        self.get(industry)
            .or_else(|| self.get(fallback))
            .copied()
            .unwrap_or(TECH_BENCHMARK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_five_industries() {
        let table = BenchmarkTable::default();
        assert_eq!(table.len(), 5);
        assert_eq!(table.get("finance"), Some(&IndustryBenchmark::new(73, 14, 91)));
    }

    #[test]
    fn test_resolve_falls_back() {
        let table = BenchmarkTable::default();
        assert_eq!(table.resolve("aerospace", "mfg"), IndustryBenchmark::new(71, 12, 89));
    }

    #[test]
    fn test_resolve_empty_table_uses_tech_figures() {
        let table = BenchmarkTable::empty();
        assert_eq!(table.resolve("finance", "tech"), TECH_BENCHMARK);
    }

    #[test]
    fn test_merge_overrides_and_adds() {
        let mut table = BenchmarkTable::default();
        let mut overrides = BTreeMap::new();
        overrides.insert("tech".to_string(), IndustryBenchmark::new(70, 25, 90));
        overrides.insert("retail".to_string(), IndustryBenchmark::new(60, 8, 80));
        table.merge(&overrides);

        assert_eq!(table.len(), 6);
        assert_eq!(table.get("tech").unwrap().execution_rate, 70);
        assert!(table.contains("retail"));
    }

    #[test]
    fn test_benchmark_yaml_uses_camel_case() {
        let yaml = "executionRate: 50\navgGrowth: 5\ntopPerformer: 75\n";
        let parsed: IndustryBenchmark = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(parsed, IndustryBenchmark::new(50, 5, 75));
    }
}
