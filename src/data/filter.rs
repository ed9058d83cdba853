use std::collections::BTreeSet;

use super::model::{LongObservation, LongTable, MetricType, Technique};

// ---------------------------------------------------------------------------
// Query – the sidebar's predicates as data
// ---------------------------------------------------------------------------

/// Conjunctive row predicates over a [`LongTable`].
///
/// `None` means "no constraint on this dimension".  Note the asymmetry
/// with `Some(empty set)`: an empty selection is a real constraint that
/// matches nothing, which is how a fully deselected multi-select behaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub distributions: Option<BTreeSet<String>>,
    pub techniques: Option<BTreeSet<Technique>>,
    pub scale: Option<String>,
    pub max_load_factor: Option<f64>,
    pub metric_type: Option<MetricType>,
}

impl Query {
    fn matches(&self, row: &LongObservation) -> bool {
        if let Some(dists) = &self.distributions {
            if !dists.contains(&row.distribution) {
                return false;
            }
        }
        if let Some(techs) = &self.techniques {
            if !techs.contains(&row.technique) {
                return false;
            }
        }
        if let Some(scale) = &self.scale {
            if row.scale.as_ref() != Some(scale) {
                return false;
            }
        }
        if let Some(max) = self.max_load_factor {
            if row.load_factor > max {
                return false;
            }
        }
        if let Some(metric) = self.metric_type {
            if row.metric_type != metric {
                return false;
            }
        }
        true
    }
}

/// Apply all predicates, keeping relative row order.  Purely a membership
/// operation: no row value is altered.  Zero matches is a valid result,
/// not an error.
pub fn apply(table: &LongTable, query: &Query) -> LongTable {
    LongTable {
        rows: table
            .rows
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(dist: &str, lf: f64, technique: Technique, value: f64) -> LongObservation {
        LongObservation {
            distribution: dist.to_string(),
            scale: None,
            key_index: None,
            load_factor: lf,
            technique,
            metric_type: MetricType::Probes,
            value,
        }
    }

    fn sample() -> LongTable {
        LongTable {
            rows: vec![
                obs("Uniform", 0.1, Technique::Chaining, 1.05),
                obs("Uniform", 0.5, Technique::Chaining, 1.25),
                obs("Uniform", 0.5, Technique::LinearProbing, 1.98),
                obs("Skewed", 0.5, Technique::Chaining, 1.49),
                obs("Skewed", 0.9, Technique::LinearProbing, 8.40),
            ],
        }
    }

    fn dist_set(names: &[&str]) -> Option<BTreeSet<String>> {
        Some(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn omitted_predicates_keep_everything() {
        let t = sample();
        assert_eq!(apply(&t, &Query::default()), t);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let q = Query {
            distributions: dist_set(&["Uniform"]),
            techniques: Some([Technique::Chaining].into_iter().collect()),
            max_load_factor: Some(0.3),
            ..Query::default()
        };
        let out = apply(&sample(), &q);
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows[0].value, 1.05);
    }

    #[test]
    fn distribution_filter_keeps_values_unchanged() {
        let q = Query {
            distributions: dist_set(&["Uniform"]),
            max_load_factor: Some(0.5),
            ..Query::default()
        };
        let out = apply(&sample(), &q);
        let values: Vec<f64> = out.rows.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1.05, 1.25, 1.98]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let q = Query {
            distributions: dist_set(&["Skewed"]),
            max_load_factor: Some(0.6),
            ..Query::default()
        };
        let once = apply(&sample(), &q);
        let twice = apply(&once, &q);
        assert_eq!(once, twice);
    }

    #[test]
    fn tighter_load_factor_bound_gives_a_subset() {
        let t = sample();
        let loose = apply(
            &t,
            &Query {
                max_load_factor: Some(0.9),
                ..Query::default()
            },
        );
        let tight = apply(
            &t,
            &Query {
                max_load_factor: Some(0.5),
                ..Query::default()
            },
        );
        assert!(tight.len() <= loose.len());
        for row in &tight.rows {
            assert!(loose.rows.contains(row));
        }
    }

    #[test]
    fn empty_selection_matches_nothing_without_error() {
        let q = Query {
            distributions: dist_set(&[]),
            ..Query::default()
        };
        let out = apply(&sample(), &q);
        assert!(out.is_empty());
        // Downstream reductions must stay guarded on the empty result.
        assert_eq!(out.max_value(), None);
        assert_eq!(out.max_load_factor(), None);
    }

    #[test]
    fn scale_predicate_requires_exact_match() {
        let mut t = sample();
        t.rows[0].scale = Some("Large".to_string());
        t.rows[1].scale = Some("Small".to_string());

        let q = Query {
            scale: Some("Large".to_string()),
            ..Query::default()
        };
        let out = apply(&t, &q);
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows[0].scale.as_deref(), Some("Large"));
    }
}
