//! Hop-bounded spread activation with max-over-paths retention.
//!
//! Seeds start at 1.0. Each hop multiplies by link strength; a node keeps the
//! best activation any path gave it and is re-expanded only when that value
//! improves. Frontiers are processed in a fixed order (activation desc, then
//! name) so the result never depends on discovery order.

use std::collections::{BTreeMap, HashMap, HashSet};

use synapse_core::config::GraphConfig;
use synapse_core::constants::SEED_ACTIVATION;
use synapse_core::errors::SynapseResult;
use synapse_core::models::{normalize_concept, ActivatedConcept};

use crate::NeighborSource;

pub struct SpreadActivation<'a, S: NeighborSource + ?Sized> {
    source: &'a S,
    hierarchical_boost: f64,
}

impl<'a, S: NeighborSource + ?Sized> SpreadActivation<'a, S> {
    pub fn new(source: &'a S, hierarchical_boost: f64) -> Self {
        Self {
            source,
            hierarchical_boost,
        }
    }

    pub fn from_config(source: &'a S, config: &GraphConfig) -> Self {
        Self::new(source, config.hierarchical_boost)
    }

    /// Activate from `seeds`. Seeds are excluded from the output.
    pub fn activate(
        &self,
        seeds: &[String],
        threshold: f64,
        max_hops: usize,
        limit: usize,
    ) -> SynapseResult<Vec<ActivatedConcept>> {
        let mut seed_names: Vec<String> = Vec::new();
        for seed in seeds.iter().map(|s| normalize_concept(s)) {
            if !seed.is_empty() && !seed_names.contains(&seed) {
                seed_names.push(seed);
            }
        }
        seed_names.sort();
        if seed_names.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let seed_set: HashSet<&str> = seed_names.iter().map(String::as_str).collect();

        let mut best: HashMap<String, (f64, Vec<String>)> = HashMap::new();
        let mut frontier: Vec<(String, f64, Vec<String>)> = seed_names
            .iter()
            .map(|s| (s.clone(), SEED_ACTIVATION, vec![s.clone()]))
            .collect();

        for _hop in 0..max_hops {
            if frontier.is_empty() {
                break;
            }
            let mut improved: BTreeMap<String, (f64, Vec<String>)> = BTreeMap::new();
            for (node, activation, path) in &frontier {
                for (other, strength) in self.source.neighbors(node, threshold)? {
                    if seed_set.contains(other.as_str()) {
                        continue;
                    }
                    let propagated = activation * strength;
                    if propagated < threshold {
                        continue;
                    }
                    let current = best.get(&other).map(|(a, _)| *a).unwrap_or(f64::MIN);
                    if propagated > current {
                        let mut new_path = path.clone();
                        new_path.push(other.clone());
                        best.insert(other.clone(), (propagated, new_path.clone()));
                        improved.insert(other, (propagated, new_path));
                    }
                }
            }
            frontier = improved
                .into_iter()
                .map(|(name, (activation, path))| (name, activation, path))
                .collect();
            frontier.sort_by(|x, y| y.1.total_cmp(&x.1).then_with(|| x.0.cmp(&y.0)));
        }

        for seed in &seed_names {
            for child in self.source.children_of(seed)? {
                if seed_set.contains(child.as_str()) {
                    continue;
                }
                let current = best.get(&child).map(|(a, _)| *a).unwrap_or(f64::MIN);
                if self.hierarchical_boost > current {
                    best.insert(
                        child.clone(),
                        (self.hierarchical_boost, vec![seed.clone(), child]),
                    );
                }
            }
        }

        let mut out: Vec<ActivatedConcept> = best
            .into_iter()
            .map(|(concept, (activation, path))| ActivatedConcept {
                concept,
                activation,
                path,
            })
            .collect();
        out.sort_by(|x, y| {
            y.activation
                .total_cmp(&x.activation)
                .then_with(|| x.concept.cmp(&y.concept))
        });
        out.truncate(limit);
        tracing::trace!(seeds = seed_names.len(), activated = out.len(), "spread activation");
        Ok(out)
    }
}
