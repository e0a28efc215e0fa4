//! Filter collapsing resources that point at the same place.
//!
//! Model output often lists the same channel twice with cosmetic
//! differences (`youtu.be` vs `www.youtube.com`, tracking parameters). Links
//! are keyed by their canonical form before comparison.

use crate::traits::Filter;
use catalog::ScoredResource;
use std::collections::HashMap;

/// Keeps one resource per canonical link: the highest-scored copy, placed
/// where the first copy appeared. Equal scores keep the earlier copy.
pub struct DuplicateLinkFilter;

impl Filter for DuplicateLinkFilter {
    fn name(&self) -> &str {
        "DuplicateLinkFilter"
    }

    fn apply(&self, resources: Vec<ScoredResource>) -> Vec<ScoredResource> {
        let input_len = resources.len();
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut kept: Vec<ScoredResource> = Vec::with_capacity(input_len);

        for resource in resources {
            let key = linkcheck::canonicalize_youtube(&resource.url);
            match slots.get(&key) {
                Some(&slot) => {
                    if resource.score > kept[slot].score {
                        kept[slot] = resource;
                    }
                }
                None => {
                    slots.insert(key, kept.len());
                    kept.push(resource);
                }
            }
        }

        if kept.len() < input_len {
            tracing::debug!("collapsed {} duplicate links", input_len - kept.len());
        }
        kept
    }
}
