// Name mapping suggester.
// Pure functions: source and target name lists in, mapping out.
// No IO, no config loading, no formatting.

use std::collections::HashMap;
use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::error::{DuplicateName, MapperError};
use crate::model::{Mapping, MappingEntry, MatchRule};
use crate::normalize::{normalize_name, substring_related};
use crate::profile::{DuplicatePolicy, Profile, SuggestOptions};
use crate::similarity::best_match;

/// Suggest a target for every source name.
///
/// Rules, highest confidence first: verbatim match, best fuzzy match at or
/// above `options.cutoff`, then the normalized substring heuristic.
pub fn suggest<S: AsRef<str>, T: AsRef<str>>(
    source: &[S],
    target: &[T],
    options: &SuggestOptions,
) -> Result<Mapping, MapperError> {
    if options.on_duplicate == DuplicatePolicy::Reject {
        let dups = find_duplicates(source);
        if !dups.is_empty() {
            return Err(MapperError::DuplicateSource(dups));
        }
    }
    Ok(build_mapping(source, target, options))
}

pub fn suggest_with_profile<S: AsRef<str>, T: AsRef<str>>(
    profile: Profile,
    source: &[S],
    target: &[T],
) -> Mapping {
    build_mapping(source, target, &SuggestOptions::for_profile(profile))
}

pub fn suggest_blendshapes<S: AsRef<str>, T: AsRef<str>>(source: &[S], target: &[T]) -> Mapping {
    suggest_with_profile(Profile::Blendshape, source, target)
}

pub fn suggest_joints<S: AsRef<str>, T: AsRef<str>>(source: &[S], target: &[T]) -> Mapping {
    suggest_with_profile(Profile::Joint, source, target)
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

struct TargetIndex<'a> {
    names: Vec<&'a str>,
    verbatim: HashSet<&'a str>,
    normalized: Vec<String>,
}

impl<'a> TargetIndex<'a> {
    fn new<T: AsRef<str>>(target: &'a [T]) -> Self {
        let names: Vec<&str> = target.iter().map(|t| t.as_ref()).collect();
        let verbatim = names.iter().copied().collect();
        let normalized = names.iter().map(|n| normalize_name(n)).collect();
        Self { names, verbatim, normalized }
    }
}

fn build_mapping<S: AsRef<str>, T: AsRef<str>>(
    source: &[S],
    target: &[T],
    options: &SuggestOptions,
) -> Mapping {
    let index = TargetIndex::new(target);

    let mut entries: Vec<MappingEntry> = Vec::with_capacity(source.len());
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(source.len());
    let mut collapsed = 0usize;

    for name in source {
        let name = name.as_ref();
        let entry = match_one(name, &index, options);
        debug!(
            "{:?} -> {:?} ({})",
            entry.source,
            entry.target,
            entry.rule.as_str()
        );

        match position.get(name) {
            Some(&slot) => {
                entries[slot] = entry;
                collapsed += 1;
            }
            None => {
                position.insert(name, entries.len());
                entries.push(entry);
            }
        }
    }

    if collapsed > 0 {
        warn!("{collapsed} repeated source name(s) collapsed into existing keys");
    }

    Mapping::new(entries, source.len())
}

fn match_one(name: &str, index: &TargetIndex<'_>, options: &SuggestOptions) -> MappingEntry {
    let entry = |target: Option<&str>, rule: MatchRule, score: Option<f64>| MappingEntry {
        source: name.to_string(),
        target: target.map(String::from),
        rule,
        score,
    };

    // 1. Verbatim, case-sensitive
    if index.verbatim.contains(name) {
        return entry(Some(name), MatchRule::Exact, None);
    }

    // 2. Fuzzy
    if let Some((idx, score)) = best_match(name, &index.names, options.cutoff) {
        trace!("{name:?}: fuzzy {:?} scored {score:.4}", index.names[idx]);
        return entry(Some(index.names[idx]), MatchRule::Fuzzy, Some(score));
    }

    // 3. Normalized substring
    let name_norm = normalize_name(name);
    let hit = index
        .normalized
        .iter()
        .position(|t| substring_related(&name_norm, t, options.substring, options.skip_empty_names));
    if let Some(idx) = hit {
        return entry(Some(index.names[idx]), MatchRule::Substring, None);
    }

    entry(None, MatchRule::Unmatched, None)
}

/// Names that occur more than once, in first-occurrence order.
pub fn find_duplicates<S: AsRef<str>>(source: &[S]) -> Vec<DuplicateName> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for name in source {
        let name = name.as_ref();
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|name| {
            let count = counts[name];
            (count > 1).then(|| DuplicateName { name: name.to_string(), count })
        })
        .collect()
}
