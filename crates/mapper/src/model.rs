use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::profile::{Profile, SuggestOptions};

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Rule that decided an entry, highest confidence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    Exact,
    Fuzzy,
    Substring,
    Unmatched,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
            Self::Substring => "substring",
            Self::Unmatched => "unmatched",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingEntry {
    pub source: String,
    pub target: Option<String>,
    pub rule: MatchRule,
    /// Similarity ratio, for fuzzy matches only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Source name -> target name (or unmatched), in source order.
///
/// Serializes as a JSON object whose values are strings or `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
    /// source name -> slot in `entries`
    slots: FxHashMap<String, usize>,
    source_len: usize,
}

impl Mapping {
    /// `entries` must hold one entry per distinct source name.
    pub(crate) fn new(entries: Vec<MappingEntry>, source_len: usize) -> Self {
        let slots = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.source.clone(), i))
            .collect();
        Self { entries, slots, source_len }
    }

    /// `None` if `source` is not a key; `Some(None)` if it is unmatched.
    pub fn get(&self, source: &str) -> Option<Option<&str>> {
        self.entry(source).map(|e| e.target.as_deref())
    }

    pub fn entry(&self, source: &str) -> Option<&MappingEntry> {
        self.slots.get(source).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.entries
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_deref()))
    }

    pub fn summary(&self) -> MappingSummary {
        let count = |rule: MatchRule| self.entries.iter().filter(|e| e.rule == rule).count();
        MappingSummary {
            sources: self.source_len,
            unique_sources: self.entries.len(),
            exact: count(MatchRule::Exact),
            fuzzy: count(MatchRule::Fuzzy),
            substring: count(MatchRule::Substring),
            unmatched: count(MatchRule::Unmatched),
        }
    }

    pub fn report(&self, profile: Profile, options: &SuggestOptions) -> MappingReport {
        MappingReport {
            profile,
            cutoff: options.cutoff,
            substring: options.substring.as_str(),
            on_duplicate: options.on_duplicate.as_str(),
            skip_empty_names: options.skip_empty_names,
            summary: self.summary(),
            entries: self.entries.clone(),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.source, &entry.target)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Summary + report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MappingSummary {
    /// Length of the source list, duplicates included.
    pub sources: usize,
    pub unique_sources: usize,
    pub exact: usize,
    pub fuzzy: usize,
    pub substring: usize,
    pub unmatched: usize,
}

impl MappingSummary {
    pub fn matched(&self) -> usize {
        self.exact + self.fuzzy + self.substring
    }
}

/// Explain record: how every source name was decided.
#[derive(Debug, Clone, Serialize)]
pub struct MappingReport {
    pub profile: Profile,
    pub cutoff: f64,
    pub substring: &'static str,
    pub on_duplicate: &'static str,
    pub skip_empty_names: bool,
    pub summary: MappingSummary,
    pub entries: Vec<MappingEntry>,
}
