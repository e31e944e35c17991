use serde::{Deserialize, Serialize};

use crate::error::MapperError;

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Which kind of names are being mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Generated blendshape names onto mesh shapekeys.
    Blendshape,
    /// Motion-capture joint names onto armature bones.
    Joint,
}

impl Profile {
    pub fn default_cutoff(&self) -> f64 {
        match self {
            Self::Blendshape => 0.45,
            Self::Joint => 0.5,
        }
    }

    pub fn default_substring(&self) -> SubstringMode {
        match self {
            Self::Blendshape => SubstringMode::TargetContainsSource,
            Self::Joint => SubstringMode::Either,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blendshape => "blendshape",
            Self::Joint => "joint",
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Substring heuristic + duplicate policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstringMode {
    /// Normalized target must contain the normalized source.
    TargetContainsSource,
    /// Containment in either direction.
    Either,
}

impl SubstringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TargetContainsSource => "target_contains_source",
            Self::Either => "either",
        }
    }
}

/// What to do when the source list repeats a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// One key per distinct name, placed at its first occurrence.
    #[default]
    LastWins,
    /// Fail with `MapperError::DuplicateSource`.
    Reject,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastWins => "last_wins",
            Self::Reject => "reject",
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestOptions {
    pub cutoff: f64,
    pub substring: SubstringMode,
    pub on_duplicate: DuplicatePolicy,
    /// Leave names with no alphabetic characters out of the substring step.
    pub skip_empty_names: bool,
}

impl SuggestOptions {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            cutoff: profile.default_cutoff(),
            substring: profile.default_substring(),
            on_duplicate: DuplicatePolicy::default(),
            skip_empty_names: false,
        }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Result<Self, MapperError> {
        validate_cutoff(cutoff)?;
        self.cutoff = cutoff;
        Ok(self)
    }

    pub fn with_substring(mut self, substring: SubstringMode) -> Self {
        self.substring = substring;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    pub fn with_skip_empty_names(mut self, skip: bool) -> Self {
        self.skip_empty_names = skip;
        self
    }
}

pub(crate) fn validate_cutoff(cutoff: f64) -> Result<(), MapperError> {
    if (0.0..=1.0).contains(&cutoff) {
        Ok(())
    } else {
        Err(MapperError::InvalidCutoff(cutoff))
    }
}
