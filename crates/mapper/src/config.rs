use serde::Deserialize;

use crate::error::MapperError;
use crate::profile::{validate_cutoff, DuplicatePolicy, Profile, SubstringMode, SuggestOptions};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Tunables for both profiles. Every key is optional; missing keys fall back
/// to the profile defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapperConfig {
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
    #[serde(default)]
    pub skip_empty_names: bool,
    #[serde(default)]
    pub blendshape: ProfileConfig,
    #[serde(default)]
    pub joint: ProfileConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    #[serde(default)]
    pub cutoff: Option<f64>,
    #[serde(default)]
    pub substring: Option<SubstringMode>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MapperConfig {
    pub fn from_toml(input: &str) -> Result<Self, MapperError> {
        let config: MapperConfig =
            toml::from_str(input).map_err(|e| MapperError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MapperError> {
        for (profile, section) in [(Profile::Blendshape, &self.blendshape), (Profile::Joint, &self.joint)] {
            if let Some(cutoff) = section.cutoff {
                validate_cutoff(cutoff).map_err(|_| {
                    MapperError::ConfigValidation(format!(
                        "[{profile}] cutoff must be between 0 and 1, got {cutoff}"
                    ))
                })?;
            }
        }
        Ok(())
    }

    pub fn profile(&self, profile: Profile) -> &ProfileConfig {
        match profile {
            Profile::Blendshape => &self.blendshape,
            Profile::Joint => &self.joint,
        }
    }

    /// Resolved options for `profile`: config values over profile defaults.
    pub fn options_for(&self, profile: Profile) -> SuggestOptions {
        let section = self.profile(profile);
        let defaults = SuggestOptions::for_profile(profile);
        SuggestOptions {
            cutoff: section.cutoff.unwrap_or(defaults.cutoff),
            substring: section.substring.unwrap_or(defaults.substring),
            on_duplicate: self.on_duplicate,
            skip_empty_names: self.skip_empty_names,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
