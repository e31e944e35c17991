//! `rigmap-mapper` — suggests a mapping from one list of rig names to another.
//!
//! Pure engine crate: receives name lists, returns a mapping.
//! No CLI or IO dependencies.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod profile;
pub mod similarity;
pub mod suggest;

pub use config::MapperConfig;
pub use error::MapperError;
pub use model::{Mapping, MappingEntry, MappingReport, MappingSummary, MatchRule};
pub use profile::{DuplicatePolicy, Profile, SubstringMode, SuggestOptions};
pub use suggest::{suggest, suggest_blendshapes, suggest_joints, suggest_with_profile};
