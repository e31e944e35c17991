// Name normalization for the substring heuristic.

use crate::profile::SubstringMode;

/// Keep alphabetic characters only, lower-cased.
///
/// `"mixamorig:LeftArm"` becomes `"mixamorigleftarm"`, `"Spine_01"` becomes
/// `"spine"`.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Whether a normalized source and target are related under `mode`.
///
/// The containment test is literal: an empty normalized name is contained in
/// every other name. With `skip_empty` set, a pair with an empty side is
/// never related.
pub fn substring_related(
    source_norm: &str,
    target_norm: &str,
    mode: SubstringMode,
    skip_empty: bool,
) -> bool {
    if skip_empty && (source_norm.is_empty() || target_norm.is_empty()) {
        return false;
    }
    match mode {
        SubstringMode::TargetContainsSource => target_norm.contains(source_norm),
        SubstringMode::Either => {
            target_norm.contains(source_norm) || source_norm.contains(target_norm)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_non_alpha() {
        assert_eq!(normalize_name("mixamorig:LeftArm"), "mixamorigleftarm");
        assert_eq!(normalize_name("Spine_01"), "spine");
        assert_eq!(normalize_name("brow_up.L"), "browupl");
        assert_eq!(normalize_name("_01"), "");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn normalize_lowercases_unicode() {
        assert_eq!(normalize_name("Ärm_L"), "ärml");
    }

    #[test]
    fn target_contains_source_is_directional() {
        let mode = SubstringMode::TargetContainsSource;
        assert!(substring_related("leftarm", "mixamorigleftarm", mode, false));
        assert!(!substring_related("mixamorigleftarm", "leftarm", mode, false));
    }

    #[test]
    fn either_checks_both_directions() {
        let mode = SubstringMode::Either;
        assert!(substring_related("leftarm", "mixamorigleftarm", mode, false));
        assert!(substring_related("mixamorigleftarm", "leftarm", mode, false));
        assert!(!substring_related("leftarm", "rightleg", mode, false));
    }

    #[test]
    fn empty_name_is_contained_everywhere() {
        let mode = SubstringMode::TargetContainsSource;
        assert!(substring_related("", "spine", mode, false));
        assert!(!substring_related("spine", "", mode, false));
        assert!(substring_related("spine", "", SubstringMode::Either, false));
    }

    #[test]
    fn skip_empty_drops_empty_pairs() {
        assert!(!substring_related("", "spine", SubstringMode::Either, true));
        assert!(!substring_related("spine", "", SubstringMode::Either, true));
        assert!(substring_related("spine", "spineupper", SubstringMode::Either, true));
    }
}
