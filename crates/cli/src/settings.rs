// Config file discovery for the CLI.

use std::path::{Path, PathBuf};

use rigmap_mapper::{MapperConfig, MapperError};

/// `<config_dir>/rigmap/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rigmap").join("config.toml"))
}

/// Where the config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    UserDefault(PathBuf),
    BuiltIn,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(path) | Self::UserDefault(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => write!(f, "built-in defaults"),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Read { path: PathBuf, message: String },
    Invalid { path: PathBuf, source: MapperError },
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read config {}: {message}", path.display())
            }
            Self::Invalid { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for SettingsError {}

pub fn load_config_file(path: &Path) -> Result<MapperConfig, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|e| SettingsError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    MapperConfig::from_toml(&text).map_err(|source| SettingsError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Explicit path first (must exist), then the user default (if present),
/// then built-in profile defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<(MapperConfig, ConfigSource), SettingsError> {
    resolve_config_with_default(explicit, default_config_path().as_deref())
}

pub fn resolve_config_with_default(
    explicit: Option<&Path>,
    user_default: Option<&Path>,
) -> Result<(MapperConfig, ConfigSource), SettingsError> {
    if let Some(path) = explicit {
        let config = load_config_file(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    if let Some(path) = user_default.filter(|p| p.is_file()) {
        let config = load_config_file(path)?;
        return Ok((config, ConfigSource::UserDefault(path.to_path_buf())));
    }

    Ok((MapperConfig::default(), ConfigSource::BuiltIn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigmap_mapper::Profile;

    #[test]
    fn falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        let (config, source) = resolve_config_with_default(None, Some(missing.as_path())).unwrap();
        assert_eq!(source, ConfigSource::BuiltIn);
        assert_eq!(config.options_for(Profile::Joint).cutoff, 0.5);
    }

    #[test]
    fn user_default_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[joint]\ncutoff = 0.7\n").unwrap();
        let (config, source) = resolve_config_with_default(None, Some(path.as_path())).unwrap();
        assert_eq!(source, ConfigSource::UserDefault(path.clone()));
        assert_eq!(config.options_for(Profile::Joint).cutoff, 0.7);
    }

    #[test]
    fn explicit_beats_user_default() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("user.toml");
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&user, "[joint]\ncutoff = 0.7\n").unwrap();
        std::fs::write(&explicit, "[joint]\ncutoff = 0.6\n").unwrap();
        let (config, source) = resolve_config_with_default(Some(explicit.as_path()), Some(user.as_path())).unwrap();
        assert_eq!(source, ConfigSource::Explicit(explicit.clone()));
        assert_eq!(config.options_for(Profile::Joint).cutoff, 0.6);
    }

    #[test]
    fn explicit_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_config_with_default(Some(dir.path().join("nope.toml").as_path()), None).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn invalid_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[blendshape]\ncutoff = -1.0\n").unwrap();
        let err = load_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
        assert!(err.to_string().contains("cutoff"));
    }
}
