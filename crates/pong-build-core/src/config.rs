//! Dispatcher settings: which tool to run and where its profiles live.
//!
//! Settings come from an optional JSON file. Every field may be omitted and
//! falls back to the values the project has always used.

use std::path::{Path, PathBuf};

use crate::error::DispatchError;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pong-build.json";
/// Environment variable naming a settings file.
pub const CONFIG_ENV_VAR: &str = "PONG_BUILD_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Package manager executable.
    pub tool: String,
    /// Directory holding one sub-directory of profiles per platform.
    pub profiles_root: String,
    /// Profile file name inside a platform directory.
    pub toolchain: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tool: "conan".to_string(),
            profiles_root: "conan".to_string(),
            toolchain: "llvm-20".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json(path: &Path, text: &str) -> Result<Settings, DispatchError> {
        serde_json::from_str(text).map_err(|e| DispatchError::Config {
            path: path.display().to_string(),
            msg: e.to_string(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Settings, DispatchError> {
        let text = std::fs::read_to_string(path).map_err(|e| DispatchError::Config {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;
        Settings::from_json(path, &text)
    }

    /// Resolve and load settings.
    ///
    /// `explicit` wins, then `env_path` (the value of [`CONFIG_ENV_VAR`]);
    /// both must point at a readable file. Otherwise [`DEFAULT_CONFIG_FILE`]
    /// in `cwd` is used when present, and defaults when not.
    pub fn discover(
        explicit: Option<&Path>,
        env_path: Option<&Path>,
        cwd: &Path,
    ) -> Result<(Settings, Option<PathBuf>), DispatchError> {
        if let Some(path) = explicit.or(env_path) {
            let settings = Settings::from_file(path)?;
            return Ok((settings, Some(path.to_path_buf())));
        }

        let local = cwd.join(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            let settings = Settings::from_file(&local)?;
            return Ok((settings, Some(local)));
        }

        Ok((Settings::default(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let s = Settings::from_json(Path::new("x.json"), r#"{"toolchain": "gcc-14"}"#).unwrap();
        assert_eq!(s.toolchain, "gcc-14");
        assert_eq!(s.tool, "conan");
        assert_eq!(s.profiles_root, "conan");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Settings::from_json(Path::new("x.json"), r#"{"tol": "conan2"}"#).unwrap_err();
        match err {
            DispatchError::Config { path, msg } => {
                assert_eq!(path, "x.json");
                assert!(msg.contains("tol"), "msg: {}", msg);
            }
            other => panic!("expected Config error, got: {:?}", other),
        }
    }

    #[test]
    fn discover_without_any_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let (settings, source) = Settings::discover(None, None, dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(source.is_none());
    }

    #[test]
    fn discover_picks_up_local_file() {
        let dir = tempfile::tempdir().expect("create tempdir");
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), r#"{"tool": "conan2"}"#)
            .expect("write settings");
        let (settings, source) = Settings::discover(None, None, dir.path()).unwrap();
        assert_eq!(settings.tool, "conan2");
        assert_eq!(source, Some(dir.path().join(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    fn explicit_path_beats_env_and_local() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let explicit = dir.path().join("explicit.json");
        let env = dir.path().join("env.json");
        std::fs::write(&explicit, r#"{"tool": "from-explicit"}"#).expect("write");
        std::fs::write(&env, r#"{"tool": "from-env"}"#).expect("write");
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), r#"{"tool": "from-local"}"#)
            .expect("write");

        let (s, _) = Settings::discover(Some(&explicit), Some(&env), dir.path()).unwrap();
        assert_eq!(s.tool, "from-explicit");
        let (s, _) = Settings::discover(None, Some(&env), dir.path()).unwrap();
        assert_eq!(s.tool, "from-env");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let missing = dir.path().join("nope.json");
        let err = Settings::discover(Some(&missing), None, dir.path()).unwrap_err();
        assert!(matches!(err, DispatchError::Config { .. }));
    }
}
