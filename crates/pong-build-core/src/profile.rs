//! Platform identifier to conan profile path.

use std::fmt;

use crate::config::Settings;
use crate::error::DispatchError;
use crate::platform::Platform;

/// Path of a profile file, as handed to the package manager.
///
/// Never inspected or checked for existence here.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ProfileRef(String);

impl ProfileRef {
    pub fn for_platform(platform: Platform, settings: &Settings) -> Self {
        ProfileRef(format!(
            "{}/{}/{}",
            settings.profiles_root,
            platform.id(),
            settings.toolchain
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a platform identifier to `<profiles_root>/<platform>/<toolchain>`.
pub fn resolve_profile(platform_id: &str, settings: &Settings) -> Result<ProfileRef, DispatchError> {
    let platform = Platform::parse(platform_id)?;
    let profile = ProfileRef::for_platform(platform, settings);
    log::debug!("platform '{}' -> profile {}", platform_id, profile);
    Ok(profile)
}

/// One row of the profile listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProfileEntry {
    pub platform: Platform,
    pub profile: ProfileRef,
    /// Whether `host_id` resolved to this platform.
    pub host: bool,
}

/// Every known platform with the profile it resolves to.
pub fn known_profiles(settings: &Settings, host_id: &str) -> Vec<ProfileEntry> {
    let host = Platform::parse(host_id).ok();
    Platform::ALL
        .iter()
        .map(|&platform| ProfileEntry {
            platform,
            profile: ProfileRef::for_platform(platform, settings),
            host: host == Some(platform),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_platforms_resolve_to_fixed_layout() {
        let settings = Settings::default();
        assert_eq!(
            resolve_profile("linux", &settings).unwrap().as_str(),
            "conan/linux/llvm-20"
        );
        assert_eq!(
            resolve_profile("darwin", &settings).unwrap().as_str(),
            "conan/darwin/llvm-20"
        );
    }

    #[test]
    fn platform_is_an_exact_path_segment() {
        let settings = Settings::default();
        for id in ["linux", "darwin"] {
            let profile = resolve_profile(id, &settings).unwrap();
            let segments: Vec<&str> = profile.as_str().split('/').collect();
            assert!(segments.contains(&id), "{} not a segment of {}", id, profile);
            assert_eq!(segments.last(), Some(&"llvm-20"));
        }
    }

    #[test]
    fn macos_alias_uses_darwin_directory() {
        let profile = resolve_profile("macos", &Settings::default()).unwrap();
        assert_eq!(profile.as_str(), "conan/darwin/llvm-20");
    }

    #[test]
    fn settings_change_root_and_toolchain() {
        let settings = Settings {
            profiles_root: "profiles".to_string(),
            toolchain: "gcc-14".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            resolve_profile("linux", &settings).unwrap().as_str(),
            "profiles/linux/gcc-14"
        );
    }

    #[test]
    fn unknown_platform_carries_identifier() {
        let err = resolve_profile("windows", &Settings::default()).unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownPlatform {
                id: "windows".to_string()
            }
        );
    }

    #[test]
    fn listing_marks_host() {
        let entries = known_profiles(&Settings::default(), "macos");
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].host);
        assert_eq!(entries[1].platform, Platform::Darwin);
        assert!(entries[1].host);

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["platform"], "linux");
        assert_eq!(json["profile"], "conan/linux/llvm-20");
        assert_eq!(json["host"], false);
    }

    #[test]
    fn listing_for_unknown_host_marks_nothing() {
        let entries = known_profiles(&Settings::default(), "freebsd");
        assert!(entries.iter().all(|e| !e.host));
    }
}
