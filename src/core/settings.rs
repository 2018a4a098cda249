//! GitHub settings persistence using localStorage.
//!
//! Credentials are stored as one JSON object under [`SETTINGS_KEY`]. The
//! publish pipeline never touches this store; the UI reads the settings,
//! turns them into a [`PublishTarget`] and passes that along.

use serde::{Deserialize, Serialize};

use crate::config::SETTINGS_KEY;
use crate::core::error::{PublishError, SettingsError};
use crate::core::publish::PublishTarget;
use crate::utils::dom;

/// Credentials and repository coordinates entered by the user.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubSettings {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub repository: String,
}

impl GitHubSettings {
    /// Whether every field has been filled in.
    pub fn is_complete(&self) -> bool {
        [&self.token, &self.username, &self.repository]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    /// Publish target built from these settings.
    pub fn target(&self) -> Result<PublishTarget, PublishError> {
        PublishTarget::new(&self.token, &self.username, &self.repository)
    }
}

impl std::fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("username", &self.username)
            .field("repository", &self.repository)
            .finish()
    }
}

/// Key-value store for [`GitHubSettings`].
pub trait SettingsStore {
    /// Stored settings, or `None` if nothing (readable) is stored.
    fn get(&self) -> Option<GitHubSettings>;
    fn set(&self, settings: &GitHubSettings) -> Result<(), SettingsError>;
    fn clear(&self) -> Result<(), SettingsError>;
}

/// [`SettingsStore`] backed by `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSettings;

impl SettingsStore for LocalStorageSettings {
    fn get(&self) -> Option<GitHubSettings> {
        let storage = dom::local_storage()?;
        let json = storage.get_item(SETTINGS_KEY).ok()??;
        decode(&json)
    }

    fn set(&self, settings: &GitHubSettings) -> Result<(), SettingsError> {
        let storage = dom::local_storage().ok_or(SettingsError::StorageUnavailable)?;
        let json = encode(settings)?;
        storage
            .set_item(SETTINGS_KEY, &json)
            .map_err(|_| SettingsError::Write)
    }

    fn clear(&self) -> Result<(), SettingsError> {
        let storage = dom::local_storage().ok_or(SettingsError::StorageUnavailable)?;
        storage
            .remove_item(SETTINGS_KEY)
            .map_err(|_| SettingsError::Write)
    }
}

fn encode(settings: &GitHubSettings) -> Result<String, SettingsError> {
    serde_json::to_string(settings).map_err(|e| SettingsError::Serialize(e.to_string()))
}

/// Corrupt entries read as "nothing stored".
fn decode(json: &str) -> Option<GitHubSettings> {
    serde_json::from_str(json).ok()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct MemorySettings(RefCell<Option<String>>);

    impl SettingsStore for MemorySettings {
        fn get(&self) -> Option<GitHubSettings> {
            self.0.borrow().as_deref().and_then(decode)
        }

        fn set(&self, settings: &GitHubSettings) -> Result<(), SettingsError> {
            *self.0.borrow_mut() = Some(encode(settings)?);
            Ok(())
        }

        fn clear(&self) -> Result<(), SettingsError> {
            *self.0.borrow_mut() = None;
            Ok(())
        }
    }

    fn sample() -> GitHubSettings {
        GitHubSettings {
            token: "ghp_abc".to_string(),
            username: "octocat".to_string(),
            repository: "slides".to_string(),
        }
    }

    #[test]
    fn test_store_roundtrip_and_clear() {
        let store = MemorySettings::default();
        assert!(store.get().is_none());

        store.set(&sample()).unwrap();
        assert_eq!(store.get(), Some(sample()));

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_wire_format_matches_stored_key_names() {
        let json = encode(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"token":"ghp_abc","username":"octocat","repository":"slides"}"#
        );
    }

    #[test]
    fn test_decode_tolerates_missing_fields_and_garbage() {
        let partial = decode(r#"{"username":"octocat"}"#).unwrap();
        assert_eq!(partial.username, "octocat");
        assert!(!partial.is_complete());
        assert!(decode("not json").is_none());
    }

    #[test]
    fn test_target_from_settings() {
        let target = sample().target().unwrap();
        assert_eq!(target.owner(), "octocat");
        assert_eq!(target.repository(), "slides");

        let missing = GitHubSettings {
            repository: String::new(),
            ..sample()
        };
        assert_eq!(
            missing.target().unwrap_err().to_string(),
            "repository name is required"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", sample());
        assert!(!debug.contains("ghp_abc"));
    }
}
