use serde::Deserialize;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A public GitHub user profile from the `/users/{username}` API.
///
/// Only the fields the profile card shows are kept; everything else in the
/// response is ignored.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    #[serde(rename = "public_repos")]
    pub public_repo_count: u64,
    #[serde(rename = "html_url")]
    pub profile_url: String,
}

impl Profile {
    /// Name shown as the card title: the display name when set, the login otherwise.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.login,
        }
    }

    /// `@login` subtitle, only present when the title is a display name.
    pub fn handle(&self) -> Option<String> {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => Some(format!("@{}", self.login)),
            _ => None,
        }
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref().filter(|bio| !bio.trim().is_empty())
    }
}
