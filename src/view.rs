use crate::controller::SearchState;
use crate::format::group_thousands;
use crate::i18n::Translations;
use crate::models::Profile;

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;

/// What the result area below the search bar shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultView {
    Empty,
    Loading { text: String },
    Error { message: String, retry: String },
    Card(ProfileCard),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCard {
    pub title: String,
    pub handle: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub stats: [Stat; 3],
    pub link_label: String,
    pub profile_url: String,
}

impl ProfileCard {
    pub fn new(profile: &Profile, t: &Translations) -> Self {
        let stat = |value: u64, label: &str| Stat {
            value: group_thousands(value),
            label: label.to_string(),
        };

        Self {
            title: profile.display_name().to_string(),
            handle: profile.handle(),
            bio: profile.bio().map(str::to_string),
            avatar_url: profile.avatar_url.clone(),
            stats: [
                stat(profile.followers, &t.followers),
                stat(profile.following, &t.following),
                stat(profile.public_repo_count, &t.repositories),
            ],
            link_label: t.view_profile.clone(),
            profile_url: profile.profile_url.clone(),
        }
    }
}

impl ResultView {
    pub fn from_state(state: &SearchState, t: &Translations) -> Self {
        if state.is_loading() {
            return ResultView::Loading {
                text: t.loading.clone(),
            };
        }
        if let Some(message) = state.error_message() {
            return ResultView::Error {
                message: message.to_string(),
                retry: t.try_again.clone(),
            };
        }
        match state.profile() {
            Some(profile) => ResultView::Card(ProfileCard::new(profile, t)),
            None => ResultView::Empty,
        }
    }
}
