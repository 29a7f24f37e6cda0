//! Shared fixtures for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::ProfileLookup;
use crate::errors::LookupError;
use crate::models::Profile;

pub fn profile(login: &str, followers: u64) -> Profile {
    Profile {
        login: login.to_string(),
        name: None,
        avatar_url: format!("https://avatars.githubusercontent.com/{login}"),
        bio: None,
        followers,
        following: 0,
        public_repo_count: 8,
        profile_url: format!("https://github.com/{login}"),
    }
}

/// Lookup with canned answers keyed by username:
///
/// - `torvalds`: a profile with 150,000 followers
/// - `octocat`: a profile with a display name and bio
/// - `teapot`: a 418 status
/// - `garbled`: a malformed body
/// - anything else: not found
#[derive(Default)]
pub struct FakeLookup {
    calls: AtomicUsize,
    usernames: Mutex<Vec<String>>,
}

impl FakeLookup {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn usernames(&self) -> Vec<String> {
        self.usernames.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileLookup for FakeLookup {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.usernames.lock().unwrap().push(username.to_string());

        match username {
            "torvalds" => Ok(profile("torvalds", 150_000)),
            "octocat" => Ok(Profile {
                name: Some("The Octocat".to_string()),
                bio: Some("Mascot".to_string()),
                following: 9,
                ..profile("octocat", 21_000)
            }),
            "teapot" => Err(LookupError::Status(reqwest::StatusCode::IM_A_TEAPOT)),
            "garbled" => Err(serde_json::from_str::<Profile>("{}").unwrap_err().into()),
            _ => Err(LookupError::NotFound),
        }
    }
}
