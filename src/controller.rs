//! The profile search state machine and the preferences it renders with.
//!
//! A search is split in two halves so the caller never holds the controller
//! across the network wait: [`ProfileLookupController::begin_search`] moves
//! the state to loading and hands back a [`PendingSearch`], and
//! [`ProfileLookupController::complete_search`] applies its outcome.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::ProfileLookup;
use crate::errors::{LookupError, SearchError};
use crate::i18n::{Dictionary, Language, Translations};
use crate::models::Profile;
use crate::preferences::{PreferenceStore, Preferences};
use crate::view::ResultView;

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

type LookupFuture = Pin<Box<dyn Future<Output = Result<Profile, LookupError>> + Send>>;

/// What the result area reflects. Only the four constructors below create
/// values, so a profile and an error message never coexist and a loading
/// state carries neither.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    query_text: String,
    profile: Option<Profile>,
    is_loading: bool,
    error_message: Option<String>,
}

impl SearchState {
    fn loading(query_text: String) -> Self {
        Self {
            query_text,
            is_loading: true,
            ..Self::default()
        }
    }

    fn loaded(query_text: String, profile: Profile) -> Self {
        Self {
            query_text,
            profile: Some(profile),
            ..Self::default()
        }
    }

    fn failed(query_text: String, message: String) -> Self {
        Self {
            query_text,
            error_message: Some(message),
            ..Self::default()
        }
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Identifies one started search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// A started search whose request has not run yet.
///
/// The request is only sent once [`PendingSearch::resolve`] is awaited, which
/// may happen on any runtime.
pub struct PendingSearch {
    ticket: SearchTicket,
    username: String,
    request: LookupFuture,
}

impl PendingSearch {
    pub fn ticket(&self) -> SearchTicket {
        self.ticket
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub async fn resolve(self) -> CompletedSearch {
        CompletedSearch {
            ticket: self.ticket,
            outcome: self.request.await,
        }
    }
}

/// The outcome of a [`PendingSearch`], ready to be applied.
#[derive(Debug)]
pub struct CompletedSearch {
    pub ticket: SearchTicket,
    pub outcome: Result<Profile, LookupError>,
}

pub struct ProfileLookupController<S> {
    lookup: Arc<dyn ProfileLookup>,
    store: S,
    dictionary: Dictionary,
    preferences: Preferences,
    state: SearchState,
    latest: SearchTicket,
}

impl<S: PreferenceStore> ProfileLookupController<S> {
    /// Creates the controller, reading preferences from `store`.
    pub fn new(lookup: Arc<dyn ProfileLookup>, store: S, dictionary: Dictionary) -> Self {
        let preferences = Preferences::load(&store);
        if !dictionary.contains(preferences.language) {
            warn!(language = %preferences.language, "no translations, using default");
        }
        info!(
            language = %preferences.language,
            dark_mode = preferences.dark_mode,
            "loaded preferences"
        );

        Self {
            lookup,
            store,
            dictionary,
            preferences,
            state: SearchState::default(),
            latest: SearchTicket::default(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Display strings for the active language.
    pub fn translations(&self) -> &Translations {
        self.dictionary.get(self.preferences.language)
    }

    pub fn view(&self) -> ResultView {
        ResultView::from_state(&self.state, self.translations())
    }

    /// Starts a search for `query_text`.
    ///
    /// A blank query fails immediately and returns `None` without touching the
    /// lookup service. Otherwise the state becomes loading, clearing any prior
    /// result, and the returned search must be resolved and passed to
    /// [`Self::complete_search`].
    pub fn begin_search(&mut self, query_text: &str) -> Option<PendingSearch> {
        // Any submission, even a rejected one, supersedes searches in flight.
        self.latest = SearchTicket(self.latest.0 + 1);

        let username = query_text.trim();
        if username.is_empty() {
            self.fail(query_text.to_string(), &SearchError::EmptyInput);
            return None;
        }

        self.state = SearchState::loading(query_text.to_string());
        debug!(ticket = self.latest.0, username, "search started");

        let lookup = Arc::clone(&self.lookup);
        let owned = username.to_string();
        let request: LookupFuture = Box::pin(async move { lookup.fetch_profile(&owned).await });

        Some(PendingSearch {
            ticket: self.latest,
            username: username.to_string(),
            request,
        })
    }

    /// Applies a finished search. Returns `false` when a newer search has
    /// started since, in which case the outcome is dropped.
    pub fn complete_search(&mut self, completed: CompletedSearch) -> bool {
        if completed.ticket != self.latest {
            debug!(
                ticket = completed.ticket.0,
                latest = self.latest.0,
                "dropping superseded search result"
            );
            return false;
        }

        let query_text = std::mem::take(&mut self.state.query_text);
        match completed.outcome {
            Ok(profile) => {
                debug!(login = %profile.login, "search succeeded");
                self.state = SearchState::loaded(query_text, profile);
            }
            Err(err) => self.fail(query_text, &SearchError::LookupFailure(err)),
        }
        true
    }

    fn fail(&mut self, query_text: String, err: &SearchError) {
        debug!(%err, "search failed");
        let message = self.translations().search_error(err).to_string();
        self.state = SearchState::failed(query_text, message);
    }

    /// Switches the display language and persists it.
    pub fn set_language(&mut self, language: Language) {
        self.preferences.language = language;
        if let Err(err) = self.preferences.save_language(&mut self.store) {
            warn!(%err, "failed to persist language");
        }
    }

    /// [`Self::set_language`] from a code; unsupported codes are ignored.
    pub fn select_language(&mut self, code: &str) -> bool {
        match code.parse::<Language>() {
            Ok(language) => {
                self.set_language(language);
                true
            }
            Err(err) => {
                debug!(%err, "language unchanged");
                false
            }
        }
    }

    /// Flips between dark and light theme and persists the choice.
    pub fn toggle_theme(&mut self) {
        self.preferences.dark_mode = !self.preferences.dark_mode;
        if let Err(err) = self.preferences.save_dark_mode(&mut self.store) {
            warn!(%err, "failed to persist theme");
        }
    }
}
