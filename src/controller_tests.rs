use super::*;
use crate::errors::StorageError;
use crate::preferences::{MemoryStore, DARK_MODE_KEY, LANGUAGE_KEY};
use crate::test_support::FakeLookup;
use crate::view::ResultView;

fn controller_with(
    lookup: &Arc<FakeLookup>,
    store: MemoryStore,
) -> ProfileLookupController<MemoryStore> {
    ProfileLookupController::new(lookup.clone(), store, Dictionary::embedded().unwrap())
}

fn controller(lookup: &Arc<FakeLookup>) -> ProfileLookupController<MemoryStore> {
    controller_with(lookup, MemoryStore::default())
}

async fn search(controller: &mut ProfileLookupController<MemoryStore>, query: &str) -> bool {
    let pending = controller.begin_search(query).expect("search should start");
    let completed = pending.resolve().await;
    controller.complete_search(completed)
}

fn assert_exclusive(state: &SearchState) {
    assert!(!(state.profile().is_some() && state.error_message().is_some()));
    if state.is_loading() {
        assert!(state.profile().is_none());
        assert!(state.error_message().is_none());
    }
}

#[test]
fn test_initial_state_is_empty() {
    let lookup = Arc::new(FakeLookup::default());
    let controller = controller(&lookup);

    assert_eq!(controller.state(), &SearchState::default());
    assert_eq!(controller.view(), ResultView::Empty);
}

#[test]
fn test_blank_query_fails_without_lookup() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);
    let required = controller.translations().username_required.clone();

    for query in ["", " ", "   ", "\t", "\n \t"] {
        assert!(controller.begin_search(query).is_none());

        let state = controller.state();
        assert_eq!(state.error_message(), Some(required.as_str()));
        assert!(state.profile().is_none());
        assert!(!state.is_loading());
        assert_exclusive(state);
    }
    assert_eq!(lookup.calls(), 0);
}

#[test]
fn test_empty_query_uses_localized_message() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    controller.begin_search("");
    assert_eq!(
        controller.state().error_message(),
        Some("Por favor, digite um usuário do GitHub.")
    );

    controller.set_language(Language::En);
    controller.begin_search("");
    assert_eq!(
        controller.state().error_message(),
        Some("Please enter a GitHub username.")
    );
    assert_eq!(lookup.calls(), 0);
}

#[test]
fn test_begin_search_enters_loading() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    let pending = controller.begin_search("torvalds").unwrap();

    let state = controller.state();
    assert!(state.is_loading());
    assert!(state.profile().is_none());
    assert!(state.error_message().is_none());
    assert_eq!(state.query_text(), "torvalds");
    assert_eq!(pending.username(), "torvalds");
    assert!(matches!(controller.view(), ResultView::Loading { .. }));
    // The request only goes out once the search is resolved.
    assert_eq!(lookup.calls(), 0);
}

#[tokio::test]
async fn test_successful_search_shows_profile() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    assert!(search(&mut controller, "torvalds").await);

    let state = controller.state();
    assert!(!state.is_loading());
    assert!(state.error_message().is_none());
    assert_eq!(state.profile().map(|p| p.login.as_str()), Some("torvalds"));
    assert_eq!(lookup.calls(), 1);

    let ResultView::Card(card) = controller.view() else {
        panic!("expected a profile card");
    };
    assert_eq!(card.stats[0].value, "150,000");
}

#[tokio::test]
async fn test_not_found_shows_localized_message() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);
    let not_found = controller.translations().not_found.clone();

    assert!(search(&mut controller, "this-user-does-not-exist-xyz").await);

    let state = controller.state();
    assert_eq!(state.error_message(), Some(not_found.as_str()));
    assert!(state.profile().is_none());
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_every_failure_collapses_to_not_found() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);
    let not_found = controller.translations().not_found.clone();

    for username in ["nobody", "teapot", "garbled"] {
        search(&mut controller, username).await;

        let state = controller.state();
        assert_eq!(state.error_message(), Some(not_found.as_str()), "{username}");
        assert!(state.profile().is_none());
        assert!(!state.is_loading());
    }
}

#[tokio::test]
async fn test_query_is_trimmed_before_lookup() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    search(&mut controller, "  torvalds \t").await;

    assert_eq!(lookup.usernames(), vec!["torvalds".to_string()]);
    assert_eq!(controller.state().query_text(), "  torvalds \t");
    assert!(controller.state().profile().is_some());
}

#[tokio::test]
async fn test_new_search_clears_previous_result() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    search(&mut controller, "torvalds").await;
    assert!(controller.state().profile().is_some());

    let _pending = controller.begin_search("nobody").unwrap();
    assert!(controller.state().profile().is_none());
    assert_exclusive(controller.state());

    let _ = controller.begin_search(" ");
    search(&mut controller, "octocat").await;
    assert!(controller.state().error_message().is_none());
    assert_eq!(
        controller.state().profile().map(|p| p.login.as_str()),
        Some("octocat")
    );
}

#[tokio::test]
async fn test_superseded_result_is_dropped() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    let first = controller.begin_search("octocat").unwrap();
    let second = controller.begin_search("torvalds").unwrap();
    assert!(first.ticket() < second.ticket());

    let second_done = second.resolve().await;
    let first_done = first.resolve().await;

    assert!(controller.complete_search(second_done));
    assert!(!controller.complete_search(first_done));
    assert_eq!(
        controller.state().profile().map(|p| p.login.as_str()),
        Some("torvalds")
    );
}

#[tokio::test]
async fn test_superseded_result_arriving_first_keeps_loading() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    let first = controller.begin_search("nobody").unwrap();
    let second = controller.begin_search("torvalds").unwrap();

    assert!(!controller.complete_search(first.resolve().await));
    assert!(controller.state().is_loading());
    assert_exclusive(controller.state());

    assert!(controller.complete_search(second.resolve().await));
    assert!(controller.state().profile().is_some());
}

#[tokio::test]
async fn test_blank_search_supersedes_search_in_flight() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    let pending = controller.begin_search("torvalds").unwrap();
    assert!(controller.begin_search("").is_none());
    let required = controller.state().clone();

    assert!(!controller.complete_search(pending.resolve().await));
    assert_eq!(controller.state(), &required);
    assert!(controller.state().profile().is_none());
}

#[test]
fn test_preferences_loaded_from_store() {
    let lookup = Arc::new(FakeLookup::default());
    let store = MemoryStore::with_values([(LANGUAGE_KEY, "es"), (DARK_MODE_KEY, "false")]);
    let controller = controller_with(&lookup, store);

    assert_eq!(controller.preferences().language, Language::Es);
    assert!(!controller.preferences().dark_mode);
    assert_eq!(controller.translations().title, "Perfil de GitHub");
}

#[test]
fn test_select_language_supported_code_persists() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    assert!(controller.select_language("en"));

    assert_eq!(controller.preferences().language, Language::En);
    assert_eq!(controller.store().get(LANGUAGE_KEY).as_deref(), Some("en"));
    assert_eq!(controller.translations().title, "GitHub Profile");
}

#[test]
fn test_select_language_unsupported_code_is_ignored() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);

    for code in ["fr", "EN", "", "pt-BR"] {
        assert!(!controller.select_language(code));
        assert_eq!(controller.preferences().language, Language::Pt);
    }
    assert_eq!(controller.store().get(LANGUAGE_KEY), None);
}

#[test]
fn test_toggle_theme_twice_restores_original() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);
    let original = controller.preferences().dark_mode;

    controller.toggle_theme();
    assert_eq!(controller.preferences().dark_mode, !original);
    assert_eq!(
        controller.store().get(DARK_MODE_KEY),
        Some((!original).to_string())
    );

    controller.toggle_theme();
    assert_eq!(controller.preferences().dark_mode, original);
    assert_eq!(
        controller.store().get(DARK_MODE_KEY),
        Some(original.to_string())
    );
}

#[tokio::test]
async fn test_preference_changes_do_not_touch_search_state() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller(&lookup);
    search(&mut controller, "torvalds").await;
    let before = controller.state().clone();

    controller.toggle_theme();
    controller.set_language(Language::Es);

    assert_eq!(controller.state(), &before);
    assert_eq!(lookup.calls(), 1);
}

#[derive(Default)]
struct ReadOnlyStore;

impl PreferenceStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }
}

#[test]
fn test_storage_failure_still_updates_preferences() {
    let lookup: Arc<dyn ProfileLookup> = Arc::new(FakeLookup::default());
    let mut controller =
        ProfileLookupController::new(lookup, ReadOnlyStore, Dictionary::embedded().unwrap());

    controller.set_language(Language::En);
    controller.toggle_theme();

    assert_eq!(controller.preferences().language, Language::En);
    assert!(!controller.preferences().dark_mode);
}

#[tokio::test]
async fn test_error_view_has_message_and_retry_line() {
    let lookup = Arc::new(FakeLookup::default());
    let mut controller = controller_with(&lookup, MemoryStore::with_values([(LANGUAGE_KEY, "en")]));

    search(&mut controller, "this-user-does-not-exist-xyz").await;

    assert_eq!(
        controller.view(),
        ResultView::Error {
            message: "No profile found with this username.".to_string(),
            retry: "Please try again.".to_string(),
        }
    );
}
