use std::rc::Rc;

use slint::{Image, ModelRc, Rgba8Pixel, SharedPixelBuffer, SharedString, VecModel};

use crate::avatar::AvatarPixels;
use crate::controller::ProfileLookupController;
use crate::i18n::Language;
use crate::preferences::PreferenceStore;
use crate::view::ResultView;
use crate::AppWindow;

/// Pushes the controller's current state into the window.
///
/// The avatar is the one exception: it is downloaded separately and set with
/// [`avatar_image`], so it survives re-renders until the next search.
pub fn render<S: PreferenceStore>(app: &AppWindow, controller: &ProfileLookupController<S>) {
    let prefs = controller.preferences();
    let t = controller.translations();

    app.set_dark_mode(prefs.dark_mode);
    app.set_header_title(t.title.as_str().into());
    app.set_placeholder(t.input_placeholder.as_str().into());
    app.set_search_text(t.search.as_str().into());
    app.set_theme_text(t.toggle_theme.as_str().into());

    let labels: Vec<SharedString> = Language::ALL
        .iter()
        .map(|lang| SharedString::from(t.menu_label(*lang)))
        .collect();
    let codes: Vec<SharedString> = Language::ALL
        .iter()
        .map(|lang| SharedString::from(lang.code()))
        .collect();
    app.set_language_labels(ModelRc::from(Rc::new(VecModel::from(labels))));
    app.set_language_codes(ModelRc::from(Rc::new(VecModel::from(codes))));
    app.set_language_index(prefs.language.index() as i32);

    let view = controller.view();
    app.set_is_loading(matches!(view, ResultView::Loading { .. }));
    app.set_has_error(matches!(view, ResultView::Error { .. }));
    app.set_has_profile(matches!(view, ResultView::Card(_)));

    match view {
        ResultView::Empty => {}
        ResultView::Loading { text } => app.set_loading_text(text.into()),
        ResultView::Error { message, retry } => {
            app.set_error_message(message.into());
            app.set_retry_text(retry.into());
        }
        ResultView::Card(card) => {
            let [followers, following, repos] = card.stats;

            app.set_display_name(card.title.into());
            app.set_handle(card.handle.unwrap_or_default().into());
            app.set_bio(card.bio.unwrap_or_default().into());
            app.set_followers(followers.value.into());
            app.set_followers_label(followers.label.into());
            app.set_following(following.value.into());
            app.set_following_label(following.label.into());
            app.set_repos(repos.value.into());
            app.set_repos_label(repos.label.into());
            app.set_view_profile_text(card.link_label.into());
            app.set_profile_url(card.profile_url.into());
        }
    }
}

pub fn avatar_image(pixels: &AvatarPixels) -> Image {
    let buffer =
        SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&pixels.rgba, pixels.width, pixels.height);
    Image::from_rgba8(buffer)
}
