#![windows_subsystem = "windows"]
mod avatar;
mod client;
mod config;
mod controller;
mod errors;
mod format;
mod i18n;
mod models;
mod preferences;
#[cfg(test)]
mod test_support;
mod ui;
mod view;
slint::include_modules!();

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::avatar::AVATAR_SIZE;
use crate::client::{GitHubClient, ProfileLookup};
use crate::config::AppConfig;
use crate::controller::{CompletedSearch, ProfileLookupController};
use crate::i18n::Dictionary;
use crate::preferences::{FileStore, MemoryStore, PreferenceStore};

type Controller = ProfileLookupController<Box<dyn PreferenceStore>>;

fn main() -> anyhow::Result<()> {
    // Load .env variables
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env();
    info!(api_url = %config.api_url, "starting");

    // Shared HTTP Client
    let http_client = client::build_client()?;
    let lookup: Arc<dyn ProfileLookup> =
        Arc::new(GitHubClient::new(http_client.clone(), &config.api_url));

    let dictionary = Dictionary::embedded().context("Failed to load translations")?;
    let store: Box<dyn PreferenceStore> = match &config.preferences_path {
        Some(path) => {
            let store = FileStore::open(path);
            debug!(path = %store.path().display(), "preferences file");
            Box::new(store)
        }
        None => {
            warn!("no config directory; preferences will not be saved");
            Box::new(MemoryStore::default())
        }
    };
    let controller: Rc<RefCell<Controller>> = Rc::new(RefCell::new(ProfileLookupController::new(
        lookup, store, dictionary,
    )));

    // Background tokio runtime for async HTTP
    let rt = Arc::new(tokio::runtime::Runtime::new()?);

    // Create the UI
    let app = AppWindow::new()?;
    ui::render(&app, &*controller.borrow());

    // =============================================
    //  CALLBACK: search-requested (button or Enter)
    // =============================================
    {
        let app_weak = app.as_weak();
        let controller = controller.clone();
        let http_client = http_client.clone();
        let rt = rt.clone();

        app.on_search_requested(move |query| {
            let Some(app) = app_weak.upgrade() else { return };

            let pending = controller.borrow_mut().begin_search(&query);
            app.set_avatar(slint::Image::default());
            ui::render(&app, &*controller.borrow());

            let Some(pending) = pending else { return };
            let ticket = pending.ticket();
            info!(username = pending.username(), "looking up profile");

            let app_weak = app.as_weak();
            let controller = controller.clone();
            let http_client = http_client.clone();
            let task = rt.spawn(async move {
                let completed = pending.resolve().await;
                let avatar_url = completed.outcome.as_ref().ok().map(|p| p.avatar_url.clone());

                let mut avatar = None;
                if let Some(url) = avatar_url {
                    match avatar::download_avatar(&http_client, &url, AVATAR_SIZE).await {
                        Ok(pixels) => avatar = Some(pixels),
                        Err(err) => debug!(%url, err = %format!("{err:#}"), "avatar unavailable"),
                    }
                }
                (completed, avatar)
            });

            // The lookup runs on the runtime; its result is applied back on
            // the UI thread, which owns the controller.
            let spawned = slint::spawn_local(async move {
                let (completed, avatar) = match task.await {
                    Ok(done) => done,
                    Err(err) => (
                        CompletedSearch {
                            ticket,
                            outcome: Err(err.into()),
                        },
                        None,
                    ),
                };

                if let Err(err) = &completed.outcome {
                    info!(%err, "profile lookup failed");
                }
                let applied = controller.borrow_mut().complete_search(completed);
                if !applied {
                    return;
                }

                if let Some(app) = app_weak.upgrade() {
                    if let Some(pixels) = &avatar {
                        app.set_avatar(ui::avatar_image(pixels));
                    }
                    ui::render(&app, &*controller.borrow());
                }
            });
            if let Err(err) = spawned {
                warn!(%err, "failed to schedule search completion");
            }
        });
    }

    // =============================================
    //  CALLBACK: language-selected
    // =============================================
    {
        let app_weak = app.as_weak();
        let controller = controller.clone();

        app.on_language_selected(move |code| {
            if !controller.borrow_mut().select_language(&code) {
                warn!(%code, "unsupported language");
                return;
            }
            if let Some(app) = app_weak.upgrade() {
                ui::render(&app, &*controller.borrow());
            }
        });
    }

    // =============================================
    //  CALLBACK: theme-toggled
    // =============================================
    {
        let app_weak = app.as_weak();
        let controller = controller.clone();

        app.on_theme_toggled(move || {
            controller.borrow_mut().toggle_theme();
            if let Some(app) = app_weak.upgrade() {
                ui::render(&app, &*controller.borrow());
            }
        });
    }

    // =============================================
    //  CALLBACK: profile-clicked
    // =============================================
    app.on_profile_clicked(|url| {
        // Open the profile in the native Web Browser
        if let Err(err) = open::that(url.as_str()) {
            warn!(%url, %err, "failed to open profile link");
        }
    });

    // Run the Slint event loop
    app.run()?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
