// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Handlers for non-keyboard application events.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    App, MainView,
    components::Notification,
    errors::{AuthError, FetchError},
    events::ContainerId,
    model::{MediaCollection, UserProfile, session::SessionChange},
    playback::MediaEvent,
    tasks::AppTask,
};

pub(super) fn handle_tick(app: &mut App) {
    app.home.refresh_visibility();
    app.search_view.feed.refresh_visibility();
    app.profile_view.feed.refresh_visibility();
}

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    let main_view = match main_view {
        MainView::Profile if !app.session.is_logged_in() => MainView::SignIn,
        MainView::SignIn if app.session.is_logged_in() => MainView::Profile,
        view => view,
    };

    if main_view != app.main_view {
        // Leaving a screen stops whatever it was playing.
        stop_view(app, app.main_view);
        app.main_view = main_view;
    }
}

fn stop_view(app: &mut App, view: MainView) {
    match view {
        MainView::Home => {
            app.home.trending.stop();
            app.home.feed.stop();
        }
        MainView::Search => app.search_view.feed.stop(),
        MainView::Profile => app.profile_view.feed.stop(),
        MainView::SignIn => {}
    }
}

pub(super) fn handle_refresh(app: &mut App) -> Result<()> {
    match app.main_view {
        MainView::Home => load_home(app),
        MainView::Search => match app.search_view.query().map(str::to_string) {
            Some(query) => {
                app.search_view.feed.set_pending();
                app.task_tx.send(AppTask::Search(query))?;
                Ok(())
            }
            None => Ok(()),
        },
        MainView::Profile => refresh_profile(app),
        MainView::SignIn => {
            app.task_tx.send(AppTask::CheckSession)?;
            Ok(())
        }
    }
}

pub(crate) fn load_home(app: &mut App) -> Result<()> {
    app.home.trending.set_pending();
    app.home.feed.set_pending();
    app.task_tx
        .send(AppTask::LoadTrending(app.config.playback.trending_limit))?;
    app.task_tx.send(AppTask::LoadFeed)?;
    Ok(())
}

/// Re-resolves the user when the session is marked logged in but no user is
/// known yet, otherwise reloads the user's videos.
fn refresh_profile(app: &mut App) -> Result<()> {
    match app.session.user() {
        None if app.session.is_logged_in() => {
            debug!("logged in without a user, resolving current user");
            app.task_tx.send(AppTask::CheckSession)?;
        }
        None => {}
        Some(user) => {
            app.profile_view.feed.set_pending();
            app.task_tx.send(AppTask::LoadUserItems(user.id.clone()))?;
        }
    }
    Ok(())
}

pub(super) fn handle_new_search_query(app: &mut App, query: String) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        app.notifications.push(Notification::missing_query());
        return Ok(());
    }

    app.search_view.begin(query.to_string());
    app.task_tx.send(AppTask::Search(query.to_string()))?;
    handle_set_main_view(app, MainView::Search);

    Ok(())
}

pub(super) fn handle_media_event(app: &mut App, container: ContainerId, event: MediaEvent) {
    let result = match container {
        ContainerId::Trending => app.home.trending.handle_media_event(event),
        ContainerId::Feed => app.home.feed.handle_media_event(event),
        ContainerId::Profile => app.profile_view.feed.handle_media_event(event),
        ContainerId::Search => app.search_view.feed.handle_media_event(event),
    };

    if let Err(e) = result {
        warn!(?container, "playback failed: {e}");
        app.notifications.push(Notification::playback(&e));
    }
}

pub(super) fn handle_trending_loaded(app: &mut App, items: MediaCollection) {
    app.home.trending.replace_items(items);
}

pub(super) fn handle_feed_loaded(app: &mut App, items: MediaCollection) {
    app.home.feed.replace_items(items);
}

pub(super) fn handle_user_items_loaded(app: &mut App, user_id: String, items: MediaCollection) {
    let is_shown = app.profile_view.user().is_some_and(|user| user.id == user_id);
    if is_shown {
        app.profile_view.feed.replace_items(items);
    } else {
        debug!(%user_id, "dropping videos of a user no longer shown");
    }
}

pub(super) fn handle_search_results_ready(app: &mut App, query: String, items: MediaCollection) {
    app.search_view.accept_results(&query, items);
}

/// The collection on screen, if any, is kept and retried on the next
/// refresh.
pub(super) fn handle_fetch_failed(app: &mut App, container: ContainerId, err: FetchError) {
    warn!(?container, "fetch failed: {err}");
    match container {
        ContainerId::Trending => app.home.trending.fetch_failed(),
        ContainerId::Feed => app.home.feed.fetch_failed(),
        ContainerId::Profile => app.profile_view.feed.fetch_failed(),
        ContainerId::Search => app.search_view.feed.fetch_failed(),
    }
}

pub(super) fn handle_sign_in(app: &mut App, email: String, password: String) -> Result<()> {
    app.task_tx.send(AppTask::SignIn { email, password })?;
    Ok(())
}

pub(super) fn handle_sign_out(app: &mut App) -> Result<()> {
    app.task_tx.send(AppTask::SignOut)?;
    Ok(())
}

pub(super) fn handle_current_user_resolved(app: &mut App, user: Option<UserProfile>) {
    match user {
        Some(user) => {
            app.session.set_logged_in(true);
            app.session.init(user);
        }
        None if app.session.is_logged_in() => {
            info!("session has expired");
            app.session.clear();
        }
        None => debug!("no active session"),
    }
}

pub(super) fn handle_session_check_failed(app: &mut App, err: AuthError) {
    if app.session.is_logged_in() {
        warn!("failed to resolve current user: {err}");
    } else {
        debug!("no current user: {err}");
    }
}

pub(super) fn handle_signed_in(app: &mut App, user: UserProfile) {
    app.session.set_logged_in(true);
    app.session.init(user);
    handle_set_main_view(app, MainView::Home);
}

pub(super) fn handle_sign_in_failed(app: &mut App, err: AuthError) {
    warn!("sign in failed: {err}");

    let message = match &err {
        AuthError::Unauthorized | AuthError::Status { status: 400..=401, .. } => {
            "Invalid credentials. Please check the email and password.".to_string()
        }
        AuthError::ProfileMissing(_) => {
            // The backend accepted the credentials, so there is a session to
            // resolve the user for later.
            app.session.set_logged_in(true);
            "Signed in, but no user profile was found for this account.".to_string()
        }
        other => other.to_string(),
    };

    app.notifications.push(Notification::error("Sign in failed", message));
}

pub(super) fn handle_signed_out(app: &mut App) {
    app.session.clear();
    app.notifications
        .push(Notification::info("Signed out", "You have been signed out."));
    handle_set_main_view(app, MainView::SignIn);
}

pub(super) fn handle_session_changed(app: &mut App, change: SessionChange) -> Result<()> {
    match change {
        SessionChange::SignedIn(user) => {
            let user_id = user.id.clone();
            app.profile_view.set_user(user);
            app.profile_view.feed.set_pending();
            app.task_tx.send(AppTask::LoadUserItems(user_id))?;
        }
        SessionChange::SignedOut => {
            app.profile_view.clear();
            if app.main_view == MainView::Profile {
                handle_set_main_view(app, MainView::SignIn);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::mpsc::{self, Receiver},
    };

    use super::*;
    use crate::{
        config::AppConfig,
        events::AppEvent,
        model::{
            ItemId,
            fixtures::{collection, user},
        },
        playback::{
            MediaEventKind, PlaybackState,
            testing::{FakeMedia, MediaCall},
        },
    };

    struct Fixture {
        app: App,
        task_rx: Receiver<AppTask>,
        media: HashMap<ContainerId, FakeMedia>,
    }

    impl Fixture {
        fn new() -> Self {
            let (task_tx, task_rx) = mpsc::channel();
            let media: HashMap<ContainerId, FakeMedia> = [
                ContainerId::Trending,
                ContainerId::Feed,
                ContainerId::Profile,
                ContainerId::Search,
            ]
            .into_iter()
            .map(|container| (container, FakeMedia::new()))
            .collect();

            let app = App::with_players(AppConfig::default(), task_tx, |container, _| {
                media[&container].boxed()
            });

            Self { app, task_rx, media }
        }

        fn signed_in() -> Self {
            let mut fixture = Self::new();
            handle_current_user_resolved(&mut fixture.app, Some(user()));
            fixture.deliver_session_changes();
            fixture.tasks();
            fixture
        }

        /// Feeds queued session notifications back through their handler.
        fn deliver_session_changes(&mut self) {
            let events: Vec<AppEvent> = self.app.event_rx.try_iter().collect();
            for event in events {
                if let AppEvent::SessionChanged(change) = event {
                    handle_session_changed(&mut self.app, change).unwrap();
                }
            }
        }

        fn tasks(&self) -> Vec<AppTask> {
            self.task_rx.try_iter().collect()
        }
    }

    #[test]
    fn failed_session_check_does_not_sign_out() {
        let mut fixture = Fixture::signed_in();

        handle_session_check_failed(&mut fixture.app, AuthError::Decode("timeout".into()));

        assert!(fixture.app.session.is_logged_in());
        assert_eq!(fixture.app.session.user().map(|u| u.id.as_str()), Some("user-1"));
    }

    #[test]
    fn videos_of_a_user_no_longer_shown_are_dropped() {
        let mut fixture = Fixture::signed_in();

        handle_user_items_loaded(&mut fixture.app, "user-2".into(), collection(&["x", "y"]));
        assert!(fixture.app.profile_view.feed.items().is_empty());

        handle_user_items_loaded(&mut fixture.app, "user-1".into(), collection(&["a"]));
        assert_eq!(fixture.app.profile_view.feed.items().len(), 1);
    }

    #[test]
    fn leaving_a_screen_stops_its_playback() {
        let mut fixture = Fixture::new();
        handle_feed_loaded(&mut fixture.app, collection(&["a", "b"]));

        fixture.app.home.feed.tap_selected().unwrap();
        let media = &fixture.media[&ContainerId::Feed];
        let ticket = media.last_ticket().unwrap();
        handle_media_event(
            &mut fixture.app,
            ContainerId::Feed,
            MediaEvent::new(ticket, MediaEventKind::Loaded),
        );

        let a = ItemId::from("a");
        assert_eq!(fixture.app.home.feed.state(&a), PlaybackState::Playing);

        handle_set_main_view(&mut fixture.app, MainView::Search);

        assert_eq!(fixture.app.main_view, MainView::Search);
        assert_eq!(fixture.app.home.feed.state(&a), PlaybackState::Idle);
        assert_eq!(media.calls().last(), Some(&MediaCall::Release));
    }

    #[test]
    fn playback_failure_becomes_a_notification() {
        let mut fixture = Fixture::new();
        handle_feed_loaded(&mut fixture.app, collection(&["a"]));
        fixture.app.home.feed.tap_selected().unwrap();

        let ticket = fixture.media[&ContainerId::Feed].last_ticket().unwrap();
        handle_media_event(
            &mut fixture.app,
            ContainerId::Feed,
            MediaEvent::new(ticket, MediaEventKind::Failed("404".into())),
        );

        assert_eq!(
            fixture.app.notifications.current().map(|n| n.title.as_str()),
            Some("Playback Error")
        );
        assert_eq!(fixture.app.home.feed.current_item(), None);
    }

    #[test]
    fn profile_requires_a_session() {
        let mut fixture = Fixture::new();
        handle_set_main_view(&mut fixture.app, MainView::Profile);
        assert_eq!(fixture.app.main_view, MainView::SignIn);

        let mut fixture = Fixture::signed_in();
        handle_set_main_view(&mut fixture.app, MainView::Profile);
        assert_eq!(fixture.app.main_view, MainView::Profile);

        handle_set_main_view(&mut fixture.app, MainView::SignIn);
        assert_eq!(fixture.app.main_view, MainView::Profile);
    }

    #[test]
    fn sign_out_clears_the_profile_and_shows_sign_in() {
        let mut fixture = Fixture::signed_in();
        handle_user_items_loaded(&mut fixture.app, "user-1".into(), collection(&["a"]));
        handle_set_main_view(&mut fixture.app, MainView::Profile);

        handle_signed_out(&mut fixture.app);
        fixture.deliver_session_changes();

        assert_eq!(fixture.app.main_view, MainView::SignIn);
        assert!(!fixture.app.session.is_logged_in());
        assert!(fixture.app.profile_view.user().is_none());
        assert!(fixture.app.profile_view.feed.items().is_empty());
    }

    #[test]
    fn expired_session_redirects_from_profile() {
        let mut fixture = Fixture::signed_in();
        handle_set_main_view(&mut fixture.app, MainView::Profile);

        handle_current_user_resolved(&mut fixture.app, None);
        fixture.deliver_session_changes();

        assert_eq!(fixture.app.main_view, MainView::SignIn);
        assert!(fixture.app.session.user().is_none());
    }

    #[test]
    fn profile_refresh_resolves_a_missing_user() {
        let mut fixture = Fixture::new();
        handle_sign_in_failed(&mut fixture.app, AuthError::ProfileMissing("account-1".into()));
        handle_set_main_view(&mut fixture.app, MainView::Profile);
        assert_eq!(fixture.app.main_view, MainView::Profile);

        handle_refresh(&mut fixture.app).unwrap();
        assert!(matches!(fixture.tasks().as_slice(), [AppTask::CheckSession]));
    }

    #[test]
    fn profile_refresh_reloads_the_users_videos() {
        let mut fixture = Fixture::signed_in();
        handle_set_main_view(&mut fixture.app, MainView::Profile);

        handle_refresh(&mut fixture.app).unwrap();

        assert!(fixture.app.profile_view.feed.is_pending());
        assert!(matches!(
            fixture.tasks().as_slice(),
            [AppTask::LoadUserItems(id)] if id == "user-1"
        ));
    }

    #[test]
    fn empty_search_is_reported_not_sent() {
        let mut fixture = Fixture::new();

        handle_new_search_query(&mut fixture.app, "   ".into()).unwrap();

        assert!(fixture.tasks().is_empty());
        assert_eq!(fixture.app.main_view, MainView::Home);
        assert_eq!(
            fixture.app.notifications.current().map(|n| n.title.as_str()),
            Some("Missing query")
        );
    }

    #[test]
    fn fetch_failure_keeps_the_current_collection() {
        let mut fixture = Fixture::new();
        handle_feed_loaded(&mut fixture.app, collection(&["a", "b"]));
        load_home(&mut fixture.app).unwrap();

        handle_fetch_failed(
            &mut fixture.app,
            ContainerId::Feed,
            FetchError::Status {
                status: 503,
                message: "unavailable".into(),
            },
        );

        assert_eq!(fixture.app.home.feed.items().len(), 2);
        assert!(!fixture.app.home.feed.is_pending());
    }
}
