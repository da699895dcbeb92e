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

//! Signed-in user session.
//!
//! There is exactly one [`Session`] per process, owned by the application
//! state. It is only mutated in response to identity service results
//! (sign-in, sign-out, current user lookup). Screens do not poll it; they
//! subscribe and receive an [`AppEvent::SessionChanged`] on every change.

use std::sync::mpsc::Sender;

use tracing::{debug, info};

use crate::{events::AppEvent, model::UserProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionChange {
    SignedIn(UserProfile),
    SignedOut,
}

#[derive(Default)]
pub(crate) struct Session {
    user: Option<UserProfile>,
    logged_in: bool,
    subscribers: Vec<Sender<AppEvent>>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&mut self, listener: Sender<AppEvent>) {
        self.subscribers.push(listener);
    }

    /// Starts a session for the given user.
    pub(crate) fn init(&mut self, user: UserProfile) {
        info!(user = %user.username, "session started");
        self.user = Some(user.clone());
        self.logged_in = true;
        self.notify(SessionChange::SignedIn(user));
    }

    /// Ends the session, dropping any cached user.
    pub(crate) fn clear(&mut self) {
        info!("session cleared");
        self.user = None;
        self.logged_in = false;
        self.notify(SessionChange::SignedOut);
    }

    /// Marks the session as logged in before the user record is known, for
    /// example right after the backend accepts credentials.
    pub(crate) fn set_logged_in(&mut self, logged_in: bool) {
        self.logged_in = logged_in;
    }

    pub(crate) fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub(crate) fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    fn notify(&mut self, change: SessionChange) {
        self.subscribers.retain(|tx| {
            let alive = tx.send(AppEvent::SessionChanged(change.clone())).is_ok();
            if !alive {
                debug!("pruning closed session subscriber");
            }
            alive
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::model::fixtures::user;

    #[test]
    fn init_and_clear_notify_subscribers() {
        let (tx, rx) = mpsc::channel();
        let mut session = Session::new();
        session.subscribe(tx);

        session.init(user());
        assert!(session.is_logged_in());
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("jsmastery"));

        session.clear();
        assert!(!session.is_logged_in());
        assert!(session.user().is_none());

        let changes: Vec<SessionChange> = rx
            .try_iter()
            .filter_map(|event| match event {
                AppEvent::SessionChanged(change) => Some(change),
                _ => None,
            })
            .collect();
        assert_eq!(changes, vec![SessionChange::SignedIn(user()), SessionChange::SignedOut]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let (tx, rx) = mpsc::channel();
        let (live_tx, live_rx) = mpsc::channel();
        let mut session = Session::new();
        session.subscribe(tx);
        session.subscribe(live_tx);
        drop(rx);

        session.init(user());
        assert_eq!(session.subscribers.len(), 1);
        assert!(live_rx.try_recv().is_ok());
    }

    #[test]
    fn logged_in_flag_can_precede_user() {
        let mut session = Session::new();
        session.set_logged_in(true);
        assert!(session.is_logged_in());
        assert!(session.user().is_none());
    }
}
