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

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    errors::FetchError,
    events::{AppEvent, ContainerId},
    model::MediaCollection,
    tasks::TaskContext,
};

/// Sends `loaded` on success, or a fetch failure for `container`.
fn deliver(
    ctx: &TaskContext,
    container: ContainerId,
    result: Result<MediaCollection, FetchError>,
    loaded: impl FnOnce(MediaCollection) -> AppEvent,
) -> Result<()> {
    let event = match result {
        Ok(collection) => {
            debug!(?container, count = collection.len(), "collection loaded");
            loaded(collection)
        }
        Err(e) => AppEvent::FetchFailed(container, e),
    };
    ctx.event_tx.send(event)?;

    Ok(())
}

pub(super) fn load_trending(ctx: &mut TaskContext, limit: usize) -> Result<()> {
    let result = ctx.backend.list_trending_items(limit);
    deliver(ctx, ContainerId::Trending, result, AppEvent::TrendingLoaded)
}

pub(super) fn load_feed(ctx: &mut TaskContext) -> Result<()> {
    let result = ctx.backend.list_feed_items();
    deliver(ctx, ContainerId::Feed, result, AppEvent::FeedLoaded)
}

pub(super) fn load_user_items(ctx: &mut TaskContext, user_id: String) -> Result<()> {
    let result = ctx.backend.list_user_items(&user_id);
    deliver(ctx, ContainerId::Profile, result, |items| {
        AppEvent::UserItemsLoaded(user_id, items)
    })
}

pub(super) fn search(ctx: &mut TaskContext, query: String) -> Result<()> {
    let result = ctx.backend.search_items(&query);
    deliver(ctx, ContainerId::Search, result, |items| {
        AppEvent::SearchResultsReady(query, items)
    })
}

pub(super) fn check_session(ctx: &mut TaskContext) -> Result<()> {
    let event = match ctx.backend.current_user() {
        Ok(user) => AppEvent::CurrentUserResolved(user),
        Err(e) => AppEvent::SessionCheckFailed(e),
    };
    ctx.event_tx.send(event)?;

    Ok(())
}

pub(super) fn sign_in(ctx: &mut TaskContext, email: &str, password: &str) -> Result<()> {
    let event = match ctx.backend.sign_in(email, password) {
        Ok(user) => {
            info!(username = %user.username, "signed in");
            AppEvent::SignedIn(user)
        }
        Err(e) => AppEvent::SignInFailed(e),
    };
    ctx.event_tx.send(event)?;

    Ok(())
}

pub(super) fn sign_out(ctx: &mut TaskContext) -> Result<()> {
    if let Err(e) = ctx.backend.sign_out() {
        warn!("remote sign out failed: {e}");
    }
    ctx.event_tx.send(AppEvent::SignedOut)?;

    Ok(())
}
