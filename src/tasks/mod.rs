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

//! Background application task processing.
//!
//! This module implements the command pattern used to offload blocking
//! backend calls from the main UI thread. It provides a dedicated worker
//! loop that translates [`AppTask`] requests into content and identity
//! service calls and broadcasts the results back to the application via
//! [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.

mod handlers;

use anyhow::Result;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};
use tracing::{debug, error};

use crate::{content::Backend, events::AppEvent};

#[derive(Debug)]
pub(crate) enum AppTask {
    LoadTrending(usize),
    LoadFeed,
    LoadUserItems(String),
    Search(String),

    CheckSession,
    SignIn { email: String, password: String },
    SignOut,
}

/// Spawns a background thread to process application tasks.
///
/// The worker owns the backend client and enters a blocking loop, listening
/// for incoming [`AppTask`]s until every sender has been dropped.
///
/// # Arguments
///
/// * `backend` - The content and identity services.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    backend: Box<dyn Backend>,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_task_worker(backend, &task_rx, &event_tx))
}

fn run_task_worker(mut backend: Box<dyn Backend>, task_rx: &Receiver<AppTask>, event_tx: &Sender<AppEvent>) {
    while let Ok(task) = task_rx.recv() {
        let mut ctx = TaskContext {
            backend: backend.as_mut(),
            event_tx,
        };

        if let Err(e) = handle_task(task, &mut ctx) {
            error!("task failed: {e:#}");
            let _ = event_tx.send(AppEvent::Error(e.to_string()));
        }
    }

    debug!("task worker stopped");
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a> {
    backend: &'a mut dyn Backend,
    event_tx: &'a Sender<AppEvent>,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::LoadTrending(limit) => handlers::load_trending(ctx, limit),
        AppTask::LoadFeed => handlers::load_feed(ctx),
        AppTask::LoadUserItems(user_id) => handlers::load_user_items(ctx, user_id),
        AppTask::Search(query) => handlers::search(ctx, query),

        AppTask::CheckSession => handlers::check_session(ctx),
        AppTask::SignIn { email, password } => handlers::sign_in(ctx, &email, &password),
        AppTask::SignOut => handlers::sign_out(ctx),
    }
}
