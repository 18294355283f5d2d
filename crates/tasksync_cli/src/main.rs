//! `tasksync` command-line front end.
//!
//! # Responsibility
//! - Open the saved list, run one command against the store, print views.
//! - Translate list positions into selection clicks before store operations.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command, Pick};
use log::info;
use tasksync_core::db::open_db;
use tasksync_core::{
    default_log_level, init_logging, ListKind, ListViewModel, SelectModifiers, Session,
    ShareView, SqliteKeyValueRepository, TaskId, TaskStore,
};

const PROGRESS_BAR_WIDTH: usize = 20;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = log_dir.to_str().context("log directory must be valid UTF-8")?;
        init_logging(level, log_dir).context("failed to start logging")?;
    }

    let conn = open_db(&cli.db).with_context(|| format!("failed to open {}", cli.db.display()))?;
    let share = match &cli.share_url {
        Some(url) => ShareView::with_base_url(url).context("invalid --share-url")?,
        None => ShareView::new(),
    };
    let mut session =
        Session::open_with(SqliteKeyValueRepository::new(conn), share, TaskStore::new)
            .context("failed to load saved list")?;
    info!("event=cli_start module=cli outcome={:?}", session.outcome());

    match cli.command {
        Command::Add { content } => {
            session.store.add(content.join(" "))?;
            print_list(&session);
        }
        Command::List => print_list(&session),
        Command::Complete(args) => {
            let view = session.list.current();
            select(&mut session.store, &view, ListKind::Pending, &args.picks)?;
            let moved = session.store.complete_selected()?;
            println!("Completed {moved} task(s).");
            print_list(&session);
        }
        Command::Undo(args) => {
            let view = session.list.current();
            select(&mut session.store, &view, ListKind::Completed, &args.picks)?;
            let moved = session.store.undo_selected()?;
            println!("Moved {moved} task(s) back to the to-do list.");
            print_list(&session);
        }
        Command::Remove { todo, done } => {
            if todo.is_empty() && done.is_empty() {
                bail!("nothing to remove; pass --todo and/or --done positions");
            }
            let view = session.list.current();
            select(&mut session.store, &view, ListKind::Pending, &todo)?;
            select(&mut session.store, &view, ListKind::Completed, &done)?;
            let removed = session.store.remove_selected()?;
            println!("Removed {removed} task(s).");
            print_list(&session);
        }
        Command::Summary => {
            let summary = session.summary.current();
            println!("Done: {}  To do: {}", summary.completed, summary.pending);
            println!("{}", summary.bar(PROGRESS_BAR_WIDTH));
        }
        Command::Share => {
            if let Some(share) = session.share.current() {
                println!("{}", share.message);
                println!("{}", share.link);
            }
        }
    }

    Ok(())
}

/// Replays `picks` as clicks: the first pick replaces the selection and later
/// picks are added with ctrl. Ranges click the start, then shift-click the end.
///
/// A pick naming an already picked item is rejected, since a second ctrl
/// click would deselect it.
fn select(
    store: &mut TaskStore,
    view: &ListViewModel,
    list: ListKind,
    picks: &[Pick],
) -> Result<()> {
    for (index, pick) in picks.iter().enumerate() {
        let first = if index == 0 {
            SelectModifiers::none()
        } else {
            SelectModifiers::ctrl()
        };
        match *pick {
            Pick::Single(position) => {
                let id = resolve(view, list, position)?;
                if index > 0 && store.selection(list).contains(&id) {
                    bail!("position {position} is picked more than once");
                }
                store.select_item(list, id, first);
            }
            Pick::Range(start, end) => {
                if index > 0 {
                    bail!("a range must be the only pick");
                }
                let start_id = resolve(view, list, start)?;
                let end_id = resolve(view, list, end)?;
                store.select_item(list, start_id, first);
                store.select_item(list, end_id, SelectModifiers::shift());
            }
        }
    }
    Ok(())
}

fn resolve(view: &ListViewModel, list: ListKind, position: usize) -> Result<TaskId> {
    view.id_at(list, position).with_context(|| {
        format!(
            "no item at position {position} in the {} list",
            list.as_str()
        )
    })
}

fn print_list(session: &Session<SqliteKeyValueRepository>) {
    print!("{}", session.list.current().render_text(&[]));
}
