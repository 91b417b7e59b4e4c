use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Arc,
};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::Instrument;

use super::MenuHelper;
use crate::constants::WATCH_SETTLE;

impl MenuHelper {
    /// reloads the menu whenever its file changes on disk.
    ///
    /// failing to set up the watch only means edits are picked up after a restart.
    pub fn watch(self: &Arc<Self>) {
        let path = match self.source_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(err = %e, menu = %self.name(), "cannot watch menu items for changes");
                return;
            }
        };

        match spawn_watcher(Arc::clone(self), &path) {
            Ok(()) => {
                tracing::debug!(menu = %self.name(), path = %path.display(), "watching for changes")
            }
            Err(e) => tracing::error!(
                err = ?e,
                menu = %self.name(),
                path = %path.display(),
                "unable to watch for changes"
            ),
        }
    }
}

fn spawn_watcher(menu: Arc<MenuHelper>, path: &Path) -> notify::Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let file_name = path.file_name().map(OsString::from);

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) if touches(&event, file_name.as_deref()) => {
                let _ = tx.send(());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(err = ?e, "file watcher reported an error"),
        },
        Config::default(),
    )?;

    // editors often save by renaming a temp file over the original, which a
    // watch on the file itself would not survive.
    watcher.watch(&watch_root(path), RecursiveMode::NonRecursive)?;

    tokio::spawn(
        async move {
            let _watcher = watcher;
            reload_on_change(&menu, rx).await;
        }
        .in_current_span(),
    );

    Ok(())
}

fn watch_root(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn touches(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|changed| changed.file_name() == file_name)
}

/// reloads once per burst of change notifications, after the burst went quiet for
/// [`WATCH_SETTLE`] so a half-written file is never read.
async fn reload_on_change(menu: &MenuHelper, mut changes: mpsc::UnboundedReceiver<()>) {
    while changes.recv().await.is_some() {
        while let Ok(Some(())) = tokio::time::timeout(WATCH_SETTLE, changes.recv()).await {}

        tracing::debug!(menu = %menu.name(), "menu items changed on disk, reloading");
        let _ = menu.load();
    }
}
