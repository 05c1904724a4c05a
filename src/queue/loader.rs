// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::Config;
use crate::download::{Download, DownloadStatus};
use crate::error::QueueFileError;
use crate::filename::derive_local_path;
use crate::observer::{QueueEvent, SharedQueueObserver};
use crate::queue::record::QueueRecord;

/// Outcome of a reload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A download is currently in flight; neither the queue file nor the
    /// in-memory list was touched. Retry on the next tick.
    Busy,

    /// Queue state was reconciled and persisted
    Reloaded {
        /// Entries now in the queue, including freshly merged ones
        kept: usize,
        /// Entries dropped from the queue
        removed: usize,
    },
}

/// Downloads partitioned by what the next queue file rewrite does with
/// them. Together the two lists hold every input entry exactly once.
#[derive(Debug, Default)]
struct CategorizedDownloads {
    to_keep: Vec<Download>,
    to_delete: Vec<Download>,
}

/// Reconciles the caller's in-memory download list with the on-disk queue
/// file.
///
/// The queue file is the single durable record of pending downloads; the
/// in-memory list is a working cache carrying live status on top of it.
/// `reload` folds externally added queue entries into the list, rewrites
/// the file to match, and optionally prunes finished entries together
/// with their local files.
pub struct QueueLoader {
    queue_path: PathBuf,
    config: Config,
    observer: SharedQueueObserver,
}

impl QueueLoader {
    pub fn new(
        queue_path: impl Into<PathBuf>,
        config: Config,
        observer: SharedQueueObserver,
    ) -> Self {
        Self {
            queue_path: queue_path.into(),
            config,
            observer,
        }
    }

    /// Reconcile `downloads` with the queue file.
    ///
    /// Runs the phases strictly in order: partition the list, fold in
    /// queue file entries not yet known, atomically rewrite the file from
    /// the kept entries, then remove the local files of dropped entries
    /// when `delete_played_files` is enabled. On success `downloads` is
    /// replaced with the kept entries and the observer receives a single
    /// `ViewUpdateRequired`.
    ///
    /// While any entry is `Downloading` its final status and filename are
    /// not settled yet, so the whole operation backs off and returns
    /// `ReloadOutcome::Busy` without side effects.
    ///
    /// A write failure propagates; the previous on-disk file is still
    /// intact and `downloads` is unchanged, so the caller can simply
    /// retry later.
    pub fn reload(
        &self,
        downloads: &mut Vec<Download>,
        also_remove_finished: bool,
    ) -> Result<ReloadOutcome, QueueFileError> {
        let Some(mut categorized) = categorize_downloads(downloads, also_remove_finished) else {
            return Ok(ReloadOutcome::Busy);
        };

        self.update_from_queue_file(&mut categorized);
        self.write_queue_file(&categorized)?;
        self.delete_played_files(&categorized);

        let kept = categorized.to_keep.len();
        let removed = categorized.to_delete.len();
        *downloads = categorized.to_keep;

        self.observer.notify(QueueEvent::ViewUpdateRequired);

        Ok(ReloadOutcome::Reloaded { kept, removed })
    }

    /// Fold queue file records into the kept entries.
    ///
    /// The file may have been edited or appended to out-of-band since the
    /// last reload. Records whose URL is already present are skipped (the
    /// in-memory entry carries richer state); so are records matching an
    /// entry being dropped, or its line would survive the rewrite it is
    /// meant to disappear from. Everything else is appended as a freshly
    /// queued download, after the pre-existing entries, in file order.
    /// URLs compare by exact, case-sensitive match.
    fn update_from_queue_file(&self, categorized: &mut CategorizedDownloads) {
        let contents = match fs::read_to_string(&self.queue_path) {
            Ok(contents) => contents,
            // First run: no queue file yet
            Err(e) if e.kind() == ErrorKind::NotFound => return,
            Err(e) => {
                self.observer.notify(QueueEvent::QueueFileUnreadable {
                    path: self.queue_path.clone(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        for record in contents.lines().filter_map(QueueRecord::parse) {
            let known = categorized
                .to_keep
                .iter()
                .chain(&categorized.to_delete)
                .any(|download| download.url() == record.url);
            if known {
                continue;
            }

            let filename = match record.filename {
                Some(filename) => PathBuf::from(filename),
                None => derive_local_path(&record.url, &self.config.download_dir),
            };

            categorized.to_keep.push(Download::new(record.url, filename));
        }
    }

    /// Atomically rewrite the queue file from the kept entries.
    ///
    /// The live file is never truncated in place: a crash between
    /// truncate and write would lose the only durable record of pending
    /// downloads. Instead the new contents go to a sibling temporary file
    /// that is renamed over the original, so the path always holds either
    /// the complete old or the complete new contents.
    fn write_queue_file(&self, categorized: &CategorizedDownloads) -> Result<(), QueueFileError> {
        let dir = self
            .queue_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| QueueFileError::TempFileCreateFailed {
                dir: dir.to_path_buf(),
                source: e,
            })?;

        for download in &categorized.to_keep {
            writeln!(tmp, "{}", self.record_for(download).to_line()).map_err(|e| {
                QueueFileError::WriteFailed {
                    path: self.queue_path.clone(),
                    source: e,
                }
            })?;
        }

        tmp.as_file()
            .sync_all()
            .map_err(|e| QueueFileError::WriteFailed {
                path: self.queue_path.clone(),
                source: e,
            })?;

        tmp.persist(&self.queue_path)
            .map_err(|e| QueueFileError::ReplaceFailed {
                path: self.queue_path.clone(),
                source: e.error,
            })?;

        Ok(())
    }

    /// Remove the local files backing the dropped entries.
    ///
    /// No-op unless `delete_played_files` is enabled. A file that is
    /// already gone counts as removed; any other failure is reported per
    /// entry and the remaining entries are still processed. The queue
    /// file was rewritten before this runs, so a file left behind is a
    /// cleanliness issue, not lost queue state.
    fn delete_played_files(&self, categorized: &CategorizedDownloads) {
        if !self.config.delete_played_files {
            return;
        }

        for download in &categorized.to_delete {
            match fs::remove_file(download.filename()) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    self.observer.notify(QueueEvent::FileRemovalFailed {
                        path: download.filename().to_path_buf(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    /// Build the record for one download. The filename token is written
    /// only when the target differs from the derived default, keeping
    /// hand-edited files terse.
    fn record_for(&self, download: &Download) -> QueueRecord {
        let derived = derive_local_path(download.url(), &self.config.download_dir);
        let filename = (download.filename() != derived)
            .then(|| download.filename().to_string_lossy().into_owned());

        QueueRecord {
            url: download.url().to_string(),
            filename,
        }
    }
}

/// Split downloads into entries to keep in the queue file and entries to
/// drop from it.
///
/// Pure: no I/O, input untouched. Returns None as soon as any entry is
/// `Downloading` - its filename and final status are still in flux, and a
/// rewrite now could lose or duplicate the entry once it settles. With
/// `also_remove_finished`, `Finished` entries go to the drop list; every
/// other status is kept. Both lists preserve input order.
fn categorize_downloads(
    downloads: &[Download],
    also_remove_finished: bool,
) -> Option<CategorizedDownloads> {
    let mut categorized = CategorizedDownloads::default();

    for download in downloads {
        match download.status() {
            DownloadStatus::Downloading => return None,
            DownloadStatus::Finished if also_remove_finished => {
                categorized.to_delete.push(download.clone());
            }
            _ => categorized.to_keep.push(download.clone()),
        }
    }

    Some(categorized)
}
