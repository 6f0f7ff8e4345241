//! Where chat text comes from.
//!
//! The pipeline only needs `fetch_chat_text(criteria) -> text | absent`.
//! Mailbox access is not part of this crate; `FolderSource` plays the same
//! role over a local drop folder where exported chats (`.txt` or `.zip`) land.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use zip::ZipArchive;

#[derive(Debug, Clone, Default)]
pub struct FetchCriteria {
    pub subject_pattern: String,
    pub target_date: Option<NaiveDate>,
}

pub trait ChatSource {
    /// `Ok(None)` means nothing matched; errors are `AuthFailure` or
    /// `TransientConnection` for remote sources, `Io`/`Archive` for local ones.
    fn fetch_chat_text(&self, criteria: &FetchCriteria) -> AppResult<Option<String>>;
}

/// A single export file, plain text or zipped.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl ChatSource for FileSource {
    fn fetch_chat_text(&self, _criteria: &FetchCriteria) -> AppResult<Option<String>> {
        if !self.path.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Chat export not found: {}", self.path.display()),
            )));
        }
        read_export(&self.path)
    }
}

/// Newest export in a folder whose file name contains the subject pattern.
pub struct FolderSource {
    pub dir: PathBuf,
}

impl FolderSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn candidates(&self, criteria: &FetchCriteria) -> AppResult<Vec<(PathBuf, DateTime<Local>)>> {
        let needle = criteria.subject_pattern.replace(['*', '%'], "").trim().to_lowercase();
        let mut out = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || !is_export_file(&path) {
                continue;
            }

            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if !needle.is_empty() && !name.contains(&needle) {
                continue;
            }

            let modified: DateTime<Local> = fs::metadata(&path)?.modified()?.into();
            if let Some(day) = criteria.target_date
                && modified.date_naive() != day
            {
                continue;
            }

            out.push((path, modified));
        }

        // newest first
        out.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(out)
    }
}

impl ChatSource for FolderSource {
    fn fetch_chat_text(&self, criteria: &FetchCriteria) -> AppResult<Option<String>> {
        if !self.dir.is_dir() {
            return Err(AppError::Config(format!(
                "Inbox folder does not exist: {}",
                self.dir.display()
            )));
        }

        let candidates = self.candidates(criteria)?;
        let Some((path, _)) = candidates.into_iter().next() else {
            info!(dir = %self.dir.display(), pattern = %criteria.subject_pattern, "no chat export found");
            return Ok(None);
        };

        info!(file = %path.display(), "using chat export");
        read_export(&path)
    }
}

/// Retry transient failures up to `attempts` times with linear backoff.
/// Any other error (auth included) is returned immediately.
pub fn fetch_with_retry(
    source: &dyn ChatSource,
    criteria: &FetchCriteria,
    attempts: u32,
    backoff: Duration,
) -> AppResult<Option<String>> {
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match source.fetch_chat_text(criteria) {
            Err(e) if e.is_transient() && attempt < attempts => {
                warn!(attempt, attempts, error = %e, "chat fetch failed, retrying");
                thread::sleep(backoff * attempt);
                attempt += 1;
            }
            other => return other,
        }
    }
}

fn is_export_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .as_deref(),
        Some("txt") | Some("zip")
    )
}

/// Read a `.txt` export, or the first `.txt` entry of a `.zip` export.
pub fn read_export(path: &Path) -> AppResult<Option<String>> {
    let is_zip = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false);

    if !is_zip {
        let bytes = fs::read(path)?;
        return Ok(Some(String::from_utf8_lossy(&bytes).into_owned()));
    }

    let mut archive = ZipArchive::new(File::open(path)?)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() || !file.name().to_lowercase().ends_with(".txt") {
            continue;
        }

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        return Ok(Some(String::from_utf8_lossy(&bytes).into_owned()));
    }

    warn!(file = %path.display(), "archive contains no .txt entry");
    Ok(None)
}
