use crate::chat::patterns::ChatPatterns;
use crate::chat::source::{ChatSource, FetchCriteria, FileSource, FolderSource, fetch_with_retry};
use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ingest::{IngestOptions, IngestReport, ingest_text};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::date::parse_cli_date;
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ingest {
        file,
        inbox,
        subject,
        date,
        since,
        dry_run,
        details,
    } = cmd
    {
        // configuration problems surface before any I/O
        let options = IngestOptions::from_config(cfg, since.as_deref(), *dry_run)?;

        let source: Box<dyn ChatSource> = match (file, *inbox) {
            (Some(path), _) => Box::new(FileSource::new(expand_tilde(path))),
            (None, true) => {
                let dir = cfg.inbox_dir.as_deref().ok_or_else(|| {
                    AppError::Config("inbox_dir is not set in the configuration".into())
                })?;
                Box::new(FolderSource::new(expand_tilde(dir)))
            }
            (None, false) => {
                return Err(AppError::Config(
                    "nothing to ingest: pass --file <export> or --inbox".into(),
                ));
            }
        };

        let criteria = FetchCriteria {
            subject_pattern: subject.clone().unwrap_or_else(|| cfg.subject_pattern.clone()),
            target_date: date.as_deref().map(parse_cli_date).transpose()?,
        };

        let text = fetch_with_retry(
            source.as_ref(),
            &criteria,
            cfg.fetch_retries,
            Duration::from_millis(cfg.fetch_backoff_ms),
        )?;

        let Some(text) = text else {
            warning(format!(
                "No chat export found matching '{}'.",
                criteria.subject_pattern
            ));
            return Ok(());
        };

        let patterns = ChatPatterns::compile()?;
        let mut pool = open_pool(cfg)?;
        let report = ingest_text(&mut pool, &text, &patterns, &options)?;

        if !options.dry_run && report.dates_processed > 0 {
            ttlog(
                &pool.conn,
                "ingest_run",
                &options.cutoff.to_string(),
                &format!(
                    "{} date(s): {} inserted, {} updated, {} protected, {} unmatched",
                    report.dates_processed,
                    report.inserted,
                    report.updated,
                    report.protected,
                    report.unmatched_logged
                ),
            )?;
        }

        print_report(&report, options.dry_run, *details);
    }

    Ok(())
}

fn print_report(report: &IngestReport, dry_run: bool, details: bool) {
    header(if dry_run {
        "Ingest report (dry run, nothing written)"
    } else {
        "Ingest report"
    });

    let l = &report.lines;
    info(format!(
        "Lines: {} read, {} events, {} skipped ({} system, {} unparsed, {} bad timestamp)",
        l.total,
        l.events,
        l.skipped(),
        l.system,
        l.no_match,
        l.bad_timestamp
    ));
    info(format!(
        "Dates: {} seen, {} before cutoff, {} processed",
        report.dates_seen, report.dates_skipped, report.dates_processed
    ));
    info(format!(
        "Records: {} inserted, {} updated, {} unchanged, {} protected",
        report.inserted, report.updated, report.unchanged, report.protected
    ));
    info(format!(
        "Unmatched senders: {} new, {} already logged",
        report.unmatched_logged, report.unmatched_known
    ));

    if details && !report.days.is_empty() {
        let mut t = Table::new(&[
            "DATE", "SENDERS", "MATCHED", "INS", "UPD", "SAME", "PROT", "UNMATCHED",
        ]);
        for d in &report.days {
            t.add_row(vec![
                d.date.to_string(),
                d.senders.to_string(),
                d.matched.to_string(),
                d.inserted.to_string(),
                d.updated.to_string(),
                d.unchanged.to_string(),
                d.protected.to_string(),
                d.unmatched_logged.to_string(),
            ]);
        }
        println!("\n{}", t.render());
    }

    if report.writes() == 0 {
        info("Nothing new to write.");
    } else if !dry_run {
        success("Ingestion completed.");
    }
}
