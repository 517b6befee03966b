use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    info,
    resolver::ResolveOutcome,
    success,
    types::{BatchReport, ReconcileReport},
    utils, warning,
};

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub fn progress_bar(len: usize, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░ "),
    );
    pb
}

pub fn print_resolve_outcome(outcome: &ResolveOutcome) {
    let summary = &outcome.summary;
    success!("{} Songs fetched", summary.total());
    info!(
        "{} matched directly, {} matched without parenthesized annotations",
        summary.literal, summary.fallback
    );

    let rows = utils::unresolved_rows(&outcome.tracks, &outcome.resolutions);
    if rows.is_empty() {
        return;
    }

    warning!(
        "{} Songs could not be resolved and will be left out ({} without match, {} failed searches)",
        rows.len(),
        summary.unmatched,
        summary.failed
    );
    println!("{}", Table::new(rows));
}

pub fn print_reconcile_report(report: &ReconcileReport) {
    info!("{} Songs found on destination playlist", report.fetched);
    success!("{} Songs deleted from Playlist", report.removed.succeeded);
    print_batch_failures("Delete", &report.removed);

    match &report.added {
        Some(added) => {
            success!("{} Songs added to Playlist", added.succeeded);
            print_batch_failures("Insert", added);
        }
        None => warning!(
            "Songs were not added because some deletions failed. Run `playport reconcile` to retry from the saved snapshot."
        ),
    }
}

fn print_batch_failures(label: &str, report: &BatchReport) {
    for failure in &report.failures {
        warning!(
            "{} batch {}/{} ({} songs) failed: {}",
            label,
            failure.index + 1,
            report.batches,
            failure.size,
            failure.reason
        );
    }
}
