//! Review status → notification text.

use review_common::error::WatchError;
use review_common::types::SubmissionRecord;

/// Verdict sentence for every review status the service can report.
pub const VERDICTS: &[(&str, &str)] = &[
    (
        "approved",
        "The reviewer liked everything, you can move on to the next lesson.",
    ),
    (
        "rejected",
        "Unfortunately, the reviewer found mistakes in your work.",
    ),
];

/// Look up the verdict sentence for a status.
pub fn verdict_for(status: &str) -> Option<&'static str> {
    VERDICTS
        .iter()
        .find(|(known, _)| *known == status)
        .map(|(_, verdict)| *verdict)
}

/// Render the notification for a reviewed submission.
///
/// Fails with [`WatchError::UnknownStatus`] when the status has no verdict.
pub fn translate_status(record: &SubmissionRecord) -> Result<String, WatchError> {
    let verdict = verdict_for(&record.status).ok_or_else(|| WatchError::UnknownStatus {
        status: record.status.clone(),
    })?;

    Ok(format!(
        "Your submission \"{}\" was reviewed on {}!\n\n{}",
        record.name, record.reviewed_at, verdict
    ))
}
