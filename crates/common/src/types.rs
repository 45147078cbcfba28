use serde::Deserialize;

/// Lower bound (unix seconds) of the next poll window.
pub type Cursor = i64;

/// One reviewed submission as reported by the review-status API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "homework_name")]
    pub name: String,
    pub status: String,
    /// Opaque date token, forwarded verbatim into the notification.
    #[serde(rename = "date_updated")]
    pub reviewed_at: String,
}

/// Successful poll payload.
///
/// Both fields are optional on the wire: a missing `homeworks` list means
/// nothing was reviewed in the window, and a missing `current_date` leaves
/// the cursor where it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub homeworks: Option<Vec<SubmissionRecord>>,
    #[serde(default)]
    pub current_date: Option<Cursor>,
}

impl PollResponse {
    /// Records in the window, newest first.
    pub fn homeworks(&self) -> &[SubmissionRecord] {
        self.homeworks.as_deref().unwrap_or_default()
    }

    /// The most recently reviewed submission, if any.
    pub fn latest(&self) -> Option<&SubmissionRecord> {
        self.homeworks().first()
    }
}
