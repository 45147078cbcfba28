//! Review watcher: polls the review-status API and forwards the newest verdict
//! to a chat.
//!
//! [`fetcher`] talks to the review API, [`translator`] renders verdicts and
//! [`poller`] drives the fetch → translate → notify → advance cycle.

pub mod fetcher;
pub mod logging;
pub mod poller;
pub mod translator;
