//! Issue staleness classification
//!
//! This crate turns the timeline of a GitHub issue into a staleness verdict
//! and the label/comment actions that follow from it. Everything here is
//! pure: no I/O, no clock reads, no async.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────┐
//! │ Vec<TimelineEvent>   │   │ Cutoffs  │
//! └──────────┬───────────┘   └────┬─────┘
//!            └────────┬───────────┘
//!                     ▼
//!              classify()  ──►  Classification
//!                                     │
//!                                     ▼
//!                               resolve()  ──►  ActionPlan
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use gh_stale_classifier::{classify, resolve, ClassifierInput, CutoffWindow};
//! use std::collections::HashSet;
//!
//! # fn example() -> Result<(), gh_stale_classifier::CutoffError> {
//! let cutoffs = CutoffWindow::default().resolve(Utc::now())?;
//! let assignees: HashSet<String> = ["octocat".to_string()].into();
//! let bots: HashSet<String> = HashSet::new();
//! let input = ClassifierInput {
//!     item_number: 42,
//!     authorized_actors: &assignees,
//!     bot_actors: &bots,
//!     minimization_marker: "<!-- keep -->",
//! };
//!
//! let classification = classify(&[], &input, &cutoffs);
//! let plan = resolve(&classification);
//! assert!(plan.post_comment);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod cutoffs;
pub mod link;
pub mod resolver;
pub mod types;

pub use classifier::{classify, ClassifierInput};
pub use cutoffs::{CutoffError, CutoffWindow, Cutoffs, MAX_CUTOFF_DAYS};
pub use link::find_closing_reference;
pub use resolver::{resolve, ActionPlan};
pub use types::{
    Classification, CommentId, CrossReference, EventKind, LabelClass, SourceState, TimelineEvent,
};
