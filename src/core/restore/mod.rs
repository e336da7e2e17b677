//! User pool restore
//!
//! - [`RestoreJob`] - a backup file loaded in full
//! - [`Restorer`] - bounded-concurrency replay behind a shared [`Throttle`]
//! - [`RestoreTarget`] - user and group create calls for one pool
//! - [`RestoreReport`] - one outcome per input record

pub mod coordinator;
pub mod job;
pub mod report;
pub mod restorer;
pub mod targets;
pub mod throttle;
pub mod transform;

pub use coordinator::RestoreCoordinator;
pub use job::RestoreJob;
pub use report::{GroupAddError, RecordOutcome, RestoreReport};
pub use restorer::{
    RestoreOptions, Restorer, DEFAULT_GROUP_CONCURRENCY, DEFAULT_RESTORE_CONCURRENCY,
};
pub use targets::{GroupRestoreTarget, RestoreTarget, UserRestoreTarget};
pub use throttle::{IntervalThrottle, NoThrottle, Throttle};
pub use transform::prepare_for_restore;
