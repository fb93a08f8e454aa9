//! Core logic - framework-agnostic derivations, validation and mutation orchestration.
//!
//! Nothing in here knows about Discord. Every derived view is a pure function of a
//! [`snapshot::Snapshot`] and an explicit `today`, so the bot layer and the tests share
//! the same code paths.

/// Agreement partitioning, ordering and lookup
pub mod agreements;
/// Date arithmetic and display formatting
pub mod dates;
/// Event filters and the month grid
pub mod events;
/// Success and error messages for user actions
pub mod notification;
/// Snapshot ownership and the mutate-then-reload cycle
pub mod orchestrator;
/// Text rendering of dashboard, lists and calendar
pub mod report;
/// Immutable agreements/events pair
pub mod snapshot;
/// Dashboard statistics
pub mod stats;
/// Edit-form and upload validation
pub mod validation;
