//! Evaluate every applicable matrix operation on a matrix as it is edited.
//!
//! This crate only re-exports the public API of the workspace members;
//! see `matops_linalg` for the operations themselves and `matops_tasks`
//! for the scheduler.

pub use matops_matrix::{Matrix, ShapeError};
pub use matops_linalg as linalg;
pub use matops_linalg::{Dims, OpError, Outcome};
pub use matops_tasks::{catalog, config, scheduler, watch};
pub use matops_tasks::{Arity, Entry, Inputs, Listener, Operation, OperationName};
pub use matops_tasks::{Scheduler, Settings, Snapshot};
pub use matops_config_utils::YamlRead;
