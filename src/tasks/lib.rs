/* ********************************************************************** **
**  This file is part of matops.                                          **
**                                                                        **
**  matops is free software: you can redistribute it and/or modify it     **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
** ********************************************************************** */

//! Scheduling and I/O around the linear algebra kernel.
//!
//! An editor calls [`Scheduler::edit`] on every keystroke; once edits pause for
//! the debounce window, every operation in the [`catalog`] that applies to the
//! matrix is evaluated on a thread pool, and the results can be read back as a
//! [`Snapshot`].

#[macro_use] extern crate log;
#[macro_use] extern crate failure;

pub type FailResult<T> = Result<T, failure::Error>;

pub mod catalog;
pub mod config;
pub mod scheduler;
pub mod watch;
pub mod entry_points;
pub mod ui;

mod debounce;
mod env;
mod util;

pub use crate::catalog::{Arity, Inputs, Operation, OperationName};
pub use crate::config::Settings;
pub use crate::scheduler::{Entry, Listener, Scheduler, Snapshot};
