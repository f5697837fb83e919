/* ************************************************************************ **
** This file is part of matops, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

pub use self::yaml_read::YamlRead;
#[macro_use]
mod yaml_read;

#[doc(hidden)] // used by macro
pub mod reexports {
    pub use failure;
    pub use log;
    pub use serde_ignored;
    pub use serde_yaml;
}

pub type FailResult<T> = Result<T, failure::Error>;
