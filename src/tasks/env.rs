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

use crate::FailResult;
use std::env;

fn var(key: &str) -> FailResult<Option<String>>
{ match env::var(key) {
    Ok(s) => Ok(Some(s)),
    Err(env::VarError::NotPresent) => Ok(None),
    Err(env::VarError::NotUnicode(s)) => bail!("env var not unicode: {}={:?}", key, s),
}}

fn nonempty_var(key: &str) -> FailResult<Option<String>>
{ match var(key) {
    Ok(Some(ref s)) if s == "" => Ok(None),
    r => r,
}}

/// Show module names in log output.
pub fn log_mod() -> FailResult<bool>
{Ok({
    match nonempty_var("MATOPS_LOG_MOD")?.as_ref().map(|s| &s[..]) {
        None | Some("0") => false,
        Some("1") => true,
        Some(s) => bail!("Invalid setting for MATOPS_LOG_MOD: {:?}", s),
    }
})}
