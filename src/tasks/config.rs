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
#![allow(non_snake_case)]

use crate::catalog::DEFAULT_SCALAR;
use matops_config_utils::derive_yaml_read;
use serde::{Deserialize, Serialize};

use std::time::Duration;

/// Settings for the evaluation scheduler, read from YAML.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Quiet period after the last edit before anything is evaluated.
    #[serde(default = "_settings__debounce_ms")]
    pub debounce_ms: u64,

    /// Size of the evaluation thread pool. `None` lets rayon decide.
    #[serde(default)]
    pub threads: Option<usize>,

    /// Operand for scalar multiplication when an edit doesn't give one.
    #[serde(default = "_settings__scalar")]
    pub scalar: f64,
}
fn _settings__debounce_ms() -> u64 { 500 }
fn _settings__scalar() -> f64 { DEFAULT_SCALAR }

derive_yaml_read!{Settings}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            debounce_ms: _settings__debounce_ms(),
            threads: None,
            scalar: _settings__scalar(),
        }
    }
}

impl Settings {
    pub fn debounce_window(&self) -> Duration { Duration::from_millis(self.debounce_ms) }
}
