#![allow(non_snake_case)]

use failure::Error;

use std::io::Read;
use std::path::Path;

/// Deserialize a config type from YAML, warning on keys that were not used.
///
/// A typo in a config file otherwise silently falls back to a default, which
/// is a miserable thing to debug. Implement this with `derive_yaml_read!`.
pub trait YamlRead: for<'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, Error>
    { Self::from_dyn_reader(&mut r) }

    fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| failure::format_err!("could not open {}: {}", path.display(), e))?;
        Self::from_reader(file)
    }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, Error> {
        let mut s = String::new();
        r.read_to_string(&mut s)?;
        Self::from_str(&s)
    }

    fn from_str(s: &str) -> Result<Self, Error> {
        // An empty document means "all defaults".
        let value = match s.trim() {
            "" => serde_yaml::Value::Mapping(Default::default()),
            _ => serde_yaml::from_str(s)?,
        };

        match Self::__serde_ignored__from_value(value) {
            Ok(out) => Ok(out),
            // errors from a Value lose their line numbers, so reparse the text for a better one
            Err(e) => Err(Self::__serde_yaml__from_str(s).err().unwrap_or(e)),
        }
    }

    #[doc(hidden)]
    fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<Self, Error>;
    #[doc(hidden)]
    fn __serde_yaml__from_str(s: &str) -> Result<Self, Error>;
}

#[macro_export]
macro_rules! derive_yaml_read {
    ($Type:ty) => {
        const _: () = {
            use std::result::Result;
            use $crate::reexports::{failure::Error, log, serde_ignored, serde_yaml};

            impl $crate::YamlRead for $Type {
                fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<$Type, Error> {
                    serde_ignored::deserialize(
                        value,
                        |path| log::warn!("Unused config item (possible typo?): {}", path),
                    ).map_err(Into::into)
                }

                fn __serde_yaml__from_str(s: &str) -> Result<$Type, Error> {
                    serde_yaml::from_str(s).map_err(Into::into)
                }
            }
        };
    };
}
