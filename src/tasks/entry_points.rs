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

//! Functions that back the binaries in `src/binary-shims`.

use crate::FailResult;
use crate::config::Settings;
use crate::ui::logging::GlobalLogger;
use crate::watch::{self, OutputFormat};

use matops_config_utils::YamlRead;

use clap::{App, Arg};
use std::ffi::OsStr;
use std::io;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        } else {
            error!("(for a backtrace, try again with RUST_BACKTRACE=1)");
        }
        std::process::exit(1);
    });
}

// %% CRATES: binary: matops-watch %%
pub fn watch() {
    wrap_result_main(|| {
        let matches = {
            App::new("matops-watch")
                .about("\
                    Reads matrix edits from stdin, one JSON value per line, \
                    and prints the results of every applicable operation \
                    once the edits settle.\
                ")
                .args(&[
                    Arg::with_name("config")
                        .short("c").long("config").value_name("CONFIG").takes_value(true)
                        .help("settings yaml (debounce-ms, threads, scalar)"),
                    Arg::with_name("log")
                        .long("log").value_name("LOGFILE").takes_value(true)
                        .help("also write log output to this file"),
                    Arg::with_name("verbose")
                        .short("v").long("verbose").multiple(true)
                        .help("log more; -vv also shows debug output from other crates"),
                    Arg::with_name("json")
                        .long("json")
                        .help("print each batch as a single line of JSON"),
                ])
                .get_matches()
        };

        let mut logger = GlobalLogger::default();
        logger.verbosity(matches.occurrences_of("verbose") as i32);
        if let Some(path) = matches.value_of_os("log") {
            logger.path(path);
        }
        logger.apply()?;

        let settings = match matches.value_of_os("config") {
            Some(path) => Settings::from_path(path)?,
            None => Settings::default(),
        };
        debug!("settings: {:?}", settings);

        let format = match matches.is_present("json") {
            true => OutputFormat::Json,
            false => OutputFormat::Text,
        };

        let stdin = io::stdin();
        watch::run(&settings, format, stdin.lock(), io::stdout())
    });
}
