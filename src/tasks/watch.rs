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

//! Line-oriented driver: one JSON edit per line in, settled results out.

use crate::FailResult;
use crate::catalog::Inputs;
use crate::config::Settings;
use crate::scheduler::{Entry, Scheduler, Snapshot};
use crate::util::lock;

use matops_linalg::{Matrix, Outcome};
use serde::Deserialize;

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How long to wait for the final batch once input ends.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat { Text, Json }

/// The object form of an edit.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FullEdit {
    matrix: Matrix,
    #[serde(default)]
    rhs: Option<Matrix>,
    #[serde(default)]
    scalar: Option<f64>,
}

/// Parse one edit, either `[[1, 2], [3, 4]]` or `{"matrix": ..., "rhs": ..., "scalar": ...}`.
pub fn parse_edit(line: &str, default_scalar: f64) -> FailResult<Inputs> {
    // dispatched on the JSON type by hand; serde's derived struct impls
    // would also accept the object form written as a sequence
    let value: serde_json::Value = serde_json::from_str(line)?;
    Ok(match value {
        serde_json::Value::Array(_) => {
            let matrix: Matrix = serde_json::from_value(value)?;
            Inputs::new(matrix).with_scalar(default_scalar)
        },
        serde_json::Value::Object(_) => {
            let FullEdit { matrix, rhs, scalar } = serde_json::from_value(value)?;
            Inputs { matrix, rhs, scalar: scalar.unwrap_or(default_scalar) }
        },
        other => bail!("expected a matrix or an object, got {}", other),
    })
}

/// Feed every line of `input` to a scheduler, writing each completed batch to `output`.
///
/// Malformed lines are logged and skipped. Returns once input is exhausted
/// and the last edit has been fully evaluated.
pub fn run<R, W>(settings: &Settings, format: OutputFormat, input: R, output: W) -> FailResult<()>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let output = Arc::new(Mutex::new(output));
    let scheduler = Scheduler::with_listener(settings, {
        let output = Arc::clone(&output);
        move |snapshot| {
            let mut output = lock(&output);
            if let Err(e) = write_snapshot(&mut *output, snapshot, format) {
                error!("could not write results: {}", e);
            }
        }
    })?;

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_edit(&line, settings.scalar) {
            Ok(inputs) => scheduler.edit(inputs),
            Err(e) => warn!("line {}: ignoring malformed edit: {}", i + 1, e),
        }
    }

    info!("end of input; waiting for evaluation to finish");
    match scheduler.wait_until_settled(DRAIN_TIMEOUT) {
        Some(snapshot) => debug!("finished at batch {}", snapshot.generation),
        None => bail!("evaluation did not finish within {:?}", DRAIN_TIMEOUT),
    }
    drop(scheduler);
    lock(&output).flush()?;
    Ok(())
}

pub fn write_snapshot<W: Write + ?Sized>(w: &mut W, snapshot: &Snapshot, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *w, snapshot)?;
            writeln!(w)
        },
        OutputFormat::Text => {
            let dims = snapshot.inputs.as_ref().map(|inputs| inputs.matrix.dims());
            match dims {
                Some((rows, cols)) => writeln!(w, "== batch {} ({}x{}) ==", snapshot.generation, rows, cols)?,
                None => writeln!(w, "== batch {} ==", snapshot.generation)?,
            }
            for (name, entry) in &snapshot.entries {
                match entry {
                    Entry::Pending => writeln!(w, "{}: pending", name)?,
                    Entry::Done(Outcome::Matrix(m)) => {
                        writeln!(w, "{}:", name)?;
                        for line in m.to_string().lines() {
                            writeln!(w, "    {}", line)?;
                        }
                    },
                    Entry::Done(outcome) => writeln!(w, "{}: {}", name, outcome)?,
                }
            }
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OperationName;

    fn mat(rows: Vec<Vec<f64>>) -> Matrix { Matrix::from_rows(rows).unwrap() }

    #[test]
    fn parse_forms() {
        let bare = parse_edit("[[1, 2], [3, 4]]", 2.0).unwrap();
        assert_eq!(bare, Inputs::new(mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]])));

        let full = parse_edit(r#"{"matrix": [[1]], "rhs": [[2]], "scalar": 0.5}"#, 2.0).unwrap();
        assert_eq!(full, Inputs::new(mat(vec![vec![1.0]])).with_rhs(mat(vec![vec![2.0]])).with_scalar(0.5));

        let defaulted = parse_edit(r#"{"matrix": [[1]]}"#, 3.0).unwrap();
        assert_eq!(defaulted.scalar, 3.0);
        assert_eq!(defaulted.rhs, None);
    }

    #[test]
    fn parse_rejects_ragged() {
        assert!(parse_edit("[[1, 2], [3]]", 2.0).is_err());
        assert!(parse_edit("[]", 2.0).is_err());
        assert!(parse_edit("not json", 2.0).is_err());
    }

    #[test]
    fn parse_rejects_other_shapes() {
        // one level too deep; must not be read as the object form
        assert!(parse_edit("[[[1]]]", 2.0).is_err());
        assert!(parse_edit("[[[1]], [[2]], 3.0]", 2.0).is_err());
        assert!(parse_edit(r#"{"matrix": [[1]], "rsh": [[2]]}"#, 2.0).is_err());
        assert!(parse_edit(r#"{"rhs": [[2]]}"#, 2.0).is_err());
        assert!(parse_edit("3.0", 2.0).is_err());
    }

    #[test]
    fn text_output() {
        let mut entries = std::collections::BTreeMap::new();
        entries.insert(OperationName::Trace, Entry::Done(Outcome::Scalar(5.0)));
        entries.insert(OperationName::Transpose, Entry::Done(Outcome::Matrix(mat(vec![vec![1.0, 3.0], vec![2.0, 4.0]]))));
        entries.insert(OperationName::Rank, Entry::Pending);
        let snapshot = Snapshot {
            generation: 3,
            inputs: Some(Arc::new(Inputs::new(mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]])))),
            entries,
        };

        let mut out = vec![];
        write_snapshot(&mut out, &snapshot, OutputFormat::Text).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\
            == batch 3 (2x2) ==\n\
            transpose:\n    [1, 3]\n    [2, 4]\n\
            trace: 5\n\
            rank: pending\n\
        ");
    }

    #[test]
    fn run_reports_last_edit() {
        #[derive(Clone, Default)]
        struct Shared(Arc<Mutex<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.0.lock().unwrap().write(buf) }
            fn flush(&mut self) -> io::Result<()> { Ok(()) }
        }

        let settings = Settings { debounce_ms: 300, threads: Some(2), ..Settings::default() };
        let input = "[[1]]\n\nnonsense\n[[2, 0], [0, 2]]\n";
        let sink = Shared::default();
        run(&settings, OutputFormat::Json, input.as_bytes(), sink.clone()).unwrap();

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 1, "{}", text);
        let json: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(json["generation"], 1);
        assert_eq!(json["entries"]["determinant"]["outcome"]["value"], 4.0);
        assert_eq!(json["entries"]["eigenvalues"]["status"], "done");
    }
}
