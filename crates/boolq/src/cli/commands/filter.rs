//! Implementation of `boolq filter`.

use std::{
    borrow::Cow,
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, ErrorKind, Write},
    path::Path,
    process::ExitCode,
};

use boolq_config::Config;
use boolq_query::Matcher;
use log::{debug, warn};
use serde::Serialize;

use super::shared::{QuerySettings, prepare_matcher};
use crate::cli::{args::FilterCommand, context::CommandContext, output::print_json};

/// Filters input lines by a query.
///
/// Succeeds when at least one line was selected, like grep.
pub fn run(ctx: &CommandContext, cmd: &FilterCommand) -> ExitCode {
    let settings = QuerySettings::resolve(&ctx.config, &cmd.query_args);
    let matcher = match prepare_matcher(&cmd.query, settings) {
        Ok(matcher) => matcher,
        Err(code) => return code,
    };

    let inputs: Vec<Input<'_>> = if cmd.files.is_empty() {
        vec![Input::Stdin]
    } else {
        cmd.files.iter().map(|path| Input::File(path.as_path())).collect()
    };

    let stdout = io::stdout();
    let mut filter = FilterRun {
        matcher: &matcher,
        selection: LineSelection::resolve(&ctx.config, cmd),
        out: BufWriter::new(stdout.lock()),
        json_lines: cmd.json.then(Vec::new),
        count_only: cmd.count,
        label_lines: inputs.len() > 1,
    };

    let mut total = 0;
    for input in &inputs {
        match filter.process(input) {
            Ok(count) => total += count,
            Err(code) => return code,
        }
    }

    if let Err(e) = filter.out.flush() {
        return write_failure(&e);
    }

    if let Some(lines) = filter.json_lines {
        let output = JsonFilterOutput {
            query: cmd.query.clone(),
            mode: if matcher.is_boolean() {
                "boolean"
            } else {
                "plain"
            },
            count: total,
            lines: (!cmd.count).then_some(lines),
        };
        if let Err(code) = print_json(&output) {
            return code;
        }
    }

    if total > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Which part of each line is matched, and whether matches are kept or dropped.
#[derive(Debug)]
struct LineSelection {
    /// Field separator.
    delimiter: String,
    /// 1-based fields to match against; empty means the whole line.
    fields: Vec<usize>,
    /// Select lines that do not match.
    invert: bool,
}

impl LineSelection {
    /// Resolves selection settings, with flags taking precedence over config values.
    fn resolve(config: &Config, cmd: &FilterCommand) -> Self {
        let fields = if cmd.fields.is_empty() {
            config.filter.fields.clone()
        } else {
            cmd.fields.clone()
        };

        Self {
            delimiter: cmd
                .delimiter
                .clone()
                .unwrap_or_else(|| config.filter.delimiter.clone()),
            fields,
            invert: cmd.invert || config.filter.invert,
        }
    }

    /// Returns the text a line is matched against.
    ///
    /// Selected fields are joined with a single space. Field numbers past the end
    /// of the line select nothing; an empty delimiter selects the whole line.
    fn searchable_text<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.fields.is_empty() || self.delimiter.is_empty() {
            return Cow::Borrowed(line);
        }

        let parts: Vec<&str> = line.split(self.delimiter.as_str()).collect();
        let selected: Vec<&str> = self
            .fields
            .iter()
            .filter_map(|&n| n.checked_sub(1).and_then(|i| parts.get(i).copied()))
            .collect();
        Cow::Owned(selected.join(" "))
    }

    /// Returns true if `line` should be output.
    fn selects(&self, matcher: &Matcher, line: &str) -> bool {
        matcher.matches(&self.searchable_text(line)) != self.invert
    }
}

/// A source of input lines.
enum Input<'a> {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(&'a Path),
}

impl<'a> Input<'a> {
    /// Opens the input for line reading.
    fn open(&self) -> io::Result<Box<dyn BufRead + 'a>> {
        match self {
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
            Self::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        }
    }
}

impl fmt::Display for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "(standard input)"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// State for one `filter` invocation.
struct FilterRun<'m, W: Write> {
    /// Prepared query.
    matcher: &'m Matcher,
    /// Line selection settings.
    selection: LineSelection,
    /// Destination for plain output.
    out: W,
    /// Selected lines, collected when JSON output is requested.
    json_lines: Option<Vec<JsonLine>>,
    /// Print counts instead of lines.
    count_only: bool,
    /// Prefix output with the input name.
    label_lines: bool,
}

impl<W: Write> FilterRun<'_, W> {
    /// Filters one input and returns the number of selected lines.
    fn process(&mut self, input: &Input<'_>) -> Result<usize, ExitCode> {
        let mut reader = input.open().map_err(|e| {
            eprintln!("error: failed to open {input}: {e}");
            ExitCode::FAILURE
        })?;

        let mut count = 0;
        let mut line_number = 0;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(|e| {
                eprintln!("error: failed to read {input}: {e}");
                ExitCode::FAILURE
            })?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let line = decode_line(&buf);
            if matches!(line, Cow::Owned(_)) {
                warn!("{input}:{line_number}: invalid UTF-8 replaced");
            }
            if !self.selection.selects(self.matcher, &line) {
                continue;
            }
            count += 1;
            self.emit(input, line_number, line.into_owned())
                .map_err(|e| write_failure(&e))?;
        }

        debug!("{input}: {count} line(s) selected");

        if self.count_only && self.json_lines.is_none() {
            let written = if self.label_lines {
                writeln!(self.out, "{input}:{count}")
            } else {
                writeln!(self.out, "{count}")
            };
            written.map_err(|e| write_failure(&e))?;
        }

        Ok(count)
    }

    /// Records or prints one selected line.
    fn emit(&mut self, input: &Input<'_>, line_number: usize, line: String) -> io::Result<()> {
        if self.count_only {
            return Ok(());
        }

        if let Some(lines) = &mut self.json_lines {
            lines.push(JsonLine {
                source: input.to_string(),
                line_number,
                line,
            });
            return Ok(());
        }

        if self.label_lines {
            writeln!(self.out, "{input}:{line}")
        } else {
            writeln!(self.out, "{line}")
        }
    }
}

/// Decodes one raw line without its line ending.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than ending the input, so a
/// single stray Latin-1 byte does not hide the rest of the file.
fn decode_line(buf: &[u8]) -> Cow<'_, str> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

/// Maps an output error to an exit code; a closed pipe ends output quietly.
fn write_failure(e: &io::Error) -> ExitCode {
    if e.kind() == ErrorKind::BrokenPipe {
        return ExitCode::SUCCESS;
    }
    eprintln!("error: failed to write output: {e}");
    ExitCode::FAILURE
}

/// JSON record for one selected line.
#[derive(Debug, Serialize)]
struct JsonLine {
    /// Input the line came from.
    source: String,
    /// 1-based line number within the input.
    line_number: usize,
    /// Line text without the trailing newline.
    line: String,
}

/// JSON output for `boolq filter --json`.
#[derive(Serialize)]
struct JsonFilterOutput {
    /// The query as given.
    query: String,
    /// How the query was interpreted.
    mode: &'static str,
    /// Number of selected lines across all inputs.
    count: usize,
    /// The selected lines, omitted with `--count`.
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<Vec<JsonLine>>,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use boolq_query::MatchMode;

    use super::*;

    fn selection(fields: Vec<usize>, delimiter: &str, invert: bool) -> LineSelection {
        LineSelection {
            delimiter: delimiter.to_string(),
            fields,
            invert,
        }
    }

    #[test]
    fn whole_line_without_fields() {
        let sel = selection(vec![], "\t", false);
        assert_eq!(sel.searchable_text("a\tb"), "a\tb");
    }

    #[test]
    fn selected_fields_join_with_space() {
        let sel = selection(vec![3, 1], ",", false);
        assert_eq!(sel.searchable_text("shell,uk,energy"), "energy shell");
    }

    #[test]
    fn missing_and_zero_fields_select_nothing() {
        let sel = selection(vec![0, 2, 9], ",", false);
        assert_eq!(sel.searchable_text("shell,uk"), "uk");
    }

    #[test]
    fn empty_delimiter_uses_whole_line() {
        let sel = selection(vec![2], "", false);
        assert_eq!(sel.searchable_text("shell,uk"), "shell,uk");
    }

    #[test]
    fn field_selection_limits_matching() {
        let matcher = Matcher::new("uk", MatchMode::Boolean);
        let sel = selection(vec![1], "\t", false);
        assert!(!sel.selects(&matcher, "Shell plc\tuk"));
        assert!(sel.selects(&matcher, "Palantir UK\tus"));
    }

    #[test]
    fn invert_flips_selection() {
        let matcher = Matcher::new("shell", MatchMode::Auto);
        let sel = selection(vec![], "\t", true);
        assert!(!sel.selects(&matcher, "Shell plc"));
        assert!(sel.selects(&matcher, "BP plc"));
    }

    #[test]
    fn count_only_writes_totals() {
        let matcher = Matcher::new("plc", MatchMode::Auto);
        let mut run = FilterRun {
            matcher: &matcher,
            selection: selection(vec![], "\t", false),
            out: Vec::new(),
            json_lines: None,
            count_only: true,
            label_lines: false,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orgs.txt");
        fs::write(&path, "Shell plc\nExxon\nBP plc\n").unwrap();

        assert_eq!(run.process(&Input::File(&path)).ok(), Some(2));
        assert_eq!(String::from_utf8(run.out).unwrap(), "2\n");
    }

    #[test]
    fn decode_line_strips_line_endings() {
        assert_eq!(decode_line(b"Shell plc\r\n"), "Shell plc");
        assert_eq!(decode_line(b"BP plc\n"), "BP plc");
        assert_eq!(decode_line(b"last"), "last");
        assert_eq!(decode_line(b"caf\xe9"), "caf\u{fffd}");
    }

    #[test]
    fn invalid_utf8_line_is_matched_lossily() {
        let matcher = Matcher::new("shell", MatchMode::Auto);
        let mut run = FilterRun {
            matcher: &matcher,
            selection: selection(vec![], "\t", false),
            out: Vec::new(),
            json_lines: Some(Vec::new()),
            count_only: false,
            label_lines: false,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"Soci\xe9t\xe9 Shell\nBP plc\nShell plc").unwrap();

        assert_eq!(run.process(&Input::File(&path)).ok(), Some(2));
        let lines = run.json_lines.unwrap();
        assert_eq!(lines[0].line, "Soci\u{fffd}t\u{fffd} Shell");
        assert_eq!(lines[0].line_number, 1);
        assert_eq!(lines[1].line, "Shell plc");
        assert_eq!(lines[1].line_number, 3);
    }

    #[test]
    fn labels_lines_from_multiple_inputs() {
        let matcher = Matcher::new("shell", MatchMode::Auto);
        let mut run = FilterRun {
            matcher: &matcher,
            selection: selection(vec![], "\t", false),
            out: Vec::new(),
            json_lines: None,
            count_only: false,
            label_lines: true,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "BP plc\nShell plc\n").unwrap();

        assert_eq!(run.process(&Input::File(&path)).ok(), Some(1));
        let output = String::from_utf8(run.out).unwrap();
        assert_eq!(output, format!("{}:Shell plc\n", path.display()));
    }
}
