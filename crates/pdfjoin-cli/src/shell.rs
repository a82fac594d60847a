//! Interactive session over stdin.
//!
//! One command per line. Positions are 1-based, as shown by `ls`. The shell
//! only parses lines and forwards them to a [`Session`]; every rule about
//! ordering, indices and merging lives in the library.

use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};

use pdfjoin::config::{Config, OverwriteMode, parse_position};
use pdfjoin::error::{PdfJoinError, Result};
use pdfjoin::io::ArtifactWriter;
use pdfjoin::output::{
    OutputFormatter, display_ingest_statistics, display_listing, display_merge_result,
    display_summaries,
};
use pdfjoin::utils::collect_paths_for_patterns;
use pdfjoin::{Merger, Session};

use crate::cli::ShellArgs;

const HELP: &str = "\
Commands:
  add <FILE|GLOB>...   append documents
  rm <POS>...          remove documents (positions as listed, applied in order)
  mv <FROM> <TO>       move a document
  ls [--json]          list documents in merge order
  clear                remove every document
  check                read every document without merging
  merge <OUT> [-f]     merge into OUT (-f overwrites an existing file)
  help                 show this help
  quit                 leave the session";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Append files matching the patterns.
    Add(Vec<String>),
    /// Remove zero-based positions, in order.
    Remove(Vec<usize>),
    /// Move zero-based `from` to `to`.
    Move(usize, usize),
    /// List, optionally as JSON.
    List { json: bool },
    /// Empty the session.
    Clear,
    /// Dry run over the current order.
    Check,
    /// Merge and write to a file.
    Merge { output: PathBuf, force: bool },
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns [`PdfJoinError::InvalidCommand`] for unknown commands, wrong
/// argument counts and malformed positions.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let words = split_words(line).map_err(|reason| PdfJoinError::invalid_command(line, reason))?;
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };
    if name.starts_with('#') {
        return Ok(None);
    }

    let invalid = |reason: &str| PdfJoinError::invalid_command(line, reason);
    let position = |arg: &String| {
        parse_position(arg).map_err(|e| PdfJoinError::invalid_command(line, e.to_string()))
    };

    let command = match (name.as_str(), args) {
        ("add", []) => return Err(invalid("add needs at least one file")),
        ("add", files) => ShellCommand::Add(files.to_vec()),
        ("rm", []) => return Err(invalid("rm needs at least one position")),
        ("rm", positions) => {
            ShellCommand::Remove(positions.iter().map(position).collect::<Result<_>>()?)
        }
        ("mv", [from, to]) => ShellCommand::Move(position(from)?, position(to)?),
        ("mv", _) => return Err(invalid("usage: mv <FROM> <TO>")),
        ("ls", []) => ShellCommand::List { json: false },
        ("ls", [flag]) if flag == "--json" => ShellCommand::List { json: true },
        ("clear", []) => ShellCommand::Clear,
        ("check", []) => ShellCommand::Check,
        ("merge", [output]) => ShellCommand::Merge {
            output: PathBuf::from(output),
            force: false,
        },
        ("merge", [output, flag]) | ("merge", [flag, output]) if flag == "-f" || flag == "--force" => {
            ShellCommand::Merge {
                output: PathBuf::from(output),
                force: true,
            }
        }
        ("help", []) => ShellCommand::Help,
        ("quit" | "exit", []) => ShellCommand::Quit,
        ("ls" | "clear" | "check" | "merge" | "help" | "quit" | "exit", _) => {
            return Err(invalid("unexpected arguments"));
        }
        _ => return Err(invalid("unknown command, type `help`")),
    };

    Ok(Some(command))
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> std::result::Result<Vec<String>, &'static str> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err("unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// A session plus the front-end settings it was started with.
pub struct Shell {
    session: Session,
    formatter: OutputFormatter,
    jobs: usize,
}

impl Shell {
    /// Create a shell whose merges use `config`'s options.
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::with_merger(Merger::with_options(config.merge_options())),
            formatter: OutputFormatter::from_config(config),
            jobs: config.effective_jobs(),
        }
    }

    /// Read and execute lines until `quit` or end of input.
    ///
    /// Command errors are reported and the loop continues.
    ///
    /// # Errors
    ///
    /// Only fails if reading input fails.
    pub async fn run<R>(&self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();

        loop {
            self.prompt().await;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let outcome = match parse_line(&line) {
                Ok(Some(command)) => self.execute(command).await,
                Ok(None) => Ok(Flow::Continue),
                Err(err) => Err(err),
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) => self.formatter.error(&err.to_string()),
            }
        }

        Ok(())
    }

    async fn prompt(&self) {
        if self.formatter.should_print() {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(b"pdfjoin> ").await.ok();
            stdout.flush().await.ok();
        }
    }

    /// Run one command against the session.
    ///
    /// # Errors
    ///
    /// Returns whatever the session or the file system reports.
    pub async fn execute(&self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Add(patterns) => {
                let paths = collect_paths_for_patterns(&patterns)?;
                let report = self.session.add_sources(&paths, self.jobs, false).await?;
                display_ingest_statistics(&self.formatter, &report.statistics);
            }
            ShellCommand::Remove(positions) => {
                self.session.apply_edits(&positions, &[])?;
            }
            ShellCommand::Move(from, to) => self.session.move_to(from, to)?,
            ShellCommand::List { json: true } => {
                let listing = self.session.listing();
                let json = serde_json::to_string_pretty(&listing)
                    .map_err(|e| PdfJoinError::other(format!("Failed to encode listing: {e}")))?;
                println!("{json}");
            }
            ShellCommand::List { json: false } => {
                display_listing(&self.formatter, &self.session.listing());
            }
            ShellCommand::Clear => self.session.clear(),
            ShellCommand::Check => {
                let summaries = self.session.inspect().await?;
                display_summaries(&self.formatter, &summaries);
            }
            ShellCommand::Merge { output, force } => {
                let mode = if force {
                    OverwriteMode::Force
                } else {
                    OverwriteMode::NoClobber
                };
                let writer = ArtifactWriter::new(mode);
                // Refuse before doing the work
                if !force && writer.exists(&output).await {
                    return Err(PdfJoinError::output_exists(output));
                }

                let merged = self.session.merge().await?;
                let write = writer.write(merged.bytes, &output).await?;
                display_merge_result(&self.formatter, &merged.statistics, Some(&write));
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// The session this shell drives.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

/// Run `pdfjoin shell` on stdin.
pub async fn run(args: ShellArgs) -> Result<()> {
    let config = args.to_config()?;
    let shell = Shell::new(&config);

    shell.formatter.info(&format!(
        "{} v{}. Type `help` for commands.",
        pdfjoin::NAME,
        pdfjoin::VERSION
    ));

    shell.run(BufReader::new(tokio::io::stdin())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("ls", ShellCommand::List { json: false })]
    #[case("ls --json", ShellCommand::List { json: true })]
    #[case("  mv 3 1 ", ShellCommand::Move(2, 0))]
    #[case("rm 2 1", ShellCommand::Remove(vec![1, 0]))]
    #[case("add a.pdf \"my file.pdf\"", ShellCommand::Add(vec!["a.pdf".into(), "my file.pdf".into()]))]
    #[case("merge out.pdf", ShellCommand::Merge { output: "out.pdf".into(), force: false })]
    #[case("merge -f out.pdf", ShellCommand::Merge { output: "out.pdf".into(), force: true })]
    #[case("exit", ShellCommand::Quit)]
    fn test_parse_line(#[case] line: &str, #[case] expected: ShellCommand) {
        assert_eq!(parse_line(line).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("# a comment")]
    fn test_parse_line_ignores(#[case] line: &str) {
        assert_eq!(parse_line(line).unwrap(), None);
    }

    #[rstest]
    #[case("frobnicate")]
    #[case("mv 1")]
    #[case("mv 0 1")]
    #[case("rm")]
    #[case("rm two")]
    #[case("add")]
    #[case("ls -l")]
    #[case("merge")]
    #[case("add \"unterminated")]
    fn test_parse_line_rejects(#[case] line: &str) {
        assert!(matches!(
            parse_line(line),
            Err(PdfJoinError::InvalidCommand { .. })
        ));
    }

    fn quiet_shell() -> Shell {
        let mut config = Config::new(Vec::new(), PathBuf::new());
        config.quiet = true;
        config.jobs = Some(2);
        Shell::new(&config)
    }

    fn names(shell: &Shell) -> Vec<String> {
        shell.session().listing().into_iter().map(|e| e.name).collect()
    }

    #[tokio::test]
    async fn test_script_edits_session() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            std::fs::write(temp_dir.path().join(name), name.as_bytes()).unwrap();
        }
        let dir = temp_dir.path().display();
        let script = format!(
            "add {dir}/a.pdf {dir}/b.pdf\nadd {dir}/c.pdf\nmv 3 1\nrm 9\nrm 2\nnot-a-command\n"
        );
        let shell = quiet_shell();

        shell.run(script.as_bytes()).await.unwrap();

        assert_eq!(names(&shell), ["c.pdf", "b.pdf"]);
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let shell = quiet_shell();

        shell.run("quit\nadd missing.pdf\n".as_bytes()).await.unwrap();

        assert!(shell.session().is_empty());
    }

    #[tokio::test]
    async fn test_merge_on_empty_session_reports_error() {
        let shell = quiet_shell();

        let result = shell
            .execute(ShellCommand::Merge {
                output: "never.pdf".into(),
                force: false,
            })
            .await;

        assert!(matches!(result, Err(PdfJoinError::NoFilesToMerge)));
    }

    #[tokio::test]
    async fn test_merge_refuses_existing_output_before_merging() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("not-a-pdf.pdf");
        std::fs::write(&source, b"plain text").unwrap();
        let output = temp_dir.path().join("out.pdf");
        std::fs::write(&output, b"keep me").unwrap();
        let shell = quiet_shell();
        shell
            .execute(ShellCommand::Add(vec![source.display().to_string()]))
            .await
            .unwrap();

        // Merging this entry would fail to decode; the existing output is
        // reported instead, so no merge was attempted.
        let result = shell
            .execute(ShellCommand::Merge {
                output: output.clone(),
                force: false,
            })
            .await;

        assert!(matches!(result, Err(PdfJoinError::OutputExists { .. })));
        assert_eq!(std::fs::read(&output).unwrap(), b"keep me");
    }

    #[tokio::test]
    async fn test_clear_command() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.pdf");
        std::fs::write(&path, b"a").unwrap();
        let shell = quiet_shell();

        shell
            .execute(ShellCommand::Add(vec![path.display().to_string()]))
            .await
            .unwrap();
        shell.execute(ShellCommand::Clear).await.unwrap();

        assert!(shell.session().is_empty());
    }
}
