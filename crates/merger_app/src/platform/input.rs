//! Text commands standing in for the page's clicks and drag gestures.
//!
//! Row numbers are the 1-based positions shown in the list.

use std::path::{Path, PathBuf};

use merger_core::{Msg, SelectedFile};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Dispatch(Vec<Msg>),
    Redraw,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{0}` is not a row number; rows start at 1")]
    BadRow(String),
}

pub(crate) fn parse(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Redraw,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "add" => Command::Dispatch(vec![Msg::FilesSelected(select_files(rest))]),
        "remove" | "rm" => {
            let index = row(rest, "remove")?;
            Command::Dispatch(vec![Msg::RemoveClicked { index }])
        }
        "drag" => Command::Dispatch(vec![Msg::DragStarted {
            index: row(rest, "drag")?,
        }]),
        "over" => Command::Dispatch(vec![Msg::DragEntered {
            index: row(rest, "over")?,
        }]),
        "leave" => Command::Dispatch(vec![Msg::DragLeft {
            index: row(rest, "leave")?,
        }]),
        "drop" => Command::Dispatch(vec![
            Msg::Dropped {
                index: row(rest, "drop")?,
            },
            Msg::DragEnded,
        ]),
        "cancel" => Command::Dispatch(vec![Msg::DragEnded]),
        "move" => {
            let (from, to) = rest.split_once(char::is_whitespace).ok_or(
                InputError::MissingArgument {
                    command: "move",
                    expected: "two row numbers",
                },
            )?;
            let source = row(from, "move")?;
            let target = row(to.trim(), "move")?;
            Command::Dispatch(vec![
                Msg::DragStarted { index: source },
                Msg::DragEntered { index: target },
                Msg::Dropped { index: target },
                Msg::DragEnded,
            ])
        }
        "name" => Command::Dispatch(vec![Msg::OutputNameChanged(rest.to_string())]),
        "merge" => Command::Dispatch(vec![Msg::MergeClicked]),
        "clear" => Command::Dispatch(vec![Msg::ClearClicked]),
        "download" => Command::Dispatch(vec![Msg::DownloadClicked]),
        "new" => Command::Dispatch(vec![Msg::NewMergeClicked]),
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Answer to a yes/no prompt; anything but yes declines.
pub(crate) fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn row(arg: &str, command: &'static str) -> Result<usize, InputError> {
    if arg.is_empty() {
        return Err(InputError::MissingArgument {
            command,
            expected: "a row number",
        });
    }
    match arg.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(InputError::BadRow(arg.to_string())),
    }
}

fn select_files(args: &str) -> Vec<SelectedFile> {
    split_paths(args)
        .into_iter()
        .map(PathBuf::from)
        .map(|path| selected_file(&path))
        .collect()
}

/// Splits on whitespace; a double-quoted run is one path and may contain spaces.
fn split_paths(args: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in args.chars() {
        match ch {
            '"' => {
                if quoted && !current.is_empty() {
                    paths.push(std::mem::take(&mut current));
                }
                quoted = !quoted;
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    paths.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(current);
    }
    paths
}

/// Declares the content type from the file extension, as a browser would.
fn selected_file(path: &Path) -> SelectedFile {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    SelectedFile {
        name,
        content_type,
        path: path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_declares_content_type_from_extension() {
        let Command::Dispatch(msgs) = parse("add docs/a.pdf notes.txt").unwrap() else {
            panic!("expected dispatch");
        };
        let Msg::FilesSelected(files) = &msgs[0] else {
            panic!("expected selection");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "a.pdf");
        assert_eq!(files[0].content_type, "application/pdf");
        assert_eq!(files[0].path, PathBuf::from("docs/a.pdf"));
        assert_eq!(files[1].content_type, "text/plain");
    }

    #[test]
    fn add_accepts_quoted_paths_with_spaces() {
        let Command::Dispatch(msgs) = parse(r#"add "My Docs/q3 report.pdf" b.pdf"#).unwrap()
        else {
            panic!("expected dispatch");
        };
        let Msg::FilesSelected(files) = &msgs[0] else {
            panic!("expected selection");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "q3 report.pdf");
        assert_eq!(files[0].path, PathBuf::from("My Docs/q3 report.pdf"));
        assert_eq!(files[0].content_type, "application/pdf");
        assert_eq!(files[1].name, "b.pdf");
    }

    #[test]
    fn add_without_paths_is_an_empty_selection() {
        assert_eq!(
            parse("add").unwrap(),
            Command::Dispatch(vec![Msg::FilesSelected(Vec::new())])
        );
    }

    #[test]
    fn rows_are_one_based() {
        assert_eq!(
            parse("remove 2").unwrap(),
            Command::Dispatch(vec![Msg::RemoveClicked { index: 1 }])
        );
        assert_eq!(parse("remove 0"), Err(InputError::BadRow("0".to_string())));
        assert!(matches!(
            parse("remove"),
            Err(InputError::MissingArgument { .. })
        ));
    }

    #[test]
    fn move_is_a_full_gesture() {
        assert_eq!(
            parse("move 1 3").unwrap(),
            Command::Dispatch(vec![
                Msg::DragStarted { index: 0 },
                Msg::DragEntered { index: 2 },
                Msg::Dropped { index: 2 },
                Msg::DragEnded,
            ])
        );
    }

    #[test]
    fn name_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse("name  Q3 handout ").unwrap(),
            Command::Dispatch(vec![Msg::OutputNameChanged("Q3 handout".to_string())])
        );
        assert_eq!(
            parse("name").unwrap(),
            Command::Dispatch(vec![Msg::OutputNameChanged(String::new())])
        );
    }

    #[test]
    fn misc_commands() {
        assert_eq!(parse("  ").unwrap(), Command::Redraw);
        assert_eq!(parse("HELP").unwrap(), Command::Help);
        assert_eq!(parse("quit").unwrap(), Command::Quit);
        assert_eq!(
            parse("frobnicate"),
            Err(InputError::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn only_yes_confirms() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
