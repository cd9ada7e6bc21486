use bayes_core::{logging, Classifier};
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DEFAULT_STATE_PATH: &str = "classifier_state.b64";

fn get_state_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH))
}

fn main() -> io::Result<()> {
    if let Err(e) = logging::init() {
        eprintln!("[WARN] {e}");
    }

    let state_path = get_state_path();
    let mut classifier = Classifier::from_file_or_new(&state_path);
    tracing::info!(path = %state_path.display(), "classifier ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let input = line?;
        let (command, rest) = input.split_once(' ').unwrap_or((input.as_str(), ""));
        tracing::debug!(command, "received");

        match command {
            "LEARN" => {
                match split_label(rest) {
                    Some((category, text)) => {
                        classifier.learn(text, category);
                        reply_ok(&mut stdout, "learned")?;
                    }
                    None => reply_err(&mut stdout, "usage: LEARN <category> [text]")?,
                }
            }
            "LEARN_KEYS" => {
                match split_label(rest) {
                    Some((keys, text)) => {
                        let keys: Vec<&str> = keys.split(',').collect();
                        classifier.learn_from_key_set(text, &keys);
                        reply_ok(&mut stdout, "learned")?;
                    }
                    None => reply_err(&mut stdout, "usage: LEARN_KEYS <k1,k2,...> [text]")?,
                }
            }
            "CATEGORIZE" => match classifier.categorize(rest) {
                Ok(category) => reply_ok(&mut stdout, &category)?,
                Err(e) => reply_err(&mut stdout, &e.to_string())?,
            },
            "SCORES" => match classifier.scores(rest) {
                Ok(scores) => {
                    for (category, score) in scores {
                        writeln!(stdout, "{} {score:.6}", category.cyan())?;
                    }
                    reply_ok(&mut stdout, "scores")?;
                }
                Err(e) => reply_err(&mut stdout, &e.to_string())?,
            },
            "SUGGESTIONS" => {
                for (category, tokens) in classifier.get_suggestions() {
                    writeln!(stdout, "{} {}", category.cyan(), tokens.join(" | "))?;
                }
                reply_ok(&mut stdout, "suggestions")?;
            }
            "EXPORT" => match classifier.save() {
                Ok(encoded) => reply_ok(&mut stdout, &encoded)?,
                Err(e) => reply_err(&mut stdout, &e.to_string())?,
            },
            "IMPORT" => match classifier.load(rest) {
                Ok(()) => reply_ok(&mut stdout, "imported")?,
                Err(e) => reply_err(&mut stdout, &e.to_string())?,
            },
            "SAVE" => match classifier.save_state() {
                Ok(()) => reply_ok(&mut stdout, "saved")?,
                Err(e) => reply_err(&mut stdout, &e.to_string())?,
            },
            "EXIT" => break,
            "" => {}
            _ => reply_err(&mut stdout, &format!("unknown command {command}"))?,
        }
        stdout.flush()?;
    }

    if let Err(e) = classifier.save_state() {
        tracing::error!(error = %e, "could not save state");
    }
    tracing::info!("shutting down");
    Ok(())
}

/// Splits `<label> [text]`. A missing text is an empty document.
fn split_label(rest: &str) -> Option<(&str, &str)> {
    let (label, text) = rest.split_once(' ').unwrap_or((rest, ""));
    (!label.is_empty()).then_some((label, text))
}

fn reply_ok(stdout: &mut io::Stdout, message: &str) -> io::Result<()> {
    writeln!(stdout, "{} {message}", "OK".green())
}

fn reply_err(stdout: &mut io::Stdout, message: &str) -> io::Result<()> {
    writeln!(stdout, "{} {message}", "ERR".red())
}
