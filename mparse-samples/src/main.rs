//! Parse a stylesheet and print its rules, or report why it could not be parsed.
//!
//! Usage: `mparse-style <file>`

use ariadne::{sources, Color, Label, Report, ReportKind};
use mparse::Reason;
use mparse_samples::style::stylesheet;
use std::{env, fs, process::ExitCode};

/// The labels and structure stages wrapped around a reason, outermost first.
fn contexts(mut reason: &Reason) -> Vec<String> {
    let mut contexts = Vec::new();
    loop {
        reason = match reason {
            Reason::Labelled { label, inner } => {
                contexts.push(format!("while parsing a {label}"));
                &**inner
            }
            Reason::Structure { stage, inner } => {
                contexts.push(format!("in the {stage}"));
                &**inner
            }
            Reason::TooFew {
                inner: Some(inner), ..
            } => &**inner,
            _ => return contexts,
        };
    }
}

fn main() -> ExitCode {
    let Some(filename) = env::args().nth(1) else {
        eprintln!("usage: mparse-style <file>");
        return ExitCode::FAILURE;
    };
    let src = match fs::read_to_string(&filename) {
        Ok(src) => src,
        Err(e) => {
            eprintln!("could not read {filename}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let parser = stylesheet();
    let code = match parser.parse(&src) {
        Ok(sheet) => {
            print!("{sheet}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let span = failure.span();
            let mut report = Report::build(ReportKind::Error, (filename.clone(), span.clone()))
                .with_config(ariadne::Config::new().with_index_type(ariadne::IndexType::Byte))
                .with_message(failure.to_string())
                .with_label(
                    Label::new((filename.clone(), span))
                        .with_message(failure.reason().root().to_string())
                        .with_color(Color::Red),
                );
            for note in contexts(failure.reason()) {
                report = report.with_note(note);
            }
            report
                .finish()
                .eprint(sources([(filename.clone(), src.clone())]))
                .ok();
            ExitCode::FAILURE
        }
    };
    code
}
