//! The Curry front-end driver: a thin CLI over `curry-lexer`/`curry-parser`
//! that never contains pipeline logic of its own, only argument handling,
//! invocation, and error rendering (§6.5).

use std::path::PathBuf;
use std::process;

use clap::Parser;

use ariadne::{Label, Report, ReportKind, Source};
use curry_diagnostics::Diagnostic;
use curry_lexer::{is_literate_extension, literate, Lexer};

/// The fixed tab stop width this toolchain's lexer advances columns by.
/// `--tab-width` is accepted for interface completeness but, since
/// `curry-span::Position::tab` has no configurable stop, any other value is
/// rejected up front rather than silently ignored.
const SUPPORTED_TAB_WIDTH: u32 = 8;

#[derive(Parser)]
#[command(name = "curryc", version, about = "The Curry front-end driver")]
struct Cli {
    /// Source file to process.
    path: PathBuf,

    /// Print the raw token stream instead of parsing.
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parsed surface AST as pretty-printed JSON.
    #[arg(long)]
    dump_ast: bool,

    /// Tab stop width used while tracking column positions.
    #[arg(long, default_value_t = SUPPORTED_TAB_WIDTH)]
    tab_width: u32,
}

fn main() {
    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    if cli.tab_width != SUPPORTED_TAB_WIDTH {
        eprintln!(
            "error: --tab-width {} is not supported; this lexer only tracks tab stops every {} columns",
            cli.tab_width, SUPPORTED_TAB_WIDTH
        );
        return 1;
    }

    let source = match std::fs::read_to_string(&cli.path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: failed to read '{}': {e}", cli.path.display());
            return 1;
        }
    };
    let file = cli.path.display().to_string();

    if cli.dump_tokens {
        return dump_tokens(&source, &file);
    }

    let diagnosed = curry_parser::parse_module(&source, &file);
    for warning in &diagnosed.warnings {
        eprintln!("warning: {warning}");
    }
    match diagnosed.into_result() {
        Ok(module) => {
            if cli.dump_ast {
                match serde_json::to_string_pretty(&module) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: failed to serialize AST: {e}");
                        return 1;
                    }
                }
            }
            0
        }
        Err(diagnostic) => {
            report_diagnostic(&source, &diagnostic);
            1
        }
    }
}

fn dump_tokens(source: &str, file: &str) -> i32 {
    let preprocessed = if is_literate_extension(file) {
        match literate::delitter(source, file) {
            Ok(stripped) => stripped,
            Err(e) => {
                eprintln!("error: {e}");
                return 1;
            }
        }
    } else {
        source.to_string()
    };

    let mut lexer = Lexer::new(&preprocessed, file.to_string());
    loop {
        match lexer.next_token() {
            Ok(token) => {
                let is_eof = token.kind == curry_lexer::TokenKind::Eof;
                println!("{:?} {:?} @ {}", token.kind, token.attrs, token.position);
                if is_eof {
                    return 0;
                }
            }
            Err(e) => {
                eprintln!("error: {e}");
                return 1;
            }
        }
    }
}

/// Renders a fatal diagnostic as an `ariadne` report. `Diagnostic` only
/// carries a line/column position, not a byte span, so the label covers the
/// single character at that column (converted back to a byte offset by
/// scanning the preceding lines) rather than an arbitrary highlighted range.
fn report_diagnostic(source: &str, diagnostic: &Diagnostic) {
    match (diagnostic.position.line(), diagnostic.position.column()) {
        (Some(line), Some(column)) => {
            let start = byte_offset_of(source, line, column);
            let end = (start + 1).min(source.len()).max(start);
            let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, start..end)
                .with_message(format!("{} error", diagnostic.kind))
                .with_label(Label::new(start..end).with_message(&diagnostic.message))
                .finish()
                .eprint(Source::from(source));
        }
        _ => eprintln!("error: {diagnostic}"),
    }
}

fn byte_offset_of(source: &str, line: u32, column: u32) -> usize {
    let mut offset = 0;
    for (i, text_line) in source.split_inclusive('\n').enumerate() {
        if i as u32 + 1 == line {
            let mut col = 1u32;
            for (char_offset, _) in text_line.char_indices() {
                if col == column {
                    return offset + char_offset;
                }
                col += 1;
            }
            return offset + text_line.len();
        }
        offset += text_line.len();
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offset_finds_the_start_of_the_requested_line() {
        let source = "abc\ndef\nghi";
        assert_eq!(byte_offset_of(source, 2, 1), 4);
        assert_eq!(byte_offset_of(source, 2, 2), 5);
        assert_eq!(byte_offset_of(source, 3, 1), 8);
    }

    #[test]
    fn byte_offset_past_end_of_file_falls_back_to_source_length() {
        let source = "abc";
        assert_eq!(byte_offset_of(source, 5, 1), source.len());
    }

    fn write_source(contents: &str) -> tempfile::NamedTempFile {
        use std::io::Write;
        let mut file = tempfile::Builder::new().suffix(".curry").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn run_exits_zero_on_a_well_formed_module() {
        let file = write_source("module M where\nmain = 1\n");
        let cli = Cli {
            path: file.path().to_path_buf(),
            dump_tokens: false,
            dump_ast: false,
            tab_width: SUPPORTED_TAB_WIDTH,
        };
        assert_eq!(run(&cli), 0);
    }

    #[test]
    fn run_exits_nonzero_and_reports_a_syntax_error() {
        let file = write_source("module M where\nmain = \n");
        let cli = Cli {
            path: file.path().to_path_buf(),
            dump_tokens: false,
            dump_ast: false,
            tab_width: SUPPORTED_TAB_WIDTH,
        };
        assert_eq!(run(&cli), 1);
    }

    #[test]
    fn run_rejects_an_unsupported_tab_width() {
        let file = write_source("module M where\nmain = 1\n");
        let cli = Cli {
            path: file.path().to_path_buf(),
            dump_tokens: false,
            dump_ast: false,
            tab_width: 4,
        };
        assert_eq!(run(&cli), 1);
    }
}
