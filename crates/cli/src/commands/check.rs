use std::path::Path;
use std::process;

use ugat_core::{load_tokens, parse_program_with, ClassificationTable, ParseOptions, ParseOutcome};

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_check(file: &Path, options: &ParseOptions, output: OutputFormat, quiet: bool) {
    let table = ClassificationTable::standard();
    let loaded = match load_tokens(file, &table) {
        Ok(l) => l,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    let outcome = parse_program_with(&loaded.tokens, options);

    match output {
        OutputFormat::Json => {
            let mut value = outcome.to_json_value();
            value["unrecognized"] = serde_json::json!(loaded.unrecognized);
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            // `--quiet` leaves only the exit code on rejection.
            if outcome.is_accepted() {
                println!("{}", pretty);
            } else if !quiet {
                eprintln!("{}", pretty);
            }
        }
        OutputFormat::Text => {
            if !quiet {
                for u in &loaded.unrecognized {
                    eprintln!(
                        "Warning: unrecognized token '{}' ({}) at line {}",
                        u.lexeme, u.name, u.line
                    );
                }
            }
            match &outcome {
                ParseOutcome::Accepted { trailing: None } => {
                    println!("Syntax Analysis Complete.");
                }
                ParseOutcome::Accepted {
                    trailing: Some(t),
                } => {
                    println!(
                        "Warning: Extra tokens after program end ({} token(s) starting at line {}: '{}')",
                        t.count, t.line, t.lexeme
                    );
                }
                ParseOutcome::Rejected(d) => {
                    if !quiet {
                        eprintln!("{}", d);
                    }
                }
            }
        }
    }

    if !outcome.is_accepted() {
        process::exit(1);
    }
}
