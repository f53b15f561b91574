use std::path::Path;
use std::process;

use ugat_core::{load_tokens, ClassificationTable};

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_tokens(file: &Path, output: OutputFormat, quiet: bool) {
    let table = ClassificationTable::standard();
    let loaded = match load_tokens(file, &table) {
        Ok(l) => l,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&loaded.tokens)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            println!("{:>4}  {:<20} {:<22} CATEGORY", "LINE", "LEXEME", "CODE");
            for t in &loaded.tokens {
                println!(
                    "{:>4}  {:<20} {:<22} {}",
                    t.line,
                    t.lexeme,
                    t.code.name(),
                    t.category
                );
            }
            if !quiet {
                eprintln!("Loaded {} tokens from {}", loaded.tokens.len(), file.display());
            }
        }
    }
}
