//! Token sequence construction from persisted token files.
//!
//! Two formats are accepted:
//!
//! - text: one `lexeme | TOKEN_NAME [| line]` record per line, as written by
//!   the lexer stage. Header records and blank lines are skipped. Fields are
//!   split from the right so a lexeme may itself contain ` | `.
//! - JSON (`.json` extension): an array of `{ "lexeme", "code", "line" }`
//!   records. A `category` field is accepted and ignored.
//!
//! Both formats resolve codes the same way: the classification table first,
//! then the persisted name. Comment tokens never reach the parser. A record
//! whose code cannot be resolved is kept as [`TokenCode::Unknown`] and
//! reported through [`LoadedTokens::unrecognized`]; loading does not stop.

use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::classify::ClassificationTable;
use crate::error::LoadError;
use crate::token::{Token, TokenCategory, TokenCode};

const SEPARATOR: &str = " | ";

/// A token record whose name matched no terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrecognizedToken {
    pub name: String,
    pub lexeme: String,
    pub line: u32,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedTokens {
    pub tokens: Vec<Token>,
    pub unrecognized: Vec<UnrecognizedToken>,
}

impl LoadedTokens {
    /// Resolve one record and append it. Without an explicit line, position
    /// in the sequence stands in.
    fn push_record(
        &mut self,
        lexeme: &str,
        name: &str,
        line: Option<u32>,
        table: &ClassificationTable,
    ) {
        if is_comment_name(name) {
            debug!("skipping comment token '{}'", lexeme);
            return;
        }

        let line = line.unwrap_or(self.tokens.len() as u32 + 1);
        let (category, code) = match resolve(lexeme, name, table) {
            Some(resolved) => resolved,
            None => {
                warn!("unrecognized token name '{}' for lexeme '{}'", name, lexeme);
                self.unrecognized.push(UnrecognizedToken {
                    name: name.to_owned(),
                    lexeme: lexeme.to_owned(),
                    line,
                });
                (TokenCategory::Unknown, TokenCode::Unknown)
            }
        };
        if category == TokenCategory::Comment {
            return;
        }

        self.tokens.push(Token {
            category,
            code,
            lexeme: lexeme.to_owned(),
            line,
        });
    }
}

/// Load a token file from disk, picking the format from the extension.
pub fn load_tokens(path: &Path, table: &ClassificationTable) -> Result<LoadedTokens, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let loaded = if is_json {
        read_tokens_json(&text, table)?
    } else {
        read_tokens(&text, table)?
    };

    info!("Loaded {} tokens from {}", loaded.tokens.len(), path.display());
    Ok(loaded)
}

/// Parse the text token format.
pub fn read_tokens(text: &str, table: &ClassificationTable) -> Result<LoadedTokens, LoadError> {
    let mut loaded = LoadedTokens::default();

    for (idx, raw) in text.lines().enumerate() {
        let record = raw.trim();
        if record.len() < 3 || is_header(record) {
            continue;
        }

        let malformed = || LoadError::Malformed {
            line_no: idx + 1,
            content: raw.to_owned(),
        };
        let (lexeme, name, line) = split_record(record).ok_or_else(malformed)?;
        let line = match line {
            Some(field) => Some(field.parse::<u32>().map_err(|_| malformed())?),
            None => None,
        };
        if lexeme.is_empty() || name.is_empty() {
            return Err(malformed());
        }

        loaded.push_record(lexeme, name, line, table);
    }

    Ok(loaded)
}

/// One record of the JSON token format.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    lexeme: String,
    code: String,
    #[serde(default)]
    line: Option<u32>,
}

/// Parse the JSON token format.
pub fn read_tokens_json(
    text: &str,
    table: &ClassificationTable,
) -> Result<LoadedTokens, LoadError> {
    let records: Vec<JsonRecord> = serde_json::from_str(text)?;
    let mut loaded = LoadedTokens::default();
    for record in &records {
        loaded.push_record(&record.lexeme, &record.code, record.line, table);
    }
    Ok(loaded)
}

/// `Lexeme | Token Name [| Line]`, as the lexer stage writes it.
fn is_header(record: &str) -> bool {
    let mut fields = record.split(SEPARATOR).map(str::trim);
    fields.next() == Some("Lexeme") && fields.next() == Some("Token Name")
}

/// Split `lexeme | name [| line]` from the right. The trailing field counts
/// as a line column when it is numeric or when the field before it is a
/// token name; otherwise everything left of the last separator is lexeme.
fn split_record(record: &str) -> Option<(&str, &str, Option<&str>)> {
    let (rest, last) = record.rsplit_once(SEPARATOR)?;
    let last = last.trim();
    if let Some((lexeme, name)) = rest.rsplit_once(SEPARATOR) {
        let name = name.trim();
        if last.parse::<u32>().is_ok() || TokenCode::from_name(name).is_some() {
            return Some((lexeme.trim(), name, Some(last)));
        }
    }
    Some((rest.trim(), last, None))
}

/// Table lookup first; the persisted name only when the table misses.
fn resolve(
    lexeme: &str,
    name: &str,
    table: &ClassificationTable,
) -> Option<(TokenCategory, TokenCode)> {
    table
        .classify(lexeme)
        .or_else(|| TokenCode::from_name(name).map(|code| (code.category(), code)))
}

fn is_comment_name(name: &str) -> bool {
    name == TokenCode::SingleLineComment.name() || name == TokenCode::MultiLineComment.name()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> LoadedTokens {
        read_tokens(text, &ClassificationTable::standard()).expect("should load")
    }

    #[test]
    fn headers_and_blank_lines_are_skipped() {
        let loaded = read("Lexeme | Token Name\n\nwala | R_WALA\nugat | R_UGAT\n");
        let codes: Vec<_> = loaded.tokens.iter().map(|t| t.code).collect();
        assert_eq!(codes, vec![TokenCode::Wala, TokenCode::Ugat]);
    }

    #[test]
    fn line_defaults_to_sequence_position() {
        let loaded = read("wala | R_WALA\n// note | C_SINGLE_LINE\nugat | R_UGAT\n");
        let lines: Vec<_> = loaded.tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn explicit_line_column_is_used() {
        let loaded = read("x | L_IDENTIFIER | 7\n");
        assert_eq!(loaded.tokens[0].line, 7);
        assert_eq!(loaded.tokens[0].code, TokenCode::Identifier);
    }

    #[test]
    fn comments_are_dropped() {
        let loaded = read("/* hi */ | C_MULTI_LINE\nwala | R_WALA\n");
        assert_eq!(loaded.tokens.len(), 1);
        assert_eq!(loaded.tokens[0].code, TokenCode::Wala);
    }

    #[test]
    fn table_wins_over_persisted_name() {
        // The lexer stage mislabelled the keyword; the table corrects it.
        let loaded = read("kung | L_IDENTIFIER\n");
        assert_eq!(loaded.tokens[0].code, TokenCode::Kung);
        assert_eq!(loaded.tokens[0].category, TokenCategory::Keyword);
    }

    #[test]
    fn name_is_used_when_table_misses() {
        let loaded = read("3.14 | L_LUTANG_LITERAL\n\"a b\" | L_KWERDAS_LITERAL\n");
        assert_eq!(loaded.tokens[0].code, TokenCode::LutangLiteral);
        assert_eq!(loaded.tokens[1].code, TokenCode::KwerdasLiteral);
        assert_eq!(loaded.tokens[1].lexeme, "\"a b\"");
    }

    #[test]
    fn pipe_operators_survive_field_splitting() {
        let loaded = read("|| | O_OR\n");
        assert_eq!(loaded.tokens[0].code, TokenCode::Or);
        assert_eq!(loaded.tokens[0].lexeme, "||");
    }

    #[test]
    fn unrecognized_name_is_reported_but_kept() {
        let loaded = read("wala | R_WALA\n@@ | X_WEIRD\nugat | R_UGAT\n");
        assert_eq!(loaded.tokens.len(), 3);
        assert_eq!(loaded.tokens[1].code, TokenCode::Unknown);
        assert_eq!(
            loaded.unrecognized,
            vec![UnrecognizedToken {
                name: "X_WEIRD".into(),
                lexeme: "@@".into(),
                line: 2,
            }]
        );
    }

    #[test]
    fn record_without_separator_is_malformed() {
        let err = read_tokens("wala R_WALA\n", &ClassificationTable::standard()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { line_no: 1, .. }), "{:?}", err);
    }

    #[test]
    fn non_numeric_line_column_is_malformed() {
        let err = read_tokens("x | L_IDENTIFIER | seven\n", &ClassificationTable::standard())
            .unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn json_format_drops_comments() {
        let json = r#"[
            {"category": "reserved", "code": "R_WALA", "lexeme": "wala", "line": 1},
            {"category": "comment", "code": "C_SINGLE_LINE", "lexeme": "// x", "line": 1},
            {"category": "reserved", "code": "R_UGAT", "lexeme": "ugat", "line": 2}
        ]"#;
        let loaded = read_tokens_json(json, &ClassificationTable::standard()).unwrap();
        assert_eq!(loaded.tokens.len(), 2);
        assert_eq!(loaded.tokens[1].line, 2);
    }

    #[test]
    fn json_format_resolves_like_text() {
        let json = r#"[
            {"lexeme": "kung", "code": "L_IDENTIFIER", "line": 1},
            {"lexeme": "@@", "code": "X_WEIRD", "line": 2},
            {"lexeme": "x", "code": "L_IDENTIFIER"}
        ]"#;
        let loaded = read_tokens_json(json, &ClassificationTable::standard()).unwrap();
        let codes: Vec<_> = loaded.tokens.iter().map(|t| t.code).collect();
        assert_eq!(
            codes,
            vec![TokenCode::Kung, TokenCode::Unknown, TokenCode::Identifier]
        );
        assert_eq!(loaded.tokens[2].line, 3);
        assert_eq!(
            loaded.unrecognized,
            vec![UnrecognizedToken {
                name: "X_WEIRD".into(),
                lexeme: "@@".into(),
                line: 2,
            }]
        );
    }

    #[test]
    fn json_record_without_code_is_an_error() {
        let err = read_tokens_json(r#"[{"lexeme": "x"}]"#, &ClassificationTable::standard())
            .unwrap_err();
        assert!(matches!(err, LoadError::Json(_)), "{:?}", err);
    }

    #[test]
    fn header_words_as_lexemes_are_tokens() {
        let loaded = read(
            "Lexeme | Token Name | Line\n\
             x | L_IDENTIFIER | 1\n\
             Lexeme | L_IDENTIFIER | 1\n\
             \"Token Name\" | L_KWERDAS_LITERAL | 2\n",
        );
        let lexemes: Vec<_> = loaded.tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["x", "Lexeme", "\"Token Name\""]);
        assert_eq!(loaded.tokens[1].code, TokenCode::Identifier);
        assert_eq!(loaded.tokens[2].code, TokenCode::KwerdasLiteral);
    }

    #[test]
    fn assignment_from_identifier_named_lexeme_parses() {
        let loaded = read(
            "wala | R_WALA\nugat | R_UGAT\n( | D_LPAREN\n) | D_RPAREN\n{ | D_LBRACE\n\
             x | L_IDENTIFIER\n= | O_ASSIGN\nLexeme | L_IDENTIFIER\n; | D_SEMICOLON\n} | D_RBRACE\n",
        );
        assert_eq!(loaded.tokens.len(), 10);
        assert!(crate::parser::parse_program(&loaded.tokens).is_accepted());
    }

    #[test]
    fn lexeme_may_contain_separator() {
        let loaded = read("\"a | b\" | L_KWERDAS_LITERAL\n\"c | d\" | L_KWERDAS_LITERAL | 4\n");
        assert_eq!(loaded.tokens.len(), 2);
        assert_eq!(loaded.tokens[0].lexeme, "\"a | b\"");
        assert_eq!(loaded.tokens[0].code, TokenCode::KwerdasLiteral);
        assert_eq!(loaded.tokens[0].line, 1);
        assert_eq!(loaded.tokens[1].lexeme, "\"c | d\"");
        assert_eq!(loaded.tokens[1].line, 4);
        assert!(loaded.unrecognized.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_tokens(
            Path::new("definitely/not/here.tok"),
            &ClassificationTable::standard(),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("cannot open"));
    }
}
