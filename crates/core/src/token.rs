//! Token model shared by the loader and the grammar engine.
//!
//! A [`Token`] carries a coarse [`TokenCategory`] (informational only) and a
//! [`TokenCode`], the grammar terminal the parser dispatches on. The set of
//! codes is closed; anything the loader cannot resolve becomes
//! [`TokenCode::Unknown`], which no grammar rule ever matches.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Keyword,
    Reserved,
    Noiseword,
    Operator,
    Delimiter,
    Literal,
    Comment,
    Unknown,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::Reserved => "reserved",
            TokenCategory::Noiseword => "noiseword",
            TokenCategory::Operator => "operator",
            TokenCategory::Delimiter => "delimiter",
            TokenCategory::Literal => "literal",
            TokenCategory::Comment => "comment",
            TokenCategory::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Grammar terminal identifier. Serialized as its canonical persisted name
/// (`D_LPAREN`, `L_IDENTIFIER`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TokenCode {
    // Keywords
    Ani,
    Tanim,
    Para,
    Habang,
    Kung,
    Kundi,
    Kundiman,
    Gawin,
    Tibag,
    Tuloy,
    Pangkat,
    Statik,
    Pribado,
    Protektado,
    Publiko,
    // Reserved words
    Tama,
    Mali,
    Ugat,
    Balik,
    Bilang,
    Kwerdas,
    Titik,
    Lutang,
    Bulyan,
    Doble,
    Wala,
    Pi,
    ENum,
    SampleConstString,
    Kiss,
    // Noise words
    Ng,
    Ay,
    Bunga,
    Wakas,
    Sa,
    Ang,
    Mula,
    Itakda,
    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Pow,
    Modulo,
    Assign,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    And,
    Or,
    Not,
    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Quote,
    SQuote,
    // Literals
    Identifier,
    BilangLiteral,
    LutangLiteral,
    KwerdasLiteral,
    TitikLiteral,
    BulyanLiteral,
    // Comments
    SingleLineComment,
    MultiLineComment,
    /// Unclassified token. Never matches a grammar terminal.
    Unknown,
}

use TokenCode::*;

impl TokenCode {
    /// Every terminal code, in declaration order.
    pub const ALL: &'static [TokenCode] = &[
        Ani, Tanim, Para, Habang, Kung, Kundi, Kundiman, Gawin, Tibag, Tuloy, Pangkat, Statik,
        Pribado, Protektado, Publiko, Tama, Mali, Ugat, Balik, Bilang, Kwerdas, Titik, Lutang,
        Bulyan, Doble, Wala, Pi, ENum, SampleConstString, Kiss, Ng, Ay, Bunga, Wakas, Sa, Ang,
        Mula, Itakda, Plus, Minus, Multiply, Divide, Pow, Modulo, Assign, Equal, NotEqual, Less,
        Greater, LessEq, GreaterEq, And, Or, Not, LParen, RParen, LBrace, RBrace, LBracket,
        RBracket, Comma, Semicolon, Colon, Dot, Quote, SQuote, Identifier, BilangLiteral,
        LutangLiteral, KwerdasLiteral, TitikLiteral, BulyanLiteral, SingleLineComment,
        MultiLineComment, Unknown,
    ];

    /// Canonical persisted name, as written in token files.
    pub fn name(self) -> &'static str {
        match self {
            Ani => "K_ANI",
            Tanim => "K_TANIM",
            Para => "K_PARA",
            Habang => "K_HABANG",
            Kung => "K_KUNG",
            Kundi => "K_KUNDI",
            Kundiman => "K_KUNDIMAN",
            Gawin => "K_GAWIN",
            Tibag => "K_TIBAG",
            Tuloy => "K_TULOY",
            Pangkat => "K_PANGKAT",
            Statik => "K_STATIK",
            Pribado => "K_PRIBADO",
            Protektado => "K_PROTEKTADO",
            Publiko => "K_PUBLIKO",
            Tama => "R_TAMA",
            Mali => "R_MALI",
            Ugat => "R_UGAT",
            Balik => "R_BALIK",
            Bilang => "R_BILANG",
            Kwerdas => "R_KWERDAS",
            Titik => "R_TITIK",
            Lutang => "R_LUTANG",
            Bulyan => "R_BULYAN",
            Doble => "R_DOBLE",
            Wala => "R_WALA",
            Pi => "R_PI",
            ENum => "R_E_NUM",
            SampleConstString => "R_SAMPLE_CONST_STRING",
            Kiss => "R_Kiss",
            Ng => "N_NG",
            Ay => "N_AY",
            Bunga => "N_BUNGA",
            Wakas => "N_WAKAS",
            Sa => "N_SA",
            Ang => "N_ANG",
            Mula => "N_MULA",
            Itakda => "N_ITAKDA",
            Plus => "O_PLUS",
            Minus => "O_MINUS",
            Multiply => "O_MULTIPLY",
            Divide => "O_DIVIDE",
            Pow => "O_POW",
            Modulo => "O_MODULO",
            Assign => "O_ASSIGN",
            Equal => "O_EQUAL",
            NotEqual => "O_NOT_EQUAL",
            Less => "O_LESS",
            Greater => "O_GREATER",
            LessEq => "O_LESS_EQ",
            GreaterEq => "O_GREATER_EQ",
            And => "O_AND",
            Or => "O_OR",
            Not => "O_NOT",
            LParen => "D_LPAREN",
            RParen => "D_RPAREN",
            LBrace => "D_LBRACE",
            RBrace => "D_RBRACE",
            LBracket => "D_LBRACKET",
            RBracket => "D_RBRACKET",
            Comma => "D_COMMA",
            Semicolon => "D_SEMICOLON",
            Colon => "D_COLON",
            Dot => "D_DOT",
            Quote => "D_QUOTE",
            SQuote => "D_SQUOTE",
            Identifier => "L_IDENTIFIER",
            BilangLiteral => "L_BILANG_LITERAL",
            LutangLiteral => "L_LUTANG_LITERAL",
            KwerdasLiteral => "L_KWERDAS_LITERAL",
            TitikLiteral => "L_TITIK_LITERAL",
            BulyanLiteral => "L_BULYAN_LITERAL",
            SingleLineComment => "C_SINGLE_LINE",
            MultiLineComment => "C_MULTI_LINE",
            Unknown => "UNKNOWN",
        }
    }

    /// Inverse of [`TokenCode::name`]. `UNKNOWN` is not a valid persisted
    /// name, so it resolves to `None` like any other unrecognised name.
    pub fn from_name(name: &str) -> Option<TokenCode> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| *code != Unknown && code.name() == name)
    }

    pub fn category(self) -> TokenCategory {
        match self {
            Ani | Tanim | Para | Habang | Kung | Kundi | Kundiman | Gawin | Tibag | Tuloy
            | Pangkat | Statik | Pribado | Protektado | Publiko => TokenCategory::Keyword,
            Tama | Mali | Ugat | Balik | Bilang | Kwerdas | Titik | Lutang | Bulyan | Doble
            | Wala | Pi | ENum | SampleConstString | Kiss => TokenCategory::Reserved,
            Ng | Ay | Bunga | Wakas | Sa | Ang | Mula | Itakda => TokenCategory::Noiseword,
            Plus | Minus | Multiply | Divide | Pow | Modulo | Assign | Equal | NotEqual | Less
            | Greater | LessEq | GreaterEq | And | Or | Not => TokenCategory::Operator,
            LParen | RParen | LBrace | RBrace | LBracket | RBracket | Comma | Semicolon
            | Colon | Dot | Quote | SQuote => TokenCategory::Delimiter,
            Identifier | BilangLiteral | LutangLiteral | KwerdasLiteral | TitikLiteral
            | BulyanLiteral => TokenCategory::Literal,
            SingleLineComment | MultiLineComment => TokenCategory::Comment,
            Unknown => TokenCategory::Unknown,
        }
    }

    /// Surface text for terminals that have exactly one spelling.
    pub fn spelling(self) -> Option<&'static str> {
        let s = match self {
            Ani => "ani",
            Tanim => "tanim",
            Para => "para",
            Habang => "habang",
            Kung => "kung",
            Kundi => "kundi",
            Kundiman => "kundiman",
            Gawin => "gawin",
            Tibag => "tibag",
            Tuloy => "tuloy",
            Pangkat => "pangkat",
            Statik => "statik",
            Pribado => "pribado",
            Protektado => "protektado",
            Publiko => "publiko",
            Tama => "tama",
            Mali => "mali",
            Ugat => "ugat",
            Balik => "balik",
            Bilang => "bilang",
            Kwerdas => "kwerdas",
            Titik => "titik",
            Lutang => "lutang",
            Bulyan => "bulyan",
            Doble => "doble",
            Wala => "wala",
            Ng => "ng",
            Ay => "ay",
            Bunga => "bunga",
            Wakas => "wakas",
            Sa => "sa",
            Ang => "ang",
            Mula => "mula",
            Itakda => "itakda",
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
            Pow => "^",
            Modulo => "%",
            Assign => "=",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEq => "<=",
            GreaterEq => ">=",
            And => "&&",
            Or => "||",
            Not => "!",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Comma => ",",
            Semicolon => ";",
            Colon => ":",
            Dot => ".",
            Quote => "\"",
            SQuote => "'",
            _ => return None,
        };
        Some(s)
    }
}

impl fmt::Display for TokenCode {
    /// Human description used in diagnostics: quoted spelling for fixed
    /// terminals, a class name for everything else.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(s) = self.spelling() {
            return write!(f, "'{}'", s);
        }
        let s = match self {
            Pi => "constant PI",
            ENum => "constant E",
            SampleConstString => "string constant",
            Kiss => "constant Kiss",
            Identifier => "identifier",
            BilangLiteral => "numeric literal",
            LutangLiteral => "floating literal",
            KwerdasLiteral => "string literal",
            TitikLiteral => "character literal",
            BulyanLiteral => "boolean literal",
            SingleLineComment => "single-line comment",
            MultiLineComment => "multi-line comment",
            _ => "unknown token",
        };
        f.write_str(s)
    }
}

impl From<TokenCode> for &'static str {
    fn from(code: TokenCode) -> Self {
        code.name()
    }
}

impl TryFrom<String> for TokenCode {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        if name == Unknown.name() {
            return Ok(Unknown);
        }
        TokenCode::from_name(&name).ok_or_else(|| format!("unknown token name '{}'", name))
    }
}

/// A single classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub category: TokenCategory,
    pub code: TokenCode,
    pub lexeme: String,
    /// 1-based source line.
    pub line: u32,
}

impl Token {
    /// Build a token whose category is the natural category of `code`.
    pub fn new(code: TokenCode, lexeme: impl Into<String>, line: u32) -> Self {
        Token {
            category: code.category(),
            code,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn is_comment(&self) -> bool {
        self.category == TokenCategory::Comment || self.code.category() == TokenCategory::Comment
    }
}
