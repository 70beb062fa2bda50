use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    Ident(String),
    Int(String),
    String(String),
    Illegal(String),
    Eof,

    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Lt,
    Gt,
    Eq,
    NotEq,

    Comma,
    Semicolon,
    Colon,

    Lparen,
    Rparen,
    Lbrace,
    Rbrace,
    Lbracket,
    Rbracket,

    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl Token {
    pub fn variant_eq(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn lookup_ident(ident: String) -> Token {
        match ident.as_str() {
            "let" => Token::Let,
            "fn" => Token::Function,
            "true" => Token::True,
            "false" => Token::False,
            "if" => Token::If,
            "else" => Token::Else,
            "return" => Token::Return,
            _ => Token::Ident(ident),
        }
    }

    /// Name of the token kind as it appears in parser diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Ident(_) => "IDENT",
            Token::Int(_) => "INT",
            Token::String(_) => "STRING",
            Token::Illegal(_) => "ILLEGAL",
            Token::Eof => "EOF",

            Token::Assign => "=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Bang => "!",
            Token::Asterisk => "*",
            Token::Slash => "/",

            Token::Lt => "<",
            Token::Gt => ">",
            Token::Eq => "==",
            Token::NotEq => "!=",

            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Colon => ":",

            Token::Lparen => "(",
            Token::Rparen => ")",
            Token::Lbrace => "{",
            Token::Rbrace => "}",
            Token::Lbracket => "[",
            Token::Rbracket => "]",

            Token::Function => "FUNCTION",
            Token::Let => "LET",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::If => "IF",
            Token::Else => "ELSE",
            Token::Return => "RETURN",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Ident(literal)
            | Token::Int(literal)
            | Token::String(literal)
            | Token::Illegal(literal) => write!(f, "{}", literal),
            Token::Eof => write!(f, ""),

            Token::Function => write!(f, "fn"),
            Token::Let => write!(f, "let"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::Return => write!(f, "return"),

            operator => write!(f, "{}", operator.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_resolved_from_identifiers() {
        let cases = vec![
            ("let", Token::Let),
            ("fn", Token::Function),
            ("true", Token::True),
            ("false", Token::False),
            ("if", Token::If),
            ("else", Token::Else),
            ("return", Token::Return),
            ("lettuce", Token::Ident("lettuce".to_string())),
        ];
        for (input, expected) in cases {
            assert_eq!(Token::lookup_ident(input.to_string()), expected);
        }
    }

    #[test]
    fn display_and_kind() {
        assert_eq!(Token::Lbrace.to_string(), "{");
        assert_eq!(Token::NotEq.to_string(), "!=");
        assert_eq!(Token::Function.to_string(), "fn");
        assert_eq!(Token::Ident("x".to_string()).to_string(), "x");
        assert_eq!(Token::Ident("x".to_string()).kind(), "IDENT");
        assert_eq!(Token::Function.kind(), "FUNCTION");
        assert_eq!(Token::Eof.kind(), "EOF");
    }
}
