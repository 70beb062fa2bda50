use crate::token::Token;

pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let char = chars.first().copied();
        Self {
            chars,
            position: 0,
            char,
        }
    }

    /// Returns the next token. Once the input is exhausted every call yields `Token::Eof`.
    pub fn next_token(&mut self) -> Token {
        while self.char.is_some_and(|char| char.is_whitespace()) {
            self.read_char();
        }

        let Some(char) = self.char else {
            return Token::Eof;
        };

        match char {
            '"' => {
                self.read_char();
                let literal = self.read_while(|char| char != '"');
                // closing quote, if any
                self.read_char();
                return Token::String(literal);
            }
            _ if char.is_ascii_digit() => {
                return Token::Int(self.read_while(|char| char.is_ascii_digit()));
            }
            _ if is_ident_start(char) => {
                let literal = self.read_while(|char| is_ident_start(char) || char.is_ascii_digit());
                return Token::lookup_ident(literal);
            }
            _ => {}
        }

        let token = match char {
            '=' if self.is_next_char('=') => {
                self.read_char();
                Token::Eq
            }
            '=' => Token::Assign,
            '!' if self.is_next_char('=') => {
                self.read_char();
                Token::NotEq
            }
            '!' => Token::Bang,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Asterisk,
            '/' => Token::Slash,
            '<' => Token::Lt,
            '>' => Token::Gt,
            ';' => Token::Semicolon,
            ',' => Token::Comma,
            ':' => Token::Colon,
            '(' => Token::Lparen,
            ')' => Token::Rparen,
            '{' => Token::Lbrace,
            '}' => Token::Rbrace,
            '[' => Token::Lbracket,
            ']' => Token::Rbracket,
            _ => Token::Illegal(char.to_string()),
        };

        self.read_char();

        token
    }

    fn read_char(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
        self.char = self.chars.get(self.position).copied();
    }

    fn is_next_char(&self, ch: char) -> bool {
        self.chars.get(self.position + 1).eq(&Some(&ch))
    }

    /// Consumes characters while `condition` holds, leaving the first rejected one current.
    fn read_while(&mut self, condition: impl Fn(char) -> bool) -> String {
        let mut literal = String::new();
        while let Some(char) = self.char {
            if !condition(char) {
                break;
            }
            literal.push(char);
            self.read_char();
        }
        literal
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::Eof => None,
            token => Some(token),
        }
    }
}

fn is_ident_start(char: char) -> bool {
    char.is_ascii_alphabetic() || char == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer() {
        let input = r#"
                    let five = 5;
                    let ten = 10;
                    let add = fn(x, y) {
                        x + y;
                    };
                    let result = add(five, ten);
                    !-/*5;
                    5 < 10 > 5;
                    if (5 < 10) {
                        return true;
                    } else {
                        return false;
                    }
                    10 == 10;
                    10 != 9;
                    "foobar"
                    "foo bar"
                    [1, 2];
                    {"foo": "bar"}
                    "#;

        let expected = vec![
            Token::Let,
            Token::Ident("five".to_string()),
            Token::Assign,
            Token::Int("5".to_string()),
            Token::Semicolon,
            Token::Let,
            Token::Ident("ten".to_string()),
            Token::Assign,
            Token::Int("10".to_string()),
            Token::Semicolon,
            Token::Let,
            Token::Ident("add".to_string()),
            Token::Assign,
            Token::Function,
            Token::Lparen,
            Token::Ident("x".to_string()),
            Token::Comma,
            Token::Ident("y".to_string()),
            Token::Rparen,
            Token::Lbrace,
            Token::Ident("x".to_string()),
            Token::Plus,
            Token::Ident("y".to_string()),
            Token::Semicolon,
            Token::Rbrace,
            Token::Semicolon,
            Token::Let,
            Token::Ident("result".to_string()),
            Token::Assign,
            Token::Ident("add".to_string()),
            Token::Lparen,
            Token::Ident("five".to_string()),
            Token::Comma,
            Token::Ident("ten".to_string()),
            Token::Rparen,
            Token::Semicolon,
            Token::Bang,
            Token::Minus,
            Token::Slash,
            Token::Asterisk,
            Token::Int("5".to_string()),
            Token::Semicolon,
            Token::Int("5".to_string()),
            Token::Lt,
            Token::Int("10".to_string()),
            Token::Gt,
            Token::Int("5".to_string()),
            Token::Semicolon,
            Token::If,
            Token::Lparen,
            Token::Int("5".to_string()),
            Token::Lt,
            Token::Int("10".to_string()),
            Token::Rparen,
            Token::Lbrace,
            Token::Return,
            Token::True,
            Token::Semicolon,
            Token::Rbrace,
            Token::Else,
            Token::Lbrace,
            Token::Return,
            Token::False,
            Token::Semicolon,
            Token::Rbrace,
            Token::Int("10".to_string()),
            Token::Eq,
            Token::Int("10".to_string()),
            Token::Semicolon,
            Token::Int("10".to_string()),
            Token::NotEq,
            Token::Int("9".to_string()),
            Token::Semicolon,
            Token::String("foobar".to_string()),
            Token::String("foo bar".to_string()),
            Token::Lbracket,
            Token::Int("1".to_string()),
            Token::Comma,
            Token::Int("2".to_string()),
            Token::Rbracket,
            Token::Semicolon,
            Token::Lbrace,
            Token::String("foo".to_string()),
            Token::Colon,
            Token::String("bar".to_string()),
            Token::Rbrace,
        ];

        let tokens: Vec<Token> = Lexer::new(input).collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn eof_repeats_after_exhaustion() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token(), Token::Ident("x".to_string()));
        assert_eq!(lexer.next_token(), Token::Eof);
        assert_eq!(lexer.next_token(), Token::Eof);
        assert_eq!(lexer.next_token(), Token::Eof);
    }

    #[test]
    fn illegal_characters() {
        let tokens: Vec<Token> = Lexer::new("a @ 1 #").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_string()),
                Token::Illegal("@".to_string()),
                Token::Int("1".to_string()),
                Token::Illegal("#".to_string()),
            ]
        );
    }

    #[test]
    fn identifiers_with_underscores_and_digits() {
        let tokens: Vec<Token> = Lexer::new("my_var2 _x 3y").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("my_var2".to_string()),
                Token::Ident("_x".to_string()),
                Token::Int("3".to_string()),
                Token::Ident("y".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let mut lexer = Lexer::new(r#""abc"#);
        assert_eq!(lexer.next_token(), Token::String("abc".to_string()));
        assert_eq!(lexer.next_token(), Token::Eof);
    }
}
