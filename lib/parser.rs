use std::{fmt, rc::Rc};

use log::{debug, trace};
use thiserror::Error;

use crate::{
    ast::{BlockStatement, Expression, Program, Statement},
    lexer::Lexer,
    stack::ensure_sufficient_stack,
    token::Token,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(&'static str),
    #[error("could not parse {0} as integer")]
    InvalidInteger(String),
}

/// Every diagnostic collected while parsing one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl std::error::Error for ParseErrors {}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let messages = self
            .0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        write!(f, "{}", messages)
    }
}

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq, Eq, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl Precedence {
    fn from_token(token: &Token) -> Self {
        match token {
            Token::Eq | Token::NotEq => Precedence::Equals,
            Token::Lt | Token::Gt => Precedence::LessGreater,
            Token::Plus | Token::Minus => Precedence::Sum,
            Token::Asterisk | Token::Slash => Precedence::Product,
            Token::Lparen => Precedence::Call,
            Token::Lbracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

/// Parses `input` in one go, failing with every diagnostic if any were recorded.
pub fn parse(input: &str) -> std::result::Result<Program, ParseErrors> {
    let mut parser = Parser::new(Lexer::new(input));
    let program = parser.parse_program();
    if parser.errors().is_empty() {
        Ok(program)
    } else {
        Err(ParseErrors(parser.errors))
    }
}

pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        Self {
            cur_token: lexer.next_token(),
            peek_token: lexer.next_token(),
            lexer,
            errors: Vec::new(),
        }
    }

    /// Parses statements until end of input. A statement that fails to parse is
    /// dropped, its diagnostic recorded, and parsing resumes after the offending token.
    pub fn parse_program(&mut self) -> Program {
        let mut statements: Vec<Statement> = Vec::new();
        while !self.cur_token_is(&Token::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    trace!("recovering from parse error at {:?}: {}", self.cur_token, err);
                    self.errors.push(err);
                }
            }
            self.next_token();
        }
        debug!(
            "parsed {} statements with {} errors",
            statements.len(),
            self.errors.len()
        );
        Program { statements }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn cur_token_is(&self, token: &Token) -> bool {
        self.cur_token.variant_eq(token)
    }

    fn peek_token_is(&self, token: &Token) -> bool {
        self.peek_token.variant_eq(token)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::from_token(&self.peek_token)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::from_token(&self.cur_token)
    }

    fn expect_peek(&mut self, token: Token) -> Result<()> {
        if self.peek_token_is(&token) {
            self.next_token();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: token.kind(),
                found: self.peek_token.kind(),
            })
        }
    }

    fn expect_peek_ident(&mut self) -> Result<String> {
        self.expect_peek(Token::Ident(String::new()))?;
        match &self.cur_token {
            Token::Ident(name) => Ok(name.clone()),
            token => Err(ParseError::UnexpectedToken {
                expected: "IDENT",
                found: token.kind(),
            }),
        }
    }

    fn skip_semicolon(&mut self) {
        if self.peek_token_is(&Token::Semicolon) {
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.cur_token {
            Token::Let => self.parse_let_statement(),
            Token::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Result<Statement> {
        let name = self.expect_peek_ident()?;

        self.expect_peek(Token::Assign)?;

        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();

        Ok(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();

        Ok(Statement::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let expression = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();

        Ok(Statement::Expression(expression))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        ensure_sufficient_stack(|| -> Result<Expression> {
            let mut left_exp = self.parse_prefix()?;

            while !self.peek_token_is(&Token::Semicolon) && precedence < self.peek_precedence() {
                self.next_token();
                left_exp = match self.cur_token {
                    Token::Lparen => self.parse_call_expression(left_exp)?,
                    Token::Lbracket => self.parse_index_expression(left_exp)?,
                    _ => self.parse_infix_expression(left_exp)?,
                };
            }

            Ok(left_exp)
        })
    }

    fn parse_prefix(&mut self) -> Result<Expression> {
        match &self.cur_token {
            Token::Ident(value) => Ok(Expression::Identifier(value.clone())),
            Token::Int(value) => Self::parse_integer_literal(value),
            Token::String(value) => Ok(Expression::StringLiteral(value.clone())),
            Token::True => Ok(Expression::BooleanLiteral(true)),
            Token::False => Ok(Expression::BooleanLiteral(false)),
            Token::Bang | Token::Minus => self.parse_prefix_expression(),
            Token::Lparen => self.parse_grouped_expression(),
            Token::Lbracket => self.parse_array_literal(),
            Token::Lbrace => self.parse_hash_literal(),
            Token::If => self.parse_if_expression(),
            Token::Function => self.parse_function_literal(),
            token => Err(ParseError::NoPrefixParseFn(token.kind())),
        }
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression> {
        let operator = self.cur_token.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Ok(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let operator = self.cur_token.clone();
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Ok(Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_integer_literal(literal: &str) -> Result<Expression> {
        match literal.parse::<i64>() {
            Ok(value) => Ok(Expression::IntegerLiteral(value)),
            Err(_) => Err(ParseError::InvalidInteger(literal.to_string())),
        }
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();
        let exp = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(Token::Rparen)?;
        Ok(exp)
    }

    fn parse_if_expression(&mut self) -> Result<Expression> {
        self.expect_peek(Token::Lparen)?;

        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(Token::Rparen)?;

        self.expect_peek(Token::Lbrace)?;

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token_is(&Token::Else) {
            self.next_token();
            self.expect_peek(Token::Lbrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_array_literal(&mut self) -> Result<Expression> {
        let elements = self.parse_expression_list(Token::Rbracket)?;

        Ok(Expression::ArrayLiteral(elements))
    }

    fn parse_hash_literal(&mut self) -> Result<Expression> {
        let mut pairs: Vec<(Expression, Expression)> = Vec::new();

        while !self.peek_token_is(&Token::Rbrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(Token::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.peek_token_is(&Token::Rbrace) {
                self.expect_peek(Token::Comma)?;
            }
        }

        self.expect_peek(Token::Rbrace)?;

        Ok(Expression::HashLiteral(pairs))
    }

    fn parse_function_literal(&mut self) -> Result<Expression> {
        self.expect_peek(Token::Lparen)?;

        let parameters = self.parse_function_parameters()?;

        self.expect_peek(Token::Lbrace)?;

        let body = self.parse_block_statement()?;

        Ok(Expression::FunctionLiteral {
            parameters: Rc::from(parameters),
            body: Rc::new(body),
        })
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<String>> {
        let mut identifiers: Vec<String> = Vec::new();

        if self.peek_token_is(&Token::Rparen) {
            self.next_token();
            return Ok(identifiers);
        }

        identifiers.push(self.expect_peek_ident()?);

        while self.peek_token_is(&Token::Comma) {
            self.next_token();
            identifiers.push(self.expect_peek_ident()?);
        }

        self.expect_peek(Token::Rparen)?;

        Ok(identifiers)
    }

    fn parse_expression_list(&mut self, end_token: Token) -> Result<Vec<Expression>> {
        let mut expressions: Vec<Expression> = Vec::new();

        if self.peek_token_is(&end_token) {
            self.next_token();
            return Ok(expressions);
        }

        self.next_token();
        expressions.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(&Token::Comma) {
            self.next_token();
            self.next_token();
            expressions.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end_token)?;

        Ok(expressions)
    }

    fn parse_block_statement(&mut self) -> Result<BlockStatement> {
        self.next_token();

        let mut statements: Vec<Statement> = Vec::new();

        // Broken statements are recorded and skipped so the block still ends at its own `}`.
        while !self.cur_token_is(&Token::Rbrace) && !self.cur_token_is(&Token::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    trace!("recovering inside block at {:?}: {}", self.cur_token, err);
                    self.errors.push(err);
                }
            }
            self.next_token();
        }

        Ok(BlockStatement { statements })
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression> {
        let arguments = self.parse_expression_list(Token::Rparen)?;
        Ok(Expression::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_index_expression(&mut self, left: Expression) -> Result<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(Token::Rbracket)?;
        Ok(Expression::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }
}
