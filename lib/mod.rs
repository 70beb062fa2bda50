pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;

mod engine;
mod stack;

pub use engine::Engine;
pub use interpreter::{new_engine as new_interpreter, new_engine_with_config as new_interpreter_with_config};
pub use lexer::Lexer;
pub use parser::{parse, ParseError, ParseErrors, Parser};
