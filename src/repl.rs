use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use log::debug;
use monkey_interp::{interpreter::EvaluatorConfig, new_interpreter_with_config, ParseErrors};

const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"
            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Reads lines until end of input, evaluating each against one shared environment.
pub fn start(config: EvaluatorConfig) -> Result<()> {
    let mut engine = new_interpreter_with_config(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        let mut input = String::new();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read line")?;
        if read == 0 {
            debug!("end of input, leaving repl");
            writeln!(stdout)?;
            return Ok(());
        }

        match engine.run(&input) {
            Ok(evaluated) => writeln!(stdout, "{}", evaluated)?,
            Err(err) => match err.downcast_ref::<ParseErrors>() {
                Some(errors) => {
                    writeln!(stdout, "{}", MONKEY_FACE)?;
                    writeln!(stdout, "Woops! We ran into some monkey business here!")?;
                    writeln!(stdout, " parser errors:")?;
                    for error in &errors.0 {
                        writeln!(stdout, "\t{}", error)?;
                    }
                }
                None => writeln!(stdout, "ERROR: {}", err)?,
            },
        }
    }
}
