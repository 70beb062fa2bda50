use anyhow::Result;

/// Runs source text and renders the resulting value. Bindings made by one
/// `run` call are visible to the next.
pub trait Engine {
    fn run(&mut self, input: &str) -> Result<String>;
}
