//! Line-oriented operator prompts
//!
//! Every answer is trimmed. The token `exit` (any case) and end of input
//! both end the session, whichever prompt is being answered.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Token that ends the session from any prompt
pub const EXIT_TOKEN: &str = "exit";

/// Why a prompt produced no answer
#[derive(Debug, Error)]
pub enum PromptError {
    /// The operator typed the exit token or closed the input
    #[error("exit requested")]
    Exit,

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Asks questions on `output` and reads answers from `input`
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed answer
    pub fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("End of input reached");
            return Err(PromptError::Exit);
        }

        let answer = line.trim();
        if answer.eq_ignore_ascii_case(EXIT_TOKEN) {
            return Err(PromptError::Exit);
        }
        Ok(answer.to_string())
    }

    /// Writer used for prompts, also receiving listings and trees
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_ask_trims_answer() {
        let mut p = prompter("  example.com \n");
        assert_eq!(p.ask("Host: ").unwrap(), "example.com");
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "Host: ");
    }

    #[test]
    fn test_exit_token_any_case() {
        for input in ["exit\n", "EXIT\n", "  Exit  \n", "eXiT"] {
            let mut p = prompter(input);
            assert!(matches!(p.ask("Host: "), Err(PromptError::Exit)), "{input:?}");
        }
    }

    #[test]
    fn test_end_of_input_is_exit() {
        let mut p = prompter("first\n");
        assert_eq!(p.ask("a: ").unwrap(), "first");
        assert!(matches!(p.ask("b: "), Err(PromptError::Exit)));
    }

    #[test]
    fn test_blank_line_is_an_answer() {
        let mut p = prompter("\n");
        assert_eq!(p.ask("a: ").unwrap(), "");
    }

    #[test]
    fn test_exit_inside_word_is_not_exit() {
        let mut p = prompter("exits\n");
        assert_eq!(p.ask("a: ").unwrap(), "exits");
    }
}
