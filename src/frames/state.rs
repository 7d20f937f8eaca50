//! The visible token list.

use crate::ansi::{Color, Token};

/// Everything visible in the current frame.
///
/// The list only grows: typing extends the trailing prompt text and a reveal
/// appends a command's whole output followed by the next prompt.
#[derive(Debug, Clone)]
pub struct FrameState {
    tokens: Vec<Token>,
    prompt: String,
    reset: Color,
}

impl FrameState {
    /// Start with an empty terminal showing only the prompt.
    pub fn new(prompt: impl Into<String>, reset: Color) -> Self {
        let prompt = prompt.into();
        let mut tokens = Vec::new();
        if !prompt.is_empty() {
            tokens.push(Token::Text(prompt.clone()));
        }
        Self {
            tokens,
            prompt,
            reset,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Append one typed character to the prompt line.
    pub fn type_char(&mut self, c: char) {
        match self.tokens.last_mut() {
            Some(Token::Text(value)) => value.push(c),
            _ => self.tokens.push(Token::Text(c.to_string())),
        }
    }

    /// Reveal a command's output and start the next prompt.
    ///
    /// The color is reset before the prompt so output that leaves a color
    /// active does not tint the next command.
    pub fn reveal(&mut self, output: &[Token]) {
        self.tokens.push(Token::Newline);
        self.tokens.extend(output.iter().cloned());
        self.tokens.push(Token::ColorChange(self.reset));
        if !self.prompt.is_empty() {
            self.tokens.push(Token::Text(self.prompt.clone()));
        }
    }
}
