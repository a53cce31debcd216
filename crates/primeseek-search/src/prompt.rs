//! Asking whether to escalate to the next node count.

use std::io::{self, BufRead, Write};

/// Decides whether to continue after a level completes.
pub trait EscalationPrompt {
    /// Returns true to go on to `next_node_count` nodes.
    ///
    /// # Errors
    ///
    /// I/O failures while talking to the operator.
    fn confirm_next(&mut self, completed: usize, next_node_count: usize) -> io::Result<bool>;
}

/// Answers every prompt the same way.
#[derive(Clone, Copy, Debug)]
pub struct FixedAnswer(pub bool);

impl EscalationPrompt for FixedAnswer {
    fn confirm_next(&mut self, _completed: usize, _next_node_count: usize) -> io::Result<bool> {
        Ok(self.0)
    }
}

/// Line-based Y/N prompt over any reader and writer.
///
/// Answers are case-insensitive and surrounding whitespace is ignored.
/// Anything else is rejected and asked again; end of input means no.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Creates a prompt reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompt, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> EscalationPrompt for LinePrompt<R, W> {
    fn confirm_next(&mut self, completed: usize, next_node_count: usize) -> io::Result<bool> {
        writeln!(
            self.output,
            "All {completed}-node expressions evaluated. \
             Start evaluating {next_node_count}-node expressions now? (Y/N)"
        )?;
        self.output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output, "Exiting")?;
                return Ok(false);
            }
            match line.trim().to_ascii_uppercase().as_str() {
                "Y" => return Ok(true),
                "N" => {
                    writeln!(self.output, "Exiting")?;
                    return Ok(false);
                }
                _ => {
                    writeln!(self.output, "Invalid. Please choose again. (Y/N)")?;
                    self.output.flush()?;
                }
            }
        }
    }
}
