//! Line-oriented prompts
//!
//! Every prompt is a single blocking line read. Validation failures print a
//! hint and read again; end of input surfaces as [`LibraryError::InputClosed`].

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{LibraryError, LibraryResult};

/// Reads answers from `input` and writes prompts to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line of output
    pub fn say(&mut self, message: impl Display) -> LibraryResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Show `label` and read one trimmed line
    pub fn read_line(&mut self, label: &str) -> LibraryResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(LibraryError::InputClosed);
        }

        Ok(line.trim().to_string())
    }

    /// Read until a non-blank answer is given
    pub fn non_empty(&mut self, label: &str) -> LibraryResult<String> {
        loop {
            let answer = self.read_line(label)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("Please enter a value.")?;
        }
    }

    /// Read an answer, mapping blank to `None`
    pub fn optional(&mut self, label: &str) -> LibraryResult<Option<String>> {
        let answer = self.read_line(label)?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }

    /// Read an answer, keeping `current` when blank
    pub fn with_default(&mut self, label: &str, current: &str) -> LibraryResult<String> {
        let answer = self.read_line(label)?;
        if answer.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Read until a number in `min..=max` is given
    pub fn number_in_range<T>(&mut self, label: &str, min: T, max: T) -> LibraryResult<T>
    where
        T: FromStr + PartialOrd + Display + Copy,
    {
        loop {
            let answer = self.read_line(label)?;
            match answer.parse::<T>() {
                Ok(value) if value >= min && value <= max => return Ok(value),
                _ => self.say(format!("Enter a number between {} and {}.", min, max))?,
            }
        }
    }

    /// Like [`Self::number_in_range`], but blank keeps `current`
    pub fn number_with_default<T>(
        &mut self,
        label: &str,
        min: T,
        max: T,
        current: T,
    ) -> LibraryResult<T>
    where
        T: FromStr + PartialOrd + Display + Copy,
    {
        loop {
            let answer = self.read_line(label)?;
            if answer.is_empty() {
                return Ok(current);
            }
            match answer.parse::<T>() {
                Ok(value) if value >= min && value <= max => return Ok(value),
                _ => self.say(format!(
                    "Enter a number between {} and {}, or press [ENTER] to keep {}.",
                    min, max, current
                ))?,
            }
        }
    }

    /// Yes/no question, defaulting to no
    pub fn confirm(&mut self, label: &str) -> LibraryResult<bool> {
        let answer = self.read_line(label)?.to_uppercase();
        Ok(answer == "Y" || answer == "YES")
    }

    /// Wait for the user to press enter
    pub fn pause(&mut self) -> LibraryResult<()> {
        self.say("")?;
        self.read_line("Press [ENTER] to continue...")?;
        Ok(())
    }
}
