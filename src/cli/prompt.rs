//! Interactive yes/no prompts

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Asks the user to confirm a destructive action
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Returns true only on an explicit yes
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Prompt on stdout, answer on stdin
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        print!("{} [y/N] ", question);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;

        Ok(is_yes(&input))
    }
}

fn is_yes(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("YES"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}
