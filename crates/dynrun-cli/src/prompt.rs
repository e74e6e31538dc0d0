//! Operator input for commands that ask questions

use std::collections::VecDeque;

/// Source of answers to a command's prompts
pub trait Prompter {
    /// Ask `question`; `None` when no more input is available
    fn prompt(&mut self, question: &str) -> Option<String>;
}

/// Answers supplied up front, consumed in order
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, question: &str) -> Option<String> {
        let answer = self.answers.pop_front();
        log::debug!("{} -> {:?}", question, answer);
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["1.5", ""]);
        assert_eq!(prompter.prompt("a").as_deref(), Some("1.5"));
        assert_eq!(prompter.remaining(), 1);
        assert_eq!(prompter.prompt("b").as_deref(), Some(""));
        assert_eq!(prompter.prompt("c"), None);
    }
}
