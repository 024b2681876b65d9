use itertools::Itertools;
use log::error;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

use crate::output::{GameOutput, Message};

pub fn interpret_message(message: &Message) -> String {
    use Message::*;
    match message {
        QuizRules => "Select the country/territory with this flag.\nAnswer with the option number or the country name, press Enter to continue, type `restart` to play again or `quit` to leave.".into(),
        OfflineData => "Using offline data due to connection issues".into(),
        NotEnoughData => "Not enough countries to generate a quiz.".into(),
        QuestionBegins(question, total) => {
            let options = question
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| format!("  {}) {}", index + 1, option))
                .join("\n");
            format!(
                "\nQuestion {} of {}\n🏳️ {}\n{}",
                question.ordinal, total, question.flag_ref, options
            )
        }
        GuessCorrect(answer) => format!("✅ Correct! That is the flag of {}.", answer),
        GuessIncorrect(correct_answer) => {
            format!("❌ Incorrect. The correct answer was {}.", correct_answer)
        }
        QuizResults(score, total) => {
            let verdict = if (*score as usize) * 2 > *total {
                "Well done! 🎉"
            } else {
                "Try again to improve your score! 💪"
            };
            format!(
                "\nQuiz Completed!\nFinal Score: {} / {}\n{}",
                score, total, verdict
            )
        }
    }
}

pub struct TerminalGameOutput<W> {
    writer: Arc<Mutex<W>>,
}

impl<W> Clone for TerminalGameOutput<W> {
    fn clone(&self) -> Self {
        TerminalGameOutput {
            writer: Arc::clone(&self.writer),
        }
    }
}

impl TerminalGameOutput<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalGameOutput::new(io::stdout())
    }
}

impl<W: Write> TerminalGameOutput<W> {
    pub fn new(writer: W) -> Self {
        TerminalGameOutput {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn print(&self, content: &str) {
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", content).and_then(|_| writer.flush()) {
            error!("Could not write to terminal: {}", e);
        }
    }
}

impl<W: Write> GameOutput for TerminalGameOutput<W> {
    fn say(&self, message: &Message) {
        self.print(&interpret_message(message));
    }
}
