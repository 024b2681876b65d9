use crate::game::question::Question;

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    GuessCorrect(String),
    GuessIncorrect(String),
    NotEnoughData,
    OfflineData,
    QuestionBegins(Question, usize),
    QuizResults(u32, usize),
    QuizRules,
}

pub trait GameOutput {
    fn say(&self, message: &Message);
}
