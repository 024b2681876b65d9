use log::debug;
use rand::Rng;
use std::fmt;

use crate::catalog::CatalogHandle;
use crate::game::question::{generate_questions, Question};
use crate::game::settings::Settings;
use crate::output::{GameOutput, Message};


#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Feedback {
    Correct(String),
    Incorrect(String),
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct(answer) => write!(f, "Correct! That is the flag of {}.", answer),
            Feedback::Incorrect(correct_answer) => {
                write!(f, "Incorrect. The correct answer was {}.", correct_answer)
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Empty,
    AwaitingAnswer(usize),
    AnswerRevealed {
        index: usize,
        selected: String,
        feedback: Feedback,
    },
    Complete,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuessResult {
    pub is_correct: bool,
}

/// Read-only snapshot of a quiz, for rendering.
#[derive(Debug)]
pub struct QuizView<'a> {
    pub question: Option<&'a Question>,
    pub ordinal: usize,
    pub total: usize,
    pub score: u32,
    pub answered: usize,
    pub selected_answer: Option<&'a str>,
    pub feedback: Option<String>,
    pub is_complete: bool,
}

pub struct Quiz<O, R> {
    catalog: CatalogHandle,
    settings: Settings,
    questions: Vec<Question>,
    current_phase: Phase,
    score: u32,
    rng: R,
    output: O,
}

impl<O: GameOutput, R: Rng> Quiz<O, R> {
    pub fn new(catalog: CatalogHandle, settings: Settings, rng: R, output: O) -> Self {
        let mut quiz = Quiz {
            catalog,
            settings,
            questions: Vec::new(),
            current_phase: Phase::Empty,
            score: 0,
            rng,
            output,
        };
        quiz.begin();
        quiz
    }

    fn begin(&mut self) {
        self.questions = generate_questions(&self.catalog, &self.settings, &mut self.rng);
        self.score = 0;
        let phase = if self.questions.is_empty() {
            Phase::Empty
        } else {
            Phase::AwaitingAnswer(0)
        };
        self.set_current_phase(phase);
    }

    fn set_current_phase(&mut self, phase: Phase) {
        debug!("Entering quiz phase: {:?}", phase);
        self.current_phase = phase;
        self.on_begin();
    }

    fn on_begin(&mut self) {
        let message = match &self.current_phase {
            Phase::Empty => Message::NotEnoughData,
            Phase::AwaitingAnswer(index) => {
                Message::QuestionBegins(self.questions[*index].clone(), self.questions.len())
            }
            Phase::AnswerRevealed { feedback, .. } => match feedback {
                Feedback::Correct(answer) => Message::GuessCorrect(answer.clone()),
                Feedback::Incorrect(correct_answer) => {
                    Message::GuessIncorrect(correct_answer.clone())
                }
            },
            Phase::Complete => Message::QuizResults(self.score, self.questions.len()),
        };
        self.output.say(&message);
    }

    pub fn submit_answer(&mut self, answer: &str) -> Option<GuessResult> {
        let index = match self.current_phase {
            Phase::AwaitingAnswer(index) => index,
            _ => {
                debug!("Ignoring answer `{}` outside of a question", answer);
                return None;
            }
        };

        let question = &self.questions[index];
        let is_correct = question.is_correct(answer);
        let feedback = if is_correct {
            self.score += 1;
            Feedback::Correct(answer.to_owned())
        } else {
            Feedback::Incorrect(question.correct_answer.clone())
        };

        self.set_current_phase(Phase::AnswerRevealed {
            index,
            selected: answer.to_owned(),
            feedback,
        });

        Some(GuessResult { is_correct })
    }

    pub fn advance(&mut self) -> bool {
        let index = match self.current_phase {
            Phase::AnswerRevealed { index, .. } => index,
            _ => {
                debug!("Ignoring advance while no answer is revealed");
                return false;
            }
        };

        if index + 1 < self.questions.len() {
            self.set_current_phase(Phase::AwaitingAnswer(index + 1));
        } else {
            self.set_current_phase(Phase::Complete);
        }
        true
    }

    pub fn restart(&mut self) {
        self.begin();
    }

    pub fn phase(&self) -> &Phase {
        &self.current_phase
    }

    #[cfg(test)]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_over(&self) -> bool {
        match self.current_phase {
            Phase::Complete => true,
            _ => false,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.current_phase {
            Phase::AwaitingAnswer(index) | Phase::AnswerRevealed { index, .. } => {
                self.questions.get(*index)
            }
            Phase::Empty | Phase::Complete => None,
        }
    }

    pub fn view(&self) -> QuizView<'_> {
        let (ordinal, answered, selected_answer, feedback) = match &self.current_phase {
            Phase::Empty => (0, 0, None, None),
            Phase::AwaitingAnswer(index) => (index + 1, *index, None, None),
            Phase::AnswerRevealed {
                index,
                selected,
                feedback,
            } => (
                index + 1,
                index + 1,
                Some(selected.as_str()),
                Some(feedback.to_string()),
            ),
            Phase::Complete => (self.questions.len(), self.questions.len(), None, None),
        };
        QuizView {
            question: self.current_question(),
            ordinal,
            total: self.questions.len(),
            score: self.score,
            answered,
            selected_answer,
            feedback,
            is_complete: self.is_over(),
        }
    }
}
