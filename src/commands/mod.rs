use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::debug;
use rand::Rng;
use regex::Regex;
use unidecode::unidecode;

use crate::game::question::Question;
use crate::game::quiz::{Phase, Quiz};
use crate::output::GameOutput;


lazy_static! {
    static ref FORBIDDEN_GUESS_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

fn sanitize(answer: &str) -> String {
    let answer = unidecode(answer);
    FORBIDDEN_GUESS_CHARACTERS_REGEX
        .replace_all(&answer.to_lowercase(), "")
        .into()
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Answer(String),
    Next,
    Restart,
    Quit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    match line.to_lowercase().as_ref() {
        "" | "next" | "n" => Command::Next,
        "restart" | "again" | "r" => Command::Restart,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Answer(line.to_owned()),
    }
}

/// Maps typed input to one of the question's options, by number or by name.
pub fn resolve_answer<'a>(question: &'a Question, input: &str) -> Option<&'a str> {
    if let Ok(number) = input.trim().parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| question.options.get(index))
            .map(|option| option.as_str());
    }
    let sanitized_input = sanitize(input);
    if sanitized_input.is_empty() {
        return None;
    }
    question
        .options
        .iter()
        .find(|option| sanitize(option) == sanitized_input)
        .map(|option| option.as_str())
}

pub fn execute<O, R>(quiz: &mut Quiz<O, R>, command: Command) -> Result<Flow>
where
    O: GameOutput,
    R: Rng,
{
    match command {
        Command::Quit => return Ok(Flow::Quit),
        Command::Restart => quiz.restart(),
        Command::Next => {
            quiz.advance();
        }
        Command::Answer(input) => {
            let answer = match quiz.phase() {
                Phase::AwaitingAnswer(_) => {
                    let question = quiz
                        .current_question()
                        .ok_or_else(|| anyhow!("There is no active question"))?;
                    resolve_answer(question, &input)
                        .ok_or_else(|| anyhow!("`{}` is not one of the options", input))?
                        .to_owned()
                }
                _ => input,
            };
            if let Some(result) = quiz.submit_answer(&answer) {
                debug!("Answered `{}` (correct: {})", answer, result.is_correct);
            }
        }
    }
    Ok(Flow::Continue)
}
