use anyhow::{anyhow, Result};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead};
use std::process;

mod catalog;
mod commands;
mod game;
mod output;

use crate::catalog::{BundledCatalog, FallbackCatalog, FileCatalog, RemoteCatalog};
use crate::commands::{Command, Flow};
use crate::game::quiz::{Phase, Quiz};
use crate::game::settings::Settings;
use crate::output::terminal::TerminalGameOutput;
use crate::output::{GameOutput, Message};

fn build_supplier(settings: &Settings) -> FallbackCatalog {
    if let Some(path) = &settings.catalog_path {
        return FallbackCatalog::new(Box::new(FileCatalog::new(path)));
    }
    if settings.offline {
        return FallbackCatalog::new(Box::new(BundledCatalog));
    }

    match FileCatalog::cached() {
        Ok(cache) => {
            let remote = RemoteCatalog::new(settings).with_cache(FileCatalog::new(cache.path()));
            FallbackCatalog::new(Box::new(remote))
                .or_else(Box::new(cache))
                .or_else(Box::new(BundledCatalog))
        }
        Err(e) => {
            info!("Country list will not be cached: {:#}", e);
            FallbackCatalog::new(Box::new(RemoteCatalog::new(settings)))
                .or_else(Box::new(BundledCatalog))
        }
    }
}

fn run() -> Result<()> {
    let settings = Settings::from_env()?;
    let output = TerminalGameOutput::stdout();

    output.print("Loading country data...");
    let supplied = build_supplier(&settings).supply()?;
    info!("Starting quiz with {} countries", supplied.catalog.len());

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    output.say(&Message::QuizRules);
    if supplied.used_fallback {
        output.say(&Message::OfflineData);
    }

    let mut quiz = Quiz::new(supplied.catalog, settings, rng, output.clone());
    if *quiz.phase() == Phase::Empty {
        return Err(anyhow!("Not enough countries to start a quiz"));
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let command = commands::parse(&line?);
        let is_answer = matches!(command, Command::Answer(_));
        let is_next = command == Command::Next;
        match commands::execute(&mut quiz, command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => (),
            Err(e) => {
                output.print(&e.to_string());
                continue;
            }
        }

        let view = quiz.view();
        if view.is_complete {
            if is_next {
                output.print("Type `restart` to play again or `quit` to leave.");
            }
            continue;
        }
        if let (true, Some(selected), Some(feedback)) =
            (is_answer, view.selected_answer, &view.feedback)
        {
            debug!("Question {} answered `{}`: {}", view.ordinal, selected, feedback);
            let prompt = match view.question {
                Some(question) if question.ordinal < view.total => {
                    "Press Enter for the next question."
                }
                _ => "Press Enter to finish the quiz.",
            };
            output.print(&format!("Score: {} / {}\n{}", view.score, view.answered, prompt));
        }
    }

    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(e) = run() {
        error!("{:#}", e);
        process::exit(1);
    }
}
