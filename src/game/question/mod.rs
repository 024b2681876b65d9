use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::catalog::CountryRecord;
use crate::game::settings::Settings;

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    pub ordinal: usize,
    pub flag_ref: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

fn pick_distractors<'a, R: Rng + ?Sized>(
    catalog: &'a [CountryRecord],
    correct: &CountryRecord,
    count: usize,
    rng: &mut R,
) -> Vec<&'a CountryRecord> {
    let mut available: Vec<&CountryRecord> =
        catalog.iter().filter(|c| c.id != correct.id).collect();
    let mut distractors: Vec<&CountryRecord> = Vec::with_capacity(count);

    while distractors.len() < count && !available.is_empty() {
        let index = rng.gen_range(0, available.len());
        let candidate = available.swap_remove(index);
        let collides = candidate.display_name == correct.display_name
            || distractors
                .iter()
                .any(|d| d.display_name == candidate.display_name);
        if !collides {
            distractors.push(candidate);
        }
    }

    distractors
}

/// Builds up to `settings.question_count` flag questions from the catalog.
/// Returns an empty list when the catalog holds fewer countries than a question has options.
pub fn generate_questions<R: Rng + ?Sized>(
    catalog: &[CountryRecord],
    settings: &Settings,
    rng: &mut R,
) -> Vec<Question> {
    let options_count = settings.options_count;
    if options_count == 0 || catalog.len() < options_count {
        debug!(
            "Not enough countries to generate quiz ({} < {})",
            catalog.len(),
            options_count
        );
        return Vec::new();
    }

    let target_count = settings.question_count.min(catalog.len());
    let mut used_ids: HashSet<&str> = HashSet::new();
    let mut used_names: HashSet<&str> = HashSet::new();
    let mut questions = Vec::with_capacity(target_count);

    for _ in 0..target_count {
        let unused: Vec<&CountryRecord> = catalog
            .iter()
            .filter(|c| !used_ids.contains(c.id.as_str()))
            .filter(|c| !used_names.contains(c.display_name.as_str()))
            .collect();
        let correct = match unused.choose(rng) {
            Some(country) => *country,
            None => break,
        };
        used_ids.insert(&correct.id);
        used_names.insert(&correct.display_name);

        let distractors = pick_distractors(catalog, correct, options_count - 1, rng);
        if distractors.len() < options_count - 1 {
            debug!(
                "Discarding question for `{}`: only {} distinct distractors",
                correct.id,
                distractors.len()
            );
            continue;
        }

        let mut options: Vec<String> = Vec::with_capacity(options_count);
        options.push(correct.display_name.clone());
        options.extend(distractors.iter().map(|d| d.display_name.clone()));
        options.shuffle(rng);

        questions.push(Question {
            ordinal: questions.len() + 1,
            flag_ref: correct.flag_ref.clone(),
            correct_answer: correct.display_name.clone(),
            options,
        });
    }

    questions
}
