use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn country(id: &str, name: &str) -> CountryRecord {
    CountryRecord::new(id, name, &format!("https://flagcdn.com/{}.svg", id.to_lowercase()))
}

fn make_catalog(size: usize) -> Vec<CountryRecord> {
    (0..size)
        .map(|i| {
            let id: String = [(b'A' + (i / 26) as u8) as char, (b'A' + (i % 26) as u8) as char]
                .iter()
                .collect();
            country(&id, &format!("Country {}", i))
        })
        .collect()
}

fn scenario_a_catalog() -> Vec<CountryRecord> {
    vec![
        country("US", "United States"),
        country("CA", "Canada"),
        country("GB", "United Kingdom"),
        country("FR", "France"),
    ]
}

fn assert_well_formed(questions: &[Question], options_count: usize) {
    for (index, question) in questions.iter().enumerate() {
        assert_eq!(question.ordinal, index + 1);
        assert_eq!(question.options.len(), options_count);
        assert!(question.options.contains(&question.correct_answer));
        let distinct: HashSet<&String> = question.options.iter().collect();
        assert_eq!(distinct.len(), options_count);
    }
    let correct_answers: HashSet<&String> = questions.iter().map(|q| &q.correct_answer).collect();
    assert_eq!(correct_answers.len(), questions.len());
}

#[test]
fn four_countries_make_four_questions() {
    let catalog = scenario_a_catalog();
    let mut rng = StdRng::seed_from_u64(0);
    let questions = generate_questions(&catalog, &Settings::default(), &mut rng);

    assert_eq!(questions.len(), 4);
    assert_well_formed(&questions, 4);
    for question in &questions {
        let mut options = question.options.clone();
        options.sort();
        assert_eq!(
            options,
            vec!["Canada", "France", "United Kingdom", "United States"]
        );
    }
}

#[test]
fn fifteen_countries_make_ten_questions() {
    let catalog = make_catalog(15);
    let mut rng = StdRng::seed_from_u64(1);
    let questions = generate_questions(&catalog, &Settings::default(), &mut rng);
    assert_eq!(questions.len(), 10);
    assert_well_formed(&questions, 4);
}

#[test]
fn question_count_is_min_of_setting_and_catalog() {
    let mut rng = StdRng::seed_from_u64(2);
    for size in 4..30 {
        let catalog = make_catalog(size);
        let questions = generate_questions(&catalog, &Settings::default(), &mut rng);
        assert_eq!(questions.len(), size.min(10));
        assert_well_formed(&questions, 4);
    }
}

#[test]
fn too_few_countries_make_no_questions() {
    let mut rng = StdRng::seed_from_u64(3);
    for size in 0..4 {
        let catalog = make_catalog(size);
        assert!(generate_questions(&catalog, &Settings::default(), &mut rng).is_empty());
    }
}

#[test]
fn respects_settings() {
    let catalog = make_catalog(20);
    let settings = Settings {
        question_count: 5,
        options_count: 6,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(4);
    let questions = generate_questions(&catalog, &settings, &mut rng);
    assert_eq!(questions.len(), 5);
    assert_well_formed(&questions, 6);
}

#[test]
fn flag_matches_correct_answer() {
    let catalog = make_catalog(12);
    let mut rng = StdRng::seed_from_u64(5);
    for question in generate_questions(&catalog, &Settings::default(), &mut rng) {
        let country = catalog
            .iter()
            .find(|c| c.display_name == question.correct_answer)
            .unwrap();
        assert_eq!(question.flag_ref, country.flag_ref);
    }
}

#[test]
fn same_seed_same_questions() {
    let catalog = make_catalog(40);
    let settings = Settings::default();
    let first = generate_questions(&catalog, &settings, &mut StdRng::seed_from_u64(6));
    let second = generate_questions(&catalog, &settings, &mut StdRng::seed_from_u64(6));
    assert_eq!(first, second);
}

#[test]
fn duplicate_names_never_share_a_question() {
    let mut catalog = make_catalog(8);
    catalog.push(country("XA", "Country 0"));
    catalog.push(country("XB", "Country 1"));
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let questions = generate_questions(&catalog, &Settings::default(), &mut rng);
        assert!(!questions.is_empty());
        assert_well_formed(&questions, 4);
    }
}

#[test]
fn discards_questions_without_enough_distinct_names() {
    let catalog = vec![
        country("AA", "Atlantis"),
        country("AB", "Atlantis"),
        country("AC", "Atlantis"),
        country("AD", "Atlantis"),
        country("AE", "Lemuria"),
    ];
    let mut rng = StdRng::seed_from_u64(8);
    let questions = generate_questions(&catalog, &Settings::default(), &mut rng);
    assert!(questions.is_empty());
}

#[test]
fn options_are_shuffled_evenly() {
    let catalog = scenario_a_catalog();
    let settings = Settings {
        question_count: 1,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(9);
    let mut positions: HashMap<usize, usize> = HashMap::new();
    let trials = 2400;
    for _ in 0..trials {
        let questions = generate_questions(&catalog, &settings, &mut rng);
        let position = questions[0]
            .options
            .iter()
            .position(|o| o == "United States")
            .unwrap();
        *positions.entry(position).or_insert(0) += 1;
    }
    for position in 0..4 {
        let count = positions.get(&position).copied().unwrap_or(0);
        assert!(count > 450 && count < 750, "position {}: {}", position, count);
    }
}
