//! Sample Family Trees
//!
//! Random multi-generation people lists with real parent references, used by
//! the benchmark and for demos.

use rand::Rng;
use std::collections::HashSet;

use crate::components::{Person, Sex};

/// Common first names for males
const MALE_FIRST_NAMES: &[&str] = &[
    "Pieter", "Jan", "Carel", "Lieven", "Emile", "Carolus", "Jacobus", "Philibert",
    "Gillis", "Bernardus", "Willem", "Joos", "Gerard", "Hendrik", "Frans", "Adriaan",
    "Cornelis", "Dirk", "Maarten", "Joris", "Hubert", "Anton", "Lodewijk", "Karel",
];

/// Common first names for females
const FEMALE_FIRST_NAMES: &[&str] = &[
    "Maria", "Anna", "Elisabeth", "Clara", "Emma", "Joanna", "Livina", "Petronella",
    "Jacoba", "Martha", "Catharina", "Theresia", "Josephina", "Sophia", "Mathilde",
    "Margriet", "Johanna", "Cornelia", "Hendrika", "Agnes", "Barbara", "Helena",
];

/// Common last names
const LAST_NAMES: &[&str] = &[
    "Haverbeke", "van Brussel", "de Milliano", "van Hecke", "de Rycke", "Bernardus",
    "Claes", "Peeters", "Janssens", "Maes", "Jacobs", "Mertens", "Willems", "Goossens",
    "Wouters", "de Smet", "Dubois", "Lambert", "Dupont", "de Vries", "van Dijk",
];

/// Earliest founder birth year
const FOUNDER_BORN_FROM: i32 = 1500;

/// Share of people with no parents
const FOUNDER_RATIO: f64 = 0.1;

/// Chance that a parent reference names someone not in the list
const DANGLING_PARENT_RATE: f64 = 0.05;

/// Generate a random first name based on sex
pub fn random_first_name(sex: Sex) -> &'static str {
    let mut rng = rand::thread_rng();
    match sex {
        Sex::Male => MALE_FIRST_NAMES[rng.gen_range(0..MALE_FIRST_NAMES.len())],
        Sex::Female => FEMALE_FIRST_NAMES[rng.gen_range(0..FEMALE_FIRST_NAMES.len())],
    }
}

/// Generate a random last name
pub fn random_last_name() -> &'static str {
    let mut rng = rand::thread_rng();
    LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
}

/// URL slug: lowercase, words joined by `-`, birth year appended.
pub fn slugify(name: &str, born: i32) -> String {
    let words: Vec<String> = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!("{}-{}", words.join("-"), born)
}

/// Build `count` people. Names are unique, parents always precede children,
/// and a few parent references point at nobody.
pub fn generate_family_tree(count: usize) -> Vec<Person> {
    let mut rng = rand::thread_rng();
    let mut people: Vec<Person> = Vec::with_capacity(count);
    let mut taken: HashSet<String> = HashSet::with_capacity(count);
    let mut mothers: Vec<usize> = Vec::new();
    let mut fathers: Vec<usize> = Vec::new();

    let founders = ((count as f64 * FOUNDER_RATIO).ceil() as usize).max(2).min(count);

    for i in 0..count {
        let sex = if i < 2 {
            // seed one of each so children can always be paired
            if i == 0 { Sex::Female } else { Sex::Male }
        } else if rng.gen::<bool>() {
            Sex::Male
        } else {
            Sex::Female
        };

        let (born, last_name, mother_name, father_name) = if i < founders {
            (
                FOUNDER_BORN_FROM + rng.gen_range(0..60),
                random_last_name().to_string(),
                None,
                None,
            )
        } else {
            let mother = &people[mothers[rng.gen_range(0..mothers.len())]];
            let father = &people[fathers[rng.gen_range(0..fathers.len())]];
            let born = mother.born.max(father.born) + rng.gen_range(18..40);
            let last_name = surname_of(&father.name);
            let mother_name = if rng.gen::<f64>() < DANGLING_PARENT_RATE {
                format!("{} {}", random_first_name(Sex::Female), random_last_name())
            } else {
                mother.name.clone()
            };
            (born, last_name, Some(mother_name), Some(father.name.clone()))
        };

        let name = unique_name(&mut taken, random_first_name(sex), &last_name);
        let died = born + rng.gen_range(0..95);

        match sex {
            Sex::Female => mothers.push(people.len()),
            Sex::Male => fathers.push(people.len()),
        }

        people.push(Person {
            slug: slugify(&name, born),
            name,
            sex,
            born,
            died,
            mother_name,
            father_name,
        });
    }

    people
}

fn surname_of(full_name: &str) -> String {
    full_name
        .split_once(' ')
        .map(|(_, rest)| rest.trim_end_matches(|c: char| c == ')' || c.is_ascii_digit() || c == '(' || c == ' '))
        .unwrap_or(full_name)
        .to_string()
}

fn unique_name(taken: &mut HashSet<String>, first: &str, last: &str) -> String {
    let base = format!("{} {}", first, last);
    let mut name = base.clone();
    let mut n = 2;
    while !taken.insert(name.clone()) {
        name = format!("{} ({})", base, n);
        n += 1;
    }
    name
}
