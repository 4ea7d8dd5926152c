//! Parent linking
//!
//! Resolves `motherName` / `fatherName` against the same list. The first
//! record carrying a given name wins, so duplicate names resolve the way a
//! front-to-back scan would.

use rayon::prelude::*;
use std::collections::HashMap;

use crate::components::{EnrichedPerson, Person};

/// Lists at or above this size are linked on the rayon pool.
const PARALLEL_THRESHOLD: usize = 4096;

/// Name -> first record with that name.
pub struct NameIndex<'a> {
    by_name: HashMap<&'a str, &'a Person>,
}

impl<'a> NameIndex<'a> {
    pub fn build(people: &'a [Person]) -> Self {
        let mut by_name = HashMap::with_capacity(people.len());
        for person in people {
            by_name.entry(person.name.as_str()).or_insert(person);
        }
        Self { by_name }
    }

    /// Empty or missing references never resolve.
    pub fn resolve(&self, name: Option<&str>) -> Option<&'a Person> {
        match name {
            Some(name) if !name.is_empty() => self.by_name.get(name).copied(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn enrich_one(index: &NameIndex<'_>, person: &Person) -> EnrichedPerson {
    EnrichedPerson {
        person: person.clone(),
        mother: index.resolve(person.mother_name.as_deref()).cloned(),
        father: index.resolve(person.father_name.as_deref()).cloned(),
    }
}

/// Attach resolved parents to every person, preserving list order.
pub fn link_parents(people: &[Person]) -> Vec<EnrichedPerson> {
    let index = NameIndex::build(people);

    if people.len() >= PARALLEL_THRESHOLD {
        people.par_iter().map(|p| enrich_one(&index, p)).collect()
    } else {
        people.iter().map(|p| enrich_one(&index, p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Sex;

    fn person(name: &str, mother: Option<&str>, father: Option<&str>) -> Person {
        Person {
            name: name.to_string(),
            sex: Sex::Female,
            born: 1800,
            died: 1860,
            mother_name: mother.map(str::to_string),
            father_name: father.map(str::to_string),
            slug: name.to_lowercase(),
        }
    }

    #[test]
    fn test_mother_resolves_to_full_record() {
        let people = vec![person("A", None, None), person("B", Some("A"), None)];
        let linked = link_parents(&people);

        assert_eq!(linked.len(), 2);
        assert_eq!(linked[1].mother.as_ref(), Some(&people[0]));
        assert!(linked[1].father.is_none());
        assert!(linked[0].mother.is_none());
    }

    #[test]
    fn test_unknown_and_empty_names_are_absent() {
        let people = vec![
            person("A", Some("Nobody"), Some("")),
            person("", None, None),
        ];
        let linked = link_parents(&people);

        assert!(linked[0].mother.is_none());
        assert!(linked[0].father.is_none());
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let mut first = person("A", None, None);
        first.born = 1700;
        let mut second = person("A", None, None);
        second.born = 1750;
        let people = vec![first.clone(), second, person("C", Some("A"), None)];

        let linked = link_parents(&people);
        assert_eq!(linked[2].mother.as_ref().map(|m| m.born), Some(1700));
    }

    #[test]
    fn test_order_preserved_on_parallel_path() {
        let people: Vec<Person> = (0..PARALLEL_THRESHOLD + 10)
            .map(|i| {
                let mother = if i > 0 { Some(format!("P{}", i - 1)) } else { None };
                person(&format!("P{}", i), mother.as_deref(), None)
            })
            .collect();

        let linked = link_parents(&people);
        for (i, p) in linked.iter().enumerate() {
            assert_eq!(p.name, format!("P{}", i));
            if i > 0 {
                assert_eq!(p.mother.as_ref().map(|m| m.name.clone()), Some(format!("P{}", i - 1)));
            }
        }
    }
}
