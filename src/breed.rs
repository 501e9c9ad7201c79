//! Fuzzy matching of user-typed pet breeds against static canonical lists.

use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{MockupError, MockupResult};

pub static DOG_BREEDS: &[&str] = &[
    "Labrador Retriever",
    "Golden Retriever",
    "German Shepherd",
    "French Bulldog",
    "Bulldog",
    "Poodle",
    "Beagle",
    "Rottweiler",
    "Dachshund",
    "Yorkshire Terrier",
    "Boxer",
    "Siberian Husky",
    "Cavalier King Charles Spaniel",
    "Shih Tzu",
    "Border Collie",
    "Australian Shepherd",
    "Pembroke Welsh Corgi",
    "Doberman Pinscher",
    "Great Dane",
    "Miniature Schnauzer",
    "Pomeranian",
    "Chihuahua",
    "Boston Terrier",
    "Bernese Mountain Dog",
    "Shiba Inu",
    "Cocker Spaniel",
    "Maltese",
    "Havanese",
    "Pug",
    "Greyhound",
    "Whippet",
    "Jack Russell Terrier",
    "Staffordshire Bull Terrier",
    "Samoyed",
    "Akita",
    "Bichon Frise",
    "Basset Hound",
    "Vizsla",
    "Weimaraner",
    "Newfoundland",
    "Saint Bernard",
    "Dalmatian",
    "Mixed Breed",
];

pub static CAT_BREEDS: &[&str] = &[
    "Domestic Shorthair",
    "Domestic Longhair",
    "Maine Coon",
    "Ragdoll",
    "Persian",
    "British Shorthair",
    "Siamese",
    "Bengal",
    "Sphynx",
    "Abyssinian",
    "Scottish Fold",
    "Russian Blue",
    "Norwegian Forest Cat",
    "Birman",
    "Exotic Shorthair",
    "Devon Rex",
    "Cornish Rex",
    "Oriental Shorthair",
    "Burmese",
    "Tonkinese",
    "Savannah",
    "Turkish Angora",
    "Siberian",
    "American Shorthair",
    "Himalayan",
    "Mixed Breed",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn breeds(self) -> &'static [&'static str] {
        match self {
            Self::Dog => DOG_BREEDS,
            Self::Cat => CAT_BREEDS,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        })
    }
}

impl FromStr for Species {
    type Err = MockupError;

    fn from_str(s: &str) -> MockupResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dog" => Ok(Self::Dog),
            "cat" => Ok(Self::Cat),
            other => Err(MockupError::validation(format!(
                "unknown species '{other}' (expected dog or cat)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum BreedMatch {
    Exact { name: &'static str },
    Suggestion { name: &'static str, distance: usize },
    Unknown,
}

/// Lowercase, treat `-`/`_` as spaces and collapse runs of whitespace.
pub fn normalize_breed(input: &str) -> String {
    input
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Edit distance over chars (insert, delete, substitute all cost 1).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        cur[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let sub = prev[j] + usize::from(ca != cb);
            cur[j + 1] = sub.min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

#[tracing::instrument(level = "debug", ret)]
pub fn validate_breed(input: &str, species: Species) -> BreedMatch {
    let needle = normalize_breed(input);
    if needle.is_empty() {
        return BreedMatch::Unknown;
    }

    let mut best: Option<(&'static str, usize)> = None;
    for &name in species.breeds() {
        let d = levenshtein(&needle, &normalize_breed(name));
        if d == 0 {
            return BreedMatch::Exact { name };
        }
        // Strict `<` keeps the earliest entry on ties.
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((name, d));
        }
    }

    let threshold = (needle.chars().count() / 4).max(2);
    match best {
        Some((name, distance)) if distance <= threshold => BreedMatch::Suggestion { name, distance },
        _ => BreedMatch::Unknown,
    }
}
