//! Bad word filtering of user prompts.
//!
//! The [`ProfanityFilter`] trait is the seam used by the
//! [`Completer`](crate::completion::Completer); [`WordFilter`] implements it with
//! a case insensitive whole-word list.

use log::debug;
use regex::{Captures, Regex};

/// Words banned out of the box, extended through the `filter.words`
/// configuration.
const DEFAULT_WORDS: &[&str] = &[
    "arse", "ass", "asshole", "bastard", "bitch", "bollocks", "crap", "cunt", "damn", "dick",
    "fuck", "fucking", "piss", "prick", "shit", "slut", "twat", "wank", "whore",
];

/// Placeholder replacing every character of a banned word.
const PLACEHOLDER: &str = "*";

/// A pure text filter.
pub trait ProfanityFilter {
    /// Whether `text` contains at least one banned word.
    fn is_profane(&self, text: &str) -> bool;
    /// Returns `text` with every banned word masked.
    fn clean(&self, text: &str) -> String;
}

/// Whole-word, case insensitive filter.
///
/// Words are only matched on word boundaries, `class` is not masked because
/// of `ass`.
///
/// # Examples
///
/// ```
/// let filter = WordFilter::new(&[]).unwrap();
/// assert_eq!(filter.clean("Oh crap, a turtle"), "Oh ****, a turtle");
/// ```
pub struct WordFilter {
    /// `None` when the word list is empty
    regex: Option<Regex>,
}

impl WordFilter {
    /// Builds a filter from the built-in list plus `extra_words`.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined pattern exceeds the regex size limit.
    pub fn new(extra_words: &[String]) -> Result<Self, regex::Error> {
        let words: Vec<&str> = DEFAULT_WORDS
            .iter()
            .copied()
            .chain(extra_words.iter().map(String::as_str))
            .filter(|word| !word.trim().is_empty())
            .collect();

        Self::from_words(&words)
    }

    fn from_words(words: &[&str]) -> Result<Self, regex::Error> {
        if words.is_empty() {
            return Ok(WordFilter { regex: None });
        }

        let alternatives = words
            .iter()
            .map(|word| regex::escape(word.trim()))
            .collect::<Vec<String>>()
            .join("|");
        let regex = Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives))?;

        debug!("word filter built with {} words", words.len());

        Ok(WordFilter { regex: Some(regex) })
    }
}

impl ProfanityFilter for WordFilter {
    fn is_profane(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(text))
    }

    fn clean(&self, text: &str) -> String {
        match &self.regex {
            Some(regex) => regex
                .replace_all(text, |caps: &Captures| {
                    PLACEHOLDER.repeat(caps[0].chars().count())
                })
                .into_owned(),
            None => text.to_owned(),
        }
    }
}
