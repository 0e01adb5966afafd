//! Labeled-line extraction for generated character cards.
//!
//! Backend output is loosely formatted prose, so every field is matched
//! independently against its own line pattern. A field that does not match is
//! simply left out of the result.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// A named attribute of a character card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Profession,
    Age,
    Health,
    Hobby,
    Phobia,
    Fact,
    Gender,
    Card,
}

impl Field {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Profession => "profession",
            Self::Age => "age",
            Self::Health => "health",
            Self::Hobby => "hobby",
            Self::Phobia => "phobia",
            Self::Fact => "fact",
            Self::Gender => "gender",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a label captures after its colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Everything up to the end of the line.
    Line,
    /// A run of ASCII digits.
    Digits,
}

/// One row of the extraction table.
#[derive(Debug, Clone, Copy)]
pub struct FieldPattern {
    pub field: Field,
    pub label: &'static str,
    pub capture: Capture,
}

impl FieldPattern {
    const fn new(field: Field, label: &'static str, capture: Capture) -> Self {
        Self {
            field,
            label,
            capture,
        }
    }

    /// Regex source for this row. Any whitespace except a newline may separate
    /// the colon from the value, so a match never continues onto the next line.
    #[must_use]
    pub fn regex_source(&self) -> String {
        let value = match self.capture {
            Capture::Line => r"(\S[^\n]*)",
            Capture::Digits => r"(\d+)",
        };
        format!(r"{}:[^\S\n]*{value}", regex::escape(self.label))
    }
}

/// Labels used by the built-in card prompt.
pub const FIELD_PATTERNS: &[FieldPattern] = &[
    FieldPattern::new(Field::Profession, "Профессия", Capture::Line),
    FieldPattern::new(Field::Age, "Возраст", Capture::Digits),
    FieldPattern::new(Field::Health, "Состояние здоровья", Capture::Line),
    FieldPattern::new(Field::Hobby, "Хобби", Capture::Line),
    FieldPattern::new(Field::Phobia, "Фобия", Capture::Line),
    FieldPattern::new(Field::Fact, "Смешной факт", Capture::Line),
    FieldPattern::new(Field::Gender, "Пол", Capture::Line),
    FieldPattern::new(Field::Card, "Карта", Capture::Line),
];

/// Fields recovered from one backend response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedCard {
    values: HashMap<Field, String>,
}

impl ExtractedCard {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

/// Compiled extraction table.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    patterns: Vec<(Field, Regex)>,
}

impl FieldExtractor {
    /// Compile an extraction table.
    ///
    /// # Errors
    /// Returns an error if a row produces an invalid regex.
    pub fn new(table: &[FieldPattern]) -> Result<Self, regex::Error> {
        let patterns = table
            .iter()
            .map(|row| Ok((row.field, Regex::new(&row.regex_source())?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { patterns })
    }

    /// Compile [`FIELD_PATTERNS`].
    pub fn with_defaults() -> Result<Self, regex::Error> {
        Self::new(FIELD_PATTERNS)
    }

    /// Extract every field whose label appears in `text`.
    ///
    /// The first non-empty match per field wins; values are trimmed.
    #[must_use]
    pub fn extract(&self, text: &str) -> ExtractedCard {
        let mut card = ExtractedCard::default();

        for (field, regex) in &self.patterns {
            let value = regex
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .find(|v| !v.is_empty());

            if let Some(value) = value {
                card.values.entry(*field).or_insert_with(|| value.to_string());
            }
        }

        card
    }
}
