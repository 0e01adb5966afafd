//! Values already handed out by earlier generations.

use std::collections::HashMap;
use std::fmt;

use crate::extract::{ExtractedCard, Field};

/// A tracked attribute class.
///
/// Gender has no category: it is drawn fresh for every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Profession,
    Age,
    Health,
    Hobby,
    Phobia,
    Fact,
    Card,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Profession,
        Self::Age,
        Self::Health,
        Self::Hobby,
        Self::Phobia,
        Self::Fact,
        Self::Card,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Profession => "professions",
            Self::Age => "ages",
            Self::Health => "health",
            Self::Hobby => "hobbies",
            Self::Phobia => "phobias",
            Self::Fact => "facts",
            Self::Card => "cards",
        }
    }

    /// Heading used in exclusion directives.
    #[must_use]
    pub const fn prompt_label(&self) -> &'static str {
        match self {
            Self::Profession => "Профессии",
            Self::Age => "Возраст",
            Self::Health => "Состояние здоровья",
            Self::Hobby => "Хобби",
            Self::Phobia => "Фобии",
            Self::Fact => "Смешные факты",
            Self::Card => "Карты",
        }
    }

    /// Category fed by an extracted field, if any.
    #[must_use]
    pub const fn for_field(field: Field) -> Option<Self> {
        match field {
            Field::Profession => Some(Self::Profession),
            Field::Age => Some(Self::Age),
            Field::Health => Some(Self::Health),
            Field::Hobby => Some(Self::Hobby),
            Field::Phobia => Some(Self::Phobia),
            Field::Fact => Some(Self::Fact),
            Field::Card => Some(Self::Card),
            Field::Gender => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category sets of previously produced values.
///
/// Each category keeps insertion order and holds no duplicates. Values are
/// trimmed on insert and empty values are rejected.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: HashMap<Category, Vec<String>>,
}

impl ValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, returning `true` if it was not present.
    pub fn insert(&mut self, category: Category, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        let entries = self.values.entry(category).or_default();
        if entries.iter().any(|v| v == value) {
            return false;
        }

        entries.push(value.to_string());
        true
    }

    #[must_use]
    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.values
            .get(&category)
            .is_some_and(|entries| entries.iter().any(|v| v == value.trim()))
    }

    /// Values of a category in insertion order.
    #[must_use]
    pub fn values(&self, category: Category) -> &[String] {
        self.values.get(&category).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        self.values(category).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.values().all(Vec::is_empty)
    }

    /// Fold backend-derived fields into their categories.
    ///
    /// Age and gender are pinned by the generator, so extracted copies of them
    /// are ignored. Returns the number of newly added values.
    pub fn fold(&mut self, card: &ExtractedCard) -> usize {
        let mut added = 0;

        for (field, value) in card.iter() {
            if matches!(field, Field::Age | Field::Gender) {
                continue;
            }
            if let Some(category) = Category::for_field(field) {
                if self.insert(category, value) {
                    added += 1;
                }
            }
        }

        added
    }

    /// Forget every value of one category.
    pub(crate) fn clear(&mut self, category: Category) {
        self.values.remove(&category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FieldExtractor;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn extract(text: &str) -> ExtractedCard {
        FieldExtractor::with_defaults()
            .expect("default table should compile")
            .extract(text)
    }

    #[test]
    fn test_insert_trims_and_deduplicates() {
        let mut store = ValueStore::new();

        assert!(store.insert(Category::Hobby, "  шахматы "));
        assert!(!store.insert(Category::Hobby, "шахматы"));
        assert!(!store.insert(Category::Hobby, "   "));
        assert!(store.insert(Category::Hobby, "бег"));

        assert_eq!(store.values(Category::Hobby), ["шахматы", "бег"]);
        assert!(store.contains(Category::Hobby, "шахматы"));
        assert!(!store.contains(Category::Phobia, "шахматы"));
    }

    #[test]
    fn test_empty_store() {
        let store = ValueStore::new();
        assert!(store.is_empty());
        for category in Category::ALL {
            assert!(store.values(category).is_empty());
        }
    }

    #[test]
    fn test_fold_skips_age_and_gender() {
        let mut store = ValueStore::new();
        let card = extract("Возраст: 34\nПол: Женский\nХобби: рисование\nФобия: пауки");

        assert_eq!(store.fold(&card), 2);
        assert_eq!(store.values(Category::Hobby), ["рисование"]);
        assert_eq!(store.values(Category::Phobia), ["пауки"]);
        assert!(store.values(Category::Age).is_empty());
    }

    #[test]
    fn test_fold_adds_only_new_values() {
        let mut store = ValueStore::new();
        store.insert(Category::Profession, "Врач");

        let card = extract("Профессия: Врач\nКарта: Иммунитет");
        assert_eq!(store.fold(&card), 1);
        assert_eq!(store.values(Category::Profession), ["Врач"]);
        assert_eq!(store.values(Category::Card), ["Иммунитет"]);
    }

    #[test]
    fn test_clear_single_category() {
        let mut store = ValueStore::new();
        store.insert(Category::Age, "30");
        store.insert(Category::Hobby, "бег");

        store.clear(Category::Age);
        assert_eq!(store.len(Category::Age), 0);
        assert_eq!(store.len(Category::Hobby), 1);
    }
}
