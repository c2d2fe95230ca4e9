/// Евристичний аналіз тексту на предмет наявності тегів
///
/// Двофазний фільтр: спочатку необхідна умова (основа кожного слова тега
/// зустрічається в тексті як підрядок), потім підтвердження через зважену
/// редакційну відстань між словами тексту та словами тега
use crate::stemmer::Stemmer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[\p{L}\p{N}]+\b").unwrap());

// Вартості операцій: заміна вдвічі дорожча за вставку/видалення,
// щоб терпіти флективний дрейф закінчень, але карати заміну літер
const INSERT_COST: usize = 1;
const DELETE_COST: usize = 1;
const SUBSTITUTE_COST: usize = 2;

/// Поріг підтвердження збігу
pub const MAX_EDIT_DISTANCE: usize = 4;

// Для нечіткого порівняння беруться тільки слова тексту довші за 3 літери
const MIN_FUZZY_WORD_LEN: usize = 3;

pub struct TagAnalyzer {
    // Теги в нижньому регістрі; порожні відкинуті, але вихідні
    // індекси збережені, бо саме вони повертаються назовні
    tags: Vec<(usize, String)>,
    text: String,
    stemmer: Stemmer,
}

impl TagAnalyzer {
    pub fn new(tags: &[String], text: &str, stemmer: Stemmer) -> Self {
        let tags = tags
            .iter()
            .enumerate()
            .map(|(key, tag)| (key, tag.to_lowercase()))
            .filter(|(_, tag)| !tag.is_empty())
            .collect();

        Self {
            tags,
            text: text.to_lowercase(),
            stemmer,
        }
    }

    /// Повертає індекси тегів, знайдених у тексті, в порядку вихідного
    /// списку. None = невалідні вхідні дані (порожні теги або текст),
    /// на відміну від Some(порожній список)
    pub fn analyze(&self) -> Option<Vec<usize>> {
        if self.tags.is_empty() || self.text.is_empty() {
            return None;
        }

        let text_words = self.extract_text_words();
        let mut found = Vec::new();

        for (key, tag) in &self.tags {
            let tag_words: Vec<&str> = tag.split_whitespace().collect();

            // Фаза 1: основа кожного слова тега має бути підрядком тексту.
            // Тег без жодного слова проходить тривіально, але відсіюється
            // фазою 2, бо там немає жодної пари для підтвердження
            let all_stems_present = tag_words
                .iter()
                .all(|word| self.text.contains(&self.stemmer.stem(word)));

            if !all_stems_present {
                continue;
            }

            // Фаза 2: хоч одна пара (слово тексту, слово тега)
            // в межах порогу редакційної відстані
            let confirmed = text_words.iter().any(|text_word| {
                tag_words
                    .iter()
                    .any(|tag_word| weighted_distance(text_word, tag_word) <= MAX_EDIT_DISTANCE)
            });

            if confirmed {
                found.push(*key);
            }
        }

        Some(found)
    }

    // Унікальні слова тексту довші за 3 літери (текст вже в нижньому регістрі)
    fn extract_text_words(&self) -> HashSet<String> {
        WORD_REGEX
            .find_iter(&self.text)
            .map(|word_match| word_match.as_str().to_string())
            .filter(|word| word.chars().count() > MIN_FUZZY_WORD_LEN)
            .collect()
    }
}

/// Зважена редакційна відстань: вставка 1, видалення 1, заміна 2
pub fn weighted_distance(first: &str, second: &str) -> usize {
    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();

    let mut previous_row: Vec<usize> = (0..=second.len()).map(|j| j * INSERT_COST).collect();
    let mut current_row = vec![0usize; second.len() + 1];

    for i in 1..=first.len() {
        current_row[0] = i * DELETE_COST;

        for j in 1..=second.len() {
            let substitution = previous_row[j - 1]
                + if first[i - 1] == second[j - 1] {
                    0
                } else {
                    SUBSTITUTE_COST
                };
            let deletion = previous_row[j] + DELETE_COST;
            let insertion = current_row[j - 1] + INSERT_COST;

            current_row[j] = substitution.min(deletion).min(insertion);
        }

        std::mem::swap(&mut previous_row, &mut current_row);
    }

    previous_row[second.len()]
}
