/// Кеш основ слів, спільний між запитами та потоками
use std::collections::HashMap;
use std::sync::Mutex;

/// Мапа: нормалізоване слово -> основа
///
/// Значення ідемпотентні (одне слово завжди дає одну основу), тому гонка
/// читання-запису між потоками безпечна: програш лише повторює стемінг.
/// Кеш необмежений і живе весь час роботи процесу
pub struct StemCache {
    entries: Mutex<HashMap<String, String>>,
}

impl StemCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, word: &str) -> Option<String> {
        self.entries.lock().ok()?.get(word).cloned()
    }

    pub fn put(&self, word: &str, stem: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(word.to_string(), stem.to_string());
        }
    }

    /// Кількість закешованих слів (для статистики)
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
