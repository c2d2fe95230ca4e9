/// Модуль для стемінгу (нормалізації) російських слів за алгоритмом Портера
/// Використовується аналізатором тегів для порівняння словоформ
use crate::stem_cache::StemCache;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static RUSSIAN_VOWELS: &str = "аеиоуыэюя";

// Таблиці суфіксів впорядковані від найдовшого до найкоротшого,
// перший збіг виграє. true = суфікс знімається тільки якщо
// безпосередньо перед ним стоїть а або я (в межах RV-зони)
static PERFECTIVE_GERUND_SUFFIXES: &[(&str, bool)] = &[
    ("ившись", false),
    ("ывшись", false),
    ("вшись", true),
    ("ивши", false),
    ("ывши", false),
    ("вши", true),
    ("ив", false),
    ("ыв", false),
    ("в", true),
];

static REFLEXIVE_SUFFIXES: &[(&str, bool)] = &[("ся", false), ("сь", false)];

static ADJECTIVE_SUFFIXES: &[(&str, bool)] = &[
    ("ими", false),
    ("ыми", false),
    ("ому", false),
    ("его", false),
    ("ого", false),
    ("еых", false),
    ("ее", false),
    ("ие", false),
    ("ые", false),
    ("ое", false),
    ("ей", false),
    ("ий", false),
    ("их", false),
    ("ый", false),
    ("ой", false),
    ("ем", false),
    ("им", false),
    ("ым", false),
    ("ом", false),
    ("ую", false),
    ("юю", false),
    ("ая", false),
    ("яя", false),
    ("ою", false),
    ("ею", false),
];

static PARTICIPLE_SUFFIXES: &[(&str, bool)] = &[
    ("ивш", false),
    ("ывш", false),
    ("ующ", false),
    ("ем", true),
    ("нн", true),
    ("вш", true),
    ("ющ", true),
    ("щ", true),
];

static VERB_SUFFIXES: &[(&str, bool)] = &[
    ("ейте", false),
    ("уйте", false),
    ("ила", false),
    ("ыла", false),
    ("ена", false),
    ("ите", false),
    ("или", false),
    ("ыли", false),
    ("ены", false),
    ("ить", false),
    ("ыть", false),
    ("ишь", false),
    ("ете", true),
    ("йте", true),
    ("ешь", true),
    ("нно", true),
    ("ей", false),
    ("уй", false),
    ("ил", false),
    ("ыл", false),
    ("им", false),
    ("ым", false),
    ("ую", false),
    ("ла", true),
    ("на", true),
    ("ли", true),
    ("ем", true),
    ("ло", true),
    ("но", true),
    ("ет", true),
    ("ют", true),
    ("ны", true),
    ("ть", true),
    ("ю", false),
    ("й", true),
    ("л", true),
    ("н", true),
];

static NOUN_SUFFIXES: &[(&str, bool)] = &[
    ("ович", false),
    ("овна", false),
    ("иями", false),
    ("кин", false),
    ("ями", false),
    ("ами", false),
    ("ией", false),
    ("ев", false),
    ("ов", false),
    ("ин", false),
    ("ий", false),
    ("ие", false),
    ("ье", false),
    ("еи", false),
    ("ии", false),
    ("ей", false),
    ("ой", false),
    ("ию", false),
    ("ью", false),
    ("ия", false),
    ("ья", false),
    ("а", false),
    ("е", false),
    ("у", false),
    ("и", false),
    ("й", false),
    ("ы", false),
    ("ь", false),
    ("ю", false),
    ("я", false),
];

static SUPERLATIVE_SUFFIXES: &[(&str, bool)] = &[("ейше", false), ("ейш", false)];

// Словотвірна форма: не-голосна, голосні, не-голосні, голосна, далі будь-що
// до кінцевого ость/ост. Друга гілка покриває випадок, коли "о" суфікса
// одночасно служить четвертою голосною форми
static DERIVATIONAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "(?:[^аеиоуыэюя][аеиоуыэюя]+[^аеиоуыэюя]+[аеиоуыэюя].*ость?$)",
        "|(?:[^аеиоуыэюя][аеиоуыэюя]+[^аеиоуыэюя]+ость?$)",
    ))
    .unwrap()
});

/// Стеммер Портера для російської мови
///
/// Знімає флективні та частину словотвірних суфіксів. Кеш (якщо заданий)
/// спільний між викликами та потоками, значення ідемпотентні за ключем,
/// тому втрачене оновлення лише повторює роботу
pub struct Stemmer {
    cache: Option<Arc<StemCache>>,
}

impl Stemmer {
    pub fn new() -> Self {
        Self { cache: None }
    }

    pub fn with_cache(cache: Arc<StemCache>) -> Self {
        Self { cache: Some(cache) }
    }

    /// Виконує стемінг слова (приведення до основи)
    pub fn stem(&self, word: &str) -> String {
        // Нормалізація: нижній регістр та ё -> е, це ж і ключ кешу
        let word = word.to_lowercase().replace('ё', "е");

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&word) {
                return hit;
            }
        }

        // Слово без голосної повертається без змін
        let stem = match split_rv(&word) {
            Some((head, rv)) => {
                let rv = step1(rv);
                let rv = step2(&rv);
                let rv = step3(&rv);
                let rv = step4(&rv);
                format!("{}{}", head, rv)
            }
            None => word.clone(),
        };

        if let Some(cache) = &self.cache {
            cache.put(&word, &stem);
        }

        stem
    }
}

/// Розбиває слово на незмінну основу (до першої голосної включно)
/// та RV-зону, яка підлягає зніманню суфіксів
fn split_rv(word: &str) -> Option<(&str, &str)> {
    for (pos, ch) in word.char_indices() {
        if RUSSIAN_VOWELS.contains(ch) {
            let head_end = pos + ch.len_utf8();
            return Some((&word[..head_end], &word[head_end..]));
        }
    }
    None
}

/// Знімає перший суфікс з таблиці, який збігається з кінцем RV-зони.
/// Повертає нову RV-зону та ознаку чи відбулося знімання
fn strip_suffix_from_table(rv: &str, table: &[(&str, bool)]) -> (String, bool) {
    for &(suffix, requires_av_before) in table {
        if let Some(rest) = rv.strip_suffix(suffix) {
            if requires_av_before {
                // Умовні суфікси знімаються тільки після а/я; якщо суфікс
                // збігся з усією RV-зоною, умова не виконана
                match rest.chars().last() {
                    Some('а') | Some('я') => {}
                    _ => continue,
                }
            }
            return (rest.to_string(), true);
        }
    }
    (rv.to_string(), false)
}

// Крок 1: дієприслівник, інакше зворотний суфікс, потім або
// прикметник + дієприкметник, або дієслово, або іменник
fn step1(rv: &str) -> String {
    let (stripped, changed) = strip_suffix_from_table(rv, PERFECTIVE_GERUND_SUFFIXES);
    if changed {
        return stripped;
    }

    let (rv, _) = strip_suffix_from_table(rv, REFLEXIVE_SUFFIXES);

    let (after_adjective, changed) = strip_suffix_from_table(&rv, ADJECTIVE_SUFFIXES);
    if changed {
        let (after_participle, _) = strip_suffix_from_table(&after_adjective, PARTICIPLE_SUFFIXES);
        return after_participle;
    }

    let (after_verb, changed) = strip_suffix_from_table(&rv, VERB_SUFFIXES);
    if changed {
        return after_verb;
    }

    // Іменник перевіряється тільки якщо дієслівний суфікс не знявся
    let (after_noun, _) = strip_suffix_from_table(&rv, NOUN_SUFFIXES);
    after_noun
}

// Крок 2: кінцева "и"
fn step2(rv: &str) -> String {
    rv.strip_suffix('и').unwrap_or(rv).to_string()
}

// Крок 3: ость/ост, тільки якщо RV-зона має словотвірну форму
fn step3(rv: &str) -> String {
    if DERIVATIONAL_REGEX.is_match(rv) {
        if let Some(rest) = rv.strip_suffix("ость") {
            return rest.to_string();
        }
        if let Some(rest) = rv.strip_suffix("ост") {
            return rest.to_string();
        }
    }
    rv.to_string()
}

// Крок 4: м'який знак, інакше найвищий ступінь та подвійна "нн"
fn step4(rv: &str) -> String {
    if let Some(rest) = rv.strip_suffix('ь') {
        return rest.to_string();
    }

    let (rv, _) = strip_suffix_from_table(rv, SUPERLATIVE_SUFFIXES);
    if let Some(rest) = rv.strip_suffix("нн") {
        return format!("{}н", rest);
    }
    rv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_nouns() {
        let stemmer = Stemmer::new();
        assert_eq!(stemmer.stem("старика"), "старик");
        assert_eq!(stemmer.stem("ивана"), "ива");
        // Родовий відмінок знімає тільки "а", називний знімає "ович"
        assert_eq!(stemmer.stem("петровича"), "петрович");
        assert_eq!(stemmer.stem("петрович"), "петр");
    }

    #[test]
    fn test_stem_lowercases_input() {
        let stemmer = Stemmer::new();
        assert_eq!(stemmer.stem("сТаРиК"), stemmer.stem("старик"));
        assert_eq!(stemmer.stem("ИВАН"), stemmer.stem("иван"));
    }

    #[test]
    fn test_stem_yo_normalization() {
        let stemmer = Stemmer::new();
        // ё та е мають давати однакову основу
        assert_eq!(stemmer.stem("всё"), stemmer.stem("все"));
        assert_eq!(stemmer.stem("ёлка"), stemmer.stem("елка"));
    }

    #[test]
    fn test_stem_no_vowel_returns_unchanged() {
        let stemmer = Stemmer::new();
        assert_eq!(stemmer.stem("вскрк"), "вскрк");
        assert_eq!(stemmer.stem("мгрщ"), "мгрщ");
        assert_eq!(stemmer.stem("xyz"), "xyz");
    }

    #[test]
    fn test_stem_is_deterministic() {
        let stemmer = Stemmer::new();
        for word in ["разбудил", "петровича", "красивейший", "умываться"] {
            assert_eq!(stemmer.stem(word), stemmer.stem(word));
        }
    }

    #[test]
    fn test_restemming_may_reduce_further() {
        let stemmer = Stemmer::new();
        // Основа не завжди нерухома точка: кінцева голосна основи може
        // знятися повторним проходом як іменникове закінчення
        assert_eq!(stemmer.stem("ивана"), "ива");
        assert_eq!(stemmer.stem("ива"), "ив");
        // Типові основи на приголосну стабільні
        assert_eq!(stemmer.stem("старик"), "старик");
        assert_eq!(stemmer.stem("разбуд"), "разбуд");
    }

    #[test]
    fn test_stem_is_prefix_preserving() {
        let stemmer = Stemmer::new();
        // Стеммер тільки знімає суфікси, початок слова недоторканний
        for word in ["старика", "разбудил", "ивана", "красивейший"] {
            let stem = stemmer.stem(word);
            assert!(word.starts_with(&stem), "{} -> {}", word, stem);
        }
    }

    #[test]
    fn test_stem_verbs() {
        let stemmer = Stemmer::new();
        assert_eq!(stemmer.stem("разбудил"), "разбуд");
        assert_eq!(stemmer.stem("читала"), "чита");
    }

    #[test]
    fn test_stem_reflexive_and_gerund() {
        let stemmer = Stemmer::new();
        // Зворотний суфікс знімається разом з дієслівним
        assert_eq!(stemmer.stem("умываться"), "умыва");
        // Дієприслівник знімається одним кроком, далі гілка 1 завершується
        assert_eq!(stemmer.stem("прочитавши"), "прочита");
    }

    #[test]
    fn test_stem_derivational() {
        let stemmer = Stemmer::new();
        // Словотвірний суфікс знімається тільки при повній формі в RV-зоні
        assert_eq!(stemmer.stem("возможность"), "возможн");
        // Тут форми немає (одна голосна в RV-зоні), ость залишається
        assert_eq!(stemmer.stem("важность"), "важност");
    }

    #[test]
    fn test_stem_superlative() {
        let stemmer = Stemmer::new();
        assert_eq!(stemmer.stem("красивейший"), "красив");
    }

    #[test]
    fn test_stem_with_cache_matches_without() {
        let cache = Arc::new(StemCache::new());
        let cached = Stemmer::with_cache(cache.clone());
        let plain = Stemmer::new();

        for word in ["старика", "петровича", "шум", "умываться", "ИВАНА"] {
            let first = cached.stem(word);
            let second = cached.stem(word);
            assert_eq!(first, second);
            assert_eq!(first, plain.stem(word));
        }

        assert!(cache.len() > 0);
    }

    #[test]
    fn test_cache_key_collapses_yo() {
        let cache = Arc::new(StemCache::new());
        let stemmer = Stemmer::with_cache(cache.clone());

        assert_eq!(stemmer.stem("всё"), stemmer.stem("все"));
        // Обидві поверхневі форми мають потрапити в один запис кешу
        assert_eq!(cache.len(), 1);
    }
}
