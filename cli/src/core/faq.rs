//! # FAQ Keyword Responder
//!
//! File: cli/src/core/faq.rs
//!
//! ## Overview
//!
//! Maps free-text chat input to one canned answer. Matching is a case-insensitive
//! substring search: the input is lowercased, entries are scanned in declared order,
//! and the first entry with any keyword contained in the input wins. Input that
//! matches nothing gets the fallback message.
//!
//! There is no tokenization. A keyword that happens to be part of a longer word
//! still matches (`"курс"` matches `"курсы"`).
//!
//! ## Examples
//!
//! ```rust
//! let responder = FaqResponder::new(FaqConfig::default());
//! let answer = responder.respond("Сколько стоят курсы?");
//! assert!(answer.starts_with("Стоимость курсов"));
//! ```
//!
use serde::{Deserialize, Serialize};

pub const DEFAULT_FALLBACK: &str = "Спасибо за вопрос! Наш менеджер свяжется с вами в ближайшее время. А пока посмотрите наши курсы или оставьте заявку.";

/// One canned question/answer record with its trigger keywords.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FaqEntry {
    /// Display label. Not used for matching.
    pub question: String,
    /// Returned verbatim on match.
    pub answer: String,
    /// Lowercase trigger substrings, checked in order.
    pub keywords: Vec<String>,
}

impl FaqEntry {
    pub fn new(question: &str, answer: &str, keywords: &[&str]) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// First keyword contained in already-lowercased `text`.
    fn matching_keyword(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| lowered.contains(keyword))
    }
}

/// The immutable table handed to a [`FaqResponder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqConfig {
    pub entries: Vec<FaqEntry>,
    pub fallback: String,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

/// The built-in table for the TradingPro landing page.
pub fn default_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "Сколько стоят курсы?",
            "Стоимость курсов варьируется от 15,000₽ до 50,000₽ в зависимости от уровня. Базовый курс - 15,000₽, Продвинутый - 30,000₽, Профессиональный - 50,000₽.",
            &["стоимость", "цена", "сколько", "стоят", "курс"],
        ),
        FaqEntry::new(
            "Как долго длится обучение?",
            "Базовый курс - 4 недели, Продвинутый - 8 недель, Профессиональный - 12 недель. Доступ к материалам остается навсегда.",
            &["длительность", "сколько времени", "долго", "недель", "месяцев"],
        ),
        FaqEntry::new(
            "Нужен ли опыт?",
            "Нет, наш базовый курс рассчитан на полных новичков. Мы начинаем с основ и постепенно переходим к продвинутым стратегиям.",
            &["опыт", "новичок", "начинающий", "с нуля", "без опыта"],
        ),
        FaqEntry::new(
            "Есть ли поддержка?",
            "Да! Вы получаете доступ к закрытому чату с преподавателями и другими студентами. Также проводятся еженедельные вебинары с разбором вопросов.",
            &["поддержка", "помощь", "вопросы", "чат", "консультация"],
        ),
    ]
}

/// Result of a successful keyword scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqMatch<'a> {
    pub entry: &'a FaqEntry,
    /// Position of `entry` in the table.
    pub index: usize,
    pub keyword: &'a str,
}

/// Keyword-containment FAQ matcher. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct FaqResponder {
    config: FaqConfig,
}

impl FaqResponder {
    pub fn new(config: FaqConfig) -> Self {
        Self { config }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.config.entries
    }

    pub fn fallback(&self) -> &str {
        &self.config.fallback
    }

    /// Finds the first entry, in declared order, with a keyword contained in `text`.
    pub fn find_match(&self, text: &str) -> Option<FaqMatch<'_>> {
        let lowered = text.to_lowercase();
        self.config
            .entries
            .iter()
            .enumerate()
            .find_map(|(index, entry)| {
                entry
                    .matching_keyword(&lowered)
                    .map(|keyword| FaqMatch { entry, index, keyword })
            })
    }

    /// Returns the matched answer, or the fallback. Never fails.
    pub fn respond(&self, text: &str) -> &str {
        match self.find_match(text) {
            Some(found) => &found.entry.answer,
            None => &self.config.fallback,
        }
    }
}

impl Default for FaqResponder {
    fn default() -> Self {
        Self::new(FaqConfig::default())
    }
}
