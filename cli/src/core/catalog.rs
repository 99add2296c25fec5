//! # Course Catalog
//!
//! File: cli/src/core/catalog.rs
//!
//! The three course tiers advertised on the landing page. The chat fallback
//! points users here, and both `tradingpro courses` and `GET /api/courses`
//! render it.
//!
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CourseTier {
    pub title: String,
    pub price: String,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// Highlighted as the most popular tier.
    #[serde(default)]
    pub popular: bool,
}

fn tier(
    title: &str,
    price: &str,
    duration: &str,
    description: &str,
    features: &[&str],
    popular: bool,
) -> CourseTier {
    CourseTier {
        title: title.to_string(),
        price: price.to_string(),
        duration: duration.to_string(),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        popular,
    }
}

pub fn default_courses() -> Vec<CourseTier> {
    vec![
        tier(
            "Базовый курс",
            "15,000₽",
            "4 недели",
            "Идеально для новичков. Изучите основы трейдинга, технический анализ и управление рисками.",
            &[
                "Основы трейдинга",
                "Технический анализ",
                "Управление рисками",
                "Торговые платформы",
                "Психология трейдинга",
            ],
            false,
        ),
        tier(
            "Продвинутый курс",
            "30,000₽",
            "8 недель",
            "Для тех, кто хочет углубить знания. Продвинутые стратегии и работа с реальными сделками.",
            &[
                "Продвинутые стратегии",
                "Работа с индикаторами",
                "Фундаментальный анализ",
                "Практика на реальном счете",
                "Личный наставник",
            ],
            true,
        ),
        tier(
            "Профессиональный",
            "50,000₽",
            "12 недель",
            "Станьте профессиональным трейдером. Алгоритмическая торговля и управление портфелем.",
            &[
                "Алгоритмическая торговля",
                "Управление портфелем",
                "Работа с большими объемами",
                "VIP поддержка",
                "Сертификат",
            ],
            false,
        ),
    ]
}
