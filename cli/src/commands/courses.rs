//! # TradingPro Course Catalog Command
//!
//! File: cli/src/commands/courses.rs
//!
//! `tradingpro courses` prints the course tiers the chat fallback points people to.
//! `--json` emits the same data the `srv` API serves at `/api/courses`.
//!
use crate::core::catalog::CourseTier;
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct CoursesArgs {
    /// Print the catalog as JSON.
    #[arg(long)]
    json: bool,
}

fn render_catalog(courses: &[CourseTier]) -> String {
    let mut out = String::new();
    for course in courses {
        let badge = if course.popular { "  [Популярный]" } else { "" };
        out.push_str(&format!("{}{}\n", course.title, badge));
        out.push_str(&format!("  {} · {}\n", course.price, course.duration));
        out.push_str(&format!("  {}\n", course.description));
        for feature in &course.features {
            out.push_str(&format!("  - {}\n", feature));
        }
        out.push('\n');
    }
    out
}

pub async fn handle_courses(args: CoursesArgs, config: &Config) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(&config.courses)
            .context("Failed to serialize course catalog")?;
        println!("{}", json);
    } else {
        print!("{}", render_catalog(&config.courses));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::default_courses;

    #[test]
    fn test_render_marks_popular_tier() {
        let rendered = render_catalog(&default_courses());
        assert!(rendered.contains("Продвинутый курс  [Популярный]"));
        assert!(rendered.contains("  15,000₽ · 4 недели"));
        assert!(rendered.contains("  - Сертификат"));
        assert!(!rendered.contains("Базовый курс  [Популярный]"));
    }

    #[test]
    fn test_render_empty_catalog() {
        assert_eq!(render_catalog(&[]), "");
    }
}
