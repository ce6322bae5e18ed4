use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Language of every string the timer shows
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[value(name = "ru")]
    #[serde(alias = "ru")]
    Russian,
    #[value(name = "en")]
    #[serde(alias = "en")]
    English,
}

/// Static wording for one locale.
///
/// Templates use `{label}`, `{set}` and `{of}` placeholders, filled in by the
/// `*_text` helpers below.
#[derive(Debug)]
pub struct Strings {
    pub prepare: &'static str,
    pub blocks: [&'static str; 3],
    pub rest: &'static str,
    pub cool_down: &'static str,
    pub finish: &'static str,

    pub initial_stage: &'static str,
    pub initial_current: &'static str,
    pub complete_current: &'static str,
    pub complete_next: &'static str,

    pub work_stage: &'static str,
    pub work_current: &'static str,
    pub long_rest: &'static str,
    pub short_rest: &'static str,

    pub next_work: &'static str,
    pub next_rest: &'static str,
    pub next_prepare: &'static str,
    pub after_long_rest: &'static str,
    pub after_short_rest: &'static str,

    pub start: &'static str,
    pub restart: &'static str,
    pub started_at: &'static str,
}

static RUSSIAN: Strings = Strings {
    prepare: "Подготовка",
    blocks: ["Прыжки", "Приседания", "Бёрпи"],
    rest: "Отдых",
    cool_down: "Шавасана",
    finish: "Завершение",

    initial_stage: "Готовы начать?",
    initial_current: "Нажмите Старт",
    complete_current: "Тренировка завершена. Отличная работа!",
    complete_next: "Нажмите «Заново», чтобы начать снова",

    work_stage: "Упражнение • {label}",
    work_current: "{label} — подход {set}/{of}",
    long_rest: "Длинный отдых",
    short_rest: "Короткий отдых",

    next_work: "Дальше: {label}",
    next_rest: "Дальше: отдых",
    next_prepare: "Дальше: подготовка",
    after_long_rest: "После: длинный отдых",
    after_short_rest: "После: короткий отдых",

    start: "Старт",
    restart: "Заново",
    started_at: "Начало",
};

static ENGLISH: Strings = Strings {
    prepare: "Get ready",
    blocks: ["Jumping Jacks", "Squats", "Burpees"],
    rest: "Rest",
    cool_down: "Savasana",
    finish: "Completion",

    initial_stage: "Ready to begin?",
    initial_current: "Press Start",
    complete_current: "Workout complete. Great job!",
    complete_next: "Press «Restart» to go again",

    work_stage: "Exercise • {label}",
    work_current: "{label} — set {set}/{of}",
    long_rest: "Long rest",
    short_rest: "Short rest",

    next_work: "Next: {label}",
    next_rest: "Next: rest",
    next_prepare: "Next: get ready",
    after_long_rest: "After: long rest",
    after_short_rest: "After: short rest",

    start: "Start",
    restart: "Restart",
    started_at: "Started",
};

impl Locale {
    pub fn strings(&self) -> &'static Strings {
        match self {
            Locale::Russian => &RUSSIAN,
            Locale::English => &ENGLISH,
        }
    }
}

impl Strings {
    pub fn work_stage_text(&self, label: &str) -> String {
        self.work_stage.replace("{label}", label)
    }

    pub fn work_current_text(&self, label: &str, set: u32, of: u32) -> String {
        self.work_current
            .replace("{label}", label)
            .replace("{set}", &set.to_string())
            .replace("{of}", &of.to_string())
    }

    pub fn next_work_text(&self, label: &str) -> String {
        self.next_work.replace("{label}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_russian() {
        assert_eq!(Locale::default(), Locale::Russian);
        assert_eq!(Locale::default().strings().finish, "Завершение");
    }

    #[test]
    fn test_work_current_text() {
        let ru = Locale::Russian.strings();
        assert_eq!(ru.work_current_text("Прыжки", 2, 4), "Прыжки — подход 2/4");

        let en = Locale::English.strings();
        assert_eq!(en.work_current_text("Squats", 4, 4), "Squats — set 4/4");
    }

    #[test]
    fn test_stage_and_preview_templates() {
        let ru = Locale::Russian.strings();
        assert_eq!(ru.work_stage_text("Бёрпи"), "Упражнение • Бёрпи");
        assert_eq!(ru.next_work_text("Бёрпи"), "Дальше: Бёрпи");
    }

    #[test]
    fn test_locale_serde_names() {
        assert_eq!(serde_json::to_string(&Locale::English).unwrap(), "\"english\"");
        let parsed: Locale = serde_json::from_str("\"ru\"").unwrap();
        assert_eq!(parsed, Locale::Russian);
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::Russian.to_string(), "Russian");
        assert_eq!(Locale::English.to_string(), "English");
    }
}
