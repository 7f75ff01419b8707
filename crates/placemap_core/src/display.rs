//! User-facing Ukrainian text for the UI shell.

use crate::model::location::Category;
use crate::model::timestamp::parse_created_at;
use chrono::Datelike;

const GENITIVE_MONTHS: [&str; 12] = [
    "січня",
    "лютого",
    "березня",
    "квітня",
    "травня",
    "червня",
    "липня",
    "серпня",
    "вересня",
    "жовтня",
    "листопада",
    "грудня",
];

pub const DELETE_DIALOG_TITLE: &str = "Підтвердження видалення";
pub const CONFIRM_TEXT: &str = "Підтвердити";
pub const CANCEL_TEXT: &str = "Скасувати";
pub const DELETE_TEXT: &str = "Видалити";

pub fn category_label(category: Category) -> &'static str {
    category.label()
}

/// Long Ukrainian date, e.g. `1 січня 2024 р.`.
///
/// Input that does not parse as a date is returned unchanged.
pub fn format_date(created_at: &str) -> String {
    match parse_created_at(created_at) {
        Some(instant) => {
            let date = instant.date_naive();
            let month = GENITIVE_MONTHS[date.month0() as usize];
            format!("{} {month} {} р.", date.day(), date.year())
        }
        None => created_at.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Default,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: &'static str,
    pub cancel_text: &'static str,
    pub kind: DialogKind,
}

/// Neutral confirmation dialog with the default button texts.
pub fn confirmation(title: impl Into<String>, message: impl Into<String>) -> ConfirmationDialog {
    ConfirmationDialog {
        title: title.into(),
        message: message.into(),
        confirm_text: CONFIRM_TEXT,
        cancel_text: CANCEL_TEXT,
        kind: DialogKind::Default,
    }
}

/// Dialog shown before a location is deleted.
pub fn delete_confirmation(location_name: &str) -> ConfirmationDialog {
    ConfirmationDialog {
        title: DELETE_DIALOG_TITLE.to_string(),
        message: format!(
            "Ви впевнені, що хочете видалити локацію \"{location_name}\"? Цю дію не можна буде скасувати."
        ),
        confirm_text: DELETE_TEXT,
        cancel_text: CANCEL_TEXT,
        kind: DialogKind::Danger,
    }
}

#[cfg(test)]
mod tests {
    use super::{category_label, confirmation, delete_confirmation, format_date, DialogKind};
    use crate::model::location::Category;
    use rstest::rstest;

    #[rstest]
    #[case::date_only("2024-01-01", "1 січня 2024 р.")]
    #[case::rfc3339("2023-11-14T22:13:20.123Z", "14 листопада 2023 р.")]
    #[case::december("2024-12-31", "31 грудня 2024 р.")]
    #[case::garbage("not a date", "not a date")]
    fn formats_long_ukrainian_dates(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_date(input), expected);
    }

    #[test]
    fn delete_dialog_names_the_location() {
        let dialog = delete_confirmation("ЦУМ");
        assert_eq!(dialog.title, "Підтвердження видалення");
        assert!(dialog.message.contains("\"ЦУМ\""));
        assert_eq!(dialog.confirm_text, "Видалити");
        assert_eq!(dialog.kind, DialogKind::Danger);
    }

    #[test]
    fn neutral_dialog_uses_default_buttons() {
        let dialog = confirmation("Скинути фільтри", "Очистити пошук і категорії?");
        assert_eq!(dialog.confirm_text, "Підтвердити");
        assert_eq!(dialog.cancel_text, "Скасувати");
        assert_eq!(dialog.kind, DialogKind::Default);
    }

    #[test]
    fn labels_are_ukrainian() {
        assert_eq!(category_label(Category::Shop), "Магазин");
        assert_eq!(category_label(Category::Other), "Інше");
    }
}
