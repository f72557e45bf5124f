//! Built-in layouts.
//!
//! | type       | extra record keys                      | answer                         |
//! |------------|----------------------------------------|--------------------------------|
//! | `text`     | `hint`                                 | the trimmed text               |
//! | `radio`    | `answers`                              | value of the chosen option     |
//! | `checkbox` | `answers`                              | chosen values joined with `;`  |
//! | `scale`    | `min`, `max`, `minLabel`, `maxLabel`   | the chosen number              |
//!
//! `answers` is an array of strings, or of objects with a `text` and an
//! optional `value`. Without a `value` the text is logged.

use serde_json::Value;

use crate::{
    ChoiceOption, Container, NEXT_BUTTON_ID, QuestionRecord, RecordError, WidgetId, json_type_name,
};

mod checkbox;
mod radio;
mod scale;
mod text;

pub use checkbox::{ANSWER_SEPARATOR, CheckboxLayout};
pub use radio::RadioLayout;
pub use scale::ScaleLayout;
pub use text::TextLayout;

/// Id of the single input widget every built-in layout adds.
pub const ANSWER_WIDGET_ID: WidgetId = WidgetId(1);

/// Key holding the options of choice questions.
pub const JSON_KEY_ANSWERS: &str = "answers";

/// Read the non-empty option list of a choice question.
pub(crate) fn parse_options(record: &QuestionRecord) -> Result<Vec<ChoiceOption>, RecordError> {
    let items = record
        .opt_array(JSON_KEY_ANSWERS)?
        .ok_or_else(|| RecordError::MissingKey(JSON_KEY_ANSWERS.to_string()))?;

    if items.is_empty() {
        return Err(RecordError::InvalidValue {
            key: JSON_KEY_ANSWERS.to_string(),
            message: "at least one option is required".to_string(),
        });
    }

    items.iter().map(parse_option).collect()
}

fn parse_option(item: &Value) -> Result<ChoiceOption, RecordError> {
    match item {
        Value::String(text) => Ok(ChoiceOption::plain(text.clone())),
        Value::Object(fields) => {
            let option = QuestionRecord::new(fields.clone());
            let text = option.get_str("text")?;
            let value = match option.get("value") {
                None | Some(Value::Null) => text.to_string(),
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(other) => {
                    return Err(RecordError::WrongType {
                        key: "value".to_string(),
                        expected: "string or number",
                        actual: json_type_name(other),
                    });
                }
            };
            Ok(ChoiceOption::new(text, value))
        }
        other => Err(RecordError::WrongType {
            key: JSON_KEY_ANSWERS.to_string(),
            expected: "string or object",
            actual: json_type_name(other),
        }),
    }
}

/// Show the Next button once `answered` holds, hide it otherwise.
pub(crate) fn show_next_if(container: &mut Container, answered: bool) {
    if let Some(next) = container.find_mut(NEXT_BUTTON_ID) {
        next.set_visible(answered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(answers: Value) -> QuestionRecord {
        QuestionRecord::from_value(json!({
            "type": "radio",
            "key": "k",
            "question": "q",
            "answers": answers
        }))
        .unwrap()
    }

    #[test]
    fn string_and_object_options() {
        let options = parse_options(&record(json!([
            "plain",
            {"text": "Labelled", "value": "l"},
            {"text": "Numbered", "value": 3},
            {"text": "Bare"}
        ])))
        .unwrap();

        assert_eq!(
            options,
            vec![
                ChoiceOption::plain("plain"),
                ChoiceOption::new("Labelled", "l"),
                ChoiceOption::new("Numbered", "3"),
                ChoiceOption::plain("Bare"),
            ]
        );
    }

    #[test]
    fn empty_options_are_rejected() {
        let err = parse_options(&record(json!([]))).unwrap_err();
        assert!(matches!(err, RecordError::InvalidValue { .. }));
    }

    #[test]
    fn option_without_text_is_rejected() {
        let err = parse_options(&record(json!([{"value": "x"}]))).unwrap_err();
        assert!(matches!(err, RecordError::MissingKey(ref key) if key == "text"));
    }

    #[test]
    fn missing_answers_key() {
        let rec = QuestionRecord::from_value(json!({"type": "radio", "key": "k", "question": "q"}))
            .unwrap();
        assert!(parse_options(&rec).is_err());
    }
}
