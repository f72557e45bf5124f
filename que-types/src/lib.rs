//! Core types for the que crate.
//!
//! This crate provides the foundational types for running questionnaires:
//! - `QuestionRecord` - One JSON object of a questionnaire array
//! - `QuestionEntity` - The basis data every question shows (key, text, instruction)
//! - `Container` and `Widget` - The toolkit-neutral view tree layouts render into
//! - `AnswerLogging` and `AnswerLog` - Where given answers end up
//! - `Preferences` - Persisted flags such as "questionnaire finished"

mod record;
pub use record::{
    JSON_KEY_INSTRUCTION, JSON_KEY_KEY, JSON_KEY_QUESTION, JSON_KEY_TYPE, QuestionRecord,
    json_type_name, parse_records,
};

mod entity;
pub use entity::QuestionEntity;

mod view;
pub use view::{ChoiceOption, Container, NEXT_BUTTON_ID, TextSize, Widget, WidgetId};

mod answer;
pub use answer::{AnswerLog, AnswerLogging, LoggedAnswer};

mod preferences;
pub use preferences::{MemoryPreferences, PREF_KEY_QUESTIONNAIRE_FINISHED, Preferences};

mod error;
pub use error::{PreferencesError, RecordError, ViewError};
