//! # que
//!
//! Run JSON-defined questionnaires one question at a time. Frontend-agnostic.
//!
//! A questionnaire is a JSON array of records. Each record names a layout
//! `type`; the [`LayoutRegistry`] maps that type to a [`QuestionLayout`] which
//! renders the question into a [`Container`]. Pressing Next logs the answer
//! and renders the following record, until the last one has been answered and
//! the "questionnaire finished" preference is set.
//!
//! ## Usage
//!
//! ```rust
//! use que::{AnswerLog, Container, LayoutRegistry, MemoryPreferences, Progress, Questionnaire};
//!
//! let json = r#"[
//!     {"type": "radio", "key": "mood", "question": "How do you feel?",
//!      "answers": ["good", "bad"]}
//! ]"#;
//!
//! let mut container = Container::new();
//! let mut questionnaire = Questionnaire::new(
//!     AnswerLog::new(),
//!     MemoryPreferences::new(),
//!     LayoutRegistry::with_builtin_layouts(),
//! );
//!
//! let progress = questionnaire.load_json(json, &mut container).unwrap();
//! assert_eq!(progress, Progress::Question { step: 0 });
//! ```
//!
//! ## Record keys
//!
//! Every record needs:
//! - `type` - The layout to render it with
//! - `key` - The key its answer is logged under
//! - `question` - The question text
//!
//! and may carry `instruction`, plus whatever its layout reads (see [`layouts`]).
//!
//! ## Frontends
//!
//! Frontends show the container, change input widgets, call
//! [`Questionnaire::input_changed`] and [`Questionnaire::next`]:
//! - `que-dialoguer` - Terminal prompts via dialoguer
//! - [`ScriptedDriver`] - Pre-defined input for tests

// Re-export all types from que-types
pub use que_types::*;

mod layout;
pub use layout::{DefaultLayout, LayoutContext, QuestionLayout};

mod registry;
pub use registry::{LayoutBuildError, LayoutFactory, LayoutRegistry};

pub mod layouts;

mod questionnaire;
pub use questionnaire::{Progress, Questionnaire, QuestionnaireError};

mod file_preferences;
pub use file_preferences::FilePreferences;

mod config;
pub use config::QueConfig;

// Scripted driver for running questionnaires without user interaction
mod scripted;
pub use scripted::{ScriptError, ScriptedDriver, ScriptedInput};
