//! Scripted driver for running questionnaires without user interaction.
//!
//! `ScriptedDriver` plays the part of a frontend: for every question it fills
//! the input widget with the input scripted for the question's key, then
//! presses Next. This is useful for testing questionnaires and custom layouts.
//!
//! # Example
//!
//! ```rust
//! use que::{AnswerLog, Container, LayoutRegistry, MemoryPreferences, Questionnaire, ScriptedDriver};
//!
//! let mut container = Container::new();
//! let mut questionnaire = Questionnaire::new(
//!     AnswerLog::new(),
//!     MemoryPreferences::new(),
//!     LayoutRegistry::with_builtin_layouts(),
//! );
//! questionnaire
//!     .load_json(
//!         r#"[{"type": "text", "key": "name", "question": "Your name?"}]"#,
//!         &mut container,
//!     )
//!     .unwrap();
//!
//! ScriptedDriver::new()
//!     .with_text("name", "Ada")
//!     .run(&mut questionnaire, &mut container)
//!     .unwrap();
//!
//! assert!(questionnaire.is_finished());
//! assert_eq!(questionnaire.logging().get("name"), Some("Ada"));
//! ```

use std::collections::HashMap;

use log::debug;

use crate::{AnswerLogging, Container, Preferences, Questionnaire, QuestionnaireError, ViewError};

/// Input for one question.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedInput {
    /// Type into a text input.
    Text(String),
    /// Select one option of a choice.
    Choice(usize),
    /// Check these options of a multi choice.
    Choices(Vec<usize>),
    /// Set a scale.
    Scale(i64),
}

/// Error type for ScriptedDriver.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("No scripted input for '{0}' and its Next button is hidden")]
    MissingInput(String),

    #[error("Scripted input for '{key}' does not fit the question: {source}")]
    View {
        key: String,
        #[source]
        source: ViewError,
    },

    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
}

/// A driver that answers questions with pre-configured input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDriver {
    inputs: HashMap<String, ScriptedInput>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the input for the question with the given key.
    pub fn with_input(mut self, key: impl Into<String>, input: ScriptedInput) -> Self {
        self.inputs.insert(key.into(), input);
        self
    }

    pub fn with_text(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_input(key, ScriptedInput::Text(text.into()))
    }

    pub fn with_choice(self, key: impl Into<String>, index: usize) -> Self {
        self.with_input(key, ScriptedInput::Choice(index))
    }

    pub fn with_choices(self, key: impl Into<String>, indices: Vec<usize>) -> Self {
        self.with_input(key, ScriptedInput::Choices(indices))
    }

    pub fn with_scale(self, key: impl Into<String>, value: i64) -> Self {
        self.with_input(key, ScriptedInput::Scale(value))
    }

    /// Answer questions until the questionnaire finishes.
    ///
    /// Returns the number of Next presses. Questions without scripted input
    /// are confirmed as-is, which only works if their Next button is visible.
    pub fn run<A, P>(
        &self,
        questionnaire: &mut Questionnaire<A, P>,
        container: &mut Container,
    ) -> Result<usize, ScriptError>
    where
        A: AnswerLogging,
        P: Preferences,
    {
        if questionnaire.is_empty() {
            return Ok(0);
        }

        let mut presses = 0;
        while !questionnaire.is_finished() {
            let key = questionnaire
                .current_entity()
                .map(|entity| entity.key().to_string())
                .ok_or(QuestionnaireError::NotStarted)?;

            if let Some(input) = self.inputs.get(&key) {
                apply(input, questionnaire, container).map_err(|source| ScriptError::View {
                    key: key.clone(),
                    source,
                })?;
            }

            if !container.next_visible() {
                return Err(ScriptError::MissingInput(key));
            }

            debug!("Scripted answer for '{}'", key);
            questionnaire.next(container)?;
            presses += 1;
        }

        Ok(presses)
    }
}

fn apply<A, P>(
    input: &ScriptedInput,
    questionnaire: &mut Questionnaire<A, P>,
    container: &mut Container,
) -> Result<(), ViewError>
where
    A: AnswerLogging,
    P: Preferences,
{
    let Some(id) = container.input_ids().first().copied() else {
        return Ok(());
    };

    match input {
        ScriptedInput::Text(text) => container.set_text(id, text.clone())?,
        ScriptedInput::Choice(index) => container.select(id, *index)?,
        ScriptedInput::Choices(indices) => {
            for &index in indices {
                container.toggle(id, index)?;
            }
        }
        ScriptedInput::Scale(value) => container.set_scale(id, *value)?,
    }

    questionnaire.input_changed(container, id);
    Ok(())
}
