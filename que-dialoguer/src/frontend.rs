//! Dialoguer frontend for the que view tree.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Input, MultiSelect, Select};
use log::debug;
use que::{
    AnswerLogging, ChoiceOption, Container, NEXT_BUTTON_ID, Preferences, Questionnaire,
    QuestionnaireError, TextSize, ViewError, Widget, WidgetId,
};
use thiserror::Error;

/// Error type for the Dialoguer frontend.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// User cancelled the questionnaire (e.g., pressed Ctrl+C).
    #[error("Questionnaire cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The questionnaire refused to advance.
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),

    /// A prompt result did not fit its widget.
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> FrontendError {
    if is_cancelled(&err) {
        FrontendError::Cancelled
    } else {
        FrontendError::Dialoguer(err)
    }
}

/// Terminal frontend that asks one question after the other.
#[derive(Debug, Clone)]
pub struct DialoguerFrontend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl Default for DialoguerFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerFrontend {
    /// Create a new frontend with the colorful theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a frontend with the plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    pub fn with_colors(colorful: bool) -> Self {
        Self { colorful }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    /// Show questions until the container is closed.
    ///
    /// The questionnaire must already have been started with
    /// `load_json` or `create_question`. Returns the number of answered questions.
    pub fn run<A, P>(
        &self,
        questionnaire: &mut Questionnaire<A, P>,
        container: &mut Container,
    ) -> Result<usize, FrontendError>
    where
        A: AnswerLogging,
        P: Preferences,
    {
        if questionnaire.is_empty() {
            println!("This questionnaire has no questions.");
            return Ok(0);
        }

        let mut answered = 0;
        while !container.is_closed() {
            println!();
            println!(
                "[{}/{}]",
                questionnaire.step() + 1,
                questionnaire.len()
            );
            print_texts(container);

            let inputs = container.input_ids();
            if inputs.is_empty() {
                self.ask_continue(container)?;
            }

            // Ask again until the layout accepts the answer and shows Next.
            while !inputs.is_empty() && !container.next_visible() {
                for &id in &inputs {
                    self.ask_widget(container, id)?;
                    questionnaire.input_changed(container, id);
                }
                if !container.next_visible() {
                    println!("Please answer the question to continue.");
                }
            }

            debug!("Pressing Next on step {}", questionnaire.step());
            questionnaire.next(container)?;
            answered += 1;
        }

        Ok(answered)
    }

    /// Prompt for one input widget and store the result in the container.
    fn ask_widget(&self, container: &mut Container, id: WidgetId) -> Result<(), FrontendError> {
        let Some(widget) = container.find(id).cloned() else {
            return Err(ViewError::UnknownWidget(id).into());
        };

        match widget {
            Widget::TextInput { hint, value, .. } => {
                let text = self.ask_text(hint.as_deref(), &value)?;
                container.set_text(id, text)?;
            }
            Widget::Choice {
                options, selected, ..
            } => {
                let index = self.ask_choice(&options, selected)?;
                container.select(id, index)?;
            }
            Widget::MultiChoice {
                options, selected, ..
            } => {
                let chosen = self.ask_multi_choice(&options, &selected)?;
                for (index, was_on) in selected.iter().enumerate() {
                    if chosen.contains(&index) != *was_on {
                        container.toggle(id, index)?;
                    }
                }
            }
            Widget::Scale {
                min,
                max,
                min_label,
                max_label,
                value,
                ..
            } => {
                let prompt = scale_prompt(min, max, min_label.as_deref(), max_label.as_deref());
                let number = self.ask_scale(&prompt, min, max, value)?;
                container.set_scale(id, number)?;
            }
            Widget::Text { .. } | Widget::Button { .. } => {}
        }

        Ok(())
    }

    fn ask_text(&self, hint: Option<&str>, current: &str) -> Result<String, FrontendError> {
        let theme = self.theme();
        let mut builder = Input::<String>::with_theme(theme.as_ref())
            .with_prompt(hint.unwrap_or("Answer"))
            .allow_empty(true);

        if !current.is_empty() {
            builder = builder.default(current.to_string());
        }

        builder.interact_text().map_err(prompt_error)
    }

    fn ask_choice(
        &self,
        options: &[ChoiceOption],
        selected: Option<usize>,
    ) -> Result<usize, FrontendError> {
        let theme = self.theme();
        let items: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();

        let mut builder = Select::with_theme(theme.as_ref())
            .with_prompt("Choose one")
            .items(&items);

        builder = builder.default(selected.unwrap_or(0));

        builder.interact().map_err(prompt_error)
    }

    fn ask_multi_choice(
        &self,
        options: &[ChoiceOption],
        selected: &[bool],
    ) -> Result<Vec<usize>, FrontendError> {
        let theme = self.theme();
        let items: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();

        MultiSelect::with_theme(theme.as_ref())
            .with_prompt("Choose any (space to toggle, enter to confirm)")
            .items(&items)
            .defaults(selected)
            .interact()
            .map_err(prompt_error)
    }

    fn ask_scale(
        &self,
        prompt: &str,
        min: i64,
        max: i64,
        current: Option<i64>,
    ) -> Result<i64, FrontendError> {
        let theme = self.theme();
        let mut builder = Input::<i64>::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .validate_with(move |value: &i64| -> Result<(), String> {
                if *value < min || *value > max {
                    return Err(format!("Value must be between {min} and {max}"));
                }
                Ok(())
            });

        if let Some(value) = current {
            builder = builder.default(value);
        }

        builder.interact_text().map_err(prompt_error)
    }

    /// Wait for Enter on questions without input widgets.
    fn ask_continue(&self, container: &Container) -> Result<(), FrontendError> {
        let label = match container.find(NEXT_BUTTON_ID) {
            Some(Widget::Button { label, .. }) => label.clone(),
            _ => "Next".to_string(),
        };

        let theme = self.theme();
        Input::<String>::with_theme(theme.as_ref())
            .with_prompt(format!("Press Enter: {label}"))
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        Ok(())
    }
}

fn print_texts(container: &Container) {
    for widget in container.widgets() {
        if let Widget::Text { content, size } = widget {
            if content.is_empty() {
                continue;
            }
            match size {
                TextSize::Question => println!("{content}"),
                TextSize::Instruction => println!("  {content}"),
            }
        }
    }
}

fn scale_prompt(min: i64, max: i64, min_label: Option<&str>, max_label: Option<&str>) -> String {
    let low = match min_label {
        Some(label) => format!("{min} = {label}"),
        None => min.to_string(),
    };
    let high = match max_label {
        Some(label) => format!("{max} = {label}"),
        None => max.to_string(),
    };
    format!("{low} .. {high}")
}
