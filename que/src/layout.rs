use crate::{
    Container, NEXT_BUTTON_ID, QuestionEntity, QuestionRecord, RecordError, Widget, WidgetId,
};

/// Settings shared by all layouts of a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutContext {
    /// Label of the Next button.
    pub next_label: String,
}

impl LayoutContext {
    pub fn new(next_label: impl Into<String>) -> Self {
        Self {
            next_label: next_label.into(),
        }
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new("Next")
    }
}

/// Builds the widgets for one type of question.
///
/// A fresh layout is created for every question, so implementations may keep
/// whatever they parsed in [`question`](Self::question) for use in the later
/// calls.
pub trait QuestionLayout {
    /// The type name this layout is registered under.
    fn layout_type(&self) -> &str;

    /// Reads the question from its record.
    ///
    /// The default reads the basis entity only.
    fn question(&mut self, record: &QuestionRecord) -> Result<QuestionEntity, RecordError> {
        QuestionEntity::from_record(record)
    }

    /// Adds the type-specific widgets below the question and instruction text.
    ///
    /// `next` is added after these widgets; it starts hidden and the layout
    /// decides whether to show it right away.
    fn add_question_layout(
        &mut self,
        container: &mut Container,
        entity: &QuestionEntity,
        next: &mut Widget,
    );

    /// Builds the Next button, adds the layout's widgets, then the button.
    fn create_question_layout(
        &mut self,
        container: &mut Container,
        entity: &QuestionEntity,
        context: &LayoutContext,
    ) {
        let mut next = Widget::button(NEXT_BUTTON_ID, context.next_label.clone());
        self.add_question_layout(container, entity, &mut next);
        container.add(next);
    }

    /// Called by frontends after the user changed the widget `id`.
    fn input_changed(&mut self, _container: &mut Container, _id: WidgetId) {}

    /// The answer currently given in the container.
    fn last_given_answer(&self, container: &Container) -> String;
}

/// Fallback for records whose type has no (working) layout.
///
/// Shows only the question text and a visible Next button; logs an empty answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLayout;

impl QuestionLayout for DefaultLayout {
    fn layout_type(&self) -> &str {
        ""
    }

    fn add_question_layout(
        &mut self,
        _container: &mut Container,
        _entity: &QuestionEntity,
        next: &mut Widget,
    ) {
        next.set_visible(true);
    }

    fn last_given_answer(&self, _container: &Container) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_shows_next_and_answers_nothing() {
        let entity = QuestionEntity::new("k", "Question?", "", "unknown");
        let mut container = Container::new();

        DefaultLayout.create_question_layout(
            &mut container,
            &entity,
            &LayoutContext::new("Weiter"),
        );

        assert_eq!(
            container.widgets(),
            &[Widget::Button {
                id: NEXT_BUTTON_ID,
                label: "Weiter".to_string(),
                visible: true,
            }]
        );
        assert_eq!(DefaultLayout.last_given_answer(&container), "");
        assert_eq!(DefaultLayout.layout_type(), "");
    }
}
