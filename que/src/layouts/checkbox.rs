use crate::layouts::{ANSWER_WIDGET_ID, parse_options, show_next_if};
use crate::{
    ChoiceOption, Container, QuestionEntity, QuestionLayout, QuestionRecord, RecordError, Widget,
    WidgetId,
};

/// Separator between the values of a multiple choice answer.
pub const ANSWER_SEPARATOR: &str = ";";

/// Multiple choice from a list of options.
#[derive(Debug, Clone, Default)]
pub struct CheckboxLayout {
    options: Vec<ChoiceOption>,
}

impl CheckboxLayout {
    pub const TYPE: &'static str = "checkbox";

    fn chosen(container: &Container) -> Vec<&ChoiceOption> {
        match container.find(ANSWER_WIDGET_ID) {
            Some(Widget::MultiChoice {
                options, selected, ..
            }) => options
                .iter()
                .zip(selected)
                .filter(|(_, on)| **on)
                .map(|(option, _)| option)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl QuestionLayout for CheckboxLayout {
    fn layout_type(&self) -> &str {
        Self::TYPE
    }

    fn question(&mut self, record: &QuestionRecord) -> Result<QuestionEntity, RecordError> {
        self.options = parse_options(record)?;
        QuestionEntity::from_record(record)
    }

    fn add_question_layout(
        &mut self,
        container: &mut Container,
        _entity: &QuestionEntity,
        _next: &mut Widget,
    ) {
        container.add(Widget::multi_choice(ANSWER_WIDGET_ID, self.options.clone()));
    }

    fn input_changed(&mut self, container: &mut Container, id: WidgetId) {
        if id == ANSWER_WIDGET_ID {
            let answered = !Self::chosen(container).is_empty();
            show_next_if(container, answered);
        }
    }

    fn last_given_answer(&self, container: &Container) -> String {
        Self::chosen(container)
            .iter()
            .map(|option| option.value.as_str())
            .collect::<Vec<_>>()
            .join(ANSWER_SEPARATOR)
    }
}
