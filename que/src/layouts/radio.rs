use crate::layouts::{ANSWER_WIDGET_ID, parse_options, show_next_if};
use crate::{
    ChoiceOption, Container, QuestionEntity, QuestionLayout, QuestionRecord, RecordError, Widget,
    WidgetId,
};

/// Single choice from a list of options.
#[derive(Debug, Clone, Default)]
pub struct RadioLayout {
    options: Vec<ChoiceOption>,
}

impl RadioLayout {
    pub const TYPE: &'static str = "radio";

    fn chosen(container: &Container) -> Option<&ChoiceOption> {
        match container.find(ANSWER_WIDGET_ID) {
            Some(Widget::Choice {
                options,
                selected: Some(index),
                ..
            }) => options.get(*index),
            _ => None,
        }
    }
}

impl QuestionLayout for RadioLayout {
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
        container.add(Widget::Choice {
            id: ANSWER_WIDGET_ID,
            options: self.options.clone(),
            selected: None,
        });
    }

    fn input_changed(&mut self, container: &mut Container, id: WidgetId) {
        if id == ANSWER_WIDGET_ID {
            let answered = Self::chosen(container).is_some();
            show_next_if(container, answered);
        }
    }

    fn last_given_answer(&self, container: &Container) -> String {
        Self::chosen(container)
            .map(|option| option.value.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutContext;
    use serde_json::json;

    #[test]
    fn answer_is_value_of_chosen_option() {
        let record = QuestionRecord::from_value(json!({
            "type": "radio",
            "key": "mood",
            "question": "How do you feel?",
            "answers": [{"text": "Good", "value": "1"}, {"text": "Bad", "value": "0"}]
        }))
        .unwrap();

        let mut layout = RadioLayout::default();
        let entity = layout.question(&record).unwrap();
        let mut container = Container::new();
        layout.create_question_layout(&mut container, &entity, &LayoutContext::default());

        assert!(!container.next_visible());
        assert_eq!(layout.last_given_answer(&container), "");

        container.select(ANSWER_WIDGET_ID, 1).unwrap();
        layout.input_changed(&mut container, ANSWER_WIDGET_ID);

        assert!(container.next_visible());
        assert_eq!(layout.last_given_answer(&container), "0");
    }
}
