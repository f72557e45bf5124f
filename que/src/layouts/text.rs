use crate::layouts::{ANSWER_WIDGET_ID, show_next_if};
use crate::{
    Container, QuestionEntity, QuestionLayout, QuestionRecord, RecordError, Widget, WidgetId,
};

/// Free text answer.
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    hint: Option<String>,
}

impl TextLayout {
    pub const TYPE: &'static str = "text";

    fn current_text(container: &Container) -> &str {
        match container.find(ANSWER_WIDGET_ID) {
            Some(Widget::TextInput { value, .. }) => value.trim(),
            _ => "",
        }
    }
}

impl QuestionLayout for TextLayout {
    fn layout_type(&self) -> &str {
        Self::TYPE
    }

    fn question(&mut self, record: &QuestionRecord) -> Result<QuestionEntity, RecordError> {
        self.hint = record.opt_str("hint")?.map(str::to_string);
        QuestionEntity::from_record(record)
    }

    fn add_question_layout(
        &mut self,
        container: &mut Container,
        _entity: &QuestionEntity,
        _next: &mut Widget,
    ) {
        container.add(Widget::TextInput {
            id: ANSWER_WIDGET_ID,
            hint: self.hint.clone(),
            value: String::new(),
        });
    }

    fn input_changed(&mut self, container: &mut Container, id: WidgetId) {
        if id == ANSWER_WIDGET_ID {
            let answered = !Self::current_text(container).is_empty();
            show_next_if(container, answered);
        }
    }

    fn last_given_answer(&self, container: &Container) -> String {
        Self::current_text(container).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutContext;
    use serde_json::json;

    fn render() -> (TextLayout, Container) {
        let record = QuestionRecord::from_value(json!({
            "type": "text",
            "key": "name",
            "question": "Your name?",
            "hint": "First name"
        }))
        .unwrap();

        let mut layout = TextLayout::default();
        let entity = layout.question(&record).unwrap();
        let mut container = Container::new();
        layout.create_question_layout(&mut container, &entity, &LayoutContext::default());
        (layout, container)
    }

    #[test]
    fn renders_input_with_hint_and_hidden_next() {
        let (_, container) = render();

        assert!(matches!(
            container.find(ANSWER_WIDGET_ID),
            Some(Widget::TextInput { hint: Some(hint), .. }) if hint == "First name"
        ));
        assert!(!container.next_visible());
    }

    #[test]
    fn blank_text_keeps_next_hidden() {
        let (mut layout, mut container) = render();

        container.set_text(ANSWER_WIDGET_ID, "   ").unwrap();
        layout.input_changed(&mut container, ANSWER_WIDGET_ID);
        assert!(!container.next_visible());

        container.set_text(ANSWER_WIDGET_ID, "  Ada ").unwrap();
        layout.input_changed(&mut container, ANSWER_WIDGET_ID);
        assert!(container.next_visible());
        assert_eq!(layout.last_given_answer(&container), "Ada");
    }
}
