use crate::layouts::{ANSWER_WIDGET_ID, show_next_if};
use crate::{
    Container, QuestionEntity, QuestionLayout, QuestionRecord, RecordError, Widget, WidgetId,
};

/// Integer rating on an inclusive scale, e.g. a Likert item.
#[derive(Debug, Clone)]
pub struct ScaleLayout {
    min: i64,
    max: i64,
    min_label: Option<String>,
    max_label: Option<String>,
}

impl ScaleLayout {
    pub const TYPE: &'static str = "scale";
    pub const DEFAULT_MIN: i64 = 1;
    pub const DEFAULT_MAX: i64 = 5;

    fn chosen(container: &Container) -> Option<i64> {
        match container.find(ANSWER_WIDGET_ID) {
            Some(Widget::Scale { value, .. }) => *value,
            _ => None,
        }
    }
}

impl Default for ScaleLayout {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
            min_label: None,
            max_label: None,
        }
    }
}

impl QuestionLayout for ScaleLayout {
    fn layout_type(&self) -> &str {
        Self::TYPE
    }

    fn question(&mut self, record: &QuestionRecord) -> Result<QuestionEntity, RecordError> {
        let min = record.opt_i64("min")?.unwrap_or(Self::DEFAULT_MIN);
        let max = record.opt_i64("max")?.unwrap_or(Self::DEFAULT_MAX);
        if min > max {
            return Err(RecordError::InvalidValue {
                key: "min".to_string(),
                message: format!("{min} is greater than max {max}"),
            });
        }

        self.min = min;
        self.max = max;
        self.min_label = record.opt_str("minLabel")?.map(str::to_string);
        self.max_label = record.opt_str("maxLabel")?.map(str::to_string);
        QuestionEntity::from_record(record)
    }

    fn add_question_layout(
        &mut self,
        container: &mut Container,
        _entity: &QuestionEntity,
        _next: &mut Widget,
    ) {
        container.add(Widget::Scale {
            id: ANSWER_WIDGET_ID,
            min: self.min,
            max: self.max,
            min_label: self.min_label.clone(),
            max_label: self.max_label.clone(),
            value: None,
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
            .map(|value| value.to_string())
            .unwrap_or_default()
    }
}
