//! A toolkit-neutral view tree.
//!
//! Layouts describe a question as a flat, vertical list of widgets. Frontends
//! (terminal prompts, test drivers, ...) show the widgets, change the state of
//! input widgets through the mutators on [`Container`], and press the Next
//! button when it is visible.

use std::fmt;

use crate::ViewError;

/// Identifies a widget inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// The id every layout gives its Next button.
pub const NEXT_BUTTON_ID: WidgetId = WidgetId(0xFF231);

/// Text sizes used by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Question text.
    Question,
    /// Instruction text below the question.
    Instruction,
}

impl TextSize {
    /// The size in points.
    pub fn points(self) -> u8 {
        match self {
            Self::Question => 18,
            Self::Instruction => 12,
        }
    }
}

/// One selectable option of a choice widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Text shown to the user.
    pub text: String,

    /// Value logged as the answer when this option is chosen.
    pub value: String,
}

impl ChoiceOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }

    /// An option whose logged value is its text.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            text,
        }
    }
}

/// A single element of the view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// Static text.
    Text { content: String, size: TextSize },

    /// A push button.
    Button {
        id: WidgetId,
        label: String,
        visible: bool,
    },

    /// Single-line free text.
    TextInput {
        id: WidgetId,
        hint: Option<String>,
        value: String,
    },

    /// Pick exactly one option (radio group).
    Choice {
        id: WidgetId,
        options: Vec<ChoiceOption>,
        selected: Option<usize>,
    },

    /// Pick any number of options (checkbox group).
    MultiChoice {
        id: WidgetId,
        options: Vec<ChoiceOption>,
        selected: Vec<bool>,
    },

    /// Pick an integer from an inclusive range.
    Scale {
        id: WidgetId,
        min: i64,
        max: i64,
        min_label: Option<String>,
        max_label: Option<String>,
        value: Option<i64>,
    },
}

impl Widget {
    /// Create a text widget.
    pub fn text(content: impl Into<String>, size: TextSize) -> Self {
        Self::Text {
            content: content.into(),
            size,
        }
    }

    /// Create a hidden button.
    pub fn button(id: WidgetId, label: impl Into<String>) -> Self {
        Self::Button {
            id,
            label: label.into(),
            visible: false,
        }
    }

    /// Create an empty multi choice with nothing selected.
    pub fn multi_choice(id: WidgetId, options: Vec<ChoiceOption>) -> Self {
        let selected = vec![false; options.len()];
        Self::MultiChoice {
            id,
            options,
            selected,
        }
    }

    /// The widget id, if the widget has one (text has none).
    pub fn id(&self) -> Option<WidgetId> {
        match self {
            Self::Text { .. } => None,
            Self::Button { id, .. }
            | Self::TextInput { id, .. }
            | Self::Choice { id, .. }
            | Self::MultiChoice { id, .. }
            | Self::Scale { id, .. } => Some(*id),
        }
    }

    /// Check if the user can enter data into this widget.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::TextInput { .. }
                | Self::Choice { .. }
                | Self::MultiChoice { .. }
                | Self::Scale { .. }
        )
    }

    /// Show or hide the widget. Only buttons can be hidden; other widgets ignore this.
    pub fn set_visible(&mut self, value: bool) {
        if let Self::Button { visible, .. } = self {
            *visible = value;
        }
    }

    /// Check if the widget is shown.
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Button { visible, .. } => *visible,
            _ => true,
        }
    }

    /// Get the kind name of this widget for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "Text",
            Self::Button { .. } => "Button",
            Self::TextInput { .. } => "TextInput",
            Self::Choice { .. } => "Choice",
            Self::MultiChoice { .. } => "MultiChoice",
            Self::Scale { .. } => "Scale",
        }
    }
}

/// A vertical container of widgets, the screen a question is rendered into.
#[derive(Debug, Clone, Default)]
pub struct Container {
    widgets: Vec<Widget>,
    closed: bool,
}

impl Container {
    /// Create an empty, open container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a widget at the bottom.
    pub fn add(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    /// Remove all widgets.
    pub fn remove_all(&mut self) {
        self.widgets.clear();
    }

    /// All widgets, top to bottom.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Find a widget by id.
    pub fn find(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == Some(id))
    }

    /// Find a widget by id for modification.
    pub fn find_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id() == Some(id))
    }

    /// Ids of all input widgets, top to bottom.
    pub fn input_ids(&self) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|w| w.is_input())
            .filter_map(Widget::id)
            .collect()
    }

    /// Check if the Next button exists and is visible.
    pub fn next_visible(&self) -> bool {
        self.find(NEXT_BUTTON_ID).is_some_and(Widget::is_visible)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Close the screen. Frontends stop showing a closed container.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // === Frontend mutators ===

    /// Replace the text of a text input.
    pub fn set_text(&mut self, id: WidgetId, text: impl Into<String>) -> Result<(), ViewError> {
        match self.lookup_mut(id)? {
            Widget::TextInput { value, .. } => {
                *value = text.into();
                Ok(())
            }
            other => Err(wrong_widget(id, "TextInput", other)),
        }
    }

    /// Select one option of a choice.
    pub fn select(&mut self, id: WidgetId, index: usize) -> Result<(), ViewError> {
        match self.lookup_mut(id)? {
            Widget::Choice {
                options, selected, ..
            } => {
                if index >= options.len() {
                    return Err(out_of_range(id, index));
                }
                *selected = Some(index);
                Ok(())
            }
            other => Err(wrong_widget(id, "Choice", other)),
        }
    }

    /// Flip one option of a multi choice.
    pub fn toggle(&mut self, id: WidgetId, index: usize) -> Result<(), ViewError> {
        match self.lookup_mut(id)? {
            Widget::MultiChoice { selected, .. } => {
                let Some(flag) = selected.get_mut(index) else {
                    return Err(out_of_range(id, index));
                };
                *flag = !*flag;
                Ok(())
            }
            other => Err(wrong_widget(id, "MultiChoice", other)),
        }
    }

    /// Set the value of a scale.
    pub fn set_scale(&mut self, id: WidgetId, new_value: i64) -> Result<(), ViewError> {
        match self.lookup_mut(id)? {
            Widget::Scale {
                min, max, value, ..
            } => {
                if new_value < *min || new_value > *max {
                    return Err(ViewError::OutOfRange {
                        id,
                        value: new_value,
                    });
                }
                *value = Some(new_value);
                Ok(())
            }
            other => Err(wrong_widget(id, "Scale", other)),
        }
    }

    fn lookup_mut(&mut self, id: WidgetId) -> Result<&mut Widget, ViewError> {
        self.find_mut(id).ok_or(ViewError::UnknownWidget(id))
    }
}

fn wrong_widget(id: WidgetId, expected: &'static str, actual: &Widget) -> ViewError {
    ViewError::WrongWidget {
        id,
        expected,
        actual: actual.kind_name(),
    }
}

fn out_of_range(id: WidgetId, index: usize) -> ViewError {
    ViewError::OutOfRange {
        id,
        value: i64::try_from(index).unwrap_or(i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: WidgetId = WidgetId(1);

    fn options() -> Vec<ChoiceOption> {
        vec![ChoiceOption::plain("Yes"), ChoiceOption::plain("No")]
    }

    #[test]
    fn text_sizes() {
        assert_eq!(TextSize::Question.points(), 18);
        assert_eq!(TextSize::Instruction.points(), 12);
    }

    #[test]
    fn find_by_id_skips_text() {
        let mut container = Container::new();
        container.add(Widget::text("Hello", TextSize::Question));
        container.add(Widget::button(NEXT_BUTTON_ID, "Next"));

        assert_eq!(container.len(), 2);
        assert!(matches!(
            container.find(NEXT_BUTTON_ID),
            Some(Widget::Button { .. })
        ));
        assert!(container.find(INPUT).is_none());
    }

    #[test]
    fn next_visibility() {
        let mut container = Container::new();
        assert!(!container.next_visible());

        container.add(Widget::button(NEXT_BUTTON_ID, "Next"));
        assert!(!container.next_visible());

        container
            .find_mut(NEXT_BUTTON_ID)
            .unwrap()
            .set_visible(true);
        assert!(container.next_visible());
    }

    #[test]
    fn remove_all_keeps_container_open() {
        let mut container = Container::new();
        container.add(Widget::text("Hello", TextSize::Question));
        container.remove_all();
        assert!(container.is_empty());
        assert!(!container.is_closed());

        container.close();
        assert!(container.is_closed());
    }

    #[test]
    fn select_checks_bounds_and_kind() {
        let mut container = Container::new();
        container.add(Widget::Choice {
            id: INPUT,
            options: options(),
            selected: None,
        });

        container.select(INPUT, 1).unwrap();
        assert!(matches!(
            container.find(INPUT),
            Some(Widget::Choice {
                selected: Some(1),
                ..
            })
        ));

        assert_eq!(
            container.select(INPUT, 2),
            Err(ViewError::OutOfRange { id: INPUT, value: 2 })
        );
        assert_eq!(
            container.set_text(INPUT, "nope"),
            Err(ViewError::WrongWidget {
                id: INPUT,
                expected: "TextInput",
                actual: "Choice"
            })
        );
        assert_eq!(
            container.select(WidgetId(99), 0),
            Err(ViewError::UnknownWidget(WidgetId(99)))
        );
    }

    #[test]
    fn toggle_flips_selection() {
        let mut container = Container::new();
        container.add(Widget::multi_choice(INPUT, options()));

        container.toggle(INPUT, 0).unwrap();
        container.toggle(INPUT, 1).unwrap();
        container.toggle(INPUT, 0).unwrap();

        assert!(matches!(
            container.find(INPUT),
            Some(Widget::MultiChoice { selected, .. }) if selected == &vec![false, true]
        ));
    }

    #[test]
    fn scale_rejects_values_outside_range() {
        let mut container = Container::new();
        container.add(Widget::Scale {
            id: INPUT,
            min: 1,
            max: 5,
            min_label: None,
            max_label: None,
            value: None,
        });

        container.set_scale(INPUT, 5).unwrap();
        assert!(container.set_scale(INPUT, 0).is_err());
        assert!(container.set_scale(INPUT, 6).is_err());
        assert_eq!(container.input_ids(), vec![INPUT]);
    }
}
