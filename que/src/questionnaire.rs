use log::{debug, info, warn};

use crate::{
    AnswerLogging, Container, DefaultLayout, LayoutContext, LayoutRegistry, NEXT_BUTTON_ID,
    PREF_KEY_QUESTIONNAIRE_FINISHED, Preferences, PreferencesError, QuestionEntity,
    QuestionLayout, QuestionRecord, RecordError, TextSize, Widget, WidgetId, parse_records,
};

/// Error type for questionnaire operations.
#[derive(Debug, thiserror::Error)]
pub enum QuestionnaireError {
    /// The questionnaire text could not be read.
    #[error(transparent)]
    Parse(#[from] RecordError),

    /// A record could not be rendered.
    #[error("Invalid question record at step {step}: {source}")]
    Record {
        step: usize,
        #[source]
        source: RecordError,
    },

    /// The completion flag could not be stored.
    #[error("Failed to record completion: {0}")]
    Preferences(#[from] PreferencesError),

    /// Next was pressed before any question was rendered.
    #[error("No question is shown")]
    NotStarted,

    /// Next was pressed while the button is hidden.
    #[error("The Next button is not available yet")]
    NextUnavailable,

    /// The layout removed the Next button from the container.
    #[error("Layout for type '{0}' left no Next button")]
    MissingNextButton(String),

    /// Next was pressed after the last question.
    #[error("Questionnaire already finished")]
    AlreadyFinished,
}

/// Where the questionnaire stands after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// There are no questions; nothing is shown and nothing was recorded.
    Empty,

    /// The question at `step` is shown.
    Question { step: usize },

    /// All questions were answered and the container was closed.
    Finished,
}

struct ActiveStep {
    layout: Box<dyn QuestionLayout>,
    entity: QuestionEntity,
}

/// Walks a list of question records, one Next press at a time.
///
/// Every step renders the question text, the instruction and the widgets of
/// the record's layout into the container. Pressing Next logs the answer,
/// clears the container and renders the following record. After the last
/// record the finished preference is set and the container is closed.
pub struct Questionnaire<A, P> {
    logging: A,
    preferences: P,
    registry: LayoutRegistry,
    context: LayoutContext,
    records: Vec<QuestionRecord>,
    step: usize,
    active: Option<ActiveStep>,
    finished: bool,
}

impl<A: AnswerLogging, P: Preferences> Questionnaire<A, P> {
    pub fn new(logging: A, preferences: P, registry: LayoutRegistry) -> Self {
        Self {
            logging,
            preferences,
            registry,
            context: LayoutContext::default(),
            records: Vec::new(),
            step: 0,
            active: None,
            finished: false,
        }
    }

    /// Set the context handed to layout factories.
    pub fn with_context(mut self, context: LayoutContext) -> Self {
        self.context = context;
        self
    }

    /// Parse a JSON questionnaire and show its first question.
    pub fn load_json(
        &mut self,
        json: &str,
        container: &mut Container,
    ) -> Result<Progress, QuestionnaireError> {
        let records = parse_records(json)?;
        self.create_question(records, container)
    }

    /// Start over with the given records and show the first one.
    ///
    /// An empty list leaves the container empty and does not count as finished.
    pub fn create_question(
        &mut self,
        records: Vec<QuestionRecord>,
        container: &mut Container,
    ) -> Result<Progress, QuestionnaireError> {
        self.records = records;
        self.step = 0;
        self.active = None;
        self.finished = false;
        container.remove_all();

        if self.records.is_empty() {
            debug!("Questionnaire has no questions");
            return Ok(Progress::Empty);
        }

        self.render_step(container)
    }

    /// The Next action: log the current answer and show the following question.
    pub fn next(&mut self, container: &mut Container) -> Result<Progress, QuestionnaireError> {
        if self.finished {
            return Err(QuestionnaireError::AlreadyFinished);
        }
        let Some(active) = self.active.as_ref() else {
            return Err(QuestionnaireError::NotStarted);
        };

        match container.find(NEXT_BUTTON_ID) {
            None => {
                return Err(QuestionnaireError::MissingNextButton(
                    active.entity.layout_type().to_string(),
                ));
            }
            Some(next) if !next.is_visible() => return Err(QuestionnaireError::NextUnavailable),
            Some(_) => {}
        }

        let answer = active.layout.last_given_answer(container);
        // The last question stays shown until the flag is stored.
        if self.step + 1 == self.records.len() {
            self.preferences
                .put_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, true)?;
        }
        self.logging.add_answer(active.entity.key(), &answer);

        container.remove_all();
        self.active = None;
        self.step += 1;
        self.render_step(container)
    }

    /// Forward a widget change to the layout of the current question.
    pub fn input_changed(&mut self, container: &mut Container, id: WidgetId) {
        if let Some(active) = self.active.as_mut() {
            active.layout.input_changed(container, id);
        }
    }

    fn render_step(&mut self, container: &mut Container) -> Result<Progress, QuestionnaireError> {
        if self.step == self.records.len() {
            return Ok(self.finish(container));
        }

        let step = self.step;
        let record = &self.records[step];
        let layout_type = record
            .record_type()
            .map_err(|source| QuestionnaireError::Record { step, source })?;

        let mut layout: Box<dyn QuestionLayout> =
            match self.registry.instantiate(layout_type, &self.context) {
                Some(layout) => layout,
                None => {
                    warn!(
                        "Using the default layout for type '{}' at step {}",
                        layout_type, step
                    );
                    Box::new(DefaultLayout)
                }
            };

        let entity = layout
            .question(record)
            .map_err(|source| QuestionnaireError::Record { step, source })?;
        debug!(
            "Showing step {}/{}: '{}' ({})",
            step + 1,
            self.records.len(),
            entity.key(),
            layout_type
        );

        container.add(Widget::text(entity.question(), TextSize::Question));
        container.add(Widget::text(entity.instruction(), TextSize::Instruction));
        layout.create_question_layout(container, &entity, &self.context);

        self.active = Some(ActiveStep { layout, entity });
        Ok(Progress::Question { step })
    }

    fn finish(&mut self, container: &mut Container) -> Progress {
        self.finished = true;
        container.close();
        info!(
            "Questionnaire finished after {} questions",
            self.records.len()
        );
        Progress::Finished
    }

    /// Check if every question was answered.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Index of the question currently shown (equals `len()` once finished).
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The question currently shown.
    pub fn current_entity(&self) -> Option<&QuestionEntity> {
        self.active.as_ref().map(|active| &active.entity)
    }

    /// Type of the layout that rendered the current question; empty for the default layout.
    pub fn current_layout_type(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.layout.layout_type())
    }

    pub fn logging(&self) -> &A {
        &self.logging
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut P {
        &mut self.preferences
    }

    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    /// Take back the answer log and the preferences.
    pub fn into_parts(self) -> (A, P) {
        (self.logging, self.preferences)
    }
}
