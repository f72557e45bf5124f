//! # que-dialoguer
//!
//! Dialoguer frontend for que.
//!
//! This crate shows the view tree of a running questionnaire in the terminal
//! using the `dialoguer` library. Text widgets are printed, input widgets
//! become prompts, and the Next button is pressed once the layout shows it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use que::{AnswerLog, Container, LayoutRegistry, MemoryPreferences, Questionnaire};
//! use que_dialoguer::DialoguerFrontend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut container = Container::new();
//!     let mut questionnaire = Questionnaire::new(
//!         AnswerLog::new(),
//!         MemoryPreferences::new(),
//!         LayoutRegistry::with_builtin_layouts(),
//!     );
//!     questionnaire.load_json(&std::fs::read_to_string("wellbeing.json")?, &mut container)?;
//!
//!     DialoguerFrontend::new().run(&mut questionnaire, &mut container)?;
//!     println!("{}", questionnaire.logging().to_json()?);
//!     Ok(())
//! }
//! ```

mod frontend;

pub use frontend::{DialoguerFrontend, FrontendError};
