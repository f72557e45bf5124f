use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use log::{info, warn};
use que::{
    AnswerLog, Container, DefaultLayout, FilePreferences, LayoutContext, LayoutRegistry,
    PREF_KEY_QUESTIONNAIRE_FINISHED, Preferences, Progress, QueConfig, QuestionLayout,
    Questionnaire, parse_records,
};
use que_dialoguer::{DialoguerFrontend, FrontendError};

use crate::cli::{PreferencesArgs, RunArgs};

pub fn load_config(path: Option<&Path>) -> Result<QueConfig> {
    match path {
        Some(path) => QueConfig::load_from(path),
        None => QueConfig::load(),
    }
}

fn preferences_path(config: &QueConfig, args: &PreferencesArgs) -> Result<PathBuf> {
    match &args.preferences {
        Some(path) => Ok(path.clone()),
        None => config.preferences_path(),
    }
}

fn read_questionnaire(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read questionnaire: {:?}", file))
}

pub fn run_command(config: &QueConfig, args: RunArgs) -> Result<()> {
    let prefs_path = preferences_path(config, &args.preferences)?;
    let preferences = FilePreferences::open(&prefs_path)?;

    if preferences.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false) && !args.force {
        println!("The questionnaire was already completed. Use --force to answer it again.");
        return Ok(());
    }

    let target = match (args.answers, &config.answers_dir) {
        (Some(path), _) => Some(path),
        (None, Some(dir)) => Some(dir.join(answers_file_name(&args.file, Local::now()))),
        (None, None) => None,
    };
    if let Some(path) = &target {
        prepare_answers_target(path)?;
    }

    let json = read_questionnaire(&args.file)?;
    let mut container = Container::new();
    let mut questionnaire = Questionnaire::new(
        AnswerLog::new(),
        preferences,
        LayoutRegistry::with_builtin_layouts(),
    )
    .with_context(config.layout_context());

    let progress = questionnaire
        .load_json(&json, &mut container)
        .with_context(|| format!("Failed to start questionnaire {:?}", args.file))?;

    if progress == Progress::Empty {
        println!("{:?} contains no questions.", args.file);
        return Ok(());
    }

    let frontend = DialoguerFrontend::with_colors(config.colorful && !args.plain);
    let outcome = frontend.run(&mut questionnaire, &mut container);
    let (answers, preferences) = questionnaire.into_parts();

    store_answers(outcome, &answers, preferences, target.as_deref())
}

/// Create the directory of the answers file before any question is asked.
fn prepare_answers_target(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create answers directory: {:?}", parent))?;
    }
    if path.is_dir() {
        bail!("Answers target {:?} is a directory", path);
    }
    Ok(())
}

/// Write the answers of a run, also after a failed or cancelled one.
///
/// If a completed run cannot write its answers, they are printed instead and
/// the completion flag is cleared so the questionnaire can be taken again.
fn store_answers<P: Preferences>(
    outcome: Result<usize, FrontendError>,
    answers: &AnswerLog,
    mut preferences: P,
    target: Option<&Path>,
) -> Result<()> {
    let answered = match outcome {
        Ok(answered) => answered,
        Err(err) => {
            if !answers.is_empty() {
                warn!("Run stopped after {} answers, keeping them", answers.len());
                if let Err(write_err) = write_answers(answers, target) {
                    warn!("{:#}", write_err);
                    println!("{}", answers.to_json()?);
                }
            }
            return Err(err.into());
        }
    };
    info!("Answered {} questions", answered);

    if let Err(err) = write_answers(answers, target) {
        println!("{}", answers.to_json()?);
        preferences.put_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false)?;
        return Err(err.context("Answers printed above, completion flag cleared"));
    }
    Ok(())
}

fn write_answers(answers: &AnswerLog, target: Option<&Path>) -> Result<()> {
    match target {
        Some(path) => {
            answers.write_to(path)?;
            println!("Answers saved to {}", path.display());
        }
        None => println!("{}", answers.to_json()?),
    }
    Ok(())
}

/// Name of the answers file for a questionnaire file, e.g. `wellbeing-20240501-093000.json`.
fn answers_file_name(file: &Path, now: DateTime<Local>) -> String {
    let stem = file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("answers");
    format!("{}-{}.json", stem, now.format("%Y%m%d-%H%M%S"))
}

/// Result of checking one record.
#[derive(Debug, PartialEq)]
struct RecordCheck {
    index: usize,
    layout_type: Option<String>,
    registered: bool,
    problem: Option<String>,
}

fn check_records(
    json: &str,
    registry: &LayoutRegistry,
    context: &LayoutContext,
) -> Result<Vec<RecordCheck>> {
    let records = parse_records(json)?;

    let checks = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let layout_type = match record.record_type() {
                Ok(layout_type) => layout_type.to_string(),
                Err(err) => {
                    return RecordCheck {
                        index,
                        layout_type: None,
                        registered: false,
                        problem: Some(err.to_string()),
                    };
                }
            };

            let registered = registry.contains(&layout_type);
            let mut layout: Box<dyn QuestionLayout> = registry
                .instantiate(&layout_type, context)
                .unwrap_or_else(|| Box::new(DefaultLayout));

            RecordCheck {
                index,
                registered,
                problem: layout.question(record).err().map(|err| err.to_string()),
                layout_type: Some(layout_type),
            }
        })
        .collect();

    Ok(checks)
}

pub fn check_command(config: &QueConfig, file: &Path) -> Result<()> {
    let json = read_questionnaire(file)?;
    let registry = LayoutRegistry::with_builtin_layouts();
    let checks = check_records(&json, &registry, &config.layout_context())
        .with_context(|| format!("Failed to parse questionnaire {:?}", file))?;

    let mut problems = 0;
    for check in &checks {
        let layout_type = check.layout_type.as_deref().unwrap_or("?");
        let layout = if check.registered {
            layout_type.to_string()
        } else {
            format!("{layout_type} (no layout, uses fallback)")
        };

        match &check.problem {
            Some(problem) => {
                problems += 1;
                println!("{:>3}  {:<30} ERROR: {}", check.index, layout, problem);
            }
            None => println!("{:>3}  {:<30} ok", check.index, layout),
        }
    }

    println!(
        "{} questions, {} with problems (known types: {})",
        checks.len(),
        problems,
        registry.types().join(", ")
    );

    if problems > 0 {
        bail!("{} invalid question records in {:?}", problems, file);
    }
    Ok(())
}

pub fn status_command(config: &QueConfig, args: PreferencesArgs) -> Result<()> {
    let path = preferences_path(config, &args)?;
    let preferences = FilePreferences::open(&path)?;

    if preferences.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false) {
        println!("completed ({})", path.display());
    } else {
        println!("not completed ({})", path.display());
    }
    Ok(())
}

pub fn reset_command(config: &QueConfig, args: PreferencesArgs) -> Result<()> {
    let path = preferences_path(config, &args)?;
    let mut preferences = FilePreferences::open(&path)?;
    preferences.remove(PREF_KEY_QUESTIONNAIRE_FINISHED)?;

    println!("Completion flag cleared ({})", path.display());
    Ok(())
}

pub fn config_show_command(config: &QueConfig) -> Result<()> {
    println!("next_label       = {:?}", config.next_label);
    println!(
        "preferences_path = {}",
        config.preferences_path()?.display()
    );
    match &config.answers_dir {
        Some(dir) => println!("answers_dir      = {}", dir.display()),
        None => println!("answers_dir      = (stdout)"),
    }
    println!("colorful         = {}", config.colorful);
    Ok(())
}

/// Write `config` to `path`, or to the default config file.
pub fn config_init_command(config: &QueConfig, path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => QueConfig::default_path()?,
    };

    if path.exists() && !force {
        bail!("Config file {:?} already exists (use --force to overwrite)", path);
    }

    config.save_to(&path)?;
    println!("Config written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use que::{AnswerLogging, MemoryPreferences, QuestionnaireError, RecordError};

    const SAMPLE: &str = include_str!("../questionnaires/sample.json");

    #[test]
    fn answers_file_name_uses_stem_and_time() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(
            answers_file_name(Path::new("surveys/wellbeing.json"), now),
            "wellbeing-20240501-093000.json"
        );
        assert_eq!(
            answers_file_name(Path::new(""), now),
            "answers-20240501-093000.json"
        );
    }

    #[test]
    fn sample_questionnaire_is_valid() {
        let checks = check_records(
            SAMPLE,
            &LayoutRegistry::with_builtin_layouts(),
            &LayoutContext::default(),
        )
        .unwrap();

        assert!(!checks.is_empty());
        assert!(checks.iter().all(|check| check.problem.is_none()));
    }

    #[test]
    fn check_reports_fallback_and_problems() {
        let json = r#"[
            {"type": "video", "key": "clip", "question": "Watch"},
            {"type": "radio", "key": "mood", "question": "Mood?"},
            {"key": "untyped", "question": "?"}
        ]"#;
        let checks = check_records(
            json,
            &LayoutRegistry::with_builtin_layouts(),
            &LayoutContext::default(),
        )
        .unwrap();

        assert_eq!(
            checks[0],
            RecordCheck {
                index: 0,
                layout_type: Some("video".to_string()),
                registered: false,
                problem: None,
            }
        );
        assert!(checks[1].registered);
        assert!(checks[1].problem.is_some());
        assert_eq!(checks[2].layout_type, None);
        assert!(checks[2].problem.is_some());
    }

    #[test]
    fn check_rejects_malformed_json() {
        let result = check_records(
            "[{",
            &LayoutRegistry::with_builtin_layouts(),
            &LayoutContext::default(),
        );
        assert!(result.is_err());
    }

    fn one_answer() -> AnswerLog {
        let mut answers = AnswerLog::new();
        answers.add_answer("name", "Ada");
        answers
    }

    #[test]
    fn failed_run_keeps_given_answers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers").join("partial.json");
        prepare_answers_target(&path).unwrap();

        let outcome = Err(FrontendError::Questionnaire(QuestionnaireError::Record {
            step: 1,
            source: RecordError::MissingKey("answers".to_string()),
        }));
        let result = store_answers(outcome, &one_answer(), MemoryPreferences::new(), Some(&path));

        assert!(result.is_err());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"Ada\""));
    }

    #[test]
    fn unwritable_answers_clear_completion_flag() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("answers.json");

        let mut preferences =
            MemoryPreferences::new().with_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, true);
        let result = store_answers(Ok(1), &one_answer(), &mut preferences, Some(&path));

        assert!(result.is_err());
        assert!(!preferences.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false));
    }

    #[test]
    fn answers_target_must_not_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(prepare_answers_target(dir.path()).is_err());
        assert!(prepare_answers_target(&dir.path().join("new").join("a.json")).is_ok());
        assert!(dir.path().join("new").is_dir());
    }

    #[test]
    fn config_init_writes_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("que").join("config.toml");
        let config = QueConfig {
            next_label: "Weiter".to_string(),
            ..QueConfig::default()
        };

        config_init_command(&config, Some(&path), false).unwrap();
        assert_eq!(QueConfig::load_from(&path).unwrap(), config);

        assert!(config_init_command(&QueConfig::default(), Some(&path), false).is_err());
        config_init_command(&QueConfig::default(), Some(&path), true).unwrap();
        assert_eq!(QueConfig::load_from(&path).unwrap(), QueConfig::default());
    }

    #[test]
    fn reset_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut preferences = FilePreferences::open(&path).unwrap();
        preferences
            .put_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, true)
            .unwrap();

        let args = PreferencesArgs {
            preferences: Some(path.clone()),
        };
        reset_command(&QueConfig::default(), args).unwrap();

        let reopened = FilePreferences::open(&path).unwrap();
        assert!(!reopened.get_bool(PREF_KEY_QUESTIONNAIRE_FINISHED, false));
    }
}
