//! The interactive quiz loop (`cards play`, the default command).

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use cards_core::model::RecordId;
use services::{GuessOutcome, HttpPrefetch, NoopPrefetch, Prefetch, Quiz, SessionEngine};
use storage::{GroupField, RecordStore, SourceConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use ui::{
    Intent, map_filter_options, map_round, parse_intent, render_groups, render_help, render_round,
    resolve_group,
};

use crate::config::PlaySettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn execute(
    source: &SourceConfig,
    group_by: GroupField,
    settings: &PlaySettings,
) -> Result<()> {
    let mut out = io::stdout();
    writeln!(out, "Loading directory...")?;

    let store = services::initialize_from_config(source, group_by)
        .await
        .context("failed to load directory")?;

    let mut quiz = Quiz::ready(start_engine(store, settings));
    show_current(&quiz, &mut out)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let flow = match parse_intent(&line) {
            Ok(intent) => step(&mut quiz, intent, &mut out)?,
            Err(err) => {
                writeln!(out, "{err}")?;
                Flow::Continue
            }
        };
        out.flush()?;
        if flow == Flow::Quit {
            break;
        }
    }

    if let Some(engine) = quiz.engine() {
        let progress = engine.progress();
        info!(consumed = progress.consumed, total = progress.total, "session finished");
        writeln!(out, "Named {} of {}.", progress.consumed, progress.total)?;
    }
    Ok(())
}

fn start_engine(store: Arc<RecordStore>, settings: &PlaySettings) -> SessionEngine {
    let http = settings.prefetch.then(HttpPrefetch::current).flatten();
    let prefetch: Arc<dyn Prefetch> = match http {
        Some(http) => Arc::new(http),
        None => Arc::new(NoopPrefetch),
    };
    let mut builder = SessionEngine::builder(store)
        .with_filter(settings.filter.as_deref())
        .with_prefetch(prefetch);
    if let Some(seed) = settings.seed {
        builder = builder.with_seed(seed);
    }
    builder.start()
}

/// Apply one parsed intent and print the result.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn step(quiz: &mut Quiz, intent: Intent, out: &mut impl Write) -> io::Result<Flow> {
    match intent {
        Intent::Quit => return Ok(Flow::Quit),
        Intent::Help => render_help(out)?,
        Intent::Groups => {
            if let Some(engine) = quiz.engine() {
                render_groups(out, &map_filter_options(engine.groups(), engine.filter()))?;
            }
        }
        Intent::Filter(group) => {
            let group = match (group, quiz.engine()) {
                (Some(input), Some(engine)) => Some(resolve_group(&input, engine.groups())),
                _ => None,
            };
            if quiz.select_filter(group.as_deref()) {
                show_current(quiz, out)?;
            }
        }
        Intent::Choose(number) => {
            let Some(id) = choice_id(quiz, number) else {
                writeln!(out, "No choice {number}.")?;
                return Ok(Flow::Continue);
            };
            match quiz.select_choice(&id) {
                GuessOutcome::Correct => {
                    writeln!(out, "Correct!")?;
                    show_current(quiz, out)?;
                }
                GuessOutcome::Wrong => {
                    writeln!(out, "Not quite, try again.")?;
                    show_current(quiz, out)?;
                }
                GuessOutcome::AlreadyDisabled => writeln!(out, "Already ruled out.")?,
                GuessOutcome::Ignored => {}
            }
        }
    }
    Ok(Flow::Continue)
}

fn choice_id(quiz: &Quiz, number: usize) -> Option<RecordId> {
    let round = map_round(quiz.engine()?)?;
    round.choice_id(number).cloned()
}

fn show_current(quiz: &Quiz, out: &mut impl Write) -> io::Result<()> {
    let Some(engine) = quiz.engine() else {
        return writeln!(out, "Still loading.");
    };
    match map_round(engine) {
        Some(round) => render_round(out, &round),
        None => match engine.filter() {
            Some(group) => writeln!(out, "No one to quiz in {group}. Type f to clear the filter."),
            None => writeln!(out, "No one to quiz."),
        },
    }
}
