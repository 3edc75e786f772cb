use std::io::{self, Write};

use crate::vm::{FilterOptionVm, RoundVm};

/// Write one round: photo link, caption, numbered choices and progress.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_round(out: &mut impl Write, round: &RoundVm) -> io::Result<()> {
    writeln!(out)?;
    if let Some(previous) = &round.previous_label {
        writeln!(out, "{previous}")?;
    }
    writeln!(out, "Who is this? {}", round.photo_url)?;
    if !round.caption.is_empty() {
        writeln!(out, "  {}", round.caption.join(" · "))?;
    }
    for choice in &round.choices {
        if choice.disabled {
            writeln!(out, "  {}) {} ✗", choice.number, choice.label)?;
        } else {
            writeln!(out, "  {}) {}", choice.number, choice.label)?;
        }
    }
    writeln!(out, "[{}]", round.progress_label)
}

/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  <number>     pick that name")?;
    writeln!(out, "  f <group>    only quiz one group")?;
    writeln!(out, "  f            quiz everyone again")?;
    writeln!(out, "  g            list groups")?;
    writeln!(out, "  h            show this help")?;
    writeln!(out, "  q            quit")
}

/// List the group selector, marking the active option.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_groups(out: &mut impl Write, options: &[FilterOptionVm]) -> io::Result<()> {
    for option in options {
        let marker = if option.selected { '*' } else { ' ' };
        writeln!(out, " {marker} {}", option.label)?;
    }
    Ok(())
}
