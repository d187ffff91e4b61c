use std::io::{BufRead, Write};

use services::{StudyWorkflow, SubmitOutcome};

use crate::error::CliError;
use crate::render;

/// How an interactive quiz ended.
#[derive(Debug)]
pub enum QuizRun {
    Submitted(SubmitOutcome),
    /// Input ended, or a question could not be answered.
    Abandoned,
}

/// Walk the learner through every question, then submit.
///
/// Each question must be answered before moving on, so submission never
/// sees unanswered questions.
pub async fn take_quiz(
    flow: &mut StudyWorkflow,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<QuizRun, CliError> {
    let Some(attempt) = flow.session().attempt() else {
        return Ok(QuizRun::Abandoned);
    };
    let questions = attempt.questions().to_vec();

    for (index, question) in questions.iter().enumerate() {
        writeln!(out)?;
        render::question(out, index, question)?;
        if question.options.is_empty() {
            writeln!(out, "   (this question has no options)")?;
            return Ok(QuizRun::Abandoned);
        }

        let Some(option) = prompt_option(input, out, question.options.len())? else {
            return Ok(QuizRun::Abandoned);
        };
        flow.select_option(index, option)?;

        let Some(reply) = prompt_line(input, out, "   Check answer? [y/N] ")? else {
            return Ok(QuizRun::Abandoned);
        };
        if matches!(reply.as_str(), "y" | "Y" | "yes") {
            let correct = flow.check_answer(index)?;
            render::feedback(out, correct, question)?;
        }
    }

    let outcome = flow.submit_all().await?;
    writeln!(out)?;
    render::score(out, &outcome.score)?;
    if !outcome.saved {
        writeln!(out, "(result could not be saved)")?;
    }
    Ok(QuizRun::Submitted(outcome))
}

fn prompt_option(
    input: &mut impl BufRead,
    out: &mut impl Write,
    len: usize,
) -> Result<Option<usize>, CliError> {
    loop {
        let Some(reply) = prompt_line(input, out, &format!("   Choose 1-{len}: "))? else {
            return Ok(None);
        };
        match reply.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "   Please enter a number between 1 and {len}")?,
        }
    }
}

fn prompt_line(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> Result<Option<String>, CliError> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
