use std::io::{self, Write};

use study_core::model::{GenerationResult, QuizQuestion, SavedSession, ScoreSummary};

pub fn plan(out: &mut impl Write, result: &GenerationResult) -> io::Result<()> {
    writeln!(out, "Study Plan")?;
    writeln!(out, "==========")?;
    writeln!(out, "{}", result.plan)?;
    writeln!(out)?;
    if !result.quizzes.is_empty() {
        writeln!(out, "Quiz: {} question(s)", result.quizzes.len())?;
    }
    Ok(())
}

pub fn question(out: &mut impl Write, index: usize, question: &QuizQuestion) -> io::Result<()> {
    writeln!(out, "{}. {}", index + 1, question.question)?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "   {}) {option}", i + 1)?;
    }
    Ok(())
}

pub fn feedback(out: &mut impl Write, correct: bool, question: &QuizQuestion) -> io::Result<()> {
    if correct {
        writeln!(out, "   Correct!")
    } else {
        writeln!(out, "   Incorrect. Correct answer: {}", question.answer)
    }
}

pub fn score(out: &mut impl Write, score: &ScoreSummary) -> io::Result<()> {
    writeln!(out, "Quiz Result")?;
    writeln!(out, "  Correct:   {}", score.correct())?;
    writeln!(out, "  Incorrect: {}", score.incorrect())?;
    writeln!(out, "  Score:     {}%", score.percent())
}

pub fn history(out: &mut impl Write, sessions: &[SavedSession]) -> io::Result<()> {
    if sessions.is_empty() {
        return writeln!(out, "No saved sessions");
    }
    for session in sessions {
        let result = session
            .result
            .map_or_else(|| "not taken".to_string(), |s| format!("{}%", s.percent()));
        writeln!(
            out,
            "{}  {}  ({} question(s), {result})",
            session.date.format("%Y-%m-%d %H:%M"),
            session.syllabus,
            session.quizzes.len(),
        )?;
    }
    Ok(())
}

pub fn quiz_list(out: &mut impl Write, quizzes: &[QuizQuestion]) -> io::Result<()> {
    if quizzes.is_empty() {
        return writeln!(out, "No quizzes found");
    }
    for (index, quiz) in quizzes.iter().enumerate() {
        question(out, index, quiz)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::Syllabus;
    use study_core::time::fixed_now;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn question_numbers_from_one() {
        let q = QuizQuestion::new("2 + 2?", ["3", "4"], "4");
        let text = render(|out| question(out, 0, &q));
        assert_eq!(text, "1. 2 + 2?\n   1) 3\n   2) 4\n");
    }

    #[test]
    fn incorrect_feedback_shows_answer() {
        let q = QuizQuestion::new("2 + 2?", ["3", "4"], "4");
        let text = render(|out| feedback(out, false, &q));
        assert_eq!(text, "   Incorrect. Correct answer: 4\n");
    }

    #[test]
    fn history_marks_untaken_sessions() {
        let generation = GenerationResult::new("P", vec![QuizQuestion::default()]);
        let taken = SavedSession::new(
            Syllabus::new("Graphs").unwrap(),
            &generation,
            fixed_now(),
            Some(ScoreSummary::from_counts(1, 1).unwrap()),
        );
        let untaken = SavedSession::new(
            Syllabus::new("Sets").unwrap(),
            &generation,
            fixed_now(),
            None,
        );
        let text = render(|out| history(out, &[taken, untaken]));
        assert_eq!(
            text,
            "2023-11-14 22:13  Graphs  (1 question(s), 100%)\n\
             2023-11-14 22:13  Sets  (1 question(s), not taken)\n"
        );
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(render(|out| history(out, &[])), "No saved sessions\n");
        assert_eq!(render(|out| quiz_list(out, &[])), "No quizzes found\n");
    }
}
