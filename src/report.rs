//! Plain-text rendering for the command line

use std::fmt::Write;
use std::time::Duration;

use textwrap::{Options, fill};

use crate::catalog::{Exercise, ExerciseId, ExerciseView};
use crate::progress::{LevelInfo, Rank, Standing, UserProgress};
use crate::scoring::{FollowUp, QuizVerdict, SubmissionOutcome, format_elapsed};

/// Wrap width for long text
const WRAP_WIDTH: usize = 72;

fn wrapped(text: &str, indent: &str) -> String {
    let options = Options::new(WRAP_WIDTH).initial_indent(indent).subsequent_indent(indent);
    fill(text, options)
}

/// Text progress bar, e.g. `[#####.....]`
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).floor().clamp(0.0, width as f64) as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// One line per exercise with lock and completion markers
pub fn exercise_list(views: &[ExerciseView<'_>]) -> String {
    let mut out = String::new();
    for view in views {
        let marker = match (view.completed, view.unlocked) {
            (true, _) => "✓",
            (false, true) => " ",
            (false, false) => "🔒",
        };
        let e = view.exercise;
        let _ = writeln!(
            out,
            "{marker} {:>5}  {:<36} {:<9} {:<12} {:>4} XP",
            e.id,
            e.title,
            e.difficulty.to_string(),
            e.category.to_string(),
            e.points
        );
    }
    let plural = if views.len() == 1 { "" } else { "s" };
    let _ = writeln!(out, "{} exercise{} found", views.len(), plural);
    out
}

/// Full exercise detail
pub fn exercise_detail(exercise: &Exercise, missing: &[ExerciseId]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", exercise.id, exercise.title);
    let _ = writeln!(
        out,
        "{} · {} · {} · {} XP",
        exercise.difficulty, exercise.category, exercise.kind, exercise.points
    );
    if let Some(limit) = exercise.time_limit {
        let _ = writeln!(out, "Time limit: {} min", limit);
    }
    if !missing.is_empty() {
        let ids: Vec<String> = missing.iter().map(|id| id.to_string()).collect();
        let _ = writeln!(out, "Locked: complete {} first", ids.join(", "));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", wrapped(&exercise.description, ""));

    if exercise.is_quiz() {
        let _ = writeln!(out, "\nOptions:");
        for (idx, option) in exercise.options.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", idx + 1, option);
        }
        let _ = writeln!(out, "Answer with: flexquest answer {} <option>", exercise.id);
    }

    if let Some(template) = &exercise.template {
        let _ = writeln!(out, "\nStarter code:");
        for line in template.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }

    if !exercise.test_cases.is_empty() {
        let _ = writeln!(out, "\nTests:");
        for case in &exercise.test_cases {
            let _ = writeln!(out, "{}", wrapped(&case.description, "  - "));
        }
    }

    for example in &exercise.examples {
        let _ = writeln!(out, "\nExample: {}", example.title);
        for line in example.code.lines() {
            let _ = writeln!(out, "    {}", line);
        }
        let _ = writeln!(out, "{}", wrapped(&example.explanation, "  "));
    }

    if !exercise.tags.is_empty() {
        let _ = writeln!(out, "\nTags: {}", exercise.tags.join(", "));
    }
    out
}

/// Results of a test run, with the score breakdown
pub fn outcome(outcome: &SubmissionOutcome, elapsed: Duration) -> String {
    let mut out = String::new();
    for (idx, result) in outcome.results.iter().enumerate() {
        let status = if result.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "  {} test {}  input: {}", status, idx + 1, result.input);
        if !result.passed {
            let _ = writeln!(out, "         expected: {}", result.expected);
            let _ = writeln!(out, "         actual:   {}", result.actual);
            if let Some(error) = &result.error {
                let _ = writeln!(out, "         error:    {}", error);
            }
        }
    }

    let b = &outcome.breakdown;
    let _ = writeln!(
        out,
        "\n{}/{} tests passed · attempt {} · time {}",
        outcome.passed_count(),
        outcome.results.len(),
        outcome.attempt,
        format_elapsed(elapsed)
    );
    let _ = writeln!(
        out,
        "Score: {} XP (base {:.1} + time bonus {:.1} - penalty {:.0})",
        b.total, b.base_score, b.time_bonus, b.attempt_penalty
    );

    if let Some(event) = &outcome.completion {
        let _ = writeln!(
            out,
            "\n🎉 Exercise complete! {} XP in {} after {} attempt{}",
            event.score,
            format_elapsed(event.elapsed),
            event.attempts,
            if event.attempts == 1 { "" } else { "s" }
        );
        for follow_up in &event.follow_ups {
            let hint = match follow_up {
                FollowUp::NextExercise(id) => format!("next exercise: flexquest show {}", id),
                FollowUp::ExerciseList => "browse exercises: flexquest list".to_string(),
                FollowUp::Leaderboard => "see the ranking: flexquest leaderboard".to_string(),
            };
            let _ = writeln!(out, "  → {}", hint);
        }
    }
    out
}

/// Feedback for a quiz answer
pub fn verdict(verdict: &QuizVerdict) -> String {
    let mut out = String::new();
    if verdict.correct {
        let _ = writeln!(out, "✓ Correct! +{} XP", verdict.score);
    } else {
        let _ = writeln!(
            out,
            "✗ Not quite. You picked '{}', the answer is '{}'.",
            verdict.chosen, verdict.answer
        );
    }
    if let Some(explanation) = &verdict.explanation {
        let _ = writeln!(out, "{}", wrapped(explanation, "  "));
    }
    out
}

/// XP total after an award, noting a level-up
pub fn xp_gain(user: &UserProgress, gained: u32, info: &LevelInfo, levelled_up: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "+{} XP · {} XP total · level {}", gained, user.total_xp, info.level);
    if levelled_up {
        let _ = writeln!(out, "⬆ Level up! You reached level {}", info.level);
    }
    out
}

/// Level summary for an XP total
pub fn level(total_xp: u64, info: &LevelInfo) -> String {
    let rank = Rank::for_xp(total_xp);
    let mut out = String::new();
    let _ = writeln!(out, "{} XP · level {} · {}", total_xp, info.level, rank);
    let _ = writeln!(
        out,
        "{} {:.1}% · {} XP to level {}",
        progress_bar(info.progress_percent, 20),
        info.progress_percent,
        info.xp_to_next_level,
        info.level + 1
    );
    if let Some(next) = rank.next() {
        let _ = writeln!(out, "{} XP to {}", next.min_xp() - total_xp, next);
    }
    out
}

/// Leaderboard table
pub fn leaderboard(standings: &[Standing<'_>]) -> String {
    let mut out = String::new();
    for s in standings {
        let marker = if s.entry.is_current_user { "›" } else { " " };
        let _ = writeln!(
            out,
            "{marker}{:>3}. {} {:<16} Lv.{:<3} {:<12} {:>7} XP  {:>3} done  🔥{}",
            s.position,
            s.entry.avatar,
            s.entry.name,
            s.level,
            s.rank.to_string(),
            s.entry.total_xp,
            s.entry.exercises_completed,
            s.entry.streak
        );
    }
    out
}

/// Profile summary with badges
pub fn profile(user: &UserProgress, info: &LevelInfo, total_exercises: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", user.name);
    out.push_str(&level(user.total_xp, info));
    let _ = writeln!(
        out,
        "Completed {}/{} exercises · streak {} days",
        user.completed.len(),
        total_exercises,
        user.streak
    );
    if !user.badges.is_empty() {
        let _ = writeln!(out, "\nBadges:");
        for badge in &user.badges {
            let state = if badge.earned { "" } else { " (locked)" };
            let _ = writeln!(out, "  {} {}{}", badge.icon, badge.name, state);
        }
    }
    out
}
