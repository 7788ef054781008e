//! Plain-text scoreboard.

use cricket_ledger::{Phase, Scorer, Side};
use tracing::instrument;

/// Renders the scorer's state for a terminal.
#[instrument(skip(scorer))]
pub fn render(scorer: &Scorer) -> String {
    let mut lines = Vec::new();
    let teams = scorer.teams();

    if let Some(first) = scorer.innings1() {
        lines.push(format!("Innings 1  {}  {}", teams.name(Side::BattingFirst), first));
        if let Some(second) = scorer.innings2() {
            lines.push(format!("Innings 2  {}  {}", teams.name(Side::Chasing), second));
        }
        lines.push(String::new());
    }

    match scorer.phase() {
        Phase::Setup => lines.push(format!(
            "Match setup: {} overs. Type start:N to begin.",
            scorer.state().total_overs()
        )),
        Phase::FirstInnings | Phase::SecondInnings => {
            let batting = if scorer.innings() == 1 {
                Side::BattingFirst
            } else {
                Side::Chasing
            };
            lines.push(format!(
                "{}  {} / {}  Overs: {} / {}",
                teams.name(batting),
                scorer.runs(),
                scorer.wickets(),
                scorer.overs_string(),
                scorer.state().total_overs()
            ));
            if let Some(needed) = scorer.runs_needed() {
                lines.push(format!(
                    "Need {} runs in {} balls",
                    needed,
                    scorer.balls_remaining()
                ));
            }
            lines.extend(over_lines(scorer));
        }
        Phase::Tossing => lines.push("MATCH TIED - tossing coin...".to_string()),
        Phase::Complete => {
            if let Some(result) = scorer.result_text() {
                lines.push(result);
            }
            if scorer.result().is_some_and(|r| r.is_tie()) {
                lines.push("Type super for a super over or toss for a coin toss.".to_string());
            }
        }
    }

    lines.into_iter().map(|line| line + "\n").collect()
}

fn over_lines(scorer: &Scorer) -> Vec<String> {
    scorer
        .overs()
        .iter()
        .map(|over| {
            let balls = over
                .deliveries()
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                "Over {}: {} runs  [{}]",
                over.over_number(),
                over.total_runs(),
                balls
            )
        })
        .collect()
}
