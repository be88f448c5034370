use crate::commands::{CmdMessage, CmdResult, Workspace};
use crate::markup::word_count;
use crate::surface::EditingSurface;
use chrono::NaiveDate;

const STAMP_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub words: usize,
    pub goal: usize,
    /// First time today the goal was reached; the caller should stamp `today`.
    pub celebrate: bool,
}

impl GoalProgress {
    pub fn reached(&self) -> bool {
        self.words >= self.goal
    }

    pub fn percent(&self) -> usize {
        if self.goal == 0 {
            return 100;
        }
        (self.words * 100 / self.goal).min(100)
    }
}

/// Counts the open section's live words against `goal`.
///
/// `last_stamp` is the day the goal was last celebrated. Celebration happens
/// at most once per calendar day.
pub fn check<S: EditingSurface>(
    ws: &Workspace<S>,
    goal: usize,
    last_stamp: Option<NaiveDate>,
    today: NaiveDate,
) -> GoalProgress {
    let words = if ws.store.active_id().is_some() {
        word_count(&ws.surface.get_content())
    } else {
        0
    };
    let reached = words >= goal;
    GoalProgress {
        words,
        goal,
        celebrate: reached && last_stamp != Some(today),
    }
}

pub fn report(progress: &GoalProgress) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} / {} words ({}%)",
        progress.words,
        progress.goal,
        progress.percent()
    )));
    if progress.celebrate {
        result.add_message(CmdMessage::success("Daily goal reached. Well done!"));
    } else if progress.reached() {
        result.add_message(CmdMessage::info("Daily goal already reached today."));
    }
    result
}

pub fn parse_stamp(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), STAMP_FORMAT).ok()
}

pub fn format_stamp(date: NaiveDate) -> String {
    date.format(STAMP_FORMAT).to_string()
}
