use std::fmt::{self, Display, Formatter};

use reel_core::{RunSummary, WorkingSet, WorkingSetRegime};
use reel_model::{Deceleration, Entry, SpinDuration};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SpinReport {
    pub pool_len: usize,
    pub working_set_len: usize,
    pub regime: WorkingSetRegime,
    pub winner_index: usize,
    pub duration: SpinDuration,
    pub deceleration: Deceleration,
    pub frames: u64,
    pub start_position: f64,
    pub final_position: f64,
    pub winner: Option<Entry>,
    /// Ticket rendered in the centre slot of the last frame.
    pub centered: Option<String>,
}

impl SpinReport {
    pub fn new(
        set: &WorkingSet,
        duration: SpinDuration,
        deceleration: Deceleration,
        start_position: f64,
        summary: RunSummary,
        centered: Option<String>,
    ) -> Self {
        Self {
            pool_len: set.pool_len(),
            working_set_len: set.len(),
            regime: set.regime(),
            winner_index: set.winner_index(),
            duration,
            deceleration,
            frames: summary.frames,
            start_position,
            final_position: summary.final_position,
            winner: summary.winner,
            centered,
        }
    }
}

impl Display for SpinReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "pool: {} entries, working set: {} ({})",
            self.pool_len,
            self.working_set_len,
            regime_label(self.regime)
        )?;
        writeln!(
            f,
            "spin: {} / {} deceleration",
            self.duration, self.deceleration
        )?;
        writeln!(
            f,
            "frames: {}, position {:.1} -> {:.1}",
            self.frames, self.start_position, self.final_position
        )?;
        match &self.winner {
            Some(winner) => write!(
                f,
                "winner: {} ({}) at index {}",
                winner.ticket_id,
                winner.display_name(),
                self.winner_index
            ),
            None => write!(f, "winner: none"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub pool_len: usize,
    pub len: usize,
    pub regime: WorkingSetRegime,
    pub winner_index: usize,
    /// `(index, ticket)` pairs around the winner, wrapping at the ends.
    pub neighbourhood: Vec<(usize, String)>,
}

impl WindowReport {
    pub fn new(set: &WorkingSet, context: usize) -> Self {
        let len = set.len();
        let span = context.min(len.saturating_sub(1) / 2);
        let neighbourhood = (0..=2 * span)
            .map(|k| (set.winner_index() + len - span + k) % len)
            .map(|i| (i, set.entries()[i].ticket_id.clone()))
            .collect();

        Self {
            pool_len: set.pool_len(),
            len,
            regime: set.regime(),
            winner_index: set.winner_index(),
            neighbourhood,
        }
    }
}

impl Display for WindowReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "pool: {} entries, working set: {} ({})",
            self.pool_len,
            self.len,
            regime_label(self.regime)
        )?;
        write!(f, "winner index: {}", self.winner_index)?;
        for (index, ticket) in &self.neighbourhood {
            let marker = if *index == self.winner_index { ">" } else { " " };
            write!(f, "\n{marker} {index:>5}  {ticket}")?;
        }
        Ok(())
    }
}

fn regime_label(regime: WorkingSetRegime) -> &'static str {
    match regime {
        WorkingSetRegime::Repeated => "repeated",
        WorkingSetRegime::Full => "full",
        WorkingSetRegime::Windowed => "windowed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool;
    use reel_core::build_working_set;

    #[test]
    fn neighbourhood_wraps_around_the_front() {
        let entries = pool::generate(150);
        let set = build_working_set(&entries, "1").expect("winner present");
        let report = WindowReport::new(&set, 2);

        let tickets: Vec<&str> =
            report.neighbourhood.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(tickets, ["149", "150", "1", "2", "3"]);
    }

    #[test]
    fn neighbourhood_never_repeats_in_tiny_sets() {
        let entries = pool::generate(150);
        let set = build_working_set(&entries, "75").expect("winner present");
        let report = WindowReport::new(&set, 500);
        assert_eq!(report.neighbourhood.len(), 149);
    }
}
