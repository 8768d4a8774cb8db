use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Instant;

use uuid::Uuid;

/// Progress of a single upload through the pipeline. Stages are entered strictly in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestState {
    Received,
    Staged,
    Probed,
    Classified,
    Remuxed,
    Published,
    Finalized,
}

impl IngestState {
    pub fn next(self) -> Option<IngestState> {
        match self {
            IngestState::Received => Some(IngestState::Staged),
            IngestState::Staged => Some(IngestState::Probed),
            IngestState::Probed => Some(IngestState::Classified),
            IngestState::Classified => Some(IngestState::Remuxed),
            IngestState::Remuxed => Some(IngestState::Published),
            IngestState::Published => Some(IngestState::Finalized),
            IngestState::Finalized => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IngestState::Received => "received",
            IngestState::Staged => "staged",
            IngestState::Probed => "probed",
            IngestState::Classified => "classified",
            IngestState::Remuxed => "remuxed",
            IngestState::Published => "published",
            IngestState::Finalized => "finalized",
        }
    }
}

impl Display for IngestState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Tracks and logs the transitions of one run.
pub(crate) struct StateTracker {
    video_id: Uuid,
    state: IngestState,
    started: Instant,
}

impl StateTracker {
    pub(crate) fn new(video_id: Uuid) -> Self {
        Self {
            video_id,
            state: IngestState::Received,
            started: Instant::now(),
        }
    }

    pub(crate) fn current(&self) -> IngestState {
        self.state
    }

    pub(crate) fn advance(&mut self, to: IngestState) {
        debug_assert_eq!(self.state.next(), Some(to), "ingest stages must not be skipped");
        self.state = to;
        tracing::debug!(
            video_id = %self.video_id,
            state = %to,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Ingest advanced"
        );
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_form_a_single_chain() {
        let mut state = IngestState::Received;
        let mut visited = vec![state];
        while let Some(next) = state.next() {
            assert!(next > state);
            visited.push(next);
            state = next;
        }
        assert_eq!(visited.len(), 7);
        assert_eq!(state, IngestState::Finalized);
    }

    #[test]
    fn test_tracker_advances_in_order() {
        let mut tracker = StateTracker::new(Uuid::new_v4());
        tracker.advance(IngestState::Staged);
        tracker.advance(IngestState::Probed);
        assert_eq!(tracker.current(), IngestState::Probed);
    }
}
