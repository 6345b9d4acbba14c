//! The rewriter's state machine and line classification.

/// Where the rewriter is relative to the procedural block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not inside an `initial begin` block.
    #[default]
    Outside,
    /// Between an `initial begin` line and its closing `end`.
    InsideBlock,
}

/// What a line means to the rewriter in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opens the procedural block (`initial ... begin`).
    BlockOpen,
    /// A `$display` announcing a test case.
    VectorMarker,
    /// Closes the procedural block (`end...`).
    BlockClose,
    /// Anything else; emitted unchanged.
    Other,
}

/// Classifies one physical line given the current phase.
///
/// Block opens are only recognized outside a block. Markers and closes are
/// only recognized inside one, and a marker takes priority over a close.
pub fn classify(line: &str, phase: Phase) -> LineKind {
    let trimmed = line.trim();
    match phase {
        Phase::Outside => {
            if trimmed.contains("initial") && trimmed.contains("begin") {
                LineKind::BlockOpen
            } else {
                LineKind::Other
            }
        }
        Phase::InsideBlock => {
            if trimmed.contains("$display") && trimmed.to_lowercase().contains("test") {
                LineKind::VectorMarker
            } else if trimmed.starts_with("end") {
                LineKind::BlockClose
            } else {
                LineKind::Other
            }
        }
    }
}

/// Per-call rewriter state: the phase plus the index of the next vector.
///
/// The cursor only moves forward and returns to zero only on block entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteState {
    phase: Phase,
    cursor: usize,
}

impl RewriteState {
    /// Creates the initial state: outside, cursor at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the index of the vector the next marker will consume.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Enters the procedural block and resets the cursor.
    pub fn enter_block(&mut self) {
        self.phase = Phase::InsideBlock;
        self.cursor = 0;
    }

    /// Consumes one vector slot and returns its index.
    pub fn advance(&mut self) -> usize {
        let index = self.cursor;
        self.cursor += 1;
        index
    }

    /// Leaves the procedural block. The cursor is kept until the next entry.
    pub fn leave_block(&mut self) {
        self.phase = Phase::Outside;
    }
}
