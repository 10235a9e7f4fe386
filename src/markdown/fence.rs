/// A fence is a line starting with three backticks at column 0
pub fn is_fence(line: &str) -> bool {
    line.starts_with("```")
}

/// Opening fence with no language tag
pub fn is_untagged_fence(line: &str) -> bool {
    line.trim_end() == "```"
}

/// Position of a line relative to fenced code blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceState {
    Opening,
    Closing,
    Inside,
    Outside,
}

/// Line-by-line fenced block tracker
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: bool,
}

impl FenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `line` and advance past it
    pub fn step(&mut self, line: &str) -> FenceState {
        if is_fence(line) {
            self.open = !self.open;
            if self.open {
                FenceState::Opening
            } else {
                FenceState::Closing
            }
        } else if self.open {
            FenceState::Inside
        } else {
            FenceState::Outside
        }
    }
}
