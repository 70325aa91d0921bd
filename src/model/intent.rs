//! Canonical navigation intents, independent of the signal that produced them.

/// Renderer-agnostic navigation command derived from raw input.
///
/// Produced by the input normalizer and consumed immediately by the
/// pagination dispatcher. Never persisted or queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationIntent {
    // Taps
    /// Page turn towards the left screen edge.
    ClickLeft,
    /// Page turn towards the right screen edge.
    ClickRight,
    /// Tap in the centre band (or with clicks disabled). Explicit no-op.
    ClickCenter,

    // Swipes
    /// Finger travelled right-to-left.
    SwipeLeft,
    /// Finger travelled left-to-right.
    SwipeRight,

    // Wheel (paginated mode only)
    /// Retreat by one renderer unit.
    WheelUp,
    /// Advance by one renderer unit.
    WheelDown,

    // History (mouse side buttons)
    HistoryBack,
    HistoryForward,

    // Hardware keys
    /// Volume-up with volume flipping enabled. Same effect as `ClickLeft`.
    VolumeUpFlip,
    /// Volume-down with volume flipping enabled. Same effect as `ClickRight`.
    VolumeDownFlip,
}

impl NavigationIntent {
    /// Screen side for intents that resolve to a page turn.
    pub fn page_side(self) -> Option<Side> {
        match self {
            NavigationIntent::ClickLeft | NavigationIntent::VolumeUpFlip => Some(Side::Left),
            NavigationIntent::ClickRight | NavigationIntent::VolumeDownFlip => Some(Side::Right),
            _ => None,
        }
    }

    /// The tap intent for a screen side.
    pub fn click(side: Side) -> Self {
        match side {
            Side::Left => NavigationIntent::ClickLeft,
            Side::Right => NavigationIntent::ClickRight,
        }
    }

    /// The swipe intent for a finger direction.
    pub fn swipe(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => NavigationIntent::SwipeLeft,
            SwipeDirection::Right => NavigationIntent::SwipeRight,
        }
    }
}

/// One half of the reading surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite side.
    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Flip when `condition` holds. Flips compose by XOR.
    pub fn flipped_if(self, condition: bool) -> Self {
        if condition {
            self.flipped()
        } else {
            self
        }
    }
}

/// Direction of travel of a horizontal swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}
