//! Difficulty tiers select the speed envelope of a play session.
//! Tiers change pacing only -- they NEVER change movement or collision rules.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    /// All tiers in menu order.
    pub const ALL: &'static [Difficulty] = &[
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    /// Tier by menu index (0-3); out-of-range input falls back to Medium.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
            Self::Impossible => 3,
        }
    }

    /// Steps per second at score zero.
    pub fn base_speed(self) -> f64 {
        match self {
            Self::Easy => 5.0,
            Self::Medium => 7.0,
            Self::Hard => 9.0,
            Self::Impossible => 12.0,
        }
    }

    /// Speed ceiling the score-driven ramp is clamped to.
    pub fn max_speed(self) -> f64 {
        match self {
            Self::Easy => 9.0,
            Self::Medium => 12.0,
            Self::Hard => 17.0,
            Self::Impossible => 25.0,
        }
    }

    /// Short human-readable label for menus and the leaderboard title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Impossible => "Impossible",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
