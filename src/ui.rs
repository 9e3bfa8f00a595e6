//! HUD text and end-of-session messages
//!
//! Everything here reads session state and produces strings; nothing writes back.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{GameState, SessionPhase, SessionResult};

/// Encouragement lines shown under the final score
pub const ENCOURAGEMENTS: &[&str] = &[
    "Keep going, you're doing great!",
    "Victory is within reach!",
    "You're amazing!",
    "Persistence wins!",
    "Believe in yourself, you can do it!",
    "Every jump is full of power!",
    "Your reflexes are lightning fast!",
    "Stay focused, you've got this!",
    "You're the best!",
    "Perfect jump!",
    "Your skills keep getting better!",
    "Hard work always pays off!",
    "Truly impressive!",
    "You're a legend!",
    "Try again and make a miracle!",
    "Your determination is inspiring!",
    "Every step is rock solid!",
    "You have unlimited potential!",
    "Keep this rhythm, it's perfect!",
    "Never give up, keep moving forward!",
    "You're a dodging master!",
    "Perfect timing!",
];

/// Text shown in the HUD each frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// Remaining time as `m:ss`
    pub time: String,
    pub score: String,
    /// `passed/total`
    pub obstacles: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            time: format_clock(state.time_remaining()),
            score: state.score().to_string(),
            obstacles: format!("{}/{}", state.obstacles_passed, state.total_obstacles()),
        }
    }
}

/// Whole seconds as `m:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Label for the start/pause control
pub fn pause_label(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Paused => "Resume",
        _ => "Pause",
    }
}

/// Seeded picker for encouragement lines
pub struct Encouragement {
    rng: Pcg32,
}

impl Encouragement {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self) -> &'static str {
        ENCOURAGEMENTS[self.rng.random_range(0..ENCOURAGEMENTS.len())]
    }
}

/// End-of-session message lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndMessage {
    pub headline: &'static str,
    pub lines: Vec<String>,
}

impl EndMessage {
    pub fn compose(result: &SessionResult, encouragement: Option<&str>) -> Self {
        let headline = if result.won {
            "Congratulations! You made it to the end!"
        } else {
            "Game over!"
        };
        let mut lines = vec![
            format!("Final score: {}", result.score),
            format!("Obstacles dodged: {}", result.obstacles_passed),
        ];
        if let Some(line) = encouragement {
            lines.push(line.to_string());
        }
        Self { headline, lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(125), "2:05");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn test_hud_fresh_session() {
        let state = GameState::new(Tuning::default());
        let hud = Hud::from_state(&state);
        assert_eq!(hud.time, "3:00");
        assert_eq!(hud.score, "0");
        assert_eq!(hud.obstacles, "0/90");
    }

    #[test]
    fn test_hud_mid_session() {
        let mut state = GameState::new(Tuning::default());
        state.elapsed_secs = 61.4;
        state.obstacles_passed = 9;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.time, "1:59");
        assert_eq!(hud.score, "10");
        assert_eq!(hud.obstacles, "9/90");
    }

    #[test]
    fn test_encouragement_is_seeded() {
        let mut a = Encouragement::new(7);
        let mut b = Encouragement::new(7);
        for _ in 0..10 {
            let line = a.pick();
            assert_eq!(line, b.pick());
            assert!(ENCOURAGEMENTS.contains(&line));
        }
    }

    #[test]
    fn test_end_message() {
        let won = SessionResult {
            won: true,
            score: 97,
            obstacles_passed: 87,
        };
        let msg = EndMessage::compose(&won, Some("Perfect timing!"));
        assert!(msg.headline.starts_with("Congratulations"));
        assert_eq!(
            msg.lines,
            vec!["Final score: 97", "Obstacles dodged: 87", "Perfect timing!"]
        );

        let lost = SessionResult {
            won: false,
            score: 3,
            obstacles_passed: 3,
        };
        let msg = EndMessage::compose(&lost, None);
        assert_eq!(msg.headline, "Game over!");
        assert_eq!(msg.lines.len(), 2);
    }

    #[test]
    fn test_pause_label() {
        assert_eq!(pause_label(SessionPhase::Running), "Pause");
        assert_eq!(pause_label(SessionPhase::Paused), "Resume");
    }
}
