//! Difficulty progression driven by score

use super::config::GameConfig;

/// Result of eating one food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodOutcome {
    pub score: u32,
    pub tick_interval_ms: u32,
    /// Obstacles to add (0 or 1)
    pub obstacle_delta: u32,
}

/// Score, speed and obstacle bookkeeping for a single food
pub fn on_food_eaten(score: u32, tick_interval_ms: u32, config: &GameConfig) -> FoodOutcome {
    let score = score + config.food_score;
    let tick_interval_ms = tick_interval_ms
        .saturating_sub(config.interval_step_ms)
        .max(config.min_interval_ms);
    let obstacle_delta =
        u32::from(score >= config.obstacle_score_step && score % config.obstacle_score_step == 0);

    FoodOutcome {
        score,
        tick_interval_ms,
        obstacle_delta,
    }
}

/// Whether obstacles wander at this score
pub fn obstacles_wander(score: u32, config: &GameConfig) -> bool {
    score >= config.obstacle_move_score
}

/// Obstacles a run holds after reaching `score` one food at a time
pub fn obstacles_for_score(score: u32, config: &GameConfig) -> u32 {
    score / config.obstacle_score_step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_adds_score_and_speeds_up() {
        let config = GameConfig::default();
        let out = on_food_eaten(0, 150, &config);
        assert_eq!(out.score, 10);
        assert_eq!(out.tick_interval_ms, 145);
        assert_eq!(out.obstacle_delta, 0);
    }

    #[test]
    fn test_obstacle_on_multiples_of_fifty() {
        let config = GameConfig::default();
        assert_eq!(on_food_eaten(40, 100, &config).obstacle_delta, 1);
        assert_eq!(on_food_eaten(50, 100, &config).obstacle_delta, 0);
        assert_eq!(on_food_eaten(90, 100, &config).obstacle_delta, 1);
    }

    #[test]
    fn test_interval_floor() {
        let config = GameConfig::default();
        assert_eq!(on_food_eaten(0, 53, &config).tick_interval_ms, 50);
        assert_eq!(on_food_eaten(0, 50, &config).tick_interval_ms, 50);
        assert_eq!(on_food_eaten(0, 2, &config).tick_interval_ms, 50);
    }

    #[test]
    fn test_wander_threshold() {
        let config = GameConfig::default();
        assert!(!obstacles_wander(190, &config));
        assert!(obstacles_wander(200, &config));
        assert_eq!(obstacles_for_score(200, &config), 4);
    }
}
