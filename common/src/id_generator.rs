use rand::Rng;

use crate::GameId;

/// 8 random bytes rendered as 16 lowercase hex characters.
pub fn generate_game_id() -> GameId {
    let mut rng = rand::rng();
    let value: u64 = rng.random();
    GameId::new(format!("{:016x}", value))
}
