pub mod bomb;
pub mod collision;
pub mod config;
pub mod direction;
pub mod error;
pub mod game;
pub mod grid;
pub mod items;
pub mod maps;
pub mod player;
pub mod position;
pub mod power_up;

pub use config::GameConfig;
pub use error::MapError;
pub use game::{GameEvent, GameManager};
pub use player::PlayerId;
