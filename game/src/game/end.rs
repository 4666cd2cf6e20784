use std::fmt;

use crate::player::PlayerId;

type EndCallback = Box<dyn FnMut(Option<&PlayerId>)>;

/// Watches the roster and announces the winner once per game.
#[derive(Default)]
pub struct GameEndDetector {
    players: Vec<PlayerId>,
    callbacks: Vec<EndCallback>,
    ended: bool,
}

impl fmt::Debug for GameEndDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEndDetector")
            .field("players", &self.players)
            .field("callbacks", &self.callbacks.len())
            .field("ended", &self.ended)
            .finish()
    }
}

impl GameEndDetector {
    pub fn register(&mut self, id: PlayerId) {
        if !self.players.contains(&id) {
            self.players.push(id);
        }
    }

    pub fn unregister(&mut self, id: &PlayerId) {
        self.players.retain(|p| p != id);
    }

    pub fn on_game_end(&mut self, callback: impl FnMut(Option<&PlayerId>) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Allow the detector to fire again, for a new round on the same roster.
    pub fn reset(&mut self) {
        self.ended = false;
    }

    /// Fires once at most one registered player is alive. Returns the winner
    /// (`None` for a draw) on the call that ends the game, and `None` on
    /// every other call.
    pub fn check(&mut self, is_alive: impl Fn(&PlayerId) -> bool) -> Option<Option<PlayerId>> {
        if self.ended {
            return None;
        }
        let mut alive = self.players.iter().filter(|&id| is_alive(id));
        let first = alive.next();
        if alive.next().is_some() {
            return None;
        }

        self.ended = true;
        let winner = first.cloned();
        match &winner {
            Some(id) => log::info!("Game over, {id} wins"),
            None => log::info!("Game over, draw"),
        }
        for callback in &mut self.callbacks {
            callback(winner.as_ref());
        }
        Some(winner)
    }
}
