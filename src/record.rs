//! Defines GameRecord, a serializable log of one observer's knowledge of a
//! game, which can be replayed into a tableau.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::*;
use crate::deduce::{Engine, Outcome};

/// One thing the observer learned.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
  /// The card is (state 1) or is not (state -1) at the location.
  Fact {
    location: Location,
    card: Card,
    state: Cell,
  },
  /// The player holds at least one of the cards.
  Hint { player: Player, cards: Vec<Card> },
}

/// A game's setup and the events observed in it, in order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
  pub setup: Setup,
  #[serde(default)]
  pub events: Vec<Event>,
}

impl GameRecord {
  /// Parses a record from JSON.
  pub fn from_json(json: &str) -> Result<GameRecord, Error> {
    serde_json::from_str(json).map_err(|e| Error::invalid(e.to_string()))
  }

  /// Applies every event to a fresh tableau, running the engine to its
  /// fixpoint after each one.  Returns the tableau and the final outcome.
  pub fn replay(&self, engine: &mut Engine) -> Result<(Tableau, Outcome), Error> {
    let mut tableau = Tableau::new(self.setup.clone());
    let mut outcome = engine.run(&mut tableau)?;
    for (i, event) in self.events.iter().enumerate() {
      debug!(event = i, ?event, "replay");
      match event {
        Event::Fact {
          location,
          card,
          state,
        } => tableau.set_fact(*location, *card, *state)?,
        Event::Hint { player, cards } => tableau.add_condition(*player, cards)?,
      }
      outcome = engine.run(&mut tableau)?;
    }
    Ok((tableau, outcome))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SOLVABLE: &str = r#"{
    "setup": {"catalog": [0, 0, 0, 1, 1, 1, 2, 2, 2], "players": 3},
    "events": [
      {"kind": "fact", "location": 1, "card": 1, "state": 1},
      {"kind": "fact", "location": 1, "card": 4, "state": 1},
      {"kind": "fact", "location": 2, "card": 0, "state": -1},
      {"kind": "fact", "location": 2, "card": 3, "state": -1},
      {"kind": "fact", "location": 2, "card": 6, "state": -1},
      {"kind": "fact", "location": 3, "card": 0, "state": -1},
      {"kind": "fact", "location": 3, "card": 3, "state": -1},
      {"kind": "fact", "location": 3, "card": 6, "state": -1},
      {"kind": "hint", "player": 2, "cards": [2, 5]},
      {"kind": "fact", "location": 2, "card": 5, "state": -1},
      {"kind": "fact", "location": 3, "card": 8, "state": 1},
      {"kind": "fact", "location": 3, "card": 7, "state": -1}
    ]
  }"#;

  #[test]
  fn replays_to_solution() {
    let record = GameRecord::from_json(SOLVABLE).unwrap();
    assert_eq!(12, record.events.len());
    let (tableau, outcome) = record.replay(&mut Engine::new()).unwrap();
    assert_eq!(
      Outcome::Solved {
        envelope: vec![Card::new(0), Card::new(3), Card::new(6)]
      },
      outcome
    );
    let p2 = Location::Hand(Player::new(2).unwrap());
    assert_eq!(vec![Card::new(2), Card::new(7)], tableau.cards_at(p2).unwrap());
  }

  #[test]
  fn reports_contradictions() {
    let json = r#"{
      "setup": {"catalog": [0, 0, 1, 1], "players": 2},
      "events": [
        {"kind": "fact", "location": 1, "card": 0, "state": 1},
        {"kind": "fact", "location": 2, "card": 0, "state": 1}
      ]
    }"#;
    let record = GameRecord::from_json(json).unwrap();
    assert!(matches!(
      record.replay(&mut Engine::new()),
      Err(Error::Contradiction(_))
    ));
  }

  #[test]
  fn rejects_malformed_records() {
    let bad_state = r#"{"setup": {"catalog": [0, 1], "players": 1},
      "events": [{"kind": "fact", "location": 1, "card": 0, "state": 0}]}"#;
    let record = GameRecord::from_json(bad_state).unwrap();
    assert!(matches!(
      record.replay(&mut Engine::new()),
      Err(Error::InvalidArgument(_))
    ));
    let bad_int = r#"{"setup": {"catalog": [0, 1], "players": 1},
      "events": [{"kind": "fact", "location": 1, "card": 0, "state": 2}]}"#;
    assert!(GameRecord::from_json(bad_int).is_err());
    let no_players = r#"{"setup": {"catalog": [0, 1], "players": 0}}"#;
    assert!(GameRecord::from_json(no_players).is_err());
  }

  #[test]
  fn round_trips_through_json() {
    let record = GameRecord::from_json(SOLVABLE).unwrap();
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(record, GameRecord::from_json(&json).unwrap());
  }
}
