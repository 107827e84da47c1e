//! Defines the Player and Location types: where a card can be.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

use super::Error;

/// Identifies one of the players at the table.  Players are numbered from 1,
/// matching their hand's location id.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Player(NonZeroU8);

impl Player {
  /// The most players a table can seat.
  pub const MAX: usize = i8::MAX as usize;

  /// Makes an optional Player from its number, present when it's in range
  /// and absent otherwise.
  pub fn new(number: u8) -> Option<Self> {
    if number as usize > Self::MAX {
      return None;
    }
    NonZeroU8::new(number).map(Player)
  }

  /// Makes a Player from a zero-based index, if it's in range.
  pub fn from_index(i: usize) -> Option<Self> {
    u8::try_from(i + 1).ok().and_then(Self::new)
  }

  /// Returns this player's number, which starts at 1.
  pub fn number(self) -> u8 {
    self.0.get()
  }

  /// Returns this player's zero-based index.
  pub fn index(self) -> usize {
    (self.number() - 1) as usize
  }

  /// Iterates players 1 through `num_players`.
  pub fn all(num_players: usize) -> impl Iterator<Item = Self> {
    (0..num_players).filter_map(Self::from_index)
  }
}

impl TryFrom<u8> for Player {
  type Error = Error;

  fn try_from(number: u8) -> Result<Self, Self::Error> {
    Player::new(number).ok_or_else(|| Error::invalid(format!("{} is not a player number", number)))
  }
}

impl From<Player> for u8 {
  fn from(player: Player) -> Self {
    player.number()
  }
}

impl fmt::Display for Player {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "player {}", self.number())
  }
}

/// A place a card can be: the face-up leftover pile, the secret envelope, or
/// a player's hand.  The integer ids are -1, 0, and the player's number.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Location {
  Leftover,
  Envelope,
  Hand(Player),
}

impl Location {
  /// Returns this location's integer id.
  pub fn id(self) -> i16 {
    match self {
      Location::Leftover => -1,
      Location::Envelope => 0,
      Location::Hand(player) => player.number() as i16,
    }
  }

  /// Makes a Location from its integer id, if it's a possible id.  Whether
  /// the player actually sits at a given table is checked by the `Setup`.
  pub fn from_id(id: i16) -> Option<Self> {
    match id {
      -1 => Some(Location::Leftover),
      0 => Some(Location::Envelope),
      _ => u8::try_from(id).ok().and_then(Player::new).map(Location::Hand),
    }
  }

  /// The player whose hand this is, if it is a hand.
  pub fn player(self) -> Option<Player> {
    match self {
      Location::Hand(player) => Some(player),
      _ => None,
    }
  }
}

impl From<Player> for Location {
  fn from(player: Player) -> Self {
    Location::Hand(player)
  }
}

impl TryFrom<i16> for Location {
  type Error = Error;

  fn try_from(id: i16) -> Result<Self, Self::Error> {
    Location::from_id(id).ok_or_else(|| Error::invalid(format!("{} is not a location id", id)))
  }
}

impl From<Location> for i16 {
  fn from(location: Location) -> Self {
    location.id()
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Location::Leftover => f.write_str("the leftover pile"),
      Location::Envelope => f.write_str("the envelope"),
      Location::Hand(player) => write!(f, "{}'s hand", player),
    }
  }
}
