//! Defines the Setup: the configuration of one game, from which every size the
//! deduction depends on is derived.

use serde::{Deserialize, Serialize};

use super::{Card, Catalog, Error, Location, Player};

/// A catalog plus the number of players at the table.
///
/// Every card not in the envelope is dealt out evenly; the remainder that
/// can't be dealt evenly goes face up into the leftover pile.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SetupRecord", into = "SetupRecord")]
pub struct Setup {
  catalog: Catalog,
  num_players: usize,
}

/// The serialized form of a `Setup`, before validation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SetupRecord {
  pub catalog: Catalog,
  pub players: usize,
}

/// The column of the tableau holding the leftover pile.
pub(crate) const LEFTOVER_COLUMN: usize = 0;
/// The column of the tableau holding the envelope.
pub(crate) const ENVELOPE_COLUMN: usize = 1;

impl Setup {
  /// Makes a Setup.  There must be at least one player; the usual 3 to 6 is
  /// a rule of the game, not of deduction, and isn't enforced here.
  pub fn new(catalog: Catalog, num_players: usize) -> Result<Setup, Error> {
    if num_players == 0 || num_players > Player::MAX {
      return Err(Error::invalid(format!(
        "a game needs 1 to {} players, not {}",
        Player::MAX,
        num_players
      )));
    }
    Ok(Setup {
      catalog,
      num_players,
    })
  }

  /// A Setup for the standard catalog.
  pub fn classic(num_players: usize) -> Result<Setup, Error> {
    Setup::new(Catalog::classic().clone(), num_players)
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn num_players(&self) -> usize {
    self.num_players
  }

  pub fn num_cards(&self) -> usize {
    self.catalog.num_cards()
  }

  pub fn num_categories(&self) -> usize {
    self.catalog.num_categories()
  }

  /// How many cards each player is dealt.
  pub fn hand_size(&self) -> usize {
    self.catalog.num_cards_in_play() / self.num_players
  }

  /// How many cards end up face up in the leftover pile.
  pub fn num_leftover(&self) -> usize {
    self.catalog.num_cards_in_play() % self.num_players
  }

  /// How many locations there are: the leftover pile, the envelope, and one
  /// hand per player.
  pub fn num_locations(&self) -> usize {
    self.num_players + 2
  }

  /// Iterates the players in ascending order.
  pub fn players(&self) -> impl Iterator<Item = Player> {
    Player::all(self.num_players)
  }

  /// Iterates every location in ascending id order.
  pub fn locations(&self) -> impl Iterator<Item = Location> {
    [Location::Leftover, Location::Envelope]
      .into_iter()
      .chain(self.players().map(Location::Hand))
  }

  /// Tells whether the given card is part of this game.
  pub fn has_card(&self, card: Card) -> bool {
    self.catalog.contains(card)
  }

  /// Tells whether the given location exists at this table.
  pub fn has_location(&self, location: Location) -> bool {
    match location {
      Location::Hand(player) => player.number() as usize <= self.num_players,
      _ => true,
    }
  }

  /// How many cards the given location holds once everything is known.  The
  /// envelope's capacity is also limited to one card per category.
  pub fn capacity(&self, location: Location) -> usize {
    match location {
      Location::Leftover => self.num_leftover(),
      Location::Envelope => self.num_categories(),
      Location::Hand(_) => self.hand_size(),
    }
  }

  /// Checks a card id against this game.
  pub(crate) fn check_card(&self, card: Card) -> Result<(), Error> {
    if self.has_card(card) {
      Ok(())
    } else {
      Err(Error::invalid(format!(
        "{} is out of range: there are {} cards",
        card,
        self.num_cards()
      )))
    }
  }

  /// Checks a location against this table.
  pub(crate) fn check_location(&self, location: Location) -> Result<(), Error> {
    if self.has_location(location) {
      Ok(())
    } else {
      Err(Error::invalid(format!(
        "there is no {}: there are {} players",
        location, self.num_players
      )))
    }
  }

  /// The tableau column for a location this table has.
  pub(crate) fn column(&self, location: Location) -> usize {
    debug_assert!(self.has_location(location));
    match location {
      Location::Leftover => LEFTOVER_COLUMN,
      Location::Envelope => ENVELOPE_COLUMN,
      Location::Hand(player) => player.number() as usize + 1,
    }
  }

  /// The location of a tableau column.
  pub(crate) fn location(&self, column: usize) -> Location {
    match column {
      LEFTOVER_COLUMN => Location::Leftover,
      ENVELOPE_COLUMN => Location::Envelope,
      _ => match Player::from_index(column - 2) {
        Some(player) => Location::Hand(player),
        None => unreachable!("column {} is past the last player", column),
      },
    }
  }
}

impl TryFrom<SetupRecord> for Setup {
  type Error = Error;

  fn try_from(record: SetupRecord) -> Result<Self, Self::Error> {
    Setup::new(record.catalog, record.players)
  }
}

impl From<Setup> for SetupRecord {
  fn from(setup: Setup) -> Self {
    SetupRecord {
      catalog: setup.catalog,
      players: setup.num_players,
    }
  }
}
