//! Defines the core types for tracking what is known about a hidden-envelope
//! card game.
//!
//! Among these are:
//!
//! - Card, Category, Catalog: the cards and how they're grouped
//! - Player, Location: where a card can be
//! - Setup: a catalog plus the number of players, and the sizes they imply
//! - Cell: what is known about one card at one location
//! - Assignment: the confirmed placements, which enforce capacities
//! - Tableau: the grid of cells, plus each player's hint clauses

mod asgmt;
mod catalog;
mod cell;
mod clause;
mod id_types;
mod loc;
mod setup;
mod tableau;

pub use asgmt::*;
pub use catalog::*;
pub use cell::*;
pub use clause::*;
pub use loc::*;
pub use setup::*;
pub use tableau::*;

use thiserror::Error;

/// The errors this crate reports.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
  /// A fact, inserted or derived, is inconsistent with what was already
  /// known.  The tableau that raised it is no longer usable.
  #[error("contradiction: {0}")]
  Contradiction(#[from] Contradiction),
  /// An id, state, or shape outside what the game allows.  Nothing was
  /// changed.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),
}

impl Error {
  pub(crate) fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidArgument(message.into())
  }
}

/// The ways facts can contradict each other.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Contradiction {
  /// The cell already holds the opposite fact.
  #[error("{card} is already known to be {known} at {location}")]
  Conflict {
    location: Location,
    card: Card,
    known: Cell,
  },
  /// The location is already full.
  #[error("there is no room for {card} at {location}")]
  NoRoom { location: Location, card: Card },
  /// Every location has been ruled out for the card.
  #[error("{card} has nowhere left to be")]
  NoLocation { card: Card },
  /// Ruling the card out would leave too few candidates to fill the
  /// location.
  #[error("ruling out {card} leaves {location} too few cards")]
  Starved { location: Location, card: Card },
  /// Ruling the card out of the envelope would leave its category with no
  /// candidate.
  #[error("ruling out {card} leaves the envelope without a {category} card")]
  EmptyCategory { category: Category, card: Card },
  /// The location has fewer candidates than it holds cards.
  #[error("{location} cannot be filled")]
  Unfillable { location: Location },
  /// The location has more confirmed cards than it holds.
  #[error("{location} holds too many cards")]
  Overfilled { location: Location },
  /// No card of the category can be in the envelope.
  #[error("the envelope cannot hold a {category} card")]
  CategoryUnfillable { category: Category },
  /// More than one card of the category is in the envelope.
  #[error("the envelope holds more than one {category} card")]
  CategoryOverfilled { category: Category },
  /// The player can hold none of the cards of one of their hints.
  #[error("{player} cannot hold any of {cards:?}")]
  EmptyClause { player: Player, cards: Vec<Card> },
}
