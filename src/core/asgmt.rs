//! Defines `Assignment`, the bookkeeping of confirmed card placements that
//! enforces each location's capacity.

use super::{Card, Error, Location, Setup, ENVELOPE_COLUMN};

/// A partial placement of cards into locations, which is always valid:
///
/// - each hand holds no more than the hand size,
/// - the leftover pile holds no more than the leftover count,
/// - the envelope holds at most one card of each category.
///
/// The `Tableau` owns one of these and records every Present fact in it; it
/// never calls back into the tableau.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
  setup: Setup,
  /// Where each card is assigned, indexed by card.
  locations: Vec<Option<Location>>,
  /// How many cards are assigned to each tableau column.
  counts: Vec<usize>,
  /// The envelope card assigned for each category, indexed by category.
  envelope: Vec<Option<Card>>,
}

impl Assignment {
  /// Makes an empty Assignment for the given game.
  pub fn new(setup: &Setup) -> Self {
    Assignment {
      setup: setup.clone(),
      locations: vec![None; setup.num_cards()],
      counts: vec![0; setup.num_locations()],
      envelope: vec![None; setup.num_categories()],
    }
  }

  /// Tries to assign the card to the location.  Returns false, leaving this
  /// assignment unchanged, if the location is already full; otherwise records
  /// the assignment (moving the card if it was assigned elsewhere) and
  /// returns true.
  pub fn try_assign(&mut self, card: Card, location: Location) -> Result<bool, Error> {
    self.setup.check_card(card)?;
    self.setup.check_location(location)?;
    if self.locations[card.index()] == Some(location) {
      return Ok(true);
    }
    let full = match location {
      Location::Envelope => self.envelope[self.setup.catalog().category(card).index()].is_some(),
      _ => self.counts[self.setup.column(location)] >= self.setup.capacity(location),
    };
    if full {
      return Ok(false);
    }
    self.unrecord(card);
    self.locations[card.index()] = Some(location);
    self.counts[self.setup.column(location)] += 1;
    if location == Location::Envelope {
      self.envelope[self.setup.catalog().category(card).index()] = Some(card);
    }
    Ok(true)
  }

  /// Clears the card's assignment, if any, and returns where it was.  This
  /// always preserves validity because the limits are all upper bounds.
  pub fn deassign(&mut self, card: Card) -> Result<Option<Location>, Error> {
    self.setup.check_card(card)?;
    Ok(self.unrecord(card))
  }

  /// Where the card is assigned, if anywhere.
  pub fn location_of(&self, card: Card) -> Result<Option<Location>, Error> {
    self.setup.check_card(card)?;
    Ok(self.locations[card.index()])
  }

  /// The cards assigned to the location, in ascending order.
  pub fn cards_at(&self, location: Location) -> Result<Vec<Card>, Error> {
    self.setup.check_location(location)?;
    Ok(
      self
        .setup
        .catalog()
        .cards()
        .filter(|card| self.locations[card.index()] == Some(location))
        .collect(),
    )
  }

  /// How many cards are assigned to the location.
  pub fn count_at(&self, location: Location) -> Result<usize, Error> {
    self.setup.check_location(location)?;
    Ok(self.counts[self.setup.column(location)])
  }

  /// How many cards are assigned anywhere.
  pub fn len(&self) -> usize {
    self.counts.iter().sum()
  }

  /// Tells whether no cards are assigned.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Helper for `try_assign` and `deassign`; the card must be in range.
  fn unrecord(&mut self, card: Card) -> Option<Location> {
    let previous = self.locations[card.index()].take()?;
    let column = self.setup.column(previous);
    self.counts[column] -= 1;
    if column == ENVELOPE_COLUMN {
      self.envelope[self.setup.catalog().category(card).index()] = None;
    }
    Some(previous)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::{Catalog, Player};

  fn setup() -> Setup {
    // 10 cards, 3 categories, 7 in play: hands of 2 and 1 leftover.
    Setup::new(Catalog::from_sizes(&[3, 3, 4]).unwrap(), 3).unwrap()
  }

  fn hand(n: u8) -> Location {
    Location::Hand(Player::new(n).unwrap())
  }

  #[test]
  fn hand_capacity() {
    let mut asgmt = Assignment::new(&setup());
    assert!(asgmt.try_assign(Card::new(0), hand(1)).unwrap());
    assert!(asgmt.try_assign(Card::new(4), hand(1)).unwrap());
    assert!(!asgmt.try_assign(Card::new(8), hand(1)).unwrap());
    assert_eq!(None, asgmt.location_of(Card::new(8)).unwrap());
    assert_eq!(vec![Card::new(0), Card::new(4)], asgmt.cards_at(hand(1)).unwrap());
    assert_eq!(2, asgmt.len());
  }

  #[test]
  fn leftover_capacity() {
    let mut asgmt = Assignment::new(&setup());
    assert!(asgmt.try_assign(Card::new(9), Location::Leftover).unwrap());
    assert!(!asgmt.try_assign(Card::new(8), Location::Leftover).unwrap());
    assert_eq!(1, asgmt.count_at(Location::Leftover).unwrap());
  }

  #[test]
  fn envelope_one_per_category() {
    let mut asgmt = Assignment::new(&setup());
    assert!(asgmt.try_assign(Card::new(1), Location::Envelope).unwrap());
    assert!(!asgmt.try_assign(Card::new(2), Location::Envelope).unwrap());
    assert!(asgmt.try_assign(Card::new(3), Location::Envelope).unwrap());
    assert!(asgmt.try_assign(Card::new(9), Location::Envelope).unwrap());
    assert_eq!(3, asgmt.count_at(Location::Envelope).unwrap());
  }

  #[test]
  fn deassign_frees_room() {
    let mut asgmt = Assignment::new(&setup());
    assert!(asgmt.try_assign(Card::new(1), Location::Envelope).unwrap());
    assert_eq!(Some(Location::Envelope), asgmt.deassign(Card::new(1)).unwrap());
    assert_eq!(None, asgmt.deassign(Card::new(1)).unwrap());
    assert!(asgmt.try_assign(Card::new(2), Location::Envelope).unwrap());
    assert!(asgmt.cards_at(Location::Envelope).unwrap() == vec![Card::new(2)]);
  }

  #[test]
  fn reassigning_moves_the_card() {
    let mut asgmt = Assignment::new(&setup());
    assert!(asgmt.try_assign(Card::new(0), hand(1)).unwrap());
    assert!(asgmt.try_assign(Card::new(0), hand(1)).unwrap());
    assert!(asgmt.try_assign(Card::new(0), hand(2)).unwrap());
    assert_eq!(0, asgmt.count_at(hand(1)).unwrap());
    assert_eq!(1, asgmt.count_at(hand(2)).unwrap());
    assert_eq!(1, asgmt.len());
  }

  #[test]
  fn rejects_bad_ids() {
    let mut asgmt = Assignment::new(&setup());
    assert!(matches!(
      asgmt.try_assign(Card::new(10), hand(1)),
      Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
      asgmt.try_assign(Card::new(0), hand(4)),
      Err(Error::InvalidArgument(_))
    ));
    assert!(asgmt.is_empty());
  }
}
