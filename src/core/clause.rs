//! Defines hint clauses and the per-player store that holds them.

use itertools::Itertools;

use super::{Card, Error, Player};

/// A disjunctive hint: the player holds at least one of these cards.  We
/// learn one when a player privately shows one of several suggested cards to
/// someone else.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Clause(Vec<Card>);

impl Clause {
  /// The fewest cards a new clause may name.
  pub const MIN_LEN: usize = 2;
  /// The most cards a new clause may name.
  pub const MAX_LEN: usize = 3;

  /// Makes a clause from 2 or 3 distinct cards.
  pub fn new(cards: &[Card]) -> Result<Clause, Error> {
    if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&cards.len()) {
      return Err(Error::invalid(format!(
        "a hint names {} to {} cards, not {}",
        Self::MIN_LEN,
        Self::MAX_LEN,
        cards.len()
      )));
    }
    if !cards.iter().all_unique() {
      return Err(Error::invalid("a hint names distinct cards"));
    }
    Ok(Clause(cards.iter().copied().sorted().collect()))
  }

  /// The cards named, in ascending order.  After simplification this may be
  /// fewer than `MIN_LEN`.
  pub fn cards(&self) -> &[Card] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Tells whether this clause names the card.
  pub fn contains(&self, card: Card) -> bool {
    self.0.binary_search(&card).is_ok()
  }

  /// Drops the members that fail the predicate.
  pub(crate) fn retain(&mut self, keep: impl FnMut(&Card) -> bool) {
    self.0.retain(keep);
  }
}

/// Every player's outstanding hint clauses.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Conditions {
  by_player: Vec<Vec<Clause>>,
}

impl Conditions {
  /// Makes an empty store for the given number of players.
  pub fn new(num_players: usize) -> Self {
    Conditions {
      by_player: vec![Vec::new(); num_players],
    }
  }

  /// The given player's clauses, oldest first.  The player must be seated.
  pub fn get(&self, player: Player) -> &[Clause] {
    &self.by_player[player.index()]
  }

  /// How many clauses there are across all players.
  pub fn len(&self) -> usize {
    self.by_player.iter().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.by_player.iter().all(Vec::is_empty)
  }

  pub(crate) fn push(&mut self, player: Player, clause: Clause) {
    self.by_player[player.index()].push(clause);
  }

  /// Removes and returns the given player's clauses.
  pub(crate) fn take(&mut self, player: Player) -> Vec<Clause> {
    std::mem::take(&mut self.by_player[player.index()])
  }

  /// Replaces the given player's clauses.
  pub(crate) fn replace(&mut self, player: Player, clauses: Vec<Clause>) {
    self.by_player[player.index()] = clauses;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cards(ids: &[u8]) -> Vec<Card> {
    ids.iter().copied().map(Card::new).collect()
  }

  #[test]
  fn new_sorts_and_checks() {
    let clause = Clause::new(&cards(&[7, 2, 13])).unwrap();
    assert_eq!(&cards(&[2, 7, 13])[..], clause.cards());
    assert!(clause.contains(Card::new(13)));
    assert!(!clause.contains(Card::new(3)));
    assert!(Clause::new(&cards(&[4])).is_err());
    assert!(Clause::new(&cards(&[1, 2, 3, 4])).is_err());
    assert!(Clause::new(&cards(&[5, 5])).is_err());
  }

  #[test]
  fn store_per_player() {
    let p1 = Player::new(1).unwrap();
    let p2 = Player::new(2).unwrap();
    let mut conditions = Conditions::new(2);
    assert!(conditions.is_empty());
    conditions.push(p2, Clause::new(&cards(&[0, 1])).unwrap());
    conditions.push(p2, Clause::new(&cards(&[2, 3, 4])).unwrap());
    assert_eq!(0, conditions.get(p1).len());
    assert_eq!(2, conditions.get(p2).len());
    assert_eq!(2, conditions.len());
    let taken = conditions.take(p2);
    assert!(conditions.is_empty());
    conditions.replace(p2, taken[1..].to_vec());
    assert_eq!(1, conditions.len());
  }
}
