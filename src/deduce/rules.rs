//! The built-in deduction rules.  Each returns whether it wrote at least one
//! new fact into the tableau.

use crate::core::*;

/// Fills the leftover pile once its open cards exactly match its size, or
/// rules out the rest once it's full.
pub fn leftover(tableau: &mut Tableau) -> Result<bool, Error> {
  fill_location(tableau, Location::Leftover)
}

/// For each category with an unresolved envelope cell: puts the single
/// remaining candidate into the envelope, or rules out the others once the
/// category's envelope card is known.
pub fn envelope(tableau: &mut Tableau) -> Result<bool, Error> {
  let mut progress = false;
  let catalog = tableau.setup().catalog().clone();
  for category in catalog.categories() {
    let tally = tableau.category_tally(category)?;
    if tally.unknown == 0 {
      continue;
    }
    if tally.open() < 1 {
      return Err(tableau.contradict(Contradiction::CategoryUnfillable { category }));
    }
    if tally.present > 1 {
      return Err(tableau.contradict(Contradiction::CategoryOverfilled { category }));
    }
    let state = if tally.open() == 1 {
      Cell::Present
    } else if tally.present == 1 {
      Cell::Absent
    } else {
      continue;
    };
    for &card in catalog.members(category) {
      if tableau.cell(Location::Envelope, card)? == Cell::Unknown {
        tableau.set_fact(Location::Envelope, card, state)?;
      }
    }
    progress = true;
  }
  Ok(progress)
}

/// Completes the first unsolved hand whose open cards exactly match the hand
/// size, or which is already full, retiring that player's hints.
pub fn hands(tableau: &mut Tableau) -> Result<bool, Error> {
  let players: Vec<Player> = tableau.setup().players().collect();
  for player in players {
    if fill_location(tableau, Location::Hand(player))? {
      tableau.retire_conditions(player)?;
      return Ok(true);
    }
  }
  Ok(false)
}

/// Places the first card that has only one possible location left.
pub fn rows(tableau: &mut Tableau) -> Result<bool, Error> {
  let cards: Vec<Card> = tableau.setup().catalog().cards().collect();
  for card in cards {
    let tally = tableau.row_tally(card)?;
    if tally.unknown == 0 {
      continue;
    }
    match tally.open() {
      0 => return Err(tableau.contradict(Contradiction::NoLocation { card })),
      1 => {
        let location = tableau.search_row(card, &[Cell::Unknown])?[0];
        tableau.set_fact(location, card, Cell::Present)?;
        return Ok(true);
      }
      _ => {}
    }
  }
  Ok(false)
}

/// Simplifies each unsolved player's hint clauses against their column:
/// satisfied clauses go away, ruled-out cards drop out of the rest.  A clause
/// left with one card places that card in the player's hand; one left with
/// none is a contradiction.
pub fn clauses(tableau: &mut Tableau) -> Result<bool, Error> {
  let players: Vec<Player> = tableau.setup().players().collect();
  for player in players {
    let location = Location::Hand(player);
    if tableau.conditions().get(player).is_empty() {
      continue;
    }
    if tableau.is_column_solved(location)? {
      tableau.retire_conditions(player)?;
      continue;
    }
    let mut pending = tableau.take_conditions(player).into_iter();
    let mut kept = Vec::new();
    let mut unit = None;
    while let Some(mut clause) = pending.next() {
      let mut satisfied = false;
      for &card in clause.cards() {
        satisfied |= tableau.cell(location, card)? == Cell::Present;
      }
      if satisfied {
        continue;
      }
      let mut absent = Vec::new();
      for &card in clause.cards() {
        if tableau.cell(location, card)? == Cell::Absent {
          absent.push(card);
        }
      }
      let original = clause.cards().to_vec();
      clause.retain(|card| !absent.contains(card));
      match clause.len() {
        0 => {
          kept.extend(pending);
          tableau.restore_conditions(player, kept);
          return Err(tableau.contradict(Contradiction::EmptyClause {
            player,
            cards: original,
          }));
        }
        1 => {
          unit = Some(clause.cards()[0]);
          kept.push(clause);
          break;
        }
        _ => kept.push(clause),
      }
    }
    kept.extend(pending);
    tableau.restore_conditions(player, kept);
    if let Some(card) = unit {
      tableau.set_fact(location, card, Cell::Present)?;
      return Ok(true);
    }
  }
  Ok(false)
}

/// Helper for `leftover` and `hands`: resolves every Unknown cell in the
/// location's column when its open count equals its capacity (Present) or
/// its Present count does (Absent).
fn fill_location(tableau: &mut Tableau, location: Location) -> Result<bool, Error> {
  let tally = tableau.tally(location)?;
  if tally.unknown == 0 {
    return Ok(false);
  }
  let capacity = tableau.setup().capacity(location);
  if tally.open() < capacity {
    return Err(tableau.contradict(Contradiction::Unfillable { location }));
  }
  if tally.present > capacity {
    return Err(tableau.contradict(Contradiction::Overfilled { location }));
  }
  let state = if tally.open() == capacity {
    Cell::Present
  } else if tally.present == capacity {
    Cell::Absent
  } else {
    return Ok(false);
  };
  for card in tableau.search_column(location, &[Cell::Unknown])? {
    tableau.set_fact(location, card, state)?;
  }
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;

  /// 10 cards in categories of 3, 3, 4; with 3 players, hands of 2 and one
  /// leftover card.
  fn tableau() -> Tableau {
    Tableau::new(Setup::new(Catalog::from_sizes(&[3, 3, 4]).unwrap(), 3).unwrap())
  }

  fn player(n: u8) -> Player {
    Player::new(n).unwrap()
  }

  fn hand(n: u8) -> Location {
    Location::Hand(player(n))
  }

  fn cards(ids: &[u8]) -> Vec<Card> {
    ids.iter().copied().map(Card::new).collect()
  }

  #[test]
  fn leftover_full_rules_out_the_rest() {
    let mut t = tableau();
    assert!(!leftover(&mut t).unwrap());
    t.set_fact(Location::Leftover, Card::new(9), Cell::Present).unwrap();
    assert!(leftover(&mut t).unwrap());
    assert!(t.is_column_solved(Location::Leftover).unwrap());
    assert_eq!(cards(&[9]), t.search_column(Location::Leftover, &Cell::OPEN).unwrap());
    assert!(!leftover(&mut t).unwrap());
  }

  #[test]
  fn leftover_last_candidate_is_promoted() {
    let mut t = tableau();
    t.mark_at(Location::Leftover, &cards(&[0, 1, 2, 3, 4, 5, 6, 7, 8]), Cell::Absent)
      .unwrap();
    assert!(leftover(&mut t).unwrap());
    assert_eq!(Cell::Present, t.cell(Location::Leftover, Card::new(9)).unwrap());
  }

  #[test]
  fn envelope_single_candidate() {
    let mut t = tableau();
    t.mark_at(Location::Envelope, &cards(&[0, 1]), Cell::Absent).unwrap();
    t.set_fact(Location::Envelope, Card::new(4), Cell::Present).unwrap();
    assert!(envelope(&mut t).unwrap());
    assert_eq!(Cell::Present, t.cell(Location::Envelope, Card::new(2)).unwrap());
    assert_eq!(Cell::Absent, t.cell(Location::Envelope, Card::new(3)).unwrap());
    assert_eq!(Cell::Absent, t.cell(Location::Envelope, Card::new(5)).unwrap());
    assert!(!t.is_complete());
    assert!(!envelope(&mut t).unwrap());
  }

  #[test]
  fn hand_with_exact_candidates_is_filled() {
    let mut t = tableau();
    t.mark_at(hand(2), &cards(&[0, 1, 2, 3, 4, 5, 6, 7]), Cell::Absent).unwrap();
    assert!(hands(&mut t).unwrap());
    assert!(t.is_column_solved(hand(2)).unwrap());
    assert_eq!(cards(&[8, 9]), t.cards_at(hand(2)).unwrap());
  }

  #[test]
  fn full_hand_rules_out_the_rest_and_retires_hints() {
    let mut t = tableau();
    t.add_condition(player(1), &cards(&[0, 5])).unwrap();
    t.mark_at(hand(1), &cards(&[0, 4]), Cell::Present).unwrap();
    assert!(hands(&mut t).unwrap());
    assert!(t.is_column_solved(hand(1)).unwrap());
    assert!(t.conditions().get(player(1)).is_empty());
  }

  #[test]
  fn full_hand_must_satisfy_hints() {
    let mut t = tableau();
    t.add_condition(player(1), &cards(&[1, 5])).unwrap();
    t.mark_at(hand(1), &cards(&[0, 4]), Cell::Present).unwrap();
    assert!(matches!(
      hands(&mut t),
      Err(Error::Contradiction(Contradiction::EmptyClause { .. }))
    ));
    assert!(t.is_broken());
  }

  #[test]
  fn row_with_one_candidate() {
    let mut t = tableau();
    t.mark_for(Card::new(6), &[Location::Leftover, Location::Envelope, hand(1), hand(3)], Cell::Absent)
      .unwrap();
    assert!(rows(&mut t).unwrap());
    assert_eq!(Cell::Present, t.cell(hand(2), Card::new(6)).unwrap());
    assert!(!rows(&mut t).unwrap());
  }

  #[test]
  fn unit_clause_places_card() {
    let mut t = tableau();
    t.add_condition(player(3), &cards(&[2, 7])).unwrap();
    t.set_fact(hand(3), Card::new(2), Cell::Absent).unwrap();
    assert!(clauses(&mut t).unwrap());
    assert_eq!(Cell::Present, t.cell(hand(3), Card::new(7)).unwrap());
    // The satisfied clause goes away on the next pass.
    assert!(!clauses(&mut t).unwrap());
    assert!(t.conditions().is_empty());
  }

  #[test]
  fn clauses_shrink_without_firing() {
    let mut t = tableau();
    t.add_condition(player(2), &cards(&[1, 4, 8])).unwrap();
    t.set_fact(hand(2), Card::new(4), Cell::Absent).unwrap();
    assert!(!clauses(&mut t).unwrap());
    assert_eq!(&cards(&[1, 8])[..], t.conditions().get(player(2))[0].cards());
  }

  #[test]
  fn emptied_clause_is_a_contradiction() {
    let mut t = tableau();
    t.add_condition(player(2), &cards(&[1, 4])).unwrap();
    t.mark_at(hand(2), &cards(&[1, 4]), Cell::Absent).unwrap();
    assert!(matches!(
      clauses(&mut t),
      Err(Error::Contradiction(Contradiction::EmptyClause { .. }))
    ));
  }
}
