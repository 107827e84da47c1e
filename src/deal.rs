//! Defines the Deal: the true, complete placement of every card in a game.
//!
//! Deduction never sees a deal.  Deals are for generating truthful
//! observations and checking what was deduced against the truth.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::*;

/// Where every card really is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deal {
  setup: Setup,
  /// Indexed by card.
  locations: Vec<Location>,
}

impl Deal {
  /// Deals a random game: one random card of each category into the
  /// envelope, then the rest shuffled, the leftover pile first and then
  /// around the table.
  pub fn random<R: Rng + ?Sized>(setup: &Setup, rng: &mut R) -> Deal {
    let catalog = setup.catalog();
    let mut locations = vec![Location::Envelope; setup.num_cards()];
    let mut rest = Vec::with_capacity(catalog.num_cards_in_play());
    for category in catalog.categories() {
      let members = catalog.members(category);
      let chosen = rng.random_range(0..members.len());
      rest.extend(members.iter().enumerate().filter(|(i, _)| *i != chosen).map(|(_, &card)| card));
    }
    rest.shuffle(rng);
    let (leftover, dealt) = rest.split_at(setup.num_leftover());
    for &card in leftover {
      locations[card.index()] = Location::Leftover;
    }
    let players: Vec<Player> = setup.players().collect();
    for (i, &card) in dealt.iter().enumerate() {
      locations[card.index()] = Location::Hand(players[i % players.len()]);
    }
    Deal {
      setup: setup.clone(),
      locations,
    }
  }

  /// Makes a Deal from each card's location, in card order, checking that
  /// every location gets exactly its share.
  pub fn new(setup: &Setup, locations: Vec<Location>) -> Result<Deal, Error> {
    if locations.len() != setup.num_cards() {
      return Err(Error::invalid(format!(
        "a deal places {} cards, not {}",
        setup.num_cards(),
        locations.len()
      )));
    }
    let mut asgmt = Assignment::new(setup);
    for (card, &location) in setup.catalog().cards().zip(&locations) {
      if !asgmt.try_assign(card, location)? {
        return Err(Error::invalid(format!("{} is overfull", location)));
      }
    }
    // With every card placed and no location overfull, every location is
    // exactly full.
    Ok(Deal {
      setup: setup.clone(),
      locations,
    })
  }

  pub fn setup(&self) -> &Setup {
    &self.setup
  }

  /// Where the card really is.  The card must be part of the game.
  pub fn location(&self, card: Card) -> Location {
    self.locations[card.index()]
  }

  /// The cards really at the location, in ascending order.
  pub fn cards_at(&self, location: Location) -> Vec<Card> {
    self
      .setup
      .catalog()
      .cards()
      .filter(|&card| self.location(card) == location)
      .collect()
  }

  /// The envelope's cards, in category order.
  pub fn envelope(&self) -> Vec<Card> {
    self.cards_at(Location::Envelope)
  }

  /// Tells whether every known cell of the tableau is true of this deal.
  pub fn agrees_with(&self, tableau: &Tableau) -> bool {
    self.setup.locations().all(|location| {
      self.setup.catalog().cards().all(|card| {
        match tableau.cell(location, card) {
          Ok(Cell::Unknown) => true,
          Ok(Cell::Present) => self.location(card) == location,
          Ok(Cell::Absent) => self.location(card) != location,
          Err(_) => false,
        }
      })
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;
  use rand_pcg::Pcg64Mcg;

  #[test]
  fn random_deals_fill_every_location() {
    let mut rng = Pcg64Mcg::seed_from_u64(17);
    for num_players in 3..=6 {
      let setup = Setup::classic(num_players).unwrap();
      let deal = Deal::random(&setup, &mut rng);
      for location in setup.locations() {
        assert_eq!(setup.capacity(location), deal.cards_at(location).len());
      }
      let envelope = deal.envelope();
      let categories: Vec<Category> = envelope.iter().map(|&c| setup.catalog().category(c)).collect();
      assert_eq!(setup.catalog().categories().collect::<Vec<_>>(), categories);
      // Checking the random deal through `new` accepts it.
      assert_eq!(deal, Deal::new(&setup, deal.locations.clone()).unwrap());
    }
  }

  #[test]
  fn new_rejects_overfull() {
    let setup = Setup::new(Catalog::from_sizes(&[2, 2]).unwrap(), 2).unwrap();
    let p1 = Location::Hand(Player::new(1).unwrap());
    let p2 = Location::Hand(Player::new(2).unwrap());
    assert!(Deal::new(&setup, vec![Location::Envelope, p1, Location::Envelope, p2]).is_ok());
    assert!(Deal::new(&setup, vec![Location::Envelope, Location::Envelope, p1, p2]).is_err());
    assert!(Deal::new(&setup, vec![p1, p1, Location::Envelope, Location::Envelope]).is_err());
    assert!(Deal::new(&setup, vec![p1]).is_err());
  }

  #[test]
  fn agreement() {
    let setup = Setup::new(Catalog::from_sizes(&[2, 2]).unwrap(), 2).unwrap();
    let p1 = Location::Hand(Player::new(1).unwrap());
    let p2 = Location::Hand(Player::new(2).unwrap());
    let deal = Deal::new(&setup, vec![Location::Envelope, p1, Location::Envelope, p2]).unwrap();
    let mut tableau = Tableau::new(setup);
    assert!(deal.agrees_with(&tableau));
    tableau.set_fact(p1, Card::new(1), Cell::Present).unwrap();
    assert!(deal.agrees_with(&tableau));
    tableau.set_fact(p2, Card::new(2), Cell::Present).unwrap();
    assert!(!deal.agrees_with(&tableau));
  }
}
