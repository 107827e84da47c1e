//! Defines the Tableau: what is known about every card at every location.

use itertools::Itertools;
use std::fmt;
use tracing::{debug, trace};

use super::*;

/// Counts of the Unknown and Present cells in some line of the tableau.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tally {
  pub unknown: usize,
  pub present: usize,
}

impl Tally {
  /// How many cells are still open: Unknown or Present.
  pub fn open(self) -> usize {
    self.unknown + self.present
  }

  fn record(&mut self, state: Cell) {
    self.unknown -= 1;
    if state == Cell::Present {
      self.present += 1;
    }
  }
}

/// A grid with a column per location and a row per card, each cell holding a
/// `Cell`.  All cells start Unknown.
///
/// Facts go in through `set_fact` (or its batched forms), which checks them
/// against the capacity and uniqueness invariants before writing anything and
/// immediately cascades the consequences of a Present fact along its row.
/// Once a fact is rejected with a contradiction, the tableau remembers it and
/// refuses all further facts.
///
/// The tableau also holds each player's hint clauses, which the deduction
/// engine consults.
#[derive(Clone)]
pub struct Tableau {
  setup: Setup,
  /// Column-major: the cell for column `c` and card `k` is at
  /// `c * num_cards + k`.
  cells: Vec<Cell>,
  columns: Vec<Tally>,
  rows: Vec<Tally>,
  /// The envelope column, split by category.
  categories: Vec<Tally>,
  conditions: Conditions,
  assignment: Assignment,
  failure: Option<Contradiction>,
}

impl Tableau {
  /// Makes a Tableau with nothing known.
  pub fn new(setup: Setup) -> Tableau {
    let num_cards = setup.num_cards();
    let num_locations = setup.num_locations();
    let catalog = setup.catalog();
    let categories = catalog
      .categories()
      .map(|category| Tally {
        unknown: catalog.members(category).len(),
        present: 0,
      })
      .collect();
    Tableau {
      cells: vec![Cell::Unknown; num_locations * num_cards],
      columns: vec![
        Tally {
          unknown: num_cards,
          present: 0
        };
        num_locations
      ],
      rows: vec![
        Tally {
          unknown: num_locations,
          present: 0
        };
        num_cards
      ],
      categories,
      conditions: Conditions::new(setup.num_players()),
      assignment: Assignment::new(&setup),
      failure: None,
      setup,
    }
  }

  pub fn setup(&self) -> &Setup {
    &self.setup
  }

  /// The confirmed placements, which mirror the Present cells.
  pub fn assignment(&self) -> &Assignment {
    &self.assignment
  }

  /// The contradiction that ended this tableau, if any.
  pub fn failure(&self) -> Option<&Contradiction> {
    self.failure.as_ref()
  }

  /// Tells whether a contradiction has made this tableau unusable.
  pub fn is_broken(&self) -> bool {
    self.failure.is_some()
  }

  /// Records the fact that the given card has the given state at the given
  /// location, then cascades the consequences: a Present card is Absent
  /// everywhere else.
  ///
  /// Repeating a known fact does nothing.  Returns `InvalidArgument` for ids
  /// outside this game or an `Unknown` state, before changing anything; and
  /// `Contradiction` when the fact disagrees with what's known or would break
  /// an invariant.  After a contradiction the tableau may be partly updated
  /// and must not be used further.
  pub fn set_fact(&mut self, location: Location, card: Card, state: Cell) -> Result<(), Error> {
    self.check_usable()?;
    self.check_fact(location, card, state)?;
    self.insert(self.setup.column(location), card, state)
  }

  /// Applies `set_fact` to matched triples from the three slices, in order,
  /// stopping at the first error.  The lengths and ids are all checked before
  /// anything is applied.
  pub fn set_facts(
    &mut self,
    locations: &[Location],
    cards: &[Card],
    states: &[Cell],
  ) -> Result<(), Error> {
    if locations.len() != cards.len() || cards.len() != states.len() {
      return Err(Error::invalid(format!(
        "mismatched fact lengths: {} locations, {} cards, {} states",
        locations.len(),
        cards.len(),
        states.len()
      )));
    }
    self.apply_all(locations.iter().zip(cards).zip(states).map(|((l, c), s)| (*l, *c, *s)))
  }

  /// Applies `set_fact` at one location to matched cards and states.
  pub fn set_facts_at(
    &mut self,
    location: Location,
    cards: &[Card],
    states: &[Cell],
  ) -> Result<(), Error> {
    if cards.len() != states.len() {
      return Err(Error::invalid(format!(
        "mismatched fact lengths: {} cards, {} states",
        cards.len(),
        states.len()
      )));
    }
    self.apply_all(cards.iter().zip(states).map(|(c, s)| (location, *c, *s)))
  }

  /// Applies `set_fact` for one card to matched locations and states.
  pub fn set_facts_for(
    &mut self,
    card: Card,
    locations: &[Location],
    states: &[Cell],
  ) -> Result<(), Error> {
    if locations.len() != states.len() {
      return Err(Error::invalid(format!(
        "mismatched fact lengths: {} locations, {} states",
        locations.len(),
        states.len()
      )));
    }
    self.apply_all(locations.iter().zip(states).map(|(l, s)| (*l, card, *s)))
  }

  /// Gives all the cards the same state at one location: for example, a
  /// player's known hand, or the cards a player couldn't show.
  pub fn mark_at(&mut self, location: Location, cards: &[Card], state: Cell) -> Result<(), Error> {
    self.apply_all(cards.iter().map(|c| (location, *c, state)))
  }

  /// Gives one card the same state at all the locations.
  pub fn mark_for(&mut self, card: Card, locations: &[Location], state: Cell) -> Result<(), Error> {
    self.apply_all(locations.iter().map(|l| (*l, card, state)))
  }

  /// Records a hint: the player holds at least one of the 2 or 3 cards.
  pub fn add_condition(&mut self, player: Player, cards: &[Card]) -> Result<(), Error> {
    self.check_usable()?;
    self.setup.check_location(Location::Hand(player))?;
    for &card in cards {
      self.setup.check_card(card)?;
    }
    let clause = Clause::new(cards)?;
    trace!(%player, cards = ?clause.cards(), "hint");
    self.conditions.push(player, clause);
    Ok(())
  }

  /// All players' outstanding hint clauses.
  pub fn conditions(&self) -> &Conditions {
    &self.conditions
  }

  /// What is known about the card at the location.
  pub fn cell(&self, location: Location, card: Card) -> Result<Cell, Error> {
    self.setup.check_location(location)?;
    self.setup.check_card(card)?;
    Ok(self.at(self.setup.column(location), card))
  }

  /// Tells whether every cell in the card's row is known.
  pub fn is_row_solved(&self, card: Card) -> Result<bool, Error> {
    Ok(self.row_tally(card)?.unknown == 0)
  }

  /// Tells whether every cell in the location's column is known.
  pub fn is_column_solved(&self, location: Location) -> Result<bool, Error> {
    Ok(self.tally(location)?.unknown == 0)
  }

  /// The counts for the location's column.
  pub fn tally(&self, location: Location) -> Result<Tally, Error> {
    self.setup.check_location(location)?;
    Ok(self.columns[self.setup.column(location)])
  }

  /// The counts for the card's row.
  pub fn row_tally(&self, card: Card) -> Result<Tally, Error> {
    self.setup.check_card(card)?;
    Ok(self.rows[card.index()])
  }

  /// The counts for the envelope cells of the category's cards.
  pub fn category_tally(&self, category: Category) -> Result<Tally, Error> {
    self.categories.get(category.index()).copied().ok_or_else(|| {
      Error::invalid(format!(
        "{} is out of range: there are {} categories",
        category,
        self.setup.num_categories()
      ))
    })
  }

  /// The cards whose cell at the location has one of the given states, in
  /// ascending order.
  pub fn search_column(&self, location: Location, states: &[Cell]) -> Result<Vec<Card>, Error> {
    self.setup.check_location(location)?;
    let column = self.setup.column(location);
    Ok(
      self
        .setup
        .catalog()
        .cards()
        .filter(|&card| states.contains(&self.at(column, card)))
        .collect(),
    )
  }

  /// The locations where the card's cell has one of the given states, in
  /// ascending order.
  pub fn search_row(&self, card: Card, states: &[Cell]) -> Result<Vec<Location>, Error> {
    self.setup.check_card(card)?;
    Ok(
      (0..self.setup.num_locations())
        .filter(|&column| states.contains(&self.at(column, card)))
        .map(|column| self.setup.location(column))
        .collect(),
    )
  }

  /// The cards confirmed to be at the location.
  pub fn cards_at(&self, location: Location) -> Result<Vec<Card>, Error> {
    self.assignment.cards_at(location)
  }

  /// The cards whose location isn't known yet, in ascending order.
  pub fn unsolved_cards(&self) -> Vec<Card> {
    self
      .setup
      .catalog()
      .cards()
      .filter(|card| self.rows[card.index()].unknown > 0)
      .collect()
  }

  /// How many cells are still Unknown.
  pub fn unknown_count(&self) -> usize {
    self.columns.iter().map(|tally| tally.unknown).sum()
  }

  /// Tells whether the envelope's contents are fully known.
  pub fn is_complete(&self) -> bool {
    self.columns[ENVELOPE_COLUMN].unknown == 0
  }

  /// The envelope's cards, one per category in category order, once they are
  /// all known.
  pub fn envelope_solution(&self) -> Option<Vec<Card>> {
    if !self.is_complete() {
      return None;
    }
    Some(
      self
        .setup
        .catalog()
        .cards()
        .filter(|&card| self.at(ENVELOPE_COLUMN, card) == Cell::Present)
        .sorted_by_key(|&card| self.setup.catalog().category(card))
        .collect(),
    )
  }

  /// Recomputes the capacity and uniqueness invariants from the cells
  /// themselves, returning the first one that fails.
  pub fn verify(&self) -> Result<(), Contradiction> {
    let catalog = self.setup.catalog();
    for card in catalog.cards() {
      let present = self.search_row_unchecked(card, Cell::Present);
      if present.len() > 1 {
        return Err(Contradiction::NoRoom {
          location: present[1],
          card,
        });
      }
      if self.search_row_unchecked(card, Cell::Unknown).len() + present.len() == 0 {
        return Err(Contradiction::NoLocation { card });
      }
    }
    for location in self.setup.locations() {
      let column = self.setup.column(location);
      if location == Location::Envelope {
        for category in catalog.categories() {
          let members = catalog.members(category);
          let present = members.iter().filter(|&&card| self.at(column, card) == Cell::Present).count();
          if present > 1 {
            return Err(Contradiction::CategoryOverfilled { category });
          }
          if !members.iter().any(|&card| self.at(column, card).is_open()) {
            return Err(Contradiction::CategoryUnfillable { category });
          }
        }
        continue;
      }
      let present = catalog.cards().filter(|&card| self.at(column, card) == Cell::Present).count();
      let open = catalog.cards().filter(|&card| self.at(column, card).is_open()).count();
      let capacity = self.setup.capacity(location);
      if present > capacity {
        return Err(Contradiction::Overfilled { location });
      }
      if open < capacity {
        return Err(Contradiction::Unfillable { location });
      }
    }
    Ok(())
  }

  /// Returns the recorded contradiction, if there is one.
  pub(crate) fn check_usable(&self) -> Result<(), Error> {
    match &self.failure {
      Some(contradiction) => Err(Error::Contradiction(contradiction.clone())),
      None => Ok(()),
    }
  }

  /// Records a contradiction, making this tableau unusable, and converts it
  /// to an error.
  pub(crate) fn contradict(&mut self, contradiction: Contradiction) -> Error {
    debug!(%contradiction, "contradiction");
    if self.failure.is_none() {
      self.failure = Some(contradiction.clone());
    }
    Error::Contradiction(contradiction)
  }

  /// Removes and returns the player's clauses, for simplification.
  pub(crate) fn take_conditions(&mut self, player: Player) -> Vec<Clause> {
    self.conditions.take(player)
  }

  /// Puts back the player's (simplified) clauses.
  pub(crate) fn restore_conditions(&mut self, player: Player, clauses: Vec<Clause>) {
    self.conditions.replace(player, clauses);
  }

  /// Drops the player's clauses once their hand is solved, after checking
  /// that the hand satisfies every one of them.
  pub(crate) fn retire_conditions(&mut self, player: Player) -> Result<(), Error> {
    let column = self.setup.column(Location::Hand(player));
    let clauses = self.conditions.take(player);
    let unmet = clauses
      .iter()
      .find(|clause| !clause.cards().iter().any(|&card| self.at(column, card) == Cell::Present));
    if let Some(clause) = unmet {
      let cards = clause.cards().to_vec();
      return Err(self.contradict(Contradiction::EmptyClause { player, cards }));
    }
    Ok(())
  }

  /// Checks the ids and state of an incoming fact.
  fn check_fact(&self, location: Location, card: Card, state: Cell) -> Result<(), Error> {
    self.setup.check_location(location)?;
    self.setup.check_card(card)?;
    if state == Cell::Unknown {
      return Err(Error::invalid("a fact must be Present or Absent"));
    }
    Ok(())
  }

  /// Checks every fact, then applies them in order.
  fn apply_all(
    &mut self,
    facts: impl Iterator<Item = (Location, Card, Cell)> + Clone,
  ) -> Result<(), Error> {
    self.check_usable()?;
    for (location, card, state) in facts.clone() {
      self.check_fact(location, card, state)?;
    }
    for (location, card, state) in facts {
      self.insert(self.setup.column(location), card, state)?;
    }
    Ok(())
  }

  /// The cell at a checked column and card.
  fn at(&self, column: usize, card: Card) -> Cell {
    self.cells[column * self.setup.num_cards() + card.index()]
  }

  fn search_row_unchecked(&self, card: Card, state: Cell) -> Vec<Location> {
    (0..self.setup.num_locations())
      .filter(|&column| self.at(column, card) == state)
      .map(|column| self.setup.location(column))
      .collect()
  }

  /// Helper for `set_fact`: the ids and state are already checked.
  fn insert(&mut self, column: usize, card: Card, state: Cell) -> Result<(), Error> {
    let known = self.at(column, card);
    match (known, state) {
      _ if known == state => Ok(()),
      (Cell::Unknown, Cell::Present) => self.insert_present(column, card),
      (Cell::Unknown, Cell::Absent) => self.insert_absent(column, card),
      _ => {
        let location = self.setup.location(column);
        Err(self.contradict(Contradiction::Conflict {
          location,
          card,
          known,
        }))
      }
    }
  }

  fn insert_present(&mut self, column: usize, card: Card) -> Result<(), Error> {
    let location = self.setup.location(column);
    if !self.assignment.try_assign(card, location)? {
      return Err(self.contradict(Contradiction::NoRoom { location, card }));
    }
    trace!(%location, %card, "present");
    self.write(column, card, Cell::Present);
    for other in 0..self.setup.num_locations() {
      if other != column && self.at(other, card) == Cell::Unknown {
        self.insert_absent(other, card)?;
      }
    }
    Ok(())
  }

  fn insert_absent(&mut self, column: usize, card: Card) -> Result<(), Error> {
    let location = self.setup.location(column);
    if self.rows[card.index()].open() < 2 {
      return Err(self.contradict(Contradiction::NoLocation { card }));
    }
    if location == Location::Envelope {
      let category = self.setup.catalog().category(card);
      if self.categories[category.index()].open() <= 1 {
        return Err(self.contradict(Contradiction::EmptyCategory { category, card }));
      }
    } else if self.columns[column].open() <= self.setup.capacity(location) {
      return Err(self.contradict(Contradiction::Starved { location, card }));
    }
    trace!(%location, %card, "absent");
    self.write(column, card, Cell::Absent);
    Ok(())
  }

  /// Overwrites an Unknown cell and updates the tallies.
  fn write(&mut self, column: usize, card: Card, state: Cell) {
    let slot = column * self.setup.num_cards() + card.index();
    debug_assert_eq!(Cell::Unknown, self.cells[slot]);
    self.cells[slot] = state;
    self.columns[column].record(state);
    self.rows[card.index()].record(state);
    if column == ENVELOPE_COLUMN {
      let category = self.setup.catalog().category(card);
      self.categories[category.index()].record(state);
    }
  }
}

impl fmt::Debug for Tableau {
  /// Prints the grid with a row per card, `+` for Present, `-` for Absent,
  /// and `.` for Unknown.  Columns are the leftover pile, the envelope, then
  /// the hands.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let header = self.setup.locations().map(|location| format!("{:>3}", location.id())).join("");
    writeln!(f, "     {}", header)?;
    for card in self.setup.catalog().cards() {
      let row = (0..self.setup.num_locations())
        .map(|column| match self.at(column, card) {
          Cell::Present => "  +",
          Cell::Absent => "  -",
          Cell::Unknown => "  .",
        })
        .join("");
      writeln!(f, "{:>4} {}", card.get(), row)?;
    }
    if let Some(contradiction) = &self.failure {
      writeln!(f, "broken: {}", contradiction)?;
    }
    Ok(())
  }
}
