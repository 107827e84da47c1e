//! Defines the Card and Category ids, and the Catalog that maps one onto the
//! other.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::Error;
use crate::define_id_types;

define_id_types! {
  /// Identifies one card of the game, by its position in the catalog.
  Card: u8, "card";
  /// Identifies a category of cards (suspects, weapons, rooms, ...).  The
  /// envelope holds exactly one card of each category.
  Category: u8, "category";
}

/// The static card-to-category mapping, and the sizes derived from it.
///
/// Category ids are contiguous from 0, and every category has at least one
/// card.  Names for cards and categories live outside this crate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Catalog {
  /// The category of each card, indexed by card.
  categories: Vec<Category>,
  /// The cards of each category, indexed by category, in ascending order.
  members: Vec<Vec<Card>>,
}

/// The standard layout: 6 suspects, 6 weapons, 9 rooms.
static CLASSIC: Lazy<Catalog> = Lazy::new(|| Catalog::build(&[6, 6, 9]));

impl Catalog {
  /// The most cards a catalog can hold.
  pub const MAX_CARDS: usize = u8::MAX as usize + 1;

  /// Makes a catalog from the category of each card, in card order.
  pub fn new(categories: Vec<Category>) -> Result<Catalog, Error> {
    if categories.is_empty() {
      return Err(Error::invalid("a catalog needs at least one card"));
    }
    if categories.len() > Self::MAX_CARDS {
      return Err(Error::invalid(format!(
        "a catalog holds at most {} cards, not {}",
        Self::MAX_CARDS,
        categories.len()
      )));
    }
    let num_categories = categories.iter().map(|c| c.index() + 1).max().unwrap_or(0);
    let mut members = vec![Vec::new(); num_categories];
    for (i, category) in categories.iter().enumerate() {
      // In range because `categories.len()` is at most `MAX_CARDS`.
      members[category.index()].push(Card::new(i as u8));
    }
    if let Some(empty) = members.iter().position(Vec::is_empty) {
      return Err(Error::invalid(format!(
        "category ids must be contiguous from 0, but category {} has no cards",
        empty
      )));
    }
    Ok(Catalog {
      categories,
      members,
    })
  }

  /// Makes a catalog from category sizes: the first `sizes[0]` cards belong
  /// to category 0, the next `sizes[1]` to category 1, and so on.
  pub fn from_sizes(sizes: &[usize]) -> Result<Catalog, Error> {
    if sizes.is_empty() || sizes.contains(&0) {
      return Err(Error::invalid("every category needs at least one card"));
    }
    if sizes.iter().sum::<usize>() > Self::MAX_CARDS {
      return Err(Error::invalid("too many cards for one catalog"));
    }
    Ok(Self::build(sizes))
  }

  /// The standard 6/6/9 catalog.
  pub fn classic() -> &'static Catalog {
    &CLASSIC
  }

  /// Helper for `from_sizes` and `classic`; callers must ensure the sizes are
  /// nonzero and sum to at most `MAX_CARDS`.
  fn build(sizes: &[usize]) -> Catalog {
    let mut categories = Vec::with_capacity(sizes.iter().sum());
    let mut members = Vec::with_capacity(sizes.len());
    for (c, &size) in sizes.iter().enumerate() {
      let first = categories.len();
      categories.extend(std::iter::repeat_n(Category::new(c as u8), size));
      members.push((first..first + size).map(|i| Card::new(i as u8)).collect());
    }
    Catalog {
      categories,
      members,
    }
  }

  /// How many cards there are in total.
  pub fn num_cards(&self) -> usize {
    self.categories.len()
  }

  /// How many categories there are, which is also how many cards go into the
  /// envelope.
  pub fn num_categories(&self) -> usize {
    self.members.len()
  }

  /// How many cards are dealt out after the envelope is filled.
  pub fn num_cards_in_play(&self) -> usize {
    self.num_cards() - self.num_categories()
  }

  /// Tells whether the given card belongs to this catalog.
  pub fn contains(&self, card: Card) -> bool {
    card.index() < self.num_cards()
  }

  /// The given card's category.  The card must belong to this catalog.
  pub fn category(&self, card: Card) -> Category {
    self.categories[card.index()]
  }

  /// The cards of the given category, in ascending order.  The category must
  /// belong to this catalog.
  pub fn members(&self, category: Category) -> &[Card] {
    &self.members[category.index()]
  }

  /// Iterates all the cards.
  pub fn cards(&self) -> impl Iterator<Item = Card> {
    Card::all(self.num_cards())
  }

  /// Iterates all the categories.
  pub fn categories(&self) -> impl Iterator<Item = Category> {
    Category::all(self.num_categories())
  }

  /// The size of each category, in category order.
  pub fn sizes(&self) -> Vec<usize> {
    self.members.iter().map(Vec::len).collect()
  }
}

impl TryFrom<Vec<Category>> for Catalog {
  type Error = Error;

  fn try_from(categories: Vec<Category>) -> Result<Self, Self::Error> {
    Catalog::new(categories)
  }
}

impl From<Catalog> for Vec<Category> {
  fn from(catalog: Catalog) -> Self {
    catalog.categories
  }
}
