//! Defines the Cell type, the tri-state knowledge about one card at one
//! location.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use static_assertions::assert_eq_size;
use std::fmt;

use super::Error;

/// What is known about whether a given card is at a given location.
///
/// The discriminants are the integer encoding used by external records.
#[derive(Clone, Copy, Debug, Default, Eq, FromPrimitive, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
#[repr(i8)]
pub enum Cell {
  /// The card is known not to be there.
  Absent = -1,
  /// Nothing is known yet.
  #[default]
  Unknown = 0,
  /// The card is known to be there.
  Present = 1,
}

assert_eq_size!(Cell, i8);

impl Cell {
  /// The states a card could still have: it might be there.
  pub const OPEN: [Cell; 2] = [Cell::Unknown, Cell::Present];

  /// Tells whether this cell holds a certain fact.
  pub fn is_known(self) -> bool {
    self != Cell::Unknown
  }

  /// Tells whether the card could still be at this cell's location.
  pub fn is_open(self) -> bool {
    self != Cell::Absent
  }
}

impl TryFrom<i8> for Cell {
  type Error = Error;

  fn try_from(value: i8) -> Result<Self, Self::Error> {
    Cell::from_i8(value).ok_or_else(|| Error::invalid(format!("{} is not a cell state", value)))
  }
}

impl From<Cell> for i8 {
  fn from(cell: Cell) -> Self {
    cell as i8
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Cell::Absent => "absent",
      Cell::Unknown => "unknown",
      Cell::Present => "present",
    })
  }
}
