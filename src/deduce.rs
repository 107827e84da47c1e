//! Runs the deduction rules over a tableau until nothing more follows.

use std::fmt;
use tracing::debug;

use crate::core::*;

pub mod rules;

/// The deduction rules, in the order the engine tries them.  Cheaper rules
/// come first so they saturate before the costlier ones run.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rule {
  /// Fills or closes the leftover pile once its count is forced.
  Leftover,
  /// Fills or closes each envelope category once its card is forced.
  Envelope,
  /// Fills or closes one hand once its count is forced.
  Hand,
  /// Places one card that has a single possible location.
  Row,
  /// Simplifies hint clauses, placing the last card of a shrunken one.
  Clause,
  /// Resolves hints that only make sense jointly across players.
  Joint,
}

impl Rule {
  /// Every rule, in order.
  pub const ALL: [Rule; 6] = [
    Rule::Leftover,
    Rule::Envelope,
    Rule::Hand,
    Rule::Row,
    Rule::Clause,
    Rule::Joint,
  ];
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

/// The extension point for the joint rule: deductions whose justification
/// depends on several players' hints and capacities at once.
///
/// An implementation must only write facts that are certain, must write them
/// through the tableau's fact-insertion methods, and must return true only
/// when it wrote at least one.
pub trait JointResolver {
  fn resolve(&mut self, tableau: &mut Tableau) -> Result<bool, Error>;
}

/// The default `JointResolver`, which never deduces anything.  With it the
/// engine is limited to single-card unit propagation of hints, so it can stop
/// short of a solved envelope.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoJointResolution;

impl JointResolver for NoJointResolution {
  fn resolve(&mut self, _tableau: &mut Tableau) -> Result<bool, Error> {
    Ok(false)
  }
}

/// Where a run to the fixpoint ended up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
  /// The envelope is fully known: one card per category, in category order.
  Solved { envelope: Vec<Card> },
  /// The rules can't go further, and the envelope is still uncertain.
  Undetermined { unknown_cells: usize },
}

impl Outcome {
  pub fn is_solved(&self) -> bool {
    matches!(self, Outcome::Solved { .. })
  }
}

/// Applies the deduction rules to tableaus.
pub struct Engine {
  joint: Box<dyn JointResolver>,
}

impl Engine {
  /// Makes an Engine with no joint resolution.
  pub fn new() -> Self {
    Self::with_joint_resolver(NoJointResolution)
  }

  /// Makes an Engine that uses the given resolver for the joint rule.
  pub fn with_joint_resolver(joint: impl JointResolver + 'static) -> Self {
    Engine {
      joint: Box::new(joint),
    }
  }

  /// Runs the rules to a fixpoint: after any rule writes a fact, starts over
  /// from the first rule, and stops after a full pass writes nothing.
  ///
  /// Every firing removes at least one Unknown cell, so this makes at most
  /// one firing per cell.  A contradiction ends the run and leaves the
  /// tableau unusable.
  pub fn run(&mut self, tableau: &mut Tableau) -> Result<Outcome, Error> {
    tableau.check_usable()?;
    let limit = tableau.setup().num_locations() * tableau.setup().num_cards();
    let mut firings = 0;
    'fixpoint: loop {
      for rule in Rule::ALL {
        let before = tableau.unknown_count();
        if self.apply(tableau, rule)? {
          firings += 1;
          debug!(%rule, unknown = tableau.unknown_count(), "rule fired");
          debug_assert!(tableau.unknown_count() < before);
          debug_assert!(firings <= limit);
          continue 'fixpoint;
        }
      }
      break;
    }
    let outcome = match tableau.envelope_solution() {
      Some(envelope) => Outcome::Solved { envelope },
      None => Outcome::Undetermined {
        unknown_cells: tableau.unknown_count(),
      },
    };
    debug!(firings, ?outcome, "fixpoint");
    Ok(outcome)
  }

  /// Applies a single rule once.  Tells whether it wrote any facts.
  pub fn apply(&mut self, tableau: &mut Tableau, rule: Rule) -> Result<bool, Error> {
    tableau.check_usable()?;
    match rule {
      Rule::Leftover => rules::leftover(tableau),
      Rule::Envelope => rules::envelope(tableau),
      Rule::Hand => rules::hands(tableau),
      Rule::Row => rules::rows(tableau),
      Rule::Clause => rules::clauses(tableau),
      Rule::Joint => self.joint.resolve(tableau),
    }
  }
}

impl Default for Engine {
  fn default() -> Self {
    Self::new()
  }
}
