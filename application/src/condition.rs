//! Condition gate for conditional logging.
//!
//! A gate collects every condition attached to one statement: plain
//! booleans, predicates, and optional predicates where `None` suppresses the
//! entry. Conditions compose by logical AND and are evaluated exactly once,
//! when the entry is created.

/// Deferred predicate attached to a statement.
type Predicate<'a> = Box<dyn FnOnce() -> bool + 'a>;

/// Conjunction of the conditions attached to one statement.
pub struct ConditionGate<'a> {
    fixed: bool,
    predicates: Vec<Predicate<'a>>,
}

impl<'a> ConditionGate<'a> {
    /// A gate with no conditions; it always opens.
    pub fn new() -> Self {
        Self {
            fixed: true,
            predicates: Vec::new(),
        }
    }

    pub fn and_value(mut self, condition: bool) -> Self {
        self.fixed &= condition;
        self
    }

    pub fn and_predicate<F>(mut self, predicate: F) -> Self
    where
        F: FnOnce() -> bool + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// `None` counts as a predicate that returned `false`.
    pub fn and_optional<F>(self, predicate: Option<F>) -> Self
    where
        F: FnOnce() -> bool + 'a,
    {
        match predicate {
            Some(predicate) => self.and_predicate(predicate),
            None => self.and_value(false),
        }
    }

    /// Number of predicates still waiting to be evaluated.
    pub fn pending(&self) -> usize {
        self.predicates.len()
    }

    /// Run every predicate once and combine the results.
    pub fn evaluate(self) -> bool {
        self.predicates
            .into_iter()
            .fold(self.fixed, |open, predicate| predicate() & open)
    }
}

impl Default for ConditionGate<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConditionGate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionGate")
            .field("fixed", &self.fixed)
            .field("pending", &self.predicates.len())
            .finish()
    }
}
