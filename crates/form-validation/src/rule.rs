use std::fmt;
use std::sync::Arc;

/// Result of running one rule against one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub valid: bool,
    /// Message shown to the user when `valid` is false.
    pub message: Option<String>,
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    /// `pass()` when `valid`, otherwise `fail(message)`.
    pub fn check(valid: bool, message: impl Into<String>) -> Self {
        if valid {
            Self::pass()
        } else {
            Self::fail(message)
        }
    }
}

/// A pure predicate with a message.
///
/// Any `Fn(&str) -> RuleOutcome` can be turned into a rule.
#[derive(Clone)]
pub struct Rule(Arc<dyn Fn(&str) -> RuleOutcome + Send + Sync>);

impl Rule {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> RuleOutcome + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    pub fn check(&self, value: &str) -> RuleOutcome {
        (self.0)(value)
    }
}

impl<F> From<F> for Rule
where
    F: Fn(&str) -> RuleOutcome + Send + Sync + 'static,
{
    fn from(check: F) -> Self {
        Self::new(check)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rule(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_rule_from_closure() {
        let no_spaces: Rule = (|value: &str| RuleOutcome::check(!value.contains(' '), "Sin espacios")).into();

        assert_eq!(no_spaces.check("ana"), RuleOutcome::pass());
        assert_eq!(no_spaces.check("a b"), RuleOutcome::fail("Sin espacios"));
    }
}
