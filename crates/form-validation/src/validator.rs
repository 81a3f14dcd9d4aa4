use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use tracing::debug;

use crate::rule::{Rule, RuleOutcome};

/// Field name to first failing message. Only failed fields appear.
pub type ValidationErrors = BTreeMap<String, String>;

/// Source of raw field values, e.g. a submitted form.
pub trait FieldValues {
    /// `None` when the form has no such field.
    fn field_value(&self, name: &str) -> Option<&str>;
}

impl<K, V> FieldValues for HashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    fn field_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|value| value.as_ref())
    }
}

impl<K, V> FieldValues for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn field_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|value| value.as_ref())
    }
}

impl<T: FieldValues + ?Sized> FieldValues for &T {
    fn field_value(&self, name: &str) -> Option<&str> {
        (**self).field_value(name)
    }
}

/// Runs `rules` in order and returns the first failure, or a pass.
pub fn validate_field(value: &str, rules: &[Rule]) -> RuleOutcome {
    rules
        .iter()
        .map(|rule| rule.check(value))
        .find(|outcome| !outcome.valid)
        .unwrap_or_else(RuleOutcome::pass)
}

/// Validates a set of declared fields, each with an ordered rule list.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    fields: Vec<(String, Vec<Rule>)>,
    errors: ValidationErrors,
}

impl FormValidator {
    /// Fields are checked in the order given.
    pub fn new<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<Rule>)>,
        N: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, rules)| (name.into(), rules))
                .collect(),
            errors: ValidationErrors::new(),
        }
    }

    /// Checks every declared field present in `values`.
    ///
    /// Stops at the first failing rule of a field but always moves on to the
    /// next field. Fields missing from `values` are skipped. Replaces the
    /// errors of the previous call.
    pub fn validate<V: FieldValues + ?Sized>(&mut self, values: &V) -> bool {
        self.errors.clear();

        for (name, rules) in &self.fields {
            let Some(value) = values.field_value(name) else {
                debug!(field = %name, "field not present, skipping");
                continue;
            };

            let outcome = validate_field(value, rules);
            if !outcome.valid {
                self.errors
                    .insert(name.clone(), outcome.message.unwrap_or_default());
            }
        }

        self.errors.is_empty()
    }

    /// Errors from the latest [`validate`](Self::validate) call.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_error(&self, name: &str) -> bool {
        self.errors.contains_key(name)
    }

    /// Rules declared for `name`, if any.
    pub fn rules_for(&self, name: &str) -> Option<&[Rule]> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rules)| rules.as_slice())
    }
}
