//! Pre-flight validation of request descriptors.
//!
//! A `Validator` collects every violation instead of stopping at the first,
//! so one error tells the caller everything wrong with a descriptor.

use std::fmt;

/// One problem found while validating a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A required field is empty.
    Missing { field: &'static str },

    /// An enum-constrained field holds a value outside its allowed set.
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
}

impl Violation {
    pub fn field(&self) -> &'static str {
        match self {
            Violation::Missing { field } | Violation::NotAllowed { field, .. } => field,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing { field } => write!(f, "{field} is required"),
            Violation::NotAllowed {
                field,
                value,
                allowed,
            } => write!(
                f,
                "{field} must be one of [{}], got {value:?}",
                allowed.join(", ")
            ),
        }
    }
}

/// Every violation found in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid request: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }
}

/// Accumulates violations; `finish` turns them into a result.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A required value must be non-empty once surrounding whitespace is
    /// ignored.
    pub fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.violations.push(Violation::Missing { field });
        }
        self
    }

    pub fn require_some<T>(&mut self, field: &'static str, value: Option<&T>) -> &mut Self {
        if value.is_none() {
            self.violations.push(Violation::Missing { field });
        }
        self
    }

    pub fn require_non_empty<T>(&mut self, field: &'static str, values: &[T]) -> &mut Self {
        if values.is_empty() {
            self.violations.push(Violation::Missing { field });
        }
        self
    }

    pub fn one_of(
        &mut self,
        field: &'static str,
        value: &str,
        allowed: &'static [&'static str],
    ) -> &mut Self {
        if !allowed.contains(&value) {
            self.violations.push(Violation::NotAllowed {
                field,
                value: value.to_string(),
                allowed,
            });
        }
        self
    }

    /// Optional enum fields are only checked when set.
    pub fn one_of_opt(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        allowed: &'static [&'static str],
    ) -> &mut Self {
        if let Some(value) = value {
            self.one_of(field, value, allowed);
        }
        self
    }

    pub fn each_one_of<S: AsRef<str>>(
        &mut self,
        field: &'static str,
        values: &[S],
        allowed: &'static [&'static str],
    ) -> &mut Self {
        for value in values {
            self.one_of(field, value.as_ref(), allowed);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: std::mem::take(&mut self.violations),
            })
        }
    }
}
