// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Resolved Types
//!
//! Every expression node resolves to a [`ResolvedType`]: a [`BaseType`] plus a
//! nullability flag tracked orthogonally to the base type.
//!
//! ## Numeric family
//!
//! Numbers are split by precision into `Integer` and `Decimal`. The two are
//! compatible with each other; mixing them unifies to `Decimal`:
//!
//! ```text
//! Integer ⊔ Integer = Integer
//! Integer ⊔ Decimal = Decimal
//! Text    ⊔ Integer = (incompatible)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base type of a resolved expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    Text,
    Integer,
    Decimal,
    Boolean,
    #[serde(rename = "datetime")]
    DateTime,
}

impl BaseType {
    /// Whether this type belongs to the Number family
    pub fn is_numeric(self) -> bool {
        matches!(self, BaseType::Integer | BaseType::Decimal)
    }

    /// Whether this type can be used where text is expected
    pub fn is_text(self) -> bool {
        self == BaseType::Text
    }

    /// Whether two base types can be mixed within one function call
    pub fn is_compatible_with(self, other: BaseType) -> bool {
        self == other || (self.is_numeric() && other.is_numeric())
    }

    /// Whether a value of this type converts to `target` without loss
    pub fn widens_to(self, target: BaseType) -> bool {
        self == target || (self == BaseType::Integer && target == BaseType::Decimal)
    }

    /// Least common base type of `self` and `other`, if any
    pub fn unify(self, other: BaseType) -> Option<BaseType> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (a, b) if a.is_numeric() && b.is_numeric() => Some(BaseType::Decimal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BaseType::Text => "text",
            BaseType::Integer => "integer",
            BaseType::Decimal => "decimal",
            BaseType::Boolean => "boolean",
            BaseType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inferred `(base type, nullable)` pair of an expression node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedType {
    pub base: BaseType,
    #[serde(default)]
    pub nullable: bool,
}

impl ResolvedType {
    /// Create a non-nullable type
    pub const fn new(base: BaseType) -> Self {
        Self {
            base,
            nullable: false,
        }
    }

    pub const fn text() -> Self {
        Self::new(BaseType::Text)
    }

    pub const fn integer() -> Self {
        Self::new(BaseType::Integer)
    }

    pub const fn decimal() -> Self {
        Self::new(BaseType::Decimal)
    }

    pub const fn boolean() -> Self {
        Self::new(BaseType::Boolean)
    }

    pub const fn datetime() -> Self {
        Self::new(BaseType::DateTime)
    }

    /// Builder method: mark as nullable
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Builder method: set nullability
    pub const fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Whether a value of type `other` may be used where `self` is declared.
    ///
    /// `other`'s base must widen to `self`'s base and `self` must admit NULL
    /// whenever `other` does.
    pub fn admits(&self, other: &ResolvedType) -> bool {
        other.base.widens_to(self.base) && (self.nullable || !other.nullable)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{} null", self.base)
        } else {
            write!(f, "{} not null", self.base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_numeric_family() {
        assert_eq!(
            BaseType::Integer.unify(BaseType::Integer),
            Some(BaseType::Integer)
        );
        assert_eq!(
            BaseType::Integer.unify(BaseType::Decimal),
            Some(BaseType::Decimal)
        );
        assert_eq!(BaseType::Text.unify(BaseType::Integer), None);
        assert_eq!(BaseType::DateTime.unify(BaseType::Boolean), None);
    }

    #[test]
    fn test_admits() {
        let nullable_text = ResolvedType::text().nullable();
        assert!(nullable_text.admits(&ResolvedType::text()));
        assert!(!ResolvedType::text().admits(&nullable_text));
        assert!(!ResolvedType::integer().admits(&ResolvedType::text()));
        assert!(ResolvedType::decimal().admits(&ResolvedType::integer()));
        assert!(!ResolvedType::integer().admits(&ResolvedType::decimal()));
    }

    #[test]
    fn test_widens_to() {
        assert!(BaseType::Integer.widens_to(BaseType::Decimal));
        assert!(BaseType::Text.widens_to(BaseType::Text));
        assert!(!BaseType::Decimal.widens_to(BaseType::Integer));
        assert!(!BaseType::Boolean.widens_to(BaseType::Text));
    }

    #[test]
    fn test_display() {
        assert_eq!(ResolvedType::text().to_string(), "text not null");
        assert_eq!(ResolvedType::integer().nullable().to_string(), "integer null");
    }
}
