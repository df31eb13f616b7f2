//! Inferred nominal properties of a node.

use bitflags::bitflags;

use crate::TypeRef;

/// Nominal types whose instances behave as numbers.
pub const NUMERIC_CLASSES: &[&str] = &["Numeric", "Integer", "Float", "Rational", "Complex"];

/// Nominal types that include (or behave as) `Enumerable`.
pub const ENUMERABLE_CLASSES: &[&str] = &[
    "Enumerable",
    "ARGF",
    "Array",
    "Dir",
    "Enumerator",
    "ENV",
    "Hash",
    "IO",
    "Range",
    "Struct",
    "CSV",
    "CSV::Table",
    "CSV::Row",
    "Set",
];

bitflags! {
    /// Type evidence for one node.
    ///
    /// Derived from the declared type set of the variable or parameter the
    /// node reads. Computed once by the type visitor, read-only afterward.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u8 {
        /// Exactly one nominal type is declared (`[a]`, not `[a, b]`).
        const ONE = 1 << 0;
        /// That one type has a basic shape (a plain class name, no
        /// parameters).
        const BASIC = 1 << 1;
        /// The one basic type is `Integer`.
        const INTEGER = 1 << 2;
        /// The one basic type is `Float`.
        const FLOAT = 1 << 3;
        /// The one basic type is `Boolean`.
        const BOOLEAN = 1 << 4;
        /// The one basic type is `String`.
        const STRING = 1 << 5;
        /// Every declared type is in [`NUMERIC_CLASSES`].
        const NUMERIC = 1 << 6;
        /// Every declared type is in [`ENUMERABLE_CLASSES`].
        const ENUMERABLE = 1 << 7;
    }
}

impl TypeFlags {
    /// Flags for a declared type set.
    ///
    /// An empty set yields no aggregate flags: nothing declared is not
    /// evidence that every type is numeric.
    pub fn from_declared(types: &[TypeRef]) -> Self {
        let mut flags = TypeFlags::empty();

        if let [only] = types {
            flags |= TypeFlags::ONE;
            if only.is_basic() {
                flags |= TypeFlags::BASIC;
                flags |= match only.kind.as_str() {
                    "Integer" => TypeFlags::INTEGER,
                    "Float" => TypeFlags::FLOAT,
                    "boolean" | "Boolean" => TypeFlags::BOOLEAN,
                    "String" => TypeFlags::STRING,
                    _ => TypeFlags::empty(),
                };
            }
        }

        if types.is_empty() {
            return flags;
        }
        if types.iter().all(|t| NUMERIC_CLASSES.contains(&t.kind.as_str())) {
            flags |= TypeFlags::NUMERIC;
        }
        if types
            .iter()
            .all(|t| ENUMERABLE_CLASSES.contains(&t.kind.as_str()))
        {
            flags |= TypeFlags::ENUMERABLE;
        }
        flags
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.contains(Self::NUMERIC)
    }

    /// Numeric and known to be exactly `Integer`.
    #[inline]
    pub const fn is_integer(self) -> bool {
        self.contains(Self::NUMERIC.union(Self::INTEGER))
    }
}
