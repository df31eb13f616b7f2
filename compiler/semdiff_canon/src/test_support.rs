//! Tree builders for the pass tests.

use semdiff_ir::{AstBuilder, NodeRef, VarScope};
use semdiff_types::{NodeTypes, TypeFlags};

/// Builds trees while recording type evidence for the reads it creates.
#[derive(Default)]
pub(crate) struct Typed {
    pub b: AstBuilder,
    pub types: NodeTypes,
}

impl Typed {
    pub fn read(&mut self, scope: VarScope, name: &str, flags: TypeFlags) -> NodeRef {
        let read = self.b.read(scope, name);
        self.types.insert(read.id, flags);
        read
    }

    /// A local declared `Numeric`.
    pub fn numeric(&mut self, name: &str) -> NodeRef {
        self.read(VarScope::Local, name, TypeFlags::ONE | TypeFlags::BASIC | TypeFlags::NUMERIC)
    }

    /// A local declared `Integer`.
    pub fn integer(&mut self, name: &str) -> NodeRef {
        self.read(
            VarScope::Local,
            name,
            TypeFlags::ONE | TypeFlags::BASIC | TypeFlags::INTEGER | TypeFlags::NUMERIC,
        )
    }

    /// A local declared `Float`.
    pub fn float(&mut self, name: &str) -> NodeRef {
        self.read(
            VarScope::Local,
            name,
            TypeFlags::ONE | TypeFlags::BASIC | TypeFlags::FLOAT | TypeFlags::NUMERIC,
        )
    }

    /// A local declared `String`.
    pub fn string(&mut self, name: &str) -> NodeRef {
        self.read(
            VarScope::Local,
            name,
            TypeFlags::ONE | TypeFlags::BASIC | TypeFlags::STRING,
        )
    }

    /// A local with no declaration.
    pub fn untyped(&mut self, name: &str) -> NodeRef {
        self.b.lvar(name)
    }

    pub fn int(&mut self, value: i64) -> NodeRef {
        self.b.int(value)
    }

    pub fn binary(&mut self, lhs: NodeRef, op: &str, rhs: NodeRef) -> NodeRef {
        self.b.binary(lhs, op, rhs)
    }

    pub fn neg(&mut self, operand: NodeRef) -> NodeRef {
        self.b.unary("-@", operand)
    }

    pub fn paren(&mut self, expr: NodeRef) -> NodeRef {
        self.b.paren(expr)
    }
}
