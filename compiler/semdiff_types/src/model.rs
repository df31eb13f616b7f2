//! The external type model.
//!
//! A declaration tree produced outside this crate, from doc-comment type
//! annotations or from signature files. Both sources produce the same
//! shape, so the type visitor does not care which one was used.
//!
//! The visitor only queries the model through a [`ModuleIndex`]: a flat
//! lookup from fully-qualified module name to declaration.

use rustc_hash::FxHashMap;

/// Shape of a declared type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeShape {
    /// A plain class name: `Integer`.
    Basic,
    /// A parameterized type: `Array<Integer>`.
    Generic,
    /// A fixed-size collection: `Array(Integer, String)`.
    Fixed,
    /// A key/value collection: `Hash{Symbol => Integer}`.
    Hash,
    /// A literal value: `:foo`, `nil`, `true`.
    Literal,
    /// A duck type: `#to_s`.
    Duck,
}

/// One declared nominal type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef {
    /// Nominal name of the outermost type (`Array` for `Array<Integer>`).
    pub kind: String,
    pub shape: TypeShape,
}

impl TypeRef {
    pub fn new(kind: impl Into<String>, shape: TypeShape) -> Self {
        TypeRef {
            kind: kind.into(),
            shape,
        }
    }

    pub fn basic(kind: impl Into<String>) -> Self {
        Self::new(kind, TypeShape::Basic)
    }

    pub fn generic(kind: impl Into<String>) -> Self {
        Self::new(kind, TypeShape::Generic)
    }

    pub fn is_basic(&self) -> bool {
        self.shape == TypeShape::Basic
    }
}

/// Where a declared variable lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarDeclScope {
    /// `@@name`
    Class,
    /// `@name`, usually declared through an attribute accessor.
    Instance,
    /// `NAME`
    Constant,
    /// A singleton accessor: `class << self; attr_reader :name; end`.
    Singleton,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarDecl {
    pub name: String,
    pub scope: VarDeclScope,
    pub types: Vec<TypeRef>,
}

impl VarDecl {
    pub fn new(scope: VarDeclScope, name: impl Into<String>, types: Vec<TypeRef>) -> Self {
        VarDecl {
            name: name.into(),
            scope,
            types,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MethodScope {
    Instance,
    /// Singleton method: `def self.name`.
    Class,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamDecl {
    pub name: String,
    pub types: Vec<TypeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDecl {
    pub name: String,
    pub scope: MethodScope,
    /// Parameters in declaration order.
    pub parameters: Vec<ParamDecl>,
}

impl MethodDecl {
    pub fn new(scope: MethodScope, name: impl Into<String>) -> Self {
        MethodDecl {
            name: name.into(),
            scope,
            parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, types: Vec<TypeRef>) -> Self {
        self.parameters.push(ParamDecl {
            name: name.into(),
            types,
        });
        self
    }

    /// Declared types of the parameter `name`.
    pub fn param_types(&self, name: &str) -> Option<&[TypeRef]> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.types.as_slice())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModuleKind {
    Module,
    Class,
}

/// A module or class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleDecl {
    /// Fully-qualified name: `A::B::C`.
    pub name: String,
    pub kind: ModuleKind,
    /// Nested modules, classes and methods, in declaration order.
    pub children: Vec<Decl>,
    pub vars: Vec<VarDecl>,
}

impl ModuleDecl {
    pub fn new(kind: ModuleKind, name: impl Into<String>) -> Self {
        ModuleDecl {
            name: name.into(),
            kind,
            children: Vec::new(),
            vars: Vec::new(),
        }
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self::new(ModuleKind::Module, name)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(ModuleKind::Class, name)
    }

    #[must_use]
    pub fn with_var(mut self, scope: VarDeclScope, name: impl Into<String>, types: Vec<TypeRef>) -> Self {
        self.vars.push(VarDecl::new(scope, name, types));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<Decl>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Declared types of the variable `name` in `scope`.
    pub fn var_types(&self, scope: VarDeclScope, name: &str) -> Option<&[TypeRef]> {
        self.vars
            .iter()
            .find(|v| v.scope == scope && v.name == name)
            .map(|v| v.types.as_slice())
    }

    /// The method `name` declared directly in this module.
    pub fn method(&self, scope: MethodScope, name: &str) -> Option<&MethodDecl> {
        find_method(&self.children, scope, name)
    }
}

/// A node of the declaration tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    Module(ModuleDecl),
    Method(MethodDecl),
}

impl From<ModuleDecl> for Decl {
    fn from(decl: ModuleDecl) -> Self {
        Decl::Module(decl)
    }
}

impl From<MethodDecl> for Decl {
    fn from(decl: MethodDecl) -> Self {
        Decl::Method(decl)
    }
}

pub(crate) fn find_method<'m>(decls: &'m [Decl], scope: MethodScope, name: &str) -> Option<&'m MethodDecl> {
    decls.iter().find_map(|decl| match decl {
        Decl::Method(m) if m.scope == scope && m.name == name => Some(m),
        _ => None,
    })
}

/// A complete type model: the top-level declarations of a program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeModel {
    pub roots: Vec<Decl>,
}

impl TypeModel {
    pub fn new(roots: Vec<Decl>) -> Self {
        TypeModel { roots }
    }

    /// Index every module reachable from the roots by its fully-qualified
    /// name.
    pub fn index(&self) -> ModuleIndex<'_> {
        ModuleIndex::build(&self.roots)
    }

    /// A top-level method (defined outside any module).
    pub fn method(&self, scope: MethodScope, name: &str) -> Option<&MethodDecl> {
        find_method(&self.roots, scope, name)
    }
}

/// Fully-qualified name → module declaration.
#[derive(Clone, Debug, Default)]
pub struct ModuleIndex<'m> {
    modules: FxHashMap<&'m str, &'m ModuleDecl>,
}

impl<'m> ModuleIndex<'m> {
    /// Breadth-first over modules; the first declaration seen for a name
    /// wins.
    fn build(roots: &'m [Decl]) -> Self {
        let mut modules = FxHashMap::default();
        let mut queue: std::collections::VecDeque<&'m ModuleDecl> = roots
            .iter()
            .filter_map(|d| match d {
                Decl::Module(m) => Some(m),
                Decl::Method(_) => None,
            })
            .collect();
        while let Some(module) = queue.pop_front() {
            modules.entry(module.name.as_str()).or_insert(module);
            queue.extend(module.children.iter().filter_map(|d| match d {
                Decl::Module(m) => Some(m),
                Decl::Method(_) => None,
            }));
        }
        ModuleIndex { modules }
    }

    pub fn get(&self, name: &str) -> Option<&'m ModuleDecl> {
        self.modules.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
