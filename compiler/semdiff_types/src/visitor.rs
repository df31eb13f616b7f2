//! Type visitor: resolves variable reads against the type model.
//!
//! One traversal per file. The visitor keeps an explicit stack of open
//! module/class scopes and the method whose body is being visited, and for
//! each read it can resolve records the declared types as [`TypeFlags`].
//!
//! | Node                          | Looked up as                         |
//! |-------------------------------|--------------------------------------|
//! | `@@name`                      | class variable of the open module    |
//! | `NAME`                        | constant of the open module          |
//! | `@name`                       | instance variable of the open module |
//! | `name` (local)                | parameter of the open method         |
//! | `name` (bare call), `self.name` | singleton accessor of the open module |

use std::ops::ControlFlow;

use semdiff_ir::{walk, Name, NodeId, NodeKind, NodeRef, VarScope, Visitor};

use crate::model::find_method;
use crate::{
    Decl, MethodDecl, MethodScope, ModuleDecl, ModuleIndex, NodeTypes, TypeFlags, TypeModel,
    TypeRef, VarDeclScope,
};

/// The source and the type model disagree in a way the visitor cannot
/// recover from.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeVisitError {
    /// A module or class is named by something other than a constant or a
    /// constant path (`class foo::Bar`).
    #[error("unsupported module path: `{kind}` node {id}")]
    UnsupportedPath { id: NodeId, kind: &'static str },
}

/// Compute type evidence for every node of `root` that the model can type.
#[tracing::instrument(level = "debug", skip_all)]
pub fn visit_program(model: &TypeModel, root: &NodeRef) -> Result<NodeTypes, TypeVisitError> {
    let mut visitor = TypeVisitor::new(model);
    match visitor.visit(root) {
        ControlFlow::Continue(()) => {
            tracing::debug!(typed = visitor.node_types.len(), "type visit complete");
            Ok(visitor.finish())
        }
        ControlFlow::Break(err) => Err(err),
    }
}

/// An open module or class.
struct Scope<'m> {
    /// Fully-qualified name.
    path: String,
    /// Its declaration, when the model has one.
    module: Option<&'m ModuleDecl>,
}

pub struct TypeVisitor<'m> {
    roots: &'m [Decl],
    index: ModuleIndex<'m>,
    scopes: Vec<Scope<'m>>,
    method: Option<&'m MethodDecl>,
    node_types: NodeTypes,
}

impl<'m> TypeVisitor<'m> {
    pub fn new(model: &'m TypeModel) -> Self {
        TypeVisitor {
            roots: &model.roots,
            index: model.index(),
            scopes: Vec::new(),
            method: None,
            node_types: NodeTypes::new(),
        }
    }

    pub fn finish(self) -> NodeTypes {
        self.node_types
    }

    fn current_path(&self) -> &str {
        self.scopes.last().map_or("", |s| s.path.as_str())
    }

    fn current_module(&self) -> Option<&'m ModuleDecl> {
        self.scopes.last().and_then(|s| s.module)
    }

    /// Fully-qualified name of a module/class named by `path` in the
    /// current scope.
    ///
    /// `A` nests under the current scope. `::A` is absolute. `A::B` nests
    /// under the current scope unless only the unnested name is declared.
    fn qualify(&self, path: &NodeRef) -> Result<String, TypeVisitError> {
        let scope = self.current_path();
        match &path.kind {
            NodeKind::Read {
                scope: VarScope::Constant,
                name,
            } => Ok(join(scope, name.as_str())),
            NodeKind::ConstantPath { .. } => {
                let full = full_name(path)?;
                if let Some(absolute) = full.strip_prefix("::") {
                    return Ok(absolute.to_string());
                }
                let candidate = join(scope, &full);
                if self.index.contains(&candidate) || !self.index.contains(&full) {
                    Ok(candidate)
                } else {
                    Ok(full)
                }
            }
            other => Err(TypeVisitError::UnsupportedPath {
                id: path.id,
                kind: other.tag(),
            }),
        }
    }

    fn visit_module(&mut self, node: &NodeRef, path: &NodeRef) -> ControlFlow<TypeVisitError> {
        let path = match self.qualify(path) {
            Ok(path) => path,
            Err(err) => return ControlFlow::Break(err),
        };
        let module = self.index.get(&path);
        tracing::trace!(%path, declared = module.is_some(), "enter scope");
        self.scopes.push(Scope { path, module });
        let flow = walk(self, node);
        self.scopes.pop();
        flow
    }

    fn visit_def(&mut self, node: &NodeRef, name: &Name, singleton: bool) -> ControlFlow<TypeVisitError> {
        let scope = if singleton {
            MethodScope::Class
        } else {
            MethodScope::Instance
        };
        let haystack: &'m [Decl] = match self.current_module() {
            Some(module) => &module.children,
            None if self.scopes.is_empty() => self.roots,
            None => &[],
        };
        let method = find_method(haystack, scope, name.as_str());
        let outer = std::mem::replace(&mut self.method, method);
        let flow = walk(self, node);
        self.method = outer;
        flow
    }

    fn var_types(&self, scope: VarDeclScope, name: &Name) -> Option<&'m [TypeRef]> {
        self.current_module()?.var_types(scope, name.as_str())
    }

    fn param_types(&self, name: &Name) -> Option<&'m [TypeRef]> {
        let method = self.method?;
        if method.parameters.is_empty() {
            return None;
        }
        method.param_types(name.as_str())
    }

    fn record(&mut self, node: &NodeRef, types: Option<&[TypeRef]>) {
        let Some(types) = types else {
            return;
        };
        let flags = TypeFlags::from_declared(types);
        tracing::trace!(id = %node.id, ?flags, "typed node");
        self.node_types.insert(node.id, flags);
    }
}

impl Visitor for TypeVisitor<'_> {
    type Break = TypeVisitError;

    fn visit(&mut self, node: &NodeRef) -> ControlFlow<TypeVisitError> {
        match &node.kind {
            NodeKind::Module { constant_path, .. } | NodeKind::Class { constant_path, .. } => {
                return self.visit_module(node, constant_path);
            }
            NodeKind::Def { name, receiver, .. } => {
                return self.visit_def(node, name, receiver.is_some());
            }
            NodeKind::Read { scope, name } => {
                let types = match scope {
                    VarScope::Class => self.var_types(VarDeclScope::Class, name),
                    VarScope::Constant => self.var_types(VarDeclScope::Constant, name),
                    VarScope::Instance => self.var_types(VarDeclScope::Instance, name),
                    VarScope::Local => self.param_types(name),
                    VarScope::Global => None,
                };
                self.record(node, types);
            }
            NodeKind::Call(call) => {
                let self_receiver = call
                    .receiver
                    .as_ref()
                    .is_some_and(|r| matches!(r.kind, NodeKind::SelfRef));
                if node.flags.contains(semdiff_ir::NodeFlags::VARIABLE_CALL) || self_receiver {
                    let types = self.var_types(VarDeclScope::Singleton, &call.name);
                    self.record(node, types);
                }
            }
            _ => {}
        }
        walk(self, node)
    }
}

fn join(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}::{name}")
    }
}

/// `A::B::C`, or `::A::B` for a path anchored at the root.
fn full_name(path: &NodeRef) -> Result<String, TypeVisitError> {
    match &path.kind {
        NodeKind::Read {
            scope: VarScope::Constant,
            name,
        } => Ok(name.to_string()),
        NodeKind::ConstantPath { parent: None, name } => Ok(format!("::{name}")),
        NodeKind::ConstantPath {
            parent: Some(parent),
            name,
        } => Ok(format!("{}::{name}", full_name(parent)?)),
        other => Err(TypeVisitError::UnsupportedPath {
            id: path.id,
            kind: other.tag(),
        }),
    }
}
