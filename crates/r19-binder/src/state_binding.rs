//! AST walk: scope creation and symbol declaration.

use r19_parser::parser::node::VariableKind;
use r19_parser::{NodeArena, NodeData, NodeIndex};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::scopes::{Scope, ScopeId, ScopeKind};
use crate::state::BinderState;
use crate::symbols::{Symbol, SymbolFlags, SymbolId};

impl BinderState {
    /// Bind a source file, replacing anything bound before.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        self.reset();
        let Some(NodeData::SourceFile(file)) = arena.data(root) else {
            debug!(root = root.0, "bind_source_file: root is not a source file");
            return;
        };
        self.enter_scope(ScopeKind::Module, root);
        for statement in file.statements.iter() {
            self.bind_node(arena, statement);
        }
        self.exit_scope();
        debug!(
            scopes = self.scopes.len(),
            symbols = self.symbols.len(),
            "bound source file"
        );
    }

    pub(crate) fn enter_scope(&mut self, kind: ScopeKind, node: NodeIndex) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(self.current_scope, kind, node));
        self.node_scope_ids.insert(node.0, id);
        self.current_scope = Some(id);
        id
    }

    pub(crate) fn exit_scope(&mut self) {
        self.current_scope = self
            .current_scope
            .and_then(|id| self.get_scope(id))
            .and_then(|scope| scope.parent);
    }

    /// Nearest scope that receives `var` declarations.
    fn var_scope(&self) -> Option<ScopeId> {
        let mut current = self.current_scope;
        while let Some(id) = current {
            let scope = self.get_scope(id)?;
            if scope.kind.is_var_container() {
                return Some(id);
            }
            current = scope.parent;
        }
        None
    }

    /// Declare `name` in `scope`, merging into an existing symbol.
    pub(crate) fn declare_symbol(
        &mut self,
        scope: ScopeId,
        name: &str,
        flags: SymbolFlags,
        declaration: NodeIndex,
    ) -> Option<SymbolId> {
        let existing = self.get_scope(scope)?.get(name);
        if let Some(id) = existing {
            let symbol = self.symbols.get_mut(id.0 as usize)?;
            symbol.flags |= flags;
            if !symbol.declarations.contains(&declaration) {
                symbol.declarations.push(declaration);
            }
            trace!(name, scope = scope.0, "redeclare symbol");
            return Some(id);
        }

        let id = SymbolId(self.symbols.len() as u32);
        let mut symbol = Symbol::new(name.to_string(), flags, scope);
        symbol.declarations.push(declaration);
        self.symbols.push(symbol);
        self.scopes
            .get_mut(scope.0 as usize)?
            .table
            .insert(name.to_string(), id);
        trace!(name, scope = scope.0, ?flags, "declare symbol");
        Some(id)
    }

    /// Declare every identifier bound by `name` (an identifier or a
    /// binding pattern).
    fn declare_bindings(
        &mut self,
        arena: &NodeArena,
        name: NodeIndex,
        flags: SymbolFlags,
        declaration: NodeIndex,
        scope: Option<ScopeId>,
    ) {
        let Some(scope) = scope else {
            return;
        };
        let mut identifiers = SmallVec::<[NodeIndex; 4]>::new();
        collect_binding_identifiers(arena, name, &mut identifiers);
        for ident in identifiers {
            let Some(text) = arena.identifier_text(ident) else {
                continue;
            };
            if let Some(symbol) = self.declare_symbol(scope, text, flags, declaration) {
                self.node_symbols.insert(ident.0, symbol);
            }
        }
    }

    fn bind_children(&mut self, arena: &NodeArena, idx: NodeIndex) {
        for child in arena.children(idx) {
            self.bind_node(arena, child);
        }
    }

    fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match &node.data {
            NodeData::VariableStatement(statement) => {
                let (flags, scope) = match statement.kind {
                    VariableKind::Var => (SymbolFlags::FUNCTION_SCOPED_VARIABLE, self.var_scope()),
                    VariableKind::Let => (SymbolFlags::BLOCK_SCOPED_VARIABLE, self.current_scope),
                    VariableKind::Const => (
                        SymbolFlags::BLOCK_SCOPED_VARIABLE | SymbolFlags::CONST,
                        self.current_scope,
                    ),
                };
                for declaration in statement.declarations.iter() {
                    if let Some(decl) = arena.get_variable_declaration(declaration) {
                        self.declare_bindings(arena, decl.name, flags, declaration, scope);
                    }
                    self.bind_children(arena, declaration);
                }
            }
            NodeData::FunctionDeclaration(func) => {
                if func.name.is_some() {
                    self.declare_bindings(
                        arena,
                        func.name,
                        SymbolFlags::FUNCTION,
                        idx,
                        self.current_scope,
                    );
                }
                self.bind_function(arena, idx, false);
            }
            NodeData::FunctionExpression(_) => self.bind_function(arena, idx, true),
            NodeData::ArrowFunction(_) => self.bind_function(arena, idx, false),
            NodeData::MethodDeclaration(method) => {
                // Computed keys are evaluated outside the method.
                self.bind_node(arena, method.name);
                self.bind_function(arena, idx, false);
            }
            NodeData::ClassDeclaration(class) => {
                if class.name.is_some() {
                    self.declare_bindings(
                        arena,
                        class.name,
                        SymbolFlags::CLASS,
                        idx,
                        self.current_scope,
                    );
                }
                self.bind_class(arena, idx, false);
            }
            NodeData::ClassExpression(_) => self.bind_class(arena, idx, true),
            NodeData::ClassStaticBlock(block) => {
                self.enter_scope(ScopeKind::StaticBlock, idx);
                for statement in block.statements.iter() {
                    self.bind_node(arena, statement);
                }
                self.exit_scope();
            }
            NodeData::Block(block) => {
                self.enter_scope(ScopeKind::Block, idx);
                for statement in block.statements.iter() {
                    self.bind_node(arena, statement);
                }
                self.exit_scope();
            }
            NodeData::ForStatement(_) | NodeData::ForInStatement(_) | NodeData::ForOfStatement(_) => {
                self.enter_scope(ScopeKind::Block, idx);
                self.bind_children(arena, idx);
                self.exit_scope();
            }
            NodeData::SwitchStatement(switch) => {
                self.bind_node(arena, switch.expression);
                self.enter_scope(ScopeKind::Block, idx);
                for clause in switch.clauses.iter() {
                    self.bind_node(arena, clause);
                }
                self.exit_scope();
            }
            NodeData::CatchClause(clause) => {
                let scope = self.enter_scope(ScopeKind::Catch, idx);
                if clause.variable_declaration.is_some() {
                    self.declare_bindings(
                        arena,
                        clause.variable_declaration,
                        SymbolFlags::CATCH_VARIABLE,
                        idx,
                        Some(scope),
                    );
                    self.bind_node(arena, clause.variable_declaration);
                }
                self.bind_node(arena, clause.block);
                self.exit_scope();
            }
            NodeData::ImportDeclaration(import) => {
                for specifier in import.specifiers.iter() {
                    if let Some(NodeData::ImportSpecifier(spec)) = arena.data(specifier) {
                        self.declare_bindings(
                            arena,
                            spec.local,
                            SymbolFlags::IMPORT,
                            specifier,
                            self.current_scope,
                        );
                    }
                }
            }
            _ => self.bind_children(arena, idx),
        }
    }

    /// Parameters and body share one function scope. A named function
    /// expression declares its own name inside that scope.
    fn bind_function(&mut self, arena: &NodeArena, idx: NodeIndex, declares_own_name: bool) {
        let Some(func) = arena.get_function(idx) else {
            return;
        };
        let scope = self.enter_scope(ScopeKind::Function, idx);
        if declares_own_name && func.name.is_some() {
            self.declare_bindings(arena, func.name, SymbolFlags::FUNCTION, idx, Some(scope));
        }

        for param in func.parameters.iter() {
            if let Some(parameter) = arena.get_parameter(param) {
                self.declare_bindings(
                    arena,
                    parameter.name,
                    SymbolFlags::PARAMETER,
                    param,
                    Some(scope),
                );
            }
            self.bind_children(arena, param);
        }

        match arena.get_block(func.body) {
            Some(body) => {
                self.node_scope_ids.insert(func.body.0, scope);
                for statement in body.statements.iter() {
                    self.bind_node(arena, statement);
                }
            }
            None => self.bind_node(arena, func.body),
        }
        self.exit_scope();
    }

    fn bind_class(&mut self, arena: &NodeArena, idx: NodeIndex, declares_own_name: bool) {
        let Some(class) = arena.get_class(idx) else {
            return;
        };
        let scope = self.enter_scope(ScopeKind::Class, idx);
        if declares_own_name && class.name.is_some() {
            self.declare_bindings(arena, class.name, SymbolFlags::CLASS, idx, Some(scope));
        }
        self.bind_node(arena, class.heritage);
        for member in class.members.iter() {
            self.bind_node(arena, member);
        }
        self.exit_scope();
    }
}

/// Collect the identifiers bound by a binding name, in source order.
pub(crate) fn collect_binding_identifiers(
    arena: &NodeArena,
    idx: NodeIndex,
    out: &mut SmallVec<[NodeIndex; 4]>,
) {
    match arena.data(idx) {
        Some(NodeData::Identifier(_)) => out.push(idx),
        Some(NodeData::ObjectBindingPattern(pattern) | NodeData::ArrayBindingPattern(pattern)) => {
            for element in pattern.elements.iter() {
                collect_binding_identifiers(arena, element, out);
            }
        }
        Some(NodeData::BindingElement(element)) => {
            collect_binding_identifiers(arena, element.name, out);
        }
        _ => {}
    }
}
