//! NodeArena: node storage plus typed accessors.

use std::sync::Arc;

use smallvec::SmallVec;

use super::base::NodeIndex;
use super::node::*;

/// Flat storage for every node of one source file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    source: Arc<str>,
}

impl NodeArena {
    pub fn new(source: Arc<str>) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(source.len() / 4),
            source,
        }
    }

    /// Add a node and adopt its children. Children are always created
    /// before their parent, so this is the only place parents are linked.
    pub(crate) fn add(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        let nodes = &mut self.nodes;
        data.for_each_child(|child| {
            if let Some(node) = nodes.get_mut(child.0 as usize) {
                node.parent = index;
            }
        });
        self.nodes.push(Node {
            pos,
            end,
            parent: NodeIndex::NONE,
            data,
        });
        index
    }

    /// Drop nodes created after `len` (used to abandon speculative parses).
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Generic access
    // =========================================================================

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get(index.0 as usize)
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    /// Iterate over `(index, node)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i as u32), node))
    }

    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 8]> {
        let mut out = SmallVec::new();
        if let Some(node) = self.get(index) {
            node.data.for_each_child(|child| out.push(child));
        }
        out
    }

    /// Ancestors of `index`, nearest first (the node itself excluded).
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut current = self.parent(index);
        std::iter::from_fn(move || {
            let next = current.to_option()?;
            current = self.parent(next);
            Some(next)
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn source_arc(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    /// Exact source text of a node.
    pub fn node_text(&self, index: NodeIndex) -> &str {
        self.get(index)
            .and_then(|node| self.source.get(node.pos as usize..node.end as usize))
            .unwrap_or("")
    }

    // =========================================================================
    // Typed access
    // =========================================================================

    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Identifier(id) => Some(&id.escaped_text),
            _ => None,
        }
    }

    /// Cooked value of a string literal or substitution-free template.
    pub fn string_value(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::StringLiteral(lit) | NodeData::NoSubstitutionTemplateLiteral(lit) => {
                Some(&lit.text)
            }
            _ => None,
        }
    }

    /// Static name of a property key: identifiers, strings and numbers.
    /// Computed keys and private names have no static name.
    pub fn property_name_text(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Identifier(id) => Some(&id.escaped_text),
            NodeData::StringLiteral(lit) | NodeData::NumericLiteral(lit) => Some(&lit.text),
            _ => None,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(NodeData::ParenthesizedExpression(paren)) = self.data(index) {
            index = paren.expression;
        }
        index
    }

    pub fn get_function(&self, index: NodeIndex) -> Option<&FunctionData> {
        match self.data(index)? {
            NodeData::FunctionDeclaration(func)
            | NodeData::FunctionExpression(func)
            | NodeData::ArrowFunction(func) => Some(func),
            NodeData::MethodDeclaration(method) => Some(&method.function),
            _ => None,
        }
    }

    pub fn get_class(&self, index: NodeIndex) -> Option<&ClassData> {
        match self.data(index)? {
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => Some(class),
            _ => None,
        }
    }

    pub fn get_method(&self, index: NodeIndex) -> Option<&MethodData> {
        match self.data(index)? {
            NodeData::MethodDeclaration(method) => Some(method),
            _ => None,
        }
    }

    pub fn get_assignment(&self, index: NodeIndex) -> Option<&BinaryExprData> {
        match self.data(index)? {
            NodeData::AssignmentExpression(assign) => Some(assign),
            _ => None,
        }
    }

    pub fn get_property_access(&self, index: NodeIndex) -> Option<&AccessExprData> {
        match self.data(index)? {
            NodeData::PropertyAccessExpression(access) => Some(access),
            _ => None,
        }
    }

    pub fn get_call(&self, index: NodeIndex) -> Option<&CallExprData> {
        match self.data(index)? {
            NodeData::CallExpression(call) => Some(call),
            _ => None,
        }
    }

    pub fn get_object_literal(&self, index: NodeIndex) -> Option<&LiteralExprData> {
        match self.data(index)? {
            NodeData::ObjectLiteralExpression(object) => Some(object),
            _ => None,
        }
    }

    pub fn get_object_binding_pattern(&self, index: NodeIndex) -> Option<&BindingPatternData> {
        match self.data(index)? {
            NodeData::ObjectBindingPattern(pattern) => Some(pattern),
            _ => None,
        }
    }

    pub fn get_binding_element(&self, index: NodeIndex) -> Option<&BindingElementData> {
        match self.data(index)? {
            NodeData::BindingElement(element) => Some(element),
            _ => None,
        }
    }

    pub fn get_parameter(&self, index: NodeIndex) -> Option<&ParameterData> {
        match self.data(index)? {
            NodeData::Parameter(param) => Some(param),
            _ => None,
        }
    }

    pub fn get_variable_declaration(&self, index: NodeIndex) -> Option<&VariableDeclarationData> {
        match self.data(index)? {
            NodeData::VariableDeclaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn get_variable_statement(&self, index: NodeIndex) -> Option<&VariableData> {
        match self.data(index)? {
            NodeData::VariableStatement(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn get_block(&self, index: NodeIndex) -> Option<&BlockData> {
        match self.data(index)? {
            NodeData::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn get_expression_statement(&self, index: NodeIndex) -> Option<&ExpressionStatementData> {
        match self.data(index)? {
            NodeData::ExpressionStatement(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn get_jsx_attribute(&self, index: NodeIndex) -> Option<&JsxAttributeData> {
        match self.data(index)? {
            NodeData::JsxAttribute(attr) => Some(attr),
            _ => None,
        }
    }

    /// Binding kind of the statement that owns a variable declaration.
    pub fn declaration_kind(&self, declaration: NodeIndex) -> Option<VariableKind> {
        self.get_variable_statement(self.parent(declaration))
            .map(|stmt| stmt.kind)
    }
}
