//! Component shape classification.
//!
//! Maps the declaration a `defaultProps` target resolves to onto the
//! rewrite strategy the fix synthesizer applies.

use r19_parser::parser::node::{FunctionData, MethodKind, VariableKind};
use r19_parser::{NodeArena, NodeData, NodeIndex};

use crate::predicates::{is_reference_identifier, is_this_props, member_key_name};
use crate::resolver::{Resolution, ScopeResolver};

/// Where a synthesized destructuring parameter goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamInsertion {
    /// Inside empty parentheses, at this offset.
    EmptyParens { at: u32 },
    /// Replace the plain identifier parameter `name`. A bare arrow
    /// parameter (`props => ...`) needs parentheses added.
    Replace { name: NodeIndex, bare_arrow: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnrecognizedReason {
    Imported,
    NotAComponent,
    NestedPattern,
    RestOnly,
    UnsupportedParameter,
    NoRenderMethod,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentShape {
    FunctionWithDestructuredParam {
        function: NodeIndex,
        pattern: NodeIndex,
    },
    FunctionWithPlainOrNoParam {
        function: NodeIndex,
        insertion: ParamInsertion,
        /// The plain parameter is still read in the body.
        param_referenced: bool,
    },
    ClassComponent {
        class: NodeIndex,
        /// Body block of `render`.
        render_body: NodeIndex,
        /// Object pattern of the first `const { ... } = this.props`.
        existing: Option<NodeIndex>,
    },
    Unrecognized(UnrecognizedReason),
}

impl ComponentShape {
    pub fn is_fixable(&self) -> bool {
        !matches!(self, ComponentShape::Unrecognized(_))
    }
}

/// Classify the declaration node `decl`.
pub fn classify(arena: &NodeArena, resolver: &dyn ScopeResolver, decl: NodeIndex) -> ComponentShape {
    let node = match arena.data(decl) {
        Some(NodeData::VariableDeclaration(var)) => arena.skip_parentheses(var.initializer),
        Some(NodeData::ImportSpecifier(_)) => {
            return ComponentShape::Unrecognized(UnrecognizedReason::Imported);
        }
        _ => decl,
    };

    match arena.data(node) {
        Some(
            NodeData::FunctionDeclaration(func)
            | NodeData::FunctionExpression(func)
            | NodeData::ArrowFunction(func),
        ) => classify_function(arena, resolver, node, func),
        Some(NodeData::ClassDeclaration(_) | NodeData::ClassExpression(_)) => {
            classify_class(arena, node)
        }
        _ => ComponentShape::Unrecognized(UnrecognizedReason::NotAComponent),
    }
}

fn classify_function(
    arena: &NodeArena,
    resolver: &dyn ScopeResolver,
    function: NodeIndex,
    func: &FunctionData,
) -> ComponentShape {
    let Some(first) = func.parameters.first() else {
        return match func.params_open {
            Some(open) => ComponentShape::FunctionWithPlainOrNoParam {
                function,
                insertion: ParamInsertion::EmptyParens { at: open + 1 },
                param_referenced: false,
            },
            None => ComponentShape::Unrecognized(UnrecognizedReason::UnsupportedParameter),
        };
    };
    let Some(param) = arena.get_parameter(first) else {
        return ComponentShape::Unrecognized(UnrecognizedReason::UnsupportedParameter);
    };
    if param.dot_dot_dot {
        return ComponentShape::Unrecognized(UnrecognizedReason::UnsupportedParameter);
    }

    match arena.data(param.name) {
        Some(NodeData::ObjectBindingPattern(_)) => match check_simple_pattern(arena, param.name) {
            Ok(()) => ComponentShape::FunctionWithDestructuredParam {
                function,
                pattern: param.name,
            },
            Err(reason) => ComponentShape::Unrecognized(reason),
        },
        Some(NodeData::Identifier(id)) => {
            let param_referenced =
                is_binding_referenced(arena, resolver, &id.escaped_text, first, func.body);
            ComponentShape::FunctionWithPlainOrNoParam {
                function,
                insertion: ParamInsertion::Replace {
                    name: param.name,
                    bare_arrow: func.params_open.is_none(),
                },
                param_referenced,
            }
        }
        _ => ComponentShape::Unrecognized(UnrecognizedReason::UnsupportedParameter),
    }
}

fn classify_class(arena: &NodeArena, class: NodeIndex) -> ComponentShape {
    let Some(data) = arena.get_class(class) else {
        return ComponentShape::Unrecognized(UnrecognizedReason::NotAComponent);
    };
    let render = data.members.iter().find_map(|member| {
        let method = arena.get_method(member)?;
        let is_render = method.kind == MethodKind::Method
            && !method.is_static
            && member_key_name(arena, method.name) == Some("render");
        (is_render && arena.get_block(method.function.body).is_some())
            .then_some(method.function.body)
    });
    let Some(render_body) = render else {
        return ComponentShape::Unrecognized(UnrecognizedReason::NoRenderMethod);
    };

    let existing = find_props_destructuring(arena, render_body);
    if let Some(pattern) = existing {
        if let Err(reason) = check_simple_pattern(arena, pattern) {
            return ComponentShape::Unrecognized(reason);
        }
    }
    ComponentShape::ClassComponent {
        class,
        render_body,
        existing,
    }
}

/// First `const|let { ... } = this.props` among the direct statements of
/// `body`.
fn find_props_destructuring(arena: &NodeArena, body: NodeIndex) -> Option<NodeIndex> {
    let block = arena.get_block(body)?;
    block.statements.iter().find_map(|stmt| {
        let var = arena.get_variable_statement(stmt)?;
        if var.kind == VariableKind::Var {
            return None;
        }
        var.declarations.iter().find_map(|decl| {
            let decl = arena.get_variable_declaration(decl)?;
            let is_pattern = arena.get_object_binding_pattern(decl.name).is_some();
            (is_pattern && is_this_props(arena, decl.initializer)).then_some(decl.name)
        })
    })
}

/// An object pattern whose properties bind plain identifiers under static
/// keys, with at most a trailing rest element.
fn check_simple_pattern(arena: &NodeArena, pattern: NodeIndex) -> Result<(), UnrecognizedReason> {
    let Some(data) = arena.get_object_binding_pattern(pattern) else {
        return Err(UnrecognizedReason::UnsupportedParameter);
    };
    let mut properties = 0;
    for element in data.elements.iter() {
        let Some(element) = arena.get_binding_element(element) else {
            return Err(UnrecognizedReason::NestedPattern);
        };
        if arena.identifier_text(element.name).is_none() {
            return Err(UnrecognizedReason::NestedPattern);
        }
        if element.dot_dot_dot {
            continue;
        }
        if element.property_name.is_some() && member_key_name(arena, element.property_name).is_none()
        {
            return Err(UnrecognizedReason::NestedPattern);
        }
        properties += 1;
    }
    if properties == 0 && !data.elements.is_empty() {
        return Err(UnrecognizedReason::RestOnly);
    }
    Ok(())
}

/// Whether the binding declared by `declaration` (named `name`) is read
/// anywhere inside `body`.
fn is_binding_referenced(
    arena: &NodeArena,
    resolver: &dyn ScopeResolver,
    name: &str,
    declaration: NodeIndex,
    body: NodeIndex,
) -> bool {
    let Some(body_node) = arena.get(body) else {
        return false;
    };
    let (start, end) = (body_node.pos, body_node.end);
    arena.iter().any(|(idx, node)| {
        node.pos >= start
            && node.end <= end
            && arena.identifier_text(idx) == Some(name)
            && is_reference_identifier(arena, idx)
            && resolver.resolve_declaration(name, idx) == Resolution::Declaration(declaration)
    })
}
