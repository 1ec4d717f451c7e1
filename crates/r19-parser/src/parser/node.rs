//! Node types.
//!
//! Every node stores its range, its parent and one `NodeData` variant. The
//! variant set is closed: `NodeKind` mirrors it one-to-one and is what rule
//! visitors subscribe to.

use super::base::{NodeIndex, NodeList};
use r19_scanner::SyntaxKind;
use serde::Serialize;

/// A node in the arena.
#[derive(Clone, Debug)]
pub struct Node {
    /// Start of the node's first token (leading trivia excluded)
    pub pos: u32,
    /// End of the node's last token
    pub end: u32,
    pub parent: NodeIndex,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.pos
    }
}

macro_rules! define_nodes {
    ($( $variant:ident $( ($data:ty) )? ),+ $(,)?) => {
        /// Shape-specific payload of a node.
        #[derive(Clone, Debug)]
        pub enum NodeData {
            $( $variant $( ($data) )? ),+
        }

        /// Discriminant of `NodeData`.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
        pub enum NodeKind {
            $( $variant ),+
        }

        impl NodeData {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $( NodeData::$variant { .. } => NodeKind::$variant ),+
                }
            }
        }
    };
}

define_nodes! {
    SourceFile(SourceFileData),

    // Declarations
    VariableStatement(VariableData),
    VariableDeclaration(VariableDeclarationData),
    FunctionDeclaration(FunctionData),
    ClassDeclaration(ClassData),
    Parameter(ParameterData),
    ObjectBindingPattern(BindingPatternData),
    ArrayBindingPattern(BindingPatternData),
    BindingElement(BindingElementData),

    // Class members
    MethodDeclaration(MethodData),
    PropertyDeclaration(PropertyDeclarationData),
    ClassStaticBlock(BlockData),
    SemicolonClassElement,

    // Statements
    Block(BlockData),
    EmptyStatement,
    ExpressionStatement(ExpressionStatementData),
    IfStatement(IfData),
    ForStatement(LoopData),
    ForInStatement(ForInOfData),
    ForOfStatement(ForInOfData),
    WhileStatement(LoopData),
    DoStatement(LoopData),
    ReturnStatement(WrappedExprData),
    ThrowStatement(WrappedExprData),
    TryStatement(TryData),
    CatchClause(CatchClauseData),
    SwitchStatement(SwitchData),
    CaseClause(CaseClauseData),
    DefaultClause(CaseClauseData),
    BreakStatement(JumpData),
    ContinueStatement(JumpData),
    LabeledStatement(LabeledData),
    DebuggerStatement,

    // Modules
    ImportDeclaration(ImportDeclData),
    ImportSpecifier(ImportSpecifierData),
    ExportDeclaration(ExportDeclData),
    ExportAssignment(WrappedExprData),
    ExportSpecifier(ExportSpecifierData),

    // Names and literals
    Identifier(IdentifierData),
    PrivateIdentifier(IdentifierData),
    StringLiteral(LiteralData),
    NumericLiteral(LiteralData),
    BigIntLiteral(LiteralData),
    RegularExpressionLiteral(LiteralData),
    NoSubstitutionTemplateLiteral(LiteralData),
    TemplateExpression(TemplateExprData),
    TaggedTemplateExpression(TaggedTemplateData),
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ThisKeyword,
    SuperKeyword,
    ImportKeyword,

    // Expressions
    ArrayLiteralExpression(LiteralExprData),
    ObjectLiteralExpression(LiteralExprData),
    PropertyAssignment(PropertyAssignmentData),
    ShorthandPropertyAssignment(ShorthandPropertyData),
    SpreadAssignment(WrappedExprData),
    SpreadElement(WrappedExprData),
    ComputedPropertyName(WrappedExprData),
    OmittedExpression,
    FunctionExpression(FunctionData),
    ArrowFunction(FunctionData),
    ClassExpression(ClassData),
    PropertyAccessExpression(AccessExprData),
    ElementAccessExpression(AccessExprData),
    CallExpression(CallExprData),
    NewExpression(NewExprData),
    ParenthesizedExpression(WrappedExprData),
    AssignmentExpression(BinaryExprData),
    BinaryExpression(BinaryExprData),
    ConditionalExpression(ConditionalExprData),
    PrefixUnaryExpression(UnaryExprData),
    PostfixUnaryExpression(UnaryExprData),
    AwaitExpression(WrappedExprData),
    YieldExpression(YieldData),
    MetaProperty(MetaPropertyData),

    // JSX
    JsxElement(JsxElementData),
    JsxSelfClosingElement(JsxOpeningData),
    JsxOpeningElement(JsxOpeningData),
    JsxClosingElement(JsxClosingData),
    JsxFragment(JsxFragmentData),
    JsxAttribute(JsxAttributeData),
    JsxSpreadAttribute(WrappedExprData),
    JsxExpression(JsxExpressionData),
    JsxText(JsxTextData),
    JsxNamespacedName(JsxNamespacedNameData),
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub statements: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Clone, Debug)]
pub struct VariableData {
    pub kind: VariableKind,
    pub declarations: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    /// Identifier or binding pattern
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Functions, arrows and method bodies.
#[derive(Clone, Debug)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// Block, or an expression for concise arrow bodies
    pub body: NodeIndex,
    pub is_async: bool,
    pub is_generator: bool,
    /// Offset of the `(` opening the parameter list; `None` for `x => ...`
    pub params_open: Option<u32>,
    /// Offset of the `)` closing the parameter list
    pub params_close: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub dot_dot_dot: bool,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

/// `key: name = init`, `name = init`, `...rest`, or an array pattern slot.
#[derive(Clone, Debug)]
pub struct BindingElementData {
    pub dot_dot_dot: bool,
    /// Explicit key (`key` in `key: name`); NONE for shorthand
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub name: NodeIndex,
    pub heritage: NodeIndex,
    pub members: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
    Constructor,
}

#[derive(Clone, Debug)]
pub struct MethodData {
    pub kind: MethodKind,
    pub is_static: bool,
    pub name: NodeIndex,
    pub function: FunctionData,
}

#[derive(Clone, Debug)]
pub struct PropertyDeclarationData {
    pub is_static: bool,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct ExpressionStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IfData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `for (;;)`, `while` and `do` loops.
#[derive(Clone, Debug)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForInOfData {
    pub is_await: bool,
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CatchClauseData {
    pub variable_declaration: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub clauses: NodeList,
}

#[derive(Clone, Debug)]
pub struct CaseClauseData {
    /// NONE for `default:`
    pub expression: NodeIndex,
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct JumpData {
    pub label: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ImportDeclData {
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ImportSpecifierKind {
    Default,
    Namespace,
    Named,
}

#[derive(Clone, Debug)]
pub struct ImportSpecifierData {
    pub kind: ImportSpecifierKind,
    /// Imported name (Identifier or StringLiteral); NONE for default/namespace
    pub imported: NodeIndex,
    pub local: NodeIndex,
}

/// `export <decl>`, `export { a as b } [from '...']`, `export * [as ns] from '...'`.
#[derive(Clone, Debug)]
pub struct ExportDeclData {
    pub declaration: NodeIndex,
    pub specifiers: NodeList,
    pub is_star: bool,
    /// Namespace name for `export * as ns`
    pub star_name: NodeIndex,
    pub module_specifier: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExportSpecifierData {
    pub local: NodeIndex,
    pub exported: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    /// Cooked value for strings, raw text otherwise
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct TemplateExprData {
    pub expressions: NodeList,
}

#[derive(Clone, Debug)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub template: NodeIndex,
}

/// Array and object literals.
#[derive(Clone, Debug)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
    /// `{ a = 1 } = obj` in assignment patterns
    pub object_assignment_initializer: NodeIndex,
}

/// Nodes that wrap a single optional expression.
#[derive(Clone, Debug)]
pub struct WrappedExprData {
    pub expression: NodeIndex,
}

/// Property access (`name_or_argument` is the name) and element access.
#[derive(Clone, Debug)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}

#[derive(Clone, Debug)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
    pub question_dot_token: bool,
}

#[derive(Clone, Debug)]
pub struct NewExprData {
    pub expression: NodeIndex,
    pub arguments: Option<NodeList>,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct YieldData {
    pub asterisk: bool,
    pub expression: NodeIndex,
}

/// `new.target` and `import.meta`.
#[derive(Clone, Debug)]
pub struct MetaPropertyData {
    pub keyword: SyntaxKind,
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct JsxElementData {
    pub opening_element: NodeIndex,
    pub children: NodeList,
    pub closing_element: NodeIndex,
}

/// Opening and self-closing elements.
#[derive(Clone, Debug)]
pub struct JsxOpeningData {
    pub tag_name: NodeIndex,
    pub attributes: NodeList,
}

#[derive(Clone, Debug)]
pub struct JsxClosingData {
    pub tag_name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct JsxFragmentData {
    pub children: NodeList,
}

#[derive(Clone, Debug)]
pub struct JsxAttributeData {
    pub name: NodeIndex,
    /// StringLiteral, JsxExpression, a JSX element, or NONE
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct JsxExpressionData {
    pub dot_dot_dot: bool,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct JsxTextData {
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct JsxNamespacedNameData {
    pub namespace: NodeIndex,
    pub name: NodeIndex,
}

// =============================================================================
// Child iteration
// =============================================================================

impl NodeData {
    /// Visit the direct children of this node in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeIndex)) {
        let mut visit = |idx: NodeIndex| {
            if idx.is_some() {
                f(idx);
            }
        };
        macro_rules! visit_list {
            ($list:expr) => {
                for idx in $list.iter() {
                    visit(idx);
                }
            };
        }

        match self {
            NodeData::SourceFile(d) => visit_list!(d.statements),
            NodeData::VariableStatement(d) => visit_list!(d.declarations),
            NodeData::VariableDeclaration(d) => {
                visit(d.name);
                visit(d.initializer);
            }
            NodeData::FunctionDeclaration(d)
            | NodeData::FunctionExpression(d)
            | NodeData::ArrowFunction(d) => {
                visit(d.name);
                visit_list!(d.parameters);
                visit(d.body);
            }
            NodeData::ClassDeclaration(d) | NodeData::ClassExpression(d) => {
                visit(d.name);
                visit(d.heritage);
                visit_list!(d.members);
            }
            NodeData::Parameter(d) => {
                visit(d.name);
                visit(d.initializer);
            }
            NodeData::ObjectBindingPattern(d) | NodeData::ArrayBindingPattern(d) => {
                visit_list!(d.elements)
            }
            NodeData::BindingElement(d) => {
                visit(d.property_name);
                visit(d.name);
                visit(d.initializer);
            }
            NodeData::MethodDeclaration(d) => {
                visit(d.name);
                visit_list!(d.function.parameters);
                visit(d.function.body);
            }
            NodeData::PropertyDeclaration(d) => {
                visit(d.name);
                visit(d.initializer);
            }
            NodeData::ClassStaticBlock(d) | NodeData::Block(d) => visit_list!(d.statements),
            NodeData::ExpressionStatement(d) => visit(d.expression),
            NodeData::IfStatement(d) => {
                visit(d.expression);
                visit(d.then_statement);
                visit(d.else_statement);
            }
            NodeData::ForStatement(d) | NodeData::WhileStatement(d) => {
                visit(d.initializer);
                visit(d.condition);
                visit(d.incrementor);
                visit(d.statement);
            }
            NodeData::DoStatement(d) => {
                visit(d.statement);
                visit(d.condition);
            }
            NodeData::ForInStatement(d) | NodeData::ForOfStatement(d) => {
                visit(d.initializer);
                visit(d.expression);
                visit(d.statement);
            }
            NodeData::TryStatement(d) => {
                visit(d.try_block);
                visit(d.catch_clause);
                visit(d.finally_block);
            }
            NodeData::CatchClause(d) => {
                visit(d.variable_declaration);
                visit(d.block);
            }
            NodeData::SwitchStatement(d) => {
                visit(d.expression);
                visit_list!(d.clauses);
            }
            NodeData::CaseClause(d) | NodeData::DefaultClause(d) => {
                visit(d.expression);
                visit_list!(d.statements);
            }
            NodeData::BreakStatement(d) | NodeData::ContinueStatement(d) => visit(d.label),
            NodeData::LabeledStatement(d) => {
                visit(d.label);
                visit(d.statement);
            }
            NodeData::ImportDeclaration(d) => {
                visit_list!(d.specifiers);
                visit(d.module_specifier);
            }
            NodeData::ImportSpecifier(d) => {
                visit(d.imported);
                visit(d.local);
            }
            NodeData::ExportDeclaration(d) => {
                visit(d.declaration);
                visit(d.star_name);
                visit_list!(d.specifiers);
                visit(d.module_specifier);
            }
            NodeData::ExportSpecifier(d) => {
                visit(d.local);
                visit(d.exported);
            }
            NodeData::TemplateExpression(d) => visit_list!(d.expressions),
            NodeData::TaggedTemplateExpression(d) => {
                visit(d.tag);
                visit(d.template);
            }
            NodeData::ArrayLiteralExpression(d) | NodeData::ObjectLiteralExpression(d) => {
                visit_list!(d.elements)
            }
            NodeData::PropertyAssignment(d) => {
                visit(d.name);
                visit(d.initializer);
            }
            NodeData::ShorthandPropertyAssignment(d) => {
                visit(d.name);
                visit(d.object_assignment_initializer);
            }
            NodeData::ReturnStatement(d)
            | NodeData::ThrowStatement(d)
            | NodeData::ExportAssignment(d)
            | NodeData::SpreadAssignment(d)
            | NodeData::SpreadElement(d)
            | NodeData::ComputedPropertyName(d)
            | NodeData::ParenthesizedExpression(d)
            | NodeData::AwaitExpression(d)
            | NodeData::JsxSpreadAttribute(d) => visit(d.expression),
            NodeData::PropertyAccessExpression(d) | NodeData::ElementAccessExpression(d) => {
                visit(d.expression);
                visit(d.name_or_argument);
            }
            NodeData::CallExpression(d) => {
                visit(d.expression);
                visit_list!(d.arguments);
            }
            NodeData::NewExpression(d) => {
                visit(d.expression);
                if let Some(arguments) = &d.arguments {
                    visit_list!(arguments);
                }
            }
            NodeData::AssignmentExpression(d) | NodeData::BinaryExpression(d) => {
                visit(d.left);
                visit(d.right);
            }
            NodeData::ConditionalExpression(d) => {
                visit(d.condition);
                visit(d.when_true);
                visit(d.when_false);
            }
            NodeData::PrefixUnaryExpression(d) | NodeData::PostfixUnaryExpression(d) => {
                visit(d.operand)
            }
            NodeData::YieldExpression(d) => visit(d.expression),
            NodeData::MetaProperty(d) => visit(d.name),
            NodeData::JsxElement(d) => {
                visit(d.opening_element);
                visit_list!(d.children);
                visit(d.closing_element);
            }
            NodeData::JsxSelfClosingElement(d) | NodeData::JsxOpeningElement(d) => {
                visit(d.tag_name);
                visit_list!(d.attributes);
            }
            NodeData::JsxClosingElement(d) => visit(d.tag_name),
            NodeData::JsxFragment(d) => visit_list!(d.children),
            NodeData::JsxAttribute(d) => {
                visit(d.name);
                visit(d.initializer);
            }
            NodeData::JsxExpression(d) => visit(d.expression),
            NodeData::JsxNamespacedName(d) => {
                visit(d.namespace);
                visit(d.name);
            }
            NodeData::SemicolonClassElement
            | NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::Identifier(_)
            | NodeData::PrivateIdentifier(_)
            | NodeData::StringLiteral(_)
            | NodeData::NumericLiteral(_)
            | NodeData::BigIntLiteral(_)
            | NodeData::RegularExpressionLiteral(_)
            | NodeData::NoSubstitutionTemplateLiteral(_)
            | NodeData::TrueKeyword
            | NodeData::FalseKeyword
            | NodeData::NullKeyword
            | NodeData::ThisKeyword
            | NodeData::SuperKeyword
            | NodeData::ImportKeyword
            | NodeData::OmittedExpression
            | NodeData::JsxText(_) => {}
        }
    }
}

impl NodeKind {
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::ArrowFunction
                | NodeKind::MethodDeclaration
        )
    }

    pub fn is_class_like(self) -> bool {
        matches!(self, NodeKind::ClassDeclaration | NodeKind::ClassExpression)
    }

    pub fn is_binding_pattern(self) -> bool {
        matches!(
            self,
            NodeKind::ObjectBindingPattern | NodeKind::ArrayBindingPattern
        )
    }
}
