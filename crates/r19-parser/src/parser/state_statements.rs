//! Parser state - statement, declaration and module parsing methods
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, CONTEXT_FLAG_IN_FUNCTION,
    ParserState,
};
use crate::parser::{
    NodeIndex, NodeList,
    node::{
        BindingElementData, BindingPatternData, BlockData, CaseClauseData, CatchClauseData,
        ClassData, ExportDeclData, ExportSpecifierData, ExpressionStatementData, ForInOfData,
        FunctionData, IfData, ImportDeclData, ImportSpecifierData, ImportSpecifierKind, JumpData,
        LabeledData, LiteralData, LoopData, MethodData, MethodKind, NodeData, NodeKind,
        ParameterData, PropertyDeclarationData, SourceFileData, SwitchData, TryData,
        VariableData, VariableDeclarationData, VariableKind, WrappedExprData,
    },
};
use r19_scanner::{SyntaxKind, token_is_identifier_or_keyword};

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse a source file
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();
        let statements = self.parse_statement_list(|_| false);
        self.collect_scanner_diagnostics();
        let end = self.scanner.source_text().len() as u32;
        self.arena
            .add(0, end, NodeData::SourceFile(SourceFileData { statements }))
    }

    /// Parse statements until EOF or a token accepted by `is_terminator`.
    pub(crate) fn parse_statement_list(&mut self, is_terminator: fn(SyntaxKind) -> bool) -> NodeList {
        let pos = self.token_pos();
        let mut nodes = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) && !is_terminator(self.token()) {
            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                nodes.push(statement);
            }
            if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.error_at_current_token("Declaration or statement expected.");
                self.next_token();
            }
        }
        self.make_list(nodes, pos)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_statement_worker();
        self.exit_recursion();
        result
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.finish_node(start, NodeData::EmptyStatement)
            }
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement()
            }
            SyntaxKind::LetKeyword if self.next_starts_let_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(start, false, false),
            SyntaxKind::AsyncKeyword if self.next_is_function_on_same_line() => {
                self.next_token();
                self.parse_function_declaration(start, true, false)
            }
            SyntaxKind::ClassKeyword => self.parse_class(start, true, false),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => {
                self.next_token();
                let expression = self.parse_expression();
                self.parse_semicolon();
                self.finish_node(start, NodeData::ThrowStatement(WrappedExprData { expression }))
            }
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => {
                self.parse_break_or_continue()
            }
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                self.finish_node(start, NodeData::DebuggerStatement)
            }
            SyntaxKind::ImportKeyword
                if !self.look_ahead(|p| {
                    matches!(
                        p.next_token(),
                        SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                    )
                }) =>
            {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            _ if self.is_identifier() && self.next_token_is(SyntaxKind::ColonToken) => {
                let label = self.parse_identifier();
                self.next_token();
                let statement = self.parse_statement();
                self.finish_node(
                    start,
                    NodeData::LabeledStatement(LabeledData { label, statement }),
                )
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn next_starts_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || p.is_token(SyntaxKind::OpenBraceToken)
                || p.is_token(SyntaxKind::OpenBracketToken)
        })
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        if expression.is_none() {
            return NodeIndex::NONE;
        }
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ExpressionStatement(ExpressionStatementData { expression }),
        )
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let statements = self.parse_braced_statements();
        self.finish_node(start, NodeData::Block(BlockData { statements }))
    }

    fn parse_braced_statements(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(|k| k == SyntaxKind::CloseBraceToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        statements
    }

    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::IfStatement(IfData {
                expression,
                then_statement,
                else_statement,
            }),
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let condition = self.parse_parenthesized_condition();
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(
            start,
            NodeData::DoStatement(LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            }),
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let condition = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::WhileStatement(LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            }),
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let is_await = self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = self.with_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| {
            let init_start = p.token_pos();
            match p.token() {
                SyntaxKind::SemicolonToken => NodeIndex::NONE,
                SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                    let data = p.parse_variable_declaration_list();
                    p.finish_node(init_start, NodeData::VariableStatement(data))
                }
                SyntaxKind::LetKeyword if p.next_starts_let_declaration() => {
                    let data = p.parse_variable_declaration_list();
                    p.finish_node(init_start, NodeData::VariableStatement(data))
                }
                _ => p.parse_expression(),
            }
        });

        if self.parse_optional(SyntaxKind::OfKeyword) {
            let expression = self.parse_assignment_expression_or_higher();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.finish_node(
                start,
                NodeData::ForOfStatement(ForInOfData {
                    is_await,
                    initializer,
                    expression,
                    statement,
                }),
            );
        }
        if self.parse_optional(SyntaxKind::InKeyword) {
            let expression = self.parse_expression();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            return self.finish_node(
                start,
                NodeData::ForInStatement(ForInOfData {
                    is_await,
                    initializer,
                    expression,
                    statement,
                }),
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::ForStatement(LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            }),
        )
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.finish_node(start, NodeData::ReturnStatement(WrappedExprData { expression }))
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let binding = self.parse_binding_name();
                self.parse_expected(SyntaxKind::CloseParenToken);
                binding
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            self.finish_node(
                catch_start,
                NodeData::CatchClause(CatchClauseData {
                    variable_declaration,
                    block,
                }),
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };
        if catch_clause.is_none() && finally_block.is_none() {
            self.error_at_current_token("'catch' or 'finally' expected.");
        }
        self.finish_node(
            start,
            NodeData::TryStatement(TryData {
                try_block,
                catch_clause,
                finally_block,
            }),
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let clauses_pos = self.token_pos();
        let mut clauses = Vec::new();
        loop {
            let clause_start = self.token_pos();
            let is_default = match self.token() {
                SyntaxKind::CaseKeyword => false,
                SyntaxKind::DefaultKeyword => true,
                _ => break,
            };
            self.next_token();
            let expression = if is_default {
                NodeIndex::NONE
            } else {
                self.parse_expression()
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_statement_list(|k| {
                matches!(
                    k,
                    SyntaxKind::CaseKeyword
                        | SyntaxKind::DefaultKeyword
                        | SyntaxKind::CloseBraceToken
                )
            });
            let data = CaseClauseData {
                expression,
                statements,
            };
            clauses.push(self.finish_node(
                clause_start,
                if is_default {
                    NodeData::DefaultClause(data)
                } else {
                    NodeData::CaseClause(data)
                },
            ));
        }
        let clauses = self.make_list(clauses, clauses_pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            start,
            NodeData::SwitchStatement(SwitchData {
                expression,
                clauses,
            }),
        )
    }

    fn parse_break_or_continue(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_break = self.is_token(SyntaxKind::BreakKeyword);
        self.next_token();
        let label = if self.is_identifier() && !self.scanner.has_preceding_line_break() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let data = JumpData { label };
        self.finish_node(
            start,
            if is_break {
                NodeData::BreakStatement(data)
            } else {
                NodeData::ContinueStatement(data)
            },
        )
    }

    // =========================================================================
    // Variables and bindings
    // =========================================================================

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let data = self.parse_variable_declaration_list();
        self.parse_semicolon();
        self.finish_node(start, NodeData::VariableStatement(data))
    }

    /// `var|let|const a = 1, { b } = c` (current token is the keyword).
    fn parse_variable_declaration_list(&mut self) -> VariableData {
        let kind = match self.token() {
            SyntaxKind::VarKeyword => VariableKind::Var,
            SyntaxKind::LetKeyword => VariableKind::Let,
            _ => VariableKind::Const,
        };
        self.next_token();
        let pos = self.token_pos();
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token_pos();
            let name = self.parse_binding_name();
            if name.is_none() {
                break;
            }
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression_or_higher()
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.finish_node(
                decl_start,
                NodeData::VariableDeclaration(VariableDeclarationData { name, initializer }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        VariableData {
            kind,
            declarations: self.make_list(declarations, pos),
        }
    }

    /// Identifier, object pattern or array pattern.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        self.next_token();
        let pos = self.token_pos();
        let mut elements = Vec::new();
        let mut has_trailing_comma = false;
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_start = self.token_pos();
            let data = if self.parse_optional(SyntaxKind::DotDotDotToken) {
                BindingElementData {
                    dot_dot_dot: true,
                    property_name: NodeIndex::NONE,
                    name: self.parse_identifier(),
                    initializer: NodeIndex::NONE,
                }
            } else {
                let is_shorthand_candidate = self.is_identifier();
                let key = self.parse_property_name();
                if key.is_none() {
                    break;
                }
                let (property_name, name) = if self.parse_optional(SyntaxKind::ColonToken) {
                    (key, self.parse_binding_name())
                } else {
                    if !is_shorthand_candidate {
                        self.error_at_current_token("':' expected.");
                    }
                    (NodeIndex::NONE, key)
                };
                let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                    self.parse_assignment_expression_or_higher()
                } else {
                    NodeIndex::NONE
                };
                BindingElementData {
                    dot_dot_dot: false,
                    property_name,
                    name,
                    initializer,
                }
            };
            elements.push(self.finish_node(element_start, NodeData::BindingElement(data)));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            has_trailing_comma = self.is_token(SyntaxKind::CloseBraceToken);
        }
        let mut elements = self.make_list(elements, pos);
        elements.has_trailing_comma = has_trailing_comma;
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.exit_recursion();
        self.finish_node(
            start,
            NodeData::ObjectBindingPattern(BindingPatternData { elements }),
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        self.next_token();
        let pos = self.token_pos();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_start = self.token_pos();
            if self.is_token(SyntaxKind::CommaToken) {
                elements.push(self.arena.add(
                    element_start,
                    element_start,
                    NodeData::OmittedExpression,
                ));
                self.next_token();
                continue;
            }
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            if name.is_none() {
                break;
            }
            let initializer = if !dot_dot_dot && self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression_or_higher()
            } else {
                NodeIndex::NONE
            };
            elements.push(self.finish_node(
                element_start,
                NodeData::BindingElement(BindingElementData {
                    dot_dot_dot,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let elements = self.make_list(elements, pos);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.exit_recursion();
        self.finish_node(
            start,
            NodeData::ArrayBindingPattern(BindingPatternData { elements }),
        )
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Parse `( params )`, returning the list and the paren offsets.
    pub(crate) fn parse_parameters(&mut self) -> (NodeList, Option<u32>, Option<u32>) {
        let open = self.token_pos();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return (NodeList::default(), None, None);
        }
        let pos = self.token_pos();
        let mut params = Vec::new();
        let mut has_trailing_comma = false;
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let param_start = self.token_pos();
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            if name.is_none() {
                break;
            }
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                    p.parse_assignment_expression_or_higher()
                })
            } else {
                NodeIndex::NONE
            };
            params.push(self.finish_node(
                param_start,
                NodeData::Parameter(ParameterData {
                    dot_dot_dot,
                    name,
                    initializer,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            has_trailing_comma = self.is_token(SyntaxKind::CloseParenToken);
        }
        let mut list = self.make_list(params, pos);
        list.has_trailing_comma = has_trailing_comma;
        let close = self.token_pos();
        if !self.parse_expected(SyntaxKind::CloseParenToken) {
            return (list, Some(open), None);
        }
        (list, Some(open), Some(close))
    }

    /// Parse `{ ... }` as a function body.
    pub(crate) fn parse_function_body(&mut self) -> NodeIndex {
        self.with_context(CONTEXT_FLAG_IN_FUNCTION, 0, |p| p.parse_block())
    }

    pub(crate) fn function_context(is_async: bool, is_generator: bool) -> (u8, u8) {
        let mut set = CONTEXT_FLAG_IN_FUNCTION;
        if is_async {
            set |= CONTEXT_FLAG_ASYNC;
        }
        if is_generator {
            set |= CONTEXT_FLAG_GENERATOR;
        }
        let clear = (CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN) & !set;
        (set, clear)
    }

    /// Parameters and body of a function whose name (if any) was consumed.
    pub(crate) fn parse_function_signature_and_body(
        &mut self,
        name: NodeIndex,
        is_async: bool,
        is_generator: bool,
    ) -> FunctionData {
        let (set, clear) = Self::function_context(is_async, is_generator);
        self.with_context(set, clear, |p| {
            let (parameters, params_open, params_close) = p.parse_parameters();
            let body = if p.is_token(SyntaxKind::OpenBraceToken) {
                p.parse_function_body()
            } else {
                p.error_at_current_token("'{' expected.");
                NodeIndex::NONE
            };
            FunctionData {
                name,
                parameters,
                body,
                is_async,
                is_generator,
                params_open,
                params_close,
            }
        })
    }

    /// `function [*] name (...) {...}`; the current token is `function`.
    pub(crate) fn parse_function_declaration(
        &mut self,
        start: u32,
        is_async: bool,
        name_optional: bool,
    ) -> NodeIndex {
        self.next_token();
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            if !name_optional {
                self.error_at_current_token("Identifier expected.");
            }
            NodeIndex::NONE
        };
        let data = self.parse_function_signature_and_body(name, is_async, is_generator);
        self.finish_node(start, NodeData::FunctionDeclaration(data))
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// `class [name] [extends expr] { members }`; the current token is `class`.
    pub(crate) fn parse_class(
        &mut self,
        start: u32,
        is_declaration: bool,
        name_optional: bool,
    ) -> NodeIndex {
        self.next_token();
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            if is_declaration && !name_optional {
                self.error_at_current_token("Identifier expected.");
            }
            NodeIndex::NONE
        };
        let heritage = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_left_hand_side_expression_or_higher()
        } else {
            NodeIndex::NONE
        };

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let pos = self.token_pos();
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == before {
                self.error_at_current_token("Unexpected token. A class member was expected.");
                self.next_token();
            }
        }
        let members = self.make_list(members, pos);
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let data = ClassData {
            name,
            heritage,
            members,
        };
        self.finish_node(
            start,
            if is_declaration {
                NodeData::ClassDeclaration(data)
            } else {
                NodeData::ClassExpression(data)
            },
        )
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return self.finish_node(start, NodeData::SemicolonClassElement);
        }

        let mut is_static = false;
        if self.is_token(SyntaxKind::StaticKeyword) {
            let next = self.look_ahead(|p| p.next_token());
            if next == SyntaxKind::OpenBraceToken {
                self.next_token();
                let statements = self.with_context(CONTEXT_FLAG_IN_FUNCTION, CONTEXT_FLAG_ASYNC, |p| {
                    p.parse_braced_statements()
                });
                return self.finish_node(start, NodeData::ClassStaticBlock(BlockData { statements }));
            }
            if self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
                    || p.is_token(SyntaxKind::AsteriskToken)
            }) {
                is_static = true;
                self.next_token();
            }
        }

        let (is_async, is_generator, accessor) = self.parse_member_modifiers();
        let name = self.parse_property_name();
        if name.is_none() {
            return NodeIndex::NONE;
        }

        if self.is_token(SyntaxKind::OpenParenToken) || is_async || is_generator || accessor.is_some()
        {
            let kind = match accessor {
                Some(kind) => kind,
                None if !is_static && self.is_constructor_name(name) => MethodKind::Constructor,
                None => MethodKind::Method,
            };
            let function = self.parse_function_signature_and_body(NodeIndex::NONE, is_async, is_generator);
            return self.finish_node(
                start,
                NodeData::MethodDeclaration(MethodData {
                    kind,
                    is_static,
                    name,
                    function,
                }),
            );
        }

        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            let (set, clear) = Self::function_context(false, false);
            self.with_context(set, clear, |p| p.parse_assignment_expression_or_higher())
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::PropertyDeclaration(PropertyDeclarationData {
                is_static,
                name,
                initializer,
            }),
        )
    }

    fn is_constructor_name(&self, name: NodeIndex) -> bool {
        self.arena.property_name_text(name) == Some("constructor")
    }

    pub(crate) fn is_property_name_start(&self) -> bool {
        token_is_identifier_or_keyword(self.token())
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::PrivateIdentifier
                    | SyntaxKind::OpenBracketToken
            )
    }

    /// `async`, `*`, `get` and `set` in front of a class or object member.
    pub(crate) fn parse_member_modifiers(&mut self) -> (bool, bool, Option<MethodKind>) {
        let mut is_async = false;
        if self.is_token(SyntaxKind::AsyncKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !p.scanner.has_preceding_line_break()
                    && (p.is_property_name_start() || p.is_token(SyntaxKind::AsteriskToken))
            })
        {
            is_async = true;
            self.next_token();
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let mut accessor = None;
        if !is_async
            && !is_generator
            && matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            })
        {
            accessor = Some(if self.is_token(SyntaxKind::GetKeyword) {
                MethodKind::Getter
            } else {
                MethodKind::Setter
            });
            self.next_token();
        }
        (is_async, is_generator, accessor)
    }

    /// Identifier/keyword, string, number, private name or `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::StringLiteral => self.parse_string_literal(),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                let text = self.scanner.token_text().to_string();
                self.next_token();
                self.finish_node(start, NodeData::NumericLiteral(LiteralData { text }))
            }
            SyntaxKind::PrivateIdentifier => {
                let escaped_text = self.scanner.token_value().to_string();
                self.next_token();
                self.finish_node(
                    start,
                    NodeData::PrivateIdentifier(crate::parser::node::IdentifierData {
                        escaped_text,
                    }),
                )
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                    p.parse_assignment_expression_or_higher()
                });
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.finish_node(
                    start,
                    NodeData::ComputedPropertyName(WrappedExprData { expression }),
                )
            }
            kind if token_is_identifier_or_keyword(kind) => self.parse_identifier_name(),
            _ => {
                self.error_at_current_token("Property assignment expected.");
                NodeIndex::NONE
            }
        }
    }

    pub(crate) fn parse_string_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.is_token(SyntaxKind::StringLiteral) {
            self.error_at_current_token("String literal expected.");
            return NodeIndex::NONE;
        }
        let text = self.scanner.token_value().to_string();
        self.next_token();
        self.finish_node(start, NodeData::StringLiteral(LiteralData { text }))
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn parse_import_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let pos = self.token_pos();
        let mut specifiers = Vec::new();

        if self.is_token(SyntaxKind::StringLiteral) {
            let module_specifier = self.parse_string_literal();
            self.parse_semicolon();
            return self.finish_node(
                start,
                NodeData::ImportDeclaration(ImportDeclData {
                    specifiers: self.make_list(specifiers, pos),
                    module_specifier,
                }),
            );
        }

        let default_is_from = self.is_token(SyntaxKind::FromKeyword)
            && self.next_token_is(SyntaxKind::StringLiteral);
        if self.is_identifier() && !default_is_from {
            let spec_start = self.token_pos();
            let local = self.parse_identifier();
            specifiers.push(self.finish_node(
                spec_start,
                NodeData::ImportSpecifier(ImportSpecifierData {
                    kind: ImportSpecifierKind::Default,
                    imported: NodeIndex::NONE,
                    local,
                }),
            ));
            self.parse_optional(SyntaxKind::CommaToken);
        }

        if self.is_token(SyntaxKind::AsteriskToken) {
            let spec_start = self.token_pos();
            self.next_token();
            self.parse_expected(SyntaxKind::AsKeyword);
            let local = self.parse_identifier();
            specifiers.push(self.finish_node(
                spec_start,
                NodeData::ImportSpecifier(ImportSpecifierData {
                    kind: ImportSpecifierKind::Namespace,
                    imported: NodeIndex::NONE,
                    local,
                }),
            ));
        } else if self.parse_optional(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let spec_start = self.token_pos();
                let name = if self.is_token(SyntaxKind::StringLiteral) {
                    self.parse_string_literal()
                } else {
                    self.parse_identifier_name()
                };
                if name.is_none() {
                    break;
                }
                let (imported, local) = if self.parse_optional(SyntaxKind::AsKeyword) {
                    (name, self.parse_identifier())
                } else {
                    (NodeIndex::NONE, name)
                };
                specifiers.push(self.finish_node(
                    spec_start,
                    NodeData::ImportSpecifier(ImportSpecifierData {
                        kind: ImportSpecifierKind::Named,
                        imported,
                        local,
                    }),
                ));
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }

        let specifiers = self.make_list(specifiers, pos);
        self.parse_expected(SyntaxKind::FromKeyword);
        let module_specifier = self.parse_string_literal();
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ImportDeclaration(ImportDeclData {
                specifiers,
                module_specifier,
            }),
        )
    }

    fn parse_export_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        if self.parse_optional(SyntaxKind::DefaultKeyword) {
            let decl_start = self.token_pos();
            let expression = match self.token() {
                SyntaxKind::FunctionKeyword => {
                    self.parse_function_declaration(decl_start, false, true)
                }
                SyntaxKind::AsyncKeyword if self.next_is_function_on_same_line() => {
                    self.next_token();
                    self.parse_function_declaration(decl_start, true, true)
                }
                SyntaxKind::ClassKeyword => self.parse_class(decl_start, true, true),
                _ => {
                    let expression = self.parse_assignment_expression_or_higher();
                    self.parse_semicolon();
                    expression
                }
            };
            return self.finish_node(start, NodeData::ExportAssignment(WrappedExprData { expression }));
        }

        let mut data = ExportDeclData {
            declaration: NodeIndex::NONE,
            specifiers: NodeList::default(),
            is_star: false,
            star_name: NodeIndex::NONE,
            module_specifier: NodeIndex::NONE,
        };

        match self.token() {
            SyntaxKind::AsteriskToken => {
                self.next_token();
                data.is_star = true;
                if self.parse_optional(SyntaxKind::AsKeyword) {
                    data.star_name = if self.is_token(SyntaxKind::StringLiteral) {
                        self.parse_string_literal()
                    } else {
                        self.parse_identifier_name()
                    };
                }
                self.parse_expected(SyntaxKind::FromKeyword);
                data.module_specifier = self.parse_string_literal();
                self.parse_semicolon();
            }
            SyntaxKind::OpenBraceToken => {
                self.next_token();
                let pos = self.token_pos();
                let mut specifiers = Vec::new();
                while !self.is_token(SyntaxKind::CloseBraceToken)
                    && !self.is_token(SyntaxKind::EndOfFileToken)
                {
                    let spec_start = self.token_pos();
                    let local = if self.is_token(SyntaxKind::StringLiteral) {
                        self.parse_string_literal()
                    } else {
                        self.parse_identifier_name()
                    };
                    if local.is_none() {
                        break;
                    }
                    let exported = if self.parse_optional(SyntaxKind::AsKeyword) {
                        if self.is_token(SyntaxKind::StringLiteral) {
                            self.parse_string_literal()
                        } else {
                            self.parse_identifier_name()
                        }
                    } else {
                        NodeIndex::NONE
                    };
                    specifiers.push(self.finish_node(
                        spec_start,
                        NodeData::ExportSpecifier(ExportSpecifierData { local, exported }),
                    ));
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                data.specifiers = self.make_list(specifiers, pos);
                self.parse_expected(SyntaxKind::CloseBraceToken);
                if self.parse_optional(SyntaxKind::FromKeyword) {
                    data.module_specifier = self.parse_string_literal();
                }
                self.parse_semicolon();
            }
            _ => {
                let declaration = self.parse_statement();
                let is_declaration = matches!(
                    self.arena.kind(declaration),
                    Some(
                        NodeKind::VariableStatement
                            | NodeKind::FunctionDeclaration
                            | NodeKind::ClassDeclaration
                    )
                );
                if !is_declaration {
                    self.error_at(start, 6, "Declaration or statement expected.");
                }
                data.declaration = declaration;
            }
        }
        self.finish_node(start, NodeData::ExportDeclaration(data))
    }
}
