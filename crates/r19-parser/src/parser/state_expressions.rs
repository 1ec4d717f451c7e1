//! Parser state - expression parsing methods
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, CONTEXT_FLAG_IN_FUNCTION,
    ParserState,
};
use crate::parser::{
    NodeIndex, NodeList,
    node::{
        AccessExprData, BinaryExprData, CallExprData, ConditionalExprData, FunctionData,
        IdentifierData, LiteralData, LiteralExprData, MetaPropertyData, MethodData, MethodKind,
        NewExprData, NodeData, NodeKind, ParameterData, PropertyAssignmentData,
        ShorthandPropertyData, TaggedTemplateData, TemplateExprData, UnaryExprData,
        WrappedExprData, YieldData,
    },
};
use r19_scanner::{SyntaxKind, token_is_assignment_operator};

/// Binary operator precedence; 0 means "not a binary operator".
pub(crate) fn binary_operator_precedence(kind: SyntaxKind) -> u8 {
    use SyntaxKind::*;
    match kind {
        QuestionQuestionToken => 1,
        BarBarToken => 2,
        AmpersandAmpersandToken => 3,
        BarToken => 4,
        CaretToken => 5,
        AmpersandToken => 6,
        EqualsEqualsToken
        | ExclamationEqualsToken
        | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken => 7,
        LessThanToken
        | GreaterThanToken
        | LessThanEqualsToken
        | GreaterThanEqualsToken
        | InstanceOfKeyword
        | InKeyword => 8,
        LessThanLessThanToken
        | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => 9,
        PlusToken | MinusToken => 10,
        AsteriskToken | SlashToken | PercentToken => 11,
        AsteriskAsteriskToken => 12,
        _ => 0,
    }
}

/// Tokens after which an expression cannot continue; used to decide
/// whether `yield`/`await` take an operand.
fn ends_expression(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        CloseParenToken
            | CloseBracketToken
            | CloseBraceToken
            | CommaToken
            | SemicolonToken
            | ColonToken
            | EndOfFileToken
            | EqualsGreaterThanToken
            | QuestionToken
    ) || token_is_assignment_operator(kind)
        || (binary_operator_precedence(kind) > 0
            && !matches!(kind, PlusToken | MinusToken | LessThanToken | SlashToken))
}

impl ParserState {
    // =========================================================================
    // Comma and assignment
    // =========================================================================

    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expr = self.parse_assignment_expression_or_higher();
        while expr.is_some() && self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression_or_higher();
            expr = self.finish_node(
                start,
                NodeData::BinaryExpression(BinaryExprData {
                    left: expr,
                    operator_token: SyntaxKind::CommaToken,
                    right,
                }),
            );
        }
        expr
    }

    pub(crate) fn parse_assignment_expression_or_higher(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_assignment_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::YieldKeyword) && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }

        let start = self.token_pos();
        let expr = self.parse_conditional_expression();
        if expr.is_some()
            && token_is_assignment_operator(self.token())
            && self.is_assignment_target(expr)
        {
            let operator_token = self.token();
            self.next_token();
            let right = self.parse_assignment_expression_or_higher();
            return self.finish_node(
                start,
                NodeData::AssignmentExpression(BinaryExprData {
                    left: expr,
                    operator_token,
                    right,
                }),
            );
        }
        expr
    }

    fn is_assignment_target(&self, expr: NodeIndex) -> bool {
        matches!(
            self.arena.kind(expr),
            Some(
                NodeKind::Identifier
                    | NodeKind::PropertyAccessExpression
                    | NodeKind::ElementAccessExpression
                    | NodeKind::ObjectLiteralExpression
                    | NodeKind::ArrayLiteralExpression
                    | NodeKind::ParenthesizedExpression
            )
        )
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if (self.scanner.has_preceding_line_break() || ends_expression(self.token()))
            && !self.is_token(SyntaxKind::AsteriskToken)
        {
            return self.finish_node(
                start,
                NodeData::YieldExpression(YieldData {
                    asterisk: false,
                    expression: NodeIndex::NONE,
                }),
            );
        }
        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        let expression = self.parse_assignment_expression_or_higher();
        self.finish_node(
            start,
            NodeData::YieldExpression(YieldData {
                asterisk,
                expression,
            }),
        )
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    fn try_parse_arrow_function(&mut self) -> Option<NodeIndex> {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::OpenParenToken => {
                let (parameters, open, close) = self.try_parse(|p| {
                    let signature = p.with_context(0, CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR, |p| {
                        p.parse_parameters()
                    });
                    p.at_arrow().then_some(signature)
                })?;
                Some(self.parse_arrow_function_rest(start, parameters, open, close, false))
            }
            SyntaxKind::AsyncKeyword => {
                let next = self.look_ahead(|p| {
                    let next = p.next_token();
                    if p.scanner.has_preceding_line_break() {
                        return None;
                    }
                    Some((next, p.is_identifier()))
                })?;
                match next {
                    (SyntaxKind::OpenParenToken, _) => {
                        let (parameters, open, close) = self.try_parse(|p| {
                            p.next_token();
                            let signature = p.with_context(CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_GENERATOR, |p| {
                                p.parse_parameters()
                            });
                            p.at_arrow().then_some(signature)
                        })?;
                        Some(self.parse_arrow_function_rest(start, parameters, open, close, true))
                    }
                    (_, true) => {
                        let is_arrow = self.look_ahead(|p| {
                            p.next_token();
                            p.next_token();
                            p.at_arrow()
                        });
                        if !is_arrow {
                            return None;
                        }
                        self.next_token();
                        let parameters = self.parse_simple_arrow_parameter();
                        Some(self.parse_arrow_function_rest(start, parameters, None, None, true))
                    }
                    _ => None,
                }
            }
            _ if self.is_identifier() => {
                let is_arrow = self.look_ahead(|p| {
                    p.next_token();
                    p.at_arrow()
                });
                if !is_arrow {
                    return None;
                }
                let parameters = self.parse_simple_arrow_parameter();
                Some(self.parse_arrow_function_rest(start, parameters, None, None, false))
            }
            _ => None,
        }
    }

    fn at_arrow(&self) -> bool {
        self.is_token(SyntaxKind::EqualsGreaterThanToken) && !self.scanner.has_preceding_line_break()
    }

    /// The lone parameter of `x => ...`.
    fn parse_simple_arrow_parameter(&mut self) -> NodeList {
        let start = self.token_pos();
        let name = self.parse_identifier();
        let param = self.finish_node(
            start,
            NodeData::Parameter(ParameterData {
                dot_dot_dot: false,
                name,
                initializer: NodeIndex::NONE,
            }),
        );
        NodeList::new(vec![param], start, self.prev_token_end)
    }

    /// `=> body` after the parameters.
    fn parse_arrow_function_rest(
        &mut self,
        start: u32,
        parameters: NodeList,
        params_open: Option<u32>,
        params_close: Option<u32>,
        is_async: bool,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let (set, clear) = Self::function_context(is_async, false);
        let body = self.with_context(set, clear, |p| {
            if p.is_token(SyntaxKind::OpenBraceToken) {
                p.parse_function_body()
            } else {
                p.parse_assignment_expression_or_higher()
            }
        });
        self.finish_node(
            start,
            NodeData::ArrowFunction(FunctionData {
                name: NodeIndex::NONE,
                parameters,
                body,
                is_async,
                is_generator: false,
                params_open,
                params_close,
            }),
        )
    }

    // =========================================================================
    // Conditional and binary
    // =========================================================================

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let condition = self.parse_binary_expression(0);
        if condition.is_none() || !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            p.parse_assignment_expression_or_higher()
        });
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression_or_higher();
        self.finish_node(
            start,
            NodeData::ConditionalExpression(ConditionalExprData {
                condition,
                when_true,
                when_false,
            }),
        )
    }

    fn parse_binary_expression(&mut self, precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression_or_higher();
        if left.is_none() {
            return left;
        }
        loop {
            if self.is_token(SyntaxKind::GreaterThanToken) {
                self.scanner.re_scan_greater_token();
            }
            let operator_token = self.token();
            let new_precedence = if operator_token == SyntaxKind::InKeyword
                && self.in_context(CONTEXT_FLAG_DISALLOW_IN)
            {
                0
            } else {
                binary_operator_precedence(operator_token)
            };
            if new_precedence == 0 {
                break;
            }
            let consume = if operator_token == SyntaxKind::AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if !consume {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(new_precedence);
            left = self.finish_node(
                start,
                NodeData::BinaryExpression(BinaryExprData {
                    left,
                    operator_token,
                    right,
                }),
            );
        }
        left
    }

    // =========================================================================
    // Unary
    // =========================================================================

    fn parse_unary_expression_or_higher(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_operand();
                self.finish_node(
                    start,
                    NodeData::PrefixUnaryExpression(UnaryExprData { operator, operand }),
                )
            }
            SyntaxKind::AwaitKeyword if self.is_await_expression() => {
                self.next_token();
                let expression = self.parse_unary_operand();
                self.finish_node(start, NodeData::AwaitExpression(WrappedExprData { expression }))
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_unary_operand(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let operand = self.parse_unary_expression_or_higher();
        self.exit_recursion();
        operand
    }

    /// `await` is an operator inside async functions and at module top level.
    fn is_await_expression(&mut self) -> bool {
        if self.in_context(CONTEXT_FLAG_ASYNC) {
            return true;
        }
        if self.in_context(CONTEXT_FLAG_IN_FUNCTION) {
            return false;
        }
        self.look_ahead(|p| {
            let next = p.next_token();
            !p.scanner.has_preceding_line_break() && !ends_expression(next)
        })
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_left_hand_side_expression_or_higher();
        if expression.is_some()
            && matches!(
                self.token(),
                SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
            )
            && !self.scanner.has_preceding_line_break()
        {
            let operator = self.token();
            self.next_token();
            return self.finish_node(
                start,
                NodeData::PostfixUnaryExpression(UnaryExprData {
                    operator,
                    operand: expression,
                }),
            );
        }
        expression
    }

    // =========================================================================
    // Member and call chains
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression_or_higher(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::SuperKeyword => {
                self.next_token();
                self.finish_node(start, NodeData::SuperKeyword)
            }
            SyntaxKind::ImportKeyword => self.parse_import_expression(),
            _ => self.parse_primary_expression(),
        };
        if expression.is_none() {
            return expression;
        }
        self.parse_member_and_call_chain(start, expression, true)
    }

    fn parse_import_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return self.finish_node(
                start,
                NodeData::MetaProperty(MetaPropertyData {
                    keyword: SyntaxKind::ImportKeyword,
                    name,
                }),
            );
        }
        self.finish_node(start, NodeData::ImportKeyword)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return self.finish_node(
                start,
                NodeData::MetaProperty(MetaPropertyData {
                    keyword: SyntaxKind::NewKeyword,
                    name,
                }),
            );
        }
        let callee_start = self.token_pos();
        let callee = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::SuperKeyword => {
                self.next_token();
                self.finish_node(callee_start, NodeData::SuperKeyword)
            }
            _ => self.parse_primary_expression(),
        };
        let expression = if callee.is_some() {
            self.parse_member_and_call_chain(callee_start, callee, false)
        } else {
            callee
        };
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments())
        } else {
            None
        };
        self.finish_node(
            start,
            NodeData::NewExpression(NewExprData {
                expression,
                arguments,
            }),
        )
    }

    fn parse_member_and_call_chain(
        &mut self,
        start: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    expression = self.finish_node(
                        start,
                        NodeData::PropertyAccessExpression(AccessExprData {
                            expression,
                            name_or_argument: name,
                            question_dot_token: false,
                        }),
                    );
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments();
                            self.finish_node(
                                start,
                                NodeData::CallExpression(CallExprData {
                                    expression,
                                    arguments,
                                    question_dot_token: true,
                                }),
                            )
                        }
                        SyntaxKind::OpenBracketToken => {
                            let argument = self.parse_element_access_argument();
                            self.finish_node(
                                start,
                                NodeData::ElementAccessExpression(AccessExprData {
                                    expression,
                                    name_or_argument: argument,
                                    question_dot_token: true,
                                }),
                            )
                        }
                        _ => {
                            let name = self.parse_member_name();
                            self.finish_node(
                                start,
                                NodeData::PropertyAccessExpression(AccessExprData {
                                    expression,
                                    name_or_argument: name,
                                    question_dot_token: true,
                                }),
                            )
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    let argument = self.parse_element_access_argument();
                    expression = self.finish_node(
                        start,
                        NodeData::ElementAccessExpression(AccessExprData {
                            expression,
                            name_or_argument: argument,
                            question_dot_token: false,
                        }),
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_arguments();
                    expression = self.finish_node(
                        start,
                        NodeData::CallExpression(CallExprData {
                            expression,
                            arguments,
                            question_dot_token: false,
                        }),
                    );
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let template = self.parse_template_literal();
                    expression = self.finish_node(
                        start,
                        NodeData::TaggedTemplateExpression(TaggedTemplateData {
                            tag: expression,
                            template,
                        }),
                    );
                }
                _ => return expression,
            }
        }
    }

    fn parse_member_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            let start = self.token_pos();
            let escaped_text = self.scanner.token_value().to_string();
            self.next_token();
            return self.finish_node(
                start,
                NodeData::PrivateIdentifier(IdentifierData { escaped_text }),
            );
        }
        self.parse_identifier_name()
    }

    fn parse_element_access_argument(&mut self) -> NodeIndex {
        self.next_token();
        let argument = self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseBracketToken);
        argument
    }

    pub(crate) fn parse_arguments(&mut self) -> NodeList {
        self.next_token();
        let pos = self.token_pos();
        let mut arguments = Vec::new();
        let mut has_trailing_comma = false;
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let argument = p.parse_spread_or_assignment();
                if argument.is_none() {
                    break;
                }
                arguments.push(argument);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
                has_trailing_comma = p.is_token(SyntaxKind::CloseParenToken);
            }
        });
        let mut list = self.make_list(arguments, pos);
        list.has_trailing_comma = has_trailing_comma;
        self.parse_expected(SyntaxKind::CloseParenToken);
        list
    }

    fn parse_spread_or_assignment(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_or_higher();
            return self.finish_node(start, NodeData::SpreadElement(WrappedExprData { expression }));
        }
        self.parse_assignment_expression_or_higher()
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::ThisKeyword => self.parse_keyword_node(NodeData::ThisKeyword),
            SyntaxKind::TrueKeyword => self.parse_keyword_node(NodeData::TrueKeyword),
            SyntaxKind::FalseKeyword => self.parse_keyword_node(NodeData::FalseKeyword),
            SyntaxKind::NullKeyword => self.parse_keyword_node(NodeData::NullKeyword),
            SyntaxKind::NumericLiteral => {
                let text = self.scanner.token_text().to_string();
                self.next_token();
                self.finish_node(start, NodeData::NumericLiteral(LiteralData { text }))
            }
            SyntaxKind::BigIntLiteral => {
                let text = self.scanner.token_text().to_string();
                self.next_token();
                self.finish_node(start, NodeData::BigIntLiteral(LiteralData { text }))
            }
            SyntaxKind::StringLiteral => self.parse_string_literal(),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_literal()
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression =
                    self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.finish_node(
                    start,
                    NodeData::ParenthesizedExpression(WrappedExprData { expression }),
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(start, false),
            SyntaxKind::AsyncKeyword if self.next_is_function_on_same_line() => {
                self.next_token();
                self.parse_function_expression(start, true)
            }
            SyntaxKind::ClassKeyword => self.parse_class(start, false, true),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.re_scan_slash_token();
                let text = self.scanner.token_text().to_string();
                self.next_token();
                self.finish_node(start, NodeData::RegularExpressionLiteral(LiteralData { text }))
            }
            SyntaxKind::LessThanToken => self.parse_jsx_element_or_self_closing_or_fragment(true),
            SyntaxKind::PrivateIdentifier => self.parse_member_name(),
            _ if self.is_identifier() => self.parse_identifier(),
            _ => {
                self.error_at_current_token("Expression expected.");
                NodeIndex::NONE
            }
        }
    }

    fn parse_keyword_node(&mut self, data: NodeData) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.finish_node(start, data)
    }

    fn parse_function_expression(&mut self, start: u32, is_async: bool) -> NodeIndex {
        self.next_token();
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let data = self.parse_function_signature_and_body(name, is_async, is_generator);
        self.finish_node(start, NodeData::FunctionExpression(data))
    }

    pub(crate) fn parse_template_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.is_token(SyntaxKind::NoSubstitutionTemplateLiteral) {
            let text = self.scanner.token_value().to_string();
            self.next_token();
            return self.finish_node(
                start,
                NodeData::NoSubstitutionTemplateLiteral(LiteralData { text }),
            );
        }

        self.next_token();
        let pos = self.token_pos();
        let mut expressions = Vec::new();
        loop {
            let expression =
                self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
            if expression.is_some() {
                expressions.push(expression);
            }
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.error_at_current_token("'}' expected.");
                break;
            }
            let kind = self.scanner.re_scan_template_token();
            self.next_token();
            if kind != SyntaxKind::TemplateMiddle {
                break;
            }
        }
        let expressions = self.make_list(expressions, pos);
        self.finish_node(
            start,
            NodeData::TemplateExpression(TemplateExprData { expressions }),
        )
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let pos = self.token_pos();
        let mut elements = Vec::new();
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                if p.is_token(SyntaxKind::CommaToken) {
                    let hole = p.token_pos();
                    elements.push(p.arena.add(hole, hole, NodeData::OmittedExpression));
                    p.next_token();
                    continue;
                }
                let element = p.parse_spread_or_assignment();
                if element.is_none() {
                    break;
                }
                elements.push(element);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        let elements = self.make_list(elements, pos);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            start,
            NodeData::ArrayLiteralExpression(LiteralExprData { elements }),
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        self.next_token();
        let pos = self.token_pos();
        let mut elements = Vec::new();
        let mut has_trailing_comma = false;
        self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(SyntaxKind::CloseBraceToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let element = p.parse_object_literal_element();
                if element.is_none() {
                    break;
                }
                elements.push(element);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
                has_trailing_comma = p.is_token(SyntaxKind::CloseBraceToken);
            }
        });
        let mut elements = self.make_list(elements, pos);
        elements.has_trailing_comma = has_trailing_comma;
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.exit_recursion();
        self.finish_node(
            start,
            NodeData::ObjectLiteralExpression(LiteralExprData { elements }),
        )
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_or_higher();
            return self.finish_node(start, NodeData::SpreadAssignment(WrappedExprData { expression }));
        }

        let (is_async, is_generator, accessor) = self.parse_member_modifiers();
        let is_shorthand_candidate = self.is_identifier();
        let name = self.parse_property_name();
        if name.is_none() {
            return NodeIndex::NONE;
        }

        if self.is_token(SyntaxKind::OpenParenToken) || is_async || is_generator || accessor.is_some()
        {
            let function =
                self.parse_function_signature_and_body(NodeIndex::NONE, is_async, is_generator);
            return self.finish_node(
                start,
                NodeData::MethodDeclaration(MethodData {
                    kind: accessor.unwrap_or(MethodKind::Method),
                    is_static: false,
                    name,
                    function,
                }),
            );
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression_or_higher();
            return self.finish_node(
                start,
                NodeData::PropertyAssignment(PropertyAssignmentData { name, initializer }),
            );
        }

        if !is_shorthand_candidate {
            self.error_at_current_token("':' expected.");
        }
        let object_assignment_initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression_or_higher()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::ShorthandPropertyAssignment(ShorthandPropertyData {
                name,
                object_assignment_initializer,
            }),
        )
    }
}
