//! Parser state - JSX parsing methods
//!
//! After a closing `>` the next token is scanned either as an ordinary
//! token (`in_expression_context`) or as JSX child content.
use super::state::ParserState;
use crate::parser::{
    NodeIndex,
    node::{
        AccessExprData, IdentifierData, JsxAttributeData, JsxClosingData, JsxElementData,
        JsxExpressionData, JsxFragmentData, JsxNamespacedNameData, JsxOpeningData, JsxTextData,
        LiteralData, NodeData, WrappedExprData,
    },
};
use r19_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_jsx_element_or_self_closing_or_fragment(
        &mut self,
        in_expression_context: bool,
    ) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_jsx_worker(start, in_expression_context);
        self.exit_recursion();
        result
    }

    fn parse_jsx_worker(&mut self, start: u32, in_expression_context: bool) -> NodeIndex {
        // Consume `<`
        self.next_token();

        if self.is_token(SyntaxKind::GreaterThanToken) {
            self.next_jsx_token();
            let children = self.parse_jsx_children();
            self.parse_jsx_closing_tail(NodeIndex::NONE, in_expression_context);
            return self.finish_node(start, NodeData::JsxFragment(JsxFragmentData { children }));
        }

        let tag_name = self.parse_jsx_element_name();
        let attributes = self.parse_jsx_attributes();

        if self.parse_optional(SyntaxKind::SlashToken) {
            self.parse_jsx_closing_angle(in_expression_context);
            return self.finish_node(
                start,
                NodeData::JsxSelfClosingElement(JsxOpeningData {
                    tag_name,
                    attributes,
                }),
            );
        }

        if !self.is_token(SyntaxKind::GreaterThanToken) {
            self.error_at_current_token("'>' expected.");
            return self.finish_node(
                start,
                NodeData::JsxSelfClosingElement(JsxOpeningData {
                    tag_name,
                    attributes,
                }),
            );
        }
        self.next_jsx_token();
        let opening_element = self.finish_node(
            start,
            NodeData::JsxOpeningElement(JsxOpeningData {
                tag_name,
                attributes,
            }),
        );

        let children = self.parse_jsx_children();
        let closing_element = self.parse_jsx_closing_tail(tag_name, in_expression_context);
        self.finish_node(
            start,
            NodeData::JsxElement(JsxElementData {
                opening_element,
                children,
                closing_element,
            }),
        )
    }

    /// `</name>` (or `</>`); the current token is `</`.
    fn parse_jsx_closing_tail(
        &mut self,
        opening_tag: NodeIndex,
        in_expression_context: bool,
    ) -> NodeIndex {
        let start = self.token_pos();
        if !self.is_token(SyntaxKind::LessThanSlashToken) {
            self.error_at_current_token("JSX element has no corresponding closing tag.");
            return NodeIndex::NONE;
        }
        self.next_token();
        let tag_name = if self.is_token(SyntaxKind::GreaterThanToken) {
            NodeIndex::NONE
        } else {
            self.parse_jsx_element_name()
        };

        let opening_text = self.arena.node_text(opening_tag).to_string();
        let closing_text = self.arena.node_text(tag_name);
        if opening_text != closing_text {
            let message = if opening_text.is_empty() {
                "Expected corresponding closing tag for JSX fragment.".to_string()
            } else {
                format!("Expected corresponding JSX closing tag for '{opening_text}'.")
            };
            self.error_at(start, self.prev_token_end.saturating_sub(start), &message);
        }

        self.parse_jsx_closing_angle(in_expression_context);
        if opening_tag.is_none() {
            return NodeIndex::NONE;
        }
        self.finish_node(start, NodeData::JsxClosingElement(JsxClosingData { tag_name }))
    }

    fn parse_jsx_closing_angle(&mut self, in_expression_context: bool) {
        if !self.is_token(SyntaxKind::GreaterThanToken) {
            self.error_at_current_token("'>' expected.");
            return;
        }
        if in_expression_context {
            self.next_token();
        } else {
            self.next_jsx_token();
        }
    }

    /// `div`, `this`, `a.b.c`, `svg:rect`, `data-x`.
    fn parse_jsx_element_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut name = if self.is_token(SyntaxKind::ThisKeyword) {
            self.next_token();
            self.finish_node(start, NodeData::ThisKeyword)
        } else {
            self.parse_jsx_identifier()
        };
        if name.is_none() {
            return name;
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let local = self.parse_jsx_identifier();
            return self.finish_node(
                start,
                NodeData::JsxNamespacedName(JsxNamespacedNameData {
                    namespace: name,
                    name: local,
                }),
            );
        }

        while self.parse_optional(SyntaxKind::DotToken) {
            let member = self.parse_identifier_name();
            name = self.finish_node(
                start,
                NodeData::PropertyAccessExpression(AccessExprData {
                    expression: name,
                    name_or_argument: member,
                    question_dot_token: false,
                }),
            );
        }
        name
    }

    fn parse_jsx_identifier(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.scanner.scan_jsx_identifier() != SyntaxKind::Identifier {
            self.error_at_current_token("Identifier expected.");
            return NodeIndex::NONE;
        }
        let escaped_text = self.scanner.token_value().to_string();
        self.next_token();
        self.finish_node(start, NodeData::Identifier(IdentifierData { escaped_text }))
    }

    fn parse_jsx_attributes(&mut self) -> crate::parser::NodeList {
        let pos = self.token_pos();
        let mut attributes = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::GreaterThanToken
                | SyntaxKind::SlashToken
                | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::OpenBraceToken => {
                    let start = self.token_pos();
                    self.next_token();
                    self.parse_expected(SyntaxKind::DotDotDotToken);
                    let expression = self.parse_assignment_expression_or_higher();
                    self.parse_expected(SyntaxKind::CloseBraceToken);
                    attributes.push(self.finish_node(
                        start,
                        NodeData::JsxSpreadAttribute(WrappedExprData { expression }),
                    ));
                }
                _ => {
                    let attribute = self.parse_jsx_attribute();
                    if attribute.is_none() {
                        break;
                    }
                    attributes.push(attribute);
                }
            }
        }
        self.make_list(attributes, pos)
    }

    fn parse_jsx_attribute(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut name = self.parse_jsx_identifier();
        if name.is_none() {
            return NodeIndex::NONE;
        }
        if self.parse_optional(SyntaxKind::ColonToken) {
            let local = self.parse_jsx_identifier();
            name = self.finish_node(
                start,
                NodeData::JsxNamespacedName(JsxNamespacedNameData {
                    namespace: name,
                    name: local,
                }),
            );
        }

        let initializer = if self.is_token(SyntaxKind::EqualsToken) {
            match self.next_jsx_attribute_value() {
                SyntaxKind::StringLiteral => {
                    let value_start = self.token_pos();
                    let text = self.scanner.token_value().to_string();
                    self.next_token();
                    self.finish_node(value_start, NodeData::StringLiteral(LiteralData { text }))
                }
                SyntaxKind::OpenBraceToken => self.parse_jsx_expression(false),
                SyntaxKind::LessThanToken => {
                    self.parse_jsx_element_or_self_closing_or_fragment(true)
                }
                _ => {
                    self.error_at_current_token(
                        "JSX value should be either an expression or a quoted JSX text.",
                    );
                    NodeIndex::NONE
                }
            }
        } else {
            NodeIndex::NONE
        };

        self.finish_node(
            start,
            NodeData::JsxAttribute(JsxAttributeData { name, initializer }),
        )
    }

    /// `{ expr }`, `{ ...expr }` or `{}`; the current token is `{`.
    fn parse_jsx_expression(&mut self, in_children: bool) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut dot_dot_dot = false;
        let mut expression = NodeIndex::NONE;
        if !self.is_token(SyntaxKind::CloseBraceToken) {
            dot_dot_dot = in_children && self.parse_optional(SyntaxKind::DotDotDotToken);
            expression = self.parse_expression();
        }
        if self.is_token(SyntaxKind::CloseBraceToken) {
            if in_children {
                self.next_jsx_token();
            } else {
                self.next_token();
            }
        } else {
            self.error_at_current_token("'}' expected.");
        }
        self.finish_node(
            start,
            NodeData::JsxExpression(JsxExpressionData {
                dot_dot_dot,
                expression,
            }),
        )
    }

    /// Children up to (not including) the closing `</`.
    fn parse_jsx_children(&mut self) -> crate::parser::NodeList {
        let pos = self.token_pos();
        let mut children = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::LessThanSlashToken => break,
                SyntaxKind::EndOfFileToken => {
                    self.error_at_current_token("JSX element has no corresponding closing tag.");
                    break;
                }
                SyntaxKind::JsxText => {
                    let start = self.token_pos();
                    let text = self.scanner.token_value().to_string();
                    self.next_jsx_token();
                    children.push(self.finish_node(start, NodeData::JsxText(JsxTextData { text })));
                }
                SyntaxKind::OpenBraceToken => {
                    children.push(self.parse_jsx_expression(true));
                }
                SyntaxKind::LessThanToken => {
                    let child = self.parse_jsx_element_or_self_closing_or_fragment(false);
                    if child.is_none() {
                        break;
                    }
                    children.push(child);
                }
                _ => {
                    self.next_jsx_token();
                }
            }
        }
        self.make_list(children, pos)
    }
}
