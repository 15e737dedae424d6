//! Template parser module.
//!
//! Scans `{{...}}` tags left to right and folds them into a node tree with a
//! stack of open blocks.

use super::{Result, TemplateError};

/// A node in the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Raw text content.
    Text(String),

    /// Variable reference: `{{name}}` or `{{board.name}}`
    Variable(String),

    /// Conditional block: `{{#if condition}}...{{else}}...{{/if}}`
    If {
        condition: String,
        then_branch: Vec<Node>,
        else_branch: Vec<Node>,
    },

    /// Loop block: `{{#each items as item}}...{{else}}...{{/each}}`
    ///
    /// The else branch renders when the list is empty or missing.
    Each {
        variable: String,
        item_name: String,
        body: Vec<Node>,
        empty: Vec<Node>,
    },
}

/// Parse template source into a list of nodes.
///
/// `\{{` writes a literal `{{`.
pub fn parse(source: &str) -> Result<Vec<Node>> {
    let mut tree = TreeBuilder::default();
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        if rest[..start].ends_with('\\') {
            tree.text(&rest[..start - 1]);
            tree.text("{{");
            rest = &rest[start + 2..];
            continue;
        }

        tree.text(&rest[..start]);
        let inner = &rest[start + 2..];
        let end = inner
            .find("}}")
            .ok_or_else(|| parse_error(format!("Unclosed tag '{}'", preview(&rest[start..]))))?;
        tree.tag(Tag::classify(inner[..end].trim())?)?;
        rest = &inner[end + 2..];
    }

    tree.text(rest);
    tree.finish()
}

fn parse_error(message: impl Into<String>) -> TemplateError {
    TemplateError::Parse(message.into())
}

fn preview(s: &str) -> String {
    s.chars().take(12).collect()
}

/// A variable path: letters, digits, `_`, `-` and `.` separators.
fn identifier(s: &str) -> Result<String> {
    let valid = !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.');

    if valid {
        Ok(s.to_string())
    } else {
        Err(parse_error(format!("Invalid name '{s}'")))
    }
}

enum Opening {
    If { condition: String },
    Each { variable: String, item_name: String },
}

impl Opening {
    fn name(&self) -> &'static str {
        match self {
            Opening::If { .. } => "if",
            Opening::Each { .. } => "each",
        }
    }
}

enum Tag {
    Variable(String),
    Open(Opening),
    Else,
    Close(String),
}

impl Tag {
    fn classify(inner: &str) -> Result<Tag> {
        if let Some(block) = inner.strip_prefix('#') {
            let mut words = block.split_whitespace();
            let name = words.next().unwrap_or_default();
            let args: Vec<&str> = words.collect();

            let opening = match (name, args.as_slice()) {
                ("if", [condition]) => Opening::If {
                    condition: identifier(condition)?,
                },
                ("each", [variable, "as", item_name]) => Opening::Each {
                    variable: identifier(variable)?,
                    item_name: identifier(item_name)?,
                },
                ("if", _) => return Err(parse_error("Expected '{{#if name}}'")),
                ("each", _) => return Err(parse_error("Expected '{{#each list as item}}'")),
                _ => return Err(parse_error(format!("Unknown block tag: {name}"))),
            };
            return Ok(Tag::Open(opening));
        }

        if let Some(name) = inner.strip_prefix('/') {
            return Ok(Tag::Close(name.trim().to_string()));
        }

        if inner == "else" {
            return Ok(Tag::Else);
        }

        identifier(inner).map(Tag::Variable)
    }
}

struct Frame {
    opening: Opening,
    primary: Vec<Node>,
    alternative: Option<Vec<Node>>,
}

impl Frame {
    fn nodes(&mut self) -> &mut Vec<Node> {
        match &mut self.alternative {
            Some(nodes) => nodes,
            None => &mut self.primary,
        }
    }

    fn into_node(self) -> Node {
        let alternative = self.alternative.unwrap_or_default();
        match self.opening {
            Opening::If { condition } => Node::If {
                condition,
                then_branch: self.primary,
                else_branch: alternative,
            },
            Opening::Each {
                variable,
                item_name,
            } => Node::Each {
                variable,
                item_name,
                body: self.primary,
                empty: alternative,
            },
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Frame>,
}

impl TreeBuilder {
    fn nodes(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(frame) => frame.nodes(),
            None => &mut self.root,
        }
    }

    /// Append text, merging with a preceding text node.
    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let nodes = self.nodes();
        if let Some(Node::Text(last)) = nodes.last_mut() {
            last.push_str(text);
        } else {
            nodes.push(Node::Text(text.to_string()));
        }
    }

    fn tag(&mut self, tag: Tag) -> Result<()> {
        match tag {
            Tag::Variable(name) => self.nodes().push(Node::Variable(name)),
            Tag::Open(opening) => self.open.push(Frame {
                opening,
                primary: Vec::new(),
                alternative: None,
            }),
            Tag::Else => {
                let frame = self
                    .open
                    .last_mut()
                    .ok_or_else(|| parse_error("'{{else}}' outside of a block"))?;
                if frame.alternative.is_some() {
                    return Err(parse_error(format!(
                        "Second '{{{{else}}}}' in '{}' block",
                        frame.opening.name()
                    )));
                }
                frame.alternative = Some(Vec::new());
            }
            Tag::Close(name) => {
                let frame = self
                    .open
                    .pop()
                    .ok_or_else(|| parse_error(format!("Unexpected '{{{{/{name}}}}}'")))?;
                if frame.opening.name() != name {
                    return Err(parse_error(format!(
                        "Expected '{{{{/{}}}}}' but found '{{{{/{name}}}}}'",
                        frame.opening.name()
                    )));
                }
                let node = frame.into_node();
                self.nodes().push(node);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<Node>> {
        match self.open.last() {
            Some(frame) => Err(parse_error(format!(
                "Unclosed '{}' block",
                frame.opening.name()
            ))),
            None => Ok(self.root),
        }
    }
}
