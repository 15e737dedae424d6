//! Template renderer module.
//!
//! Renders parsed template nodes with the given context.

use super::parser::Node;
use super::{Result, TemplateContext, TemplateError, Value};

/// Template renderer.
pub struct Renderer<'a> {
    context: &'a TemplateContext,
    autoescape: bool,
}

impl<'a> Renderer<'a> {
    /// Create a new renderer with the given context. Autoescaping is on.
    pub fn new(context: &'a TemplateContext) -> Self {
        Self {
            context,
            autoescape: true,
        }
    }

    /// Enable or disable HTML escaping of variable output.
    pub fn autoescape(mut self, enabled: bool) -> Self {
        self.autoescape = enabled;
        self
    }

    /// Render a list of nodes to a string.
    pub fn render(&self, nodes: &[Node]) -> Result<String> {
        let mut output = String::new();
        self.render_into(nodes, &mut output)?;
        Ok(output)
    }

    fn render_into(&self, nodes: &[Node], output: &mut String) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Variable(name) => self.write_variable(name, output),
                Node::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    let truthy = self.context.get(condition).is_some_and(Value::is_truthy);
                    self.render_into(if truthy { then_branch } else { else_branch }, output)?;
                }
                Node::Each {
                    variable,
                    item_name,
                    body,
                    empty,
                } => self.render_each(variable, item_name, body, empty, output)?,
            }
        }
        Ok(())
    }

    /// Missing variables render as an empty string.
    fn write_variable(&self, name: &str, output: &mut String) {
        let text = self
            .context
            .get(name)
            .map(Value::to_display_string)
            .unwrap_or_default();

        if self.autoescape {
            output.push_str(&html_escape::encode_quoted_attribute(&text));
        } else {
            output.push_str(&text);
        }
    }

    fn render_each(
        &self,
        variable: &str,
        item_name: &str,
        body: &[Node],
        empty: &[Node],
        output: &mut String,
    ) -> Result<()> {
        let items = match self.context.get(variable) {
            Some(Value::List(items)) => items,
            Some(Value::Null) | None => return self.render_into(empty, output),
            Some(_) => {
                return Err(TemplateError::Render(format!("'{variable}' is not a list")));
            }
        };

        if items.is_empty() {
            return self.render_into(empty, output);
        }

        for item in items {
            let mut scope = self.context.clone();
            scope.set(item_name, item.clone());

            Renderer {
                context: &scope,
                autoescape: self.autoescape,
            }
            .render_into(body, output)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse;
    use std::collections::HashMap;

    fn render(template: &str, context: &TemplateContext) -> String {
        let nodes = parse(template).unwrap();
        Renderer::new(context).render(&nodes).unwrap()
    }

    fn render_raw(template: &str, context: &TemplateContext) -> String {
        let nodes = parse(template).unwrap();
        Renderer::new(context).autoescape(false).render(&nodes).unwrap()
    }

    fn board(id: i64, name: &str) -> Value {
        Value::Object(HashMap::from([
            ("id".to_string(), Value::Number(id)),
            ("name".to_string(), Value::string(name)),
        ]))
    }

    fn boards_context() -> TemplateContext {
        let mut context = TemplateContext::new();
        context.set("boards", vec![board(1, "Django"), board(2, "Python")]);
        context
    }

    #[test]
    fn test_render_variable_and_missing() {
        let mut context = TemplateContext::new();
        context.set("name", "Alice");

        assert_eq!(render("Hello, {{name}}{{missing}}!", &context), "Hello, Alice!");
    }

    #[test]
    fn test_render_escapes_html() {
        let mut context = TemplateContext::new();
        context.set("name", "<script>alert(\"x\")</script>");

        let output = render("{{name}}", &context);
        assert!(!output.contains("<script>"));
        assert!(output.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_raw_keeps_text() {
        let mut context = TemplateContext::new();
        context.set("url", "http://example.com/reset/MQ/abc-def/");

        assert_eq!(
            render_raw("{{url}}", &context),
            "http://example.com/reset/MQ/abc-def/"
        );
    }

    #[test]
    fn test_render_if_else() {
        let mut context = TemplateContext::new();
        context.set("validlink", true);
        assert_eq!(render("{{#if validlink}}ok{{else}}bad{{/if}}", &context), "ok");

        context.set("validlink", false);
        assert_eq!(render("{{#if validlink}}ok{{else}}bad{{/if}}", &context), "bad");

        assert_eq!(render("{{#if missing}}ok{{/if}}", &context), "");
    }

    #[test]
    fn test_render_each_binds_item() {
        let context = boards_context();
        assert_eq!(
            render("{{#each boards as board}}[{{board.id}}:{{board.name}}]{{/each}}", &context),
            "[1:Django][2:Python]"
        );
    }

    #[test]
    fn test_render_each_item_does_not_leak() {
        let context = boards_context();
        assert_eq!(
            render("{{#each boards as board}}{{/each}}{{board.name}}", &context),
            ""
        );
    }

    #[test]
    fn test_render_each_empty_branch() {
        let mut context = TemplateContext::new();
        context.set("topics", Vec::<Value>::new());

        assert_eq!(
            render(
                "{{#each topics as topic}}{{topic.subject}}{{else}}No topics yet.{{/each}}",
                &context
            ),
            "No topics yet."
        );
        assert_eq!(
            render("{{#each missing as m}}x{{else}}none{{/each}}", &TemplateContext::new()),
            "none"
        );
    }

    #[test]
    fn test_render_each_not_a_list() {
        let mut context = TemplateContext::new();
        context.set("boards", "nope");

        let nodes = parse("{{#each boards as board}}x{{/each}}").unwrap();
        let result = Renderer::new(&context).render(&nodes);
        assert!(matches!(result, Err(TemplateError::Render(_))));
    }
}
