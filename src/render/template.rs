//! Logic-less text templates
//!
//! A small mustache-style language rendered against a JSON context:
//!
//! ```text
//! {{name}}              escaped value (dotted lookup: {{src.id}}, current item: {{.}})
//! {{{name}}}            raw value
//! {{#name}}...{{/name}} section: repeat for arrays, render once when truthy
//! {{^name}}...{{/name}} inverted section: render when missing, null, false or empty
//! {{! comment }}
//! ```
//!
//! Section, inverted, closing and comment tags that sit alone on a line are
//! removed together with that line.

use serde_json::Value;

use crate::error::{TemplatePhase, VizError};

/// How substituted values are escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Graphviz quoted strings
    Dot,
    /// HTML text and attribute values
    Html,
}

impl Escape {
    pub fn apply(self, input: &str) -> String {
        match self {
            Escape::Dot => input
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n"),
            Escape::Html => input
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
                .replace('"', "&quot;")
                .replace('\'', "&#39;"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var { name: String, escaped: bool },
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

#[derive(Debug, Clone, Copy)]
enum Tag<'a> {
    Var(&'a str),
    Raw(&'a str),
    Open(&'a str),
    Inverted(&'a str),
    Close(&'a str),
    Comment,
}

impl Tag<'_> {
    fn can_stand_alone(&self) -> bool {
        matches!(
            self,
            Tag::Open(_) | Tag::Inverted(_) | Tag::Close(_) | Tag::Comment
        )
    }
}

struct Frame {
    name: String,
    inverted: bool,
    children: Vec<Node>,
}

/// A parsed template
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source; `name` identifies the template in errors
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, VizError> {
        let name = name.into();
        let parse_error = |message: String| VizError::template(&name, TemplatePhase::Parse, message);

        let mut root = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut rest = source;
        let mut at_line_start = true;

        while let Some(start) = rest.find("{{") {
            let before = &rest[..start];
            let after_open = &rest[start..];

            let (tag, tag_len) = if let Some(body) = after_open.strip_prefix("{{{") {
                let end = body
                    .find("}}}")
                    .ok_or_else(|| parse_error(format!("unterminated tag near '{}'", snippet(after_open))))?;
                (Tag::Raw(body[..end].trim()), end + 6)
            } else {
                let body = &after_open[2..];
                let end = body
                    .find("}}")
                    .ok_or_else(|| parse_error(format!("unterminated tag near '{}'", snippet(after_open))))?;
                (classify(body[..end].trim()), end + 4)
            };

            if let Tag::Var(name) | Tag::Raw(name) | Tag::Open(name) | Tag::Inverted(name) | Tag::Close(name) = tag {
                if name.is_empty() {
                    return Err(parse_error("empty tag name".to_string()));
                }
            }

            let after_tag = &rest[start + tag_len..];

            // A tag alone on its line takes the whole line with it
            let line_start = before.rfind('\n').map(|i| i + 1);
            let indent = &before[line_start.unwrap_or(0)..];
            let line_end = after_tag.find('\n');
            let trailing = &after_tag[..line_end.unwrap_or(after_tag.len())];
            let standalone = tag.can_stand_alone()
                && (line_start.is_some() || at_line_start)
                && is_blank(indent)
                && is_blank(trailing);

            let text = if standalone {
                &before[..before.len() - indent.len()]
            } else {
                before
            };
            push_text(current(&mut stack, &mut root), text);

            rest = if standalone {
                at_line_start = true;
                line_end.map_or("", |i| &after_tag[i + 1..])
            } else {
                at_line_start = false;
                after_tag
            };

            match tag {
                Tag::Var(name) => current(&mut stack, &mut root).push(Node::Var {
                    name: name.to_string(),
                    escaped: true,
                }),
                Tag::Raw(name) => current(&mut stack, &mut root).push(Node::Var {
                    name: name.to_string(),
                    escaped: false,
                }),
                Tag::Open(name) | Tag::Inverted(name) => stack.push(Frame {
                    name: name.to_string(),
                    inverted: matches!(tag, Tag::Inverted(_)),
                    children: Vec::new(),
                }),
                Tag::Close(name) => {
                    let frame = stack
                        .pop()
                        .ok_or_else(|| parse_error(format!("unexpected closing tag '{}'", name)))?;
                    if frame.name != name {
                        return Err(parse_error(format!(
                            "section '{}' closed by '{}'",
                            frame.name, name
                        )));
                    }
                    current(&mut stack, &mut root).push(Node::Section {
                        name: frame.name,
                        inverted: frame.inverted,
                        children: frame.children,
                    });
                }
                Tag::Comment => {}
            }
        }

        push_text(current(&mut stack, &mut root), rest);

        if !stack.is_empty() {
            let open: Vec<&str> = stack.iter().map(|f| f.name.as_str()).collect();
            return Err(parse_error(format!("unclosed section '{}'", open.join("', '"))));
        }

        Ok(Self { name, nodes: root })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template against a JSON context
    pub fn render(&self, context: &Value, escape: Escape) -> Result<String, VizError> {
        let mut output = String::new();
        let mut scopes = vec![context];
        self.render_nodes(&self.nodes, &mut scopes, escape, &mut output)?;
        Ok(output)
    }

    fn render_nodes<'v>(
        &self,
        nodes: &[Node],
        scopes: &mut Vec<&'v Value>,
        escape: Escape,
        output: &mut String,
    ) -> Result<(), VizError> {
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Var { name, escaped } => {
                    let value = self.lookup(scopes, name)?;
                    let text = value_to_string(value);
                    if *escaped {
                        output.push_str(&escape.apply(&text));
                    } else {
                        output.push_str(&text);
                    }
                }
                Node::Section {
                    name,
                    inverted: true,
                    children,
                } => {
                    if !is_truthy(self.lookup(scopes, name)?) {
                        self.render_nodes(children, scopes, escape, output)?;
                    }
                }
                Node::Section {
                    name,
                    inverted: false,
                    children,
                } => {
                    let value = self.lookup(scopes, name)?;
                    match value {
                        Value::Array(items) => {
                            for item in items {
                                scopes.push(item);
                                let result = self.render_nodes(children, scopes, escape, output);
                                scopes.pop();
                                result?;
                            }
                        }
                        value if is_truthy(value) => {
                            scopes.push(value);
                            let result = self.render_nodes(children, scopes, escape, output);
                            scopes.pop();
                            result?;
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve a dotted name against the scope stack, innermost first
    fn lookup<'v>(&self, scopes: &[&'v Value], name: &str) -> Result<&'v Value, VizError> {
        let missing = || {
            VizError::template(
                &self.name,
                TemplatePhase::Execute,
                format!("'{}' is not defined", name),
            )
        };

        if name == "." {
            return scopes.last().copied().ok_or_else(missing);
        }

        let mut segments = name.split('.');
        let first = segments.next().ok_or_else(missing)?;
        let mut value = scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(first))
            .ok_or_else(missing)?;

        for segment in segments {
            value = value.get(segment).ok_or_else(missing)?;
        }
        Ok(value)
    }
}

fn classify(body: &str) -> Tag<'_> {
    if let Some(name) = body.strip_prefix('#') {
        Tag::Open(name.trim())
    } else if let Some(name) = body.strip_prefix('^') {
        Tag::Inverted(name.trim())
    } else if let Some(name) = body.strip_prefix('/') {
        Tag::Close(name.trim())
    } else if body.starts_with('!') {
        Tag::Comment
    } else if let Some(name) = body.strip_prefix('&') {
        Tag::Raw(name.trim())
    } else {
        Tag::Var(body)
    }
}

/// Node list receiving output: the innermost open section, else the top level
fn current<'s>(stack: &'s mut [Frame], root: &'s mut Vec<Node>) -> &'s mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(previous)) = nodes.last_mut() {
        previous.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t' || c == '\r')
}

fn snippet(s: &str) -> String {
    s.chars().take(20).collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Number(_) | Value::Object(_) => true,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
