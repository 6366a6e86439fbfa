//! Bracket-notation parsing and graph emission
//!
//! A bracket expression is `'(' label (whitespace (expression | token))* ')'`.
//! Every opening parenthesis becomes a node carrying its label, every bare
//! token becomes a leaf node, and every parent/child pair becomes an edge.
//! EDU leaves (`(N 1)`, `(S 4)`) are the one exception: role and id are
//! kept together as a single node labelled `N 1`.
//! Node ids are assigned in the order the nodes are met, starting at 1 for
//! each call, so the same string always yields the same graph.
//!
//! Malformed input never fails: unterminated expressions are closed at the
//! end of the string and stray characters outside any expression are
//! skipped. Nesting is tracked on an explicit stack, so arbitrarily deep
//! trees (the builder produces left-leaning ones) cannot exhaust the call
//! stack.

use serde::Serialize;
use std::fmt::Write as _;

/// Role labels whose single numeric child marks an EDU leaf
const LEAF_ROLES: [&str; 2] = ["N", "S"];

/// Labeled node of an emitted graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// 1-based id, unique within one graph
    pub id: usize,
    /// Label taken from the bracket string
    pub label: String,
}

/// Directed parent-to-child edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Parent node id
    pub from: usize,
    /// Child node id
    pub to: usize,
}

/// Graph equivalent of one or more bracket trees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BracketGraph {
    /// Nodes in id order
    pub nodes: Vec<GraphNode>,
    /// Edges in the order children were met
    pub edges: Vec<GraphEdge>,
    /// Ids of the top-level expressions
    pub roots: Vec<usize>,
}

impl BracketGraph {
    fn add_node(&mut self, label: &str) -> usize {
        let id = self.nodes.len() + 1;
        self.nodes.push(GraphNode {
            id,
            label: label.to_string(),
        });
        id
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        self.edges.push(GraphEdge { from, to });
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Label of node `id`
    pub fn label(&self, id: usize) -> Option<&str> {
        self.nodes.get(id.checked_sub(1)?).map(|node| node.label.as_str())
    }

    /// Child ids of every node, indexed by `id - 1`
    pub fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            children[edge.from - 1].push(edge.to);
        }
        children
    }

    /// Graphviz rendering
    pub fn to_dot(&self) -> String {
        let mut lines = vec!["digraph RST {".to_string(), "  node [shape=box];".to_string()];
        for node in &self.nodes {
            lines.push(format!(
                "  n{} [label=\"{}\"];",
                node.id,
                escape_dot(&node.label)
            ));
        }
        for edge in &self.edges {
            lines.push(format!("  n{} -> n{};", edge.from, edge.to));
        }
        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Newick rendering; several top-level trees are separated by `;`
    pub fn to_newick(&self) -> String {
        let children = self.children();
        let mut rendered = Vec::with_capacity(self.roots.len());
        for &root in &self.roots {
            let mut out = String::new();
            self.write_newick(root, &children, &mut out);
            rendered.push(out);
        }
        rendered.join(";")
    }

    fn write_newick(&self, root: usize, children: &[Vec<usize>], out: &mut String) {
        enum Step {
            Enter(usize),
            Separator,
            Close(usize),
        }

        let mut stack = vec![Step::Enter(root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(id) => {
                    let kids = &children[id - 1];
                    if let Some(edu) = self.edu_leaf(id, kids) {
                        let _ = write!(out, "EDU{edu}");
                    } else if kids.is_empty() {
                        out.push_str(self.label(id).unwrap_or_default());
                    } else {
                        out.push('(');
                        stack.push(Step::Close(id));
                        for (position, &child) in kids.iter().enumerate().rev() {
                            stack.push(Step::Enter(child));
                            if position > 0 {
                                stack.push(Step::Separator);
                            }
                        }
                    }
                }
                Step::Separator => out.push(','),
                Step::Close(id) => {
                    out.push(')');
                    out.push_str(self.label(id).unwrap_or_default());
                }
            }
        }
    }

    /// EDU id of a collapsed `N 3` leaf
    fn edu_leaf(&self, id: usize, kids: &[usize]) -> Option<u32> {
        if !kids.is_empty() {
            return None;
        }
        let (role, edu) = self.label(id)?.split_once(' ')?;
        if LEAF_ROLES.contains(&role) {
            edu.parse().ok()
        } else {
            None
        }
    }
}

fn escape_dot(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Char cursor over the bracket string
#[derive(Clone, Copy)]
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !keep(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.text[start..self.pos]
    }

    /// Rest of an EDU leaf after its role: ` <digits> )`
    ///
    /// On a match, returns the id and the cursor just past the `)`.
    fn edu_leaf_tail(mut self) -> Option<(u32, Self)> {
        if self.take_while(char::is_whitespace).is_empty() {
            return None;
        }
        let id = self.take_while(|c| c.is_ascii_digit()).parse().ok()?;
        self.take_while(char::is_whitespace);
        if self.peek() != Some(')') {
            return None;
        }
        self.bump();
        Some((id, self))
    }
}

/// Parse a bracket string into a graph
pub fn to_graph(brackets: &str) -> BracketGraph {
    let mut graph = BracketGraph::default();
    let mut cursor = Cursor::new(brackets);
    let mut open: Vec<usize> = Vec::new();

    while let Some(ch) = cursor.peek() {
        match ch {
            '(' => {
                cursor.bump();
                let label = cursor.take_while(|c| !matches!(c, ' ' | '(' | ')'));
                let leaf = LEAF_ROLES
                    .contains(&label)
                    .then(|| cursor.edu_leaf_tail())
                    .flatten();

                let id = match leaf {
                    Some((edu, rest)) => {
                        cursor = rest;
                        graph.add_node(&format!("{label} {edu}"))
                    }
                    None => graph.add_node(label),
                };
                match open.last() {
                    Some(&parent) => graph.add_edge(parent, id),
                    None => graph.roots.push(id),
                }
                if leaf.is_none() {
                    open.push(id);
                }
            }
            ')' => {
                cursor.bump();
                open.pop();
            }
            ch if ch.is_whitespace() => cursor.bump(),
            _ => match open.last() {
                Some(&parent) => {
                    let token = cursor.take_while(|c| !matches!(c, ' ' | ')'));
                    let id = graph.add_node(token);
                    graph.add_edge(parent, id);
                }
                None => cursor.bump(),
            },
        }
    }

    graph
}

/// DOT rendering of a bracket string
pub fn brackets_to_dot(brackets: &str) -> String {
    to_graph(brackets).to_dot()
}

/// One `digraph` per tree, separated by a blank line
pub fn forest_dot<'a>(trees: impl IntoIterator<Item = &'a str>) -> String {
    trees
        .into_iter()
        .map(brackets_to_dot)
        .collect::<Vec<_>>()
        .join("\n\n")
}
