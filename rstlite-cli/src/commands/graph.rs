//! Graph command implementation

use crate::input::FileReader;
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use rstlite_core::graph;
use std::path::PathBuf;

/// Arguments for the graph command
#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Bracket tree given inline
    #[arg(short, long, value_name = "TREE", conflicts_with = "input")]
    pub tree: Option<String>,

    /// File with one bracket tree per non-empty line
    #[arg(short, long = "in", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output notation
    #[arg(short, long, value_enum, default_value = "dot")]
    pub format: GraphFormat,
}

/// Supported graph notations
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Graphviz digraph per tree
    Dot,
    /// Newick string per tree
    Newick,
}

impl GraphArgs {
    /// Execute the graph command
    pub fn execute(&self) -> Result<()> {
        let trees = self.trees()?;
        println!("{}", render(&trees, self.format));
        Ok(())
    }

    fn trees(&self) -> Result<Vec<String>> {
        let content = match (&self.tree, &self.input) {
            (Some(tree), _) => tree.clone(),
            (None, Some(path)) => FileReader::read_text(path)?,
            (None, None) => bail!("either --tree or --in is required"),
        };

        let trees: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if trees.is_empty() {
            bail!("no bracket tree given");
        }
        Ok(trees)
    }
}

/// Render every tree in `format`
pub fn render(trees: &[String], format: GraphFormat) -> String {
    match format {
        GraphFormat::Dot => graph::forest_dot(trees.iter().map(String::as_str)),
        GraphFormat::Newick => trees
            .iter()
            .map(|tree| format!("{};", graph::to_graph(tree).to_newick()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dot() {
        let dot = render(&["(Summary (N 1))".to_string()], GraphFormat::Dot);
        assert_eq!(
            dot,
            "digraph RST {\n  node [shape=box];\n  n1 [label=\"Summary\"];\n  n2 [label=\"N 1\"];\n  n1 -> n2;\n}"
        );
    }

    #[test]
    fn test_render_newick_per_line() {
        let trees = vec![
            "(Background (Elaboration (N 1) (N 2)))".to_string(),
            "(Background (N 1))".to_string(),
        ];
        assert_eq!(
            render(&trees, GraphFormat::Newick),
            "((EDU1,EDU2)Elaboration)Background;\n(EDU1)Background;"
        );
    }

    #[test]
    fn test_requires_a_tree() {
        let args = GraphArgs {
            tree: None,
            input: None,
            format: GraphFormat::Dot,
        };
        assert!(args.execute().is_err());

        let blank = GraphArgs {
            tree: Some("   ".into()),
            input: None,
            format: GraphFormat::Dot,
        };
        assert!(blank.execute().is_err());
    }
}
