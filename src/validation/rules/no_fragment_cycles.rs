use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::collections::HashMap;
use std::collections::HashSet;

/// The graph of fragment spreads must be acyclic; a fragment that (possibly
/// transitively) spreads itself can never be expanded.
///
/// Cycles are found by DFS on the spread edges with an explicit path stack,
/// reporting the spread that closes the loop and naming the path back to the
/// entry point.
#[derive(Default)]
pub struct NoFragmentCycles {
    current_fragment: Option<String>,
    spread_edges: HashMap<String, Vec<(String, ast::AstPos)>>,
}
impl ValidationRule for NoFragmentCycles {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        _operation: &ast::OperationDefinition,
    ) {
        self.current_fragment = None;
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        fragment: &ast::FragmentDefinition,
    ) {
        self.current_fragment = Some(fragment.name.clone());
        self.spread_edges.entry(fragment.name.clone()).or_default();
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        spread: &ast::FragmentSpread,
    ) {
        if let Some(current) = &self.current_fragment {
            self.spread_edges
                .entry(current.clone())
                .or_default()
                .push((spread.fragment_name.clone(), spread.position));
        }
    }

    fn leave_document(&mut self, ctx: &mut ValidationContext<'_>, _document: &ast::Document) {
        let mut visited: HashSet<String> = HashSet::new();
        let mut names: Vec<&String> = self.spread_edges.keys().collect();
        names.sort();
        for name in names {
            if !visited.contains(name.as_str()) {
                let mut path: Vec<(String, ast::AstPos)> = vec![];
                let mut on_stack: HashSet<String> = HashSet::new();
                self.detect_cycle(ctx, name, &mut path, &mut on_stack, &mut visited);
            }
        }
    }
}
impl NoFragmentCycles {
    fn detect_cycle(
        &self,
        ctx: &mut ValidationContext<'_>,
        fragment_name: &str,
        path: &mut Vec<(String, ast::AstPos)>,
        on_stack: &mut HashSet<String>,
        visited: &mut HashSet<String>,
    ) {
        if visited.contains(fragment_name) {
            return;
        }
        visited.insert(fragment_name.to_string());
        on_stack.insert(fragment_name.to_string());

        let edges = self.spread_edges.get(fragment_name).cloned().unwrap_or_default();
        for (spread_name, spread_pos) in edges {
            if on_stack.contains(&spread_name) {
                // The path from the re-entered fragment to this spread names
                // the cycle.
                let cycle_start = path
                    .iter()
                    .position(|(name, _)| name == &spread_name)
                    .map(|index| index + 1)
                    .unwrap_or(0);
                let via: Vec<String> = path[cycle_start..]
                    .iter()
                    .map(|(name, _)| format!("\"{name}\""))
                    .collect();
                let message = if via.is_empty() {
                    format!("Cannot spread fragment \"{spread_name}\" within itself.")
                } else {
                    format!(
                        "Cannot spread fragment \"{spread_name}\" within itself via {}.",
                        via.join(", "),
                    )
                };
                ctx.report_error(GraphQLError::new(message).at(spread_pos.into()));
                continue;
            }

            path.push((spread_name.clone(), spread_pos));
            self.detect_cycle(ctx, &spread_name, path, on_stack, visited);
            path.pop();
        }

        on_stack.remove(fragment_name);
    }
}
