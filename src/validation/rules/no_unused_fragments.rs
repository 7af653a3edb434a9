use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::collections::HashMap;
use std::collections::HashSet;

/// Every fragment defined in a document must be reachable from at least one
/// operation through a chain of spreads.
#[derive(Default)]
pub struct NoUnusedFragments {
    /// Spread names per scope. Operation scopes are roots of the
    /// reachability walk; fragment scopes are edges.
    operation_spreads: Vec<Vec<String>>,
    fragment_spreads: HashMap<String, Vec<String>>,
    fragment_positions: Vec<(String, ast::AstPos)>,
    current_scope: Option<Scope>,
}

enum Scope {
    Operation,
    Fragment(String),
}

impl ValidationRule for NoUnusedFragments {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        _operation: &ast::OperationDefinition,
    ) {
        self.operation_spreads.push(vec![]);
        self.current_scope = Some(Scope::Operation);
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        fragment: &ast::FragmentDefinition,
    ) {
        self.fragment_positions
            .push((fragment.name.clone(), fragment.position));
        self.fragment_spreads
            .entry(fragment.name.clone())
            .or_default();
        self.current_scope = Some(Scope::Fragment(fragment.name.clone()));
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        spread: &ast::FragmentSpread,
    ) {
        match &self.current_scope {
            Some(Scope::Operation) => {
                if let Some(spreads) = self.operation_spreads.last_mut() {
                    spreads.push(spread.fragment_name.clone());
                }
            }
            Some(Scope::Fragment(fragment_name)) => {
                self.fragment_spreads
                    .entry(fragment_name.clone())
                    .or_default()
                    .push(spread.fragment_name.clone());
            }
            None => {}
        }
    }

    fn leave_document(&mut self, ctx: &mut ValidationContext<'_>, _document: &ast::Document) {
        let mut reachable: HashSet<String> = HashSet::new();
        let mut pending: Vec<String> = self.operation_spreads.concat();
        while let Some(name) = pending.pop() {
            if !reachable.insert(name.clone()) {
                continue;
            }
            if let Some(next) = self.fragment_spreads.get(&name) {
                pending.extend(next.iter().cloned());
            }
        }

        for (fragment_name, position) in &self.fragment_positions {
            if !reachable.contains(fragment_name) {
                ctx.report_error(
                    GraphQLError::new(format!(
                        "Fragment \"{fragment_name}\" is never used.",
                    ))
                    .at((*position).into()),
                );
            }
        }
    }
}
