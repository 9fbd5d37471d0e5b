use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use sqlparser::ast::{
    Expr, Ident, ObjectName, ObjectNamePart, Query, SelectItem, Statement, TableFactor, VisitMut,
    VisitorMut,
};

use super::parse::parse_sql_statements;
use super::sites::selects_in_body_mut;
use crate::error::AnonymizeError;

pub const STATEMENT_SEPARATOR: &str = " ; ";

/// How identifiers other than hashed columns are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierQuoting {
    /// Double-quote unquoted table names, table aliases, column qualifiers
    /// and projection aliases: `SELECT "t"."<hash>" FROM "t"`.
    #[default]
    Always,
    /// Render them exactly as parsed.
    AsWritten,
}

/// Renders the batch in order and joins the fragments with `" ; "`.
///
/// Every fragment is parsed again before it is returned; output that does
/// not read back as exactly one statement is a serialization error.
pub fn serialize_statements(
    statements: Vec<Statement>,
    quoting: IdentifierQuoting,
) -> Result<String, AnonymizeError> {
    let mut fragments = Vec::with_capacity(statements.len());
    for (statement_index, mut statement) in statements.into_iter().enumerate() {
        if quoting == IdentifierQuoting::Always {
            let _ = statement.visit(&mut IdentifierQuoter);
        }
        let fragment = statement.to_string();
        verify_round_trip(statement_index, &fragment)?;
        fragments.push(fragment);
    }
    Ok(fragments.join(STATEMENT_SEPARATOR))
}

fn verify_round_trip(statement_index: usize, fragment: &str) -> Result<(), AnonymizeError> {
    let reparsed = parse_sql_statements(fragment).map_err(|error| {
        AnonymizeError::Serialization {
            statement_index,
            message: error.to_string(),
        }
    })?;
    if reparsed.len() != 1 {
        return Err(AnonymizeError::Serialization {
            statement_index,
            message: format!(
                "expected one statement after serialization, found {}",
                reparsed.len()
            ),
        });
    }
    Ok(())
}

fn quote(ident: &mut Ident) {
    if ident.quote_style.is_none() {
        ident.quote_style = Some('"');
    }
}

struct IdentifierQuoter;

impl VisitorMut for IdentifierQuoter {
    type Break = ();

    fn pre_visit_relation(&mut self, relation: &mut ObjectName) -> ControlFlow<Self::Break> {
        for part in &mut relation.0 {
            if let ObjectNamePart::Identifier(ident) = part {
                quote(ident);
            }
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_table_factor(&mut self, table_factor: &mut TableFactor) -> ControlFlow<Self::Break> {
        if let TableFactor::Table {
            alias: Some(alias), ..
        }
        | TableFactor::Derived {
            alias: Some(alias), ..
        } = table_factor
        {
            quote(&mut alias.name);
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_query(&mut self, query: &mut Query) -> ControlFlow<Self::Break> {
        let mut selects = Vec::new();
        selects_in_body_mut(query.body.as_mut(), &mut selects);
        for select in selects {
            for item in &mut select.projection {
                if let SelectItem::ExprWithAlias { alias, .. } = item {
                    quote(alias);
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<Self::Break> {
        if let Expr::CompoundIdentifier(idents) = expr {
            let qualifiers = idents.len().saturating_sub(1);
            idents.iter_mut().take(qualifiers).for_each(quote);
        }
        ControlFlow::Continue(())
    }
}
