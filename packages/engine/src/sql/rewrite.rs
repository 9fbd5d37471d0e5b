use std::ops::ControlFlow;

use sqlparser::ast::{
    ConflictTarget, Delete, Expr, FromTable, Ident, Insert, OnConflictAction, OnInsert, Query,
    Statement, Update, UpdateTableFromKind, VisitMut, VisitorMut,
};

use super::sites::{
    ensure_supported_statements, is_default_keyword, selects_in_body_mut,
    try_for_each_assignment_target_mut, try_for_each_using_column_mut,
};
use crate::error::AnonymizeError;
use crate::mapping::ColumnHashMapping;

/// Returns a copy of the batch with every column reference renamed to its
/// digest. The input statements are left untouched.
pub fn rewrite_statements(
    statements: &[Statement],
    mapping: &ColumnHashMapping,
) -> Result<Vec<Statement>, AnonymizeError> {
    ensure_supported_statements(statements)?;
    statements
        .iter()
        .map(|statement| rewrite_statement(statement, mapping))
        .collect()
}

pub fn rewrite_statement(
    statement: &Statement,
    mapping: &ColumnHashMapping,
) -> Result<Statement, AnonymizeError> {
    ensure_supported_statements(std::slice::from_ref(statement))?;
    let mut rewritten = statement.clone();
    match &mut rewritten {
        Statement::Insert(insert) => rewrite_insert_targets(insert, mapping)?,
        Statement::Update(update) => rewrite_update_targets(update, mapping)?,
        Statement::Delete(delete) => rewrite_delete_targets(delete, mapping)?,
        _ => {}
    }

    let mut rewriter = ColumnRewriter { mapping };
    if let ControlFlow::Break(error) = rewritten.visit(&mut rewriter) {
        return Err(error);
    }
    Ok(rewritten)
}

/// Renames `ident` in place. Hashed names are always double-quoted because
/// a hex digest may start with a digit.
fn hash_ident(ident: &mut Ident, mapping: &ColumnHashMapping) -> Result<(), AnonymizeError> {
    let Some(hash) = mapping.get(&ident.value) else {
        return Err(AnonymizeError::MissingMapping {
            column: ident.value.clone(),
        });
    };
    ident.value = hash.to_string();
    ident.quote_style = Some('"');
    Ok(())
}

fn rewrite_insert_targets(
    insert: &mut Insert,
    mapping: &ColumnHashMapping,
) -> Result<(), AnonymizeError> {
    for column in &mut insert.columns {
        hash_ident(column, mapping)?;
    }
    let mut rename = |ident: &mut Ident| hash_ident(ident, mapping);
    match &mut insert.on {
        Some(OnInsert::OnConflict(on_conflict)) => {
            if let Some(ConflictTarget::Columns(targets)) = &mut on_conflict.conflict_target {
                for target in targets.iter_mut() {
                    rename(target)?;
                }
            }
            if let OnConflictAction::DoUpdate(do_update) = &mut on_conflict.action {
                try_for_each_assignment_target_mut(&mut do_update.assignments, &mut rename)?;
            }
        }
        Some(OnInsert::DuplicateKeyUpdate(assignments)) => {
            try_for_each_assignment_target_mut(assignments, &mut rename)?;
        }
        _ => {}
    }
    Ok(())
}

fn rewrite_update_targets(
    update: &mut Update,
    mapping: &ColumnHashMapping,
) -> Result<(), AnonymizeError> {
    let mut rename = |ident: &mut Ident| hash_ident(ident, mapping);
    try_for_each_assignment_target_mut(&mut update.assignments, &mut rename)?;
    try_for_each_using_column_mut(&mut update.table, &mut rename)?;
    if let Some(UpdateTableFromKind::BeforeSet(from) | UpdateTableFromKind::AfterSet(from)) =
        &mut update.from
    {
        for table in from.iter_mut() {
            try_for_each_using_column_mut(table, &mut rename)?;
        }
    }
    Ok(())
}

fn rewrite_delete_targets(
    delete: &mut Delete,
    mapping: &ColumnHashMapping,
) -> Result<(), AnonymizeError> {
    let mut rename = |ident: &mut Ident| hash_ident(ident, mapping);
    let tables = match &mut delete.from {
        FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
    };
    for table in tables.iter_mut() {
        try_for_each_using_column_mut(table, &mut rename)?;
    }
    for table in delete.using.iter_mut().flatten() {
        try_for_each_using_column_mut(table, &mut rename)?;
    }
    Ok(())
}

struct ColumnRewriter<'a> {
    mapping: &'a ColumnHashMapping,
}

impl VisitorMut for ColumnRewriter<'_> {
    type Break = AnonymizeError;

    fn pre_visit_query(&mut self, query: &mut Query) -> ControlFlow<Self::Break> {
        let mapping = self.mapping;
        let mut selects = Vec::new();
        selects_in_body_mut(query.body.as_mut(), &mut selects);
        for select in selects {
            for table in &mut select.from {
                let renamed = try_for_each_using_column_mut(table, &mut |ident: &mut Ident| {
                    hash_ident(ident, mapping)
                });
                if let Err(error) = renamed {
                    return ControlFlow::Break(error);
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<Self::Break> {
        let renamed = match expr {
            Expr::Identifier(ident) if !is_default_keyword(ident) => {
                hash_ident(ident, self.mapping)
            }
            Expr::CompoundIdentifier(idents) => match idents.last_mut() {
                Some(ident) => hash_ident(ident, self.mapping),
                None => Ok(()),
            },
            _ => Ok(()),
        };
        match renamed {
            Ok(()) => ControlFlow::Continue(()),
            Err(error) => ControlFlow::Break(error),
        }
    }
}
