//! Column-name positions that are not `Expr` nodes and therefore are not
//! reached by `pre_visit_expr`: join `USING` lists, insert target lists and
//! assignment targets. Extraction and rewriting both go through these so
//! the two passes see the same set of sites.

use sqlparser::ast::{
    Assignment, AssignmentTarget, Ident, JoinConstraint, JoinOperator, ObjectName,
    ObjectNamePart, Select, SetExpr, Statement, TableFactor, TableWithJoins,
};

use crate::error::AnonymizeError;

/// Queries, INSERT, UPDATE and DELETE are the statement kinds whose column
/// sites are all covered. Anything else is refused before extraction.
pub(crate) fn ensure_supported_statements(
    statements: &[Statement],
) -> Result<(), AnonymizeError> {
    for (statement_index, statement) in statements.iter().enumerate() {
        match statement {
            Statement::Query(_)
            | Statement::Insert(_)
            | Statement::Update(_)
            | Statement::Delete(_) => {}
            other => {
                return Err(AnonymizeError::UnsupportedStatement {
                    statement_index,
                    keyword: leading_keyword(other),
                })
            }
        }
    }
    Ok(())
}

// First word of the rendered statement; never carries a column name.
fn leading_keyword(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}

/// `sqlparser` reads an unquoted `DEFAULT` in VALUES or SET as a plain
/// identifier. It is a keyword, not a column reference.
pub(crate) fn is_default_keyword(ident: &Ident) -> bool {
    ident.quote_style.is_none() && ident.value.eq_ignore_ascii_case("DEFAULT")
}

pub(crate) fn last_ident(name: &ObjectName) -> Option<&Ident> {
    name.0.last().and_then(ObjectNamePart::as_ident)
}

pub(crate) fn last_ident_mut(name: &mut ObjectName) -> Option<&mut Ident> {
    match name.0.last_mut() {
        Some(ObjectNamePart::Identifier(ident)) => Some(ident),
        _ => None,
    }
}

/// SELECT blocks directly in `body`, across set operations. Parenthesized
/// queries are separate `Query` nodes and are left to their own visit.
pub(crate) fn selects_in_body<'a>(body: &'a SetExpr, out: &mut Vec<&'a Select>) {
    match body {
        SetExpr::Select(select) => out.push(select.as_ref()),
        SetExpr::SetOperation { left, right, .. } => {
            selects_in_body(left.as_ref(), out);
            selects_in_body(right.as_ref(), out);
        }
        _ => {}
    }
}

pub(crate) fn selects_in_body_mut<'a>(body: &'a mut SetExpr, out: &mut Vec<&'a mut Select>) {
    match body {
        SetExpr::Select(select) => out.push(select.as_mut()),
        SetExpr::SetOperation { left, right, .. } => {
            selects_in_body_mut(left.as_mut(), out);
            selects_in_body_mut(right.as_mut(), out);
        }
        _ => {}
    }
}

fn join_constraint(operator: &JoinOperator) -> Option<&JoinConstraint> {
    match operator {
        JoinOperator::AsOf { constraint, .. } => Some(constraint),
        JoinOperator::Join(constraint)
        | JoinOperator::Inner(constraint)
        | JoinOperator::Left(constraint)
        | JoinOperator::LeftOuter(constraint)
        | JoinOperator::Right(constraint)
        | JoinOperator::RightOuter(constraint)
        | JoinOperator::FullOuter(constraint)
        | JoinOperator::CrossJoin(constraint)
        | JoinOperator::Semi(constraint)
        | JoinOperator::LeftSemi(constraint)
        | JoinOperator::RightSemi(constraint)
        | JoinOperator::Anti(constraint)
        | JoinOperator::LeftAnti(constraint)
        | JoinOperator::RightAnti(constraint)
        | JoinOperator::StraightJoin(constraint) => Some(constraint),
        JoinOperator::CrossApply | JoinOperator::OuterApply => None,
    }
}

fn join_constraint_mut(operator: &mut JoinOperator) -> Option<&mut JoinConstraint> {
    match operator {
        JoinOperator::AsOf { constraint, .. } => Some(constraint),
        JoinOperator::Join(constraint)
        | JoinOperator::Inner(constraint)
        | JoinOperator::Left(constraint)
        | JoinOperator::LeftOuter(constraint)
        | JoinOperator::Right(constraint)
        | JoinOperator::RightOuter(constraint)
        | JoinOperator::FullOuter(constraint)
        | JoinOperator::CrossJoin(constraint)
        | JoinOperator::Semi(constraint)
        | JoinOperator::LeftSemi(constraint)
        | JoinOperator::RightSemi(constraint)
        | JoinOperator::Anti(constraint)
        | JoinOperator::LeftAnti(constraint)
        | JoinOperator::RightAnti(constraint)
        | JoinOperator::StraightJoin(constraint) => Some(constraint),
        JoinOperator::CrossApply | JoinOperator::OuterApply => None,
    }
}

/// Calls `on_column` for every `USING (...)` column under `table`, including
/// nested joins.
pub(crate) fn for_each_using_column<'a>(
    table: &'a TableWithJoins,
    on_column: &mut dyn FnMut(&'a Ident),
) {
    if let TableFactor::NestedJoin {
        table_with_joins, ..
    } = &table.relation
    {
        for_each_using_column(table_with_joins, on_column);
    }
    for join in &table.joins {
        if let TableFactor::NestedJoin {
            table_with_joins, ..
        } = &join.relation
        {
            for_each_using_column(table_with_joins, on_column);
        }
        if let Some(JoinConstraint::Using(names)) = join_constraint(&join.join_operator) {
            names.iter().filter_map(last_ident).for_each(&mut *on_column);
        }
    }
}

pub(crate) fn try_for_each_using_column_mut<E>(
    table: &mut TableWithJoins,
    on_column: &mut dyn FnMut(&mut Ident) -> Result<(), E>,
) -> Result<(), E> {
    if let TableFactor::NestedJoin {
        table_with_joins, ..
    } = &mut table.relation
    {
        try_for_each_using_column_mut(table_with_joins, on_column)?;
    }
    for join in &mut table.joins {
        if let TableFactor::NestedJoin {
            table_with_joins, ..
        } = &mut join.relation
        {
            try_for_each_using_column_mut(table_with_joins, on_column)?;
        }
        if let Some(JoinConstraint::Using(names)) = join_constraint_mut(&mut join.join_operator) {
            for name in names.iter_mut() {
                if let Some(ident) = last_ident_mut(name) {
                    on_column(ident)?;
                }
            }
        }
    }
    Ok(())
}

/// Column named on the left-hand side of each assignment.
pub(crate) fn for_each_assignment_target<'a>(
    assignments: &'a [Assignment],
    on_column: &mut dyn FnMut(&'a Ident),
) {
    for assignment in assignments {
        match &assignment.target {
            AssignmentTarget::ColumnName(name) => {
                if let Some(ident) = last_ident(name) {
                    on_column(ident);
                }
            }
            AssignmentTarget::Tuple(names) => {
                names.iter().filter_map(last_ident).for_each(&mut *on_column);
            }
        }
    }
}

pub(crate) fn try_for_each_assignment_target_mut<E>(
    assignments: &mut [Assignment],
    on_column: &mut dyn FnMut(&mut Ident) -> Result<(), E>,
) -> Result<(), E> {
    for assignment in assignments {
        match &mut assignment.target {
            AssignmentTarget::ColumnName(name) => {
                if let Some(ident) = last_ident_mut(name) {
                    on_column(ident)?;
                }
            }
            AssignmentTarget::Tuple(names) => {
                for name in names.iter_mut() {
                    if let Some(ident) = last_ident_mut(name) {
                        on_column(ident)?;
                    }
                }
            }
        }
    }
    Ok(())
}
