use std::ops::ControlFlow;

use sqlparser::ast::{
    ConflictTarget, Delete, Expr, FromTable, Ident, Insert, OnConflictAction, OnInsert, Query,
    Statement, Update, UpdateTableFromKind, Visit, Visitor,
};

use super::sites::{
    for_each_assignment_target, for_each_using_column, is_default_keyword, selects_in_body,
};
use crate::mapping::ExtractedColumns;

/// Distinct bare column names referenced anywhere in the batch. Qualifiers
/// are dropped and wildcards contribute nothing.
pub fn extract_columns(statements: &[Statement]) -> ExtractedColumns {
    let mut columns = ExtractedColumns::new();
    for statement in statements {
        collect_statement_columns(statement, &mut columns);
    }
    columns
}

fn collect_statement_columns(statement: &Statement, columns: &mut ExtractedColumns) {
    match statement {
        Statement::Insert(insert) => collect_insert_targets(insert, columns),
        Statement::Update(update) => collect_update_targets(update, columns),
        Statement::Delete(delete) => collect_delete_targets(delete, columns),
        _ => {}
    }

    let mut collector = ColumnCollector { columns };
    let _ = statement.visit(&mut collector);
}

fn collect_insert_targets(insert: &Insert, columns: &mut ExtractedColumns) {
    for column in &insert.columns {
        columns.insert(&column.value);
    }
    let mut record = |ident: &Ident| {
        columns.insert(&ident.value);
    };
    match &insert.on {
        Some(OnInsert::OnConflict(on_conflict)) => {
            if let Some(ConflictTarget::Columns(targets)) = &on_conflict.conflict_target {
                targets.iter().for_each(&mut record);
            }
            if let OnConflictAction::DoUpdate(do_update) = &on_conflict.action {
                for_each_assignment_target(&do_update.assignments, &mut record);
            }
        }
        Some(OnInsert::DuplicateKeyUpdate(assignments)) => {
            for_each_assignment_target(assignments, &mut record);
        }
        _ => {}
    }
}

fn collect_update_targets(update: &Update, columns: &mut ExtractedColumns) {
    let mut record = |ident: &Ident| {
        columns.insert(&ident.value);
    };
    for_each_assignment_target(&update.assignments, &mut record);
    for_each_using_column(&update.table, &mut record);
    if let Some(UpdateTableFromKind::BeforeSet(from) | UpdateTableFromKind::AfterSet(from)) =
        &update.from
    {
        for table in from {
            for_each_using_column(table, &mut record);
        }
    }
}

fn collect_delete_targets(delete: &Delete, columns: &mut ExtractedColumns) {
    let mut record = |ident: &Ident| {
        columns.insert(&ident.value);
    };
    let tables = match &delete.from {
        FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
    };
    for table in tables {
        for_each_using_column(table, &mut record);
    }
    for table in delete.using.iter().flatten() {
        for_each_using_column(table, &mut record);
    }
}

struct ColumnCollector<'a> {
    columns: &'a mut ExtractedColumns,
}

impl Visitor for ColumnCollector<'_> {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        let mut selects = Vec::new();
        selects_in_body(query.body.as_ref(), &mut selects);
        for select in selects {
            for table in &select.from {
                for_each_using_column(table, &mut |ident: &Ident| {
                    self.columns.insert(&ident.value);
                });
            }
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        match expr {
            Expr::Identifier(ident) if !is_default_keyword(ident) => {
                self.columns.insert(&ident.value);
            }
            Expr::CompoundIdentifier(idents) => {
                if let Some(ident) = idents.last() {
                    self.columns.insert(&ident.value);
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::extract_columns;
    use crate::sql::parse_sql_statements;

    fn columns_of(sql: &str) -> Vec<String> {
        let statements = parse_sql_statements(sql).expect("test SQL should parse");
        extract_columns(&statements)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn collects_projection_where_and_having() {
        assert_eq!(
            columns_of("select a from test where b > 10 having c > 20"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn drops_qualifiers_and_collapses_duplicates() {
        assert_eq!(
            columns_of(
                "select test1.a, test2.b from test1 left join test2 on test1.c = test2.c"
            ),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn wildcards_contribute_nothing() {
        assert!(columns_of("select * from test").is_empty());
        assert!(columns_of("select t.* from test t").is_empty());
        assert_eq!(columns_of("select count(*), t.* from test t where x = 1"), vec!["x"]);
    }

    #[test]
    fn descends_into_derived_tables_and_predicate_subqueries() {
        let columns = columns_of(
            "select a from (select c as a from test1) where a in (select b from test2) \
             and exists (select 1 from test3 where d = 1) and e = (select max(f) from test4)",
        );
        assert_eq!(columns, vec!["a", "c", "b", "d", "e", "f"]);
    }

    #[test]
    fn includes_aggregate_arguments_group_and_order_keys() {
        let columns =
            columns_of("select a, sum(b), max(c) from test1 group by a, g order by h desc");
        assert_eq!(columns, vec!["a", "b", "c", "g", "h"]);
    }

    #[test]
    fn aliases_function_and_table_names_are_not_columns() {
        let columns = columns_of("select upper(name) as shout from people p");
        assert_eq!(columns, vec!["name"]);
    }

    #[test]
    fn collects_insert_targets_and_conflict_columns() {
        let columns = columns_of(
            "insert into test1 (a, b) values (1, 2) \
             on conflict (a) do update set b = excluded.c",
        );
        assert_eq!(columns, vec!["a", "b", "c"]);
    }

    #[test]
    fn default_keyword_is_skipped_but_quoted_default_is_a_column() {
        assert_eq!(
            columns_of("insert into t (a, b) values (1, DEFAULT)"),
            vec!["a", "b"]
        );
        assert_eq!(
            columns_of("update t set a = default where b = 1"),
            vec!["a", "b"]
        );
        assert_eq!(columns_of("select \"DEFAULT\" from t"), vec!["DEFAULT"]);
    }

    #[test]
    fn collects_update_targets_and_where() {
        assert_eq!(
            columns_of("update table1 set a = 1, b = 2 where c > 10"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn collects_join_using_columns() {
        let columns = columns_of("select x from t1 join t2 using (id)");
        assert!(columns.contains(&"id".to_string()));
        assert!(columns.contains(&"x".to_string()));
        assert_eq!(columns.len(), 2);
    }

    #[test]
    fn covers_every_statement_in_a_batch() {
        let columns = columns_of(
            "insert into test1 (a) values (1); delete from test1 where c < 10; \
             with recent as (select d from test2) select e from recent union select f from test3",
        );
        assert_eq!(columns, vec!["a", "c", "d", "e", "f"]);
    }

    #[test]
    fn keeps_the_name_case_as_written() {
        assert_eq!(
            columns_of("select \"UserId\", userid from test"),
            vec!["UserId", "userid"]
        );
    }
}
