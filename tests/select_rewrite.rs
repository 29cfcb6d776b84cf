//! End-to-end rewrite of a grouped aggregate query
//!
//! `SELECT id, AVG(score) AS avg_score FROM t GROUP BY dept` with no
//! ORDER BY: the rewrite must add COUNT/SUM companions and the missing
//! `dept` column, then synthesize ORDER BY from GROUP BY.

mod common;

use common::{StatementBuilder, optimize};
use shard_rewrite::ast::{OrderItem, SelectItem};
use shard_rewrite::token::RewriteToken;

#[test]
fn grouped_average_query_full_rewrite() {
    // "SELECT id, AVG(score) AS avg_score FROM t GROUP BY dept"
    //            ^ select list ends at 30    ^ GROUP BY ends at 49
    let mut statement = StatementBuilder::new()
        .column("id")
        .avg("score", Some("avg_score"))
        .table("t")
        .group_by(OrderItem::by_name(None, "dept"))
        .anchors(30, 49)
        .build();

    optimize(&mut statement);

    // AVG carries its merge companions.
    let SelectItem::Aggregation(avg) = &statement.items[1] else {
        panic!("expected aggregation item");
    };
    assert_eq!(avg.derived.len(), 2);

    // dept is not projected, so it is derived; the implicit ORDER BY copies
    // the aliased group term.
    assert_eq!(
        statement.group_by_items[0].alias(),
        Some("GROUP_BY_DERIVED_0")
    );
    assert_eq!(statement.order_by_items, statement.group_by_items);

    assert_eq!(
        statement.tokens,
        vec![
            RewriteToken::SelectItems {
                start_index: 32,
                items: vec![
                    "COUNT(score) AS AVG_DERIVED_COUNT_0 ".to_string(),
                    "SUM(score) AS AVG_DERIVED_SUM_0 ".to_string(),
                    "dept AS GROUP_BY_DERIVED_0 ".to_string(),
                ],
            },
            RewriteToken::OrderBy { start_index: 50 },
        ]
    );
}

#[test]
fn fully_covered_query_is_untouched() {
    // Everything the merge engine needs is already projected.
    let mut statement = StatementBuilder::new()
        .column("dept")
        .aliased_column("SUM(score)", "total")
        .table("t")
        .group_by(OrderItem::by_name(None, "dept"))
        .order_by(OrderItem::by_name(None, "dept"))
        .build();

    let before = statement.clone();
    optimize(&mut statement);

    assert_eq!(statement, before);
}
