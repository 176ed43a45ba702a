use pickem::db::require_db;
use pickem::services::leaderboard::standings;
use pickem::services::settlement::{Outcome, SettlementService};
use sea_orm::TransactionTrait;

use crate::support::factory::{seed_lions_tigers, seed_member};
use crate::support::test_state::db_state;

#[actix_web::test]
async fn ranks_by_score_then_user_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    seed_lions_tigers(db).await?;
    seed_member(db, "u0", "c1").await?;
    seed_member(db, "u1", "other").await?;

    let txn = db.begin().await?;
    SettlementService::new()
        .settle(&txn, &Outcome::new("E1", "Tigers"))
        .await?;
    txn.commit().await?;

    let entries = standings(db, "c1").await?;
    let rows: Vec<(usize, &str, i32)> = entries
        .iter()
        .map(|e| (e.rank, e.user_id.as_str(), e.score))
        .collect();
    assert_eq!(
        rows,
        vec![(1, "u3", 1), (2, "u0", 0), (3, "u1", 0), (4, "u2", 0)]
    );

    assert!(standings(db, "missing").await?.is_empty());
    Ok(())
}
