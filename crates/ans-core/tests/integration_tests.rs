//! Integration tests for ans-core
//!
//! These tests exercise the full seed → browse → aggregate workflow
//! through the public API only.

use std::time::{Duration, Instant};

use ans_core::{
    db::Database,
    models::{NewExpense, NewOperator},
    CacheState, PageRequest, StatisticsCache,
};

fn seeded_db() -> Database {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    db.seed_sample_data().expect("Failed to seed sample data");
    db
}

// =============================================================================
// Browse Workflow
// =============================================================================

#[test]
fn test_seed_then_browse_workflow() {
    let db = seeded_db();

    // Walk every page and collect the operators
    let mut seen = Vec::new();
    let mut page = 1;
    loop {
        let result = db
            .list_operators(None, PageRequest::new(Some(page), Some(2)))
            .unwrap();
        assert_eq!(result.total, 5);
        assert_eq!(result.total_pages, 3);
        if result.data.is_empty() {
            break;
        }
        seen.extend(result.data.into_iter().map(|op| op.razao_social));
        page += 1;
    }

    assert_eq!(
        seen,
        vec![
            "Assistência Médica Premium",
            "Operadora Saúde Bem Estar Ltda",
            "Plano Saúde Total S.A.",
            "Saúde Plus Operadora",
            "Vida Saudável Planos",
        ]
    );

    // Detail and history for one of them
    let op = db.get_operator("44.555.666/0001-77").unwrap();
    assert_eq!(op.uf.as_deref(), Some("SP"));
    assert_eq!(op.modalidade.as_deref(), Some("Autogestão"));

    let history = db.get_expense_history("44.555.666/0001-77").unwrap();
    assert_eq!(history.razao_social, "Saúde Plus Operadora");
    let quarters: Vec<i64> = history.despesas.iter().map(|d| d.trimestre).collect();
    assert_eq!(quarters, vec![3, 2, 1]);
    assert!(history
        .despesas
        .iter()
        .all(|d| d.ano == 2024 && (100_000.0..600_000.0).contains(&d.valor)));
}

#[test]
fn test_search_workflow() {
    let db = seeded_db();

    let by_name = db
        .list_operators(Some("Saúde"), PageRequest::default())
        .unwrap();
    assert_eq!(by_name.total, 3);
    assert!(by_name
        .data
        .iter()
        .all(|op| op.razao_social.contains("Saúde")));

    let by_cnpj = db
        .list_operators(Some("98.765"), PageRequest::default())
        .unwrap();
    assert_eq!(by_cnpj.total, 1);
    assert_eq!(by_cnpj.data[0].cnpj, "98.765.432/0001-10");
}

#[test]
fn test_data_survives_reopen() {
    let db = seeded_db();
    db.insert_expense(&NewExpense {
        cnpj: "11.222.333/0001-44",
        trimestre: 4,
        ano: 2024,
        valor: 1.0,
    })
    .unwrap();

    let reopened = Database::new(db.path()).unwrap();
    assert_eq!(reopened.count_operators_total().unwrap(), 5);
    assert_eq!(reopened.count_expenses().unwrap(), 16);

    // Reseeding a populated store adds nothing
    let summary = reopened.seed_sample_data().unwrap();
    assert_eq!(summary.operators_inserted, 0);
    assert_eq!(summary.expenses_inserted, 0);
}

// =============================================================================
// Statistics Workflow
// =============================================================================

#[test]
fn test_statistics_over_sample_data() {
    let db = seeded_db();
    let stats = db.compute_statistics().unwrap();

    assert_eq!(stats.resumo.num_operadoras, 5);
    assert_eq!(stats.top_operadoras.len(), 5);
    assert!(stats
        .top_operadoras
        .windows(2)
        .all(|w| w[0].total_despesas >= w[1].total_despesas));

    let mut ufs: Vec<&str> = stats
        .distribuicao_uf
        .iter()
        .filter_map(|r| r.uf.as_deref())
        .collect();
    ufs.sort();
    assert_eq!(ufs, vec!["MG", "RJ", "SP"]);

    let region_total: f64 = stats.distribuicao_uf.iter().map(|r| r.total_despesas).sum();
    assert!((region_total - stats.resumo.total_despesas).abs() < 0.1);

    let operators: i64 = stats.distribuicao_uf.iter().map(|r| r.num_operadoras).sum();
    assert_eq!(operators, 5);
}

#[test]
fn test_cached_statistics_lag_behind_writes() {
    let db = seeded_db();
    let cache = StatisticsCache::with_ttl(Duration::from_secs(300));
    assert_eq!(cache.state(), CacheState::Empty);

    let first = cache.get_statistics(&db).unwrap();
    assert_eq!(cache.state(), CacheState::Fresh);

    db.insert_operator(&NewOperator {
        cnpj: "00.000.000/0001-00",
        razao_social: "Nova Operadora",
        registro_ans: None,
        modalidade: None,
        uf: Some("BA"),
    })
    .unwrap();
    db.insert_expense(&NewExpense {
        cnpj: "00.000.000/0001-00",
        trimestre: 1,
        ano: 2025,
        valor: 10_000_000.0,
    })
    .unwrap();

    // Still served from the slot
    let second = cache.get_statistics(&db).unwrap();
    assert_eq!(second.resumo.total_despesas, first.resumo.total_despesas);

    // Past the TTL the new operator leads the ranking
    let later = Instant::now() + Duration::from_secs(301);
    assert_eq!(cache.state_at(later), CacheState::Stale);
    let third = cache
        .get_or_compute_at(later, || db.compute_statistics())
        .unwrap();
    assert_eq!(third.top_operadoras[0].razao_social, "Nova Operadora");
    assert!(third.resumo.total_despesas > first.resumo.total_despesas);
}
