//! Operator handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};
use tracing::debug;

use crate::{AppError, AppState, OPERATOR_NOT_FOUND};
use ans_core::models::{ExpenseHistory, Operator};
use ans_core::pagination::{Page, PageRequest};

/// Query parameters for listing operators
///
/// `page` and `limit` are taken as raw text so that malformed numbers fall
/// back to their defaults instead of rejecting the request. A repeated
/// parameter keeps its first value.
#[derive(Debug, Default)]
pub struct OperatorQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Substring of legal name or tax id
    pub busca: Option<String>,
}

impl OperatorQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                "busca" => &mut query.busca,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(parse_int(self.page.as_deref()), parse_int(self.limit.as_deref()))
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Tax id from the path; a segment that cannot be decoded names no operator
fn operator_key(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    match path {
        Ok(Path(cnpj)) => Ok(cnpj),
        Err(rejection) => {
            debug!(error = %rejection, "Undecodable operator key");
            Err(AppError::not_found(OPERATOR_NOT_FOUND))
        }
    }
}

/// GET /api/operadoras - List operators (paginated)
pub async fn list_operators(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Page<Operator>>, AppError> {
    let params = OperatorQuery::from_pairs(pairs);
    let request = params.page_request();
    let page = state.db.list_operators(params.busca.as_deref(), request)?;

    debug!(
        page = page.page,
        limit = page.limit,
        total = page.total,
        busca = ?params.busca,
        returned = page.data.len(),
        "Listed operators"
    );

    Ok(Json(page))
}

/// GET /api/operadoras/:cnpj - Operator details
pub async fn get_operator(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Operator>, AppError> {
    let cnpj = operator_key(path)?;
    let operator = state.db.get_operator(&cnpj)?;
    Ok(Json(operator))
}

/// GET /api/operadoras/:cnpj/despesas - Operator expense history
pub async fn get_operator_expenses(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ExpenseHistory>, AppError> {
    let cnpj = operator_key(path)?;
    let history = state.db.get_expense_history(&cnpj)?;
    Ok(Json(history))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> OperatorQuery {
        OperatorQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
            busca: None,
        }
    }

    #[test]
    fn test_missing_params_use_defaults() {
        let req = OperatorQuery::default().page_request();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_malformed_params_use_defaults() {
        let req = query(Some("abc"), Some("2.5")).page_request();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);

        let req = query(Some(""), Some("")).page_request();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_params_parsed_and_clamped() {
        let req = query(Some(" 3 "), Some("500")).page_request();
        assert_eq!(req.page(), 3);
        assert_eq!(req.limit(), 100);
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_params_keep_first_value() {
        let params = OperatorQuery::from_pairs(pairs(&[
            ("page", "2"),
            ("busca", "Saúde"),
            ("page", "7"),
            ("limit", "3"),
            ("limit", "50"),
            ("busca", "Vida"),
            ("outro", "x"),
        ]));
        assert_eq!(params.busca.as_deref(), Some("Saúde"));
        let req = params.page_request();
        assert_eq!(req.page(), 2);
        assert_eq!(req.limit(), 3);
    }
}
