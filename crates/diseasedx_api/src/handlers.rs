//! Endpoint handlers.
//!
//! - `GET  /api/diseases/`          filtered, paginated summaries
//! - `GET  /api/diseases/:id/`      full record
//! - `POST /api/symptom-checker/`   ranked symptom matches
//! - `GET  /api/stats/`             dataset statistics
//! - `GET  /api/health`             liveness and dataset source

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use diseasedx_core::{
    parse_flag, DatasetStatistics, DiseaseFilter, DiseaseListQuery, DiseasePage, DiseaseProvider,
    DiseaseRecord, DiseaseSummary, SymptomCheckResult,
};
use serde::{Deserialize, Serialize};

const DISEASES_PATH: &str = "/api/diseases/";

/// Raw list query parameters; flags use the `true|1|yes` convention.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contagious: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl ListParams {
    fn to_query(&self) -> Result<DiseaseListQuery, ApiError> {
        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<usize>()
                    .ok()
                    .filter(|&page| page > 0)
                    .ok_or_else(|| ApiError::BadRequest(format!("invalid page `{raw}`")))?,
            ),
        };
        Ok(DiseaseListQuery {
            filter: DiseaseFilter {
                search: self.search.clone(),
                contagious: self.contagious.as_deref().map(parse_flag),
                chronic: self.chronic.as_deref().map(parse_flag),
            },
            page,
        })
    }

    /// Relative link to `page` keeping the other parameters.
    fn link_to(&self, page: usize) -> Option<String> {
        let params = ListParams {
            page: Some(page.to_string()),
            ..self.clone()
        };
        let encoded = serde_urlencoded::to_string(&params).ok()?;
        Some(format!("{DISEASES_PATH}?{encoded}"))
    }
}

/// Paginated list envelope (`count`, `next`, `previous`, `results`).
#[derive(Debug, Serialize, Deserialize)]
pub struct DiseaseListResponse {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<DiseaseSummary>,
}

impl DiseaseListResponse {
    fn from_page(page: DiseasePage, params: &ListParams) -> Self {
        let next = page
            .has_next
            .then(|| params.link_to(page.page + 1))
            .flatten();
        let previous = page
            .has_previous
            .then(|| params.link_to(page.page - 1))
            .flatten();
        Self {
            count: page.count,
            next,
            previous,
            results: page.results,
        }
    }
}

pub async fn list_diseases(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<DiseaseListResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let query = params.to_query()?;
    let page = state.service.list(&query);
    Ok(Json(DiseaseListResponse::from_page(page, &params)))
}

pub async fn disease_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DiseaseRecord>, ApiError> {
    let id = raw_id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("disease not found: {raw_id}")))?;
    Ok(Json(state.service.get_by_id(id)?))
}

#[derive(Debug, Deserialize)]
pub struct SymptomCheckRequest {
    pub symptoms: Vec<String>,
}

pub async fn symptom_checker(
    State(state): State<AppState>,
    payload: Result<Json<SymptomCheckRequest>, JsonRejection>,
) -> Result<Json<SymptomCheckResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(Json(state.service.check_symptoms(&request.symptoms)?))
}

pub async fn stats(State(state): State<AppState>) -> Json<DatasetStatistics> {
    Json(state.service.statistics())
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub source: &'static str,
    pub records: usize,
    pub version: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        source: state.source.label(),
        records: state.service.provider().records().len(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
