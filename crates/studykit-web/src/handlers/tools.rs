//! Tool catalog endpoints: listing, search and lookup.

use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use studykit_common::catalog::{self, CategoryInfo, Tool, ToolCategory};
use studykit_common::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ToolQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub query: String,
    pub total: usize,
    pub tools: Vec<&'static Tool>,
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub info: &'static CategoryInfo,
    pub count: usize,
}

/// GET /api/tools?q=&category=
pub async fn api_tools(Query(query): Query<ToolQuery>) -> Result<Json<ToolListResponse>, ApiError> {
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(str::parse::<ToolCategory>)
        .transpose()?;

    let q = query.q.unwrap_or_default();
    let tools: Vec<&'static Tool> = catalog::search_tools(&q)
        .into_iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .collect();

    Ok(Json(ToolListResponse {
        query: q,
        total: tools.len(),
        tools,
    }))
}

/// GET /api/tools/{id}
pub async fn api_tool_detail(Path(id): Path<String>) -> Result<Json<&'static Tool>, ApiError> {
    catalog::tool_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Tool not found: {}", id)))
}

/// GET /api/categories
pub async fn api_categories() -> Json<Vec<CategorySummary>> {
    let summaries = catalog::categories()
        .iter()
        .map(|info| CategorySummary {
            info,
            count: catalog::tools_by_category(info.id).len(),
        })
        .collect();
    Json(summaries)
}
