//! Category and subcategory REST API handlers

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::extract::ValidatedJson;
use crate::api::handlers::{ApiResult, AppState};
use crate::application::services::{CategoryUpdate, NewCategory, NewSubcategory};
use crate::domain::{Category, Subcategory};

/// Категория каталога
///
/// Верхний уровень иерархии. Налоговые настройки категории
/// наследуются подкатегориями и позициями, если те их не переопределяют.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    /// Уникальный ID категории
    pub id: Uuid,
    /// Название категории
    pub name: String,
    /// Описание
    pub description: Option<String>,
    /// URL изображения
    pub image: Option<String>,
    /// Применяется ли налог
    pub tax_applicable: bool,
    /// Ставка налога в процентах (обязательна если `tax_applicable = true`)
    pub tax_percentage: Option<f64>,
    /// Активна ли категория
    pub is_active: bool,
    /// Дата создания
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            image: c.image,
            tax_applicable: c.tax_applicable,
            tax_percentage: c.tax_percentage,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Подкатегория
///
/// Принадлежит ровно одной категории. Налоговые поля опциональны:
/// `null` означает наследование от родительской категории.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubcategoryResponse {
    /// Уникальный ID подкатегории
    pub id: Uuid,
    /// ID родительской категории
    pub category_id: Uuid,
    /// Название подкатегории
    pub name: String,
    /// Описание
    pub description: Option<String>,
    /// URL изображения
    pub image: Option<String>,
    /// Применяется ли налог (`null` — наследуется от категории)
    pub tax_applicable: Option<bool>,
    /// Ставка налога в процентах (`null` — наследуется от категории)
    pub tax_percentage: Option<f64>,
    /// Активна ли подкатегория
    pub is_active: bool,
    /// Дата создания
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
}

impl From<Subcategory> for SubcategoryResponse {
    fn from(s: Subcategory) -> Self {
        Self {
            id: s.id,
            category_id: s.category_id,
            name: s.name,
            description: s.description,
            image: s.image,
            tax_applicable: s.tax_applicable,
            tax_percentage: s.tax_percentage,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Запрос на создание категории
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    /// Название категории
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Описание
    pub description: Option<String>,
    /// URL изображения
    pub image: Option<String>,
    /// Применяется ли налог
    #[serde(default)]
    pub tax_applicable: bool,
    /// Ставка налога в процентах
    pub tax_percentage: Option<f64>,
}

/// Запрос на обновление категории
///
/// Все поля опциональны; отсутствующие поля не изменяются.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    /// Новое название
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// Новое описание
    pub description: Option<String>,
    /// Новый URL изображения
    pub image: Option<String>,
    /// Применяется ли налог
    pub tax_applicable: Option<bool>,
    /// Ставка налога в процентах
    pub tax_percentage: Option<f64>,
}

/// Запрос на создание подкатегории
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubcategoryRequest {
    /// Название подкатегории
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Описание
    pub description: Option<String>,
    /// URL изображения
    pub image: Option<String>,
    /// Применяется ли налог (`null` — наследуется от категории)
    pub tax_applicable: Option<bool>,
    /// Ставка налога в процентах (`null` — наследуется от категории)
    pub tax_percentage: Option<f64>,
}

/// Список всех категорий
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "Список категорий", body = ApiResponse<Vec<CategoryResponse>>)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<CategoryResponse>> {
    let categories = state.catalog.list_categories().await?;
    let responses: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Получение категории по ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "ID категории")
    ),
    responses(
        (status = 200, description = "Полная информация о категории", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Категория не найдена")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<CategoryResponse> {
    let category = state.catalog.get_category(id).await?;
    Ok(Json(ApiResponse::success(category.into())))
}

/// Создание новой категории
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Категория успешно создана", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Некорректные данные")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<CategoryResponse> {
    let category = state
        .catalog
        .create_category(NewCategory {
            name: body.name,
            description: body.description,
            image: body.image,
            tax_applicable: body.tax_applicable,
            tax_percentage: body.tax_percentage,
        })
        .await?;
    Ok(Json(ApiResponse::success(category.into())))
}

/// Обновление категории
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "ID категории")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Категория обновлена", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Некорректные данные"),
        (status = 404, description = "Категория не найдена")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<CategoryResponse> {
    let category = state
        .catalog
        .update_category(
            id,
            CategoryUpdate {
                name: body.name,
                description: body.description,
                image: body.image,
                tax_applicable: body.tax_applicable,
                tax_percentage: body.tax_percentage,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(category.into())))
}

/// Удаление категории (soft delete)
///
/// Категория помечается неактивной и исчезает из выдачи,
/// но остаётся в базе для истории.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "ID категории")
    ),
    responses(
        (status = 200, description = "Категория деактивирована", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Категория не найдена")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<CategoryResponse> {
    let category = state.catalog.delete_category(id).await?;
    Ok(Json(ApiResponse::success(category.into())))
}

/// Список подкатегорий категории
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/subcategories",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "ID категории")
    ),
    responses(
        (status = 200, description = "Список подкатегорий", body = ApiResponse<Vec<SubcategoryResponse>>),
        (status = 404, description = "Категория не найдена")
    )
)]
pub async fn list_subcategories(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<SubcategoryResponse>> {
    let subcategories = state.catalog.list_subcategories(id).await?;
    let responses: Vec<SubcategoryResponse> = subcategories.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Создание подкатегории внутри категории
#[utoipa::path(
    post,
    path = "/api/v1/categories/{id}/subcategories",
    tag = "Categories",
    params(
        ("id" = Uuid, Path, description = "ID родительской категории")
    ),
    request_body = CreateSubcategoryRequest,
    responses(
        (status = 200, description = "Подкатегория создана", body = ApiResponse<SubcategoryResponse>),
        (status = 400, description = "Некорректные данные"),
        (status = 404, description = "Категория не найдена")
    )
)]
pub async fn create_subcategory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateSubcategoryRequest>,
) -> ApiResult<SubcategoryResponse> {
    let subcategory = state
        .catalog
        .create_subcategory(
            id,
            NewSubcategory {
                name: body.name,
                description: body.description,
                image: body.image,
                tax_applicable: body.tax_applicable,
                tax_percentage: body.tax_percentage,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(subcategory.into())))
}
