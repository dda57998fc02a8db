//! Item, add-on, quote and availability REST API handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::extract::ValidatedJson;
use crate::api::handlers::{ApiResult, AppState};
use crate::application::services::{
    ItemUpdate, NewAddon, NewItem, PriceBreakdown, PricingContext, SlotReport,
};
use crate::domain::{Addon, Availability, Item, ItemFilter, PricingRule};

/// Позиция каталога
///
/// Принадлежит либо категории, либо подкатегории (ровно одному родителю).
/// Цена считается по стратегии из поля `pricing`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    /// Уникальный ID позиции
    pub id: Uuid,
    /// Название позиции
    pub name: String,
    /// Описание
    pub description: Option<String>,
    /// URL изображения
    pub image: Option<String>,
    /// ID родительской категории (взаимоисключимо с `subcategory_id`)
    pub category_id: Option<Uuid>,
    /// ID родительской подкатегории (взаимоисключимо с `category_id`)
    pub subcategory_id: Option<Uuid>,
    /// Применяется ли налог (`null` — наследуется от родителя)
    pub tax_applicable: Option<bool>,
    /// Ставка налога в процентах (`null` — наследуется от родителя)
    pub tax_percentage: Option<f64>,
    /// Стратегия ценообразования: `STATIC`, `TIERED`, `COMPLIMENTARY`, `DISCOUNTED`, `DYNAMIC`
    pub pricing: PricingRule,
    /// Доступна ли позиция для бронирования
    pub is_bookable: bool,
    /// Расписание доступности (дни недели и слоты)
    pub availability: Option<Availability>,
    /// Активна ли позиция
    pub is_active: bool,
    /// Дата создания
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            name: i.name,
            description: i.description,
            image: i.image,
            category_id: i.category_id,
            subcategory_id: i.subcategory_id,
            tax_applicable: i.tax_applicable,
            tax_percentage: i.tax_percentage,
            pricing: i.pricing,
            is_bookable: i.is_bookable,
            availability: i.availability,
            is_active: i.is_active,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

/// Дополнение к позиции (add-on)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddonResponse {
    /// Уникальный ID дополнения
    pub id: Uuid,
    /// ID позиции, к которой относится дополнение
    pub item_id: Uuid,
    /// Название дополнения
    pub name: String,
    /// Цена дополнения
    pub price: f64,
    /// Обязательное ли дополнение
    pub is_mandatory: bool,
    /// Группа (например `"toppings"`)
    pub group: Option<String>,
    /// Активно ли дополнение
    pub is_active: bool,
    /// Дата создания
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
}

impl From<Addon> for AddonResponse {
    fn from(a: Addon) -> Self {
        Self {
            id: a.id,
            item_id: a.item_id,
            name: a.name,
            price: a.price,
            is_mandatory: a.is_mandatory,
            group: a.group,
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Запрос на создание позиции
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    /// Название позиции
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Описание
    pub description: Option<String>,
    /// URL изображения
    pub image: Option<String>,
    /// ID родительской категории (укажите ровно одного родителя)
    pub category_id: Option<Uuid>,
    /// ID родительской подкатегории (укажите ровно одного родителя)
    pub subcategory_id: Option<Uuid>,
    /// Применяется ли налог (`null` — наследуется от родителя)
    pub tax_applicable: Option<bool>,
    /// Ставка налога в процентах
    pub tax_percentage: Option<f64>,
    /// Стратегия ценообразования
    pub pricing: PricingRule,
    /// Доступна ли позиция для бронирования
    #[serde(default)]
    pub is_bookable: bool,
    /// Расписание доступности (обязательно для бронируемых позиций)
    pub availability: Option<Availability>,
}

/// Запрос на обновление позиции
///
/// Все поля опциональны; отсутствующие не изменяются.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItemRequest {
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
    /// Новая стратегия ценообразования
    pub pricing: Option<PricingRule>,
    /// Доступна ли позиция для бронирования
    pub is_bookable: Option<bool>,
    /// Новое расписание доступности
    pub availability: Option<Availability>,
}

/// Запрос на создание дополнения
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAddonRequest {
    /// Название дополнения
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Цена дополнения (не может быть отрицательной)
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Обязательное ли дополнение
    #[serde(default)]
    pub is_mandatory: bool,
    /// Группа дополнения
    pub group: Option<String>,
}

/// Фильтры списка позиций
#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemListQuery {
    /// Фильтр по категории
    pub category_id: Option<Uuid>,
    /// Фильтр по подкатегории
    pub subcategory_id: Option<Uuid>,
    /// Фильтр по активности
    pub active: Option<bool>,
}

/// Параметры запроса доступности
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Дата в формате `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Список позиций каталога
#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "Items",
    params(ItemListQuery),
    responses(
        (status = 200, description = "Список позиций", body = ApiResponse<Vec<ItemResponse>>)
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> ApiResult<Vec<ItemResponse>> {
    let items = state
        .catalog
        .list_items(ItemFilter {
            category_id: query.category_id,
            subcategory_id: query.subcategory_id,
            active: query.active,
        })
        .await?;
    let responses: Vec<ItemResponse> = items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Получение позиции по ID
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "ID позиции")
    ),
    responses(
        (status = 200, description = "Полная информация о позиции", body = ApiResponse<ItemResponse>),
        (status = 404, description = "Позиция не найдена")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ItemResponse> {
    let item = state.catalog.get_item(id).await?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// Создание новой позиции
///
/// Позиция обязана иметь ровно одного родителя:
/// категорию **или** подкатегорию.
#[utoipa::path(
    post,
    path = "/api/v1/items",
    tag = "Items",
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "Позиция создана", body = ApiResponse<ItemResponse>),
        (status = 400, description = "Некорректные данные"),
        (status = 404, description = "Родитель не найден")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateItemRequest>,
) -> ApiResult<ItemResponse> {
    let item = state
        .catalog
        .create_item(NewItem {
            name: body.name,
            description: body.description,
            image: body.image,
            category_id: body.category_id,
            subcategory_id: body.subcategory_id,
            tax_applicable: body.tax_applicable,
            tax_percentage: body.tax_percentage,
            pricing: body.pricing,
            is_bookable: body.is_bookable,
            availability: body.availability,
        })
        .await?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// Обновление позиции
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "ID позиции")
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Позиция обновлена", body = ApiResponse<ItemResponse>),
        (status = 400, description = "Некорректные данные"),
        (status = 404, description = "Позиция не найдена")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateItemRequest>,
) -> ApiResult<ItemResponse> {
    let item = state
        .catalog
        .update_item(
            id,
            ItemUpdate {
                name: body.name,
                description: body.description,
                image: body.image,
                tax_applicable: body.tax_applicable,
                tax_percentage: body.tax_percentage,
                pricing: body.pricing,
                is_bookable: body.is_bookable,
                availability: body.availability,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// Удаление позиции (soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "ID позиции")
    ),
    responses(
        (status = 200, description = "Позиция деактивирована", body = ApiResponse<ItemResponse>),
        (status = 404, description = "Позиция не найдена")
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ItemResponse> {
    let item = state.catalog.delete_item(id).await?;
    Ok(Json(ApiResponse::success(item.into())))
}

/// Список дополнений позиции
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}/addons",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "ID позиции")
    ),
    responses(
        (status = 200, description = "Список дополнений", body = ApiResponse<Vec<AddonResponse>>),
        (status = 404, description = "Позиция не найдена")
    )
)]
pub async fn list_addons(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<AddonResponse>> {
    let addons = state.catalog.list_addons(id).await?;
    let responses: Vec<AddonResponse> = addons.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Создание дополнения к позиции
#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/addons",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "ID позиции")
    ),
    request_body = CreateAddonRequest,
    responses(
        (status = 200, description = "Дополнение создано", body = ApiResponse<AddonResponse>),
        (status = 400, description = "Некорректные данные"),
        (status = 404, description = "Позиция не найдена")
    )
)]
pub async fn create_addon(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CreateAddonRequest>,
) -> ApiResult<AddonResponse> {
    let addon = state
        .catalog
        .create_addon(
            id,
            NewAddon {
                name: body.name,
                price: body.price,
                is_mandatory: body.is_mandatory,
                group: body.group,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(addon.into())))
}

/// Расчёт итоговой цены позиции
///
/// Считает базовую цену по стратегии позиции, добавляет выбранные
/// дополнения, применяет налог по каскаду
/// позиция → подкатегория → категория и возвращает детализацию.
#[utoipa::path(
    post,
    path = "/api/v1/items/{id}/quote",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "ID позиции")
    ),
    request_body = PricingContext,
    responses(
        (status = 200, description = "Детализация цены", body = ApiResponse<PriceBreakdown>),
        (status = 400, description = "Позиция неактивна или не хватает параметров"),
        (status = 404, description = "Позиция не найдена")
    )
)]
pub async fn quote_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(context): Json<PricingContext>,
) -> ApiResult<PriceBreakdown> {
    let breakdown = state.pricing.quote(id, context).await?;
    Ok(Json(ApiResponse::success(breakdown)))
}

/// Доступные слоты позиции на дату
///
/// Возвращает свободные, занятые и общие слоты. Если позиция
/// закрыта в этот день недели, список пуст и заполнено `message`.
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}/availability",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "ID позиции"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Отчёт о доступности", body = ApiResponse<SlotReport>),
        (status = 400, description = "Позиция не бронируема"),
        (status = 404, description = "Позиция не найдена")
    )
)]
pub async fn item_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<SlotReport> {
    let report = state.bookings.available_slots(id, query.date).await?;
    Ok(Json(ApiResponse::success(report)))
}
