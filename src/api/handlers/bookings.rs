//! Booking REST API handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::extract::ValidatedJson;
use crate::api::handlers::{ApiError, ApiResult, AppState};
use crate::application::services::NewBooking;
use crate::domain::{Booking, BookingFilter, BookingStatus, DomainError, TimeSlot};

/// Бронирование слота
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    /// Уникальный ID бронирования
    pub id: Uuid,
    /// ID забронированной позиции
    pub item_id: Uuid,
    /// Дата бронирования (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Временной слот
    pub time_slot: TimeSlot,
    /// Имя клиента
    pub customer_name: String,
    /// Email клиента
    pub customer_email: Option<String>,
    /// Статус: `CONFIRMED`, `CANCELLED`, `COMPLETED`
    pub status: String,
    /// Дата создания
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            item_id: b.item_id,
            date: b.date,
            time_slot: b.time_slot,
            customer_name: b.customer_name,
            customer_email: b.customer_email,
            status: b.status.as_str().to_string(),
            created_at: b.created_at,
        }
    }
}

/// Запрос на создание бронирования
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// ID позиции
    pub item_id: Uuid,
    /// Дата бронирования (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Временной слот из расписания позиции
    pub time_slot: TimeSlot,
    /// Имя клиента
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,
    /// Email клиента
    #[validate(email)]
    pub customer_email: Option<String>,
}

/// Фильтры списка бронирований
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingListQuery {
    /// Фильтр по позиции
    pub item_id: Option<Uuid>,
    /// Фильтр по дате (`YYYY-MM-DD`)
    pub date: Option<NaiveDate>,
    /// Фильтр по статусу: `CONFIRMED`, `CANCELLED`, `COMPLETED`
    pub status: Option<String>,
}

/// Список бронирований
///
/// Сортировка: по дате (новые сначала), внутри даты по началу слота.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Список бронирований", body = ApiResponse<Vec<BookingResponse>>),
        (status = 400, description = "Неизвестный статус")
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> ApiResult<Vec<BookingResponse>> {
    let status = match query.status.as_deref() {
        Some(s) => Some(BookingStatus::from_str(s).ok_or_else(|| {
            ApiError::from(DomainError::Validation(format!(
                "Unknown booking status: {}",
                s
            )))
        })?),
        None => None,
    };
    let bookings = state
        .bookings
        .list(BookingFilter {
            item_id: query.item_id,
            date: query.date,
            status,
        })
        .await?;
    let responses: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

/// Получение бронирования по ID
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Полная информация о бронировании", body = ApiResponse<BookingResponse>),
        (status = 404, description = "Бронирование не найдено")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<BookingResponse> {
    let booking = state.bookings.get(id).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Создание бронирования
///
/// Слот должен существовать в расписании позиции, позиция должна
/// работать в этот день недели, и слот не должен быть занят
/// подтверждённым бронированием. При гонке двух запросов на один
/// слот ровно один получает `409 Conflict`.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Бронирование подтверждено", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Некорректный слот или день"),
        (status = 404, description = "Позиция не найдена"),
        (status = 409, description = "Слот уже занят")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<BookingResponse> {
    let booking = state
        .bookings
        .create(NewBooking {
            item_id: body.item_id,
            date: body.date,
            time_slot: body.time_slot,
            customer_name: body.customer_name,
            customer_email: body.customer_email,
        })
        .await?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Отмена бронирования
///
/// Отменённый слот снова становится доступным для бронирования.
/// Повторная отмена возвращает 400.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Бронирование отменено", body = ApiResponse<BookingResponse>),
        (status = 400, description = "Бронирование уже отменено"),
        (status = 404, description = "Бронирование не найдено")
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<BookingResponse> {
    let booking = state.bookings.cancel(id).await?;
    Ok(Json(ApiResponse::success(booking.into())))
}
