//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{bookings, categories, health, items, AppState};
use crate::application::services::{PriceBreakdown, PricingContext, SlotReport, TaxBreakdown};
use crate::domain::{
    Availability, DiscountType, PricingDetail, PricingRule, RepositoryProvider, Tier, TimeSlot,
    TimeWindow,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        categories::list_subcategories,
        categories::create_subcategory,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        items::list_addons,
        items::create_addon,
        items::quote_item,
        items::item_availability,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::cancel_booking,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Categories
            categories::CategoryResponse,
            categories::SubcategoryResponse,
            categories::CreateCategoryRequest,
            categories::UpdateCategoryRequest,
            categories::CreateSubcategoryRequest,
            // Items
            items::ItemResponse,
            items::AddonResponse,
            items::CreateItemRequest,
            items::UpdateItemRequest,
            items::CreateAddonRequest,
            // Pricing
            PricingRule,
            PricingDetail,
            DiscountType,
            Tier,
            TimeWindow,
            TimeSlot,
            Availability,
            PricingContext,
            PriceBreakdown,
            TaxBreakdown,
            SlotReport,
            // Bookings
            bookings::BookingResponse,
            bookings::CreateBookingRequest,
        )
    ),
    tags(
        (name = "Health", description = "Проверка состояния сервера. Используйте для health-check мониторинга (uptime, ping, readiness)."),
        (name = "Categories", description = "Категории и подкатегории каталога. Налоговые настройки каскадируются: позиция → подкатегория → категория. Удаление — мягкое (запись помечается неактивной)."),
        (name = "Items", description = "Позиции каталога с пятью стратегиями ценообразования: `STATIC` (фиксированная цена), `TIERED` (по длительности), `COMPLIMENTARY` (бесплатно), `DISCOUNTED` (скидка от базовой цены), `DYNAMIC` (по временным окнам). Расчёт цены — `POST /items/{id}/quote`."),
        (name = "Bookings", description = "Бронирование временных слотов. Слот не может быть занят двумя подтверждёнными бронированиями одновременно. Статусы: `CONFIRMED`, `CANCELLED`, `COMPLETED`. Отменённый слот доступен для повторного бронирования."),
    ),
    info(
        title = "Catalog Service API",
        version = "1.0.0",
        description = "REST API каталога: категории, подкатегории, позиции, дополнения, расчёт цен с налогами и бронирование слотов.

## Формат ответов

Все REST-ответы обёрнуты в стандартную оболочку:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

При ошибке:
```json
{\"success\": false, \"data\": null, \"error\": \"описание ошибки\"}
```",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(repos: Arc<dyn RepositoryProvider>) -> Router {
    let state = AppState::new(repos);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let category_routes = Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/{id}/subcategories",
            get(categories::list_subcategories).post(categories::create_subcategory),
        );

    let item_routes = Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route(
            "/{id}/addons",
            get(items::list_addons).post(items::create_addon),
        )
        .route("/{id}/quote", post(items::quote_item))
        .route("/{id}/availability", get(items::item_availability));

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/cancel", post(bookings::cancel_booking));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .nest("/api/v1/categories", category_routes)
        .nest("/api/v1/items", item_routes)
        .nest("/api/v1/bookings", booking_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
