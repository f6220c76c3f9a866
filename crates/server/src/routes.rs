// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers and the router.
//!
//! Each handler extracts its inputs, takes the persistence lock and calls
//! the matching `bookstore_api` handler. Nothing here makes business
//! decisions.

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    routing::{get, post},
};
use bookstore_api::{
    BookResponse, BootstrapRequest, BootstrapStatusResponse, CategoryRequest, CategoryResponse,
    ChangePasswordRequest, ChangeStatusRequest, CreateBookRequest, CreateLedgerEntryRequest,
    CreatePurchaseRequest, CreatePurchaseWithBookRequest, CreatePurchaseWithBookResponse,
    CreateSaleBatchRequest, CreateSaleRequest, CreateUserRequest, InventoryActionResponse,
    LedgerEntryResponse, ListBooksQuery, ListLedgerQuery, ListPurchasesQuery, ListSalesQuery,
    ListUsersQuery, LoginRequest, LoginResponse, MessageResponse, PermissionsResponse,
    PurchaseOrderResponse, RegisterRequest, ResetPasswordRequest, RolesResponse,
    SaleBatchResponse, SaleResponse, UpdateBookRequest, UpdateLedgerEntryRequest,
    UpdateProfileRequest, UpdatePurchaseRequest, UpdateSaleRequest, UpdateStockRequest,
    UpdateUserRequest, UserDetailResponse, UserResponse, WhoAmIResponse,
    handlers::{catalog, financial, purchases, sales, users},
};
use bookstore_domain::LedgerSummary;

use crate::AppState;
use crate::error::HttpError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::session::SessionUser;

type JsonResult<T> = Result<Json<T>, HttpError>;
type CreatedResult<T> = Result<(StatusCode, Json<T>), HttpError>;

fn created<T>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}

// ========================================================================
// Auth
// ========================================================================

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> JsonResult<LoginResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::login(
        &mut persistence,
        &req,
        app_state.session_ttl,
    )?))
}

async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::logout(&mut persistence, &session.token)?))
}

#[allow(clippy::unused_async)]
async fn handle_whoami(session: SessionUser) -> Json<WhoAmIResponse> {
    Json(users::whoami(&session.actor, session.user))
}

async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> CreatedResult<UserResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(users::register(&mut persistence, req)?))
}

async fn handle_bootstrap_status(
    AxumState(app_state): AxumState<AppState>,
) -> JsonResult<BootstrapStatusResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::get_bootstrap_status(&mut persistence)?))
}

async fn handle_bootstrap(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(req): ApiJson<BootstrapRequest>,
) -> CreatedResult<UserResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(users::bootstrap(&mut persistence, req)?))
}

// ========================================================================
// Users
// ========================================================================

async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> JsonResult<Vec<UserResponse>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::list_users(
        &mut persistence,
        &session.actor,
        &query,
    )?))
}

async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> CreatedResult<UserResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(users::create_user(
        &mut persistence,
        &session.actor,
        req,
    )?))
}

async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(user_id): ApiPath<i64>,
) -> JsonResult<UserDetailResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::get_user(
        &mut persistence,
        &session.actor,
        user_id,
    )?))
}

async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> JsonResult<UserResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::update_user(
        &mut persistence,
        &session.actor,
        user_id,
        &req,
    )?))
}

async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(user_id): ApiPath<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::delete_user(
        &mut persistence,
        &session.actor,
        user_id,
    )?))
}

async fn handle_activate_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(user_id): ApiPath<i64>,
) -> JsonResult<UserResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::set_user_active(
        &mut persistence,
        &session.actor,
        user_id,
        true,
    )?))
}

async fn handle_deactivate_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(user_id): ApiPath<i64>,
) -> JsonResult<UserResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::set_user_active(
        &mut persistence,
        &session.actor,
        user_id,
        false,
    )?))
}

async fn handle_reset_password(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::reset_password(
        &mut persistence,
        &session.actor,
        user_id,
        &req,
    )?))
}

#[allow(clippy::unused_async)]
async fn handle_get_me(session: SessionUser) -> Json<UserResponse> {
    Json(UserResponse::from(session.user))
}

async fn handle_update_me(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> JsonResult<UserResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::update_me(&mut persistence, &session.actor, req)?))
}

async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::change_password(
        &mut persistence,
        &session.user,
        &req,
    )?))
}

#[allow(clippy::unused_async)]
async fn handle_list_roles(_session: SessionUser) -> Json<RolesResponse> {
    Json(users::list_roles())
}

#[allow(clippy::unused_async)]
async fn handle_list_permissions(session: SessionUser) -> Json<PermissionsResponse> {
    Json(users::list_permissions(&session.actor))
}

// ========================================================================
// Categories
// ========================================================================

async fn handle_list_categories(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> JsonResult<Vec<CategoryResponse>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::list_categories(&mut persistence)?))
}

async fn handle_create_category(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<CategoryRequest>,
) -> CreatedResult<CategoryResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(catalog::create_category(
        &mut persistence,
        &session.actor,
        &req,
    )?))
}

async fn handle_get_category(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    ApiPath(category_id): ApiPath<i64>,
) -> JsonResult<CategoryResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::get_category(&mut persistence, category_id)?))
}

async fn handle_update_category(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(category_id): ApiPath<i64>,
    ApiJson(req): ApiJson<CategoryRequest>,
) -> JsonResult<CategoryResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::update_category(
        &mut persistence,
        &session.actor,
        category_id,
        &req,
    )?))
}

async fn handle_delete_category(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(category_id): ApiPath<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::delete_category(
        &mut persistence,
        &session.actor,
        category_id,
    )?))
}

// ========================================================================
// Books
// ========================================================================

async fn handle_list_books(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    ApiQuery(query): ApiQuery<ListBooksQuery>,
) -> JsonResult<Vec<BookResponse>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::list_books(&mut persistence, &query)?))
}

async fn handle_create_book(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<CreateBookRequest>,
) -> CreatedResult<BookResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(catalog::create_book(
        &mut persistence,
        &session.actor,
        &req,
    )?))
}

async fn handle_get_book(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    ApiPath(book_id): ApiPath<i64>,
) -> JsonResult<BookResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::get_book(&mut persistence, book_id)?))
}

async fn handle_update_book(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(book_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateBookRequest>,
) -> JsonResult<BookResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::update_book(
        &mut persistence,
        &session.actor,
        book_id,
        &req,
    )?))
}

async fn handle_delete_book(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(book_id): ApiPath<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::delete_book(
        &mut persistence,
        &session.actor,
        book_id,
    )?))
}

async fn handle_update_stock(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(book_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateStockRequest>,
) -> JsonResult<InventoryActionResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::update_stock(
        &mut persistence,
        &session.actor,
        book_id,
        req,
    )?))
}

async fn handle_change_status(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(book_id): ApiPath<i64>,
    ApiJson(req): ApiJson<ChangeStatusRequest>,
) -> JsonResult<InventoryActionResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(catalog::change_status(
        &mut persistence,
        &session.actor,
        book_id,
        &req,
    )?))
}

// ========================================================================
// Purchases
// ========================================================================

async fn handle_list_purchases(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    ApiQuery(query): ApiQuery<ListPurchasesQuery>,
) -> JsonResult<Vec<PurchaseOrderResponse>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(purchases::list_purchases(&mut persistence, &query)?))
}

async fn handle_create_purchase(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<CreatePurchaseRequest>,
) -> CreatedResult<PurchaseOrderResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(purchases::create_purchase(
        &mut persistence,
        &session.actor,
        &req,
    )?))
}

async fn handle_create_purchase_with_new_book(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<CreatePurchaseWithBookRequest>,
) -> CreatedResult<CreatePurchaseWithBookResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(purchases::create_purchase_with_new_book(
        &mut persistence,
        &session.actor,
        &req,
    )?))
}

async fn handle_get_purchase(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    ApiPath(purchase_order_id): ApiPath<i64>,
) -> JsonResult<PurchaseOrderResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(purchases::get_purchase(
        &mut persistence,
        purchase_order_id,
    )?))
}

async fn handle_update_purchase(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(purchase_order_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdatePurchaseRequest>,
) -> JsonResult<PurchaseOrderResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(purchases::update_purchase(
        &mut persistence,
        &session.actor,
        purchase_order_id,
        &req,
    )?))
}

async fn handle_delete_purchase(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(purchase_order_id): ApiPath<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(purchases::delete_purchase(
        &mut persistence,
        &session.actor,
        purchase_order_id,
    )?))
}

async fn handle_pay_purchase(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(purchase_order_id): ApiPath<i64>,
) -> JsonResult<InventoryActionResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(purchases::pay_purchase(
        &mut persistence,
        &session.actor,
        purchase_order_id,
    )?))
}

async fn handle_return_purchase(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(purchase_order_id): ApiPath<i64>,
) -> JsonResult<InventoryActionResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(purchases::return_purchase(
        &mut persistence,
        &session.actor,
        purchase_order_id,
    )?))
}

async fn handle_shelve_purchase(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(purchase_order_id): ApiPath<i64>,
) -> JsonResult<InventoryActionResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(purchases::shelve_purchase(
        &mut persistence,
        &session.actor,
        purchase_order_id,
    )?))
}

// ========================================================================
// Sales
// ========================================================================

async fn handle_list_sales(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    ApiQuery(query): ApiQuery<ListSalesQuery>,
) -> JsonResult<Vec<SaleResponse>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sales::list_sales(&mut persistence, &query)?))
}

async fn handle_create_sale(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<CreateSaleRequest>,
) -> CreatedResult<InventoryActionResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(sales::create_sale(
        &mut persistence,
        &session.actor,
        &req,
    )?))
}

async fn handle_create_sale_batch(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<CreateSaleBatchRequest>,
) -> CreatedResult<SaleBatchResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(sales::create_sale_batch(
        &mut persistence,
        &session.actor,
        &req,
    )?))
}

async fn handle_get_sale(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    ApiPath(sale_id): ApiPath<i64>,
) -> JsonResult<SaleResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sales::get_sale(&mut persistence, sale_id)?))
}

async fn handle_update_sale(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(sale_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateSaleRequest>,
) -> JsonResult<SaleResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sales::update_sale(
        &mut persistence,
        &session.actor,
        sale_id,
        &req,
    )?))
}

async fn handle_delete_sale(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(sale_id): ApiPath<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sales::delete_sale(
        &mut persistence,
        &session.actor,
        sale_id,
    )?))
}

async fn handle_process_return(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(sale_id): ApiPath<i64>,
) -> JsonResult<InventoryActionResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sales::process_return(
        &mut persistence,
        &session.actor,
        sale_id,
    )?))
}

// ========================================================================
// Financial
// ========================================================================

async fn handle_list_ledger_entries(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiQuery(query): ApiQuery<ListLedgerQuery>,
) -> JsonResult<Vec<LedgerEntryResponse>> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(financial::list_ledger_entries(
        &mut persistence,
        &session.actor,
        &query,
    )?))
}

async fn handle_create_ledger_entry(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiJson(req): ApiJson<CreateLedgerEntryRequest>,
) -> CreatedResult<LedgerEntryResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(financial::create_ledger_entry(
        &mut persistence,
        &session.actor,
        &req,
    )?))
}

async fn handle_get_ledger_entry(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(transaction_id): ApiPath<i64>,
) -> JsonResult<LedgerEntryResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(financial::get_ledger_entry(
        &mut persistence,
        &session.actor,
        transaction_id,
    )?))
}

async fn handle_update_ledger_entry(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(transaction_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateLedgerEntryRequest>,
) -> JsonResult<LedgerEntryResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(financial::update_ledger_entry(
        &mut persistence,
        &session.actor,
        transaction_id,
        &req,
    )?))
}

async fn handle_delete_ledger_entry(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    ApiPath(transaction_id): ApiPath<i64>,
) -> JsonResult<MessageResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(financial::delete_ledger_entry(
        &mut persistence,
        &session.actor,
        transaction_id,
    )?))
}

async fn handle_ledger_summary(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> JsonResult<LedgerSummary> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(financial::ledger_summary(
        &mut persistence,
        &session.actor,
    )?))
}

/// Builds the application router with every endpoint nested under `/api`.
pub fn build_router(app_state: AppState) -> Router {
    let api: Router<AppState> = Router::new()
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/user", get(handle_whoami))
        .route("/auth/register", post(handle_register))
        .route(
            "/auth/bootstrap",
            get(handle_bootstrap_status).post(handle_bootstrap),
        )
        .route("/users", get(handle_list_users).post(handle_create_user))
        .route("/users/login", post(handle_login))
        .route("/users/me", get(handle_get_me).put(handle_update_me))
        .route("/users/change_password", post(handle_change_password))
        .route("/users/roles", get(handle_list_roles))
        .route("/users/permissions", get(handle_list_permissions))
        .route(
            "/users/{id}",
            get(handle_get_user)
                .put(handle_update_user)
                .delete(handle_delete_user),
        )
        .route("/users/{id}/activate", post(handle_activate_user))
        .route("/users/{id}/deactivate", post(handle_deactivate_user))
        .route("/users/{id}/reset_password", post(handle_reset_password))
        .route(
            "/categories",
            get(handle_list_categories).post(handle_create_category),
        )
        .route(
            "/categories/{id}",
            get(handle_get_category)
                .put(handle_update_category)
                .delete(handle_delete_category),
        )
        .route("/books", get(handle_list_books).post(handle_create_book))
        .route(
            "/books/{id}",
            get(handle_get_book)
                .put(handle_update_book)
                .delete(handle_delete_book),
        )
        .route("/books/{id}/update_stock", post(handle_update_stock))
        .route("/books/{id}/change_status", post(handle_change_status))
        .route(
            "/purchases",
            get(handle_list_purchases).post(handle_create_purchase),
        )
        .route(
            "/purchases/create_with_new_book",
            post(handle_create_purchase_with_new_book),
        )
        .route(
            "/purchases/{id}",
            get(handle_get_purchase)
                .put(handle_update_purchase)
                .delete(handle_delete_purchase),
        )
        .route("/purchases/{id}/pay", post(handle_pay_purchase))
        .route("/purchases/{id}/return_order", post(handle_return_purchase))
        .route("/purchases/{id}/shelve", post(handle_shelve_purchase))
        .route("/sales", get(handle_list_sales).post(handle_create_sale))
        .route("/sales/create_batch", post(handle_create_sale_batch))
        .route(
            "/sales/{id}",
            get(handle_get_sale)
                .put(handle_update_sale)
                .delete(handle_delete_sale),
        )
        .route("/sales/{id}/process_return", post(handle_process_return))
        .route(
            "/financial",
            get(handle_list_ledger_entries).post(handle_create_ledger_entry),
        )
        .route("/financial/summary", get(handle_ledger_summary))
        .route(
            "/financial/{id}",
            get(handle_get_ledger_entry)
                .put(handle_update_ledger_entry)
                .delete(handle_delete_ledger_entry),
        );

    Router::new().nest("/api", api).with_state(app_state)
}
