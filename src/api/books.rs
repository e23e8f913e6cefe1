//! Book management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{book::BookDto, category::CategoryDto},
};

#[derive(Deserialize, ToSchema)]
pub struct TitleQuery {
    pub title: String,
}

#[derive(Deserialize, ToSchema)]
pub struct IsbnQuery {
    pub isbn: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CategoryQuery {
    pub code: String,
}

/// Add a new book to the library
#[utoipa::path(
    post,
    path = "/books/addBook",
    tag = "books",
    request_body = BookDto,
    responses(
        (status = 201, description = "Created: the book is successfully inserted", body = BookDto),
        (status = 400, description = "Bad request: invalid payload or unknown category"),
        (status = 409, description = "Conflict: the ISBN is already registered"),
        (status = 304, description = "Not Modified: the book is unsuccessfully inserted")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(book): Json<BookDto>,
) -> AppResult<(StatusCode, Json<BookDto>)> {
    book.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if state
        .services
        .books
        .find_book_by_isbn(&book.isbn)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "Book with ISBN {} already exists",
            book.isbn
        )));
    }

    let saved = state.services.books.save_book(book.into_entity()).await?;
    Ok((StatusCode::CREATED, Json(BookDto::from_entity(saved))))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/updateBook",
    tag = "books",
    request_body = BookDto,
    responses(
        (status = 200, description = "Ok: the book is successfully updated", body = BookDto),
        (status = 404, description = "Not Found: the book does not exist"),
        (status = 304, description = "Not Modified: the book is unsuccessfully updated")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Json(book): Json<BookDto>,
) -> AppResult<Json<BookDto>> {
    book.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !state.services.books.check_if_id_exists(book.id).await? {
        return Err(AppError::NotFound(format!(
            "Book with id {} not found",
            book.id
        )));
    }

    let saved = state.services.books.update_book(book.into_entity()).await?;
    Ok(Json(BookDto::from_entity(saved)))
}

/// Delete a book; nothing is done when the book does not exist
#[utoipa::path(
    delete,
    path = "/books/deleteBook/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "No Content: book successfully deleted")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search books by title fragment, case-insensitive
#[utoipa::path(
    get,
    path = "/books/searchByTitle",
    tag = "books",
    params(
        ("title" = String, Query, description = "Title fragment")
    ),
    responses(
        (status = 200, description = "Ok: successful research", body = Vec<BookDto>),
        (status = 204, description = "No Content: no result found")
    )
)]
pub async fn search_by_title(
    State(state): State<crate::AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Response> {
    let books = state.services.books.find_books_by_title(&query.title).await?;
    if books.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let dtos: Vec<BookDto> = books.into_iter().map(BookDto::from_entity).collect();
    Ok(Json(dtos).into_response())
}

/// Search the single book with the given ISBN, case-insensitive
#[utoipa::path(
    get,
    path = "/books/searchByIsbn",
    tag = "books",
    params(
        ("isbn" = String, Query, description = "Exact ISBN")
    ),
    responses(
        (status = 200, description = "Ok: successful research", body = BookDto),
        (status = 204, description = "No Content: no result found")
    )
)]
pub async fn search_by_isbn(
    State(state): State<crate::AppState>,
    Query(query): Query<IsbnQuery>,
) -> AppResult<Response> {
    match state.services.books.find_book_by_isbn(&query.isbn).await? {
        Some(book) => Ok(Json(BookDto::from_entity(book)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// List all books of a category
#[utoipa::path(
    get,
    path = "/books/searchByCategory",
    tag = "books",
    params(
        ("code" = String, Query, description = "Category code")
    ),
    responses(
        (status = 200, description = "Ok: successful research", body = Vec<BookDto>),
        (status = 204, description = "No Content: no result found")
    )
)]
pub async fn search_by_category(
    State(state): State<crate::AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Response> {
    let books = state
        .services
        .books
        .find_books_by_category(&query.code)
        .await?;
    if books.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let dtos: Vec<BookDto> = books.into_iter().map(BookDto::from_entity).collect();
    Ok(Json(dtos).into_response())
}

/// List all book categories
#[utoipa::path(
    get,
    path = "/books/categories",
    tag = "books",
    responses(
        (status = 200, description = "Ok: successfully listed", body = Vec<CategoryDto>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CategoryDto>>> {
    let categories = state.services.books.list_categories().await?;
    let dtos = categories.into_iter().map(CategoryDto::from_entity).collect();
    Ok(Json(dtos))
}
