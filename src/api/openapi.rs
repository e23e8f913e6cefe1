//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, customers, health, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Libris Team", email = "contact@libris.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::add_book,
        books::update_book,
        books::delete_book,
        books::search_by_title,
        books::search_by_isbn,
        books::search_by_category,
        books::list_categories,
        // Customers
        customers::add_customer,
        customers::update_customer,
        customers::delete_customer,
        customers::paginated_search,
        customers::search_by_email,
        customers::search_by_last_name,
        customers::send_email_to_customer,
        // Loans
        loans::search_loans_before_date,
        loans::search_open_loans_of_customer,
        loans::add_loan,
        loans::close_loan,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::models::book::BookDto,
            crate::models::category::CategoryDto,
            crate::models::customer::CustomerDto,
            crate::models::customer::MailRequest,
            crate::models::loan::LoanDto,
            crate::models::loan::LoanBookDto,
            crate::models::loan::LoanCustomerDto,
            crate::models::loan::SimpleLoanRequest,
            crate::models::loan::LoanStatus,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "books", description = "Book catalog operations"),
        (name = "customers", description = "Customer operations"),
        (name = "loans", description = "Loan operations")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
