//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique_email(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{}+{}@example.org", tag, nanos)
}

async fn create_customer(client: &Client, email: &str) -> Value {
    let response = client
        .post(format!("{}/customers/addCustomer", BASE_URL))
        .json(&json!({
            "firstName": "Test",
            "lastName": "Borrower",
            "email": email
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_customer_email_conflicts() {
    let client = Client::new();
    let email = unique_email("dup");

    let created = create_customer(&client, &email).await;
    let customer_id = created["id"].as_i64().expect("No customer ID");

    // Second create with the same email must conflict
    let response = client
        .post(format!("{}/customers/addCustomer", BASE_URL))
        .json(&json!({
            "firstName": "Other",
            "lastName": "Person",
            "email": email
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    // Cleanup
    let response = client
        .delete(format!("{}/customers/deleteCustomer/{}", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_update_unknown_customer_not_found() {
    let client = Client::new();

    let response = client
        .put(format!("{}/customers/updateCustomer", BASE_URL))
        .json(&json!({
            "id": 999_999,
            "firstName": "Ghost",
            "lastName": "Customer",
            "email": unique_email("ghost")
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_unknown_customer_is_idempotent() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/customers/deleteCustomer/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_search_by_email_round_trip() {
    let client = Client::new();
    let email = unique_email("lookup");

    let created = create_customer(&client, &email).await;
    let customer_id = created["id"].as_i64().expect("No customer ID");

    let response = client
        .get(format!("{}/customers/searchByEmail", BASE_URL))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], email.as_str());

    // Unknown email yields no content
    let response = client
        .get(format!("{}/customers/searchByEmail", BASE_URL))
        .query(&[("email", "nobody@nowhere.example")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let _ = client
        .delete(format!("{}/customers/deleteCustomer/{}", BASE_URL, customer_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_book_save_and_find_by_isbn() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books/addBook", BASE_URL))
        .json(&json!({
            "id": 90001,
            "title": "Integration Testing in Practice",
            "isbn": "978-1-00-090001-1",
            "releaseDate": "2019-05-01",
            "registerDate": "2024-01-10",
            "totalCopies": 2,
            "author": "N. Tester",
            "categoryCode": "NOV"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    // Case-insensitive ISBN lookup returns the same record
    let response = client
        .get(format!("{}/books/searchByIsbn", BASE_URL))
        .query(&[("isbn", "978-1-00-090001-1")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["isbn"], "978-1-00-090001-1");
    assert_eq!(body["id"], 90001);

    let response = client
        .delete(format!("{}/books/deleteBook/90001", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle() {
    let client = Client::new();
    let email = unique_email("loan");

    // Fixtures: one book, one customer
    let response = client
        .post(format!("{}/books/addBook", BASE_URL))
        .json(&json!({
            "id": 90002,
            "title": "The Loaned Book",
            "isbn": "978-1-00-090002-8",
            "releaseDate": "2018-02-01",
            "registerDate": "2024-01-10",
            "categoryCode": "NOV"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let customer = create_customer(&client, &email).await;
    let customer_id = customer["id"].as_i64().expect("No customer ID");

    let loan_body = json!({
        "bookId": 90002,
        "customerId": customer_id,
        "beginDate": "2024-02-01",
        "endDate": "2024-03-01"
    });

    // First create succeeds
    let response = client
        .post(format!("{}/loans/addLoan", BASE_URL))
        .json(&loan_body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Second create for the same pair conflicts
    let response = client
        .post(format!("{}/loans/addLoan", BASE_URL))
        .json(&loan_body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // The open loan shows up for the customer
    let response = client
        .get(format!("{}/loans/customerLoans", BASE_URL))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(|a| a.len()), Some(1));
    assert_eq!(body[0]["book"]["id"], 90002);

    // Close succeeds once
    let response = client
        .post(format!("{}/loans/closeLoan", BASE_URL))
        .json(&loan_body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    // Second close finds no open loan
    let response = client
        .post(format!("{}/loans/closeLoan", BASE_URL))
        .json(&loan_body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Closed loan no longer listed among the customer's open loans
    let response = client
        .get(format!("{}/loans/customerLoans", BASE_URL))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(|a| a.len()), Some(0));

    // Deletes still succeed with loan history on record; the closed loan
    // follows its customer and book out of the store
    let response = client
        .delete(format!("{}/customers/deleteCustomer/{}", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/books/deleteBook/90002", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_max_end_date_cutoff_is_exclusive() {
    let client = Client::new();
    let email = unique_email("cutoff");

    let response = client
        .post(format!("{}/books/addBook", BASE_URL))
        .json(&json!({
            "id": 90003,
            "title": "The Late Return",
            "isbn": "978-1-00-090003-5",
            "releaseDate": "2017-09-01",
            "registerDate": "2024-01-10",
            "categoryCode": "NOV"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let customer = create_customer(&client, &email).await;
    let customer_id = customer["id"].as_i64().expect("No customer ID");

    let response = client
        .post(format!("{}/loans/addLoan", BASE_URL))
        .json(&json!({
            "bookId": 90003,
            "customerId": customer_id,
            "beginDate": "2024-02-01",
            "endDate": "2024-03-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let listed_books = |body: Value| -> Vec<i64> {
        body.as_array()
            .unwrap()
            .iter()
            .filter_map(|l| l["book"]["id"].as_i64())
            .collect()
    };

    // The end date itself is excluded: end_date < date is strict
    let response = client
        .get(format!("{}/loans/maxEndDate", BASE_URL))
        .query(&[("date", "2024-03-01")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!listed_books(body).contains(&90003));

    // One day past the end date includes the loan
    let response = client
        .get(format!("{}/loans/maxEndDate", BASE_URL))
        .query(&[("date", "2024-03-02")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(listed_books(body).contains(&90003));

    // Cleanup: loan rows follow the customer and book
    let _ = client
        .delete(format!("{}/customers/deleteCustomer/{}", BASE_URL, customer_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/books/deleteBook/90003", BASE_URL))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_paginated_search_window() {
    let client = Client::new();

    // Window past the end of the data yields no content
    let response = client
        .get(format!("{}/customers/paginatedSearch", BASE_URL))
        .query(&[("beginPage", "9999"), ("endPage", "10")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // An overflowing window is a bad request, not a server error
    let response = client
        .get(format!("{}/customers/paginatedSearch", BASE_URL))
        .query(&[("beginPage", "9223372036854775807"), ("endPage", "2")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // A wide first page lists whatever customers exist
    let email = unique_email("page");
    let customer = create_customer(&client, &email).await;
    let customer_id = customer["id"].as_i64().expect("No customer ID");

    let response = client
        .get(format!("{}/customers/paginatedSearch", BASE_URL))
        .query(&[("beginPage", "0"), ("endPage", "1000")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body.as_array().unwrap().is_empty());

    let _ = client
        .delete(format!("{}/customers/deleteCustomer/{}", BASE_URL, customer_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_send_email_to_unknown_customer_not_found() {
    let client = Client::new();

    let response = client
        .put(format!("{}/customers/sendEmailToCustomer", BASE_URL))
        .json(&json!({
            "customerId": 999_999,
            "emailSubject": "Overdue loan",
            "emailContent": "Please return your book."
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, Value::Bool(false));
}
