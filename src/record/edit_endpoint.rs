//! Route handler for replacing a record.

use axum::{Json, extract::State};
use time::OffsetDateTime;

use crate::{
    Error,
    auth::Session,
    database_id::RecordId,
    extract::{ApiJson, ApiPath},
    record::{
        Access, Record, RecordForm, RecordKind, get_owned_record, replace_record,
        state::RecordState,
    },
    response::ApiResponse,
};

/// Replace the user editable fields of a record of kind `K`.
///
/// The request body has the same shape as for creating a record. If the date
/// is left out the stored date is kept.
pub async fn edit_record_endpoint<K: RecordKind>(
    State(state): State<RecordState>,
    session: Session,
    ApiPath(record_id): ApiPath<RecordId>,
    ApiJson(form): ApiJson<RecordForm>,
) -> Result<Json<ApiResponse<Record<K::Category>>>, Error> {
    let connection = state.connection()?;

    let existing = get_owned_record::<K>(record_id, session.user_id, Access::Update, &connection)?;
    let draft = form.into_draft::<K::Category>(existing.date)?;

    let record = replace_record::<K>(record_id, draft, OffsetDateTime::now_utc(), &connection)?;

    Ok(Json(ApiResponse::new(record)))
}

#[cfg(test)]
mod edit_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        Record,
        endpoints::{self, format_endpoint},
        record::ExpenseCategory,
        response::ApiResponse,
        test_utils::{assert_error_message, must_create_test_server, must_register},
    };

    async fn create_expense(server: &axum_test::TestServer, token: &str) -> Record<ExpenseCategory> {
        let response = server
            .post(endpoints::EXPENSES)
            .authorization_bearer(token)
            .json(&json!({
                "title": "Lunch",
                "amount": 15,
                "category": "Food",
                "date": "2024-03-15",
                "description": "With friends",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        response.json::<ApiResponse<Record<ExpenseCategory>>>().data
    }

    #[tokio::test]
    async fn edit_replaces_all_fields() {
        let (server, _) = must_create_test_server();
        let token = must_register(&server, "ada@example.com").await;
        let expense = create_expense(&server, &token).await;

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, expense.id))
            .authorization_bearer(&token)
            .json(&json!({ "title": "Dinner", "amount": 40 }))
            .await;

        response.assert_status_ok();
        let edited = response.json::<ApiResponse<Record<ExpenseCategory>>>().data;
        assert_eq!(edited.id, expense.id);
        assert_eq!(edited.title, "Dinner");
        assert_eq!(edited.amount, 40.0);
        // Omitted fields are replaced with their defaults, except the date.
        assert_eq!(edited.category, ExpenseCategory::Other);
        assert_eq!(edited.description, None);
        assert_eq!(edited.date, expense.date);
        assert_eq!(edited.user, expense.user);
        assert_eq!(edited.created_at, expense.created_at);
        assert!(edited.updated_at >= expense.updated_at);
    }

    #[tokio::test]
    async fn edit_of_other_users_record_is_rejected() {
        let (server, _) = must_create_test_server();
        let owner_token = must_register(&server, "ada@example.com").await;
        let other_token = must_register(&server, "grace@example.com").await;
        let expense = create_expense(&server, &owner_token).await;

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, expense.id))
            .authorization_bearer(&other_token)
            .json(&json!({ "title": "Mine now", "amount": 1 }))
            .await;

        assert_error_message(
            &response,
            StatusCode::UNAUTHORIZED,
            "Not authorized to update this expense",
        );

        let unchanged = server
            .get(&format_endpoint(endpoints::EXPENSE, expense.id))
            .authorization_bearer(&owner_token)
            .await
            .json::<ApiResponse<Record<ExpenseCategory>>>()
            .data;
        assert_eq!(unchanged.title, "Lunch");
    }

    #[tokio::test]
    async fn edit_of_missing_record_is_not_found() {
        let (server, _) = must_create_test_server();
        let token = must_register(&server, "ada@example.com").await;

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, 404))
            .authorization_bearer(&token)
            .json(&json!({ "title": "Lunch", "amount": 1 }))
            .await;

        assert_error_message(&response, StatusCode::NOT_FOUND, "Expense not found");
    }

    #[tokio::test]
    async fn edit_validates_body() {
        let (server, _) = must_create_test_server();
        let token = must_register(&server, "ada@example.com").await;
        let expense = create_expense(&server, &token).await;

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, expense.id))
            .authorization_bearer(&token)
            .json(&json!({ "title": "Lunch" }))
            .await;

        assert_error_message(&response, StatusCode::BAD_REQUEST, "Please provide an amount");
    }

    #[tokio::test]
    async fn edit_with_non_numeric_id_is_bad_request() {
        let (server, _) = must_create_test_server();
        let token = must_register(&server, "ada@example.com").await;

        let response = server
            .put("/api/expenses/abc")
            .authorization_bearer(&token)
            .json(&json!({ "title": "Lunch", "amount": 1 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["success"], false);
    }
}
