mod support;

use chrono::{TimeZone, Utc};
use todo_core::GatewayError;
use todo_core::gateway::Method;
use todo_shared::{PageQuery, StatusFilter, TodoCreate};

use support::{recording_gateway, todo};

#[tokio::test]
async fn create_posts_three_wire_fields_and_returns_id() {
    let gateway = recording_gateway();
    gateway.transport().respond(200, "42");

    let id = gateway
        .create(&TodoCreate {
            title: "Buy milk".to_string(),
            description: "Get milk from the store today".to_string(),
            due_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(id, 42);

    let requests = gateway.transport().requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url.as_str(), "http://localhost:5106/api/ToDOList/Create");

    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object["title"], "Buy milk");
    assert_eq!(object["discription"], "Get milk from the store today");
    assert_eq!(object["dueDate"], "2025-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn completed_page_uses_dedicated_endpoint() {
    let gateway = recording_gateway();
    gateway
        .transport()
        .respond(200, r#"{"count":11,"dtos":[]}"#);

    let page = gateway
        .fetch_page(PageQuery::for_page(1, 10, StatusFilter::Completed))
        .await
        .unwrap();
    assert_eq!(page.count, 11);
    assert!(page.items.is_empty());

    let requests = gateway.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(
        requests[0].url.as_str(),
        "http://localhost:5106/api/ToDOList/SelectCompletedAsync?skip=10&take=10"
    );
}

#[tokio::test]
async fn incomplete_and_all_pages_pick_their_endpoints() {
    let gateway = recording_gateway();
    let empty = r#"{"count":0,"dtos":[]}"#;
    gateway.transport().respond(200, empty).respond(200, empty);

    gateway
        .fetch_page(PageQuery::for_page(0, 5, StatusFilter::Incomplete))
        .await
        .unwrap();
    gateway
        .fetch_page(PageQuery::for_page(2, 5, StatusFilter::All))
        .await
        .unwrap();

    let requests = gateway.transport().requests();
    assert_eq!(requests[0].endpoint_name(), "SelectIncompleteAsync");
    assert_eq!(requests[1].endpoint_name(), "GetAll");
    assert_eq!(requests[1].query_value("skip").as_deref(), Some("10"));
    assert_eq!(requests[1].query_value("take").as_deref(), Some("5"));
}

#[tokio::test]
async fn fetch_by_id_reads_wire_record() {
    let gateway = recording_gateway();
    gateway.transport().respond(
        200,
        r#"{"id":7,"title":"Call mom","discription":"Ask about the weekend plans","isCompleted":true,"createdAt":"2025-01-02T08:00:00","dueDate":"2025-01-05T00:00:00Z"}"#,
    );

    let record = gateway.fetch_by_id(7).await.unwrap();
    assert_eq!(record.id, 7);
    assert!(record.is_completed);
    assert_eq!(record.created_at, Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap());

    let requests = gateway.transport().requests();
    assert_eq!(requests[0].url.as_str(), "http://localhost:5106/api/ToDOList/GetById?id=7");
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
    let gateway = recording_gateway();
    gateway.transport().respond(404, "");

    let err = gateway.fetch_by_id(99).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound { id: 99 }));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let gateway = recording_gateway();
    gateway.transport().respond(500, "boom");

    let err = gateway.fetch_all(0, 10).await.unwrap_err();
    match err {
        GatewayError::Server { path, status, body } => {
            assert_eq!(path, "/GetAll");
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_propagates_unchanged() {
    let gateway = recording_gateway();
    gateway
        .transport()
        .fail(GatewayError::network("/Delete", "connection refused"));

    let err = gateway.delete_by_id(3).await.unwrap_err();
    assert!(matches!(err, GatewayError::Network { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn malformed_page_is_a_decode_error() {
    let gateway = recording_gateway();
    gateway.transport().respond(200, "<html>not json</html>");

    let err = gateway.fetch_incomplete(0, 10).await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode { .. }));
}

#[tokio::test]
async fn update_puts_the_full_record() {
    let gateway = recording_gateway();
    let record = todo(5, "Water plants", true);

    gateway.update(&record).await.unwrap();

    let requests = gateway.transport().requests();
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].endpoint_name(), "Update");
    let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["id"], 5);
    assert_eq!(body["isCompleted"], true);
    assert_eq!(body["createdAt"], "2025-01-01T09:00:00.000Z");
    assert_eq!(body["dueDate"], "2025-01-20T00:00:00.000Z");
    assert_eq!(body["discription"], "Water plants before the weekend");
}

#[tokio::test]
async fn delete_sends_id_as_query() {
    let gateway = recording_gateway();

    gateway.delete_by_id(12).await.unwrap();

    let requests = gateway.transport().requests();
    assert_eq!(requests[0].method, Method::Delete);
    assert_eq!(requests[0].url.as_str(), "http://localhost:5106/api/ToDOList/Delete?id=12");
    assert_eq!(requests[0].body, None);
}

#[tokio::test]
async fn due_date_query_uses_data_parameter() {
    let gateway = recording_gateway();
    gateway.transport().respond(200, r#"{"count":0,"items":[]}"#);

    gateway
        .fetch_by_due_date(Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap())
        .await
        .unwrap();

    let requests = gateway.transport().requests();
    assert_eq!(requests[0].endpoint_name(), "SelectByDueDateAsync");
    assert_eq!(
        requests[0].query_value("data").as_deref(),
        Some("2025-01-20T00:00:00.000Z")
    );
}
