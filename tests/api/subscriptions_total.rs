use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

async fn seed(
    test_app: &TestApp,
    user_id: &Uuid,
    service_name: &str,
    price: i32,
    start_date: &str,
    end_date: Option<&str>,
) {
    test_app
        .create_subscription(json!({
            "service_name": service_name,
            "price": price,
            "user_id": user_id.to_string(),
            "start_date": start_date,
            "end_date": end_date
        }))
        .await;
}

#[tokio::test]
async fn total_counts_subscriptions_overlapping_the_window() {
    let test_app = TestApp::spawn_app().await;

    seed(&test_app, &Uuid::new_v4(), "Netflix", 500, "01-2024", Some("03-2024")).await;

    // Window inside the subscription span
    assert_eq!(test_app.total_for(&[("from", "02-2024"), ("to", "02-2024")]).await, 500);
    // Window partially overlapping the end of the span
    assert_eq!(test_app.total_for(&[("from", "03-2024"), ("to", "05-2024")]).await, 500);
    // Window partially overlapping the start of the span
    assert_eq!(test_app.total_for(&[("from", "11-2023"), ("to", "01-2024")]).await, 500);
    // Window covering the whole span
    assert_eq!(test_app.total_for(&[("from", "01-2023"), ("to", "12-2024")]).await, 500);
    // Window after the span
    assert_eq!(test_app.total_for(&[("from", "04-2024"), ("to", "05-2024")]).await, 0);
    // Window before the span
    assert_eq!(test_app.total_for(&[("from", "01-2023"), ("to", "12-2023")]).await, 0);
}

#[tokio::test]
async fn open_ended_subscription_counts_for_any_later_window() {
    let test_app = TestApp::spawn_app().await;

    seed(&test_app, &Uuid::new_v4(), "Spotify", 169, "01-2023", None).await;

    assert_eq!(test_app.total_for(&[("from", "01-2030"), ("to", "12-2030")]).await, 169);
    assert_eq!(test_app.total_for(&[("from", "01-2022"), ("to", "12-2022")]).await, 0);
}

#[tokio::test]
async fn total_sums_prices_and_honours_filters() {
    let test_app = TestApp::spawn_app().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let alice_id = alice.to_string();

    seed(&test_app, &alice, "Netflix", 500, "01-2024", None).await;
    seed(&test_app, &alice, "Spotify", 200, "01-2024", Some("06-2024")).await;
    seed(&test_app, &bob, "Netflix", 700, "02-2024", None).await;

    let window = [("from", "03-2024"), ("to", "03-2024")];

    assert_eq!(test_app.total_for(&window).await, 1_400);
    assert_eq!(
        test_app
            .total_for(&[window[0], window[1], ("user_id", alice_id.as_str())])
            .await,
        700
    );
    assert_eq!(
        test_app
            .total_for(&[window[0], window[1], ("service_name", "Netflix")])
            .await,
        1_200
    );
    assert_eq!(
        test_app
            .total_for(&[
                window[0],
                window[1],
                ("user_id", alice_id.as_str()),
                ("service_name", "Netflix")
            ])
            .await,
        500
    );
    assert_eq!(
        test_app
            .total_for(&[window[0], window[1], ("service_name", "")])
            .await,
        1_400
    );
}

#[tokio::test]
async fn total_is_zero_when_nothing_matches() {
    let test_app = TestApp::spawn_app().await;

    assert_eq!(test_app.total_for(&[("from", "01-2024"), ("to", "12-2024")]).await, 0);
}

#[tokio::test]
async fn total_returns_400_for_invalid_parameters() {
    let test_app = TestApp::spawn_app().await;

    let test_cases: Vec<(Vec<(&str, &str)>, &str)> = vec![
        (vec![], "missing from and to"),
        (vec![("from", "01-2024")], "missing to"),
        (vec![("to", "01-2024")], "missing from"),
        (vec![("from", ""), ("to", "01-2024")], "empty from"),
        (vec![("from", "2024-01"), ("to", "01-2024")], "malformed from"),
        (vec![("from", "01-2024"), ("to", "1-2024")], "malformed to"),
        (vec![("from", "05-2024"), ("to", "01-2024")], "to before from"),
        (
            vec![("from", "01-2024"), ("to", "05-2024"), ("user_id", "nope")],
            "malformed user_id",
        ),
    ];

    for (query, error_message) in test_cases {
        let response = test_app.get_total(&query).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when query was {}",
            error_message
        );
    }
}
