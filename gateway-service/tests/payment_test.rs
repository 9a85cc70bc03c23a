mod common;

use common::TestApp;
use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payment_body() -> serde_json::Value {
    json!({
        "CardNumber": "2222405343248877",
        "ExpiryMonth": 4,
        "ExpiryYear": 2030,
        "Currency": "GBP",
        "Amount": 100,
        "Cvv": "123"
    })
}

fn bank_decision(authorized: bool) -> serde_json::Value {
    json!({
        "Authorized": authorized,
        "Authorization_Code": "0bb07405-6d44-4b50-a14f-7ae0beff13ad"
    })
}

#[tokio::test]
async fn authorized_payment_is_persisted_and_retrievable() {
    let bank = MockServer::start().await;

    // The bank must receive the minimized wire shape, with the expiry
    // composed as zero-padded MM/YYYY.
    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(body_json(json!({
            "Card_Number": "2222405343248877",
            "Expiry_Date": "04/2030",
            "Currency": "GBP",
            "Amount": 100,
            "Cvv": "123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bank_decision(true)))
        .expect(1)
        .mount(&bank)
        .await;

    let app = TestApp::spawn(&bank.uri()).await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/payments", app.address))
        .json(&payment_body())
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let payment: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(payment["Status"], "Authorized");
    assert_eq!(payment["LastFourCardDigits"], "8877");
    assert_eq!(payment["ExpiryMonth"], 4);
    assert_eq!(payment["ExpiryYear"], 2030);
    assert_eq!(payment["Currency"], "GBP");
    assert_eq!(payment["Amount"], 100);

    let id = payment["Id"].as_str().expect("Missing payment id");
    assert_ne!(id, "00000000-0000-0000-0000-000000000000");

    // The full card number must not appear anywhere in the response.
    assert!(!payment.to_string().contains("2222405343248877"));

    let fetched: serde_json::Value = client
        .get(&format!("{}/payments?paymentId={}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(fetched, payment);
}

#[tokio::test]
async fn declined_decision_is_reported_as_declined() {
    let bank = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bank_decision(false)))
        .mount(&bank)
        .await;

    let app = TestApp::spawn(&bank.uri()).await;

    let payment: serde_json::Value = Client::new()
        .post(&format!("{}/payments", app.address))
        .json(&payment_body())
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(payment["Status"], "Declined");
}

#[tokio::test]
async fn bank_error_status_fails_safe_to_a_persisted_rejection() {
    let bank = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&bank)
        .await;

    let app = TestApp::spawn(&bank.uri()).await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/payments", app.address))
        .json(&payment_body())
        .send()
        .await
        .expect("Failed to execute request");

    // An answered-but-unavailable bank is not a processing error: the
    // rejection is persisted for audit with a real identifier.
    assert!(response.status().is_success());

    let payment: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(payment["Status"], "Rejected");

    let id = payment["Id"].as_str().expect("Missing payment id");
    assert_ne!(id, "00000000-0000-0000-0000-000000000000");

    let fetched: serde_json::Value = client
        .get(&format!("{}/payments?paymentId={}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(fetched["Status"], "Rejected");
}

#[tokio::test]
async fn unreachable_bank_is_a_processing_error() {
    // Nothing listens here; the transport call fails outright.
    let app = TestApp::spawn("http://127.0.0.1:1").await;

    let response = Client::new()
        .post(&format!("{}/payments", app.address))
        .json(&payment_body())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn unreadable_bank_response_is_a_processing_error() {
    let bank = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&bank)
        .await;

    let app = TestApp::spawn(&bank.uri()).await;

    let response = Client::new()
        .post(&format!("{}/payments", app.address))
        .json(&payment_body())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn invalid_card_number_is_rejected_before_the_bank_is_called() {
    let bank = MockServer::start().await;

    // Zero expected calls: validation failures never reach the bank.
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bank_decision(true)))
        .expect(0)
        .mount(&bank)
        .await;

    let app = TestApp::spawn(&bank.uri()).await;

    let mut body = payment_body();
    body["CardNumber"] = json!("1234");

    let response = Client::new()
        .post(&format!("{}/payments", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let text = response.text().await.expect("Failed to read body");
    assert!(text.contains("card_number"));
}

#[tokio::test]
async fn expired_card_is_rejected() {
    let bank = MockServer::start().await;
    let app = TestApp::spawn(&bank.uri()).await;

    let mut body = payment_body();
    body["ExpiryYear"] = json!(2020);

    let response = Client::new()
        .post(&format!("{}/payments", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn lowercase_currency_is_accepted() {
    let bank = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bank_decision(true)))
        .mount(&bank)
        .await;

    let app = TestApp::spawn(&bank.uri()).await;

    let mut body = payment_body();
    body["Currency"] = json!("gbp");

    let response = Client::new()
        .post(&format!("{}/payments", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn unknown_payment_id_returns_a_null_body() {
    let bank = MockServer::start().await;
    let app = TestApp::spawn(&bank.uri()).await;

    let response = Client::new()
        .get(&format!(
            "{}/payments?paymentId=4b4fc047-7d3c-4b5e-9a32-bd25b7d0c2a3",
            app.address
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.expect("Failed to read body"), "null");
}
