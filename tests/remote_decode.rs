use tickerboard::api::join_url;
use tickerboard::api::remote::{
    parse_chat, parse_daily, parse_glossary, parse_prediction, parse_quote,
};
use tickerboard::error::FetchError;

// --- quote ---

#[test]
fn test_parse_quote_success() {
    let body = r#"{"price": 152.3, "change": 1.8, "change_percent": 1.2, "ts": 1700000000}"#;
    let quote = parse_quote("AAPL", 200, body).unwrap();
    assert_eq!(quote.symbol, "AAPL");
    assert_eq!(quote.price, 152.3);
    assert_eq!(quote.change, 1.8);
    assert_eq!(quote.timestamp.timestamp(), 1_700_000_000);
}

#[test]
fn test_error_field_wins_over_success_status() {
    let err = parse_quote("ZZZZ", 200, r#"{"error": "Unknown symbol"}"#).unwrap_err();
    assert_eq!(err, FetchError::server(Some(200), "Unknown symbol"));
    assert_eq!(err.to_string(), "Unknown symbol");
}

#[test]
fn test_non_string_error_field_is_stringified() {
    let err = parse_quote("X", 500, r#"{"error": {"code": 7}}"#).unwrap_err();
    assert_eq!(err, FetchError::server(Some(500), r#"{"code":7}"#));
}

#[test]
fn test_null_error_field_is_ignored() {
    let body = r#"{"error": null, "price": 1.0, "change": 0.0, "change_percent": 0.0, "ts": 0}"#;
    assert!(parse_quote("X", 200, body).is_ok());
}

#[test]
fn test_non_2xx_without_error_field() {
    let err = parse_quote("X", 503, "Service Unavailable").unwrap_err();
    assert_eq!(err, FetchError::server(Some(503), "503 Service Unavailable"));

    let err = parse_quote("X", 404, "").unwrap_err();
    assert_eq!(err, FetchError::server(Some(404), "404"));
}

#[test]
fn test_non_json_success_is_malformed() {
    let err = parse_quote("X", 200, "<html>").unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[test]
fn test_missing_fields_are_malformed() {
    let err = parse_quote("X", 200, r#"{"price": 1.0}"#).unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

// --- daily ---

#[test]
fn test_parse_daily_success() {
    let body = r#"{"labels": ["2024-01-01", "2024-01-02"], "closes": [10.0, 11.5]}"#;
    let daily = parse_daily("MSFT", 200, body).unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily.last_label(), Some("2024-01-02"));
    assert_eq!(daily.last_close(), Some(11.5));
}

#[test]
fn test_parse_daily_length_mismatch() {
    let body = r#"{"labels": ["2024-01-01"], "closes": [10.0, 11.5]}"#;
    let err = parse_daily("MSFT", 200, body).unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[test]
fn test_parse_daily_empty_is_malformed() {
    let err = parse_daily("MSFT", 200, r#"{"labels": [], "closes": []}"#).unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

// --- prediction ---

#[test]
fn test_parse_prediction_success() {
    let body = r#"{"forecast": [
        {"ds": "2024-02-01", "yhat": 10.0, "yhat_lower": 9.0, "yhat_upper": 11.0},
        {"ds": "2024-02-02", "yhat": 10.5, "yhat_lower": 9.2, "yhat_upper": 11.9}
    ]}"#;
    let forecast = parse_prediction("AAPL", 2, 200, body).unwrap();
    assert_eq!(forecast.horizon, 2);
    assert_eq!(forecast.points[1].label, "2024-02-02");
    assert_eq!(forecast.points[1].upper, 11.9);
}

#[test]
fn test_parse_prediction_wrong_length() {
    let body = r#"{"forecast": [{"ds": "2024-02-01", "yhat": 1.0, "yhat_lower": 0.5, "yhat_upper": 1.5}]}"#;
    let err = parse_prediction("AAPL", 7, 200, body).unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[test]
fn test_parse_prediction_backend_error() {
    let err = parse_prediction("AAPL", 7, 400, r#"{"error": "Not enough data"}"#).unwrap_err();
    assert_eq!(err, FetchError::server(Some(400), "Not enough data"));
}

// --- glossary and chat ---

#[test]
fn test_parse_glossary() {
    let def = parse_glossary(200, r#"{"definition": "Price to earnings."}"#).unwrap();
    assert_eq!(def, "Price to earnings.");
    let err = parse_glossary(404, r#"{"error": "Term not found"}"#).unwrap_err();
    assert_eq!(err.to_string(), "Term not found");
}

#[test]
fn test_parse_chat_with_sentiment() {
    let body = r#"{
        "response": "Markets look calm.",
        "sentiment": {
            "FinBERT Label": "neutral",
            "FinBERT Confidence": 0.8123,
            "FinBERT Scores": {"negative": 0.1, "neutral": 0.8, "positive": 0.1},
            "VADER Compound": 0.25
        }
    }"#;
    let reply = parse_chat(200, body).unwrap();
    assert_eq!(reply.response, "Markets look calm.");
    assert_eq!(reply.sentiment.label.as_deref(), Some("neutral"));
    assert_eq!(
        reply.sentiment.summary(),
        "FinBERT: neutral (Conf: 0.812) [negative: 10.0%, neutral: 80.0%, positive: 10.0%] VADER: 0.250"
    );
}

#[test]
fn test_parse_chat_without_sentiment() {
    let reply = parse_chat(200, r#"{"response": "hi"}"#).unwrap();
    assert_eq!(reply.sentiment.label, None);
    assert_eq!(reply.sentiment.summary(), "FinBERT: n/a (Conf: n/a) [] VADER: n/a");
}

// --- urls ---

#[test]
fn test_join_url_strips_trailing_slashes() {
    assert_eq!(
        join_url("http://127.0.0.1:5000/", "/api/quote"),
        "http://127.0.0.1:5000/api/quote"
    );
    assert_eq!(
        join_url("http://host//", "/api/daily"),
        "http://host/api/daily"
    );
    assert_eq!(join_url("http://host", "/api/chat"), "http://host/api/chat");
}
