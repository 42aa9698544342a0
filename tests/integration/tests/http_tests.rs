//! End-to-end tests through `HttpExecutor` and the axum test server
//!
//! Run with: cargo test -p integration-tests --test http_tests

use std::time::Duration;

use automod_client::{ModifyAutoModerationRule, AUDIT_LOG_REASON};
use automod_common::{ApiConfig, RuleErrorKind, TransportFailure};
use automod_core::{ExecutorError, Snowflake};
use integration_tests::{keyword_rule, keywords, no_foo_rule, unique_guild, TestServer, BOT_USER_ID};

#[tokio::test]
async fn test_rule_lifecycle_over_http() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let guild = unique_guild();

    assert!(client.list_rules(guild).await.unwrap().is_empty());

    let created = client.create_rule(guild, &no_foo_rule(), None).await.unwrap();
    assert!(created.is_saved());
    assert_eq!(created.creator_id, BOT_USER_ID);

    let fetched = client.get_rule(guild, created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = client
        .modify_rule(
            guild,
            created.id,
            &ModifyAutoModerationRule::new().enabled(false),
        )
        .await
        .unwrap();
    assert!(!updated.enabled);
    assert_eq!(updated.name, "no-foo");

    client.delete_rule(guild, created.id, None).await.unwrap();
    assert!(client.get_rule(guild, created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_wire_body_and_reason_header() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let guild = unique_guild();
    let created = client.create_rule(guild, &no_foo_rule(), None).await.unwrap();

    let request = ModifyAutoModerationRule::new()
        .exempt_roles([])
        .reason("cleanup: ünïcode");
    client.modify_rule(guild, created.id, &request).await.unwrap();

    let received = server.store.last_request().unwrap();
    assert_eq!(
        received.path,
        format!("/guilds/{guild}/auto-moderation/rules/{}", created.id)
    );
    assert_eq!(received.body, Some(serde_json::json!({ "exempt_roles": [] })));
    assert_eq!(
        received.headers.get(AUDIT_LOG_REASON).unwrap(),
        "cleanup%3A%20%C3%BCn%C3%AFcode"
    );
}

#[tokio::test]
async fn test_keyword_limit_over_http() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let guild = unique_guild();

    client
        .create_rule(guild, &keyword_rule("big", keywords(1000)), None)
        .await
        .unwrap();
    let err = client
        .create_rule(guild, &keyword_rule("too-big", keywords(1001)), None)
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(server.store.request_count(), 1);
}

#[tokio::test]
async fn test_status_mapping_over_http() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let guild = unique_guild();

    let err = client
        .delete_rule(guild, Snowflake::new(1), None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    server.store.fail_next(ExecutorError::Forbidden {
        message: "Missing Permissions".into(),
    });
    let err = client.list_rules(guild).await.unwrap_err();
    assert_eq!(
        err.kind,
        RuleErrorKind::Permission {
            message: "Missing Permissions".into()
        }
    );

    server.store.fail_next(ExecutorError::RateLimited {
        retry_after: Duration::from_millis(1500),
        global: true,
    });
    let err = client.list_rules(guild).await.unwrap_err();
    assert_eq!(
        err.kind,
        RuleErrorKind::RateLimited {
            retry_after: Duration::from_millis(1500),
            global: true
        }
    );

    server.store.fail_next(ExecutorError::Status {
        status: 409,
        code: Some(20_000),
        message: "conflict".into(),
    });
    let err = client.list_rules(guild).await.unwrap_err();
    assert_eq!(
        err.kind,
        RuleErrorKind::ConflictOrServer {
            status: 409,
            code: Some(20_000),
            message: "conflict".into()
        }
    );
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");
    let config = ApiConfig::new(server.base_url(), "not-the-token");
    let client = server.client_with_config(&config).unwrap();

    let err = client.list_rules(unique_guild()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(server.store.request_count(), 0);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.store.set_latency(Duration::from_secs(3));

    let mut config = server.api_config();
    config.timeout_secs = 1;
    let client = server.client_with_config(&config).unwrap();

    let err = client.list_rules(unique_guild()).await.unwrap_err();
    assert_eq!(err.kind, RuleErrorKind::Transport(TransportFailure::Timeout));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let server = TestServer::start().await.expect("Failed to start server");
    let config = ApiConfig::new("http://127.0.0.1:1/api/v10", "t");
    let client = server.client_with_config(&config).unwrap();

    let err = client.list_rules(unique_guild()).await.unwrap_err();
    assert!(matches!(
        err.kind,
        RuleErrorKind::Transport(TransportFailure::Network(_))
    ));
}
