//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the source site and exercise the
//! HTTP fetcher's retry rules and full harvest operations end-to-end.

use overflow_harvest::config::{parse_config, CrawlerConfig, FetchConfig, DEFAULT_USER_AGENT};
use overflow_harvest::crawler::{build_http_client, Fetcher, HttpFetcher, NoDelay, RetryPolicy};
use overflow_harvest::site::Site;
use overflow_harvest::{FetchError, Harvester, UserType};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fetcher with millisecond backoff so retry tests stay fast
fn quick_fetcher(max_retries: u32) -> HttpFetcher {
    let client = build_http_client(&FetchConfig::default()).expect("client builds");
    HttpFetcher::new(
        client,
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
        },
    )
}

fn harvester(server: &MockServer) -> Harvester<HttpFetcher, NoDelay> {
    let crawler = CrawlerConfig {
        resolve_owner_ids: false,
        ..CrawlerConfig::default()
    };
    Harvester::new(
        Site::new(&server.uri()).expect("mock server URL parses"),
        crawler,
        quick_fetcher(2),
        NoDelay,
    )
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions/1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = quick_fetcher(3);
    let url = format!("{}/questions/1", mock_server.uri());
    let err = fetcher.fetch_html(&url).await.unwrap_err();

    assert!(matches!(err, FetchError::NotFound { .. }));
    assert_eq!(fetcher.retry_count(), 0);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions/2"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = quick_fetcher(3);
    let url = format!("{}/questions/2", mock_server.uri());
    let err = fetcher.fetch_html(&url).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 403, .. }));
    assert_eq!(fetcher.retry_count(), 0);
}

#[tokio::test]
async fn test_server_error_is_retried_then_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(html("<html><body>ok</body></html>"))
        .mount(&mock_server)
        .await;

    let fetcher = quick_fetcher(3);
    let body = fetcher
        .fetch_html(&format!("{}/flaky", mock_server.uri()))
        .await
        .unwrap();

    assert!(body.contains("ok"));
    assert_eq!(fetcher.retry_count(), 1);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let fetcher = quick_fetcher(2);
    let err = fetcher
        .fetch_html(&format!("{}/down", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transient { attempts: 3, .. }));
    assert_eq!(fetcher.retry_count(), 2);
}

const LISTING: &str = r#"<html><body>
    <div class="s-post-summary">
        <div class="s-post-summary--stats">
            <div class="s-post-summary--stats-item" title="Score of 4">
                <span class="s-post-summary--stats-item-number">4</span></div>
            <div class="s-post-summary--stats-item has-answers has-accepted-answer" title="1 answer">
                <span class="s-post-summary--stats-item-number">1</span></div>
        </div>
        <h3 class="s-post-summary--content-title"><a href="/questions/10/borrowing">Borrowing twice</a></h3>
        <a class="post-tag">rust</a>
        <div class="s-user-card">
            <div class="s-user-card--link d-flex gs4"><a href="/users/3/ferris">ferris</a></div>
            <span class="relativetime" title="2024-01-05 12:00:00Z">Jan 5</span>
        </div>
    </div>
</body></html>"#;

const TIMELINE: &str = r#"<html><body><table>
    <tr data-eventtype="edit"><td><span class="relativetime" title="2024-01-06 08:00:00Z">x</span></td></tr>
    <tr data-eventtype="question"><td><span class="relativetime" title="2024-01-05 11:59:00Z">x</span></td></tr>
</table></body></html>"#;

const QUESTION_PAGE: &str = r#"<html><body>
    <h1 class="fs-headline1"><a href="/questions/10/borrowing">Borrowing twice</a></h1>
    <div class="flex--item">Asked <time itemprop="dateCreated" datetime="2024-01-05T11:59:00">x</time></div>
    <div id="question">
        <div class="js-vote-count" data-value="4">4</div>
        <div class="post-menu"><a class="js-license-link">CC BY-SA 4.0</a></div>
    </div>
    <h2 class="mb0" data-answercount="1">1 Answer</h2>
    <div class="answer js-answer accepted-answer" data-answerid="11">
        <div class="js-vote-count">7</div>
        <div class="post-layout--right"><div class="user-info">
            <div class="user-details"><a href="/users/5/crab">crab</a><span class="mod-flair">♦</span></div>
        </div></div>
    </div>
</body></html>"#;

#[tokio::test]
async fn test_list_questions_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions"))
        .and(query_param("tab", "Active"))
        .and(query_param("page", "1"))
        .respond_with(html(LISTING))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/posts/10/timeline"))
        .respond_with(html(TIMELINE))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/questions/10/borrowing"))
        .respond_with(html(QUESTION_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let questions = harvester(&mock_server)
        .list_questions::<&str>(1, 30, &[])
        .await
        .unwrap();

    assert_eq!(questions.len(), 1);
    let q = &questions[0];
    assert_eq!(q.question_id, Some(10));
    assert_eq!(
        q.link.as_deref(),
        Some(format!("{}/questions/10/borrowing", mock_server.uri()).as_str())
    );
    assert_eq!(q.accepted_answer_id, Some(11));
    assert!(q.has_accepted_answer);
    assert!(q.is_answered);
    assert_eq!(q.answer_count, 1);
    assert_eq!(q.creation_date, "2024-01-05T11:59:00Z".parse().ok());
    assert_eq!(q.last_edit_date, "2024-01-06T08:00:00Z".parse().ok());
    assert_eq!(q.last_activity_date, "2024-01-05T12:00:00Z".parse().ok());
    assert_eq!(q.owner.display_name, "ferris");
}

#[tokio::test]
async fn test_answers_end_to_end_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions/10"))
        .respond_with(html(QUESTION_PAGE))
        .mount(&mock_server)
        .await;

    let config = parse_config(&format!(
        r#"
[site]
base-url = "{}"

[crawler]
politeness-delay = 0
resolve-owner-ids = false

[fetch]
max-retries = 0
"#,
        mock_server.uri()
    ))
    .unwrap();
    let harvester = Harvester::from_config(&config).unwrap();

    let thread = harvester.get_answers(10).await.unwrap();
    assert_eq!(thread.question_id, 10);
    assert_eq!(thread.content_license, "CC BY-SA 4.0");
    assert_eq!(thread.answers.len(), 1);
    assert_eq!(thread.answers[0].answer_id, Some(11));
    assert_eq!(thread.answers[0].owner.user_type, UserType::Moderator);

    let question = harvester.get_question(10).await.unwrap();
    assert_eq!(question.title.as_deref(), Some("Borrowing twice"));
    assert_eq!(question.accepted_answer_id, Some(11));
    assert_eq!(question.creation_date, "2024-01-05T11:59:00Z".parse().ok());

    let err = harvester.get_question(99).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_user_agent_sent_on_every_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions/10"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/questions/10"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(html(QUESTION_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let harvester = harvester(&mock_server);
    let question = harvester.get_question(10).await.unwrap();

    assert_eq!(question.title.as_deref(), Some("Borrowing twice"));
    assert_eq!(harvester.fetcher().retry_count(), 1);
}
