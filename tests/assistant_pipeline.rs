use ceo_assistant::assistant::AssistantError;
use ceo_assistant::cli::Args;
use ceo_assistant::data::StaticDataProvider;
use ceo_assistant::llm::LlmError;
use ceo_assistant::models::chat::Role;
use ceo_assistant::models::snapshot::{ EmployeeData, FinancialData, RevenueTrend, TrendPoint };
use ceo_assistant::session::{ FailureMode, Session };
use ceo_assistant::AppContext;
use clap::Parser;
use httpmock::prelude::*;

fn provider() -> StaticDataProvider {
    StaticDataProvider::new(
        FinancialData { revenue: 500.0, expenses: 300.0, profit: 200.0, profit_margin: 40.0 },
        EmployeeData {
            total_employees: 64,
            active_employees: 60,
            attrition_rate: 4.0,
            engagement_score: 80.0,
            avg_tenure: 2.0,
        },
        RevenueTrend(vec![TrendPoint { month: "Jan".into(), revenue: 500.0 }]),
        "Fine."
    )
}

fn context(base_url: &str, lang: &str) -> AppContext {
    let args = Args::try_parse_from([
        "ceo-assistant",
        "--chat-llm-type",
        "openai",
        "--chat-api-key",
        "sk-integration",
        "--chat-base-url",
        base_url,
        "--lang",
        lang,
    ]).unwrap();
    AppContext::from_args(&args).unwrap()
}

#[tokio::test]
async fn profit_margin_question_round_trip() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("Authorization", "Bearer sk-integration")
            .body_includes("profit_margin: 40")
            .body_includes("Respond in English.")
            .body_includes("What is our profit margin?");
        then.status(200).json_body(
            serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Our margin is 40%."}}]
            })
        );
    }).await;

    let ctx = context(&server.base_url(), "English");
    let mut session = Session::new(ctx.default_lang);

    let reply = session
        .submit(&ctx.assistant, &provider(), "What is our profit margin?", FailureMode::Surface).await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "Our margin is 40%.");
    let all = session.conversation().all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].role(), Role::Assistant);
}

#[tokio::test]
async fn unauthorized_call_leaves_question_untouched() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(401).json_body(
            serde_json::json!({ "error": {"message": "Incorrect API key provided"} })
        );
    }).await;

    let ctx = context(&server.base_url(), "Arabic");
    let mut session = Session::new(ctx.default_lang);

    let err = session
        .quick(&ctx.assistant, &provider(), 0).await
        .unwrap_err();

    mock.assert_hits_async(1).await;
    assert!(
        matches!(err, AssistantError::Remote(LlmError::Unauthorized { status: 401, .. })),
        "got {:?}",
        err
    );

    let all = session.conversation().all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].role(), Role::User);
    assert!(all[1].is_error_placeholder());
    assert!(all[1].content().contains("Incorrect API key provided"));
}

#[test]
fn missing_credential_is_fatal_at_startup() {
    let args = Args::try_parse_from([
        "ceo-assistant",
        "--chat-llm-type",
        "openai",
        "--chat-api-key",
        "",
    ]).unwrap();
    let err = AppContext::from_args(&args).err().unwrap();
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}
