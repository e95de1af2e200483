//! End-to-end studio behavior against a scripted API.

mod common;

use codebridge_application::document::{classes, mounts};
use codebridge_application::studio::KeySource;
use codebridge_application::{Studio, StudioOptions, WorkspaceTab};
use codebridge_core::api::*;
use codebridge_core::catalog;
use codebridge_core::chat::{AssistantFailure, ChatRole};
use codebridge_core::config::AppConfig;
use codebridge_core::demo::{fallback_spec_for, RecordingScriptSink};
use codebridge_core::{CodebridgeError, Concept, Language};
use common::{studio, studio_with, Call, MockApi, StaticSecrets, LONG_CODE};
use std::sync::Arc;
use std::time::Duration;

fn options_with_concept(concept: &str) -> StudioOptions {
    let mut config = AppConfig::default();
    config.defaults.concept = Concept::new(concept);
    StudioOptions {
        config,
        ..StudioOptions::default()
    }
}

// ============================================================================
// Execution
// ============================================================================

const SYNTAX_ERROR_HTML: &str =
    "<div class='error-header'><span class='error-type'>SyntaxError</span>: invalid syntax</div>";

#[tokio::test]
async fn test_syntax_error_is_shown_verbatim_without_success_decoration() {
    let api = MockApi::new();
    *api.execute.lock().unwrap() = Box::new(|_| {
        Ok(ExecuteResponse {
            success: false,
            output: None,
            error: Some(SYNTAX_ERROR_HTML.to_string()),
        })
    });
    let studio = studio(&api);
    studio.set_code("print(");

    let response = studio.execute_code().await.unwrap();
    assert!(!response.success);

    let console = studio.markup(mounts::CONSOLE_OUTPUT).unwrap();
    assert!(console.contains(SYNTAX_ERROR_HTML));
    assert!(!console.contains("class=\"success\""));
    assert!(studio.has_class(mounts::CONSOLE_CONTAINER, classes::EXPANDED));
}

#[tokio::test]
async fn test_execute_refreshes_real_world_and_demo() {
    let api = MockApi::new();
    let studio = studio(&api);
    studio.set_code(LONG_CODE);

    studio.execute_code().await.unwrap();

    assert_eq!(api.real_world_calls(), 1);
    assert_eq!(api.demo_calls(), 1);
    let console = studio.text(mounts::CONSOLE_OUTPUT).unwrap();
    assert!(console.contains("Hello, World!"));
    let real_world = studio.markup(mounts::REAL_WORLD).unwrap();
    assert!(real_world.contains("Remote: for item in range(10):"));
}

#[tokio::test]
async fn test_transport_failure_is_rendered_and_returned() {
    let api = MockApi::new();
    *api.execute.lock().unwrap() = Box::new(|_| Err(CodebridgeError::network("connection refused")));
    let studio = studio(&api);

    let err = studio.execute_code().await.unwrap_err();
    assert!(err.is_network());
    let console = studio.text(mounts::CONSOLE_OUTPUT).unwrap();
    assert!(console.contains("connection refused"));
}

// ============================================================================
// Real-world and demo panels
// ============================================================================

#[tokio::test]
async fn test_short_code_with_concept_uses_canned_example_offline() {
    let api = MockApi::new();
    let studio = studio_with(&api, options_with_concept("if-else"));

    studio.update_real_world("def f(x): return x").await.unwrap();

    let markup = studio.markup(mounts::REAL_WORLD).unwrap();
    assert!(markup.contains("User Authentication System"));
    assert_eq!(api.real_world_calls(), 0);
}

#[tokio::test]
async fn test_identical_updates_produce_identical_markup() {
    let api = MockApi::new();
    let studio = studio(&api);

    studio.update_real_world(LONG_CODE).await.unwrap();
    let first = studio.markup(mounts::REAL_WORLD);
    studio.update_real_world(LONG_CODE).await.unwrap();
    let second = studio.markup(mounts::REAL_WORLD);

    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_real_world_response_is_discarded() {
    let api = MockApi::new();
    api.delay("realworld", [Duration::from_millis(500), Duration::ZERO]);
    let studio = studio(&api);

    let slow = {
        let studio = studio.clone();
        tokio::spawn(async move { studio.update_real_world("# first version of the code").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    studio
        .update_real_world("# second version of the code")
        .await
        .unwrap();
    slow.await.unwrap().unwrap();

    let markup = studio.markup(mounts::REAL_WORLD).unwrap();
    assert!(markup.contains("second version"));
    assert!(!markup.contains("first version"));
    assert_eq!(api.real_world_calls(), 2);
}

#[tokio::test]
async fn test_demo_script_goes_to_sink_once_and_is_never_rendered() {
    let api = MockApi::new();
    *api.demo.lock().unwrap() = Box::new(|_| {
        Ok(DemoResponse {
            demo_html: Some("<div id=\"calc\">Calculator</div><script>alert(1)</script>".to_string()),
            ..DemoResponse::default()
        })
    });
    let sink = Arc::new(RecordingScriptSink::new());
    let studio = studio_with(
        &api,
        StudioOptions {
            script_sink: sink.clone(),
            ..StudioOptions::default()
        },
    );

    studio.update_interactive_demo(LONG_CODE).await.unwrap();
    studio.open_gui_demo();

    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].1, vec!["alert(1)".to_string()]);
    for id in [mounts::GUI_DEMO, mounts::INTERACTIVE_DEMO, mounts::DEMO_MODAL] {
        let markup = studio.markup(id).unwrap();
        assert!(markup.contains("Calculator"), "{id}");
        assert!(!markup.contains("<script"), "{id}");
    }
    assert!(studio.is_gui_demo_open());
}

#[tokio::test]
async fn test_unclosed_demo_script_is_quarantined() {
    let api = MockApi::new();
    *api.demo.lock().unwrap() = Box::new(|_| {
        Ok(DemoResponse {
            demo_html: Some("<div>Calc</div><script>alert(1)".to_string()),
            ..DemoResponse::default()
        })
    });
    let sink = Arc::new(RecordingScriptSink::new());
    let studio = studio_with(
        &api,
        StudioOptions {
            script_sink: sink.clone(),
            ..StudioOptions::default()
        },
    );

    studio.update_interactive_demo(LONG_CODE).await.unwrap();

    assert_eq!(sink.batches()[0].1, vec!["alert(1)".to_string()]);
    for id in [mounts::GUI_DEMO, mounts::INTERACTIVE_DEMO] {
        let markup = studio.markup(id).unwrap();
        assert!(markup.contains("Calc"), "{id}");
        assert!(!markup.contains("<script"), "{id}");
        assert!(!markup.contains("alert"), "{id}");
    }
}

#[tokio::test]
async fn test_demo_failure_falls_back_to_local_demo() {
    let api = MockApi::new();
    *api.demo.lock().unwrap() = Box::new(|_| Err(CodebridgeError::network("offline")));
    let studio = studio(&api);

    assert!(studio.update_interactive_demo(LONG_CODE).await.is_err());

    let session = studio.demo_session().unwrap();
    assert_eq!(session.spec().title, fallback_spec_for(LONG_CODE).title);
}

#[tokio::test]
async fn test_if_else_demo_runs_locally() {
    let api = MockApi::new();
    let studio = studio_with(&api, options_with_concept("if-else"));

    studio.update_interactive_demo("x = 1").await.unwrap();
    assert_eq!(api.demo_calls(), 0);
    assert!(studio.demo_session().is_some());
}

// ============================================================================
// Debounce
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_rapid_edits_refresh_once_after_last_edit() {
    let api = MockApi::new();
    let studio = studio(&api);
    studio.set_code(LONG_CODE);

    let first = studio.on_code_input();
    tokio::time::sleep(Duration::from_millis(300)).await;
    let last = studio.on_code_input();

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(api.real_world_calls(), 0);

    assert!(last.await.unwrap());
    assert!(!first.await.unwrap());
    assert_eq!(api.real_world_calls(), 1);
    assert_eq!(api.demo_calls(), 0);
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_short_buffer_never_refreshes() {
    let api = MockApi::new();
    let studio = studio(&api);
    studio.set_code("x = 1");

    assert!(studio.on_code_input().await.unwrap());
    assert_eq!(api.real_world_calls(), 0);
    assert_eq!(api.demo_calls(), 0);
}

// ============================================================================
// Concepts
// ============================================================================

#[tokio::test]
async fn test_select_concept_loads_catalog_example() {
    let api = MockApi::new();
    let studio = studio(&api);

    studio.select_concept(Concept::new("loops")).await.unwrap();

    assert_eq!(
        studio.current_code(),
        catalog::concept_example("loops", Language::Python)
    );
    assert_eq!(api.count(|call| matches!(call, Call::Concept(_))), 0);
}

#[tokio::test]
async fn test_select_unknown_concept_asks_server_for_example() {
    let api = MockApi::new();
    let studio = studio(&api);

    studio.select_concept(Concept::new("generators")).await.unwrap();

    assert_eq!(studio.current_code(), "print('from the server')");
    assert_eq!(api.count(|call| matches!(call, Call::Concept(_))), 1);
}

#[tokio::test]
async fn test_select_unknown_concept_prefers_language_examples() {
    let api = MockApi::new();
    *api.examples.lock().unwrap() = Box::new(|_| {
        Ok(ConceptExamples {
            code: "def countdown(n):\n    yield n".to_string(),
            ..ConceptExamples::default()
        })
    });
    let studio = studio(&api);

    studio.select_concept(Concept::new("generators")).await.unwrap();

    assert_eq!(studio.current_code(), "def countdown(n):\n    yield n");
    assert_eq!(api.count(|call| matches!(call, Call::ConceptExamples(_))), 1);
    assert_eq!(api.count(|call| matches!(call, Call::Concept(_))), 0);
}

#[tokio::test]
async fn test_select_language_reloads_concept_example() {
    let api = MockApi::new();
    let studio = studio_with(&api, options_with_concept("loops"));

    studio.select_language(Language::Javascript).await.unwrap();

    assert_eq!(studio.selection().language, Language::Javascript);
    assert_eq!(
        studio.current_code(),
        catalog::concept_example("loops", Language::Javascript)
    );
}

#[tokio::test]
async fn test_concept_popup_error_and_close() {
    let api = MockApi::new();
    *api.concept.lock().unwrap() =
        Box::new(|concept| Err(CodebridgeError::not_found("concept", concept.to_string())));
    let studio = studio(&api);

    assert!(studio.show_concept_popup(&Concept::new("loops")).await.is_err());
    assert!(studio.is_concept_popup_open());

    studio.close_concept_popup();
    assert!(!studio.is_concept_popup_open());
}

// ============================================================================
// Assistant
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_only_one_thinking_indicator_per_question() {
    let api = MockApi::new();
    api.delay("ask", [Duration::from_millis(1000)]);
    let studio = studio(&api);

    let pending = {
        let studio = studio.clone();
        tokio::spawn(async move { studio.ask("What is a loop?").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(studio.is_thinking());

    let err = studio.ask("Another question").await.unwrap_err();
    assert!(matches!(err, CodebridgeError::Busy(_)));

    let reply = pending.await.unwrap().unwrap();
    assert_eq!(reply, "About What is a loop?");
    assert!(!studio.is_thinking());

    let messages = studio.chat_messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, ChatRole::User);
    assert_eq!(messages[2].role, ChatRole::Assistant);
}

#[tokio::test(start_paused = true)]
async fn test_aborted_question_leaves_no_indicator() {
    let api = MockApi::new();
    api.delay("ask", [Duration::from_millis(1000)]);
    let studio = studio(&api);

    let pending = {
        let studio = studio.clone();
        tokio::spawn(async move { studio.ask("What is a loop?").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(studio.markup(mounts::CHAT).unwrap().contains("thinking-indicator"));

    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());

    assert!(!studio.is_thinking());
    assert!(!studio.markup(mounts::CHAT).unwrap().contains("thinking-indicator"));
    assert!(studio.ask("Still there?").await.is_ok());
}

#[tokio::test]
async fn test_quota_failure_becomes_assistant_reply() {
    let api = MockApi::new();
    *api.ask.lock().unwrap() = Box::new(|_| {
        Err(CodebridgeError::Application {
            message: "You exceeded your current quota".to_string(),
            fallback: None,
        })
    });
    let studio = studio(&api);

    let reply = studio.ask("Why?").await.unwrap();

    assert_eq!(reply, AssistantFailure::Quota.reply(None));
    assert!(!studio.is_thinking());
    assert_eq!(studio.chat_messages().last().unwrap().content, reply);
}

#[tokio::test]
async fn test_blank_question_is_rejected_without_request() {
    let api = MockApi::new();
    let studio = studio(&api);

    assert!(studio.ask("   ").await.unwrap_err().is_application());
    assert_eq!(api.count(|call| matches!(call, Call::Ask(_))), 0);
    assert_eq!(studio.chat_messages().len(), 1);
}

// ============================================================================
// Complexity and practice
// ============================================================================

#[tokio::test]
async fn test_analyze_complexity_renders_report() {
    let api = MockApi::new();
    let studio = studio(&api);

    let report = studio.analyze_complexity().await.unwrap();

    assert_eq!(report.score(), 3);
    assert_eq!(studio.complexity_report(), Some(report));
    let text = studio.text(mounts::COMPLEXITY).unwrap();
    assert!(text.contains("Simple and readable"));
}

#[tokio::test]
async fn test_analyze_empty_code_is_rejected_locally() {
    let api = MockApi::new();
    let studio = studio(&api);
    studio.set_code("   ");

    assert!(studio.analyze_complexity().await.is_err());
    assert_eq!(api.count(|call| matches!(call, Call::Complexity(_))), 0);
}

#[tokio::test]
async fn test_practice_tab_loads_and_grades_solution() {
    let api = MockApi::new();
    *api.practice.lock().unwrap() = Box::new(|_| {
        Ok(PracticeSet {
            problems: vec![PracticeProblem {
                title: "Add two numbers".to_string(),
                description: "Print the sum of 3 and 5".to_string(),
                difficulty: "Easy".to_string(),
                hints: vec!["Use +".to_string()],
                starter_code: "# Should output 8\n".to_string(),
            }],
        })
    });
    *api.execute.lock().unwrap() = Box::new(|request| {
        Ok(ExecuteResponse {
            success: true,
            output: Some(if request.code.contains("3 + 5") { "8\n" } else { "0\n" }.to_string()),
            error: None,
        })
    });
    let studio = studio(&api);

    studio
        .activate_tab(WorkspaceTab::PracticeProblems)
        .await
        .unwrap();
    assert!(studio.has_class(mounts::PRACTICE_TAB, classes::ACTIVE));
    assert!(!studio.has_class(mounts::EDITOR, classes::ACTIVE));
    assert_eq!(studio.practice_problems().len(), 1);

    let problem = studio.open_practice_problem(0).unwrap();
    assert_eq!(studio.practice_code(), problem.starter_code);

    assert!(!studio.run_practice_solution("print(3 - 5)").await.unwrap());
    assert!(studio.run_practice_solution("print(3 + 5)").await.unwrap());

    studio.reset_practice();
    assert_eq!(studio.practice_code(), "# Write your solution here");
}

#[tokio::test]
async fn test_open_missing_practice_problem() {
    let api = MockApi::new();
    let studio = studio(&api);
    assert!(studio.open_practice_problem(3).unwrap_err().is_not_found());
}

// ============================================================================
// Account and status
// ============================================================================

#[tokio::test]
async fn test_logged_in_user_gets_logout_link() {
    let api = MockApi::new();
    *api.user.lock().unwrap() = Box::new(|_| {
        Ok(Some(UserInfo {
            id: "1".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            is_authenticated: true,
        }))
    });
    let studio = studio(&api);

    let user = studio.check_auth_status().await.unwrap();
    assert_eq!(user.username, "ada");
    let text = studio.text(mounts::AUTH).unwrap();
    assert!(text.contains("ada"));
}

#[tokio::test]
async fn test_auth_failure_shows_login() {
    let api = MockApi::new();
    *api.user.lock().unwrap() = Box::new(|_| Err(CodebridgeError::network("offline")));
    let studio = studio(&api);

    assert!(studio.check_auth_status().await.is_none());
    assert!(studio.markup(mounts::AUTH).unwrap().contains("Sign In"));
}

#[tokio::test]
async fn test_status_falls_back_to_client_key() {
    let api = MockApi::new();
    *api.status.lock().unwrap() = Box::new(|request| {
        Ok(match &request.api_key {
            Some(_) => StatusResponse {
                status: "ok".to_string(),
                message: String::new(),
            },
            None => StatusResponse {
                status: "error".to_string(),
                message: "Server key missing".to_string(),
            },
        })
    });
    let studio = studio_with(
        &api,
        StudioOptions {
            secrets: Some(Arc::new(StaticSecrets(Some("sk-test".to_string())))),
            ..StudioOptions::default()
        },
    );

    let availability = studio.check_api_status().await;

    assert!(availability.available);
    assert_eq!(availability.source, Some(KeySource::Client));
    assert_eq!(api.count(|call| matches!(call, Call::Status(_))), 2);
}

#[tokio::test]
async fn test_status_without_any_key_is_unavailable() {
    let api = MockApi::new();
    *api.status.lock().unwrap() = Box::new(|_| {
        Ok(StatusResponse {
            status: "error".to_string(),
            message: "Server key missing".to_string(),
        })
    });
    let studio = studio(&api);

    let availability = studio.check_api_status().await;

    assert!(!availability.available);
    assert_eq!(availability.details.as_deref(), Some("Server key missing"));
    assert_eq!(api.count(|call| matches!(call, Call::Status(_))), 1);
}

#[tokio::test]
async fn test_initial_load_checks_auth_and_status() {
    let api = MockApi::new();
    let studio = Studio::new(api.clone(), StudioOptions::default());

    studio.load_initial_content().await.unwrap();

    assert_eq!(api.count(|call| matches!(call, Call::CurrentUser)), 1);
    assert_eq!(api.count(|call| matches!(call, Call::Status(_))), 1);
    assert!(studio.has_class(mounts::EDITOR, classes::ACTIVE));
    assert!(studio.current_code().contains("greeting"));
}

#[tokio::test]
async fn test_insert_authentication_example_into_editor() {
    let api = MockApi::new();
    let studio = studio(&api);

    assert!(studio.insert_authentication_example());
    assert!(studio
        .current_code()
        .contains(catalog::authentication_example(Language::Python).unwrap()));
}
