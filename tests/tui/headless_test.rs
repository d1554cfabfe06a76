//! Integration tests for headless mode.

use super::common::Sandbox;

#[test]
fn test_headless_basic_execution() {
    let sandbox = Sandbox::new();
    let (code, stdout, _) = sandbox.run_headless(&["--events", "key:esc"]);

    assert_eq!(code, 0, "Expected exit code 0");
    assert!(stdout.contains("steps: 1, assertions: 0 passed, 0 failed"));
    assert!(stdout.contains("schema: none"));
    assert!(stdout.contains("No Schema Generated Yet"));
    assert!(stdout.contains("Threads (1)"));
}

#[test]
fn test_blog_request_produces_schema() {
    let sandbox = Sandbox::new();
    let (code, json) = sandbox.run_json(
        "type:I want to build a blog platform,key:enter,\
         assert:state:is_generating=true,\
         wait:400ms,\
         assert:state:schema=blog,\
         assert:not-contains:No Schema Generated Yet",
    );

    assert_eq!(code, 0, "{json:#}");
    assert_eq!(json["assertions"]["passed"], 3);
    assert_eq!(json["state"]["message_count"], 3);
    assert_eq!(json["state"]["is_generating"], false);
    assert_eq!(json["state"]["input_text"], "");
    assert_eq!(json["state"]["schema_tab"], "Sql");
    let screen: Vec<&str> = json["screen"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|line| line.as_str())
        .collect();
    assert!(screen.iter().any(|line| line.contains("CREATE TABLE users")));
}

#[test]
fn test_unmatched_request_defaults_to_ecommerce() {
    let sandbox = Sandbox::new();
    let (code, json) = sandbox.run_json("type:something for my garden,key:enter,wait:400ms");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["schema"], "ecommerce");
}

#[test]
fn test_blank_submit_is_ignored() {
    let sandbox = Sandbox::new();
    let (code, json) = sandbox.run_json("type:   ,key:enter,wait:200ms");

    assert_eq!(code, 0);
    assert_eq!(json["state"]["message_count"], 1);
    assert_eq!(json["state"]["is_generating"], false);
    assert_eq!(json["state"]["schema"], serde_json::Value::Null);
}

#[test]
fn test_submit_while_generating_keeps_input() {
    let sandbox = Sandbox::new();
    let (code, json) = sandbox.run_json(
        "type:an online shop,key:enter,type:a blog too,key:enter,\
         assert:state:message_count=2,wait:400ms",
    );

    assert_eq!(code, 0, "{json:#}");
    assert_eq!(json["state"]["input_text"], "a blog too");
    assert_eq!(json["state"]["message_count"], 3);
    assert_eq!(json["state"]["schema"], "ecommerce");
}

#[test]
fn test_new_thread_cancels_generation() {
    let sandbox = Sandbox::new();
    let (code, json) = sandbox.run_json(
        "type:a blog,key:enter,key:ctrl+n,wait:400ms,\
         assert:state:thread_count=2,assert:state:schema=none",
    );

    assert_eq!(code, 0, "{json:#}");
    assert_eq!(json["state"]["message_count"], 1);
    assert_eq!(json["state"]["is_generating"], false);
}

#[test]
fn test_switching_threads_clears_schema() {
    let sandbox = Sandbox::new();
    // New threads go to the top, so the first thread sits one row down
    let (code, json) = sandbox.run_json(
        "type:a blog,key:enter,wait:400ms,assert:state:schema=blog,\
         key:ctrl+n,key:tab,key:tab,assert:state:focus=Sidebar,\
         key:down,key:enter",
    );

    assert_eq!(code, 0, "{json:#}");
    assert_eq!(json["state"]["active_thread"], "a blog");
    assert_eq!(json["state"]["message_count"], 3);
    assert_eq!(json["state"]["schema"], serde_json::Value::Null);
    assert_eq!(json["state"]["threads"][0]["active"], false);
    assert_eq!(json["state"]["threads"][1]["title"], "a blog");
    assert_eq!(json["state"]["threads"][1]["active"], true);
}

#[test]
fn test_wait_for_reply() {
    let sandbox = Sandbox::new();
    let (code, json) = sandbox.run_json(
        "type:an article archive,key:enter,wait:reply,\
         assert:state:is_generating=false,assert:contains:CREATE TABLE posts",
    );

    assert_eq!(code, 0, "{json:#}");
    assert_eq!(json["state"]["schema"], "blog");
    assert_eq!(json["state"]["threads"][0]["messages"], 3);
}

#[test]
fn test_save_schema_writes_file() {
    let sandbox = Sandbox::new();
    let (code, json) =
        sandbox.run_json("type:an online shop,key:enter,wait:400ms,key:tab,key:s");

    assert_eq!(code, 0, "{json:#}");
    assert_eq!(json["state"]["focus"], "Schema");
    let saved = std::fs::read_to_string(sandbox.export_dir().join("schema.sql")).unwrap();
    assert!(saved.contains("CREATE TABLE orders"));
    assert!(json["state"]["toast"].as_str().unwrap().starts_with("Saved"));
}

#[test]
fn test_copy_query_reports_toast() {
    let sandbox = Sandbox::new();
    let (code, json) =
        sandbox.run_json("type:a blog,key:enter,wait:400ms,key:tab,key:3,key:down,key:c");

    assert_eq!(code, 0, "{json:#}");
    assert_eq!(json["state"]["schema_tab"], "Queries");
    assert_eq!(json["state"]["toast"], "Query 2 copied to clipboard");
}

#[test]
fn test_headless_frames_output() {
    let sandbox = Sandbox::new();
    let (code, stdout, _) =
        sandbox.run_headless(&["--events", "type:a,type:b", "--output", "frames"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("--- frame 0: initial ---"));
    assert!(stdout.contains("--- frame 1: type:a ---"));
    assert!(stdout.contains("--- frame 2: type:b ---"));
    assert!(stdout.contains("3 frames"));
}

#[test]
fn test_headless_requires_events_or_script() {
    let sandbox = Sandbox::new();
    let (code, stdout, stderr) = sandbox.run_headless(&[]);

    assert_eq!(code, 1, "Should fail without events or script");
    let combined = format!("{}{}", stdout, stderr);
    assert!(
        combined.contains("requires --events or --script"),
        "Should show error message. Got: {}",
        combined
    );
}

#[test]
fn test_headless_assertion_fail_sets_exit_code() {
    let sandbox = Sandbox::new();
    let (code, json) = sandbox.run_json("type:hello,assert:contains:goodbye");

    assert_eq!(code, 1, "Should exit with code 1 on assertion failure");
    assert_eq!(json["assertions"]["failed"], 1);
    assert_eq!(json["assertions"]["failures"][0], "assert:contains:goodbye");
}

#[test]
fn test_headless_script_file() {
    let sandbox = Sandbox::new();
    let script = sandbox.path().join("scenario.txt");
    std::fs::write(
        &script,
        "# ask for a blog\ntype:a blog about cooking\nkey:enter\nwait:400ms\nassert:contains:CREATE TABLE posts\n",
    )
    .unwrap();

    let (code, stdout, _) = sandbox.run_headless(&["--script", script.to_str().unwrap()]);
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("assertions: 1 passed, 0 failed"));
    assert!(stdout.contains("schema: blog [Sql]"));
}
