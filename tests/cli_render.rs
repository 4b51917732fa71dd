mod common;

use common::TestEnv;

#[test]
fn test_render_prints_registration_document() {
    let env = TestEnv::new();
    let result = env.run(&[
        "render",
        "--group",
        "lab",
        "--subgroup",
        "east",
        "--token",
        "tok-123",
        "--remote-ip",
        "10.0.0.1",
    ]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(
        result.stdout,
        "Registration:\n    groupName: lab\n    subGroupName: east\n    token: tok-123\n    remoteIP: 10.0.0.1\n    remotePort: 443\n"
    );
}

#[test]
fn test_render_json_wraps_document() {
    let env = TestEnv::new();
    let result = env.run(&[
        "render",
        "--json",
        "--group",
        "lab",
        "--subgroup",
        "east",
        "--token",
        "tok-123",
        "--remote-ip",
        "10.0.0.1",
        "--remote-port",
        "8443",
    ]);

    assert!(result.success, "{}", result.combined_output());
    let events = result.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "rendered");
    assert!(events[0]["document"]
        .as_str()
        .unwrap()
        .contains("remotePort: 8443"));
}

#[test]
fn test_render_rejects_empty_token() {
    let env = TestEnv::new();
    let result = env.run(&[
        "render",
        "--group",
        "lab",
        "--subgroup",
        "east",
        "--token",
        "",
        "--remote-ip",
        "10.0.0.1",
    ]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("invalid registration record"),
        "stderr:\n{}",
        result.stderr
    );
}
