//! Shared testing utilities for oncall-sync CLI tests.

use assert_cmd::Command;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness with an isolated working directory and fake Trello/PagerDuty servers.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    pub trello: ServerGuard,
    pub pagerduty: ServerGuard,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root, trello: Server::new(), pagerduty: Server::new() }
    }

    /// Working directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Write a file relative to the working directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write `pagerduty.cfg` and `.token` pointing at the fake servers.
    pub fn write_default_config(&self) {
        self.write(
            "pagerduty.cfg",
            &format!(
                "trelloUserName=ops\ntrelloCardID=card1\npdScheduleName=SRE\n\
                 trelloApiUrl={}\npdApiUrl={}\nhttpTimeoutSecs=5\n",
                self.trello.url(),
                self.pagerduty.url()
            ),
        );
        self.write(".token", "trelloAppKey=app-key\ntrelloToken=app-token\npgtoken=pd-token\n");
    }

    /// Build a command for invoking the compiled binary in the working directory.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("oncall-sync").expect("Failed to locate oncall-sync binary");
        cmd.current_dir(self.work_dir()).env_remove("RUST_LOG");
        cmd
    }

    /// Serve the card and its members, in the given order.
    pub fn mock_card(&mut self, usernames: &[&str]) -> (Mock, Mock) {
        let card = self
            .trello
            .mock("GET", "/cards/card1")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "app-key".into()),
                Matcher::UrlEncoded("token".into(), "app-token".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "card1", "name": "SRE on call"}"#)
            .create();

        let members: Vec<String> = usernames
            .iter()
            .enumerate()
            .map(|(i, name)| format!(r#"{{"id": "m{}", "username": "{}"}}"#, i, name))
            .collect();
        let members = self
            .trello
            .mock("GET", "/cards/card1/members")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", members.join(",")))
            .create();

        (card, members)
    }

    /// Serve the schedule list as `(id, name)` pairs.
    pub fn mock_schedules(&mut self, schedules: &[(&str, &str)]) -> Mock {
        let entries: Vec<String> = schedules
            .iter()
            .map(|(id, name)| format!(r#"{{"id": "{}", "name": "{}"}}"#, id, name))
            .collect();
        self.pagerduty
            .mock("GET", "/schedules")
            .match_query(Matcher::Any)
            .match_header("authorization", "Token token=pd-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"schedules": [{}], "more": false}}"#, entries.join(",")))
            .create()
    }

    /// Serve the on-call list for `schedule_id`.
    pub fn mock_on_calls(&mut self, schedule_id: &str, user_ids: &[&str]) -> Mock {
        let entries: Vec<String> =
            user_ids.iter().map(|id| format!(r#"{{"user": {{"id": "{}"}}}}"#, id)).collect();
        self.pagerduty
            .mock("GET", "/oncalls")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("schedule_ids[]".into(), schedule_id.into()),
                Matcher::UrlEncoded("time_zone".into(), "Europe/Berlin".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"oncalls": [{}]}}"#, entries.join(",")))
            .create()
    }

    /// Serve the user list as `(id, description)` pairs.
    pub fn mock_users(&mut self, users: &[(&str, &str)]) -> Mock {
        let entries: Vec<String> = users
            .iter()
            .map(|(id, description)| {
                format!(
                    r#"{{"id": "{}", "name": "User {}", "description": "{}"}}"#,
                    id, id, description
                )
            })
            .collect();
        self.pagerduty
            .mock("GET", "/users")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"users": [{}], "more": false}}"#, entries.join(",")))
            .create()
    }

    /// Accept an override for `user_id` on `schedule_id`, expected `hits` times.
    pub fn mock_override(&mut self, schedule_id: &str, user_id: &str, hits: usize) -> Mock {
        self.pagerduty
            .mock("POST", format!("/schedules/{}/overrides", schedule_id).as_str())
            .match_body(Matcher::PartialJson(serde_json::json!({
                "override": {"user": {"id": user_id, "type": "user_reference"}}
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"override": {{"id": "O1", "start": "s", "end": "e", "user": {{"id": "{}"}}}}}}"#,
                user_id
            ))
            .expect(hits)
            .create()
    }

    /// Mock that must never be hit: any override creation.
    pub fn forbid_overrides(&mut self) -> Mock {
        self.pagerduty
            .mock("POST", Matcher::Regex(r"^/schedules/.*/overrides$".into()))
            .expect(0)
            .create()
    }
}
