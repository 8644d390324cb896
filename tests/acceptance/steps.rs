use crate::{GitHubStub, KanbanWorld};
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use gh_kanban::issue::Issue;
use gh_kanban::issue_store::{IssueStore, SAVED_ISSUES_KEY};
use gh_kanban::kanban::Column;
use gh_kanban::repository::Repository;
use gh_kanban::saved_repos::SAVED_REPOS_KEY;
use gh_kanban::storage::{self, FileStore};
use serde_json::json;
use std::path::PathBuf;

const UNREACHABLE_API: &str = "http://127.0.0.1:9";

fn data_dir(world: &mut KanbanWorld) -> PathBuf {
    world
        .data_dir
        .get_or_insert_with(|| tempfile::tempdir().expect("Failed to create data dir"))
        .path()
        .to_path_buf()
}

async fn github(world: &mut KanbanWorld) -> &httpmock::MockServer {
    if world.github.is_none() {
        world.github = Some(GitHubStub(httpmock::MockServer::start_async().await));
    }
    &world.github.as_ref().expect("GitHub stub not started").0
}

/// Rows of the step table as maps keyed by the header row.
fn table_rows(step: &Step) -> Vec<Vec<(String, String)>> {
    let table = step.table.as_ref().expect("Expected a table");
    let (header, rows) = table.rows.split_first().expect("Expected a header row");
    rows.iter()
        .map(|row| header.iter().cloned().zip(row.iter().cloned()).collect())
        .collect()
}

fn cell<'a>(row: &'a [(String, String)], name: &str) -> &'a str {
    row.iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .unwrap_or_else(|| panic!("Missing column {name}"))
}

fn issue_from_row(row: &[(String, String)]) -> Issue {
    let id: u64 = cell(row, "id").parse().expect("id must be a number");
    Issue {
        id,
        title: cell(row, "title").to_string(),
        number: id,
        comments: 0,
        created_at: "2024-10-01T09:00:00Z".to_string(),
        state: cell(row, "state").to_string(),
    }
}

fn output_text(world: &KanbanWorld) -> String {
    String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8")
}

#[given("an empty board")]
async fn given_empty_board(world: &mut KanbanWorld) {
    data_dir(world);
}

#[given("the board holds the issues:")]
async fn given_board_holds_issues(world: &mut KanbanWorld, step: &Step) {
    let issues: Vec<Issue> = table_rows(step).iter().map(|row| issue_from_row(row)).collect();
    let mut store = FileStore::new(data_dir(world));
    storage::write_list(&mut store, SAVED_ISSUES_KEY, &issues)
        .expect("Failed to write issues for test setup");
}

#[given(regex = r#"^GitHub user "(.*)" owns the repositories:$"#)]
async fn given_user_owns_repositories(world: &mut KanbanWorld, user: String, step: &Step) {
    let repositories: Vec<serde_json::Value> = table_rows(step)
        .iter()
        .map(|row| {
            json!({
                "id": cell(row, "id").parse::<u64>().expect("id must be a number"),
                "name": cell(row, "name"),
                "owner": { "login": user },
                "description": cell(row, "description"),
            })
        })
        .collect();

    let path = format!("/users/{user}/repos");
    github(world)
        .await
        .mock_async(|when, then| {
            when.method("GET").path(path);
            then.status(200).json_body(json!(repositories));
        })
        .await;
}

#[given(regex = r#"^GitHub repository "(.*)/(.*)" has the issues:$"#)]
async fn given_repository_has_issues(
    world: &mut KanbanWorld,
    owner: String,
    repo: String,
    step: &Step,
) {
    let issues: Vec<serde_json::Value> = table_rows(step)
        .iter()
        .map(|row| json!(issue_from_row(row)))
        .collect();

    let path = format!("/repos/{owner}/{repo}/issues");
    github(world)
        .await
        .mock_async(|when, then| {
            when.method("GET").path(path);
            then.status(200).json_body(json!(issues));
        })
        .await;
}

#[when(regex = r"^I run `gh-kanban ?(.*)`$")]
async fn when_run_gh_kanban(world: &mut KanbanWorld, arguments: String) {
    let dir = data_dir(world);
    let api_url = world
        .github
        .as_ref()
        .map_or_else(|| UNREACHABLE_API.to_string(), |stub| stub.0.base_url());

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_gh-kanban"))
        .args(arguments.split_whitespace())
        .env("GH_KANBAN_HOME", &dir)
        .env("GH_KANBAN_API_URL", api_url)
        .env("GH_KANBAN_USERNAME", "inqbarna")
        .output()
        .await
        .expect("Failed to execute gh-kanban");

    world.captured_output = [output.stdout, output.stderr].concat();
    world.command_status = Some(output.status);
}

#[then(regex = r#"^the output should be "(.*)"$"#)]
async fn then_output_should_be(world: &mut KanbanWorld, expected_output: String) {
    let output = output_text(world);
    assert_eq!(
        output.trim_end(),
        expected_output,
        "Expected output '{}', but got:\n---\n{}\n---",
        expected_output,
        output.trim_end()
    );
    assert!(
        world.command_status.is_some_and(|s| s.success()),
        "Command failed with status: {:?}",
        world.command_status
    );
}

#[then("the output should be:")]
async fn then_output_should_be_block(world: &mut KanbanWorld, step: &Step) {
    let expected = step.docstring.as_ref().expect("Expected docstring");
    let output = output_text(world);
    assert_eq!(
        output.trim(),
        expected.trim(),
        "Unexpected output:\n---\n{}\n---",
        output
    );
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_should_contain(world: &mut KanbanWorld, expected: String) {
    let output = output_text(world);
    assert!(
        output.contains(&expected),
        "Expected output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r"^the (\w+) column should hold (.*)$")]
async fn then_column_should_hold(world: &mut KanbanWorld, column: String, expected: String) {
    let column = Column::from_name(&column).expect("Unknown column in feature");
    let store = IssueStore::new(FileStore::new(data_dir(world)));
    let ids: Vec<u64> = store
        .filter_by_state(column.state_value())
        .expect("Failed to read issues")
        .iter()
        .map(|issue| issue.id)
        .collect();

    let expected_ids: Vec<u64> = match expected.as_str() {
        "nothing" => Vec::new(),
        list => list
            .trim_start_matches("issues ")
            .trim_start_matches("issue ")
            .split(',')
            .map(|id| id.trim().parse().expect("Expected issue ids"))
            .collect(),
    };
    assert_eq!(ids, expected_ids, "Unexpected {column} column");
}

#[then(regex = r"^(\d+) repositor(?:y is|ies are) saved$")]
async fn then_repositories_saved(world: &mut KanbanWorld, count: usize) {
    let store = FileStore::new(data_dir(world));
    let saved: Vec<Repository> =
        storage::read_list(&store, SAVED_REPOS_KEY).expect("Failed to read saved repositories");
    assert_eq!(saved.len(), count, "Saved repositories: {saved:?}");
}
