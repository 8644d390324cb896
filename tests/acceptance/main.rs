use cucumber::World;
use std::process::ExitStatus;

/// Stub GitHub API shared by the steps of one scenario.
pub struct GitHubStub(pub httpmock::MockServer);

impl std::fmt::Debug for GitHubStub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GitHubStub").field(&self.0.base_url()).finish()
    }
}

#[derive(Debug, Default, World)]
pub struct KanbanWorld {
    pub data_dir: Option<tempfile::TempDir>,
    pub github: Option<GitHubStub>,
    pub captured_output: Vec<u8>,
    pub command_status: Option<ExitStatus>,
}

#[tokio::main]
async fn main() {
    KanbanWorld::run("features").await;
}

mod steps;
