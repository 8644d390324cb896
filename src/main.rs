use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gh_kanban::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let settings =
        gh_kanban::config::Settings::resolve().context("Failed to load configuration")?;
    let fetcher = gh_kanban::github::GitHubApiClient::new(&settings.api_base_url)
        .context("Failed to create HTTP client")?;

    gh_kanban::run::run(args, None, &fetcher, &settings).await
}
