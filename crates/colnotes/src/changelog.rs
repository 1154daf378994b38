use crate::client::GitHubClient;
use crate::prelude::*;
use crate::prompt::Prompt;
use crate::status;
use colnotes_core::column::parse_column_id;
use colnotes_core::github::ColumnData;
use colnotes_core::markdown::{transform_column, ChangelogOutput, FormatOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};

const URL_PROMPT: &str = "Enter the GitHub column URL (e.g., https://github.com/orgs/Automattic/projects/148#column-<column-id>):";
const CONFIRM_PROMPT: &str = "Is this the correct column?";
const ABORT_MESSAGE: &str = "Aborting. Please run the script again with the correct column URL.";

/// Options that control one changelog run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Column URL; prompted for when absent
    pub url: Option<String>,
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Print JSON instead of Markdown
    pub json: bool,
    pub format: FormatOptions,
}

/// Helper to set spinner message if spinner is present
fn set_spinner_msg(spinner: Option<&ProgressBar>, msg: impl Into<String>) {
    if let Some(s) = spinner {
        s.set_message(msg.into());
    }
}

/// Resolve the column to convert and have the user confirm it
///
/// An invalid URL ends the run; there is no re-prompt. Declining the
/// confirmation is reported as [`Error::UserAbort`].
pub async fn resolve_column<R: BufRead, W: Write>(
    client: &GitHubClient,
    prompt: &mut Prompt<R, W>,
    url: Option<&str>,
    yes: bool,
) -> Result<(u64, ColumnData), Error> {
    let url = match url {
        Some(url) => url.to_string(),
        None => prompt.ask(URL_PROMPT)?,
    };

    let column_id = parse_column_id(&url)?;
    let column = client.fetch_column_data(column_id).await?;
    status::info(&f!("Column Name: \"{}\"", column.name));

    if !yes && !prompt.confirm(CONFIRM_PROMPT)? {
        return Err(Error::UserAbort(ABORT_MESSAGE.to_string()));
    }

    Ok((column_id, column))
}

/// Fetch the column's cards and turn them into changelog lines
///
/// Linked content is fetched one card at a time, in card order. Any failed
/// request aborts the whole build so no partial document is produced.
pub async fn build_changelog(
    client: &GitHubClient,
    column_id: u64,
    column_name: String,
    options: &FormatOptions,
    spinner: Option<&ProgressBar>,
) -> Result<ChangelogOutput, Error> {
    set_spinner_msg(spinner, f!("Fetching cards for \"{column_name}\"..."));
    let cards = client.fetch_column_cards(column_id).await?;
    log::info!("Fetched {} card(s) from column {column_id}", cards.len());

    let total = cards.len();
    let mut resolved = Vec::with_capacity(total);
    for (index, card) in cards.into_iter().enumerate() {
        let content = match card.pending_content_url() {
            Some(url) => {
                set_spinner_msg(
                    spinner,
                    f!("Fetching linked content ({}/{total})...", index + 1),
                );
                Some(client.fetch_content(url).await?)
            }
            None => None,
        };

        if card.note_text().is_none() && content.is_none() {
            log::debug!("Skipping card {:?} without displayable text", card.id);
        }

        resolved.push((card, content));
    }

    Ok(transform_column(column_id, column_name, resolved, options))
}

/// Run the full flow: resolve, confirm, fetch, format, print
///
/// Prompts go through `prompt`. The final document, or its JSON form, is
/// written to `out` only after every request has succeeded.
pub async fn run<R: BufRead, W: Write, O: Write>(
    client: &GitHubClient,
    options: RunOptions,
    prompt: &mut Prompt<R, W>,
    out: &mut O,
) -> Result<()> {
    let (column_id, column) =
        resolve_column(client, prompt, options.url.as_deref(), options.yes).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("Invalid spinner template: {}", e))?,
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let output = build_changelog(
        client,
        column_id,
        column.name,
        &options.format,
        Some(&spinner),
    )
    .await;

    // Clear the spinner before printing output
    spinner.finish_and_clear();
    let output = output?;

    if options.json {
        let json_output = serde_json::to_string_pretty(&output)
            .map_err(|e| eyre!("Failed to serialize output: {}", e))?;
        writeln!(out, "{}", json_output)?;
        return Ok(());
    }

    if output.lines.is_empty() {
        writeln!(
            out,
            "{}",
            status::warning_line(&f!(
                "Column \"{}\" has no cards with displayable text.",
                output.column_name
            ))
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        status::success_line(&f!(
            "Generated {} changelog entries from \"{}\".",
            output.lines.len(),
            output.column_name
        ))
    )?;
    writeln!(out)?;
    write!(out, "{}", output.to_markdown())?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GitHubConfig;
    use std::io::Cursor;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GitHubClient {
        GitHubClient::new(&GitHubConfig {
            api_base: server.uri(),
            token: "test-token".to_string(),
        })
        .unwrap()
    }

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    async fn mount_column(server: &MockServer, id: u64, name: &str) {
        Mock::given(method("GET"))
            .and(path(f!("/projects/columns/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": id, "name": name})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn resolve_column_from_prompt_and_confirm() {
        let server = MockServer::start().await;
        mount_column(&server, 123, "To Release").await;
        let mut p = prompt("https://github.com/orgs/a/projects/148#column-123\n\n");

        let (id, column) = resolve_column(&client_for(&server), &mut p, None, false)
            .await
            .unwrap();

        assert_eq!(id, 123);
        assert_eq!(column.name, "To Release");
    }

    #[tokio::test]
    async fn resolve_column_declined_aborts() {
        let server = MockServer::start().await;
        mount_column(&server, 7, "Backlog").await;
        let mut p = prompt("no\n");

        let err = resolve_column(
            &client_for(&server),
            &mut p,
            Some("https://github.com/orgs/a/projects/1#column-7"),
            false,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::UserAbort(_)));
        assert_eq!(err.to_string(), ABORT_MESSAGE);
    }

    #[tokio::test]
    async fn resolve_column_yes_skips_confirmation() {
        let server = MockServer::start().await;
        mount_column(&server, 7, "Backlog").await;
        let mut p = prompt("");

        let (id, _) = resolve_column(
            &client_for(&server),
            &mut p,
            Some("https://github.com/orgs/a/projects/1#column-7"),
            true,
        )
        .await
        .unwrap();

        assert_eq!(id, 7);
    }

    #[tokio::test]
    async fn resolve_column_invalid_url_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let mut p = prompt("https://github.com/orgs/a/projects/1\n");

        let err = resolve_column(&client_for(&server), &mut p, None, false)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn build_changelog_resolves_content_in_order() {
        let server = MockServer::start().await;
        let issue_url = f!("{}/repos/org/repo/issues/42", server.uri());
        Mock::given(method("GET"))
            .and(path("/projects/columns/9/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "note": "Fix D1234-code issue"},
                {"id": 2, "note": null, "content_url": issue_url},
                {"id": 3, "note": null},
                {"id": 4, "note": "Line one\nLine two"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/issues/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Fix bug",
                "html_url": "https://github.com/org/repo/issues/42"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let output = build_changelog(
            &client_for(&server),
            9,
            "To Release".to_string(),
            &FormatOptions::default(),
            None,
        )
        .await
        .unwrap();

        assert_eq!(
            output.to_markdown(),
            "- Fix [D1234](https://code.a8c.com/D1234) issue\n\
             - Fix bug [42](https://github.com/org/repo/issues/42})\n\
             - Line one Line two\n"
        );
    }

    #[tokio::test]
    async fn build_changelog_cards_not_found_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/columns/9/cards"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = build_changelog(
            &client_for(&server),
            9,
            "To Release".to_string(),
            &FormatOptions::default(),
            None,
        )
        .await;

        assert!(matches!(result, Err(Error::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn build_changelog_content_failure_yields_no_document() {
        let server = MockServer::start().await;
        let issue_url = f!("{}/repos/org/repo/issues/1", server.uri());
        Mock::given(method("GET"))
            .and(path("/projects/columns/9/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "note": "kept"},
                {"id": 2, "content_url": issue_url}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/org/repo/issues/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = build_changelog(
            &client_for(&server),
            9,
            "x".to_string(),
            &FormatOptions::default(),
            None,
        )
        .await;

        assert!(matches!(result, Err(Error::Api { status: 500, .. })));
    }

    fn run_options(json: bool) -> RunOptions {
        RunOptions {
            url: Some("https://github.com/orgs/a/projects/148#column-9".to_string()),
            yes: true,
            json,
            format: FormatOptions::default(),
        }
    }

    async fn mount_cards(server: &MockServer, cards: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/projects/columns/9/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(cards))
            .mount(server)
            .await;
    }

    async fn run_to_string(server: &MockServer, options: RunOptions) -> (Result<()>, String) {
        let mut p = prompt("");
        let mut out = Vec::new();
        let result = run(&client_for(server), options, &mut p, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn run_writes_json_document() {
        let server = MockServer::start().await;
        mount_column(&server, 9, "To Release").await;
        mount_cards(
            &server,
            serde_json::json!([
                {"id": 1, "note": "Fix D1-code"},
                {"id": 2, "note": null}
            ]),
        )
        .await;

        let (result, out) = run_to_string(&server, run_options(true)).await;

        result.unwrap();
        assert_eq!(
            out,
            "{\n  \"column_id\": 9,\n  \"column_name\": \"To Release\",\n  \"lines\": [\n    \"- Fix [D1](https://code.a8c.com/D1)\"\n  ]\n}\n"
        );
    }

    #[tokio::test]
    async fn run_writes_markdown_document() {
        let server = MockServer::start().await;
        mount_column(&server, 9, "To Release").await;
        mount_cards(
            &server,
            serde_json::json!([{"note": "First"}, {"note": "Second"}]),
        )
        .await;

        let (result, out) = run_to_string(&server, run_options(false)).await;

        result.unwrap();
        assert!(out.contains("SUCCESS: "));
        assert!(out.ends_with("\n\n- First\n- Second\n"));
    }

    #[tokio::test]
    async fn run_cards_not_found_writes_nothing() {
        let server = MockServer::start().await;
        mount_column(&server, 9, "To Release").await;
        Mock::given(method("GET"))
            .and(path("/projects/columns/9/cards"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (result, out) = run_to_string(&server, run_options(false)).await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Api { status: 404, .. })
        ));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn run_empty_column_warns_without_document() {
        let server = MockServer::start().await;
        mount_column(&server, 9, "Empty").await;
        mount_cards(&server, serde_json::json!([{"note": ""}])).await;

        let (result, out) = run_to_string(&server, run_options(false)).await;

        result.unwrap();
        assert!(out.contains("WARNING: "));
        assert!(!out.contains("- "));
    }
}
