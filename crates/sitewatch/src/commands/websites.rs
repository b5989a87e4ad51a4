//! Website listing, registration and deletion.

use serde::Serialize;
use tabled::Tabled;

use sitewatch_core::{DisplayState, RegistrationForm, Website, WebsiteApi, WebsiteId};

use super::{Context, util};
use crate::cli::{AddArgs, GlobalOpts, WebsiteArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

/// Server record plus the state a dashboard would show for it.
#[derive(Serialize)]
pub struct WebsiteEntry<'a> {
    #[serde(flatten)]
    website: &'a Website,
    state: DisplayState,
}

impl<'a> From<&'a Website> for WebsiteEntry<'a> {
    fn from(website: &'a Website) -> Self {
        Self {
            website,
            state: DisplayState::from_website(website),
        }
    }
}

#[derive(Tabled)]
struct WebsiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Last status")]
    last_status: String,
}

fn to_row(e: &WebsiteEntry<'_>) -> WebsiteRow {
    WebsiteRow {
        id: e.website.id.to_string(),
        title: e.website.title.clone().unwrap_or_default(),
        url: e.website.url.clone(),
        state: e.state.to_string(),
        last_status: e
            .website
            .latest_status
            .map(|code| code.to_string())
            .unwrap_or_default(),
    }
}

fn detail(e: &WebsiteEntry<'_>, color: bool) -> String {
    let w = e.website;
    [
        format!("ID:     {}", w.id),
        format!("Title:  {}", w.title.as_deref().unwrap_or("-")),
        format!("URL:    {}", w.url),
        format!("State:  {}", output::paint_state(e.state, color)),
        format!("Status: {}", e.state.description()),
    ]
    .join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let websites = ctx.dashboard.api().list_websites().await?;
    let entries: Vec<WebsiteEntry<'_>> = websites.iter().map(WebsiteEntry::from).collect();

    let out = output::render_list(ctx.output, &entries, to_row, |e| e.website.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn add(ctx: &Context, args: AddArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut form = RegistrationForm {
        url: args.url,
        title: args.title.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
    };
    let submission = form.take_submission()?;

    let monitor = ctx.dashboard.register(&submission).await?;
    output::notice(&format!("Website registered: {}", monitor.id()), global.quiet);

    let entry = WebsiteEntry::from(monitor.website());
    let out = output::render_single(
        ctx.output,
        &entry,
        |e| detail(e, ctx.color),
        |e| e.website.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn delete(ctx: &Context, args: WebsiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let monitor = util::resolve_monitor(ctx, &args.id).await?;
    let label = monitor.website().display_name().to_owned();

    if !util::confirm(
        &format!("Delete website '{label}'? Its check history is lost."),
        "delete",
        global.yes,
    )? {
        return Ok(());
    }

    ctx.dashboard
        .delete_website(&WebsiteId::from(args.id.as_str()))
        .await?;
    output::notice(&format!("Website deleted: {label}"), global.quiet);
    Ok(())
}
