//! Command-line interface handling
//!
//! Separates command parsing and dispatch from application startup.
//! Every command maps onto one of the flows or views; nothing here
//! talks to the platform directly.

use std::fs;
use std::path::{Path, PathBuf};

use appwrite_client::{Session, User};
use mime::Mime;
use serde_json::Value;
use tracing::{debug, warn};

use crate::app_state::AppState;
use crate::error::{AppError, Result};
use crate::flows::{submit, PostForm};
use crate::models::{ImageUpload, PostStatus};
use crate::session_store::SessionStore;
use crate::views::feed::{self, BrowseView, HomeView, PostCard};
use crate::views::post::{self, PostDetail, PostView};

const USAGE: &str = "\
vellum - a personal publishing client

Usage: vellum <command> [arguments]

Commands:
  signup <email> <password> <name>   create an account and log in
  login <email> <password>           start a session
  logout                             end the session everywhere
  whoami                             show the logged-in user
  feed                               landing feed of active posts
  browse                             every active post
  show <post-id>                     one post in full
  publish --title <title> --image <path>
          [--content <text> | --content-file <path>] [--status active|inactive]
  edit <post-id> [--title <title>] [--image <path>]
          [--content <text> | --content-file <path>] [--status active|inactive]
  delete <post-id>
";

/// Dispatches one invocation. `args` excludes the binary name.
pub async fn run(state: &AppState, store: &SessionStore, args: Vec<String>) -> Result<()> {
    if let Some(secret) = store.load() {
        state.client.set_session(Some(secret)).await;
        debug!("restored persisted session");
    }

    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        print!("{USAGE}");
        return Ok(());
    };

    match command.as_str() {
        "signup" => {
            let email = positional(&mut args, "signup <email> <password> <name>")?;
            let password = positional(&mut args, "signup <email> <password> <name>")?;
            let name = args.collect::<Vec<_>>().join(" ");
            if name.trim().is_empty() {
                return Err(usage("signup <email> <password> <name>"));
            }
            let session = state.sessions.sign_up(&email, &password, &name).await?;
            persist_session(store, &session);
            println!("signed up and logged in as user {}", session.user_id);
            Ok(())
        }
        "login" => {
            let email = positional(&mut args, "login <email> <password>")?;
            let password = positional(&mut args, "login <email> <password>")?;
            let session = state.sessions.login(&email, &password).await?;
            persist_session(store, &session);
            println!("logged in as user {}", session.user_id);
            Ok(())
        }
        "logout" => {
            let result = state.sessions.logout().await;
            if let Err(e) = store.clear() {
                warn!(error = %e, "persisted session file could not be removed");
            }
            result?;
            println!("logged out");
            Ok(())
        }
        "whoami" => {
            match state.sessions.current_user().await? {
                Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
                None => println!("not logged in"),
            }
            Ok(())
        }
        "feed" => {
            match feed::home(&state.posts, &state.assets).await {
                HomeView::Empty => println!("Login to read posts"),
                HomeView::Posts(cards) => print_cards(&cards),
            }
            Ok(())
        }
        "browse" => {
            match feed::browse(&state.posts, &state.assets).await {
                BrowseView::Empty => println!("No posts yet. Be the first to publish!"),
                BrowseView::Posts(cards) => print_cards(&cards),
                BrowseView::Failed(message) => eprintln!("Error: {message}"),
            }
            Ok(())
        }
        "show" => {
            let post_id = positional(&mut args, "show <post-id>")?;
            handle_show(state, &post_id).await
        }
        "publish" => {
            let parsed = parse_submit_args(args)?;
            handle_publish(state, parsed).await
        }
        "edit" => {
            let post_id = positional(&mut args, "edit <post-id> [flags]")?;
            let parsed = parse_submit_args(args)?;
            handle_edit(state, &post_id, parsed).await
        }
        "delete" => {
            let post_id = positional(&mut args, "delete <post-id>")?;
            handle_delete(state, &post_id).await
        }
        "help" | "--help" | "-h" => {
            print!("{USAGE}");
            Ok(())
        }
        other => {
            eprint!("{USAGE}");
            Err(AppError::Validation(format!("unknown command: {other}")))
        }
    }
}

async fn handle_show(state: &AppState, post_id: &str) -> Result<()> {
    let viewer = state.sessions.current_user().await?;
    match post::load(&state.posts, &state.assets, viewer.as_ref(), post_id).await? {
        PostView::Found(detail) => print_post(&detail),
        PostView::NotFound => println!("post {post_id} not found"),
    }
    Ok(())
}

async fn handle_publish(state: &AppState, parsed: SubmitArgs) -> Result<()> {
    let user = require_user(state).await?;
    let title = parsed
        .title
        .clone()
        .ok_or_else(|| AppError::Validation("--title is required".to_string()))?;
    let image_path = parsed
        .image
        .clone()
        .ok_or_else(|| AppError::Validation("--image is required".to_string()))?;

    let mut form = PostForm::new(&title);
    form.content = resolve_content(&parsed)?;
    form.status = parsed.status;
    form.image = Some(load_image(&image_path)?);

    let post_id = submit(&state.posts, &state.assets, &user, form, None).await?;
    println!("published post {post_id}");
    Ok(())
}

async fn handle_edit(state: &AppState, post_id: &str, parsed: SubmitArgs) -> Result<()> {
    let user = require_user(state).await?;
    let existing = state
        .posts
        .get(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;
    if existing.owner_id != user.id {
        return Err(AppError::Forbidden(
            "only the author can edit this post".to_string(),
        ));
    }

    let mut form = PostForm::for_post(&existing);
    if let Some(title) = &parsed.title {
        form.set_title(title);
    }
    if let Some(content) = resolve_content(&parsed)? {
        form.content = Some(content);
    }
    if let Some(status) = parsed.status {
        form.status = Some(status);
    }
    if let Some(path) = &parsed.image {
        form.image = Some(load_image(path)?);
    }

    let post_id = submit(&state.posts, &state.assets, &user, form, Some(&existing)).await?;
    println!("updated post {post_id}");
    Ok(())
}

async fn handle_delete(state: &AppState, post_id: &str) -> Result<()> {
    let user = require_user(state).await?;
    let Some(existing) = state.posts.get(post_id).await? else {
        println!("post {post_id} is already gone");
        return Ok(());
    };
    if existing.owner_id != user.id {
        return Err(AppError::Forbidden(
            "only the author can delete this post".to_string(),
        ));
    }
    if post::delete(&state.posts, &state.assets, &existing).await? {
        println!("deleted post {post_id}");
    } else {
        println!("post {post_id} is already gone");
    }
    Ok(())
}

async fn require_user(state: &AppState) -> Result<User> {
    state
        .sessions
        .current_user()
        .await?
        .ok_or(AppError::Unauthorized)
}

/// Saves the secret for later invocations. Failure to persist is worth a
/// warning, not a failed command; the current process stays logged in.
fn persist_session(store: &SessionStore, session: &Session) {
    match session.secret.as_deref() {
        Some(secret) if !secret.is_empty() => {
            if let Err(e) = store.save(secret) {
                warn!(error = %e, "session could not be persisted; later commands will run anonymous");
            }
        }
        _ => warn!("no session secret in the login response; later commands will run anonymous"),
    }
}

#[derive(Debug, Default, PartialEq)]
struct SubmitArgs {
    title: Option<String>,
    content: Option<String>,
    content_file: Option<PathBuf>,
    image: Option<PathBuf>,
    status: Option<PostStatus>,
}

fn parse_submit_args(mut args: impl Iterator<Item = String>) -> Result<SubmitArgs> {
    let mut parsed = SubmitArgs::default();
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--title" => parsed.title = Some(flag_value(&mut args, "--title")?),
            "--content" => parsed.content = Some(flag_value(&mut args, "--content")?),
            "--content-file" => {
                parsed.content_file = Some(flag_value(&mut args, "--content-file")?.into())
            }
            "--image" => parsed.image = Some(flag_value(&mut args, "--image")?.into()),
            "--status" => parsed.status = Some(flag_value(&mut args, "--status")?.parse()?),
            other => return Err(AppError::Validation(format!("unknown flag: {other}"))),
        }
    }
    Ok(parsed)
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| AppError::Validation(format!("{flag} needs a value")))
}

fn positional(args: &mut impl Iterator<Item = String>, text: &str) -> Result<String> {
    args.next().ok_or_else(|| usage(text))
}

fn usage(text: &str) -> AppError {
    AppError::Validation(format!("usage: vellum {text}"))
}

fn resolve_content(parsed: &SubmitArgs) -> Result<Option<Value>> {
    match (&parsed.content, &parsed.content_file) {
        (Some(_), Some(_)) => Err(AppError::Validation(
            "--content and --content-file are mutually exclusive".to_string(),
        )),
        (Some(text), None) => Ok(Some(Value::String(text.clone()))),
        (None, Some(path)) => Ok(Some(Value::String(fs::read_to_string(path)?))),
        (None, None) => Ok(None),
    }
}

fn load_image(path: &Path) -> Result<ImageUpload> {
    let content_type = image_type_for(path)?;
    let bytes = fs::read(path)?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(ImageUpload {
        filename,
        content_type,
        bytes,
    })
}

fn image_type_for(path: &Path) -> Result<Mime> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok(mime::IMAGE_PNG),
        "jpg" | "jpeg" => Ok(mime::IMAGE_JPEG),
        "gif" => Ok(mime::IMAGE_GIF),
        _ => Err(AppError::Validation(format!(
            "unsupported image type for {}; png, jpg and gif are accepted",
            path.display()
        ))),
    }
}

fn print_cards(cards: &[PostCard]) {
    for card in cards {
        println!("{}  {}", card.id, card.title);
        let excerpt = display_excerpt(&card.excerpt);
        if !excerpt.is_empty() {
            println!("    {excerpt}");
        }
    }
}

fn print_post(detail: &PostDetail) {
    let post = &detail.post;
    let owner = if detail.is_owner { " (you)" } else { "" };
    println!("{} [{}]", post.title, post.status);
    println!("by {}{}", post.owner_id, owner);
    if let Some(url) = &detail.image_url {
        println!("image: {url}");
    }
    if !post.content.is_empty() {
        println!();
        println!("{}", post.content);
    }
}

/// Feed cards show a single clamped line of content.
fn display_excerpt(content: &str) -> String {
    const EXCERPT_CHARS: usize = 80;
    let line = content.lines().next().unwrap_or_default();
    if line.chars().count() <= EXCERPT_CHARS {
        line.to_string()
    } else {
        let clamped: String = line.chars().take(EXCERPT_CHARS).collect();
        format!("{clamped}...")
    }
}
