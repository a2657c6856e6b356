//! Command handlers. Each one receives the context explicitly and writes to `out`.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context as _, Result, anyhow};
use postdeck_core::PostContext;
use postdeck_core::domain::{CommentDraft, Post, PostDraft, PostError, PostId, PostKey};
use postdeck_core::ports::{KeyValueStore, PostsApi};
use serde::Serialize;
use tracing::warn;

use crate::cli::{Command, CommentsCommand};
use crate::views;

/// Run one command, then print whatever notice it left behind.
///
/// Remote failures are already shown as an error notice, so they end in a
/// failing exit code instead of a second error report.
pub async fn run<A, S, W>(ctx: &mut PostContext<A, S>, command: Command, out: &mut W) -> Result<ExitCode>
where
    A: PostsApi,
    S: KeyValueStore,
    W: Write,
{
    let result = dispatch(ctx, command, out).await;

    ctx.expire_notice();
    if let Some(notice) = ctx.state().notice() {
        writeln!(out, "{}", views::notice(notice))?;
    }

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<PostError>() {
            Some(PostError::Api(_)) if ctx.state().notice().is_some_and(|n| n.is_error()) => {
                Ok(ExitCode::FAILURE)
            }
            _ => Err(e),
        },
    }
}

async fn dispatch<A, S, W>(ctx: &mut PostContext<A, S>, command: Command, out: &mut W) -> Result<()>
where
    A: PostsApi,
    S: KeyValueStore,
    W: Write,
{
    match command {
        Command::List { json } => list(ctx, json, out).await,
        Command::Show { id, json } => show(ctx, id, json, out).await,
        Command::Create { title, body } => {
            let id = ctx.create_post(PostDraft::new(title, body)?);
            writeln!(out, "created post #{id}")?;
            Ok(())
        }
        Command::Edit { id, title, body } => edit(ctx, id, title, body).await,
        Command::Delete { id } => {
            ctx.delete_post(id).await?;
            Ok(())
        }
        Command::Comments { command } => comments(ctx, command, out).await,
        Command::User { id } => {
            let user = ctx.fetch_author(id).await?;
            write!(out, "{}", views::user(&user))?;
            Ok(())
        }
    }
}

/// Community posts are only needed when the id is not one of ours.
async fn resolve<A: PostsApi, S: KeyValueStore>(ctx: &mut PostContext<A, S>, id: PostId) -> Result<Post> {
    if ctx.state().find_local(id).is_none()
        && let Err(e) = ctx.ensure_fetched().await
    {
        warn!(error = %e, "community posts unavailable");
    }
    ctx.find_post(id).ok_or_else(|| anyhow!(PostError::PostNotFound(id)))
}

async fn list<A, S, W>(ctx: &mut PostContext<A, S>, json: bool, out: &mut W) -> Result<()>
where
    A: PostsApi,
    S: KeyValueStore,
    W: Write,
{
    // 取得に失敗してもローカル投稿は表示する（エラーは notice に出る）
    if let Err(e) = ctx.ensure_fetched().await {
        warn!(error = %e, "showing local posts only");
    }
    if json {
        serde_json::to_writer_pretty(&mut *out, &ctx.all_posts())?;
        writeln!(out)?;
    } else {
        write!(out, "{}", views::post_list(ctx.state()))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct DetailJson<'a> {
    post: &'a Post,
    author: Option<&'a postdeck_core::domain::User>,
    comments: &'a [postdeck_core::domain::Comment],
}

async fn show<A, S, W>(ctx: &mut PostContext<A, S>, id: PostId, json: bool, out: &mut W) -> Result<()>
where
    A: PostsApi,
    S: KeyValueStore,
    W: Write,
{
    let post = resolve(ctx, id).await?;
    let author = match post.user_id() {
        Some(user_id) => match ctx.fetch_author(user_id).await {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(%user_id, error = %e, "author unavailable");
                None
            }
        },
        None => None,
    };
    let comments = ctx.load_comments(post.key()).await;

    if json {
        let detail = DetailJson {
            post: &post,
            author: author.as_ref(),
            comments: &comments,
        };
        serde_json::to_writer_pretty(&mut *out, &detail)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", views::post_detail(&post, author.as_ref(), &comments))?;
    }
    Ok(())
}

async fn edit<A: PostsApi, S: KeyValueStore>(
    ctx: &mut PostContext<A, S>,
    id: PostId,
    title: Option<String>,
    body: Option<String>,
) -> Result<()> {
    let post = resolve(ctx, id).await?;
    let draft = PostDraft::new(
        title.as_deref().unwrap_or(post.title()),
        body.as_deref().unwrap_or(post.body()),
    )?;
    ctx.update_post(id, draft).await?;
    Ok(())
}

async fn comments<A, S, W>(ctx: &mut PostContext<A, S>, command: CommentsCommand, out: &mut W) -> Result<()>
where
    A: PostsApi,
    S: KeyValueStore,
    W: Write,
{
    match command {
        CommentsCommand::List { post_id } => {
            let key = resolve(ctx, post_id).await?.key();
            let comments = ctx.load_comments(key).await;
            write!(out, "{}", views::comment_list(&comments))?;
        }
        CommentsCommand::Add {
            post_id,
            name,
            email,
            body,
        } => {
            let key: PostKey = resolve(ctx, post_id).await?.key();
            let comment = ctx.add_comment(key, CommentDraft::new(name, email, body)?)?;
            writeln!(out, "Comment added successfully! (#{})", comment.id)?;
        }
        CommentsCommand::Delete { post_id, comment_id } => {
            let key = resolve(ctx, post_id).await?.key();
            ctx.delete_comment(key, comment_id)
                .await
                .with_context(|| format!("could not delete comment on post #{post_id}"))?;
            writeln!(out, "Comment deleted successfully!")?;
        }
    }
    Ok(())
}
