//! Text rendering for each screen. Everything here is pure: state in, `String` out.

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};
use postdeck_core::PostState;
use postdeck_core::domain::{Comment, Notice, NoticeKind, Post, User};

const EXCERPT_CHARS: usize = 150;

pub fn excerpt(body: &str) -> String {
    if body.chars().count() > EXCERPT_CHARS {
        let cut: String = body.chars().take(EXCERPT_CHARS).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}

fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn date_time(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("[ok] {}", notice.message),
        NoticeKind::Error => format!("[error] {}", notice.message),
    }
}

/// `String` への書き込みは失敗しないので、ここで一度だけ結果を捨てる
fn render(body: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    let _ = body(&mut out);
    out
}

pub fn post_list(state: &PostState) -> String {
    render(|out| write_post_list(out, state))
}

fn write_post_list(out: &mut String, state: &PostState) -> fmt::Result {
    let local = state.local_posts();
    let fetched = state.fetched_posts();

    writeln!(out, "All Posts ({})", local.len() + fetched.len())?;

    if !local.is_empty() {
        writeln!(out, "\nYour Posts ({})", local.len())?;
        for post in local {
            writeln!(out, "  #{} {}", post.id, post.title)?;
            writeln!(out, "    {}", excerpt(&post.body))?;
            write!(out, "    Created: {}", date(&post.created_at))?;
            if let Some(updated) = &post.updated_at {
                write!(out, " • Updated: {}", date(updated))?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "\nCommunity Posts ({})", fetched.len())?;
    for post in fetched {
        writeln!(out, "  #{} {}", post.id, post.title)?;
        writeln!(out, "    {}", excerpt(&post.body))?;
        writeln!(out, "    User ID: {}", post.user_id)?;
    }
    Ok(())
}

pub fn post_detail(post: &Post, author: Option<&User>, comments: &[Comment]) -> String {
    render(|out| {
        if post.is_local() {
            writeln!(out, "[Your Post]")?;
        }
        writeln!(out, "{}", post.title())?;
        match post {
            Post::Local(p) => {
                write!(out, "Created: {}", date_time(&p.created_at))?;
                if let Some(updated) = &p.updated_at {
                    write!(out, " • Updated: {}", date_time(updated))?;
                }
                writeln!(out)?;
            }
            Post::Remote(p) => {
                writeln!(out, "User ID: {} • Post ID: {}", p.user_id, p.id)?;
                if let Some(user) = author {
                    writeln!(out, "By {} (@{})", user.name, user.username)?;
                }
            }
        }
        writeln!(out, "\n{}\n", post.body())?;
        write_comment_list(out, comments)
    })
}

pub fn comment_list(comments: &[Comment]) -> String {
    render(|out| write_comment_list(out, comments))
}

fn write_comment_list(out: &mut String, comments: &[Comment]) -> fmt::Result {
    writeln!(out, "Comments ({})", comments.len())?;
    if comments.is_empty() {
        writeln!(out, "  No comments yet. Be the first to comment!")?;
    }
    for comment in comments {
        let badge = if comment.is_user_comment { " [Your Comment]" } else { "" };
        writeln!(out, "  #{} {} <{}>{badge}", comment.id, comment.name, comment.email)?;
        writeln!(out, "    {}", comment.body)?;
        if let Some(at) = &comment.timestamp {
            writeln!(out, "    Posted: {}", date_time(at))?;
        }
    }
    Ok(())
}

pub fn user(user: &User) -> String {
    render(|out| {
        writeln!(out, "{} (@{})", user.name, user.username)?;
        writeln!(out, "  email:   {}", user.email)?;
        if let Some(phone) = &user.phone {
            writeln!(out, "  phone:   {phone}")?;
        }
        if let Some(website) = &user.website {
            writeln!(out, "  website: {website}")?;
        }
        Ok(())
    })
}
