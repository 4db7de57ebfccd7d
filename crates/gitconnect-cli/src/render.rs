//! Terminal rendering with `comfy-table`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gitconnect_model::{Comment, Post, Profile, ReactionState, Session};

/// A post plus the comments to show under it.
pub struct FeedRow<'a> {
    pub post: &'a Post,
    pub visible: &'a [Comment],
    pub hidden: usize,
}

pub fn feed_table(rows: &[FeedRow<'_>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Author"),
        header_cell("Posted"),
        header_cell("Post"),
        header_cell("Likes"),
        header_cell("Dislikes"),
        header_cell("Comments"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for row in rows {
        let post = row.post;
        table.add_row(vec![
            dim_cell(&post.id),
            Cell::new(&post.author_name),
            dim_cell(post.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&post.content),
            count_cell(post.like_count, post.reaction_state == ReactionState::Liked),
            count_cell(post.dislike_count, post.reaction_state == ReactionState::Disliked),
            Cell::new(comment_preview(row.visible, row.hidden)),
        ]);
    }
    table
}

pub fn comment_table(comments: &[Comment], hidden: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Author"), header_cell("Comment")]);
    apply_table_style(&mut table);
    if hidden > 0 {
        table.add_row(vec![dim_cell("..."), dim_cell(show_more(hidden))]);
    }
    for comment in comments {
        table.add_row(vec![Cell::new(&comment.author), Cell::new(&comment.content)]);
    }
    table
}

pub fn profile_table(profiles: &[Profile]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("User"),
        header_cell("Name"),
        header_cell("Bio"),
        header_cell("GitHub"),
    ]);
    apply_table_style(&mut table);
    for profile in profiles {
        table.add_row(vec![
            dim_cell(profile.user_id),
            Cell::new(profile.display_name()),
            Cell::new(profile.display_bio()),
            optional_cell(profile.github_link()),
        ]);
    }
    table
}

pub fn profile_details(profile: &Profile) -> String {
    let mut lines = vec![
        format!("Name:   {}", profile.display_name()),
        format!("Bio:    {}", profile.display_bio()),
    ];
    if let Some(github) = profile.github_link() {
        lines.push(format!("GitHub: {github}"));
    }
    if let Some(picture) = profile.picture_path() {
        lines.push(format!("Photo:  {picture}"));
    }
    lines.join("\n")
}

pub fn session_line(session: &Session) -> String {
    match (session.is_authenticated(), session.user_id.as_deref()) {
        (true, Some(id)) => format!("Logged in as {} (user {id})", session.display_name),
        (true, None) => format!("Logged in as {}", session.display_name),
        (false, _) => "Not logged in".to_string(),
    }
}

/// One-cell summary of a post's visible comments.
pub fn comment_preview(visible: &[Comment], hidden: usize) -> String {
    let mut lines: Vec<String> = visible
        .iter()
        .map(|comment| format!("{}: {}", comment.author, comment.content))
        .collect();
    if hidden > 0 {
        lines.insert(0, show_more(hidden));
    }
    lines.join("\n")
}

fn show_more(hidden: usize) -> String {
    match hidden {
        1 => "(1 more comment)".to_string(),
        n => format!("({n} more comments)"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: u64, mine: bool) -> Cell {
    if mine {
        Cell::new(count).fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
