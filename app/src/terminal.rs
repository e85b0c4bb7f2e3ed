//! Line-oriented front end: parses commands, prints snapshots.

use feed_core::view;
use feed_core::Resource;

use crate::config::PanelMode;
use crate::dashboard::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Refetch(Resource),
    ScrollDown,
    ScrollUp,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r posts | r todos   refetch a panel
  j / k               scroll the posts panel down / up
  show                print both panels
  help                this text
  q                   quit";

pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Input::Show);
    };
    match command {
        "r" | "refetch" => {
            let resource = parts
                .next()
                .ok_or_else(|| "refetch what? (posts|todos)".to_string())?;
            Ok(Input::Refetch(resource.parse()?))
        }
        "j" | "down" => Ok(Input::ScrollDown),
        "k" | "up" => Ok(Input::ScrollUp),
        "show" | "s" => Ok(Input::Show),
        "help" | "h" | "?" => Ok(Input::Help),
        "q" | "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

/// Both panels, each cut to the viewport; posts start at the scroll offset.
pub fn render_screen(snapshot: &Snapshot) -> String {
    let mut out = view::header(Resource::Posts);
    let start = snapshot.scroll_top.min(snapshot.posts.len());
    let end = (start + snapshot.viewport).min(snapshot.posts.len());
    out.extend_from_slice(&snapshot.posts[start..end]);
    if snapshot.mode == PanelMode::Paged {
        out.push(format!(
            "[lines {}-{} of {}, {} page(s)]",
            start + 1,
            end,
            snapshot.posts.len(),
            snapshot.pages
        ));
    }
    out.push(String::new());

    out.extend(view::header(Resource::Todos));
    let end = snapshot.viewport.min(snapshot.todos.len());
    out.extend_from_slice(&snapshot.todos[..end]);
    out.join("\n")
}
