//! Renders outgoing messages as terminal text.
//!
//! Plain content passes through; embeds become an indented block with a
//! bold `Embed` heading, the title and body tinted with the embed's flair
//! color, and fields listed as `> name: value` lines.

use quill_foundation::OutgoingMessage;

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const RESET: &str = "\x1b[0m";

/// A renderable block: a run of text, or a nested group indented one level
/// deeper than its parent.
enum Block {
    Text(String),
    Group(Vec<Block>),
}

/// Converts an outgoing message to a terminal string.
#[must_use]
pub fn render(message: &OutgoingMessage) -> String {
    let mut blocks = Vec::new();

    if let Some(content) = &message.content {
        blocks.push(Block::Text(content.clone()));
    }

    if let Some(embed) = &message.embed {
        let tint = embed.color.as_deref().and_then(parse_hex_color);

        blocks.push(Block::Text(format!("{BOLD}Embed{RESET}")));

        let mut body = Vec::new();

        if let Some(title) = embed.title.as_ref().and_then(|t| t.content.as_deref()) {
            body.push(Block::Text(format!(
                "{ITALIC}{}{RESET}",
                paint(title, tint)
            )));
        }

        if let Some(content) = &embed.content {
            body.push(Block::Text(paint(content, tint)));
        }

        if !embed.fields.is_empty() {
            body.push(Block::Text(format!(
                "{BOLD}{}{RESET}",
                paint("Fields", tint)
            )));
            body.push(Block::Group(
                embed
                    .fields
                    .iter()
                    .map(|field| {
                        Block::Text(paint(&format!("> {}: {}", field.name, field.value), tint))
                    })
                    .collect(),
            ));
        }

        if let Some(footer) = embed.footer.as_ref().and_then(|f| f.content.as_deref()) {
            body.push(Block::Text(paint(footer, tint)));
        }

        blocks.push(Block::Group(body));
    }

    flatten(&blocks, 0)
}

/// Joins blocks with blank lines, indenting each nesting level two spaces.
fn flatten(blocks: &[Block], indent: usize) -> String {
    let pad = " ".repeat(indent);
    blocks
        .iter()
        .map(|block| match block {
            Block::Text(text) => text
                .lines()
                .map(|line| format!("{pad}{line}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Group(inner) => flatten(inner, indent + 2),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Wraps text in a truecolor escape when a tint is present.
fn paint(text: &str, tint: Option<(u8, u8, u8)>) -> String {
    match tint {
        Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m{text}{RESET}"),
        None => text.to_string(),
    }
}

/// Parses a six-digit hex color, with or without a leading `#`.
fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    // Byte-offset slicing below; reject anything that isn't six ASCII chars.
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
