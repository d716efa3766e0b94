use formfill_html::escape_html;

use crate::{CitedSource, Message, MessageContent, Transcript};

/// Markup for one transcript entry.
pub fn render_message(message: &Message) -> String {
    let body = match &message.content {
        MessageContent::Text(text) | MessageContent::Error(text) => escape_html(text),
        MessageContent::Loading => {
            "<div class=\"loading-spinner\"></div> Searching policies...".to_owned()
        }
        MessageContent::Answer { text, sources } => {
            format!("{}{}", escape_html(text), render_sources(sources))
        }
    };
    format!(
        "<div id=\"{}\" class=\"message message-{} mb-3\">{body}</div>\n",
        message.id,
        message.sender.as_str()
    )
}

/// Markup for the whole transcript, oldest first.
pub fn render_transcript(transcript: &Transcript) -> String {
    transcript.messages().iter().map(render_message).collect()
}

fn render_sources(sources: &[CitedSource]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let mut html = String::from("<div class=\"message-sources\">Sources:<ul>");
    for source in sources {
        html.push_str(&format!("<li>{}</li>", escape_html(&source.key)));
    }
    html.push_str("</ul></div>");
    html
}
