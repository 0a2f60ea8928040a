//! Response payloads and the renderers that build them from controller results.
//!
//! A [`Reply`] is transport-neutral: plain text, or an embed-shaped view with a title,
//! description, color hint and fields. The Discord transport maps embeds onto rich
//! embeds; text-only transports use [`Reply::to_plain_text`].

use crate::quest::{
    ColorHint, ListScope, QuestError, QuestRecord, QuestRow, QuestView, UpdateOutcome,
};

/// Discord rejects embed field values longer than this.
pub const MAX_FIELD_VALUE_BYTES: usize = 1024;

/// Discord limits for a whole embed: total characters and field count.
pub const MAX_EMBED_CHARS: usize = 6000;
pub const MAX_EMBED_FIELDS: usize = 25;

/// Discord rejects plain messages longer than this.
pub const MAX_MESSAGE_BYTES: usize = 2000;

/// Longest quest name echoed back in a reply or a list row.
pub const MAX_ECHO_BYTES: usize = 200;

/// Room kept for the "and N more" field when rows are cut.
const OVERFLOW_RESERVE: usize = 64;

/// Zero-width space; used where the platform requires a field name but none should show.
const BLANK: &str = "\u{200b}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn row(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value: utf8_truncate(&value, MAX_FIELD_VALUE_BYTES),
            inline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedView {
    pub title: String,
    pub description: Option<String>,
    pub color: ColorHint,
    pub fields: Vec<EmbedField>,
}

impl EmbedView {
    /// Characters counted against the embed limit: title, description, field names and values.
    pub fn char_len(&self) -> usize {
        self.title.chars().count()
            + self.description.as_deref().map_or(0, |d| d.chars().count())
            + self.fields.iter().map(EmbedField::char_len).sum::<usize>()
    }
}

impl EmbedField {
    fn char_len(&self) -> usize {
        self.name.chars().count() + self.value.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(EmbedView),
}

impl Reply {
    pub fn to_plain_text(&self) -> String {
        match self {
            Reply::Text(text) => text.clone(),
            Reply::Embed(embed) => {
                let mut out = format!("== {} ==", embed.title);
                if let Some(desc) = &embed.description {
                    out.push('\n');
                    out.push_str(desc);
                }
                for field in &embed.fields {
                    out.push('\n');
                    if field.name != BLANK {
                        out.push_str(&field.name);
                        out.push_str(": ");
                    }
                    out.push_str(&field.value);
                }
                out
            }
        }
    }
}

/// Truncate to at most `max_bytes` without splitting a UTF-8 sequence; appends `…` if cut.
pub fn utf8_truncate(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let ellipsis = '…';
    let mut end = max_bytes.saturating_sub(ellipsis.len_utf8());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = s[..end].to_string();
    out.push(ellipsis);
    out
}

pub fn added(record: &QuestRecord) -> Reply {
    Reply::Text(format!(
        "Added quest \"{}\" to server \"{}\".",
        utf8_truncate(&record.description, MAX_ECHO_BYTES),
        record.server
    ))
}

pub fn updated(outcome: &UpdateOutcome) -> Reply {
    match outcome {
        UpdateOutcome::StatusChanged { record, .. } => Reply::Text(format!(
            "Quest in server \"{}\" updated to \"{}\".",
            record.server, record.status
        )),
        UpdateOutcome::Claimed { record, .. } => Reply::Text(format!(
            "Quest in server \"{}\" has been claimed and removed from the list.",
            record.server
        )),
    }
}

pub fn rejected(err: &QuestError) -> Reply {
    Reply::Text(utf8_truncate(&err.to_string(), MAX_MESSAGE_BYTES))
}

fn row_line(row: &QuestRow) -> String {
    format!(
        "🔹 **Server:** {} | **Quest:** {} | **Status:** `{}`",
        row.server,
        utf8_truncate(&row.description, MAX_ECHO_BYTES),
        row.status.as_str().to_uppercase()
    )
}

pub fn quest_list(view: &QuestView) -> Reply {
    let description = format!(
        "{}/{} quests added today\n{}/{} claimed quests today",
        view.added_today, view.add_limit, view.claimed_today, view.claim_limit
    );
    let fields = if view.is_empty() {
        match view.scope {
            ListScope::Server(_) => vec![EmbedField::row(BLANK, "No quests currently".into())],
            ListScope::All => vec![EmbedField::row(
                "No Quests",
                "There are no active quests currently.".into(),
            )],
        }
    } else {
        Vec::new()
    };
    let mut embed = EmbedView {
        title: "Guild Quest Status".to_string(),
        description: Some(description),
        color: view.hint(),
        fields,
    };

    // Rows past the embed limits are summarised in one trailing field.
    let mut used = embed.char_len();
    for (shown, row) in view.rows.iter().enumerate() {
        let field = EmbedField::row(BLANK, row_line(row));
        let cost = field.char_len();
        if embed.fields.len() + 1 >= MAX_EMBED_FIELDS
            || used + cost + OVERFLOW_RESERVE > MAX_EMBED_CHARS
        {
            embed.fields.push(EmbedField::row(
                BLANK,
                format!("…and {} more", view.rows.len() - shown),
            ));
            break;
        }
        used += cost;
        embed.fields.push(field);
    }
    Reply::Embed(embed)
}

pub fn help(prefix: &str) -> Reply {
    let entries = [
        (
            format!("{prefix}gqa <server> <quest_name>"),
            "Add a quest to the specified server. Only one quest can be added per server.",
        ),
        (
            format!("{prefix}gqu <server> <status>"),
            "Update the status of a quest in the specified server. Statuses can be 'ongoing', 'done', or 'claimed'.",
        ),
        (
            format!("{prefix}gql [server]"),
            "List all quests and their statuses. It is automatically sorted for the ongoing to be always on top.",
        ),
        (format!("{prefix}help"), "Displays this help message."),
    ];
    Reply::Embed(EmbedView {
        title: "Guild Quest Bot Commands".to_string(),
        description: None,
        color: ColorHint::Neutral,
        fields: entries
            .into_iter()
            .map(|(name, value)| EmbedField {
                name,
                value: value.to_string(),
                inline: false,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::QuestStatus;

    fn view(scope: ListScope, rows: Vec<QuestRow>) -> QuestView {
        QuestView {
            scope,
            rows,
            added_today: 2,
            add_limit: 10,
            claimed_today: 1,
            claim_limit: 10,
        }
    }

    #[test]
    fn list_embed_carries_counters_and_rows() {
        let reply = quest_list(&view(
            ListScope::All,
            vec![QuestRow {
                server: "Calpheon".into(),
                description: "Boss hunt".into(),
                status: QuestStatus::Ongoing,
            }],
        ));
        let Reply::Embed(embed) = reply else {
            panic!("expected embed")
        };
        assert_eq!(embed.title, "Guild Quest Status");
        assert_eq!(
            embed.description.as_deref(),
            Some("2/10 quests added today\n1/10 claimed quests today")
        );
        assert_eq!(embed.color, ColorHint::Active);
        assert_eq!(
            embed.fields[0].value,
            "🔹 **Server:** Calpheon | **Quest:** Boss hunt | **Status:** `ONGOING`"
        );
    }

    #[test]
    fn empty_states_differ_by_scope() {
        let Reply::Embed(all) = quest_list(&view(ListScope::All, vec![])) else {
            panic!("expected embed")
        };
        assert_eq!(all.fields[0].name, "No Quests");
        assert_eq!(all.color, ColorHint::Default);

        let Reply::Embed(one) = quest_list(&view(ListScope::Server("Mediah".into()), vec![]))
        else {
            panic!("expected embed")
        };
        assert_eq!(one.fields[0].value, "No quests currently");
    }

    #[test]
    fn help_uses_configured_prefix() {
        let text = help("?").to_plain_text();
        assert!(text.starts_with("== Guild Quest Bot Commands =="));
        assert!(text.contains("?gqa <server> <quest_name>"));
        assert!(text.contains("?help: Displays this help message."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let s = "é".repeat(600); // 1200 bytes
        let out = utf8_truncate(&s, MAX_FIELD_VALUE_BYTES);
        assert!(out.len() <= MAX_FIELD_VALUE_BYTES);
        assert!(out.ends_with('…'));
        assert_eq!(utf8_truncate("short", 10), "short");
    }

    #[test]
    fn plain_text_hides_blank_field_names() {
        let reply = quest_list(&view(ListScope::Server("Mediah".into()), vec![]));
        assert_eq!(
            reply.to_plain_text(),
            "== Guild Quest Status ==\n2/10 quests added today\n1/10 claimed quests today\nNo quests currently"
        );
    }

    fn long_rows(count: usize, name_len: usize) -> Vec<QuestRow> {
        (0..count)
            .map(|i| QuestRow {
                server: format!("Server-{i}"),
                description: "q".repeat(name_len),
                status: QuestStatus::Ongoing,
            })
            .collect()
    }

    #[test]
    fn full_board_of_long_names_fits_one_embed() {
        let Reply::Embed(embed) = quest_list(&view(ListScope::All, long_rows(17, 500))) else {
            panic!("expected embed")
        };
        assert_eq!(embed.fields.len(), 17);
        assert!(embed.char_len() <= MAX_EMBED_CHARS, "{} chars", embed.char_len());
        assert!(embed.fields[0].value.contains('…'));
    }

    #[test]
    fn oversized_board_is_summarised() {
        let rows = long_rows(40, 500);
        let Reply::Embed(embed) = quest_list(&view(ListScope::All, rows)) else {
            panic!("expected embed")
        };
        assert!(embed.char_len() <= MAX_EMBED_CHARS);
        assert!(embed.fields.len() <= MAX_EMBED_FIELDS);

        let last = embed.fields.last().unwrap();
        let hidden: usize = last
            .value
            .trim_start_matches("…and ")
            .trim_end_matches(" more")
            .parse()
            .unwrap();
        assert_eq!(embed.fields.len() - 1 + hidden, 40);
    }

    #[test]
    fn field_count_is_capped() {
        let Reply::Embed(embed) = quest_list(&view(ListScope::All, long_rows(30, 5))) else {
            panic!("expected embed")
        };
        assert_eq!(embed.fields.len(), MAX_EMBED_FIELDS);
        assert_eq!(embed.fields[24].value, "…and 6 more");
    }

    #[test]
    fn echoed_text_stays_within_message_limit() {
        let record = QuestRecord::new("Calpheon", "x".repeat(1990));
        let Reply::Text(text) = added(&record) else {
            panic!("expected text")
        };
        assert!(text.len() <= MAX_MESSAGE_BYTES);
        assert!(text.starts_with("Added quest \"xxx"));
        assert!(text.ends_with("…\" to server \"Calpheon\"."));

        let err = QuestError::UnknownServer {
            code: "z".repeat(3000),
            valid: vec![],
        };
        let Reply::Text(text) = rejected(&err) else {
            panic!("expected text")
        };
        assert!(text.len() <= MAX_MESSAGE_BYTES);
    }
}
