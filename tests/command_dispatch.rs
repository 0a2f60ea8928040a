/// Integration tests driving the bot through chat lines, as a transport would.
mod common;

use guildquest::bot::console::serve_lines;
use guildquest::bot::reply::Reply;
use guildquest::metrics;
use guildquest::quest::ColorHint;

fn text(reply: Option<Reply>) -> String {
    match reply.expect("expected a reply") {
        Reply::Text(t) => t,
        Reply::Embed(e) => panic!("expected text, got embed {:?}", e.title),
    }
}

#[tokio::test]
async fn add_update_claim_round() {
    let d = common::dispatcher();

    assert_eq!(
        text(d.handle("!gqa cal Boss hunt").await),
        "Added quest \"Boss hunt\" to server \"Calpheon\"."
    );
    assert_eq!(
        text(d.handle("!gqu cal DONE").await),
        "Quest in server \"Calpheon\" updated to \"done\"."
    );
    assert_eq!(
        text(d.handle("!gqu CAL claimed").await),
        "Quest in server \"Calpheon\" has been claimed and removed from the list."
    );
    assert_eq!(
        text(d.handle("!gqu cal claimed").await),
        "No quest found for server \"Calpheon\"."
    );
}

#[tokio::test]
async fn list_renders_embed_with_status_colour() {
    let d = common::dispatcher();
    d.handle("!gqa v1 Escort").await;
    d.handle("!gqa v2 Gather").await;
    d.handle("!gqu v1 done").await;

    let Some(Reply::Embed(embed)) = d.handle("!gql").await else {
        panic!("expected embed");
    };
    assert_eq!(embed.title, "Guild Quest Status");
    assert_eq!(embed.color, ColorHint::Active);
    assert_eq!(embed.fields.len(), 2);
    assert!(embed.fields[0].value.contains("Velia-2"));
    assert!(embed.fields[1].value.contains("`DONE`"));

    let Some(Reply::Embed(single)) = d.handle("!gql v1").await else {
        panic!("expected embed");
    };
    assert_eq!(single.color, ColorHint::Neutral);
    assert_eq!(single.fields.len(), 1);
}

#[tokio::test]
async fn errors_become_text_replies() {
    let d = common::dispatcher();

    let unknown = text(d.handle("!gqa narnia Find the wardrobe").await);
    assert!(unknown.starts_with("Unknown server abbreviation \"narnia\"."));
    assert!(unknown.contains("kama = Kamasylvia"));

    d.handle("!gqa o1 Hunt").await;
    assert_eq!(
        text(d.handle("!gqu o1 finished").await),
        "Invalid status \"finished\". Choose from: ongoing, done, claimed."
    );
    assert_eq!(
        text(d.handle("!gqa o1 Second").await),
        "A quest is already in progress for Odyllita-1. Please complete or remove it first."
    );
    assert_eq!(
        text(d.handle("!gqa o1").await),
        "Usage: !gqa <server> <quest name>"
    );
}

#[tokio::test]
async fn limit_replies_state_the_limit() {
    let d = common::dispatcher();
    for code in common::codes().iter().take(10) {
        d.handle(&format!("!gqa {code} daily")).await;
    }
    assert_eq!(
        text(d.handle("!gqa med one more").await),
        "You have reached the daily quest limit of 10. Try again tomorrow."
    );
}

#[tokio::test]
async fn chatter_gets_no_reply() {
    let d = common::dispatcher();
    assert!(d.handle("good morning guild").await.is_none());
    assert!(d.handle("!dance").await.is_none());
    assert!(d.handle("").await.is_none());
}

#[tokio::test]
async fn help_lists_all_commands() {
    let d = common::dispatcher();
    let Some(Reply::Embed(help)) = d.handle("!help").await else {
        panic!("expected embed");
    };
    assert_eq!(help.title, "Guild Quest Bot Commands");
    let names: Vec<&str> = help.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "!gqa <server> <quest_name>",
            "!gqu <server> <status>",
            "!gql [server]",
            "!help"
        ]
    );
}

#[tokio::test]
async fn dispatcher_counts_commands_and_rejections() {
    let before = metrics::snapshot();
    let d = common::dispatcher();
    d.handle("!gql").await;
    d.handle("!gqu zz done").await;
    let after = metrics::snapshot();
    assert!(after.command("gql") > before.command("gql"));
    assert!(after.command("gqu") > before.command("gqu"));
    assert!(after.rejected > before.rejected);
}

#[tokio::test]
async fn console_serves_lines_in_order() {
    let d = common::dispatcher();
    let input: &[u8] = b"!gqa bal Fishing derby\nnot a command\n!gql bal\n";
    let mut out = Vec::new();
    let replies = serve_lines(&d, input, &mut out).await.unwrap();
    assert_eq!(replies, 2);

    let out = String::from_utf8(out).unwrap();
    let mut blocks = out.split("\n\n");
    assert_eq!(
        blocks.next().unwrap(),
        "Added quest \"Fishing derby\" to server \"Balenos\"."
    );
    let listing = blocks.next().unwrap();
    assert!(listing.starts_with("== Guild Quest Status =="));
    assert!(listing.contains("1/10 quests added today"));
    assert!(listing.contains("**Quest:** Fishing derby"));
}

#[tokio::test]
async fn concurrent_adds_never_exceed_the_limit() {
    let d = std::sync::Arc::new(common::dispatcher());
    let mut tasks = Vec::new();
    for code in common::codes() {
        let d = d.clone();
        tasks.push(tokio::spawn(async move {
            d.handle(&format!("!gqa {code} race")).await
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
    let board = d.board().lock().await;
    assert_eq!(board.store().added_today(), 10);
    assert_eq!(board.store().len(), 10);
}
