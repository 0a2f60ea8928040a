//! Test utilities & fixtures shared by the integration tests.

use guildquest::bot::{CommandParser, Dispatcher};
use guildquest::quest::registry::default_entries;
use guildquest::quest::{QuestController, QuestPolicy, ServerRegistry};

/// Controller over the 17 default servers with the given policy.
pub fn controller_with(policy: QuestPolicy) -> QuestController {
    let registry = ServerRegistry::new(default_entries()).expect("default registry");
    QuestController::new(registry, policy)
}

pub fn controller() -> QuestController {
    controller_with(QuestPolicy::default())
}

/// Dispatcher with the default `!` prefix over a fresh board.
#[allow(dead_code)] // not every test file drives the dispatcher
pub fn dispatcher() -> Dispatcher {
    Dispatcher::new(CommandParser::default(), controller().into_shared())
}

/// Every default code, in registry order.
#[allow(dead_code)]
pub fn codes() -> Vec<String> {
    default_entries().into_iter().map(|e| e.code).collect()
}
