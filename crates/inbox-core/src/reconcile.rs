//! Two-phase optimistic updates.
//!
//! A locally sent message lives in its conversation with a temporary id
//! and a `Pending` marker, becomes `Sent` once the request succeeds, and
//! disappears in favour of the server's copy when a poll returns it. A
//! failed send removes it again by id. Server data never gets blindly
//! appended to or overwritten by local data: every merge goes by id.

use std::collections::{HashMap, HashSet};

use inbox_types::conversation::Conversation;
use inbox_types::message::{Delivery, Message};

use crate::state::InboxState;

/// Merge the server copy of a conversation with its local counterpart.
///
/// Confirmed messages come from the server, in server order. Each local
/// unconfirmed message is either claimed by a server message that was not
/// known locally before (same role and content) or kept at the end.
pub fn merge_conversation(local: &Conversation, server: Conversation) -> Conversation {
    let mut merged = server;
    if merged.display.is_none() {
        merged.display = local.display.clone();
    }

    let known: HashSet<&str> = local
        .messages
        .iter()
        .filter(|m| m.is_confirmed())
        .map(|m| m.id.as_str())
        .collect();
    let mut claimed: HashSet<String> = HashSet::new();
    let mut carried: Vec<Message> = Vec::new();

    for pending in local.messages.iter().filter(|m| !m.is_confirmed()) {
        // A Pending message can already be on the server when a poll
        // overtakes the send response, so both markers are claimable.
        let confirmation = merged.messages.iter().find(|m| {
            m.role == pending.role
                && m.content == pending.content
                && !known.contains(m.id.as_str())
                && !claimed.contains(&m.id)
        });

        match confirmation {
            Some(m) => {
                claimed.insert(m.id.clone());
            }
            None => carried.push(pending.clone()),
        }
    }

    merged.messages.extend(carried);
    merged
}

/// Replace the conversation list with a poll result.
///
/// Local conversations that the server does not know yet (the placeholder,
/// or anything still holding unconfirmed messages) are kept at the front.
/// The selection follows its id; if it vanished, the first conversation
/// is selected.
pub fn apply_poll(state: &mut InboxState, server: Vec<Conversation>) {
    let local: HashMap<&str, &Conversation> = state
        .conversations
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();

    let server_ids: HashSet<String> = server.iter().map(|c| c.id.clone()).collect();

    let mut next: Vec<Conversation> = state
        .conversations
        .iter()
        .filter(|c| !server_ids.contains(&c.id) && (c.placeholder || c.has_unconfirmed()))
        .cloned()
        .collect();

    next.extend(server.into_iter().map(|conv| match local.get(conv.id.as_str()) {
        Some(existing) => merge_conversation(existing, conv),
        None => conv,
    }));

    let keep_selection = state
        .selected_id
        .as_ref()
        .is_some_and(|id| next.iter().any(|c| &c.id == id));
    if !keep_selection {
        state.selected_id = next.first().map(|c| c.id.clone());
    }

    state.conversations = next;
}

/// Append an optimistic message. Returns false if the conversation is gone.
pub fn append_optimistic(state: &mut InboxState, conversation_id: &str, message: Message) -> bool {
    match state.conversation_mut(conversation_id) {
        Some(conv) => {
            conv.messages.push(message);
            true
        }
        None => false,
    }
}

/// Swap the placeholder for the conversation the server just created,
/// keeping the optimistic messages it holds.
pub fn promote_placeholder(state: &mut InboxState, temp_id: &str, created: Conversation) -> bool {
    let Some(index) = state.conversations.iter().position(|c| c.id == temp_id) else {
        return false;
    };

    let local = state.conversations.remove(index);
    let mut promoted = merge_conversation(&local, created);
    promoted.placeholder = false;
    if promoted.assistant_id.is_none() {
        promoted.assistant_id = local.assistant_id.clone();
    }
    if state.selected_id.as_deref() == Some(temp_id) {
        state.selected_id = Some(promoted.id.clone());
    }
    state.conversations.insert(index, promoted);
    true
}

/// Mark a pending message as accepted by the server.
pub fn mark_sent(state: &mut InboxState, temp_id: &str) -> bool {
    for conv in state.conversations.iter_mut() {
        if let Some(msg) = conv.messages.iter_mut().find(|m| m.id == temp_id) {
            msg.delivery = Delivery::Sent;
            return true;
        }
    }
    false
}

/// Remove an optimistic message after a failed send.
/// Returns the id of the conversation it was removed from.
pub fn revert(state: &mut InboxState, temp_id: &str) -> Option<String> {
    for conv in state.conversations.iter_mut() {
        if let Some(pos) = conv
            .messages
            .iter()
            .position(|m| m.id == temp_id && !m.is_confirmed())
        {
            conv.messages.remove(pos);
            return Some(conv.id.clone());
        }
    }
    None
}
