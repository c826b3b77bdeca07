use std::collections::{BTreeMap, BTreeSet, HashMap};

use uuid::Uuid;

use crate::models::Message;

/// Global add-ordered sequence plus the indexes derived from it.
///
/// Every message is keyed by a sequence number handed out at insertion time.
/// The conversation index stores sequence numbers rather than positions, so a
/// conversation's messages always come back in global add order and removing
/// from the middle never shifts anything.
#[derive(Debug, Default)]
pub(crate) struct MessageIndex {
    next_seq: u64,
    sequence: BTreeMap<u64, Message>,
    by_id: HashMap<Uuid, u64>,
    by_conversation: HashMap<Uuid, BTreeSet<u64>>,
}

impl MessageIndex {
    /// Rebuild from an ordered list. Later occurrences of an id already seen
    /// are dropped.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let mut index = Self::default();
        for message in messages {
            let id = message.id;
            if !index.insert(message) {
                tracing::warn!(message_id = %id, "Skipping duplicate message id during load");
            }
        }
        index
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.by_id.contains_key(id)
    }

    /// Append to the global sequence and the conversation's sub-sequence.
    /// Returns false, leaving everything untouched, if the id is taken.
    pub fn insert(&mut self, message: Message) -> bool {
        if self.contains(&message.id) {
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.by_id.insert(message.id, seq);
        self.by_conversation
            .entry(message.conversation_id)
            .or_default()
            .insert(seq);
        self.sequence.insert(seq, message);
        true
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<Message> {
        let seq = self.by_id.remove(id)?;
        let message = self.sequence.remove(&seq)?;

        if let Some(seqs) = self.by_conversation.get_mut(&message.conversation_id) {
            seqs.remove(&seq);
            if seqs.is_empty() {
                self.by_conversation.remove(&message.conversation_id);
            }
        }

        Some(message)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Message> {
        self.by_id.get(id).and_then(|seq| self.sequence.get(seq))
    }

    pub fn conversation(&self, conversation_id: &Uuid) -> impl Iterator<Item = &Message> + '_ {
        self.by_conversation
            .get(conversation_id)
            .into_iter()
            .flatten()
            .filter_map(|seq| self.sequence.get(seq))
    }

    pub fn conversation_len(&self, conversation_id: &Uuid) -> usize {
        self.by_conversation
            .get(conversation_id)
            .map_or(0, BTreeSet::len)
    }

    pub fn last(&self) -> Option<&Message> {
        self.sequence.values().next_back()
    }

    pub fn last_in_conversation(&self, conversation_id: &Uuid) -> Option<&Message> {
        self.by_conversation
            .get(conversation_id)?
            .last()
            .and_then(|seq| self.sequence.get(seq))
    }

    pub fn by_author(&self, author_id: Uuid) -> impl Iterator<Item = &Message> + '_ {
        self.sequence
            .values()
            .filter(move |m| m.author_id == author_id)
    }
}
