//! Turn assembly over an ordered message stream
//!
//! Pairing is a two-state reducer. `Idle` has no open turn; `Open` holds a
//! turn whose human message still awaits a reply.
//!
//! | state | message | effect                                   | next |
//! |-------|---------|------------------------------------------|------|
//! | Idle  | human   | open turn n+1                            | Open |
//! | Idle  | ai      | dropped (orphan reply)                   | Idle |
//! | Open  | human   | push open turn unanswered, open turn n+1 | Open |
//! | Open  | ai      | attach reply, push turn                  | Idle |
//! | any   | other   | ignored                                  | same |

use crate::protocol::{Message, MessageRole, Turn};
use serde_json::Value;

/// Reducer state
#[derive(Debug, Clone, PartialEq)]
enum AssemblerState {
    Idle,
    Open(Turn),
}

/// Accumulates turns from messages fed one at a time
#[derive(Debug, Clone)]
pub struct TurnAssembler {
    state: AssemblerState,
    turns: Vec<Turn>,
}

impl Default for TurnAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnAssembler {
    /// Create an assembler in the idle state
    pub fn new() -> Self {
        Self {
            state: AssemblerState::Idle,
            turns: Vec::new(),
        }
    }

    /// Feed the next message
    pub fn push(&mut self, message: Message) {
        let state = std::mem::replace(&mut self.state, AssemblerState::Idle);
        let role = message.role.clone();

        self.state = match (state, role) {
            (AssemblerState::Open(open), MessageRole::Human) => {
                self.turns.push(open);
                AssemblerState::Open(Turn::open(message, self.turns.len() + 1))
            }
            (AssemblerState::Idle, MessageRole::Human) => {
                AssemblerState::Open(Turn::open(message, self.turns.len() + 1))
            }
            (AssemblerState::Open(mut open), MessageRole::Ai) => {
                open.ai = Some(message);
                self.turns.push(open);
                AssemblerState::Idle
            }
            (AssemblerState::Idle, MessageRole::Ai) => AssemblerState::Idle,
            (state, MessageRole::Other(_)) => state,
        };
    }

    /// Whether a human message is waiting for its reply
    pub fn is_open(&self) -> bool {
        matches!(self.state, AssemblerState::Open(_))
    }

    /// Close the stream, flushing a dangling human-only turn
    pub fn finish(mut self) -> Vec<Turn> {
        if let AssemblerState::Open(open) = self.state {
            self.turns.push(open);
        }
        self.turns
    }
}

/// Assemble turns from already-parsed messages
pub fn assemble_messages<I>(messages: I) -> Vec<Turn>
where
    I: IntoIterator<Item = Message>,
{
    let mut assembler = TurnAssembler::new();
    for message in messages {
        assembler.push(message);
    }
    assembler.finish()
}

/// Assemble turns from a raw JSON message array.
///
/// Anything other than an array yields no turns. Elements that are not
/// objects carry no role and are ignored.
pub fn assemble_turns(messages: &Value) -> Vec<Turn> {
    match messages.as_array() {
        Some(items) => assemble_messages(items.iter().map(Message::from_value)),
        None => Vec::new(),
    }
}
