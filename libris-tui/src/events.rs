//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;
use libris_core::{SearchOutcome, SearchTicket};

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Loading change reported by an in-flight search.
    Loading { ticket: SearchTicket, loading: bool },
    /// A search finished, successfully or not.
    Settled {
        ticket: SearchTicket,
        outcome: Box<SearchOutcome>,
    },
}
