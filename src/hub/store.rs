use parking_lot::RwLock;

use crate::board::Board;

/// Holds the single authoritative board snapshot.
///
/// `replace` is an unconditional whole-board overwrite with no validation
/// and no merge. Whichever mutation reaches the hub last wins in
/// full, including columns the sender never touched. Fan-out lives in the
/// hub, never here; the store is a plain data holder.
#[derive(Default)]
pub struct BoardStore {
    board: RwLock<Board>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Board {
        self.board.read().clone()
    }

    /// Overwrite the stored board and return the newly stored value.
    pub fn replace(&self, board: Board) -> Board {
        let mut guard = self.board.write();
        *guard = board;
        guard.clone()
    }
}
