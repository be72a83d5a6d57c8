// TransactionStack - Applied and undone histories for playlist edits

use crate::transaction::trait_def::{Transaction, TransactionResult};
use std::collections::VecDeque;

/// Records reversible edits and replays or reverses them on request
///
/// The stack keeps two histories:
/// - Applied history: transactions that have been applied and can be undone
/// - Undone history: transactions that have been reverted and can be redone
///
/// When a new transaction is executed:
/// 1. Apply it
/// 2. Push it onto the applied history
/// 3. Clear the undone history (the redo trail no longer continues this branch)
///
/// A transaction only moves between histories after its apply/revert call
/// succeeds. On failure the error is returned and the transaction stays
/// where it was.
///
/// # Memory Management
/// By default the applied history is unbounded. With a history limit the
/// oldest applied transaction is dropped once the limit is exceeded.
pub struct TransactionStack {
    /// Transactions that can be undone (most recent at the back)
    applied: VecDeque<Box<dyn Transaction>>,

    /// Transactions that can be redone (most recent at the back)
    undone: VecDeque<Box<dyn Transaction>>,

    /// Maximum number of applied transactions to keep, if any
    history_limit: Option<usize>,
}

impl TransactionStack {
    /// Create an unbounded TransactionStack
    pub fn new() -> Self {
        Self {
            applied: VecDeque::new(),
            undone: VecDeque::new(),
            history_limit: None,
        }
    }

    /// Create a TransactionStack that keeps at most `limit` applied transactions
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            applied: VecDeque::with_capacity(limit),
            undone: VecDeque::with_capacity(limit),
            history_limit: Some(limit),
        }
    }

    /// Apply a transaction and add it to the applied history
    ///
    /// # Errors
    /// Returns the apply error. Neither history is modified in that case.
    pub fn execute(&mut self, transaction: Box<dyn Transaction>) -> TransactionResult<()> {
        if let Err(e) = transaction.apply() {
            log::warn!("Failed to apply \"{}\": {}", transaction.description(), e);
            return Err(e);
        }
        log::debug!("Applied \"{}\"", transaction.description());

        self.applied.push_back(transaction);
        self.undone.clear();

        if let Some(limit) = self.history_limit {
            while self.applied.len() > limit {
                self.applied.pop_front();
            }
        }

        Ok(())
    }

    /// Revert the most recently applied transaction
    ///
    /// Returns the description of the reverted transaction, or `None` when
    /// there was nothing to undo.
    ///
    /// # Errors
    /// Returns the revert error; the transaction stays in the applied history.
    pub fn undo(&mut self) -> TransactionResult<Option<String>> {
        let Some(transaction) = self.applied.pop_back() else {
            return Ok(None);
        };

        let description = transaction.description();
        if let Err(e) = transaction.revert() {
            log::warn!("Failed to undo \"{}\": {}", description, e);
            self.applied.push_back(transaction);
            return Err(e);
        }
        log::debug!("Undid \"{}\"", description);

        self.undone.push_back(transaction);
        Ok(Some(description))
    }

    /// Re-apply the most recently undone transaction
    ///
    /// Returns the description of the re-applied transaction, or `None` when
    /// there was nothing to redo.
    ///
    /// # Errors
    /// Returns the apply error; the transaction stays in the undone history.
    pub fn redo(&mut self) -> TransactionResult<Option<String>> {
        let Some(transaction) = self.undone.pop_back() else {
            return Ok(None);
        };

        let description = transaction.description();
        if let Err(e) = transaction.apply() {
            log::warn!("Failed to redo \"{}\": {}", description, e);
            self.undone.push_back(transaction);
            return Err(e);
        }
        log::debug!("Redid \"{}\"", description);

        self.applied.push_back(transaction);
        Ok(Some(description))
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Description of the transaction that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.applied.back().map(|t| t.description())
    }

    /// Description of the transaction that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.undone.back().map(|t| t.description())
    }

    /// Discard both histories without touching the model
    pub fn clear_all(&mut self) {
        self.applied.clear();
        self.undone.clear();
    }

    /// Number of transactions that can be undone
    pub fn undo_size(&self) -> usize {
        self.applied.len()
    }

    /// Number of transactions that can be redone
    pub fn redo_size(&self) -> usize {
        self.undone.len()
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }
}

impl Default for TransactionStack {
    fn default() -> Self {
        Self::new()
    }
}
