//! Token producers.
//!
//! The parser pulls tokens through [`TokenSource`]. Both producers deliver
//! tokens in order, exactly once, up to and including one `Eof`; a
//! [`LexError`] is delivered in place of a token and ends the sequence.
//! Once the sequence has ended, every further request returns the same
//! terminal item again.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use kest_ir::{Token, TokenKind};
use tracing::{debug, trace, warn};

use crate::lex_error::LexError;
use crate::scanner::Scanner;

/// A pull-based supply of tokens.
pub trait TokenSource {
    /// The next token, or the error that ended the sequence.
    fn next_token(&mut self) -> Result<Token, LexError>;
}

type Item = Result<Token, LexError>;

/// `true` for the item that ends a token sequence.
fn is_terminal(item: &Item) -> bool {
    match item {
        Ok(token) => token.is(TokenKind::Eof),
        Err(_) => true,
    }
}

/// Pull every token from `tokens`, up to and including `Eof`.
pub fn collect_tokens(mut tokens: impl TokenSource) -> Result<Vec<Token>, LexError> {
    let mut out = Vec::new();
    loop {
        let token = tokens.next_token()?;
        let done = token.is(TokenKind::Eof);
        out.push(token);
        if done {
            return Ok(out);
        }
    }
}

// ─── Lazy iterator ──────────────────────────────────────────────────────

/// Scans on demand on the caller's thread.
pub struct TokenStream {
    scanner: Scanner,
    finished: Option<Item>,
    /// Whether the iterator has yielded its terminal item.
    exhausted: bool,
}

impl TokenStream {
    pub fn new(source: &str) -> Self {
        TokenStream {
            scanner: Scanner::new(source),
            finished: None,
            exhausted: false,
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(done) = &self.finished {
            return done.clone();
        }
        let item = self.scanner.scan();
        if is_terminal(&item) {
            self.finished = Some(item.clone());
        }
        item
    }
}

/// Yields every token up to and including `Eof` (or the first error), then
/// stops.
impl Iterator for TokenStream {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let item = self.next_token();
        self.exhausted = is_terminal(&item);
        Some(item)
    }
}

// ─── Rendezvous thread ──────────────────────────────────────────────────

/// Scans on a dedicated thread, handing over one token at a time.
///
/// The channel has zero capacity: the producer blocks on every token until
/// the consumer takes it, so the scanner is never ahead of the parser by
/// more than the token in hand. Dropping the consumer disconnects the
/// channel, which unblocks and stops the producer, and then joins it.
pub struct ChannelTokens {
    receiver: Option<Receiver<Item>>,
    handle: Option<JoinHandle<()>>,
    finished: Option<Item>,
}

impl ChannelTokens {
    /// Start a producer thread over a copy of `source`.
    ///
    /// If the thread cannot be started, the first request fails with
    /// [`LexError::producer_stopped`].
    pub fn spawn(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let (sender, receiver) = channel::bounded(0);
        let spawned = thread::Builder::new()
            .name("kest-lexer".to_string())
            .spawn(move || produce(Scanner::from_chars(chars), &sender));

        match spawned {
            Ok(handle) => ChannelTokens {
                receiver: Some(receiver),
                handle: Some(handle),
                finished: None,
            },
            Err(err) => {
                warn!(%err, "could not start token producer thread");
                ChannelTokens {
                    receiver: None,
                    handle: None,
                    finished: Some(Err(LexError::producer_stopped())),
                }
            }
        }
    }
}

fn produce(mut scanner: Scanner, sender: &Sender<Item>) {
    debug!("token producer started");
    let mut sent = 0usize;
    loop {
        let item = scanner.scan();
        let last = is_terminal(&item);
        if sender.send(item).is_err() {
            trace!(sent, "token consumer hung up");
            break;
        }
        sent += 1;
        if last {
            break;
        }
    }
    debug!(sent, "token producer stopped");
}

impl TokenSource for ChannelTokens {
    fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(done) = &self.finished {
            return done.clone();
        }
        let item = match &self.receiver {
            Some(receiver) => receiver
                .recv()
                .unwrap_or_else(|_| Err(LexError::producer_stopped())),
            None => Err(LexError::producer_stopped()),
        };
        if is_terminal(&item) {
            self.finished = Some(item.clone());
        }
        item
    }
}

impl Drop for ChannelTokens {
    fn drop(&mut self) {
        // Disconnect first so a producer blocked in `send` wakes up.
        drop(self.receiver.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("token producer thread panicked");
            }
        }
    }
}
