//! Call tracking for the interpreter.
//!
//! Every call to a user-defined function pushes a [`CallFrame`] onto the
//! interpreter's [`CallStack`] and pops it on return. The depth check is
//! part of `push`, so unbounded script recursion becomes a runtime error
//! long before the native stack runs out. When an error leaves a function
//! body, the live frames are snapshotted into the error's backtrace.

use std::sync::Arc;

use kest_ir::{FunctionDecl, Position};

use crate::errors::{call_depth_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// Frames kept in a captured backtrace; outer calls beyond this are
/// only counted.
const MAX_BACKTRACE_FRAMES: usize = 16;

/// One active call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    pub function: Arc<FunctionDecl>,
    /// Where the call was made, not where the function was defined.
    pub call_position: Position,
}

impl CallFrame {
    pub fn name(&self) -> &str {
        self.function.display_name()
    }
}

/// Live call stack with a depth limit.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing if the stack is already at its limit.
    ///
    /// The frame is not pushed on failure.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(call_depth_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot the innermost frames, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .take(MAX_BACKTRACE_FRAMES)
            .map(|frame| BacktraceFrame {
                name: frame.name().to_string(),
                call_position: frame.call_position,
            })
            .collect();
        let omitted = self.frames.len().saturating_sub(MAX_BACKTRACE_FRAMES);
        EvalBacktrace::new(frames, omitted)
    }

    /// Attach a snapshot of this stack to `err` unless it already has one.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}
