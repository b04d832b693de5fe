//! Built-in functions registered into the root scope.
//!
//! | name      | effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `print`   | writes the string forms of its arguments, concatenated     |
//! | `println` | same as `print`, then a newline                            |
//!
//! Both return nil and accept any number of arguments.

use std::sync::Arc;

use kest_eval::{Environment, SharedPrintHandler, Value};

/// Define every built-in in `env`, writing output through `handler`.
pub fn register_builtins(env: &Environment, handler: &SharedPrintHandler) {
    let out = Arc::clone(handler);
    env.define(
        "print",
        Value::native("print", move |args| {
            out.print(&concat(args));
            Ok(Value::Nil)
        }),
    );

    let out = Arc::clone(handler);
    env.define(
        "println",
        Value::native("println", move |args| {
            out.println(&concat(args));
            Ok(Value::Nil)
        }),
    );
}

fn concat(args: &[Value]) -> String {
    args.iter().map(ToString::to_string).collect()
}
