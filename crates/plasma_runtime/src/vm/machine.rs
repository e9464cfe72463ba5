use std::io::{BufRead, Write};

use plasma_ir::{Body, validate};

use crate::context::Streams;
use crate::core::{self, ValueRef, names};
use crate::{Context, ExecResult, ExecutionError, RuntimeConfig, protocol};

/// Host entry point: validates bytecode and runs each program in a fresh
/// context.
///
/// The streams survive between runs, and so does the id counter, so value
/// ids stay unique across programs run by the same machine.
pub struct VirtualMachine {
    config: RuntimeConfig,
    streams: Option<Streams>,
    next_id: u64,
}

impl Default for VirtualMachine {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

impl VirtualMachine {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            streams: None,
            next_id: 1,
        }
    }

    pub fn with_streams(
        config: RuntimeConfig,
        stdin: impl BufRead + 'static,
        stdout: impl Write + 'static,
        stderr: impl Write + 'static,
    ) -> Self {
        Self {
            config,
            streams: Some(Streams {
                stdin: Box::new(stdin),
                stdout: Box::new(stdout),
                stderr: Box::new(stderr),
            }),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Validate and execute `code`.
    ///
    /// `value` holds the string form of the result unless it is None. An
    /// uncaught error is reported on stderr and returned as
    /// [`ExecutionError::Uncaught`].
    pub fn run(&mut self, code: impl Into<Body>) -> Result<ExecResult, ExecutionError> {
        let code = code.into();
        validate(&code)?;

        let streams = self.streams.take().unwrap_or_default();
        let mut ctx = Context::with_streams(self.config, streams, self.next_id);
        let outcome = run_in(&mut ctx, code);
        ctx.flush_out();
        if let Err(ExecutionError::Uncaught { type_name, message }) = &outcome {
            if let Err(err) = writeln!(ctx.streams.stderr, "{type_name}: {message}") {
                log::warn!("stderr write failed: {err}");
            }
        }
        let output = std::mem::take(&mut ctx.output);
        let (streams, next_id) = ctx.into_parts();
        self.streams = Some(streams);
        self.next_id = next_id;

        outcome.map(|value| ExecResult { value, output })
    }
}

fn run_in(ctx: &mut Context, code: Body) -> Result<Option<String>, ExecutionError> {
    let result = ctx.execute(code).map_err(|error| uncaught(ctx, error))?;
    if result == ctx.get_none() {
        return Ok(None);
    }
    match protocol::to_string(ctx, result) {
        Ok(text) => Ok(Some(text)),
        Err(error) => Err(uncaught(ctx, error)),
    }
}

/// Describe an error that reached the top level. Members of the error
/// family report their message; anything else its string form.
fn uncaught(ctx: &mut Context, error: ValueRef) -> ExecutionError {
    let type_name = crate::errors::type_name_of(ctx, error);
    let master = ctx.master();
    let is_error = match ctx.lookup(master, names::RUNTIME_ERROR) {
        Some(runtime_error) => core::implements(ctx, error, runtime_error).unwrap_or(false),
        None => false,
    };
    let message = if is_error {
        ctx.value(error).string.clone()
    } else {
        protocol::to_string(ctx, error).unwrap_or_else(|_| type_name.clone())
    };
    log::debug!("uncaught {type_name}: {message}");
    ExecutionError::Uncaught { type_name, message }
}
