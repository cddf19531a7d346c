// src/exec/command.rs

//! Process construction and synchronous execution for a single dispatch.

use std::process::Stdio;

use anyhow::{anyhow, Context, Result};
use tokio::process::Command;

use crate::exec::template::CommandTemplate;
use crate::types::DispatchMode;

/// Build the process for `line` according to `mode`.
///
/// - `Shell`: the rendered string goes to `sh -c` (`cmd /C` on Windows).
/// - `Argv`: the first word is the program, the rest its arguments.
///
/// The child inherits stdout/stderr so its output reaches the user; stdin
/// is closed so a command that reads input cannot stall the watch loop.
pub fn build_command(mode: DispatchMode, template: &CommandTemplate, line: &str) -> Result<Command> {
    let mut cmd = match mode {
        DispatchMode::Shell => {
            let rendered = template.render(line);
            if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(rendered);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(rendered);
                c
            }
        }
        DispatchMode::Argv => {
            let argv = template.render_argv(line);
            let (program, args) = argv
                .split_first()
                .ok_or_else(|| anyhow!("command template {:?} has no program", template.as_str()))?;
            let mut c = Command::new(program);
            c.args(args);
            c
        }
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    Ok(cmd)
}

/// Spawn `cmd` and wait for it to exit, returning its exit code (`None` when
/// killed by a signal).
pub async fn run_to_completion(mut cmd: Command) -> Result<Option<i32>> {
    let mut child = cmd.spawn().context("spawning triggered command")?;
    let status = child
        .wait()
        .await
        .context("waiting for triggered command")?;
    Ok(status.code())
}
