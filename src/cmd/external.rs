// src/cmd/external.rs

use std::path::PathBuf;

use crate::cmd::builtin::{CmdCd, CmdReadTextFile, CmdWriteTextFile};
use crate::cmd::seq::CmdSeq;
use crate::cmd::{BoxFuture, CmdOpts, Runnable};
use crate::exec::{run_cmd_desc, CmdDesc};
use crate::parse::{parse_command_line, split_command_block};
use crate::result::CmdResult;
use crate::types::CmdArgs;

/// A process-backed unit: runs an external program.
///
/// Commands feel like shell commands, but no shell is involved; the program
/// is executed directly with the given arguments.
///
/// ```no_run
/// # async fn demo() {
/// use cmdseq::cmd::{Cmd, Runnable};
///
/// let mut ls = Cmd::new("ls", "-la /tmp");
/// let result = ls.run().await;
/// assert!(result.success);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Cmd {
    cmd: String,
    opts: CmdOpts,
    description: Option<String>,
}

impl Cmd {
    /// `args` may be a list or a raw string; a raw string is tokenized when
    /// the command runs.
    pub fn new(cmd: impl Into<String>, args: impl Into<CmdArgs>) -> Self {
        Self {
            cmd: cmd.into(),
            opts: CmdOpts::with_args(args),
            description: None,
        }
    }

    pub fn from_desc(desc: CmdDesc) -> Self {
        let mut opts = CmdOpts::with_args(desc.args);
        opts.sudo_mode = desc.sudo_mode;
        if let Some(cwd) = desc.cwd {
            opts.set_cwd(cwd);
        }
        if let Some(quiet) = desc.quiet {
            opts.set_quiet(quiet);
        }

        Self {
            cmd: desc.cmd,
            opts,
            description: desc.description,
        }
    }

    /// Tokenize a whole line; the first token is the program.
    pub fn from_line(line: &str) -> Self {
        let parsed = parse_command_line(line, false);
        Self::new(parsed.command, parsed.args)
    }

    pub fn command(&self) -> &str {
        &self.cmd
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Snapshot of this command's current configuration.
    pub fn desc(&self) -> CmdDesc {
        CmdDesc {
            cmd: self.cmd.clone(),
            args: self.opts.args.clone(),
            sudo_mode: self.opts.sudo_mode,
            cwd: self.opts.explicit_cwd().map(PathBuf::from),
            quiet: self.opts.explicit_quiet(),
            description: self.description.clone(),
        }
    }

    /// Build a sequence from a multiline block, one command per logical line
    /// (see [`split_command_block`]). Execution stops at the first failure.
    ///
    /// ```no_run
    /// # async fn demo() {
    /// use cmdseq::cmd::{Cmd, Runnable};
    ///
    /// let mut setup = Cmd::seq(
    ///     "
    ///     mkdir -p build
    ///     cp -R \\
    ///       assets \\
    ///       build/
    ///     ",
    /// );
    /// let result = setup.run().await;
    /// # }
    /// ```
    pub fn seq(block: &str) -> CmdSeq {
        CmdSeq::new(split_command_block(block))
    }

    pub fn cd(path: impl Into<PathBuf>) -> CmdCd {
        CmdCd::new(path)
    }

    pub fn read_text_file(path: impl Into<PathBuf>) -> CmdReadTextFile {
        CmdReadTextFile::new(path)
    }

    pub fn write_text_file(path: impl Into<PathBuf>, text: impl Into<String>) -> CmdWriteTextFile {
        CmdWriteTextFile::new(path, text)
    }
}

impl Runnable for Cmd {
    fn description(&self) -> String {
        self.desc().description_text()
    }

    fn opts(&self) -> &CmdOpts {
        &self.opts
    }

    fn opts_mut(&mut self) -> &mut CmdOpts {
        &mut self.opts
    }

    fn run(&mut self) -> BoxFuture<'_, CmdResult> {
        let desc = self.desc();
        Box::pin(async move { run_cmd_desc(&desc).await })
    }
}

impl From<CmdDesc> for Cmd {
    fn from(desc: CmdDesc) -> Self {
        Cmd::from_desc(desc)
    }
}
