//! `tandem --validate` command

use anyhow::Result;

use tandem::ops::validate;
use tandem::util::{Shell, SystemExecutor};
use tandem::Workspace;

pub fn execute(ws: &Workspace, shell: &Shell) -> Result<bool> {
    let mut exec = SystemExecutor::new();
    validate(ws, &mut exec, shell)
}
