//! `tandem --clean` command

use anyhow::Result;

use tandem::ops::clean;
use tandem::util::Shell;
use tandem::Workspace;

pub fn execute(ws: &Workspace, shell: &Shell) -> Result<bool> {
    clean(ws, shell)?;
    Ok(true)
}
