use anyhow::{Context, Result};
use assocsync_core::Reconciler;

use crate::cli::OutputFormat;
use crate::output::{print_association, print_state, print_success};

pub async fn create(
    reconciler: &Reconciler,
    instance_id: &str,
    function_arn: &str,
    format: OutputFormat,
) -> Result<()> {
    let association = reconciler.create(instance_id, function_arn).await?;
    print_association(&association, format)
}

pub async fn read(reconciler: &Reconciler, id: &str, format: OutputFormat) -> Result<()> {
    let association = reconciler.read(id).await?;
    print_association(&association, format)
}

pub async fn delete(reconciler: &Reconciler, id: &str) -> Result<()> {
    reconciler.delete(id).await?;
    print_success(&format!("Deleted {id}"));
    Ok(())
}

pub async fn import(reconciler: &Reconciler, id: &str, format: OutputFormat) -> Result<()> {
    let association = reconciler
        .import(id)
        .await
        .with_context(|| format!("Cannot import {:?}", id.trim()))?;
    print_association(&association, format)
}

pub async fn status(reconciler: &Reconciler, id: &str, format: OutputFormat) -> Result<()> {
    let state = reconciler.observe(id).await?;
    print_state(id, state, format)
}
