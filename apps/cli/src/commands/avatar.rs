//! `gobarber avatar`

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use gobarber_core::forms::ProfileForm;
use gobarber_core::{AppContext, Route};

use crate::output;

/// Execute the avatar command.
pub async fn execute(context: &Arc<AppContext>, file: &Path) -> anyhow::Result<()> {
    super::require(context, Route::Profile)?;

    let contents = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file.file_name().map_or_else(|| "avatar".to_string(), |name| name.to_string_lossy().into_owned());

    let form = ProfileForm::new(context.clone());
    let outcome = form.change_avatar(&file_name, contents).await;
    output::report(context, outcome)
}
