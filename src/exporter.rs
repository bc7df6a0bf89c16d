//! Export pipeline: log in, open the archive, export every app, close the archive.

use crate::archive::ArchiveWriter;
use crate::config::Config;
use crate::console::ConsoleClient;
use crate::error::{ExportError, Result, Stage};
use crate::types::{ExportSummary, SessionToken};
use futures::TryStreamExt;
use tracing::{debug, info};

/// Run a complete export with the given configuration
///
/// Stops at the first error. Once the archive exists it is always finished,
/// so a failed run still leaves a readable zip holding every application
/// exported before the failure.
pub async fn run_export(config: &Config) -> std::result::Result<ExportSummary, ExportError> {
    config
        .validate()
        .map_err(|e| ExportError::new(Stage::Login, e))?;

    let client = ConsoleClient::new(config).map_err(|e| ExportError::new(Stage::Login, e))?;

    let token = client
        .login(&config.credentials)
        .await
        .map_err(|e| ExportError::new(Stage::Login, e))?;

    let mut archive = ArchiveWriter::create(&config.output_path)
        .map_err(|e| ExportError::new(Stage::CreateZip, e))?;

    let exported = export_apps(&client, &token, config.include_secret, &mut archive).await;
    let finished = archive.finish();

    let exported = exported.map_err(|e| ExportError::new(Stage::Apps, e))?;
    finished.map_err(|e| ExportError::new(Stage::Apps, e))?;

    info!(
        exported,
        output = %config.output_path.display(),
        "export complete"
    );

    Ok(ExportSummary {
        exported,
        output: config.output_path.clone(),
    })
}

/// Export every listed application into `archive`, returning how many were written
pub async fn export_apps(
    client: &ConsoleClient,
    token: &SessionToken,
    include_secret: bool,
    archive: &mut ArchiveWriter,
) -> Result<usize> {
    let apps = client.list_apps(token).into_stream();
    let mut apps = std::pin::pin!(apps);
    let mut exported = 0;

    while let Some(app) = apps.try_next().await? {
        debug!(app_id = %app.id, "exporting application");
        let document = client.export_app(token, &app.id, include_secret).await?;
        archive.add_entry(&app.id.entry_name(), document.as_bytes())?;
        exported += 1;
        info!(app_id = %app.id, exported, "exported application");
    }

    Ok(exported)
}
