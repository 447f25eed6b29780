use chrono::Local;

use crate::api::HttpBackend;
use crate::domain::filter::FilterState;
use crate::query::export_query;
use crate::screens::ScreenSpec;
use crate::services::{ServiceError, ServiceResult};

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// A CSV file ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Downloads the backend's CSV export of `screen` for the given filters.
pub async fn export_csv(
    screen: &ScreenSpec,
    backend: &HttpBackend,
    filters: &FilterState,
) -> ServiceResult<CsvExport> {
    let endpoint = screen
        .export
        .ok_or_else(|| ServiceError::NotFound(format!("{} export", screen.key)))?;

    let built = export_query(screen, filters);
    for warning in &built.warnings {
        log::warn!("{} export: {warning}", screen.key);
    }
    let path = if built.query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{endpoint}?{}", built.query)
    };

    let download = backend.download(&path).await?;

    Ok(CsvExport {
        filename: export_filename(screen.key),
        content_type: download
            .content_type
            .unwrap_or_else(|| CSV_CONTENT_TYPE.to_string()),
        bytes: download.bytes,
    })
}

pub fn export_filename(screen_key: &str) -> String {
    format!(
        "{screen_key}-export-{}.csv",
        Local::now().format("%Y%m%d%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_timestamped() {
        let name = export_filename("audit-logs");
        assert!(name.starts_with("audit-logs-export-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "audit-logs-export-".len() + 14 + 4);
    }
}
