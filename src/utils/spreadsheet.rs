//! Rendering verification results into an `.xlsx` workbook.
use std::{fs, io, path::Path};

use chrono::SecondsFormat;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tempfile::{Builder, TempPath};

use crate::db::models::verification_result::VerificationResult;

/// Column headers, in column order.
pub const HEADERS: [&str; 6] = [
    "Name",
    "UID",
    "Address",
    "Final Remark",
    "Document Type",
    "Timestamp",
];

/// Name of the single worksheet.
pub const WORKSHEET_NAME: &str = "Verification Results";

/// File name offered to the client when downloading an export.
pub const EXPORT_FILE_NAME: &str = "verification_results.xlsx";

/// Render `results` into a workbook: a bold header row, then one row per result.
///
/// # Errors
/// Errors if the worksheet can't be written, e.g. a cell exceeds the xlsx string limit.
pub fn render(results: &[VerificationResult]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    for (col, header) in (0_u16..).zip(HEADERS) {
        worksheet.write_string_with_format(0, col, header, &bold)?;
    }
    for (row, result) in (1_u32..).zip(results) {
        let timestamp = result
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        let cells = [
            result.name.as_str(),
            result.uid.as_str(),
            result.address.as_str(),
            result.final_remark.as_str(),
            result.document_type.as_str(),
            timestamp.as_str(),
        ];
        for (col, cell) in (0_u16..).zip(cells) {
            worksheet.write_string(row, col, cell)?;
        }
    }
    worksheet.autofit();
    Ok(workbook)
}

/// An export written to disk for the duration of one request.
///
/// Each export gets its own randomly named file, so concurrent exports never share one.
/// Call [`ExportFile::close`] once done; if the value is dropped instead, e.g. on an
/// error path, the file is still removed, silently.
#[derive(Debug)]
pub struct ExportFile {
    /// Location of the file, removed with the value.
    path: TempPath,
}

impl ExportFile {
    /// Save `workbook` to a fresh file inside `dir`, creating `dir` if needed.
    ///
    /// # Errors
    /// Errors if the directory can't be created or the workbook can't be saved.
    pub fn write(dir: &Path, workbook: &mut Workbook) -> anyhow::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = Builder::new()
            .prefix("verification_results-")
            .suffix(".xlsx")
            .tempfile_in(dir)?
            .into_temp_path();
        workbook.save(&path)?;
        tracing::debug!("Wrote export to {}", path.display());
        Ok(Self { path })
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file.
    ///
    /// # Errors
    /// Errors if the file can't be read.
    pub fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    /// Remove the file. A failed removal is logged, not raised.
    pub fn close(self) {
        let shown = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => tracing::debug!("Removed export {shown}"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!("Could not remove export {shown}: {err}"),
        }
    }
}
