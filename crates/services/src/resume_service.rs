use std::sync::Arc;

use tracing::info;

use campusfit_core::model::{ResumeAnalysis, ResumeUpload};

use crate::api::PlacementApi;
use crate::error::ResumeServiceError;

#[derive(Clone)]
pub struct ResumeService {
    api: Arc<dyn PlacementApi>,
}

impl ResumeService {
    #[must_use]
    pub fn new(api: Arc<dyn PlacementApi>) -> Self {
        Self { api }
    }

    /// Check the file and send it for analysis.
    ///
    /// # Errors
    ///
    /// Returns `ResumeServiceError::Invalid` for an empty file or an
    /// unsupported extension, `ResumeServiceError::Api` if the upload fails.
    pub async fn analyze(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        job_description: Option<String>,
    ) -> Result<ResumeAnalysis, ResumeServiceError> {
        let upload = ResumeUpload::new(file_name, bytes, job_description)?;
        let job_aware = upload.job_description().is_some();
        let size = upload.bytes().len();
        let analysis = self.api.upload_resume(upload).await?;
        info!(
            file_name,
            size,
            job_aware,
            score = analysis.overall_score(),
            "resume analysed"
        );
        Ok(analysis)
    }
}
