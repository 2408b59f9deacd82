use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use super::{
    messages::{
        ClassifierRequest, ClassifierResponse, ModelInfo, ModelList, PredictionRow,
        SelectModelRequest,
    },
    training::{TrainJob, TrainRequest, TrainStatus, TRAIN_ALGORITHM},
};
use crate::{
    catalog::CatalogRow,
    env_state::{ClassifierConfig, HttpEnv},
    koiviz_errors::KoivizError,
};

/// Async client of the prediction/training service.
///
/// Every call is a single request: no retry, no cancellation. Errors leave any local
/// state untouched; callers decide whether to apply a successful response.
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    env: HttpEnv,
}

impl ClassifierClient {
    pub fn new(config: ClassifierConfig) -> Result<Self, KoivizError> {
        Ok(ClassifierClient {
            env: HttpEnv::new(config)?,
        })
    }

    pub fn from_env(env: HttpEnv) -> Self {
        ClassifierClient { env }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.env.config
    }

    /// Classify canonical rows.
    ///
    /// Arguments
    /// ---------
    /// * `rows`: padded canonical rows, sent in order
    ///
    /// Return
    /// ------
    /// * the prediction rows, index-aligned with `rows` by the service contract
    /// * [`KoivizError::ClassifierRejected`] when the service answers `ok = false`
    pub async fn predict(&self, rows: &[CatalogRow]) -> Result<Vec<PredictionRow>, KoivizError> {
        let request = ClassifierRequest::new(rows.to_vec());
        let response: ClassifierResponse = self
            .env
            .post_json(&self.env.config.predict_path, &request)
            .await?;

        if !response.ok {
            warn!(rows = rows.len(), "classifier rejected the prediction request");
            return Err(KoivizError::ClassifierRejected);
        }
        info!(
            sent = rows.len(),
            received = response.rows.len(),
            "classifier response received"
        );
        Ok(response.rows)
    }

    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, KoivizError> {
        let list: ModelList = self.env.get_json(&self.env.config.models_path).await?;
        Ok(list.models)
    }

    /// Make `model_id` the model used by later predictions.
    pub async fn select_model(&self, model_id: &str) -> Result<(), KoivizError> {
        self.env
            .post_json_unit(
                &self.env.config.select_model_path,
                &SelectModelRequest { model_id },
            )
            .await?;
        info!(model_id, "classifier model selected");
        Ok(())
    }

    /// Submit a warm-start training job.
    ///
    /// Arguments
    /// ---------
    /// * `request`: target and base model ids, hyperparameters
    /// * `file_name`: name announced for the uploaded dataset
    /// * `dataset`: CSV bytes of the training set
    ///
    /// Return
    /// ------
    /// * the job handle to poll with [`ClassifierClient::training_status`]
    pub async fn start_training(
        &self,
        request: &TrainRequest,
        file_name: &str,
        dataset: Vec<u8>,
    ) -> Result<TrainJob, KoivizError> {
        let dataset_part = Part::bytes(dataset)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;

        let form = Form::new()
            .text("algo", TRAIN_ALGORITHM)
            .text("model_id", request.model_id.clone())
            .text("warm_start", "true")
            .text("base_model_id", request.base_model_id.clone())
            .text("hparams", request.hyperparams.to_json()?)
            .part("dataset_file", dataset_part);

        let job: TrainJob = self
            .env
            .post_multipart(&self.env.config.train_path, form)
            .await?;
        info!(job_id = %job.job_id, model_id = %request.model_id, "training job submitted");
        Ok(job)
    }

    pub async fn training_status(&self, job_id: &str) -> Result<TrainStatus, KoivizError> {
        let path = format!(
            "{}/{}",
            self.env.config.train_path.trim_end_matches('/'),
            job_id
        );
        self.env.get_json(&path).await
    }
}
