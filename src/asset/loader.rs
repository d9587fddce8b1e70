use crate::asset::gltf_scene::parse_scene;
use crate::asset::types::{LoadProgress, SceneAsset};
use crate::error::ViewerError;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tokio::sync::{mpsc, oneshot};

const READ_CHUNK: usize = 64 * 1024;
/// Upper bound on buffer space reserved from a reported length
const MAX_PREALLOC: u64 = 64 << 20;

fn initial_capacity(total: Option<u64>) -> usize {
    total.unwrap_or(0).min(MAX_PREALLOC) as usize
}

/// Where the model bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    File(PathBuf),
    Url(String),
}

impl AssetSource {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            AssetSource::Url(location.to_string())
        } else {
            AssetSource::File(PathBuf::from(location))
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            AssetSource::File(path) => path.display().to_string(),
            AssetSource::Url(url) => url.clone(),
        }
    }
}

/// Read a local file in chunks, reporting progress after each one
pub async fn load_from_file(
    path: &std::path::Path,
    progress: &mpsc::UnboundedSender<LoadProgress>,
) -> Result<Vec<u8>, ViewerError> {
    let mut file = tokio::fs::File::open(path).await?;
    let total = file.metadata().await.ok().map(|m| m.len());
    let mut data = Vec::with_capacity(initial_capacity(total));
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let n = file.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..n]);
        let _ = progress.send(LoadProgress {
            loaded: data.len() as u64,
            total,
        });
    }
    Ok(data)
}

/// Download over HTTP, reporting progress per received chunk
pub async fn download(
    url: &str,
    progress: &mpsc::UnboundedSender<LoadProgress>,
) -> Result<Vec<u8>, ViewerError> {
    let mut response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(ViewerError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }
    let total = response.content_length();
    let mut data = Vec::with_capacity(initial_capacity(total));
    while let Some(chunk) = response.chunk().await? {
        data.extend_from_slice(&chunk);
        let _ = progress.send(LoadProgress {
            loaded: data.len() as u64,
            total,
        });
    }
    Ok(data)
}

/// Fetch and decode the model. Decoding runs on the blocking pool.
pub async fn load_asset(
    source: AssetSource,
    progress: mpsc::UnboundedSender<LoadProgress>,
) -> Result<SceneAsset, ViewerError> {
    let bytes = match &source {
        AssetSource::File(path) => load_from_file(path, &progress).await?,
        AssetSource::Url(url) => download(url, &progress).await?,
    };
    let name = source.display_name();
    tokio::task::spawn_blocking(move || parse_scene(&bytes, &name)).await?
}

/// In-flight model load: a progress stream and a single result
pub struct AssetLoad {
    source: AssetSource,
    progress: mpsc::UnboundedReceiver<LoadProgress>,
    result: oneshot::Receiver<Result<SceneAsset, ViewerError>>,
}

impl AssetLoad {
    /// Start loading on the given runtime
    pub fn spawn(runtime: &tokio::runtime::Handle, source: AssetSource) -> Self {
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = oneshot::channel();
        let task_source = source.clone();
        runtime.spawn(async move {
            let result = load_asset(task_source, progress_tx).await;
            let _ = result_tx.send(result);
        });
        Self {
            source,
            progress: progress_rx,
            result: result_rx,
        }
    }

    /// Drain progress reports and check for the result without blocking.
    /// Returns `Some` exactly once.
    pub fn poll(&mut self) -> Option<Result<SceneAsset, ViewerError>> {
        while let Ok(p) = self.progress.try_recv() {
            log::info!("📦 {:.2}% loaded", p.percent());
        }
        match self.result.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ViewerError::AssetTask(
                format!("loader for {} exited without a result", self.source.display_name()),
            ))),
        }
    }
}
