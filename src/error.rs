use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("io-error: {0}")]
    Io(#[from] io::Error),

    #[error("http-error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http-status: {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("gltf-error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("empty-asset: {0} contains no scene")]
    EmptyAsset(String),

    #[error("asset-task: {0}")]
    AssetTask(String),

    #[error("wgpu::CreateSurfaceError: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("wgpu::RequestAdapterError: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("wgpu::RequestDeviceError: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("winit::error::EventLoopError: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("winit::error::OsError: {0}")]
    Os(#[from] winit::error::OsError),
}

impl From<tokio::task::JoinError> for ViewerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ViewerError::AssetTask(err.to_string())
    }
}
