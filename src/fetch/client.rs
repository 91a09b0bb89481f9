use async_trait::async_trait;
use reqwest::{Request, Response};

/// Minimal HTTP execution seam.
///
/// The API client is generic over this trait so tests can substitute a stub
/// and auth decorators can rewrite requests before they go out.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
